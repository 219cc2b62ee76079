pub mod clock;
pub mod signature;
pub mod tempo;
pub mod timing;

pub use self::clock::{AbsoluteTime, RelativeTime};
pub use self::signature::TimeSignature;
pub use self::tempo::Tempo;
pub use self::timing::TimingConfig;
