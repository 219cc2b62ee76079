pub mod encoder;
pub mod messages;
pub mod types;

pub use encoder::Encoder;
pub use messages::Message;
pub use types::{Channel, Key, Velocity};
