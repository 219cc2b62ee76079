use std::fmt;
use std::ops::Add;

use crate::error::{Error, Result};
use crate::ratio::Ratio;
use crate::time::{RelativeTime, TimingConfig};

/// A musical duration as a multiple of a whole note (1/4 is a quarter).
/// Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteLength(Ratio<i32>);

impl NoteLength {
  pub const ZERO: NoteLength = NoteLength(Ratio::new_raw(0, 1));
  pub const WHOLE: NoteLength = NoteLength(Ratio::new_raw(1, 1));
  pub const HALF: NoteLength = NoteLength(Ratio::new_raw(1, 2));
  pub const QUARTER: NoteLength = NoteLength(Ratio::new_raw(1, 4));
  pub const EIGHTH: NoteLength = NoteLength(Ratio::new_raw(1, 8));
  pub const SIXTEENTH: NoteLength = NoteLength(Ratio::new_raw(1, 16));

  pub fn new(numer: i32, denom: i32) -> Result<NoteLength> {
    NoteLength::from_ratio(Ratio::new(numer, denom)?)
  }

  pub fn from_ratio(ratio: Ratio<i32>) -> Result<NoteLength> {
    if ratio.is_negative() {
      Err(Error::invalid_range("note length", ratio, ">= 0"))
    } else {
      Ok(NoteLength(ratio))
    }
  }

  pub fn ratio(&self) -> Ratio<i32> {
    self.0
  }

  pub fn is_zero(&self) -> bool {
    self.0.is_zero()
  }

  /// Sequential accumulation.
  pub fn checked_add(self, rhs: NoteLength) -> Result<NoteLength> {
    Ok(NoteLength(self.0.checked_add(rhs.0)?))
  }

  /// Simultaneous aggregation.
  pub fn checked_max(self, other: NoteLength) -> Result<NoteLength> {
    Ok(NoteLength(self.0.checked_max(other.0)?))
  }

  pub fn dotted(self) -> Result<NoteLength> {
    Ok(NoteLength(self.0.checked_mul(Ratio::new_raw(3, 2))?))
  }

  /// Wall-clock duration. This is the only place where a length leaves exact
  /// arithmetic.
  pub fn duration(&self, timing: &TimingConfig) -> RelativeTime {
    RelativeTime::from_seconds(self.0.to_f64() * timing.seconds_per_note())
  }
}

impl Default for NoteLength {
  fn default() -> NoteLength {
    NoteLength::ZERO
  }
}

impl Add for NoteLength {
  type Output = NoteLength;

  fn add(self, rhs: NoteLength) -> NoteLength {
    NoteLength(self.0 + rhs.0)
  }
}

impl fmt::Display for NoteLength {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}
