use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Seconds between the Unix epoch and 2020-01-01T00:00:00Z, the anchor of
/// every [`AbsoluteTime`].
pub const EPOCH_UNIX_SECONDS: u64 = 1_577_836_800;

/// An instant, in seconds since 2020-01-01T00:00:00Z
#[derive(Debug, PartialOrd, PartialEq, Clone, Copy)]
pub struct AbsoluteTime(f64);

impl AbsoluteTime {
  pub fn from_seconds(seconds: f64) -> AbsoluteTime {
    AbsoluteTime(seconds)
  }

  pub fn from_system_time(time: SystemTime) -> AbsoluteTime {
    let anchor = UNIX_EPOCH + Duration::from_secs(EPOCH_UNIX_SECONDS);
    match time.duration_since(anchor) {
      Ok(after) => AbsoluteTime(after.as_secs_f64()),
      Err(err) => AbsoluteTime(-err.duration().as_secs_f64()),
    }
  }

  pub fn seconds(&self) -> f64 {
    self.0
  }

  pub fn total_cmp(&self, other: &AbsoluteTime) -> std::cmp::Ordering {
    self.0.total_cmp(&other.0)
  }
}

impl Add<RelativeTime> for AbsoluteTime {
  type Output = AbsoluteTime;

  fn add(self, rhs: RelativeTime) -> AbsoluteTime {
    AbsoluteTime(self.0 + rhs.0)
  }
}

impl AddAssign<RelativeTime> for AbsoluteTime {
  fn add_assign(&mut self, rhs: RelativeTime) {
    *self = *self + rhs;
  }
}

impl Sub<RelativeTime> for AbsoluteTime {
  type Output = AbsoluteTime;

  fn sub(self, rhs: RelativeTime) -> AbsoluteTime {
    AbsoluteTime(self.0 - rhs.0)
  }
}

impl Sub for AbsoluteTime {
  type Output = RelativeTime;

  fn sub(self, rhs: AbsoluteTime) -> RelativeTime {
    RelativeTime(self.0 - rhs.0)
  }
}

impl fmt::Display for AbsoluteTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{:.3}s since 2020", self.0)
  }
}

///! A signed duration in seconds
#[derive(Debug, PartialOrd, PartialEq, Clone, Copy)]
pub struct RelativeTime(f64);

impl RelativeTime {
  pub fn zero() -> RelativeTime {
    RelativeTime(0.0)
  }

  pub fn from_seconds(seconds: f64) -> RelativeTime {
    RelativeTime(seconds)
  }

  pub fn from_duration(duration: Duration) -> RelativeTime {
    RelativeTime(duration.as_secs_f64())
  }

  pub fn seconds(&self) -> f64 {
    self.0
  }

  pub fn is_negative(&self) -> bool {
    self.0 < 0.0
  }

  /// Negative durations (already past due) become zero.
  pub fn to_duration(&self) -> Duration {
    if self.0 > 0.0 && self.0.is_finite() {
      Duration::from_secs_f64(self.0)
    } else {
      Duration::from_secs(0)
    }
  }

  pub fn max(self, other: RelativeTime) -> RelativeTime {
    if other.0 > self.0 {
      other
    } else {
      self
    }
  }
}

impl Add for RelativeTime {
  type Output = RelativeTime;

  fn add(self, rhs: RelativeTime) -> RelativeTime {
    RelativeTime(self.0 + rhs.0)
  }
}

impl AddAssign for RelativeTime {
  fn add_assign(&mut self, rhs: RelativeTime) {
    *self = *self + rhs;
  }
}

impl Sub for RelativeTime {
  type Output = RelativeTime;

  fn sub(self, rhs: RelativeTime) -> RelativeTime {
    RelativeTime(self.0 - rhs.0)
  }
}

impl SubAssign for RelativeTime {
  fn sub_assign(&mut self, rhs: RelativeTime) {
    *self = *self - rhs;
  }
}

impl Neg for RelativeTime {
  type Output = RelativeTime;

  fn neg(self) -> RelativeTime {
    RelativeTime(-self.0)
  }
}

impl fmt::Display for RelativeTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{:.3}s", self.0)
  }
}

#[cfg(test)]
mod test {
  use super::{AbsoluteTime, RelativeTime, EPOCH_UNIX_SECONDS};
  use std::time::{Duration, UNIX_EPOCH};

  #[test]
  pub fn absolute_plus_relative() {
    let time = AbsoluteTime::from_seconds(10.0) + RelativeTime::from_seconds(2.5);
    assert_eq!(time, AbsoluteTime::from_seconds(12.5));
  }

  #[test]
  pub fn absolute_add_assign() {
    let mut time = AbsoluteTime::from_seconds(10.0);
    time += RelativeTime::from_seconds(0.5);
    assert_eq!(time.seconds(), 10.5);
  }

  #[test]
  pub fn absolute_minus_absolute() {
    let delta = AbsoluteTime::from_seconds(10.0) - AbsoluteTime::from_seconds(12.0);
    assert_eq!(delta, RelativeTime::from_seconds(-2.0));
    assert!(delta.is_negative());
  }

  #[test]
  pub fn relative_plus_relative() {
    let delta = RelativeTime::from_seconds(1.5) + RelativeTime::from_seconds(0.25);
    assert_eq!(delta.seconds(), 1.75);
  }

  #[test]
  pub fn relative_sub_and_neg() {
    let mut delta = RelativeTime::from_seconds(1.5);
    delta -= RelativeTime::from_seconds(2.0);
    assert_eq!(delta, -RelativeTime::from_seconds(0.5));
  }

  #[test]
  pub fn relative_max() {
    let late = RelativeTime::from_seconds(-0.2);
    assert_eq!(late.max(RelativeTime::zero()), RelativeTime::zero());
  }

  #[test]
  pub fn to_duration_clamps_negative() {
    assert_eq!(
      RelativeTime::from_seconds(-1.0).to_duration(),
      Duration::from_secs(0)
    );
    assert_eq!(
      RelativeTime::from_seconds(0.25).to_duration(),
      Duration::from_millis(250)
    );
  }

  #[test]
  pub fn from_system_time() {
    let anchor = UNIX_EPOCH + Duration::from_secs(EPOCH_UNIX_SECONDS);
    let time = AbsoluteTime::from_system_time(anchor + Duration::from_secs(90));
    assert_eq!(time.seconds(), 90.0);
    let before = AbsoluteTime::from_system_time(anchor - Duration::from_secs(30));
    assert_eq!(before.seconds(), -30.0);
  }

  #[test]
  pub fn display() {
    assert_eq!(RelativeTime::from_seconds(0.5).to_string(), "0.500s");
    assert_eq!(
      AbsoluteTime::from_seconds(1.25).to_string(),
      "1.250s since 2020"
    );
  }
}
