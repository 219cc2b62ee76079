use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo(f64);

impl Tempo {
  pub fn new(beats_per_minute: f64) -> Result<Tempo> {
    if beats_per_minute.is_finite() && beats_per_minute > 0.0 {
      Ok(Tempo(beats_per_minute))
    } else {
      Err(Error::invalid_range(
        "tempo",
        beats_per_minute,
        "a finite number of beats per minute > 0",
      ))
    }
  }

  pub fn beats_per_minute(&self) -> f64 {
    self.0
  }

  pub fn beats_per_second(&self) -> f64 {
    self.0 / 60.0
  }
}

impl From<Tempo> for f64 {
  fn from(item: Tempo) -> Self {
    item.0
  }
}

#[cfg(test)]
mod test {

  use super::Tempo;

  #[test]
  pub fn tempo_new() {
    let tempo = Tempo::new(120.0).unwrap();
    assert_eq!(tempo.beats_per_minute(), 120.0);
    assert_eq!(tempo.beats_per_second(), 2.0);
    assert_eq!(f64::from(tempo), 120.0);
  }

  #[test]
  pub fn tempo_rejects_non_positive() {
    assert!(Tempo::new(0.0).is_err());
    assert!(Tempo::new(-60.0).is_err());
    assert!(Tempo::new(std::f64::NAN).is_err());
    assert!(Tempo::new(std::f64::INFINITY).is_err());
  }
}
