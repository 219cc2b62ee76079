use crate::error::{Error, Result};
use crate::time::{Tempo, TimeSignature};

/// Tempo and time signature of a whole piece. Validated on construction, so
/// converting note lengths into seconds never fails afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingConfig {
  signature: TimeSignature,
  tempo: Tempo,
  seconds_per_note: f64,
}

impl TimingConfig {
  pub fn new(signature: TimeSignature, tempo: Tempo) -> Result<TimingConfig> {
    let beats_per_note = f64::from(signature.beats_per_note());
    let seconds_per_note = beats_per_note / tempo.beats_per_second();
    if !seconds_per_note.is_finite() || seconds_per_note <= 0.0 {
      return Err(Error::DivideByZero);
    }
    Ok(TimingConfig {
      signature,
      tempo,
      seconds_per_note,
    })
  }

  pub fn signature(&self) -> &TimeSignature {
    &self.signature
  }

  pub fn tempo(&self) -> &Tempo {
    &self.tempo
  }

  /// Seconds taken by a whole note.
  pub fn seconds_per_note(&self) -> f64 {
    self.seconds_per_note
  }
}
