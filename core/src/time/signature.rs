use crate::error::{Error, Result};
use crate::note_length::NoteLength;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
  beats_per_measure: u8, // numerator
  beats_per_note: u8,    // denominator
}

impl TimeSignature {
  pub const COMMON_TIME: TimeSignature = TimeSignature {
    beats_per_measure: 4,
    beats_per_note: 4,
  };

  pub const TRIPLE_TIME: TimeSignature = TimeSignature {
    beats_per_measure: 3,
    beats_per_note: 4,
  };

  pub fn new(beats_per_measure: u8, beats_per_note: u8) -> Result<TimeSignature> {
    if beats_per_measure == 0 {
      return Err(Error::invalid_range(
        "beats per measure",
        beats_per_measure,
        "> 0",
      ));
    }
    if beats_per_note == 0 {
      return Err(Error::invalid_range("beats per note", beats_per_note, "> 0"));
    }
    Ok(TimeSignature {
      beats_per_measure,
      beats_per_note,
    })
  }

  pub fn beats_per_measure(&self) -> u8 {
    self.beats_per_measure
  }

  pub fn beats_per_note(&self) -> u8 {
    self.beats_per_note
  }

  /// Length of a full measure, e.g. 3/4 of a whole note in triple time.
  pub fn measure_length(&self) -> Result<NoteLength> {
    NoteLength::new(
      i32::from(self.beats_per_measure),
      i32::from(self.beats_per_note),
    )
  }
}

#[cfg(test)]
mod test {

  use super::TimeSignature;
  use crate::error::Error;
  use crate::note_length::NoteLength;

  #[test]
  pub fn new() {
    let signature = TimeSignature::new(3, 4).unwrap();
    assert_eq!(signature.beats_per_measure(), 3);
    assert_eq!(signature.beats_per_note(), 4);
    assert_eq!(signature, TimeSignature::TRIPLE_TIME);
  }

  #[test]
  pub fn new_rejects_zero() {
    assert!(match TimeSignature::new(0, 4) {
      Err(Error::InvalidRange { .. }) => true,
      _ => false,
    });
    assert!(TimeSignature::new(4, 0).is_err());
  }

  #[test]
  pub fn measure_length() {
    assert_eq!(TimeSignature::COMMON_TIME.measure_length(), Ok(NoteLength::WHOLE));
    assert_eq!(
      TimeSignature::TRIPLE_TIME.measure_length(),
      NoteLength::new(3, 4)
    );
    assert_eq!(
      TimeSignature::new(6, 8).unwrap().measure_length(),
      NoteLength::new(3, 4)
    );
  }
}
