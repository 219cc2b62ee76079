//! The score: an immutable tree of notes, rests, harmonies and melodies.
//!
//! Every node computes its length once, bottom-up, when it is built. Parts
//! are held behind an `Arc`, so cloning a subtree to reuse it elsewhere in a
//! score is cheap and the tree can be shared between threads.

use std::sync::Arc;

use crate::error::Result;
use crate::note_length::NoteLength;
use crate::pitch::Pitch;

#[derive(Debug, Clone, PartialEq)]
pub enum Arrangement {
  Note(Note),
  Rest(Rest),
  Harmony(Harmony),
  Melody(Melody),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
  pitch: Pitch,
  length: NoteLength,
}

impl Note {
  pub fn pitch(&self) -> Pitch {
    self.pitch
  }

  pub fn length(&self) -> NoteLength {
    self.length
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rest {
  length: NoteLength,
}

impl Rest {
  pub fn length(&self) -> NoteLength {
    self.length
  }
}

/// Parts sounding at the same time.
#[derive(Debug, Clone, PartialEq)]
pub struct Harmony {
  parts: Arc<[Arrangement]>,
  length: NoteLength,
}

impl Harmony {
  pub fn parts(&self) -> &[Arrangement] {
    &self.parts
  }

  /// The longest part.
  pub fn length(&self) -> NoteLength {
    self.length
  }
}

/// Parts played one after another.
#[derive(Debug, Clone, PartialEq)]
pub struct Melody {
  parts: Arc<[Arrangement]>,
  length: NoteLength,
}

impl Melody {
  pub fn parts(&self) -> &[Arrangement] {
    &self.parts
  }

  /// The sum of all parts.
  pub fn length(&self) -> NoteLength {
    self.length
  }
}

impl Arrangement {
  pub fn note(pitch: Pitch, length: NoteLength) -> Arrangement {
    Arrangement::Note(Note { pitch, length })
  }

  pub fn rest(length: NoteLength) -> Arrangement {
    Arrangement::Rest(Rest { length })
  }

  /// Fails only if comparing the part lengths overflows.
  pub fn harmony<I>(parts: I) -> Result<Arrangement>
  where
    I: IntoIterator<Item = Arrangement>,
  {
    let parts: Arc<[Arrangement]> = parts.into_iter().collect();
    let length = parts.iter().try_fold(NoteLength::ZERO, |longest, part| {
      longest.checked_max(part.length())
    })?;
    Ok(Arrangement::Harmony(Harmony { parts, length }))
  }

  /// Fails only if the total length overflows.
  pub fn melody<I>(parts: I) -> Result<Arrangement>
  where
    I: IntoIterator<Item = Arrangement>,
  {
    let parts: Arc<[Arrangement]> = parts.into_iter().collect();
    let length = parts.iter().try_fold(NoteLength::ZERO, |total, part| {
      total.checked_add(part.length())
    })?;
    Ok(Arrangement::Melody(Melody { parts, length }))
  }

  pub fn length(&self) -> NoteLength {
    match self {
      Arrangement::Note(note) => note.length,
      Arrangement::Rest(rest) => rest.length,
      Arrangement::Harmony(harmony) => harmony.length,
      Arrangement::Melody(melody) => melody.length,
    }
  }

  /// Number of notes in the whole tree.
  pub fn note_count(&self) -> usize {
    match self {
      Arrangement::Note(_) => 1,
      Arrangement::Rest(_) => 0,
      Arrangement::Harmony(Harmony { parts, .. }) | Arrangement::Melody(Melody { parts, .. }) => {
        parts.iter().map(Arrangement::note_count).sum()
      }
    }
  }
}

#[cfg(test)]
mod test {

  use super::Arrangement;
  use crate::error::Error;
  use crate::note_length::NoteLength;
  use crate::pitch::{Pitch, PitchClass};
  use crate::ratio::Ratio;

  fn quarter(class: PitchClass) -> Arrangement {
    Arrangement::note(Pitch::new(class, 4), NoteLength::QUARTER)
  }

  #[test]
  pub fn leaf_lengths() {
    assert_eq!(
      Arrangement::note(Pitch::C4, NoteLength::HALF).length(),
      NoteLength::HALF
    );
    assert_eq!(
      Arrangement::rest(NoteLength::EIGHTH).length(),
      NoteLength::EIGHTH
    );
  }

  #[test]
  pub fn melody_of_four_quarters_is_whole() {
    let melody = Arrangement::melody(vec![
      quarter(PitchClass::C),
      quarter(PitchClass::D),
      quarter(PitchClass::E),
      quarter(PitchClass::F),
    ])
    .unwrap();
    assert_eq!(melody.length(), NoteLength::WHOLE);
  }

  #[test]
  pub fn harmony_takes_longest_part() {
    let harmony = Arrangement::harmony(vec![
      Arrangement::note(Pitch::C4, NoteLength::WHOLE),
      Arrangement::note(Pitch::A4, NoteLength::QUARTER),
    ])
    .unwrap();
    assert_eq!(harmony.length(), NoteLength::WHOLE);

    let reversed = Arrangement::harmony(vec![
      Arrangement::note(Pitch::A4, NoteLength::QUARTER),
      Arrangement::note(Pitch::C4, NoteLength::WHOLE),
    ])
    .unwrap();
    assert_eq!(reversed.length(), NoteLength::WHOLE);
  }

  #[test]
  pub fn empty_compositions_have_zero_length() {
    assert_eq!(
      Arrangement::harmony(vec![]).unwrap().length(),
      NoteLength::ZERO
    );
    assert_eq!(
      Arrangement::melody(vec![]).unwrap().length(),
      NoteLength::ZERO
    );
  }

  #[test]
  pub fn nested_lengths() {
    let triplet = NoteLength::new(1, 12).unwrap();
    let triplets = Arrangement::melody(vec![
      Arrangement::note(Pitch::C4, triplet),
      Arrangement::note(Pitch::C4, triplet),
      Arrangement::note(Pitch::C4, triplet),
    ])
    .unwrap();
    let song = Arrangement::melody(vec![
      Arrangement::harmony(vec![triplets.clone(), quarter(PitchClass::G)]).unwrap(),
      Arrangement::rest(NoteLength::HALF),
      triplets,
    ])
    .unwrap();
    assert_eq!(song.length(), NoteLength::WHOLE);
    assert_eq!(song.note_count(), 7);
  }

  #[test]
  pub fn melody_length_overflow() {
    let huge = NoteLength::from_ratio(Ratio::from_integer(i32::max_value())).unwrap();
    let result = Arrangement::melody(vec![
      Arrangement::rest(huge),
      Arrangement::rest(NoteLength::WHOLE),
    ]);
    assert!(result.is_err());
  }

  #[test]
  pub fn harmony_length_overflow() {
    let result = Arrangement::harmony(vec![
      Arrangement::rest(NoteLength::new(1, 46349).unwrap()),
      Arrangement::rest(NoteLength::new(46349, 1).unwrap()),
    ]);
    assert!(match result {
      Err(Error::Overflow { .. }) => true,
      _ => false,
    });
  }

  #[test]
  pub fn shared_subtrees() {
    let motif = Arrangement::melody(vec![quarter(PitchClass::C), quarter(PitchClass::E)]).unwrap();
    let song = Arrangement::melody(vec![motif.clone(), motif.clone(), motif]).unwrap();
    assert_eq!(song.length(), NoteLength::new(3, 2).unwrap());
    match &song {
      Arrangement::Melody(melody) => assert_eq!(melody.parts()[0], melody.parts()[2]),
      _ => panic!("expected a melody"),
    }
  }
}
