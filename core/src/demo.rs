//! A short sample song used by the command line player.

use crate::arrangement::Arrangement;
use crate::error::Result;
use crate::note_length::NoteLength;
use crate::pitch::{Interval, Pitch, PitchClass};

fn triad(
  root: PitchClass,
  third: Interval,
  fifth: Interval,
  length: NoteLength,
) -> Result<Arrangement> {
  Arrangement::harmony(vec![
    Arrangement::note(Pitch::new(root, 4), length),
    Arrangement::note(Pitch::new(root + third, 4), length),
    Arrangement::note(Pitch::new(root + fifth, 4), length),
  ])
}

/// C major, C minor, then a C major arpeggio, separated by whole rests.
pub fn song() -> Result<Arrangement> {
  let arpeggio = Arrangement::melody(vec![
    Arrangement::note(Pitch::new(PitchClass::C, 4), NoteLength::QUARTER),
    Arrangement::note(Pitch::new(PitchClass::E, 4), NoteLength::QUARTER),
    Arrangement::note(Pitch::new(PitchClass::G, 4), NoteLength::QUARTER),
    Arrangement::rest(NoteLength::QUARTER),
  ])?;

  Arrangement::melody(vec![
    triad(
      PitchClass::C,
      Interval::MAJOR_THIRD,
      Interval::PERFECT_FIFTH,
      NoteLength::WHOLE,
    )?,
    Arrangement::rest(NoteLength::WHOLE),
    triad(
      PitchClass::C,
      Interval::MINOR_THIRD,
      Interval::PERFECT_FIFTH,
      NoteLength::WHOLE,
    )?,
    Arrangement::rest(NoteLength::WHOLE),
    arpeggio,
    Arrangement::rest(NoteLength::WHOLE),
  ])
}
