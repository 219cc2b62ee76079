use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{fatal, Error, Result};
use crate::midi::types::Key;

pub const SEMITONE_COUNT: i32 = 12;

const NAMES: [&str; SEMITONE_COUNT as usize] = [
  "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Semitones above C, always in `0..12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchClass(i32);

impl PitchClass {
  pub const C: PitchClass = PitchClass(0);
  pub const D: PitchClass = PitchClass(2);
  pub const E: PitchClass = PitchClass(4);
  pub const F: PitchClass = PitchClass(5);
  pub const G: PitchClass = PitchClass(7);
  pub const A: PitchClass = PitchClass(9);
  pub const B: PitchClass = PitchClass(11);

  pub fn new(offset: i32) -> PitchClass {
    PitchClass(offset.rem_euclid(SEMITONE_COUNT))
  }

  pub fn offset(&self) -> i32 {
    self.0
  }
}

impl Add<Interval> for PitchClass {
  type Output = PitchClass;

  fn add(self, rhs: Interval) -> PitchClass {
    PitchClass::new(self.0 + rhs.0.rem_euclid(SEMITONE_COUNT))
  }
}

impl Sub<Interval> for PitchClass {
  type Output = PitchClass;

  fn sub(self, rhs: Interval) -> PitchClass {
    PitchClass::new(self.0 - rhs.0.rem_euclid(SEMITONE_COUNT))
  }
}

impl fmt::Display for PitchClass {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", NAMES[self.0 as usize])
  }
}

/// Absolute pitch in semitones, numbered like MIDI keys (C-1 = 0, C4 = 60).
///
/// Any `i32` semitone count is a pitch; only [`Pitch::midi_key`] narrows it
/// down to the MIDI range. Constructors and operators panic if the count
/// overflows, the `checked_*` variants report [`Error::Overflow`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pitch(i32);

impl Pitch {
  pub const C4: Pitch = Pitch(60);
  pub const A4: Pitch = Pitch(69);

  pub fn new(class: PitchClass, octave: i32) -> Pitch {
    fatal(Pitch::checked_new(class, octave))
  }

  pub fn checked_new(class: PitchClass, octave: i32) -> Result<Pitch> {
    octave
      .checked_add(1)
      .and_then(|octave| octave.checked_mul(SEMITONE_COUNT))
      .and_then(|semitones| semitones.checked_add(class.offset()))
      .map(Pitch)
      .ok_or_else(|| Error::overflow("pitch construction"))
  }

  pub fn checked_add(self, interval: Interval) -> Result<Pitch> {
    self
      .0
      .checked_add(interval.0)
      .map(Pitch)
      .ok_or_else(|| Error::overflow("pitch transposition"))
  }

  pub fn checked_sub(self, interval: Interval) -> Result<Pitch> {
    self
      .0
      .checked_sub(interval.0)
      .map(Pitch)
      .ok_or_else(|| Error::overflow("pitch transposition"))
  }

  pub fn from_semitones(value: i32) -> Pitch {
    Pitch(value)
  }

  pub fn semitones(&self) -> i32 {
    self.0
  }

  pub fn class(&self) -> PitchClass {
    PitchClass::new(self.0)
  }

  pub fn octave(&self) -> i32 {
    self.0.div_euclid(SEMITONE_COUNT) - 1
  }

  pub fn decompose(&self) -> (PitchClass, i32) {
    (self.class(), self.octave())
  }

  pub fn from_midi_key(key: Key) -> Pitch {
    Pitch(i32::from(key.value()))
  }

  pub fn midi_key(&self) -> Result<Key> {
    if self.0 < 0 || self.0 > i32::from(Key::MAX) {
      return Err(Error::invalid_range("MIDI pitch", self, "C-1..=G9"));
    }
    Key::new(self.0 as u8)
  }
}

impl Add<Interval> for Pitch {
  type Output = Pitch;

  fn add(self, rhs: Interval) -> Pitch {
    fatal(self.checked_add(rhs))
  }
}

impl Sub<Interval> for Pitch {
  type Output = Pitch;

  fn sub(self, rhs: Interval) -> Pitch {
    fatal(self.checked_sub(rhs))
  }
}

impl Sub for Pitch {
  type Output = Interval;

  fn sub(self, rhs: Pitch) -> Interval {
    fatal(
      self
        .0
        .checked_sub(rhs.0)
        .map(Interval)
        .ok_or_else(|| Error::overflow("pitch distance")),
    )
  }
}

impl fmt::Display for Pitch {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let (class, octave) = self.decompose();
    write!(f, "{}{}", class, octave)
  }
}

/// Signed distance in semitones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval(i32);

impl Interval {
  pub const UNISON: Interval = Interval(0);
  pub const MINOR_THIRD: Interval = Interval(3);
  pub const MAJOR_THIRD: Interval = Interval(4);
  pub const PERFECT_FIFTH: Interval = Interval(7);
  pub const OCTAVE: Interval = Interval(12);

  pub fn new(semitones: i32) -> Interval {
    Interval(semitones)
  }

  pub fn semitones(&self) -> i32 {
    self.0
  }
}

impl From<i32> for Interval {
  fn from(semitones: i32) -> Self {
    Interval(semitones)
  }
}

impl Add for Interval {
  type Output = Interval;

  fn add(self, rhs: Interval) -> Interval {
    fatal(
      self
        .0
        .checked_add(rhs.0)
        .map(Interval)
        .ok_or_else(|| Error::overflow("interval addition")),
    )
  }
}

impl Sub for Interval {
  type Output = Interval;

  fn sub(self, rhs: Interval) -> Interval {
    fatal(
      self
        .0
        .checked_sub(rhs.0)
        .map(Interval)
        .ok_or_else(|| Error::overflow("interval subtraction")),
    )
  }
}

impl fmt::Display for Interval {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.0 > 0 {
      write!(f, "+{}", self.0)
    } else {
      write!(f, "{}", self.0)
    }
  }
}
