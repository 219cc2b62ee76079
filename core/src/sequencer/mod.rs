//! Compiles an [`Arrangement`] into a flat, time ordered list of events.
//!
//! The traversal tracks positions as exact note lengths from the start of the
//! piece and converts them into seconds only when an event is emitted. An
//! event time is `start + position.duration(timing)` rather than a running
//! sum of float durations, so two paths reaching the same musical position
//! always produce the same instant. Harmonies and melodies report their
//! precomputed lengths, never an aggregate of what their parts consumed.
//!
//! At the same instant every release comes before every trigger, whichever
//! harmony part emitted them. A note ending exactly where another one starts
//! on the same key therefore never cuts the new note off. Events of the same
//! kind at the same instant keep the order of a depth first walk of the tree.

pub mod event;

use log::debug;

use crate::arrangement::{Arrangement, Note};
use crate::error::Result;
use crate::midi::{Channel, Velocity};
use crate::note_length::NoteLength;
use crate::time::{AbsoluteTime, RelativeTime, TimingConfig};

pub use self::event::{EventKind, PlannedEvent};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SequencerOptions {
  pub channel: Channel,
  pub velocity: Velocity,
}

/// The compiled form of an arrangement.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
  events: Vec<PlannedEvent>,
  start: AbsoluteTime,
  total_duration: RelativeTime,
}

impl Sequence {
  pub fn events(&self) -> &[PlannedEvent] {
    &self.events
  }

  pub fn total_duration(&self) -> RelativeTime {
    self.total_duration
  }

  pub fn end_time(&self) -> AbsoluteTime {
    self.start + self.total_duration
  }
}

pub struct Sequencer<'a> {
  timing: &'a TimingConfig,
  options: SequencerOptions,
  start: AbsoluteTime,
  events: Vec<PlannedEvent>,
}

impl<'a> Sequencer<'a> {
  pub fn sequence(
    root: &Arrangement,
    start: AbsoluteTime,
    timing: &TimingConfig,
  ) -> Result<Sequence> {
    Sequencer::sequence_with(root, start, timing, SequencerOptions::default())
  }

  pub fn sequence_with(
    root: &Arrangement,
    start: AbsoluteTime,
    timing: &TimingConfig,
    options: SequencerOptions,
  ) -> Result<Sequence> {
    let mut sequencer = Sequencer {
      timing,
      options,
      start,
      events: Vec::with_capacity(root.note_count() * 2),
    };

    let consumed = sequencer.visit(root, NoteLength::ZERO)?;
    let total_duration = consumed.duration(timing);

    let mut events = sequencer.events;
    // stable, so simultaneous events of a kind keep their emission order
    events.sort_by(PlannedEvent::cmp_dispatch);

    debug!(
      "Sequenced {} events lasting {} ({} of a whole note)",
      events.len(),
      total_duration,
      consumed
    );

    Ok(Sequence {
      events,
      start,
      total_duration,
    })
  }

  fn time_at(&self, position: NoteLength) -> AbsoluteTime {
    self.start + position.duration(self.timing)
  }

  /// Visits `node` starting at `now` and returns the length it occupies.
  fn visit(&mut self, node: &Arrangement, now: NoteLength) -> Result<NoteLength> {
    match node {
      Arrangement::Note(note) => self.visit_note(note, now),

      Arrangement::Rest(rest) => Ok(rest.length()),

      Arrangement::Harmony(harmony) => {
        for part in harmony.parts() {
          self.visit(part, now)?;
        }
        Ok(harmony.length())
      }

      Arrangement::Melody(melody) => {
        let mut position = now;
        for part in melody.parts() {
          let consumed = self.visit(part, position)?;
          position = position.checked_add(consumed)?;
        }
        Ok(melody.length())
      }
    }
  }

  fn visit_note(&mut self, note: &Note, now: NoteLength) -> Result<NoteLength> {
    let key = note.pitch().midi_key()?;
    let end = now.checked_add(note.length())?;
    let SequencerOptions { channel, velocity } = self.options;

    self.events.push(PlannedEvent {
      kind: EventKind::TriggerOn,
      channel,
      key,
      velocity,
      time: self.time_at(now),
    });
    self.events.push(PlannedEvent {
      kind: EventKind::TriggerOff,
      channel,
      key,
      velocity,
      time: self.time_at(end),
    });

    Ok(note.length())
  }
}
