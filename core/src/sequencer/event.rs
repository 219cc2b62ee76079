use std::cmp::Ordering;
use std::fmt;

use crate::midi::encoder::{NOTE_OFF_STATUS, NOTE_ON_STATUS};
use crate::midi::types::U4;
use crate::midi::{Channel, Key, Message, Velocity};
use crate::pitch::Pitch;
use crate::time::AbsoluteTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
  TriggerOn,
  TriggerOff,
}

impl EventKind {
  pub fn status(&self) -> U4 {
    match self {
      EventKind::TriggerOn => NOTE_ON_STATUS,
      EventKind::TriggerOff => NOTE_OFF_STATUS,
    }
  }

  /// Rank among events at the same instant: releases go first.
  pub fn dispatch_rank(&self) -> u8 {
    match self {
      EventKind::TriggerOff => 0,
      EventKind::TriggerOn => 1,
    }
  }

  pub fn from_status(status: U4) -> Option<EventKind> {
    match status {
      NOTE_ON_STATUS => Some(EventKind::TriggerOn),
      NOTE_OFF_STATUS => Some(EventKind::TriggerOff),
      _ => None,
    }
  }
}

/// A timed trigger instruction, ready to be dispatched by a player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedEvent {
  pub kind: EventKind,
  pub channel: Channel,
  pub key: Key,
  pub velocity: Velocity,
  pub time: AbsoluteTime,
}

impl PlannedEvent {
  pub fn time(&self) -> AbsoluteTime {
    self.time
  }

  /// Orders by time, then releases before triggers. Events of the same kind
  /// at the same instant compare equal.
  pub fn cmp_dispatch(&self, other: &PlannedEvent) -> Ordering {
    self
      .time
      .total_cmp(&other.time)
      .then_with(|| self.kind.dispatch_rank().cmp(&other.kind.dispatch_rank()))
  }

  pub fn message(&self) -> Message {
    match self.kind {
      EventKind::TriggerOn => Message::NoteOn {
        channel: self.channel,
        key: self.key,
        velocity: self.velocity,
      },
      EventKind::TriggerOff => Message::NoteOff {
        channel: self.channel,
        key: self.key,
        velocity: self.velocity,
      },
    }
  }
}

impl fmt::Display for PlannedEvent {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(
      f,
      "{:?}(channel {} key {} ({}) velocity {} at {})",
      self.kind,
      self.channel.value(),
      self.key.value(),
      Pitch::from_midi_key(self.key),
      self.velocity.value(),
      self.time
    )
  }
}
