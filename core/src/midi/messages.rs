use super::types::{Channel, Key, Velocity};

/// Channel messages sent to an instrument during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
  NoteOff {
    channel: Channel,
    key: Key,
    velocity: Velocity,
  },
  NoteOn {
    channel: Channel,
    key: Key,
    velocity: Velocity,
  },
  AllNotesOff {
    channel: Channel,
  },
}

impl Message {
  pub fn channel(&self) -> Channel {
    match self {
      Message::NoteOff { channel, .. }
      | Message::NoteOn { channel, .. }
      | Message::AllNotesOff { channel } => *channel,
    }
  }
}
