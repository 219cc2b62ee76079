use super::messages::Message;
use super::types::{U4, U7};

pub const NOTE_OFF_STATUS: U4 = 0b1000;
pub const NOTE_ON_STATUS: U4 = 0b1001;
pub const CONTROL_CHANGE_STATUS: U4 = 0b1011;

const ALL_NOTES_OFF_CONTROLLER: U7 = 123;

pub const MAX_MESSAGE_SIZE: usize = 3;

#[inline]
fn u7(d: U7) -> u8 {
  d & 0x7f
}

#[inline]
fn status_and_channel(status: U4, channel: U4) -> u8 {
  (status << 4) | (channel & 0x0f)
}

pub struct Encoder;

impl Encoder {
  pub fn data_size(msg: &Message) -> usize {
    match msg {
      Message::NoteOff { .. } => 3,
      Message::NoteOn { .. } => 3,
      Message::AllNotesOff { .. } => 3,
    }
  }

  /// Writes the wire bytes of `msg` into `out`, which must hold at least
  /// `data_size(msg)` bytes.
  pub fn encode(msg: &Message, out: &mut [u8]) {
    match msg {
      Message::NoteOff {
        channel,
        key,
        velocity,
      } => out[..3].copy_from_slice(&[
        status_and_channel(NOTE_OFF_STATUS, channel.value()),
        u7(key.value()),
        u7(velocity.value()),
      ]),
      Message::NoteOn {
        channel,
        key,
        velocity,
      } => out[..3].copy_from_slice(&[
        status_and_channel(NOTE_ON_STATUS, channel.value()),
        u7(key.value()),
        u7(velocity.value()),
      ]),
      Message::AllNotesOff { channel } => out[..3].copy_from_slice(&[
        status_and_channel(CONTROL_CHANGE_STATUS, channel.value()),
        ALL_NOTES_OFF_CONTROLLER,
        0,
      ]),
    }
  }

  pub fn to_bytes(msg: &Message) -> Vec<u8> {
    let mut data = vec![0u8; Encoder::data_size(msg)];
    Encoder::encode(msg, data.as_mut_slice());
    data
  }
}
