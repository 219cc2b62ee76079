use crate::error::{Error, Result};

pub type U4 = u8;
pub type U7 = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Channel(U4);

impl Channel {
  pub const MAX: U4 = 0x10 - 1;

  pub fn new(channel: u8) -> Result<Channel> {
    if channel > Channel::MAX {
      return Err(Error::invalid_range("MIDI channel", channel, "0..16"));
    }
    Ok(Channel(channel))
  }

  pub fn value(&self) -> U4 {
    self.0
  }
}

impl Default for Channel {
  fn default() -> Channel {
    Channel(0)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(U7);

impl Key {
  pub const MAX: U7 = 0x80 - 1;
  pub const C4: Key = Key(60);
  pub const A4: Key = Key(69);

  pub fn new(key: u8) -> Result<Key> {
    if key > Key::MAX {
      return Err(Error::invalid_range("MIDI pitch", key, "0..128"));
    }
    Ok(Key(key))
  }

  pub fn value(&self) -> U7 {
    self.0
  }
}

impl Default for Key {
  fn default() -> Key {
    Key::C4
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Velocity(U7);

impl Velocity {
  pub const MAX: U7 = 0x80 - 1;

  pub fn new(velocity: u8) -> Result<Velocity> {
    if velocity > Velocity::MAX {
      return Err(Error::invalid_range("MIDI velocity", velocity, "0..128"));
    }
    Ok(Velocity(velocity))
  }

  pub fn value(&self) -> U7 {
    self.0
  }
}

impl Default for Velocity {
  fn default() -> Velocity {
    Velocity(64)
  }
}
