pub mod arrangement;
pub mod config;
pub mod demo;
pub mod error;
pub mod midi;
pub mod note_length;
pub mod pitch;
pub mod player;
pub mod ratio;
pub mod sequencer;
pub mod time;

pub use crate::error::{Error, Result};
