use failure::Error;

use serde_derive::Deserialize;

use std::fs::File;
use std::io::Read;

use crate::error::Result;
use crate::midi::{Channel, Velocity};
use crate::sequencer::SequencerOptions;
use crate::time::{RelativeTime, Tempo, TimeSignature, TimingConfig};

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Timing {
  pub beats_per_measure: u8,
  pub beats_per_note: u8,
  pub beats_per_minute: f64,
}

impl Default for Timing {
  fn default() -> Timing {
    Timing {
      beats_per_measure: 4,
      beats_per_note: 4,
      beats_per_minute: 120.0,
    }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Output {
  pub channel: u8,
  pub velocity: u8,
}

impl Default for Output {
  fn default() -> Output {
    Output {
      channel: 0,
      velocity: 64,
    }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Player {
  /// Seconds between compiling the song and its first event.
  pub pre_delay: f64,
}

impl Default for Player {
  fn default() -> Player {
    Player { pre_delay: 0.5 }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
  pub timing: Timing,
  pub output: Output,
  pub player: Player,
}

impl Config {
  pub fn from_file<'a, T>(path: T) -> std::result::Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let mut content = String::new();
    let path_str = path.into();
    let mut file = File::open(path_str)?;
    file.read_to_string(&mut content)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
  }

  pub fn from_str<'a, T>(content: T) -> std::result::Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let config: Config = toml::from_str(content.into())?;
    Ok(config)
  }

  pub fn timing(&self) -> Result<TimingConfig> {
    let signature = TimeSignature::new(self.timing.beats_per_measure, self.timing.beats_per_note)?;
    let tempo = Tempo::new(self.timing.beats_per_minute)?;
    TimingConfig::new(signature, tempo)
  }

  pub fn sequencer_options(&self) -> Result<SequencerOptions> {
    Ok(SequencerOptions {
      channel: Channel::new(self.output.channel)?,
      velocity: Velocity::new(self.output.velocity)?,
    })
  }

  pub fn pre_delay(&self) -> Result<RelativeTime> {
    let pre_delay = self.player.pre_delay;
    if pre_delay.is_finite() && pre_delay >= 0.0 {
      Ok(RelativeTime::from_seconds(pre_delay))
    } else {
      Err(crate::error::Error::invalid_range(
        "pre-delay",
        pre_delay,
        "a finite number of seconds >= 0",
      ))
    }
  }
}
