use std::path::Path;
use std::thread;

use log::{debug, info, warn};

use failure::{Error, Fail};

use midi_markup_core::{
  arrangement::Arrangement,
  config::Config,
  demo,
  player::{Clock, LogOutput, PlaybackStats, Player, SystemClock},
  sequencer::{Sequence, Sequencer},
};

const MIDI_MARKUP_CONFIG: &str = "MIDI_MARKUP_CONFIG";
const DEFAULT_MIDI_MARKUP_CONFIG: &str = "midi-markup.toml";

const MIDI_MARKUP_LOG_CONFIG: &str = "MIDI_MARKUP_LOG_CONFIG";
const DEFAULT_MIDI_MARKUP_LOG_CONFIG: &str = "log4rs.yaml";

#[derive(Debug, Fail)]
enum MainError {
  #[fail(display = "Failed to init logging: {}", cause)]
  LoggingInit { cause: String },

  #[fail(display = "Invalid configuration: {}", cause)]
  Config { cause: midi_markup_core::Error },

  #[fail(display = "Failed to arrange the song: {}", cause)]
  Arrange { cause: midi_markup_core::Error },

  #[fail(display = "Failed to create the player thread: {}", cause)]
  PlayerStart { cause: String },

  #[fail(display = "Failed to join the player thread")]
  PlayerJoin,

  #[fail(display = "Playback failed: {}", cause)]
  Playback { cause: midi_markup_core::Error },
}

fn main() -> Result<(), Error> {
  init_logging()?;

  let config = init_config()?;

  let song = demo::song().map_err(|cause| MainError::Arrange { cause })?;

  let clock = SystemClock::new();
  let sequence = arrange(&config, &song, &clock)?;

  let stats = play(clock, sequence)?;
  info!(
    "Done: {} events dispatched, {} late (worst {})",
    stats.dispatched, stats.late, stats.max_lateness
  );

  Ok(())
}

fn init_logging() -> Result<(), Error> {
  let log_config_path = std::env::var(MIDI_MARKUP_LOG_CONFIG)
    .unwrap_or_else(|_| DEFAULT_MIDI_MARKUP_LOG_CONFIG.to_string());

  log4rs::init_file(log_config_path.as_str(), Default::default()).map_err(|err| {
    MainError::LoggingInit {
      cause: err.to_string(),
    }
  })?;

  Ok(())
}

fn init_config() -> Result<Config, Error> {
  let config_path =
    std::env::var(MIDI_MARKUP_CONFIG).unwrap_or_else(|_| DEFAULT_MIDI_MARKUP_CONFIG.to_string());

  let config = if Path::new(&config_path).exists() {
    info!("Loading configuration from {} ...", config_path);
    Config::from_file(config_path.as_str())?
  } else {
    warn!("{} not found, using the default configuration", config_path);
    Config::default()
  };
  debug!("{:#?}", config);

  Ok(config)
}

fn arrange(config: &Config, song: &Arrangement, clock: &SystemClock) -> Result<Sequence, Error> {
  // everything is validated before the song is traversed
  let timing = config.timing().map_err(|cause| MainError::Config { cause })?;
  let options = config
    .sequencer_options()
    .map_err(|cause| MainError::Config { cause })?;
  let pre_delay = config
    .pre_delay()
    .map_err(|cause| MainError::Config { cause })?;

  info!("Arranging {} of music ...", song.length());
  let start = clock.now() + pre_delay;
  let sequence = Sequencer::sequence_with(song, start, &timing, options)
    .map_err(|cause| MainError::Arrange { cause })?;

  Ok(sequence)
}

fn play(clock: SystemClock, sequence: Sequence) -> Result<PlaybackStats, Error> {
  info!("Spawning the player thread ...");

  let handler = thread::Builder::new()
    .name("midi-player".into())
    .spawn(move || Player::new(clock, LogOutput::new()).play(&sequence))
    .map_err(|err| MainError::PlayerStart {
      cause: err.to_string(),
    })?;

  let stats = handler
    .join()
    .map_err(|_| MainError::PlayerJoin)?
    .map_err(|cause| MainError::Playback { cause })?;

  Ok(stats)
}
