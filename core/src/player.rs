//! Real-time playback of a compiled [`Sequence`].
//!
//! The player owns no timing logic of its own beyond waiting: it asks a
//! [`Clock`] for the current instant, sleeps until each event is due and
//! hands the event's message to a [`MidiOutput`]. Both are traits so tests can
//! drive playback with virtual time.

use std::cell::{Cell, RefCell};
use std::thread;
use std::time::{Instant, SystemTime};

use log::{debug, info, trace, warn};

use crate::error::Result;
use crate::midi::encoder::MAX_MESSAGE_SIZE;
use crate::midi::{Channel, Encoder, Message};
use crate::sequencer::Sequence;
use crate::time::{AbsoluteTime, RelativeTime};

pub trait Clock {
  fn now(&self) -> AbsoluteTime;

  /// May wake up early or late.
  fn sleep(&self, duration: RelativeTime);
}

impl<'a, C: Clock + ?Sized> Clock for &'a C {
  fn now(&self) -> AbsoluteTime {
    (**self).now()
  }

  fn sleep(&self, duration: RelativeTime) {
    (**self).sleep(duration)
  }
}

/// Monotonic clock anchored to the wall clock when it is created.
pub struct SystemClock {
  origin: Instant,
  origin_time: AbsoluteTime,
}

impl SystemClock {
  pub fn new() -> SystemClock {
    SystemClock {
      origin: Instant::now(),
      origin_time: AbsoluteTime::from_system_time(SystemTime::now()),
    }
  }
}

impl Default for SystemClock {
  fn default() -> SystemClock {
    SystemClock::new()
  }
}

impl Clock for SystemClock {
  fn now(&self) -> AbsoluteTime {
    self.origin_time + RelativeTime::from_duration(self.origin.elapsed())
  }

  fn sleep(&self, duration: RelativeTime) {
    thread::sleep(duration.to_duration());
  }
}

/// Virtual clock: sleeping advances time instantly.
pub struct ManualClock {
  now: Cell<AbsoluteTime>,
  oversleep: RelativeTime,
  early_wakeups: Cell<usize>,
  sleeps: RefCell<Vec<RelativeTime>>,
}

impl ManualClock {
  pub fn new(now: AbsoluteTime) -> ManualClock {
    ManualClock {
      now: Cell::new(now),
      oversleep: RelativeTime::zero(),
      early_wakeups: Cell::new(0),
      sleeps: RefCell::new(Vec::new()),
    }
  }

  /// Every sleep lasts `oversleep` longer than requested.
  pub fn with_oversleep(mut self, oversleep: RelativeTime) -> ManualClock {
    self.oversleep = oversleep.max(RelativeTime::zero());
    self
  }

  /// The next `count` sleeps only last half of what was requested.
  pub fn with_early_wakeups(self, count: usize) -> ManualClock {
    self.early_wakeups.set(count);
    self
  }

  pub fn advance(&self, duration: RelativeTime) {
    self.now.set(self.now.get() + duration);
  }

  pub fn sleeps(&self) -> Vec<RelativeTime> {
    self.sleeps.borrow().clone()
  }
}

impl Clock for ManualClock {
  fn now(&self) -> AbsoluteTime {
    self.now.get()
  }

  fn sleep(&self, duration: RelativeTime) {
    self.sleeps.borrow_mut().push(duration);
    let early = self.early_wakeups.get();
    if early > 0 {
      self.early_wakeups.set(early - 1);
      self.advance(RelativeTime::from_seconds(duration.seconds() / 2.0));
    } else {
      self.advance(duration);
      self.advance(self.oversleep);
    }
  }
}

pub trait MidiOutput {
  fn send(&mut self, message: &Message) -> Result<()>;
}

impl<'a, O: MidiOutput + ?Sized> MidiOutput for &'a mut O {
  fn send(&mut self, message: &Message) -> Result<()> {
    (**self).send(message)
  }
}

/// Output for running without an instrument: logs the wire bytes.
#[derive(Debug, Default)]
pub struct LogOutput {
  sent: usize,
}

impl LogOutput {
  pub fn new() -> LogOutput {
    LogOutput { sent: 0 }
  }

  pub fn sent(&self) -> usize {
    self.sent
  }
}

impl MidiOutput for LogOutput {
  fn send(&mut self, message: &Message) -> Result<()> {
    let mut data = [0u8; MAX_MESSAGE_SIZE];
    let data_len = Encoder::data_size(message);
    Encoder::encode(message, &mut data);
    info!("MIDI out {:02x?} {:?}", &data[..data_len], message);
    self.sent += 1;
    Ok(())
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackStats {
  pub dispatched: usize,
  /// Events that were already past due when their turn came.
  pub late: usize,
  pub max_lateness: RelativeTime,
}

pub struct Player<C: Clock, O: MidiOutput> {
  clock: C,
  output: O,
}

impl<C: Clock, O: MidiOutput> Player<C, O> {
  pub fn new(clock: C, output: O) -> Player<C, O> {
    Player { clock, output }
  }

  /// Dispatches every event at its time, then holds until the end of the
  /// sequence. A failed transmission stops playback after silencing the
  /// channel it was sent on.
  pub fn play(&mut self, sequence: &Sequence) -> Result<PlaybackStats> {
    info!(
      "Playing {} events over {} ...",
      sequence.events().len(),
      sequence.total_duration()
    );

    let mut stats = PlaybackStats {
      dispatched: 0,
      late: 0,
      max_lateness: RelativeTime::zero(),
    };

    for event in sequence.events() {
      let lateness = self.wait_until(event.time());
      if lateness > RelativeTime::zero() {
        debug!("Event {} is late by {}", event, lateness);
        stats.late += 1;
        stats.max_lateness = stats.max_lateness.max(lateness);
      }

      trace!("Dispatching {}", event);
      let message = event.message();
      if let Err(err) = self.output.send(&message) {
        self.silence(message.channel());
        return Err(err);
      }
      stats.dispatched += 1;
    }

    self.wait_until(sequence.end_time());

    info!(
      "Playback finished: {} events, {} late",
      stats.dispatched, stats.late
    );
    Ok(stats)
  }

  fn silence(&mut self, channel: Channel) {
    warn!("Playback aborted, releasing every note on channel {}", channel.value());
    let all_notes_off = Message::AllNotesOff { channel };
    if let Err(err) = self.output.send(&all_notes_off) {
      warn!("Failed to release the notes: {}", err);
    }
  }

  /// Blocks until `target` and returns how late it already was, zero if a
  /// wait was needed.
  fn wait_until(&self, target: AbsoluteTime) -> RelativeTime {
    let mut remaining = target - self.clock.now();
    if remaining <= RelativeTime::zero() {
      return -remaining;
    }
    while remaining > RelativeTime::zero() {
      self.clock.sleep(remaining);
      remaining = target - self.clock.now();
    }
    RelativeTime::zero()
  }
}

#[cfg(test)]
mod test {

  use super::{Clock, LogOutput, ManualClock, MidiOutput, Player};
  use crate::arrangement::Arrangement;
  use crate::error::{Error, Result};
  use crate::midi::{Channel, Message};
  use crate::note_length::NoteLength;
  use crate::pitch::Pitch;
  use crate::sequencer::{Sequence, Sequencer};
  use crate::time::{AbsoluteTime, RelativeTime, Tempo, TimeSignature, TimingConfig};

  struct RecordingOutput<'a> {
    clock: &'a ManualClock,
    sent: Vec<(f64, Message)>,
    fail_after: Option<usize>,
  }

  impl<'a> RecordingOutput<'a> {
    fn new(clock: &'a ManualClock) -> RecordingOutput<'a> {
      RecordingOutput {
        clock,
        sent: Vec::new(),
        fail_after: None,
      }
    }
  }

  impl<'a> MidiOutput for RecordingOutput<'a> {
    fn send(&mut self, message: &Message) -> Result<()> {
      if self.fail_after == Some(self.sent.len()) {
        self.fail_after = None;
        return Err(Error::Output {
          cause: "device unplugged".to_string(),
        });
      }
      self.sent.push((self.clock.now().seconds(), *message));
      Ok(())
    }
  }

  fn timing() -> TimingConfig {
    TimingConfig::new(TimeSignature::COMMON_TIME, Tempo::new(240.0).unwrap()).unwrap()
  }

  fn two_notes(start: f64) -> Sequence {
    let root = Arrangement::melody(vec![
      Arrangement::note(Pitch::C4, NoteLength::QUARTER),
      Arrangement::rest(NoteLength::QUARTER),
      Arrangement::note(Pitch::A4, NoteLength::HALF),
    ])
    .unwrap();
    Sequencer::sequence(&root, AbsoluteTime::from_seconds(start), &timing()).unwrap()
  }

  #[test]
  pub fn dispatches_events_on_time() {
    let clock = ManualClock::new(AbsoluteTime::from_seconds(100.0));
    let sequence = two_notes(100.5);
    let mut output = RecordingOutput::new(&clock);

    let stats = Player::new(&clock, &mut output).play(&sequence).unwrap();

    assert_eq!(stats.dispatched, 4);
    assert_eq!(stats.late, 0);
    let times: Vec<f64> = output.sent.iter().map(|(time, _)| *time).collect();
    assert_eq!(times, vec![100.5, 100.75, 101.0, 101.5]);
    assert_eq!(clock.now(), sequence.end_time());
  }

  #[test]
  pub fn holds_until_the_end() {
    let clock = ManualClock::new(AbsoluteTime::from_seconds(0.0));
    let root = Arrangement::melody(vec![
      Arrangement::note(Pitch::C4, NoteLength::QUARTER),
      Arrangement::rest(NoteLength::WHOLE),
    ])
    .unwrap();
    let sequence = Sequencer::sequence(&root, AbsoluteTime::from_seconds(0.0), &timing()).unwrap();
    let mut output = RecordingOutput::new(&clock);

    Player::new(&clock, &mut output).play(&sequence).unwrap();

    assert_eq!(clock.now().seconds(), 1.25);
    assert_eq!(
      clock.sleeps().last(),
      Some(&RelativeTime::from_seconds(1.0))
    );
  }

  #[test]
  pub fn late_events_are_sent_without_sleeping() {
    let clock = ManualClock::new(AbsoluteTime::from_seconds(101.2));
    let sequence = two_notes(100.5);
    let mut output = RecordingOutput::new(&clock);

    let stats = Player::new(&clock, &mut output).play(&sequence).unwrap();

    assert_eq!(stats.dispatched, 4);
    assert_eq!(stats.late, 3);
    assert!((stats.max_lateness.seconds() - 0.7).abs() < 1e-9);
    assert_eq!(output.sent[0].0, 101.2);
    assert_eq!(output.sent[2].0, 101.2);
    assert_eq!(output.sent[3].0, 101.5);
    assert_eq!(clock.sleeps().len(), 1);
  }

  #[test]
  pub fn early_wakeups_are_retried() {
    let clock = ManualClock::new(AbsoluteTime::from_seconds(100.0)).with_early_wakeups(3);
    let sequence = two_notes(100.5);
    let mut output = RecordingOutput::new(&clock);

    let stats = Player::new(&clock, &mut output).play(&sequence).unwrap();

    assert_eq!(stats.late, 0);
    assert!(output
      .sent
      .iter()
      .zip(sequence.events())
      .all(|((time, _), event)| *time >= event.time().seconds()));
    assert_eq!(output.sent[0].0, 100.5);
    assert_eq!(clock.sleeps()[0], RelativeTime::from_seconds(0.5));
    assert_eq!(clock.sleeps()[1], RelativeTime::from_seconds(0.25));
  }

  #[test]
  pub fn oversleep_is_tolerated() {
    let clock = ManualClock::new(AbsoluteTime::from_seconds(100.0))
      .with_oversleep(RelativeTime::from_seconds(0.01));
    let sequence = two_notes(100.5);
    let mut output = RecordingOutput::new(&clock);

    let stats = Player::new(&clock, &mut output).play(&sequence).unwrap();

    assert_eq!(stats.dispatched, 4);
    for ((time, _), event) in output.sent.iter().zip(sequence.events()) {
      let delay = time - event.time().seconds();
      assert!(delay >= 0.0 && delay < 0.011, "delay {}", delay);
    }
  }

  #[test]
  pub fn output_failure_stops_playback() {
    let clock = ManualClock::new(AbsoluteTime::from_seconds(100.0));
    let sequence = two_notes(100.5);
    let mut output = RecordingOutput::new(&clock);
    output.fail_after = Some(2);

    let result = Player::new(&clock, &mut output).play(&sequence);

    assert_eq!(
      result,
      Err(Error::Output {
        cause: "device unplugged".to_string()
      })
    );
    assert_eq!(output.sent.len(), 3);
    assert_eq!(output.sent[2].0, 101.0);
    assert_eq!(
      output.sent[2].1,
      Message::AllNotesOff {
        channel: sequence.events()[2].channel,
      }
    );
  }

  #[test]
  pub fn failed_release_keeps_the_original_error() {
    struct BrokenOutput {
      attempts: Vec<Message>,
    }

    impl MidiOutput for BrokenOutput {
      fn send(&mut self, message: &Message) -> Result<()> {
        self.attempts.push(*message);
        Err(Error::Output {
          cause: format!("attempt {}", self.attempts.len()),
        })
      }
    }

    let clock = ManualClock::new(AbsoluteTime::from_seconds(100.0));
    let sequence = two_notes(100.5);
    let mut output = BrokenOutput {
      attempts: Vec::new(),
    };

    let result = Player::new(&clock, &mut output).play(&sequence);

    assert_eq!(
      result,
      Err(Error::Output {
        cause: "attempt 1".to_string()
      })
    );
    assert_eq!(output.attempts.len(), 2);
    assert_eq!(
      output.attempts[1],
      Message::AllNotesOff {
        channel: Channel::default(),
      }
    );
  }

  #[test]
  pub fn messages_follow_events() {
    let clock = ManualClock::new(AbsoluteTime::from_seconds(100.0));
    let sequence = two_notes(100.0);
    let mut output = RecordingOutput::new(&clock);

    Player::new(&clock, &mut output).play(&sequence).unwrap();

    let expected: Vec<Message> = sequence.events().iter().map(|e| e.message()).collect();
    let sent: Vec<Message> = output.sent.iter().map(|(_, msg)| *msg).collect();
    assert_eq!(sent, expected);
  }

  #[test]
  pub fn log_output_counts_messages() {
    let mut output = LogOutput::new();
    output
      .send(&Message::AllNotesOff {
        channel: Channel::default(),
      })
      .unwrap();
    assert_eq!(output.sent(), 1);
  }
}
