//! Stopwatch for the activity that is currently being tracked.
//!
//! [Tracker] is the only owner of the timer state and its operations are the only way to change
//! it. The tracker doesn't know about time or storage: the caller drives it with
//! [Tracker::tick] once per second while it is running and stores the records [Tracker::stop]
//! produces.

pub mod error;
pub mod ids;
pub mod notice;

use error::ValidationError;
use ids::{IdGenerator, UuidGenerator};
use notice::Notice;
use tracing::debug;

use crate::storage::entities::ActivityRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub activity_name: String,
    pub elapsed_seconds: u64,
    pub status: Status,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            activity_name: String::new(),
            elapsed_seconds: 0,
            status: Status::Idle,
        }
    }
}

/// Which actions make sense for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub start: bool,
    pub resume: bool,
    pub pause: bool,
    pub stop: bool,
    pub reset: bool,
}

pub struct Tracker {
    state: TimerState,
    /// Name the activity had when it was paused.
    paused_name: String,
    ids: Box<dyn IdGenerator>,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(Box::new(UuidGenerator))
    }
}

impl Tracker {
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            state: TimerState::default(),
            paused_name: String::new(),
            ids,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn elapsed(&self) -> u64 {
        self.state.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.state.status == Status::Running
    }

    /// Updates the activity name. Renaming a paused activity drops its timer, since the time
    /// belonged to the old activity.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<Option<Notice>, ValidationError> {
        let name = name.into();
        match self.state.status {
            Status::Running => Err(ValidationError::NameLocked),
            Status::Paused if name != self.paused_name => {
                debug!("Activity renamed while paused, dropping {}s", self.state.elapsed_seconds);
                let previous = std::mem::replace(&mut self.state.activity_name, name);
                self.state.elapsed_seconds = 0;
                self.state.status = Status::Idle;
                self.paused_name.clear();
                Ok(Some(Notice::TimerCleared { name: previous }))
            }
            Status::Paused | Status::Idle => {
                self.state.activity_name = name;
                Ok(None)
            }
        }
    }

    /// Starts or resumes the timer. Resuming keeps the elapsed time of the paused activity.
    pub fn start(&mut self) -> Result<Notice, ValidationError> {
        let name = self.state.activity_name.trim().to_string();
        match self.state.status {
            Status::Running => Ok(Notice::AlreadyRunning { name }),
            _ if name.is_empty() => Err(ValidationError::MissingName),
            status => {
                self.state.status = Status::Running;
                self.paused_name = self.state.activity_name.clone();
                if status == Status::Paused {
                    debug!("Resuming {name:?} at {}s", self.state.elapsed_seconds);
                    Ok(Notice::Resumed {
                        name,
                        elapsed: self.state.elapsed_seconds,
                    })
                } else {
                    debug!("Starting {name:?}");
                    Ok(Notice::Started { name })
                }
            }
        }
    }

    pub fn pause(&mut self) -> Notice {
        if self.state.status != Status::Running {
            return Notice::NotRunning;
        }
        self.state.status = Status::Paused;
        self.paused_name = self.state.activity_name.clone();
        debug!("Paused {:?} at {}s", self.paused_name, self.state.elapsed_seconds);
        Notice::Paused {
            name: self.paused_name.clone(),
        }
    }

    /// Finishes the current activity. On success the returned [Notice::Logged] carries the
    /// record that should be appended to the activity log, and the tracker is back to idle.
    pub fn stop(&mut self) -> Result<Notice, ValidationError> {
        let name = match self.state.status {
            Status::Idle => return Ok(Notice::NothingToStop),
            Status::Paused => self.paused_name.trim(),
            Status::Running => self.state.activity_name.trim(),
        };

        if name.is_empty() {
            return if self.state.elapsed_seconds == 0 {
                Ok(Notice::NothingToStop)
            } else {
                Err(ValidationError::UnnamedDuration)
            };
        }

        let record = ActivityRecord::new(self.ids.next_id(), name, self.state.elapsed_seconds);
        debug!("Stopped {:?}", record);
        self.clear();
        Ok(Notice::Logged(record))
    }

    /// Drops the current activity without logging it.
    pub fn reset(&mut self) -> Notice {
        let name = match self.state.status {
            Status::Paused => std::mem::take(&mut self.paused_name),
            _ => std::mem::take(&mut self.state.activity_name),
        };
        let had_activity = !name.trim().is_empty() || self.state.elapsed_seconds > 0;
        self.clear();
        if had_activity {
            Notice::Reset { name }
        } else {
            Notice::Cleared
        }
    }

    /// Advances the timer by one second. Returns false, without changing anything, when the
    /// timer isn't running.
    pub fn tick(&mut self) -> bool {
        if self.state.status != Status::Running {
            return false;
        }
        self.state.elapsed_seconds = self.state.elapsed_seconds.saturating_add(1);
        true
    }

    pub fn controls(&self) -> Controls {
        let has_name = !self.state.activity_name.trim().is_empty();
        let status = self.state.status;
        Controls {
            start: status == Status::Idle && has_name,
            resume: status == Status::Paused && has_name,
            pause: status == Status::Running,
            stop: status != Status::Idle,
            reset: status == Status::Running || has_name || self.state.elapsed_seconds > 0,
        }
    }

    /// Text shown next to the activity input.
    pub fn prompt(&self) -> String {
        match self.state.status {
            Status::Running => "Timer running...".into(),
            Status::Paused => {
                let name = if self.paused_name.is_empty() {
                    &self.state.activity_name
                } else {
                    &self.paused_name
                };
                format!("Paused: {name}")
            }
            Status::Idle => "What are you working on?".into(),
        }
    }

    fn clear(&mut self) {
        self.state = TimerState::default();
        self.paused_name.clear();
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, Arbitrary};

    use super::{
        error::ValidationError,
        ids::{MockIdGenerator, UuidGenerator},
        notice::Notice,
        Controls, Status, TimerState, Tracker,
    };
    use crate::storage::entities::ActivityRecord;

    fn fixed_ids() -> Box<MockIdGenerator> {
        let mut ids = MockIdGenerator::new();
        let mut counter = 0;
        ids.expect_next_id().returning(move || {
            counter += 1;
            format!("id-{counter}")
        });
        Box::new(ids)
    }

    fn tracker() -> Tracker {
        Tracker::new(fixed_ids())
    }

    fn run_for(tracker: &mut Tracker, seconds: u64) {
        for _ in 0..seconds {
            assert!(tracker.tick());
        }
    }

    #[test]
    fn test_start_requires_name() {
        for name in ["", " ", "\t  \n"] {
            let mut tracker = tracker();
            tracker.set_name(name).unwrap();
            let before = tracker.state().clone();

            assert_eq!(tracker.start(), Err(ValidationError::MissingName));
            assert_eq!(tracker.state(), &before);
            assert!(!tracker.tick());
        }
    }

    #[test]
    fn test_pause_and_resume_keeps_elapsed() {
        let mut tracker = tracker();
        tracker.set_name("Deep Work").unwrap();
        assert_eq!(
            tracker.start(),
            Ok(Notice::Started {
                name: "Deep Work".into()
            })
        );
        run_for(&mut tracker, 3);

        assert_eq!(
            tracker.pause(),
            Notice::Paused {
                name: "Deep Work".into()
            }
        );
        assert!(!tracker.tick());
        assert_eq!(tracker.elapsed(), 3);

        assert_eq!(
            tracker.start(),
            Ok(Notice::Resumed {
                name: "Deep Work".into(),
                elapsed: 3
            })
        );
        run_for(&mut tracker, 2);
        assert_eq!(tracker.elapsed(), 5);
    }

    #[test]
    fn test_rename_while_paused_resets_timer() {
        let mut tracker = tracker();
        tracker.set_name("Reading").unwrap();
        tracker.start().unwrap();
        run_for(&mut tracker, 10);
        tracker.pause();

        let notice = tracker.set_name("Writing").unwrap();

        assert_eq!(
            notice,
            Some(Notice::TimerCleared {
                name: "Reading".into()
            })
        );
        assert_eq!(
            tracker.state(),
            &TimerState {
                activity_name: "Writing".into(),
                elapsed_seconds: 0,
                status: Status::Idle,
            }
        );
        assert_eq!(
            tracker.start(),
            Ok(Notice::Started {
                name: "Writing".into()
            })
        );
        assert_eq!(tracker.elapsed(), 0);
    }

    #[test]
    fn test_same_name_while_paused_keeps_timer() {
        let mut tracker = tracker();
        tracker.set_name("Reading").unwrap();
        tracker.start().unwrap();
        run_for(&mut tracker, 4);
        tracker.pause();

        assert_eq!(tracker.set_name("Reading"), Ok(None));
        assert_eq!(tracker.status(), Status::Paused);
        assert_eq!(tracker.elapsed(), 4);
    }

    #[test]
    fn test_rename_while_running_is_rejected() {
        let mut tracker = tracker();
        tracker.set_name("Reading").unwrap();
        tracker.start().unwrap();
        run_for(&mut tracker, 2);

        assert_eq!(tracker.set_name("Writing"), Err(ValidationError::NameLocked));
        assert_eq!(tracker.state().activity_name, "Reading");
        assert_eq!(tracker.elapsed(), 2);
    }

    #[test]
    fn test_stop_logs_trimmed_name_and_resets() {
        let mut tracker = tracker();
        tracker.set_name("  Deep Work ").unwrap();
        tracker.start().unwrap();
        run_for(&mut tracker, 125);

        assert_eq!(
            tracker.stop(),
            Ok(Notice::Logged(ActivityRecord::new("id-1", "Deep Work", 125)))
        );
        assert_eq!(tracker.state(), &TimerState::default());
        assert!(!tracker.tick());
    }

    #[test]
    fn test_stop_while_paused_logs_paused_activity() {
        let mut tracker = tracker();
        tracker.set_name("Reading").unwrap();
        tracker.start().unwrap();
        run_for(&mut tracker, 7);
        tracker.pause();

        assert_eq!(
            tracker.stop(),
            Ok(Notice::Logged(ActivityRecord::new("id-1", "Reading", 7)))
        );
        assert_eq!(tracker.status(), Status::Idle);
    }

    #[test]
    fn test_stop_without_anything_is_noop() {
        let mut tracker = tracker();
        assert_eq!(tracker.stop(), Ok(Notice::NothingToStop));
        assert_eq!(tracker.state(), &TimerState::default());

        // Running with an empty name and no time is also nothing to stop.
        let mut tracker = Tracker {
            state: TimerState {
                activity_name: String::new(),
                elapsed_seconds: 0,
                status: Status::Running,
            },
            paused_name: String::new(),
            ids: fixed_ids(),
        };
        let before = tracker.state().clone();
        assert_eq!(tracker.stop(), Ok(Notice::NothingToStop));
        assert_eq!(tracker.state(), &before);
    }

    #[test]
    fn test_stop_unnamed_duration_is_rejected() {
        let mut ids = MockIdGenerator::new();
        ids.expect_next_id().never();
        let mut tracker = Tracker {
            state: TimerState {
                activity_name: "Reading".into(),
                elapsed_seconds: 42,
                status: Status::Paused,
            },
            paused_name: "   ".into(),
            ids: Box::new(ids),
        };
        let before = tracker.state().clone();

        assert_eq!(tracker.stop(), Err(ValidationError::UnnamedDuration));
        assert_eq!(tracker.state(), &before);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut tracker = tracker();
        tracker.set_name("Reading").unwrap();
        tracker.start().unwrap();
        run_for(&mut tracker, 3);

        assert_eq!(
            tracker.reset(),
            Notice::Reset {
                name: "Reading".into()
            }
        );
        assert_eq!(tracker.state(), &TimerState::default());
        assert!(!tracker.tick());

        assert_eq!(tracker.reset(), Notice::Cleared);
    }

    #[test]
    fn test_pause_when_not_running() {
        let mut tracker = tracker();
        assert_eq!(tracker.pause(), Notice::NotRunning);
        assert_eq!(tracker.status(), Status::Idle);
    }

    #[test]
    fn test_start_while_running() {
        let mut tracker = tracker();
        tracker.set_name("Reading").unwrap();
        tracker.start().unwrap();
        run_for(&mut tracker, 2);

        assert_eq!(
            tracker.start(),
            Ok(Notice::AlreadyRunning {
                name: "Reading".into()
            })
        );
        assert_eq!(tracker.elapsed(), 2);
    }

    #[test]
    fn test_controls_and_prompt() {
        let mut tracker = tracker();
        assert_eq!(tracker.controls(), Controls::default());
        assert_eq!(tracker.prompt(), "What are you working on?");

        tracker.set_name("Reading").unwrap();
        assert_eq!(
            tracker.controls(),
            Controls {
                start: true,
                reset: true,
                ..Default::default()
            }
        );

        tracker.start().unwrap();
        assert_eq!(
            tracker.controls(),
            Controls {
                pause: true,
                stop: true,
                reset: true,
                ..Default::default()
            }
        );
        assert_eq!(tracker.prompt(), "Timer running...");

        tracker.tick();
        tracker.pause();
        assert_eq!(
            tracker.controls(),
            Controls {
                resume: true,
                stop: true,
                reset: true,
                ..Default::default()
            }
        );
        assert_eq!(tracker.prompt(), "Paused: Reading");
    }

    #[test]
    fn test_default_ids_are_unique() {
        let mut tracker = Tracker::new(Box::new(UuidGenerator));
        let mut ids = vec![];
        for _ in 0..3 {
            tracker.set_name("Reading").unwrap();
            tracker.start().unwrap();
            tracker.tick();
            match tracker.stop() {
                Ok(Notice::Logged(record)) => ids.push(record.id),
                other => panic!("Unexpected stop result {other:?}"),
            }
        }
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|v| !v.is_empty()));
    }

    #[derive(Debug, Clone)]
    enum Op {
        SetName(&'static str),
        Start,
        Pause,
        Stop,
        Reset,
        Tick,
    }

    const NAMES: [&str; 4] = ["", "  ", "Deep Work", "Reading"];

    impl Arbitrary for Op {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            match u8::arbitrary(g) % 6 {
                0 => Op::SetName(*g.choose(&NAMES).unwrap()),
                1 => Op::Start,
                2 => Op::Pause,
                3 => Op::Stop,
                4 => Op::Reset,
                5 => Op::Tick,
                _ => unreachable!(),
            }
        }
    }

    quickcheck! {
      fn elapsed_only_moves_while_running(ops: Vec<Op>) -> bool {
        let mut tracker = tracker();

        for op in ops {
          let before = tracker.state().clone();
          match op {
            Op::SetName(name) => {
              let renamed_paused = before.status == Status::Paused && name != tracker.paused_name;
              let _ = tracker.set_name(name);
              if !renamed_paused && tracker.elapsed() != before.elapsed_seconds {
                return false;
              }
            }
            Op::Start => {
              let result = tracker.start();
              if before.activity_name.trim().is_empty() && before.status != Status::Running {
                if result != Err(ValidationError::MissingName) || tracker.state() != &before {
                  return false;
                }
              }
              if tracker.elapsed() != before.elapsed_seconds {
                return false;
              }
            }
            Op::Pause => {
              tracker.pause();
              if tracker.elapsed() != before.elapsed_seconds {
                return false;
              }
            }
            Op::Stop => {
              if let Ok(Notice::Logged(record)) = tracker.stop() {
                if record.duration != before.elapsed_seconds || record.name.trim() != record.name {
                  return false;
                }
              }
            }
            Op::Reset => {
              tracker.reset();
              if tracker.state() != &TimerState::default() {
                return false;
              }
            }
            Op::Tick => {
              let ticked = tracker.tick();
              let expected = if before.status == Status::Running {
                before.elapsed_seconds + 1
              } else {
                before.elapsed_seconds
              };
              if ticked != (before.status == Status::Running) || tracker.elapsed() != expected {
                return false;
              }
            }
          }
        }

        true
      }
    }

    quickcheck! {
      fn resume_never_loses_time(rounds: Vec<u8>) -> bool {
        let mut tracker = tracker();
        tracker.set_name("Deep Work").unwrap();
        let mut total = 0;

        for seconds in rounds {
          let seconds = u64::from(seconds % 16);
          if tracker.start().is_err() || tracker.elapsed() != total {
            return false;
          }
          for _ in 0..seconds {
            tracker.tick();
          }
          total += seconds;
          tracker.pause();
          if tracker.elapsed() != total {
            return false;
          }
        }

        true
      }
    }
}
