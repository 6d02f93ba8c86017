//! Playback over a recorded trace
//!
//! A [`Player`] owns at most one [`Trace`] at a time and a cursor into it.
//! Every navigation is an O(1) index into the trace; nothing is ever
//! re-executed. Autoplay runs on a host-driven clock: the host reports elapsed
//! time through [`Player::advance_time`] and the player fires whatever ticks
//! fell due. There is at most one pending tick, and every manual navigation
//! or load cancels it.

use crate::config::PlayerConfig;
use crate::errors::ValidationError;
use crate::registry::{require_algorithm, AlgorithmDescriptor, Params};
use crate::snapshot::{Snapshot, Trace};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where playback stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Playing,
    /// The cursor rests on the terminal snapshot
    Finished,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackStatus::Idle => write!(f, "Paused"),
            PlaybackStatus::Playing => write!(f, "Playing"),
            PlaybackStatus::Finished => write!(f, "Finished"),
        }
    }
}

/// Observable state after a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    pub step: usize,
    pub total: usize,
    pub status: PlaybackStatus,
}

/// The loaded algorithm run
#[derive(Debug)]
struct Session {
    descriptor: &'static AlgorithmDescriptor,
    input: Vec<i64>,
    params: Params,
    trace: Rc<Trace>,
}

/// The single pending autoplay advance, due at an instant of the player clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    due: Duration,
}

#[derive(Debug)]
pub struct Player {
    session: Option<Session>,
    current_step: usize,
    status: PlaybackStatus,
    speed: Duration,
    validation_error: Option<String>,
    timer: Option<Timer>,
    /// Time reported so far through `advance_time`
    clock: Duration,
    config: PlayerConfig,
}

impl Default for Player {
    fn default() -> Self {
        Player::new(PlayerConfig::default())
    }
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        Player {
            session: None,
            current_step: 0,
            status: PlaybackStatus::Idle,
            speed: config.clamp_speed(config.speed),
            validation_error: None,
            timer: None,
            clock: Duration::ZERO,
            config,
        }
    }

    /// Generate a trace and install it with the cursor at 0.
    ///
    /// On failure the error is kept in [`Player::validation_error`] and the
    /// previous trace and cursor stay as they were. The autoplay timer is
    /// cancelled either way.
    pub fn load_algorithm(
        &mut self,
        id: &str,
        input: &[i64],
        params: &Params,
    ) -> Result<PlaybackState, ValidationError> {
        self.cancel_timer();

        let generated = require_algorithm(id)
            .and_then(|descriptor| Ok((descriptor, descriptor.generate(input, params)?)));
        let (descriptor, trace) = match generated {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(algorithm = id, len = input.len(), error = %e, "load rejected");
                self.validation_error = Some(e.to_string());
                self.settle();
                return Err(e);
            }
        };

        info!(
            algorithm = descriptor.id,
            len = input.len(),
            steps = trace.total_steps(),
            "trace loaded"
        );
        self.session = Some(Session {
            descriptor,
            input: input.to_vec(),
            params: params.clone(),
            trace: Rc::new(trace),
        });
        self.current_step = 0;
        self.validation_error = None;
        self.settle();
        Ok(self.state())
    }

    /// Start autoplay. No-op without a trace, when finished, or when already
    /// playing.
    pub fn play(&mut self) -> PlaybackState {
        if self.session.is_none() || self.status != PlaybackStatus::Idle {
            return self.state();
        }
        self.status = PlaybackStatus::Playing;
        self.timer = Some(Timer {
            due: self.clock + self.speed,
        });
        debug!(step = self.current_step, speed_ms = self.speed.as_millis() as u64, "play");
        self.state()
    }

    pub fn pause(&mut self) -> PlaybackState {
        if self.status == PlaybackStatus::Playing {
            self.cancel_timer();
            self.settle();
            debug!(step = self.current_step, "pause");
        }
        self.state()
    }

    /// Toggle between playing and paused
    pub fn toggle(&mut self) -> PlaybackState {
        match self.status {
            PlaybackStatus::Playing => self.pause(),
            _ => self.play(),
        }
    }

    pub fn step(&mut self) -> PlaybackState {
        self.cancel_timer();
        self.current_step = (self.current_step + 1).min(self.total_steps());
        self.settle();
        self.state()
    }

    pub fn step_back(&mut self) -> PlaybackState {
        self.cancel_timer();
        self.current_step = self.current_step.saturating_sub(1);
        self.settle();
        self.state()
    }

    /// Jump to step `n`, clamped into `[0, total_steps]`
    pub fn seek(&mut self, n: usize) -> PlaybackState {
        self.cancel_timer();
        self.current_step = n.min(self.total_steps());
        self.settle();
        self.state()
    }

    pub fn reset(&mut self) -> PlaybackState {
        self.seek(0)
    }

    /// Change the autoplay interval, clamped to the configured range.
    ///
    /// A tick that is already scheduled keeps its due time; the new interval
    /// applies from the next one.
    pub fn set_speed_ms(&mut self, ms: u64) -> Duration {
        self.speed = self.config.clamp_speed(Duration::from_millis(ms));
        debug!(speed_ms = self.speed.as_millis() as u64, "speed changed");
        self.speed
    }

    /// Move the player clock forward by `elapsed`, firing every tick that
    /// falls due. Each tick advances the cursor by one step; reaching the
    /// terminal snapshot cancels the timer and finishes playback.
    pub fn advance_time(&mut self, elapsed: Duration) -> PlaybackState {
        self.clock += elapsed;
        while let Some(timer) = self.timer {
            if timer.due > self.clock {
                break;
            }
            self.current_step = (self.current_step + 1).min(self.total_steps());
            if self.current_step >= self.total_steps() {
                self.timer = None;
                self.status = PlaybackStatus::Finished;
                info!(steps = self.total_steps(), "autoplay finished");
            } else {
                self.timer = Some(Timer {
                    due: timer.due + self.speed,
                });
            }
        }
        self.state()
    }

    /// Time until the pending tick, if autoplay is running
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.timer.map(|timer| timer.due.saturating_sub(self.clock))
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            step: self.current_step,
            total: self.total_steps(),
            status: self.status,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    /// `trace.len() - 1`, or 0 with nothing loaded
    pub fn total_steps(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, |session| session.trace.total_steps())
    }

    /// The visible state: `trace[current_step]`
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.session
            .as_ref()
            .and_then(|session| session.trace.get(self.current_step))
    }

    pub fn trace(&self) -> Option<Rc<Trace>> {
        self.session.as_ref().map(|session| Rc::clone(&session.trace))
    }

    pub fn descriptor(&self) -> Option<&'static AlgorithmDescriptor> {
        self.session.as_ref().map(|session| session.descriptor)
    }

    pub fn algorithm_id(&self) -> Option<&'static str> {
        self.descriptor().map(|descriptor| descriptor.id)
    }

    pub fn input(&self) -> Option<&[i64]> {
        self.session.as_ref().map(|session| session.input.as_slice())
    }

    pub fn params(&self) -> Option<&Params> {
        self.session.as_ref().map(|session| &session.params)
    }

    /// Message from the most recent rejected load, cleared by a successful one
    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    fn cancel_timer(&mut self) {
        self.timer = None;
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Idle;
        }
    }

    /// Status implied by the cursor when not playing
    fn settle(&mut self) {
        self.status = if self.session.is_some() && self.current_step == self.total_steps() {
            PlaybackStatus::Finished
        } else {
            PlaybackStatus::Idle
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Mark, TraceResult};

    const SPEED: Duration = Duration::from_millis(500);

    fn loaded(id: &str, input: &[i64], params: &Params) -> Player {
        let mut player = Player::default();
        player.load_algorithm(id, input, params).unwrap();
        player
    }

    fn bubble() -> Player {
        loaded("bubble-sort", &[5, 2, 4, 1], &Params::new())
    }

    #[test]
    fn test_empty_player() {
        let mut player = Player::default();
        assert_eq!(player.total_steps(), 0);
        assert!(player.current_snapshot().is_none());
        assert_eq!(player.play().status, PlaybackStatus::Idle);
        assert_eq!(player.next_tick_in(), None);
        assert_eq!(player.step().step, 0);
    }

    #[test]
    fn test_load_starts_idle_at_zero() {
        let player = bubble();
        assert_eq!(player.current_step(), 0);
        assert_eq!(player.status(), PlaybackStatus::Idle);
        assert_eq!(player.algorithm_id(), Some("bubble-sort"));
        assert_eq!(player.input(), Some(&[5, 2, 4, 1][..]));
        assert_eq!(
            player.current_snapshot().unwrap().array_state,
            vec![5, 2, 4, 1]
        );
        assert!(player.validation_error().is_none());
    }

    #[test]
    fn test_autoplay_finishes_in_exactly_total_ticks() {
        let mut player = bubble();
        let total = player.total_steps();
        player.play();
        for tick in 1..total {
            let state = player.advance_time(SPEED);
            assert_eq!(state.step, tick);
            assert_eq!(state.status, PlaybackStatus::Playing);
        }
        let last = player.advance_time(SPEED);
        assert_eq!(last.step, total);
        assert_eq!(last.status, PlaybackStatus::Finished);
        assert_eq!(player.next_tick_in(), None);

        // nothing left to fire
        assert_eq!(player.advance_time(SPEED * 10).step, total);
    }

    #[test]
    fn test_play_is_single_flight() {
        let mut player = bubble();
        player.play();
        player.advance_time(Duration::from_millis(200));
        player.play();
        assert_eq!(player.next_tick_in(), Some(Duration::from_millis(300)));
        assert_eq!(player.advance_time(Duration::from_millis(300)).step, 1);
    }

    #[test]
    fn test_long_frame_fires_every_due_tick() {
        let mut player = bubble();
        player.play();
        assert_eq!(player.advance_time(SPEED * 3).step, 3);
        assert!(player.is_playing());
    }

    #[test]
    fn test_manual_navigation_cancels_autoplay() {
        let mut player = bubble();
        player.play();
        let state = player.step();
        assert_eq!(state.step, 1);
        assert_eq!(state.status, PlaybackStatus::Idle);
        assert_eq!(player.next_tick_in(), None);
        assert_eq!(player.advance_time(SPEED * 4).step, 1);

        player.play();
        player.seek(2);
        assert!(!player.is_playing());
        player.play();
        player.step_back();
        assert_eq!(player.next_tick_in(), None);
    }

    #[test]
    fn test_pause_keeps_cursor() {
        let mut player = bubble();
        player.play();
        player.advance_time(SPEED * 2);
        let state = player.pause();
        assert_eq!(state.step, 2);
        assert_eq!(state.status, PlaybackStatus::Idle);
        assert_eq!(player.advance_time(SPEED).step, 2);
        // pausing while idle changes nothing
        assert_eq!(player.pause(), state);
    }

    #[test]
    fn test_play_when_finished_is_noop() {
        let mut player = bubble();
        let total = player.total_steps();
        assert_eq!(player.seek(total).status, PlaybackStatus::Finished);
        assert_eq!(player.play().status, PlaybackStatus::Finished);
        assert_eq!(player.next_tick_in(), None);
        assert_eq!(player.step().step, total);
    }

    #[test]
    fn test_boundaries() {
        let mut player = bubble();
        let total = player.total_steps();

        let end = player.seek(usize::MAX);
        assert_eq!(end.step, total);
        assert_eq!(end.status, PlaybackStatus::Finished);
        let terminal = player.current_snapshot().unwrap();
        assert_eq!(terminal.array_state, vec![1, 2, 4, 5]);
        assert_eq!(terminal.indices_marked(Mark::Sorted), vec![0, 1, 2, 3]);

        assert_eq!(player.step_back().status, PlaybackStatus::Idle);

        let start = player.reset();
        assert_eq!(start.step, 0);
        assert_eq!(start.status, PlaybackStatus::Idle);
        assert_eq!(
            player.current_snapshot().unwrap().array_state,
            vec![5, 2, 4, 1]
        );
        assert_eq!(player.step_back().step, 0);
    }

    #[test]
    fn test_seek_is_idempotent() {
        let mut player = bubble();
        let first = player.seek(3);
        let snapshot = player.current_snapshot().cloned();
        assert_eq!(player.seek(3), first);
        assert_eq!(player.current_snapshot().cloned(), snapshot);
    }

    #[test]
    fn test_rejected_load_keeps_previous_trace() {
        let mut player = bubble();
        let before = player.trace().unwrap();
        player.seek(3);
        player.play();

        let err = player
            .load_algorithm("bubble-sort", &[7], &Params::new())
            .unwrap_err();
        assert!(matches!(err, ValidationError::TooFewElements { .. }));
        assert!(!player.validation_error().unwrap().is_empty());
        assert_eq!(player.current_step(), 3);
        assert!(Rc::ptr_eq(&before, &player.trace().unwrap()));
        assert_eq!(player.status(), PlaybackStatus::Idle);
        assert_eq!(player.next_tick_in(), None);

        // the next good load clears the error
        player
            .load_algorithm("selection-sort", &[3, 1], &Params::new())
            .unwrap();
        assert!(player.validation_error().is_none());
        assert_eq!(player.current_step(), 0);
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let mut player = Player::default();
        assert_eq!(
            player.load_algorithm("bogo-sort", &[1, 2], &Params::new()),
            Err(ValidationError::UnknownAlgorithm("bogo-sort".into()))
        );
        assert_eq!(
            player.validation_error(),
            Some("Unknown algorithm 'bogo-sort'")
        );
    }

    #[test]
    fn test_speed_change_keeps_scheduled_tick() {
        let mut player = bubble();
        player.play();
        player.advance_time(Duration::from_millis(100));
        assert_eq!(player.set_speed_ms(1_000), Duration::from_millis(1_000));
        assert_eq!(player.next_tick_in(), Some(Duration::from_millis(400)));
        assert_eq!(player.advance_time(Duration::from_millis(400)).step, 1);
        assert_eq!(player.next_tick_in(), Some(Duration::from_millis(1_000)));
    }

    #[test]
    fn test_speed_clamped() {
        let mut player = Player::default();
        let config = PlayerConfig::default();
        assert_eq!(player.set_speed_ms(0), config.min_speed);
        assert_eq!(player.set_speed_ms(u64::MAX), config.max_speed);
    }

    #[test]
    fn test_binary_search_playback() {
        let odds: Vec<i64> = (0..10).map(|i| 2 * i + 1).collect();
        let mut player = loaded(
            "binary-search",
            &odds,
            &Params::new().with_number("target", 13),
        );
        let state = player.seek(player.total_steps());
        assert_eq!(state.status, PlaybackStatus::Finished);
        assert_eq!(
            player.current_snapshot().unwrap().result,
            Some(TraceResult::Search(Some(6)))
        );
    }
}
