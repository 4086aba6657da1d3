use std::time::{Duration, Instant};

use smallvec::SmallVec;

use crate::animation::{AnimationFraction, AnimationTimingParameters, Easing};

/// Where an animator's value sits when it stops moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatingPosition {
  /// The value settled at the start of its range (a reversed run ran out).
  Start,
  /// The value settled at the end of its range.
  End,
  /// The animator was stopped mid-flight and keeps its current value.
  Current,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimatorState {
  /// Not yet started, or finished a run.
  #[default]
  Inactive,
  Running,
  Paused,
  /// Stopped for good; the animator will not run again.
  Stopped,
}

/// Plays a single eased fraction from 0 to 1 (or back) over wall-clock
/// time, driven by explicit [`tick`](PropertyAnimator::tick) calls from the
/// host's frame pump.
///
/// `fraction_complete` is always measured in the forward direction: 0 is
/// the start of the animated range and 1 its end, whether or not the
/// animator is currently reversed. A reversed run therefore completes at
/// fraction 0 with [`AnimatingPosition::Start`].
pub struct PropertyAnimator {
  duration: Duration,
  timing: AnimationTimingParameters,
  action: Box<dyn FnMut(AnimationFraction)>,
  state: AnimatorState,
  reversed: bool,
  fraction_complete: AnimationFraction,
  /// Fraction progressed per second of running time.
  rate: f64,
  pending_delay: Duration,
  /// The instant of the previous tick while running.
  at: Option<Instant>,
  completions: SmallVec<[Box<dyn FnMut(AnimatingPosition)>; 1]>,
}

impl PropertyAnimator {
  pub fn new(
    duration: Duration, timing: AnimationTimingParameters,
    action: impl FnMut(AnimationFraction) + 'static,
  ) -> Self {
    let secs = duration.as_secs_f64();
    let rate = if secs > 0. { 1. / secs } else { f64::INFINITY };
    PropertyAnimator {
      duration,
      timing,
      action: Box::new(action),
      state: AnimatorState::default(),
      reversed: false,
      fraction_complete: 0.,
      rate,
      pending_delay: Duration::ZERO,
      at: None,
      completions: SmallVec::new(),
    }
  }

  pub fn add_completion(&mut self, completion: impl FnMut(AnimatingPosition) + 'static) {
    self.completions.push(Box::new(completion));
  }

  pub fn duration(&self) -> Duration { self.duration }

  pub fn state(&self) -> AnimatorState { self.state }

  pub fn is_reversed(&self) -> bool { self.reversed }

  pub fn set_reversed(&mut self, reversed: bool) { self.reversed = reversed; }

  pub fn fraction_complete(&self) -> AnimationFraction { self.fraction_complete }

  /// Scrub directly to a fraction of the animated range. Scrubbing takes
  /// the animator out of autonomous play: a running or not-yet-started
  /// animator becomes paused. A stopped animator still applies the value
  /// but stays stopped.
  pub fn set_fraction_complete(&mut self, fraction: AnimationFraction) {
    self.fraction_complete = fraction.clamp(0., 1.);
    (self.action)(self.timing.easing(self.fraction_complete));
    if matches!(self.state, AnimatorState::Inactive | AnimatorState::Running) {
      self.state = AnimatorState::Paused;
      self.at = None;
    }
  }

  /// Begin (or resume) autonomous play from the current fraction.
  pub fn start(&mut self, now: Instant) {
    if self.state == AnimatorState::Stopped {
      log::warn!("ignoring start of a stopped animator");
      return;
    }
    self.state = AnimatorState::Running;
    self.at = Some(now);
  }

  pub fn start_after_delay(&mut self, now: Instant, delay: Duration) {
    self.pending_delay = delay;
    self.start(now);
  }

  /// Suspend autonomous play in place, keeping the current fraction.
  pub fn pause(&mut self) {
    if self.state == AnimatorState::Running {
      self.state = AnimatorState::Paused;
      self.at = None;
    }
  }

  /// Resume play with the remaining distance re-timed over
  /// `duration * factor`.
  pub fn continue_with_duration_factor(&mut self, now: Instant, factor: f64) {
    let remaining = if self.reversed { self.fraction_complete } else { 1. - self.fraction_complete };
    let secs = self.duration.as_secs_f64() * factor;
    self.rate = if secs > 0. && remaining > 0. { remaining / secs } else { f64::INFINITY };
    self.start(now);
  }

  /// Stop for good, leaving the animated value where it is. Completions
  /// fire with [`AnimatingPosition::Current`].
  pub fn stop_and_finish_current(&mut self) {
    if self.state == AnimatorState::Stopped {
      return;
    }
    self.state = AnimatorState::Stopped;
    self.at = None;
    self.fire_completions(AnimatingPosition::Current);
  }

  /// Advance to `now`. No-op unless running. A pending start delay is
  /// consumed before the fraction moves.
  pub fn tick(&mut self, now: Instant) {
    if self.state != AnimatorState::Running {
      return;
    }
    let Some(at) = self.at else {
      self.at = Some(now);
      return;
    };
    let mut elapsed = now.saturating_duration_since(at);
    self.at = Some(now);

    if !self.pending_delay.is_zero() {
      if elapsed < self.pending_delay {
        self.pending_delay -= elapsed;
        return;
      }
      elapsed -= self.pending_delay;
      self.pending_delay = Duration::ZERO;
    }

    let step = self.rate * elapsed.as_secs_f64();
    let bound = if self.reversed { 0. } else { 1. };
    if step.is_finite() {
      let dir = if self.reversed { -1. } else { 1. };
      self.fraction_complete = (self.fraction_complete + dir * step).clamp(0., 1.);
    } else {
      self.fraction_complete = bound;
    }
    (self.action)(self.timing.easing(self.fraction_complete));

    if self.fraction_complete == bound {
      self.state = AnimatorState::Inactive;
      self.at = None;
      let position =
        if self.reversed { AnimatingPosition::Start } else { AnimatingPosition::End };
      self.fire_completions(position);
    }
  }

  fn fire_completions(&mut self, position: AnimatingPosition) {
    for completion in &mut self.completions {
      completion(position);
    }
  }
}

impl std::fmt::Debug for PropertyAnimator {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PropertyAnimator")
      .field("duration", &self.duration)
      .field("state", &self.state)
      .field("reversed", &self.reversed)
      .field("fraction_complete", &self.fraction_complete)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use super::*;

  fn recording_animator(duration: Duration) -> (PropertyAnimator, Rc<RefCell<Vec<f64>>>) {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = frames.clone();
    let animator = PropertyAnimator::new(duration, AnimationTimingParameters::linear(), move |f| {
      sink.borrow_mut().push(f)
    });
    (animator, frames)
  }

  #[test]
  fn plays_linearly_and_completes_at_end() {
    let (mut animator, frames) = recording_animator(Duration::from_secs(1));
    let done = Rc::new(RefCell::new(None));
    let sink = done.clone();
    animator.add_completion(move |p| *sink.borrow_mut() = Some(p));

    let t0 = Instant::now();
    animator.start(t0);
    animator.tick(t0 + Duration::from_millis(250));
    animator.tick(t0 + Duration::from_millis(500));
    animator.tick(t0 + Duration::from_millis(1500));

    assert_eq!(*frames.borrow(), vec![0.25, 0.5, 1.]);
    assert_eq!(*done.borrow(), Some(AnimatingPosition::End));
    assert_eq!(animator.state(), AnimatorState::Inactive);
  }

  #[test]
  fn reversed_run_completes_at_start() {
    let (mut animator, _) = recording_animator(Duration::from_secs(1));
    let done = Rc::new(RefCell::new(None));
    let sink = done.clone();
    animator.add_completion(move |p| *sink.borrow_mut() = Some(p));

    animator.set_fraction_complete(0.6);
    animator.set_reversed(true);
    let t0 = Instant::now();
    animator.start(t0);
    animator.tick(t0 + Duration::from_millis(300));
    assert!((animator.fraction_complete() - 0.3).abs() < 1e-9);
    animator.tick(t0 + Duration::from_secs(2));
    assert_eq!(animator.fraction_complete(), 0.);
    assert_eq!(*done.borrow(), Some(AnimatingPosition::Start));
  }

  #[test]
  fn scrubbing_pauses_playback() {
    let (mut animator, frames) = recording_animator(Duration::from_secs(1));
    let t0 = Instant::now();
    animator.start(t0);
    animator.set_fraction_complete(0.4);
    assert_eq!(animator.state(), AnimatorState::Paused);

    // a paused animator ignores ticks
    animator.tick(t0 + Duration::from_millis(500));
    assert_eq!(animator.fraction_complete(), 0.4);
    assert_eq!(*frames.borrow(), vec![0.4]);
  }

  #[test]
  fn resume_with_duration_factor_retimes_remainder() {
    let (mut animator, _) = recording_animator(Duration::from_secs(1));
    animator.set_fraction_complete(0.5);
    // play the remaining half over a quarter of the nominal duration
    let t0 = Instant::now();
    animator.continue_with_duration_factor(t0, 0.25);
    animator.tick(t0 + Duration::from_millis(125));
    assert!((animator.fraction_complete() - 0.75).abs() < 1e-9);
    animator.tick(t0 + Duration::from_millis(250));
    assert_eq!(animator.fraction_complete(), 1.);
  }

  #[test]
  fn start_delay_is_consumed_before_progress() {
    let (mut animator, _) = recording_animator(Duration::from_secs(1));
    let t0 = Instant::now();
    animator.start_after_delay(t0, Duration::from_millis(200));
    animator.tick(t0 + Duration::from_millis(100));
    assert_eq!(animator.fraction_complete(), 0.);
    animator.tick(t0 + Duration::from_millis(400));
    assert!((animator.fraction_complete() - 0.2).abs() < 1e-9);
  }

  #[test]
  fn stop_fires_current_and_rejects_restart() {
    let (mut animator, _) = recording_animator(Duration::from_secs(1));
    let done = Rc::new(RefCell::new(Vec::new()));
    let sink = done.clone();
    animator.add_completion(move |p| sink.borrow_mut().push(p));

    let t0 = Instant::now();
    animator.start(t0);
    animator.tick(t0 + Duration::from_millis(300));
    animator.stop_and_finish_current();
    assert_eq!(*done.borrow(), vec![AnimatingPosition::Current]);
    assert_eq!(animator.state(), AnimatorState::Stopped);

    animator.start(t0 + Duration::from_millis(400));
    animator.tick(t0 + Duration::from_secs(2));
    assert_eq!(*done.borrow(), vec![AnimatingPosition::Current]);
    assert!((animator.fraction_complete() - 0.3).abs() < 1e-9);
  }

  #[test]
  fn zero_duration_completes_on_first_tick() {
    let (mut animator, _) = recording_animator(Duration::ZERO);
    let t0 = Instant::now();
    animator.start(t0);
    animator.tick(t0);
    assert_eq!(animator.fraction_complete(), 1.);
    assert_eq!(animator.state(), AnimatorState::Inactive);
  }
}
