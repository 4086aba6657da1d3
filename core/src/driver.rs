//! Drives a single transition run: owns one animator per animation layer
//! plus the shared element's, maps gesture progress onto all of them, and
//! fires the aggregate completion exactly once after the last animator
//! settles.

mod completion_coordinator;

use std::{
  cell::{Cell, RefCell},
  rc::Rc,
  time::{Duration, Instant},
};

use completion_coordinator::CompletionCoordinator;
use smallvec::SmallVec;

use crate::{
  animation::{
    AnimatingPosition, AnimationAction, AnimationFraction, AnimationLayer, AnimationRange,
    AnimationRangePosition, AnimationTimingParameters, AnimatorState, PropertyAnimator,
  },
  context::InterruptionGestureTarget,
  interaction::{GesturePhase, InteractionControllerRef, TransitionProgress},
  operation::TransitionOperationContext,
  phase::PhaseObservers,
  shared_element::{SharedElement, SharedElementTransition},
  transition::{Transition, TransitionAnimation},
};

/// One animation layer bound to the property animator currently playing
/// it. The action is shared through an `Rc` so replacement animators keep
/// feeding the same host-side effect.
struct AnimationLayerAnimator {
  action: Rc<RefCell<AnimationAction>>,
  timing: AnimationTimingParameters,
  /// The layer's active window as a fraction of the effective duration.
  effective_range: AnimationRange,
  /// Natural play duration of that window.
  duration: Duration,
  animator: PropertyAnimator,
  /// Set whenever the current animator fires a completion, meaning its
  /// pending count has been paid and a resume must re-register it.
  completed: Rc<Cell<bool>>,
}

impl AnimationLayerAnimator {
  fn new(
    layer: AnimationLayer, nominal: Duration, effective: Duration,
    coordinator: &CompletionCoordinator,
  ) -> Self {
    let effective_range = effective_window(&layer, nominal, effective);
    let duration = effective.mul_f64(effective_range.length());
    let action = Rc::new(RefCell::new(layer.animation));
    let animator_action = action.clone();
    let animator = PropertyAnimator::new(duration, layer.timing_parameters, move |f| {
      (&mut *animator_action.borrow_mut())(f)
    });
    let mut this = AnimationLayerAnimator {
      action,
      timing: layer.timing_parameters,
      effective_range,
      duration,
      animator,
      completed: Rc::new(Cell::new(false)),
    };
    this.register(coordinator);
    this
  }

  fn mint_animator(&self, duration: Duration) -> PropertyAnimator {
    let action = self.action.clone();
    PropertyAnimator::new(duration, self.timing, move |f| (&mut *action.borrow_mut())(f))
  }

  fn register(&mut self, coordinator: &CompletionCoordinator) {
    coordinator.add(&mut self.animator);
    let completed = self.completed.clone();
    self.animator.add_completion(move |_| completed.set(true));
    self.completed.set(false);
  }
}

/// Map a layer's range, declared against the nominal duration, onto the
/// effective timeline. A raw-spring layer's window runs from its start for
/// the spring's settling time; windows past a truncated effective duration
/// are clipped.
fn effective_window(
  layer: &AnimationLayer, nominal: Duration, effective: Duration,
) -> AnimationRange {
  let effective_secs = effective.as_secs_f64();
  if effective_secs <= 0. {
    return AnimationRange::FULL;
  }
  let start_secs = nominal.as_secs_f64() * layer.range.start();
  let end_secs = if layer.timing_parameters.has_implicit_duration() {
    start_secs + layer.timing_parameters.resolved_duration(nominal).as_secs_f64()
  } else {
    nominal.as_secs_f64() * layer.range.end()
  };
  let end = (end_secs / effective_secs).clamp(1e-9, 1.);
  let start = (start_secs / effective_secs).clamp(0., end - 1e-9);
  AnimationRange::new(start, end)
}

pub struct TransitionDriver {
  operation_context: TransitionOperationContext,
  interaction_controller: Option<InteractionControllerRef>,
  animation: Box<dyn TransitionAnimation>,
  shared_element_spec: Option<Rc<RefCell<Box<dyn SharedElementTransition>>>>,
  shared_element: Option<Rc<dyn SharedElement>>,
  duration: Duration,
  effective_duration: Duration,
  /// The end the progress animator last settled at; read once everything
  /// has settled.
  progress_completion: Rc<Cell<AnimatingPosition>>,
  /// Index 0 is the progress animator: a no-op full-range linear layer
  /// whose fraction is the single source of truth for overall progress.
  layer_animators: SmallVec<[AnimationLayerAnimator; 4]>,
  shared_element_animator: Option<PropertyAnimator>,
  coordinator: CompletionCoordinator,
  observers: PhaseObservers,
  interruption_installed: bool,
  finished: bool,
}

impl TransitionDriver {
  pub fn new(
    mut operation_context: TransitionOperationContext, transition: Transition,
    interaction_controller: Option<InteractionControllerRef>, observers: PhaseObservers,
    now: Instant,
  ) -> Self {
    let mut transition = transition;
    let layers = transition.animation.layers();
    let effective_duration = transition.effective_duration(&layers);
    let Transition { duration, mut animation, shared_element: mut shared_element_spec } =
      transition;

    let coordinator = CompletionCoordinator::new();
    let progress_completion = Rc::new(Cell::new(AnimatingPosition::End));

    let mut layer_animators: SmallVec<[AnimationLayerAnimator; 4]> = SmallVec::new();
    let progress_layer =
      AnimationLayer::full(AnimationTimingParameters::linear(), |_| {});
    let mut progress =
      AnimationLayerAnimator::new(progress_layer, effective_duration, effective_duration, &coordinator);
    let settled_at = progress_completion.clone();
    progress.animator.add_completion(move |position| {
      if position != AnimatingPosition::Current {
        settled_at.set(position);
      }
    });
    layer_animators.push(progress);

    animation.setup(&mut operation_context);

    let mut shared_element: Option<Rc<dyn SharedElement>> = None;
    if let Some(spec) = shared_element_spec.as_mut() {
      if let Some(ic) = &interaction_controller {
        let mut ic = ic.borrow_mut();
        if let Some(provider) = ic.shared_element_provider() {
          if let Some(element) =
            provider.shared_element_for_interactive_transition(&operation_context)
          {
            let element: Rc<dyn SharedElement> = Rc::from(element);
            spec.set_shared_element(element.clone());
            shared_element = Some(element);
          }
        }
      }
      spec.setup(&mut operation_context);
    }

    for layer in layers {
      layer_animators.push(AnimationLayerAnimator::new(
        layer,
        duration,
        effective_duration,
        &coordinator,
      ));
    }

    let mut interruption_installed = false;
    if interaction_controller.is_some() {
      let target = match &shared_element {
        Some(element) => InterruptionGestureTarget::SharedElementView(element.transitioning_view()),
        None => InterruptionGestureTarget::Container,
      };
      operation_context.context.install_interruption_gesture(target);
      interruption_installed = true;
    }

    observers.will_transition(&operation_context, shared_element.as_deref());

    let interactive = operation_context.context.is_interactive();
    let mut driver = TransitionDriver {
      operation_context,
      interaction_controller,
      animation,
      shared_element_spec: shared_element_spec.map(|spec| Rc::new(RefCell::new(spec))),
      shared_element,
      duration,
      effective_duration,
      progress_completion,
      layer_animators,
      shared_element_animator: None,
      coordinator,
      observers,
      interruption_installed,
      finished: false,
    };
    if interactive {
      driver.start_interaction();
    } else {
      driver.animate(AnimatingPosition::End, now);
    }
    driver
  }

  /// Overall transition progress in `[0, 1]`, measured on the effective
  /// timeline.
  pub fn total_fraction_complete(&self) -> AnimationFraction {
    self.layer_animators[0].animator.fraction_complete()
  }

  pub fn is_finished(&self) -> bool { self.finished }

  pub fn transition_duration(&self) -> Duration { self.duration }

  pub fn effective_duration(&self) -> Duration { self.effective_duration }

  pub fn shared_element(&self) -> Option<&dyn SharedElement> { self.shared_element.as_deref() }

  pub fn operation_context(&self) -> &TransitionOperationContext { &self.operation_context }

  /// Advance every running animator to `now`. The host calls this once per
  /// frame while a transition is in flight.
  pub fn tick(&mut self, now: Instant) {
    for layer in &mut self.layer_animators {
      layer.animator.tick(now);
    }
    if let Some(animator) = &mut self.shared_element_animator {
      animator.tick(now);
    }
    self.poll_completion();
  }

  /// Feed a phase of the driving gesture into the transition.
  pub fn update_interaction(&mut self, phase: GesturePhase, now: Instant) {
    match phase {
      GesturePhase::Began | GesturePhase::Changed => {
        let Some(ic) = self.interaction_controller.clone() else {
          log::warn!("gesture update on a transition without an interaction controller");
          return;
        };
        let progress = ic.borrow_mut().progress(&self.operation_context);
        let current = match progress {
          TransitionProgress::Step(delta) => self.total_fraction_complete() + delta,
          TransitionProgress::FractionComplete(fraction) => fraction,
        };
        for layer in &mut self.layer_animators {
          layer
            .animator
            .set_fraction_complete(layer.effective_range.relative_fraction_complete(current));
        }
        self.operation_context.context.update_interactive_transition(current);
        if let Some(spec) = self.shared_element_spec.clone() {
          spec.borrow_mut().update_interaction(&mut self.operation_context, progress);
        }
        ic.borrow_mut().reset_progress_if_needed(&self.operation_context);
      }
      GesturePhase::Ended | GesturePhase::Cancelled => self.end_interaction(now),
    }
  }

  /// Feed a phase of the interruption gesture recognized on a running
  /// transition.
  pub fn interruption_gesture_changed(&mut self, phase: GesturePhase, now: Instant) {
    match phase {
      GesturePhase::Began => {
        self.pause_animation();
        self.start_interaction();
      }
      GesturePhase::Changed => self.update_interaction(GesturePhase::Changed, now),
      GesturePhase::Ended | GesturePhase::Cancelled => self.end_interaction(now),
    }
  }

  fn start_interaction(&mut self) {
    let total = self.total_fraction_complete();
    if let Some(spec) = self.shared_element_spec.clone() {
      spec.borrow_mut().start_interaction(&mut self.operation_context, total);
    }
    if let Some(ic) = &self.interaction_controller {
      ic.borrow_mut().interaction_started(&self.operation_context, total);
    }
  }

  fn end_interaction(&mut self, now: Instant) {
    let Some(ic) = self.interaction_controller.clone() else { return };
    let total = self.total_fraction_complete();
    let verdict = ic.borrow().completion_position(&self.operation_context, total);
    if self.operation_context.context.is_interactive() {
      if verdict == AnimatingPosition::End {
        self.operation_context.context.finish_interactive_transition();
      } else {
        self.operation_context.context.cancel_interactive_transition();
      }
    }
    ic.borrow_mut().interaction_ended(&self.operation_context, total);
    self.animate(verdict, now);
  }

  /// Freeze every animator in place and hand control back to a gesture.
  fn pause_animation(&mut self) {
    if let Some(mut animator) = self.shared_element_animator.take() {
      animator.stop_and_finish_current();
    }
    for layer in &mut self.layer_animators {
      layer.animator.pause();
    }
    self.operation_context.context.pause_interactive_transition();
  }

  /// Send the transition animating towards `to_position` from wherever it
  /// currently is.
  fn animate(&mut self, to_position: AnimatingPosition, now: Instant) {
    let reversed = to_position == AnimatingPosition::Start;
    let total = self.total_fraction_complete();
    let effective_secs = self.effective_duration.as_secs_f64();

    if let Some(mut stale) = self.shared_element_animator.take() {
      stale.stop_and_finish_current();
    }
    if let Some(spec) = self.shared_element_spec.clone() {
      spec.borrow_mut().set_animating_position(to_position);
      let timing = spec.borrow().timing_parameters();
      // The element always travels the remaining forward distance, whether
      // finishing or rolling back.
      let remaining = (1. - total).max(0.);
      let duration = timing.resolved_duration(self.effective_duration.mul_f64(remaining));
      let mut animator = PropertyAnimator::new(duration, timing, move |f| {
        spec.borrow_mut().animation(f);
      });
      self.coordinator.add(&mut animator);
      animator.start(now);
      self.shared_element_animator = Some(animator);
    }

    // The shared element's travel time, when it has one, dictates how the
    // remaining layer play is re-timed.
    let mut factor = if reversed { total } else { 1. - total };
    if let Some(animator) = &self.shared_element_animator {
      if effective_secs > 0. {
        factor = animator.duration().as_secs_f64() / effective_secs;
      }
    }

    let coordinator = &self.coordinator;
    for layer in &mut self.layer_animators {
      match layer.effective_range.position(total).reversed_if(reversed) {
        AnimationRangePosition::IsBefore => {
          // Already played out in this direction; pin it where it is.
          layer.animator.stop_and_finish_current();
        }
        AnimationRangePosition::Contains => match layer.animator.state() {
          AnimatorState::Stopped => {
            let fraction = layer.animator.fraction_complete();
            layer.animator = layer.mint_animator(layer.duration);
            layer.animator.set_fraction_complete(fraction);
            layer.animator.set_reversed(reversed);
            layer.register(coordinator);
            layer.animator.continue_with_duration_factor(now, factor);
          }
          state => {
            if layer.completed.replace(false) {
              coordinator.add(&mut layer.animator);
            }
            layer.animator.set_reversed(reversed);
            if state == AnimatorState::Inactive {
              layer.animator.start(now);
            } else {
              layer.animator.continue_with_duration_factor(now, factor);
            }
          }
        },
        AnimationRangePosition::IsAfter => {
          let delay_secs = layer.effective_range.distance_to(total) * effective_secs;
          let untouched =
            layer.animator.state() == AnimatorState::Inactive && !layer.completed.get();
          if untouched && !reversed && factor == 1. {
            layer.animator.start_after_delay(now, Duration::from_secs_f64(delay_secs));
          } else {
            // The waiting animator is stale for the new direction or
            // pacing; pay it off and mint a replacement.
            layer.animator.stop_and_finish_current();
            layer.animator = layer.mint_animator(layer.duration.mul_f64(factor));
            layer.animator.set_reversed(reversed);
            if reversed {
              layer.animator.set_fraction_complete(1.);
            }
            layer.register(coordinator);
            layer
              .animator
              .start_after_delay(now, Duration::from_secs_f64(delay_secs * factor));
          }
        }
      }
    }
    self.poll_completion();
  }

  fn poll_completion(&mut self) {
    if self.finished || !self.coordinator.is_settled() {
      return;
    }
    self.finished = true;
    let position = self.progress_completion.get();
    self.animation.completion(position);
    if let Some(spec) = &self.shared_element_spec {
      spec.borrow_mut().completion(position);
    }
    if position == AnimatingPosition::End {
      self.observers.did_transition(&self.operation_context, self.shared_element.as_deref());
    } else {
      self
        .observers
        .cancelled_transition(&self.operation_context, self.shared_element.as_deref());
    }
    if self.interruption_installed {
      self.operation_context.context.remove_interruption_gesture();
      self.interruption_installed = false;
    }
    self
      .operation_context
      .context
      .complete_transition(position == AnimatingPosition::End);
  }
}
