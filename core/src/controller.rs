//! The long-lived per-flow object: owns the transitions source, the
//! optional interaction controller, and at most one driver at a time.

use std::{
  cell::RefCell,
  rc::Rc,
  time::Instant,
};

use crate::{
  context::{ControllerId, TransitionContext},
  driver::TransitionDriver,
  interaction::{GesturePhase, InteractionControllerRef},
  operation::{TransitionOperation, TransitionOperationContext},
  phase::{PhaseObservers, TransitionPhaseDelegate},
  source::{InteractiveTransitionOperationDelegate, TransitionsSource},
};

/// Coordinates every transition of one navigation flow.
///
/// A controller without an interaction controller only runs programmatic
/// transitions. With one, a fresh gesture on an idle flow asks the
/// interaction controller which operation to start, hands that operation to
/// the host's operation delegate, and scrubs the transition the host then
/// starts.
pub struct TransitionController {
  transitions_source: Rc<RefCell<dyn TransitionsSource>>,
  operation_delegate: Option<Rc<RefCell<dyn InteractiveTransitionOperationDelegate>>>,
  interaction_controller: Option<InteractionControllerRef>,
  phase_observers: PhaseObservers,
  driver: Option<TransitionDriver>,
  /// Whether the in-flight (or requested) transition was started by a
  /// gesture.
  initially_interactive: bool,
  operation_from_gesture: TransitionOperation,
  source_controller: Option<ControllerId>,
}

impl TransitionController {
  pub fn new(transitions_source: Rc<RefCell<dyn TransitionsSource>>) -> Self {
    TransitionController {
      transitions_source,
      operation_delegate: None,
      interaction_controller: None,
      phase_observers: PhaseObservers::default(),
      driver: None,
      initially_interactive: false,
      operation_from_gesture: TransitionOperation::None,
      source_controller: None,
    }
  }

  pub fn new_interactive(
    transitions_source: Rc<RefCell<dyn TransitionsSource>>,
    interaction_controller: InteractionControllerRef,
    operation_delegate: Rc<RefCell<dyn InteractiveTransitionOperationDelegate>>,
  ) -> Self {
    let mut controller = Self::new(transitions_source);
    controller.interaction_controller = Some(interaction_controller);
    controller.operation_delegate = Some(operation_delegate);
    controller
  }

  pub fn can_be_interactive(&self) -> bool {
    self.interaction_controller.is_some() && self.operation_delegate.is_some()
  }

  pub fn is_transitioning(&self) -> bool { self.driver.is_some() }

  /// Whether the next started transition was requested by a gesture and
  /// should begin in its scrubbing state.
  pub fn wants_interactive_start(&self) -> bool { self.initially_interactive }

  /// The operation the current gesture asked for, if any.
  pub fn operation_from_gesture(&self) -> TransitionOperation { self.operation_from_gesture }

  pub fn add_phase_observer(&mut self, observer: Rc<RefCell<dyn TransitionPhaseDelegate>>) {
    self.phase_observers.add(observer);
  }

  /// Announce which screen controller initiated the next operation, for
  /// transition animations that vary per origin.
  pub fn set_source_controller(&mut self, controller: Option<ControllerId>) {
    self.source_controller = controller;
  }

  /// Feed the driving gesture. On an idle flow a beginning gesture asks
  /// the interaction controller for an operation and hands it to the
  /// operation delegate; on a transitioning flow the gesture scrubs the
  /// driver.
  pub fn interactive_gesture_changed(&mut self, phase: GesturePhase, now: Instant) {
    if let Some(driver) = &mut self.driver {
      driver.update_interaction(phase, now);
      self.finish_if_settled();
      return;
    }
    if phase != GesturePhase::Began || !self.can_be_interactive() {
      return;
    }
    let operation = self
      .interaction_controller
      .as_ref()
      .map(|ic| ic.borrow().operation_for_interactive_transition())
      .unwrap_or(TransitionOperation::None);
    if operation.is_none() {
      log::warn!("interaction controller declined to start an operation");
      return;
    }
    self.initially_interactive = true;
    self.operation_from_gesture = operation;
    if let Some(delegate) = &self.operation_delegate {
      delegate.borrow_mut().perform_operation(operation);
    }
  }

  /// Start driving a transition for `operation` in the given host context.
  /// The transitions source is queried exactly once per call.
  ///
  /// # Panics
  ///
  /// Panics if a transition is already in flight.
  pub fn start_transition(
    &mut self, operation: TransitionOperation, context: Box<dyn TransitionContext>, now: Instant,
  ) {
    assert!(self.driver.is_none(), "cannot start a transition while one is in flight");

    let mut operation_context = TransitionOperationContext::new(operation, context);
    operation_context.set_source_controller(self.source_controller);

    let transition = self
      .transitions_source
      .borrow_mut()
      .transition_for(&operation_context, self.interaction_controller.as_ref());

    self.driver = Some(TransitionDriver::new(
      operation_context,
      transition,
      self.interaction_controller.clone(),
      self.phase_observers.clone(),
      now,
    ));
    self.finish_if_settled();
  }

  /// Feed the interruption gesture recognized on a running transition.
  pub fn interruption_gesture_changed(&mut self, phase: GesturePhase, now: Instant) {
    if let Some(driver) = &mut self.driver {
      driver.interruption_gesture_changed(phase, now);
      self.finish_if_settled();
    }
  }

  /// Advance the in-flight transition to `now`; the host calls this once
  /// per frame.
  pub fn tick(&mut self, now: Instant) {
    if let Some(driver) = &mut self.driver {
      driver.tick(now);
      self.finish_if_settled();
    }
  }

  pub fn driver(&self) -> Option<&TransitionDriver> { self.driver.as_ref() }

  fn finish_if_settled(&mut self) {
    if self.driver.as_ref().is_some_and(|d| d.is_finished()) {
      self.driver = None;
      self.initially_interactive = false;
      self.operation_from_gesture = TransitionOperation::None;
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{
    cell::Cell,
    time::Duration,
  };

  use euclid::default::{Point2D, Rect, Size2D};

  use super::*;
  use crate::{
    animation::{
      AnimatingPosition, AnimationFraction, AnimationLayer, AnimationTimingParameters,
    },
    context::{InterruptionGestureTarget, ViewId},
    interaction::{TransitionInteractionController, TransitionProgress},
    operation::NavigationOperation,
    transition::{Transition, TransitionAnimation},
  };

  struct MockContext {
    interactive: bool,
    completed: Rc<Cell<Option<bool>>>,
  }

  impl TransitionContext for MockContext {
    fn container_view(&self) -> ViewId { ViewId(0) }

    fn from_view(&self) -> Option<ViewId> { Some(ViewId(1)) }

    fn to_view(&self) -> Option<ViewId> { Some(ViewId(2)) }

    fn is_interactive(&self) -> bool { self.interactive }

    fn container_bounds(&self) -> Rect<f64> {
      Rect::new(Point2D::new(0., 0.), Size2D::new(400., 800.))
    }

    fn final_frame(&self, _: ViewId) -> Option<Rect<f64>> { None }

    fn update_interactive_transition(&mut self, _: AnimationFraction) {}

    fn finish_interactive_transition(&mut self) {}

    fn cancel_interactive_transition(&mut self) {}

    fn pause_interactive_transition(&mut self) {}

    fn complete_transition(&mut self, completed: bool) { self.completed.set(Some(completed)); }

    fn install_interruption_gesture(&mut self, _: InterruptionGestureTarget) {}
  }

  struct SlideOut {
    sink: Rc<Cell<f64>>,
  }

  impl TransitionAnimation for SlideOut {
    fn setup(&mut self, _: &mut TransitionOperationContext) {}

    fn layers(&mut self) -> Vec<AnimationLayer> {
      let sink = self.sink.clone();
      vec![AnimationLayer::full(AnimationTimingParameters::linear(), move |f| sink.set(f))]
    }

    fn completion(&mut self, _: AnimatingPosition) {}
  }

  struct CountingSource {
    calls: Rc<Cell<u32>>,
    sink: Rc<Cell<f64>>,
  }

  impl TransitionsSource for CountingSource {
    fn transition_for(
      &mut self, _: &TransitionOperationContext, _: Option<&InteractionControllerRef>,
    ) -> Transition {
      self.calls.set(self.calls.get() + 1);
      Transition::new(Duration::from_millis(500), SlideOut { sink: self.sink.clone() })
    }
  }

  struct PanGesture {
    progress: Cell<TransitionProgress>,
    verdict: AnimatingPosition,
  }

  impl TransitionInteractionController for PanGesture {
    fn operation_for_interactive_transition(&self) -> TransitionOperation {
      NavigationOperation::Pop.into()
    }

    fn completion_position(
      &self, _: &TransitionOperationContext, _: AnimationFraction,
    ) -> AnimatingPosition {
      self.verdict
    }

    fn progress(&mut self, _: &TransitionOperationContext) -> TransitionProgress {
      self.progress.get()
    }
  }

  struct RecordingDelegate(Rc<Cell<Option<TransitionOperation>>>);

  impl InteractiveTransitionOperationDelegate for RecordingDelegate {
    fn perform_operation(&mut self, operation: TransitionOperation) {
      self.0.set(Some(operation));
    }
  }

  fn counting_source() -> (Rc<RefCell<CountingSource>>, Rc<Cell<u32>>, Rc<Cell<f64>>) {
    let calls = Rc::new(Cell::new(0));
    let sink = Rc::new(Cell::new(-1.));
    let source =
      Rc::new(RefCell::new(CountingSource { calls: calls.clone(), sink: sink.clone() }));
    (source, calls, sink)
  }

  #[test]
  fn programmatic_transition_runs_to_completion_and_resets() {
    let (source, calls, sink) = counting_source();
    let mut controller = TransitionController::new(source);
    let completed = Rc::new(Cell::new(None));

    let t0 = Instant::now();
    controller.start_transition(
      NavigationOperation::Push.into(),
      Box::new(MockContext { interactive: false, completed: completed.clone() }),
      t0,
    );
    assert_eq!(calls.get(), 1);
    assert!(controller.is_transitioning());

    controller.tick(t0 + Duration::from_millis(250));
    assert!((sink.get() - 0.5).abs() < 1e-9);

    controller.tick(t0 + Duration::from_millis(600));
    assert!(!controller.is_transitioning());
    assert_eq!(sink.get(), 1.);
    assert_eq!(completed.get(), Some(true));

    // the flow is reusable once idle
    controller.start_transition(
      NavigationOperation::Pop.into(),
      Box::new(MockContext { interactive: false, completed: completed.clone() }),
      t0 + Duration::from_secs(1),
    );
    assert_eq!(calls.get(), 2);
  }

  #[test]
  #[should_panic]
  fn starting_twice_panics() {
    let (source, _, _) = counting_source();
    let mut controller = TransitionController::new(source);
    let t0 = Instant::now();
    for _ in 0..2 {
      controller.start_transition(
        NavigationOperation::Push.into(),
        Box::new(MockContext { interactive: false, completed: Rc::new(Cell::new(None)) }),
        t0,
      );
    }
  }

  #[test]
  fn gesture_on_idle_flow_requests_the_operation() {
    let (source, _, sink) = counting_source();
    let gesture = Rc::new(RefCell::new(PanGesture {
      progress: Cell::new(TransitionProgress::FractionComplete(0.)),
      verdict: AnimatingPosition::End,
    }));
    let requested = Rc::new(Cell::new(None));
    let delegate = Rc::new(RefCell::new(RecordingDelegate(requested.clone())));

    let mut controller =
      TransitionController::new_interactive(source, gesture.clone(), delegate);
    assert!(controller.can_be_interactive());

    let t0 = Instant::now();
    controller.interactive_gesture_changed(GesturePhase::Began, t0);
    assert_eq!(requested.get(), Some(NavigationOperation::Pop.into()));
    assert!(controller.wants_interactive_start());
    assert!(!controller.is_transitioning());

    // the host performs the operation, which starts the transition
    let completed = Rc::new(Cell::new(None));
    controller.start_transition(
      NavigationOperation::Pop.into(),
      Box::new(MockContext { interactive: true, completed: completed.clone() }),
      t0,
    );

    gesture.borrow().progress.set(TransitionProgress::FractionComplete(0.4));
    controller.interactive_gesture_changed(GesturePhase::Changed, t0);
    assert!((sink.get() - 0.4).abs() < 1e-9);

    controller.interactive_gesture_changed(GesturePhase::Ended, t0);
    controller.tick(t0 + Duration::from_secs(1));
    assert!(!controller.is_transitioning());
    assert!(!controller.wants_interactive_start());
    assert_eq!(sink.get(), 1.);
    assert_eq!(completed.get(), Some(true));
  }

  #[test]
  fn gesture_without_delegate_is_ignored() {
    let (source, _, _) = counting_source();
    let mut controller = TransitionController::new(source);
    controller.interactive_gesture_changed(GesturePhase::Began, Instant::now());
    assert!(!controller.wants_interactive_start());
    assert!(!controller.is_transitioning());
  }
}
