//! The gesture-side contract: how a host gesture scrubs a transition and
//! how the engine asks, at release, whether to finish or rewind.

use std::{cell::RefCell, rc::Rc};

use crate::{
  animation::{AnimatingPosition, AnimationFraction},
  operation::{TransitionOperation, TransitionOperationContext},
  shared_element::SharedElement,
};

/// The lifecycle of a host gesture, as reported to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
  Began,
  Changed,
  Ended,
  Cancelled,
}

/// How an interaction controller expresses gesture progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionProgress {
  /// An absolute overall fraction of the transition.
  FractionComplete(AnimationFraction),
  /// A delta to add to the current overall fraction. Step-based
  /// controllers must reset their accumulated measure in
  /// [`reset_progress_if_needed`](TransitionInteractionController::reset_progress_if_needed)
  /// or every poll re-applies the same delta.
  Step(AnimationFraction),
}

impl TransitionProgress {
  pub fn value(&self) -> AnimationFraction {
    match self {
      TransitionProgress::FractionComplete(f) | TransitionProgress::Step(f) => *f,
    }
  }

  pub fn is_step(&self) -> bool { matches!(self, TransitionProgress::Step(_)) }
}

/// Supplies the shared element for an interactive run, queried once when
/// the driver starts.
pub trait SharedElementProvider {
  fn shared_element_for_interactive_transition(
    &mut self, operation_context: &TransitionOperationContext,
  ) -> Option<Box<dyn SharedElement>>;
}

/// Translates a host gesture into transition progress and, at release,
/// into a verdict.
pub trait TransitionInteractionController {
  /// The provider to query for a shared element, if this controller can
  /// supply one.
  fn shared_element_provider(&mut self) -> Option<&mut dyn SharedElementProvider> { None }

  /// The operation a fresh gesture on an idle controller should start.
  /// Returning an operation whose `is_none()` holds declines the gesture.
  fn operation_for_interactive_transition(&self) -> TransitionOperation;

  /// Decide where the transition should settle when the gesture ends.
  fn completion_position(
    &self, operation_context: &TransitionOperationContext, fraction_complete: AnimationFraction,
  ) -> AnimatingPosition;

  /// The progress the gesture currently expresses.
  fn progress(&mut self, operation_context: &TransitionOperationContext) -> TransitionProgress;

  /// Called once after each progress application so step-based controllers
  /// can zero their accumulated measure.
  fn reset_progress_if_needed(&mut self, operation_context: &TransitionOperationContext) {
    let _ = operation_context;
  }

  /// A gesture took control at the given overall fraction.
  fn interaction_started(
    &mut self, operation_context: &TransitionOperationContext,
    fraction_complete: AnimationFraction,
  ) {
    let _ = (operation_context, fraction_complete);
  }

  /// The gesture released at the given overall fraction.
  fn interaction_ended(
    &mut self, operation_context: &TransitionOperationContext,
    fraction_complete: AnimationFraction,
  ) {
    let _ = (operation_context, fraction_complete);
  }
}

pub type InteractionControllerRef = Rc<RefCell<dyn TransitionInteractionController>>;
