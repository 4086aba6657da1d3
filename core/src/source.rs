//! Where transitions come from: the host supplies a source that builds a
//! [`Transition`] per operation, and a delegate that performs the
//! navigation operation a gesture asks for.

use crate::{
  interaction::InteractionControllerRef,
  operation::{TransitionOperation, TransitionOperationContext},
  transition::Transition,
};

/// Builds the transition to run for a given operation. Queried exactly
/// once per run.
pub trait TransitionsSource {
  fn transition_for(
    &mut self, operation_context: &TransitionOperationContext,
    interaction_controller: Option<&InteractionControllerRef>,
  ) -> Transition;
}

/// Performs the navigation operation that an interactive gesture requested,
/// e.g. by pushing or dismissing on the host's navigation construct. The
/// operation in turn starts the transition.
pub trait InteractiveTransitionOperationDelegate {
  fn perform_operation(&mut self, operation: TransitionOperation);
}
