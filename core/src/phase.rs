//! Lifecycle observation: who gets told that a transition is about to run,
//! finished, or rewound.

use std::{cell::RefCell, rc::Rc};

use crate::{operation::TransitionOperationContext, shared_element::SharedElement};

/// Observes the outer lifecycle of every transition a controller runs.
///
/// All methods default to no-ops so observers implement only what they
/// care about.
pub trait TransitionPhaseDelegate {
  /// The transition is set up and about to animate or scrub.
  fn will_transition(
    &mut self, operation_context: &TransitionOperationContext,
    shared_element: Option<&dyn SharedElement>,
  ) {
    let _ = (operation_context, shared_element);
  }

  /// The transition completed at its end position.
  fn did_transition(
    &mut self, operation_context: &TransitionOperationContext,
    shared_element: Option<&dyn SharedElement>,
  ) {
    let _ = (operation_context, shared_element);
  }

  /// The transition rewound to its start position.
  fn cancelled_transition(
    &mut self, operation_context: &TransitionOperationContext,
    shared_element: Option<&dyn SharedElement>,
  ) {
    let _ = (operation_context, shared_element);
  }
}

/// An ordered list of phase observers, notified in registration order.
#[derive(Clone, Default)]
pub struct PhaseObservers(Vec<Rc<RefCell<dyn TransitionPhaseDelegate>>>);

impl PhaseObservers {
  pub fn add(&mut self, observer: Rc<RefCell<dyn TransitionPhaseDelegate>>) {
    self.0.push(observer);
  }

  pub(crate) fn will_transition(
    &self, operation_context: &TransitionOperationContext,
    shared_element: Option<&dyn SharedElement>,
  ) {
    for observer in &self.0 {
      observer.borrow_mut().will_transition(operation_context, shared_element);
    }
  }

  pub(crate) fn did_transition(
    &self, operation_context: &TransitionOperationContext,
    shared_element: Option<&dyn SharedElement>,
  ) {
    for observer in &self.0 {
      observer.borrow_mut().did_transition(operation_context, shared_element);
    }
  }

  pub(crate) fn cancelled_transition(
    &self, operation_context: &TransitionOperationContext,
    shared_element: Option<&dyn SharedElement>,
  ) {
    for observer in &self.0 {
      observer.borrow_mut().cancelled_transition(operation_context, shared_element);
    }
  }
}
