//! The navigation operations a transition can accompany, and the per-run
//! context bundle handed to every collaborator.

use crate::context::{ControllerId, TransitionContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationOperation {
  None,
  Push,
  Pop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalOperation {
  None,
  Present,
  Dismiss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabBarOperation {
  None,
  /// The selected tab's index increases.
  Increase,
  /// The selected tab's index decreases.
  Decrease,
}

/// The concrete navigation change this transition animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOperation {
  None,
  Navigation(NavigationOperation),
  Modal(ModalOperation),
  TabBar(TabBarOperation),
}

impl TransitionOperation {
  /// Whether the operation brings a new screen on.
  pub fn is_presenting(&self) -> bool {
    matches!(
      self,
      TransitionOperation::Navigation(NavigationOperation::Push)
        | TransitionOperation::Modal(ModalOperation::Present)
        | TransitionOperation::TabBar(TabBarOperation::Increase)
    )
  }

  /// Whether the operation takes the current screen off.
  pub fn is_dismissing(&self) -> bool {
    matches!(
      self,
      TransitionOperation::Navigation(NavigationOperation::Pop)
        | TransitionOperation::Modal(ModalOperation::Dismiss)
        | TransitionOperation::TabBar(TabBarOperation::Decrease)
    )
  }

  pub fn is_none(&self) -> bool { !self.is_presenting() && !self.is_dismissing() }
}

impl From<NavigationOperation> for TransitionOperation {
  fn from(op: NavigationOperation) -> Self { TransitionOperation::Navigation(op) }
}

impl From<ModalOperation> for TransitionOperation {
  fn from(op: ModalOperation) -> Self { TransitionOperation::Modal(op) }
}

impl From<TabBarOperation> for TransitionOperation {
  fn from(op: TabBarOperation) -> Self { TransitionOperation::TabBar(op) }
}

/// The operation being performed plus the host context it runs in. Every
/// transition collaborator receives this bundle instead of raw host
/// handles.
pub struct TransitionOperationContext {
  operation: TransitionOperation,
  pub context: Box<dyn TransitionContext>,
  source_controller: Option<ControllerId>,
}

impl TransitionOperationContext {
  pub fn new(operation: TransitionOperation, context: Box<dyn TransitionContext>) -> Self {
    TransitionOperationContext { operation, context, source_controller: None }
  }

  pub fn operation(&self) -> TransitionOperation { self.operation }

  /// The controller that initiated the operation, when the host announced
  /// one. Transition animations can use it to vary per-origin behavior.
  pub fn source_controller(&self) -> Option<ControllerId> { self.source_controller }

  pub fn set_source_controller(&mut self, controller: Option<ControllerId>) {
    self.source_controller = controller;
  }
}
