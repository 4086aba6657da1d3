use std::{cell::Cell, rc::Rc};

use crate::animation::PropertyAnimator;

/// Joins the completions of every animator a transition ever runs, so the
/// aggregate completion can fire exactly once after the last of them.
///
/// Each [`add`](CompletionCoordinator::add) counts one animator run and
/// attaches a completion that pays it back exactly once. Animators created
/// or resumed mid-transition are added as they appear, so the count stays
/// ahead of the settling check at every safe point.
pub(crate) struct CompletionCoordinator {
  pending: Rc<Cell<usize>>,
}

impl CompletionCoordinator {
  pub(crate) fn new() -> Self { CompletionCoordinator { pending: Rc::new(Cell::new(0)) } }

  pub(crate) fn add(&self, animator: &mut PropertyAnimator) {
    self.pending.set(self.pending.get() + 1);
    let pending = self.pending.clone();
    let spent = Cell::new(false);
    animator.add_completion(move |_| {
      if !spent.replace(true) {
        pending.set(pending.get().saturating_sub(1));
      }
    });
  }

  pub(crate) fn is_settled(&self) -> bool { self.pending.get() == 0 }
}
