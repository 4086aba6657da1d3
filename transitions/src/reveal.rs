//! A reveal: the current screen slides away to expose the new one already
//! in place beneath it; dismissal slides it back over.

use std::{
  cell::{Cell, RefCell},
  rc::Rc,
};

use euclid::default::Vector2D;
use passage_core::prelude::{
  AnimatingPosition, AnimationLayer, AnimationTimingParameters, TransitionAnimation,
  TransitionOperationContext, ViewId,
};

use crate::{edge_slide::EdgeTransitionAnimation, edges::TransitionScreenEdge};

/// Reveals the destination by moving the covering view, which the host
/// must raise above the other via the `bring_to_front` sink.
pub struct RevealTransitionAnimation {
  base: EdgeTransitionAnimation,
  set_translation: Rc<RefCell<Box<dyn FnMut(ViewId, Vector2D<f64>)>>>,
  bring_to_front: Box<dyn FnMut(ViewId)>,
  remove_view: Box<dyn FnMut(ViewId)>,
  covering_view: Rc<Cell<Option<ViewId>>>,
  introduced_view: Option<ViewId>,
  travel: Rc<Cell<(Vector2D<f64>, Vector2D<f64>)>>,
}

impl RevealTransitionAnimation {
  pub fn new(
    base: EdgeTransitionAnimation, set_translation: impl FnMut(ViewId, Vector2D<f64>) + 'static,
    bring_to_front: impl FnMut(ViewId) + 'static, remove_view: impl FnMut(ViewId) + 'static,
  ) -> Self {
    RevealTransitionAnimation {
      base,
      set_translation: Rc::new(RefCell::new(Box::new(set_translation))),
      bring_to_front: Box::new(bring_to_front),
      remove_view: Box::new(remove_view),
      covering_view: Rc::new(Cell::new(None)),
      introduced_view: None,
      travel: Rc::new(Cell::new((Vector2D::zero(), Vector2D::zero()))),
    }
  }
}

impl TransitionAnimation for RevealTransitionAnimation {
  fn setup(&mut self, operation_context: &mut TransitionOperationContext) {
    let operation = operation_context.operation();
    let Some(edge) = self.base.transition_screen_edge_for(operation) else {
      log::warn!("no screen edge is mapped to the requested operation");
      return;
    };
    let is_dismissing = operation.is_dismissing();
    let context = &operation_context.context;
    // Presenting slides the current screen off to reveal the new one
    // beneath it; dismissing slides the old screen back over.
    let covering = if is_dismissing { context.to_view() } else { context.from_view() };
    self.covering_view.set(covering);
    self.introduced_view = context.to_view();
    if let Some(view) = covering {
      (self.bring_to_front)(view);
    }

    let effective_edge = if is_dismissing { edge.opposite() } else { edge };
    let hidden = EdgeTransitionAnimation::translation_to(
      effective_edge,
      &context.container_bounds(),
    );
    let (initial, target) =
      if is_dismissing { (hidden, Vector2D::zero()) } else { (Vector2D::zero(), hidden) };
    self.travel.set((initial, target));
    if let Some(view) = covering {
      (&mut *self.set_translation.borrow_mut())(view, initial);
    }
  }

  fn layers(&mut self) -> Vec<AnimationLayer> {
    let covering_view = self.covering_view.clone();
    let travel = self.travel.clone();
    let set_translation = self.set_translation.clone();
    vec![AnimationLayer::full(
      AnimationTimingParameters::from_curve(self.base.animation_curve),
      move |fraction| {
        if let Some(view) = covering_view.get() {
          let (initial, target) = travel.get();
          (&mut *set_translation.borrow_mut())(view, initial.lerp(target, fraction));
        }
      },
    )]
  }

  fn completion(&mut self, position: AnimatingPosition) {
    if position != AnimatingPosition::End {
      if let Some(view) = self.introduced_view {
        (self.remove_view)(view);
      }
    }
    if let Some(view) = self.covering_view.get() {
      (&mut *self.set_translation.borrow_mut())(view, Vector2D::zero());
    }
  }
}
