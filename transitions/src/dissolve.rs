//! A cross-fade: the introduced view fades in over the departing one (or
//! out again when dismissing).

use std::{
  cell::{Cell, RefCell},
  rc::Rc,
};

use passage_core::prelude::{
  AnimatingPosition, AnimationCurve, AnimationFraction, AnimationLayer,
  AnimationTimingParameters, TransitionAnimation, TransitionOperationContext, ViewId,
};

/// Fades the top view of the transition over a single full-range layer.
///
/// The host supplies the property sinks: `set_alpha` is fed the faded
/// view's alpha every frame, and `remove_view` is called for the
/// introduced view when the transition rewinds.
pub struct DissolveTransitionAnimation {
  pub animation_curve: AnimationCurve,
  set_alpha: Rc<RefCell<Box<dyn FnMut(ViewId, f64)>>>,
  remove_view: Box<dyn FnMut(ViewId)>,
  top_view: Rc<Cell<Option<ViewId>>>,
  introduced_view: Option<ViewId>,
  /// Alpha endpoints (initial, target), resolved per operation in `setup`.
  fade: Rc<Cell<(f64, f64)>>,
}

impl DissolveTransitionAnimation {
  pub fn new(
    set_alpha: impl FnMut(ViewId, f64) + 'static, remove_view: impl FnMut(ViewId) + 'static,
  ) -> Self {
    DissolveTransitionAnimation {
      animation_curve: AnimationCurve::EaseInOut,
      set_alpha: Rc::new(RefCell::new(Box::new(set_alpha))),
      remove_view: Box::new(remove_view),
      top_view: Rc::new(Cell::new(None)),
      introduced_view: None,
      fade: Rc::new(Cell::new((0., 1.))),
    }
  }
}

impl TransitionAnimation for DissolveTransitionAnimation {
  fn setup(&mut self, operation_context: &mut TransitionOperationContext) {
    let is_dismissing = operation_context.operation().is_dismissing();
    let context = &operation_context.context;
    let top = if is_dismissing { context.from_view() } else { context.to_view() };
    self.top_view.set(top);
    self.introduced_view = context.to_view();

    let initial = if is_dismissing { 1. } else { 0. };
    self.fade.set((initial, 1. - initial));
    if let Some(view) = top {
      (&mut *self.set_alpha.borrow_mut())(view, initial);
    }
  }

  fn layers(&mut self) -> Vec<AnimationLayer> {
    let top_view = self.top_view.clone();
    let fade = self.fade.clone();
    let set_alpha = self.set_alpha.clone();
    vec![AnimationLayer::full(
      AnimationTimingParameters::from_curve(self.animation_curve),
      move |fraction: AnimationFraction| {
        if let Some(view) = top_view.get() {
          let (initial, target) = fade.get();
          (&mut *set_alpha.borrow_mut())(view, initial + (target - initial) * fraction);
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
  }
}
