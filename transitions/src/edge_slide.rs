//! Edge-driven animations: a base that resolves which screen edge an
//! operation animates from, and a slide recipe built on it.

use std::{
  cell::{Cell, RefCell},
  rc::Rc,
};

use euclid::default::{Rect, Vector2D};
use passage_core::prelude::{
  AnimatingPosition, AnimationCurve, AnimationLayer, AnimationTimingParameters,
  TransitionAnimation, TransitionOperation, TransitionOperationContext, ViewId,
};

use crate::edges::{TransitionEdges, TransitionScreenEdge};

/// Shared plumbing for animations that move a view towards or from a
/// screen edge.
pub struct EdgeTransitionAnimation {
  edges: TransitionEdges,
  pub animation_curve: AnimationCurve,
}

impl EdgeTransitionAnimation {
  pub fn new(edges: TransitionEdges) -> Self {
    EdgeTransitionAnimation { edges, animation_curve: AnimationCurve::EaseInOut }
  }

  pub fn for_navigation_at_edge(edge: TransitionScreenEdge) -> Self {
    Self::new(TransitionEdges::for_navigation_at_edge(edge))
  }

  pub fn for_modal_at_edge(edge: TransitionScreenEdge) -> Self {
    Self::new(TransitionEdges::for_modal_at_edge(edge))
  }

  pub fn for_tab_bar(right_to_left: bool) -> Self {
    Self::new(TransitionEdges::for_tab_bar(right_to_left))
  }

  pub fn edges(&self) -> &TransitionEdges { &self.edges }

  /// The edge from which `operation` animates. The table stores the edges
  /// panned towards, so this is the opposite edge.
  pub fn transition_screen_edge_for(
    &self, operation: TransitionOperation,
  ) -> Option<TransitionScreenEdge> {
    self.edges.screen_edge_for(operation).map(|edge| edge.opposite())
  }

  /// The translation that puts a view of `frame`'s size just outside the
  /// given edge.
  pub fn translation_to(edge: TransitionScreenEdge, frame: &Rect<f64>) -> Vector2D<f64> {
    match edge {
      TransitionScreenEdge::Top => Vector2D::new(0., -frame.height()),
      TransitionScreenEdge::Right => Vector2D::new(frame.width(), 0.),
      TransitionScreenEdge::Bottom => Vector2D::new(0., frame.height()),
      TransitionScreenEdge::Left => Vector2D::new(-frame.width(), 0.),
    }
  }
}

/// Slides the introduced view in from its operation's edge, or the
/// departing view back out to it when dismissing.
///
/// The host supplies `set_translation` (fed the moving view's offset every
/// frame) and `remove_view` (called for the introduced view when the
/// transition rewinds).
pub struct EdgeSlideTransitionAnimation {
  base: EdgeTransitionAnimation,
  set_translation: Rc<RefCell<Box<dyn FnMut(ViewId, Vector2D<f64>)>>>,
  remove_view: Box<dyn FnMut(ViewId)>,
  moving_view: Rc<Cell<Option<ViewId>>>,
  introduced_view: Option<ViewId>,
  /// Translation endpoints (initial, target), resolved in `setup`.
  travel: Rc<Cell<(Vector2D<f64>, Vector2D<f64>)>>,
}

impl EdgeSlideTransitionAnimation {
  pub fn new(
    base: EdgeTransitionAnimation, set_translation: impl FnMut(ViewId, Vector2D<f64>) + 'static,
    remove_view: impl FnMut(ViewId) + 'static,
  ) -> Self {
    EdgeSlideTransitionAnimation {
      base,
      set_translation: Rc::new(RefCell::new(Box::new(set_translation))),
      remove_view: Box::new(remove_view),
      moving_view: Rc::new(Cell::new(None)),
      introduced_view: None,
      travel: Rc::new(Cell::new((Vector2D::zero(), Vector2D::zero()))),
    }
  }

  pub fn animation_curve(&self) -> AnimationCurve { self.base.animation_curve }
}

impl TransitionAnimation for EdgeSlideTransitionAnimation {
  fn setup(&mut self, operation_context: &mut TransitionOperationContext) {
    let operation = operation_context.operation();
    let Some(edge) = self.base.transition_screen_edge_for(operation) else {
      log::warn!("no screen edge is mapped to the requested operation");
      return;
    };
    let is_dismissing = operation.is_dismissing();
    let context = &operation_context.context;
    let moving = if is_dismissing { context.from_view() } else { context.to_view() };
    self.moving_view.set(moving);
    self.introduced_view = context.to_view();

    let hidden = EdgeTransitionAnimation::translation_to(edge, &context.container_bounds());
    let (initial, target) =
      if is_dismissing { (Vector2D::zero(), hidden) } else { (hidden, Vector2D::zero()) };
    self.travel.set((initial, target));
    if let Some(view) = moving {
      (&mut *self.set_translation.borrow_mut())(view, initial);
    }
  }

  fn layers(&mut self) -> Vec<AnimationLayer> {
    let moving_view = self.moving_view.clone();
    let travel = self.travel.clone();
    let set_translation = self.set_translation.clone();
    vec![AnimationLayer::full(
      AnimationTimingParameters::from_curve(self.base.animation_curve),
      move |fraction| {
        if let Some(view) = moving_view.get() {
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
    if let Some(view) = self.moving_view.get() {
      (&mut *self.set_translation.borrow_mut())(view, Vector2D::zero());
    }
  }
}
