use euclid::default::{Point2D, Rect, Size2D};
use passage_core::prelude::{
  AnimationFraction, TransitionContext, TransitionOperation, TransitionOperationContext, ViewId,
};

pub const FROM_VIEW: ViewId = ViewId(1);
pub const TO_VIEW: ViewId = ViewId(2);

/// A 400x800 container with fixed from/to views and no-op host callbacks.
pub struct StubContext;

impl TransitionContext for StubContext {
  fn container_view(&self) -> ViewId { ViewId(0) }

  fn from_view(&self) -> Option<ViewId> { Some(FROM_VIEW) }

  fn to_view(&self) -> Option<ViewId> { Some(TO_VIEW) }

  fn is_interactive(&self) -> bool { false }

  fn container_bounds(&self) -> Rect<f64> {
    Rect::new(Point2D::new(0., 0.), Size2D::new(400., 800.))
  }

  fn final_frame(&self, _: ViewId) -> Option<Rect<f64>> { None }

  fn update_interactive_transition(&mut self, _: AnimationFraction) {}

  fn finish_interactive_transition(&mut self) {}

  fn cancel_interactive_transition(&mut self) {}

  fn pause_interactive_transition(&mut self) {}

  fn complete_transition(&mut self, _: bool) {}
}

pub fn operation_context(operation: TransitionOperation) -> TransitionOperationContext {
  TransitionOperationContext::new(operation, Box::new(StubContext))
}
