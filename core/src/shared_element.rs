//! A shared element is a view that visually travels from its place in the
//! departing screen to its place in the arriving screen, animated
//! independently of the transition's layers.

use std::rc::Rc;

use euclid::default::{Rect, Vector2D};

use crate::{
  animation::{AnimatingPosition, AnimationFraction, AnimationTimingParameters},
  context::ViewId,
  interaction::TransitionProgress,
  operation::TransitionOperationContext,
};

/// The element that travels between the two screens.
pub trait SharedElement {
  /// The view the host animates across the container.
  fn transitioning_view(&self) -> ViewId;
}

/// A shared element whose travel is a frame interpolation, with an optional
/// grab offset so a dragged element stays under the finger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSharedElement {
  pub view: ViewId,
  pub initial_frame: Rect<f64>,
  pub target_frame: Rect<f64>,
  pub touch_offset: Vector2D<f64>,
}

impl FrameSharedElement {
  pub fn new(view: ViewId, initial_frame: Rect<f64>, target_frame: Rect<f64>) -> Self {
    FrameSharedElement { view, initial_frame, target_frame, touch_offset: Vector2D::zero() }
  }

  /// The frame at the given travel fraction, linearly interpolated.
  pub fn frame_at(&self, fraction: AnimationFraction) -> Rect<f64> {
    let origin = self.initial_frame.origin.lerp(self.target_frame.origin, fraction);
    let size = self.initial_frame.size.lerp(self.target_frame.size, fraction);
    Rect::new(origin, size)
  }
}

impl SharedElement for FrameSharedElement {
  fn transitioning_view(&self) -> ViewId { self.view }
}

/// The animated half of a shared element transition: how the element moves
/// when no finger is on it.
pub trait SharedElementAnimation {
  /// The pacing of the element's travel. A spring built from raw constants
  /// gives the travel an implicit duration that can override the
  /// transition's own.
  fn timing_parameters(&self) -> AnimationTimingParameters;

  /// Receives the element resolved for this run, before `setup`.
  fn set_shared_element(&mut self, element: Rc<dyn SharedElement>);

  fn setup(&mut self, operation_context: &mut TransitionOperationContext);

  /// Apply the element's state at the given eased travel fraction.
  fn animation(&mut self, fraction: AnimationFraction);

  fn completion(&mut self, position: AnimatingPosition);

  /// The end the current travel animates towards.
  fn animating_position(&self) -> AnimatingPosition { AnimatingPosition::End }

  fn set_animating_position(&mut self, position: AnimatingPosition) { let _ = position; }
}

/// The interactive half: how the element follows the gesture while a
/// finger is down.
pub trait SharedElementInteraction {
  /// A gesture took (or re-took) control at the given overall fraction.
  fn start_interaction(
    &mut self, operation_context: &mut TransitionOperationContext, fraction: AnimationFraction,
  );

  fn update_interaction(
    &mut self, operation_context: &mut TransitionOperationContext, progress: TransitionProgress,
  );
}

/// A complete shared element specification, animated and interactive.
pub trait SharedElementTransition: SharedElementAnimation + SharedElementInteraction {}

impl<T: SharedElementAnimation + SharedElementInteraction> SharedElementTransition for T {}

#[cfg(test)]
mod tests {
  use euclid::default::{Point2D, Size2D};

  use super::*;

  #[test]
  fn frame_interpolates_origin_and_size() {
    let element = FrameSharedElement::new(
      ViewId(1),
      Rect::new(Point2D::new(0., 0.), Size2D::new(100., 100.)),
      Rect::new(Point2D::new(200., 400.), Size2D::new(50., 60.)),
    );
    assert_eq!(element.frame_at(0.), element.initial_frame);
    assert_eq!(element.frame_at(1.), element.target_frame);
    let mid = element.frame_at(0.5);
    assert_eq!(mid.origin, Point2D::new(100., 200.));
    assert_eq!(mid.size, Size2D::new(75., 80.));
  }
}
