use lyon_geom::CubicBezierSegment;

use crate::animation::AnimationFraction;

/// Specify the rate of change of an animated value over time.
pub trait Easing {
  /// Map a time rate in `[0, 1]` to the rate of change of the animated
  /// value.
  fn easing(&self, time_rate: AnimationFraction) -> AnimationFraction;
}

/// Animates at an even speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinearEasing;

/// Animate along a cubic Bézier curve running from (0, 0) to (1, 1), x-axis
/// as time rate and y-axis as the rate of change.
///
/// Construct `CubicBezierEasing` with its two control points; the x values
/// of both must lie in `[0, 1]` so the curve stays a function of time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezierEasing(CubicBezierSegment<AnimationFraction>);

impl CubicBezierEasing {
  pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
    use lyon_geom::Point;
    Self(CubicBezierSegment {
      from: Point::new(0., 0.),
      ctrl1: Point::new(x1, y1),
      ctrl2: Point::new(x2, y2),
      to: Point::new(1., 1.),
    })
  }
}

impl Easing for LinearEasing {
  #[inline]
  fn easing(&self, time_rate: AnimationFraction) -> AnimationFraction { time_rate }
}

impl Easing for CubicBezierEasing {
  #[inline]
  fn easing(&self, time_rate: AnimationFraction) -> AnimationFraction {
    self.0.y(time_rate.clamp(0., 1.))
  }
}

/// The fixed easing curves a transition author can name without spelling
/// out control points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationCurve {
  Linear,
  EaseIn,
  EaseOut,
  #[default]
  EaseInOut,
}

impl Easing for AnimationCurve {
  fn easing(&self, time_rate: AnimationFraction) -> AnimationFraction {
    match self {
      AnimationCurve::Linear => easing::LINEAR.easing(time_rate),
      AnimationCurve::EaseIn => easing::EASE_IN.easing(time_rate),
      AnimationCurve::EaseOut => easing::EASE_OUT.easing(time_rate),
      AnimationCurve::EaseInOut => easing::EASE_IN_OUT.easing(time_rate),
    }
  }
}

/// The standard CSS timing-function constants.
pub mod easing {
  use super::{CubicBezierEasing, LinearEasing};

  /// Animates at an even speed.
  pub const LINEAR: LinearEasing = LinearEasing;

  /// Increases in velocity towards the middle of the animation, slowing
  /// back down at the end.
  pub const EASE: CubicBezierEasing = CubicBezierEasing::new(0.25, 0.1, 0.25, 1.0);

  /// Starts off slowly, with the velocity increasing until complete.
  pub const EASE_IN: CubicBezierEasing = CubicBezierEasing::new(0.42, 0., 1., 1.);

  /// Starts quickly, slowing down as the animation continues.
  pub const EASE_OUT: CubicBezierEasing = CubicBezierEasing::new(0., 0., 0.58, 1.);

  /// Slowly transitioning, speeding up, and then slowing down again.
  pub const EASE_IN_OUT: CubicBezierEasing = CubicBezierEasing::new(0.42, 0., 0.58, 1.);
}
