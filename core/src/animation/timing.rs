use std::time::Duration;

use crate::animation::{
  AnimationCurve, AnimationFraction, CubicBezierEasing, Easing, SpringTimingParameters,
};

/// How a single animation layer paces its progress over its active range.
///
/// Curve timings play over whatever nominal duration the animator assigns
/// them. A spring built from raw physical constants instead carries an
/// implicit duration, its own settling time, which can stretch the
/// transition beyond its nominal duration (see
/// [`Transition::effective_duration`](crate::transition::Transition::effective_duration)).
#[derive(Clone, Copy, Debug)]
pub enum AnimationTimingParameters {
  Curve(AnimationCurve),
  CubicBezier(CubicBezierEasing),
  Spring {
    params: SpringTimingParameters,
    /// Whether the spring's settling time dictates the play-out duration.
    has_implicit_duration: bool,
  },
}

impl AnimationTimingParameters {
  pub fn from_curve(curve: AnimationCurve) -> Self { AnimationTimingParameters::Curve(curve) }

  pub fn linear() -> Self { AnimationTimingParameters::Curve(AnimationCurve::Linear) }

  pub fn cubic_bezier(easing: CubicBezierEasing) -> Self {
    AnimationTimingParameters::CubicBezier(easing)
  }

  /// A spring feel without an implicit duration: the spring shape is
  /// normalized and played over the nominal duration like a curve.
  pub fn spring_with_damping_ratio(ratio: f64, initial_velocity: f64) -> Self {
    AnimationTimingParameters::Spring {
      params: SpringTimingParameters::from_damping_ratio(ratio, initial_velocity),
      has_implicit_duration: false,
    }
  }

  /// A spring defined by raw physical constants. Its settling time is an
  /// implicit duration that overrides the nominal duration of whatever it
  /// animates.
  pub fn spring(mass: f64, stiffness: f64, damping: f64, initial_velocity: f64) -> Self {
    AnimationTimingParameters::Spring {
      params: SpringTimingParameters::new(mass, stiffness, damping, initial_velocity),
      has_implicit_duration: true,
    }
  }

  pub fn has_implicit_duration(&self) -> bool {
    matches!(self, AnimationTimingParameters::Spring { has_implicit_duration: true, .. })
  }

  /// The duration this timing actually plays over: the spring settling time
  /// when implicit, the nominal duration otherwise.
  pub fn resolved_duration(&self, nominal: Duration) -> Duration {
    match self {
      AnimationTimingParameters::Spring { params, has_implicit_duration: true } => {
        params.settling_duration()
      }
      _ => nominal,
    }
  }
}

impl Easing for AnimationTimingParameters {
  fn easing(&self, time_rate: AnimationFraction) -> AnimationFraction {
    match self {
      AnimationTimingParameters::Curve(curve) => curve.easing(time_rate),
      AnimationTimingParameters::CubicBezier(bezier) => bezier.easing(time_rate),
      AnimationTimingParameters::Spring { params, .. } => params.easing(time_rate),
    }
  }
}

impl Default for AnimationTimingParameters {
  fn default() -> Self { AnimationTimingParameters::Curve(AnimationCurve::default()) }
}

impl From<AnimationCurve> for AnimationTimingParameters {
  fn from(curve: AnimationCurve) -> Self { AnimationTimingParameters::Curve(curve) }
}

impl From<CubicBezierEasing> for AnimationTimingParameters {
  fn from(easing: CubicBezierEasing) -> Self { AnimationTimingParameters::CubicBezier(easing) }
}
