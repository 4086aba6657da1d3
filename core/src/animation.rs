//! The timing primitives of a transition: unit-timeline sub-ranges, easing
//! and spring curves, animation layers and the property animator that plays
//! them frame by frame.

mod animator;
mod easing_curves;
mod layer;
mod range;
mod spring;
mod timing;

pub use animator::{AnimatingPosition, AnimatorState, PropertyAnimator};
pub use easing_curves::{AnimationCurve, CubicBezierEasing, Easing, LinearEasing, easing};
pub use layer::{AnimationAction, AnimationLayer};
pub use range::{AnimationRange, AnimationRangePosition, InvalidRangeError};
pub use spring::SpringTimingParameters;
pub use timing::AnimationTimingParameters;

/// Overall transition progress. Conventionally in `[0, 1]`, but callers may
/// transiently exceed the bounds during fast gestures; consumers clamp or
/// extrapolate where it matters.
pub type AnimationFraction = f64;
