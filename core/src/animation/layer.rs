use crate::animation::{AnimationFraction, AnimationRange, AnimationTimingParameters};

/// The host-side effect of a layer, fed the eased local fraction of the
/// layer's own range every frame.
pub type AnimationAction = Box<dyn FnMut(AnimationFraction)>;

/// One independently timed strand of a transition: an active sub-range of
/// the unit timeline, a pacing, and the property update to apply.
pub struct AnimationLayer {
  pub range: AnimationRange,
  pub timing_parameters: AnimationTimingParameters,
  pub animation: AnimationAction,
}

impl AnimationLayer {
  pub fn new(
    range: AnimationRange, timing_parameters: AnimationTimingParameters,
    animation: impl FnMut(AnimationFraction) + 'static,
  ) -> Self {
    AnimationLayer { range, timing_parameters, animation: Box::new(animation) }
  }

  /// A layer spanning the whole transition.
  pub fn full(
    timing_parameters: AnimationTimingParameters,
    animation: impl FnMut(AnimationFraction) + 'static,
  ) -> Self {
    Self::new(AnimationRange::FULL, timing_parameters, animation)
  }
}

impl std::fmt::Debug for AnimationLayer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AnimationLayer")
      .field("range", &self.range)
      .field("timing_parameters", &self.timing_parameters)
      .finish_non_exhaustive()
  }
}
