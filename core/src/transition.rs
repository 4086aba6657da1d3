//! The user-facing description of a transition: a nominal duration, the
//! layered animation, and an optional shared element.

use std::time::Duration;

use crate::{
  animation::{AnimatingPosition, AnimationLayer},
  operation::TransitionOperationContext,
  shared_element::SharedElementTransition,
};

/// The layered animation of a transition.
///
/// `layers` is consumed exactly once per run; the driver takes ownership of
/// the layer actions and plays each one over its own sub-range of the
/// timeline.
pub trait TransitionAnimation {
  /// Prepare the scene before any layer plays, e.g. insert the arriving
  /// view and put animated properties at their starting values.
  fn setup(&mut self, operation_context: &mut TransitionOperationContext);

  fn layers(&mut self) -> Vec<AnimationLayer>;

  /// The whole transition settled. `End` means the operation completed,
  /// `Start` that it rewound; clean up either way.
  fn completion(&mut self, position: AnimatingPosition);
}

pub struct Transition {
  pub duration: Duration,
  pub animation: Box<dyn TransitionAnimation>,
  pub shared_element: Option<Box<dyn SharedElementTransition>>,
}

impl Transition {
  pub fn new(duration: Duration, animation: impl TransitionAnimation + 'static) -> Self {
    Transition { duration, animation: Box::new(animation), shared_element: None }
  }

  pub fn with_shared_element(
    mut self, shared_element: impl SharedElementTransition + 'static,
  ) -> Self {
    self.shared_element = Some(Box::new(shared_element));
    self
  }

  /// The duration the transition actually plays for, given its layers.
  ///
  /// A layer timed by a raw-constants spring ignores the nominal duration:
  /// it starts at `duration * range.start` and then rings for its settling
  /// time, so it can stretch the transition. A raw-spring shared element
  /// then has the last word: its settling time is the effective duration
  /// outright, shorter or longer than what the layers need.
  pub fn effective_duration(&self, layers: &[AnimationLayer]) -> Duration {
    let mut layers_duration = self.duration;
    for layer in layers {
      if layer.timing_parameters.has_implicit_duration() {
        let extended = self.duration.mul_f64(layer.range.start())
          + layer.timing_parameters.resolved_duration(self.duration);
        layers_duration = layers_duration.max(extended);
      }
    }
    match &self.shared_element {
      Some(element) if element.timing_parameters().has_implicit_duration() => {
        element.timing_parameters().resolved_duration(layers_duration)
      }
      _ => layers_duration,
    }
  }
}
