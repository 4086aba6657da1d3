//! A pan-gesture interaction controller: maps a host-fed pan state
//! (translation and velocity in the transition container) onto transition
//! progress and a release verdict.

use euclid::default::Vector2D;
use passage_core::prelude::{
  AnimatingPosition, AnimationFraction, SharedElementProvider, TransitionInteractionController,
  TransitionOperation, TransitionOperationContext, TransitionProgress,
};

use crate::edges::{ScreenAxis, TransitionEdges, TransitionScreenEdge};

/// Drives transitions from a one-finger pan.
///
/// The embedding recognizes the gesture and feeds its state in through
/// [`pan_changed`](PanInteractionController::pan_changed); everything else
/// (which operation a fresh pan starts, how far along the transition is,
/// whether release finishes or rewinds) is derived here from the
/// edge-operation table.
pub struct PanInteractionController {
  edges: TransitionEdges,
  /// Report progress as relative steps instead of an overall fraction.
  pub update_progress_as_step: bool,
  /// The fraction below which releasing rewinds the transition.
  pub completion_threshold: AnimationFraction,
  /// Let a fast release towards either end overrule the threshold.
  pub allow_flick: bool,
  /// The minimum pan speed, in points per second, that counts as a flick.
  pub minimum_flick_velocity: f64,
  pan_distance_multiplier: f64,
  translation: Vector2D<f64>,
  velocity: Vector2D<f64>,
  fraction_complete_at_start: AnimationFraction,
  shared_element_provider: Option<Box<dyn SharedElementProvider>>,
}

impl PanInteractionController {
  pub fn new(edges: TransitionEdges) -> Self {
    PanInteractionController {
      edges,
      update_progress_as_step: false,
      completion_threshold: 1. / 3.,
      allow_flick: true,
      minimum_flick_velocity: 1200.,
      pan_distance_multiplier: 1.,
      translation: Vector2D::zero(),
      velocity: Vector2D::zero(),
      fraction_complete_at_start: 0.,
      shared_element_provider: None,
    }
  }

  /// Push when panning away from `edge`, pop when panning towards it.
  pub fn for_navigation_at_edge(edge: TransitionScreenEdge) -> Self {
    Self::new(TransitionEdges::for_navigation_at_edge(edge))
  }

  /// Present when panning away from `edge`, dismiss when panning towards
  /// it.
  pub fn for_modal_at_edge(edge: TransitionScreenEdge) -> Self {
    Self::new(TransitionEdges::for_modal_at_edge(edge))
  }

  pub fn for_tab_bar(right_to_left: bool) -> Self {
    Self::new(TransitionEdges::for_tab_bar(right_to_left))
  }

  pub fn edges(&self) -> &TransitionEdges { &self.edges }

  /// Scale the pan distance needed for a full transition: `0.5` completes
  /// after panning half the container axis.
  ///
  /// # Panics
  ///
  /// Panics unless the multiplier is positive.
  pub fn set_pan_distance_multiplier(&mut self, multiplier: f64) {
    assert!(multiplier > 0., "the pan distance multiplier must be higher than zero");
    self.pan_distance_multiplier = multiplier;
  }

  pub fn set_shared_element_provider(&mut self, provider: Box<dyn SharedElementProvider>) {
    self.shared_element_provider = Some(provider);
  }

  /// Feed the current pan state, in container coordinates.
  pub fn pan_changed(&mut self, translation: Vector2D<f64>, velocity: Vector2D<f64>) {
    self.translation = translation;
    self.velocity = velocity;
  }
}

impl TransitionInteractionController for PanInteractionController {
  fn shared_element_provider(&mut self) -> Option<&mut dyn SharedElementProvider> {
    self.shared_element_provider.as_deref_mut().map(|p| p as &mut dyn SharedElementProvider)
  }

  fn operation_for_interactive_transition(&self) -> TransitionOperation {
    let edge = TransitionScreenEdge::from_vector(self.translation);
    self.edges.operation_for(edge)
  }

  fn completion_position(
    &self, operation_context: &TransitionOperationContext, fraction_complete: AnimationFraction,
  ) -> AnimatingPosition {
    if self.allow_flick && self.velocity.length() >= self.minimum_flick_velocity {
      let flick_edge = TransitionScreenEdge::from_vector(self.velocity);
      if let Some(screen_edge) = self.edges.screen_edge_for(operation_context.operation()) {
        if flick_edge.axis() == screen_edge.axis() {
          // A flick along the transition axis overrules the threshold:
          // towards the operation's edge completes, away from it rewinds.
          return if flick_edge == screen_edge {
            AnimatingPosition::End
          } else {
            AnimatingPosition::Start
          };
        }
      }
    }
    if fraction_complete > self.completion_threshold {
      AnimatingPosition::End
    } else {
      AnimatingPosition::Start
    }
  }

  fn progress(&mut self, operation_context: &TransitionOperationContext) -> TransitionProgress {
    let Some(screen_edge) = self.edges.screen_edge_for(operation_context.operation()) else {
      return if self.update_progress_as_step {
        TransitionProgress::Step(0.)
      } else {
        TransitionProgress::FractionComplete(self.fraction_complete_at_start)
      };
    };

    let bounds = operation_context.context.container_bounds();
    let horizontal = screen_edge.axis() == ScreenAxis::Horizontal;
    let axis_size =
      (if horizontal { bounds.width() } else { bounds.height() }) * self.pan_distance_multiplier;
    let translation_over_axis = if horizontal { self.translation.x } else { self.translation.y };
    let directional_factor = match screen_edge {
      TransitionScreenEdge::Left | TransitionScreenEdge::Top => -1.,
      _ => 1.,
    };

    let progress = directional_factor * translation_over_axis / axis_size;
    if self.update_progress_as_step {
      TransitionProgress::Step(progress)
    } else {
      TransitionProgress::FractionComplete(self.fraction_complete_at_start + progress)
    }
  }

  fn reset_progress_if_needed(&mut self, _: &TransitionOperationContext) {
    if self.update_progress_as_step {
      self.translation = Vector2D::zero();
    }
  }

  fn interaction_started(
    &mut self, _: &TransitionOperationContext, fraction_complete: AnimationFraction,
  ) {
    self.fraction_complete_at_start = fraction_complete;
  }
}
