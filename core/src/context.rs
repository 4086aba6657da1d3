//! The host-side contract: everything the engine needs to know about the
//! views involved in a transition, and the callbacks it uses to report
//! interactive progress back to the navigation construct.

use euclid::default::Rect;

use crate::animation::AnimationFraction;

/// Opaque host handle to a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

/// Opaque host handle to a screen controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControllerId(pub u64);

/// Where the host should recognize a gesture that interrupts a running
/// transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterruptionGestureTarget {
  /// On the view of the shared element in flight.
  SharedElementView(ViewId),
  /// Anywhere on the transition container.
  Container,
}

/// The host's view of a single transition run.
///
/// Implemented by the embedding UI framework. The engine only ever reads
/// geometry and identity through this trait and reports progress through
/// the `*_interactive_transition` callbacks, so it stays independent of any
/// concrete view hierarchy.
pub trait TransitionContext {
  /// The view both screens are composed into for the duration of the
  /// transition.
  fn container_view(&self) -> ViewId;

  fn from_view(&self) -> Option<ViewId>;

  fn to_view(&self) -> Option<ViewId>;

  fn from_controller(&self) -> Option<ControllerId> { None }

  fn to_controller(&self) -> Option<ControllerId> { None }

  /// Whether this run was started by a gesture rather than programmatically.
  fn is_interactive(&self) -> bool;

  fn container_bounds(&self) -> Rect<f64>;

  /// The frame a view ends up in when the transition completes.
  fn final_frame(&self, view: ViewId) -> Option<Rect<f64>>;

  fn update_interactive_transition(&mut self, fraction: AnimationFraction);

  fn finish_interactive_transition(&mut self);

  fn cancel_interactive_transition(&mut self);

  fn pause_interactive_transition(&mut self);

  /// Tell the host the transition is over. `completed` is false when it
  /// rewound to its starting state.
  fn complete_transition(&mut self, completed: bool);

  /// Ask the host to recognize interruption gestures on the given target
  /// while animating. Hosts without interruption support keep the no-op.
  fn install_interruption_gesture(&mut self, target: InterruptionGestureTarget) {
    let _ = target;
  }

  fn remove_interruption_gesture(&mut self) {}
}
