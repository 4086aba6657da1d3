//! An engine for custom, interruptible, gesture-driven transitions between
//! two visual states ("screens") hosted by a navigation construct.
//!
//! The engine coordinates one or more independently timed animation layers
//! and an optional shared element that moves between the two screens. It
//! owns timing, interactive scrubbing, interruption and resumption, and a
//! single aggregate completion across all concurrently running animators.
//! Everything visual (view hierarchies, snapshotting, input recognition)
//! stays on the host side behind the contracts in [`context`],
//! [`interaction`] and [`shared_element`].

pub mod animation;
pub mod context;
pub mod controller;
pub mod driver;
pub mod interaction;
pub mod operation;
pub mod phase;
pub mod shared_element;
pub mod source;
pub mod transition;

pub mod prelude {
  pub use crate::{
    animation::{
      AnimatingPosition, AnimationCurve, AnimationFraction, AnimationLayer, AnimationRange,
      AnimationRangePosition, AnimationTimingParameters, AnimatorState, CubicBezierEasing, Easing,
      PropertyAnimator, SpringTimingParameters, easing,
    },
    context::{ControllerId, InterruptionGestureTarget, TransitionContext, ViewId},
    controller::TransitionController,
    driver::TransitionDriver,
    interaction::{
      GesturePhase, InteractionControllerRef, SharedElementProvider,
      TransitionInteractionController, TransitionProgress,
    },
    operation::{
      ModalOperation, NavigationOperation, TabBarOperation, TransitionOperation,
      TransitionOperationContext,
    },
    phase::{PhaseObservers, TransitionPhaseDelegate},
    shared_element::{
      FrameSharedElement, SharedElement, SharedElementAnimation, SharedElementInteraction,
      SharedElementTransition,
    },
    source::{InteractiveTransitionOperationDelegate, TransitionsSource},
    transition::{Transition, TransitionAnimation},
  };
}
