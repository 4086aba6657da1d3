//! Ready-made building blocks on top of `passage_core`: a pan-gesture
//! interaction controller, screen-edge operation tables, and a few stock
//! transition animations (dissolve, edge slide, reveal) expressed over
//! host-provided property sinks.

pub mod dissolve;
pub mod edge_slide;
pub mod edges;
pub mod pan;
pub mod reveal;
#[cfg(test)]
pub(crate) mod test_support;

pub mod prelude {
  pub use passage_core::prelude::*;

  pub use crate::{
    dissolve::DissolveTransitionAnimation,
    edge_slide::{EdgeSlideTransitionAnimation, EdgeTransitionAnimation},
    edges::{ScreenAxis, TransitionEdges, TransitionScreenEdge},
    pan::PanInteractionController,
    reveal::RevealTransitionAnimation,
  };
}
