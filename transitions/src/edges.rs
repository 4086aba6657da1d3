//! Couples screen edges to navigation operations, so a pan direction can be
//! resolved into "push" or "pop" without hand-written branching per flow.

use euclid::default::Vector2D;
use passage_core::prelude::{
  ModalOperation, NavigationOperation, TabBarOperation, TransitionOperation,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenAxis {
  Horizontal,
  Vertical,
}

/// One of the four edges of the transition container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionScreenEdge {
  Top,
  Right,
  Bottom,
  Left,
}

impl TransitionScreenEdge {
  /// The edge a movement vector points towards; the dominant component
  /// wins.
  pub fn from_vector(vector: Vector2D<f64>) -> Self {
    if vector.x.abs() > vector.y.abs() {
      if vector.x > 0. { TransitionScreenEdge::Right } else { TransitionScreenEdge::Left }
    } else if vector.y > 0. {
      TransitionScreenEdge::Bottom
    } else {
      TransitionScreenEdge::Top
    }
  }

  pub fn axis(&self) -> ScreenAxis {
    match self {
      TransitionScreenEdge::Top | TransitionScreenEdge::Bottom => ScreenAxis::Vertical,
      TransitionScreenEdge::Right | TransitionScreenEdge::Left => ScreenAxis::Horizontal,
    }
  }

  pub fn opposite(&self) -> Self {
    match self {
      TransitionScreenEdge::Top => TransitionScreenEdge::Bottom,
      TransitionScreenEdge::Right => TransitionScreenEdge::Left,
      TransitionScreenEdge::Bottom => TransitionScreenEdge::Top,
      TransitionScreenEdge::Left => TransitionScreenEdge::Right,
    }
  }
}

/// The operation panning towards each screen edge should start.
///
/// Built through the per-flow constructors; mixing navigation, modal and
/// tab-bar operations in one table is not supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionEdges {
  top: TransitionOperation,
  right: TransitionOperation,
  bottom: TransitionOperation,
  left: TransitionOperation,
}

impl TransitionEdges {
  /// Push when panning away from `edge`, pop when panning back towards it.
  pub fn for_navigation_at_edge(edge: TransitionScreenEdge) -> Self {
    let push = TransitionOperation::Navigation(NavigationOperation::Push);
    let pop = TransitionOperation::Navigation(NavigationOperation::Pop);
    Self::at_edge(edge, push, pop)
  }

  /// Present when panning away from `edge`, dismiss when panning back
  /// towards it.
  pub fn for_modal_at_edge(edge: TransitionScreenEdge) -> Self {
    let present = TransitionOperation::Modal(ModalOperation::Present);
    let dismiss = TransitionOperation::Modal(ModalOperation::Dismiss);
    Self::at_edge(edge, present, dismiss)
  }

  /// Increase the selected tab index when panning left, decrease when
  /// panning right (swapped for right-to-left layouts).
  pub fn for_tab_bar(right_to_left: bool) -> Self {
    let increase = TransitionOperation::TabBar(TabBarOperation::Increase);
    let decrease = TransitionOperation::TabBar(TabBarOperation::Decrease);
    let (right, left) = if right_to_left { (increase, decrease) } else { (decrease, increase) };
    Self::new(TransitionOperation::None, right, TransitionOperation::None, left)
  }

  fn at_edge(
    edge: TransitionScreenEdge, away: TransitionOperation, towards: TransitionOperation,
  ) -> Self {
    let none = TransitionOperation::None;
    match edge {
      TransitionScreenEdge::Top => Self::new(towards, none, away, none),
      TransitionScreenEdge::Right => Self::new(none, towards, none, away),
      TransitionScreenEdge::Bottom => Self::new(away, none, towards, none),
      TransitionScreenEdge::Left => Self::new(none, away, none, towards),
    }
  }

  fn new(
    top: TransitionOperation, right: TransitionOperation, bottom: TransitionOperation,
    left: TransitionOperation,
  ) -> Self {
    let edges = TransitionEdges { top, right, bottom, left };
    assert!(
      edges.operations_are_unique(),
      "the same operation cannot be assigned to multiple screen edges"
    );
    edges
  }

  pub fn operation_for(&self, edge: TransitionScreenEdge) -> TransitionOperation {
    match edge {
      TransitionScreenEdge::Top => self.top,
      TransitionScreenEdge::Right => self.right,
      TransitionScreenEdge::Bottom => self.bottom,
      TransitionScreenEdge::Left => self.left,
    }
  }

  /// The edge panning towards which starts `operation`, if any does.
  pub fn screen_edge_for(&self, operation: TransitionOperation) -> Option<TransitionScreenEdge> {
    self
      .all()
      .into_iter()
      .find(|(op, _)| *op == operation && !op.is_none())
      .map(|(_, edge)| edge)
  }

  fn all(&self) -> [(TransitionOperation, TransitionScreenEdge); 4] {
    [
      (self.top, TransitionScreenEdge::Top),
      (self.right, TransitionScreenEdge::Right),
      (self.bottom, TransitionScreenEdge::Bottom),
      (self.left, TransitionScreenEdge::Left),
    ]
  }

  fn operations_are_unique(&self) -> bool {
    let ops: Vec<_> = self.all().into_iter().map(|(op, _)| op).filter(|op| !op.is_none()).collect();
    ops.iter().all(|op| ops.iter().filter(|o| *o == op).count() == 1)
  }
}
