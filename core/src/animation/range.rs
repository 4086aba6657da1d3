use crate::animation::AnimationFraction;

/// Where an [`AnimationRange`] lies relative to a given overall fraction of
/// the transition timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationRangePosition {
  /// The fraction falls within the range.
  Contains,
  /// The whole range lies before the fraction.
  IsBefore,
  /// The whole range lies after the fraction.
  IsAfter,
}

impl AnimationRangePosition {
  pub fn reversed(self) -> Self {
    match self {
      AnimationRangePosition::Contains => AnimationRangePosition::Contains,
      AnimationRangePosition::IsBefore => AnimationRangePosition::IsAfter,
      AnimationRangePosition::IsAfter => AnimationRangePosition::IsBefore,
    }
  }

  pub fn reversed_if(self, should_reverse: bool) -> Self {
    if should_reverse { self.reversed() } else { self }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[error("invalid animation range [{start}, {end}]: requires 0 <= start < end <= 1")]
pub struct InvalidRangeError {
  pub start: AnimationFraction,
  pub end: AnimationFraction,
}

/// An immutable `[start, end]` sub-interval of the transition's unit
/// timeline, describing when an animation layer is active relative to the
/// whole transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationRange {
  start: AnimationFraction,
  end: AnimationFraction,
}

impl AnimationRange {
  /// The whole unit timeline.
  pub const FULL: AnimationRange = AnimationRange { start: 0., end: 1. };

  /// Construct a range over `[start, end]`.
  ///
  /// # Panics
  ///
  /// Panics unless `0 <= start < end <= 1`.
  pub fn new(start: AnimationFraction, end: AnimationFraction) -> Self {
    Self::try_new(start, end).unwrap_or_else(|e| panic!("{e}"))
  }

  pub fn try_new(
    start: AnimationFraction, end: AnimationFraction,
  ) -> Result<Self, InvalidRangeError> {
    if 0. <= start && start < end && end <= 1. {
      Ok(AnimationRange { start, end })
    } else {
      Err(InvalidRangeError { start, end })
    }
  }

  pub fn start(&self) -> AnimationFraction { self.start }

  pub fn end(&self) -> AnimationFraction { self.end }

  pub fn length(&self) -> AnimationFraction { self.end - self.start }

  /// The position of the range relative to the given fraction.
  pub fn position(&self, fraction: AnimationFraction) -> AnimationRangePosition {
    if self.end < fraction {
      AnimationRangePosition::IsBefore
    } else if self.start > fraction {
      AnimationRangePosition::IsAfter
    } else {
      AnimationRangePosition::Contains
    }
  }

  pub fn contains(&self, fraction: AnimationFraction) -> bool {
    self.position(fraction) == AnimationRangePosition::Contains
  }

  pub fn is_before(&self, fraction: AnimationFraction) -> bool {
    self.position(fraction) == AnimationRangePosition::IsBefore
  }

  pub fn is_after(&self, fraction: AnimationFraction) -> bool {
    self.position(fraction) == AnimationRangePosition::IsAfter
  }

  /// The gap between the fraction and the nearest edge of the range, or 0 if
  /// the range contains the fraction.
  pub fn distance_to(&self, fraction: AnimationFraction) -> AnimationFraction {
    match self.position(fraction) {
      AnimationRangePosition::IsBefore => fraction - self.end,
      AnimationRangePosition::IsAfter => self.start - fraction,
      AnimationRangePosition::Contains => 0.,
    }
  }

  /// Map the overall fraction linearly onto this range, `start -> 0` and
  /// `end -> 1`. Returns 1 if the range lies entirely before the fraction,
  /// 0 if entirely after.
  pub fn relative_fraction_complete(&self, fraction: AnimationFraction) -> AnimationFraction {
    match self.position(fraction) {
      AnimationRangePosition::IsBefore => 1.,
      AnimationRangePosition::IsAfter => 0.,
      AnimationRangePosition::Contains => (fraction - self.start) / self.length(),
    }
  }
}

impl Default for AnimationRange {
  fn default() -> Self { Self::FULL }
}
