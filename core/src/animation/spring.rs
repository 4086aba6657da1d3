use std::time::Duration;

use crate::animation::{AnimationFraction, Easing};

/// The spring is considered settled once its oscillation envelope has
/// decayed to within this fraction of the equilibrium displacement.
const SETTLING_THRESHOLD: f64 = 1e-3;

/// Physical constants of a damped harmonic oscillator driving a unit
/// progress value from 0 to 1.
///
/// The settling time of such a spring is derived from the constants rather
/// than assigned, which is what gives spring-timed layers their "implicit
/// duration" (see
/// [`AnimationTimingParameters`](crate::animation::AnimationTimingParameters)).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringTimingParameters {
  pub mass: f64,
  pub stiffness: f64,
  pub damping: f64,
  /// Initial velocity of the progress value, in units per second.
  pub initial_velocity: f64,
}

impl SpringTimingParameters {
  /// # Panics
  ///
  /// Panics unless `mass`, `stiffness` and `damping` are all positive: a
  /// frictionless spring never settles.
  pub fn new(mass: f64, stiffness: f64, damping: f64, initial_velocity: f64) -> Self {
    assert!(mass > 0. && stiffness > 0., "spring mass and stiffness must be positive");
    assert!(damping > 0., "an undamped spring oscillates forever");
    SpringTimingParameters { mass, stiffness, damping, initial_velocity }
  }

  /// A spring described by its damping ratio alone, normalized so that it
  /// settles in exactly one second. Scaled over a nominal duration by the
  /// animator, this yields a spring feel without an implicit duration.
  pub fn from_damping_ratio(ratio: f64, initial_velocity: f64) -> Self {
    assert!(ratio > 0., "damping ratio must be positive");
    // Pick omega_0 so the envelope decays to the settling threshold at t=1.
    let omega_0 = (1. / SETTLING_THRESHOLD).ln() / ratio.min(1.);
    let mass = 1.;
    let stiffness = omega_0 * omega_0 * mass;
    let damping = 2. * ratio * omega_0 * mass;
    SpringTimingParameters { mass, stiffness, damping, initial_velocity }
  }

  /// Natural (undamped) angular frequency, `sqrt(k / m)`.
  fn omega_0(&self) -> f64 { (self.stiffness / self.mass).sqrt() }

  /// Damping ratio `zeta`; 1 is critically damped.
  pub fn damping_ratio(&self) -> f64 { self.damping / (2. * (self.stiffness * self.mass).sqrt()) }

  /// The time for the spring to decay to within the settling threshold of
  /// equilibrium, derived from the slowest-decaying exponential envelope.
  pub fn settling_duration(&self) -> Duration {
    let zeta = self.damping_ratio();
    let omega_0 = self.omega_0();
    // For zeta <= 1 the envelope decays at zeta * omega_0; overdamped
    // springs decay at the slower of their two real rates.
    let decay = if zeta <= 1. {
      zeta * omega_0
    } else {
      omega_0 * (zeta - (zeta * zeta - 1.).sqrt())
    };
    Duration::from_secs_f64((1. / SETTLING_THRESHOLD).ln() / decay)
  }

  /// The progress value at `t` seconds, solving
  /// `x'' + 2*zeta*omega_0*x' + omega_0^2*x = omega_0^2` with `x(0) = 0`
  /// and `x'(0) = initial_velocity`. Underdamped springs overshoot 1.
  pub fn value_at(&self, t: f64) -> f64 {
    let zeta = self.damping_ratio();
    let omega_0 = self.omega_0();
    let v0 = self.initial_velocity;
    // Solve for the displacement y = x - 1, y(0) = -1, y'(0) = v0.
    let y = if zeta < 1. {
      let omega_d = omega_0 * (1. - zeta * zeta).sqrt();
      let a = -1.;
      let b = (v0 + zeta * omega_0 * a) / omega_d;
      (-zeta * omega_0 * t).exp() * (a * (omega_d * t).cos() + b * (omega_d * t).sin())
    } else if (zeta - 1.).abs() < 1e-9 {
      let a = -1.;
      let b = v0 + omega_0 * a;
      (a + b * t) * (-omega_0 * t).exp()
    } else {
      let root = (zeta * zeta - 1.).sqrt();
      let r1 = -omega_0 * (zeta - root);
      let r2 = -omega_0 * (zeta + root);
      let c1 = (v0 + r2) / (r1 - r2);
      let c2 = -1. - c1;
      c1 * (r1 * t).exp() + c2 * (r2 * t).exp()
    };
    1. + y
  }
}

/// As an easing curve, a spring maps unit time over its own settling
/// duration, so a timeline that spans the settling time plays the full
/// decay.
impl Easing for SpringTimingParameters {
  fn easing(&self, time_rate: AnimationFraction) -> AnimationFraction {
    if time_rate >= 1. {
      return 1.;
    }
    self.value_at(time_rate.max(0.) * self.settling_duration().as_secs_f64())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_at_zero_settles_at_one() {
    let spring = SpringTimingParameters::new(1., 100., 10., 0.);
    assert!(spring.value_at(0.).abs() < 1e-9);
    let settle = spring.settling_duration().as_secs_f64();
    assert!((spring.value_at(settle) - 1.).abs() < SETTLING_THRESHOLD * 2.);
  }

  #[test]
  fn settling_duration_is_finite_and_positive() {
    for (m, k, c) in [(1., 100., 10.), (2., 50., 30.), (1., 300., 2.), (0.5, 80., 40.)] {
      let spring = SpringTimingParameters::new(m, k, c, 0.);
      let settle = spring.settling_duration();
      assert!(settle > Duration::ZERO);
      assert!(settle < Duration::from_secs(600));
    }
  }

  #[test]
  fn underdamped_overshoots_critically_damped_does_not() {
    let bouncy = SpringTimingParameters::new(1., 400., 8., 0.);
    assert!(bouncy.damping_ratio() < 1.);
    let max = (0..1000)
      .map(|i| bouncy.value_at(i as f64 * 0.01))
      .fold(f64::NAN, f64::max);
    assert!(max > 1.);

    let smooth = SpringTimingParameters::new(1., 100., 20., 0.);
    assert!((smooth.damping_ratio() - 1.).abs() < 1e-9);
    for i in 0..1000 {
      assert!(smooth.value_at(i as f64 * 0.01) <= 1. + 1e-9);
    }
  }

  #[test]
  fn damping_ratio_form_settles_in_unit_time() {
    let spring = SpringTimingParameters::from_damping_ratio(1., 0.);
    let settle = spring.settling_duration().as_secs_f64();
    assert!((settle - 1.).abs() < 1e-6);
  }

  #[test]
  #[should_panic]
  fn undamped_spring_rejected() { SpringTimingParameters::new(1., 100., 0., 0.); }
}
