//! Time-varying arrival rates and checks that a dominating rate really dominates them.

use crate::{Error, Result};

/// Maps a simulated time to the instantaneous arrival rate `λ(t) ≥ 0`.
///
/// Implementations should be pure: the thinning algorithm may evaluate the profile at any candidate time, in any
/// order, and expects the same answer each time. A blanket implementation is provided for `Fn(f64) -> f64`, so a
/// closure can serve as a profile directly.
pub trait IntensityProfile {
    /// Arrival rate at time `t`.
    fn rate(&self, t: f64) -> f64;
}

impl<F> IntensityProfile for F
where
    F: Fn(f64) -> f64,
{
    fn rate(&self, t: f64) -> f64 {
        self(t)
    }
}

/// A homogeneous profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantRate(pub f64);

impl IntensityProfile for ConstantRate {
    fn rate(&self, _: f64) -> f64 {
        self.0
    }
}

/// The reference piecewise profile of a working day, in hours.
///
/// | interval   | λ(t)                   |
/// |------------|------------------------|
/// | `[7, 9)`   | `1.4t - 9.2`           |
/// | `[9, 11)`  | `-0.23t + 4.3`         |
/// | `[11, 13)` | `-0.2t + 4.4`          |
/// | `[13, 15)` | `-0.8(t - 14)² + 5.8`  |
/// | `[15, 17)` | `-0.2t + 6.1`          |
/// | `[17, 19)` | `0.6t - 9.0`           |
/// | `[19, 21)` | `-1.5(t - 20)² + 5.5`  |
/// | `[21, 23)` | `-0.8t + 19.65`        |
/// | otherwise  | `0.01`                 |
///
/// The peak is `5.8` at `t = 14`, so any dominating rate of at least that value is valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyProfile;

impl DailyProfile {
    /// Rate outside the tabulated hours.
    pub const OFF_HOURS_RATE: f64 = 0.01;
}

impl IntensityProfile for DailyProfile {
    fn rate(&self, t: f64) -> f64 {
        if (7.0..9.0).contains(&t) {
            1.4 * t - 9.2
        } else if (9.0..11.0).contains(&t) {
            -0.23 * t + 4.3
        } else if (11.0..13.0).contains(&t) {
            -0.2 * t + 4.4
        } else if (13.0..15.0).contains(&t) {
            -0.8 * (t - 14.0) * (t - 14.0) + 5.8
        } else if (15.0..17.0).contains(&t) {
            -0.2 * t + 6.1
        } else if (17.0..19.0).contains(&t) {
            0.6 * t - 9.0
        } else if (19.0..21.0).contains(&t) {
            -1.5 * (t - 20.0) * (t - 20.0) + 5.5
        } else if (21.0..23.0).contains(&t) {
            -0.8 * t + 19.65
        } else {
            Self::OFF_HOURS_RATE
        }
    }
}

/// Upper limit on the number of profile evaluations a single [`verify_bound`] call will make.
pub const MAX_BOUND_SAMPLES: u32 = 10_000_000;

/// A sampled time at which `λ(t) / λ_max` left `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundViolation {
    pub time: f64,
    pub ratio: f64,
}

/// Sample the profile every `step` from `start` through `close` (inclusive) and collect every time at which
/// `rate(t) / max_rate` falls outside `[0, 1]`.
///
/// The thinning algorithm silently produces the wrong process when the dominating rate does not dominate, and may spin
/// for a very long time when the ratio stays near zero. This check is how a caller learns about that before a run.
/// Violations are only reported; nothing is clamped.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `max_rate` or `step` is not a positive finite number, if the interval
/// bounds are not finite, or if `step` is so small that the interval would take more than [`MAX_BOUND_SAMPLES`]
/// samples.
pub fn verify_bound<P>(profile: &P, max_rate: f64, start: f64, close: f64, step: f64) -> Result<Vec<BoundViolation>>
where
    P: IntensityProfile + ?Sized,
{
    positive("max_rate", max_rate)?;
    positive("step", step)?;
    if !start.is_finite() || !close.is_finite() {
        return Err(Error::InvalidParameter {
            name: "window",
            value: if start.is_finite() { close } else { start },
            reason: "bounds must be finite",
        });
    }

    let samples = ((close - start) / step).floor();
    if samples >= f64::from(MAX_BOUND_SAMPLES) {
        return Err(Error::InvalidParameter {
            name: "step",
            value: step,
            reason: "too small for the interval",
        });
    }

    let mut violations = Vec::new();
    let mut sample = 0_u32;
    while sample <= MAX_BOUND_SAMPLES {
        let time = start + f64::from(sample) * step;
        if time > close {
            break;
        }
        let ratio = profile.rate(time) / max_rate;
        if !(0.0..=1.0).contains(&ratio) {
            violations.push(BoundViolation { time, ratio });
        }
        sample += 1;
    }
    Ok(violations)
}

/// Like [`verify_bound`], but logs every violation and fails on the first one.
///
/// # Errors
///
/// Returns [`Error::IntensityBound`] describing the earliest violation, or any error from [`verify_bound`].
pub fn ensure_bounded<P>(profile: &P, max_rate: f64, start: f64, close: f64, step: f64) -> Result
where
    P: IntensityProfile + ?Sized,
{
    let violations = verify_bound(profile, max_rate, start, close, step)?;
    for violation in &violations {
        log::warn!(
            "λ(t)/λ_max = {:.3} at t = {:.2} is outside [0, 1]",
            violation.ratio,
            violation.time
        );
    }
    match violations.first() {
        Some(first) => Err(Error::IntensityBound {
            time: first.time,
            ratio: first.ratio,
        }),
        None => {
            log::debug!("λ(t)/λ_max stays within [0, 1] on [{}, {}]", start, close);
            Ok(())
        },
    }
}

fn positive(name: &'static str, value: f64) -> Result {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name,
            value,
            reason: "must be a positive finite number",
        })
    }
}
