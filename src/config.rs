//! Run parameters and the configuration that turns them into a ready-to-run [`Simulation`].

use crate::intensity::ensure_bounded;
use crate::{Error, IntensityProfile, Result, RngSource, Simulation};

use rand::SeedableRng;
use rand_pcg::Pcg64;

/// The observation window `[start, close]`.
///
/// Arrivals are only admitted while the candidate instant is at most [`close`]; service continues past it until the
/// system drains.
///
/// [`close`]: Window::close
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub start: f64,
    pub close: f64,
}

impl Window {
    /// Length of the window, `close - start`.
    pub fn length(&self) -> f64 {
        self.close - self.start
    }

    /// Whether `time` is at or before closing.
    pub fn admits(&self, time: f64) -> bool {
        time <= self.close
    }
}

/// Validated engine parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    window: Window,
    max_arrival_rate: f64,
    service_rate: f64,
    client_cap: Option<usize>,
}

impl Parameters {
    /// Validate and bundle the engine's construction parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any value is not finite, if `window_close <= window_start`, or if either
    /// rate is not positive.
    pub fn new(window_start: f64, window_close: f64, max_arrival_rate: f64, service_rate: f64) -> Result<Self> {
        finite("window_start", window_start)?;
        finite("window_close", window_close)?;
        if window_close <= window_start {
            return Err(Error::InvalidParameter {
                name: "window_close",
                value: window_close,
                reason: "must be later than window_start",
            });
        }
        positive("max_arrival_rate", max_arrival_rate)?;
        positive("service_rate", service_rate)?;

        Ok(Self {
            window: Window {
                start: window_start,
                close: window_close,
            },
            max_arrival_rate,
            service_rate,
            client_cap: None,
        })
    }

    /// Stop admitting arrivals once `cap` clients have arrived. The run still drains normally.
    pub fn with_client_cap(mut self, cap: usize) -> Self {
        self.client_cap = Some(cap);
        self
    }

    /// The observation window.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Dominating arrival rate `λ_max` used for thinning.
    pub fn max_arrival_rate(&self) -> f64 {
        self.max_arrival_rate
    }

    /// Service-rate parameter of the service-time formula.
    pub fn service_rate(&self) -> f64 {
        self.service_rate
    }

    /// Arrival limit, if any.
    pub fn client_cap(&self) -> Option<usize> {
        self.client_cap
    }
}

impl Default for Parameters {
    /// The reference working day: open from 7 to 23 with `λ_max = 6` and service rate 10.
    fn default() -> Self {
        Self {
            window: Window {
                start: 7.0,
                close: 23.0,
            },
            max_arrival_rate: 6.0,
            service_rate: 10.0,
            client_cap: None,
        }
    }
}

fn finite(name: &'static str, value: f64) -> Result {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}

fn positive(name: &'static str, value: f64) -> Result {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name,
            value,
            reason: "must be positive",
        })
    }
}

/// Everything needed to launch one replication: parameters, seeding, and the pre-run bound check.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub parameters: Parameters,
    /// Seed for the [`Pcg64`] stream. `None` seeds from the thread-local generator.
    pub seed: Option<u64>,
    /// Check `0 ≤ λ(t)/λ_max ≤ 1` over the window before building the engine.
    pub verify_bound: bool,
    /// Sampling step of that check.
    pub bound_step: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            parameters: Parameters::default(),
            seed: None,
            verify_bound: true,
            bound_step: 0.5,
        }
    }
}

impl RunConfig {
    /// Verify the bound (if enabled), seed a generator, and construct the engine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IntensityBound`] if the dominating rate fails to bound `profile` on the window, or
    /// [`Error::InvalidParameter`] for an invalid step or service rate.
    pub fn build<Profile>(&self, profile: Profile) -> Result<Simulation<Profile, RngSource<Pcg64>>>
    where
        Profile: IntensityProfile,
    {
        let window = self.parameters.window();
        if self.verify_bound {
            ensure_bounded(
                &profile,
                self.parameters.max_arrival_rate(),
                window.start,
                window.close,
                self.bound_step,
            )?;
        }

        let rng = match self.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_rng(&mut rand::rng()),
        };
        Simulation::new(self.parameters, profile, RngSource::new(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConstantRate, DailyProfile};

    #[test]
    fn rejects_inverted_window() {
        let err = Parameters::new(10.0, 10.0, 1.0, 4.0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "window_close", .. }));
    }

    #[test]
    fn rejects_non_positive_rates() {
        assert!(Parameters::new(0.0, 1.0, 0.0, 4.0).is_err());
        assert!(Parameters::new(0.0, 1.0, 1.0, -4.0).is_err());
        assert!(Parameters::new(0.0, f64::INFINITY, 1.0, 4.0).is_err());
    }

    #[test]
    fn default_window_is_reference_day() {
        let parameters = Parameters::default();
        assert_eq!(16.0, parameters.window().length());
        assert!(parameters.window().admits(23.0));
        assert!(!parameters.window().admits(23.000_001));
        assert_eq!(None, parameters.client_cap());
        assert_eq!(Some(6), parameters.with_client_cap(6).client_cap());
    }

    #[test]
    fn build_refuses_unbounded_profile() {
        let config = RunConfig {
            seed: Some(1),
            ..RunConfig::default()
        };
        let err = config.build(ConstantRate(7.0)).unwrap_err();
        assert!(matches!(err, Error::IntensityBound { .. }));
    }

    #[test]
    fn build_skips_check_when_disabled() {
        let config = RunConfig {
            seed: Some(1),
            verify_bound: false,
            ..RunConfig::default()
        };
        assert!(config.build(ConstantRate(7.0)).is_ok());
    }

    #[test]
    fn build_rejects_unusably_fine_bound_step() {
        let config = RunConfig {
            seed: Some(1),
            bound_step: 1e-9,
            ..RunConfig::default()
        };
        let err = config.build(DailyProfile).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "step", .. }));
    }

    #[test]
    fn seeded_builds_are_reproducible() {
        let config = RunConfig {
            seed: Some(99),
            ..RunConfig::default()
        };
        let mut first = config.build(DailyProfile).unwrap();
        let mut second = config.build(DailyProfile).unwrap();
        first.run().unwrap();
        second.run().unwrap();
        assert_eq!(first.events(), second.events());
        assert_eq!(first.summary(), second.summary());
    }
}
