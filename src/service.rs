use crate::{Error, RandomSource, Result};

/// Draws service durations from the exponential-family law `-ln(1 - 2u / rate)`.
///
/// This is deliberately not the textbook inverse-CDF sampler `-ln(1 - u) / rate`. Substituting one for the other
/// changes the simulated distribution, so the formula is kept and guarded instead: whenever `1 - 2u / rate` is not
/// positive, which can happen for any `rate < 2`, [`sample()`] returns [`Error::ServiceDomain`] rather than a NaN or an
/// infinite duration.
///
/// [`sample()`]: ServiceTimeGenerator::sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceTimeGenerator {
    rate: f64,
}

impl ServiceTimeGenerator {
    /// Rates below this value can produce a non-positive logarithm argument.
    pub const SAFE_RATE: f64 = 2.0;

    /// Create a generator for the provided rate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `rate` is not a positive finite number.
    pub fn new(rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "service_rate",
                value: rate,
                reason: "must be a positive finite number",
            });
        }
        if rate < Self::SAFE_RATE {
            log::warn!(
                "service rate {} is below {}; some draws will fail with a domain error",
                rate,
                Self::SAFE_RATE
            );
        }
        Ok(Self { rate })
    }

    /// Draw one service duration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceDomain`] if the draw makes `1 - 2u / rate` non-positive.
    pub fn sample<Source>(&self, source: &mut Source) -> Result<f64>
    where
        Source: RandomSource + ?Sized,
    {
        let draw = source.uniform(0.0, 1.0);
        let argument = 1.0 - draw / self.rate * 2.0;
        if argument <= 0.0 {
            return Err(Error::ServiceDomain {
                rate: self.rate,
                draw,
                argument,
            });
        }
        Ok(-argument.ln())
    }

    /// The service-rate parameter.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}
