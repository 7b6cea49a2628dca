/// Errors that may be encountered while configuring or
/// executing a simulation.
///
/// The [`ServiceDomain`] variant originates from the
/// [`ServiceTimeGenerator`] when the logarithm argument of
/// its sampling formula is not positive. It is a
/// configuration error: the service rate is too small
/// for the formula, and retrying the draw would only hide
/// that.
///
/// The [`InvalidParameter`] and [`IntensityBound`] variants
/// are raised before a run starts, either by parameter
/// validation or by checking that the dominating arrival
/// rate really bounds the intensity profile.
///
/// [`ServiceTimeGenerator`]: crate::ServiceTimeGenerator
/// [`ServiceDomain`]: Error::ServiceDomain
/// [`InvalidParameter`]: Error::InvalidParameter
/// [`IntensityBound`]: Error::IntensityBound
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The service-time formula `-ln(1 - 2u/rate)` was asked
    /// to take the logarithm of a non-positive value.
    #[error("service time undefined for rate {rate} and draw {draw}: log argument {argument} is not positive")]
    ServiceDomain {
        /// Configured service rate.
        rate: f64,
        /// Unit draw that triggered the failure.
        draw: f64,
        /// The offending value `1 - 2 * draw / rate`.
        argument: f64,
    },
    /// A construction parameter is outside its valid range.
    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// Rejected value.
        value: f64,
        /// What the value should have satisfied.
        reason: &'static str,
    },
    /// The intensity profile escapes `[0, max_rate]` at some sampled time,
    /// so thinning would not reproduce it.
    #[error("intensity ratio {ratio:.3} at t = {time:.2} is outside [0, 1]")]
    IntensityBound {
        /// Time at which the ratio was sampled.
        time: f64,
        /// `rate(time) / max_rate`.
        ratio: f64,
    },
    /// The engine's waiting line disagrees with its counters.
    #[error("engine state out of sync at t = {time}: {detail}")]
    Desync {
        /// Simulated time of the failing event.
        time: f64,
        /// Which bookkeeping rule was broken.
        detail: &'static str,
    },
}

/// [`std::result::Result`]`<T, `[`queuesim::Error`]`>`, with `T` defaulting to `()`.
///
/// A type alias that simplifies the signatures of
/// various functions in queuesim.
///
/// [`queuesim::Error`]: Error
pub type Result<T = ()> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_offending_values() {
        let err = Error::InvalidParameter {
            name: "max_arrival_rate",
            value: -1.0,
            reason: "must be positive",
        };
        assert_eq!("invalid max_arrival_rate = -1: must be positive", err.to_string());

        let err = Error::IntensityBound { time: 14.0, ratio: 1.16 };
        assert_eq!("intensity ratio 1.160 at t = 14.00 is outside [0, 1]", err.to_string());
    }
}
