use crate::{IntensityProfile, RandomSource};

/// Generates arrival instants of a nonhomogeneous Poisson process by thinning a homogeneous one.
///
/// Candidates are produced at the dominating rate `λ_max` and each one is kept with probability `λ(t) / λ_max`. The
/// construction is only faithful when `λ(t) ≤ λ_max` everywhere the process is sampled, which this type does not check;
/// see [`verify_bound()`] for the pre-run check.
///
/// There is no cap on the number of rejected candidates. A profile that stays at or near zero for a long stretch will
/// make [`next_arrival()`] run for a correspondingly long time.
///
/// [`verify_bound()`]: crate::intensity::verify_bound
/// [`next_arrival()`]: ArrivalProcess::next_arrival
#[derive(Debug, Clone)]
pub struct ArrivalProcess<Profile> {
    profile: Profile,
    max_rate: f64,
}

impl<Profile> ArrivalProcess<Profile>
where
    Profile: IntensityProfile,
{
    /// Create a generator for `profile` dominated by `max_rate`. The caller guarantees `max_rate > 0`.
    pub fn new(profile: Profile, max_rate: f64) -> Self {
        Self { profile, max_rate }
    }

    /// Draw the next arrival instant strictly after `current_time`.
    ///
    /// Follows this loop, starting from `t = current_time`:
    ///
    /// 1. Draw `u1` and advance `t` by the exponential step `-ln(u1) / λ_max`.
    /// 2. Draw `u2`. If `u2 ≤ λ(t) / λ_max` and `t` moved past `current_time`, return `t`.
    /// 3. Otherwise go back to step 1 from the new `t`.
    ///
    /// A draw of `u1 = 0` yields an infinite step; the process then has no further arrival and `f64::INFINITY` is
    /// returned.
    pub fn next_arrival<Source>(&self, current_time: f64, source: &mut Source) -> f64
    where
        Source: RandomSource + ?Sized,
    {
        let mut t = current_time;
        loop {
            let u1 = source.uniform(0.0, 1.0);
            t -= u1.ln() / self.max_rate;
            if t == f64::INFINITY {
                return t;
            }

            let u2 = source.uniform(0.0, 1.0);
            if t > current_time && u2 <= self.profile.rate(t) / self.max_rate {
                return t;
            }
        }
    }

    /// Get a shared reference to the intensity profile.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// The dominating rate candidates are drawn at.
    pub fn max_rate(&self) -> f64 {
        self.max_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConstantRate, ConstantSource, RngSource, SequenceSource};
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn accepted_candidate_is_returned() {
        let process = ArrivalProcess::new(ConstantRate(0.5), 1.0);
        let next = process.next_arrival(3.0, &mut ConstantSource(0.5));
        assert_abs_diff_eq!(3.0 + std::f64::consts::LN_2, next, epsilon = 1e-12);
    }

    #[test]
    fn rejected_candidates_keep_advancing() {
        // ratio is 0.25: candidate 1 rejected (0.9), candidate 2 accepted (0.1)
        let mut source = SequenceSource::new(vec![0.5, 0.9, 0.25, 0.1]);
        let process = ArrivalProcess::new(ConstantRate(0.5), 2.0);
        let next = process.next_arrival(0.0, &mut source);

        let expected = -(0.5_f64.ln()) / 2.0 - (0.25_f64.ln()) / 2.0;
        assert_abs_diff_eq!(expected, next, epsilon = 1e-12);
        assert_eq!(4, source.consumed());
    }

    #[test]
    fn profile_is_evaluated_at_the_candidate() {
        // rate is zero before t = 1, so the first candidate at ln 2 / 1 ≈ 0.69 is always rejected
        let profile = |t: f64| if t < 1.0 { 0.0 } else { 1.0 };
        let process = ArrivalProcess::new(profile, 1.0);
        let next = process.next_arrival(0.0, &mut ConstantSource(0.5));
        assert_abs_diff_eq!(2.0 * std::f64::consts::LN_2, next, epsilon = 1e-12);
    }

    #[test]
    fn zero_draw_means_no_further_arrival() {
        let process = ArrivalProcess::new(ConstantRate(1.0), 1.0);
        let next = process.next_arrival(5.0, &mut ConstantSource(0.0));
        assert_eq!(f64::INFINITY, next);
    }

    #[test]
    fn arrivals_strictly_increase() {
        let process = ArrivalProcess::new(crate::DailyProfile, 6.0);
        let mut source = RngSource::new(Pcg64::seed_from_u64(42));
        let mut t = 7.0;
        for _ in 0..1_000 {
            let next = process.next_arrival(t, &mut source);
            assert!(next > t, "{} does not follow {}", next, t);
            t = next;
        }
    }
}
