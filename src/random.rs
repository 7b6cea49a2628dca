use rand::Rng;

/// The source of uniform random numbers consumed by a simulation.
///
/// Every random quantity in queuesim, from thinning candidates to service durations, is derived from calls to
/// [`uniform()`]. Injecting the source rather than reaching for a global generator keeps a run fully determined by the
/// stream it is handed: two simulations built from identical parameters and identical streams produce identical event
/// logs and statistics.
///
/// Implementations are provided for any [`rand::Rng`] through [`RngSource`], for scripted streams through
/// [`SequenceSource`] and [`ConstantSource`], and for exclusive references to another source.
///
/// [`uniform()`]: RandomSource::uniform
pub trait RandomSource {
    /// Draw a value uniformly distributed in the half-open interval `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

impl<S> RandomSource for &mut S
where
    S: RandomSource + ?Sized,
{
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }
}

/// Scale a unit draw in `[0, 1)` onto `[low, high)`.
fn scale(unit: f64, low: f64, high: f64) -> f64 {
    unit * (high - low) + low
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R> RngSource<R>
where
    R: Rng,
{
    /// Wrap the provided generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Get an exclusive reference to the wrapped generator.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Unwrap the generator, e.g. to continue its stream in another replication.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R> RandomSource for RngSource<R>
where
    R: Rng,
{
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        scale(self.rng.random::<f64>(), low, high)
    }
}

/// Replays a fixed, finite sequence of unit draws, starting over once the sequence is exhausted.
///
/// Each stored value is interpreted as a draw in `[0, 1)` and scaled onto the requested interval. Useful for pinning
/// down exactly which candidates the thinning loop sees and which service durations are drawn.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    draws: Vec<f64>,
    position: usize,
}

impl SequenceSource {
    /// Create a source that replays `draws` in order. An empty sequence behaves like a constant `0.0`.
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, position: 0 }
    }

    /// Number of draws handed out so far, counting repeats.
    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl RandomSource for SequenceSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        let unit = if self.draws.is_empty() {
            0.0
        } else {
            self.draws[self.position % self.draws.len()]
        };
        self.position += 1;
        scale(unit, low, high)
    }
}

/// Returns the same unit draw on every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSource(pub f64);

impl RandomSource for ConstantSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        scale(self.0, low, high)
    }
}
