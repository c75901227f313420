/*
Uniform random numbers for velocity seeding.

The world only needs a stream of scalars in [0, 1). `UniformSource` adapts any
`rand::Rng`, so a run can be made reproducible by seeding a `StdRng`.
 */
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// A uniform scalar in [0, 1).
    fn uniform(&mut self) -> f64;
}

#[derive(Clone, Debug)]
pub struct UniformSource<R> {
    rng: R,
}

impl<R: Rng> UniformSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl UniformSource<ThreadRng> {
    pub fn from_thread() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> RandomSource for UniformSource<R> {
    fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }
}
