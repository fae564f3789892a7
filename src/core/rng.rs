use rand::SeedableRng;

pub struct Rng {
    rng: rand::rngs::SmallRng,
}

impl Rng {
    pub fn new() -> Self {
        Self {
            rng: rand::rngs::SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: rand::rngs::SmallRng::seed_from_u64(seed),
        }
    }

    pub fn uniform_1d(&mut self) -> f32 {
        rand::Rng::gen(&mut self.rng)
    }

    pub fn uniform_2d(&mut self) -> (f32, f32) {
        (self.uniform_1d(), self.uniform_1d())
    }

    /// Uniform index in `[0, n)`. `n` must be positive.
    pub fn uniform_index(&mut self, n: usize) -> usize {
        rand::Rng::gen_range(&mut self.rng, 0..n)
    }

    /// Derives `n` worker streams seeded from this generator's output, so no two workers
    /// draw the same sequence.
    pub fn split(&mut self, n: usize) -> anyhow::Result<Vec<Rng>> {
        (0..n)
            .map(|_| {
                rand::rngs::SmallRng::from_rng(&mut self.rng)
                    .map(|rng| Rng { rng })
                    .map_err(|e| anyhow::anyhow!("rng - can't seed a worker stream: {}", e))
            })
            .collect()
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new()
    }
}
