//! Anti-aliasing samplers.
//!
//! A sampler owns a precomputed pool of points in the unit square, split
//! into `num_sets` sets of `num_samples` points each. Every `num_samples`
//! draws the cursor jumps to a randomly chosen set, and a per-set shuffle
//! table decides the order points are read within it, so neighbouring
//! pixels do not see correlated patterns. Drawing never touches the pool.

use crate::tolerance::ONE_MINUS_EPSILON;
use lumen_core::SamplerKind;
use lumen_math::Point2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A pool of unit-square sample points with a rotating read cursor.
#[derive(Debug, Clone)]
pub struct Sampler {
    kind: SamplerKind,
    num_samples: usize,
    num_sets: usize,
    samples: Vec<Point2>,
    shuffled_indices: Vec<usize>,
    count: usize,
    jump: usize,
    rng: StdRng,
}

impl Sampler {
    /// Create a sampler seeded from system entropy.
    pub fn new(kind: SamplerKind, num_samples: u32, num_sets: u32) -> Self {
        Self::with_rng(kind, num_samples, num_sets, StdRng::from_entropy())
    }

    /// Create a sampler with a fixed seed, for reproducible renders.
    pub fn with_seed(kind: SamplerKind, num_samples: u32, num_sets: u32, seed: u64) -> Self {
        Self::with_rng(kind, num_samples, num_sets, StdRng::seed_from_u64(seed))
    }

    fn with_rng(kind: SamplerKind, num_samples: u32, num_sets: u32, rng: StdRng) -> Self {
        let requested = num_samples.max(1) as usize;
        let num_sets = num_sets.max(1) as usize;

        // Grid patterns can only place n² points per set.
        let num_samples = match kind {
            SamplerKind::Random => requested,
            SamplerKind::Regular | SamplerKind::Jitter => grid_size(requested).pow(2),
        };
        if num_samples != requested {
            log::warn!(
                "{:?} sampler needs a square sample count; using {} instead of {}",
                kind,
                num_samples,
                requested
            );
        }

        let mut sampler = Self {
            kind,
            num_samples,
            num_sets,
            samples: Vec::with_capacity(num_samples * num_sets),
            shuffled_indices: Vec::with_capacity(num_samples * num_sets),
            count: 0,
            jump: 0,
            rng,
        };
        sampler.setup_shuffled_indices();
        sampler.generate_samples();
        sampler
    }

    /// Fill the point pool with `num_sets * num_samples` points.
    pub fn generate_samples(&mut self) {
        self.samples.clear();

        match self.kind {
            SamplerKind::Regular => {
                let n = grid_size(self.num_samples);
                for _ in 0..self.num_sets {
                    for p in 0..n {
                        for q in 0..n {
                            self.samples.push(Point2::new(
                                (q as f32 + 0.5) / n as f32,
                                (p as f32 + 0.5) / n as f32,
                            ));
                        }
                    }
                }
            }
            SamplerKind::Random => {
                for _ in 0..self.num_sets * self.num_samples {
                    let x: f32 = self.rng.gen();
                    let y: f32 = self.rng.gen();
                    self.samples.push(Point2::new(x, y));
                }
            }
            SamplerKind::Jitter => {
                let n = grid_size(self.num_samples);
                for _ in 0..self.num_sets {
                    for p in 0..n {
                        for q in 0..n {
                            let rx: f32 = self.rng.gen();
                            let ry: f32 = self.rng.gen();
                            self.samples.push(Point2::new(
                                ((q as f32 + rx) / n as f32).min(ONE_MINUS_EPSILON),
                                ((p as f32 + ry) / n as f32).min(ONE_MINUS_EPSILON),
                            ));
                        }
                    }
                }
            }
        }
    }

    fn setup_shuffled_indices(&mut self) {
        let mut indices: Vec<usize> = (0..self.num_samples).collect();

        self.shuffled_indices.clear();
        for _ in 0..self.num_sets {
            indices.shuffle(&mut self.rng);
            self.shuffled_indices.extend_from_slice(&indices);
        }
    }

    /// Draw the next sample point in `[0, 1)²`.
    pub fn sample_unit_square(&mut self) -> Point2 {
        if self.count % self.num_samples == 0 {
            self.jump = self.rng.gen_range(0..self.num_sets) * self.num_samples;
        }

        let within_set = self.shuffled_indices[self.jump + self.count % self.num_samples];
        self.count += 1;
        self.samples[self.jump + within_set]
    }

    /// A copy sharing this sampler's point pool, with a fresh cursor and
    /// its own RNG seeded from `seed`.
    pub fn reseeded(&self, seed: u64) -> Self {
        Self {
            count: 0,
            jump: 0,
            rng: StdRng::seed_from_u64(seed),
            ..self.clone()
        }
    }

    /// Samples drawn per pixel. For grid patterns this is the largest
    /// square not above the requested count.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    pub fn kind(&self) -> SamplerKind {
        self.kind
    }

    /// The full point pool, set after set.
    pub fn samples(&self) -> &[Point2] {
        &self.samples
    }
}

/// Side length of the largest square grid holding at most `n` points.
fn grid_size(n: usize) -> usize {
    (n as f32).sqrt() as usize
}
