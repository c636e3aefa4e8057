//! Free-space sampling for roadmap construction
//!
//! Draws uniform 3D points inside the sampling box and rejects those in
//! collision with the obstacle set. Candidates are drawn in batches of twice
//! the requested count to amortize the index queries, and the retry loop is
//! bounded so a fully obstructed box fails instead of spinning forever.

use rand::Rng;

use crate::common::{PlannerError, PlannerResult, Point3D};
use crate::obstacles::ObstacleIndex;

/// Configuration for free-space sampling
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Maximum number of batch rounds before giving up
    pub max_batches: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self { max_batches: 64 }
    }
}

/// Rejection sampler over the obstacle index's sampling box
pub struct FreeSpaceSampler<'a> {
    index: &'a ObstacleIndex,
    config: SamplerConfig,
}

impl<'a> FreeSpaceSampler<'a> {
    pub fn new(index: &'a ObstacleIndex) -> Self {
        Self::with_config(index, SamplerConfig::default())
    }

    pub fn with_config(index: &'a ObstacleIndex, config: SamplerConfig) -> Self {
        FreeSpaceSampler { index, config }
    }

    /// Sample `num_samples` collision-free points with the thread RNG.
    pub fn sample(&self, num_samples: usize) -> PlannerResult<Vec<Point3D>> {
        self.sample_with_rng(num_samples, &mut rand::thread_rng())
    }

    /// Sample `num_samples` collision-free points. Surplus points from the
    /// final batch are discarded so exactly `num_samples` are returned.
    pub fn sample_with_rng<R: Rng>(
        &self,
        num_samples: usize,
        rng: &mut R,
    ) -> PlannerResult<Vec<Point3D>> {
        if num_samples == 0 {
            return Ok(Vec::new());
        }

        let bounds = self.index.bounds();
        let mut points = Vec::with_capacity(num_samples);

        for _ in 0..self.config.max_batches {
            for _ in 0..(2 * num_samples) {
                let candidate = Point3D::new(
                    sample_range(rng, bounds.x_min, bounds.x_max),
                    sample_range(rng, bounds.y_min, bounds.y_max),
                    sample_range(rng, bounds.z_min, bounds.z_max),
                );

                if !self.index.in_collision(candidate) {
                    points.push(candidate);
                    if points.len() >= num_samples {
                        return Ok(points);
                    }
                }
            }
        }

        Err(PlannerError::InsufficientFreeSpace(format!(
            "collected {} of {} samples after {} batches",
            points.len(),
            num_samples,
            self.config.max_batches
        )))
    }
}

/// Uniform draw that tolerates a degenerate range (fixed-altitude bands
/// make z_min == z_max).
fn sample_range<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if lo >= hi {
        lo
    } else {
        rng.gen_range(lo..hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacles::{AltitudeBand, ObstacleRecord};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sparse_field() -> ObstacleIndex {
        let records = vec![
            ObstacleRecord::new(0.0, 0.0, 20.0, 5.0, 5.0, 20.0),
            ObstacleRecord::new(100.0, 100.0, 20.0, 5.0, 5.0, 20.0),
        ];
        ObstacleIndex::from_records(&records, 2.0, AltitudeBand::Fixed(10.0)).unwrap()
    }

    #[test]
    fn test_samples_are_collision_free() {
        let index = sparse_field();
        let sampler = FreeSpaceSampler::new(&index);
        let mut rng = StdRng::seed_from_u64(7);
        let points = sampler.sample_with_rng(50, &mut rng).unwrap();

        assert_eq!(points.len(), 50);
        for p in &points {
            assert!(!index.in_collision(*p));
        }
    }

    #[test]
    fn test_samples_respect_bounds() {
        let index = sparse_field();
        let bounds = *index.bounds();
        let sampler = FreeSpaceSampler::new(&index);
        let mut rng = StdRng::seed_from_u64(3);
        let points = sampler.sample_with_rng(20, &mut rng).unwrap();

        for p in &points {
            assert!(p.x >= bounds.x_min && p.x <= bounds.x_max);
            assert!(p.y >= bounds.y_min && p.y <= bounds.y_max);
            assert_eq!(p.z, 10.0);
        }
    }

    #[test]
    fn test_fully_obstructed_box_fails() {
        // One obstacle covering its whole sampling box, taller than the band
        let records = vec![ObstacleRecord::new(0.0, 0.0, 50.0, 10.0, 10.0, 50.0)];
        let index =
            ObstacleIndex::from_records(&records, 1.0, AltitudeBand::Fixed(10.0)).unwrap();
        let sampler = FreeSpaceSampler::with_config(&index, SamplerConfig { max_batches: 4 });
        let mut rng = StdRng::seed_from_u64(1);

        let result = sampler.sample_with_rng(10, &mut rng);
        assert!(matches!(result, Err(PlannerError::InsufficientFreeSpace(_))));
    }

    #[test]
    fn test_seeded_sampling_is_deterministic() {
        let index = sparse_field();
        let sampler = FreeSpaceSampler::new(&index);

        let a = sampler
            .sample_with_rng(30, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let b = sampler
            .sample_with_rng(30, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);
    }
}
