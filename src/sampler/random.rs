use glam::IVec3;

use crate::core::{disk::Disk, rng::Rng};

use super::DiskSamplerT;

/// Draws a fresh point on every call, covering the whole disk.
pub struct DiskRandomSampler {
    disk: Disk,
}

impl DiskRandomSampler {
    pub fn new(disk: Disk) -> Self {
        Self { disk }
    }
}

impl DiskSamplerT for DiskRandomSampler {
    fn sample(&self, rng: &mut Rng) -> IVec3 {
        let (u, v) = rng.uniform_2d();
        self.disk.sample_polar(u, v)
    }

    fn disk(&self) -> &Disk {
        &self.disk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BINS: usize = 10;

    /// Histogram of `r^2 / R^2` over `BINS` equal bins; uniform area density makes it flat.
    fn area_histogram(points: &[IVec3], center: IVec3, radius: f32) -> [usize; BINS] {
        let mut bins = [0; BINS];
        for p in points {
            let d = *p - center;
            let r2 = (d.x as f32 * d.x as f32 + d.y as f32 * d.y as f32) / (radius * radius);
            let bin = ((r2 * BINS as f32) as usize).min(BINS - 1);
            bins[bin] += 1;
        }
        bins
    }

    fn is_flat(bins: &[usize; BINS], total: usize) -> bool {
        let expected = total as f32 / BINS as f32;
        bins.iter()
            .all(|&n| ((n as f32 - expected) / expected).abs() < 0.06)
    }

    #[test]
    fn radius_is_uniform_in_area() {
        let center = IVec3::new(1000, 1000, 0);
        let radius = 1000.0;
        let sampler = DiskRandomSampler::new(Disk::new(center, radius));
        let mut rng = Rng::with_seed(17);
        let points: Vec<IVec3> = (0..100_000).map(|_| sampler.sample(&mut rng)).collect();
        let bins = area_histogram(&points, center, radius);
        assert!(is_flat(&bins, points.len()), "{:?}", bins);
    }

    #[test]
    fn histogram_catches_missing_sqrt() {
        let center = IVec3::new(1000, 1000, 0);
        let radius = 1000.0;
        let mut rng = Rng::with_seed(17);
        let points: Vec<IVec3> = (0..100_000)
            .map(|_| {
                let (u, v) = rng.uniform_2d();
                crate::core::disk::point_on_disk(2.0 * std::f32::consts::PI * u, radius * v, center)
            })
            .collect();
        let bins = area_histogram(&points, center, radius);
        assert!(!is_flat(&bins, points.len()), "{:?}", bins);
    }

    #[test]
    fn points_stay_in_disk() {
        let center = IVec3::new(100, 100, 5);
        let sampler = DiskRandomSampler::new(Disk::new(center, 100.0));
        let mut rng = Rng::with_seed(2);
        for _ in 0..10000 {
            let p = sampler.sample(&mut rng);
            let d = p - center;
            assert!(((d.x * d.x + d.y * d.y) as f32).sqrt() <= 100.0);
            assert_eq!(p.z, 5);
        }
        assert!(sampler.table().is_none());
    }
}
