use glam::IVec3;

use crate::core::{disk::Disk, rng::Rng};

use super::{table::table_len, DiskSamplerT, PointTable};

/// A frozen set of random points, drawn once from `rng` at construction.
pub struct DiskRandomFixedSampler {
    disk: Disk,
    table: PointTable,
}

impl DiskRandomFixedSampler {
    pub fn new(disk: Disk, block_size: (u32, u32), rng: &mut Rng) -> anyhow::Result<Self> {
        let len = table_len("sampler-random_fixed", block_size)?;
        let table = PointTable::build(len, |_| {
            let (u, v) = rng.uniform_2d();
            disk.sample_polar(u, v)
        });
        Ok(Self { disk, table })
    }
}

impl DiskSamplerT for DiskRandomFixedSampler {
    fn sample(&self, rng: &mut Rng) -> IVec3 {
        self.table.pick(rng)
    }

    fn disk(&self) -> &Disk {
        &self.disk
    }

    fn table(&self) -> Option<&PointTable> {
        Some(&self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk() -> Disk {
        Disk::new(IVec3::new(100, 100, 0), 100.0)
    }

    #[test]
    fn table_depends_only_on_construction_rng() {
        let a = DiskRandomFixedSampler::new(disk(), (10, 10), &mut Rng::with_seed(9)).unwrap();
        let b = DiskRandomFixedSampler::new(disk(), (10, 10), &mut Rng::with_seed(9)).unwrap();
        let c = DiskRandomFixedSampler::new(disk(), (10, 10), &mut Rng::with_seed(10)).unwrap();
        assert_eq!(a.table().unwrap().len(), 100);
        assert_eq!(a.table().unwrap().points(), b.table().unwrap().points());
        assert_ne!(a.table().unwrap().points(), c.table().unwrap().points());
    }

    #[test]
    fn draws_come_from_the_frozen_set() {
        let sampler = DiskRandomFixedSampler::new(disk(), (4, 4), &mut Rng::with_seed(1)).unwrap();
        let before = sampler.table().unwrap().points().to_vec();
        let mut rng = Rng::with_seed(2);
        for _ in 0..1000 {
            let p = sampler.sample(&mut rng);
            assert!(before.contains(&p));
        }
        assert_eq!(sampler.table().unwrap().points(), before.as_slice());
    }

    #[test]
    fn rejects_empty_block() {
        assert!(DiskRandomFixedSampler::new(disk(), (0, 0), &mut Rng::with_seed(1)).is_err());
    }
}
