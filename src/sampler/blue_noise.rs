use glam::IVec3;

use crate::core::{disk::Disk, low_discrepancy::halton_2d, rng::Rng};

use super::{table::table_len, DiskSamplerT, PointTable};

/// Table of the first `block_size` Halton (2, 3) points mapped onto the disk. Not a true
/// blue noise set; the name follows the `blue_noise` sampler kind.
pub struct DiskBlueNoiseSampler {
    disk: Disk,
    table: PointTable,
}

impl DiskBlueNoiseSampler {
    pub fn new(disk: Disk, block_size: (u32, u32)) -> anyhow::Result<Self> {
        let len = table_len("sampler-blue_noise", block_size)?;
        let table = PointTable::build(len, |idx| {
            let (u, v) = halton_2d(idx as u64);
            disk.sample_polar(u, v)
        });
        Ok(Self { disk, table })
    }
}

impl DiskSamplerT for DiskBlueNoiseSampler {
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
