use glam::IVec3;

use crate::core::{disk::Disk, rng::Rng};

use super::{table::table_len, DiskSamplerT, PointTable};

/// Stratified points on a regular `(theta, r^2)` grid of `block_size` cells.
pub struct DiskUniformSampler {
    disk: Disk,
    table: PointTable,
}

impl DiskUniformSampler {
    pub fn new(disk: Disk, block_size: (u32, u32)) -> anyhow::Result<Self> {
        let len = table_len("sampler-uniform", block_size)?;
        let (bw, bh) = block_size;
        let table = PointTable::build(len, |idx| {
            let (i, j) = grid_coords(idx, block_size);
            let x = i as f32 / bw as f32;
            let y = j as f32 / bh as f32;
            disk.sample_polar(x, y)
        });
        Ok(Self { disk, table })
    }
}

/// Splits a table index into `(theta cell, radius cell)`.
pub fn grid_coords(idx: usize, block_size: (u32, u32)) -> (u32, u32) {
    let bh = block_size.1 as usize;
    ((idx / bh) as u32, (idx % bh) as u32)
}

impl DiskSamplerT for DiskUniformSampler {
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
