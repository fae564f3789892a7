use glam::IVec3;

use crate::core::rng::Rng;

/// Sample points computed once at sampler construction. Only shared access is handed out
/// afterwards, so draws never change the table.
#[derive(Clone, Debug)]
pub struct PointTable {
    points: Vec<IVec3>,
}

impl PointTable {
    pub fn build<F: FnMut(usize) -> IVec3>(len: usize, f: F) -> Self {
        Self {
            points: (0..len).map(f).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[IVec3] {
        &self.points
    }

    /// Number of different positions in the table; rounding can map several entries to the
    /// same pixel.
    pub fn distinct(&self) -> usize {
        let mut points = self.points().to_vec();
        points.sort_by_key(|p| (p.x, p.y, p.z));
        points.dedup();
        points.len()
    }

    /// Uniformly random entry, with replacement.
    pub fn pick(&self, rng: &mut Rng) -> IVec3 {
        self.points[rng.uniform_index(self.points.len())]
    }
}

/// Number of table entries for a `(width, height)` block. Zero-sized blocks are rejected
/// since a table sampler needs at least one point to draw from.
pub fn table_len(name: &str, block_size: (u32, u32)) -> anyhow::Result<usize> {
    let (bw, bh) = block_size;
    if bw == 0 || bh == 0 {
        anyhow::bail!(format!(
            "{} - block_size should be positive, got {}x{}",
            name, bw, bh
        ));
    }
    match (bw as usize).checked_mul(bh as usize) {
        Some(len) => Ok(len),
        None => anyhow::bail!(format!(
            "{} - block_size {}x{} is too large",
            name, bw, bh
        )),
    }
}
