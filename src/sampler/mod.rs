mod blue_noise;
mod random;
mod random_fixed;
mod table;
mod uniform;

pub use blue_noise::*;
pub use random::*;
pub use random_fixed::*;
pub use table::PointTable;
pub use uniform::*;

use std::{fmt, str::FromStr};

use glam::IVec3;

use crate::core::{disk::Disk, loader::InputParams, rng::Rng};

#[enum_dispatch::enum_dispatch(DiskSampler)]
pub trait DiskSamplerT: Send + Sync {
    /// Draws one point inside the disk.
    fn sample(&self, rng: &mut Rng) -> IVec3;

    fn disk(&self) -> &Disk;

    /// Precomputed points this sampler draws from, if any.
    fn table(&self) -> Option<&PointTable> {
        None
    }
}

#[enum_dispatch::enum_dispatch]
pub enum DiskSampler {
    DiskUniformSampler,
    DiskRandomSampler,
    DiskRandomFixedSampler,
    DiskBlueNoiseSampler,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SamplerKind {
    Uniform,
    Random,
    RandomFixed,
    BlueNoise,
}

impl SamplerKind {
    pub const ALL: [SamplerKind; 4] = [
        SamplerKind::Uniform,
        SamplerKind::Random,
        SamplerKind::RandomFixed,
        SamplerKind::BlueNoise,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SamplerKind::Uniform => "uniform",
            SamplerKind::Random => "random",
            SamplerKind::RandomFixed => "random_fixed",
            SamplerKind::BlueNoise => "blue_noise",
        }
    }
}

impl fmt::Display for SamplerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SamplerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match SamplerKind::ALL.iter().find(|kind| kind.name() == lower) {
            Some(kind) => Ok(*kind),
            None => anyhow::bail!(format!("sampler: unknown type '{}'", s)),
        }
    }
}

/// `rng` is only consumed by kinds that precompute random points.
pub fn create_sampler(
    kind: SamplerKind,
    disk: Disk,
    block_size: (u32, u32),
    rng: &mut Rng,
) -> anyhow::Result<DiskSampler> {
    let res: DiskSampler = match kind {
        SamplerKind::Uniform => DiskUniformSampler::new(disk, block_size)?.into(),
        SamplerKind::Random => DiskRandomSampler::new(disk).into(),
        SamplerKind::RandomFixed => DiskRandomFixedSampler::new(disk, block_size, rng)?.into(),
        SamplerKind::BlueNoise => DiskBlueNoiseSampler::new(disk, block_size)?.into(),
    };

    match res.table() {
        Some(table) => log::info!(
            "sampler-{}: {} precomputed points, radius {}",
            kind,
            table.len(),
            disk.radius()
        ),
        None => log::info!("sampler-{}: radius {}", kind, disk.radius()),
    }

    Ok(res)
}

/// Reads a sampler object as written in project files,
/// `{"kind": <kind>, "block_size": [bw, bh]}`. `type` is accepted in place of `kind`;
/// `block_size` defaults to 8x8.
pub fn sampler_params_from(
    params: &mut InputParams,
) -> anyhow::Result<(SamplerKind, (u32, u32))> {
    params.set_name("sampler".into());
    let key = if params.contains_key("type") && !params.contains_key("kind") {
        "type"
    } else {
        "kind"
    };
    let kind: SamplerKind = params.get_str(key)?.parse()?;
    params.set_name(format!("sampler-{}", kind).into());

    let [bw, bh] = params.get_int2_or("block_size", [8, 8])?;
    let block_size = block_size_from(params.name(), bw, bh)?;

    params.check_unused_keys();

    Ok((kind, block_size))
}

pub(crate) fn block_size_from(name: &str, bw: i64, bh: i64) -> anyhow::Result<(u32, u32)> {
    use std::convert::TryFrom;
    match (u32::try_from(bw), u32::try_from(bh)) {
        (Ok(bw), Ok(bh)) => Ok((bw, bh)),
        _ => anyhow::bail!(format!("{} - invalid block_size {}x{}", name, bw, bh)),
    }
}
