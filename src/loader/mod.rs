use std::{convert::TryInto, path::Path};

use anyhow::Context;
use glam::IVec3;

use crate::{
    core::{disk::Disk, loader::InputParams, rng::Rng},
    renderer::SamplingEngine,
    sampler::{self, SamplerKind},
};

#[derive(Clone, Debug, PartialEq)]
pub struct SamplingConfig {
    pub sampler: SamplerKind,
    pub width: u32,
    pub height: u32,
    pub count: u64,
    pub block_size: (u32, u32),
    /// 0 means half of the canvas width.
    pub radius: u32,
    pub seed: Option<u64>,
    /// `None` uses one worker per logical cpu.
    pub threads: Option<u32>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sampler: SamplerKind::Random,
            width: 200,
            height: 200,
            count: 10000,
            block_size: (8, 8),
            radius: 0,
            seed: None,
            threads: None,
        }
    }
}

impl SamplingConfig {
    pub fn resolved_radius(&self) -> u32 {
        if self.radius == 0 {
            self.width / 2
        } else {
            self.radius
        }
    }

    /// Disk centered on the canvas.
    pub fn disk(&self) -> Disk {
        let center = IVec3::new((self.width / 2) as i32, (self.height / 2) as i32, 0);
        Disk::new(center, self.resolved_radius() as f32)
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<SamplingConfig> {
    let path = path.as_ref();
    let json_file = std::fs::File::open(path)
        .with_context(|| format!("config - can't open '{}'", path.display()))?;
    let json_reader = std::io::BufReader::new(json_file);
    let json_value: serde_json::Value = serde_json::from_reader(json_reader)
        .with_context(|| format!("config - '{}' is not valid json", path.display()))?;
    config_from_value(&json_value)
}

/// Reads a config object. `sampler` is either a kind name, with `block_size` next to it, or a
/// sampler object `{"kind": .., "block_size": [..]}`.
pub fn config_from_value(value: &serde_json::Value) -> anyhow::Result<SamplingConfig> {
    let mut object = match value {
        serde_json::Value::Object(object) => object.clone(),
        _ => anyhow::bail!("config - should be a json object"),
    };
    let sampler_value = object.remove("sampler");
    let mut params: InputParams = (&serde_json::Value::Object(object)).try_into()?;
    params.set_name("config".into());
    let default = SamplingConfig::default();

    let (sampler, block_size) = match sampler_value {
        Some(sampler_value @ serde_json::Value::Object(_)) => {
            let mut sampler_params: InputParams = (&sampler_value).try_into()?;
            sampler::sampler_params_from(&mut sampler_params)?
        }
        Some(serde_json::Value::String(kind)) => {
            (kind.parse::<SamplerKind>()?, read_block_size(&mut params, default.block_size)?)
        }
        None => (
            default.sampler,
            read_block_size(&mut params, default.block_size)?,
        ),
        Some(_) => anyhow::bail!("config - 'sampler' should be string or object"),
    };
    let width = get_u32_or(&mut params, "width", default.width)?;
    let height = get_u32_or(&mut params, "height", default.height)?;
    let count = params.get_int_or("count", default.count as i64)?;
    if count < 0 {
        anyhow::bail!(format!("config - 'count' should not be negative, got {}", count));
    }
    let radius = get_u32_or(&mut params, "radius", default.radius)?;
    let seed = if params.contains_key("seed") {
        Some(params.get_int("seed")? as u64)
    } else {
        None
    };
    let threads = if params.contains_key("threads") {
        Some(get_u32_or(&mut params, "threads", 1)?)
    } else {
        None
    };

    params.check_unused_keys();

    Ok(SamplingConfig {
        sampler,
        width,
        height,
        count: count as u64,
        block_size,
        radius,
        seed,
        threads,
    })
}

fn read_block_size(
    params: &mut InputParams,
    fallback: (u32, u32),
) -> anyhow::Result<(u32, u32)> {
    let [bw, bh] = params.get_int2_or("block_size", [fallback.0 as i64, fallback.1 as i64])?;
    sampler::block_size_from(params.name(), bw, bh)
}

fn get_u32_or(params: &mut InputParams, key: &str, fallback: u32) -> anyhow::Result<u32> {
    let value = params.get_int_or(key, fallback as i64)?;
    match value.try_into() {
        Ok(value) => Ok(value),
        Err(_) => anyhow::bail!(format!(
            "{} - '{}' should be a non-negative integer, got {}",
            params.name(),
            key,
            value
        )),
    }
}

/// Builds the disk, its sampler and an engine sized to the canvas.
pub fn build_engine(config: &SamplingConfig) -> anyhow::Result<SamplingEngine> {
    let mut rng = match config.seed {
        Some(seed) => Rng::with_seed(seed),
        None => Rng::new(),
    };
    let disk = config.disk();
    let sampler = sampler::create_sampler(config.sampler, disk, config.block_size, &mut rng)?;

    let mut engine = SamplingEngine::new(config.width, config.height, sampler)?;
    if let Some(seed) = config.seed {
        // distinct from the stream that built the sampler table
        engine = engine.with_seed(seed.wrapping_add(1));
    }
    if let Some(threads) = config.threads {
        engine = engine.with_threads(threads);
    }
    Ok(engine)
}
