use std::path::PathBuf;

use anyhow::Context;
use structopt::StructOpt;

mod core;
mod loader;
mod renderer;
mod sampler;

use crate::loader::SamplingConfig;
use crate::sampler::{DiskSamplerT, SamplerKind};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "disk-sampler",
    about = "Draws samples on a disk and saves where they landed"
)]
struct Opt {
    /// JSON config file; replaces all sampling flags below
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// One of uniform, random, random_fixed, blue_noise
    #[structopt(long, default_value = "random")]
    sampler: SamplerKind,

    #[structopt(long, default_value = "200")]
    width: u32,

    #[structopt(long, default_value = "200")]
    height: u32,

    /// Number of draws
    #[structopt(long, default_value = "10000")]
    count: u64,

    /// Table size of the precomputing samplers, as two numbers [default: 8 8]
    #[structopt(long, number_of_values = 2)]
    block_size: Vec<u32>,

    /// Disk radius, 0 for half of the width
    #[structopt(long, default_value = "0")]
    radius: u32,

    #[structopt(long)]
    seed: Option<u64>,

    /// Worker threads, defaults to the number of logical cpus
    #[structopt(long)]
    threads: Option<u32>,

    #[structopt(short, long, parse(from_os_str), default_value = "disk_samples.png")]
    output: PathBuf,

    #[structopt(long)]
    no_progress: bool,
}

impl Opt {
    fn sampling_config(&self) -> anyhow::Result<SamplingConfig> {
        if let Some(path) = &self.config {
            return loader::load_config(path);
        }
        let block_size = match self.block_size.as_slice() {
            [] => SamplingConfig::default().block_size,
            [bw, bh] => (*bw, *bh),
            _ => anyhow::bail!(format!(
                "args - block-size takes 2 numbers, got {}",
                self.block_size.len()
            )),
        };
        Ok(SamplingConfig {
            sampler: self.sampler,
            width: self.width,
            height: self.height,
            count: self.count,
            block_size,
            radius: self.radius,
            seed: self.seed,
            threads: self.threads,
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = Opt::from_args();
    let config = opt.sampling_config()?;
    log::info!("{:?}", config);

    let mut engine = loader::build_engine(&config)?.with_progress(!opt.no_progress);
    if let Some(table) = engine.sampler().table() {
        log::info!(
            "{} precomputed points, {} distinct",
            table.len(),
            table.distinct()
        );
    }

    let begin_time = std::time::SystemTime::now();
    let stats = engine.render(config.count)?;
    let duration = std::time::SystemTime::now().duration_since(begin_time)?;

    log::info!(
        "{} draws in {:?}, {} distinct pixels, {:.1}% of the disk",
        stats.draws,
        duration,
        engine.distinct_hits(),
        engine.coverage() * 100.0
    );

    let (width, height) = engine.size();
    let pixels = engine.read_canvas();
    crate::core::canvas::pixels_to_image(width, height, &pixels)
        .save(&opt.output)
        .with_context(|| format!("output - can't save '{}'", opt.output.display()))?;
    log::info!("saved to '{}'", opt.output.display());

    Ok(())
}
