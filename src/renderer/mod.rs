mod util;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    core::{canvas::Canvas, color::Color, rng::Rng},
    sampler::{DiskSampler, DiskSamplerT},
};

/// Draws between progress bar updates.
const PROGRESS_CHUNK: u64 = 4096;
/// Upper bound on render workers, whatever was requested.
const MAX_THREADS: u32 = 256;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub draws: u64,
    /// Points that fell outside the canvas and were not written.
    pub dropped: u64,
}

/// Repeatedly draws from a sampler and marks every drawn position on its canvas.
pub struct SamplingEngine {
    width: u32,
    height: u32,
    sampler: DiskSampler,
    canvas: Canvas,
    rng: Rng,
    num_threads: u32,
    show_progress: bool,
}

impl SamplingEngine {
    /// Fails when the canvas is empty or when some point of the sampler's disk would land
    /// outside of it.
    pub fn new(width: u32, height: u32, sampler: DiskSampler) -> anyhow::Result<Self> {
        if width == 0 || height == 0 {
            anyhow::bail!(format!(
                "engine - canvas size should be positive, got {}x{}",
                width, height
            ));
        }
        let disk = sampler.disk();
        if !disk.fits_within(width, height) {
            anyhow::bail!(format!(
                "engine - disk at ({}, {}) with radius {} doesn't fit in a {}x{} canvas",
                disk.center().x,
                disk.center().y,
                disk.radius(),
                width,
                height
            ));
        }

        Ok(Self {
            width,
            height,
            sampler,
            canvas: Canvas::new(width, height),
            rng: Rng::new(),
            num_threads: num_cpus::get() as u32,
            show_progress: false,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }

    pub fn with_threads(mut self, num_threads: u32) -> Self {
        if num_threads > MAX_THREADS {
            log::warn!(
                "engine - {} threads requested, using {}",
                num_threads,
                MAX_THREADS
            );
        }
        self.num_threads = num_threads.clamp(1, MAX_THREADS);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn sampler(&self) -> &DiskSampler {
        &self.sampler
    }

    /// Performs `count` independent draws split over at most `num_threads` workers. Each
    /// worker owns a stream split from the engine's generator; workers share the canvas and
    /// the sampler.
    pub fn render(&mut self, count: u64) -> anyhow::Result<RenderStats> {
        let ranges = util::create_work_ranges(self.num_threads, count);
        let rngs = self.rng.split(ranges.len())?;

        let progress_bar = if self.show_progress {
            util::render_progress_bar(count)
        } else {
            indicatif::ProgressBar::hidden()
        };
        let dropped = AtomicU64::new(0);

        let sampler = &self.sampler;
        let canvas = &self.canvas;

        crossbeam::scope(|scope| {
            for (t, (range, mut rng)) in ranges.iter().copied().zip(rngs).enumerate() {
                let progress_bar = progress_bar.clone();
                let dropped = &dropped;

                scope.spawn(move |_| {
                    log::debug!("worker {}: {} draws from {}", t, range.len(), range.from);
                    let mut worker_dropped = 0;
                    let mut from = range.from;
                    while from < range.to {
                        let to = (from + PROGRESS_CHUNK).min(range.to);
                        for _ in from..to {
                            let p = sampler.sample(&mut rng);
                            if !canvas.put(p.x, p.y) {
                                worker_dropped += 1;
                            }
                        }
                        progress_bar.inc(to - from);
                        from = to;
                    }
                    dropped.fetch_add(worker_dropped, Ordering::Relaxed);
                });
            }
        })
        .map_err(|_| anyhow::anyhow!("engine - a render worker panicked"))?;

        progress_bar.finish_and_clear();

        let stats = RenderStats {
            draws: count,
            dropped: dropped.into_inner(),
        };
        if stats.dropped > 0 {
            log::warn!(
                "engine - {} of {} points fell outside the canvas",
                stats.dropped,
                stats.draws
            );
        }
        Ok(stats)
    }

    /// Row-major copy of the canvas.
    pub fn read_canvas(&self) -> Vec<Color> {
        self.canvas.snapshot()
    }

    pub fn distinct_hits(&self) -> usize {
        self.canvas.count_hits()
    }

    /// Fraction of the disk's area that has been hit.
    pub fn coverage(&self) -> f32 {
        let area = self.sampler.disk().area();
        if area > 0.0 {
            self.distinct_hits() as f32 / area
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec3;

    use super::*;
    use crate::{
        core::disk::Disk,
        sampler::{create_sampler, SamplerKind},
    };

    fn disk() -> Disk {
        Disk::new(IVec3::new(100, 100, 0), 100.0)
    }

    fn engine(kind: SamplerKind, seed: u64, threads: u32) -> SamplingEngine {
        let sampler = create_sampler(kind, disk(), (8, 8), &mut Rng::with_seed(seed)).unwrap();
        SamplingEngine::new(200, 200, sampler)
            .unwrap()
            .with_seed(seed)
            .with_threads(threads)
    }

    fn hit_pixels(engine: &SamplingEngine) -> Vec<(u32, u32)> {
        let (width, _) = engine.size();
        engine
            .read_canvas()
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Color::WHITE)
            .map(|(index, _)| (index as u32 % width, index as u32 / width))
            .collect()
    }

    fn assert_hits_in_disk(engine: &SamplingEngine) {
        for (x, y) in hit_pixels(engine) {
            let dx = x as f32 - 100.0;
            let dy = y as f32 - 100.0;
            assert!((dx * dx + dy * dy).sqrt() <= 100.0, "({}, {})", x, y);
        }
    }

    #[test]
    fn uniform_hits_are_bounded_by_table() {
        let mut engine = engine(SamplerKind::Uniform, 1, 4);
        let stats = engine.render(10000).unwrap();
        assert_eq!(stats, RenderStats { draws: 10000, dropped: 0 });
        let hits = engine.distinct_hits();
        assert!(hits >= 1 && hits <= 64, "{}", hits);
        assert_hits_in_disk(&engine);
    }

    #[test]
    fn random_covers_the_continuum() {
        let mut engine = engine(SamplerKind::Random, 2, 4);
        engine.render(10000).unwrap();
        let hits = engine.distinct_hits() as f32;
        // occupancy of 10000 uniform draws over ~31400 pixels
        let area = disk().area();
        let expected = area * (1.0 - (-10000.0 / area).exp());
        assert!((hits - expected).abs() / expected < 0.05, "{} vs {}", hits, expected);
        assert_hits_in_disk(&engine);
    }

    #[test]
    fn table_samplers_saturate_their_tables() {
        for kind in [SamplerKind::RandomFixed, SamplerKind::BlueNoise] {
            let mut engine = engine(kind, 3, 2);
            engine.render(10000).unwrap();
            let distinct = engine.sampler().table().unwrap().distinct();
            // 10000 draws from 64 entries reach all of them
            assert_eq!(engine.distinct_hits(), distinct, "{}", kind);
            assert_hits_in_disk(&engine);
        }
    }

    #[test]
    fn seeded_render_is_reproducible() {
        let mut a = engine(SamplerKind::Random, 7, 3);
        let mut b = engine(SamplerKind::Random, 7, 3);
        a.render(5000).unwrap();
        b.render(5000).unwrap();
        assert_eq!(a.read_canvas(), b.read_canvas());
    }

    #[test]
    fn workers_do_not_repeat_each_other() {
        // With shared streams every worker would hit the same pixels.
        let mut single = engine(SamplerKind::Random, 11, 1);
        let mut many = engine(SamplerKind::Random, 11, 8);
        single.render(8000).unwrap();
        many.render(8000).unwrap();
        let ratio = many.distinct_hits() as f32 / single.distinct_hits() as f32;
        assert!(ratio > 0.9 && ratio < 1.1, "{}", ratio);
    }

    #[test]
    fn render_accumulates() {
        let mut engine = engine(SamplerKind::Random, 5, 2);
        assert_eq!(engine.render(0).unwrap().draws, 0);
        assert_eq!(engine.distinct_hits(), 0);
        engine.render(100).unwrap();
        let first_hits = engine.distinct_hits();
        let first = engine.read_canvas();
        engine.render(1000).unwrap();
        let second = engine.read_canvas();
        assert!(engine.distinct_hits() > first_hits);
        for (a, b) in first.iter().zip(&second) {
            if *a == Color::WHITE {
                assert_eq!(*b, Color::WHITE);
            }
        }
    }

    #[test]
    fn more_threads_than_draws() {
        let mut engine = engine(SamplerKind::Random, 6, 64);
        let stats = engine.render(3).unwrap();
        assert_eq!(stats.draws, 3);
        assert!(engine.distinct_hits() >= 1 && engine.distinct_hits() <= 3);

        let engine = SamplingEngine::new(
            200,
            200,
            create_sampler(SamplerKind::Random, disk(), (8, 8), &mut Rng::with_seed(6)).unwrap(),
        )
        .unwrap()
        .with_threads(u32::MAX);
        assert_eq!(engine.num_threads, MAX_THREADS);
    }

    #[test]
    fn read_canvas_is_row_major_and_read_only() {
        let mut engine = engine(SamplerKind::Uniform, 4, 1);
        engine.render(1000).unwrap();
        let pixels = engine.read_canvas();
        assert_eq!(pixels.len(), 200 * 200);
        for (x, y) in hit_pixels(&engine) {
            assert_eq!(pixels[(y * 200 + x) as usize], Color::WHITE);
        }
        assert_eq!(engine.read_canvas(), pixels);
        assert!(engine.coverage() > 0.0 && engine.coverage() < 1.0);
    }

    #[test]
    fn rejects_disk_outside_canvas() {
        let sampler = DiskSampler::from(crate::sampler::DiskRandomSampler::new(disk()));
        assert!(SamplingEngine::new(150, 200, sampler).is_err());
        let sampler = DiskSampler::from(crate::sampler::DiskRandomSampler::new(Disk::new(
            IVec3::new(20, 100, 0),
            50.0,
        )));
        assert!(SamplingEngine::new(200, 200, sampler).is_err());
    }

    #[test]
    fn rejects_empty_canvas() {
        let sampler = DiskSampler::from(crate::sampler::DiskRandomSampler::new(Disk::new(
            IVec3::ZERO,
            0.0,
        )));
        assert!(SamplingEngine::new(0, 10, sampler).is_err());
    }
}
