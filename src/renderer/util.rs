#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorkRange {
    pub from: u64,
    pub to: u64,
}

impl WorkRange {
    pub fn len(&self) -> u64 {
        self.to - self.from
    }
}

/// Splits `0..count` into at most `num_thread` contiguous ranges whose lengths differ by at
/// most one. No range is empty unless `count` is zero, in which case a single empty range is
/// returned.
pub fn create_work_ranges(num_thread: u32, count: u64) -> Vec<WorkRange> {
    let num_ranges = (num_thread as u64).min(count).max(1);
    let count_per_range = count / num_ranges;
    let remainder = count % num_ranges;
    let mut ranges = Vec::with_capacity(num_ranges as usize);
    let mut from = 0;
    for t in 0..num_ranges {
        let to = from + count_per_range + if t < remainder { 1 } else { 0 };
        ranges.push(WorkRange { from, to });
        from = to;
    }
    ranges
}

pub fn render_progress_bar(count: u64) -> indicatif::ProgressBar {
    let progress_bar = indicatif::ProgressBar::new(count);
    progress_bar.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} (eta: {eta})")
            .progress_chars("#>-"),
    );
    progress_bar
}
