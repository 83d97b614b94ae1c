use std::time::{Duration, Instant};

/// Estimate remaining wall-clock time from the average cost per processed
/// item: `elapsed / processed * (total - processed)`.
///
/// With `processed == 0` the average is undefined and the estimate is zero.
/// This is a documented placeholder, not a true estimate: the first progress
/// line always reads "0 minutes 0 seconds" regardless of real cost.
pub fn estimate_remaining(elapsed: Duration, total: usize, processed: usize) -> Duration {
    if processed == 0 {
        return Duration::ZERO;
    }

    let average = elapsed.as_secs_f64() / processed as f64;
    let remaining = total.saturating_sub(processed) as f64;

    Duration::from_secs_f64(average * remaining)
}

/// Render a duration as whole minutes and seconds, e.g. "1 minute 40 seconds".
pub fn format_clock(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;

    format!(
        "{} {} {} {}",
        minutes,
        if minutes == 1 { "minute" } else { "minutes" },
        seconds,
        if seconds == 1 { "second" } else { "seconds" }
    )
}

/// Wall-clock progress state for one batch run.
pub struct ProgressTracker {
    started_at: Instant,
    total: usize,
    processed: usize,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            started_at: Instant::now(),
            total,
            processed: 0,
        }
    }

    /// Record one completed attempt, successful or not.
    pub fn record_attempt(&mut self) {
        self.processed += 1;
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Remaining-time estimate based on the attempts recorded so far.
    pub fn remaining(&self) -> Duration {
        estimate_remaining(self.started_at.elapsed(), self.total, self.processed)
    }
}
