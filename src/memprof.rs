//! Memory and timing checkpoints for generation passes
//!
//! - Memory: RSS (Resident Set Size) from /proc/self/status, 0 where unavailable
//! - Timing: std::time::Instant
//!
//! Both report through `tracing::debug!`, so they cost a log call only when
//! debug output is enabled for this crate.

use std::fs;
use std::time::Instant;
use tracing::debug;

/// Current RSS in bytes from /proc/self/status
pub fn get_rss_bytes() -> u64 {
    fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| {
            status
                .lines()
                .find(|line| line.starts_with("VmRSS:"))
                // Format: "VmRSS:    123456 kB"
                .and_then(|line| line.split_whitespace().nth(1))
                .and_then(|kb| kb.parse::<u64>().ok())
        })
        .map(|kb| kb * 1024)
        .unwrap_or(0)
}

/// Current RSS in megabytes
pub fn get_rss_mb() -> f64 {
    get_rss_bytes() as f64 / (1024.0 * 1024.0)
}

/// Log RSS with a label and return it for later deltas
pub fn checkpoint(label: &str) -> f64 {
    let rss = get_rss_mb();
    debug!(rss_mb = rss, "MEMPROF: {}", label);
    rss
}

/// Log RSS growth since a previous checkpoint, returning the new value
pub fn delta(label: &str, previous: f64) -> f64 {
    let current = get_rss_mb();
    debug!(
        rss_mb = current,
        delta_mb = current - previous,
        "MEMPROF: {}",
        label
    );
    current
}

/// Log elapsed time for a section and overall, returning a new section start
pub fn time_delta(label: &str, start: Instant, section_start: Instant) -> Instant {
    debug!(
        section_s = section_start.elapsed().as_secs_f64(),
        total_s = start.elapsed().as_secs_f64(),
        "TIMEPROF: {}",
        label
    );
    Instant::now()
}
