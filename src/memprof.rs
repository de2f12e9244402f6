//! Memory and timing profiling utilities
//!
//! - Memory: Reads RSS (Resident Set Size) from /proc/self/status
//! - Timing: Uses std::time::Instant for precise measurements
//!
//! Measurements are emitted as `debug` events; they cost one file read each
//! and are only visible with `SOCCER_VIZ_LOG=debug`.

use std::fs;
use std::time::Instant;

/// Get current RSS (Resident Set Size) in bytes from /proc/self/status
///
/// Returns 0 where /proc is unavailable.
pub fn get_rss_bytes() -> u64 {
    if let Ok(status) = fs::read_to_string("/proc/self/status") {
        for line in status.lines() {
            if let Some(rest) = line.strip_prefix("VmRSS:") {
                // Format: "VmRSS:    123456 kB"
                if let Some(Ok(kb)) = rest.split_whitespace().next().map(str::parse::<u64>) {
                    return kb * 1024;
                }
            }
        }
    }
    0
}

/// Get current RSS in megabytes
pub fn get_rss_mb() -> f64 {
    get_rss_bytes() as f64 / (1024.0 * 1024.0)
}

/// Memory checkpoint that returns the value for comparison
pub fn checkpoint(label: &str) -> f64 {
    let rss = get_rss_mb();
    tracing::debug!(rss_mb = format_args!("{:.2}", rss), "{}", label);
    rss
}

/// Log the change from a previous checkpoint, returns the current value
pub fn delta(label: &str, previous: f64) -> f64 {
    let current = get_rss_mb();
    tracing::debug!(
        rss_mb = format_args!("{:.2}", current),
        delta_mb = format_args!("{:+.2}", current - previous),
        "{}",
        label
    );
    current
}

/// Log elapsed time for a section and the whole run, returns a new section start
pub fn time_delta(label: &str, start: Instant, section_start: Instant) -> Instant {
    tracing::debug!(
        section_s = format_args!("{:.3}", section_start.elapsed().as_secs_f64()),
        total_s = format_args!("{:.3}", start.elapsed().as_secs_f64()),
        "{}",
        label
    );
    Instant::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rss_is_readable() {
        // Non-Linux hosts report zero
        let mb = get_rss_mb();
        assert!(mb >= 0.0);
        if cfg!(target_os = "linux") {
            assert!(get_rss_bytes() > 0);
        }
    }

    #[test]
    fn test_delta_returns_current() {
        let before = checkpoint("before");
        let after = delta("after", before);
        assert!(after >= 0.0);
    }
}
