use std::time::Duration;

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Slowest refresh that still updates the countdown every second
const MAX_TICK_MS: u64 = 1000;

/// Get tick duration for the configured interval
pub fn tick_duration(tick_ms: u64) -> Duration {
    let ms = if tick_ms == 0 { DEFAULT_TICK_MS } else { tick_ms.min(MAX_TICK_MS) };
    Duration::from_millis(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(250), Duration::from_millis(250));
        assert_eq!(tick_duration(0), Duration::from_millis(DEFAULT_TICK_MS));
        assert_eq!(tick_duration(5000), Duration::from_millis(1000));
    }
}
