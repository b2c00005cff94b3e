//! Pacing between consecutive requests of one logical query.

use core::time::Duration;

/// Decides how long to wait before the next request, given how many requests the current
/// query has already issued.
///
/// Any `Fn(u32) -> Duration` closure is a pacing policy, which keeps tests free of real timers.
pub trait PacingPolicy: Send + Sync {
    fn delay_before(&self, requests_so_far: u32) -> Duration;
}

impl<F> PacingPolicy for F
where
    F: Fn(u32) -> Duration + Send + Sync,
{
    fn delay_before(&self, requests_so_far: u32) -> Duration {
        self(requests_so_far)
    }
}

/// Waits a fixed pause between requests; the first request goes out immediately.
#[derive(Debug, Clone, Copy)]
pub struct FixedPause(pub Duration);

impl PacingPolicy for FixedPause {
    fn delay_before(&self, requests_so_far: u32) -> Duration {
        if requests_so_far == 0 { Duration::ZERO } else { self.0 }
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

impl PacingPolicy for NoPause {
    fn delay_before(&self, _requests_so_far: u32) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_pause_skips_first_request() {
        let pacing = FixedPause(Duration::from_millis(100));
        assert_eq!(pacing.delay_before(0), Duration::ZERO);
        assert_eq!(pacing.delay_before(1), Duration::from_millis(100));
        assert_eq!(pacing.delay_before(9), Duration::from_millis(100));
    }

    #[test]
    fn test_no_pause() {
        assert_eq!(NoPause.delay_before(0), Duration::ZERO);
        assert_eq!(NoPause.delay_before(5), Duration::ZERO);
    }

    #[test]
    fn test_closure_policy() {
        let linear = |n: u32| Duration::from_millis(u64::from(n) * 10);
        assert_eq!(linear.delay_before(3), Duration::from_millis(30));
    }
}
