//! Progress reporting while API requests are outstanding.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;

const TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {msg}";

#[derive(Debug)]
struct DelayedState {
    start_time: Instant,
    delay: Duration,
    visible: AtomicBool,
    has_content: AtomicBool,
}

/// A progress bar on stderr that stays hidden until work has lasted longer than `delay`.
///
/// Fast runs (cached responses, small users) finish without ever drawing anything.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
    state: Arc<DelayedState>,
}

impl ProgressReporter {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let bar = ProgressBar::hidden();
        if let Ok(style) = ProgressStyle::default_bar().template(TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_length(0);

        Self {
            bar,
            state: Arc::new(DelayedState {
                start_time: Instant::now(),
                delay,
                visible: AtomicBool::new(false),
                has_content: AtomicBool::new(false),
            }),
        }
    }

    fn ensure_visible(&self) {
        if !self.state.visible.load(Ordering::Relaxed)
            && self.state.has_content.load(Ordering::Relaxed)
            && self.state.start_time.elapsed() >= self.state.delay
        {
            self.state.visible.store(true, Ordering::Relaxed);
            self.bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }
    }

    pub fn set_length(&self, len: u64) {
        if len > 0 {
            self.state.has_content.store(true, Ordering::Relaxed);
        }
        self.ensure_visible();
        self.bar.set_length(len);
    }

    pub fn set_position(&self, pos: u64) {
        self.ensure_visible();
        self.bar.set_position(pos);
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        let msg = msg.into();
        if !msg.is_empty() {
            self.state.has_content.store(true, Ordering::Relaxed);
        }
        self.ensure_visible();
        self.bar.set_message(msg);
    }

    /// Label shown left of the bar, such as "Fetching".
    pub fn set_prefix(&self, prefix: &str) {
        self.bar.set_prefix(prefix.to_string());
    }

    pub fn finish_and_clear(&self) {
        if self.state.visible.load(Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }

    /// Start a background task that reveals the bar once the delay has elapsed, even while
    /// the caller is parked on a slow request.
    ///
    /// The task is aborted when the returned guard is dropped.
    #[must_use]
    pub fn start_visibility_checking(&self) -> VisibilityTaskGuard {
        let progress = self.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(250));
            loop {
                let _ = interval.tick().await;
                if !progress.state.visible.load(Ordering::Relaxed) {
                    progress.ensure_visible();
                }
            }
        });
        VisibilityTaskGuard(task)
    }
}

/// Guard that aborts the visibility checking task when dropped.
#[derive(Debug)]
pub struct VisibilityTaskGuard(tokio::task::JoinHandle<()>);

impl Drop for VisibilityTaskGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}
