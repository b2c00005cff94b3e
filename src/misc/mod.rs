mod color_mode;
mod output_format;
mod progress_reporter;

pub use color_mode::ColorMode;
pub use output_format::OutputFormat;
pub use progress_reporter::{ProgressReporter, VisibilityTaskGuard};
