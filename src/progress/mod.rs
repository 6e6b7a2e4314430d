//! Progress module containing progress bar functionality.
//!
//! - `style` - Progress bar styling options and templates
//! - `display` - Progress bar display management and coordination
//!
//! Bars are only a visual sink: programmatic observers are registered with
//! [`DownloaderBuilder::on_progress`](crate::DownloaderBuilder::on_progress).

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
