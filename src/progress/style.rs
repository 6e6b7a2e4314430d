//! Look of the progress bars.
//!
//! A batch shows two kinds of bars: one counting the files of the queue and
//! one counting the bytes of the file being written. Each is described by a
//! [`ProgressBarOpts`]; [`StyleOptions`] pairs them.
//!
//! # Examples
//!
//! ```rust
//! use linkfetch::progress::{ProgressBarOpts, StyleOptions};
//!
//! let compact = StyleOptions::new(
//!     ProgressBarOpts::new(
//!         Some("{pos}/{len} {wide_bar}".to_string()),
//!         Some(ProgressBarOpts::CHARS_FINE.to_string()),
//!         true,
//!         false,
//!     ),
//!     ProgressBarOpts::with_pip_style(),
//! );
//! assert!(compact.is_enabled());
//! assert!(!StyleOptions::hidden().is_enabled());
//! ```

use indicatif::{ProgressBar, ProgressStyle};

/// Options of the files bar and of the transfer bar.
///
/// By default the files bar stays on screen once the batch is over, and each
/// transfer bar is cleared when its file is done.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub(crate) files: ProgressBarOpts,
    pub(crate) transfer: ProgressBarOpts,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            files: ProgressBarOpts::new(
                Some(ProgressBarOpts::TEMPLATE_FILES.into()),
                Some(ProgressBarOpts::CHARS_FINE.into()),
                true,
                false,
            ),
            transfer: ProgressBarOpts::with_pip_style(),
        }
    }
}

impl StyleOptions {
    /// Pairs the options of the files bar and of the transfer bar.
    pub fn new(files: ProgressBarOpts, transfer: ProgressBarOpts) -> Self {
        Self { files, transfer }
    }

    /// No bar at all.
    pub fn hidden() -> Self {
        Self::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden())
    }

    pub fn set_files(&mut self, files: ProgressBarOpts) {
        self.files = files;
    }

    pub fn set_transfer(&mut self, transfer: ProgressBarOpts) {
        self.transfer = transfer;
    }

    /// Options of the bar counting files.
    pub fn files(&self) -> &ProgressBarOpts {
        &self.files
    }

    /// Options of the bar counting the bytes of one file.
    pub fn transfer(&self) -> &ProgressBarOpts {
        &self.transfer
    }

    /// `true` when at least one of the two bars is drawn.
    pub fn is_enabled(&self) -> bool {
        self.files.enabled || self.transfer.enabled
    }
}

/// Options of one progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// An `indicatif` template.
    template: Option<String>,
    /// At least three characters: filled, current and to do.
    progress_chars: Option<String>,
    pub(crate) enabled: bool,
    /// Clear the bar once it is finished.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self::new(None, None, true, true)
    }
}

impl ProgressBarOpts {
    /// Files done out of the queue length.
    ///
    /// `████████████████▌                        7/17 files, eta 00:00:12`
    pub const TEMPLATE_FILES: &'static str =
        "{bar:40.blue} {pos:>}/{len} files, eta {eta_precise:.blue}";
    /// Bytes of one file, in the manner of pip.
    ///
    /// `━━━━━━━━━━━━━━━━━━━━━━━━━╾────────────── 1.20 MiB/1.90 MiB 850 KiB/s eta 1s a.pdf`
    pub const TEMPLATE_PIP: &'static str =
        "{bar:40.green/black} {bytes:>11.green}/{total_bytes:<11.green} {bytes_per_sec:>13.red} eta {eta:.blue} {msg}";
    /// Bytes of one file whose size the server did not announce.
    ///
    /// `⠙ 211.23 KiB 1008.31 KiB/s report.pdf`
    pub const TEMPLATE_SPINNER_BYTES: &'static str =
        "{spinner:.green} {bytes:>11.green} {bytes_per_sec:>13.red} {msg}";
    /// `"█▉▊▋▌▍▎▏  "`
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// `"━╾╴─"`
    pub const CHARS_LINE: &'static str = "━╾╴─";

    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// A bar that is never drawn.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// The pip-like transfer bar, cleared once done.
    pub fn with_pip_style() -> Self {
        Self::new(
            Some(Self::TEMPLATE_PIP.into()),
            Some(Self::CHARS_LINE.into()),
            true,
            true,
        )
    }

    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// A bar of `len` steps. An unusable template falls back to the plain
    /// `indicatif` bar.
    pub fn to_progress_bar(self, len: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let mut style = match self.template {
            Some(ref template) => {
                ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_bar())
            }
            None => ProgressStyle::default_bar(),
        };
        if let Some(ref chars) = self.progress_chars {
            style = style.progress_chars(chars);
        }
        ProgressBar::new(len).with_style(style)
    }

    /// A byte counter without length, for transfers of unknown size.
    ///
    /// The template of these options is not used: a bar cannot be drawn
    /// without a length.
    pub fn to_spinner(self) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::with_template(Self::TEMPLATE_SPINNER_BYTES)
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        ProgressBar::no_length().with_style(style)
    }
}
