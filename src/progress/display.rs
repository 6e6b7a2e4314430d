//! Bars drawn while a batch runs.
//!
//! A [`ProgressDisplay`] lives as long as its batch. The files bar advances
//! once per finished task, whatever its outcome; each transfer gets its own
//! bar, shown below it and removed (or frozen) when the file is done.

use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};

pub struct ProgressDisplay {
    multi: MultiProgress,
    /// Hidden and detached when there is nothing to count.
    files_bar: ProgressBar,
    files_bar_shown: bool,
    style_options: StyleOptions,
}

impl ProgressDisplay {
    /// Sets up the bars of a batch of `queue_len` tasks.
    ///
    /// With `single_file_progress`, a batch of one file shows its transfer
    /// bar only.
    pub fn new(style_options: StyleOptions, queue_len: usize, single_file_progress: bool) -> Self {
        let multi = if style_options.is_enabled() {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };

        let files_bar_shown = queue_len > 1 || !single_file_progress;
        let files_bar = if files_bar_shown {
            let bar = multi.add(
                style_options
                    .files()
                    .clone()
                    .to_progress_bar(queue_len as u64),
            );
            bar.tick();
            bar
        } else {
            ProgressBar::hidden()
        };

        Self {
            multi,
            files_bar,
            files_bar_shown,
            style_options,
        }
    }

    /// Adds the bar of a transfer that starts with `position` bytes already
    /// on disk. `size` is the announced total, if any: without it the bar
    /// only counts bytes.
    pub fn start_transfer(&self, size: Option<u64>, position: u64, label: &str) -> ProgressBar {
        let opts = self.style_options.transfer().clone();
        let bar = match size {
            Some(size) => opts.to_progress_bar(size),
            None => opts.to_spinner(),
        };
        bar.set_message(label.to_string());
        self.multi.add(bar.with_position(position))
    }

    pub fn end_transfer(&self, bar: ProgressBar) {
        if self.style_options.transfer().clear {
            bar.finish_and_clear();
        } else {
            bar.finish();
        }
    }

    /// Records one more finished task.
    pub fn file_done(&self) {
        self.files_bar.inc(1);
    }

    pub fn finish(self) {
        if !self.files_bar_shown {
            return;
        }
        if self.style_options.files().clear {
            self.files_bar.finish_and_clear();
        } else {
            self.files_bar.finish();
        }
    }
}
