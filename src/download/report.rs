//! The tally of a whole batch.

use super::summary::{Status, Summary};

use reqwest::Url;

/// Outcomes of every task of a batch, in queue order.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    summaries: Vec<Summary>,
}

impl BatchResult {
    /// An empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the outcome of the task that just finished.
    pub(crate) fn push(&mut self, summary: Summary) {
        self.summaries.push(summary);
    }

    /// All outcomes, in queue order.
    pub fn summaries(&self) -> &[Summary] {
        &self.summaries
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// Whether the batch had no task at all.
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Files downloaded during this run.
    pub fn succeeded(&self) -> usize {
        self.summaries.iter().filter(|s| s.is_success()).count()
    }

    /// Files that were already complete on disk.
    pub fn skipped(&self) -> usize {
        self.summaries.iter().filter(|s| s.is_skipped()).count()
    }

    /// Files that could not be downloaded.
    pub fn failed(&self) -> usize {
        self.summaries.iter().filter(|s| s.is_failed()).count()
    }

    /// Failed URLs with their reason.
    pub fn failures(&self) -> impl Iterator<Item = (&Url, &str)> {
        self.summaries.iter().filter_map(|s| match s.status() {
            Status::Fail(reason) => Some((&s.download().url, reason.as_str())),
            _ => None,
        })
    }

    /// Total bytes received over the network during this run.
    pub fn bytes_transferred(&self) -> u64 {
        self.summaries.iter().map(Summary::transferred).sum()
    }

    /// Consumes the result, returning the outcomes.
    pub fn into_summaries(self) -> Vec<Summary> {
        self.summaries
    }
}

impl IntoIterator for BatchResult {
    type Item = Summary;
    type IntoIter = std::vec::IntoIter<Summary>;

    fn into_iter(self) -> Self::IntoIter {
        self.summaries.into_iter()
    }
}
