//! Download tasks and their outcomes.
//!
//! # Overview
//!
//! - [`download`] - the [`Download`] task: a URL and the file name it is saved under
//! - [`planner`] - turns extracted links into a duplicate-free, collision-free queue
//! - [`summary`] - per-task [`Status`], [`Summary`] and live [`TransferState`]
//! - [`report`] - the [`BatchResult`] tally of a whole batch
//!
//! # Examples
//!
//! ```rust
//! use linkfetch::download::{plan, Status};
//! use reqwest::Url;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let links = vec![Url::parse("https://example.com/a.pdf")?];
//! let queue = plan(&links);
//! println!("{} -> {}", queue[0].url, queue[0].filename);
//! # Ok(())
//! # }
//! ```

pub mod download;
pub mod planner;
pub mod report;
pub mod summary;

pub use download::Download;
pub use planner::plan;
pub use report::BatchResult;
pub use summary::{Status, Summary, TransferState};
