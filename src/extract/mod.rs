//! Link extraction.
//!
//! Turns HTML text and a base URL into the ordered, duplicate-free list of
//! absolute URLs whose path ends with a requested extension.
//!
//! - `extension` - the opaque, case-normalized [`Extension`] token
//! - `links` - the document walk and URL resolution

pub mod extension;
pub mod links;

pub use extension::Extension;
pub use links::extract_links;
