//! Shared utility functions.
//!
//! - [`content_length`] - sizes and ranges read from HTTP response headers

pub mod content_length;

pub use content_length::{
    header_content_length, header_content_range, parse_content_range,
    parse_content_range_total, remote_total, ContentRange,
};
