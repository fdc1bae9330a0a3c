//! CSS Values and Units Module Level 3 — pixel lengths and their conversion.
//! See <https://www.w3.org/TR/css-values-3/>

#![forbid(unsafe_code)]

// Per-chapter modules mirroring the css-values table of contents.
pub mod chapter_4_numbers;
pub mod chapter_6_dimensions;
pub mod conversion;

// Re-exports for ergonomic access from other crates.
pub use chapter_4_numbers::{round_to_precision, serialize_number};
pub use chapter_6_dimensions::{PxToken, contains_px, replace_px_tokens};
pub use conversion::PxFormatter;
