//! Rewrite `px` lengths in stylesheets into `rpx` (or any other unit).
//!
//! ```text
//! h1 { margin: 0 0 20px; font-size: 32px; }
//! h1 { margin: 0 0 40rpx; font-size: 64rpx; }
//! ```
//!
//! Values are scaled by a transform (×2 by default), rounded to
//! `unit_precision` places and written with the configured unit. Properties
//! and selectors can be blacklisted, whole files excluded, `@media` params
//! converted on request, and the original value kept as a fallback in front of
//! the converted one with `replace: false`.

#![forbid(unsafe_code)]

pub mod options;
pub mod plugin;
pub mod prop_list;
pub mod selector_filter;

pub use options::{Exclude, Options, Pattern, Transform};
pub use plugin::{DeclarationEdit, PxToRpx, RunSummary};
pub use prop_list::{PropList, PropListMatcher};
pub use selector_filter::is_blacklisted;
