//! URL handling module for Word-Ripple
//!
//! This module provides the ignore-pattern matching applied to every URL before
//! it is claimed, and the link resolution applied to every href found on a page.

mod matcher;
mod resolve;

pub use matcher::IgnoreMatcher;
pub use resolve::resolve_link;
