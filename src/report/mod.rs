//! Report renderers for analysis results.
//!
//! - [`terminal`] — colored summary box and verdict table; respects `--verbose` / `--quiet`.
//! - [`json`] — pretty-printed verdict list for machine consumers.

pub mod json;
pub mod terminal;
