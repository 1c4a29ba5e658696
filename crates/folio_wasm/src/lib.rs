//! Browser bindings for the portfolio UI state core.
//!
//! The page script measures the DOM, forwards events to [`api::Portfolio`],
//! and applies the effect objects it gets back.

pub mod api;
pub mod host;
