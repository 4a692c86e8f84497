//! Attribute diff visualization module
//!
//! This module turns the before/after text of a resource attribute into
//! side-by-side display rows, and renders whole plan reports.
//!
//! # Pipeline
//!
//! - **Classification**: identical text, JSON on both sides, or mixed
//! - **Structural diff**: full line diff of two JSON values
//! - **Row building**: bracket repair and index-for-index pairing of
//!   removal/addition runs
//! - **Rendering**: terminal (ASCII/ANSI) and single-file HTML output
//!
//! # Example
//!
//! ```ignore
//! use crate::diff::{diff_attribute, JsonLineDiff};
//! use crate::plan::{ActionAlias, AttributeChange};
//!
//! let change = AttributeChange::new("policy", r#"{"a":1}"#, r#"{"a":2}"#);
//! let diff = diff_attribute(&change, ActionAlias::Update, &JsonLineDiff::new());
//! ```

mod attribute;
mod classifier;
mod renderer;
mod rows;
mod structural;
mod types;

pub use attribute::diff_attribute;
pub use renderer::{AsciiRenderer, DiffRenderer, HtmlRenderer, RenderOptions};
pub use structural::{JsonLineDiff, StructuralDiff};
pub use types::{AttributeDiff, AttributeView, ColorIntent, DisplayRow};
