//! Terraform/OpenTofu plan model
//!
//! Parses JSON plans and assembles per-resource attribute diffs.

mod error;
mod parser;
mod report;
mod types;

pub use parser::PlanParser;
pub use report::{PlanReport, ReportBuilder, ResourceReport};
pub use types::{ActionAlias, AttributeChange, AttributeOptions, PlanSummary};
