//! Plan report assembly
//!
//! Walks the resource changes of a plan and diffs every attribute.

use serde::{Deserialize, Serialize};

use super::types::{ActionAlias, AttributeOptions, ChangeAction, PlanSummary, TerraformPlan};
use crate::diff::{AttributeDiff, StructuralDiff, diff_attribute};

/// One resource with its attribute diffs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceReport {
    pub address: String,
    pub actions: Vec<ChangeAction>,
    pub action_alias: ActionAlias,
    pub attributes: Vec<AttributeDiff>,
}

/// A whole plan ready for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    pub terraform_version: Option<String>,
    pub summary: PlanSummary,
    pub resources: Vec<ResourceReport>,
}

impl PlanReport {
    /// Find a resource by its full address
    pub fn resource(&self, address: &str) -> Option<&ResourceReport> {
        self.resources.iter().find(|r| r.address == address)
    }
}

/// Builds plan reports using a structural diff implementation
pub struct ReportBuilder<'a> {
    differ: &'a dyn StructuralDiff,
    options: AttributeOptions,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(differ: &'a dyn StructuralDiff, options: AttributeOptions) -> Self {
        Self { differ, options }
    }

    /// Diff every attribute of every resource change
    pub fn build(&self, plan: &TerraformPlan) -> PlanReport {
        let resources = plan
            .resource_changes
            .iter()
            .map(|resource| {
                let alias = resource.change.action_alias();
                let attributes = resource
                    .change
                    .attribute_changes(&self.options)
                    .iter()
                    .map(|change| diff_attribute(change, alias, self.differ))
                    .collect();

                ResourceReport {
                    address: resource.address.clone(),
                    actions: resource.change.actions.clone(),
                    action_alias: alias,
                    attributes,
                }
            })
            .collect();

        PlanReport {
            terraform_version: plan.terraform_version.clone(),
            summary: plan.summary(),
            resources,
        }
    }
}
