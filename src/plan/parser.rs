//! Parser for Terraform/OpenTofu JSON plans
//!
//! Accepts the output of `terraform show -json <planfile>` (or the
//! `tofu` equivalent) and deserializes the parts needed for the report.

use serde_json::Value;
use std::path::Path;

use super::error::{PlanError, PlanResult};
use super::types::TerraformPlan;
use crate::traits::FileSystem;

/// Parser for JSON plan documents
pub struct PlanParser;

impl Default for PlanParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse plan JSON text
    pub fn parse(&self, content: &str) -> PlanResult<TerraformPlan> {
        // Windows checkouts may carry CRLF line endings
        let content = content.replace("\r\n", "\n");

        let document: Value = serde_json::from_str(&content)?;

        let object = document
            .as_object()
            .ok_or_else(|| PlanError::InvalidFormat("expected a JSON object".to_string()))?;

        // State documents also carry `format_version`; only plans have these
        if !object.contains_key("resource_changes") && !object.contains_key("planned_values") {
            return Err(PlanError::InvalidFormat(
                "missing 'resource_changes' and 'planned_values'".to_string(),
            ));
        }

        let plan: TerraformPlan = serde_json::from_value(document)?;
        Ok(plan)
    }

    /// Read and parse a plan file
    pub fn parse_file(&self, fs: &dyn FileSystem, path: &Path) -> anyhow::Result<TerraformPlan> {
        let content = fs.read_to_string(path)?;
        let plan = self.parse(&content)?;
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::types::{ActionAlias, ChangeAction};
    use crate::traits::MockFileSystem;

    const SAMPLE_PLAN: &str = r#"{
        "format_version": "1.2",
        "terraform_version": "1.7.5",
        "resource_changes": [
            {
                "address": "aws_instance.web",
                "mode": "managed",
                "type": "aws_instance",
                "name": "web",
                "provider_name": "registry.terraform.io/hashicorp/aws",
                "change": {
                    "actions": ["update"],
                    "before": {"instance_type": "t2.micro"},
                    "after": {"instance_type": "t3.micro"},
                    "after_unknown": {}
                }
            },
            {
                "address": "aws_s3_bucket.logs",
                "type": "aws_s3_bucket",
                "name": "logs",
                "change": {
                    "actions": ["delete", "create"],
                    "before": {"bucket": "old"},
                    "after": {"bucket": "new"}
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_plan() {
        let parser = PlanParser::new();
        let plan = parser.parse(SAMPLE_PLAN).unwrap();

        assert_eq!(plan.terraform_version.as_deref(), Some("1.7.5"));
        assert_eq!(plan.resource_changes.len(), 2);

        let web = &plan.resource_changes[0];
        assert_eq!(web.address, "aws_instance.web");
        assert_eq!(web.resource_type, "aws_instance");
        assert_eq!(web.change.actions, vec![ChangeAction::Update]);
        assert_eq!(web.change.action_alias(), ActionAlias::Update);

        let logs = &plan.resource_changes[1];
        assert_eq!(logs.change.action_alias(), ActionAlias::DeleteCreate);
        assert!(logs.provider_name.is_none());
    }

    #[test]
    fn test_parse_summary() {
        let plan = PlanParser::new().parse(SAMPLE_PLAN).unwrap();
        let summary = plan.summary();

        assert_eq!(summary.to_change, 1);
        assert_eq!(summary.to_replace, 1);
        assert_eq!(summary.total_changes(), 2);
    }

    #[test]
    fn test_parse_crlf() {
        let content = SAMPLE_PLAN.replace('\n', "\r\n");
        let plan = PlanParser::new().parse(&content).unwrap();
        assert_eq!(plan.resource_changes.len(), 2);
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = PlanParser::new().parse("not json").unwrap_err();
        assert!(matches!(err, PlanError::Parse(_)));
    }

    #[test]
    fn test_parse_not_a_plan() {
        let err = PlanParser::new().parse("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, PlanError::InvalidFormat(_)));

        let err = PlanParser::new().parse(r#"{"version": 4}"#).unwrap_err();
        assert!(matches!(err, PlanError::InvalidFormat(_)));
        assert!(err.to_string().contains("resource_changes"));
    }

    #[test]
    fn test_parse_rejects_state_document() {
        let state = r#"{
            "format_version": "1.0",
            "terraform_version": "1.9.5",
            "values": {"root_module": {"resources": []}}
        }"#;

        let err = PlanParser::new().parse(state).unwrap_err();
        assert!(matches!(err, PlanError::InvalidFormat(_)));
    }

    #[test]
    fn test_parse_plan_without_changes() {
        let plan = PlanParser::new()
            .parse(r#"{"format_version": "1.2", "planned_values": {"root_module": {}}}"#)
            .unwrap();
        assert!(plan.resource_changes.is_empty());
        assert!(!plan.summary().has_changes());
    }

    #[test]
    fn test_parse_file() {
        let fs = MockFileSystem::new();
        let path = Path::new("/work/plan.json");
        fs.write(path, SAMPLE_PLAN).unwrap();

        let plan = PlanParser::new().parse_file(&fs, path).unwrap();
        assert_eq!(plan.resource_changes.len(), 2);

        assert!(PlanParser::new()
            .parse_file(&fs, Path::new("/work/missing.json"))
            .is_err());
    }
}
