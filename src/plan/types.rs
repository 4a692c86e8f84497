//! Data types for the Terraform/OpenTofu JSON plan
//!
//! This module models the subset of `terraform show -json <planfile>` output
//! needed to build attribute diffs. Unknown fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diff::ColorIntent;

/// Placeholder shown for values that are only known after apply
pub const KNOWN_AFTER_APPLY: &str = "(known after apply)";

/// Placeholder shown for masked sensitive values
pub const SENSITIVE: &str = "(sensitive)";

/// A single action from a resource change's `actions` list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeAction {
    NoOp,
    Create,
    Read,
    Update,
    Delete,
    #[serde(other)]
    Unknown,
}

impl ChangeAction {
    /// Get the label used when listing actions
    pub fn label(&self) -> &'static str {
        match self {
            ChangeAction::NoOp => "no-op",
            ChangeAction::Create => "create",
            ChangeAction::Read => "read",
            ChangeAction::Update => "update",
            ChangeAction::Delete => "delete",
            ChangeAction::Unknown => "unknown",
        }
    }

    /// Colour intent for this action in the actions list
    pub fn color(&self) -> ColorIntent {
        match self {
            ChangeAction::Create => ColorIntent::Affirmative,
            ChangeAction::Update => ColorIntent::Warning,
            ChangeAction::Delete => ColorIntent::Negative,
            ChangeAction::NoOp | ChangeAction::Read | ChangeAction::Unknown => {
                ColorIntent::Neutral
            }
        }
    }
}

/// Classification of a resource mutation derived from its action list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionAlias {
    Create,
    Update,
    Delete,
    /// Create the replacement first, then delete the old object
    CreateDelete,
    /// Delete the old object first, then create the replacement
    DeleteCreate,
    Unknown,
}

impl ActionAlias {
    /// Derive the alias from a plan's action list
    pub fn from_actions(actions: &[ChangeAction]) -> Self {
        match actions {
            [ChangeAction::Create] => ActionAlias::Create,
            [ChangeAction::Update] => ActionAlias::Update,
            [ChangeAction::Delete] => ActionAlias::Delete,
            [ChangeAction::Create, ChangeAction::Delete] => ActionAlias::CreateDelete,
            [ChangeAction::Delete, ChangeAction::Create] => ActionAlias::DeleteCreate,
            _ => ActionAlias::Unknown,
        }
    }

    /// Colour intents for the before and after side of a non-aligned field
    pub fn field_colors(&self) -> (ColorIntent, ColorIntent) {
        match self {
            ActionAlias::Create => (ColorIntent::Affirmative, ColorIntent::Affirmative),
            ActionAlias::Update => (ColorIntent::Warning, ColorIntent::Warning),
            ActionAlias::Delete => (ColorIntent::Negative, ColorIntent::Negative),
            ActionAlias::CreateDelete => (ColorIntent::Affirmative, ColorIntent::Negative),
            ActionAlias::DeleteCreate => (ColorIntent::Negative, ColorIntent::Affirmative),
            ActionAlias::Unknown => (ColorIntent::Warning, ColorIntent::Warning),
        }
    }

    /// Get the symbol used to represent this alias
    pub fn symbol(&self) -> &'static str {
        match self {
            ActionAlias::Create => "+",
            ActionAlias::Update => "~",
            ActionAlias::Delete => "-",
            ActionAlias::CreateDelete => "+/-",
            ActionAlias::DeleteCreate => "-/+",
            ActionAlias::Unknown => " ",
        }
    }
}

/// Textual before/after values of one resource attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeChange {
    /// Top-level attribute name (e.g., "tags", "policy")
    pub field: String,

    pub before: String,

    pub after: String,
}

impl AttributeChange {
    pub fn new(field: &str, before: &str, after: &str) -> Self {
        Self {
            field: field.to_string(),
            before: before.to_string(),
            after: after.to_string(),
        }
    }
}

/// Options controlling how attribute values are extracted from a change
#[derive(Debug, Clone, Default)]
pub struct AttributeOptions {
    /// Show sensitive values instead of masking them
    pub show_sensitive: bool,

    /// Skip attributes whose before and after text are equal
    pub changed_only: bool,
}

/// The `change` object of a resource change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub actions: Vec<ChangeAction>,

    #[serde(default)]
    pub before: Option<Value>,

    #[serde(default)]
    pub after: Option<Value>,

    #[serde(default)]
    pub after_unknown: Option<Value>,

    #[serde(default)]
    pub before_sensitive: Option<Value>,

    #[serde(default)]
    pub after_sensitive: Option<Value>,
}

impl Change {
    /// Get the action alias for this change
    pub fn action_alias(&self) -> ActionAlias {
        ActionAlias::from_actions(&self.actions)
    }

    /// Extract per-attribute before/after text, in before-key order followed
    /// by keys that only exist after the change
    pub fn attribute_changes(&self, options: &AttributeOptions) -> Vec<AttributeChange> {
        let before = self.before.as_ref().and_then(|v| v.as_object());
        let after = self.after.as_ref().and_then(|v| v.as_object());

        let mut fields: Vec<&String> = Vec::new();
        for key in before.into_iter().flat_map(|m| m.keys()) {
            fields.push(key);
        }
        for key in after.into_iter().flat_map(|m| m.keys()) {
            if !fields.contains(&key) {
                fields.push(key);
            }
        }
        // Unknown values are omitted from `after` and only flagged here
        let unknown = self.after_unknown.as_ref().and_then(|v| v.as_object());
        for (key, flag) in unknown.into_iter().flatten() {
            if flag.as_bool() == Some(true) && !fields.contains(&key) {
                fields.push(key);
            }
        }

        let mut changes = Vec::new();

        for field in fields {
            let before_value = before.and_then(|m| m.get(field));
            let after_value = after.and_then(|m| m.get(field));

            let before_text = if !options.show_sensitive && is_marked(&self.before_sensitive, field)
            {
                SENSITIVE.to_string()
            } else if options.show_sensitive {
                value_text(before_value)
            } else {
                let masked = mask_field(before_value, &self.before_sensitive, field, SENSITIVE, false);
                value_text(masked.as_ref())
            };

            let after_text = if is_marked(&self.after_unknown, field) {
                KNOWN_AFTER_APPLY.to_string()
            } else if !options.show_sensitive && is_marked(&self.after_sensitive, field) {
                SENSITIVE.to_string()
            } else {
                let mut masked =
                    mask_field(after_value, &self.after_unknown, field, KNOWN_AFTER_APPLY, true);
                if !options.show_sensitive {
                    masked =
                        mask_field(masked.as_ref(), &self.after_sensitive, field, SENSITIVE, false);
                }
                value_text(masked.as_ref())
            };

            if options.changed_only && before_text == after_text {
                continue;
            }

            changes.push(AttributeChange {
                field: field.clone(),
                before: before_text,
                after: after_text,
            });
        }

        changes
    }
}

/// Check whether a marker object (`after_unknown`, `*_sensitive`) flags a
/// whole attribute with a plain `true`
fn is_marked(markers: &Option<Value>, field: &str) -> bool {
    markers
        .as_ref()
        .and_then(|m| m.get(field))
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Apply the nested markers of one attribute to its value
fn mask_field(
    value: Option<&Value>,
    markers: &Option<Value>,
    field: &str,
    placeholder: &str,
    fill_missing: bool,
) -> Option<Value> {
    match markers.as_ref().and_then(|m| m.get(field)) {
        Some(marker) => apply_markers(value, marker, placeholder, fill_missing),
        None => value.cloned(),
    }
}

/// Replace every part of `value` flagged `true` in `marker` with `placeholder`.
///
/// Terraform marks part of a value with a marker tree mirroring its shape.
/// Unknown values are left out of `after` entirely, so with `fill_missing`
/// flagged keys and trailing elements that are absent get the placeholder too.
fn apply_markers(
    value: Option<&Value>,
    marker: &Value,
    placeholder: &str,
    fill_missing: bool,
) -> Option<Value> {
    match (marker, value) {
        (Value::Bool(true), Some(_)) => Some(Value::String(placeholder.to_string())),
        (Value::Bool(true), None) if fill_missing => Some(Value::String(placeholder.to_string())),
        (Value::Object(marks), Some(Value::Object(map))) => {
            let mut map = map.clone();
            for (key, mark) in marks {
                if let Some(masked) = apply_markers(map.get(key), mark, placeholder, fill_missing) {
                    map.insert(key.clone(), masked);
                }
            }
            Some(Value::Object(map))
        }
        (Value::Array(marks), Some(Value::Array(items))) => {
            let mut items = items.clone();
            for (i, mark) in marks.iter().enumerate() {
                if i < items.len() {
                    if let Some(masked) = apply_markers(Some(&items[i]), mark, placeholder, fill_missing)
                    {
                        items[i] = masked;
                    }
                } else if fill_missing {
                    items.push(apply_markers(None, mark, placeholder, fill_missing).unwrap_or(Value::Null));
                }
            }
            Some(Value::Array(items))
        }
        _ => value.cloned(),
    }
}

/// Convert an attribute value into the text handed to the classifier.
///
/// A string holding a JSON object or array (an IAM policy, a container
/// definition) is passed through raw so it diffs structurally. Every other
/// string keeps its quotes, so `"80"` and `80` stay distinct.
fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) if is_embedded_json(s) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn is_embedded_json(s: &str) -> bool {
    matches!(
        serde_json::from_str::<Value>(s),
        Ok(Value::Object(_)) | Ok(Value::Array(_))
    )
}

/// One entry of the plan's `resource_changes` list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResourceChange {
    /// Full resource address (e.g., "aws_instance.example", "module.vpc.aws_subnet.main")
    pub address: String,

    #[serde(default)]
    pub mode: Option<String>,

    #[serde(rename = "type", default)]
    pub resource_type: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub provider_name: Option<String>,

    #[serde(default)]
    pub change: Change,
}

/// Top-level JSON plan document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerraformPlan {
    #[serde(default)]
    pub format_version: Option<String>,

    #[serde(default)]
    pub terraform_version: Option<String>,

    #[serde(default)]
    pub resource_changes: Vec<PlanResourceChange>,
}

impl TerraformPlan {
    /// Compute summary statistics over all resource changes
    pub fn summary(&self) -> PlanSummary {
        let mut summary = PlanSummary::default();
        for resource in &self.resource_changes {
            summary.record(resource.change.action_alias());
        }
        summary
    }
}

/// Summary statistics for the plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Number of resources to add
    pub to_add: usize,

    /// Number of resources to change
    pub to_change: usize,

    /// Number of resources to destroy
    pub to_destroy: usize,

    /// Number of resources to replace
    pub to_replace: usize,

    /// Number of unchanged (or read-only) resources
    pub unchanged: usize,
}

impl PlanSummary {
    /// Count one resource with the given alias
    pub fn record(&mut self, alias: ActionAlias) {
        match alias {
            ActionAlias::Create => self.to_add += 1,
            ActionAlias::Update => self.to_change += 1,
            ActionAlias::Delete => self.to_destroy += 1,
            ActionAlias::CreateDelete | ActionAlias::DeleteCreate => self.to_replace += 1,
            ActionAlias::Unknown => self.unchanged += 1,
        }
    }

    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.total_changes() > 0
    }

    /// Get total number of changes
    pub fn total_changes(&self) -> usize {
        self.to_add + self.to_change + self.to_destroy + self.to_replace
    }
}
