//! Renderers for plan reports
//!
//! This module provides ASCII (terminal) and HTML renderers that lay out
//! attribute diffs side by side in a color-coded manner.

use anyhow::{Context, Result};
use handlebars::Handlebars;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::types::{AttributeDiff, AttributeView, ColorIntent, DisplayRow};
use crate::plan::{ActionAlias, PlanReport, PlanSummary, ResourceReport};

const REPORT_TEMPLATE: &str = include_str!("templates/report.html.hbs");

/// Narrowest column the ASCII renderer will lay out
const MIN_COLUMN_WIDTH: usize = 20;

/// Trait for plan report renderers
pub trait DiffRenderer {
    /// Render the report to a string
    fn render(&self, report: &PlanReport, options: &RenderOptions) -> Result<String>;
}

/// Options for report rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Total terminal width for side-by-side columns (ASCII only)
    pub width: usize,

    /// Emit ANSI colors (ASCII only)
    pub color: bool,

    /// Page title (HTML only)
    pub title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 120,
            color: true,
            title: "Terraform Visual Report".to_string(),
        }
    }
}

/// ASCII renderer for terminal output
pub struct AsciiRenderer;

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render summary section
    fn render_summary(&self, summary: &PlanSummary) -> String {
        let mut output = String::new();

        output.push_str("Plan Summary:\n");

        let mut parts = Vec::new();

        if summary.to_add > 0 {
            parts.push(format!("+{} to add", summary.to_add));
        }

        if summary.to_change > 0 {
            parts.push(format!("~{} to change", summary.to_change));
        }

        if summary.to_replace > 0 {
            parts.push(format!("±{} to replace", summary.to_replace));
        }

        if summary.to_destroy > 0 {
            parts.push(format!("-{} to destroy", summary.to_destroy));
        }

        if parts.is_empty() {
            output.push_str("  No changes.\n");
        } else {
            output.push_str(&format!("  {}\n", parts.join(", ")));
        }

        output.push('\n');
        output
    }

    /// Render a single resource with all of its attributes
    pub fn render_resource(&self, resource: &ResourceReport, options: &RenderOptions) -> String {
        let mut output = String::new();

        let actions = resource
            .actions
            .iter()
            .map(|action| paint(action.label(), action.color(), options.color))
            .collect::<Vec<_>>()
            .join(", ");

        output.push_str(&format!(
            "{} {} [{}]\n",
            resource.action_alias.symbol(),
            resource.address,
            actions
        ));

        for attr in &resource.attributes {
            output.push_str(&self.render_attribute(attr, options));
        }

        output.push('\n');
        output
    }

    /// Render a single attribute
    fn render_attribute(&self, attr: &AttributeDiff, options: &RenderOptions) -> String {
        let mut output = format!("  {}\n", attr.field);
        let column = column_width(options.width);

        match &attr.view {
            AttributeView::Rows(rows) => {
                for row in rows {
                    output.push_str(&self.render_row(row, column, options.color));
                }
            }
            AttributeView::Blocks { before, after } => {
                output.push_str(&self.render_blocks(
                    before,
                    after,
                    attr.action_alias,
                    column,
                    options.color,
                ));
            }
        }

        output
    }

    fn render_row(&self, row: &DisplayRow, column: usize, color: bool) -> String {
        match row {
            DisplayRow::Identical(text) => text
                .lines()
                .map(|line| format!("    {}\n", truncate_str(line, column * 2 + 3)))
                .collect(),
            DisplayRow::Context(text) => {
                let cell = pad(text, column);
                format!(
                    "    {}   {}\n",
                    paint(&cell, ColorIntent::Warning, color),
                    paint(&truncate_str(text, column), ColorIntent::Warning, color)
                )
            }
            DisplayRow::Paired { before, after } => {
                let before = pad(before.as_deref().unwrap_or(" "), column);
                let after = truncate_str(after.as_deref().unwrap_or(" "), column);
                let line = format!(
                    "    {} → {}",
                    paint(&before, ColorIntent::Negative, color),
                    paint(&after, ColorIntent::Affirmative, color)
                );
                format!("{}\n", line.trim_end())
            }
        }
    }

    /// Lay two pretty-printed blocks next to each other
    fn render_blocks(
        &self,
        before: &str,
        after: &str,
        alias: ActionAlias,
        column: usize,
        color: bool,
    ) -> String {
        let (before_color, after_color) = alias.field_colors();
        let before_lines: Vec<&str> = before.lines().collect();
        let after_lines: Vec<&str> = after.lines().collect();
        let total = before_lines.len().max(after_lines.len());

        let mut output = String::new();
        for i in 0..total {
            let left = pad(before_lines.get(i).copied().unwrap_or(""), column);
            let right = truncate_str(after_lines.get(i).copied().unwrap_or(""), column);
            let arrow = if i == 0 { "→" } else { " " };

            let line = format!(
                "    {} {} {}",
                paint(&left, before_color, color),
                arrow,
                paint(&right, after_color, color)
            );
            output.push_str(line.trim_end());
            output.push('\n');
        }

        output
    }
}

impl DiffRenderer for AsciiRenderer {
    fn render(&self, report: &PlanReport, options: &RenderOptions) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.render_summary(&report.summary));

        for resource in &report.resources {
            output.push_str(&self.render_resource(resource, options));
        }

        Ok(output)
    }
}

/// HTML renderer producing a single self-contained page
pub struct HtmlRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            handlebars: Handlebars::new(),
        }
    }
}

impl DiffRenderer for HtmlRenderer {
    fn render(&self, report: &PlanReport, options: &RenderOptions) -> Result<String> {
        let page = PageView::new(report, options);

        self.handlebars
            .render_template(REPORT_TEMPLATE, &page)
            .context("Failed to render HTML report")
    }
}

#[derive(Serialize)]
struct PageView {
    title: String,
    generated_at: String,
    terraform_version: String,
    summary: Vec<SummaryItemView>,
    has_changes: bool,
    resources: Vec<ResourceView>,
}

#[derive(Serialize)]
struct SummaryItemView {
    label: String,
    class: &'static str,
}

#[derive(Serialize)]
struct ResourceView {
    address: String,
    symbol: &'static str,
    actions: Vec<ActionView>,
    attributes: Vec<AttributeHtmlView>,
}

#[derive(Serialize)]
struct ActionView {
    label: &'static str,
    class: &'static str,
    last: bool,
}

#[derive(Serialize)]
struct AttributeHtmlView {
    field: String,
    is_blocks: bool,
    before: String,
    after: String,
    before_class: &'static str,
    after_class: &'static str,
    rows: Vec<RowView>,
}

#[derive(Serialize)]
struct RowView {
    is_identical: bool,
    is_context: bool,
    is_paired: bool,
    before: String,
    after: String,
}

impl PageView {
    fn new(report: &PlanReport, options: &RenderOptions) -> Self {
        let summary = &report.summary;
        let mut items = Vec::new();

        if summary.to_add > 0 {
            items.push(SummaryItemView {
                label: format!("+{} to add", summary.to_add),
                class: ColorIntent::Affirmative.css_class(),
            });
        }
        if summary.to_change > 0 {
            items.push(SummaryItemView {
                label: format!("~{} to change", summary.to_change),
                class: ColorIntent::Warning.css_class(),
            });
        }
        if summary.to_replace > 0 {
            items.push(SummaryItemView {
                label: format!("±{} to replace", summary.to_replace),
                class: "color-lavender",
            });
        }
        if summary.to_destroy > 0 {
            items.push(SummaryItemView {
                label: format!("-{} to destroy", summary.to_destroy),
                class: ColorIntent::Negative.css_class(),
            });
        }

        Self {
            title: options.title.clone(),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            terraform_version: report
                .terraform_version
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            summary: items,
            has_changes: summary.has_changes(),
            resources: report.resources.iter().map(ResourceView::new).collect(),
        }
    }
}

impl ResourceView {
    fn new(resource: &ResourceReport) -> Self {
        let count = resource.actions.len();

        Self {
            address: resource.address.clone(),
            symbol: resource.action_alias.symbol(),
            actions: resource
                .actions
                .iter()
                .enumerate()
                .map(|(i, action)| ActionView {
                    label: action.label(),
                    class: action.color().css_class(),
                    last: i + 1 == count,
                })
                .collect(),
            attributes: resource.attributes.iter().map(AttributeHtmlView::new).collect(),
        }
    }
}

impl AttributeHtmlView {
    fn new(attr: &AttributeDiff) -> Self {
        let (before_color, after_color) = attr.action_alias.field_colors();

        match &attr.view {
            AttributeView::Blocks { before, after } => Self {
                field: attr.field.clone(),
                is_blocks: true,
                before: before.clone(),
                after: after.clone(),
                before_class: before_color.css_class(),
                after_class: after_color.css_class(),
                rows: Vec::new(),
            },
            AttributeView::Rows(rows) => Self {
                field: attr.field.clone(),
                is_blocks: false,
                before: String::new(),
                after: String::new(),
                before_class: "",
                after_class: "",
                rows: rows.iter().map(RowView::new).collect(),
            },
        }
    }
}

impl RowView {
    fn new(row: &DisplayRow) -> Self {
        match row {
            DisplayRow::Identical(text) => Self {
                is_identical: true,
                is_context: false,
                is_paired: false,
                before: text.clone(),
                after: String::new(),
            },
            DisplayRow::Context(text) => Self {
                is_identical: false,
                is_context: true,
                is_paired: false,
                before: text.clone(),
                after: text.clone(),
            },
            DisplayRow::Paired { before, after } => Self {
                is_identical: false,
                is_context: false,
                is_paired: true,
                before: before.clone().unwrap_or_else(|| " ".to_string()),
                after: after.clone().unwrap_or_else(|| " ".to_string()),
            },
        }
    }
}

/// Width of one side-by-side column for a total width
fn column_width(total: usize) -> usize {
    // 4 spaces of indent plus " → " between the columns
    (total.saturating_sub(7) / 2).max(MIN_COLUMN_WIDTH)
}

/// Truncate then left-align a cell to exactly `width` characters
fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", truncate_str(s, width), width = width)
}

/// Apply a color intent when coloring is enabled
fn paint(text: &str, intent: ColorIntent, color: bool) -> String {
    if !color || intent == ColorIntent::Neutral {
        return text.to_string();
    }

    let (r, g, b) = intent.rgb();
    text.truecolor(r, g, b).to_string()
}

/// Helper function to truncate a string to a maximum number of characters
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::JsonLineDiff;
    use crate::plan::{AttributeOptions, PlanParser, ReportBuilder};

    const PLAN: &str = r#"{
        "format_version": "1.2",
        "terraform_version": "1.7.0",
        "resource_changes": [
            {
                "address": "aws_security_group.web",
                "type": "aws_security_group",
                "name": "web",
                "change": {
                    "actions": ["update"],
                    "before": {"name": "web", "ingress": [{"from_port": 80}], "arn": "arn:aws:ec2:sg-1"},
                    "after": {"name": "web", "ingress": [{"from_port": 443}]},
                    "after_unknown": {"arn": true}
                }
            },
            {
                "address": "aws_instance.old",
                "type": "aws_instance",
                "name": "old",
                "change": {
                    "actions": ["delete"],
                    "before": {"ami": "ami-<old>"},
                    "after": null
                }
            }
        ]
    }"#;

    fn sample_report() -> PlanReport {
        let plan = PlanParser::new().parse(PLAN).unwrap();
        ReportBuilder::new(&JsonLineDiff::new(), AttributeOptions::default()).build(&plan)
    }

    fn plain() -> RenderOptions {
        RenderOptions {
            width: 80,
            color: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_ascii_renderer_summary() {
        let output = AsciiRenderer::new().render(&sample_report(), &plain()).unwrap();

        assert!(output.contains("Plan Summary:"));
        assert!(output.contains("~1 to change"));
        assert!(output.contains("-1 to destroy"));
    }

    #[test]
    fn test_ascii_renderer_resources() {
        let output = AsciiRenderer::new().render(&sample_report(), &plain()).unwrap();

        assert!(output.contains("~ aws_security_group.web [update]"));
        assert!(output.contains("- aws_instance.old [delete]"));
        assert!(output.contains("  ingress\n"));
    }

    #[test]
    fn test_ascii_paired_row() {
        let output = AsciiRenderer::new().render(&sample_report(), &plain()).unwrap();

        let paired = output
            .lines()
            .find(|line| line.contains("\"from_port\": 80"))
            .unwrap();
        assert!(paired.contains('→'));
        assert!(paired.contains("\"from_port\": 443"));
    }

    #[test]
    fn test_ascii_scalar_change() {
        let output = AsciiRenderer::new().render(&sample_report(), &plain()).unwrap();
        assert!(output.lines().any(|l| l.contains("\"ami-<old>\"") && l.ends_with("→ null")));
    }

    #[test]
    fn test_ascii_blocks() {
        let output = AsciiRenderer::new().render(&sample_report(), &plain()).unwrap();
        assert!(output.lines().any(|l| {
            l.contains("\"arn:aws:ec2:sg-1\"") && l.ends_with("→ \"(known after apply)\"")
        }));
    }

    #[test]
    fn test_ascii_colors() {
        let options = RenderOptions {
            color: true,
            ..plain()
        };
        let output = AsciiRenderer::new().render(&sample_report(), &options).unwrap();
        assert!(output.contains("\u{1b}["));

        let output = AsciiRenderer::new().render(&sample_report(), &plain()).unwrap();
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_html_renderer_structure() {
        let output = HtmlRenderer::new().render(&sample_report(), &plain()).unwrap();

        assert!(output.contains("<!DOCTYPE html>"));
        assert!(output.contains("<title>Terraform Visual Report</title>"));
        assert!(output.contains("aws_security_group.web"));
        assert!(output.contains("class=\"line\""));
        assert!(output.contains("color-red"));
        assert!(output.contains("color-green"));
    }

    #[test]
    fn test_html_escapes_values() {
        let output = HtmlRenderer::new().render(&sample_report(), &plain()).unwrap();

        assert!(output.contains("ami-&lt;old&gt;"));
        assert!(!output.contains("ami-<old>"));
    }

    #[test]
    fn test_no_changes_summary() {
        let report = PlanReport {
            terraform_version: None,
            summary: PlanSummary::default(),
            resources: Vec::new(),
        };

        let ascii = AsciiRenderer::new().render(&report, &plain()).unwrap();
        assert!(ascii.contains("No changes."));

        let html = HtmlRenderer::new().render(&report, &plain()).unwrap();
        assert!(html.contains("No changes"));
        assert!(html.contains("unknown"));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("this is a long string", 10), "this is...");
        assert_eq!(truncate_str("ab", 5), "ab");
        assert_eq!(truncate_str("ééééé", 4), "é...");
    }

    #[test]
    fn test_column_width() {
        assert_eq!(column_width(107), 50);
        assert_eq!(column_width(10), MIN_COLUMN_WIDTH);
    }
}
