use crate::config::ConfigLoader;
use crate::context::Context;
use crate::diff::{DiffRenderer, HtmlRenderer, RenderOptions};
use anyhow::{Context as AnyhowContext, Result};
use std::path::{Path, PathBuf};

use super::{attribute_options, load_report, resolve_path};

/// Directory created under the output directory
const REPORT_DIR: &str = "terraform-visual-report";
const REPORT_FILE: &str = "index.html";

/// Arguments of `tf-visual report`
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    pub plan: PathBuf,
    pub out: Option<PathBuf>,
    pub title: Option<String>,
    pub changed_only: bool,
    pub show_sensitive: bool,
}

pub struct ReportCommand;

impl ReportCommand {
    /// Execute the report command in the current directory
    pub fn execute(ctx: &Context, args: &ReportArgs) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Self::execute_in(ctx, args, &cwd)
    }

    /// Build the HTML report, resolving relative paths against `cwd`
    pub fn execute_in(ctx: &Context, args: &ReportArgs, cwd: &Path) -> Result<()> {
        ctx.output.section("Terraform Visual Report");

        let config = ConfigLoader::new(&*ctx.fs).load(cwd)?;

        let plan_path = resolve_path(cwd, &args.plan);
        let out_dir = args
            .out
            .as_deref()
            .or(config.out.as_deref())
            .map(|out| resolve_path(cwd, out))
            .unwrap_or_else(|| cwd.to_path_buf());
        let report_dir = out_dir.join(REPORT_DIR);
        let report_file = report_dir.join(REPORT_FILE);

        ctx.output.key_value("Plan", &plan_path.display().to_string());
        ctx.output.key_value("Output", &report_dir.display().to_string());

        let options = attribute_options(&config, args.changed_only, args.show_sensitive);
        let report = load_report(ctx, &plan_path, options)?;

        let render_options = RenderOptions {
            title: args
                .title
                .clone()
                .unwrap_or_else(|| config.title().to_string()),
            ..RenderOptions::default()
        };
        let html = HtmlRenderer::new().render(&report, &render_options)?;

        // Stale assets from an earlier run would linger next to the new page
        if ctx.fs.exists(&report_dir) {
            ctx.fs.remove_dir_all(&report_dir)?;
        }
        ctx.fs.create_dir_all(&report_dir)?;
        ctx.fs
            .write(&report_file, &html)
            .with_context(|| format!("Failed to write report: {:?}", report_file))?;

        ctx.output.blank();
        if report.summary.has_changes() {
            ctx.output.success(&format!(
                "Report generated for {} resource change(s)",
                report.summary.total_changes()
            ));
        } else {
            ctx.output.success("Report generated");
            ctx.output.warning("The plan contains no changes");
        }
        ctx.output
            .dimmed(&format!("Run 'open {}' to view it", report_file.display()));

        Ok(())
    }
}
