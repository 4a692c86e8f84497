pub mod report;
pub mod show;

pub use report::{ReportArgs, ReportCommand};
pub use show::{ShowArgs, ShowCommand};

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::ReportConfig;
use crate::context::Context;
use crate::diff::JsonLineDiff;
use crate::plan::{AttributeOptions, PlanParser, PlanReport, ReportBuilder};

/// Resolve a user-supplied path against the working directory
fn resolve_path(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Parse a plan file and diff every attribute of every resource
fn load_report(ctx: &Context, plan_path: &Path, options: AttributeOptions) -> Result<PlanReport> {
    if !ctx.fs.is_file(plan_path) {
        anyhow::bail!("Plan file not found: {}", plan_path.display());
    }

    let plan = PlanParser::new().parse_file(&*ctx.fs, plan_path)?;
    let differ = JsonLineDiff::new();

    Ok(ReportBuilder::new(&differ, options).build(&plan))
}

/// Flags win over config values; a flag that is off defers to config
fn attribute_options(config: &ReportConfig, changed_only: bool, show_sensitive: bool) -> AttributeOptions {
    AttributeOptions {
        show_sensitive: show_sensitive || config.show_sensitive(),
        changed_only: changed_only || config.changed_only(),
    }
}
