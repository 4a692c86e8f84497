use crate::config::{ConfigLoader, resolve_width};
use crate::context::Context;
use crate::diff::{AsciiRenderer, DiffRenderer, RenderOptions};
use anyhow::{Context as AnyhowContext, Result};
use std::path::{Path, PathBuf};

use super::{attribute_options, load_report, resolve_path};

/// Arguments of `tf-visual show`
#[derive(Debug, Clone, Default)]
pub struct ShowArgs {
    pub plan: PathBuf,
    pub resource: Option<String>,
    pub width: Option<usize>,
    pub no_color: bool,
    pub changed_only: bool,
    pub show_sensitive: bool,
}

pub struct ShowCommand;

impl ShowCommand {
    /// Execute the show command in the current directory
    pub fn execute(ctx: &Context, args: &ShowArgs) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Self::execute_in(ctx, args, &cwd)
    }

    /// Print the side-by-side diff, resolving relative paths against `cwd`
    pub fn execute_in(ctx: &Context, args: &ShowArgs, cwd: &Path) -> Result<()> {
        let config = ConfigLoader::new(&*ctx.fs).load(cwd)?;

        let plan_path = resolve_path(cwd, &args.plan);
        let options = attribute_options(&config, args.changed_only, args.show_sensitive);
        let report = load_report(ctx, &plan_path, options)?;

        let render_options = RenderOptions {
            width: resolve_width(args.width.or(config.width)),
            color: !args.no_color && config.color(),
            title: config.title().to_string(),
        };
        let renderer = AsciiRenderer::new();

        if report.resources.is_empty() {
            ctx.output.info("The plan contains no resource changes");
            return Ok(());
        }

        let text = match args.resource.as_deref() {
            Some(address) => {
                let resource = report
                    .resource(address)
                    .with_context(|| format!("Resource not found in plan: {}", address))?;
                renderer.render_resource(resource, &render_options)
            }
            None => renderer.render(&report, &render_options)?,
        };

        ctx.output.raw(&text);

        Ok(())
    }
}
