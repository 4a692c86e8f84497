mod commands;
mod config;
mod context;
mod diff;
mod output;
mod plan;
mod traits;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ReportArgs, ReportCommand, ShowArgs, ShowCommand};
use context::Context;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tf-visual")]
#[command(about = "Side-by-side visual diffs for Terraform and OpenTofu plans", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a static HTML report from a JSON plan
    Report {
        /// Path to the JSON plan (`terraform show -json plan.out > plan.json`)
        #[arg(short, long)]
        plan: PathBuf,

        /// Directory in which terraform-visual-report/ is created (defaults to current directory)
        #[arg(short, long, env = "TF_VISUAL_OUT")]
        out: Option<PathBuf>,

        /// Page title
        #[arg(short, long)]
        title: Option<String>,

        /// Only include attributes whose value changes
        #[arg(long)]
        changed_only: bool,

        /// Show sensitive values instead of masking them
        #[arg(long)]
        show_sensitive: bool,
    },

    /// Print the side-by-side diff to the terminal
    Show {
        /// Path to the JSON plan
        #[arg(short, long)]
        plan: PathBuf,

        /// Only show the resource with this address
        #[arg(short, long)]
        resource: Option<String>,

        /// Total output width (defaults to the terminal width)
        #[arg(short, long)]
        width: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Only include attributes whose value changes
        #[arg(long)]
        changed_only: bool,

        /// Show sensitive values instead of masking them
        #[arg(long)]
        show_sensitive: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let ctx = Context::new();

    if let Err(err) = run(&ctx, cli) {
        ctx.output.error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(ctx: &Context, cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Report {
            plan,
            out,
            title,
            changed_only,
            show_sensitive,
        } => {
            let args = ReportArgs {
                plan,
                out,
                title,
                changed_only,
                show_sensitive,
            };
            ReportCommand::execute(ctx, &args)?;
        }
        Commands::Show {
            plan,
            resource,
            width,
            no_color,
            changed_only,
            show_sensitive,
        } => {
            let args = ShowArgs {
                plan,
                resource,
                width,
                no_color,
                changed_only,
                show_sensitive,
            };
            ShowCommand::execute(ctx, &args)?;
        }
    }

    Ok(())
}
