//! Tocmark - scroll-spy for tables of contents.
//!
//! # Usage
//!
//! ```bash
//! tocmark post.md
//! tocmark --threshold 0.5 --marker-class active post.md
//! tocmark --trace --height 20 post.md
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tocmark::app::App;
use tocmark::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use tocmark::page::{Page, ParseOptions};
use tocmark::perf;
use tocmark::trace::{self, TraceOptions};

/// Marks the table-of-contents entries of every visible section
#[derive(Parser, Debug)]
#[command(name = "tocmark", version, about, long_about = None)]
struct Cli {
    /// Markdown file to view
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Fraction of a section that must be visible to mark it (0.0-1.0)
    #[arg(long, value_name = "RATIO")]
    threshold: Option<f64>,

    /// Class toggled on current navigation entries
    #[arg(long, value_name = "CLASS")]
    marker_class: Option<String>,

    /// Prefix joining a section id to its navigation entry id
    #[arg(long, value_name = "PREFIX")]
    nav_prefix: Option<String>,

    /// Stop a batch at the first section without a navigation entry
    #[arg(long)]
    strict: bool,

    /// Hide table of contents sidebar
    #[arg(long)]
    no_toc: bool,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Scroll through the file without a terminal and print marker transitions
    #[arg(long)]
    trace: bool,

    /// Rows scrolled per trace step (default: half the trace height)
    #[arg(long, value_name = "ROWS", requires = "trace")]
    step: Option<usize>,

    /// Viewport height used by --trace
    #[arg(long, value_name = "ROWS", default_value_t = 24)]
    height: u16,

    /// Write observer batches and host events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    let settings = effective.settings();

    perf::set_enabled(effective.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("TOCMARK_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(debug_log_path.as_deref()) {
        tracing::warn!(
            path = %debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            "failed to initialize debug log: {err}"
        );
    }

    // Verify file exists
    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    if cli.trace {
        return run_trace(&cli, &settings);
    }

    let mut app = App::new(cli.file)
        .with_toc_visible(!effective.no_toc)
        .with_settings(settings);

    app.run().context("Application error")
}

fn run_trace(cli: &Cli, settings: &tocmark::config::Settings) -> Result<()> {
    let source = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let options = ParseOptions {
        nav_prefix: settings.nav_prefix.clone(),
        ..ParseOptions::default()
    };
    let mut page = Page::parse_with_options(&source, &options)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = trace::run(
        &mut page,
        settings,
        TraceOptions {
            height: cli.height,
            step: cli.step,
        },
        &mut out,
    );

    writeln!(out, "# {}", settings.marker_class)?;
    trace::write_marked(&page, &settings.marker_class, &mut out)?;
    let summary = result.context("Trace failed")?;
    tracing::info!(
        steps = summary.steps,
        transitions = summary.transitions,
        skipped = summary.skipped,
        "trace complete"
    );
    Ok(())
}
