//! clipsentry - Clipboard Diagnostic Tool
//!
//! Entry point for the CLI binary.

use std::io::{self, BufRead, Write as _};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clipsentry::config::Config;
use clipsentry::{platform, report, utils};
use clipsentry_core::{formats, ClipboardInspector};

/// Command-line arguments for clipsentry
#[derive(Parser, Debug)]
#[command(name = "clipsentry")]
#[command(version, about = "Clipboard diagnostic tool", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = "CLIPSENTRY_CONFIG", default_value = "clipsentry.toml")]
    pub config: String,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log format (json|pretty|compact); overrides the config file
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Capture and print one clipboard status snapshot
    Status {
        /// Emit the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-check clipboard status periodically
    Watch {
        /// Interval between checks in milliseconds (overrides config)
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Force-release a lock left open by this tool and probe liveness
    ///
    /// Cannot free a lock held by another process; for that, identify the
    /// owner with `status` and close or `kill` it.
    Unlock,

    /// Empty the clipboard (best effort; silently skipped when busy)
    Clear,

    /// Terminate the process that owns the clipboard
    Kill {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Preview the contents of one clipboard format
    Preview {
        /// Format id or standard name (e.g. 13, CF_UNICODETEXT, hdrop)
        format: String,
    },

    /// Copy a process id to the clipboard as text
    CopyPid {
        /// Process id to copy
        pid: u32,
    },
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("{}", utils::format_user_error(&e));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = if std::path::Path::new(&args.config).exists() {
        Config::load(&args.config)?
    } else {
        Config::default_config()
    };

    init_logging(args, &config)?;
    info!(
        "clipsentry v{} ({} {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE"),
        env!("GIT_HASH")
    );
    utils::log_startup_diagnostics();
    tracing::debug!("Config: {:?}", config);

    let system = platform::native()?;
    let inspector = ClipboardInspector::with_limits(system, config.preview_limits());

    match &args.command {
        Command::Status { json } => {
            let snapshot = inspector.status();
            if *json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", report::render_status(&snapshot, Local::now()));
            }
        }

        Command::Watch { interval_ms } => {
            let interval = Duration::from_millis(interval_ms.unwrap_or(config.watch.interval_ms));
            info!("watching clipboard every {:?} (Ctrl-C to stop)", interval);
            loop {
                println!("{}", report::render_status(&inspector.status(), Local::now()));
                thread::sleep(interval);
            }
        }

        Command::Unlock => {
            if inspector.attempt_unlock() {
                println!("Clipboard lock is clear; the clipboard is acquirable.");
            } else {
                println!("Clipboard is still locked by another process.");
                println!("Run `clipsentry status` to identify the owner.");
            }
        }

        Command::Clear => {
            inspector.clear();
            println!("Clipboard cleared (best effort; skipped if busy).");
        }

        Command::Kill { yes } => {
            let owner = inspector
                .owner_info()
                .context("no process currently owns the clipboard")?;
            let prompt = format!(
                "Terminate {}? This cannot be undone. [y/N] ",
                report::render_owner_line(&owner)
            );
            if !*yes && !confirm(&prompt)? {
                println!("Aborted.");
                return Ok(());
            }
            let pid = inspector.terminate_owner()?;
            println!("Terminated clipboard owner (PID {pid}).");
        }

        Command::Preview { format } => {
            let id = formats::parse_format_arg(format)
                .with_context(|| format!("unrecognized format '{format}'"))?;
            println!("{}", inspector.preview(id)?);
        }

        Command::CopyPid { pid } => {
            inspector.copy_pid(*pid)?;
            println!("Copied PID {pid} to the clipboard (this tool is now the owner).");
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "YES"))
}

fn init_logging(args: &Args, config: &Config) -> Result<()> {
    let log_level = match args.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "clipsentry={level},clipsentry_core={level},warn",
            level = log_level
        ))
    });

    let log_format = args.log_format.as_deref().unwrap_or(&config.logging.format);

    // Logs go to stderr; stdout carries only reports and previews.
    match log_format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
        }
    }

    Ok(())
}
