//! monstack challenge checker
//!
//! - Default: score the stack configuration and print a report
//! - `--start` / `--stop`: bring the stack up or down via compose

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;
use tracing_subscriber::{fmt, EnvFilter};

use monstack_check::report::exit_code;
use monstack_check::run_all;
use monstack_check::stack::{StackRunner, DEFAULT_COMPOSE_CMD, UI_ENDPOINTS};
use monstack_core::error::Result;

#[derive(Debug, Parser)]
#[command(name = "monstack-check", about = "Monitoring stack challenge runner")]
struct Args {
    /// Stack directory holding the configuration files.
    #[arg(long, env = "MONSTACK_DIR", default_value = "stack")]
    dir: PathBuf,

    /// Start the monitoring stack.
    #[arg(long, conflicts_with = "stop")]
    start: bool,

    /// Stop the monitoring stack.
    #[arg(long)]
    stop: bool,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Disable coloured output.
    #[arg(long)]
    no_color: bool,

    /// Exit non-zero unless the score is 100%.
    #[arg(long)]
    strict: bool,

    /// Compose command, e.g. "docker compose".
    #[arg(long, env = "COMPOSE_CMD", default_value = DEFAULT_COMPOSE_CMD)]
    compose_cmd: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the report; logs go to stderr.
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let color = !args.no_color && !args.json && std::io::stdout().is_tty();

    match run(&args, color).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "monstack-check failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, color: bool) -> Result<ExitCode> {
    let paint = |text: &str, c: Color| {
        if color {
            text.with(c).to_string()
        } else {
            text.to_string()
        }
    };

    if args.start || args.stop {
        let runner = StackRunner::new(&args.dir, &args.compose_cmd)?;
        if args.start {
            println!("\n  Starting monitoring stack...\n");
            if let Err(e) = runner.start().await {
                println!("\n  {}", paint("❌ Failed to start stack", Color::Red));
                return Err(e);
            }
            println!("\n  {}", paint("✅ Stack started!", Color::Green));
            println!("\n  {}", paint("Access the UIs:", Color::Cyan));
            for (name, url, note) in UI_ENDPOINTS {
                let label = format!("{name}:");
                match note {
                    Some(n) => println!("  • {label:<14}{url} ({n})"),
                    None => println!("  • {label:<14}{url}"),
                }
            }
        } else {
            println!("\n  Stopping monitoring stack...\n");
            runner.stop().await?;
            println!("\n  {}\n", paint("✅ Stack stopped", Color::Green));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let report = run_all(&args.dir);
    tracing::info!(
        dir = %args.dir.display(),
        points = report.total_points(),
        max = report.max_points(),
        "stack checked"
    );

    if args.json {
        println!("{}", report.render_json()?);
    } else {
        print!("{}", report.render_text(color));
    }

    Ok(ExitCode::from(exit_code(&report, args.strict)))
}
