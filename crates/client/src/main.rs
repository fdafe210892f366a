use anyhow::Context;
use clap::Parser;
use dispatcher::{DispatcherConfig, IdPolicy, UndoOverflow, DEFAULT_VIP_CAPACITY};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod command;
mod render;
mod shell;

use render::{render_branches, render_snapshot, OutputFormat};
use shell::{Reply, Shell};

#[derive(Parser)]
/// Interactive help-desk shell: reads one command per line from stdin and prints
/// the state of every lane after each one. Type `help` for the command list.
struct Opts {
    /// Maximum number of tickets waiting in the VIP lane
    #[arg(long, default_value_t = DEFAULT_VIP_CAPACITY)]
    vip_capacity: usize,

    /// How ticket ids are generated (sequential or random)
    #[arg(long, default_value = "sequential")]
    ids: IdPolicy,

    /// What undo does when a VIP ticket cannot re-enter a full VIP lane (discard or fallback)
    #[arg(long, default_value = "discard")]
    undo_overflow: UndoOverflow,

    /// Output format for lane snapshots
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Branch to open on start-up
    #[arg(long, default_value = "main")]
    branch: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // logs go to stderr so snapshots on stdout stay machine readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let config = DispatcherConfig {
        vip_capacity: opts.vip_capacity,
        id_policy: opts.ids,
        undo_overflow: opts.undo_overflow,
    };

    let mut shell = Shell::new(config, &opts.branch)
        .await
        .context("failed to start dispatch session")?;
    info!(
        "ticket desk ready on branch {} (VIP capacity {})",
        shell.branch(),
        shell.vip_capacity()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = match command::parse_line(line) {
            Ok(c) => c,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match shell.execute(command).await {
            Ok(Reply::Quit) => break,
            Ok(Reply::Help(text)) => println!("{text}"),
            Ok(Reply::Snapshot { snapshot, notice }) => {
                let out = render_snapshot(
                    &snapshot,
                    shell.branch(),
                    shell.vip_capacity(),
                    notice.as_deref(),
                    opts.format,
                )?;
                println!("{out}");
            }
            Ok(Reply::Branches { current, names }) => {
                println!("{}", render_branches(&current, &names, opts.format)?);
            }
            Err(e) => {
                // every dispatch error is recoverable; report it and keep reading
                debug!(code = e.code(), "{e}");
                println!("error [{}]: {e}", e.code());
            }
        }
    }

    info!("ticket desk shutting down");
    Ok(())
}
