#![forbid(unsafe_code)]

//! `weft`: inspect and drive the PO event pipeline from a terminal.
//!
//! State lives in a JSON file (see [`state`]) so consecutive
//! invocations compose: seed POs, ingest scans, read stories.

mod output;
mod seed;
mod state;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use output::{OutputMode, kv, render, rule};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use weft_core::store::{AlertStore, EventStore, PoStore};
use weft_core::{IngestPipeline, RuleSet, ScanSubmission, story};

#[derive(Parser, Debug)]
#[command(author, version, about = "weft: PO event ingestion and alert pipeline", long_about = None)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Path to the state file (default .weft/state.json, or $WEFT_STATE).
    #[arg(long, global = true)]
    state: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Load purchase orders into the store",
        after_help = "EXAMPLES:\n    # Seed the bundled demo POs\n    weft seed --demo\n\n    # Seed from a TOML file\n    weft seed --file pos.toml"
    )]
    Seed {
        /// Seed the two bundled demo POs (tenant "cobalt").
        #[arg(long)]
        demo: bool,

        /// TOML seed file with [[po]] tables.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    #[command(about = "List purchase orders for a tenant")]
    Pos {
        /// Tenant to list POs for.
        #[arg(long)]
        tenant: String,
    },

    #[command(
        about = "Ingest a worker scan submission",
        after_help = "EXAMPLES:\n    # From a file\n    weft scan --file scan.json\n\n    # From stdin\n    cat scan.json | weft scan"
    )]
    Scan {
        /// JSON file with the scan submission; stdin if omitted.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    #[command(about = "Show a PO's story: record, timeline, alerts")]
    Story {
        /// Tenant owning the PO.
        #[arg(long)]
        tenant: String,

        /// Purchase order id.
        #[arg(long)]
        po: String,
    },

    #[command(about = "List alerts for a tenant")]
    Alerts {
        /// Tenant to list alerts for.
        #[arg(long)]
        tenant: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let state_path = state::resolve_path(cli.state.as_deref());
    tracing::debug!(state = %state_path.display(), "resolved state file");
    let mode = cli.output_mode();

    match cli.command {
        Commands::Seed { demo, file } => cmd_seed(&state_path, mode, demo, file.as_deref()),
        Commands::Pos { tenant } => cmd_pos(&state_path, mode, &tenant),
        Commands::Scan { file } => cmd_scan(&state_path, mode, file.as_deref()),
        Commands::Story { tenant, po } => cmd_story(&state_path, mode, &tenant, &po),
        Commands::Alerts { tenant } => cmd_alerts(&state_path, mode, &tenant),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("WEFT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeedResult {
    seeded: usize,
}

fn cmd_seed(
    state_path: &Path,
    mode: OutputMode,
    demo: bool,
    file: Option<&std::path::Path>,
) -> Result<()> {
    if !demo && file.is_none() {
        return Err(anyhow!("nothing to seed: pass --demo and/or --file"));
    }

    let store = state::load(state_path)?;
    let mut pos = Vec::new();
    if demo {
        pos.extend(weft_core::store::demo_purchase_orders());
    }
    if let Some(path) = file {
        pos.extend(seed::load(path)?);
    }

    let seeded = pos.len();
    for po in pos {
        store.insert_po(po);
    }
    state::save(state_path, &store)?;

    render(mode, &SeedResult { seeded }, |r, w| {
        writeln!(w, "seeded {} purchase order(s)", r.seeded)
    })
}

fn cmd_pos(state_path: &Path, mode: OutputMode, tenant: &str) -> Result<()> {
    let store = state::load(state_path)?;
    let pos = store.list_pos(tenant)?;

    render(mode, &pos, |pos, w| {
        for po in pos {
            writeln!(
                w,
                "{:<10} {:<32} stage={:<10} risk={:<7} window ends {}",
                po.po_id, po.product, po.current_stage, po.risk_level, po.ship_window_end
            )?;
        }
        if pos.is_empty() {
            writeln!(w, "no purchase orders for tenant '{tenant}'")?;
        }
        Ok(())
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanResult {
    event_id: uuid::Uuid,
}

fn cmd_scan(state_path: &Path, mode: OutputMode, file: Option<&std::path::Path>) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read scan submission from stdin")?;
            buf
        }
    };
    let submission: ScanSubmission =
        serde_json::from_str(&raw).context("invalid scan submission JSON")?;

    let store = Arc::new(state::load(state_path)?);
    let pipeline = IngestPipeline::new(
        Arc::clone(&store) as Arc<dyn PoStore>,
        Arc::clone(&store) as Arc<dyn EventStore>,
        Arc::clone(&store) as Arc<dyn AlertStore>,
        RuleSet::standard(),
    );

    let event_id = pipeline
        .ingest_scan(submission)
        .map_err(|e| anyhow!("[{}] {e}", e.code()))?;
    state::save(state_path, &store)?;

    render(mode, &ScanResult { event_id }, |r, w| {
        writeln!(w, "ingested event {}", r.event_id)
    })
}

fn cmd_story(state_path: &Path, mode: OutputMode, tenant: &str, po_id: &str) -> Result<()> {
    let store = state::load(state_path)?;
    let story = story::assemble(&store, &store, &store, tenant, po_id)?;

    render(mode, &story, |story, w| {
        kv(w, "po", &story.po.po_id)?;
        kv(w, "product", &story.po.product)?;
        kv(w, "customer", &story.po.customer)?;
        kv(w, "factory", &story.po.factory)?;
        kv(w, "stage", &story.po.current_stage)?;
        kv(w, "risk", story.po.risk_level.as_str())?;
        kv(w, "ship window", format!(
            "{} .. {}",
            story.po.ship_window_start, story.po.ship_window_end
        ))?;
        rule(w)?;
        writeln!(w, "timeline ({} events)", story.timeline.len())?;
        for event in &story.timeline {
            writeln!(w, "  {}  {}  [{}]", event.timestamp, event.event_type, event.source)?;
        }
        rule(w)?;
        writeln!(w, "alerts ({})", story.alerts.len())?;
        for alert in &story.alerts {
            writeln!(
                w,
                "  {}  {}  {}",
                alert.severity, alert.reason_code, alert.description
            )?;
        }
        Ok(())
    })
}

fn cmd_alerts(state_path: &Path, mode: OutputMode, tenant: &str) -> Result<()> {
    let store = state::load(state_path)?;
    let alerts = store.list_alerts(tenant)?;

    render(mode, &alerts, |alerts, w| {
        for alert in alerts {
            writeln!(
                w,
                "{:<10} {:<8} {:<40} {}",
                alert.po_id, alert.severity, alert.reason_code, alert.created_at
            )?;
        }
        if alerts.is_empty() {
            writeln!(w, "no alerts for tenant '{tenant}'")?;
        }
        Ok(())
    })
}
