//! replay - run a recorded pointer trace through a default scope and print
//! every emitted interaction event as one JSON line.
//!
//! Trace format:
//!
//! ```json
//! {
//!   "settings": { "delta_source": "client" },
//!   "interactables": [
//!     { "surface": 1, "actions": ["drag"], "drag": { "lock_axis": "start" } }
//!   ],
//!   "events": [
//!     { "kind": "down", "pointer_id": 1, "page": {"x": 0, "y": 0},
//!       "client": {"x": 0, "y": 0}, "timestamp": 0, "target": 0 }
//!   ]
//! }
//! ```
//!
//! `target` indexes `interactables` and is only read for `down` events.

use anyhow::{Context, Result};
use clap::Parser;
use pointer_interactions::actions::{DragOptionsPatch, GestureOptionsPatch, ResizeOptionsPatch};
use pointer_interactions::logging::init_tracing;
use pointer_interactions::perf::{TimingStats, measure};
use pointer_interactions::settings::default_settings_path;
use pointer_interactions::{
    ActionName, ActionSet, InteractEvent, InteractableId, InteractionSettings, PointerEvent,
    PointerKind, Rect, Scope, SurfaceId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Replay a pointer trace and print the emitted events
#[derive(Parser)]
#[command(name = "replay")]
#[command(about = "Replay a pointer trace and print the emitted interaction events", long_about = None)]
struct Cli {
    /// JSON trace file
    trace: PathBuf,

    /// Settings file. Overrides the trace's own settings.
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Pretty-print each event
    #[arg(long)]
    pretty: bool,

    /// Print dispatch timings per pointer event kind to stderr
    #[arg(long)]
    timings: bool,
}

#[derive(Deserialize)]
struct Trace {
    #[serde(default)]
    settings: Option<InteractionSettings>,
    #[serde(default)]
    interactables: Vec<TraceInteractable>,
    events: Vec<TraceEvent>,
}

#[derive(Deserialize)]
struct TraceInteractable {
    surface: SurfaceId,
    actions: Vec<ActionName>,
    #[serde(default)]
    rect: Option<Rect>,
    #[serde(default)]
    drag: Option<DragOptionsPatch>,
    #[serde(default)]
    resize: Option<ResizeOptionsPatch>,
    #[serde(default)]
    gesture: Option<GestureOptionsPatch>,
}

#[derive(Deserialize)]
struct TraceEvent {
    #[serde(flatten)]
    event: PointerEvent,
    #[serde(default)]
    target: Option<usize>,
}

fn resolve_settings(cli: &Cli, trace: &Trace) -> Result<InteractionSettings> {
    if let Some(path) = &cli.settings {
        return InteractionSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()));
    }
    if let Some(settings) = &trace.settings {
        return Ok(settings.clone());
    }
    Ok(default_settings_path()
        .map(|path| InteractionSettings::load_or_default(&path))
        .unwrap_or_default())
}

fn build_interactables(scope: &mut Scope, specs: Vec<TraceInteractable>) -> Vec<InteractableId> {
    specs
        .into_iter()
        .map(|decl| {
            let id = scope.add_interactable(decl.surface, ActionSet::of(&decl.actions));
            if let Some(interactable) = scope.interactable_mut(id) {
                interactable.set_rect(decl.rect);
                for action in &decl.actions {
                    match action {
                        ActionName::Drag => {
                            interactable.set_draggable(decl.drag.unwrap_or_default());
                        }
                        ActionName::Resize => {
                            interactable.set_resizable(decl.resize.unwrap_or_default());
                        }
                        ActionName::Gesture => {
                            interactable.set_gesturable(decl.gesture.unwrap_or_default());
                        }
                    }
                }
            }
            id
        })
        .collect()
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let contents = fs::read_to_string(&cli.trace)
        .with_context(|| format!("Failed to read trace {}", cli.trace.display()))?;
    let trace: Trace = serde_json::from_str(&contents).context("Invalid trace JSON")?;
    let settings = resolve_settings(&cli, &trace)?;

    let mut scope = Scope::with_default_actions(settings);
    let pretty = cli.pretty;
    scope.set_sink(move |event: &InteractEvent| {
        let line = if pretty {
            serde_json::to_string_pretty(event)
        } else {
            serde_json::to_string(event)
        };
        match line {
            Ok(line) => println!("{line}"),
            Err(e) => warn!(error = %e, "Failed to serialize event"),
        }
    });

    let targets = build_interactables(&mut scope, trace.interactables);
    let mut timings: HashMap<PointerKind, TimingStats> = HashMap::new();
    let mut rejected = 0usize;

    for (index, entry) in trace.events.iter().enumerate() {
        let target = entry.target.and_then(|i| targets.get(i).copied());
        let (result, elapsed_ms) = measure(|| scope.dispatch(&entry.event, target));
        timings.entry(entry.event.kind).or_default().record(elapsed_ms);
        if let Err(e) = result {
            rejected += 1;
            warn!(index, error = %e, "Trace event rejected");
        }
    }

    info!(events = trace.events.len(), rejected, "Replay finished");

    if cli.timings {
        for kind in [PointerKind::Down, PointerKind::Move, PointerKind::Up, PointerKind::Cancel] {
            if let Some(stats) = timings.get(&kind) {
                eprintln!(
                    "{:<7} count={:<6} avg={:.3}ms p95={:.3}ms max={:.3}ms",
                    format!("{kind:?}").to_lowercase(),
                    stats.count(),
                    stats.average(),
                    stats.p95(),
                    stats.max()
                );
            }
        }
    }

    Ok(())
}
