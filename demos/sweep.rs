//! Runs a full sweep and prints one JSON result record per τ value.
//!
//! Pass `step` as the first argument to follow every engine event from the
//! console: enter advances one event, `r` runs to completion, `q` aborts.

use std::env;
use std::io::{self, BufRead, Write};

use quenet::{
    Config, Directive, EventKind, Observer, Snapshot, SourceConfig, Sweep, SweepRange,
};

/// Console step-mode collaborator: prints the event and a compact state
/// line, then blocks on stdin for a command.
struct ConsoleStepper;

impl Observer for ConsoleStepper {
    fn on_event(&mut self, kind: EventKind, snapshot: &Snapshot) -> Directive {
        let buffer: Vec<String> = snapshot
            .buffer
            .iter()
            .map(|slot| match slot {
                Some(entry) => format!("S{}@{:.3}", entry.source, entry.arrival),
                None => "__".to_string(),
            })
            .collect();
        let servers: Vec<String> = snapshot
            .servers
            .iter()
            .map(|server| match server.occupant {
                Some(source) => format!("[S{source}]"),
                None => "[...]".to_string(),
            })
            .collect();
        println!(
            "t={:.3} {kind:?} buffer=({}) servers=({}) rejected={}",
            snapshot.time,
            buffer.join(" "),
            servers.join(" "),
            snapshot.total_rejected,
        );
        print!("[enter=step, r=run, q=abort] > ");
        io::stdout().flush().unwrap();

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).unwrap();
        match line.trim() {
            "q" => Directive::Abort,
            "r" => Directive::RunToCompletion,
            _ => Directive::Continue,
        }
    }
}

fn main() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .finish();

    // use that subscriber to process traces emitted after this point
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let step_mode = env::args().nth(1).as_deref() == Some("step");

    let config = Config {
        buffer_capacity: 3,
        min_requests: 100,
        max_events: 100_000,
        seed: 1,
        sources: vec![
            SourceConfig { min_interval: 0.4, max_interval: 1.2 },
            SourceConfig { min_interval: 0.6, max_interval: 1.6 },
        ],
        servers: 2,
        sweep: SweepRange { min: 0.5, max: 2.0, step: 0.5 },
    };

    let sweep = Sweep::new(config).expect("invalid configuration");
    let results = match step_mode {
        true => sweep.run(Some(&mut ConsoleStepper)),
        false => sweep.run(None),
    }
    .expect("sweep failed");

    for result in &results {
        println!("{}", serde_json::to_string(result).unwrap());
    }
}
