//! Command-line front end for the schedule generator.
//!
//! # Usage
//!
//! ```sh
//! fixturegen 8
//! fixturegen 10 --variant league --labels letters
//! fixturegen 12 --variant league --format json --timeout-ms 5000
//! fixturegen 16 --all --verify --stats
//! ```
//!
//! Set `RUST_LOG=debug` to see search progress.

use std::{
    io::{self, Write as _},
    process::ExitCode,
    thread,
    time::Duration,
};

use clap::{Parser, ValueEnum};
use fixturegen_core::{EntityCount, EntityCountError, Schedule, ScheduleViolation, default_labels};
use fixturegen_engine::{CancellationToken, ScheduleGenerator, SearchStats, Variant};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Basic,
    League,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Basic => Variant::Basic,
            VariantArg::League => Variant::League,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Labels {
    /// 1-based entity numbers.
    Numbers,
    /// Spreadsheet-style letters: A, B, ..., Z, AA, ...
    Letters,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Number of entities to schedule (even, 2 to 32).
    #[arg(value_name = "ENTITIES", default_value_t = 4)]
    entities: usize,

    /// Rule set to schedule with.
    #[arg(long, value_name = "VARIANT", default_value = "basic")]
    variant: VariantArg,

    /// Output format.
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    format: Format,

    /// How entities are written in text output.
    #[arg(long, value_name = "LABELS", default_value = "numbers")]
    labels: Labels,

    /// Cancel every search still running after this many milliseconds.
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Generate every even entity count from 2 up to ENTITIES, in parallel.
    #[arg(long)]
    all: bool,

    /// Check each schedule against the rules of its variant.
    #[arg(long)]
    verify: bool,

    /// Print search statistics to stderr.
    #[arg(long)]
    stats: bool,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum CliError {
    #[display("{_0}")]
    EntityCount(#[from] EntityCountError),
    #[display("no schedule found for {entities} entities (search exhausted or cancelled)")]
    NoSchedule { entities: usize },
    #[display("{entities}-entity schedule failed verification: {violation}")]
    Verification {
        entities: usize,
        violation: ScheduleViolation,
    },
    #[display("failed to write output: {_0}")]
    Io(#[from] io::Error),
    #[display("failed to encode JSON: {_0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::EntityCount(_) => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }
}

/// One finished search.
#[derive(Debug)]
struct Outcome {
    entities: usize,
    schedule: Schedule,
    stats: SearchStats,
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let variant = Variant::from(args.variant);
    // Reject a bad count before spawning anything.
    EntityCount::new(args.entities)?;

    let token = CancellationToken::new();
    if let Some(ms) = args.timeout_ms {
        spawn_timer(token.clone(), Duration::from_millis(ms));
    }
    let generator = ScheduleGenerator::for_variant(variant).with_cancellation(token);

    let counts: Vec<usize> = if args.all {
        (2..=args.entities).step_by(2).collect()
    } else {
        vec![args.entities]
    };
    log::info!("generating {variant} schedules for {counts:?} entities");

    let outcomes = counts
        .par_iter()
        .map(|&entities| search(&generator, entities))
        .collect::<Result<Vec<_>, _>>()?;

    for outcome in &outcomes {
        if args.stats {
            eprintln!(
                "{} entities: {} steps, {} backtracks, {} option sets",
                outcome.entities,
                outcome.stats.steps(),
                outcome.stats.backtracks(),
                outcome.stats.regenerations()
            );
        }
        if args.verify {
            verify(variant, outcome)?;
        }
    }

    let mut out = io::stdout().lock();
    match args.format {
        Format::Text => {
            for outcome in &outcomes {
                if args.all {
                    writeln!(out, "# {} entities", outcome.entities)?;
                }
                out.write_all(render_text(&outcome.schedule, args.labels).as_bytes())?;
                if args.all {
                    writeln!(out)?;
                }
            }
        }
        Format::Json => {
            let schedules: Vec<&Schedule> = outcomes.iter().map(|o| &o.schedule).collect();
            if args.all {
                serde_json::to_writer_pretty(&mut out, &schedules)?;
            } else {
                serde_json::to_writer_pretty(&mut out, schedules[0])?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

fn spawn_timer(token: CancellationToken, after: Duration) {
    thread::spawn(move || {
        thread::sleep(after);
        log::info!("time limit of {after:?} reached, cancelling");
        token.cancel();
    });
}

fn search(generator: &ScheduleGenerator, entities: usize) -> Result<Outcome, CliError> {
    let (schedule, stats) = generator.generate_with_stats(entities)?;
    let schedule = schedule.ok_or(CliError::NoSchedule { entities })?;
    Ok(Outcome {
        entities,
        schedule,
        stats,
    })
}

fn verify(variant: Variant, outcome: &Outcome) -> Result<(), CliError> {
    let result = match variant {
        Variant::Basic => outcome.schedule.check_round_robin(),
        Variant::League => outcome.schedule.check_league(),
    };
    result.map_err(|violation| CliError::Verification {
        entities: outcome.entities,
        violation,
    })
}

fn render_text(schedule: &Schedule, labels: Labels) -> String {
    match labels {
        Labels::Numbers => schedule.to_string(),
        Labels::Letters => schedule.render_with(&default_labels(schedule.entities())),
    }
}
