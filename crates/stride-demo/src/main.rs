//! Headless demo that drives one character through a scripted session against
//! the in-memory collaborators at a fixed 60 Hz step.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p stride-demo` to play the built-in session.
//! Run with `cargo run -p stride-demo -- --script walk.ron --ticks 600` to replay a RON script.

mod scenario;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use stride_config::{CliArgs, Config};
use stride_controller::{Character, SimWorld};
use stride_input::{InputScript, ScriptedInput};

/// Fixed simulation step.
const FIXED_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "stride-demo", about = "Stride character controller demo")]
struct DemoArgs {
    #[command(flatten)]
    cli: CliArgs,

    /// RON input script to replay instead of the built-in session.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Number of ticks to run (defaults to the script length).
    #[arg(long)]
    ticks: Option<u64>,
}

fn main() -> ExitCode {
    let args = DemoArgs::parse();

    let config_dir = args
        .cli
        .config
        .clone()
        .or_else(Config::default_dir)
        .unwrap_or_else(|| PathBuf::from(".stride"));

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args.cli);
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let log_dir = config_dir.join("logs");
    stride_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    tracing::info!(
        "Stride demo starting, config dir {}",
        config_dir.display()
    );

    let (script, events) = match &args.script {
        Some(path) => match InputScript::load(path) {
            Ok(script) => (script, Vec::new()),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load input script");
                return ExitCode::FAILURE;
            }
        },
        None => scenario::builtin(),
    };
    let ticks = args.ticks.unwrap_or_else(|| script.total_ticks());

    let world = SimWorld::new();
    let mut character = Character::new(&config, world.collaborators(), ScriptedInput::from(&script));

    let summary = scenario::run(&mut character, &world, &events, ticks, FIXED_DT);

    tracing::info!(
        ticks = summary.ticks,
        state_changes = summary.state_changes,
        modes = ?summary.modes_visited,
        position = ?summary.final_position,
        final_mode = %character.controller().mode(),
        "Stride demo finished"
    );
    ExitCode::SUCCESS
}
