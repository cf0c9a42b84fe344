use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use stretchbench::config::{parse_stretch_list, HarnessConfig, DEFAULT_VCD_PATH};
use stretchbench::model::StretchModel;
use stretchbench::report;
use stretchbench::runner::run_scenario;
use stretchbench::scenario::Scenario;

/// Clock-stretch testbench for I2C-like bus peripherals
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Record a waveform to stretchbench.vcd
    #[arg(long)]
    vcd: bool,

    /// Scenario to run
    #[arg(short, long, default_value = "stretch")]
    scenario: String,

    /// Stretch counts the reference circuit produces, comma separated
    /// (default: whatever the scenario expects)
    #[arg(long)]
    stretches: Option<String>,

    /// Abort if the circuit stretches for more pulses than this
    #[arg(long, default_value_t = 1024)]
    max_stretch: u64,

    /// Write a JUnit XML report
    #[arg(long)]
    junit: Option<PathBuf>,

    /// List built-in scenarios and exit
    #[arg(long)]
    list: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(cli: Cli) -> Result<u8> {
    if cli.list {
        for name in Scenario::names() {
            println!("{}", name);
        }
        return Ok(0);
    }

    let scenario = Scenario::by_name(&cli.scenario)?;
    let script = match cli.stretches.as_deref() {
        Some(list) => parse_stretch_list(list)?,
        None => scenario.expected_stretches(),
    };
    let config = HarnessConfig {
        max_stretch_pulses: cli.max_stretch,
        vcd_path: cli.vcd.then(|| PathBuf::from(DEFAULT_VCD_PATH)),
        junit_path: cli.junit,
        ..HarnessConfig::default()
    };

    let run = run_scenario(StretchModel::new(script), &scenario, &config)
        .with_context(|| format!("scenario '{}' aborted", scenario.name))?;

    report::write_diagnostics(&run.result, io::stderr().lock())?;
    report::print_summary(&run.result);
    Ok(run.result.outcome().exit_code())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    stretchbench::CRATE_NAME.set(env!("CARGO_PKG_NAME").to_string()).ok();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
