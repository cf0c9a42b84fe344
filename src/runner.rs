//! Run controller: owns the circuit and recorder for one scenario.

use tracing::info;

use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use crate::junit;
use crate::scenario::Scenario;
use crate::sim_if::SimIf;
use crate::stimulus::Sequencer;
use crate::stretch::StretchVerifier;
use crate::testbench::{Bench, Scoreboard};
use crate::wave::Recorder;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Passed => 0,
            Outcome::Failed => 1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RunResult {
    pub scenario: String,
    pub scoreboard: Scoreboard,
    pub pulses: u64,
    /// Time of the sample that would come next.
    pub time: u64,
}

impl RunResult {
    pub fn outcome(&self) -> Outcome {
        match self.scoreboard.passed() {
            true => Outcome::Passed,
            false => Outcome::Failed,
        }
    }
}

pub struct Run<C> {
    pub result: RunResult,
    pub dut: C,
    pub recorder: Option<Recorder>,
}

/// Run `scenario` to completion against `dut`.
///
/// The stimulus script runs first, then every vector. Waveform and JUnit
/// files are written at the end when the config asks for them.
pub fn run_scenario<C: SimIf>(dut: C, scenario: &Scenario, config: &HarnessConfig) -> HarnessResult<Run<C>> {
    info!(scenario = %scenario.name, vectors = scenario.vectors.len(), "starting run");
    let mut bench = Bench::new(dut, &scenario.pins.clock, config.capture())?;

    Sequencer::new(&bench, &scenario.stimulus)?.run(&mut bench)?;

    let mut scoreboard = Scoreboard::new();
    if !scenario.vectors.is_empty() {
        let verifier = StretchVerifier::new(&bench, &scenario.pins, config)?;
        verifier.verify(&mut bench, &scenario.vectors, &mut scoreboard)?;
    }

    let result = RunResult {
        scenario: scenario.name.clone(),
        scoreboard,
        pulses: bench.pulse_count(),
        time: bench.time(),
    };
    let (dut, recorder) = bench.into_parts();

    if let (Some(path), Some(rec)) = (config.vcd_path.as_deref(), recorder.as_ref()) {
        rec.write_file(path)?;
        info!(path = %path.display(), samples = rec.samples(), "wrote waveform");
    }
    if let Some(path) = config.junit_path.as_deref() {
        junit::write_junit_xml(&result, path)?;
    }
    info!(result = %result.scoreboard.result_str(), "run finished");

    Ok(Run {
        result,
        dut,
        recorder,
    })
}
