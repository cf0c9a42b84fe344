use stretchbench::prelude::*;
use stretchbench::report;
use stretchbench::scenario::{random_vectors, stretch_preamble, vectors};

/// Bus peripheral that never holds the line.
struct Passive {
    signals: Vec<SignalInfo>,
    values: Vec<u64>,
    steps: u64,
}

impl Passive {
    fn new(oe: u64) -> Self {
        let signals = vec![
            SignalInfo::new("clk", 1, Direction::Input),
            SignalInfo::new("switch", 1, Direction::Input),
            SignalInfo::new("scl_i", 1, Direction::Input),
            SignalInfo::new("scl_oe", 1, Direction::Output),
        ];
        let mut values = vec![0; signals.len()];
        values[3] = oe;
        Self {
            signals,
            values,
            steps: 0,
        }
    }
}

impl SimIf for Passive {
    fn signals(&self) -> &[SignalInfo] {
        &self.signals
    }
    fn get_value(&self, handle: usize) -> u64 {
        self.values[handle]
    }
    fn set_value(&mut self, handle: usize, value: u64) {
        self.values[handle] = value;
    }
    fn step(&mut self) {
        self.steps += 1;
    }
}

fn capture_config(dir: &tempfile::TempDir, name: &str) -> HarnessConfig {
    HarnessConfig {
        vcd_path: Some(dir.path().join(name)),
        ..HarnessConfig::default()
    }
}

#[test]
fn reference_scenario_passes_silently() {
    let scenario = Scenario::by_name("stretch").unwrap();
    let run = run_scenario(StretchModel::new(vec![0, 0, 3, 3]), &scenario, &HarnessConfig::default()).unwrap();
    assert_eq!(run.result.outcome().exit_code(), 0);
    let observed = run
        .result
        .scoreboard
        .outcomes()
        .iter()
        .map(|o| o.observed)
        .collect::<Vec<_>>();
    assert_eq!(observed, vec![0, 0, 3, 3]);

    let mut stderr = Vec::new();
    assert_eq!(report::write_diagnostics(&run.result, &mut stderr).unwrap(), 0);
    assert!(stderr.is_empty());
}

#[test]
fn short_stretch_reports_exactly_one_line() {
    let scenario = Scenario::by_name("stretch").unwrap();
    let run = run_scenario(StretchModel::new(vec![0, 0, 2, 3]), &scenario, &HarnessConfig::default()).unwrap();
    assert_eq!(run.result.outcome().exit_code(), 1);

    let mut stderr = Vec::new();
    report::write_diagnostics(&run.result, &mut stderr).unwrap();
    assert_eq!(
        String::from_utf8(stderr).unwrap(),
        "ix 2 expected 3 stretched cycles, got 2\n"
    );
}

#[test]
fn mismatch_does_not_stop_later_vectors() {
    let scenario = Scenario::new("mutated", stretch_preamble(), vectors(&[0, 9, 3, 3]));
    let run = run_scenario(StretchModel::new(vec![0, 0, 3, 3]), &scenario, &HarnessConfig::default()).unwrap();

    let outcomes = run.result.scoreboard.outcomes();
    assert_eq!(outcomes.len(), 4);
    assert!(outcomes[2].passed() && outcomes[2].observed == 3);
    assert!(outcomes[3].passed() && outcomes[3].observed == 3);

    let bad = run.result.scoreboard.mismatches().collect::<Vec<_>>();
    assert_eq!(bad.len(), 1);
    assert_eq!(bad[0].index, 1);
    assert_eq!(bad[0].diagnostic(), "ix 1 expected 9 stretched cycles, got 0");
    assert_eq!(run.result.outcome(), Outcome::Failed);
}

#[test]
fn zero_expected_against_passive_circuit() {
    let scenario = Scenario::new("passive", stretch_preamble(), vectors(&[0, 0]));
    let run = run_scenario(Passive::new(0), &scenario, &HarnessConfig::default()).unwrap();
    assert_eq!(run.result.outcome(), Outcome::Passed);
    // two steps per pulse, nothing else
    assert_eq!(run.dut.steps, run.result.pulses * 2);
}

#[test]
fn stuck_circuit_hits_the_ceiling() {
    let scenario = Scenario::new("stuck", stretch_preamble(), vectors(&[1]));
    let config = HarnessConfig {
        max_stretch_pulses: 16,
        ..HarnessConfig::default()
    };
    let err = run_scenario(Passive::new(1), &scenario, &config).err().unwrap();
    assert!(matches!(err, HarnessError::StretchCeiling { index: 0, pulses: 16 }));
}

#[test]
fn two_samples_per_pulse_without_gaps() {
    let dir = tempfile::tempdir().unwrap();
    for name in Scenario::names() {
        let scenario = Scenario::by_name(name).unwrap();
        let dut = StretchModel::new(scenario.expected_stretches());
        let run = run_scenario(dut, &scenario, &capture_config(&dir, "trace.vcd")).unwrap();
        let rec = run.recorder.unwrap();
        assert_eq!(rec.samples() as u64, 2 * run.result.pulses + 1, "{}", name);
        for (expected, sample) in rec.trace().iter().enumerate() {
            assert_eq!(sample.time, expected as u64);
        }
    }
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = Scenario::by_name("stretch").unwrap();
    let a = capture_config(&dir, "a.vcd");
    let b = capture_config(&dir, "b.vcd");
    let run_a = run_scenario(StretchModel::new(vec![0, 0, 3, 3]), &scenario, &a).unwrap();
    let run_b = run_scenario(StretchModel::new(vec![0, 0, 3, 3]), &scenario, &b).unwrap();

    let bytes_a = std::fs::read(a.vcd_path.unwrap()).unwrap();
    let bytes_b = std::fs::read(b.vcd_path.unwrap()).unwrap();
    assert!(!bytes_a.is_empty());
    assert_eq!(bytes_a, bytes_b);
    assert_eq!(
        run_a.result.scoreboard.outcomes(),
        run_b.result.scoreboard.outcomes()
    );
}

#[test]
fn repeated_stimulus_gives_identical_pin_history() {
    let scenario = Scenario::by_name("free-run").unwrap();
    let history = || {
        let mut bench = Bench::new(StretchModel::new(vec![]), "clk", false).unwrap();
        let mut seq = Sequencer::new(&bench, &scenario.stimulus).unwrap();
        seq.run(&mut bench).unwrap();
        seq.history().to_vec()
    };
    let first = history();
    let (scl_i, switch) = (2, 1);
    let got = first
        .iter()
        .map(|a| (a.time, a.handle, a.value))
        .collect::<Vec<_>>();
    assert_eq!(
        got,
        vec![
            (1, scl_i, 1),
            (3, switch, 1),
            (5, switch, 0),
            (7, scl_i, 0),
            (17, scl_i, 1),
        ]
    );
    assert_eq!(first, history());
}

#[test]
fn waveform_is_written_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    let config = capture_config(&dir, "stretchbench.vcd");
    let scenario = Scenario::by_name("free-run").unwrap();
    run_scenario(StretchModel::new(vec![]), &scenario, &config).unwrap();
    let text = std::fs::read_to_string(config.vcd_path.unwrap()).unwrap();
    assert!(text.contains("$enddefinitions"));
    assert!(text.contains("#20"));
    assert!(!text.contains("#21"));
}

#[test]
fn random_vectors_match_a_faithful_circuit() {
    for seed in 0..8 {
        let expected = random_vectors(seed, 6, 7);
        let script = expected.iter().map(|v| v.expected).collect::<Vec<_>>();
        let scenario = Scenario::new("random", stretch_preamble(), expected);
        let run = run_scenario(StretchModel::new(script), &scenario, &HarnessConfig::default()).unwrap();
        assert!(run.result.scoreboard.passed(), "seed {}", seed);
    }
}

#[test]
fn stimulus_driving_the_clock_aborts_the_run() {
    let stimulus = Stimulus::Sequence(vec![
        Step::set("clk", 1),
        Step::set("clk", 0),
        Step::Pulse(1),
        Step::set("clk", 1),
    ]);
    let scenario = Scenario::new("clk-driver", stimulus, vectors(&[0]));
    let err = run_scenario(StretchModel::new(vec![]), &scenario, &HarnessConfig::default()).err().unwrap();
    assert!(matches!(err, HarnessError::ClockDriven(name) if name == "clk"));
}

#[test]
fn boxed_circuit_runs_like_a_concrete_one() {
    let scenario = Scenario::by_name("stretch").unwrap();
    let dut: Box<dyn SimIf> = Box::new(StretchModel::new(vec![0, 0, 3, 3]));
    let boxed = run_scenario(dut, &scenario, &HarnessConfig::default()).unwrap();
    let plain = run_scenario(StretchModel::new(vec![0, 0, 3, 3]), &scenario, &HarnessConfig::default()).unwrap();
    assert_eq!(boxed.result.outcome(), Outcome::Passed);
    assert_eq!(boxed.result.scoreboard.outcomes(), plain.result.scoreboard.outcomes());
    assert_eq!(boxed.result.time, plain.result.time);
    assert_eq!(boxed.dut.get_handle_by_name("scl_oe"), Some(3));
}

#[test]
fn unknown_output_enable_aborts_before_vectors() {
    let mut scenario = Scenario::new("bad-pins", stretch_preamble(), vectors(&[0]));
    scenario.pins.output_enable = "sda_oe".to_string();
    let err = run_scenario(StretchModel::new(vec![]), &scenario, &HarnessConfig::default()).err().unwrap();
    assert!(matches!(err, HarnessError::UnknownSignal(name) if name == "sda_oe"));
}
