//! Declarative scenarios: a stimulus script plus a list of stretch vectors.
//!
//! Scenarios are plain data so the same clock driver and run controller can
//! execute all of them. The built-in catalogue covers a free-running
//! stimulus, periodic toggling, a fixed sequence and the vector-driven
//! stretch checks.

use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{HarnessError, HarnessResult};
use crate::stimulus::{Step, Stimulus, TimedEvent};

/// Expected number of pulses the circuit holds the line after release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestVector {
    pub expected: u64,
}

impl TestVector {
    pub fn new(expected: u64) -> Self {
        Self { expected }
    }
}

/// Names of the pins a scenario drives and observes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pins {
    pub clock: String,
    /// Monitored bus input, forced low before each vector.
    pub line: String,
    /// Circuit output that is high while it holds the line.
    pub output_enable: String,
}

impl Default for Pins {
    fn default() -> Self {
        Self {
            clock: "clk".to_string(),
            line: "scl_i".to_string(),
            output_enable: "scl_oe".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub pins: Pins,
    /// Runs first, before any vector.
    pub stimulus: Stimulus,
    pub vectors: Vec<TestVector>,
}

impl Scenario {
    pub fn new(name: &str, stimulus: Stimulus, vectors: Vec<TestVector>) -> Self {
        Self {
            name: name.to_string(),
            pins: Pins::default(),
            stimulus,
            vectors,
        }
    }

    pub fn by_name(name: &str) -> HarnessResult<Self> {
        SCENARIOS
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .ok_or_else(|| HarnessError::UnknownScenario(name.to_string()))
    }

    pub fn names() -> Vec<&'static str> {
        SCENARIOS.iter().map(|s| s.name.as_str()).collect()
    }

    /// Stretch counts a well-behaved circuit would produce for this scenario.
    pub fn expected_stretches(&self) -> Vec<u64> {
        self.vectors.iter().map(|v| v.expected).collect()
    }
}

/// Bring the bus idle and pulse the arming switch once.
pub fn stretch_preamble() -> Stimulus {
    Stimulus::Sequence(vec![
        Step::set("scl_i", 1),
        Step::Pulse(1),
        Step::set("switch", 1),
        Step::Pulse(1),
        Step::set("switch", 0),
    ])
}

pub fn vectors(expected: &[u64]) -> Vec<TestVector> {
    expected.iter().copied().map(TestVector::new).collect()
}

/// Seeded stretch vectors in `0..=max`. The same seed always gives the same
/// list.
pub fn random_vectors(seed: u64, count: usize, max: u64) -> Vec<TestVector> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| TestVector::new(rng.gen_range(0..=max)))
        .collect()
}

const RANDOM_SEED: u64 = 0x5eed_c10c;

lazy_static! {
    static ref SCENARIOS: Vec<Scenario> = vec![
        Scenario::new(
            "free-run",
            Stimulus::Timed {
                events: vec![
                    TimedEvent::new(0, "scl_i", 1),
                    TimedEvent::new(1, "switch", 1),
                    TimedEvent::new(2, "switch", 0),
                    TimedEvent::new(3, "scl_i", 0),
                    TimedEvent::new(8, "scl_i", 1),
                ],
                pulses: 10,
            },
            Vec::new(),
        ),
        Scenario::new("toggle", Stimulus::periodic("switch", 4, 32), Vec::new()),
        Scenario::new(
            "sequence",
            Stimulus::Sequence(vec![
                Step::set("scl_i", 1),
                Step::Pulse(1),
                Step::set("switch", 1),
                Step::Pulse(1),
                Step::set("switch", 0),
                Step::Pulse(1),
                Step::set("scl_i", 0),
                Step::Pulse(5),
                Step::set("scl_i", 1),
                Step::Pulse(2),
            ]),
            Vec::new(),
        ),
        Scenario::new("stretch", stretch_preamble(), vectors(&[0, 0, 3, 3])),
        Scenario::new(
            "stretch-random",
            stretch_preamble(),
            random_vectors(RANDOM_SEED, 8, 6),
        ),
    ];
}
