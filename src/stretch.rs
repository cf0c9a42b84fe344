//! Clock-stretch verification.
//!
//! For each vector the monitored line is forced low for a settle period and
//! released. The verifier then counts the pulses during which the circuit
//! itself keeps its output enable asserted. Only that count is compared;
//! the external stimulus never holds the line during counting.

use tracing::{debug, info};

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::scenario::{Pins, TestVector};
use crate::signal::Signal;
use crate::sim_if::SimIf;
use crate::testbench::{Bench, Scoreboard};

pub struct StretchVerifier {
    line: Signal,
    output_enable: Signal,
    settle_pulses: u64,
    release_pulses: u64,
    trailing_pulses: u64,
    max_stretch_pulses: u64,
}

impl StretchVerifier {
    pub fn new<C: SimIf>(bench: &Bench<C>, pins: &Pins, config: &HarnessConfig) -> HarnessResult<Self> {
        Ok(Self {
            line: bench.signal(&pins.line)?,
            output_enable: bench.signal(&pins.output_enable)?,
            settle_pulses: config.settle_pulses,
            release_pulses: config.release_pulses,
            trailing_pulses: config.trailing_pulses,
            max_stretch_pulses: config.max_stretch_pulses,
        })
    }

    /// Measure one vector and return the observed stretch count.
    pub fn measure<C: SimIf>(&self, bench: &mut Bench<C>, index: usize) -> HarnessResult<u64> {
        bench.set(self.line, 0)?;
        bench.pulses(self.settle_pulses)?;

        bench.set(self.line, 1)?;
        bench.pulses(self.release_pulses)?;

        let mut actual = 0;
        while bench.is_high(self.output_enable) {
            if actual == self.max_stretch_pulses {
                return Err(HarnessError::StretchCeiling {
                    index,
                    pulses: actual,
                });
            }
            actual += 1;
            bench.pulse()?;
        }

        bench.pulses(self.trailing_pulses)?;
        Ok(actual)
    }

    /// Run every vector, recording each result. A mismatch never stops the
    /// remaining vectors.
    pub fn verify<C: SimIf>(
        &self,
        bench: &mut Bench<C>,
        vectors: &[TestVector],
        scoreboard: &mut Scoreboard,
    ) -> HarnessResult<()> {
        for (ix, vector) in vectors.iter().enumerate() {
            let actual = self.measure(bench, ix)?;
            let outcome = scoreboard.add(ix, vector.expected, actual);
            match outcome.passed() {
                true => debug!(ix, stretched = actual, "vector matched"),
                false => info!(ix, expected = vector.expected, stretched = actual, "vector mismatched"),
            }
        }
        Ok(())
    }
}
