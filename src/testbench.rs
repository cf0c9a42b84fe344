use tracing::debug;

use crate::clock::Clock;
use crate::error::{HarnessError, HarnessResult};
use crate::signal::Signal;
use crate::sim_if::SimIf;
use crate::wave::Recorder;

/*
 * BENCH
 */
/// The circuit, its clock and the optional waveform recorder, owned for
/// the duration of one run.
pub struct Bench<C: SimIf> {
    dut: C,
    clock: Clock,
    time: u64,
    pulses: u64,
    recorder: Option<Recorder>,
}

impl<C: SimIf> Bench<C> {
    /// Resolve the clock, optionally register every signal for tracing, and
    /// take the time-0 sample.
    pub fn new(mut dut: C, clk: &str, capture: bool) -> HarnessResult<Self> {
        let clk = Signal::lookup(&dut, clk)?;
        clk.set(&mut dut, 0)?;
        let mut recorder = capture.then(Recorder::default);
        if let Some(rec) = recorder.as_mut() {
            rec.register(&dut);
            rec.sample(&dut, 0);
        }
        Ok(Self {
            dut,
            clock: Clock::new(clk),
            time: 1,
            pulses: 0,
            recorder,
        })
    }

    pub fn signal(&self, name: &str) -> HarnessResult<Signal> {
        Signal::lookup(&self.dut, name)
    }

    /// Resolve a signal that stimulus may drive. Fails for the clock.
    pub fn drivable(&self, name: &str) -> HarnessResult<Signal> {
        let sig = self.signal(name)?;
        self.check_not_clock(sig)?;
        Ok(sig)
    }

    pub fn set(&mut self, sig: Signal, val: u64) -> HarnessResult<()> {
        self.check_not_clock(sig)?;
        sig.set(&mut self.dut, val)
    }

    fn check_not_clock(&self, sig: Signal) -> HarnessResult<()> {
        if sig.handle() == self.clock.signal().handle() {
            return Err(HarnessError::ClockDriven(sig.name(&self.dut).to_string()));
        }
        Ok(())
    }

    pub fn is_high(&self, sig: Signal) -> bool {
        sig.is_high(&self.dut)
    }

    pub fn pulse(&mut self) -> HarnessResult<()> {
        self.time = self
            .clock
            .advance_pulse(&mut self.dut, self.recorder.as_mut(), self.time)?;
        self.pulses += 1;
        Ok(())
    }

    pub fn pulses(&mut self, n: u64) -> HarnessResult<()> {
        for _ in 0..n {
            self.pulse()?;
        }
        Ok(())
    }

    /// Time of the next sample.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Pulses run so far.
    pub fn pulse_count(&self) -> u64 {
        self.pulses
    }

    pub fn recorder(&self) -> Option<&Recorder> {
        self.recorder.as_ref()
    }

    pub fn into_parts(self) -> (C, Option<Recorder>) {
        debug!(pulses = self.pulses, time = self.time, "bench finished");
        (self.dut, self.recorder)
    }
}

/*
 * SCOREBOARD
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorOutcome {
    pub index: usize,
    pub expected: u64,
    pub observed: u64,
}

impl VectorOutcome {
    pub fn passed(&self) -> bool {
        self.expected == self.observed
    }

    pub fn diagnostic(&self) -> String {
        format!(
            "ix {} expected {} stretched cycles, got {}",
            self.index, self.expected, self.observed
        )
    }
}

/// Expected against observed stretch counts, in vector order.
#[derive(Clone, Debug, Default)]
pub struct Scoreboard {
    outcomes: Vec<VectorOutcome>,
    matched: u32,
    errors: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, index: usize, expected: u64, observed: u64) -> &VectorOutcome {
        let outcome = VectorOutcome {
            index,
            expected,
            observed,
        };
        match outcome.passed() {
            true => self.matched += 1,
            false => self.errors += 1,
        }
        self.outcomes.push(outcome);
        &self.outcomes[self.outcomes.len() - 1]
    }

    pub fn outcomes(&self) -> &[VectorOutcome] {
        &self.outcomes
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &VectorOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    /// An empty scoreboard passes.
    pub fn passed(&self) -> bool {
        self.errors == 0
    }

    pub fn result_str(&self) -> String {
        format!(
            "vectors={}, matched={}, errors={}",
            self.outcomes.len(),
            self.matched,
            self.errors
        )
    }
}
