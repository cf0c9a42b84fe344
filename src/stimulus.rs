//! Scripted pin assignments.
//!
//! Two scripting styles are supported. Threshold-keyed scripts attach each
//! assignment to a pulse index and are checked once before every pulse.
//! Sequence-keyed scripts are a flat list of assignments and pulse runs,
//! executed strictly in order.

use tracing::trace;

use crate::error::HarnessResult;
use crate::signal::Signal;
use crate::sim_if::SimIf;
use crate::testbench::Bench;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimedEvent {
    pub pulse: u64,
    pub signal: String,
    pub value: u64,
}

impl TimedEvent {
    pub fn new(pulse: u64, signal: &str, value: u64) -> Self {
        Self {
            pulse,
            signal: signal.to_string(),
            value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Set { signal: String, value: u64 },
    Pulse(u64),
}

impl Step {
    pub fn set(signal: &str, value: u64) -> Self {
        Step::Set {
            signal: signal.to_string(),
            value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stimulus {
    /// Fires each event once, before the first pulse whose index is at least
    /// `event.pulse`, and runs `pulses` pulses in total.
    Timed { events: Vec<TimedEvent>, pulses: u64 },
    Sequence(Vec<Step>),
}

impl Stimulus {
    /// Toggle `signal` every `period` pulses, starting high at pulse 0.
    pub fn periodic(signal: &str, period: u64, pulses: u64) -> Self {
        let period = period.max(1);
        let events = (0..pulses)
            .step_by(period as usize)
            .enumerate()
            .map(|(n, p)| TimedEvent::new(p, signal, u64::from(n % 2 == 0)))
            .collect();
        Stimulus::Timed { events, pulses }
    }

    /// Pulses the script runs on its own.
    pub fn pulses(&self) -> u64 {
        match self {
            Stimulus::Timed { pulses, .. } => *pulses,
            Stimulus::Sequence(steps) => steps
                .iter()
                .map(|s| match s {
                    Step::Pulse(n) => *n,
                    Step::Set { .. } => 0,
                })
                .sum(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub time: u64,
    pub handle: usize,
    pub value: u64,
}

enum ResolvedStep {
    Set(Signal, u64),
    Pulse(u64),
}

enum Script {
    Timed {
        events: Vec<(u64, Signal, u64)>,
        cursor: usize,
        pulses: u64,
    },
    Sequence(Vec<ResolvedStep>),
}

/// A [`Stimulus`] with every signal name resolved against a circuit.
pub struct Sequencer {
    script: Script,
    history: Vec<Assignment>,
}

impl Sequencer {
    pub fn new<C: SimIf>(bench: &Bench<C>, stimulus: &Stimulus) -> HarnessResult<Self> {
        let script = match stimulus {
            Stimulus::Timed { events, pulses } => {
                let mut resolved = events
                    .iter()
                    .map(|e| -> HarnessResult<_> { Ok((e.pulse, bench.drivable(&e.signal)?, e.value)) })
                    .collect::<HarnessResult<Vec<_>>>()?;
                // stable: same-pulse events keep their script order
                resolved.sort_by_key(|&(pulse, _, _)| pulse);
                Script::Timed {
                    events: resolved,
                    cursor: 0,
                    pulses: *pulses,
                }
            }
            Stimulus::Sequence(steps) => Script::Sequence(
                steps
                    .iter()
                    .map(|s| -> HarnessResult<_> {
                        Ok(match s {
                            Step::Set { signal, value } => ResolvedStep::Set(bench.drivable(signal)?, *value),
                            Step::Pulse(n) => ResolvedStep::Pulse(*n),
                        })
                    })
                    .collect::<HarnessResult<Vec<_>>>()?,
            ),
        };
        Ok(Self {
            script,
            history: Vec::new(),
        })
    }

    /// Every assignment made so far, in the order it was made.
    pub fn history(&self) -> &[Assignment] {
        &self.history
    }

    /// Apply every timed event that is due at `pulse` and has not fired yet.
    /// Returns how many fired. Sequence scripts have nothing to apply here.
    pub fn apply_due<C: SimIf>(&mut self, bench: &mut Bench<C>, pulse: u64) -> HarnessResult<usize> {
        let Script::Timed { events, cursor, .. } = &mut self.script else {
            return Ok(0);
        };
        let start = *cursor;
        while let Some(&(at, sig, value)) = events.get(*cursor) {
            if at > pulse {
                break;
            }
            bench.set(sig, value)?;
            trace!(pulse, handle = sig.handle(), value, "timed assignment");
            self.history.push(Assignment {
                time: bench.time(),
                handle: sig.handle(),
                value,
            });
            *cursor += 1;
        }
        Ok(*cursor - start)
    }

    /// Run the whole script on `bench`.
    pub fn run<C: SimIf>(&mut self, bench: &mut Bench<C>) -> HarnessResult<()> {
        if let Script::Timed { pulses, .. } = self.script {
            for pulse in 0..pulses {
                self.apply_due(bench, pulse)?;
                bench.pulse()?;
            }
            return Ok(());
        }
        let Script::Sequence(steps) = &self.script else {
            return Ok(());
        };
        for step in steps {
            match *step {
                ResolvedStep::Set(sig, value) => {
                    bench.set(sig, value)?;
                    self.history.push(Assignment {
                        time: bench.time(),
                        handle: sig.handle(),
                        value,
                    });
                }
                ResolvedStep::Pulse(n) => bench.pulses(n)?,
            }
        }
        Ok(())
    }
}
