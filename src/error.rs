//! Harness faults.
//!
//! Everything in here aborts a run. Stretch mismatches are not errors; they
//! are collected by the [`Scoreboard`](crate::testbench::Scoreboard).

use thiserror::Error;

pub type HarnessResult<T> = Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// The clock driver was asked to pulse while the clock line was high.
    #[error("clock is not low at time {time}; pulses must not overlap")]
    ClockNotLow { time: u64 },

    /// No signal with this name is exported by the circuit.
    #[error("circuit has no signal named '{0}'")]
    UnknownSignal(String),

    /// The clock line belongs to the clock driver; scripts may not drive it.
    #[error("signal '{0}' is the clock and is driven only by the clock driver")]
    ClockDriven(String),

    /// Only inputs may be driven by the harness.
    #[error("signal '{0}' is not an input and cannot be set")]
    NotSettable(String),

    /// The circuit kept its output enable asserted past the ceiling.
    #[error("ix {index}: output enable still asserted after {pulses} pulses")]
    StretchCeiling { index: usize, pulses: u64 },

    #[error("no scenario named '{0}'")]
    UnknownScenario(String),

    #[error("invalid stretch list '{0}'")]
    InvalidVectorList(String),

    #[error("failed to write report: {0}")]
    Report(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
