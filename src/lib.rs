//! Deterministic clock-stretch testbench.
//!
//! A [`Bench`](testbench::Bench) owns a circuit behind [`SimIf`](sim_if::SimIf),
//! drives it one clock pulse at a time, optionally records a VCD trace, and
//! checks how many pulses the circuit holds a bus line after release.

pub mod clock;
pub mod config;
pub mod error;
mod junit;
pub mod model;
pub mod prelude;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod signal;
pub mod sim_if;
pub mod stimulus;
pub mod stretch;
pub mod testbench;
pub mod wave;

use once_cell::sync::OnceCell;

pub use error::{HarnessError, HarnessResult};

/// Suite name for the JUnit report; set by the binary.
pub static CRATE_NAME: OnceCell<String> = OnceCell::new();
