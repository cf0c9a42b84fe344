pub use crate::clock::Clock;
pub use crate::config::HarnessConfig;
pub use crate::model::StretchModel;
pub use crate::runner::{run_scenario, Outcome, Run, RunResult};
pub use crate::scenario::{Pins, Scenario, TestVector};
pub use crate::signal::Signal;
pub use crate::sim_if::{Direction, SignalInfo, SimIf};
pub use crate::stimulus::{Sequencer, Step, Stimulus, TimedEvent};
pub use crate::stretch::StretchVerifier;
pub use crate::testbench::{Bench, Scoreboard, VectorOutcome};
pub use crate::wave::Recorder;
pub use crate::{HarnessError, HarnessResult};
