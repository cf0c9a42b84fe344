use std::path::PathBuf;

use crate::error::{HarnessError, HarnessResult};

/// Where the waveform goes when capture is on.
pub const DEFAULT_VCD_PATH: &str = "stretchbench.vcd";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Pulses the line is held low before each release.
    pub settle_pulses: u64,
    /// Pulses between release and the first output-enable check.
    pub release_pulses: u64,
    /// Pulses after each vector to let the bus return to idle.
    pub trailing_pulses: u64,
    /// Stretch counts above this abort the run.
    pub max_stretch_pulses: u64,
    pub vcd_path: Option<PathBuf>,
    pub junit_path: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            settle_pulses: 3,
            release_pulses: 1,
            trailing_pulses: 2,
            max_stretch_pulses: 1024,
            vcd_path: None,
            junit_path: None,
        }
    }
}

impl HarnessConfig {
    pub fn capture(&self) -> bool {
        self.vcd_path.is_some()
    }
}

/// Parse a comma separated list of stretch counts, e.g. `0,0,3,3`.
pub fn parse_stretch_list(s: &str) -> HarnessResult<Vec<u64>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(|n| {
            n.trim()
                .parse::<u64>()
                .map_err(|_| HarnessError::InvalidVectorList(s.to_string()))
        })
        .collect()
}
