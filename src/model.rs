//! Scripted reference circuit.
//!
//! Stands in for a generated peripheral model. It exports the same pins as
//! the stretcher peripheral and holds SCL for a scripted number of pulses
//! each time the bus is released after having been low.

use crate::sim_if::{Direction, SignalInfo, SimIf};

const CLK: usize = 0;
const SWITCH: usize = 1;
const SCL_I: usize = 2;
const SCL_OE: usize = 3;
const SCL_O: usize = 4;
const LED: usize = 5;
const HOLD: usize = 6;

pub struct StretchModel {
    signals: Vec<SignalInfo>,
    values: Vec<u64>,
    script: Vec<u64>,
    releases: usize,
    remaining: u64,
    armed: bool,
    clk_last: bool,
    // Idle bus reads high; the first release is only seen after a low period.
    scl_last: bool,
}

impl StretchModel {
    pub fn new(script: Vec<u64>) -> Self {
        let signals = vec![
            SignalInfo::new("clk", 1, Direction::Input),
            SignalInfo::new("switch", 1, Direction::Input),
            SignalInfo::new("scl_i", 1, Direction::Input),
            SignalInfo::new("scl_oe", 1, Direction::Output),
            SignalInfo::new("scl_o", 1, Direction::Output),
            SignalInfo::new("led", 1, Direction::Output),
            SignalInfo::new("hold", 8, Direction::Internal),
        ];
        let values = vec![0; signals.len()];
        Self {
            signals,
            values,
            script,
            releases: 0,
            remaining: 0,
            armed: false,
            clk_last: false,
            scl_last: true,
        }
    }

    /// Number of bus releases observed so far.
    pub fn releases(&self) -> usize {
        self.releases
    }

    fn rising_edge(&mut self) {
        let scl = self.values[SCL_I] != 0;
        if self.values[SWITCH] != 0 {
            self.armed = true;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.armed && scl && !self.scl_last {
            let stretch = self.script.get(self.releases).copied().unwrap_or(0);
            self.releases += 1;
            self.remaining = stretch;
        }
        self.scl_last = scl;

        self.values[SCL_OE] = u64::from(self.remaining > 0);
        self.values[SCL_O] = 0;
        self.values[LED] = u64::from(self.armed);
        self.values[HOLD] = self.remaining.min(0xff);
    }
}

impl SimIf for StretchModel {
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
        let clk = self.values[CLK] != 0;
        if clk && !self.clk_last {
            self.rising_edge();
        }
        self.clk_last = clk;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(m: &mut StretchModel) {
        m.set_value(CLK, 1);
        m.step();
        m.set_value(CLK, 0);
        m.step();
    }

    #[test]
    fn holds_for_scripted_pulses_after_release() {
        let mut m = StretchModel::new(vec![2]);
        m.set_value(SWITCH, 1);
        m.set_value(SCL_I, 0);
        edge(&mut m);
        assert_eq!(m.get_value(LED), 1);
        m.set_value(SCL_I, 1);
        edge(&mut m);
        assert_eq!(m.get_value(SCL_OE), 1);
        assert_eq!(m.get_value(HOLD), 2);
        edge(&mut m);
        assert_eq!(m.get_value(SCL_OE), 1);
        edge(&mut m);
        assert_eq!(m.get_value(SCL_OE), 0);
        assert_eq!(m.releases(), 1);
    }

    #[test]
    fn wide_stretch_is_not_truncated() {
        let mut m = StretchModel::new(vec![1 << 33]);
        m.set_value(SWITCH, 1);
        m.set_value(SCL_I, 0);
        edge(&mut m);
        m.set_value(SCL_I, 1);
        for _ in 0..300 {
            edge(&mut m);
        }
        assert_eq!(m.get_value(SCL_OE), 1);
        // hold saturates at its 8-bit width
        assert_eq!(m.get_value(HOLD), 0xff);
    }

    #[test]
    fn ignores_bus_until_armed() {
        let mut m = StretchModel::new(vec![5]);
        m.set_value(SCL_I, 0);
        edge(&mut m);
        m.set_value(SCL_I, 1);
        edge(&mut m);
        assert_eq!(m.get_value(SCL_OE), 0);
        assert_eq!(m.releases(), 0);
    }

    #[test]
    fn only_reacts_on_rising_clock() {
        let mut m = StretchModel::new(vec![]);
        m.set_value(SWITCH, 1);
        m.step();
        assert_eq!(m.get_value(LED), 0);
        m.set_value(CLK, 1);
        m.step();
        m.step();
        assert_eq!(m.get_value(LED), 1);
    }
}
