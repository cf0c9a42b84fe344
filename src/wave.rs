//! Waveform recorder.
//!
//! Samples are kept in memory as value changes keyed by the harness time
//! counter and written out once, as VCD, when the run is over. Nothing
//! time-of-day dependent goes into the file, so identical runs produce
//! identical bytes.

use intmap::IntMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;
use ::vcd::{IdCode, SimulationCommand, TimescaleUnit, Value, Writer};

use crate::signal::Signal;
use crate::sim_if::SimIf;

pub const DEFAULT_SCOPE: &str = "top";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    pub time: u64,
    /// (index into the registered variables, new value)
    pub changes: Vec<(usize, u64)>,
}

#[derive(Clone, Debug)]
struct Var {
    signal: Signal,
    name: String,
}

pub struct Recorder {
    scope: String,
    vars: Vec<Var>,
    // keyed by signal handle
    last: IntMap<u64>,
    trace: Vec<Sample>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(DEFAULT_SCOPE)
    }
}

impl Recorder {
    pub fn new(scope: &str) -> Self {
        Self {
            scope: scope.to_string(),
            vars: Vec::new(),
            last: IntMap::new(),
            trace: Vec::new(),
        }
    }

    /// Register every signal the circuit exports. Must happen before the
    /// first sample.
    pub fn register<C: SimIf + ?Sized>(&mut self, dut: &C) {
        assert!(
            self.trace.is_empty(),
            "signals must be registered before sampling"
        );
        for (handle, info) in dut.signals().iter().enumerate() {
            self.vars.push(Var {
                signal: Signal::from_handle(dut, handle),
                name: info.name.clone(),
            });
        }
        debug!(signals = self.vars.len(), "registered signals for tracing");
    }

    /// Record the current value of every registered signal at `time`. Only
    /// values that differ from the previous sample are stored.
    pub fn sample<C: SimIf + ?Sized>(&mut self, dut: &C, time: u64) {
        if let Some(prev) = self.trace.last() {
            assert!(
                time > prev.time,
                "sample time {} does not follow {}",
                time,
                prev.time
            );
        }
        let mut changes = Vec::new();
        for (ix, var) in self.vars.iter().enumerate() {
            let value = var.signal.u64(dut);
            let key = var.signal.handle() as u64;
            if self.last.get(key) != Some(&value) {
                self.last.insert(key, value);
                changes.push((ix, value));
            }
        }
        self.trace.push(Sample { time, changes });
    }

    pub fn trace(&self) -> &[Sample] {
        &self.trace
    }

    pub fn samples(&self) -> usize {
        self.trace.len()
    }

    pub fn serialize<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut writer = Writer::new(&mut *out);
        writer.timescale(1, TimescaleUnit::NS)?;
        writer.add_module(&self.scope)?;
        let ids = self
            .vars
            .iter()
            .map(|v| writer.add_wire(v.signal.width(), &v.name))
            .collect::<io::Result<Vec<IdCode>>>()?;
        writer.upscope()?;
        writer.enddefinitions()?;

        for (n, sample) in self.trace.iter().enumerate() {
            writer.timestamp(sample.time)?;
            if n == 0 {
                writer.begin(SimulationCommand::Dumpvars)?;
            }
            for &(ix, value) in &sample.changes {
                let width = self.vars[ix].signal.width();
                change(&mut writer, ids[ix], width, value)?;
            }
            if n == 0 {
                writer.end()?;
            }
        }
        drop(writer);
        out.flush()
    }

    pub fn write_file(&self, path: &Path) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.serialize(&mut out)
    }
}

fn change<W: Write>(writer: &mut Writer<W>, id: IdCode, width: u32, value: u64) -> io::Result<()> {
    if width == 1 {
        writer.change_scalar(id, bit(value, 0))
    } else {
        let bits = (0..width).rev().map(|i| bit(value, i)).collect::<Vec<_>>();
        writer.change_vector(id, &bits)
    }
}

fn bit(value: u64, i: u32) -> Value {
    if i < 64 && (value >> i) & 1 == 1 {
        Value::V1
    } else {
        Value::V0
    }
}
