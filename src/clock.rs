use crate::error::{HarnessError, HarnessResult};
use crate::signal::Signal;
use crate::sim_if::SimIf;
use crate::wave::Recorder;

/// Drives the circuit clock one full period at a time.
///
/// This is the only place that touches the clock line or calls `step`, so
/// every step is paired with exactly one toggle and one sample.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    signal: Signal,
}

impl Clock {
    pub fn new(signal: Signal) -> Self {
        Self { signal }
    }

    pub fn signal(&self) -> Signal {
        self.signal
    }

    /// Run one pulse: clock high, step, sample, then clock low, step,
    /// sample. `time` is the time of the first sample; the returned value is
    /// the time of the next one.
    pub fn advance_pulse<C: SimIf + ?Sized>(
        &self,
        dut: &mut C,
        mut trace: Option<&mut Recorder>,
        time: u64,
    ) -> HarnessResult<u64> {
        if self.signal.is_high(dut) {
            return Err(HarnessError::ClockNotLow { time });
        }
        let mut time = time;
        for level in [1, 0] {
            self.signal.set(dut, level)?;
            dut.step();
            if let Some(rec) = trace.as_deref_mut() {
                rec.sample(dut, time);
            }
            time += 1;
        }
        Ok(time)
    }
}
