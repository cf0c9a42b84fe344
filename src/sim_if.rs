//! Interface between the harness and a circuit under test.
//!
//! Any simulation engine can stand behind [`SimIf`]: a generated model, an
//! interpreter, or a hand-written stub. The harness only ever sees named
//! signals, their values, and a single `step`.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
    Internal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalInfo {
    pub name: String,
    pub width: u32,
    pub direction: Direction,
}

impl SignalInfo {
    pub fn new(name: &str, width: u32, direction: Direction) -> Self {
        Self {
            name: name.to_string(),
            width,
            direction,
        }
    }
}

pub trait SimIf {
    /// All exported signals. A signal's handle is its index in this slice.
    fn signals(&self) -> &[SignalInfo];
    fn get_value(&self, handle: usize) -> u64;
    fn set_value(&mut self, handle: usize, value: u64);
    /// Advance the circuit by one evaluation step.
    fn step(&mut self);

    fn get_handle_by_name(&self, name: &str) -> Option<usize> {
        self.signals().iter().position(|s| s.name == name)
    }
}

impl<T: SimIf + ?Sized> SimIf for Box<T> {
    fn signals(&self) -> &[SignalInfo] {
        (**self).signals()
    }
    fn get_value(&self, handle: usize) -> u64 {
        (**self).get_value(handle)
    }
    fn set_value(&mut self, handle: usize, value: u64) {
        (**self).set_value(handle, value)
    }
    fn step(&mut self) {
        (**self).step()
    }
    fn get_handle_by_name(&self, name: &str) -> Option<usize> {
        (**self).get_handle_by_name(name)
    }
}
