use crate::error::{HarnessError, HarnessResult};
use crate::sim_if::{Direction, SimIf};

/// Non-owning handle to a circuit signal.
///
/// Handles are resolved once by name and then used for every access, so the
/// hot loop never goes through a name lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signal {
    pub(crate) handle: usize,
    pub(crate) width: u32,
    pub(crate) direction: Direction,
}

impl Signal {
    pub fn lookup<C: SimIf + ?Sized>(dut: &C, name: &str) -> HarnessResult<Self> {
        let handle = dut
            .get_handle_by_name(name)
            .ok_or_else(|| HarnessError::UnknownSignal(name.to_string()))?;
        Ok(Self::from_handle(dut, handle))
    }

    pub(crate) fn from_handle<C: SimIf + ?Sized>(dut: &C, handle: usize) -> Self {
        let info = &dut.signals()[handle];
        Signal {
            handle,
            width: info.width,
            direction: info.direction,
        }
    }

    pub fn handle(&self) -> usize {
        self.handle
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn name<'a, C: SimIf + ?Sized>(&self, dut: &'a C) -> &'a str {
        &dut.signals()[self.handle].name
    }

    pub fn is_modifiable(&self) -> bool {
        matches!(self.direction, Direction::Input)
    }

    fn mask(&self) -> u64 {
        if self.width >= 64 {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        }
    }

    pub fn u64<C: SimIf + ?Sized>(&self, dut: &C) -> u64 {
        dut.get_value(self.handle) & self.mask()
    }

    pub fn is_high<C: SimIf + ?Sized>(&self, dut: &C) -> bool {
        self.u64(dut) != 0
    }

    /// Drive an input. Values wider than the signal are truncated.
    pub fn set<C: SimIf + ?Sized>(&self, dut: &mut C, val: u64) -> HarnessResult<()> {
        if !self.is_modifiable() {
            return Err(HarnessError::NotSettable(self.name(dut).to_string()));
        }
        dut.set_value(self.handle, val & self.mask());
        Ok(())
    }
}
