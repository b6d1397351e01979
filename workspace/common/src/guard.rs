use std::cell::Cell;

use crate::error::WorkflowError;

/// Single-slot in-flight guard over a workflow's state cell.
///
/// Acquiring moves the slot into its busy state; a second acquire while busy
/// fails with [`WorkflowError::Busy`]. If the guard is dropped without
/// [`InFlight::release`] (the in-flight future was dropped) the slot falls back
/// to `abandoned`.
pub(crate) struct InFlight<'a, S: Copy + PartialEq> {
    slot: &'a Cell<S>,
    abandoned: Option<S>,
}

impl<'a, S: Copy + PartialEq> InFlight<'a, S> {
    pub(crate) fn acquire(slot: &'a Cell<S>, busy: S, abandoned: S) -> Result<Self, WorkflowError> {
        if slot.get() == busy {
            return Err(WorkflowError::Busy);
        }
        slot.set(busy);
        Ok(Self {
            slot,
            abandoned: Some(abandoned),
        })
    }

    /// Leaves the busy state for `next`.
    pub(crate) fn release(mut self, next: S) {
        self.abandoned = None;
        self.slot.set(next);
    }
}

impl<S: Copy + PartialEq> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        if let Some(state) = self.abandoned.take() {
            self.slot.set(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Slot {
        Idle,
        Busy,
        Done,
    }

    #[test]
    fn test_second_acquire_is_refused() {
        let slot = Cell::new(Slot::Idle);
        let guard = InFlight::acquire(&slot, Slot::Busy, Slot::Idle).unwrap();
        assert_eq!(slot.get(), Slot::Busy);
        assert_eq!(
            InFlight::acquire(&slot, Slot::Busy, Slot::Idle).err(),
            Some(WorkflowError::Busy)
        );
        guard.release(Slot::Done);
        assert_eq!(slot.get(), Slot::Done);
    }

    #[test]
    fn test_dropped_guard_falls_back() {
        let slot = Cell::new(Slot::Idle);
        {
            let _guard = InFlight::acquire(&slot, Slot::Busy, Slot::Idle).unwrap();
        }
        assert_eq!(slot.get(), Slot::Idle);
    }
}
