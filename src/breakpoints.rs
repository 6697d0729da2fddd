//! Fixed-capacity breakpoint storage.

use core::fmt::{self, Display};

use managed::ManagedSlice;

/// An error returned when the breakpoint set cannot be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakpointError {
    /// Every slot is already in use.
    CapacityExceeded,
    /// The address is not a breakpoint.
    NotFound,
}

impl Display for BreakpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakpointError::CapacityExceeded => write!(f, "no free breakpoint slots"),
            BreakpointError::NotFound => write!(f, "no breakpoint at the given address"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BreakpointError {}

/// A bounded set of distinct breakpoint addresses.
///
/// Breakpoints are kept in a slot table whose size is fixed at construction.
/// Lookups are linear, which is fine for the small capacities debuggers
/// actually use (the default is
/// [`DEFAULT_BREAKPOINT_CAPACITY`](crate::DEFAULT_BREAKPOINT_CAPACITY)), even
/// though [`exists`](Self::exists) runs at every instruction boundary.
pub struct Breakpoints<'a> {
    slots: ManagedSlice<'a, Option<u64>>,
    len: usize,
}

impl<'a> Breakpoints<'a> {
    /// Create an empty set backed by the provided slots.
    ///
    /// Any addresses already present in `slots` are discarded.
    pub fn new(slots: impl Into<ManagedSlice<'a, Option<u64>>>) -> Breakpoints<'a> {
        let mut slots = slots.into();
        for slot in slots.iter_mut() {
            *slot = None;
        }

        Breakpoints { slots, len: 0 }
    }

    /// Create an empty, heap-allocated set with room for `capacity`
    /// addresses.
    #[cfg(feature = "alloc")]
    pub fn with_capacity(capacity: usize) -> Breakpoints<'static> {
        Breakpoints {
            slots: ManagedSlice::Owned(alloc::vec![None; capacity]),
            len: 0,
        }
    }

    /// Insert `addr` into the set.
    ///
    /// Inserting an address that is already present succeeds without using
    /// another slot. When the set is full, it is left untouched and
    /// [`BreakpointError::CapacityExceeded`] is returned.
    pub fn add(&mut self, addr: u64) -> Result<(), BreakpointError> {
        if self.exists(addr) {
            return Ok(());
        }

        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.is_none())
            .ok_or(BreakpointError::CapacityExceeded)?;
        *slot = Some(addr);
        self.len += 1;
        Ok(())
    }

    /// Remove `addr` from the set.
    pub fn remove(&mut self, addr: u64) -> Result<(), BreakpointError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| **slot == Some(addr))
            .ok_or(BreakpointError::NotFound)?;
        *slot = None;
        self.len -= 1;
        Ok(())
    }

    /// Check whether `addr` is a breakpoint.
    #[inline]
    pub fn exists(&self, addr: u64) -> bool {
        // fast path for the common "no breakpoints set" case
        self.len != 0 && self.slots.iter().any(|slot| *slot == Some(addr))
    }

    /// Number of breakpoints currently set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no breakpoints are set.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of breakpoints the set can hold.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterate over the addresses currently in the set (in slot order).
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    /// Remove every breakpoint.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.len = 0;
    }
}

impl fmt::Debug for Breakpoints<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
