//! The [`Target`] trait: the architecture-specific half of the stub.

/// Architecture-specific primitives required to debug a simulated processor.
///
/// A simulator implements this trait once per simulated architecture. The
/// stub never interprets register contents or instruction encodings itself;
/// it only moves words and bytes between the debugger and these methods.
///
/// All methods are expected to be synchronous and to complete immediately
/// from the stub's point of view.
///
/// # Register width
///
/// Registers are exchanged as `u64`. Only the low
/// [`word_size`](crate::GdbStubBuilder::word_size) bytes are sent to the
/// debugger, and values written by the debugger never exceed that width.
pub trait Target {
    /// Number of registers reported to the debugger by the `g` packet (and
    /// expected from it in the `G` packet).
    ///
    /// Registers are numbered `0..register_count()` in the order the
    /// debugger's architecture description expects.
    fn register_count(&self) -> usize;

    /// Read register `idx`.
    fn read_register(&mut self, idx: usize) -> u64;

    /// Write `val` into register `idx`.
    fn write_register(&mut self, idx: usize, val: u64);

    /// Read a single byte of simulated memory.
    fn read_byte(&mut self, addr: u64) -> u8;

    /// Write a single byte of simulated memory.
    fn write_byte(&mut self, addr: u64, val: u8);

    /// Move the program counter to `addr`.
    ///
    /// Called when the debugger resumes or steps from an explicit address
    /// (`cAA..AA` / `sAA..AA`).
    fn set_pc(&mut self, addr: u64);

    /// Stop the simulation. Invoked when the debugger sends a kill request.
    fn stop_simulation(&mut self);

    /// Whether the simulated processor is big-endian.
    ///
    /// Register words are sent over the wire in the target's byte order, so
    /// this flag decides whether the stub swaps bytes when encoding and
    /// decoding registers.
    fn is_big_endian(&self) -> bool;
}
