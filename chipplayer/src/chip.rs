// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The chip bank: an ordered list of I/O chip bindings attached to address ranges.
//!
//! Mirrors the `io68_t` vtable of the original sc68 emulator (`readB/W/L`, `writeB/W/L`,
//! `interrupt`, `next_interrupt`, `adjust_cycle`, `reset`) one trait method at a time. `destroy`
//! is not part of the trait: Rust's `Drop` covers it for free.
//!
//! Chips never hold a reference back to the CPU (see spec's design notes on the CPU/chip cyclic
//! dependency): [PlaybackDriver](crate::driver::PlaybackDriver) polls [ChipBank::pending_interrupt]
//! once per quantum and delivers the exception itself.

/// A sound or I/O chip attached to the bus at a fixed address range.
///
/// Offsets passed to the read/write methods are already relative to the chip's base address.
pub trait Chip {
    /// Short identifying name, used in diagnostics only.
    fn name(&self) -> &'static str;

    /// Reads a byte at the given offset within the chip's range.
    fn read_byte(&mut self, offset: u32) -> u8;

    /// Writes a byte at the given offset within the chip's range.
    fn write_byte(&mut self, offset: u32, value: u8);

    /// Reads a big-endian word at the given offset.
    ///
    /// The default implementation reads the two halves as independent byte accesses, which is
    /// the well-defined behavior spec.md mandates: a word read returns both halves of the
    /// register, each fetched the same way a byte read would fetch it.
    fn read_word(&mut self, offset: u32) -> u16 {
        (self.read_byte(offset) as u16) << 8 | self.read_byte(offset.wrapping_add(1)) as u16
    }

    /// Writes a big-endian word at the given offset.
    ///
    /// The default implementation performs two byte writes, so a word write updates both halves
    /// of a 16-bit register, per spec.md.
    fn write_word(&mut self, offset: u32, value: u16) {
        self.write_byte(offset, (value >> 8) as u8);
        self.write_byte(offset.wrapping_add(1), value as u8);
    }

    /// Resets the chip's internal state to its power-on values.
    fn reset(&mut self);

    /// Returns the cycle (in the common cycle domain) at which this chip will next want to raise
    /// an interrupt, if it can predict one. Used only as a hint to bound a time slice.
    fn next_interrupt_cycle(&self, now: u64) -> Option<u64> {
        let _ = now;
        None
    }

    /// Returns the IRQ level this chip currently wants serviced, if any, at the given cycle.
    ///
    /// A return of `Some(level)` does not by itself clear the request: the chip is expected to
    /// clear its own latch when the driver later writes to its interrupt-acknowledge register, or
    /// when a new DMA/timer event supersedes it, exactly as real 68k peripherals behave.
    fn pending_interrupt(&self, now: u64) -> Option<u8> {
        let _ = now;
        None
    }

    /// Rebases the chip's internal cycle counters by `delta` without losing phase, called when
    /// the driver's cycle origin is rebased to avoid unbounded growth.
    fn adjust_cycle(&mut self, delta: u64) {
        let _ = delta;
    }

    /// Renders `frames` interleaved stereo samples into `output` (len == `frames * 2`), advancing
    /// the chip's internal generators by `cpu_cycles` cycles of the CPU clock. The chip must ADD
    /// its contribution to `output` (it does not own the mix buffer), saturating on overflow.
    ///
    /// `ram` is a read-only view of the plain RAM backing the bus, for chips that fetch sample
    /// data by DMA (Paula) rather than through CPU-driven register accesses (YM-2149). Chips that
    /// do not do DMA simply ignore it.
    fn render(&mut self, cpu_cycles: u64, frames: usize, output: &mut [i16], ram: &[u8]) {
        let _ = (cpu_cycles, frames, output, ram);
    }
}

/// A chip bound to a claimed, non-overlapping address range `[lo, hi]` (inclusive).
struct ChipBinding {
    lo: u32,
    hi: u32,
    chip: Box<dyn Chip>,
}

/// Ordered list of chip bindings attached to the bus.
///
/// Resolution is a linear scan, as spec.md specifies ("N ≤ 8 typically"); the bank returns at
/// most one chip per address since bindings are required not to overlap.
#[derive(Default)]
pub struct ChipBank {
    bindings: Vec<ChipBinding>,
}

impl ChipBank {
    pub fn new() -> Self {
        Self { bindings: Vec::new() }
    }

    /// Binds a chip to `[lo, hi]` (inclusive). Panics if the range overlaps an existing binding,
    /// since spec.md declares this an invariant of the chip bank, not a runtime condition to
    /// recover from.
    pub fn bind(&mut self, lo: u32, hi: u32, chip: Box<dyn Chip>) {
        assert!(lo <= hi, "chip binding range is empty or inverted");
        for b in &self.bindings {
            assert!(hi < b.lo || lo > b.hi, "chip binding {:#x}..={:#x} overlaps existing binding {:#x}..={:#x}", lo, hi, b.lo, b.hi);
        }
        log::debug!("binding {} at {:#x}..={:#x}", chip.name(), lo, hi);
        self.bindings.push(ChipBinding { lo, hi, chip });
    }

    /// Returns the chip bound to `addr`, along with the offset of `addr` within its range.
    pub fn resolve(&mut self, addr: u32) -> Option<(&mut dyn Chip, u32)> {
        for b in &mut self.bindings {
            if addr >= b.lo && addr <= b.hi {
                return Some((b.chip.as_mut(), addr - b.lo));
            }
        }
        None
    }

    /// Resets every bound chip.
    pub fn reset(&mut self) {
        for b in &mut self.bindings {
            b.chip.reset();
        }
    }

    /// The minimal cycle at which any chip wants to raise an interrupt, across all bound chips.
    pub fn next_interrupt(&self, now: u64) -> Option<u64> {
        self.bindings.iter().filter_map(|b| b.chip.next_interrupt_cycle(now)).min()
    }

    /// The highest pending interrupt level among all bound chips, with ties broken by
    /// registration order (the first chip bound wins a tie), per spec.md §4.4.
    ///
    /// `Iterator::max()` would instead keep the *last* equally-maximal element, so the
    /// comparison below is written out by hand to keep the first one on a tie.
    pub fn pending_interrupt(&self, now: u64) -> Option<u8> {
        let mut best: Option<u8> = None;
        for b in &self.bindings {
            if let Some(level) = b.chip.pending_interrupt(now) {
                let higher = match best {
                    Some(b) => level > b,
                    None => true,
                };
                if higher {
                    best = Some(level);
                }
            }
        }
        best
    }

    /// Rebases every bound chip's internal cycle counters.
    pub fn adjust_cycle(&mut self, delta: u64) {
        for b in &mut self.bindings {
            b.chip.adjust_cycle(delta);
        }
    }

    /// Renders every bound chip's contribution into `output`, mixing in place.
    pub fn render(&mut self, cpu_cycles: u64, frames: usize, output: &mut [i16], ram: &[u8]) {
        for b in &mut self.bindings {
            b.chip.render(cpu_cycles, frames, output, ram);
        }
    }
}
