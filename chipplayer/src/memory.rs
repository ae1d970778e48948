// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The 68k address space: a linear RAM buffer, a parallel access-tag buffer, and the chip bank.

use crate::chip::ChipBank;

use bitflags::bitflags;
use m68k_core::MemoryAccess;

bitflags! {
    /// Per-byte access flags recorded in the tag buffer, for diagnostics only.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct PageFlags: u8 {
        const READ    = 1 << 0;
        const WRITTEN = 1 << 1;
        const EXECUTED = 1 << 2;
    }
}

/// Smallest supported memory size, `2^17` bytes (128 KiB), per spec.md.
pub const MIN_LOG2MEM: u32 = 17;
/// Largest supported memory size, `2^24` bytes (16 MiB), per spec.md.
pub const MAX_LOG2MEM: u32 = 24;

/// Owns the 68k address space and dispatches accesses either to plain RAM or to a bound chip.
pub struct MemoryBus {
    mem: Vec<u8>,
    /// One access-flags byte per memory cell, same length as `mem`.
    tags: Vec<PageFlags>,
    /// `mem.len() - 1`: address mask, since the size is always a power of two.
    mask: u32,
    pub chips: ChipBank,
}

impl MemoryBus {
    /// Creates a bus with `1 << log2mem` bytes of RAM, clamped to spec.md's `[128 KiB, 16 MiB]`
    /// range.
    pub fn new(log2mem: u32) -> Self {
        let log2mem = log2mem.clamp(MIN_LOG2MEM, MAX_LOG2MEM);
        let size = 1usize << log2mem;
        Self {
            mem: vec![0; size],
            tags: vec![PageFlags::empty(); size],
            mask: size as u32 - 1,
            chips: ChipBank::new(),
        }
    }

    /// Size of the RAM buffer in bytes.
    pub fn size(&self) -> u32 {
        self.mask + 1
    }

    const fn wrap(&self, addr: u32) -> u32 {
        addr & self.mask
    }

    /// Copies `data` into RAM starting at `addr`, wrapping addresses modulo the memory size.
    pub fn load(&mut self, addr: u32, data: &[u8]) {
        for (i, &byte) in data.iter().enumerate() {
            let a = self.wrap(addr.wrapping_add(i as u32));
            self.mem[a as usize] = byte;
        }
    }

    /// Marks the byte at `addr` as executed. Called by [PlaybackDriver](crate::driver::PlaybackDriver)
    /// with the program counter before each instruction fetch, since the generic `MemoryAccess`
    /// trait has no notion of fetch-vs-data accesses.
    pub fn tag_executed(&mut self, addr: u32) {
        let a = self.wrap(addr) as usize;
        self.tags[a] |= PageFlags::EXECUTED;
    }

    /// Returns the access flags recorded for the byte at `addr`.
    pub fn tags_at(&self, addr: u32) -> PageFlags {
        self.tags[self.wrap(addr) as usize]
    }

    /// Returns a mutable slice over `[addr, addr + size)` if, and only if, the whole range lies
    /// in plain RAM (no chip binding overlaps it). Chip-backed regions have no linear byte
    /// representation, so this always fails for them, per spec.md.
    pub fn memptr(&mut self, addr: u32, size: u32) -> Option<&mut [u8]> {
        if size == 0 {
            return Some(&mut []);
        }
        for a in 0..size {
            if self.chips.resolve(addr.wrapping_add(a)).is_some() {
                return None;
            }
        }
        let start = self.wrap(addr);
        let end = start as u64 + size as u64;
        if end > self.mem.len() as u64 {
            return None;
        }
        Some(&mut self.mem[start as usize..end as usize])
    }

    /// Renders one quantum of audio from every bound chip, giving DMA-capable chips (Paula) a
    /// read-only view of RAM alongside the chip bank itself. Splitting the borrow on the two
    /// disjoint fields is what lets a chip both own its registers and read RAM in the same call.
    pub fn render_chips(&mut self, cpu_cycles: u64, frames: usize, output: &mut [i16]) {
        let Self { mem, chips, .. } = self;
        chips.render(cpu_cycles, frames, output, mem);
    }

    /// Fills `[addr, addr + size)` with `value`, wrapping addresses modulo the memory size.
    /// Unlike [Self::memptr], this happily writes through chip-backed ranges byte by byte.
    pub fn memset(&mut self, addr: u32, value: u8, size: u32) {
        for i in 0..size {
            let a = addr.wrapping_add(i);
            self.set_byte(a, value);
        }
    }

    /// `addr` is the raw, pre-wrap address: chip bindings are decoded by their real, absolute
    /// address regardless of how much RAM is installed (e.g. the YM-2149 sits at `0xFF8800` on
    /// an Atari ST whether the machine has 128 KiB or 4 MiB). Only a miss against every binding
    /// falls through to RAM, which does wrap with the installed size.
    fn read_byte_tagged(&mut self, addr: u32) -> u8 {
        if let Some((chip, offset)) = self.chips.resolve(addr) {
            return chip.read_byte(offset);
        }
        let wrapped = self.wrap(addr);
        self.tags[wrapped as usize] |= PageFlags::READ;
        self.mem[wrapped as usize]
    }

    fn write_byte_tagged(&mut self, addr: u32, value: u8) {
        if let Some((chip, offset)) = self.chips.resolve(addr) {
            chip.write_byte(offset, value);
            return;
        }
        let wrapped = self.wrap(addr);
        self.tags[wrapped as usize] |= PageFlags::WRITTEN;
        self.mem[wrapped as usize] = value;
    }
}

impl MemoryAccess for MemoryBus {
    fn get_byte(&mut self, addr: u32) -> Option<u8> {
        Some(self.read_byte_tagged(addr))
    }

    fn get_word(&mut self, addr: u32) -> Option<u16> {
        if let Some((chip, offset)) = self.chips.resolve(addr) {
            return Some(chip.read_word(offset));
        }
        let hi = self.read_byte_tagged(addr);
        let lo = self.read_byte_tagged(addr.wrapping_add(1));
        Some((hi as u16) << 8 | lo as u16)
    }

    fn set_byte(&mut self, addr: u32, value: u8) -> Option<()> {
        self.write_byte_tagged(addr, value);
        Some(())
    }

    fn set_word(&mut self, addr: u32, value: u16) -> Option<()> {
        if let Some((chip, offset)) = self.chips.resolve(addr) {
            chip.write_word(offset, value);
            return Some(());
        }
        self.write_byte_tagged(addr, (value >> 8) as u8);
        self.write_byte_tagged(addr.wrapping_add(1), value as u8);
        Some(())
    }

    fn reset_instruction(&mut self) {
        self.chips.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_word_aliasing() {
        // S2: write word 0xBEEF to 0x1000, byte-read 0x1001 -> 0xEF; byte-write 0x12 to 0x1000,
        // word-read 0x1000 -> 0x12EF.
        let mut bus = MemoryBus::new(MIN_LOG2MEM);
        bus.set_word(0x1000, 0xBEEF);
        assert_eq!(bus.get_byte(0x1001), Some(0xEF));
        bus.set_byte(0x1000, 0x12);
        assert_eq!(bus.get_word(0x1000), Some(0x12EF));
    }

    #[test]
    fn address_wrap() {
        let mut bus = MemoryBus::new(MIN_LOG2MEM);
        let size = bus.size();
        bus.set_byte(0, 0x42);
        assert_eq!(bus.get_byte(size), Some(0x42));
    }

    #[test]
    fn memptr_fails_over_chip_range() {
        struct Dummy;
        impl crate::chip::Chip for Dummy {
            fn name(&self) -> &'static str { "dummy" }
            fn read_byte(&mut self, _: u32) -> u8 { 0 }
            fn write_byte(&mut self, _: u32, _: u8) {}
            fn reset(&mut self) {}
        }

        let mut bus = MemoryBus::new(MIN_LOG2MEM);
        bus.chips.bind(0x8000, 0x8003, Box::new(Dummy));
        assert!(bus.memptr(0x7FFE, 4).is_none());
        assert!(bus.memptr(0x7000, 4).is_some());
    }
}
