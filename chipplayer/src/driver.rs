// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The playback driver: owns the CPU, the bus and the current track, and produces samples.
//!
//! The per-quantum run loop is grounded on `emu68_level_and_interrupt()`'s doc comment in
//! `examples/original_source/libsc68/emu68/emu68.h`: call the replay routine as a forced
//! subroutine call and run the emulator until the stack pointer rises back above its value at
//! call time (the RTS watermark), then keep running for the rest of the pass so any chip
//! interrupt due before the next quantum gets serviced.

use crate::error::Error;
use crate::memory::MemoryBus;
use crate::track::{Disk, TrackInfo, TrackState};

use bitflags::bitflags;
use m68k_core::cpu_details::Mc68000;
use m68k_core::exception::{Exception, Vector};
use m68k_core::{MemoryAccess, M68000};

use std::num::Wrapping;

bitflags! {
    /// Result of a [PlaybackDriver::process] call, spec.md §4.8.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ProcessStatus: u8 {
        /// At least one quantum ran with nothing else noteworthy happening.
        const IDLE = 1 << 0;
        /// The current track changed (disk advanced to its next track).
        const CHANGE = 1 << 1;
        /// The current track looped back to its start.
        const LOOP = 1 << 2;
        /// Playback reached the end of the disk; no more tracks to play.
        const END = 1 << 3;
        /// A CPU exception that this driver cannot recover from was raised (e.g. a repeated
        /// access error while fetching the next instruction).
        const ERROR = 1 << 4;
    }
}

/// Whether the SNDH "ASID" (replay routine runs with interrupts off, single-shot per call) replay
/// convention should be forced, honored if present, or ignored. Out of scope to parse from a
/// file header here (the loader's job); this only carries the playback-time decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Asid {
    #[default]
    Off,
    On,
    Force,
}

/// Non-parsing configuration surface for a playback session (spec.md §6). Building the actual
/// CLI/registry layer that produces this struct from user input or a config file is out of scope;
/// this is only the landing struct the driver reads from.
#[derive(Clone, Debug)]
pub struct PlayerOptions {
    pub sampling_rate: u32,
    pub asid: Asid,
    /// Track to start on, overriding the disk's default (its first track). `None` keeps the
    /// loader-provided default.
    pub force_track: Option<u32>,
    /// Overrides every track's loop count. `None` keeps each track's own value.
    pub force_loop: Option<i32>,
    /// Playback duration used for tracks whose `TrackInfo::time_ms` is unknown.
    pub default_time_ms: u32,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            sampling_rate: 44_100,
            asid: Asid::default(),
            force_track: None,
            force_loop: None,
            default_time_ms: 180_000,
        }
    }
}

fn interrupt_exception(level: u8) -> Exception {
    Exception::from(Vector::Level1Interrupt as u8 - 1 + level.clamp(1, 7))
}

/// Drives a loaded [Disk] through the 68k core and the bound chips, producing interleaved stereo
/// `i16` samples (spec.md §4.8).
pub struct PlaybackDriver {
    cpu: M68000<Mc68000>,
    bus: MemoryBus,
    disk: Disk,
    track: TrackState,
    current: TrackInfo,
    options: PlayerOptions,
    cpu_clock_hz: u32,
    /// Running cycle counter in the common cycle domain shared with the chip bank.
    cycle_origin: u64,
    /// Whether the starting track's init routine has run yet. Deferred past construction so
    /// callers can bind chips first: a track's init routine commonly touches chip registers.
    started: bool,
}

/// Cycle value past which [PlaybackDriver::run_quantum] rebases the driver's and every chip's
/// internal cycle counters back towards zero, so they never overflow across a long playback
/// session.
const CYCLE_REBASE_THRESHOLD: u64 = 1 << 40;

impl PlaybackDriver {
    /// Creates a driver for `disk`, loading its image into a fresh [MemoryBus] of `1 << log2mem`
    /// bytes. The starting track (the disk's first, or `options.force_track`) is selected but its
    /// init routine is not run yet: bind every chip with [Self::bind_chip] first, since the init
    /// routine commonly touches chip registers. It runs automatically on the first [Self::process]
    /// call.
    pub fn new(disk: Disk, options: PlayerOptions, cpu_clock_hz: u32, log2mem: u32) -> Result<Self, Error> {
        disk.validate(options.force_track.unwrap_or(0))?;

        let mut bus = MemoryBus::new(log2mem);
        bus.load(disk.load_address, &disk.image);

        let starting_track = options.force_track.unwrap_or(disk.tracks[0].track);
        let current = disk.track(starting_track).expect("validated above").clone();

        Ok(Self {
            cpu: M68000::new_no_reset(),
            bus,
            disk,
            track: TrackState { index: starting_track, ..TrackState::default() },
            current,
            options,
            cpu_clock_hz,
            cycle_origin: 0,
            started: false,
        })
    }

    /// Binds a chip to `[lo, hi]` (inclusive) in the driver's address space.
    ///
    /// Must be called before the first [Self::process] call to be seen by the starting track's
    /// init routine.
    pub fn bind_chip(&mut self, lo: u32, hi: u32, chip: Box<dyn crate::chip::Chip>) {
        self.bus.chips.bind(lo, hi, chip);
    }

    /// The currently active track's immutable metadata.
    pub fn current_track(&self) -> &TrackInfo {
        &self.current
    }

    /// The currently active track's mutable playback counters.
    pub fn track_state(&self) -> &TrackState {
        &self.track
    }

    /// Direct access to the bus, e.g. for `memptr`/`memset` diagnostics or a GUI's memory viewer.
    pub fn bus(&mut self) -> &mut MemoryBus {
        &mut self.bus
    }

    /// Switches to track `number`: resets the CPU/chips and runs its init routine. Resets the
    /// loop counter, since this is a genuine track change, not a loop-back of the same track.
    fn start_track(&mut self, number: u32) {
        let info = self.disk.track(number).expect("caller validated track number").clone();
        self.track = TrackState {
            index: number,
            loops: 0,
            start_cycle: 0,
            elapsed_ms: 0,
        };
        self.current = info;
        self.reset_cpu_and_chips();
    }

    /// Re-runs the current track's init routine without touching the loop counter, for looping
    /// the same track back to its start.
    fn restart_current_track(&mut self) {
        self.track.elapsed_ms = 0;
        self.reset_cpu_and_chips();
    }

    fn reset_cpu_and_chips(&mut self) {
        self.cpu.regs = m68k_core::Registers::default();
        self.cpu.regs.sr.s = true;
        self.cpu.regs.sr.interrupt_mask = 0;
        *self.cpu.regs.sp_mut() = Wrapping(self.bus.size().wrapping_sub(4));

        self.bus.chips.reset();
        self.cycle_origin = 0;

        let init_pc = self.current.init_pc;
        self.call_routine(init_pc, (self.cpu_clock_hz as usize).max(1));
    }

    /// Runs `pc` as a forced subroutine call: pushes a sentinel return address, jumps to `pc`,
    /// and executes until the stack pointer rises back above its value at call time (meaning the
    /// routine's own RTS popped that return address), or `max_cycles` is exceeded as a safety net
    /// against a runaway or broken replay routine.
    fn call_routine(&mut self, pc: u32, max_cycles: usize) -> usize {
        let sp_start = self.cpu.regs.sp();
        let sentinel_sp = sp_start.wrapping_sub(4);
        self.bus.set_long(sentinel_sp, sp_start);
        *self.cpu.regs.sp_mut() = Wrapping(sentinel_sp);
        self.cpu.regs.pc.0 = pc;

        let mut total = 0;
        while self.cpu.regs.sp() < sp_start && total < max_cycles {
            total += self.run_cycles(4);
        }
        self.cycle_origin += total as u64;
        total
    }

    /// Same contract as `M68000::cycle`: steps the CPU, one instruction at a time, until at least
    /// `cycles` cycles have elapsed (or the CPU has stopped), tagging each fetched instruction's
    /// address in the bus' page-flag tags as executed (spec.md §3's third access kind), which
    /// `M68000::cycle` cannot do since it has no visibility into the PC between instructions.
    fn run_cycles(&mut self, cycles: usize) -> usize {
        let mut total = 0;
        while total < cycles {
            self.bus.tag_executed(self.cpu.regs.pc.0);
            total += self.cpu.interpreter(&mut self.bus);
            if self.cpu.stop {
                return cycles;
            }
        }
        total
    }

    /// How many output frames make up one replay quantum at the current track's replay rate.
    fn frames_per_quantum(&self) -> usize {
        ((self.options.sampling_rate as u64) / (self.current.replay_rate_hz.max(1) as u64)).max(1) as usize
    }

    /// Produces up to `frames` interleaved stereo samples into `output` (len must be
    /// `frames * 2`), running as many replay quanta as needed, and returns the union of every
    /// quantum's status flags.
    pub fn process(&mut self, output: &mut [i16], frames: usize) -> ProcessStatus {
        assert_eq!(output.len(), frames * 2, "output buffer must hold frames * 2 i16 samples");

        if !self.started {
            self.reset_cpu_and_chips();
            self.started = true;
        }

        let mut status = ProcessStatus::empty();
        let mut produced = 0;
        while produced < frames {
            if status.contains(ProcessStatus::END) {
                break;
            }
            let want = (frames - produced).min(self.frames_per_quantum());
            let chunk = &mut output[produced * 2..(produced + want) * 2];
            status |= self.run_quantum(chunk, want);
            produced += want;
        }
        status
    }

    fn run_quantum(&mut self, output: &mut [i16], frames: usize) -> ProcessStatus {
        let mut status = ProcessStatus::empty();
        let cycles_per_pass = (self.cpu_clock_hz / self.current.replay_rate_hz.max(1)).max(1) as usize;

        self.call_routine(self.current.play_pc, cycles_per_pass * 4);

        let mut remaining = cycles_per_pass;
        while remaining > 0 {
            let slice = remaining.min(256);
            let executed = self.run_cycles(slice);
            self.cycle_origin += executed as u64;
            remaining = remaining.saturating_sub(executed.max(1));

            if let Some(level) = self.bus.chips.pending_interrupt(self.cycle_origin) {
                self.cpu.exception(interrupt_exception(level));
            }
        }

        self.bus.render_chips(cycles_per_pass as u64, frames, output);

        if self.cycle_origin > CYCLE_REBASE_THRESHOLD {
            self.bus.chips.adjust_cycle(self.cycle_origin);
            self.cycle_origin = 0;
        }

        let elapsed_ms = (frames as u64 * 1000 / self.options.sampling_rate.max(1) as u64) as u32;
        self.track.elapsed_ms += elapsed_ms;

        let limit_ms = self.current.time_ms.unwrap_or(self.options.default_time_ms);
        if self.track.elapsed_ms >= limit_ms {
            status |= self.advance_past_track_end();
        }

        if status.is_empty() {
            status |= ProcessStatus::IDLE;
        }
        status
    }

    /// Called once a track's playback duration has elapsed: either loops the same track, moves
    /// to the next track on the disk, or reports end-of-disk.
    fn advance_past_track_end(&mut self) -> ProcessStatus {
        let loop_limit = self.options.force_loop.unwrap_or(self.current.loop_count);
        if loop_limit < 0 || (self.track.loops as i32) < loop_limit {
            self.track.loops += 1;
            self.restart_current_track();
            return ProcessStatus::LOOP;
        }

        if let Some(next) = self.disk.track(self.track.index + 1).cloned() {
            log::info!("advancing from track {} to track {}", self.track.index, next.track);
            self.start_track(next.track);
            ProcessStatus::CHANGE
        } else {
            log::info!("end of disk reached after track {}", self.track.index);
            ProcessStatus::END
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::TargetHardware;

    /// A one-track disk whose init routine clears D0 and whose play routine increments it, both
    /// returning immediately via RTS. Exercises the call_routine watermark technique end to end.
    fn minimal_disk() -> Disk {
        let mut image = vec![0u8; 0x400];
        // init: MOVEQ #0, D0 ; RTS
        image[0..2].copy_from_slice(&0x7000u16.to_be_bytes());
        image[2..4].copy_from_slice(&0x4E75u16.to_be_bytes());
        // play (at offset 0x10): ADDQ.L #1, D0 ; RTS
        image[0x10..0x12].copy_from_slice(&0x5280u16.to_be_bytes());
        image[0x12..0x14].copy_from_slice(&0x4E75u16.to_be_bytes());

        Disk {
            load_address: 0x1000,
            image,
            tracks: vec![TrackInfo {
                track: 1,
                init_pc: 0x1000,
                play_pc: 0x1010,
                replay_rate_hz: 50,
                hardware: TargetHardware::AtariSt,
                time_ms: Some(100),
                loop_count: 0,
            }],
        }
    }

    #[test]
    fn process_runs_replay_routine_each_quantum() {
        let disk = minimal_disk();
        let options = PlayerOptions { sampling_rate: 44_100, ..Default::default() };
        let mut driver = PlaybackDriver::new(disk, options, 8_000_000, crate::memory::MIN_LOG2MEM).unwrap();

        assert_eq!(driver.cpu.regs.d[0].0, 0);
        let mut output = vec![0i16; driver.frames_per_quantum() * 2];
        let frames = output.len() / 2;
        driver.process(&mut output, frames);
        assert_eq!(driver.cpu.regs.d[0].0, 1);
    }

    #[test]
    fn playback_ends_after_single_non_looping_track() {
        // S5: track with loop_count == 0 and a short time budget reaches END once elapsed.
        let disk = minimal_disk();
        let options = PlayerOptions { sampling_rate: 44_100, ..Default::default() };
        let mut driver = PlaybackDriver::new(disk, options, 8_000_000, crate::memory::MIN_LOG2MEM).unwrap();

        let mut status = ProcessStatus::empty();
        let mut output = vec![0i16; 8_192 * 2];
        for _ in 0..50 {
            status |= driver.process(&mut output, 8_192);
            if status.contains(ProcessStatus::END) {
                break;
            }
        }
        assert!(status.contains(ProcessStatus::END));
    }
}
