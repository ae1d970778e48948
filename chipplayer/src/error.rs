// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Errors surfaced across the chipplayer API.
//!
//! CPU-level exceptions (illegal instruction, bus/address error) never reach this type: they are
//! dispatched through m68k-core's own `Exception` mechanism and handled inside
//! [PlaybackDriver::process](crate::driver::PlaybackDriver::process). Only construction-time and
//! loader-boundary failures are reported here, by value, as the core has no exception propagation
//! across its API.

use thiserror::Error;

/// Errors that can be returned by the chipplayer entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A method was called on a handle that was never constructed or has already been torn down.
    #[error("bad chipplayer instance")]
    BadInstance,

    /// A pointer-style access (`memptr`/`memset`) was requested on a range that is not entirely
    /// plain RAM (it overlaps a chip-backed region or falls outside the memory image).
    #[error("address range {lo:#x}..{hi:#x} is not entirely on-board RAM")]
    MemoryRange {
        lo: u32,
        hi: u32,
    },

    /// The loader handed over a track list or memory image that cannot be played: empty disk,
    /// out-of-range load address, or a track whose init/play vectors fall outside the image.
    #[error("invalid track data: {0}")]
    LoadFailure(String),

    /// The memory allocator could not provide the requested amount of 68k address space.
    #[error("out of memory: failed to allocate {0} bytes of 68k address space")]
    OutOfMemory(usize),
}
