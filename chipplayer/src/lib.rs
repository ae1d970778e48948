// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A sc68/SNDH music playback engine built on top of [m68k_core].
//!
//! This crate owns everything specific to playing back Atari ST/STE and Amiga chiptune music:
//! the concrete 68k address space ([MemoryBus]), the sound chips that hang off it ([YmChip],
//! [PaulaChip]), and the driver that runs a loaded track through them ([PlaybackDriver]).
//!
//! Parsing the sc68/SNDH container formats, the CLI/registry configuration layer, host plug-in
//! shims, and a GDB remote-debug stub are all out of scope: this crate only defines the plain
//! data contract ([Disk], [TrackInfo], [PlayerOptions]) that those external components produce or
//! consume.

pub mod chip;
pub mod driver;
pub mod error;
pub mod memory;
pub mod paula;
pub mod track;
pub mod ym;

pub use chip::{Chip, ChipBank};
pub use driver::{Asid, PlaybackDriver, PlayerOptions, ProcessStatus};
pub use error::Error;
pub use memory::{MemoryBus, PageFlags};
pub use paula::PaulaChip;
pub use track::{Disk, TargetHardware, TrackInfo, TrackState};
pub use ym::{YmChip, YmFilter};
