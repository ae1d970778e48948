// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The loader contract (spec.md §6): the plain data the file-format loader hands to the driver.
//!
//! Parsing the sc68/SNDH container formats themselves is out of scope for this crate (it is the
//! loader's job); `Disk` and `TrackInfo` are only the landing types for whatever the loader
//! already parsed.

use crate::error::Error;

/// The target hardware a track was authored for, carried over from `sc68_music_info_t::hw` in
/// the original sc68 header (`libsc68/sc68.h`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetHardware {
    /// Plain Atari ST: YM-2149 only.
    AtariSt,
    /// Atari STE: YM-2149 plus the STE DMA/DAC extensions.
    AtariSte,
    /// Commodore Amiga: Paula only.
    Amiga,
}

/// Per-track metadata, the playback-relevant subset of `sc68_music_info_t`.
///
/// String fields (title/author/composer/ripper/converter) belong to the loader/UI layer and are
/// intentionally not part of this struct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackInfo {
    /// 1-based track number.
    pub track: u32,
    /// Address of the track's init routine (called once before playback starts).
    pub init_pc: u32,
    /// Address of the track's replay routine (called once per quantum).
    pub play_pc: u32,
    /// Replay interrupt rate, in Hz (typically 50 or 200).
    pub replay_rate_hz: u32,
    /// Target hardware.
    pub hardware: TargetHardware,
    /// Track duration, if known by the loader. `None` means "play until `default_time` elapses".
    pub time_ms: Option<u32>,
    /// Loop count: `-1` infinite, `0` off (play once), `N` replay N times total.
    pub loop_count: i32,
}

/// A loaded music disk: a 68k memory image plus the tracks it contains.
#[derive(Clone, Debug)]
pub struct Disk {
    /// Address at which `image` must be placed in 68k memory.
    pub load_address: u32,
    /// Raw 68k code+data image, as extracted by the loader.
    pub image: Vec<u8>,
    /// The tracks on this disk, in track-number order.
    pub tracks: Vec<TrackInfo>,
}

impl Disk {
    /// Returns the track with the given 1-based number, if present.
    pub fn track(&self, number: u32) -> Option<&TrackInfo> {
        self.tracks.iter().find(|t| t.track == number)
    }

    /// Validates that the disk has at least one track and that `track` is a valid, in-range
    /// default/forced track number.
    pub fn validate(&self, default_track: u32) -> Result<(), Error> {
        if self.tracks.is_empty() {
            return Err(Error::LoadFailure("disk has no tracks".into()));
        }
        if default_track != 0 && self.track(default_track).is_none() {
            return Err(Error::LoadFailure(format!("track {default_track} does not exist on this disk")));
        }
        Ok(())
    }
}

/// Mutable per-playback state of the currently active track (spec.md §3 `TrackState`).
///
/// Distinct from [TrackInfo]: this is the runtime counter state, mutated only by
/// [PlaybackDriver](crate::driver::PlaybackDriver), whereas `TrackInfo` is the immutable
/// loader-supplied description of a track.
#[derive(Clone, Debug, Default)]
pub struct TrackState {
    /// 1-based index of the currently playing track.
    pub index: u32,
    /// Number of times the track has looped so far.
    pub loops: u32,
    /// Cycle (in the driver's common cycle domain) at which the current track started.
    pub start_cycle: u64,
    /// Milliseconds of playback elapsed on the current track.
    pub elapsed_ms: u32,
}
