// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chipplayer::{Disk, PaulaChip, PlaybackDriver, PlayerOptions, ProcessStatus, TargetHardware, TrackInfo, YmChip};

fn ym_disk() -> Disk {
    let mut image = vec![0u8; 0x400];
    // init: RTS
    image[0..2].copy_from_slice(&0x4E75u16.to_be_bytes());
    // play (at 0x10): MOVE.B #7, $FF8800 ; MOVE.B #$3E, $FF8801 ; RTS
    let play = [
        0x13FCu16, 0x0007, 0x00FF, 0x8800, // move.b #7, $ff8800 (select register 7)
        0x13FC, 0x003E, 0x00FF, 0x8801, // move.b #$3e, $ff8801 (data port, odd offset)
        0x4E75, // rts
    ];
    let mut off = 0x10;
    for word in play {
        image[off..off + 2].copy_from_slice(&word.to_be_bytes());
        off += 2;
    }

    Disk {
        load_address: 0x1000,
        image,
        tracks: vec![TrackInfo {
            track: 1,
            init_pc: 0x1000,
            play_pc: 0x1010,
            replay_rate_hz: 50,
            hardware: TargetHardware::AtariSt,
            time_ms: Some(20),
            loop_count: 0,
        }],
    }
}

#[test]
fn ym_registers_are_reachable_through_the_bus() {
    // S3: the replay routine's writes to the YM-2149's address/data ports land on the chip, not
    // on plain RAM, and the mixer register ends up holding the written value.
    let disk = ym_disk();
    let options = PlayerOptions { sampling_rate: 44_100, ..Default::default() };
    let mut driver = PlaybackDriver::new(disk, options, 8_000_000, chipplayer::memory::MIN_LOG2MEM).unwrap();
    driver.bind_chip(0xFF8800, 0xFF8803, Box::new(YmChip::new(2_000_000, 8_000_000)));

    let frames = 64;
    let mut output = vec![0i16; frames * 2];
    driver.process(&mut output, frames);

    // Read back through the bus exactly as S3 describes: select register 7, then read the
    // select port itself, which mirrors the selected register's data.
    let bus = driver.bus();
    use m68k_core::MemoryAccess;
    bus.set_byte(0xFF8800, 0x07);
    assert_eq!(bus.get_byte(0xFF8800), Some(0x3E));
}

#[test]
fn playback_status_transitions_to_end() {
    let disk = ym_disk();
    let options = PlayerOptions { sampling_rate: 44_100, ..Default::default() };
    let mut driver = PlaybackDriver::new(disk, options, 8_000_000, chipplayer::memory::MIN_LOG2MEM).unwrap();
    driver.bind_chip(0xFF8800, 0xFF8803, Box::new(YmChip::new(2_000_000, 8_000_000)));

    let mut output = vec![0i16; 4096 * 2];
    let mut status = ProcessStatus::empty();
    for _ in 0..50 {
        status |= driver.process(&mut output, 4096);
        if status.contains(ProcessStatus::END) {
            break;
        }
    }
    assert!(status.contains(ProcessStatus::END));
}

#[test]
fn paula_chip_can_be_bound_alongside_ym() {
    let disk = ym_disk();
    let options = PlayerOptions { sampling_rate: 44_100, ..Default::default() };
    let mut driver = PlaybackDriver::new(disk, options, 8_000_000, chipplayer::memory::MIN_LOG2MEM).unwrap();
    driver.bind_chip(0xFF8800, 0xFF8803, Box::new(YmChip::new(2_000_000, 8_000_000)));
    driver.bind_chip(0xFFDFF000, 0xFFDFF0DF, Box::new(PaulaChip::new(3_546_895, 8_000_000)));

    let mut output = vec![0i16; 512 * 2];
    let status = driver.process(&mut output, 512);
    assert!(status.contains(ProcessStatus::IDLE));
}
