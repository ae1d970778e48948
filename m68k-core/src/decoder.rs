// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opcode decode table, generated by `build.rs` from the bit-pattern templates in that file.

include!(concat!(env!("OUT_DIR"), "/decoder.rs"));
