// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 The tpgctl Authors

//! Media-bus format codes and name lookup
//!
//! Pad formats on a subdevice are identified by a numeric media-bus code,
//! but pipeline configuration traffics in the short names used by the
//! media-ctl tooling (`"VYYUYY8"`, `"UYVY"`, ...). This module carries the
//! subset of the table the Xilinx video pipeline uses.

/// RGB 8:8:8 with swapped red/blue, one 24-bit sample per pixel
pub const MEDIA_BUS_FMT_RBG888_1X24: u32 = 0x100e;
/// YUV 4:2:2, 8 bits per component over a 16-bit bus
pub const MEDIA_BUS_FMT_UYVY8_1X16: u32 = 0x200f;
/// YUV 4:2:0 semi-packed, 8 bits per component over a 24-bit bus
pub const MEDIA_BUS_FMT_VYYUYY8_1X24: u32 = 0x2100;
/// YUV 4:4:4, 8 bits per component over a 24-bit bus
pub const MEDIA_BUS_FMT_VUY8_1X24: u32 = 0x2101;

const FORMAT_TABLE: &[(&str, u32)] = &[
    ("RBG24", MEDIA_BUS_FMT_RBG888_1X24),
    ("UYVY", MEDIA_BUS_FMT_UYVY8_1X16),
    ("VYYUYY8", MEDIA_BUS_FMT_VYYUYY8_1X24),
    ("VUY24", MEDIA_BUS_FMT_VUY8_1X24),
];

/// Look up a media-bus code by its media-ctl format name.
///
/// Returns `None` for names outside the table; callers decide whether that
/// is an error.
pub fn mbus_code(name: &str) -> Option<u32> {
    FORMAT_TABLE
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, code)| *code)
}

/// Look up the media-ctl format name for a media-bus code.
pub fn mbus_name(code: u32) -> Option<&'static str> {
    FORMAT_TABLE
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(n, _)| *n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mbus_code_lookup() {
        assert_eq!(mbus_code("VYYUYY8"), Some(MEDIA_BUS_FMT_VYYUYY8_1X24));
        assert_eq!(mbus_code("UYVY"), Some(MEDIA_BUS_FMT_UYVY8_1X16));
        assert_eq!(mbus_code("YUYV8"), None);
    }

    #[test]
    fn test_mbus_name_roundtrip() {
        for (name, code) in FORMAT_TABLE {
            assert_eq!(mbus_name(*code), Some(*name));
        }
    }
}
