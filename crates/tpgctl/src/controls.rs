// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 The tpgctl Authors

//! V4L2 control IDs for the TPG subdevice
//!
//! The TPG is driven through two families of controls: the standard
//! image-source/image-processing classes (blanking, test pattern) and the
//! Xilinx vendor class (foreground overlay, pixels-per-clock). Values are
//! passed through to the driver unvalidated; range checking is the driver's
//! job.

// ===== V4L2 Control Class Bases =====
const V4L2_CTRL_CLASS_USER: u32 = 0x0098_0000;
const V4L2_CTRL_CLASS_IMAGE_SOURCE: u32 = 0x009e_0000;
const V4L2_CTRL_CLASS_IMAGE_PROC: u32 = 0x009f_0000;

const V4L2_CID_USER_BASE: u32 = V4L2_CTRL_CLASS_USER | 0x900;
const V4L2_CID_IMAGE_SOURCE_CLASS_BASE: u32 = V4L2_CTRL_CLASS_IMAGE_SOURCE | 0x900;
const V4L2_CID_IMAGE_PROC_CLASS_BASE: u32 = V4L2_CTRL_CLASS_IMAGE_PROC | 0x900;

// ===== Standard Control IDs =====

/// Vertical blanking in lines, inserted between frames
pub const V4L2_CID_VBLANK: u32 = V4L2_CID_IMAGE_SOURCE_CLASS_BASE + 1;
/// Horizontal blanking in pixels, inserted between lines
pub const V4L2_CID_HBLANK: u32 = V4L2_CID_IMAGE_SOURCE_CLASS_BASE + 2;
/// Test pattern selector (menu control, values are driver defined)
pub const V4L2_CID_TEST_PATTERN: u32 = V4L2_CID_IMAGE_PROC_CLASS_BASE + 3;

// ===== Xilinx Vendor Control IDs =====

const V4L2_CID_XILINX_OFFSET: u32 = 0xc000;
const V4L2_CID_XILINX_BASE: u32 = V4L2_CID_USER_BASE + V4L2_CID_XILINX_OFFSET;

/// Base of the Xilinx TPG control range
pub const V4L2_CID_XILINX_TPG: u32 = V4L2_CID_XILINX_BASE + 0x5000;

/// Foreground overlay pattern of the HLS TPG (0 disables the overlay)
pub const V4L2_CID_XILINX_TPG_HLS_FG_PATTERN: u32 = V4L2_CID_XILINX_TPG + 18;
/// Pixels processed per clock cycle
pub const V4L2_CID_XILINX_PPC: u32 = V4L2_CID_XILINX_TPG + 19;

// ===== Background Pattern Menu Values =====
//
// The TEST_PATTERN menu exposed by the Xilinx HLS TPG driver. Only the
// handful referenced by tooling are named here; the setters accept any
// value and leave validation to the driver.

/// Passthrough (no generated pattern)
pub const TPG_PATTERN_PASSTHROUGH: u32 = 0;
/// Solid black frame
pub const TPG_PATTERN_SOLID_BLACK: u32 = 7;
/// Vertical color bars
pub const TPG_PATTERN_COLOR_BARS: u32 = 9;
/// Tartan color bars
pub const TPG_PATTERN_TARTAN_BARS: u32 = 11;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_control_ids() {
        assert_eq!(V4L2_CID_VBLANK, 0x009e_0901);
        assert_eq!(V4L2_CID_HBLANK, 0x009e_0902);
        assert_eq!(V4L2_CID_TEST_PATTERN, 0x009f_0903);
    }

    #[test]
    fn test_xilinx_control_ids() {
        assert_eq!(V4L2_CID_XILINX_TPG, 0x0099_1900);
        assert_eq!(V4L2_CID_XILINX_TPG_HLS_FG_PATTERN, 0x0099_1912);
        assert_eq!(V4L2_CID_XILINX_PPC, 0x0099_1913);
    }
}
