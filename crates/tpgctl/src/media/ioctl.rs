// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 The tpgctl Authors

//! Raw media-controller and V4L2 subdevice UAPI
//!
//! Mirrors of the kernel structures this crate touches, plus the ioctl
//! request codes for them. Request codes are spelled out as literals with
//! the encoding noted; the size tests below keep the struct layouts honest
//! against the encoded payload sizes.

use std::io;
use std::os::unix::io::RawFd;

// ===== ioctl Request Codes =====
// Encoded as: (dir << 30) | (size << 16) | (type << 8) | nr
// where dir: 2=READ, 1=WRITE, 3=READ|WRITE; type is '|' (0x7C) for the
// media controller and 'V' (0x56) for V4L2.

/// Query media device information (media_device_info: 256 bytes)
pub const MEDIA_IOC_DEVICE_INFO: libc::c_ulong = 0xC100_7C00;
/// Enumerate entities (media_entity_desc: 256 bytes)
pub const MEDIA_IOC_ENUM_ENTITIES: libc::c_ulong = 0xC100_7C01;
/// Set control value (v4l2_control: 8 bytes)
pub const VIDIOC_S_CTRL: libc::c_ulong = 0xC008_561C;
/// Set subdevice pad format (v4l2_subdev_format: 88 bytes)
pub const VIDIOC_SUBDEV_S_FMT: libc::c_ulong = 0xC058_5605;

/// OR'ed into media_entity_desc.id to request the next entity
pub const MEDIA_ENT_ID_FLAG_NEXT: u32 = 1 << 31;

/// Apply the format to the active device state
pub const V4L2_SUBDEV_FORMAT_ACTIVE: u32 = 1;

// ===== UAPI Structures =====

/// <https://www.kernel.org/doc/html/latest/userspace-api/media/mediactl/media-ioc-device-info.html>
#[repr(C)]
pub struct MediaDeviceInfo {
    pub driver: [u8; 16],
    pub model: [u8; 32],
    pub serial: [u8; 40],
    pub bus_info: [u8; 32],
    pub media_version: u32,
    pub hw_revision: u32,
    pub driver_version: u32,
    pub reserved: [u32; 31],
}

/// Devnode member of the media_entity_desc union. The union is 184 bytes;
/// only the major/minor pair is read here.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct MediaEntityDev {
    pub major: u32,
    pub minor: u32,
    pub raw: [u8; 176],
}

/// <https://www.kernel.org/doc/html/latest/userspace-api/media/mediactl/media-ioc-enum-entities.html>
#[repr(C)]
pub struct MediaEntityDesc {
    pub id: u32,
    pub name: [u8; 32],
    pub type_: u32,
    pub revision: u32,
    pub flags: u32,
    pub group_id: u32,
    pub pads: u16,
    pub links: u16,
    pub reserved: [u32; 4],
    pub dev: MediaEntityDev,
}

/// <https://www.kernel.org/doc/html/latest/userspace-api/media/v4l/vidioc-g-ctrl.html>
#[repr(C)]
pub struct V4l2Control {
    pub id: u32,
    pub value: i32,
}

/// <https://www.kernel.org/doc/html/latest/userspace-api/media/v4l/subdev-formats.html>
#[repr(C)]
#[derive(Clone, Copy)]
pub struct V4l2MbusFramefmt {
    pub width: u32,
    pub height: u32,
    pub code: u32,
    pub field: u32,
    pub colorspace: u32,
    pub ycbcr_enc: u16,
    pub quantization: u16,
    pub xfer_func: u16,
    pub flags: u16,
    pub reserved: [u16; 10],
}

/// <https://www.kernel.org/doc/html/latest/userspace-api/media/v4l/vidioc-subdev-g-fmt.html>
#[repr(C)]
pub struct V4l2SubdevFormat {
    pub which: u32,
    pub pad: u32,
    pub format: V4l2MbusFramefmt,
    pub stream: u32,
    pub reserved: [u32; 7],
}

/// Issue an ioctl, retrying while the call is interrupted by a signal.
pub fn xioctl<T>(fd: RawFd, request: libc::c_ulong, arg: &mut T) -> io::Result<()> {
    loop {
        let rc = unsafe { libc::ioctl(fd, request, arg as *mut T as *mut libc::c_void) };
        if rc == 0 {
            return Ok(());
        }

        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

/// Decode a fixed-size, NUL-padded kernel string buffer.
pub fn cstr_to_string(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    // The ioctl request codes above embed the payload size; a drifting
    // struct layout would make the kernel reject every call with ENOTTY.

    #[test]
    fn test_media_struct_sizes() {
        assert_eq!(mem::size_of::<MediaDeviceInfo>(), 256);
        assert_eq!(mem::size_of::<MediaEntityDesc>(), 256);
    }

    #[test]
    fn test_v4l2_struct_sizes() {
        assert_eq!(mem::size_of::<V4l2Control>(), 8);
        assert_eq!(mem::size_of::<V4l2MbusFramefmt>(), 48);
        assert_eq!(mem::size_of::<V4l2SubdevFormat>(), 88);
    }

    #[test]
    fn test_cstr_to_string() {
        assert_eq!(cstr_to_string(b"vcap_tpg\0\0\0\0"), "vcap_tpg");
        assert_eq!(cstr_to_string(b"no-nul-here"), "no-nul-here");
        assert_eq!(cstr_to_string(b"\0"), "");
    }
}
