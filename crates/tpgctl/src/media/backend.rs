// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 The tpgctl Authors

use std::fmt;

use crate::Error;

use super::ioctl;

/// Version number MAJOR.MINOR.PATCH
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl From<u32> for Version {
    fn from(v: u32) -> Self {
        Self {
            major: ((v >> 16) & 0xff) as u8,
            minor: ((v >> 8) & 0xff) as u8,
            patch: (v & 0xff) as u8,
        }
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Media device information
///
/// Safe view of `media_device_info` as reported by `MEDIA_IOC_DEVICE_INFO`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Driver name, e.g. "xilinx-video"
    pub driver: String,
    /// Device model name
    pub model: String,
    /// Serial number, often empty
    pub serial: String,
    /// Bus name, e.g. "platform:amba_pl"
    pub bus_info: String,
    pub media_version: Version,
    pub hw_revision: u32,
    pub driver_version: Version,
}

impl From<&ioctl::MediaDeviceInfo> for DeviceInfo {
    fn from(info: &ioctl::MediaDeviceInfo) -> Self {
        Self {
            driver: ioctl::cstr_to_string(&info.driver),
            model: ioctl::cstr_to_string(&info.model),
            serial: ioctl::cstr_to_string(&info.serial),
            bus_info: ioctl::cstr_to_string(&info.bus_info),
            media_version: info.media_version.into(),
            hw_revision: info.hw_revision,
            driver_version: info.driver_version.into(),
        }
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) on {}, media version {}, driver version {}",
            self.model, self.driver, self.bus_info, self.media_version, self.driver_version
        )
    }
}

/// Media entity descriptor
///
/// Safe view of `media_entity_desc`. The devnode major:minor pair is only
/// populated for entities backed by a character device (video nodes and
/// V4L2 subdevices).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityDesc {
    pub id: u32,
    pub name: String,
    /// Raw entity function/type word, driver defined
    pub function: u32,
    pub pads: u16,
    pub links: u16,
    /// Character device numbers of the entity's devnode, if any
    pub devnum: Option<(u32, u32)>,
}

impl From<&ioctl::MediaEntityDesc> for EntityDesc {
    fn from(desc: &ioctl::MediaEntityDesc) -> Self {
        let devnum = match (desc.dev.major, desc.dev.minor) {
            (0, 0) => None,
            (major, minor) => Some((major, minor)),
        };

        Self {
            id: desc.id & !ioctl::MEDIA_ENT_ID_FLAG_NEXT,
            name: ioctl::cstr_to_string(&desc.name),
            function: desc.type_,
            pads: desc.pads,
            links: desc.links,
            devnum,
        }
    }
}

/// Pad format request: media-bus code plus frame dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PadFormat {
    pub code: u32,
    pub width: u32,
    pub height: u32,
}

impl PadFormat {
    pub fn new(code: u32, width: u32, height: u32) -> Self {
        Self {
            code,
            width,
            height,
        }
    }
}

impl fmt::Display for PadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::formats::mbus_name(self.code) {
            Some(name) => write!(f, "{} {}x{}", name, self.width, self.height),
            None => write!(f, "{:#06x} {}x{}", self.code, self.width, self.height),
        }
    }
}

/// Operations the TPG controller needs from a media device.
///
/// The canonical implementation is [`MediaDevice`](super::MediaDevice),
/// which talks to the kernel; tests substitute a recording mock. All calls
/// are synchronous and blocking, ioctl-class operations.
pub trait MediaBackend {
    /// Enumerate the entities of the media graph, in kernel order.
    fn enumerate(&self) -> Result<Vec<EntityDesc>, Error>;

    /// Query driver/model/bus metadata for the media device.
    fn device_info(&self) -> Result<DeviceInfo, Error>;

    /// Path of the media device node this backend was opened from, if known.
    fn devnode(&self) -> Option<&str>;

    /// Write one integer control on the named entity's subdevice.
    fn set_control(&self, entity: &str, id: u32, value: i32) -> Result<(), Error>;

    /// Set the active format on one pad of the named entity's subdevice.
    fn set_format(&self, entity: &str, pad: u16, format: &PadFormat) -> Result<(), Error>;
}
