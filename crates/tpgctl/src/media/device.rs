// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 The tpgctl Authors

use std::fs::{self, File, OpenOptions};
use std::io;
use std::mem;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

use crate::Error;

use super::backend::{DeviceInfo, EntityDesc, MediaBackend, PadFormat};
use super::ioctl;

/// Media-controller device
///
/// Owns the file descriptor of a `/dev/mediaN` node and issues the
/// media-controller ioctls against it. Control and format writes open the
/// target entity's subdevice node per call; the kernel serializes the
/// individual ioctls, the caller serializes sequences of them.
#[derive(Debug)]
pub struct MediaDevice {
    file: File,
    path: String,
}

impl MediaDevice {
    /// Open the media device with the given index, e.g. `MediaDevice::new(0)`
    /// for `/dev/media0`.
    pub fn new(index: usize) -> Result<Self, Error> {
        Self::with_path(format!("/dev/media{}", index))
    }

    /// Open a media device node by path.
    pub fn with_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = OpenOptions::new().read(true).write(true).open(path)?;

        Ok(Self {
            file,
            path: path.to_string_lossy().into_owned(),
        })
    }

    fn fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }

    /// Find the named entity among the enumerated ones.
    fn entity_by_name(&self, name: &str) -> Result<EntityDesc, Error> {
        self.enumerate()?
            .into_iter()
            .find(|e| e.name == name)
            .ok_or_else(|| Error::EntityNotFound(name.to_owned()))
    }

    /// Open the subdevice node behind an entity.
    fn open_subdev(&self, entity: &EntityDesc) -> Result<File, Error> {
        let (major, minor) = entity
            .devnum
            .ok_or_else(|| Error::DevnodeNotFound(entity.name.clone()))?;

        let node = devnode_from_devnum(major, minor)
            .ok_or_else(|| Error::DevnodeNotFound(entity.name.clone()))?;

        log::debug!("entity \"{}\" -> {}", entity.name, node.display());

        OpenOptions::new()
            .read(true)
            .write(true)
            .open(&node)
            .map_err(Error::Io)
    }
}

impl MediaBackend for MediaDevice {
    fn enumerate(&self) -> Result<Vec<EntityDesc>, Error> {
        let mut entities = Vec::new();
        let mut id = ioctl::MEDIA_ENT_ID_FLAG_NEXT;

        loop {
            let mut desc: ioctl::MediaEntityDesc = unsafe { mem::zeroed() };
            desc.id = id;

            match ioctl::xioctl(self.fd(), ioctl::MEDIA_IOC_ENUM_ENTITIES, &mut desc) {
                Ok(()) => {
                    entities.push(EntityDesc::from(&desc));
                    id = desc.id | ioctl::MEDIA_ENT_ID_FLAG_NEXT;
                }
                // Iteration ends when the next id is rejected as invalid
                Err(e) if e.kind() == io::ErrorKind::InvalidInput => break,
                Err(e) => return Err(Error::Enumerate(e)),
            }
        }

        Ok(entities)
    }

    fn device_info(&self) -> Result<DeviceInfo, Error> {
        let mut info: ioctl::MediaDeviceInfo = unsafe { mem::zeroed() };
        ioctl::xioctl(self.fd(), ioctl::MEDIA_IOC_DEVICE_INFO, &mut info)?;
        Ok(DeviceInfo::from(&info))
    }

    fn devnode(&self) -> Option<&str> {
        Some(&self.path)
    }

    fn set_control(&self, entity: &str, id: u32, value: i32) -> Result<(), Error> {
        let desc = self.entity_by_name(entity)?;
        let subdev = self.open_subdev(&desc)?;

        let mut ctrl = ioctl::V4l2Control { id, value };
        ioctl::xioctl(subdev.as_raw_fd(), ioctl::VIDIOC_S_CTRL, &mut ctrl)
            .map_err(|source| Error::ControlWrite { id, source })
    }

    fn set_format(&self, entity: &str, pad: u16, format: &PadFormat) -> Result<(), Error> {
        let desc = self.entity_by_name(entity)?;
        let subdev = self.open_subdev(&desc)?;

        let mut fmt: ioctl::V4l2SubdevFormat = unsafe { mem::zeroed() };
        fmt.which = ioctl::V4L2_SUBDEV_FORMAT_ACTIVE;
        fmt.pad = u32::from(pad);
        fmt.format.width = format.width;
        fmt.format.height = format.height;
        fmt.format.code = format.code;

        ioctl::xioctl(subdev.as_raw_fd(), ioctl::VIDIOC_SUBDEV_S_FMT, &mut fmt).map_err(|source| {
            Error::FormatSetup {
                entity: entity.to_owned(),
                source,
            }
        })
    }
}

/// Map character device numbers to their `/dev` node through sysfs.
///
/// The kernel reports only major:minor in the entity descriptor; the node
/// name comes from `DEVNAME` in the device's uevent file.
fn devnode_from_devnum(major: u32, minor: u32) -> Option<PathBuf> {
    let uevent = format!("/sys/dev/char/{}:{}/uevent", major, minor);
    let contents = fs::read_to_string(uevent).ok()?;
    parse_uevent_devname(&contents).map(|name| Path::new("/dev").join(name))
}

fn parse_uevent_devname(contents: &str) -> Option<&str> {
    contents
        .lines()
        .find_map(|line| line.strip_prefix("DEVNAME="))
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uevent_devname() {
        let uevent = "MAJOR=81\nMINOR=4\nDEVNAME=v4l-subdev2\n";
        assert_eq!(parse_uevent_devname(uevent), Some("v4l-subdev2"));
    }

    #[test]
    fn test_parse_uevent_devname_missing() {
        assert_eq!(parse_uevent_devname("MAJOR=81\nMINOR=4\n"), None);
        assert_eq!(parse_uevent_devname(""), None);
        assert_eq!(parse_uevent_devname("DEVNAME=\n"), None);
    }

    #[test]
    fn test_open_missing_device() {
        let err = MediaDevice::with_path("/dev/media-does-not-exist").unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
