// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 The tpgctl Authors

//! Media-controller device access
//!
//! This module provides the media-graph side of TPG control:
//!
//! - [`MediaBackend`] - the operations the controller needs from a media
//!   device (enumeration, device info, control and pad-format writes)
//! - [`MediaDevice`] - the real backend, issuing `MEDIA_IOC_*` and
//!   `VIDIOC_*` ioctls against `/dev/mediaN` and the entity subdevice nodes
//! - [`EntityDesc`], [`DeviceInfo`], [`PadFormat`] - safe views of the
//!   kernel records
//!
//! # Quick Start
//!
//! ```no_run
//! use tpgctl::media::{MediaBackend, MediaDevice};
//!
//! let media = MediaDevice::with_path("/dev/media0")?;
//! for entity in media.enumerate()? {
//!     println!("{}: {}", entity.id, entity.name);
//! }
//! # Ok::<(), tpgctl::Error>(())
//! ```

mod backend;
mod device;

/// Raw media-controller and V4L2 subdevice UAPI structures and request codes.
pub mod ioctl;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::{DeviceInfo, EntityDesc, MediaBackend, PadFormat, Version};
pub use device::MediaDevice;
