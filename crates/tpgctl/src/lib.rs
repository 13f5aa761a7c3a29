// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 The tpgctl Authors

//! TPG Control Library for Rust
//!
//! Configures a video Test Pattern Generator (TPG) hardware block through the
//! Linux media-controller and V4L2 subdevice APIs: discovers the TPG entity
//! in a media graph, sets its input pixel format and resolution, and pushes
//! control values (background pattern, foreground pattern, pixels-per-clock,
//! horizontal/vertical blanking).
//!
//! # Quick Start
//!
//! ```no_run
//! use tpgctl::media::MediaDevice;
//! use tpgctl::tpg::{SetupConfig, TpgSource, TPG_MATCH_TABLE};
//!
//! // Open the media device hosting the TPG pipeline and bring it up with
//! // the default pattern configuration.
//! let media = MediaDevice::with_path("/dev/media0")?;
//! let mut tpg = TpgSource::init(&TPG_MATCH_TABLE[0], media)?;
//!
//! // Program the TPG input to 4K and switch to a different pattern.
//! tpg.set_media_format(&SetupConfig::new(3840, 2160))?;
//! tpg.set_bg_pattern(11)?;
//! # Ok::<(), tpgctl::Error>(())
//! ```
//!
//! # Features
//!
//! - TPG entity discovery from the media graph
//! - Pad-0 input format programming (`VYYUYY8` media-bus encoding)
//! - Background/foreground pattern, pixels-per-clock, and blanking controls
//! - Pluggable media-controller backend for testing without hardware

use std::{error, fmt, io};

/// Error type for TPG control operations
#[derive(Debug)]
pub enum Error {
    /// I/O error from underlying system calls
    Io(io::Error),

    /// Media entity enumeration failed
    Enumerate(io::Error),

    /// A V4L2 control write was rejected by the driver
    ControlWrite { id: u32, source: io::Error },

    /// Setting the subdevice pad format failed
    FormatSetup { entity: String, source: io::Error },

    /// No entity with the given name exists in the media graph
    EntityNotFound(String),

    /// The entity has no resolvable device node
    DevnodeNotFound(String),

    /// The media-bus format name is not in the format table
    UnknownFormat(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Enumerate(err) => write!(f, "Failed to enumerate media entities: {}", err),
            Error::ControlWrite { id, source } => {
                write!(f, "Control write failed (id {:#010x}): {}", id, source)
            }
            Error::FormatSetup { entity, source } => {
                write!(f, "Unable to setup formats on \"{}\": {}", entity, source)
            }
            Error::EntityNotFound(name) => write!(f, "Media entity not found: \"{}\"", name),
            Error::DevnodeNotFound(name) => {
                write!(f, "No device node for media entity \"{}\"", name)
            }
            Error::UnknownFormat(name) => write!(f, "Unknown media-bus format: \"{}\"", name),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Enumerate(err) => Some(err),
            Error::ControlWrite { source, .. } => Some(source),
            Error::FormatSetup { source, .. } => Some(source),
            Error::EntityNotFound(_) | Error::DevnodeNotFound(_) | Error::UnknownFormat(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// The controls module provides the V4L2 control IDs the TPG exposes.
pub mod controls;

/// The formats module provides media-bus format codes and name lookup.
pub mod formats;

/// The media module provides media-controller device access.
pub mod media;

/// The tpg module provides the TPG controller itself.
pub mod tpg;
