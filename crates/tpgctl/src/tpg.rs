// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 The tpgctl Authors

//! Test Pattern Generator controller
//!
//! Drives the Xilinx TPG subdevice through a media-controller backend:
//! entity discovery, pad-0 input format programming, and the pattern,
//! pixels-per-clock, and blanking controls.
//!
//! The TPG entity is taken to be the last one the kernel enumerates, a
//! convention of this hardware family rather than a name-based lookup; an
//! empty graph resolves to the sentinel `"none"` and the failure surfaces
//! from the backend call issued against it.

use std::fmt;

use crate::controls;
use crate::formats;
use crate::media::{MediaBackend, PadFormat};
use crate::Error;

/// Media-bus format name of the TPG input pad
pub const TPG_MEDIA_FMT_IN: &str = "VYYUYY8";

/// Background pattern applied at initialization (vertical color bars)
pub const TPG_BG_PATTERN_DEFAULT: u32 = 9;
/// Foreground pattern applied at initialization (overlay disabled)
pub const TPG_FG_DEFAULT: u32 = 0;
/// Pixels-per-clock default
pub const TPG_PPC_DEFAULT: u32 = 1;

/// Horizontal blanking for the 4K timing profile
pub const TPG_4K_HOR_BLANKING: u32 = 560;
/// Vertical blanking for the 4K timing profile
pub const TPG_4K_VER_BLANKING: u32 = 90;

/// Entity name used when the media graph reports no entities
const TPG_ENTITY_FALLBACK: &str = "none";

/// How a video source is driven.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Plain V4L2 capture node
    V4l2,
    /// Media-controller-backed source (the TPG is always this)
    Media,
}

/// Which physical TPG instance a handle drives.
///
/// The first instance sits on `/dev/media0`; any other media node (or an
/// unknown one) is the second instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TpgKind {
    Tpg1,
    Tpg2,
}

impl TpgKind {
    pub fn name(&self) -> &'static str {
        match self {
            TpgKind::Tpg1 => "TPG 1",
            TpgKind::Tpg2 => "TPG 2",
        }
    }
}

impl fmt::Display for TpgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Match-table entry a TPG source is created from.
#[derive(Clone, Copy, Debug)]
pub struct MatchEntry {
    /// Capture pipeline entity string this source matches on
    pub entity: &'static str,
}

/// Known TPG capture pipelines.
pub const TPG_MATCH_TABLE: &[MatchEntry] = &[MatchEntry {
    entity: "vcap_tpg output 0",
}];

/// Cached pattern configuration, replayed on initialization.
///
/// `ppc` is tracked for bookkeeping but not replayed; the hardware default
/// stands until [`TpgSource::set_ppc`] is called.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternConfig {
    pub background: u32,
    pub foreground: u32,
    pub ppc: u32,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            background: TPG_BG_PATTERN_DEFAULT,
            foreground: TPG_FG_DEFAULT,
            ppc: TPG_PPC_DEFAULT,
        }
    }
}

/// Input configuration for media pipeline setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetupConfig {
    /// Input image width in pixels
    pub width_in: u32,
    /// Input image height in pixels
    pub height_in: u32,
}

impl SetupConfig {
    pub fn new(width_in: u32, height_in: u32) -> Self {
        Self {
            width_in,
            height_in,
        }
    }
}

/// A configured TPG video source.
///
/// Created by [`TpgSource::init`], which applies the default pattern
/// configuration before handing the source to the caller. The pattern cache
/// lives in the handle, so independent sources never observe each other's
/// state.
#[derive(Debug)]
pub struct TpgSource<B: MediaBackend> {
    backend: B,
    source_type: SourceKind,
    kind: TpgKind,
    display_text: &'static str,
    entity_match: &'static str,
    pattern: PatternConfig,
}

impl<B: MediaBackend> TpgSource<B> {
    /// Build a TPG source over `backend` and apply the default
    /// configuration (background pattern 9, no foreground overlay, 4K
    /// blanking profile).
    ///
    /// The physical instance is detected from the backend's device node:
    /// a node containing `media0` is [`TpgKind::Tpg1`], everything else,
    /// including an unknown node, is [`TpgKind::Tpg2`].
    ///
    /// # Errors
    ///
    /// Returns an error if entity enumeration fails or any of the default
    /// control writes is rejected.
    pub fn init(mte: &MatchEntry, backend: B) -> Result<Self, Error> {
        let kind = match backend.devnode() {
            Some(node) if node.contains("media0") => TpgKind::Tpg1,
            _ => TpgKind::Tpg2,
        };

        let mut vd = Self {
            backend,
            source_type: SourceKind::Media,
            kind,
            display_text: "Test Pattern Generator",
            entity_match: mte.entity,
            pattern: PatternConfig::default(),
        };

        vd.apply_current_config()?;

        Ok(vd)
    }

    /// Resolve the TPG entity name: the last entity the kernel enumerates,
    /// or `"none"` for an empty graph.
    fn tpg_entity(&self) -> Result<String, Error> {
        let entities = self.backend.enumerate()?;
        Ok(entities
            .last()
            .map(|e| e.name.clone())
            .unwrap_or_else(|| TPG_ENTITY_FALLBACK.to_owned()))
    }

    /// Write one control on the TPG entity.
    fn set_ctrl(&self, id: u32, value: i32) -> Result<(), Error> {
        let entity = self.tpg_entity()?;
        self.backend.set_control(&entity, id, value)
    }

    /// Set vertical and horizontal blanking, in that order.
    pub fn set_blanking(&self, vblank: u32, hblank: u32) -> Result<(), Error> {
        self.set_ctrl(controls::V4L2_CID_VBLANK, vblank as i32)?;
        self.set_ctrl(controls::V4L2_CID_HBLANK, hblank as i32)
    }

    /// Select the background test pattern.
    ///
    /// The cached value tracks the requested pattern even when the write
    /// fails, so a later re-initialization replays what the caller asked
    /// for, not what the driver accepted.
    pub fn set_bg_pattern(&mut self, bg: u32) -> Result<(), Error> {
        let ret = self.set_ctrl(controls::V4L2_CID_TEST_PATTERN, bg as i32);
        self.pattern.background = bg;
        ret
    }

    /// Select the foreground overlay pattern (0 disables the overlay).
    pub fn set_fg_pattern(&mut self, fg: u32) -> Result<(), Error> {
        let ret = self.set_ctrl(controls::V4L2_CID_XILINX_TPG_HLS_FG_PATTERN, fg as i32);
        self.pattern.foreground = fg;
        ret
    }

    /// Set the pixels-per-clock throughput of the generator.
    pub fn set_ppc(&mut self, ppc: u32) -> Result<(), Error> {
        let ret = self.set_ctrl(controls::V4L2_CID_XILINX_PPC, ppc as i32);
        self.pattern.ppc = ppc;
        ret
    }

    /// Push the cached pattern configuration and the 4K blanking profile.
    fn apply_current_config(&mut self) -> Result<(), Error> {
        let current = self.pattern;
        self.set_bg_pattern(current.background)?;
        // Box overlay is disabled, no foreground pattern
        self.set_fg_pattern(current.foreground)?;

        // TODO: derive hblank and vblank from the input resolution once
        // native monitor resolution detection is in place.
        self.set_blanking(TPG_4K_HOR_BLANKING, TPG_4K_VER_BLANKING)
    }

    /// Program the TPG input: pad 0 of the resolved entity is set to the
    /// `VYYUYY8` media-bus encoding at the configured dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormatSetup`] when the driver rejects the format,
    /// [`Error::Enumerate`] when the graph cannot be read.
    pub fn set_media_format(&self, cfg: &SetupConfig) -> Result<(), Error> {
        let entity = self.tpg_entity()?;

        if log::log_enabled!(log::Level::Debug) {
            match self.backend.device_info() {
                Ok(info) => log::debug!("media device: {}", info),
                Err(err) => log::debug!("media device info unavailable: {}", err),
            }
        }

        let code = formats::mbus_code(TPG_MEDIA_FMT_IN)
            .ok_or_else(|| Error::UnknownFormat(TPG_MEDIA_FMT_IN.to_owned()))?;
        let format = PadFormat::new(code, cfg.width_in, cfg.height_in);

        log::debug!("setting \"{}\":0 to [{}]", entity, format);
        self.backend.set_format(&entity, 0, &format)
    }

    /// Which physical TPG instance this source drives.
    pub fn kind(&self) -> TpgKind {
        self.kind
    }

    /// How the source is driven (always media-controller for the TPG).
    pub fn source_type(&self) -> SourceKind {
        self.source_type
    }

    /// Human-readable source label.
    pub fn display_text(&self) -> &str {
        self.display_text
    }

    /// The match-table entity string this source was created from.
    pub fn entity_match(&self) -> &str {
        self.entity_match
    }

    /// The cached pattern configuration.
    pub fn current_config(&self) -> PatternConfig {
        self.pattern
    }

    /// The media backend this source drives.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
