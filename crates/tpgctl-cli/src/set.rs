// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 The tpgctl Authors

//! Push individual TPG control values.

use crate::error::CliError;
use clap::Args as ClapArgs;
use serde::Serialize;
use tpgctl::media::{MediaBackend, MediaDevice};
use tpgctl::tpg::{TpgSource, TPG_MATCH_TABLE};

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Media device path
    #[arg(short, long, default_value = "/dev/media0")]
    device: String,

    #[command(flatten)]
    controls: ControlArgs,
}

/// Control overrides shared between `set` and `setup`.
#[derive(ClapArgs, Debug, Default)]
pub struct ControlArgs {
    /// Background pattern index (driver menu value)
    #[arg(long)]
    pub bg: Option<u32>,

    /// Foreground overlay pattern (0 disables the overlay)
    #[arg(long)]
    pub fg: Option<u32>,

    /// Pixels per clock
    #[arg(long)]
    pub ppc: Option<u32>,

    /// Vertical blanking in lines (requires --hblank)
    #[arg(long)]
    pub vblank: Option<u32>,

    /// Horizontal blanking in pixels (requires --vblank)
    #[arg(long)]
    pub hblank: Option<u32>,
}

impl ControlArgs {
    pub fn is_empty(&self) -> bool {
        self.bg.is_none()
            && self.fg.is_none()
            && self.ppc.is_none()
            && self.vblank.is_none()
            && self.hblank.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct AppliedOutput {
    pub device: String,
    pub instance: String,
    pub applied: Vec<AppliedControl>,
}

#[derive(Debug, Serialize)]
pub struct AppliedControl {
    pub control: &'static str,
    pub value: u32,
}

/// Apply the requested controls on an initialized TPG, reporting what was
/// written.
pub fn apply_controls<B: MediaBackend>(
    tpg: &mut TpgSource<B>,
    controls: &ControlArgs,
) -> Result<Vec<AppliedControl>, CliError> {
    let mut applied = Vec::new();

    if let Some(bg) = controls.bg {
        tpg.set_bg_pattern(bg)?;
        applied.push(AppliedControl {
            control: "bg-pattern",
            value: bg,
        });
    }

    if let Some(fg) = controls.fg {
        tpg.set_fg_pattern(fg)?;
        applied.push(AppliedControl {
            control: "fg-pattern",
            value: fg,
        });
    }

    if let Some(ppc) = controls.ppc {
        tpg.set_ppc(ppc)?;
        applied.push(AppliedControl {
            control: "ppc",
            value: ppc,
        });
    }

    match (controls.vblank, controls.hblank) {
        (Some(vblank), Some(hblank)) => {
            tpg.set_blanking(vblank, hblank)?;
            applied.push(AppliedControl {
                control: "vblank",
                value: vblank,
            });
            applied.push(AppliedControl {
                control: "hblank",
                value: hblank,
            });
        }
        (None, None) => {}
        _ => {
            return Err(CliError::InvalidArgs(
                "--vblank and --hblank must be given together".to_string(),
            ));
        }
    }

    Ok(applied)
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing set command: {:?}", args);

    if args.controls.is_empty() {
        return Err(CliError::InvalidArgs(
            "no controls specified (try --bg, --fg, --ppc, --vblank/--hblank)".to_string(),
        ));
    }

    let media = MediaDevice::with_path(&args.device)?;
    let mut tpg = TpgSource::init(&TPG_MATCH_TABLE[0], media)?;

    let applied = apply_controls(&mut tpg, &args.controls)?;

    let output = AppliedOutput {
        device: args.device,
        instance: tpg.kind().to_string(),
        applied,
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?
        );
    } else {
        println!("{} on {}:", output.instance, output.device);
        for ctl in &output.applied {
            println!("  {} = {}", ctl.control, ctl.value);
        }
    }

    Ok(())
}
