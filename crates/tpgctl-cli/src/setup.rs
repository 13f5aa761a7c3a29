// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 The tpgctl Authors

//! Full TPG bring-up: initialization, input format, optional overrides.

use crate::error::CliError;
use crate::set::{apply_controls, AppliedControl, ControlArgs};
use crate::utils::parse_resolution;
use clap::Args as ClapArgs;
use serde::Serialize;
use tpgctl::media::MediaDevice;
use tpgctl::tpg::{SetupConfig, TpgSource, TPG_MATCH_TABLE};

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Media device path
    #[arg(short, long, default_value = "/dev/media0")]
    device: String,

    /// TPG input resolution in WxH format
    #[arg(short, long, default_value = "3840x2160")]
    resolution: String,

    #[command(flatten)]
    controls: ControlArgs,
}

#[derive(Debug, Serialize)]
struct SetupOutput {
    device: String,
    instance: String,
    source: String,
    width: u32,
    height: u32,
    bg_pattern: u32,
    fg_pattern: u32,
    ppc: u32,
    overrides: Vec<AppliedControl>,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing setup command: {:?}", args);

    let (width, height) = parse_resolution(&args.resolution)?;

    let media = MediaDevice::with_path(&args.device)?;
    let mut tpg = TpgSource::init(&TPG_MATCH_TABLE[0], media)?;

    tpg.set_media_format(&SetupConfig::new(width, height))?;

    let overrides = apply_controls(&mut tpg, &args.controls)?;

    let config = tpg.current_config();
    let output = SetupOutput {
        device: args.device,
        instance: tpg.kind().to_string(),
        source: tpg.display_text().to_string(),
        width,
        height,
        bg_pattern: config.background,
        fg_pattern: config.foreground,
        ppc: config.ppc,
        overrides,
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?
        );
    } else {
        println!("{} ({}) on {}", output.source, output.instance, output.device);
        println!("  Input format: VYYUYY8 {}x{}", output.width, output.height);
        println!(
            "  Patterns:     bg {}, fg {}, ppc {}",
            output.bg_pattern, output.fg_pattern, output.ppc
        );
        if !output.overrides.is_empty() {
            println!("  Overrides:");
            for ctl in &output.overrides {
                println!("    {} = {}", ctl.control, ctl.value);
            }
        }
    }

    Ok(())
}
