// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 The tpgctl Authors

//! Media device inspection: driver metadata and the entity graph.

use crate::error::CliError;
use clap::Args as ClapArgs;
use serde::Serialize;
use tpgctl::media::{MediaBackend, MediaDevice};

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Media device path
    #[arg(short, long, default_value = "/dev/media0")]
    device: String,
}

#[derive(Debug, Serialize)]
struct InfoOutput {
    device: String,
    driver: String,
    model: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    serial: String,
    bus_info: String,
    media_version: String,
    driver_version: String,
    hw_revision: u32,
    entities: Vec<EntityOutput>,
}

#[derive(Debug, Serialize)]
struct EntityOutput {
    id: u32,
    name: String,
    pads: u16,
    links: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    devnum: Option<String>,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing info command: {:?}", args);

    let media = MediaDevice::with_path(&args.device)?;
    let info = media.device_info()?;
    let entities = media.enumerate()?;

    let output = InfoOutput {
        device: args.device,
        driver: info.driver,
        model: info.model,
        serial: info.serial,
        bus_info: info.bus_info,
        media_version: info.media_version.to_string(),
        driver_version: info.driver_version.to_string(),
        hw_revision: info.hw_revision,
        entities: entities
            .iter()
            .map(|e| EntityOutput {
                id: e.id,
                name: e.name.clone(),
                pads: e.pads,
                links: e.links,
                devnum: e.devnum.map(|(major, minor)| format!("{}:{}", major, minor)),
            })
            .collect(),
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?
        );
    } else {
        print_human(&output);
    }

    Ok(())
}

fn print_human(output: &InfoOutput) {
    println!("Media device: {}", output.device);
    println!("  Driver:         {}", output.driver);
    println!("  Model:          {}", output.model);
    if !output.serial.is_empty() {
        println!("  Serial:         {}", output.serial);
    }
    println!("  Bus info:       {}", output.bus_info);
    println!("  Media version:  {}", output.media_version);
    println!("  Driver version: {}", output.driver_version);
    println!("  HW revision:    {:#x}", output.hw_revision);
    println!();

    println!("Entities ({}):", output.entities.len());
    for entity in &output.entities {
        print!(
            "  [{}] {} (pads {}, links {})",
            entity.id, entity.name, entity.pads, entity.links
        );
        match &entity.devnum {
            Some(devnum) => println!(" - dev {}", devnum),
            None => println!(),
        }
    }
}
