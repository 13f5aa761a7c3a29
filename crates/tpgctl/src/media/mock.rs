// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 The tpgctl Authors

//! Recording mock backend for testing without hardware.

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

use crate::Error;

use super::backend::{DeviceInfo, EntityDesc, MediaBackend, PadFormat, Version};

/// One backend call, as observed by the mock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Enumerate,
    SetControl {
        entity: String,
        id: u32,
        value: i32,
    },
    SetFormat {
        entity: String,
        pad: u16,
        code: u32,
        width: u32,
        height: u32,
    },
}

/// Shared mock state: the call log plus failure switches.
///
/// Held through an `Rc` so a test keeps a handle after the backend itself
/// moves into the controller under test.
#[derive(Debug, Default)]
pub struct MockState {
    calls: RefCell<Vec<Call>>,
    fail_enumerate: Cell<bool>,
    fail_controls: Cell<bool>,
    fail_formats: Cell<bool>,
}

impl MockState {
    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Only the recorded control writes, in order.
    pub fn control_writes(&self) -> Vec<(u32, i32)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::SetControl { id, value, .. } => Some((*id, *value)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn set_fail_enumerate(&self, fail: bool) {
        self.fail_enumerate.set(fail);
    }

    pub fn set_fail_controls(&self, fail: bool) {
        self.fail_controls.set(fail);
    }

    pub fn set_fail_formats(&self, fail: bool) {
        self.fail_formats.set(fail);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

/// Mock media backend with a programmable entity list.
#[derive(Debug)]
pub struct MockBackend {
    entities: Vec<EntityDesc>,
    devnode: Option<String>,
    state: Rc<MockState>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            devnode: None,
            state: Rc::new(MockState::default()),
        }
    }

    /// Populate the entity list with the given names, ids in kernel order.
    pub fn with_entities(mut self, names: &[&str]) -> Self {
        self.entities = names
            .iter()
            .enumerate()
            .map(|(i, name)| EntityDesc {
                id: i as u32 + 1,
                name: (*name).to_owned(),
                function: 0x0002_000d, // arbitrary subdev function
                pads: 2,
                links: 1,
                devnum: Some((81, i as u32)),
            })
            .collect();
        self
    }

    pub fn with_devnode(mut self, devnode: &str) -> Self {
        self.devnode = Some(devnode.to_owned());
        self
    }

    /// Handle on the shared state, kept by the test.
    pub fn state(&self) -> Rc<MockState> {
        Rc::clone(&self.state)
    }

    fn check_entity(&self, entity: &str) -> Result<(), Error> {
        if self.entities.iter().any(|e| e.name == entity) {
            Ok(())
        } else {
            Err(Error::EntityNotFound(entity.to_owned()))
        }
    }
}

impl MediaBackend for MockBackend {
    fn enumerate(&self) -> Result<Vec<EntityDesc>, Error> {
        self.state.record(Call::Enumerate);
        if self.state.fail_enumerate.get() {
            return Err(Error::Enumerate(io::Error::from_raw_os_error(libc::ENODEV)));
        }
        Ok(self.entities.clone())
    }

    fn device_info(&self) -> Result<DeviceInfo, Error> {
        Ok(DeviceInfo {
            driver: "mock-media".to_owned(),
            model: "Mock Media Device".to_owned(),
            serial: String::new(),
            bus_info: "platform:mock".to_owned(),
            media_version: Version::from(0x0005_0400),
            hw_revision: 0,
            driver_version: Version::from(0x0005_0400),
        })
    }

    fn devnode(&self) -> Option<&str> {
        self.devnode.as_deref()
    }

    fn set_control(&self, entity: &str, id: u32, value: i32) -> Result<(), Error> {
        self.state.record(Call::SetControl {
            entity: entity.to_owned(),
            id,
            value,
        });
        self.check_entity(entity)?;
        if self.state.fail_controls.get() {
            return Err(Error::ControlWrite {
                id,
                source: io::Error::from_raw_os_error(libc::EINVAL),
            });
        }
        Ok(())
    }

    fn set_format(&self, entity: &str, pad: u16, format: &PadFormat) -> Result<(), Error> {
        self.state.record(Call::SetFormat {
            entity: entity.to_owned(),
            pad,
            code: format.code,
            width: format.width,
            height: format.height,
        });
        self.check_entity(entity)?;
        if self.state.fail_formats.get() {
            return Err(Error::FormatSetup {
                entity: entity.to_owned(),
                source: io::Error::from_raw_os_error(libc::EPIPE),
            });
        }
        Ok(())
    }
}
