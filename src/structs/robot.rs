use std::sync::Arc;

use rand::RngCore;

/// A robot stamped with a serial number when it is built
#[derive(Debug)]
pub struct Robot {
    serial_number: String,
}

impl Robot {
    pub fn new() -> Self {
        let mut bytes = [0u8; 8];
        rand::thread_rng().fill_bytes(&mut bytes);

        let serial_number = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
        Self { serial_number }
    }

    #[cfg(test)]
    pub fn with_serial_number(serial_number: impl Into<String>) -> Self {
        Self {
            serial_number: serial_number.into(),
        }
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }
}

impl Default for Robot {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide holder of a single injected [`Robot`].
///
/// Built once in `main` and shared through the application state. The robot
/// is set at construction and never replaced, so `child` always hands back
/// the same allocation.
#[derive(Debug)]
pub struct RobotFather {
    robot: Arc<Robot>,
}

impl RobotFather {
    pub fn new(robot: Arc<Robot>) -> Self {
        Self { robot }
    }

    pub fn child(&self) -> Arc<Robot> {
        Arc::clone(&self.robot)
    }
}
