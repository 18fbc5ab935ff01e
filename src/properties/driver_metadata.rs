//! Provenance metadata for the originating driver.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::drivers::ElectronicDriverOutput;

/// Provenance metadata recording which driver produced a result and how it
/// was configured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverMetadata {
    /// The name of the originating driver.
    driver_name: String,

    /// The version of the originating driver.
    driver_version: String,

    /// The configuration string the driver ran with.
    driver_config: String,
}

impl DriverMetadata {
    /// The name under which this property is registered.
    pub fn name() -> &'static str {
        "DriverMetadata"
    }

    /// Constructs the metadata record.
    pub fn new(driver_name: String, driver_version: String, driver_config: String) -> Self {
        DriverMetadata {
            driver_name,
            driver_version,
            driver_config,
        }
    }

    /// Converts the provenance fields of a legacy monolithic driver output
    /// into this property.
    pub fn from_legacy_driver_output(output: &ElectronicDriverOutput) -> Self {
        DriverMetadata::new(
            output.origin_driver_name().to_string(),
            output.origin_driver_version().to_string(),
            output.origin_driver_config().to_string(),
        )
    }

    /// The name of the originating driver.
    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    /// The version of the originating driver.
    pub fn driver_version(&self) -> &str {
        &self.driver_version
    }

    /// The configuration string the driver ran with.
    pub fn driver_config(&self) -> &str {
        &self.driver_config
    }
}

impl fmt::Display for DriverMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DriverMetadata ({} {})",
            self.driver_name, self.driver_version
        )
    }
}
