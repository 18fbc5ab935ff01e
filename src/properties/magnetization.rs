//! The magnetization property and the spin-projection operator.

use std::fmt;

use anyhow::{self, bail};
use serde::{Deserialize, Serialize};

use crate::drivers::ElectronicDriverOutput;
use crate::error::QPropError;
use crate::operators::fermionic::FermionicOp;
use crate::properties::angular_momentum::s_z_op;

#[cfg(test)]
#[path = "magnetization_tests.rs"]
mod magnetization_tests;

/// The magnetization property: emits the spin-projection operator
/// $`\hat{S}_z`$ of the system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Magnetization {
    /// The number of spin orbitals.
    num_spin_orbitals: usize,
}

impl Magnetization {
    /// The name under which this property is registered and its operator
    /// emitted.
    pub fn name() -> &'static str {
        "Magnetization"
    }

    /// Constructs the property.
    ///
    /// # Arguments
    ///
    /// * `num_spin_orbitals` - The number of spin orbitals; must be even.
    pub fn new(num_spin_orbitals: usize) -> Result<Self, anyhow::Error> {
        if num_spin_orbitals % 2 != 0 {
            bail!(QPropError::ShapeMismatch {
                name: "num_spin_orbitals".to_string(),
                reason: format!("expected an even number, got {num_spin_orbitals}"),
            });
        }
        Ok(Magnetization { num_spin_orbitals })
    }

    /// Converts the relevant fields of a legacy monolithic driver output into
    /// this property.
    pub fn from_legacy_driver_output(
        output: &ElectronicDriverOutput,
    ) -> Result<Self, anyhow::Error> {
        Magnetization::new(2 * output.num_molecular_orbitals())
    }

    /// The number of spin orbitals.
    pub fn num_spin_orbitals(&self) -> usize {
        self.num_spin_orbitals
    }

    /// Emits the spin-projection operator
    /// $`\hat{S}_z = \tfrac{1}{2} \sum_{i} (\hat{n}_{i\alpha} - \hat{n}_{i\beta})`$.
    pub fn second_q_ops(&self) -> Vec<(String, FermionicOp)> {
        vec![(Self::name().to_string(), s_z_op(self.num_spin_orbitals))]
    }
}

impl fmt::Display for Magnetization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Magnetization ({} spin orbitals)", self.num_spin_orbitals)
    }
}
