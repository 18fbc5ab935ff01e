//! The particle-number property and the total number operator.

use std::fmt;

use anyhow::{self, bail};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::drivers::ElectronicDriverOutput;
use crate::error::QPropError;
use crate::operators::fermionic::FermionicOp;

#[cfg(test)]
#[path = "particle_number_tests.rs"]
mod particle_number_tests;

/// The particle-number property: electron counts per spin channel and,
/// optionally, the orbital occupation patterns reported by the driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleNumber {
    /// The number of spin orbitals.
    num_spin_orbitals: usize,

    /// The number of alpha-spin electrons.
    num_alpha: usize,

    /// The number of beta-spin electrons.
    num_beta: usize,

    /// Alpha-spin orbital occupations, if reported.
    occupation: Option<Array1<f64>>,

    /// Beta-spin orbital occupations, if reported.
    occupation_b: Option<Array1<f64>>,
}

impl ParticleNumber {
    /// The name under which this property is registered and its operator
    /// emitted.
    pub fn name() -> &'static str {
        "ParticleNumber"
    }

    /// Constructs the property from the spin-orbital count and the electron
    /// counts.
    ///
    /// # Arguments
    ///
    /// * `num_spin_orbitals` - The number of spin orbitals; must be even.
    /// * `num_alpha` - The number of alpha-spin electrons.
    /// * `num_beta` - The number of beta-spin electrons.
    pub fn new(
        num_spin_orbitals: usize,
        num_alpha: usize,
        num_beta: usize,
    ) -> Result<Self, anyhow::Error> {
        if num_spin_orbitals % 2 != 0 {
            bail!(QPropError::ShapeMismatch {
                name: "num_spin_orbitals".to_string(),
                reason: format!("expected an even number, got {num_spin_orbitals}"),
            });
        }
        Ok(ParticleNumber {
            num_spin_orbitals,
            num_alpha,
            num_beta,
            occupation: None,
            occupation_b: None,
        })
    }

    /// Attaches orbital occupation patterns for both spin channels.
    pub fn with_occupations(mut self, alpha: Array1<f64>, beta: Option<Array1<f64>>) -> Self {
        self.occupation = Some(alpha);
        self.occupation_b = beta;
        self
    }

    /// Converts the relevant fields of a legacy monolithic driver output into
    /// this property.
    pub fn from_legacy_driver_output(
        output: &ElectronicDriverOutput,
    ) -> Result<Self, anyhow::Error> {
        ParticleNumber::new(
            2 * output.num_molecular_orbitals(),
            output.num_alpha(),
            output.num_beta(),
        )
    }

    /// The number of spin orbitals.
    pub fn num_spin_orbitals(&self) -> usize {
        self.num_spin_orbitals
    }

    /// The number of alpha-spin electrons.
    pub fn num_alpha(&self) -> usize {
        self.num_alpha
    }

    /// The number of beta-spin electrons.
    pub fn num_beta(&self) -> usize {
        self.num_beta
    }

    /// The total number of electrons.
    pub fn num_particles(&self) -> usize {
        self.num_alpha + self.num_beta
    }

    /// Alpha-spin orbital occupations, if reported.
    pub fn occupation(&self) -> Option<&Array1<f64>> {
        self.occupation.as_ref()
    }

    /// Beta-spin orbital occupations, if reported.
    pub fn occupation_b(&self) -> Option<&Array1<f64>> {
        self.occupation_b.as_ref()
    }

    /// Emits the total number operator
    /// $`\hat{N} = \sum_{p} a^{\dagger}_{p} a_{p}`$.
    pub fn second_q_ops(&self) -> Vec<(String, FermionicOp)> {
        let op = FermionicOp::from_terms(
            (0..self.num_spin_orbitals).map(|p| (format!("+_{p} -_{p}"), 1.0)),
            self.num_spin_orbitals,
        )
        .expect("Generated number-operator labels are valid by construction.");
        vec![(Self::name().to_string(), op)]
    }
}

impl fmt::Display for ParticleNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParticleNumber ({} spin orbitals, {}α + {}β electrons)",
            self.num_spin_orbitals, self.num_alpha, self.num_beta
        )
    }
}
