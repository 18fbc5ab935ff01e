//! The electronic-energy property and its Hamiltonian operator.

use std::fmt;

use anyhow;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::drivers::ElectronicDriverOutput;
use crate::operators::fermionic::FermionicOp;
use crate::properties::integrals::{OneBodyIntegrals, TwoBodyIntegrals};

#[cfg(test)]
#[path = "electronic_energy_tests.rs"]
mod electronic_energy_tests;

/// The electronic-energy property: the molecular-orbital integrals of the
/// electronic Hamiltonian together with the scalar energies reported by the
/// driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectronicEnergy {
    /// One-electron integrals in the molecular-orbital basis.
    one_body: OneBodyIntegrals,

    /// Two-electron repulsion integrals in the molecular-orbital basis.
    two_body: TwoBodyIntegrals,

    /// The nuclear repulsion energy, if reported.
    nuclear_repulsion_energy: Option<f64>,

    /// The converged self-consistent-field energy, if reported.
    reference_energy: Option<f64>,

    /// Alpha-spin orbital energies, if reported.
    orbital_energies: Option<Array1<f64>>,

    /// Beta-spin orbital energies, if reported.
    orbital_energies_b: Option<Array1<f64>>,
}

impl ElectronicEnergy {
    /// The name under which this property is registered and its operator
    /// emitted.
    pub fn name() -> &'static str {
        "ElectronicEnergy"
    }

    /// Constructs the property from its integrals.
    ///
    /// # Arguments
    ///
    /// * `one_body` - One-electron molecular-orbital integrals.
    /// * `two_body` - Two-electron molecular-orbital integrals.
    pub fn new(one_body: OneBodyIntegrals, two_body: TwoBodyIntegrals) -> Self {
        ElectronicEnergy {
            one_body,
            two_body,
            nuclear_repulsion_energy: None,
            reference_energy: None,
            orbital_energies: None,
            orbital_energies_b: None,
        }
    }

    /// Attaches the nuclear repulsion energy.
    pub fn with_nuclear_repulsion_energy(mut self, e_nn: f64) -> Self {
        self.nuclear_repulsion_energy = Some(e_nn);
        self
    }

    /// Attaches the converged reference energy.
    pub fn with_reference_energy(mut self, e_ref: f64) -> Self {
        self.reference_energy = Some(e_ref);
        self
    }

    /// Attaches orbital energies for both spin channels.
    pub fn with_orbital_energies(
        mut self,
        alpha: Array1<f64>,
        beta: Option<Array1<f64>>,
    ) -> Self {
        self.orbital_energies = Some(alpha);
        self.orbital_energies_b = beta;
        self
    }

    /// Converts the relevant fields of a legacy monolithic driver output into
    /// this property.
    pub fn from_legacy_driver_output(
        output: &ElectronicDriverOutput,
    ) -> Result<Self, anyhow::Error> {
        let one_body = OneBodyIntegrals::new(
            output.mo_onee_ints().clone(),
            output.mo_onee_ints_b().cloned(),
        )?;
        let two_body = TwoBodyIntegrals::new(
            output.mo_eri_ints().clone(),
            output.mo_eri_ints_bb().cloned(),
            output.mo_eri_ints_ba().cloned(),
        )?;
        let mut property = ElectronicEnergy::new(one_body, two_body);
        if let Some(e_nn) = output.nuclear_repulsion_energy() {
            property = property.with_nuclear_repulsion_energy(e_nn);
        }
        if let Some(e_hf) = output.hf_energy() {
            property = property.with_reference_energy(e_hf);
        }
        if let Some(eps) = output.orbital_energies() {
            property = property
                .with_orbital_energies(eps.clone(), output.orbital_energies_b().cloned());
        }
        Ok(property)
    }

    /// One-electron molecular-orbital integrals.
    pub fn one_body(&self) -> &OneBodyIntegrals {
        &self.one_body
    }

    /// Two-electron molecular-orbital integrals.
    pub fn two_body(&self) -> &TwoBodyIntegrals {
        &self.two_body
    }

    /// The nuclear repulsion energy, if reported.
    pub fn nuclear_repulsion_energy(&self) -> Option<f64> {
        self.nuclear_repulsion_energy
    }

    /// The converged reference energy, if reported.
    pub fn reference_energy(&self) -> Option<f64> {
        self.reference_energy
    }

    /// Alpha-spin orbital energies, if reported.
    pub fn orbital_energies(&self) -> Option<&Array1<f64>> {
        self.orbital_energies.as_ref()
    }

    /// Beta-spin orbital energies, if reported.
    pub fn orbital_energies_b(&self) -> Option<&Array1<f64>> {
        self.orbital_energies_b.as_ref()
    }

    /// The number of spin orbitals spanned by the emitted operator.
    pub fn num_spin_orbitals(&self) -> usize {
        2 * self.one_body.n_spatial()
    }

    /// Emits the electronic Hamiltonian as a named second-quantized operator.
    pub fn second_q_ops(&self) -> Vec<(String, FermionicOp)> {
        let op = &self.one_body.to_fermionic_op() + &self.two_body.to_fermionic_op();
        vec![(Self::name().to_string(), op)]
    }
}

impl fmt::Display for ElectronicEnergy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElectronicEnergy ({} spin orbitals", self.num_spin_orbitals())?;
        if let Some(e_ref) = self.reference_energy {
            write!(f, ", E_ref = {e_ref:.10}")?;
        }
        if let Some(e_nn) = self.nuclear_repulsion_energy {
            write!(f, ", E_nn = {e_nn:.10}")?;
        }
        write!(f, ")")
    }
}
