//! The grouped driver result gathering all electronic-structure properties.

use std::fmt;

use anyhow::{self, bail};
use log;
use serde::{Deserialize, Serialize};

use crate::auxiliary::atom::BOHR_TO_ANGSTROM;
use crate::auxiliary::molecule::Molecule;
use crate::drivers::LegacyDriverResult;
use crate::error::QPropError;
use crate::properties::angular_momentum::AngularMomentum;
use crate::properties::bases::{BasisTransform, ElectronicBasis};
use crate::properties::dipole_moment::ElectronicDipoleMoment;
use crate::properties::driver_metadata::DriverMetadata;
use crate::properties::electronic_energy::ElectronicEnergy;
use crate::properties::magnetization::Magnetization;
use crate::properties::particle_number::ParticleNumber;
use crate::properties::{
    ElectronicProperty, ElectronicPropertyGroup, OperatorCollection, OperatorShape, PropertyKind,
};

#[cfg(test)]
#[path = "result_tests.rs"]
mod result_tests;

/// The comparison threshold applied to molecules restored or converted by
/// this container.
const MOLECULE_THRESHOLD: f64 = 1e-8;

/// A grouped collection of electronic-structure properties computed by a
/// driver, together with the distinguished molecular geometry.
///
/// Instances are constructed empty and populated through
/// [`Self::add_property`], [`Self::from_legacy_driver_result`] or, with the
/// `hdf5` feature, `from_hdf5`; they are treated as immutable thereafter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElectronicStructureDriverResult {
    /// The generic property collection.
    properties: ElectronicPropertyGroup,

    /// The distinguished molecular geometry. Set exactly once, during legacy
    /// conversion or deserialization.
    molecule: Option<Molecule>,
}

impl Default for ElectronicStructureDriverResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ElectronicStructureDriverResult {
    /// The name of this container, also used as its group name in archives.
    pub fn name() -> &'static str {
        "ElectronicStructureDriverResult"
    }

    /// Creates an empty driver result. Properties should be added via
    /// [`Self::add_property`].
    pub fn new() -> Self {
        ElectronicStructureDriverResult {
            properties: ElectronicPropertyGroup::new(Self::name()),
            molecule: None,
        }
    }

    /// Registers a property, replacing any previous one of the same name.
    pub fn add_property(&mut self, property: impl Into<ElectronicProperty>) {
        self.properties.add(property.into());
    }

    /// The generic property collection.
    pub fn properties(&self) -> &ElectronicPropertyGroup {
        &self.properties
    }

    /// The distinguished molecular geometry.
    ///
    /// # Errors
    ///
    /// Returns [`QPropError::MissingMolecule`] when no molecule has been set.
    pub fn molecule(&self) -> Result<&Molecule, QPropError> {
        self.molecule.as_ref().ok_or(QPropError::MissingMolecule)
    }

    /// Sets the distinguished molecular geometry. The molecule is expected to
    /// be set exactly once; replacing a previously set molecule is logged.
    pub fn set_molecule(&mut self, molecule: Molecule) {
        if self.molecule.is_some() {
            log::warn!("The molecule of this driver result has been replaced.");
        }
        self.molecule = Some(molecule);
    }

    /// The electronic-energy property, if registered.
    pub fn electronic_energy(&self) -> Option<&ElectronicEnergy> {
        match self.properties.get_kind(PropertyKind::ElectronicEnergy) {
            Some(ElectronicProperty::ElectronicEnergy(p)) => Some(p),
            _ => None,
        }
    }

    /// The particle-number property, if registered.
    pub fn particle_number(&self) -> Option<&ParticleNumber> {
        match self.properties.get_kind(PropertyKind::ParticleNumber) {
            Some(ElectronicProperty::ParticleNumber(p)) => Some(p),
            _ => None,
        }
    }

    /// The angular-momentum property, if registered.
    pub fn angular_momentum(&self) -> Option<&AngularMomentum> {
        match self.properties.get_kind(PropertyKind::AngularMomentum) {
            Some(ElectronicProperty::AngularMomentum(p)) => Some(p),
            _ => None,
        }
    }

    /// The magnetization property, if registered.
    pub fn magnetization(&self) -> Option<&Magnetization> {
        match self.properties.get_kind(PropertyKind::Magnetization) {
            Some(ElectronicProperty::Magnetization(p)) => Some(p),
            _ => None,
        }
    }

    /// The dipole-moment property, if registered.
    pub fn dipole_moment(&self) -> Option<&ElectronicDipoleMoment> {
        match self.properties.get_kind(PropertyKind::ElectronicDipoleMoment) {
            Some(ElectronicProperty::ElectronicDipoleMoment(p)) => Some(p),
            _ => None,
        }
    }

    /// The basis-transform property, if registered.
    pub fn basis_transform(&self) -> Option<&BasisTransform> {
        match self.properties.get_kind(PropertyKind::BasisTransform) {
            Some(ElectronicProperty::BasisTransform(p)) => Some(p),
            _ => None,
        }
    }

    /// The driver-metadata property, if registered.
    pub fn driver_metadata(&self) -> Option<&DriverMetadata> {
        match self.properties.get_kind(PropertyKind::DriverMetadata) {
            Some(ElectronicProperty::DriverMetadata(p)) => Some(p),
            _ => None,
        }
    }

    /// Converts a legacy monolithic driver result into a grouped driver
    /// result holding the five physical properties, the AO→MO basis
    /// transform, the molecular geometry and the provenance metadata.
    ///
    /// # Arguments
    ///
    /// * `result` - The legacy driver result to convert. Only the electronic
    ///     variant is supported.
    ///
    /// # Errors
    ///
    /// Returns [`QPropError::InvalidInputType`] for a vibrational legacy
    /// result, before any conversion work.
    pub fn from_legacy_driver_result(
        result: &LegacyDriverResult,
    ) -> Result<Self, anyhow::Error> {
        let output = match result {
            LegacyDriverResult::Electronic(output) => output,
            LegacyDriverResult::Vibrational(_) => {
                bail!(QPropError::InvalidInputType {
                    expected: "Electronic".to_string(),
                    got: result.variant_name().to_string(),
                });
            }
        };

        let mut ret = Self::new();

        ret.add_property(ElectronicEnergy::from_legacy_driver_output(output)?);
        ret.add_property(ParticleNumber::from_legacy_driver_output(output)?);
        ret.add_property(AngularMomentum::from_legacy_driver_output(output)?);
        ret.add_property(Magnetization::from_legacy_driver_output(output)?);
        ret.add_property(ElectronicDipoleMoment::from_legacy_driver_output(output)?);

        ret.add_property(BasisTransform::new(
            ElectronicBasis::Ao,
            ElectronicBasis::Mo,
            output.mo_coeff().clone(),
            output.mo_coeff_b().cloned(),
        )?);

        // Legacy coordinates default to Bohr but the molecule requires Ångström.
        let coords_angstrom = output.atom_coords_bohr() * BOHR_TO_ANGSTROM;
        ret.set_molecule(Molecule::from_arrays(
            output.atom_symbols(),
            &coords_angstrom,
            output.molecular_charge(),
            output.multiplicity(),
            MOLECULE_THRESHOLD,
        )?);

        ret.add_property(DriverMetadata::from_legacy_driver_output(output));

        log::debug!(
            "Converted a legacy result from {} {} into {} properties.",
            output.origin_driver_name(),
            output.origin_driver_version(),
            ret.properties.len()
        );
        Ok(ret)
    }

    /// Collects the second-quantized operators of the registered properties
    /// in the requested shape.
    pub fn second_q_ops(&self, shape: OperatorShape) -> OperatorCollection {
        self.properties.second_q_ops(shape)
    }
}

impl fmt::Display for ElectronicStructureDriverResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.properties)?;
        match &self.molecule {
            Some(molecule) => write!(f, "{molecule}"),
            None => writeln!(f, "Molecule: not set"),
        }
    }
}
