//! The electronic dipole-moment property and its per-axis operators.

use std::fmt;

use anyhow;
use serde::{Deserialize, Serialize};

use crate::drivers::ElectronicDriverOutput;
use crate::operators::fermionic::FermionicOp;
use crate::properties::integrals::OneBodyIntegrals;

#[cfg(test)]
#[path = "dipole_moment_tests.rs"]
mod dipole_moment_tests;

/// An enumerated type for the three Cartesian dipole axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DipoleAxis {
    X,
    Y,
    Z,
}

impl DipoleAxis {
    /// All three axes in the fixed x, y, z order.
    pub const ALL: [DipoleAxis; 3] = [DipoleAxis::X, DipoleAxis::Y, DipoleAxis::Z];

    /// The operator name for this axis.
    pub fn operator_name(self) -> &'static str {
        match self {
            DipoleAxis::X => "DipoleMomentX",
            DipoleAxis::Y => "DipoleMomentY",
            DipoleAxis::Z => "DipoleMomentZ",
        }
    }
}

impl fmt::Display for DipoleAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DipoleAxis::X => write!(f, "x"),
            DipoleAxis::Y => write!(f, "y"),
            DipoleAxis::Z => write!(f, "z"),
        }
    }
}

/// The electronic dipole-moment property: one-body dipole integrals per
/// Cartesian axis, the nuclear dipole moment, and the driver's sign
/// convention.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectronicDipoleMoment {
    /// Dipole integrals along x, if reported.
    x_dipole: Option<OneBodyIntegrals>,

    /// Dipole integrals along y, if reported.
    y_dipole: Option<OneBodyIntegrals>,

    /// Dipole integrals along z, if reported.
    z_dipole: Option<OneBodyIntegrals>,

    /// The nuclear contribution to the dipole moment, if reported.
    nuclear_dipole_moment: Option<[f64; 3]>,

    /// Whether the driver reports dipole integrals with a reversed sign
    /// convention.
    reverse_dipole_sign: bool,
}

impl ElectronicDipoleMoment {
    /// The name under which this property is registered.
    pub fn name() -> &'static str {
        "ElectronicDipoleMoment"
    }

    /// Constructs the property from per-axis dipole integrals.
    pub fn new(
        x_dipole: Option<OneBodyIntegrals>,
        y_dipole: Option<OneBodyIntegrals>,
        z_dipole: Option<OneBodyIntegrals>,
    ) -> Self {
        ElectronicDipoleMoment {
            x_dipole,
            y_dipole,
            z_dipole,
            nuclear_dipole_moment: None,
            reverse_dipole_sign: false,
        }
    }

    /// Attaches the nuclear dipole moment.
    pub fn with_nuclear_dipole_moment(mut self, nuclear: [f64; 3]) -> Self {
        self.nuclear_dipole_moment = Some(nuclear);
        self
    }

    /// Records a reversed driver sign convention.
    pub fn with_reversed_sign(mut self, reversed: bool) -> Self {
        self.reverse_dipole_sign = reversed;
        self
    }

    /// Converts the relevant fields of a legacy monolithic driver output into
    /// this property.
    pub fn from_legacy_driver_output(
        output: &ElectronicDriverOutput,
    ) -> Result<Self, anyhow::Error> {
        let convert = |ints: Option<&ndarray::Array2<f64>>| {
            ints.map(|matrix| OneBodyIntegrals::new(matrix.clone(), None))
                .transpose()
        };
        let mut property = ElectronicDipoleMoment::new(
            convert(output.x_dip_mo_ints())?,
            convert(output.y_dip_mo_ints())?,
            convert(output.z_dip_mo_ints())?,
        )
        .with_reversed_sign(output.reverse_dipole_sign());
        if let Some(nuclear) = output.nuclear_dipole_moment() {
            property = property.with_nuclear_dipole_moment(nuclear);
        }
        Ok(property)
    }

    /// The dipole integrals along the given axis, if present.
    pub fn dipole_integrals(&self, axis: DipoleAxis) -> Option<&OneBodyIntegrals> {
        match axis {
            DipoleAxis::X => self.x_dipole.as_ref(),
            DipoleAxis::Y => self.y_dipole.as_ref(),
            DipoleAxis::Z => self.z_dipole.as_ref(),
        }
    }

    /// The nuclear contribution to the dipole moment, if reported.
    pub fn nuclear_dipole_moment(&self) -> Option<[f64; 3]> {
        self.nuclear_dipole_moment
    }

    /// Whether the driver reports dipole integrals with a reversed sign
    /// convention.
    pub fn reverse_dipole_sign(&self) -> bool {
        self.reverse_dipole_sign
    }

    /// Emits one named dipole operator per axis with stored integrals, in the
    /// fixed x, y, z order.
    pub fn second_q_ops(&self) -> Vec<(String, FermionicOp)> {
        DipoleAxis::ALL
            .iter()
            .filter_map(|&axis| {
                self.dipole_integrals(axis).map(|ints| {
                    (axis.operator_name().to_string(), ints.to_fermionic_op())
                })
            })
            .collect()
    }
}

impl fmt::Display for ElectronicDipoleMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axes: Vec<_> = DipoleAxis::ALL
            .iter()
            .filter(|&&axis| self.dipole_integrals(axis).is_some())
            .map(|axis| axis.to_string())
            .collect();
        write!(f, "ElectronicDipoleMoment (axes: {})", axes.join(", "))?;
        if self.reverse_dipole_sign {
            write!(f, " [reversed sign]")?;
        }
        Ok(())
    }
}
