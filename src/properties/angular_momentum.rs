//! The angular-momentum property and the total-spin operator.

use std::fmt;

use anyhow::{self, bail};
use serde::{Deserialize, Serialize};

use crate::drivers::ElectronicDriverOutput;
use crate::error::QPropError;
use crate::operators::fermionic::{FermionicOp, DEFAULT_COEFF_THRESHOLD};

#[cfg(test)]
#[path = "angular_momentum_tests.rs"]
mod angular_momentum_tests;

/// The spin-raising operator
/// $`\hat{S}_+ = \sum_{i} a^{\dagger}_{i\alpha} a_{i\beta}`$ over
/// `num_spin_orbitals` spin orbitals.
pub(crate) fn s_plus_op(num_spin_orbitals: usize) -> FermionicOp {
    let n = num_spin_orbitals / 2;
    FermionicOp::from_terms(
        (0..n).map(|i| (format!("+_{} -_{}", i, i + n), 1.0)),
        num_spin_orbitals,
    )
    .expect("Generated ladder labels are valid by construction.")
}

/// The spin-projection operator
/// $`\hat{S}_z = \tfrac{1}{2} \sum_{i} (\hat{n}_{i\alpha} - \hat{n}_{i\beta})`$
/// over `num_spin_orbitals` spin orbitals.
pub(crate) fn s_z_op(num_spin_orbitals: usize) -> FermionicOp {
    let n = num_spin_orbitals / 2;
    FermionicOp::from_terms(
        (0..num_spin_orbitals).map(|p| {
            let sign = if p < n { 0.5 } else { -0.5 };
            (format!("+_{p} -_{p}"), sign)
        }),
        num_spin_orbitals,
    )
    .expect("Generated ladder labels are valid by construction.")
}

/// The angular-momentum property: emits the total-spin operator
/// $`\hat{S}^2`$ of the system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngularMomentum {
    /// The number of spin orbitals.
    num_spin_orbitals: usize,
}

impl AngularMomentum {
    /// The name under which this property is registered and its operator
    /// emitted.
    pub fn name() -> &'static str {
        "AngularMomentum"
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
        Ok(AngularMomentum { num_spin_orbitals })
    }

    /// Converts the relevant fields of a legacy monolithic driver output into
    /// this property.
    pub fn from_legacy_driver_output(
        output: &ElectronicDriverOutput,
    ) -> Result<Self, anyhow::Error> {
        AngularMomentum::new(2 * output.num_molecular_orbitals())
    }

    /// The number of spin orbitals.
    pub fn num_spin_orbitals(&self) -> usize {
        self.num_spin_orbitals
    }

    /// Emits the total-spin operator composed algebraically from the ladder
    /// operators:
    /// $`\hat{S}^2 = \hat{S}_- \hat{S}_+ + \hat{S}_z + \hat{S}_z^2`$.
    pub fn second_q_ops(&self) -> Vec<(String, FermionicOp)> {
        let s_plus = s_plus_op(self.num_spin_orbitals);
        let s_minus = s_plus.adjoint();
        let s_z = s_z_op(self.num_spin_orbitals);
        let s_squared = &(&(&s_minus * &s_plus) + &s_z) + &(&s_z * &s_z);
        vec![(
            Self::name().to_string(),
            s_squared.normal_order(DEFAULT_COEFF_THRESHOLD),
        )]
    }
}

impl fmt::Display for AngularMomentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AngularMomentum ({} spin orbitals)", self.num_spin_orbitals)
    }
}
