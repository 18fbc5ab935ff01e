//! Electronic basis frames and basis-change transforms.

use std::fmt;

use anyhow::{self, bail, format_err};
use ndarray::{Array2, Ix2};
use ndarray_einsum_beta::einsum;
use serde::{Deserialize, Serialize};

use crate::error::QPropError;

#[cfg(test)]
#[path = "bases_tests.rs"]
mod bases_tests;

/// An enumerated type for the basis frames in which integrals can be
/// expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElectronicBasis {
    /// The atomic-orbital basis.
    Ao,

    /// The molecular-orbital basis.
    Mo,
}

impl fmt::Display for ElectronicBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElectronicBasis::Ao => write!(f, "AO"),
            ElectronicBasis::Mo => write!(f, "MO"),
        }
    }
}

/// A basis-change transform between two basis frames, carried by per-spin
/// coefficient matrices. A missing beta channel falls back to the alpha
/// channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BasisTransform {
    /// The basis frame the transform maps from.
    initial_basis: ElectronicBasis,

    /// The basis frame the transform maps to.
    final_basis: ElectronicBasis,

    /// The alpha-spin coefficient matrix.
    coeff_alpha: Array2<f64>,

    /// The optional beta-spin coefficient matrix.
    coeff_beta: Option<Array2<f64>>,
}

impl BasisTransform {
    /// The name under which this property is registered.
    pub fn name() -> &'static str {
        "BasisTransform"
    }

    /// Constructs a basis-change transform.
    ///
    /// # Arguments
    ///
    /// * `initial_basis` - The basis frame the transform maps from.
    /// * `final_basis` - The basis frame the transform maps to.
    /// * `coeff_alpha` - The alpha-spin coefficient matrix.
    /// * `coeff_beta` - The optional beta-spin coefficient matrix, which must
    ///     match the alpha-spin dimensions.
    pub fn new(
        initial_basis: ElectronicBasis,
        final_basis: ElectronicBasis,
        coeff_alpha: Array2<f64>,
        coeff_beta: Option<Array2<f64>>,
    ) -> Result<Self, anyhow::Error> {
        if let Some(b) = &coeff_beta {
            if b.dim() != coeff_alpha.dim() {
                bail!(QPropError::ShapeMismatch {
                    name: "coeff_beta".to_string(),
                    reason: format!(
                        "expected {:?} to match coeff_alpha, got {:?}",
                        coeff_alpha.dim(),
                        b.dim()
                    ),
                });
            }
        }
        Ok(BasisTransform {
            initial_basis,
            final_basis,
            coeff_alpha,
            coeff_beta,
        })
    }

    /// The basis frame the transform maps from.
    pub fn initial_basis(&self) -> ElectronicBasis {
        self.initial_basis
    }

    /// The basis frame the transform maps to.
    pub fn final_basis(&self) -> ElectronicBasis {
        self.final_basis
    }

    /// The alpha-spin coefficient matrix.
    pub fn coeff_alpha(&self) -> &Array2<f64> {
        &self.coeff_alpha
    }

    /// The beta-spin coefficient matrix, falling back to the alpha-spin one
    /// when absent.
    pub fn coeff_beta(&self) -> &Array2<f64> {
        self.coeff_beta.as_ref().unwrap_or(&self.coeff_alpha)
    }

    /// Whether a distinct beta-spin channel is stored.
    pub fn has_beta(&self) -> bool {
        self.coeff_beta.is_some()
    }

    /// Applies the transform to a one-body matrix in the initial basis,
    /// contracting $`h' = C^{\mathrm{T}} h C`$ with the alpha-spin
    /// coefficients.
    ///
    /// # Arguments
    ///
    /// * `matrix` - A one-body matrix expressed in the initial basis.
    ///
    /// # Returns
    ///
    /// The matrix expressed in the final basis.
    pub fn transform_one_body(&self, matrix: &Array2<f64>) -> Result<Array2<f64>, anyhow::Error> {
        if matrix.nrows() != self.coeff_alpha.nrows() {
            bail!(QPropError::ShapeMismatch {
                name: "matrix".to_string(),
                reason: format!(
                    "expected {} rows to match the coefficients, got {}",
                    self.coeff_alpha.nrows(),
                    matrix.nrows()
                ),
            });
        }
        let transformed = einsum(
            "ji,jk,kl->il",
            &[&self.coeff_alpha, matrix, &self.coeff_alpha],
        )
        .map_err(|err| format_err!("Basis-change contraction failed: {err}"))?;
        transformed
            .into_dimensionality::<Ix2>()
            .map_err(|err| format_err!("Basis-change contraction returned a bad shape: {err}"))
    }
}

impl fmt::Display for BasisTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BasisTransform ({} → {}, {} orbitals, {})",
            self.initial_basis,
            self.final_basis,
            self.coeff_alpha.ncols(),
            if self.has_beta() {
                "unrestricted"
            } else {
                "restricted"
            }
        )
    }
}
