//! Electronic integral containers feeding the operator builders.

use std::fmt;

use anyhow::{self, bail};
use ndarray::{Array2, Array4};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::QPropError;
use crate::operators::fermionic::{FermionicOp, DEFAULT_COEFF_THRESHOLD};

#[cfg(test)]
#[path = "integrals_tests.rs"]
mod integrals_tests;

/// An enumerated type for the two spin channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum Spin {
    Alpha,
    Beta,
}

impl Spin {
    /// The register offset of this spin channel for a system of `n_spatial`
    /// spatial orbitals: alpha occupies $`[0, n)`$ and beta $`[n, 2n)`$.
    fn offset(self, n_spatial: usize) -> usize {
        match self {
            Spin::Alpha => 0,
            Spin::Beta => n_spatial,
        }
    }
}

/// One-body integral matrices in a given basis, one per spin channel. A
/// missing beta channel falls back to the alpha channel (spin-restricted
/// case).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OneBodyIntegrals {
    /// The alpha-spin integral matrix.
    alpha: Array2<f64>,

    /// The optional beta-spin integral matrix.
    beta: Option<Array2<f64>>,
}

impl OneBodyIntegrals {
    /// Constructs a one-body integral container.
    ///
    /// # Arguments
    ///
    /// * `alpha` - The alpha-spin integral matrix, which must be square.
    /// * `beta` - The optional beta-spin integral matrix, which must match the
    ///     alpha-spin dimensions.
    pub fn new(alpha: Array2<f64>, beta: Option<Array2<f64>>) -> Result<Self, anyhow::Error> {
        if alpha.nrows() != alpha.ncols() {
            bail!(QPropError::ShapeMismatch {
                name: "alpha".to_string(),
                reason: format!("expected a square matrix, got {:?}", alpha.dim()),
            });
        }
        if let Some(b) = &beta {
            if b.dim() != alpha.dim() {
                bail!(QPropError::ShapeMismatch {
                    name: "beta".to_string(),
                    reason: format!("expected {:?} to match alpha, got {:?}", alpha.dim(), b.dim()),
                });
            }
        }
        Ok(OneBodyIntegrals { alpha, beta })
    }

    /// The number of spatial orbitals.
    pub fn n_spatial(&self) -> usize {
        self.alpha.nrows()
    }

    /// The alpha-spin integral matrix.
    pub fn alpha(&self) -> &Array2<f64> {
        &self.alpha
    }

    /// The beta-spin integral matrix, falling back to the alpha-spin one when
    /// absent.
    pub fn beta(&self) -> &Array2<f64> {
        self.beta.as_ref().unwrap_or(&self.alpha)
    }

    /// Whether a distinct beta-spin channel is stored.
    pub fn has_beta(&self) -> bool {
        self.beta.is_some()
    }

    /// Expands these integrals into a second-quantized operator over
    /// $`2 n_{\mathrm{spatial}}`$ spin orbitals:
    /// $`\sum_{pq\sigma} h^{\sigma}_{pq}\, a^{\dagger}_{p\sigma} a_{q\sigma}`$.
    pub fn to_fermionic_op(&self) -> FermionicOp {
        let n = self.n_spatial();
        let mut terms = Vec::new();
        for (spin, matrix) in [(Spin::Alpha, self.alpha()), (Spin::Beta, self.beta())] {
            let offset = spin.offset(n);
            for ((p, q), value) in matrix.indexed_iter() {
                if value.abs() > DEFAULT_COEFF_THRESHOLD {
                    terms.push((format!("+_{} -_{}", p + offset, q + offset), *value));
                }
            }
        }
        FermionicOp::from_terms(terms, 2 * n)
            .expect("Generated one-body labels are valid by construction.")
    }
}

impl fmt::Display for OneBodyIntegrals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OneBodyIntegrals ({} spatial orbitals, {})",
            self.n_spatial(),
            if self.has_beta() {
                "unrestricted"
            } else {
                "restricted"
            }
        )
    }
}

/// Two-body electron-repulsion integral tensors in chemists' notation
/// $`(ij|kl)`$, one per spin-block. Missing beta blocks fall back to the
/// same-spin alpha block.
///
/// The mixed block is stored in beta-alpha order:
/// `ba[i, j, k, l]` $`= (i_{\beta} j_{\beta} | k_{\alpha} l_{\alpha})`$; the
/// alpha-beta block follows by index transposition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TwoBodyIntegrals {
    /// The alpha-alpha tensor.
    aa: Array4<f64>,

    /// The optional beta-beta tensor.
    bb: Option<Array4<f64>>,

    /// The optional beta-alpha tensor.
    ba: Option<Array4<f64>>,
}

impl TwoBodyIntegrals {
    /// Constructs a two-body integral container.
    ///
    /// # Arguments
    ///
    /// * `aa` - The alpha-alpha tensor; all four dimensions must be equal.
    /// * `bb` - The optional beta-beta tensor.
    /// * `ba` - The optional beta-alpha tensor.
    pub fn new(
        aa: Array4<f64>,
        bb: Option<Array4<f64>>,
        ba: Option<Array4<f64>>,
    ) -> Result<Self, anyhow::Error> {
        let n = aa.dim().0;
        if aa.dim() != (n, n, n, n) {
            bail!(QPropError::ShapeMismatch {
                name: "aa".to_string(),
                reason: format!("expected equal dimensions, got {:?}", aa.dim()),
            });
        }
        for (name, tensor) in [("bb", &bb), ("ba", &ba)] {
            if let Some(t) = tensor {
                if t.dim() != aa.dim() {
                    bail!(QPropError::ShapeMismatch {
                        name: name.to_string(),
                        reason: format!("expected {:?} to match aa, got {:?}", aa.dim(), t.dim()),
                    });
                }
            }
        }
        Ok(TwoBodyIntegrals { aa, bb, ba })
    }

    /// The number of spatial orbitals.
    pub fn n_spatial(&self) -> usize {
        self.aa.dim().0
    }

    /// The alpha-alpha tensor.
    pub fn aa(&self) -> &Array4<f64> {
        &self.aa
    }

    /// The beta-beta tensor, if distinct.
    pub fn bb(&self) -> Option<&Array4<f64>> {
        self.bb.as_ref()
    }

    /// The beta-alpha tensor, if distinct.
    pub fn ba(&self) -> Option<&Array4<f64>> {
        self.ba.as_ref()
    }

    /// The $`(ij|kl)`$ element for the spin pair $`(\sigma, \tau)`$, applying
    /// the restricted fallbacks.
    fn block_element(&self, sigma: Spin, tau: Spin, i: usize, j: usize, k: usize, l: usize) -> f64 {
        match (sigma, tau) {
            (Spin::Alpha, Spin::Alpha) => self.aa[(i, j, k, l)],
            (Spin::Beta, Spin::Beta) => self.bb.as_ref().unwrap_or(&self.aa)[(i, j, k, l)],
            (Spin::Beta, Spin::Alpha) => self.ba.as_ref().unwrap_or(&self.aa)[(i, j, k, l)],
            (Spin::Alpha, Spin::Beta) => match &self.ba {
                Some(ba) => ba[(k, l, i, j)],
                None => self.aa[(i, j, k, l)],
            },
        }
    }

    /// Expands these integrals into a second-quantized operator over
    /// $`2 n_{\mathrm{spatial}}`$ spin orbitals:
    /// $`\tfrac{1}{2} \sum_{ijkl\sigma\tau} (ij|kl)_{\sigma\tau}\,
    /// a^{\dagger}_{i\sigma} a^{\dagger}_{k\tau} a_{l\tau} a_{j\sigma}`$.
    ///
    /// Terms that vanish identically through a repeated creation or
    /// annihilation index are skipped.
    pub fn to_fermionic_op(&self) -> FermionicOp {
        let n = self.n_spatial();
        let spin_pairs = [
            (Spin::Alpha, Spin::Alpha),
            (Spin::Alpha, Spin::Beta),
            (Spin::Beta, Spin::Alpha),
            (Spin::Beta, Spin::Beta),
        ];
        let mut terms = Vec::new();
        for (sigma, tau) in spin_pairs {
            let so = sigma.offset(n);
            let to = tau.offset(n);
            let mut block_terms: Vec<(String, f64)> = (0..n * n * n * n)
                .into_par_iter()
                .filter_map(|flat| {
                    let i = flat / (n * n * n);
                    let j = (flat / (n * n)) % n;
                    let k = (flat / n) % n;
                    let l = flat % n;
                    let value = 0.5 * self.block_element(sigma, tau, i, j, k, l);
                    if value.abs() <= DEFAULT_COEFF_THRESHOLD {
                        return None;
                    }
                    let (c1, c2) = (i + so, k + to);
                    let (a1, a2) = (l + to, j + so);
                    if c1 == c2 || a1 == a2 {
                        return None;
                    }
                    Some((format!("+_{c1} +_{c2} -_{a1} -_{a2}"), value))
                })
                .collect();
            terms.append(&mut block_terms);
        }
        FermionicOp::from_terms(terms, 2 * n)
            .expect("Generated two-body labels are valid by construction.")
    }
}

impl fmt::Display for TwoBodyIntegrals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TwoBodyIntegrals ({} spatial orbitals, blocks: aa{}{})",
            self.n_spatial(),
            if self.bb.is_some() { ", bb" } else { "" },
            if self.ba.is_some() { ", ba" } else { "" },
        )
    }
}
