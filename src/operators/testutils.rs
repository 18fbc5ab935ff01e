//! Dense occupation-basis matrices for cross-checking operators in tests.

use ndarray::Array2;

use crate::operators::fermionic::{FermionicOp, LadderAction};

/// Builds the dense matrix of an operator in the occupation-number basis.
///
/// Basis kets are indexed by bit patterns; bit `p` of the index is the
/// occupation of spin orbital `p`. Ladder actions pick up the fermionic sign
/// $`(-1)^{\sum_{q<p} n_q}`$.
pub(crate) fn dense_matrix(op: &FermionicOp) -> Array2<f64> {
    let n = op.register_length();
    let dim = 1usize << n;
    let mut mat = Array2::<f64>::zeros((dim, dim));
    for (actions, coeff) in op.ladder_terms() {
        'kets: for ket in 0..dim {
            let mut state = ket;
            let mut sign = 1.0f64;
            // The rightmost action applies first.
            for &(action, p) in actions.iter().rev() {
                let occupied = state & (1 << p) != 0;
                let parity = (state & ((1usize << p) - 1)).count_ones();
                match action {
                    LadderAction::Create => {
                        if occupied {
                            continue 'kets;
                        }
                        if parity % 2 == 1 {
                            sign = -sign;
                        }
                        state |= 1 << p;
                    }
                    LadderAction::Annihilate => {
                        if !occupied {
                            continue 'kets;
                        }
                        if parity % 2 == 1 {
                            sign = -sign;
                        }
                        state &= !(1 << p);
                    }
                }
            }
            mat[(state, ket)] += coeff * sign;
        }
    }
    mat
}

/// Element-wise approximate equality of two dense matrices.
pub(crate) fn mats_close(a: &Array2<f64>, b: &Array2<f64>, tol: f64) -> bool {
    a.dim() == b.dim() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= tol)
}
