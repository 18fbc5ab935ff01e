use ndarray::{array, Array2, Array4};

use crate::operators::testutils::{dense_matrix, mats_close};
use crate::properties::integrals::{OneBodyIntegrals, TwoBodyIntegrals};

#[test]
fn test_integrals_one_body_validation() {
    assert!(OneBodyIntegrals::new(Array2::zeros((2, 3)), None).is_err());
    assert!(
        OneBodyIntegrals::new(Array2::zeros((2, 2)), Some(Array2::zeros((3, 3)))).is_err()
    );
    assert!(OneBodyIntegrals::new(Array2::zeros((2, 2)), None).is_ok());
}

#[test]
fn test_integrals_one_body_restricted_op() {
    let h = array![[1.0, 0.5], [0.5, 2.0]];
    let ints = OneBodyIntegrals::new(h, None).unwrap();
    assert!(!ints.has_beta());
    let op = ints.to_fermionic_op();
    assert_eq!(op.register_length(), 4);
    assert_eq!(op.n_terms(), 8);
    assert_eq!(op.coefficient("+_0 -_0"), Some(1.0));
    assert_eq!(op.coefficient("+_0 -_1"), Some(0.5));
    // The restricted beta block mirrors the alpha block at offset 2.
    assert_eq!(op.coefficient("+_2 -_2"), Some(1.0));
    assert_eq!(op.coefficient("+_3 -_2"), Some(0.5));
}

#[test]
fn test_integrals_one_body_unrestricted_op() {
    let h_a = array![[1.0, 0.0], [0.0, 2.0]];
    let h_b = array![[3.0, 0.0], [0.0, 4.0]];
    let ints = OneBodyIntegrals::new(h_a, Some(h_b)).unwrap();
    assert!(ints.has_beta());
    let op = ints.to_fermionic_op();
    assert_eq!(op.coefficient("+_0 -_0"), Some(1.0));
    assert_eq!(op.coefficient("+_1 -_1"), Some(2.0));
    assert_eq!(op.coefficient("+_2 -_2"), Some(3.0));
    assert_eq!(op.coefficient("+_3 -_3"), Some(4.0));
}

#[test]
fn test_integrals_two_body_validation() {
    assert!(TwoBodyIntegrals::new(Array4::zeros((2, 2, 2, 1)), None, None).is_err());
    assert!(TwoBodyIntegrals::new(
        Array4::zeros((2, 2, 2, 2)),
        Some(Array4::zeros((1, 1, 1, 1))),
        None
    )
    .is_err());
    assert!(TwoBodyIntegrals::new(Array4::zeros((2, 2, 2, 2)), None, None).is_ok());
}

#[test]
fn test_integrals_single_orbital_hamiltonian_spectrum() {
    // One spatial orbital with on-site repulsion: H has the diagonal
    // occupation-basis action [0, e, e, 2e + u].
    let e = -1.25;
    let u = 0.6746;
    let h1 = OneBodyIntegrals::new(array![[e]], None).unwrap();
    let mut eri = Array4::<f64>::zeros((1, 1, 1, 1));
    eri[(0, 0, 0, 0)] = u;
    let h2 = TwoBodyIntegrals::new(eri, None, None).unwrap();
    let hamiltonian = &h1.to_fermionic_op() + &h2.to_fermionic_op();
    let mat = dense_matrix(&hamiltonian);
    let expected = array![
        [0.0, 0.0, 0.0, 0.0],
        [0.0, e, 0.0, 0.0],
        [0.0, 0.0, e, 0.0],
        [0.0, 0.0, 0.0, 2.0 * e + u],
    ];
    assert!(mats_close(&mat, &expected, 1e-12));
}

#[test]
fn test_integrals_two_body_skips_vanishing_terms() {
    // The same-spin (00|00) contribution carries a repeated creation index
    // and is dropped at build time.
    let mut eri = Array4::<f64>::zeros((1, 1, 1, 1));
    eri[(0, 0, 0, 0)] = 1.0;
    let op = TwoBodyIntegrals::new(eri, None, None)
        .unwrap()
        .to_fermionic_op();
    assert_eq!(op.n_terms(), 2);
    assert_eq!(op.coefficient("+_0 +_1 -_1 -_0"), Some(0.5));
    assert_eq!(op.coefficient("+_1 +_0 -_0 -_1"), Some(0.5));
}

#[test]
fn test_integrals_two_body_mixed_spin_blocks() {
    // Distinct bb and ba blocks must land in their own spin sectors.
    let mut aa = Array4::<f64>::zeros((1, 1, 1, 1));
    aa[(0, 0, 0, 0)] = 0.0;
    let mut bb = Array4::<f64>::zeros((1, 1, 1, 1));
    bb[(0, 0, 0, 0)] = 0.0;
    let mut ba = Array4::<f64>::zeros((1, 1, 1, 1));
    ba[(0, 0, 0, 0)] = 2.0;
    let op = TwoBodyIntegrals::new(aa, Some(bb), Some(ba))
        .unwrap()
        .to_fermionic_op();
    // Both mixed spin pairs draw on the ba block (the ab block is its
    // transpose), each contributing 0.5 × 2.0.
    assert_eq!(op.coefficient("+_1 +_0 -_0 -_1"), Some(1.0));
    assert_eq!(op.coefficient("+_0 +_1 -_1 -_0"), Some(1.0));
}
