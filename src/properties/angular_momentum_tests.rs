use crate::drivers::template_outputs::h2_output;
use crate::operators::testutils::{dense_matrix, mats_close};
use crate::properties::angular_momentum::AngularMomentum;
use crate::properties::magnetization::Magnetization;

#[test]
fn test_angular_momentum_from_legacy() {
    let property = AngularMomentum::from_legacy_driver_output(&h2_output()).unwrap();
    assert_eq!(property.num_spin_orbitals(), 4);
}

#[test]
fn test_angular_momentum_odd_register_rejected() {
    assert!(AngularMomentum::new(5).is_err());
}

#[test]
fn test_angular_momentum_s_squared_single_orbital() {
    // One spatial orbital: the vacuum and the doubly occupied ket are
    // singlets, the two singly occupied kets are spin-1/2 doublets.
    let property = AngularMomentum::new(2).unwrap();
    let ops = property.second_q_ops();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].0, "AngularMomentum");
    let mat = dense_matrix(&ops[0].1);
    for ket in 0..4usize {
        for bra in 0..4usize {
            let expected = match (bra, ket) {
                (1, 1) | (2, 2) => 0.75,
                _ => 0.0,
            };
            assert!(
                (mat[(bra, ket)] - expected).abs() < 1e-12,
                "S² element ({bra}, {ket}) deviates"
            );
        }
    }
}

#[test]
fn test_angular_momentum_commutes_with_magnetization() {
    let s_squared = &AngularMomentum::new(4).unwrap().second_q_ops()[0].1;
    let s_z = &Magnetization::new(4).unwrap().second_q_ops()[0].1;
    let lhs = dense_matrix(s_squared).dot(&dense_matrix(s_z));
    let rhs = dense_matrix(s_z).dot(&dense_matrix(s_squared));
    assert!(mats_close(&lhs, &rhs, 1e-10));
}
