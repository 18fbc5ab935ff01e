use crate::drivers::template_outputs::h2_output;
use crate::operators::testutils::dense_matrix;
use crate::properties::magnetization::Magnetization;

#[test]
fn test_magnetization_from_legacy() {
    let property = Magnetization::from_legacy_driver_output(&h2_output()).unwrap();
    assert_eq!(property.num_spin_orbitals(), 4);
}

#[test]
fn test_magnetization_odd_register_rejected() {
    assert!(Magnetization::new(1).is_err());
}

#[test]
fn test_magnetization_s_z_diagonal() {
    let property = Magnetization::new(4).unwrap();
    let ops = property.second_q_ops();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].0, "Magnetization");
    let mat = dense_matrix(&ops[0].1);
    // Bits 0..2 are alpha orbitals, bits 2..4 beta orbitals.
    for ket in 0..16usize {
        let n_alpha = (ket & 0b0011).count_ones();
        let n_beta = (ket & 0b1100).count_ones();
        let expected = 0.5 * (f64::from(n_alpha) - f64::from(n_beta));
        assert!((mat[(ket, ket)] - expected).abs() < 1e-14);
    }
}
