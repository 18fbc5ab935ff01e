use ndarray::array;

use crate::drivers::template_outputs::h2_output;
use crate::operators::testutils::dense_matrix;
use crate::properties::particle_number::ParticleNumber;

#[test]
fn test_particle_number_from_legacy() {
    let property = ParticleNumber::from_legacy_driver_output(&h2_output()).unwrap();
    assert_eq!(property.num_spin_orbitals(), 4);
    assert_eq!(property.num_alpha(), 1);
    assert_eq!(property.num_beta(), 1);
    assert_eq!(property.num_particles(), 2);
    assert!(property.occupation().is_none());
}

#[test]
fn test_particle_number_odd_register_rejected() {
    assert!(ParticleNumber::new(3, 1, 1).is_err());
}

#[test]
fn test_particle_number_occupations() {
    let property = ParticleNumber::new(4, 1, 1)
        .unwrap()
        .with_occupations(array![1.0, 0.0], Some(array![1.0, 0.0]));
    assert_eq!(property.occupation().unwrap().len(), 2);
    assert_eq!(property.occupation_b().unwrap().len(), 2);
}

#[test]
fn test_particle_number_operator_counts_electrons() {
    let property = ParticleNumber::new(2, 1, 0).unwrap();
    let ops = property.second_q_ops();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].0, "ParticleNumber");
    let mat = dense_matrix(&ops[0].1);
    // Diagonal action is the electron count of each occupation-basis ket.
    for ket in 0..4usize {
        assert!((mat[(ket, ket)] - f64::from(ket.count_ones())).abs() < 1e-14);
    }
}
