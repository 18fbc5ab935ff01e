use approx::assert_abs_diff_eq;
use ndarray::array;

use crate::drivers::template_outputs::h2_output;
use crate::properties::dipole_moment::{DipoleAxis, ElectronicDipoleMoment};
use crate::properties::integrals::OneBodyIntegrals;

#[test]
fn test_dipole_moment_from_legacy() {
    let property = ElectronicDipoleMoment::from_legacy_driver_output(&h2_output()).unwrap();
    assert!(property.dipole_integrals(DipoleAxis::X).is_none());
    assert!(property.dipole_integrals(DipoleAxis::Y).is_none());
    let z = property.dipole_integrals(DipoleAxis::Z).unwrap();
    assert_abs_diff_eq!(z.alpha()[(0, 1)], 0.9278, epsilon = 1e-12);
    assert!(!property.reverse_dipole_sign());
    let nuclear = property.nuclear_dipole_moment().unwrap();
    assert_abs_diff_eq!(nuclear[2], 1.3889, epsilon = 1e-12);
}

#[test]
fn test_dipole_moment_ops_follow_axis_order() {
    let ints = |scale: f64| {
        OneBodyIntegrals::new(array![[scale, 0.0], [0.0, scale]], None).unwrap()
    };
    let property = ElectronicDipoleMoment::new(Some(ints(1.0)), None, Some(ints(3.0)));
    let ops = property.second_q_ops();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].0, "DipoleMomentX");
    assert_eq!(ops[1].0, "DipoleMomentZ");
    assert_eq!(ops[0].1.coefficient("+_0 -_0"), Some(1.0));
    assert_eq!(ops[1].1.coefficient("+_0 -_0"), Some(3.0));
}

#[test]
fn test_dipole_moment_op_from_legacy_register() {
    let property = ElectronicDipoleMoment::from_legacy_driver_output(&h2_output()).unwrap();
    let ops = property.second_q_ops();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].0, "DipoleMomentZ");
    assert_eq!(ops[0].1.register_length(), 4);
}
