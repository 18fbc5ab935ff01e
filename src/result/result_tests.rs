use approx::assert_abs_diff_eq;

use crate::auxiliary::atom::BOHR_TO_ANGSTROM;
use crate::drivers::template_outputs::{h2_legacy_result, h2_output, watson_legacy_result};
use crate::error::QPropError;
use crate::properties::{OperatorCollection, OperatorShape, PropertyKind};
use crate::result::ElectronicStructureDriverResult;

#[test]
fn test_result_molecule_missing_by_default() {
    let result = ElectronicStructureDriverResult::new();
    assert!(result.properties().is_empty());
    assert_eq!(result.molecule().unwrap_err(), QPropError::MissingMolecule);
}

#[test]
fn test_result_from_legacy_property_census() {
    let result =
        ElectronicStructureDriverResult::from_legacy_driver_result(&h2_legacy_result()).unwrap();

    // Five physical properties, one basis transform, one metadata record.
    assert_eq!(result.properties().len(), 7);
    for kind in PropertyKind::OPERATOR_KINDS {
        assert!(result.properties().get_kind(kind).is_some());
    }
    let transform = result.basis_transform().unwrap();
    assert_abs_diff_eq!(transform.coeff_alpha()[(0, 0)], 0.5483, epsilon = 1e-12);
    let metadata = result.driver_metadata().unwrap();
    assert_eq!(metadata.driver_name(), "PYSCF");
    assert_eq!(metadata.driver_version(), "2.1");
}

#[test]
fn test_result_from_legacy_converts_coordinates() {
    let output = h2_output();
    let result =
        ElectronicStructureDriverResult::from_legacy_driver_result(&h2_legacy_result()).unwrap();
    let molecule = result.molecule().unwrap();
    assert_eq!(molecule.n_atoms(), 2);
    assert_eq!(molecule.charge, 0);
    assert_eq!(molecule.multiplicity, 1);
    for (atom, bohr_row) in molecule.atoms.iter().zip(output.atom_coords_bohr().rows()) {
        for axis in 0..3 {
            assert_abs_diff_eq!(
                atom.coordinates[axis],
                bohr_row[axis] * BOHR_TO_ANGSTROM,
                epsilon = 1e-12
            );
        }
    }
}

#[test]
fn test_result_rejects_vibrational_legacy_input() {
    let error =
        ElectronicStructureDriverResult::from_legacy_driver_result(&watson_legacy_result())
            .unwrap_err();
    match error.downcast_ref::<QPropError>() {
        Some(QPropError::InvalidInputType { expected, got }) => {
            assert_eq!(expected, "Electronic");
            assert_eq!(got, "Vibrational");
        }
        _ => panic!("Expected an invalid-input-type error."),
    }
}

#[test]
fn test_result_second_q_ops_list_order() {
    let result =
        ElectronicStructureDriverResult::from_legacy_driver_result(&h2_legacy_result()).unwrap();
    let ops = result.second_q_ops(OperatorShape::List);
    assert_eq!(
        ops.names(),
        vec![
            "ElectronicEnergy",
            "ParticleNumber",
            "AngularMomentum",
            "Magnetization",
            "DipoleMomentZ",
        ]
    );
}

#[test]
fn test_result_second_q_ops_list_skips_missing() {
    let mut result = ElectronicStructureDriverResult::new();
    result.add_property(
        crate::properties::magnetization::Magnetization::new(4).unwrap(),
    );
    let ops = result.second_q_ops(OperatorShape::List);
    assert_eq!(ops.names(), vec!["Magnetization"]);
}

#[test]
fn test_result_second_q_ops_dict_unique_keys() {
    let result =
        ElectronicStructureDriverResult::from_legacy_driver_result(&h2_legacy_result()).unwrap();
    let ops = result.second_q_ops(OperatorShape::Dict);
    let names = ops.names();
    assert_eq!(names.len(), 5);
    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), names.len());
    match ops {
        OperatorCollection::Dict(_) => {}
        OperatorCollection::List(_) => panic!("Expected a dict-shaped collection."),
    }
}

#[test]
fn test_result_operators_share_register_length() {
    let result =
        ElectronicStructureDriverResult::from_legacy_driver_result(&h2_legacy_result()).unwrap();
    let ops = result.second_q_ops(OperatorShape::Dict);
    for name in ops.names() {
        assert_eq!(ops.get(name).unwrap().register_length(), 4, "{name}");
    }
}

#[test]
fn test_result_display_smoke() {
    let result =
        ElectronicStructureDriverResult::from_legacy_driver_result(&h2_legacy_result()).unwrap();
    let rendered = result.to_string();
    assert!(rendered.contains("ElectronicStructureDriverResult"));
    assert!(rendered.contains("Molecule"));
}
