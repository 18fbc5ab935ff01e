use std::env;
use std::fs;

use ndarray::{array, Array4};

use qprop::drivers::{ElectronicDriverOutput, LegacyDriverResult};
use qprop::io::{read_qprop_binary, write_qprop_binary, QPropFileType};
use qprop::properties::{OperatorShape, PropertyKind};
use qprop::result::ElectronicStructureDriverResult;

fn h2_legacy_result() -> LegacyDriverResult {
    let mut eri = Array4::<f64>::zeros((2, 2, 2, 2));
    eri[(0, 0, 0, 0)] = 0.6746;
    eri[(1, 1, 1, 1)] = 0.6975;
    eri[(0, 0, 1, 1)] = 0.6636;
    eri[(1, 1, 0, 0)] = 0.6636;
    eri[(0, 1, 0, 1)] = 0.1813;
    eri[(1, 0, 1, 0)] = 0.1813;
    eri[(0, 1, 1, 0)] = 0.1813;
    eri[(1, 0, 0, 1)] = 0.1813;

    let output = ElectronicDriverOutput::builder()
        .atom_symbols(vec!["H".to_string(), "H".to_string()])
        .atom_coords_bohr(array![[0.0, 0.0, 0.0], [0.0, 0.0, 1.3889]])
        .molecular_charge(0)
        .multiplicity(1)
        .num_alpha(1)
        .num_beta(1)
        .mo_coeff(array![[0.5483, 1.2183], [0.5483, -1.2183]])
        .mo_onee_ints(array![[-1.2528, 0.0], [0.0, -0.4756]])
        .mo_eri_ints(eri)
        .hf_energy(Some(-1.1173))
        .nuclear_repulsion_energy(Some(0.7199))
        .z_dip_mo_ints(Some(array![[0.6944, 0.9278], [0.9278, 0.6944]]))
        .origin_driver_name("PYSCF".to_string())
        .origin_driver_version("2.1".to_string())
        .origin_driver_config("atom=H 0 0 0; H 0 0 0.735; basis=sto3g".to_string())
        .build()
        .expect("The integration fixture should build.");
    LegacyDriverResult::Electronic(output)
}

#[test]
fn test_legacy_conversion_and_operator_collection() {
    let result =
        ElectronicStructureDriverResult::from_legacy_driver_result(&h2_legacy_result()).unwrap();

    assert_eq!(result.properties().len(), 7);
    for kind in PropertyKind::OPERATOR_KINDS {
        assert!(result.properties().get_kind(kind).is_some());
    }
    let molecule = result.molecule().unwrap();
    assert_eq!(molecule.n_atoms(), 2);
    assert!((molecule.atoms[1].coordinates[2] - 1.3889 * 0.52917721092).abs() < 1e-10);

    let listed = result.second_q_ops(OperatorShape::List);
    assert_eq!(
        listed.names(),
        vec![
            "ElectronicEnergy",
            "ParticleNumber",
            "AngularMomentum",
            "Magnetization",
            "DipoleMomentZ",
        ]
    );

    let mapped = result.second_q_ops(OperatorShape::Dict);
    assert_eq!(mapped.len(), 5);
    assert_eq!(mapped.get("ParticleNumber").unwrap().n_terms(), 4);
}

#[test]
fn test_snapshot_roundtrip() {
    let result =
        ElectronicStructureDriverResult::from_legacy_driver_result(&h2_legacy_result()).unwrap();
    let stem = env::temp_dir().join("qprop_integration_snapshot");
    write_qprop_binary(&stem, QPropFileType::Res, &result).unwrap();

    let restored: ElectronicStructureDriverResult =
        read_qprop_binary(&stem, QPropFileType::Res).unwrap();
    assert_eq!(restored.properties(), result.properties());
    assert_eq!(restored.molecule().unwrap(), result.molecule().unwrap());

    fs::remove_file(stem.with_extension(QPropFileType::Res.ext())).unwrap();
}

#[cfg(feature = "hdf5")]
#[test]
fn test_archive_roundtrip() {
    let result =
        ElectronicStructureDriverResult::from_legacy_driver_result(&h2_legacy_result()).unwrap();
    let path = env::temp_dir().join("qprop_integration_archive.h5");
    qprop::archive::write_driver_result(&path, &result).unwrap();

    let restored = qprop::archive::read_driver_result(&path).unwrap();
    assert_eq!(restored.properties(), result.properties());
    assert_eq!(restored.molecule().unwrap(), result.molecule().unwrap());

    fs::remove_file(&path).unwrap();
}
