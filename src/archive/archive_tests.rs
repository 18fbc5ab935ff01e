use std::env;
use std::fs;
use std::path::PathBuf;

use serial_test::serial;

use crate::archive::{read_driver_result, write_driver_result, Hdf5Storable};
use crate::auxiliary::molecule::Molecule;
use crate::drivers::template_outputs::h2_legacy_result;
use crate::result::ElectronicStructureDriverResult;

fn scratch_file(name: &str) -> PathBuf {
    env::temp_dir().join(name)
}

fn converted_result() -> ElectronicStructureDriverResult {
    ElectronicStructureDriverResult::from_legacy_driver_result(&h2_legacy_result()).unwrap()
}

#[test]
#[serial]
fn test_archive_driver_result_roundtrip() {
    let _ = env_logger::builder().is_test(true).try_init();
    let path = scratch_file("qprop_archive_roundtrip.h5");
    let result = converted_result();

    write_driver_result(&path, &result).unwrap();
    let restored = read_driver_result(&path).unwrap();

    assert_eq!(restored.properties(), result.properties());
    assert_eq!(restored.molecule().unwrap(), result.molecule().unwrap());

    fs::remove_file(&path).unwrap();
}

#[test]
#[serial]
fn test_archive_molecule_roundtrip() {
    let path = scratch_file("qprop_archive_molecule.h5");
    let molecule = converted_result().molecule().unwrap().clone();

    let file = hdf5::File::create(&path).unwrap();
    molecule.to_hdf5(&file).unwrap();
    drop(file);

    let file = hdf5::File::open(&path).unwrap();
    let group = file.group("Molecule").unwrap();
    let restored = Molecule::from_hdf5(&group).unwrap();
    assert_eq!(restored, molecule);
    drop(file);

    fs::remove_file(&path).unwrap();
}

#[test]
#[serial]
fn test_archive_missing_molecule_restores_without_one() {
    let path = scratch_file("qprop_archive_no_molecule.h5");
    let mut result = converted_result();
    // Strip the molecule by rebuilding from the property set alone.
    result = {
        let mut bare = ElectronicStructureDriverResult::new();
        for property in result.properties().iter() {
            bare.add_property(property.clone());
        }
        bare
    };

    write_driver_result(&path, &result).unwrap();
    let restored = read_driver_result(&path).unwrap();
    assert!(restored.molecule().is_err());
    assert_eq!(restored.properties().len(), 7);

    fs::remove_file(&path).unwrap();
}

#[test]
#[serial]
fn test_archive_rejects_unknown_property_class() {
    let path = scratch_file("qprop_archive_bogus.h5");
    let result = converted_result();
    write_driver_result(&path, &result).unwrap();

    {
        let file = hdf5::File::open_rw(&path).unwrap();
        let group = file
            .group(ElectronicStructureDriverResult::name())
            .unwrap();
        let bogus = group.create_group("Bogus").unwrap();
        crate::archive::write_class(&bogus, "Bogus").unwrap();
    }

    assert!(read_driver_result(&path).is_err());
    fs::remove_file(&path).unwrap();
}
