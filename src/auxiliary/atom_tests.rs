use approx::assert_abs_diff_eq;
use nalgebra::Point3;

use crate::auxiliary::atom::{Atom, ElementMap, ANGSTROM_TO_BOHR, BOHR_TO_ANGSTROM};

#[test]
fn test_atom_element_lookup() {
    let emap = ElementMap::new();
    let (number, mass) = emap.get("O").unwrap();
    assert_eq!(number, 8);
    assert_abs_diff_eq!(mass, 15.999, epsilon = 1e-2);
    assert!(emap.get("Xx").is_none());
}

#[test]
fn test_atom_from_xyz_line() {
    let emap = ElementMap::new();
    let atom = Atom::from_xyz("B 0.0 0.0 1.45823", &emap, 1e-4).unwrap();
    assert_eq!(atom.atomic_number, 5);
    assert_eq!(atom.atomic_symbol, "B");
    assert_abs_diff_eq!(atom.coordinates[2], 1.45823, epsilon = 1e-12);

    assert!(Atom::from_xyz("B 0.0 0.0", &emap, 1e-4).is_err());
    assert!(Atom::from_xyz("B 0.0 0.0 z", &emap, 1e-4).is_err());
    assert!(Atom::from_xyz("Qq 0.0 0.0 0.0", &emap, 1e-4).is_err());
}

#[test]
fn test_atom_comparisons() {
    let emap = ElementMap::new();
    let atom_0 = Atom::from_xyz("B 0.0 0.0 1.45823", &emap, 1e-4).unwrap();
    let atom_1 = Atom::from_xyz("B 0.0 0.0 1.45824", &emap, 1e-4).unwrap();
    let atom_2 = Atom::from_xyz("B 0.0 0.0 1.46923", &emap, 1e-4).unwrap();
    let atom_3 = Atom::new("N", Point3::new(0.0, 0.0, 1.45823), &emap, 1e-4).unwrap();
    assert_eq!(atom_0, atom_1);
    assert_ne!(atom_0, atom_2);
    assert_ne!(atom_0, atom_3);
}

#[test]
fn test_atom_unit_constants() {
    assert_abs_diff_eq!(BOHR_TO_ANGSTROM * ANGSTROM_TO_BOHR, 1.0, epsilon = 1e-15);
    assert_abs_diff_eq!(BOHR_TO_ANGSTROM, 0.52917721092, epsilon = 1e-15);
}
