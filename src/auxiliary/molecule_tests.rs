use approx::assert_abs_diff_eq;
use ndarray::array;

use crate::auxiliary::atom::{Atom, ElementMap};
use crate::auxiliary::molecule::Molecule;

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

#[test]
fn test_molecule_from_arrays() {
    let symbols = vec!["O".to_string(), "H".to_string(), "H".to_string()];
    let coords = array![
        [0.0, 0.0, 0.1173],
        [0.0, 0.7572, -0.4692],
        [0.0, -0.7572, -0.4692],
    ];
    let mol = Molecule::from_arrays(&symbols, &coords, 0, 1, 1e-7).unwrap();
    assert_eq!(mol.n_atoms(), 3);
    assert_eq!(mol.charge, 0);
    assert_eq!(mol.multiplicity, 1);
    assert_eq!(mol.atoms[1].atomic_number, 1);
    assert_abs_diff_eq!(mol.coordinates()[(2, 1)], -0.7572, epsilon = 1e-12);

    let bad_coords = array![[0.0, 0.0, 0.1173]];
    assert!(Molecule::from_arrays(&symbols, &bad_coords, 0, 1, 1e-7).is_err());
}

#[test]
fn test_molecule_zero_multiplicity_rejected() {
    let emap = ElementMap::new();
    let atoms = vec![Atom::from_xyz("H 0.0 0.0 0.0", &emap, 1e-7).unwrap()];
    assert!(Molecule::new(atoms, 0, 0, 1e-7).is_err());
}

#[test]
fn test_molecule_from_xyz() {
    let path: String = format!("{}{}", ROOT, "/tests/h2o.xyz");
    let mol = Molecule::from_xyz(&path, 1e-7).unwrap();
    assert_eq!(mol.n_atoms(), 3);
    assert_eq!(mol.atoms[0].atomic_symbol, "O");
    assert_eq!(mol.charge, 0);
    assert_eq!(mol.multiplicity, 1);
}

#[test]
fn test_molecule_comparisons() {
    let symbols = vec!["H".to_string(), "H".to_string()];
    let coords = array![[0.0, 0.0, 0.0], [0.0, 0.0, 0.735]];
    let mol_0 = Molecule::from_arrays(&symbols, &coords, 0, 1, 1e-7).unwrap();
    let mol_1 = Molecule::from_arrays(&symbols, &coords, 0, 1, 1e-7).unwrap();
    let mol_2 = Molecule::from_arrays(&symbols, &coords, 0, 3, 1e-7).unwrap();
    assert_eq!(mol_0, mol_1);
    assert_ne!(mol_0, mol_2);
}
