//! Template legacy driver outputs for use in tests.

use ndarray::{array, Array4};

use crate::drivers::{
    ElectronicDriverOutput, LegacyDriverResult, VibrationalDriverOutput,
};

/// A restricted H₂/STO-3G-like single-point output with two molecular
/// orbitals, dipole integrals along z and full provenance.
pub(crate) fn h2_output() -> ElectronicDriverOutput {
    let mut eri = Array4::<f64>::zeros((2, 2, 2, 2));
    eri[(0, 0, 0, 0)] = 0.6746;
    eri[(1, 1, 1, 1)] = 0.6975;
    eri[(0, 0, 1, 1)] = 0.6636;
    eri[(1, 1, 0, 0)] = 0.6636;
    eri[(0, 1, 0, 1)] = 0.1813;
    eri[(1, 0, 1, 0)] = 0.1813;
    eri[(0, 1, 1, 0)] = 0.1813;
    eri[(1, 0, 0, 1)] = 0.1813;

    ElectronicDriverOutput::builder()
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
        .orbital_energies(Some(array![-0.5806, 0.6763]))
        .z_dip_mo_ints(Some(array![[0.6944, 0.9278], [0.9278, 0.6944]]))
        .nuclear_dipole_moment(Some([0.0, 0.0, 1.3889]))
        .origin_driver_name("PYSCF".to_string())
        .origin_driver_version("2.1".to_string())
        .origin_driver_config("atom=H 0 0 0; H 0 0 0.735; basis=sto3g".to_string())
        .build()
        .expect("The template driver output should be valid.")
}

/// The template output wrapped in the legacy tagged union.
pub(crate) fn h2_legacy_result() -> LegacyDriverResult {
    LegacyDriverResult::Electronic(h2_output())
}

/// A vibrational-structure output, used to exercise conversion rejection.
pub(crate) fn watson_legacy_result() -> LegacyDriverResult {
    LegacyDriverResult::Vibrational(VibrationalDriverOutput::new(
        3,
        vec![(vec![0, 0], 1.21), (vec![1, 1], 0.88), (vec![0, 1, 1], -0.04)],
    ))
}
