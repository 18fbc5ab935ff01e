//! Legacy monolithic driver results being phased out in favor of typed
//! properties.

use std::fmt;

use derive_builder::Builder;
use ndarray::{Array1, Array2, Array4};
use serde::{Deserialize, Serialize};


#[cfg(test)]
pub(crate) mod template_outputs;

/// The native single-point output surface of a legacy electronic-structure
/// driver: one monolithic container holding geometry, electron counts,
/// molecular-orbital data and provenance.
///
/// Coordinates are in Bohr, as the legacy drivers report them; integrals are
/// in the molecular-orbital basis with beta-channel arrays optional
/// (spin-restricted results omit them).
#[derive(Clone, Debug, Builder, PartialEq, Serialize, Deserialize)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ElectronicDriverOutput {
    /// The element symbols of the atoms.
    atom_symbols: Vec<String>,

    /// An $`n_{\mathrm{atoms}} \times 3`$ array of Cartesian coordinates in
    /// Bohr.
    atom_coords_bohr: Array2<f64>,

    /// The net molecular charge.
    molecular_charge: i32,

    /// The spin multiplicity $`2S + 1`$.
    multiplicity: u32,

    /// The number of alpha-spin electrons.
    num_alpha: usize,

    /// The number of beta-spin electrons.
    num_beta: usize,

    /// Molecular-orbital coefficients for the alpha-spin channel.
    mo_coeff: Array2<f64>,

    /// Molecular-orbital coefficients for the beta-spin channel, if distinct.
    #[builder(default)]
    mo_coeff_b: Option<Array2<f64>>,

    /// One-electron integrals in the molecular-orbital basis.
    mo_onee_ints: Array2<f64>,

    /// Beta-spin one-electron integrals, if distinct.
    #[builder(default)]
    mo_onee_ints_b: Option<Array2<f64>>,

    /// Two-electron repulsion integrals in the molecular-orbital basis,
    /// chemists' notation.
    mo_eri_ints: Array4<f64>,

    /// Beta-beta two-electron integrals, if distinct.
    #[builder(default)]
    mo_eri_ints_bb: Option<Array4<f64>>,

    /// Beta-alpha two-electron integrals, if distinct.
    #[builder(default)]
    mo_eri_ints_ba: Option<Array4<f64>>,

    /// The converged self-consistent-field energy, if reported.
    #[builder(default)]
    hf_energy: Option<f64>,

    /// The nuclear repulsion energy, if reported.
    #[builder(default)]
    nuclear_repulsion_energy: Option<f64>,

    /// Alpha-spin orbital energies, if reported.
    #[builder(default)]
    orbital_energies: Option<Array1<f64>>,

    /// Beta-spin orbital energies, if reported.
    #[builder(default)]
    orbital_energies_b: Option<Array1<f64>>,

    /// Dipole integrals along x in the molecular-orbital basis, if reported.
    #[builder(default)]
    x_dip_mo_ints: Option<Array2<f64>>,

    /// Dipole integrals along y in the molecular-orbital basis, if reported.
    #[builder(default)]
    y_dip_mo_ints: Option<Array2<f64>>,

    /// Dipole integrals along z in the molecular-orbital basis, if reported.
    #[builder(default)]
    z_dip_mo_ints: Option<Array2<f64>>,

    /// The nuclear contribution to the dipole moment, if reported.
    #[builder(default)]
    nuclear_dipole_moment: Option<[f64; 3]>,

    /// Whether the driver reports dipole integrals with a reversed sign
    /// convention.
    #[builder(default)]
    reverse_dipole_sign: bool,

    /// The name of the originating driver.
    origin_driver_name: String,

    /// The version of the originating driver.
    origin_driver_version: String,

    /// The configuration string the driver ran with.
    origin_driver_config: String,
}

impl ElectronicDriverOutputBuilder {
    fn validate(&self) -> Result<(), String> {
        let symbols = self
            .atom_symbols
            .as_ref()
            .ok_or("No atom symbols found.".to_string())?;
        let coords = self
            .atom_coords_bohr
            .as_ref()
            .ok_or("No atom coordinates found.".to_string())?;
        if coords.dim() != (symbols.len(), 3) {
            return Err(format!(
                "Expected a {}×3 coordinate array, got {}×{}.",
                symbols.len(),
                coords.nrows(),
                coords.ncols()
            ));
        }

        let multiplicity = self
            .multiplicity
            .ok_or("No multiplicity found.".to_string())?;
        if multiplicity == 0 {
            return Err("The spin multiplicity must be at least 1.".to_string());
        }

        let onee = self
            .mo_onee_ints
            .as_ref()
            .ok_or("No one-electron integrals found.".to_string())?;
        let n_mo = onee.nrows();
        if onee.ncols() != n_mo {
            return Err(format!(
                "Expected square one-electron integrals, got {}×{}.",
                onee.nrows(),
                onee.ncols()
            ));
        }

        let mo_coeff = self
            .mo_coeff
            .as_ref()
            .ok_or("No molecular-orbital coefficients found.".to_string())?;
        if mo_coeff.ncols() != n_mo {
            return Err(format!(
                "Expected {} molecular orbitals in the coefficient matrix, got {}.",
                n_mo,
                mo_coeff.ncols()
            ));
        }

        let eri = self
            .mo_eri_ints
            .as_ref()
            .ok_or("No two-electron integrals found.".to_string())?;
        if eri.dim() != (n_mo, n_mo, n_mo, n_mo) {
            return Err(format!(
                "Expected {0}×{0}×{0}×{0} two-electron integrals, got {1:?}.",
                n_mo,
                eri.dim()
            ));
        }

        let num_alpha = self.num_alpha.ok_or("No alpha count found.".to_string())?;
        let num_beta = self.num_beta.ok_or("No beta count found.".to_string())?;
        if num_alpha > n_mo || num_beta > n_mo {
            return Err(format!(
                "Electron counts {num_alpha}α/{num_beta}β exceed {n_mo} molecular orbitals."
            ));
        }
        Ok(())
    }
}

impl ElectronicDriverOutput {
    /// Returns a builder to construct a new [`ElectronicDriverOutput`].
    pub fn builder() -> ElectronicDriverOutputBuilder {
        ElectronicDriverOutputBuilder::default()
    }

    /// The element symbols of the atoms.
    pub fn atom_symbols(&self) -> &[String] {
        &self.atom_symbols
    }

    /// The atom coordinates in Bohr.
    pub fn atom_coords_bohr(&self) -> &Array2<f64> {
        &self.atom_coords_bohr
    }

    /// The net molecular charge.
    pub fn molecular_charge(&self) -> i32 {
        self.molecular_charge
    }

    /// The spin multiplicity.
    pub fn multiplicity(&self) -> u32 {
        self.multiplicity
    }

    /// The number of alpha-spin electrons.
    pub fn num_alpha(&self) -> usize {
        self.num_alpha
    }

    /// The number of beta-spin electrons.
    pub fn num_beta(&self) -> usize {
        self.num_beta
    }

    /// The number of molecular orbitals.
    pub fn num_molecular_orbitals(&self) -> usize {
        self.mo_onee_ints.nrows()
    }

    /// Molecular-orbital coefficients for the alpha-spin channel.
    pub fn mo_coeff(&self) -> &Array2<f64> {
        &self.mo_coeff
    }

    /// Molecular-orbital coefficients for the beta-spin channel, if distinct.
    pub fn mo_coeff_b(&self) -> Option<&Array2<f64>> {
        self.mo_coeff_b.as_ref()
    }

    /// One-electron integrals in the molecular-orbital basis.
    pub fn mo_onee_ints(&self) -> &Array2<f64> {
        &self.mo_onee_ints
    }

    /// Beta-spin one-electron integrals, if distinct.
    pub fn mo_onee_ints_b(&self) -> Option<&Array2<f64>> {
        self.mo_onee_ints_b.as_ref()
    }

    /// Two-electron repulsion integrals in the molecular-orbital basis.
    pub fn mo_eri_ints(&self) -> &Array4<f64> {
        &self.mo_eri_ints
    }

    /// Beta-beta two-electron integrals, if distinct.
    pub fn mo_eri_ints_bb(&self) -> Option<&Array4<f64>> {
        self.mo_eri_ints_bb.as_ref()
    }

    /// Beta-alpha two-electron integrals, if distinct.
    pub fn mo_eri_ints_ba(&self) -> Option<&Array4<f64>> {
        self.mo_eri_ints_ba.as_ref()
    }

    /// The converged self-consistent-field energy, if reported.
    pub fn hf_energy(&self) -> Option<f64> {
        self.hf_energy
    }

    /// The nuclear repulsion energy, if reported.
    pub fn nuclear_repulsion_energy(&self) -> Option<f64> {
        self.nuclear_repulsion_energy
    }

    /// Alpha-spin orbital energies, if reported.
    pub fn orbital_energies(&self) -> Option<&Array1<f64>> {
        self.orbital_energies.as_ref()
    }

    /// Beta-spin orbital energies, if reported.
    pub fn orbital_energies_b(&self) -> Option<&Array1<f64>> {
        self.orbital_energies_b.as_ref()
    }

    /// Dipole integrals along x, if reported.
    pub fn x_dip_mo_ints(&self) -> Option<&Array2<f64>> {
        self.x_dip_mo_ints.as_ref()
    }

    /// Dipole integrals along y, if reported.
    pub fn y_dip_mo_ints(&self) -> Option<&Array2<f64>> {
        self.y_dip_mo_ints.as_ref()
    }

    /// Dipole integrals along z, if reported.
    pub fn z_dip_mo_ints(&self) -> Option<&Array2<f64>> {
        self.z_dip_mo_ints.as_ref()
    }

    /// The nuclear contribution to the dipole moment, if reported.
    pub fn nuclear_dipole_moment(&self) -> Option<[f64; 3]> {
        self.nuclear_dipole_moment
    }

    /// Whether the driver reports dipole integrals with a reversed sign
    /// convention.
    pub fn reverse_dipole_sign(&self) -> bool {
        self.reverse_dipole_sign
    }

    /// The name of the originating driver.
    pub fn origin_driver_name(&self) -> &str {
        &self.origin_driver_name
    }

    /// The version of the originating driver.
    pub fn origin_driver_version(&self) -> &str {
        &self.origin_driver_version
    }

    /// The configuration string the driver ran with.
    pub fn origin_driver_config(&self) -> &str {
        &self.origin_driver_config
    }
}

/// The native output surface of a legacy vibrational-structure driver. This
/// variant cannot be converted into electronic properties; it is carried so
/// conversions can reject it with a typed error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VibrationalDriverOutput {
    /// The number of vibrational modes.
    pub num_modes: usize,

    /// Anharmonic force constants, each a set of mode indices with a
    /// coefficient.
    pub force_constants: Vec<(Vec<u32>, f64)>,
}

impl VibrationalDriverOutput {
    /// Constructs a vibrational driver output.
    pub fn new(num_modes: usize, force_constants: Vec<(Vec<u32>, f64)>) -> Self {
        VibrationalDriverOutput {
            num_modes,
            force_constants,
        }
    }
}

/// A tagged union over the legacy driver-result variants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LegacyDriverResult {
    /// An electronic-structure single-point result.
    Electronic(ElectronicDriverOutput),

    /// A vibrational-structure result.
    Vibrational(VibrationalDriverOutput),
}

impl LegacyDriverResult {
    /// The name of the variant, used in diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            LegacyDriverResult::Electronic(_) => "Electronic",
            LegacyDriverResult::Vibrational(_) => "Vibrational",
        }
    }
}

impl fmt::Display for LegacyDriverResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegacyDriverResult::Electronic(output) => write!(
                f,
                "Legacy electronic driver result ({} atoms, {} molecular orbitals, from {} {})",
                output.atom_symbols().len(),
                output.num_molecular_orbitals(),
                output.origin_driver_name(),
                output.origin_driver_version(),
            ),
            LegacyDriverResult::Vibrational(output) => write!(
                f,
                "Legacy vibrational driver result ({} modes)",
                output.num_modes
            ),
        }
    }
}
