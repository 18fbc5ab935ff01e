//! Molecular geometries with charge and spin multiplicity.

use std::fmt;
use std::fs;

use anyhow::{self, bail, format_err};
use nalgebra::Point3;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::auxiliary::atom::{Atom, ElementMap};

#[cfg(test)]
#[path = "molecule_tests.rs"]
mod molecule_tests;

/// A struct containing the atoms constituting a molecule together with its net
/// charge and spin multiplicity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Molecule {
    /// The atoms constituting this molecule, with coordinates in Ångström.
    pub atoms: Vec<Atom>,

    /// The net molecular charge.
    pub charge: i32,

    /// The spin multiplicity $`2S + 1`$.
    pub multiplicity: u32,

    /// A threshold for approximate equality comparisons.
    pub threshold: f64,
}

impl Molecule {
    /// Constructs a molecule from a list of atoms.
    ///
    /// # Arguments
    ///
    /// * `atoms` - The atoms constituting the molecule.
    /// * `charge` - The net molecular charge.
    /// * `multiplicity` - The spin multiplicity.
    /// * `thresh` - A threshold for approximate equality comparisons.
    ///
    /// # Returns
    ///
    /// The constructed [`Molecule`], or an error if `multiplicity` is zero.
    pub fn new(
        atoms: Vec<Atom>,
        charge: i32,
        multiplicity: u32,
        thresh: f64,
    ) -> Result<Molecule, anyhow::Error> {
        if multiplicity == 0 {
            bail!("The spin multiplicity must be at least 1.");
        }
        Ok(Molecule {
            atoms,
            charge,
            multiplicity,
            threshold: thresh,
        })
    }

    /// Constructs a molecule from parallel arrays of element symbols and
    /// Cartesian coordinates.
    ///
    /// # Arguments
    ///
    /// * `symbols` - The element symbols of the atoms.
    /// * `coordinates` - An $`n_{\mathrm{atoms}} \times 3`$ array of Cartesian
    ///     coordinates in Ångström.
    /// * `charge` - The net molecular charge.
    /// * `multiplicity` - The spin multiplicity.
    /// * `thresh` - A threshold for approximate equality comparisons.
    ///
    /// # Returns
    ///
    /// The constructed [`Molecule`], or an error if the arrays are inconsistent.
    pub fn from_arrays(
        symbols: &[String],
        coordinates: &Array2<f64>,
        charge: i32,
        multiplicity: u32,
        thresh: f64,
    ) -> Result<Molecule, anyhow::Error> {
        if coordinates.nrows() != symbols.len() || coordinates.ncols() != 3 {
            bail!(
                "Expected a {}×3 coordinate array, got {}×{}.",
                symbols.len(),
                coordinates.nrows(),
                coordinates.ncols()
            );
        }
        let emap = ElementMap::new();
        let atoms = symbols
            .iter()
            .zip(coordinates.rows())
            .map(|(symbol, xyz)| {
                Atom::new(symbol, Point3::new(xyz[0], xyz[1], xyz[2]), &emap, thresh)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Molecule::new(atoms, charge, multiplicity, thresh)
    }

    /// Parses an `xyz` file to construct a neutral singlet molecule.
    ///
    /// # Arguments
    ///
    /// * `filename` - The `xyz` file to be parsed, with coordinates in
    ///     Ångström.
    /// * `thresh` - A threshold for approximate equality comparisons.
    ///
    /// # Returns
    ///
    /// The parsed [`Molecule`] struct.
    pub fn from_xyz(filename: &str, thresh: f64) -> Result<Molecule, anyhow::Error> {
        let contents = fs::read_to_string(filename)
            .map_err(|err| format_err!("Unable to read file {filename}: {err}"))?;

        let mut atoms: Vec<Atom> = vec![];
        let emap = ElementMap::new();
        let mut n_atoms = 0usize;
        for (i, line) in contents.lines().enumerate() {
            if i == 0 {
                n_atoms = line
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| format_err!("Malformed `xyz` atom count line: `{line}`."))?;
            } else if i == 1 {
                continue;
            } else if line.trim().is_empty() {
                break;
            } else {
                atoms.push(Atom::from_xyz(line, &emap, thresh)?);
            }
        }
        if atoms.len() != n_atoms {
            bail!("Expected {} atoms, got {} instead.", n_atoms, atoms.len());
        }
        Molecule::new(atoms, 0, 1, thresh)
    }

    /// The number of atoms in this molecule.
    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Returns the coordinates of all atoms as an $`n_{\mathrm{atoms}} \times 3`$
    /// array in Ångström.
    pub fn coordinates(&self) -> Array2<f64> {
        let mut coords = Array2::<f64>::zeros((self.atoms.len(), 3));
        for (i, atom) in self.atoms.iter().enumerate() {
            for j in 0..3 {
                coords[(i, j)] = atom.coordinates[j];
            }
        }
        coords
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Molecule (charge {:+}, multiplicity {}):",
            self.charge, self.multiplicity
        )?;
        for atom in &self.atoms {
            writeln!(f, "  {atom}")?;
        }
        Ok(())
    }
}

impl PartialEq for Molecule {
    fn eq(&self, other: &Self) -> bool {
        self.charge == other.charge
            && self.multiplicity == other.multiplicity
            && self.atoms == other.atoms
    }
}
