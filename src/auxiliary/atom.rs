//! Atoms and element data.

use std::collections::HashMap;
use std::fmt;

use anyhow::{self, format_err};
use nalgebra::Point3;
use num_traits::ToPrimitive;
use periodic_table;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "atom_tests.rs"]
mod atom_tests;

/// The Bohr radius in Ångström. Multiplying a coordinate in Bohr by this
/// constant converts it to Ångström.
pub const BOHR_TO_ANGSTROM: f64 = 0.529_177_210_92;

/// The inverse conversion, Ångström to Bohr.
pub const ANGSTROM_TO_BOHR: f64 = 1.0 / BOHR_TO_ANGSTROM;

/// A struct storing a look-up of element symbols to give atomic numbers
/// and atomic masses.
pub struct ElementMap<'a> {
    /// A [`HashMap`] from a symbol string to a tuple of atomic number and atomic
    /// mass.
    map: HashMap<&'a str, (u32, f64)>,
}

impl Default for ElementMap<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementMap<'static> {
    /// Creates a new [`ElementMap`] for all elements in the periodic table.
    #[must_use]
    pub fn new() -> ElementMap<'static> {
        let mut map = HashMap::new();
        let elements = periodic_table::periodic_table();
        for element in elements {
            let mass = parse_atomic_mass(element.atomic_mass);
            map.insert(element.symbol, (element.atomic_number, mass));
        }
        ElementMap { map }
    }
}

impl<'a> ElementMap<'a> {
    /// Looks up an element symbol, yielding its atomic number and mass.
    pub fn get(&self, symbol: &str) -> Option<(u32, f64)> {
        self.map.get(symbol).copied()
    }
}

/// An auxiliary function that parses the atomic mass string in the format of
/// [`periodic_table`] to a single float value.
///
/// # Arguments
///
/// * `mass_str` - A string of mass value that is either `x.y(z)` where the
///     uncertain digit `z` is enclosed in parentheses, or `[x]` where `x`
///     is the mass number in place of precise experimental values.
///
/// # Returns
///
/// The numeric mass value.
fn parse_atomic_mass(mass_str: &str) -> f64 {
    let mass = mass_str.replace(&['(', ')', '[', ']'][..], "");
    mass.parse::<f64>()
        .unwrap_or_else(|_| panic!("Unable to parse atomic mass string {mass}."))
}

/// A struct representing an atom.
#[derive(Clone, Serialize, Deserialize)]
pub struct Atom {
    /// The atomic number of the atom.
    pub atomic_number: u32,

    /// The atomic symbol of the atom.
    pub atomic_symbol: String,

    /// The weighted-average atomic mass for all naturally occuring isotopes.
    pub atomic_mass: f64,

    /// The position of the atom in Ångström.
    pub coordinates: Point3<f64>,

    /// A threshold for approximate equality comparisons.
    pub threshold: f64,
}

impl Atom {
    /// Creates an atom from its symbol and Cartesian coordinates.
    ///
    /// # Arguments
    ///
    /// * `atomic_symbol` - The element symbol of the atom.
    /// * `coordinates` - The coordinates of the atom in Ångström.
    /// * `emap` - A hash map between atomic symbols and atomic numbers and
    ///     masses.
    /// * `thresh` - A threshold for approximate equality comparisons.
    ///
    /// # Returns
    ///
    /// The required atom, or an error if the symbol is not a known element.
    pub fn new(
        atomic_symbol: &str,
        coordinates: Point3<f64>,
        emap: &ElementMap,
        thresh: f64,
    ) -> Result<Atom, anyhow::Error> {
        let (atomic_number, atomic_mass) = emap
            .get(atomic_symbol)
            .ok_or_else(|| format_err!("Invalid atomic symbol `{atomic_symbol}` encountered."))?;
        Ok(Atom {
            atomic_number,
            atomic_symbol: atomic_symbol.to_string(),
            atomic_mass,
            coordinates,
            threshold: thresh,
        })
    }

    /// Parses an atom line in an `xyz` file to construct an [`Atom`].
    ///
    /// # Arguments
    ///
    /// * `line` - A line in an `xyz` file containing an atomic symbol and
    ///     three Cartesian coordinates.
    /// * `emap` - A hash map between atomic symbols and atomic numbers and
    ///     masses.
    /// * `thresh` - A threshold for approximate equality comparisons.
    ///
    /// # Returns
    ///
    /// The parsed [`Atom`] struct if the line has the correct format,
    /// otherwise an error.
    pub fn from_xyz(line: &str, emap: &ElementMap, thresh: f64) -> Result<Atom, anyhow::Error> {
        let split: Vec<&str> = line.split_whitespace().collect();
        if split.len() != 4 {
            return Err(format_err!("Malformed `xyz` atom line: `{line}`."));
        }
        let atomic_symbol = split[0];
        let coordinates = Point3::new(
            split[1]
                .parse::<f64>()
                .map_err(|_| format_err!("Unable to parse the x coordinate in `{line}`."))?,
            split[2]
                .parse::<f64>()
                .map_err(|_| format_err!("Unable to parse the y coordinate in `{line}`."))?,
            split[3]
                .parse::<f64>()
                .map_err(|_| format_err!("Unable to parse the z coordinate in `{line}`."))?,
        );
        Atom::new(atomic_symbol, coordinates, emap, thresh)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self
            .threshold
            .log10()
            .abs()
            .round()
            .to_usize()
            .ok_or(fmt::Error)?
            + 1;
        let length = (precision + precision.div_euclid(2)).max(6);
        write!(
            f,
            "{:>9} {:>3} {:+length$.precision$} {:+length$.precision$} {:+length$.precision$}",
            "Atom",
            self.atomic_symbol,
            self.coordinates[0],
            self.coordinates[1],
            self.coordinates[2],
        )
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl PartialEq for Atom {
    /// Two atoms are equal when they are the same element and their masses and
    /// coordinates agree to within the larger of the two thresholds.
    fn eq(&self, other: &Self) -> bool {
        let thresh = self.threshold.max(other.threshold);
        self.atomic_number == other.atomic_number
            && approx::abs_diff_eq!(self.atomic_mass, other.atomic_mass, epsilon = thresh)
            && approx::abs_diff_eq!(
                self.coordinates[0],
                other.coordinates[0],
                epsilon = thresh
            )
            && approx::abs_diff_eq!(
                self.coordinates[1],
                other.coordinates[1],
                epsilon = thresh
            )
            && approx::abs_diff_eq!(
                self.coordinates[2],
                other.coordinates[2],
                epsilon = thresh
            )
    }
}
