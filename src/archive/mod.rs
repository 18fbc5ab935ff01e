//! HDF5 persistence for driver results and their properties.
//!
//! Every storable value writes itself into a named subgroup of a parent
//! group; the subgroup carries a `class` string attribute identifying the
//! type, which drives dispatch on restore.

use anyhow::{self, bail, format_err};
use hdf5::types::VarLenUnicode;
use ndarray::{Array1, Array2, Array4, Ix4};

use crate::auxiliary::molecule::Molecule;
use crate::properties::{ElectronicProperty, ElectronicPropertyGroup};
use crate::result::ElectronicStructureDriverResult;

pub(crate) mod properties;

#[cfg(test)]
#[path = "archive_tests.rs"]
mod archive_tests;

/// The attribute naming the stored type of a subgroup.
const CLASS_ATTR: &str = "class";

/// Trait for values that serialize themselves into an HDF5 group.
pub trait Hdf5Storable: Sized {
    /// Stores this value in a named subgroup of the provided parent group.
    fn to_hdf5(&self, parent: &hdf5::Group) -> Result<(), anyhow::Error>;

    /// Constructs a new value from the data stored in the provided group.
    fn from_hdf5(group: &hdf5::Group) -> Result<Self, anyhow::Error>;
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~
// Attribute/dataset helpers
// ~~~~~~~~~~~~~~~~~~~~~~~~~~

pub(crate) fn write_class(group: &hdf5::Group, class: &str) -> Result<(), anyhow::Error> {
    write_str_attr(group, CLASS_ATTR, class)
}

pub(crate) fn read_class(group: &hdf5::Group) -> Result<String, anyhow::Error> {
    read_str_attr(group, CLASS_ATTR)
}

pub(crate) fn write_str_attr(
    group: &hdf5::Group,
    name: &str,
    value: &str,
) -> Result<(), anyhow::Error> {
    let value: VarLenUnicode = value
        .parse()
        .map_err(|err| format_err!("Unable to encode `{name}` as a string attribute: {err}"))?;
    group
        .new_attr::<VarLenUnicode>()
        .create(name)?
        .write_scalar(&value)?;
    Ok(())
}

pub(crate) fn read_str_attr(group: &hdf5::Group, name: &str) -> Result<String, anyhow::Error> {
    Ok(group
        .attr(name)?
        .read_scalar::<VarLenUnicode>()?
        .as_str()
        .to_string())
}

pub(crate) fn write_int_attr(
    group: &hdf5::Group,
    name: &str,
    value: i64,
) -> Result<(), anyhow::Error> {
    group.new_attr::<i64>().create(name)?.write_scalar(&value)?;
    Ok(())
}

pub(crate) fn read_int_attr(group: &hdf5::Group, name: &str) -> Result<i64, anyhow::Error> {
    Ok(group.attr(name)?.read_scalar::<i64>()?)
}

pub(crate) fn write_float_attr(
    group: &hdf5::Group,
    name: &str,
    value: f64,
) -> Result<(), anyhow::Error> {
    group.new_attr::<f64>().create(name)?.write_scalar(&value)?;
    Ok(())
}

pub(crate) fn read_opt_float_attr(group: &hdf5::Group, name: &str) -> Option<f64> {
    group
        .attr(name)
        .and_then(|attr| attr.read_scalar::<f64>())
        .ok()
}

pub(crate) fn write_array1(
    group: &hdf5::Group,
    name: &str,
    array: &Array1<f64>,
) -> Result<(), anyhow::Error> {
    group.new_dataset_builder().with_data(array).create(name)?;
    Ok(())
}

pub(crate) fn read_opt_array1(group: &hdf5::Group, name: &str) -> Option<Array1<f64>> {
    group
        .dataset(name)
        .and_then(|dataset| dataset.read_1d::<f64>())
        .ok()
}

pub(crate) fn write_array2(
    group: &hdf5::Group,
    name: &str,
    array: &Array2<f64>,
) -> Result<(), anyhow::Error> {
    group.new_dataset_builder().with_data(array).create(name)?;
    Ok(())
}

pub(crate) fn read_array2(group: &hdf5::Group, name: &str) -> Result<Array2<f64>, anyhow::Error> {
    Ok(group.dataset(name)?.read_2d::<f64>()?)
}

pub(crate) fn read_opt_array2(group: &hdf5::Group, name: &str) -> Option<Array2<f64>> {
    group
        .dataset(name)
        .and_then(|dataset| dataset.read_2d::<f64>())
        .ok()
}

pub(crate) fn write_array4(
    group: &hdf5::Group,
    name: &str,
    array: &Array4<f64>,
) -> Result<(), anyhow::Error> {
    group.new_dataset_builder().with_data(array).create(name)?;
    Ok(())
}

pub(crate) fn read_array4(group: &hdf5::Group, name: &str) -> Result<Array4<f64>, anyhow::Error> {
    let dynamic = group.dataset(name)?.read_dyn::<f64>()?;
    dynamic
        .into_dimensionality::<Ix4>()
        .map_err(|err| format_err!("Dataset `{name}` is not four-dimensional: {err}"))
}

pub(crate) fn read_opt_array4(group: &hdf5::Group, name: &str) -> Option<Array4<f64>> {
    group
        .dataset(name)
        .ok()
        .and_then(|dataset| dataset.read_dyn::<f64>().ok())
        .and_then(|dynamic| dynamic.into_dimensionality::<Ix4>().ok())
}

// ~~~~~~~~~
// Molecule
// ~~~~~~~~~

impl Hdf5Storable for Molecule {
    fn to_hdf5(&self, parent: &hdf5::Group) -> Result<(), anyhow::Error> {
        let group = parent.create_group("Molecule")?;
        write_class(&group, "Molecule")?;
        write_int_attr(&group, "charge", i64::from(self.charge))?;
        write_int_attr(&group, "multiplicity", i64::from(self.multiplicity))?;
        write_float_attr(&group, "threshold", self.threshold)?;
        let symbols = self
            .atoms
            .iter()
            .map(|atom| {
                atom.atomic_symbol.parse::<VarLenUnicode>().map_err(|err| {
                    format_err!("Unable to encode symbol `{}`: {err}", atom.atomic_symbol)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        group
            .new_dataset_builder()
            .with_data(&symbols)
            .create("symbols")?;
        write_array2(&group, "geometry", &self.coordinates())?;
        Ok(())
    }

    fn from_hdf5(group: &hdf5::Group) -> Result<Self, anyhow::Error> {
        let charge = i32::try_from(read_int_attr(group, "charge")?)?;
        let multiplicity = u32::try_from(read_int_attr(group, "multiplicity")?)?;
        let threshold = group.attr("threshold")?.read_scalar::<f64>()?;
        let symbols = group
            .dataset("symbols")?
            .read_1d::<VarLenUnicode>()?
            .iter()
            .map(|symbol| symbol.as_str().to_string())
            .collect::<Vec<_>>();
        let geometry = read_array2(group, "geometry")?;
        Molecule::from_arrays(&symbols, &geometry, charge, multiplicity, threshold)
    }
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Property group + driver result
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

impl Hdf5Storable for ElectronicPropertyGroup {
    fn to_hdf5(&self, parent: &hdf5::Group) -> Result<(), anyhow::Error> {
        let group = parent.create_group(self.name())?;
        write_class(&group, "ElectronicPropertyGroup")?;
        for property in self.iter() {
            property.to_hdf5(&group)?;
        }
        Ok(())
    }

    fn from_hdf5(group: &hdf5::Group) -> Result<Self, anyhow::Error> {
        let name = group
            .name()
            .rsplit('/')
            .next()
            .unwrap_or("ElectronicPropertyGroup")
            .to_string();
        let mut ret = ElectronicPropertyGroup::new(&name);
        for subgroup in group.groups()? {
            ret.add(properties::read_property(&subgroup)?);
        }
        Ok(ret)
    }
}

impl Hdf5Storable for ElectronicStructureDriverResult {
    /// Stores the property set and the distinguished molecule in a group
    /// named after this container.
    fn to_hdf5(&self, parent: &hdf5::Group) -> Result<(), anyhow::Error> {
        self.properties().to_hdf5(parent)?;
        let group = parent.group(Self::name())?;
        if let Ok(molecule) = self.molecule() {
            molecule.to_hdf5(&group)?;
        }
        Ok(())
    }

    /// Restores the container by scanning the stored entries: the
    /// molecule-tagged entry is pulled out into the distinguished field and
    /// everything else is routed back into the generic property collection.
    fn from_hdf5(group: &hdf5::Group) -> Result<Self, anyhow::Error> {
        let mut ret = ElectronicStructureDriverResult::new();
        for subgroup in group.groups()? {
            let class = read_class(&subgroup)?;
            if class == "Molecule" {
                ret.set_molecule(Molecule::from_hdf5(&subgroup)?);
            } else {
                ret.add_property(properties::read_property(&subgroup)?);
            }
        }
        Ok(ret)
    }
}

/// Writes a driver result into a fresh HDF5 file.
///
/// # Arguments
///
/// * `path` - The file to create; an existing file is truncated.
/// * `result` - The driver result to store.
pub fn write_driver_result<P: AsRef<std::path::Path>>(
    path: P,
    result: &ElectronicStructureDriverResult,
) -> Result<(), anyhow::Error> {
    let file = hdf5::File::create(path)?;
    result.to_hdf5(&file)?;
    Ok(())
}

/// Reads a driver result back from an HDF5 file written by
/// [`write_driver_result`].
pub fn read_driver_result<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<ElectronicStructureDriverResult, anyhow::Error> {
    let file = hdf5::File::open(path)?;
    let group = file.group(ElectronicStructureDriverResult::name())?;
    let class = read_class(&group)?;
    if class != "ElectronicPropertyGroup" {
        bail!("Unsupported archive root class `{class}`.");
    }
    ElectronicStructureDriverResult::from_hdf5(&group)
}
