//! HDF5 persistence for the individual property variants.

use anyhow::{self, bail};
use ndarray::Array1;

use crate::archive::{
    read_array2, read_array4, read_class, read_int_attr, read_opt_array1, read_opt_array2,
    read_opt_array4, read_opt_float_attr, read_str_attr, write_array1, write_array2,
    write_array4, write_class, write_float_attr, write_int_attr, write_str_attr, Hdf5Storable,
};
use crate::properties::angular_momentum::AngularMomentum;
use crate::properties::bases::{BasisTransform, ElectronicBasis};
use crate::properties::dipole_moment::{DipoleAxis, ElectronicDipoleMoment};
use crate::properties::driver_metadata::DriverMetadata;
use crate::properties::electronic_energy::ElectronicEnergy;
use crate::properties::integrals::{OneBodyIntegrals, TwoBodyIntegrals};
use crate::properties::magnetization::Magnetization;
use crate::properties::particle_number::ParticleNumber;
use crate::properties::ElectronicProperty;

/// Restores a property subgroup by dispatching on its `class` attribute.
pub(crate) fn read_property(group: &hdf5::Group) -> Result<ElectronicProperty, anyhow::Error> {
    let class = read_class(group)?;
    match class.as_str() {
        "ElectronicEnergy" => Ok(ElectronicEnergy::from_hdf5(group)?.into()),
        "ParticleNumber" => Ok(ParticleNumber::from_hdf5(group)?.into()),
        "AngularMomentum" => Ok(AngularMomentum::from_hdf5(group)?.into()),
        "Magnetization" => Ok(Magnetization::from_hdf5(group)?.into()),
        "ElectronicDipoleMoment" => Ok(ElectronicDipoleMoment::from_hdf5(group)?.into()),
        "BasisTransform" => Ok(BasisTransform::from_hdf5(group)?.into()),
        "DriverMetadata" => Ok(DriverMetadata::from_hdf5(group)?.into()),
        _ => bail!("Unsupported stored property class `{class}`."),
    }
}

fn write_one_body(
    parent: &hdf5::Group,
    name: &str,
    integrals: &OneBodyIntegrals,
) -> Result<(), anyhow::Error> {
    let group = parent.create_group(name)?;
    write_array2(&group, "alpha", integrals.alpha())?;
    if integrals.has_beta() {
        write_array2(&group, "beta", integrals.beta())?;
    }
    Ok(())
}

fn read_one_body(parent: &hdf5::Group, name: &str) -> Result<OneBodyIntegrals, anyhow::Error> {
    let group = parent.group(name)?;
    OneBodyIntegrals::new(read_array2(&group, "alpha")?, read_opt_array2(&group, "beta"))
}

impl Hdf5Storable for ElectronicEnergy {
    fn to_hdf5(&self, parent: &hdf5::Group) -> Result<(), anyhow::Error> {
        let group = parent.create_group(Self::name())?;
        write_class(&group, "ElectronicEnergy")?;
        write_one_body(&group, "one_body", self.one_body())?;
        let two_body = group.create_group("two_body")?;
        write_array4(&two_body, "aa", self.two_body().aa())?;
        if let Some(bb) = self.two_body().bb() {
            write_array4(&two_body, "bb", bb)?;
        }
        if let Some(ba) = self.two_body().ba() {
            write_array4(&two_body, "ba", ba)?;
        }
        if let Some(e_nn) = self.nuclear_repulsion_energy() {
            write_float_attr(&group, "nuclear_repulsion_energy", e_nn)?;
        }
        if let Some(e_ref) = self.reference_energy() {
            write_float_attr(&group, "reference_energy", e_ref)?;
        }
        if let Some(eps) = self.orbital_energies() {
            write_array1(&group, "orbital_energies", eps)?;
        }
        if let Some(eps_b) = self.orbital_energies_b() {
            write_array1(&group, "orbital_energies_b", eps_b)?;
        }
        Ok(())
    }

    fn from_hdf5(group: &hdf5::Group) -> Result<Self, anyhow::Error> {
        let one_body = read_one_body(group, "one_body")?;
        let two_body_group = group.group("two_body")?;
        let two_body = TwoBodyIntegrals::new(
            read_array4(&two_body_group, "aa")?,
            read_opt_array4(&two_body_group, "bb"),
            read_opt_array4(&two_body_group, "ba"),
        )?;
        let mut property = ElectronicEnergy::new(one_body, two_body);
        if let Some(e_nn) = read_opt_float_attr(group, "nuclear_repulsion_energy") {
            property = property.with_nuclear_repulsion_energy(e_nn);
        }
        if let Some(e_ref) = read_opt_float_attr(group, "reference_energy") {
            property = property.with_reference_energy(e_ref);
        }
        if let Some(eps) = read_opt_array1(group, "orbital_energies") {
            property =
                property.with_orbital_energies(eps, read_opt_array1(group, "orbital_energies_b"));
        }
        Ok(property)
    }
}

impl Hdf5Storable for ParticleNumber {
    fn to_hdf5(&self, parent: &hdf5::Group) -> Result<(), anyhow::Error> {
        let group = parent.create_group(Self::name())?;
        write_class(&group, "ParticleNumber")?;
        write_int_attr(&group, "num_spin_orbitals", self.num_spin_orbitals() as i64)?;
        write_int_attr(&group, "num_alpha", self.num_alpha() as i64)?;
        write_int_attr(&group, "num_beta", self.num_beta() as i64)?;
        if let Some(occ) = self.occupation() {
            write_array1(&group, "occupation", occ)?;
        }
        if let Some(occ_b) = self.occupation_b() {
            write_array1(&group, "occupation_b", occ_b)?;
        }
        Ok(())
    }

    fn from_hdf5(group: &hdf5::Group) -> Result<Self, anyhow::Error> {
        let mut property = ParticleNumber::new(
            usize::try_from(read_int_attr(group, "num_spin_orbitals")?)?,
            usize::try_from(read_int_attr(group, "num_alpha")?)?,
            usize::try_from(read_int_attr(group, "num_beta")?)?,
        )?;
        if let Some(occ) = read_opt_array1(group, "occupation") {
            property = property.with_occupations(occ, read_opt_array1(group, "occupation_b"));
        }
        Ok(property)
    }
}

impl Hdf5Storable for AngularMomentum {
    fn to_hdf5(&self, parent: &hdf5::Group) -> Result<(), anyhow::Error> {
        let group = parent.create_group(Self::name())?;
        write_class(&group, "AngularMomentum")?;
        write_int_attr(&group, "num_spin_orbitals", self.num_spin_orbitals() as i64)?;
        Ok(())
    }

    fn from_hdf5(group: &hdf5::Group) -> Result<Self, anyhow::Error> {
        AngularMomentum::new(usize::try_from(read_int_attr(group, "num_spin_orbitals")?)?)
    }
}

impl Hdf5Storable for Magnetization {
    fn to_hdf5(&self, parent: &hdf5::Group) -> Result<(), anyhow::Error> {
        let group = parent.create_group(Self::name())?;
        write_class(&group, "Magnetization")?;
        write_int_attr(&group, "num_spin_orbitals", self.num_spin_orbitals() as i64)?;
        Ok(())
    }

    fn from_hdf5(group: &hdf5::Group) -> Result<Self, anyhow::Error> {
        Magnetization::new(usize::try_from(read_int_attr(group, "num_spin_orbitals")?)?)
    }
}

impl Hdf5Storable for ElectronicDipoleMoment {
    fn to_hdf5(&self, parent: &hdf5::Group) -> Result<(), anyhow::Error> {
        let group = parent.create_group(Self::name())?;
        write_class(&group, "ElectronicDipoleMoment")?;
        for axis in DipoleAxis::ALL {
            if let Some(integrals) = self.dipole_integrals(axis) {
                write_one_body(&group, &axis.to_string(), integrals)?;
            }
        }
        if let Some(nuclear) = self.nuclear_dipole_moment() {
            write_array1(&group, "nuclear_dipole_moment", &Array1::from(nuclear.to_vec()))?;
        }
        write_int_attr(
            &group,
            "reverse_dipole_sign",
            i64::from(self.reverse_dipole_sign()),
        )?;
        Ok(())
    }

    fn from_hdf5(group: &hdf5::Group) -> Result<Self, anyhow::Error> {
        let mut axis_integrals = [None, None, None];
        for (slot, axis) in axis_integrals.iter_mut().zip(DipoleAxis::ALL) {
            if group.group(&axis.to_string()).is_ok() {
                *slot = Some(read_one_body(group, &axis.to_string())?);
            }
        }
        let [x_dipole, y_dipole, z_dipole] = axis_integrals;
        let mut property = ElectronicDipoleMoment::new(x_dipole, y_dipole, z_dipole)
            .with_reversed_sign(read_int_attr(group, "reverse_dipole_sign")? != 0);
        if let Some(nuclear) = read_opt_array1(group, "nuclear_dipole_moment") {
            if nuclear.len() != 3 {
                bail!(
                    "Expected a three-component nuclear dipole moment, got {} components.",
                    nuclear.len()
                );
            }
            property =
                property.with_nuclear_dipole_moment([nuclear[0], nuclear[1], nuclear[2]]);
        }
        Ok(property)
    }
}

impl Hdf5Storable for BasisTransform {
    fn to_hdf5(&self, parent: &hdf5::Group) -> Result<(), anyhow::Error> {
        let group = parent.create_group(Self::name())?;
        write_class(&group, "BasisTransform")?;
        write_str_attr(&group, "initial_basis", &self.initial_basis().to_string())?;
        write_str_attr(&group, "final_basis", &self.final_basis().to_string())?;
        write_array2(&group, "coeff_alpha", self.coeff_alpha())?;
        if self.has_beta() {
            write_array2(&group, "coeff_beta", self.coeff_beta())?;
        }
        Ok(())
    }

    fn from_hdf5(group: &hdf5::Group) -> Result<Self, anyhow::Error> {
        let parse_basis = |value: String| match value.as_str() {
            "AO" => Ok(ElectronicBasis::Ao),
            "MO" => Ok(ElectronicBasis::Mo),
            _ => bail!("Unsupported stored basis frame `{value}`."),
        };
        BasisTransform::new(
            parse_basis(read_str_attr(group, "initial_basis")?)?,
            parse_basis(read_str_attr(group, "final_basis")?)?,
            read_array2(group, "coeff_alpha")?,
            read_opt_array2(group, "coeff_beta"),
        )
    }
}

impl Hdf5Storable for DriverMetadata {
    fn to_hdf5(&self, parent: &hdf5::Group) -> Result<(), anyhow::Error> {
        let group = parent.create_group(Self::name())?;
        write_class(&group, "DriverMetadata")?;
        write_str_attr(&group, "driver_name", self.driver_name())?;
        write_str_attr(&group, "driver_version", self.driver_version())?;
        write_str_attr(&group, "driver_config", self.driver_config())?;
        Ok(())
    }

    fn from_hdf5(group: &hdf5::Group) -> Result<Self, anyhow::Error> {
        Ok(DriverMetadata::new(
            read_str_attr(group, "driver_name")?,
            read_str_attr(group, "driver_version")?,
            read_str_attr(group, "driver_config")?,
        ))
    }
}

impl ElectronicProperty {
    /// Stores this property in a named subgroup of the provided parent group.
    pub fn to_hdf5(&self, parent: &hdf5::Group) -> Result<(), anyhow::Error> {
        match self {
            ElectronicProperty::ElectronicEnergy(p) => p.to_hdf5(parent),
            ElectronicProperty::ParticleNumber(p) => p.to_hdf5(parent),
            ElectronicProperty::AngularMomentum(p) => p.to_hdf5(parent),
            ElectronicProperty::Magnetization(p) => p.to_hdf5(parent),
            ElectronicProperty::ElectronicDipoleMoment(p) => p.to_hdf5(parent),
            ElectronicProperty::BasisTransform(p) => p.to_hdf5(parent),
            ElectronicProperty::DriverMetadata(p) => p.to_hdf5(parent),
        }
    }
}
