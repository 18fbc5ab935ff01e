//! Typed electronic-structure properties, their grouping container, and the
//! second-quantized operator collector.

use std::fmt;

use indexmap::IndexMap;
use log;
use serde::{Deserialize, Serialize};

use crate::operators::fermionic::FermionicOp;

pub mod angular_momentum;
pub mod bases;
pub mod dipole_moment;
pub mod driver_metadata;
pub mod electronic_energy;
pub mod integrals;
pub mod magnetization;
pub mod particle_number;

use self::angular_momentum::AngularMomentum;
use self::bases::BasisTransform;
use self::dipole_moment::ElectronicDipoleMoment;
use self::driver_metadata::DriverMetadata;
use self::electronic_energy::ElectronicEnergy;
use self::magnetization::Magnetization;
use self::particle_number::ParticleNumber;


/// An enumerated type distinguishing the property variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    ElectronicEnergy,
    ParticleNumber,
    AngularMomentum,
    Magnetization,
    ElectronicDipoleMoment,
    BasisTransform,
    DriverMetadata,
}

impl PropertyKind {
    /// The fixed, ordered list of the five operator-emitting physical
    /// properties used by the list-shaped collector.
    pub const OPERATOR_KINDS: [PropertyKind; 5] = [
        PropertyKind::ElectronicEnergy,
        PropertyKind::ParticleNumber,
        PropertyKind::AngularMomentum,
        PropertyKind::Magnetization,
        PropertyKind::ElectronicDipoleMoment,
    ];
}

/// A tagged union over the typed electronic-structure properties.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ElectronicProperty {
    ElectronicEnergy(ElectronicEnergy),
    ParticleNumber(ParticleNumber),
    AngularMomentum(AngularMomentum),
    Magnetization(Magnetization),
    ElectronicDipoleMoment(ElectronicDipoleMoment),
    BasisTransform(BasisTransform),
    DriverMetadata(DriverMetadata),
}

impl ElectronicProperty {
    /// The name under which this property is registered in a group.
    pub fn name(&self) -> &'static str {
        match self {
            ElectronicProperty::ElectronicEnergy(_) => ElectronicEnergy::name(),
            ElectronicProperty::ParticleNumber(_) => ParticleNumber::name(),
            ElectronicProperty::AngularMomentum(_) => AngularMomentum::name(),
            ElectronicProperty::Magnetization(_) => Magnetization::name(),
            ElectronicProperty::ElectronicDipoleMoment(_) => ElectronicDipoleMoment::name(),
            ElectronicProperty::BasisTransform(_) => BasisTransform::name(),
            ElectronicProperty::DriverMetadata(_) => DriverMetadata::name(),
        }
    }

    /// The variant tag of this property.
    pub fn kind(&self) -> PropertyKind {
        match self {
            ElectronicProperty::ElectronicEnergy(_) => PropertyKind::ElectronicEnergy,
            ElectronicProperty::ParticleNumber(_) => PropertyKind::ParticleNumber,
            ElectronicProperty::AngularMomentum(_) => PropertyKind::AngularMomentum,
            ElectronicProperty::Magnetization(_) => PropertyKind::Magnetization,
            ElectronicProperty::ElectronicDipoleMoment(_) => {
                PropertyKind::ElectronicDipoleMoment
            }
            ElectronicProperty::BasisTransform(_) => PropertyKind::BasisTransform,
            ElectronicProperty::DriverMetadata(_) => PropertyKind::DriverMetadata,
        }
    }

    /// The named second-quantized operators this property emits. Properties
    /// with no operator representation emit nothing.
    pub fn second_q_ops(&self) -> Vec<(String, FermionicOp)> {
        match self {
            ElectronicProperty::ElectronicEnergy(p) => p.second_q_ops(),
            ElectronicProperty::ParticleNumber(p) => p.second_q_ops(),
            ElectronicProperty::AngularMomentum(p) => p.second_q_ops(),
            ElectronicProperty::Magnetization(p) => p.second_q_ops(),
            ElectronicProperty::ElectronicDipoleMoment(p) => p.second_q_ops(),
            ElectronicProperty::BasisTransform(_) | ElectronicProperty::DriverMetadata(_) => {
                Vec::new()
            }
        }
    }
}

impl fmt::Display for ElectronicProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElectronicProperty::ElectronicEnergy(p) => write!(f, "{p}"),
            ElectronicProperty::ParticleNumber(p) => write!(f, "{p}"),
            ElectronicProperty::AngularMomentum(p) => write!(f, "{p}"),
            ElectronicProperty::Magnetization(p) => write!(f, "{p}"),
            ElectronicProperty::ElectronicDipoleMoment(p) => write!(f, "{p}"),
            ElectronicProperty::BasisTransform(p) => write!(f, "{p}"),
            ElectronicProperty::DriverMetadata(p) => write!(f, "{p}"),
        }
    }
}

impl From<ElectronicEnergy> for ElectronicProperty {
    fn from(p: ElectronicEnergy) -> Self {
        ElectronicProperty::ElectronicEnergy(p)
    }
}

impl From<ParticleNumber> for ElectronicProperty {
    fn from(p: ParticleNumber) -> Self {
        ElectronicProperty::ParticleNumber(p)
    }
}

impl From<AngularMomentum> for ElectronicProperty {
    fn from(p: AngularMomentum) -> Self {
        ElectronicProperty::AngularMomentum(p)
    }
}

impl From<Magnetization> for ElectronicProperty {
    fn from(p: Magnetization) -> Self {
        ElectronicProperty::Magnetization(p)
    }
}

impl From<ElectronicDipoleMoment> for ElectronicProperty {
    fn from(p: ElectronicDipoleMoment) -> Self {
        ElectronicProperty::ElectronicDipoleMoment(p)
    }
}

impl From<BasisTransform> for ElectronicProperty {
    fn from(p: BasisTransform) -> Self {
        ElectronicProperty::BasisTransform(p)
    }
}

impl From<DriverMetadata> for ElectronicProperty {
    fn from(p: DriverMetadata) -> Self {
        ElectronicProperty::DriverMetadata(p)
    }
}

/// An enumerated type selecting the output shape of the operator collector.
///
/// This replaces a process-wide mutable flag in the system this library
/// descends from; the shape is always chosen explicitly at the call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorShape {
    /// Ordered accumulation over the fixed five physical properties;
    /// duplicate names are kept.
    List,

    /// Name-keyed accumulation over all group members; on a name collision
    /// the last write wins.
    Dict,
}

/// The collected second-quantized operators of a property group, shaped
/// according to the requested [`OperatorShape`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum OperatorCollection {
    /// Ordered named operators, possibly with duplicate names.
    List(Vec<(String, FermionicOp)>),

    /// Name-keyed operators without duplicates.
    Dict(IndexMap<String, FermionicOp>),
}

impl OperatorCollection {
    /// The number of collected operators.
    pub fn len(&self) -> usize {
        match self {
            OperatorCollection::List(ops) => ops.len(),
            OperatorCollection::Dict(ops) => ops.len(),
        }
    }

    /// Whether no operators were collected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The operator names in collection order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            OperatorCollection::List(ops) => ops.iter().map(|(name, _)| name.as_str()).collect(),
            OperatorCollection::Dict(ops) => ops.keys().map(String::as_str).collect(),
        }
    }

    /// The first operator registered under the given name, if any.
    pub fn get(&self, name: &str) -> Option<&FermionicOp> {
        match self {
            OperatorCollection::List(ops) => ops
                .iter()
                .find(|(candidate, _)| candidate == name)
                .map(|(_, op)| op),
            OperatorCollection::Dict(ops) => ops.get(name),
        }
    }
}

/// An insertion-ordered collection of named typed properties.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectronicPropertyGroup {
    /// The name of this group.
    name: String,

    /// The properties of this group, keyed by property name.
    properties: IndexMap<String, ElectronicProperty>,
}

impl ElectronicPropertyGroup {
    /// Creates an empty group.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the group.
    pub fn new(name: &str) -> Self {
        ElectronicPropertyGroup {
            name: name.to_string(),
            properties: IndexMap::new(),
        }
    }

    /// The name of this group.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a property under its name. A property already registered
    /// under the same name is replaced.
    pub fn add(&mut self, property: ElectronicProperty) {
        let name = property.name();
        if self.properties.insert(name.to_string(), property).is_some() {
            log::debug!("Property `{name}` has been replaced in group `{}`.", self.name);
        }
    }

    /// Retrieves a property by its registered name.
    pub fn get(&self, name: &str) -> Option<&ElectronicProperty> {
        self.properties.get(name)
    }

    /// Retrieves the first property of the given variant tag.
    pub fn get_kind(&self, kind: PropertyKind) -> Option<&ElectronicProperty> {
        self.properties.values().find(|p| p.kind() == kind)
    }

    /// Iterates over the properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ElectronicProperty> {
        self.properties.values()
    }

    /// The number of registered properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the group holds no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Collects the second-quantized operators of the group members.
    ///
    /// # Arguments
    ///
    /// * `shape` - The requested output shape. [`OperatorShape::List`]
    ///     accumulates over the fixed five physical properties in order,
    ///     skipping any that are missing; [`OperatorShape::Dict`] merges the
    ///     operators of *all* members into a name-keyed map in which the last
    ///     write wins.
    ///
    /// # Returns
    ///
    /// The collected operators.
    pub fn second_q_ops(&self, shape: OperatorShape) -> OperatorCollection {
        match shape {
            OperatorShape::List => {
                let mut ops = Vec::new();
                for kind in PropertyKind::OPERATOR_KINDS {
                    if let Some(property) = self.get_kind(kind) {
                        ops.extend(property.second_q_ops());
                    }
                }
                OperatorCollection::List(ops)
            }
            OperatorShape::Dict => {
                let mut ops: IndexMap<String, FermionicOp> = IndexMap::new();
                for property in self.iter() {
                    for (name, op) in property.second_q_ops() {
                        if ops.insert(name.clone(), op).is_some() {
                            log::debug!(
                                "Operator `{name}` has been overwritten during collection."
                            );
                        }
                    }
                }
                OperatorCollection::Dict(ops)
            }
        }
    }
}

impl fmt::Display for ElectronicPropertyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        for property in self.iter() {
            writeln!(f, "  {property}")?;
        }
        Ok(())
    }
}
