//! # QProp: Electronic-Structure Property Aggregation
//!
//! QProp is a library for collecting the quantum-chemical properties computed
//! by an external electronic-structure driver, such as
//! - the electronic energy,
//! - the particle number,
//! - the total angular momentum,
//! - the magnetization, and
//! - the electronic dipole moment,
//!
//! and exposing them as second-quantized fermionic operators for downstream
//! quantum algorithms. Alongside the typed properties, a grouped driver
//! result carries the molecular geometry, the atomic-orbital to
//! molecular-orbital basis transform and provenance metadata.
//!
//! Grouped driver results can be converted from the monolithic output
//! containers of legacy drivers, persisted to HDF5 archives (with the `hdf5`
//! feature, enabled by default) and snapshotted to binary or YAML files.
//!
//! This documentation details the public API of the `qprop` crate.

pub mod auxiliary;
pub mod cli;
pub mod drivers;
pub mod error;
pub mod io;
pub mod operators;
pub mod properties;
pub mod result;

#[cfg(feature = "hdf5")]
pub mod archive;
