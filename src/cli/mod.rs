//! Command-line interface for inspecting stored driver results.

use std::path::PathBuf;

use anyhow::{self, bail};
use clap::{Parser, ValueEnum};

use crate::io::format::{log_title, qprop_error, qprop_output};
use crate::io::{read_qprop_binary, QPropFileType};
use crate::properties::{OperatorCollection, OperatorShape};
use crate::result::ElectronicStructureDriverResult;

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Logs a QProp heading to the `qprop-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    qprop_output!("QProp {version}");
    qprop_output!("Electronic-structure property aggregation");
    qprop_output!("");
}

/// The operator collection shape requested on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ShapeArg {
    /// Ordered accumulation over the five physical properties.
    List,

    /// Name-keyed accumulation over all group members.
    Dict,
}

impl From<ShapeArg> for OperatorShape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::List => OperatorShape::List,
            ShapeArg::Dict => OperatorShape::Dict,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// The stored driver result to inspect: an HDF5 archive (`.h5`/`.hdf5`)
    /// or a binary snapshot (`.qprop.res`).
    pub archive: PathBuf,

    /// The shape in which to collect the second-quantized operators.
    #[arg(short, long, value_enum, default_value = "dict")]
    pub shape: ShapeArg,
}

/// Loads the requested driver result, logs its summary and the collected
/// operator set.
pub fn run(cli: &Cli) -> Result<(), anyhow::Error> {
    let result = load_driver_result(&cli.archive)?;

    log_title("Driver result");
    qprop_output!("{result}");

    let shape = OperatorShape::from(cli.shape);
    let ops = result.second_q_ops(shape);
    log_title("Second-quantized operators");
    qprop_output!("Collected {} operator(s) ({shape:?} shape):", ops.len());
    match &ops {
        OperatorCollection::List(named_ops) => {
            for (name, op) in named_ops {
                qprop_output!(
                    "  {name}: {} term(s) on {} spin orbitals",
                    op.n_terms(),
                    op.register_length()
                );
            }
        }
        OperatorCollection::Dict(named_ops) => {
            for (name, op) in named_ops {
                qprop_output!(
                    "  {name}: {} term(s) on {} spin orbitals",
                    op.n_terms(),
                    op.register_length()
                );
            }
        }
    }
    Ok(())
}

fn load_driver_result(
    path: &PathBuf,
) -> Result<ElectronicStructureDriverResult, anyhow::Error> {
    let name = path.to_string_lossy();
    if name.ends_with(".h5") || name.ends_with(".hdf5") {
        #[cfg(feature = "hdf5")]
        {
            return crate::archive::read_driver_result(path);
        }
        #[cfg(not(feature = "hdf5"))]
        {
            qprop_error!("HDF5 support is not compiled in; rebuild with the `hdf5` feature.");
            bail!("HDF5 support is not compiled in.");
        }
    }
    if let Some(stem) = name.strip_suffix(".qprop.res") {
        return read_qprop_binary(stem.to_string(), QPropFileType::Res);
    }
    qprop_error!("Unrecognized archive extension for `{name}`.");
    bail!("Unrecognized archive extension for `{name}`.");
}
