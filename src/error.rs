//! Domain error kinds surfaced by the property-aggregation APIs.

use thiserror::Error;

/// Errors arising from property aggregation, legacy conversion and operator
/// construction. Fallible APIs wrap these in [`anyhow::Error`] at the call
/// boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QPropError {
    /// A legacy driver result of an unsupported variant was supplied to a
    /// conversion that expects a different one.
    #[error("invalid legacy input type: expected `{expected}`, got `{got}`")]
    InvalidInputType {
        /// The legacy variant the conversion accepts.
        expected: String,

        /// The legacy variant actually supplied.
        got: String,
    },

    /// The distinguished molecule field was accessed before it has been set.
    #[error("no molecule has been set on this driver result")]
    MissingMolecule,

    /// A fermionic operator label failed to parse.
    #[error("invalid fermionic label `{label}`: {reason}")]
    InvalidLabel {
        /// The offending label.
        label: String,

        /// Why the label was rejected.
        reason: String,
    },

    /// Two operators over registers of different lengths were combined.
    #[error("register length mismatch: {left} vs {right}")]
    RegisterMismatch {
        /// Register length of the left operand.
        left: usize,

        /// Register length of the right operand.
        right: usize,
    },

    /// An array argument has a shape incompatible with its role.
    #[error("shape mismatch for `{name}`: {reason}")]
    ShapeMismatch {
        /// The name of the offending argument.
        name: String,

        /// Why the shape was rejected.
        reason: String,
    },
}
