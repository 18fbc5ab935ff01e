//! Sparse second-quantized fermionic operators.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use anyhow;
use indexmap::IndexMap;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::QPropError;

#[cfg(test)]
#[path = "fermionic_tests.rs"]
mod fermionic_tests;

lazy_static! {
    static ref ACTION_RE: Regex = Regex::new(r"^([+-])_([0-9]+)$").expect("Regex pattern invalid.");
}

/// The default threshold below which operator coefficients are discarded.
pub const DEFAULT_COEFF_THRESHOLD: f64 = 1e-12;

/// An enumerated type for the two ladder actions on a spin orbital.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LadderAction {
    /// Creation, written `+_p` in sparse labels.
    Create,

    /// Annihilation, written `-_p` in sparse labels.
    Annihilate,
}

impl LadderAction {
    /// The action obtained under Hermitian conjugation.
    pub fn flip(self) -> Self {
        match self {
            LadderAction::Create => LadderAction::Annihilate,
            LadderAction::Annihilate => LadderAction::Create,
        }
    }
}

/// Parses a sparse label into a sequence of ladder actions.
///
/// # Arguments
///
/// * `label` - A space-separated sequence of `+_p` / `-_p` actions. The empty
///     label denotes the identity.
/// * `register_length` - The number of spin orbitals in the register; all
///     indices must lie below this.
///
/// # Returns
///
/// The parsed action sequence.
fn parse_label(
    label: &str,
    register_length: usize,
) -> Result<Vec<(LadderAction, usize)>, QPropError> {
    label
        .split_whitespace()
        .map(|token| {
            let caps = ACTION_RE
                .captures(token)
                .ok_or_else(|| QPropError::InvalidLabel {
                    label: label.to_string(),
                    reason: format!("malformed action `{token}`"),
                })?;
            let action = match &caps[1] {
                "+" => LadderAction::Create,
                _ => LadderAction::Annihilate,
            };
            let index = caps[2]
                .parse::<usize>()
                .map_err(|_| QPropError::InvalidLabel {
                    label: label.to_string(),
                    reason: format!("unparsable index in `{token}`"),
                })?;
            if index >= register_length {
                return Err(QPropError::InvalidLabel {
                    label: label.to_string(),
                    reason: format!(
                        "index {index} exceeds register length {register_length}"
                    ),
                });
            }
            Ok((action, index))
        })
        .collect()
}

/// Formats a sequence of ladder actions as a canonical sparse label.
fn format_actions(actions: &[(LadderAction, usize)]) -> String {
    actions
        .iter()
        .map(|(action, index)| match action {
            LadderAction::Create => format!("+_{index}"),
            LadderAction::Annihilate => format!("-_{index}"),
        })
        .join(" ")
}

/// A sparse second-quantized fermionic operator over a register of spin
/// orbitals.
///
/// Terms are kept in insertion order, keyed by their canonical sparse label.
/// The alpha spin orbitals of an $`n`$-orbital molecular system occupy
/// register indices $`[0, n)`$ and the beta spin orbitals $`[n, 2n)`$.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FermionicOp {
    /// A map from canonical sparse labels to real coefficients.
    terms: IndexMap<String, f64>,

    /// The number of spin orbitals in the register.
    register_length: usize,
}

impl FermionicOp {
    /// The zero operator on a register of `register_length` spin orbitals.
    pub fn zero(register_length: usize) -> Self {
        FermionicOp {
            terms: IndexMap::new(),
            register_length,
        }
    }

    /// The identity operator on a register of `register_length` spin orbitals.
    pub fn identity(register_length: usize) -> Self {
        let mut terms = IndexMap::new();
        terms.insert(String::new(), 1.0);
        FermionicOp {
            terms,
            register_length,
        }
    }

    /// Constructs an operator from labelled terms.
    ///
    /// Labels are canonicalized and duplicate labels accumulate. Malformed
    /// labels and out-of-range indices are rejected.
    ///
    /// # Arguments
    ///
    /// * `terms` - An iterator of (sparse label, coefficient) pairs.
    /// * `register_length` - The number of spin orbitals in the register.
    ///
    /// # Returns
    ///
    /// The constructed operator.
    pub fn from_terms<I, S>(terms: I, register_length: usize) -> Result<Self, anyhow::Error>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut op = FermionicOp::zero(register_length);
        for (label, coeff) in terms {
            let actions = parse_label(label.as_ref(), register_length)?;
            op.accumulate(format_actions(&actions), coeff);
        }
        Ok(op)
    }

    /// The number of spin orbitals in the register.
    pub fn register_length(&self) -> usize {
        self.register_length
    }

    /// The number of stored terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Iterates over (label, coefficient) pairs in insertion order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, f64)> {
        self.terms.iter().map(|(label, coeff)| (label.as_str(), *coeff))
    }

    /// The coefficient of a given canonical label, if present.
    pub fn coefficient(&self, label: &str) -> Option<f64> {
        self.terms.get(label).copied()
    }

    /// Iterates over terms with their labels parsed into ladder-action
    /// sequences.
    pub fn ladder_terms(&self) -> impl Iterator<Item = (Vec<(LadderAction, usize)>, f64)> + '_ {
        self.terms.iter().map(|(label, coeff)| {
            let actions = parse_label(label, self.register_length)
                .expect("Stored labels are canonical by construction.");
            (actions, *coeff)
        })
    }

    fn accumulate(&mut self, label: String, coeff: f64) {
        *self.terms.entry(label).or_insert(0.0) += coeff;
    }

    /// The Hermitian conjugate of this operator. Coefficients are real, so
    /// only the action sequences are reversed and flipped.
    pub fn adjoint(&self) -> Self {
        let mut op = FermionicOp::zero(self.register_length);
        for (actions, coeff) in self.ladder_terms() {
            let conjugated: Vec<_> = actions
                .into_iter()
                .rev()
                .map(|(action, index)| (action.flip(), index))
                .collect();
            op.accumulate(format_actions(&conjugated), coeff);
        }
        op
    }

    /// Drops terms whose coefficients are negligible.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Coefficients with magnitude at or below this are
    ///     discarded.
    pub fn simplify(&self, threshold: f64) -> Self {
        let terms = self
            .terms
            .iter()
            .filter(|(_, coeff)| coeff.abs() > threshold)
            .map(|(label, coeff)| (label.clone(), *coeff))
            .collect();
        FermionicOp {
            terms,
            register_length: self.register_length,
        }
    }

    /// Rewrites this operator in normal order: within each term all creations
    /// precede all annihilations, each block sorted by ascending index.
    ///
    /// Reordering applies the canonical anticommutation relations, so
    /// contraction terms are generated for `-_p +_p` pairs and repeated
    /// equal-index actions of the same kind vanish. The operator's action on
    /// the occupation-number basis is preserved.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Coefficients with magnitude at or below this are
    ///     discarded from the result.
    pub fn normal_order(&self, threshold: f64) -> Self {
        let mut acc: IndexMap<String, f64> = IndexMap::new();
        for (actions, coeff) in self.ladder_terms() {
            normal_order_actions(actions, coeff, &mut acc);
        }
        acc.retain(|_, coeff| coeff.abs() > threshold);
        FermionicOp {
            terms: acc,
            register_length: self.register_length,
        }
    }

    /// Compares two operators for equivalence by normal-ordering both sides.
    ///
    /// # Arguments
    ///
    /// * `other` - The operator to compare against.
    /// * `threshold` - The tolerance on coefficient differences.
    pub fn equiv(&self, other: &Self, threshold: f64) -> bool {
        if self.register_length != other.register_length {
            return false;
        }
        let lhs = self.normal_order(0.0);
        let rhs = other.normal_order(0.0);
        lhs.terms
            .keys()
            .chain(rhs.terms.keys())
            .unique()
            .all(|label| {
                let cl = lhs.terms.get(label).copied().unwrap_or(0.0);
                let cr = rhs.terms.get(label).copied().unwrap_or(0.0);
                (cl - cr).abs() <= threshold
            })
    }
}

/// Applies the anticommutation rewrite rules to a single term, accumulating
/// the resulting normal-ordered terms into `acc`.
fn normal_order_actions(
    actions: Vec<(LadderAction, usize)>,
    coeff: f64,
    acc: &mut IndexMap<String, f64>,
) {
    let mut stack: Vec<(Vec<(LadderAction, usize)>, f64)> = vec![(actions, coeff)];
    while let Some((term, c)) = stack.pop() {
        let mut rewritten = false;
        for i in 0..term.len().saturating_sub(1) {
            let (a, p) = term[i];
            let (b, q) = term[i + 1];
            match (a, b) {
                (LadderAction::Annihilate, LadderAction::Create) => {
                    // a_p a+_q = δ_pq - a+_q a_p
                    if p == q {
                        let mut contracted = term.clone();
                        contracted.drain(i..=i + 1);
                        stack.push((contracted, c));
                    }
                    let mut swapped = term.clone();
                    swapped.swap(i, i + 1);
                    stack.push((swapped, -c));
                    rewritten = true;
                }
                (LadderAction::Create, LadderAction::Create)
                | (LadderAction::Annihilate, LadderAction::Annihilate) => {
                    if p == q {
                        // Repeated action annihilates the term.
                        rewritten = true;
                    } else if p > q {
                        let mut swapped = term.clone();
                        swapped.swap(i, i + 1);
                        stack.push((swapped, -c));
                        rewritten = true;
                    } else {
                        continue;
                    }
                }
                (LadderAction::Create, LadderAction::Annihilate) => continue,
            }
            break;
        }
        if !rewritten {
            *acc.entry(format_actions(&term)).or_insert(0.0) += c;
        }
    }
}

impl fmt::Display for FermionicOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "FermionicOp on {} spin orbitals ({} terms):",
            self.register_length,
            self.terms.len()
        )?;
        for (label, coeff) in &self.terms {
            writeln!(f, "  {coeff:+.12} [{label}]")?;
        }
        Ok(())
    }
}

impl Add<&FermionicOp> for &FermionicOp {
    type Output = FermionicOp;

    /// # Panics
    ///
    /// Panics if the register lengths differ.
    fn add(self, rhs: &FermionicOp) -> FermionicOp {
        assert_eq!(
            self.register_length, rhs.register_length,
            "Register lengths do not match."
        );
        let mut op = self.clone();
        for (label, coeff) in &rhs.terms {
            op.accumulate(label.clone(), *coeff);
        }
        op
    }
}

impl Sub<&FermionicOp> for &FermionicOp {
    type Output = FermionicOp;

    /// # Panics
    ///
    /// Panics if the register lengths differ.
    fn sub(self, rhs: &FermionicOp) -> FermionicOp {
        self + &(-rhs)
    }
}

impl Neg for &FermionicOp {
    type Output = FermionicOp;

    fn neg(self) -> FermionicOp {
        self * -1.0
    }
}

impl Mul<f64> for &FermionicOp {
    type Output = FermionicOp;

    fn mul(self, rhs: f64) -> FermionicOp {
        let terms = self
            .terms
            .iter()
            .map(|(label, coeff)| (label.clone(), coeff * rhs))
            .collect();
        FermionicOp {
            terms,
            register_length: self.register_length,
        }
    }
}

impl Mul<&FermionicOp> for &FermionicOp {
    type Output = FermionicOp;

    /// Operator composition: each term of the product concatenates the action
    /// sequences of the factors.
    ///
    /// # Panics
    ///
    /// Panics if the register lengths differ.
    fn mul(self, rhs: &FermionicOp) -> FermionicOp {
        assert_eq!(
            self.register_length, rhs.register_length,
            "Register lengths do not match."
        );
        let mut op = FermionicOp::zero(self.register_length);
        for (la, ca) in &self.terms {
            for (lb, cb) in &rhs.terms {
                let label = if la.is_empty() {
                    lb.clone()
                } else if lb.is_empty() {
                    la.clone()
                } else {
                    format!("{la} {lb}")
                };
                op.accumulate(label, ca * cb);
            }
        }
        op
    }
}
