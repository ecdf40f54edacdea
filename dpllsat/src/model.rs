//! Completed-assignment view returned by a successful solve.

use std::fmt;

use dpllsat_formula::{Lit, Var};
use itoa::Buffer;

use crate::error::SolverError;
use crate::trail::Trail;

/// A total assignment over every variable the solver knows about.
///
/// Unlike [`Trail`], which tracks assignment order and decision levels for backtracking, a
/// `Model` is a snapshot: once returned from `solve`, it does not change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    /// Snapshot `trail`'s assignment.
    ///
    /// `trail` must be fully assigned (`first_undefined` is `None`); the search engines only ever
    /// call this once they have confirmed that. Returns
    /// [`SolverError::InternalInvariantViolated`] rather than panicking if it is not, since a
    /// caller outside this crate could in principle build a half-assigned `Trail` by hand.
    pub fn from_trail(trail: &Trail) -> Result<Model, SolverError> {
        if trail.first_undefined().is_some() {
            return Err(SolverError::InternalInvariantViolated(
                "Model::from_trail called on a partial assignment",
            ));
        }

        let values = trail.values()[1..]
            .iter()
            .map(|v| v.expect("checked above: no undefined variable remains"))
            .collect();
        Ok(Model { values })
    }

    /// Value assigned to `var`, `false` if `var` is out of range.
    pub fn value(&self, var: Var) -> bool {
        self.values.get(var.index()).copied().unwrap_or(false)
    }

    /// Whether `l` holds under this assignment.
    pub fn lit_is_true(&self, l: Lit) -> bool {
        self.value(l.var()) ^ l.is_negative()
    }

    /// Number of variables this model assigns.
    pub fn var_count(&self) -> usize {
        self.values.len()
    }
}

/// Whitespace-separated signed literal per variable, in index order: `v1 -v2 v3 ...`.
impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = Buffer::new();
        for (index, &value) in self.values.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            let dimacs = if value {
                (index + 1) as isize
            } else {
                -((index + 1) as isize)
            };
            f.write_str(buf.format(dimacs))?;
        }
        Ok(())
    }
}

/// A debug rendering used at `trace!` level: `[ p1 ~p2 u3 ]` style bracketed polarity marks, one
/// entry per variable.
pub fn debug_dump(trail: &Trail) -> String {
    use std::fmt::Write;

    let mut assignment = String::from("[ ");
    for (index, value) in trail.values().iter().enumerate().skip(1) {
        match value {
            Some(true) => {
                let _ = write!(assignment, "p{} ", index);
            }
            Some(false) => {
                let _ = write!(assignment, "~p{} ", index);
            }
            None => {
                let _ = write!(assignment, "u{} ", index);
            }
        }
    }
    assignment.push(']');

    let markers = trail.decision_positions();
    let mut stack = String::new();
    for (i, l) in trail.stack().iter().enumerate() {
        if i > 0 {
            stack.push(' ');
        }
        if markers.contains(&i) {
            stack.push_str("| ");
        }
        let _ = write!(stack, "{}", l);
    }

    format!("{}  ||  STACK: {}", assignment, stack)
}
