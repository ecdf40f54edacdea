//! Partial assignment and chronological backtracking.
//!
//! A variable-to-value mapping plus the stack of literals assigned so far. Decisions are marked
//! so that [`Trail::backtrack`] can unwind exactly one decision's worth of implications per call.
//!
//! Decision markers live in a side `decisions` stack of trail positions rather than in-band in
//! the literal stack itself, since `Lit` has no spare sentinel value to mark them with.

use dpllsat_formula::{Lit, Var};

/// The current partial assignment plus the trail of assigned literals.
pub struct Trail {
    /// `Some(true)`/`Some(false)`/`None` (undefined), indexed by variable.
    values: Vec<Option<bool>>,
    /// All literals assigned so far, in assignment order.
    stack: Vec<Lit>,
    /// Trail lengths (i.e. index into `stack`) at which a decision was pushed. The literal at
    /// `stack[decisions[i]]` is the decided literal for that level.
    decisions: Vec<usize>,
}

impl Trail {
    /// Create a trail for `n` variables, all undefined.
    pub fn new(n: usize) -> Trail {
        Trail {
            values: vec![None; n + 1],
            stack: Vec::with_capacity(n),
            decisions: vec![],
        }
    }

    /// Reinitialize to `n` variables, all undefined, with an empty trail.
    pub fn reset(&mut self, n: usize) {
        self.values.clear();
        self.values.resize(n + 1, None);
        self.stack.clear();
        self.decisions.clear();
    }

    /// Assign `l`'s variable to make `l` true, optionally starting a new decision level.
    ///
    /// Precondition: `|l|` is currently undefined.
    pub fn push(&mut self, l: Lit, decide: bool) {
        debug_assert!(
            self.values[l.var().index()].is_none(),
            "push of an already-assigned literal"
        );

        if decide {
            self.decisions.push(self.stack.len());
        }

        self.values[l.var().index()] = Some(l.is_positive());
        self.stack.push(l);
    }

    /// Undo assignments back through (and including) the most recent decision.
    ///
    /// Returns the literal that was decided at that level, or `None` if the trail holds no
    /// decision (meaning the search has exhausted every branch and the formula is unsatisfiable).
    pub fn backtrack(&mut self) -> Option<Lit> {
        let level_start = self.decisions.pop()?;

        let decided = self.stack[level_start];

        for &l in &self.stack[level_start..] {
            self.values[l.var().index()] = None;
        }
        self.stack.truncate(level_start);

        Some(decided)
    }

    /// The smallest-indexed undefined variable, asserted true, or `None` if the assignment is
    /// total.
    pub fn first_undefined(&self) -> Option<Lit> {
        self.values
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, v)| v.is_none())
            .map(|(index, _)| Var::from_dimacs(index as isize).positive())
    }

    /// Value currently assigned to `l`'s variable, accounting for `l`'s polarity.
    pub fn lit_value(&self, l: Lit) -> Option<bool> {
        self.values[l.var().index()].map(|v| v ^ l.is_negative())
    }

    pub fn is_literal_true(&self, l: Lit) -> bool {
        self.lit_value(l) == Some(true)
    }

    pub fn is_literal_false(&self, l: Lit) -> bool {
        self.lit_value(l) == Some(false)
    }

    pub fn is_literal_undefined(&self, l: Lit) -> bool {
        self.lit_value(l).is_none()
    }

    /// True iff every literal of `clause` is false under the current assignment.
    ///
    /// Linear in `clause.len()`. Used only by the naive solver path.
    pub fn is_clause_false(&self, clause: &[Lit]) -> bool {
        clause.iter().all(|&l| self.is_literal_false(l))
    }

    /// The single undefined literal of `clause` if it is unit under the current assignment.
    ///
    /// Returns `None` if the clause is already satisfied, already false, or has two or more
    /// undefined literals. Used only by the naive solver path.
    pub fn is_clause_unit(&self, clause: &[Lit]) -> Option<Lit> {
        let mut undefined = None;

        for &l in clause {
            match self.lit_value(l) {
                Some(true) => return None,
                Some(false) => (),
                None => {
                    if undefined.is_some() {
                        return None;
                    }
                    undefined = Some(l);
                }
            }
        }

        undefined
    }

    /// Literals assigned so far, in assignment order.
    pub fn stack(&self) -> &[Lit] {
        &self.stack
    }

    /// Number of decisions currently active.
    pub fn decision_level(&self) -> usize {
        self.decisions.len()
    }

    /// Trail positions at which a decision marker precedes the literal, in increasing order.
    ///
    /// Used only by [`crate::model::debug_dump`] to render decision markers inline.
    pub fn decision_positions(&self) -> &[usize] {
        &self.decisions
    }

    /// Full per-variable assignment, 1-indexed (`values()[0]` is unused padding).
    pub fn values(&self) -> &[Option<bool>] {
        &self.values
    }
}
