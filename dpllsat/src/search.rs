//! The watched-literal DPLL search loop.
//!
//! Propagates everything implied by the current trail, and on conflict flips the most recent
//! decision (chronological backtracking, no clause learning or non-chronological backjumping).

use std::collections::VecDeque;

use dpllsat_formula::{CnfFormula, Lit};
use log::{debug, trace};

use crate::error::SolverError;
use crate::model::{debug_dump, Model};
use crate::trail::Trail;
use crate::watch::{UpdateResult, WatchIndex};

/// Decide satisfiability of `formula` using watched-literal unit propagation.
pub fn solve(formula: &CnfFormula) -> Result<Option<Model>, SolverError> {
    debug!(
        "search: solving formula with {} variables, {} clauses",
        formula.var_count(),
        formula.len()
    );

    let mut trail = Trail::new(formula.var_count());
    let (mut watches, initial_units) = WatchIndex::build(formula);

    let mut queue: VecDeque<Lit> = VecDeque::new();
    for l in initial_units {
        if trail.is_literal_false(l) {
            debug!("search: conflicting initial units, UNSAT");
            return Ok(None);
        }
        if trail.is_literal_undefined(l) {
            trail.push(l, false);
            queue.push_back(l);
        }
    }

    loop {
        match propagate(&mut trail, &mut watches, formula, &mut queue) {
            PropagateResult::Conflict => {
                trace!("search: conflict; {}", debug_dump(&trail));
                match trail.backtrack() {
                    None => {
                        debug!("search: exhausted all decisions, UNSAT");
                        return Ok(None);
                    }
                    Some(decided) => {
                        let flipped = !decided;
                        trace!("search: flipping decision to {}", flipped);
                        trail.push(flipped, false);
                        queue.clear();
                        queue.push_back(flipped);
                    }
                }
            }
            PropagateResult::Done => match trail.first_undefined() {
                Some(l) => {
                    trace!("search: deciding {}", l);
                    trail.push(l, true);
                    queue.push_back(l);
                }
                None => {
                    debug!("search: all variables assigned, SAT");
                    return Ok(Some(Model::from_trail(&trail)?));
                }
            },
        }
    }
}

enum PropagateResult {
    Done,
    Conflict,
}

/// Drain `queue`, feeding each newly-assigned literal's negation through the watch index, pushing
/// any newly implied literals back onto both the trail and the queue.
fn propagate(
    trail: &mut Trail,
    watches: &mut WatchIndex,
    formula: &CnfFormula,
    queue: &mut VecDeque<Lit>,
) -> PropagateResult {
    while let Some(assigned) = queue.pop_front() {
        match watches.update(!assigned, trail, formula) {
            UpdateResult::Conflict => return PropagateResult::Conflict,
            UpdateResult::Ok { implied } => {
                for l in implied {
                    if trail.is_literal_undefined(l) {
                        trail.push(l, false);
                        queue.push_back(l);
                    }
                }
            }
        }
    }
    PropagateResult::Done
}
