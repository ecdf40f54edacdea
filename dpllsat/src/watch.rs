//! Watched-literal index.
//!
//! Watchlists are keyed by literal code, with two watches tracked per multi-literal clause.
//! Clauses whose two syntactic initial-watch candidates happen to be equal literals are handled
//! by falling back to the clause's single distinct literal.
//!
//! Clauses are referenced by [`ClauseId`], an index into the formula's clause vector, rather than
//! by value. This sidesteps hashing/deep-comparing clauses and the bug where two clauses with
//! identical literals would share one watch record.

use dpllsat_formula::{CnfFormula, Lit};

use crate::trail::Trail;

/// Index of a clause within the [`CnfFormula`] a [`WatchIndex`] was built from.
pub type ClauseId = usize;

/// The outcome of feeding a newly-falsified literal through [`WatchIndex::update`].
pub enum UpdateResult {
    /// No clause became false; `implied` holds every literal newly forced to true, in the order
    /// they should be propagated (last element first, i.e. treat this as a LIFO stack).
    Ok { implied: Vec<Lit> },
    /// Some clause has no remaining way to become true under the current assignment.
    Conflict,
}

/// Bidirectional watched-literal structure: per-literal watchlists, and per-clause watch pairs.
pub struct WatchIndex {
    /// `watchlists[lit.code()]` holds the ids of clauses currently watching `lit`.
    watchlists: Vec<Vec<ClauseId>>,
    /// The two literals each multi-literal clause currently watches. Empty (`None`) for clauses
    /// that never participate in watching (unit clauses at construction time).
    watches: Vec<Option<[Lit; 2]>>,
}

impl WatchIndex {
    /// Build the initial index for `formula`.
    ///
    /// Unit clauses (after accounting for duplicate-literal clauses that collapse to a single
    /// distinct literal) are not registered in the index; their single literal is returned in
    /// `initial_units` for the caller to enqueue as a starting implication.
    pub fn build(formula: &CnfFormula) -> (WatchIndex, Vec<Lit>) {
        let mut watchlists = vec![vec![]; formula.var_count() * 2];
        let mut watches = Vec::with_capacity(formula.len());
        let mut initial_units = vec![];

        for (id, clause) in formula.iter().enumerate() {
            if clause.len() >= 2 {
                let second_distinct = clause.iter().skip(1).find(|&&l| l != clause[0]);

                match second_distinct {
                    Some(&other) => {
                        watchlists[clause[0].code()].push(id);
                        watchlists[other.code()].push(id);
                        watches.push(Some([clause[0], other]));
                    }
                    None => {
                        // every literal in the clause is syntactically identical
                        initial_units.push(clause[0]);
                        watches.push(None);
                    }
                }
            } else {
                initial_units.push(clause[0]);
                watches.push(None);
            }
        }

        (
            WatchIndex {
                watchlists,
                watches,
            },
            initial_units,
        )
    }

    /// Process `l` having just become false: relocate watches, and report newly implied literals
    /// or a conflict.
    ///
    /// `formula` must be the same formula (same clause order) passed to [`WatchIndex::build`].
    pub fn update(&mut self, l: Lit, trail: &Trail, formula: &CnfFormula) -> UpdateResult {
        let mut implied: Vec<Lit> = vec![];

        let watching = std::mem::take(&mut self.watchlists[l.code()]);
        // Clauses that stay in `l`'s watchlist, written in place as we scan: deferred watch
        // removal, compacting kept entries to the front rather than removing mid-iteration.
        let mut kept = Vec::with_capacity(watching.len());

        for (scanned, &id) in watching.iter().enumerate() {
            let clause = formula.clause(id);
            let [w0, w1] = self.watches[id].expect("watched clause must have a watch pair");

            let mut found_true = false;
            let mut undef = None;

            for &lit in clause.iter() {
                if trail.is_literal_true(lit) {
                    found_true = true;
                    break;
                } else if undef.is_none() && trail.is_literal_undefined(lit) && lit != w0 && lit != w1
                {
                    undef = Some(lit);
                }
            }

            if found_true {
                kept.push(id);
                continue;
            }

            if let Some(replacement) = undef {
                let new_pair = if w0 == l {
                    [replacement, w1]
                } else {
                    [w0, replacement]
                };
                self.watches[id] = Some(new_pair);
                self.watchlists[replacement.code()].push(id);
                // `id` moves to `replacement`'s watchlist, so it is not pushed to `kept`.
                continue;
            }

            // No satisfying literal, no replacement: the clause is now unit or conflicting.
            kept.push(id);
            let other = if w0 == l { w1 } else { w0 };

            if trail.is_literal_undefined(other) {
                if implied.contains(&!other) {
                    kept.extend_from_slice(&watching[scanned + 1..]);
                    self.watchlists[l.code()] = kept;
                    return UpdateResult::Conflict;
                }
                if !implied.contains(&other) {
                    implied.push(other);
                }
            } else {
                debug_assert!(trail.is_literal_false(other));
                kept.extend_from_slice(&watching[scanned + 1..]);
                self.watchlists[l.code()] = kept;
                return UpdateResult::Conflict;
            }
        }

        self.watchlists[l.code()] = kept;
        UpdateResult::Ok { implied }
    }
}
