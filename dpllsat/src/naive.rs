//! The legacy naive DPLL solver path, used only for cross-validation against the watched-literal
//! engine. No watched-literal index is built or maintained; each iteration rescans every clause.

use dpllsat_formula::CnfFormula;
use log::trace;

use crate::error::SolverError;
use crate::model::Model;
use crate::trail::Trail;

/// Decide satisfiability of `formula` without watched literals.
pub fn solve_naive(formula: &CnfFormula) -> Result<Option<Model>, SolverError> {
    let mut trail = Trail::new(formula.var_count());

    loop {
        if has_conflict(formula, &trail) {
            trace!("naive: conflict, backtracking");
            match trail.backtrack() {
                None => return Ok(None),
                Some(decided) => trail.push(!decided, false),
            }
            continue;
        }

        if let Some(unit) = has_unit_clause(formula, &trail) {
            trace!("naive: propagating unit {}", unit);
            trail.push(unit, false);
            continue;
        }

        match trail.first_undefined() {
            Some(l) => {
                trace!("naive: deciding {}", l);
                trail.push(l, true);
            }
            None => return Ok(Some(Model::from_trail(&trail)?)),
        }
    }
}

fn has_conflict(formula: &CnfFormula, trail: &Trail) -> bool {
    formula.iter().any(|clause| trail.is_clause_false(clause))
}

fn has_unit_clause(formula: &CnfFormula, trail: &Trail) -> Option<dpllsat_formula::Lit> {
    formula.iter().find_map(|clause| trail.is_clause_unit(clause))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpllsat_formula::cnf_formula;

    #[test]
    fn sat_instance() {
        let formula = cnf_formula![
            1, 2;
            -1, 3;
            -2, -3;
        ];
        let model = solve_naive(&formula).unwrap().expect("expected SAT");
        for clause in formula.iter() {
            assert!(clause.iter().any(|&l| model.lit_is_true(l)));
        }
    }

    #[test]
    fn unsat_instance() {
        let formula = cnf_formula![
            1;
            -1;
        ];
        assert!(solve_naive(&formula).unwrap().is_none());
    }

    #[test]
    fn unsat_pigeonhole() {
        let formula = dpllsat_formula::test::pigeonhole(3, 2);
        assert!(solve_naive(&formula).unwrap().is_none());
    }
}
