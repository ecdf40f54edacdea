//! Core DPLL-with-two-watched-literals SAT solver.
//!
//! [`Solver`] is the entry point: build one from a [`CnfFormula`] or a DIMACS CNF stream, then
//! call [`Solver::solve`]. [`Solver::solve_naive`] runs the same formula through a linear-scan
//! reference engine with no watch index, for cross-validation.

pub mod error;
pub mod model;
mod naive;
mod search;
pub mod trail;
pub mod watch;

use std::io;

use dpllsat_formula::CnfFormula;

pub use error::SolverError;
pub use model::Model;

/// A SAT solver instance holding one formula.
pub struct Solver {
    formula: CnfFormula,
}

impl Solver {
    /// An empty solver, trivially satisfiable until clauses are added.
    pub fn new() -> Solver {
        Solver {
            formula: CnfFormula::new(),
        }
    }

    /// Clone `formula` into a new solver.
    pub fn from_formula(formula: &CnfFormula) -> Solver {
        Solver {
            formula: formula.clone(),
        }
    }

    /// Parse `input` as DIMACS CNF and add its clauses to this solver's formula.
    pub fn add_dimacs_cnf(&mut self, input: impl io::Read) -> Result<(), anyhow::Error> {
        let parsed = dpllsat_dimacs::parse_dimacs(input)?;
        for clause in parsed.iter() {
            self.formula.add_clause(clause.iter().copied());
        }
        self.formula.set_var_count(parsed.var_count());
        Ok(())
    }

    /// The formula this solver will decide.
    pub fn formula(&self) -> &CnfFormula {
        &self.formula
    }

    /// Decide satisfiability with the watched-literal search engine.
    pub fn solve(&mut self) -> Result<Option<Model>, SolverError> {
        search::solve(&self.formula)
    }

    /// Decide satisfiability with the naive (non-watched) search engine.
    ///
    /// Exists for cross-validation against [`Solver::solve`]; intended for tests, not production
    /// use, since it rescans every clause on every step.
    pub fn solve_naive(&mut self) -> Result<Option<Model>, SolverError> {
        naive::solve_naive(&self.formula)
    }
}

impl Default for Solver {
    fn default() -> Solver {
        Solver::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpllsat_formula::cnf_formula;

    #[test]
    fn add_dimacs_cnf_extends_formula() {
        let mut solver = Solver::new();
        solver
            .add_dimacs_cnf(b"p cnf 2 2\n1 2 0\n-1 -2 0\n" as &[_])
            .expect("valid dimacs");

        let model = solver.solve().unwrap().expect("expected SAT");
        assert!(model.lit_is_true(dpllsat_formula::lit!(1)) != model.lit_is_true(dpllsat_formula::lit!(2)));
    }

    #[test]
    fn engines_agree_on_pigeonhole() {
        let formula = dpllsat_formula::test::pigeonhole(4, 3);
        let mut solver = Solver::from_formula(&formula);
        assert!(solver.solve().unwrap().is_none());
        assert!(solver.solve_naive().unwrap().is_none());
    }

    #[test]
    fn engines_agree_on_satisfiable_formula() {
        let formula = cnf_formula![
            1, 2, 3;
            -1, -2;
            -2, -3;
            -1, -3;
        ];
        let mut solver = Solver::from_formula(&formula);
        let fast = solver.solve().unwrap();
        let naive = solver.solve_naive().unwrap();
        assert_eq!(fast.is_some(), naive.is_some());
    }
}
