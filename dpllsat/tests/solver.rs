use dpllsat::Solver;
use dpllsat_formula::test::{pigeonhole, sat_formula, sgen_unsat_formula};
use dpllsat_formula::{cnf_formula, lit};
use proptest::prelude::*;

fn solve(dimacs: &[u8]) -> Option<dpllsat::Model> {
    let mut solver = Solver::new();
    solver.add_dimacs_cnf(dimacs).expect("valid dimacs");
    solver.solve().expect("no invariant violation")
}

#[test]
fn s1_single_unit_clause_is_sat() {
    let model = solve(b"p cnf 1 1\n1 0\n").expect("expected SAT");
    assert!(model.lit_is_true(lit!(1)));
}

#[test]
fn s2_contradicting_units_are_unsat() {
    assert!(solve(b"p cnf 1 2\n1 0\n-1 0\n").is_none());
}

#[test]
fn s3_three_clause_formula_is_sat() {
    let formula = cnf_formula![
        1, 2;
        -1, 3;
        -2, -3;
    ];
    let mut solver = Solver::from_formula(&formula);
    let model = solver.solve().unwrap().expect("expected SAT");
    for clause in formula.iter() {
        assert!(clause.iter().any(|&l| model.lit_is_true(l)));
    }
}

#[test]
fn s4_xor_like_formula_is_unsat() {
    assert!(solve(b"p cnf 2 4\n1 2 0\n1 -2 0\n-1 2 0\n-1 -2 0\n").is_none());
}

#[test]
fn s5_partial_formula_with_free_choice_is_sat() {
    let model = solve(b"p cnf 4 3\n1 0\n-1 2 0\n-2 3 4 0\n").expect("expected SAT");
    assert!(model.lit_is_true(lit!(1)));
    assert!(model.lit_is_true(lit!(2)));
    assert!(model.lit_is_true(lit!(3)) || model.lit_is_true(lit!(4)));
}

#[test]
fn s6_pigeonhole_three_into_two_is_unsat() {
    let formula = pigeonhole(3, 2);
    let mut solver = Solver::from_formula(&formula);
    assert!(solver.solve().unwrap().is_none());
}

#[test]
fn search_and_naive_agree_on_pigeonhole_family() {
    for (pigeons, holes) in [(1, 1), (2, 1), (2, 2), (3, 2), (4, 3), (3, 4)] {
        let formula = pigeonhole(pigeons, holes);
        let mut solver = Solver::from_formula(&formula);
        let fast = solver.solve().unwrap();
        let naive = solver.solve_naive().unwrap();
        assert_eq!(
            fast.is_some(),
            naive.is_some(),
            "engines disagree for PHP({}->{})",
            pigeons,
            holes
        );
    }
}

proptest! {
    /// A model returned by the watched-literal engine satisfies every clause.
    #[test]
    fn sat_formulas_are_satisfied_by_their_model(
        formula in sat_formula(1..12usize, 0..40usize, 0.3..0.9, 0.0..1.0)
    ) {
        let mut solver = Solver::from_formula(&formula);
        let model = solver.solve().unwrap();
        if let Some(model) = model {
            for clause in formula.iter() {
                prop_assert!(clause.iter().any(|&l| model.lit_is_true(l)));
            }
        }
    }

    /// `sgen_unsat_formula` instances are always unsatisfiable, and both engines agree on that.
    #[test]
    fn sgen_instances_are_unsat_on_both_engines(formula in sgen_unsat_formula(1..6usize)) {
        let mut solver = Solver::from_formula(&formula);
        prop_assert!(solver.solve().unwrap().is_none());
        prop_assert!(solver.solve_naive().unwrap().is_none());
    }

    /// Re-solving the same formula always reaches the same verdict (determinism; this solver
    /// makes no random choices, so it must also reach bit-identical models).
    #[test]
    fn solving_is_deterministic(
        formula in sat_formula(1..10usize, 0..30usize, 0.3..0.9, 0.0..1.0)
    ) {
        let mut solver_a = Solver::from_formula(&formula);
        let mut solver_b = Solver::from_formula(&formula);
        prop_assert_eq!(solver_a.solve().unwrap(), solver_b.solve().unwrap());
    }

    /// The two search engines agree on satisfiability for arbitrary small formulas.
    #[test]
    fn engines_agree_on_satisfiability(
        formula in sat_formula(1..10usize, 0..30usize, 0.3..0.9, 0.0..1.0)
    ) {
        let mut solver = Solver::from_formula(&formula);
        let fast = solver.solve().unwrap();
        let naive = solver.solve_naive().unwrap();
        prop_assert_eq!(fast.is_some(), naive.is_some());
    }
}
