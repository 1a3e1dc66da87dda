//! Scenarios 3 and 6: a six-variable CNF whose companion graph carries
//! a symmetry swapping the clause blocks `(1,3,5)` and `(2,4,6)`, so the
//! three non-isomorphic truth assignments to the pair (variable 3,
//! variable 4) are (F,F), (F,T), (T,T) — (T,F) is identified with (F,T)
//! by that symmetry.
use symprefix::{
    engine::SearchEngine,
    output,
    parser::companion_graph,
    problem::{Cnf, ProblemInput},
};

fn six_variable_cnf() -> Cnf {
    Cnf {
        num_variables: 6,
        clauses: vec![vec![1, 2], vec![1, 3, 5], vec![2, 4, 6]],
    }
}

fn problem_with_prefix_three_four() -> ProblemInput {
    let cnf = six_variable_cnf();
    let (graph, variables, variable_legends, values, value_legends) = companion_graph(&cnf);
    let var3 = variables[2];
    let var4 = variables[3];

    ProblemInput {
        graph,
        variables,
        variable_legends,
        values,
        value_legends,
        initial_prefix: vec![var3, var4],
        cnf: Some(cnf),
        explicit_graph: false,
    }
}

#[test]
fn six_variable_cnf_yields_three_truth_assignment_orbits() {
    let problem = problem_with_prefix_three_four();
    let mut engine = SearchEngine::new(problem, 2, 0).unwrap();

    let mut count = 0;
    while engine.next_assignment().unwrap().is_some() {
        count += 1;
    }
    assert_eq!(count, 3);
}

#[test]
fn scenario_three_output_is_deterministic_across_runs() {
    fn run_once() -> Vec<u8> {
        let problem = problem_with_prefix_three_four();
        let mut engine = SearchEngine::new(problem.clone(), 2, 0).unwrap();

        let mut emissions = Vec::new();
        while let Some(emission) = engine.next_assignment().unwrap() {
            emissions.push(emission);
        }

        let mut out = Vec::new();
        output::write_textual(&problem, emissions.into_iter(), &mut out).unwrap();
        out
    }

    assert_eq!(run_once(), run_once());
}
