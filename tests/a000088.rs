//! Scenario 2/4: the "A000088 companion graph" — an incidence graph
//! between n labeled points and the pairs of those points, whose
//! automorphism group is exactly S_n acting on the pairs. Assigning a
//! present/absent value to every pair and isomorph-rejecting under that
//! S_n action enumerates unlabeled simple graphs on n vertices, so the
//! emission count is OEIS A000088(n). Distinct from `parser::companion_graph`,
//! which builds a CNF's symmetry graph — this helper never touches a CNF.
use symprefix::{
    engine::SearchEngine,
    graph::{Colour, Graph, VertexIndex},
    problem::ProblemInput,
};

const POINT_COLOUR: Colour = 2;
const PAIR_COLOUR: Colour = 3;

fn a000088_problem(n: usize) -> ProblemInput {
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();
    let num_pairs = pairs.len();

    let false_vertex: VertexIndex = 0;
    let true_vertex: VertexIndex = 1;
    let point_vertex = |i: usize| (2 + i) as VertexIndex;
    let pair_vertex = |k: usize| (2 + n + k) as VertexIndex;

    let total = 2 + n + num_pairs;
    let mut graph = Graph::new_ordered(total);

    let mut colours = vec![0 as Colour; total];
    colours[false_vertex as usize] = 0;
    colours[true_vertex as usize] = 1;
    for i in 0..n {
        colours[point_vertex(i) as usize] = POINT_COLOUR;
    }
    for k in 0..num_pairs {
        colours[pair_vertex(k) as usize] = PAIR_COLOUR;
    }
    graph.set_colours(&colours).unwrap();

    for (k, &(i, j)) in pairs.iter().enumerate() {
        graph.add_edge(pair_vertex(k), point_vertex(i)).unwrap();
        graph.add_edge(pair_vertex(k), point_vertex(j)).unwrap();
    }

    let variables: Vec<VertexIndex> = (0..num_pairs).map(pair_vertex).collect();
    let variable_legends: Vec<String> = pairs
        .iter()
        .map(|&(i, j)| format!("{{{},{}}}", i + 1, j + 1))
        .collect();
    let values = vec![false_vertex, true_vertex];
    let value_legends = vec!["false".to_string(), "true".to_string()];
    let initial_prefix = variables.clone();

    ProblemInput {
        graph,
        variables,
        variable_legends,
        values,
        value_legends,
        initial_prefix,
        cnf: None,
        explicit_graph: true,
    }
}

fn count_emissions(problem: ProblemInput) -> usize {
    let k = problem.initial_prefix.len();
    let mut engine = SearchEngine::new(problem, k, 0).unwrap();
    let mut count = 0;
    while engine.next_assignment().unwrap().is_some() {
        count += 1;
    }
    count
}

/// Smaller, fast instance of the same family: A000088(3) = 4.
#[test]
fn a000088_n3_counts_four_unlabeled_graphs() {
    assert_eq!(count_emissions(a000088_problem(3)), 4);
}

/// Scenario 2, literal: A000088(4) = 11.
#[test]
fn a000088_n4_counts_eleven_unlabeled_graphs() {
    assert_eq!(count_emissions(a000088_problem(4)), 11);
}

/// Scenario 4, literal: A000088(5) = 34.
#[test]
fn a000088_n5_counts_thirty_four_unlabeled_graphs() {
    assert_eq!(count_emissions(a000088_problem(5)), 34);
}
