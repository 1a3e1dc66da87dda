//! Scenario 5: an extremely high threshold makes the engine emit as
//! soon as a single-vertex assignment is canonical, rather than waiting
//! for the full target length.
use symprefix::{
    engine::SearchEngine,
    graph::{Colour, Graph},
    problem::ProblemInput,
};

fn four_vertex_path_problem() -> ProblemInput {
    let mut graph = Graph::new_ordered(6);
    graph.add_edge(0, 1).unwrap();
    graph.add_edge(1, 2).unwrap();
    graph.add_edge(2, 3).unwrap();
    graph.set_colours(&[2, 2, 2, 2, 0, 1] as &[Colour]).unwrap();

    ProblemInput {
        graph,
        variables: vec![0, 1, 2, 3],
        variable_legends: vec!["1".into(), "2".into(), "3".into(), "4".into()],
        values: vec![4, 5],
        value_legends: vec!["false".into(), "true".into()],
        initial_prefix: vec![],
        cnf: None,
        explicit_graph: true,
    }
}

#[test]
fn high_threshold_emits_first_vertex_immediately_with_both_values() {
    let problem = four_vertex_path_problem();
    let mut engine = SearchEngine::new(problem, 4, 1_000_000_000).unwrap();

    let first = engine.next_assignment().unwrap().expect("first emission");
    let second = engine.next_assignment().unwrap().expect("second emission");

    assert_eq!(first.size, 1);
    assert_eq!(second.size, 1);
    assert_eq!(first.vars, second.vars);
    assert_eq!(first.values[0], 4);
    assert_eq!(second.values[0], 5);
}
