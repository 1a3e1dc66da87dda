//! Builds a colored symmetry graph directly from a CNF, for the common
//! case where the problem supplies no explicit `p edge` graph. Follows
//! the standard CNF-to-colored-graph construction used for symmetry
//! detection (§9.1): one vertex per CNF variable (the variable vertex,
//! exposed to the engine), a companion vertex per variable joined to it
//! by a "negation" edge, a clause vertex per clause linking to the
//! literal vertices it contains, and the two shared value vertices.
use crate::{
    graph::{Colour, Graph, VertexIndex},
    problem::Cnf,
};

const FALSE_COLOUR: Colour = 0;
const TRUE_COLOUR: Colour = 1;
const VARIABLE_COLOUR: Colour = 2;
const NEGATION_COLOUR: Colour = 3;
const CLAUSE_COLOUR: Colour = 4;

/// Builds G₀, V, R and their legends from a parsed CNF. Returns
/// `(graph, variables, variable_legends, values, value_legends)` in the
/// shape `parse_problem` needs.
pub fn companion_graph(
    cnf: &Cnf,
) -> (Graph, Vec<VertexIndex>, Vec<String>, Vec<VertexIndex>, Vec<String>) {
    let nv = cnf.num_variables;
    let nc = cnf.clauses.len();

    // Layout: [false, true, var_1..var_nv, neg_1..neg_nv, clause_1..clause_nc]
    let false_vertex: VertexIndex = 0;
    let true_vertex: VertexIndex = 1;
    let variable_vertex = |i: usize| (2 + i) as VertexIndex; // i in 0..nv
    let negation_vertex = |i: usize| (2 + nv + i) as VertexIndex;
    let clause_vertex = |j: usize| (2 + 2 * nv + j) as VertexIndex;

    let n = 2 + 2 * nv + nc;
    let mut graph = Graph::new_ordered(n);

    let mut colours = vec![0 as Colour; n];
    colours[false_vertex as usize] = FALSE_COLOUR;
    colours[true_vertex as usize] = TRUE_COLOUR;
    for i in 0..nv {
        colours[variable_vertex(i) as usize] = VARIABLE_COLOUR;
        colours[negation_vertex(i) as usize] = NEGATION_COLOUR;
    }
    for j in 0..nc {
        colours[clause_vertex(j) as usize] = CLAUSE_COLOUR;
    }
    graph
        .set_colours(&colours)
        .expect("colour vector matches graph size by construction");

    for i in 0..nv {
        graph
            .add_edge(variable_vertex(i), negation_vertex(i))
            .expect("vertex indices are in range by construction");
    }

    for (j, clause) in cnf.clauses.iter().enumerate() {
        let cv = clause_vertex(j);
        for &literal in clause {
            let i = (literal.unsigned_abs() as usize) - 1;
            let literal_vertex = if literal > 0 {
                variable_vertex(i)
            } else {
                negation_vertex(i)
            };
            graph
                .add_edge(cv, literal_vertex)
                .expect("vertex indices are in range by construction");
        }
    }

    let variables: Vec<VertexIndex> = (0..nv).map(variable_vertex).collect();
    let variable_legends: Vec<String> = (1..=nv).map(|i| i.to_string()).collect();
    let values = vec![false_vertex, true_vertex];
    let value_legends = vec!["false".to_string(), "true".to_string()];

    (graph, variables, variable_legends, values, value_legends)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn companion_graph_shapes_variables_and_values() {
        let cnf = Cnf {
            num_variables: 6,
            clauses: vec![vec![1, 2], vec![1, 3, 5], vec![2, 4, 6]],
        };

        let (graph, variables, variable_legends, values, value_legends) = companion_graph(&cnf);

        assert_eq!(graph.size(), 2 + 2 * 6 + 3);
        assert_eq!(variables.len(), 6);
        assert_eq!(variable_legends, (1..=6).map(|i| i.to_string()).collect::<Vec<_>>());
        assert_eq!(values, vec![0, 1]);
        assert_eq!(value_legends, vec!["false", "true"]);

        // Variable 1's negation vertex is joined by a negation edge.
        assert!(graph.lookup_edge(&variables[0], &8));
    }

    #[test]
    fn companion_graph_links_clause_to_its_literals() {
        let cnf = Cnf {
            num_variables: 2,
            clauses: vec![vec![1, -2]],
        };
        let (graph, variables, _, _, _) = companion_graph(&cnf);

        // Layout: false=0 true=1 var1=2 var2=3 neg1=4 neg2=5 clause0=6
        let clause_vertex = 6;
        assert!(graph.lookup_edge(&clause_vertex, &variables[0]));
        assert!(graph.lookup_edge(&clause_vertex, &5));
        assert!(!graph.lookup_edge(&clause_vertex, &variables[1]));
    }
}
