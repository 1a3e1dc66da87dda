//! Builds, for a chosen root vertex, a permutation of Aut(G) mapping the
//! root to every other element of its orbit — the traversal table that
//! lets the engine lift any orbit element into the canonical prefix
//! position.
use std::collections::HashMap;

use crate::{
    graph::{Graph, VertexIndex},
    labeler::{self, Generators, Orbits},
    permutation::Permutation,
    Error,
};

/// `s` orbit elements together with a permutation mapping `root` to each
/// one, indexed in the same deterministic order as `elements`.
#[derive(Debug, Clone)]
pub struct Traversal {
    pub elements: Vec<VertexIndex>,
    pub permutations: Vec<Permutation<VertexIndex>>,
}

impl Traversal {
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    /// Index of `element` within this traversal's deterministic order, if
    /// it belongs to the orbit.
    pub fn index_of(&self, element: VertexIndex) -> Option<usize> {
        self.elements.iter().position(|&e| e == element)
    }

    pub fn permutation_for(&self, element: VertexIndex) -> Option<&Permutation<VertexIndex>> {
        self.index_of(element).map(|i| &self.permutations[i])
    }
}

/// Deterministic order of an orbit: the root first, then the remaining
/// members in ascending vertex order.
fn ordered_orbit(orbits: &Orbits, root: VertexIndex) -> Vec<VertexIndex> {
    let root_orbit = labeler::orbit_of(orbits, root);
    let mut members: Vec<VertexIndex> = orbits
        .iter()
        .enumerate()
        .filter(|(_, &orbit)| orbit == root_orbit)
        .map(|(v, _)| v as VertexIndex)
        .collect();
    members.sort_unstable();

    let mut ordered = Vec::with_capacity(members.len());
    ordered.push(root);
    ordered.extend(members.into_iter().filter(|&v| v != root));
    ordered
}

/// Builds the traversal for `root`'s orbit in `graph`, per the §4.2
/// contract: every permutation is a product of Aut(G) generators, and the
/// one for `root` itself is the identity.
pub fn build_traversal(graph: &mut Graph, root: VertexIndex) -> Result<Traversal, Error> {
    let n = graph.size();
    let result = labeler::analyze(graph);
    let generators: Generators = result.generators;

    let elements = ordered_orbit(&result.orbits, root);
    let perms: Vec<Permutation<VertexIndex>> = generators
        .into_iter()
        .map(Permutation::new)
        .collect();

    let mut done: HashMap<VertexIndex, Permutation<VertexIndex>> = HashMap::new();
    done.insert(root, Permutation::identity(n));

    while done.len() < elements.len() {
        let mut progressed = false;
        let snapshot: Vec<(VertexIndex, Permutation<VertexIndex>)> =
            done.iter().map(|(v, p)| (*v, p.clone())).collect();

        for generator in &perms {
            for (u, tau_u) in &snapshot {
                let v = generator._evaluate(u).expect("generator must be total");
                if !done.contains_key(&v) {
                    let tau_v = Permutation::_compose(generator, tau_u)
                        .expect("generator/traversal size mismatch");
                    done.insert(v, tau_v);
                    progressed = true;
                }
            }
        }

        if !progressed {
            return Err(Error::IncompleteTraversal(root));
        }
    }

    let permutations = elements
        .iter()
        .map(|v| done.remove(v).expect("orbit element must be covered by traversal"))
        .collect();

    let traversal = Traversal {
        elements,
        permutations,
    };

    debug_assert!(
        traversal
            .permutations
            .iter()
            .zip(traversal.elements.iter())
            .all(|(tau, &element)| tau._evaluate(&root) == Some(element)),
        "traversal permutation must map root to its designated element"
    );

    Ok(traversal)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::GraphError;

    #[test]
    fn build_traversal_covers_whole_orbit() -> Result<(), Error> {
        let mut graph = Graph::new_ordered(8);
        graph.add_edge(0, 1)?;
        graph.add_edge(0, 3)?;
        graph.add_edge(0, 4)?;
        graph.add_edge(1, 2)?;
        graph.add_edge(1, 5)?;
        graph.add_edge(2, 3)?;
        graph.add_edge(2, 6)?;
        graph.add_edge(3, 7)?;
        graph.add_edge(4, 5)?;
        graph.add_edge(4, 7)?;
        graph.add_edge(5, 6)?;
        graph.add_edge(6, 7)?;

        let traversal = build_traversal(&mut graph, 0)?;

        assert_eq!(traversal.elements[0], 0);
        assert_eq!(traversal.permutations[0], Permutation::identity(8));
        assert_eq!(traversal.size(), 8);

        for (element, tau) in traversal.elements.iter().zip(traversal.permutations.iter()) {
            assert_eq!(tau._evaluate(&0), Some(*element));
        }

        Ok(())
    }

    #[test]
    fn ordered_orbit_puts_root_first() -> Result<(), GraphError> {
        let orbits = vec![0, 0, 0, 3];
        let ordered = ordered_orbit(&orbits, 2);
        assert_eq!(ordered, vec![2, 0, 1]);
        Ok(())
    }
}
