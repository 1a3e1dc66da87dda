//! Owns the ordered prefix P = (p₀, …, p_{k-1}) of variable vertices and
//! the per-level structures (§3) the search engine reads back: the
//! traversal, its image set, the next-level orbit indicator and the
//! per-level emission counters.
use crate::{
    graph::{Graph, VertexIndex},
    labeler,
    transversal::{build_traversal, Traversal},
    Error,
};

/// Per-level state populated by [`PrefixManager::expand`].
#[derive(Debug, Clone)]
pub struct Level {
    pub prefix_vertex: VertexIndex,
    /// trav_ℓ: one permutation per element of the Aut(G_ℓ)-orbit of p_ℓ.
    pub traversal: Traversal,
    /// trav_ind_ℓ: the image set of the traversal.
    pub trav_ind: Vec<bool>,
    /// orbit_ℓ: same-orbit indicator computed over G_{ℓ+1}.
    pub orbit: Vec<bool>,
    /// seed_min_ℓ: filled in by the engine via `orbit_min`, once the
    /// relabeling ν for this level is known.
    pub seed_min: Vec<bool>,
    pub stat_gen: u64,
    pub stat_can: u64,
    pub stat_out: u64,
}

impl Level {
    fn new(prefix_vertex: VertexIndex, traversal: Traversal, trav_ind: Vec<bool>, orbit: Vec<bool>) -> Self {
        Level {
            prefix_vertex,
            traversal,
            trav_ind,
            orbit,
            seed_min: Vec::new(),
            stat_gen: 0,
            stat_can: 0,
            stat_out: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrefixManager {
    pub prefix: Vec<VertexIndex>,
    pub levels: Vec<Level>,
}

impl PrefixManager {
    pub fn new() -> Self {
        PrefixManager {
            prefix: Vec::new(),
            levels: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Implements §4.6 `expand_prefix`: appends `p` to the prefix, builds
    /// its traversal and trav_ind over `prev_graph` (G_ℓ), then returns
    /// G_{ℓ+1} (prev_graph with the edge (p, value_zero) added) so the
    /// caller can use it as the next `prev_graph` or as the seed for
    /// `seed_min`.
    pub fn expand(
        &mut self,
        p: VertexIndex,
        prev_graph: &Graph,
        value_zero: VertexIndex,
    ) -> Result<Graph, Error> {
        self.prefix.push(p);

        let mut traversal_graph = prev_graph.clone();
        let traversal = build_traversal(&mut traversal_graph, p)?;

        let n = prev_graph.size();
        let mut trav_ind = vec![false; n];
        for &element in &traversal.elements {
            trav_ind[element as usize] = true;
        }

        let mut next_graph = prev_graph.extended_with_edges(&[(p, value_zero)])?;
        let result = labeler::analyze(&mut next_graph);
        let p_orbit = labeler::orbit_of(&result.orbits, p);
        let orbit = result
            .orbits
            .iter()
            .map(|&o| o == p_orbit)
            .collect();

        self.levels.push(Level::new(p, traversal, trav_ind, orbit));

        Ok(next_graph)
    }

    pub fn level(&self, index: usize) -> &Level {
        &self.levels[index]
    }

    pub fn level_mut(&mut self, index: usize) -> &mut Level {
        &mut self.levels[index]
    }
}

impl Default for PrefixManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// The octahedron skeleton (vertices 0..7) plus an isolated, uniquely
    /// colored vertex 8 that stands in for the "false" value vertex — a
    /// singleton color class is always a fixed point of Aut(G).
    fn octahedron_with_value_vertex() -> Graph {
        let mut graph = Graph::new_ordered(9);
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(0, 3).unwrap();
        graph.add_edge(0, 4).unwrap();
        graph.add_edge(1, 2).unwrap();
        graph.add_edge(1, 5).unwrap();
        graph.add_edge(2, 3).unwrap();
        graph.add_edge(2, 6).unwrap();
        graph.add_edge(3, 7).unwrap();
        graph.add_edge(4, 5).unwrap();
        graph.add_edge(4, 7).unwrap();
        graph.add_edge(5, 6).unwrap();
        graph.add_edge(6, 7).unwrap();
        graph.set_colours(&[0, 0, 0, 0, 0, 0, 0, 0, 1]).unwrap();
        graph
    }

    #[test]
    fn expand_grows_prefix_and_builds_level() -> Result<(), Error> {
        let base = octahedron_with_value_vertex();
        let mut manager = PrefixManager::new();

        let next_graph = manager.expand(0, &base, 8)?;

        assert_eq!(manager.prefix, vec![0]);
        assert_eq!(manager.levels.len(), 1);
        assert_eq!(manager.level(0).traversal.elements[0], 0);
        assert!(next_graph.lookup_edge(&0, &8));
        assert_eq!(manager.level(0).orbit.len(), 9);
        assert!(manager.level(0).orbit[0]);
        Ok(())
    }
}
