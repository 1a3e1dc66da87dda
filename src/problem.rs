//! The fully-loaded problem: base graph, variable/value vertex sets and
//! their legends, the optional source CNF, and whatever prefix was
//! supplied up front. Built by the `parser` module's `parse_problem`.
use crate::{
    graph::{Graph, VertexIndex},
    labeler,
    Error,
};

/// A parsed DIMACS-style CNF, kept around only so the output layer can
/// re-emit it with branching variables appended.
#[derive(Debug, Clone)]
pub struct Cnf {
    pub num_variables: usize,
    pub clauses: Vec<Vec<i64>>,
}

#[derive(Debug, Clone)]
pub struct ProblemInput {
    pub graph: Graph,
    /// V, ordered by declaration.
    pub variables: Vec<VertexIndex>,
    pub variable_legends: Vec<String>,
    /// R, ordered (in CNF mode: false at index 0, true at index 1).
    pub values: Vec<VertexIndex>,
    pub value_legends: Vec<String>,
    pub initial_prefix: Vec<VertexIndex>,
    pub cnf: Option<Cnf>,
    /// Whether G₀ came from an explicit `p edge` record rather than
    /// being derived from the CNF by the companion-graph construction.
    pub explicit_graph: bool,
}

impl ProblemInput {
    /// §3's level-0 invariants: V must be a union of Aut(G₀) orbits, and
    /// every value vertex must be a fixed point. Run once at load time,
    /// since the base graph is immutable from then on.
    pub fn validate(&mut self) -> Result<(), Error> {
        let result = labeler::analyze(&mut self.graph);
        let orbits = &result.orbits;

        let variable_set: std::collections::HashSet<VertexIndex> =
            self.variables.iter().copied().collect();
        for &v in &self.variables {
            let orbit_id = labeler::orbit_of(orbits, v);
            let orbit_is_covered = orbits
                .iter()
                .enumerate()
                .filter(|&(_, &o)| o == orbit_id)
                .all(|(u, _)| variable_set.contains(&(u as VertexIndex)));
            if !orbit_is_covered {
                return Err(Error::VariablesNotUnionOfOrbits);
            }
        }

        for &v in &self.values {
            let orbit_id = labeler::orbit_of(orbits, v);
            let orbit_size = orbits.iter().filter(|&&o| o == orbit_id).count();
            if orbit_size != 1 {
                return Err(Error::ValueVertexNotFixed(v));
            }
        }

        if self.cnf.is_some() && self.value_legends != ["false", "true"] {
            return Err(Error::ValueSetNotBoolean);
        }

        Ok(())
    }

    /// Checks the supplied initial prefix: distinct, in range, and no
    /// longer than the target length K.
    pub fn validate_prefix(&self, target_length: usize) -> Result<(), Error> {
        let n = self.graph.size() as VertexIndex;
        let mut seen = std::collections::HashSet::new();

        for &p in &self.initial_prefix {
            if p < 0 || p >= n {
                return Err(Error::PrefixVertexOutOfRange(p));
            }
            if !seen.insert(p) {
                return Err(Error::RepeatedPrefixVertex(p));
            }
        }

        if self.initial_prefix.len() > target_length {
            return Err(Error::PrefixExceedsTargetLength(
                self.initial_prefix.len(),
                target_length,
            ));
        }

        Ok(())
    }
}
