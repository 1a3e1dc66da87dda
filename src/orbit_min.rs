//! Orbit-minimum indicator: for each vertex, whether it is the
//! smallest-indexed element of its Aut(G) orbit, optionally relabeled
//! through a bijection ν.
use crate::{
    graph::{Graph, VertexIndex},
    labeler::{self, Orbits},
    permutation::Permutation,
};

/// Computes, for each image ν(u), whether `u` is the minimum-indexed
/// element of its Aut(G) orbit under ordinary integer ordering. Exactly
/// one bit is set per orbit.
pub fn orbit_min(graph: &mut Graph, nu: Option<&Permutation<VertexIndex>>) -> Vec<bool> {
    let result = labeler::analyze(graph);
    orbit_min_from_orbits(&result.orbits, nu)
}

fn orbit_min_from_orbits(orbits: &Orbits, nu: Option<&Permutation<VertexIndex>>) -> Vec<bool> {
    let n = orbits.len();
    let mut min_of_orbit = vec![VertexIndex::MAX; n];

    for (vertex, &orbit) in orbits.iter().enumerate() {
        let vertex = vertex as VertexIndex;
        let slot = &mut min_of_orbit[orbit as usize];
        if vertex < *slot {
            *slot = vertex;
        }
    }

    let mut indicator = vec![false; n];
    for (vertex, &orbit) in orbits.iter().enumerate() {
        let vertex = vertex as VertexIndex;
        if vertex == min_of_orbit[orbit as usize] {
            let image = match nu {
                Some(nu) => nu._evaluate(&vertex).unwrap_or(vertex),
                None => vertex,
            };
            indicator[image as usize] = true;
        }
    }

    indicator
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn one_bit_per_orbit_identity() {
        let orbits = vec![0, 0, 2, 0, 4, 0, 0, 0];
        let indicator = orbit_min_from_orbits(&orbits, None);
        assert_eq!(indicator, vec![true, false, true, false, true, false, false, false]);
        assert_eq!(indicator.iter().filter(|&&b| b).count(), 3);
    }

    #[test]
    fn relabels_through_nu() {
        let orbits = vec![0, 0, 2, 0];
        // nu swaps 0 and 3.
        let nu = Permutation::new(vec![3, 1, 2, 0]);
        let indicator = orbit_min_from_orbits(&orbits, Some(&nu));
        // orbit-min of orbit 0 is vertex 0, which nu maps to 3.
        assert_eq!(indicator, vec![false, false, true, true]);
    }
}
