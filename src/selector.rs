//! Picks the next prefix vertex given the current graph's automorphism
//! orbits, the variable vertex set and whatever vertices are already
//! used in the prefix.
use std::collections::HashSet;

use crate::{
    graph::VertexIndex,
    labeler::{Generators, Orbits},
    permutation::Permutation,
};

/// Implements the three-step rule of the orbit selector: prefer a vertex
/// flagged by the previous level's traversal indicator, else the lowest
/// vertex in the "best" orbit (longest, with a generator moving only part
/// of it), else the lowest unused variable vertex.
pub fn select_next_prefix_vertex(
    orbits: &Orbits,
    generators: &Generators,
    variables: &[VertexIndex],
    used: &HashSet<VertexIndex>,
    previous_indicator: Option<&[bool]>,
) -> Option<VertexIndex> {
    if let Some(indicator) = previous_indicator {
        if let Some(&v) = variables
            .iter()
            .find(|&&v| indicator[v as usize] && !used.contains(&v))
        {
            return Some(v);
        }
    }

    if let Some(v) = best_orbit_vertex(orbits, generators, variables, used) {
        return Some(v);
    }

    variables.iter().find(|&&v| !used.contains(&v)).copied()
}

fn orbit_length(orbits: &Orbits, orbit_id: VertexIndex) -> usize {
    orbits.iter().filter(|&&o| o == orbit_id).count()
}

/// A generator admits the orbit if it fixes one of the orbit's unused
/// variable vertices while moving another.
fn admits_generator(
    generators: &Generators,
    orbit_members: &[VertexIndex],
) -> bool {
    generators.iter().any(|generator| {
        let perm = Permutation::new(generator.clone());
        let has_fixed = orbit_members
            .iter()
            .any(|&v| perm._evaluate(&v) == Some(v));
        let has_moved = orbit_members
            .iter()
            .any(|&v| perm._evaluate(&v) != Some(v));
        has_fixed && has_moved
    })
}

fn best_orbit_vertex(
    orbits: &Orbits,
    generators: &Generators,
    variables: &[VertexIndex],
    used: &HashSet<VertexIndex>,
) -> Option<VertexIndex> {
    let mut seen_orbits = HashSet::new();
    let mut best: Option<(usize, VertexIndex, VertexIndex)> = None; // (length, orbit_id, lowest vertex)

    for &v in variables {
        if used.contains(&v) {
            continue;
        }
        let orbit_id = orbits[v as usize];
        if !seen_orbits.insert(orbit_id) {
            continue;
        }

        let orbit_members: Vec<VertexIndex> = variables
            .iter()
            .copied()
            .filter(|&w| !used.contains(&w) && orbits[w as usize] == orbit_id)
            .collect();

        if !admits_generator(generators, &orbit_members) {
            continue;
        }

        let length = orbit_length(orbits, orbit_id);
        let lowest = *orbit_members.iter().min().expect("orbit has at least v");

        match &best {
            Some((best_length, _, _)) if *best_length >= length => {}
            _ => best = Some((length, orbit_id, lowest)),
        }
    }

    best.map(|(_, _, lowest)| lowest)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn prefers_previous_level_indicator() {
        let orbits = vec![0, 0, 0, 0];
        let generators: Generators = vec![];
        let variables = vec![0, 1, 2, 3];
        let used = HashSet::new();
        let indicator = vec![false, true, false, false];

        let chosen =
            select_next_prefix_vertex(&orbits, &generators, &variables, &used, Some(&indicator));
        assert_eq!(chosen, Some(1));
    }

    #[test]
    fn falls_back_to_longest_admissible_orbit() {
        // orbit {0,1,2} admits a generator moving 1,2 but fixing 0; orbit {3} is a singleton.
        let orbits = vec![0, 0, 0, 3];
        let generators: Generators = vec![vec![0, 2, 1, 3]];
        let variables = vec![0, 1, 2, 3];
        let used = HashSet::new();

        let chosen = select_next_prefix_vertex(&orbits, &generators, &variables, &used, None);
        assert_eq!(chosen, Some(0));
    }

    #[test]
    fn falls_back_to_lowest_unused_variable() {
        let orbits = vec![0, 1, 2, 3];
        let generators: Generators = vec![];
        let variables = vec![0, 1, 2, 3];
        let mut used = HashSet::new();
        used.insert(0);

        let chosen = select_next_prefix_vertex(&orbits, &generators, &variables, &used, None);
        assert_eq!(chosen, Some(1));
    }
}
