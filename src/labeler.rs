//! Thin wrapper around the `nauty` FFI binding realizing the canonical
//! labeler contract: canonical labeling, vertex orbits, a restartable
//! generator stream and a stabilizer-index sequence whose product is
//! the automorphism group order.
use itertools::Itertools;
use libffi::high::ClosureMut6;
use nauty_Traces_sys::{densenauty, optionblk, orbjoin, statsblk, TRUE};
use std::{os::raw::c_int, slice::from_raw_parts};

use crate::graph::{Graph, NautyGraph, VertexIndex};

pub type Generators = Vec<Vec<VertexIndex>>;
pub type Orbits = Vec<VertexIndex>;

/// Everything the labeler contract (canonical labeling, orbits,
/// generators, stabilizer indices) produces from a single `densenauty`
/// call on `G`.
#[derive(Debug, Clone)]
pub struct LabelerResult {
    /// λ: the canonical labeling, a bijection {0..n-1}→{0..n-1}.
    pub canonical_labeling: Vec<VertexIndex>,
    /// The Aut(G) orbit of each vertex, in `orbjoin` representative form.
    pub orbits: Orbits,
    /// A restartable, deterministic sequence of Aut(G) generators.
    pub generators: Generators,
    /// A sequence of positive integers whose product is |Aut(G)|.
    pub stabilizer_indices: Vec<u64>,
}

/// Runs `densenauty` with `getcanon` enabled and a `userautomproc`
/// callback, producing the full labeler result in one call.
pub fn analyze(graph: &mut Graph) -> LabelerResult {
    let mut nauty_graph = NautyGraph::from_graph(graph);
    let (n, m) = nauty_graph.graph_repr_sizes();

    let mut generators: Generators = Vec::new();
    let mut orbits = vec![0 as c_int; n];
    let mut stats = statsblk::default();

    {
        let mut userautomproc =
            |_count, generator_ptr: *mut c_int, _orbits, _numorbits, _stabvertex, n: c_int| {
                let generator_raw = unsafe { from_raw_parts(generator_ptr, n as usize) };
                generators.push(generator_raw.to_vec());
            };
        let userautomproc = ClosureMut6::new(&mut userautomproc);

        let mut options = optionblk::default();
        options.getcanon = TRUE;
        options.userautomproc = Some(*userautomproc.code_ptr());

        // Safety: FFI call into nauty. Buffers are sized n/m as required
        // by `densenauty`; `orbits` is filled in place, `vertex_order` is
        // overwritten in place with the canonical labeling (`getcanon`).
        unsafe {
            densenauty(
                nauty_graph.adjacency_matrix.as_mut_ptr(),
                nauty_graph.vertex_order.as_mut_ptr(),
                nauty_graph.partition.as_mut_ptr(),
                orbits.as_mut_ptr(),
                &mut options,
                &mut stats,
                m as c_int,
                n as c_int,
                std::ptr::null_mut(),
            );
        }
    }

    let stabilizer_indices = stabilizer_indices_from_stats(&stats);

    LabelerResult {
        canonical_labeling: nauty_graph.vertex_order,
        orbits,
        generators,
        stabilizer_indices,
    }
}

/// Expands nauty's mantissa/exponent encoding of |Aut(G)| (`grpsize1 *
/// 10^grpsize2`) into a multiplicand sequence whose product recovers the
/// same value, one factor per power of ten plus the mantissa itself.
fn stabilizer_indices_from_stats(stats: &statsblk) -> Vec<u64> {
    let mantissa = stats.grpsize1.round().max(1.0) as u64;
    let exponent = stats.grpsize2.max(0);

    let mut indices = Vec::with_capacity(exponent as usize + 1);
    indices.push(mantissa);
    indices.extend(std::iter::repeat(10u64).take(exponent as usize));
    indices
}

/// Combines a generator with the running orbit partition (`orbjoin`).
/// Does not mutate the generator; the `&mut` is required by the FFI
/// signature only.
pub fn apply_generator(generator: &mut [VertexIndex], orbits: &mut Orbits) {
    assert_eq!(generator.len(), orbits.len());

    // Safety: calls into nauty's `orbjoin`, which only reads `generator`.
    unsafe {
        orbjoin(
            orbits.as_mut_ptr(),
            generator.as_mut_ptr(),
            generator.len() as c_int,
        );
    }
}

pub fn empty_orbits(number_vertices: usize) -> Orbits {
    (0..number_vertices as VertexIndex).collect()
}

/// Folds a whole generator stream into a single orbit partition.
pub fn generate_orbits(generators: &Generators, number_vertices: usize) -> Orbits {
    let mut orbits = empty_orbits(number_vertices);

    for generator in generators {
        apply_generator(&mut generator.clone(), &mut orbits);
    }

    orbits
}

pub fn orbit_of(orbits: &Orbits, vertex: VertexIndex) -> VertexIndex {
    orbits[vertex as usize]
}

/// Number of distinct orbits and, for each, its representative and size.
pub fn orbit_sizes(orbits: &Orbits) -> Vec<(VertexIndex, usize)> {
    orbits
        .iter()
        .copied()
        .counts()
        .into_iter()
        .sorted_by_key(|(rep, _)| *rep)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::GraphError;

    #[test]
    fn analyze_complete_bipartite() -> Result<(), GraphError> {
        let mut graph = Graph::new_ordered(4);
        graph.set_colours(&[0, 0, 1, 1])?;
        graph.add_edge(0, 2)?;
        graph.add_edge(0, 3)?;
        graph.add_edge(1, 2)?;
        graph.add_edge(1, 3)?;

        let result = analyze(&mut graph);

        assert_eq!(result.orbits[0], result.orbits[1]);
        assert_eq!(result.orbits[2], result.orbits[3]);
        assert_ne!(result.orbits[0], result.orbits[2]);
        assert!(!result.generators.is_empty());

        let group_size: u64 = result.stabilizer_indices.iter().product();
        assert_eq!(4, group_size);
        Ok(())
    }

    #[test]
    fn apply_generator_joins_moved_points() {
        let mut orbits = empty_orbits(7);
        let mut generator = [0, 1, 4, 3, 2, 6, 5];

        apply_generator(&mut generator, &mut orbits);

        assert_eq!(orbits, [0, 1, 2, 3, 2, 5, 5]);
    }

    #[test]
    fn generate_orbits_folds_whole_stream() {
        let generators = vec![vec![5, 1, 2, 6, 4, 0, 3, 7], vec![0, 3, 2, 1, 4, 7, 6, 5]];
        let orbits = generate_orbits(&generators, 8);
        assert_eq!(orbits, vec![0, 1, 2, 1, 4, 0, 1, 0]);
    }
}
