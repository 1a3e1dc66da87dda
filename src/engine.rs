//! The search engine: a pull-based iterator over canonical partial
//! assignments, driven by a LIFO work stack of frames (§3/§4.5).
use std::collections::HashSet;

use crate::{
    graph::{Graph, VertexIndex},
    labeler,
    orbit_min,
    prefix::PrefixManager,
    problem::ProblemInput,
    selector,
    Error,
};

const GROUP_ORDER_CAP: u64 = (1u64 << 31) - 1;

/// A LIFO work stack frame at level ℓ: `vars`/`vals` both have length
/// ℓ+1.
#[derive(Debug, Clone)]
struct Frame {
    vars: Vec<VertexIndex>,
    vals: Vec<usize>,
}

/// One normalized, canonical partial assignment together with the
/// truncated |Aut(H)| that justified its emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub size: usize,
    pub vars: Vec<VertexIndex>,
    pub values: Vec<VertexIndex>,
    pub aut: u64,
}

pub struct SearchEngine {
    base_graph: Graph,
    variables: Vec<VertexIndex>,
    values: Vec<VertexIndex>,
    target_length: usize,
    threshold: u64,
    prefix: PrefixManager,
    last_prefix_graph: Graph,
    stack: Vec<Frame>,
    initialized: bool,
}

impl SearchEngine {
    pub fn new(problem: ProblemInput, target_length: usize, threshold: u64) -> Result<Self, Error> {
        problem.validate_prefix(target_length)?;

        let base_graph = problem.graph;
        let mut engine = SearchEngine {
            last_prefix_graph: base_graph.clone(),
            base_graph,
            variables: problem.variables,
            values: problem.values,
            target_length,
            threshold,
            prefix: PrefixManager::new(),
            stack: Vec::new(),
            initialized: false,
        };

        for p in problem.initial_prefix {
            let next_graph = engine
                .prefix
                .expand(p, &engine.last_prefix_graph, engine.values[0])?;
            engine.last_prefix_graph = next_graph;
        }

        Ok(engine)
    }

    fn graph_before_level(&self, level: usize) -> Result<Graph, Error> {
        let mut graph = self.base_graph.clone();
        for i in 0..level {
            graph = graph.extended_with_edges(&[(self.prefix.prefix[i], self.values[0])])?;
        }
        Ok(graph)
    }

    /// §4.5 "Initialization at first call". Picks p₀ via the selector
    /// when no prefix was preloaded, then seeds the stack with a single
    /// frame of size 1 at level 0. Levels beyond 0 — whether preloaded
    /// from an initial prefix or chosen dynamically — only get a frame
    /// entry once the search actually reaches them, via `expand_and_push`.
    fn initialize(&mut self) -> Result<(), Error> {
        if self.prefix.is_empty() {
            let mut g0 = self.base_graph.clone();
            let analyzed = labeler::analyze(&mut g0);
            let used = HashSet::new();
            let p0 = selector::select_next_prefix_vertex(
                &analyzed.orbits,
                &analyzed.generators,
                &self.variables,
                &used,
                None,
            )
            .ok_or(Error::NoMoreVariables)?;

            let next_graph = self.prefix.expand(p0, &self.base_graph, self.values[0])?;
            self.last_prefix_graph = next_graph;
        }

        if self.prefix.level(0).seed_min.is_empty() {
            let mut graph_before = self.graph_before_level(0)?;
            let seed_min = orbit_min::orbit_min(&mut graph_before, None);
            self.prefix.level_mut(0).seed_min = seed_min;
        }

        let level0 = self.prefix.level(0);
        let initial_var = level0
            .trav_ind
            .iter()
            .enumerate()
            .filter(|&(v, &hit)| hit && level0.seed_min[v])
            .map(|(v, _)| v as VertexIndex)
            .min()
            .expect("level 0's traversal image must contain a seed-min vertex");

        self.stack.push(Frame {
            vars: vec![initial_var],
            vals: vec![0],
        });
        self.initialized = true;
        Ok(())
    }

    /// Per-level generated/canonical/emitted counters and the prefix
    /// vertex chosen at each level so far, for `--verbose` diagnostics.
    pub fn level_statistics(&self) -> &[crate::prefix::Level] {
        &self.prefix.levels
    }

    pub fn next_assignment(&mut self) -> Result<Option<Emission>, Error> {
        if !self.initialized {
            self.initialize()?;
        }

        loop {
            let frame = match self.stack.pop() {
                Some(frame) => frame,
                None => return Ok(None),
            };

            let l = frame.vars.len() - 1;
            let j = self
                .prefix
                .level(l)
                .traversal
                .index_of(frame.vars[l])
                .expect("vars[l] must be an element of level l's traversal image");
            let cv = frame.vals[l];
            let r = self.values.len();

            if cv < r {
                if let Some(emission) = self.advance_value(frame, l, j, cv)? {
                    return Ok(Some(emission));
                }
            } else {
                self.advance_variable(frame, l);
            }
        }
    }

    /// Case A: `cv < r`. Builds the extended graph for the candidate
    /// value, isomorph-rejects it against the parent, and either emits,
    /// expands, or discards it.
    fn advance_value(
        &mut self,
        frame: Frame,
        l: usize,
        j: usize,
        cv: usize,
    ) -> Result<Option<Emission>, Error> {
        let mut next_frame = frame.clone();
        next_frame.vals[l] += 1;
        self.stack.push(next_frame);

        let tau_j = self.prefix.level(l).traversal.permutations[j].clone();
        let nu = tau_j.invert();

        let mut edges = Vec::with_capacity(l + 1);
        for i in 0..l {
            edges.push((frame.vars[i], self.values[frame.vals[i]]));
        }
        edges.push((frame.vars[l], self.values[cv]));
        let mut h = self.base_graph.extended_with_edges(&edges)?;

        let labeled = labeler::analyze(&mut h);

        let mut q = None;
        for &lt in &labeled.canonical_labeling {
            let image = nu._evaluate(&lt).unwrap_or(lt);
            if self.prefix.level(l).orbit[image as usize] {
                q = Some(lt);
                break;
            }
        }
        let q = q.ok_or(Error::InconsistentCanonicalLabeling(frame.vars[l]))?;

        self.prefix.level_mut(l).stat_gen += 1;

        let same_orbit = labeled.orbits[frame.vars[l] as usize] == labeled.orbits[q as usize];
        if !same_orbit {
            return Ok(None);
        }
        self.prefix.level_mut(l).stat_can += 1;

        let mut nvars = Vec::with_capacity(l + 1);
        let mut nvals = Vec::with_capacity(l + 1);
        for i in 0..l {
            nvars.push(nu._evaluate(&frame.vars[i]).unwrap_or(frame.vars[i]));
            nvals.push(frame.vals[i]);
        }
        nvars.push(nu._evaluate(&frame.vars[l]).unwrap_or(frame.vars[l]));
        nvals.push(cv);

        let size = l + 1;
        let aut = saturating_group_order(&labeled.stabilizer_indices);

        if size == self.target_length || aut <= self.threshold {
            let value_vertices: Vec<VertexIndex> =
                nvals.iter().map(|&vi| self.values[vi]).collect();
            self.prefix.level_mut(l).stat_out += 1;
            return Ok(Some(Emission {
                size,
                vars: nvars,
                values: value_vertices,
                aut,
            }));
        }

        self.expand_and_push(l, h, &nu, nvars, nvals)?;
        Ok(None)
    }

    /// Adopts a new prefix element if needed, then pushes a frame of size
    /// `l+2` extending the accepted candidate one level deeper. §4.5 step e
    /// requires `seed_min_{l+1}` to be recomputed from this candidate's own
    /// ν for every accepted parent, so that happens unconditionally here —
    /// whether level `l+1` is brand new or an already-established
    /// (possibly preloaded) level being re-entered from a different parent.
    fn expand_and_push(
        &mut self,
        l: usize,
        mut h: Graph,
        nu: &crate::permutation::Permutation<VertexIndex>,
        mut nvars: Vec<VertexIndex>,
        mut nvals: Vec<usize>,
    ) -> Result<(), Error> {
        if l + 1 >= self.prefix.len() {
            let trav_ind = self.prefix.level(l).trav_ind.clone();
            let mut gk = self.last_prefix_graph.clone();
            let analyzed = labeler::analyze(&mut gk);
            let used: HashSet<VertexIndex> = self.prefix.prefix.iter().copied().collect();

            let p_next = selector::select_next_prefix_vertex(
                &analyzed.orbits,
                &analyzed.generators,
                &self.variables,
                &used,
                Some(&trav_ind),
            )
            .ok_or(Error::NoMoreVariables)?;

            let next_graph = self
                .prefix
                .expand(p_next, &self.last_prefix_graph, self.values[0])?;
            self.last_prefix_graph = next_graph;
        }

        let seed_min = orbit_min::orbit_min(&mut h, Some(nu));
        self.prefix.level_mut(l + 1).seed_min = seed_min;

        let next_level = self.prefix.level(l + 1);
        let initial_var = next_level
            .trav_ind
            .iter()
            .enumerate()
            .filter(|&(v, &hit)| hit && next_level.seed_min[v])
            .map(|(v, _)| v as VertexIndex)
            .min()
            .expect("new level's traversal image must contain a seed-min vertex");

        nvars.push(initial_var);
        nvals.push(0);
        self.stack.push(Frame {
            vars: nvars,
            vals: nvals,
        });

        Ok(())
    }

    /// Case B: `cv >= r`. Scans forward through the remaining traversal
    /// positions at level `l` for the next seed-min candidate.
    fn advance_variable(&mut self, frame: Frame, l: usize) {
        let level = self.prefix.level(l);
        let j = level
            .traversal
            .index_of(frame.vars[l])
            .expect("vars[l] must be an element of level l's traversal image");

        let found = ((j + 1)..level.traversal.size())
            .map(|jj| level.traversal.elements[jj])
            .find(|&candidate| level.seed_min[candidate as usize]);

        if let Some(candidate) = found {
            let mut next_frame = frame;
            next_frame.vars[l] = candidate;
            next_frame.vals[l] = 0;
            self.stack.push(next_frame);
        }
    }
}

/// §4.5 step e: `min(|Aut(H)|, 2^31 - 1)`, computed by a lazy saturating
/// product over the stabilizer-index sequence so a huge automorphism
/// group never overflows.
fn saturating_group_order(stabilizer_indices: &[u64]) -> u64 {
    let mut product: u64 = 1;
    for &index in stabilizer_indices {
        product = product.saturating_mul(index);
        if product >= GROUP_ORDER_CAP {
            return GROUP_ORDER_CAP;
        }
    }
    product
}
