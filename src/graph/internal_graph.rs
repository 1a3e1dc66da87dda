use custom_debug_derive::Debug;

use super::{Colour, GraphError, VertexIndex, DEFAULT_COLOR};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum GraphState {
    IndexOrdered,
    ColourGrouped,
    ColourGroupedOrdered,
    Chaos,
    Fixed,
}

/// Fixed size, vertex-colored undirected graph.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Graph {
    pub vertices: Vec<Vertex>,
    size: usize,
    edge_number: usize,
    #[debug(skip)]
    pub state: GraphState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub index: VertexIndex,
    pub edges_to: Vec<VertexIndex>,
    pub colour: Colour,
}

impl Graph {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn number_edges(&self) -> usize {
        self.edge_number
    }

    pub fn new_ordered(n: usize) -> Self {
        let mut vertices = Vec::with_capacity(n);
        for index in 0..n {
            vertices.push(Vertex::new(index as VertexIndex, DEFAULT_COLOR));
        }
        Graph {
            vertices,
            size: n,
            edge_number: 0,
            state: GraphState::IndexOrdered,
        }
    }

    /// Builds a graph on `colours.len()` vertices, colored as given.
    pub fn new_coloured(colours: &[Colour]) -> Self {
        let mut graph = Self::new_ordered(colours.len());
        // `set_colours` can't fail on a freshly ordered graph of matching size.
        graph.set_colours(colours).expect("size mismatch building coloured graph");
        graph
    }

    pub fn set_vertex(&mut self, new_vertex: Vertex) -> Result<(), GraphError> {
        use GraphState::*;
        let index = new_vertex.index;
        if self.state == IndexOrdered {
            *self
                .vertices
                .get_mut(index as usize)
                .ok_or(GraphError(index))? = new_vertex;
        } else {
            *self
                .vertices
                .iter_mut()
                .find(|vertex| vertex.index == index)
                .ok_or(GraphError(index))? = new_vertex;
            if self.state != Fixed {
                self.state = Chaos;
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn get_vertex(&mut self, index: VertexIndex) -> Result<&Vertex, GraphError> {
        match self.state {
            GraphState::IndexOrdered => self.vertices.get(index as usize).ok_or(GraphError(index)),
            _ => self
                .vertices
                .iter()
                .find(|vertex| vertex.index == index)
                .ok_or(GraphError(index)),
        }
    }

    fn get_vertex_mut(&mut self, index: VertexIndex) -> Result<&mut Vertex, GraphError> {
        match self.state {
            GraphState::IndexOrdered => self
                .vertices
                .get_mut(index as usize)
                .ok_or(GraphError(index)),
            _ => self
                .vertices
                .iter_mut()
                .find(|vertex| vertex.index == index)
                .ok_or(GraphError(index)),
        }
    }

    pub fn add_arc(&mut self, start: VertexIndex, end: VertexIndex) -> Result<(), GraphError> {
        self.get_vertex_mut(start)?.add_edge(end);
        self.edge_number += 1;
        Ok(())
    }

    pub fn add_edge(&mut self, start: VertexIndex, end: VertexIndex) -> Result<(), GraphError> {
        self.get_vertex_mut(start)?.add_edge(end);
        self.edge_number += 1;
        self.get_vertex_mut(end)?.add_edge(start);
        self.edge_number += 1;
        Ok(())
    }

    /// Clones this graph and adds the given edges to the clone, leaving
    /// `self` untouched. Used to build the per-level and per-candidate
    /// extended graphs (`G_l`, `H`) without mutating shared state.
    pub fn extended_with_edges(
        &self,
        edges: &[(VertexIndex, VertexIndex)],
    ) -> Result<Self, GraphError> {
        let mut extended = self.clone();
        for (start, end) in edges {
            extended.add_edge(*start, *end)?;
        }
        Ok(extended)
    }

    pub fn lookup_edge(&self, start: &VertexIndex, end: &VertexIndex) -> bool {
        let start = *start as usize;
        assert!(start < self.size);
        self.vertices[start].edges_to.iter().any(|edge| edge == end)
    }

    pub fn iterate_edges(&self) -> impl Iterator<Item = (VertexIndex, VertexIndex)> + '_ {
        self.vertices
            .iter()
            .flat_map(|vertex| vertex.edges_to.iter().map(move |end| (vertex.index, *end)))
    }

    /// Remove unneccessary edges.
    /// Does so by first sorting, thus trading runtime for reduced memory footprint.
    pub fn minimize(&mut self) {
        for vertex in self.vertices.iter_mut() {
            vertex.edges_to.sort_unstable();
            vertex.edges_to.dedup();
        }
    }

    pub fn colour_of(&self, index: VertexIndex) -> Option<Colour> {
        self.vertices
            .iter()
            .find(|vertex| vertex.index == index)
            .map(|vertex| vertex.colour)
    }

    pub fn set_colours(&mut self, colours: &[Colour]) -> Result<(), GraphError> {
        for (index, colour) in colours.iter().enumerate() {
            self.get_vertex_mut(index as VertexIndex)?.colour = *colour;
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn order(&mut self, order: &[VertexIndex]) -> Result<(), GraphError> {
        let mut ordered_vertices = Vec::with_capacity(self.vertices.len());
        for index in order {
            let vertex = self.get_vertex(*index)?;
            ordered_vertices.push(vertex.clone());
        }

        self.vertices = ordered_vertices;
        self.state = GraphState::Fixed;
        Ok(())
    }

    pub fn group_colours(&mut self) {
        use GraphState::*;
        match self.state {
            IndexOrdered => {
                self.vertices.sort_by(|a, b| a.colour.cmp(&b.colour));
                self.state = ColourGroupedOrdered;
            }
            Chaos => {
                self.vertices
                    .sort_unstable_by(|a, b| a.colour.cmp(&b.colour));
                self.state = ColourGrouped;
            }
            _ => (),
        }
    }

    pub fn sort(&mut self) {
        if self.state != GraphState::IndexOrdered {
            self.vertices.sort_unstable_by(|a, b| a.index.cmp(&b.index));
            self.state = GraphState::IndexOrdered;
        }
    }
}

impl Vertex {
    pub fn new(index: VertexIndex, colour: Colour) -> Self {
        Vertex {
            index,
            edges_to: Vec::new(),
            colour,
        }
    }

    pub fn add_edge(&mut self, end: VertexIndex) {
        self.edges_to.push(end);
    }
}
