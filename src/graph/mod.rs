//! Representation of vertex-colored undirected graphs as well as the
//! functionality to build them from simple building blocks or convert
//! them into a representation `nauty` understands.
use custom_debug_derive::Debug;
use std::os::raw::c_int;

mod internal_graph;
pub use internal_graph::{Graph, GraphState, Vertex};

mod nauty_graph;
pub use nauty_graph::NautyGraph;

pub type Colour = c_int;
pub type VertexIndex = c_int;

pub const DEFAULT_COLOR: Colour = c_int::MAX;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct GraphError(pub VertexIndex);
