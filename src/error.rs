//! Crate-wide error type and `From` conversions.

use std::io;

use crate::graph::GraphError;
use crate::parser::ParseError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("graph initialization error: {0:?}")]
    GraphError(GraphError),
    #[error("error while parsing input: {0:?}")]
    ParseError(Vec<nom::error::VerboseErrorKind>),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("variable vertex set is not a union of automorphism orbits")]
    VariablesNotUnionOfOrbits,
    #[error("value vertex {0} is not a fixed point of the base graph's automorphism group")]
    ValueVertexNotFixed(crate::graph::VertexIndex),
    #[error("value set must contain the legends \"false\" and \"true\" in CNF mode")]
    ValueSetNotBoolean,
    #[error("prefix vertex {0} is repeated")]
    RepeatedPrefixVertex(crate::graph::VertexIndex),
    #[error("prefix vertex {0} is out of range")]
    PrefixVertexOutOfRange(crate::graph::VertexIndex),
    #[error("prefix length {0} exceeds target length {1}")]
    PrefixExceedsTargetLength(usize, usize),
    #[error("CNF literal {0} is out of range for {1} variables")]
    LiteralOutOfRange(i64, usize),
    #[error("labeler contract violated: traversal did not cover the whole orbit of root {0}")]
    IncompleteTraversal(crate::graph::VertexIndex),
    #[error("labeler contract violated: canonical labeling did not place vertex {0} in the expected orbit")]
    InconsistentCanonicalLabeling(crate::graph::VertexIndex),
    #[error("orbit selector exhausted the variable vertex set before reaching the target length")]
    NoMoreVariables,
}

impl From<GraphError> for Error {
    fn from(ge: GraphError) -> Self {
        Self::GraphError(ge)
    }
}

impl<'a> From<nom::Err<ParseError<'a>>> for Error {
    fn from(pe: nom::Err<ParseError<'a>>) -> Self {
        match pe {
            nom::Err::Error(verbose) | nom::Err::Failure(verbose) => {
                Self::ParseError(verbose.errors.into_iter().map(|(_, kind)| kind).collect())
            }
            nom::Err::Incomplete(_) => unreachable!(),
        }
    }
}
