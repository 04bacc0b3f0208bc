//! Typed errors for the measure engine.
//!
//! Every failure is a programming or input error raised before (or instead
//! of) a result; nothing here is transient, so nothing is retried.

use thiserror::Error;

/// Broad category of a [`MeasureError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad parameters or an input graph the operation cannot work on.
    Configuration,
    /// Lookup of a vertex that is not part of the graph.
    UnknownVertex,
    /// A numeric edge case hit under a policy that refuses it.
    NumericDegeneracy,
}

/// Errors returned by the graph measures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    #[error("key player set size {k} must be smaller than the vertex count {vertex_count}")]
    KeySetTooLarge { k: usize, vertex_count: usize },

    #[error("key player set size must be at least 1")]
    EmptyKeySet,

    #[error("graph has no edges")]
    NoEdges,

    #[error("vertex {vertex} appears in more than one cluster")]
    OverlappingPartition { vertex: String },

    #[error("edge {from} -> {to} has non-positive weight {weight}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    #[error("unknown vertex: {vertex}")]
    UnknownVertex { vertex: String },

    #[error("common neighbor {vertex} has degree 1 (ln(1) = 0)")]
    DegenerateCommonNeighbor { vertex: String },
}

impl MeasureError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::KeySetTooLarge { .. }
            | Self::EmptyKeySet
            | Self::NoEdges
            | Self::OverlappingPartition { .. }
            | Self::InvalidWeight { .. } => ErrorKind::Configuration,
            Self::UnknownVertex { .. } => ErrorKind::UnknownVertex,
            Self::DegenerateCommonNeighbor { .. } => ErrorKind::NumericDegeneracy,
        }
    }

    pub(crate) fn unknown_vertex<V: std::fmt::Debug>(vertex: &V) -> Self {
        Self::UnknownVertex {
            vertex: format!("{:?}", vertex),
        }
    }
}

pub type Result<T> = std::result::Result<T, MeasureError>;
