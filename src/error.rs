use itertools::Itertools;
use thiserror::Error;

use crate::segment::GraphIssue;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, SegmentError>;

/// Errors produced while encoding scenes and extracting segment graphs.
#[derive(Debug, Error)]
pub enum SegmentError {
    /// The exporter could not produce a GLB buffer.
    #[error("encoding failed: {reason}")]
    Encoding { reason: String },
    /// The loader could not parse the input buffer.
    #[error("decoding failed: {reason}")]
    Decoding { reason: String },
    #[error("segment object {name:?} does not exist")]
    MissingSegment { name: &'static str },
    #[error("point was not found on segment")]
    MissingPoint,
    /// A point payload exists but is not `{ position: [x, y, z], point: name }`.
    #[error("point payload on segment is malformed: {reason}")]
    InvalidPoint { reason: String },
    #[error("node {node:?} has unknown node type {tag:?}")]
    UnknownNodeType { node: String, tag: String },
    #[error("node {node:?} has invalid {field}: {reason}")]
    InvalidNodeField {
        node: String,
        field: &'static str,
        reason: String,
    },
    /// Opt-in graph validation found problems.
    #[error("node graph failed validation: {}", render_issues(.issues))]
    InvalidGraph { issues: Vec<GraphIssue> },
}

impl SegmentError {
    pub(crate) fn encoding(reason: impl ToString) -> Self {
        Self::Encoding {
            reason: reason.to_string(),
        }
    }

    pub(crate) fn decoding(reason: impl ToString) -> Self {
        Self::Decoding {
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_field(node: &str, field: &'static str, reason: impl ToString) -> Self {
        Self::InvalidNodeField {
            node: node.to_owned(),
            field,
            reason: reason.to_string(),
        }
    }
}

fn render_issues(issues: &[GraphIssue]) -> String {
    issues.iter().join("; ")
}
