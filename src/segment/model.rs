use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of a navigation graph vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Jump,
    Track,
    Split,
    Root,
    End,
}

impl NodeType {
    pub const ALL: [NodeType; 5] = [
        NodeType::Jump,
        NodeType::Track,
        NodeType::Split,
        NodeType::Root,
        NodeType::End,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Jump => "Jump",
            NodeType::Track => "Track",
            NodeType::Split => "Split",
            NodeType::Root => "Root",
            NodeType::End => "End",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node type tag {tag:?}")]
pub struct ParseNodeTypeError {
    pub tag: String,
}

impl FromStr for NodeType {
    type Err = ParseNodeTypeError;

    /// Tags are matched exactly; `"jump"` is not a `Jump`.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| ParseNodeTypeError {
                tag: tag.to_owned(),
            })
    }
}

/// Named reference location attached to a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub position: [f64; 3],
    pub point: String,
}

/// One vertex of the navigation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub node: String,
    pub node_type: NodeType,
    pub points: Vec<f64>,
    /// Outgoing edges by node name. Targets are not resolved against the node set.
    pub to: Vec<String>,
}
