use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;

use crate::segment::model::Node;

/// Structural problem in an extracted node list. Extraction itself tolerates
/// all of these; [`validate_graph`] is an opt-in pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphIssue {
    DuplicateNode { node: String },
    DanglingEdge { from: String, to: String },
}

impl fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphIssue::DuplicateNode { node } => write!(f, "duplicate node name {node:?}"),
            GraphIssue::DanglingEdge { from, to } => {
                write!(f, "node {from:?} points to unknown node {to:?}")
            }
        }
    }
}

/// Reports each repeated node name once, then every edge whose target is not
/// a node in `nodes`.
pub fn validate_graph(nodes: &[Node]) -> Vec<GraphIssue> {
    let names: HashSet<&str> = nodes.iter().map(|node| node.node.as_str()).collect();

    let duplicates = nodes
        .iter()
        .map(|node| node.node.as_str())
        .duplicates()
        .map(|node| GraphIssue::DuplicateNode {
            node: node.to_owned(),
        });

    let known = &names;
    let dangling = nodes.iter().flat_map(move |node| {
        node.to
            .iter()
            .filter(move |target| !known.contains(target.as_str()))
            .map(move |target| GraphIssue::DanglingEdge {
                from: node.node.clone(),
                to: target.clone(),
            })
    });

    duplicates.chain(dangling).collect()
}
