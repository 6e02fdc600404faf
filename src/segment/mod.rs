mod extract;
mod model;
mod validate;

/// Segment lookup and node extraction.
pub use extract::{
    NODES_NAME, NODE_TYPE_KEY, POINTS_KEY, POINT_KEY, SEGMENT_NAME, TO_KEY, extract_nodes,
    find_segment, node_from_object, resolve_point,
};
/// Graph data model.
pub use model::{Node, NodeType, ParseNodeTypeError, Point};
/// Opt-in structural checks.
pub use validate::{GraphIssue, validate_graph};
