use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SegmentError};
use crate::scene_graph::{Object3D, ObjectId, Scene};
use crate::segment::model::{Node, NodeType, Point};

pub const SEGMENT_NAME: &str = "Segment";
pub const NODES_NAME: &str = "Nodes";

pub const POINT_KEY: &str = "point";
pub const NODE_TYPE_KEY: &str = "nodeType";
pub const POINTS_KEY: &str = "points";
pub const TO_KEY: &str = "to";

/// Finds the segment anchor anywhere in the scene. No fallback names are tried.
pub fn find_segment(scene: &Scene) -> Result<ObjectId> {
    scene
        .get_object_by_name(SEGMENT_NAME)
        .ok_or(SegmentError::MissingSegment { name: SEGMENT_NAME })
}

pub fn resolve_point(scene: &Scene, segment: ObjectId) -> Result<Point> {
    let value = scene
        .get_object(segment)
        .and_then(|object| object.user_data_field(POINT_KEY))
        .filter(|value| !is_falsy(value))
        .ok_or(SegmentError::MissingPoint)?;

    let point = Point::deserialize(value).map_err(|err| SegmentError::InvalidPoint {
        reason: err.to_string(),
    })?;

    if point.point.is_empty() {
        return Err(SegmentError::InvalidPoint {
            reason: "point name is empty".to_owned(),
        });
    }

    Ok(point)
}

/// Maps the direct children of the segment's `Nodes` container into nodes,
/// keeping authoring order. A missing container yields no nodes.
pub fn extract_nodes(scene: &Scene, segment: ObjectId) -> Result<Vec<Node>> {
    let Some(container) = scene.find_by_name(segment, NODES_NAME) else {
        log::warn!("{} not found on segment!", NODES_NAME);
        return Ok(Vec::new());
    };

    let nodes = scene
        .children(container)
        .map(|(_, child)| node_from_object(child))
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Extracted {} node(s)", nodes.len());
    Ok(nodes)
}

pub fn node_from_object(object: &Object3D) -> Result<Node> {
    let name = object.name.as_str();

    let node_type = match object.user_data_field(NODE_TYPE_KEY) {
        Some(Value::String(tag)) => tag
            .parse::<NodeType>()
            .map_err(|err| SegmentError::UnknownNodeType {
                node: name.to_owned(),
                tag: err.tag,
            })?,
        None | Some(Value::Null) => {
            return Err(SegmentError::invalid_field(name, NODE_TYPE_KEY, "missing"));
        }
        Some(other) => {
            return Err(SegmentError::invalid_field(
                name,
                NODE_TYPE_KEY,
                format!("expected a string tag, got {}", kind_of(other)),
            ));
        }
    };

    Ok(Node {
        node: name.to_owned(),
        node_type,
        points: read_numbers(object, name)?,
        to: read_strings(object, name)?,
    })
}

fn read_numbers(object: &Object3D, name: &str) -> Result<Vec<f64>> {
    let items = match object.user_data_field(POINTS_KEY) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(SegmentError::invalid_field(
                name,
                POINTS_KEY,
                format!("expected an array of numbers, got {}", kind_of(other)),
            ));
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_f64().ok_or_else(|| {
                SegmentError::invalid_field(
                    name,
                    POINTS_KEY,
                    format!("item {idx} is {}, not a number", kind_of(item)),
                )
            })
        })
        .collect()
}

fn read_strings(object: &Object3D, name: &str) -> Result<Vec<String>> {
    let items = match object.user_data_field(TO_KEY) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(SegmentError::invalid_field(
                name,
                TO_KEY,
                format!("expected an array of node names, got {}", kind_of(other)),
            ));
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_str().map(str::to_owned).ok_or_else(|| {
                SegmentError::invalid_field(
                    name,
                    TO_KEY,
                    format!("item {idx} is {}, not a string", kind_of(item)),
                )
            })
        })
        .collect()
}

/// JSON values that count as "not set" for attached metadata.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
