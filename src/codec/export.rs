use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Result, SegmentError};
use crate::scene_graph::{Object3D, ObjectId, Scene, UserData};

use super::ExportInput;

const GENERATOR: &str = concat!("segment-glb ", env!("CARGO_PKG_VERSION"));

/// Minimal glTF 2.0 JSON document: node hierarchy, names, TRS and extras.
#[derive(Debug, Serialize)]
pub(super) struct Document<'a> {
    asset: Asset,
    scene: usize,
    scenes: Vec<SceneDef<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    nodes: Vec<NodeDef<'a>>,
}

#[derive(Debug, Serialize)]
struct Asset {
    version: &'static str,
    generator: &'static str,
}

#[derive(Debug, Serialize)]
struct SceneDef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    nodes: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extras: Option<&'a UserData>,
}

#[derive(Debug, Serialize)]
struct NodeDef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    translation: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation: Option<[f32; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extras: Option<&'a UserData>,
}

impl<'a> Document<'a> {
    pub(super) fn build(scene: &'a Scene, input: &ExportInput) -> Result<Self> {
        let roots = input.roots();
        if roots.is_empty() {
            return Err(SegmentError::encoding("nothing to export"));
        }

        let mut builder = Builder {
            scene,
            nodes: Vec::new(),
            visited: HashSet::new(),
        };

        let scene_def = if roots == [scene.root()] {
            let root = scene.root_object();
            builder.visited.insert(scene.root());
            SceneDef {
                name: non_empty(&root.name),
                nodes: builder.push_all(&root.child_ids)?,
                extras: non_empty_map(&root.user_data),
            }
        } else {
            SceneDef {
                name: None,
                nodes: builder.push_all(roots)?,
                extras: None,
            }
        };

        Ok(Self {
            asset: Asset {
                version: "2.0",
                generator: GENERATOR,
            },
            scene: 0,
            scenes: vec![scene_def],
            nodes: builder.nodes,
        })
    }

    pub(super) fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

struct Builder<'a> {
    scene: &'a Scene,
    nodes: Vec<NodeDef<'a>>,
    visited: HashSet<ObjectId>,
}

impl<'a> Builder<'a> {
    fn push_all(&mut self, ids: &[ObjectId]) -> Result<Vec<usize>> {
        ids.iter().map(|&id| self.push_tree(id)).collect()
    }

    /// Appends `root` and its subtree in pre-order, returning the index of `root`.
    fn push_tree(&mut self, root: ObjectId) -> Result<usize> {
        let root_index = self.nodes.len();
        let mut stack: Vec<(ObjectId, Option<usize>)> = vec![(root, None)];

        while let Some((id, parent)) = stack.pop() {
            let object = self.push_node(id)?;
            let index = self.nodes.len() - 1;
            if let Some(parent) = parent {
                self.nodes[parent].children.push(index);
            }
            // Reversed so children keep their order
            stack.extend(object.child_ids.iter().rev().map(|&child| (child, Some(index))));
        }

        Ok(root_index)
    }

    fn push_node(&mut self, id: ObjectId) -> Result<&'a Object3D> {
        let scene = self.scene;
        let object = scene.get_object(id).ok_or_else(|| {
            SegmentError::encoding(format!("object {id:?} is not part of the scene"))
        })?;

        if !self.visited.insert(id) {
            return Err(SegmentError::encoding(format!(
                "object {:?} appears more than once in the export hierarchy",
                object.name
            )));
        }

        let transform = &object.transform;
        if !transform.is_finite() {
            return Err(SegmentError::encoding(format!(
                "object {:?} has a non-finite transform",
                object.name
            )));
        }

        self.nodes.push(NodeDef {
            name: non_empty(&object.name),
            children: Vec::new(),
            translation: (transform.translation() != glam::Vec3::ZERO)
                .then(|| transform.translation().to_array()),
            rotation: (transform.rotation() != glam::Quat::IDENTITY)
                .then(|| transform.rotation().to_array()),
            scale: (transform.scale() != glam::Vec3::ONE).then(|| transform.scale().to_array()),
            extras: non_empty_map(&object.user_data),
        });

        Ok(object)
    }
}

fn non_empty(name: &str) -> Option<&str> {
    (!name.is_empty()).then_some(name)
}

fn non_empty_map(map: &UserData) -> Option<&UserData> {
    (!map.is_empty()).then_some(map)
}
