use std::future::Future;

use crate::error::Result;
use crate::scene_graph::{ObjectId, Scene};

mod export;
mod glb;

pub use glb::GlbCodec;

/// Turns a binary container into a scene graph.
pub trait SceneDecoder {
    fn decode(&self, bytes: &[u8]) -> impl Future<Output = Result<Scene>>;
}

/// Turns part of a scene graph into a binary container.
pub trait SceneEncoder {
    fn encode(&self, scene: &Scene, input: &ExportInput) -> impl Future<Output = Result<Vec<u8>>>;
}

/// What to export: one object or an ordered list of objects, each with its subtree.
/// Selecting only the scene root exports the whole scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportInput {
    Object(ObjectId),
    Objects(Vec<ObjectId>),
}

impl ExportInput {
    pub fn roots(&self) -> &[ObjectId] {
        match self {
            ExportInput::Object(id) => std::slice::from_ref(id),
            ExportInput::Objects(ids) => ids,
        }
    }
}

impl From<ObjectId> for ExportInput {
    fn from(id: ObjectId) -> Self {
        ExportInput::Object(id)
    }
}

impl From<Vec<ObjectId>> for ExportInput {
    fn from(ids: Vec<ObjectId>) -> Self {
        ExportInput::Objects(ids)
    }
}

impl From<&[ObjectId]> for ExportInput {
    fn from(ids: &[ObjectId]) -> Self {
        ExportInput::Objects(ids.to_vec())
    }
}
