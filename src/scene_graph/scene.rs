use std::collections::HashSet;

use glam::{Quat, Vec3};
use id_arena::Arena;
use serde_json::Value;

use crate::error::{Result, SegmentError};
use crate::scene_graph::object3d::{Object3D, ObjectId, UserData};
use crate::scene_graph::transform::Transform;

#[derive(Debug, Clone)]
pub struct Scene {
    pub objects: Arena<Object3D>,
    root: ObjectId,
}

impl Scene {
    /// Creates a scene holding a single root group named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let mut objects = Arena::new();
        let root = objects.alloc(Object3D::named(name));
        Self { objects, root }
    }

    pub fn root(&self) -> ObjectId {
        self.root
    }

    pub fn root_object(&self) -> &Object3D {
        &self.objects[self.root]
    }

    pub fn root_object_mut(&mut self) -> &mut Object3D {
        &mut self.objects[self.root]
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.get(id).is_some()
    }

    /// Adds a detached object. Use [`Scene::set_object_parent`] or
    /// [`Scene::add_child`] to place it in the hierarchy.
    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    pub fn add_child(&mut self, parent_id: ObjectId, object: Object3D) -> ObjectId {
        let object_id = self.add_object(object);
        self.set_object_parent(object_id, Some(parent_id));
        object_id
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.get_mut(id)
    }

    /// Sets the parent of an object and updates child relationships
    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        // Remove from old parent's children list
        if let Some(child) = self.objects.get(child_id) {
            if let Some(old_parent_id) = child.parent_id {
                if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                    old_parent.child_ids.retain(|&id| id != child_id);
                }
            }
        }

        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent_id) = new_parent_id {
                if let Some(new_parent) = self.objects.get_mut(new_parent_id) {
                    new_parent.child_ids.push(child_id);
                }
            }
        }
    }

    /// Direct children of `id` in authoring order.
    pub fn children(&self, id: ObjectId) -> impl Iterator<Item = (ObjectId, &Object3D)> + '_ {
        self.objects
            .get(id)
            .map(|object| object.child_ids.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&child_id| self.objects.get(child_id).map(|child| (child_id, child)))
    }

    /// `from` followed by all of its descendants, depth first, pre-order.
    pub fn descendants(&self, from: ObjectId) -> Vec<ObjectId> {
        let mut out = Vec::new();
        let mut stack = vec![from];

        while let Some(id) = stack.pop() {
            let Some(object) = self.objects.get(id) else {
                continue;
            };
            out.push(id);
            // Reversed so the first child is visited first
            stack.extend(object.child_ids.iter().rev().copied());
        }

        out
    }

    /// First object named `name` in `from` or below it, in pre-order.
    pub fn find_by_name(&self, from: ObjectId, name: &str) -> Option<ObjectId> {
        self.descendants(from)
            .into_iter()
            .find(|&id| self.objects[id].name == name)
    }

    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.find_by_name(self.root, name)
    }

    /// Builds a scene from a glTF scene. The scene itself becomes the root group.
    /// The node hierarchy must be a tree: a node reached twice, through a cycle
    /// or through two parents, is a decoding error.
    pub fn from_gltf_scene(scene: &gltf::Scene) -> Result<Self> {
        let mut out = Scene::new(scene.name().unwrap_or_default());
        if let Some(user_data) = read_extras(scene.extras(), "scene") {
            out.root_object_mut().user_data = user_data;
        }

        let root = out.root;
        let mut seen = HashSet::new();
        let mut stack: Vec<(gltf::Node, ObjectId)> =
            scene.nodes().map(|node| (node, root)).collect();
        stack.reverse();

        while let Some((node, parent)) = stack.pop() {
            if !seen.insert(node.index()) {
                return Err(SegmentError::decoding(format!(
                    "GLTF Loader Error: node {} is reached more than once in the scene hierarchy",
                    node.index()
                )));
            }

            let object_id = out.spawn_gltf_node(&node, parent);

            let children: Vec<gltf::Node> = node.children().collect();
            // Reversed so the first child is spawned first
            stack.extend(children.into_iter().rev().map(|child| (child, object_id)));
        }

        Ok(out)
    }

    fn spawn_gltf_node(&mut self, node: &gltf::Node, parent: ObjectId) -> ObjectId {
        let mut object = Object3D::named(node.name().unwrap_or_default());
        let (translation, rotation, scale) = node.transform().decomposed();

        object.transform = Transform::from_trs(
            Vec3::from_array(translation),
            Quat::from_array(rotation),
            Vec3::from_array(scale),
        );

        if let Some(user_data) = read_extras(node.extras(), &object.name) {
            object.user_data = user_data;
        }

        self.add_child(parent, object)
    }
}

/// Only object-shaped extras become user data; anything else is dropped.
fn read_extras(extras: &gltf::json::Extras, owner: &str) -> Option<UserData> {
    let raw = extras.as_ref()?;
    match serde_json::from_str::<Value>(raw.get()) {
        Ok(Value::Object(map)) => Some(map),
        Ok(other) => {
            log::warn!("Ignoring non-object extras on {:?}: {}", owner, other);
            None
        }
        Err(err) => {
            log::warn!("Ignoring unreadable extras on {:?}: {}", owner, err);
            None
        }
    }
}
