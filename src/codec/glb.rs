use std::borrow::Cow;

use gltf::binary::{Glb, Header};

use crate::error::{Result, SegmentError};
use crate::scene_graph::Scene;

use super::export::Document;
use super::{ExportInput, SceneDecoder, SceneEncoder};

const GLB_MAGIC: [u8; 4] = *b"glTF";
const GLB_VERSION: u32 = 2;

/// Binary glTF codec backed by the `gltf` crate. Only the node hierarchy,
/// names, transforms and extras are carried; geometry is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlbCodec;

impl GlbCodec {
    pub fn new() -> Self {
        Self
    }

    pub fn encode_sync(&self, scene: &Scene, input: &ExportInput) -> Result<Vec<u8>> {
        let document = Document::build(scene, input)?;
        let json = serde_json::to_vec(&document)
            .map_err(|err| SegmentError::encoding(format!("GLTF Exporter Error: {err}")))?;

        let glb = Glb {
            header: Header {
                magic: GLB_MAGIC,
                version: GLB_VERSION,
                // Computed by the writer
                length: 0,
            },
            json: Cow::Owned(json),
            bin: None,
        };

        let bytes = glb
            .to_vec()
            .map_err(|err| SegmentError::encoding(format!("GLTF Exporter Error: {err}")))?;

        log::debug!(
            "Encoded {} node(s) into {} bytes",
            document.node_count(),
            bytes.len()
        );
        Ok(bytes)
    }

    pub fn decode_sync(&self, bytes: &[u8]) -> Result<Scene> {
        if !bytes.starts_with(&GLB_MAGIC) {
            return Err(SegmentError::decoding(
                "GLTF Loader Error: input is not a binary glTF container",
            ));
        }

        let gltf = gltf::Gltf::from_slice(bytes)
            .map_err(|err| SegmentError::decoding(format!("GLTF Loader Error: {err}")))?;

        let gltf_scene = gltf
            .default_scene()
            .or_else(|| gltf.scenes().next())
            .ok_or_else(|| SegmentError::decoding("GLTF Loader Error: document has no scenes"))?;

        let scene = Scene::from_gltf_scene(&gltf_scene)?;
        log::debug!(
            "Decoded scene {:?} with {} object(s)",
            scene.root_object().name,
            scene.object_count()
        );
        Ok(scene)
    }
}

impl SceneEncoder for GlbCodec {
    async fn encode(&self, scene: &Scene, input: &ExportInput) -> Result<Vec<u8>> {
        self.encode_sync(scene, input)
    }
}

impl SceneDecoder for GlbCodec {
    async fn decode(&self, bytes: &[u8]) -> Result<Scene> {
        self.decode_sync(bytes)
    }
}
