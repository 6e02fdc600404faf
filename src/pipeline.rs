use serde::Serialize;

use crate::codec::{ExportInput, SceneDecoder, SceneEncoder};
use crate::config::ExtractConfig;
use crate::error::{Result, SegmentError};
use crate::scene_graph::Scene;
use crate::segment::{self, Node, Point};

/// Decoded scene together with the graph extracted from its segment.
#[derive(Debug, Clone)]
pub struct ParsedSegment {
    pub scene: Scene,
    pub point: Point,
    pub nodes: Vec<Node>,
}

impl ParsedSegment {
    /// The derived views only, as written to stdout by the binary.
    pub fn graph(&self) -> SegmentGraph<'_> {
        SegmentGraph {
            point: &self.point,
            nodes: &self.nodes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SegmentGraph<'a> {
    pub point: &'a Point,
    pub nodes: &'a [Node],
}

/// Composes a codec with segment extraction. Every failure is logged once
/// here and then handed back to the caller unchanged.
pub struct Pipeline<C> {
    codec: C,
    config: ExtractConfig,
}

impl<C> Pipeline<C> {
    pub fn new(codec: C) -> Self {
        Self::with_config(codec, ExtractConfig::default())
    }

    pub fn with_config(codec: C, config: ExtractConfig) -> Self {
        Self { codec, config }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Runs segment lookup, point resolution and node extraction on an
    /// already decoded scene.
    pub fn parse(&self, scene: Scene) -> Result<ParsedSegment> {
        let segment = segment::find_segment(&scene)?;
        let point = segment::resolve_point(&scene, segment)?;
        let nodes = segment::extract_nodes(&scene, segment)?;

        if self.config.validate_graph {
            let issues = segment::validate_graph(&nodes);
            if !issues.is_empty() {
                return Err(SegmentError::InvalidGraph { issues });
            }
        }

        Ok(ParsedSegment {
            scene,
            point,
            nodes,
        })
    }
}

impl<C: SceneDecoder> Pipeline<C> {
    pub async fn decode_and_parse(&self, bytes: &[u8]) -> Result<ParsedSegment> {
        let result = match self.codec.decode(bytes).await {
            Ok(scene) => self.parse(scene),
            Err(err) => Err(err),
        };

        result.inspect_err(|err| log::error!("Error during decoding: {err}"))
    }
}

impl<C: SceneEncoder> Pipeline<C> {
    pub async fn encode(&self, scene: &Scene, input: impl Into<ExportInput>) -> Result<Vec<u8>> {
        self.codec
            .encode(scene, &input.into())
            .await
            .inspect_err(|err| log::error!("Error during encoding: {err}"))
    }
}
