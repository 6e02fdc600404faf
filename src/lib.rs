//! Binary glTF scene codec and navigation graph extraction.
//!
//! A decoded scene must contain an object named `Segment` carrying a `point`
//! payload in its user data. The direct children of the `Nodes` object below
//! it become typed graph [`segment::Node`]s.

pub mod codec;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod scene_graph;
pub mod segment;

pub use codec::{ExportInput, GlbCodec, SceneDecoder, SceneEncoder};
pub use config::ExtractConfig;
pub use error::{Result, SegmentError};
pub use pipeline::{ParsedSegment, Pipeline, SegmentGraph};
