use serde_json::json;

use segment_glb::scene_graph::{Object3D, Scene};
use segment_glb::segment::NodeType;
use segment_glb::{ExportInput, GlbCodec, Pipeline, SegmentError};

fn authored_scene() -> Scene {
    let mut scene = Scene::new("Level");
    let root = scene.root();
    let segment = scene.add_child(
        root,
        Object3D::named("Segment")
            .with_user_data("point", json!({"position": [1, 2, 3], "point": "P1"})),
    );
    let nodes = scene.add_child(segment, Object3D::named("Nodes"));
    scene.add_child(
        nodes,
        Object3D::named("N1")
            .with_user_data("nodeType", json!("Jump"))
            .with_user_data("points", json!([0, 0, 0]))
            .with_user_data("to", json!(["N2"])),
    );
    scene.add_child(
        nodes,
        Object3D::named("N2")
            .with_user_data("nodeType", json!("End"))
            .with_user_data("points", json!([]))
            .with_user_data("to", json!([])),
    );
    scene
}

#[test]
fn concrete_scenario_decodes_to_expected_graph() {
    let scene = authored_scene();
    let pipeline = Pipeline::new(GlbCodec::new());

    let bytes = pollster::block_on(pipeline.encode(&scene, scene.root())).expect("encode succeeds");
    let parsed = pollster::block_on(pipeline.decode_and_parse(&bytes)).expect("decode succeeds");

    assert_eq!(
        serde_json::to_value(parsed.graph()).unwrap(),
        json!({
            "point": {"position": [1.0, 2.0, 3.0], "point": "P1"},
            "nodes": [
                {"node": "N1", "nodeType": "Jump", "points": [0.0, 0.0, 0.0], "to": ["N2"]},
                {"node": "N2", "nodeType": "End", "points": [], "to": []}
            ]
        })
    );
    assert_eq!(parsed.scene.root_object().name, "Level");
}

#[test]
fn exporting_only_the_segment_keeps_it_decodable() {
    let scene = authored_scene();
    let segment = scene.get_object_by_name("Segment").unwrap();
    let pipeline = Pipeline::new(GlbCodec::new());

    let bytes = pollster::block_on(pipeline.encode(&scene, segment)).expect("encode succeeds");
    let parsed = pollster::block_on(pipeline.decode_and_parse(&bytes)).expect("decode succeeds");

    assert_eq!(parsed.point.position, [1.0, 2.0, 3.0]);
    let names: Vec<&str> = parsed.nodes.iter().map(|node| node.node.as_str()).collect();
    assert_eq!(names, ["N1", "N2"]);
}

#[test]
fn scene_without_segment_fails_after_round_trip() {
    let mut scene = Scene::new("");
    let root = scene.root();
    scene.add_child(root, Object3D::named("Something"));
    let pipeline = Pipeline::new(GlbCodec::new());

    let bytes = pollster::block_on(pipeline.encode(&scene, ExportInput::Object(root))).unwrap();
    let err = pollster::block_on(pipeline.decode_and_parse(&bytes)).unwrap_err();

    assert!(matches!(err, SegmentError::MissingSegment { .. }));
}

#[test]
fn segment_without_point_fails_after_round_trip() {
    let mut scene = Scene::new("");
    let root = scene.root();
    scene.add_child(root, Object3D::named("Segment"));
    let pipeline = Pipeline::new(GlbCodec::new());

    let bytes = pollster::block_on(pipeline.encode(&scene, root)).unwrap();
    let err = pollster::block_on(pipeline.decode_and_parse(&bytes)).unwrap_err();

    assert!(matches!(err, SegmentError::MissingPoint));
}

#[test]
fn segment_without_nodes_yields_empty_graph() {
    let mut scene = Scene::new("");
    let root = scene.root();
    scene.add_child(
        root,
        Object3D::named("Segment")
            .with_user_data("point", json!({"position": [0.5, 0, -2], "point": "Start"})),
    );
    let pipeline = Pipeline::new(GlbCodec::new());

    let bytes = pollster::block_on(pipeline.encode(&scene, root)).unwrap();
    let parsed = pollster::block_on(pipeline.decode_and_parse(&bytes)).expect("decode succeeds");

    assert!(parsed.nodes.is_empty());
    assert_eq!(parsed.point.point, "Start");
}

#[test]
fn node_order_and_types_survive_round_trip() {
    let kinds = [NodeType::Root, NodeType::Split, NodeType::Track, NodeType::Jump, NodeType::End];
    let mut scene = authored_scene();
    let container = scene.get_object_by_name("Nodes").unwrap();
    for child in scene.objects[container].child_ids.clone() {
        scene.set_object_parent(child, None);
    }
    for (idx, kind) in kinds.iter().enumerate() {
        scene.add_child(
            container,
            Object3D::named(format!("K{idx}")).with_user_data("nodeType", json!(kind.as_str())),
        );
    }

    let pipeline = Pipeline::new(GlbCodec::new());
    let bytes = pollster::block_on(pipeline.encode(&scene, scene.root())).unwrap();
    let parsed = pollster::block_on(pipeline.decode_and_parse(&bytes)).unwrap();

    let decoded: Vec<NodeType> = parsed.nodes.iter().map(|node| node.node_type).collect();
    assert_eq!(decoded, kinds);
    assert!(parsed.nodes.iter().all(|node| node.points.is_empty() && node.to.is_empty()));
}
