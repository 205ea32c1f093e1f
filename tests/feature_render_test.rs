// Entities handing geometry to an engine through an explicit render context
use atlas_mesh::geometry::GeoLocation;
use atlas_mesh::render::{Matrix4, PrimitiveHandle, PrimitiveRequest, RecordingCollection, IDENTITY_MATRIX};
use atlas_mesh::{
    BuildOptions, DisplayMode, Feature, FeatureArgs, FeatureIndex, GeometryError, Mesh, MeshSource,
    Point3, PrimitiveCollection, ProvidesGeometry, ReferenceFrame, RenderContext, Triangle,
};

/// Frame that encodes the anchor into the translation column
struct TranslateFrame;

impl ReferenceFrame for TranslateFrame {
    fn model_matrix(&self, location: &GeoLocation) -> Matrix4 {
        let mut m = IDENTITY_MATRIX;
        m[12] = location.longitude;
        m[13] = location.latitude;
        m[14] = location.elevation;
        m
    }
}

/// Collection that only counts what it receives
#[derive(Default)]
struct CountingCollection {
    added: u64,
}

impl PrimitiveCollection for CountingCollection {
    fn add(&mut self, _request: PrimitiveRequest) -> PrimitiveHandle {
        self.added += 1;
        PrimitiveHandle(self.added)
    }
}

fn pyramid_source() -> MeshSource {
    MeshSource {
        id: None,
        points: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.5, 0.5, 1.0],
        ],
        triangles: vec![
            vec![0, 1, 4],
            vec![1, 2, 4],
            vec![2, 3, 4],
            vec![3, 0, 4],
            vec![0, 2, 1],
            vec![0, 3, 2],
        ],
        location: Some(GeoLocation::new(-37.8, 144.9, 10.0)),
    }
}

fn footprint() -> Vec<GeoLocation> {
    vec![
        GeoLocation::new(-37.80, 144.90, 0.0),
        GeoLocation::new(-37.80, 144.91, 0.0),
        GeoLocation::new(-37.81, 144.91, 0.0),
        GeoLocation::new(-37.81, 144.90, 0.0),
    ]
}

#[test]
fn test_mesh_primitive_uses_frame_matrix() {
    let mesh = Mesh::from_source(&pyramid_source(), "pyramid", BuildOptions::default()).unwrap();
    let mut sink = RecordingCollection::default();
    let handle = {
        let mut ctx = RenderContext::new(&TranslateFrame, &mut sink);
        mesh.create_primitive(&mut ctx).unwrap()
    };
    assert_eq!(handle, PrimitiveHandle(0));

    let request = &sink.primitives[0];
    assert_eq!(request.id, "pyramid");
    assert_eq!(request.geometry.triangle_count(), 6);
    assert_eq!(&request.model_matrix[12..15], &[144.9, -37.8, 10.0]);
    assert!(request.appearance.flat);
    assert!(!request.appearance.translucent);
}

#[test]
fn test_footprint_primitive_is_already_geographic() {
    let args = FeatureArgs {
        vertices: Some(footprint()),
        ..Default::default()
    };
    let feature = Feature::new("block", args, BuildOptions::default()).unwrap();
    let mut sink = RecordingCollection::default();
    {
        let mut ctx = RenderContext::new(&TranslateFrame, &mut sink);
        feature.create_primitive(&mut ctx).unwrap();
    }
    assert_eq!(sink.primitives[0].id, "blockp");
    assert_eq!(sink.primitives[0].model_matrix, IDENTITY_MATRIX);
}

#[test]
fn test_feature_switches_between_children() {
    let args = FeatureArgs {
        vertices: Some(footprint()),
        mesh: Some(pyramid_source()),
        display_mode: DisplayMode::Mesh,
        ..Default::default()
    };
    let mut feature = Feature::new("site", args, BuildOptions::default()).unwrap();
    let mut sink = CountingCollection::default();

    let mut ctx = RenderContext::new(&TranslateFrame, &mut sink);
    feature.create_primitive(&mut ctx).unwrap();
    assert_eq!(feature.geometry().unwrap().vertex_count(), 5);

    feature.set_display_mode(DisplayMode::Footprint);
    feature.create_primitive(&mut ctx).unwrap();
    assert_eq!(feature.geometry().unwrap().vertex_count(), 4);
    drop(ctx);

    assert_eq!(sink.added, 2);
}

#[test]
fn test_mesh_edit_then_render() {
    let mut mesh = Mesh::new(
        "edit",
        vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0), Point3::new(0.0, 2.0, 0.0)],
        vec![Triangle::new(0, 1, 2)],
        BuildOptions::default(),
    )
    .unwrap();

    mesh.set_triangles(Vec::new()).unwrap();
    mesh.set_positions(Vec::new()).unwrap();
    assert!(mesh.descriptor().is_empty());

    let mut sink = RecordingCollection::default();
    let mut ctx = RenderContext::new(&TranslateFrame, &mut sink);
    let err = mesh.create_primitive(&mut ctx).unwrap_err();
    assert_eq!(err, GeometryError::EmptyGeometry { id: "edit".to_string() });
}

#[test]
fn test_index_picks_features_by_location() {
    let mut index = FeatureIndex::new();
    let block = FeatureArgs {
        vertices: Some(footprint()),
        ..Default::default()
    };
    let tower = FeatureArgs {
        mesh: Some(pyramid_source()),
        ..Default::default()
    };
    index.insert("block", Feature::new("block", block, BuildOptions::default()).unwrap());
    index.insert("tower", Feature::new("tower", tower, BuildOptions::default()).unwrap());
    index.insert("empty", Feature::new("empty", FeatureArgs::default(), BuildOptions::default()).unwrap());

    let hits: Vec<&str> = index.locate_at(144.905, -37.805).into_iter().map(|f| f.id()).collect();
    assert_eq!(hits, vec!["block"]);

    let hits: Vec<&str> = index
        .query_envelope([144.85, -37.85], [144.95, -37.75])
        .into_iter()
        .map(|f| f.id())
        .collect();
    assert_eq!(hits, vec!["block", "tower"]);
    assert_eq!(index.len(), 3);
}
