//! Asset Tests
//!
//! Tests for:
//! - AssetStorage add/get/remove
//! - AssetServer resource release (materials take their maps with them)
//! - AssetCatalog path resolution
//! - JsonModelLoader (files on disk) and MemoryModelLoader

use std::path::PathBuf;
use std::sync::Arc;

use rigview::animation::{AnimationClip, LoopMode};
use rigview::assets::{
    AssetCatalog, AssetServer, AssetStorage, GeometryHandle, JsonModelLoader, MemoryModelLoader,
    ModelLoader, Prefab, PrefabMaterial, PrefabMesh, PrefabNode,
};
use rigview::errors::ViewerError;
use rigview::resources::{Geometry, Material, MaterialKind, Texture};

fn character_prefab() -> Prefab {
    let mut prefab = Prefab::new();
    let body = prefab.add_node(PrefabNode {
        name: Some("Body".into()),
        mesh: Some(PrefabMesh {
            geometry: Geometry::plane(1.0, 1.0),
            materials: vec![PrefabMaterial {
                name: "Skin".into(),
                kind: MaterialKind::Phong,
                map: Some(Texture::new("skin", 4, 4)),
                ..Default::default()
            }],
        }),
        ..Default::default()
    });
    prefab.add_node(PrefabNode {
        name: Some("Armature".into()),
        children: vec![body],
        ..Default::default()
    });
    prefab.with_animation(AnimationClip::new("Praying", 3.2))
}

fn block_on_tokio<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::runtime::Runtime::new().unwrap().block_on(future)
}

// ============================================================================
// AssetStorage
// ============================================================================

#[test]
fn storage_add_get_remove() {
    let storage: AssetStorage<GeometryHandle, Geometry> = AssetStorage::new();
    assert!(storage.is_empty());

    let handle = storage.add(Geometry::plane(2.0, 2.0));
    assert_eq!(storage.len(), 1);
    assert!(storage.contains(handle));
    assert_eq!(storage.get(handle).unwrap().vertex_count(), 4);

    assert!(storage.remove(handle).is_some());
    assert!(!storage.contains(handle));
    assert!(storage.get(handle).is_none());
    assert!(storage.remove(handle).is_none(), "second remove is a no-op");
}

#[test]
fn storage_handles_are_not_reused_after_removal() {
    let storage: AssetStorage<GeometryHandle, Geometry> = AssetStorage::new();
    let first = storage.add(Geometry::default());
    storage.remove(first);
    let second = storage.add(Geometry::default());

    assert_ne!(first, second);
    assert!(!storage.contains(first));
}

// ============================================================================
// AssetServer Release
// ============================================================================

#[test]
fn release_material_takes_its_map() {
    let assets = AssetServer::new();
    let map = assets.textures.add(Texture::new("albedo", 8, 8));
    let material = assets
        .materials
        .add(Material::new("Skin", MaterialKind::Standard).with_map(map));

    let report = assets.release_material(material);

    assert_eq!(report.materials, 1);
    assert_eq!(report.textures, 1);
    assert_eq!(assets.resource_count(), 0);
}

#[test]
fn release_of_missing_resource_reports_nothing() {
    let assets = AssetServer::new();
    let geometry = assets.geometries.add(Geometry::default());
    assert_eq!(assets.release_geometry(geometry).geometries, 1);
    assert_eq!(assets.release_geometry(geometry).total(), 0);
}

// ============================================================================
// AssetCatalog
// ============================================================================

#[test]
fn catalog_resolves_names_to_paths() {
    let catalog = AssetCatalog::default();
    assert_eq!(
        catalog.path_for("Praying"),
        PathBuf::from("models/fbx/Praying.fbx")
    );

    let json = catalog.with_root("assets").with_format("json", "json");
    assert_eq!(
        json.path_for("Taunt"),
        PathBuf::from("assets/json/Taunt.json")
    );
}

#[test]
fn catalog_keeps_panel_order() {
    let catalog = AssetCatalog::default();
    let names: Vec<&str> = catalog.iter().collect();
    assert_eq!(
        names,
        [
            "Falling Back Death",
            "Jump Push Up",
            "Praying",
            "Taunt",
            "Defeated"
        ]
    );
    assert_eq!(catalog.position("Taunt"), Some(3));
    assert!(!catalog.contains("praying"), "asset names are case-sensitive");
}

// ============================================================================
// Loaders
// ============================================================================

#[test]
fn json_loader_reads_prefab_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Praying.json");
    std::fs::write(&path, serde_json::to_string(&character_prefab()).unwrap()).unwrap();

    let prefab = block_on_tokio(JsonModelLoader::new().load(path)).unwrap();

    assert_eq!(prefab.nodes.len(), 2);
    assert_eq!(prefab.roots(), vec![1]);
    assert_eq!(prefab.clip_names().collect::<Vec<_>>(), ["Praying"]);
}

#[test]
fn json_loader_missing_file_is_asset_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = block_on_tokio(JsonModelLoader::new().load(dir.path().join("Nope.json")));
    assert!(matches!(result, Err(ViewerError::AssetNotFound(_))));
}

#[test]
fn json_loader_rejects_malformed_models() {
    let dir = tempfile::tempdir().unwrap();

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, b"{ not json").unwrap();
    let result = block_on_tokio(JsonModelLoader::new().load(garbage));
    assert!(matches!(result, Err(ViewerError::JsonError(_))));

    let dangling = dir.path().join("dangling.json");
    std::fs::write(&dangling, r#"{ "nodes": [ { "children": [5] } ] }"#).unwrap();
    let result = block_on_tokio(JsonModelLoader::new().load(dangling));
    assert!(matches!(result, Err(ViewerError::InvalidModel { .. })));
}

#[test]
fn json_prefab_fields_are_optional() {
    let prefab = JsonModelLoader::decode(
        std::path::Path::new("inline.json"),
        br#"{ "animations": [ { "name": "Taunt", "duration": 1.5 } ] }"#,
    )
    .unwrap();
    assert!(prefab.nodes.is_empty());
    assert_eq!(prefab.animations[0].name, "Taunt");
}

#[test]
fn json_clip_playback_fields_are_read() {
    let prefab = JsonModelLoader::decode(
        std::path::Path::new("inline.json"),
        br#"{ "animations": [
            { "name": "Defeated", "duration": 5.0, "loop_mode": "once" },
            { "name": "Taunt", "duration": 2.0, "loop_mode": "ping_pong", "time_scale": 1.5 }
        ] }"#,
    )
    .unwrap();

    assert_eq!(prefab.animations[0].loop_mode, LoopMode::Once);
    assert!((prefab.animations[0].time_scale - 1.0).abs() < 1e-6);
    assert_eq!(prefab.animations[1].loop_mode, LoopMode::PingPong);
    assert!((prefab.animations[1].time_scale - 1.5).abs() < 1e-6);
}

#[test]
fn memory_loader_serves_registered_paths() {
    let loader = MemoryModelLoader::new().with("models/Praying", character_prefab());

    let found = futures::executor::block_on(loader.load(PathBuf::from("models/Praying")));
    assert!(found.is_ok());

    let missing = futures::executor::block_on(loader.load(PathBuf::from("models/Taunt")));
    assert!(matches!(missing, Err(ViewerError::AssetNotFound(_))));
}

#[test]
fn memory_loader_clones_share_contents() {
    let loader = MemoryModelLoader::new();
    let shared: Arc<dyn ModelLoader> = Arc::new(loader.clone());
    loader.insert("late", Prefab::new());

    let result = futures::executor::block_on(shared.load(PathBuf::from("late")));
    assert!(result.is_ok());
}
