//! Scene Graph Tests
//!
//! Tests for:
//! - Node hierarchy (add, attach, remove)
//! - Stage construction from settings
//! - Prefab instantiation and resource registration
//! - Camera resize

use glam::Vec3;

use rigview::animation::AnimationClip;
use rigview::assets::{AssetServer, Prefab, PrefabMaterial, PrefabMesh, PrefabNode};
use rigview::config::{CameraSettings, StageSettings};
use rigview::resources::{Geometry, Texture};
use rigview::scene::{LightKind, Node, Scene};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Two meshes under an armature; the second mesh has two materials, one of
/// them textured.
fn rig_prefab() -> Prefab {
    let mut prefab = Prefab::new();
    let head = prefab.add_node(PrefabNode {
        name: Some("Head".into()),
        mesh: Some(PrefabMesh {
            geometry: Geometry::plane(1.0, 1.0),
            materials: vec![PrefabMaterial::default()],
        }),
        ..Default::default()
    });
    let body = prefab.add_node(PrefabNode {
        name: Some("Body".into()),
        mesh: Some(PrefabMesh {
            geometry: Geometry::plane(2.0, 2.0),
            materials: vec![
                PrefabMaterial {
                    map: Some(Texture::new("cloth", 2, 2)),
                    ..Default::default()
                },
                PrefabMaterial::default(),
            ],
        }),
        ..Default::default()
    });
    prefab.add_node(PrefabNode {
        name: Some("Armature".into()),
        children: vec![head, body],
        ..Default::default()
    });
    prefab.with_animation(AnimationClip::new("Taunt", 2.0))
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn add_to_parent_links_both_ways() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("parent"));
    let child = scene.add_to_parent(Node::new("child"), parent);

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent));
    assert_eq!(scene.get_node(parent).unwrap().children(), &[child]);
    assert_eq!(scene.root_nodes, vec![parent]);
}

#[test]
fn attach_moves_node_between_parents() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new("a"));
    let b = scene.add_node(Node::new("b"));
    let child = scene.add_to_parent(Node::new("child"), a);

    scene.attach(child, b);

    assert!(scene.get_node(a).unwrap().children().is_empty());
    assert_eq!(scene.get_node(b).unwrap().children(), &[child]);
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(b));
}

#[test]
fn attach_refuses_cycles() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new("root"));
    let child = scene.add_to_parent(Node::new("child"), root);

    scene.attach(root, child);

    assert_eq!(scene.get_node(root).unwrap().parent(), None);
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(root));
}

#[test]
fn remove_node_drops_whole_subtree() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new("root"));
    let mid = scene.add_to_parent(Node::new("mid"), root);
    let leaf = scene.add_to_parent(Node::new("leaf"), mid);
    let other = scene.add_node(Node::new("other"));

    scene.remove_node(mid);

    assert!(!scene.contains(mid));
    assert!(!scene.contains(leaf));
    assert!(scene.get_node(root).unwrap().children().is_empty());
    assert!(scene.contains(other));
    assert_eq!(scene.node_count(), 2);
}

#[test]
fn subtree_is_parents_first() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new("root"));
    let a = scene.add_to_parent(Node::new("a"), root);
    let b = scene.add_to_parent(Node::new("b"), root);
    let a1 = scene.add_to_parent(Node::new("a1"), a);

    assert_eq!(scene.subtree(root), vec![root, a, a1, b]);
    assert_eq!(scene.find_by_name(root, "a1"), Some(a1));
    assert_eq!(scene.find_by_name(a, "b"), None);
}

// ============================================================================
// Stage
// ============================================================================

#[test]
fn stage_has_lights_ground_and_grid() {
    let assets = AssetServer::new();
    let scene = Scene::with_stage(
        &StageSettings::default(),
        &CameraSettings::default(),
        16.0 / 9.0,
        &assets,
    );

    let names: Vec<&str> = scene.iter().map(|(_, n)| n.name.as_str()).collect();
    for expected in ["HemisphereLight", "DirectionalLight", "Ground", "Grid"] {
        assert!(names.contains(&expected), "missing {expected}");
    }
    assert_eq!(scene.node_count(), 4);
    assert_eq!(assets.geometries.len(), 2);
    assert_eq!(assets.materials.len(), 2);

    let fog = scene.fog.unwrap();
    assert!(approx(fog.near, 200.0));
    assert!(approx(fog.far, 1000.0));
    assert_eq!(scene.background, Some(fog.color));
}

#[test]
fn stage_directional_light_casts_shadows() {
    let assets = AssetServer::new();
    let scene = Scene::with_stage(
        &StageSettings::default(),
        &CameraSettings::default(),
        1.0,
        &assets,
    );

    let (_, sun) = scene
        .iter()
        .find(|(_, n)| {
            n.light
                .as_ref()
                .is_some_and(|l| l.kind == LightKind::Directional)
        })
        .unwrap();
    let light = sun.light.as_ref().unwrap();
    assert!(light.cast_shadows);
    assert!(approx(light.intensity, 5.0));
    assert_eq!(sun.transform.position, Vec3::new(0.0, 200.0, 100.0));
    assert_eq!(
        Vec3::from(sun.transform.local_matrix().translation),
        Vec3::new(0.0, 200.0, 100.0)
    );

    let (_, ground) = scene.iter().find(|(_, n)| n.name == "Ground").unwrap();
    let mesh = ground.mesh.as_ref().unwrap();
    assert!(mesh.receive_shadow);
    assert!(!assets.materials.get(mesh.materials[0]).unwrap().depth_write);
}

// ============================================================================
// Prefab Instantiation
// ============================================================================

#[test]
fn instantiate_mirrors_prefab_hierarchy() {
    let assets = AssetServer::new();
    let mut scene = Scene::new();

    let root = scene.instantiate(&rig_prefab(), &assets, "Taunt");

    assert_eq!(scene.get_node(root).unwrap().name, "Taunt");
    assert!(scene.root_nodes.contains(&root));
    let armature = scene.find_by_name(root, "Armature").unwrap();
    assert_eq!(scene.get_node(armature).unwrap().parent(), Some(root));
    assert_eq!(scene.get_node(armature).unwrap().children().len(), 2);
    assert_eq!(scene.subtree(root).len(), 4);
}

#[test]
fn instantiate_registers_every_resource() {
    let assets = AssetServer::new();
    let mut scene = Scene::new();

    scene.instantiate(&rig_prefab(), &assets, "Taunt");

    assert_eq!(assets.geometries.len(), 2);
    assert_eq!(assets.materials.len(), 3);
    assert_eq!(assets.textures.len(), 1);
}

#[test]
fn instantiating_twice_creates_independent_copies() {
    let assets = AssetServer::new();
    let mut scene = Scene::new();
    let prefab = rig_prefab();

    let first = scene.instantiate(&prefab, &assets, "A");
    let second = scene.instantiate(&prefab, &assets, "B");
    scene.remove_node(first);

    assert!(scene.contains(second));
    assert_eq!(scene.subtree(second).len(), 4);
    assert_eq!(assets.geometries.len(), 4, "removal leaves resources to the caller");
}

// ============================================================================
// Camera
// ============================================================================

#[test]
fn camera_resize_updates_aspect() {
    let mut scene = Scene::new();
    scene.resize(800, 400);
    assert!(approx(scene.camera.aspect, 2.0));
}

#[test]
fn camera_ignores_zero_height() {
    let mut scene = Scene::new();
    scene.resize(800, 400);
    let before = scene.camera.projection_matrix();

    scene.resize(800, 0);

    assert!(approx(scene.camera.aspect, 2.0));
    assert_eq!(scene.camera.projection_matrix(), before);
}

#[test]
fn camera_from_settings_looks_at_target() {
    let assets = AssetServer::new();
    let scene = Scene::with_stage(
        &StageSettings::default(),
        &CameraSettings::default(),
        1.5,
        &assets,
    );
    let camera = &scene.camera;
    assert_eq!(camera.position, Vec3::new(100.0, 200.0, 300.0));
    assert_eq!(camera.target, Vec3::new(0.0, 100.0, 0.0));
    assert!(approx(camera.fov, 45f32.to_radians()));

    let target_in_view = camera.view_matrix().transform_point3(camera.target);
    assert!(target_in_view.x.abs() < 1e-3);
    assert!(target_in_view.y.abs() < 1e-3);
    assert!(target_in_view.z < 0.0);
}
