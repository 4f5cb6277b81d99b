use glam::{Vec3, Vec4};
use slotmap::SlotMap;

use crate::assets::{AssetServer, Prefab};
use crate::config::{CameraSettings, StageSettings};
use crate::resources::geometry::Geometry;
use crate::resources::material::{Material, MaterialKind, color_from_hex};
use crate::resources::mesh::Mesh;
use crate::scene::NodeHandle;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::node::Node;
use crate::scene::transform::Transform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Vec4,
    pub near: f32,
    pub far: f32,
}

/// Scene graph container.
///
/// Pure data: nodes and their components. Resources referenced by meshes
/// live in an [`AssetServer`] and are released explicitly by whoever retires
/// the nodes that use them.
pub struct Scene {
    nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    pub background: Option<Vec4>,
    pub fog: Option<Fog>,
    pub camera: Camera,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            background: Some(Vec4::new(0.0, 0.0, 0.0, 1.0)),
            fog: None,
            camera: Camera::from_settings(&CameraSettings::default(), 16.0 / 9.0),
        }
    }

    /// Builds the persistent stage: backdrop, fog, two lights, a ground
    /// plane and a grid. Stage resources are registered in `assets`.
    #[must_use]
    pub fn with_stage(
        stage: &StageSettings,
        camera: &CameraSettings,
        aspect: f32,
        assets: &AssetServer,
    ) -> Self {
        let mut scene = Self::new();
        let backdrop = color_from_hex(stage.background);

        scene.background = Some(backdrop);
        scene.fog = Some(Fog {
            color: backdrop,
            near: stage.fog_near,
            far: stage.fog_far,
        });
        scene.camera = Camera::from_settings(camera, aspect);

        let ground_tint = color_from_hex(0x0044_4444).truncate();
        let hemi = Light::new_hemisphere(Vec3::ONE, ground_tint, stage.light_intensity);
        scene.add_node(
            Node::new("HemisphereLight")
                .with_light(hemi)
                .with_transform(Transform::from_position(Vec3::new(0.0, 200.0, 0.0))),
        );

        let mut sun = Light::new_directional(Vec3::ONE, stage.light_intensity);
        sun.cast_shadows = stage.shadows;
        scene.add_node(
            Node::new("DirectionalLight")
                .with_light(sun)
                .with_transform(Transform::from_position(Vec3::new(0.0, 200.0, 100.0))),
        );

        let ground_geometry = assets
            .geometries
            .add(Geometry::plane(stage.ground_size, stage.ground_size));
        let ground_material = assets.materials.add(
            Material::new("Ground", MaterialKind::Phong)
                .with_color(color_from_hex(stage.ground_color))
                .with_depth_write(false),
        );
        let mut ground_mesh = Mesh::new(ground_geometry, ground_material);
        ground_mesh.receive_shadow = stage.shadows;
        scene.add_node(Node::new("Ground").with_mesh(ground_mesh));

        let grid_geometry = assets
            .geometries
            .add(Geometry::grid(stage.ground_size, stage.grid_divisions));
        let grid_material = assets.materials.add(
            Material::new("Grid", MaterialKind::Basic)
                .with_color(Vec4::new(0.0, 0.0, 0.0, 1.0))
                .with_opacity(stage.grid_opacity),
        );
        scene.add_node(Node::new("Grid").with_mesh(Mesh::new(grid_geometry, grid_material)));

        scene
    }

    /// Adds a node at the top level.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn add_to_parent(&mut self, mut child: Node, parent: NodeHandle) -> NodeHandle {
        if !self.nodes.contains_key(parent) {
            log::warn!("Parent node not found, adding '{}' at the top level", child.name);
            return self.add_node(child);
        }
        child.parent = Some(parent);
        let handle = self.nodes.insert(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        handle
    }

    /// Re-parents `child` under `parent`, detaching it from wherever it was.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::warn!("attach: node not found");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("attach: would create a cycle");
            return;
        }

        self.unlink(child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Removes a node and its whole subtree from the scene.
    ///
    /// Components are dropped with their nodes. Resources the meshes
    /// referenced stay in the asset server.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        if !self.nodes.contains_key(handle) {
            return;
        }
        self.unlink(handle);
        for node in self.subtree(handle) {
            self.nodes.remove(node);
        }
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &Node)> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Handles of `root` and all its descendants, depth-first, parents first.
    #[must_use]
    pub fn subtree(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            out.push(handle);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Visits `root` and all its descendants, parents first.
    pub fn traverse(&self, root: NodeHandle, mut visit: impl FnMut(NodeHandle, &Node)) {
        for handle in self.subtree(root) {
            if let Some(node) = self.nodes.get(handle) {
                visit(handle, node);
            }
        }
    }

    #[must_use]
    pub fn find_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        self.subtree(root)
            .into_iter()
            .find(|&h| self.nodes.get(h).is_some_and(|n| n.name == name))
    }

    /// Instantiates a prefab under a new top-level group node named `name`.
    ///
    /// Geometries, materials and textures are registered in `assets`; the
    /// returned root owns them through its meshes.
    pub fn instantiate(&mut self, prefab: &Prefab, assets: &AssetServer, name: &str) -> NodeHandle {
        let root = self.add_node(Node::new(name));
        let mut stack: Vec<(usize, NodeHandle)> =
            prefab.roots().into_iter().rev().map(|i| (i, root)).collect();

        while let Some((index, parent)) = stack.pop() {
            let Some(source) = prefab.nodes.get(index) else {
                continue;
            };

            let mut node = Node::new(source.name.clone().unwrap_or_default());
            if let Some(mesh) = &source.mesh {
                let geometry = assets.geometries.add(mesh.geometry.clone());
                let materials = mesh
                    .materials
                    .iter()
                    .map(|m| {
                        let mut material = Material::new(m.name.clone(), m.kind)
                            .with_color(Vec4::from_array(m.color));
                        if let Some(texture) = &m.map {
                            material = material.with_map(assets.textures.add(texture.clone()));
                        }
                        assets.materials.add(material)
                    })
                    .collect();
                node.mesh = Some(Mesh::with_materials(geometry, materials));
            }

            let handle = self.add_to_parent(node, parent);
            stack.extend(source.children.iter().rev().map(|&c| (c, handle)));
        }

        root
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    fn is_ancestor(&self, ancestor: NodeHandle, mut node: NodeHandle) -> bool {
        while let Some(parent) = self.nodes.get(node).and_then(|n| n.parent) {
            if parent == ancestor {
                return true;
            }
            node = parent;
        }
        false
    }

    fn unlink(&mut self, handle: NodeHandle) {
        let parent = self.nodes.get(handle).and_then(|n| n.parent);
        if let Some(p) = parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == handle)
            {
                n.children.remove(i);
            }
            if let Some(n) = self.nodes.get_mut(handle) {
                n.parent = None;
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == handle) {
            self.root_nodes.remove(i);
        }
    }
}
