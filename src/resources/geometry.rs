use serde::{Deserialize, Serialize};

/// CPU-side vertex data for one mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub positions: Vec<[f32; 3]>,
    #[serde(default)]
    pub indices: Vec<u32>,
}

impl Geometry {
    #[must_use]
    pub fn new(name: impl Into<String>, positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            positions,
            indices,
        }
    }

    /// A `width` x `depth` quad lying in the XZ plane, centred on the origin.
    #[must_use]
    pub fn plane(width: f32, depth: f32) -> Self {
        let (hw, hd) = (width * 0.5, depth * 0.5);
        Self::new(
            "Plane",
            vec![[-hw, 0.0, -hd], [hw, 0.0, -hd], [hw, 0.0, hd], [-hw, 0.0, hd]],
            vec![0, 2, 1, 0, 3, 2],
        )
    }

    /// Line-list grid of `divisions` cells per side.
    #[must_use]
    pub fn grid(size: f32, divisions: u32) -> Self {
        let divisions = divisions.max(1);
        let half = size * 0.5;
        let step = size / divisions as f32;
        let mut positions = Vec::with_capacity(((divisions + 1) * 4) as usize);

        for i in 0..=divisions {
            let k = -half + i as f32 * step;
            positions.push([-half, 0.0, k]);
            positions.push([half, 0.0, k]);
            positions.push([k, 0.0, -half]);
            positions.push([k, 0.0, half]);
        }

        let indices = (0..positions.len() as u32).collect();
        Self::new("Grid", positions, indices)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}
