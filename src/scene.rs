use crate::desc::{SCENE_VERSION, SceneDesc, TransformDesc};
use crate::mat3::Mat3;
use crate::pipeline::TransformList;
use crate::poly::Poly;

/// The whole application state: the base shape plus the transform list.
/// Owned explicitly and passed around (no globals), so the pipeline is
/// testable without any rendering surface.
#[derive(Clone, Debug)]
pub struct Scene {
    pub base: Poly,
    pub list: TransformList,
}

impl Scene {
    /// The transformed copy drawn on every render pass. The base is cloned
    /// and folded fresh each call; nothing accumulates across calls.
    pub fn rendered(&self) -> Poly {
        self.list.apply(&self.base)
    }

    pub fn from_desc(desc: &SceneDesc) -> Self {
        let base = if desc.poly.is_empty() {
            Poly::unit_square()
        } else {
            Poly::new(desc.poly.clone())
        };

        let mut list = TransformList::new();
        for t in &desc.transforms {
            match t {
                TransformDesc::Translate { x, y } => {
                    list.add_translate(*x, *y);
                }
                TransformDesc::Scale { x, y } => {
                    list.add_scale(*x, *y);
                }
                TransformDesc::Rotate { angle_deg } => {
                    list.add_rotate(*angle_deg);
                }
                TransformDesc::Matrix { rows, name } => {
                    list.add(
                        Mat3::from_rows(*rows),
                        name.clone().unwrap_or_else(|| "Custom".to_owned()),
                    );
                }
            }
        }

        Self { base, list }
    }

    /// Export for saving. Cells may have been hand-edited since construction,
    /// so every entry is written as raw rows plus its display name.
    pub fn to_desc(&self) -> SceneDesc {
        SceneDesc {
            version: SCENE_VERSION,
            poly: self.base.points().to_vec(),
            transforms: self
                .list
                .entries()
                .iter()
                .map(|e| TransformDesc::Matrix {
                    rows: *e.mat.rows(),
                    name: Some(e.name.clone()),
                })
                .collect(),
        }
    }
}

impl Default for Scene {
    /// Startup state: unit square base with a single 45 degree rotation.
    fn default() -> Self {
        let mut list = TransformList::new();
        list.add_rotate(45.0);
        Self {
            base: Poly::unit_square(),
            list,
        }
    }
}
