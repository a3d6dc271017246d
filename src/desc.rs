use serde::{Deserialize, Serialize};

pub const SCENE_VERSION: u32 = 1;

/// On-disk scene description: the base polygon plus the ordered transform
/// list, as written by the user or exported from a running session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDesc {
    pub version: u32,
    /// Base polygon vertices. Empty means "use the default unit square".
    #[serde(default)]
    pub poly: Vec<[f64; 2]>,
    #[serde(default)]
    pub transforms: Vec<TransformDesc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransformDesc {
    Translate {
        x: f64,
        y: f64,
    },
    Scale {
        x: f64,
        y: f64,
    },
    Rotate {
        angle_deg: f64,
    },
    /// Raw rows for transforms that were hand-edited or composed; the builtin
    /// kinds above are preferred when the construction is known.
    Matrix {
        rows: [[f64; 3]; 3],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

pub fn parse_scene_json(json_text: &str) -> Result<SceneDesc, serde_json::Error> {
    serde_json::from_str(json_text)
}

pub fn scene_to_json(desc: &SceneDesc) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(desc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_scene() {
        let sample = r#"
        {
            "version": 1,
            "poly": [[0,0], [1,0], [1,1], [0,1]],
            "transforms": [
                { "kind": "rotate", "angle_deg": 45 },
                { "kind": "translate", "x": 2, "y": 0 },
                { "kind": "scale", "x": 2, "y": 2 },
                { "kind": "matrix", "rows": [[1,0,0],[0,1,0],[0,0,1]], "name": "Custom" }
            ]
        }
        "#;

        let desc = parse_scene_json(sample).expect("sample json should deserialize");
        assert_eq!(desc.version, 1);
        assert_eq!(desc.poly.len(), 4);
        assert_eq!(desc.transforms.len(), 4);
        assert_eq!(
            desc.transforms[0],
            TransformDesc::Rotate { angle_deg: 45.0 }
        );
        assert_eq!(
            desc.transforms[3],
            TransformDesc::Matrix {
                rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
                name: Some("Custom".to_owned()),
            }
        );
    }

    #[test]
    fn poly_and_transforms_default_to_empty() {
        let desc = parse_scene_json(r#"{ "version": 1 }"#).expect("minimal json");
        assert!(desc.poly.is_empty());
        assert!(desc.transforms.is_empty());
    }

    #[test]
    fn rejects_an_unknown_transform_kind() {
        let bad = r#"{ "version": 1, "transforms": [{ "kind": "shear", "x": 1 }] }"#;
        assert!(parse_scene_json(bad).is_err());
    }

    #[test]
    fn json_round_trip_preserves_the_desc() {
        let desc = SceneDesc {
            version: SCENE_VERSION,
            poly: vec![[0.0, 0.0], [2.0, 0.5]],
            transforms: vec![
                TransformDesc::Translate { x: 1.0, y: -1.0 },
                TransformDesc::Matrix {
                    rows: [[0.71, -0.71, 0.0], [0.71, 0.71, 0.0], [0.0, 0.0, 1.0]],
                    name: None,
                },
            ],
        };

        let json_text = scene_to_json(&desc).expect("desc should serialize");
        let back = parse_scene_json(&json_text).expect("serialized desc should parse");
        assert_eq!(back, desc);
    }
}
