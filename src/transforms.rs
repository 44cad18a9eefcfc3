/*

    Named transformations referenced by id from a
    transform expression (see json_parser::parse_transform_expression).

    Data layout of each entry's "_data":
    - Scaling:     "sx sy sz" (or a single uniform "s")
    - Translation: "tx ty tz"
    - Rotation:    "angle_degrees ax ay az"

    @date: Oct, 2025
    @author: bartu
*/

use crate::prelude::*;
use crate::json_structs::SingleOrVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Scaling,
    Translation,
    Rotation,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TransformEntry {
    #[serde(rename = "_id", deserialize_with = "deser_usize")]
    pub id: usize,
    #[serde(rename = "_data", deserialize_with = "deser_float_vec")]
    pub data: Vec<Float>,
}

impl TransformEntry {
    pub fn get_mat4(&self, kind: TransformKind) -> Result<Matrix4, String> {
        let d = &self.data;
        match (kind, d.len()) {
            (TransformKind::Scaling, 1) => Ok(Matrix4::from_scale(Vector3::splat(d[0]))),
            (TransformKind::Scaling, 3) => Ok(Matrix4::from_scale(Vector3::new(d[0], d[1], d[2]))),
            (TransformKind::Translation, 3) => Ok(Matrix4::from_translation(Vector3::new(d[0], d[1], d[2]))),
            (TransformKind::Rotation, 4) => {
                let axis = Vector3::new(d[1], d[2], d[3]);
                if approx_zero(axis.length_squared()) {
                    return Err(format!("rotation {} has a zero axis", self.id));
                }
                Ok(Matrix4::from_axis_angle(axis.normalize(), d[0].to_radians()))
            }
            (kind, n) => Err(format!("{:?} {} has {} values", kind, self.id, n)),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Transformations {
    #[serde(rename = "Scaling")]
    pub scalings: SingleOrVec<TransformEntry>,
    #[serde(rename = "Translation")]
    pub translations: SingleOrVec<TransformEntry>,
    #[serde(rename = "Rotation")]
    pub rotations: SingleOrVec<TransformEntry>,
}

impl Transformations {
    pub fn find(&self, kind: TransformKind, id: usize) -> Option<&TransformEntry> {
        let list = match kind {
            TransformKind::Scaling => &self.scalings,
            TransformKind::Translation => &self.translations,
            TransformKind::Rotation => &self.rotations,
        };
        list.iter().find(|e| e.id == id)
    }
}
