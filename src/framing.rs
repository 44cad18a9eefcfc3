/*

    Framing input as loaded from JSON: the viewer settings,
    the model's vertex positions and an optional transform
    expression placing the model in the world.

    @date: Nov, 2025
    @author: bartu
*/

use crate::prelude::*;
use crate::bbox::BoundingBox;
use crate::json_structs::VertexData;
use crate::transforms::Transformations;

#[derive(Debug, Deserialize, Clone)]
#[derive(SmartDefault)]
#[serde(default)]
pub struct FramingSettings {
    /// Target length of the framed model's diagonal
    #[default = 1.0]
    #[serde(rename = "DiagonalSize", deserialize_with = "deser_float")]
    pub diagonal_size: Float,

    #[serde(rename = "ZUp", deserialize_with = "deser_bool")]
    pub z_up: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct FramingInput {
    #[serde(rename = "Framing")]
    pub settings: FramingSettings,

    #[serde(rename = "Transformations")]
    pub transformations: Transformations,

    #[serde(rename = "Transform")]
    pub transform_names: Option<String>,

    #[serde(rename = "VertexData")]
    pub vertex_data: VertexData,
}

#[derive(Debug, Clone)]
pub struct FramingReport {
    pub bbox: BoundingBox,
    /// Model-to-world matrix, None when no transform was given
    pub world_transform: Option<Matrix4>,
    /// bbox.transform(world), two-corner
    pub world_bbox: Option<BoundingBox>,
    /// bbox.transform_corners(world)
    pub world_bbox_tight: Option<BoundingBox>,
    pub centering: Matrix4,
}

impl FramingInput {

    pub fn world_transform(&self) -> Option<Matrix4> {
        self.transform_names
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|expr| parse_transform_expression(expr, &self.transformations))
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points_par(self.vertex_data.as_slice())
    }

    pub fn frame(&self) -> FramingReport {
        let bbox = self.bounding_box();
        if bbox.is_empty() {
            warn!("No vertices given, bounding box is empty");
        }
        debug!("Model bounding box {}", bbox);

        let world_transform = self.world_transform();
        let world_bbox = world_transform.map(|m| bbox.transform(&m));
        let world_bbox_tight = world_transform.map(|m| bbox.transform_corners(&m));

        // The viewer frames the model as it sits in the world when a
        // transform is present. The tight box is used so rotations are
        // not cut off.
        let framed = world_bbox_tight.unwrap_or(bbox);
        let centering = framed.get_centering_matrix(self.settings.diagonal_size, self.settings.z_up);

        FramingReport {
            bbox,
            world_transform,
            world_bbox,
            world_bbox_tight,
            centering,
        }
    }
}
