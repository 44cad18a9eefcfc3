/*

    Declare data structs needed to parse JSON.

    - SingleOrVec
    - VertexData: vertex positions given as a string
      of numbers, with their component layout in "_type"

    @date: 13 Oct, 2025
    @author: Bartu
*/

use serde::{Deserialize, de::{Deserializer}};
use smart_default::SmartDefault;
use tracing::{warn};

use crate::json_parser::{deser_vertex_data};
use crate::numeric::{Vector3};

#[derive(Debug, Clone, SmartDefault)]
pub struct VertexData {
    pub(crate) _data: Vec<Vector3>,
    #[default = "xyz"]
    pub(crate) _type: String,
}

impl<'de> Deserialize<'de> for VertexData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(rename = "_data", default, deserialize_with = "deser_vertex_data")]
            _data: Vec<Vector3>,
            #[serde(rename = "_type", default)]
            _type: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        let _type = if helper._type.is_empty() { String::from("xyz") } else { helper._type };
        Ok(VertexData {
            _data: helper._data,
            _type,
        })
    }
}

impl VertexData {
    pub fn len(&self) -> usize {
        self._data.len()
    }

    pub fn as_slice(&self) -> &[Vector3] {
        &self._data
    }

    /// If given vertex data has a component layout other than xyz
    /// (a permutation of xyz, e.g. "zxy" means each triple is z, x, y),
    /// reorder every vertex to xyz. Returns false if nothing changed.
    pub fn normalize_to_xyz(&mut self) -> bool {
        if self._type == "xyz" {
            return false; // already as expected
        }

        // slot[j] = which output axis the j-th stored component belongs to
        let mut slot = [0usize; 3];
        let mut seen = [false; 3];
        let layout: Vec<char> = self._type.to_ascii_lowercase().chars().collect();
        let valid = layout.len() == 3 && layout.iter().enumerate().all(|(j, c)| {
            let axis = match *c {
                'x' => 0,
                'y' => 1,
                'z' => 2,
                _ => return false,
            };
            if seen[axis] {
                return false;
            }
            seen[axis] = true;
            slot[j] = axis;
            true
        });

        if !valid {
            warn!("Unknown vertex data type '{}', assuming xyz", self._type);
            self._type = "xyz".to_string();
            return false;
        }

        for v in self._data.iter_mut() {
            let stored = [v.x, v.y, v.z];
            let mut out = Vector3::ZERO;
            for j in 0..3 {
                out[slot[j]] = stored[j];
            }
            *v = out;
        }

        self._type = "xyz".to_string();
        true
    }
}


// To handle JSON file having a single <object>
// or an array of <object>s
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum SingleOrVec<T> {
    Empty,
    Single(T),
    Multiple(Vec<T>),
}

impl<T> SingleOrVec<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            SingleOrVec::Empty => std::slice::Iter::default(),
            SingleOrVec::Single(t) => std::slice::from_ref(t).iter(),
            SingleOrVec::Multiple(vec) => vec.iter(),
        }
    }
}

impl<T> Default for SingleOrVec<T> {
    fn default() -> Self {
        SingleOrVec::Empty
    }
}
