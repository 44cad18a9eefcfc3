/*

    Provide utilities to parse framing input JSON files.

    The format is lenient in the same way for every field,
    let <a> be integer or float type, in the JSON file <a>
    can be given both in quotes (string) or as is.

    e.g. In JSON file both
    "DiagonalSize": "2" and "DiagonalSize": 2
    works as diagonal_size: Float in source code

    Vertex data and transformation data are strings of
    whitespace separated numbers e.g. "0 0 0 1 1 1".

    @date: 2 Oct, 2025
    @author: bartu
*/

use std::fmt::{self};
use std::str::FromStr;
use std::fs::File;
use std::io::BufReader;

use serde_json::{self};
use serde::{Deserialize, Deserializer};
use serde::de::{self};

use crate::prelude::*;
use crate::framing::{FramingInput};
use crate::transforms::{Transformations, TransformKind};

pub fn load_framing_input(path: &str) -> Result<FramingInput, Box<dyn std::error::Error>> {

    let span = tracing::span!(tracing::Level::INFO, "load_framing_input");
    let _enter = span.enter();

    // Open file
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    debug!("Reading file from {}", path);

    let mut input: FramingInput = serde_json::from_reader(reader)?;
    if input.vertex_data.normalize_to_xyz() {
        debug!("Vertex data converted to xyz layout");
    }
    info!("Loaded {} vertices", input.vertex_data.len());
    Ok(input)
}


pub(crate) fn deser_usize<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    /*
        Deserialize usize type given as either string or number in JSON
    */
    let s: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match s {
        serde_json::Value::Number(n) => n.as_u64()
            .map(|v| v as usize)
            .ok_or_else(|| de::Error::custom("Invalid integer")),
        serde_json::Value::String(s) => s.trim().parse::<usize>()
            .map_err(|_| de::Error::custom("Failed to parse integer from string")),
        t => Err(de::Error::custom(format!("Expected int or string, found {:#?}", t))),
    }
}

// Handles floats as string or number
pub(crate) fn deser_float<'de, D>(deserializer: D) -> Result<Float, D::Error>
where
    D: Deserializer<'de>,
{
    let s: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match s {
        serde_json::Value::Number(n) => n.as_f64()
            .map(|v| v as Float)
            .ok_or_else(|| de::Error::custom("Invalid float")),
        serde_json::Value::String(s) => s.trim().parse::<Float>()
            .map_err(|_| de::Error::custom("Failed to parse float from string")),
        t => Err(de::Error::custom(format!("Expected float or string, found {t}"))),
    }
}

pub(crate) fn deser_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct BoolVisitor;

    impl<'de> serde::de::Visitor<'de> for BoolVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a boolean or a string containing true/false")
        }

        fn visit_bool<E>(self, v: bool) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            Ok(v)
        }

        fn visit_str<E>(self, v: &str) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            match v.to_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                "1" => Ok(true),
                "0" => Ok(false),
                _ => Err(E::custom(format!("invalid bool '{}'", v))),
            }
        }

        fn visit_string<E>(self, v: String) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            self.visit_str(&v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            Ok(v != 0)
        }

        fn visit_i64<E>(self, v: i64) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            Ok(v != 0)
        }
    }

    deserializer.deserialize_any(BoolVisitor)
}

pub(crate) fn deser_numeric_vec<'de, D, N>(deserializer: D) -> Result<Vec<N>, D::Error>
where
    D: serde::Deserializer<'de>,
    N: FromStr,
    N::Err: fmt::Display,
{
    // Deserialize string of numbers separated by whitespace
    // into a vector of numbers, e.g. "0 2 3" in .json is deserialized
    // to Vec<N> where N is number-like.
    let s: String = Deserialize::deserialize(deserializer)?;
    let numbers = s
        .split_whitespace()
        .map(|x| x.parse::<N>().map_err(serde::de::Error::custom))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(numbers)
}

// Wrapper for deser_numeric_vec<Float>
pub(crate) fn deser_float_vec<'de, D>(deserializer: D) -> Result<Vec<Float>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deser_numeric_vec::<D, Float>(deserializer)
}

pub fn deser_vertex_data<'de, D>(deserializer: D) -> Result<Vec<Vector3>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    parse_string_vecvec3(&s).map_err(serde::de::Error::custom)
}


pub fn parse_string_vecvec3(s: &str) -> Result<Vec<Vector3>, String> {
    parse_string_vec(s, 3, |chunk| Ok(Vector3::new(chunk[0], chunk[1], chunk[2])))
}


fn parse_string_vec<T, F>(s: &str, chunk_len: usize, mut f: F) -> Result<Vec<T>, String>
where
    F: FnMut(&[Float]) -> Result<T, String>,
{
    let nums: Vec<Float> = s
        .split_whitespace()
        .map(|x| x.parse::<Float>().map_err(|e| e.to_string()))
        .collect::<Result<_, _>>()?;

    if nums.len() % chunk_len != 0 {
        return Err(format!("Input length not divisible by {}", chunk_len));
    }

    nums.chunks(chunk_len)
        .map(|chunk| f(chunk))
        .collect::<Result<Vec<_>, _>>()
}


/// Compose a transform expression such as "s1 t2 r1" into a single
/// matrix. Tokens are applied left to right, i.e. each one is
/// pre-multiplied onto the result so far. Unknown or missing
/// entries are skipped with a warning.
pub fn parse_transform_expression(
    expr: &str,
    global_transforms: &Transformations
) -> Matrix4 {

    let mut out = Matrix4::IDENTITY;

    for token in expr.split_whitespace() {
        debug!("Parsing token {}", token);
        if token.len() < 2 {
            warn!("Found token.len() < 2, skipping...");
            continue;
        }

        let (kind, id_str) = token.split_at(1);
        let id: usize = match id_str.parse() {
            Ok(n) => n,
            Err(_) => {
                warn!("Invalid transformation id in '{}'", token);
                continue;
            }
        };
        let kind = match kind {
            "t" | "T" => TransformKind::Translation,
            "s" | "S" => TransformKind::Scaling,
            "r" | "R" => TransformKind::Rotation,
            _ => {
                warn!("Unknown transform token '{}'", kind);
                continue;
            }
        };

        debug!("Searching {:?} of id '{}'...", kind, id);
        let Some(entry) = global_transforms.find(kind, id) else {
            warn!("No {:?} with id {} found, skipping '{}'", kind, id, token);
            continue;
        };
        match entry.get_mat4(kind) {
            Ok(mat) => {
                out = mat * out;
                debug!("After {:?}: {}", kind, out);
            }
            Err(e) => warn!("Skipping '{}': {}", token, e),
        }
    }

    out
}
