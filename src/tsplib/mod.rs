//! TSPLIB instances with geographical coordinates.
//!
//! Reads the subset of the TSPLIB format used by `GEO` instances such as
//! `gr137`:
//!
//! ```text
//! NAME: gr4
//! TYPE: TSP
//! EDGE_WEIGHT_TYPE: GEO
//! DISPLAY_DATA_TYPE: COORD_DISPLAY
//! NODE_COORD_SECTION
//! 1 71.17 -156.47
//! 2 64.51 -147.43
//! EOF
//! ```
//!
//! Other header keys (`COMMENT`, `DIMENSION`, ...) are ignored.

mod geo;

pub use geo::GeoPlace;

use crate::distance::{DistanceMatrix, Gene};
use std::collections::BTreeMap;
use std::path::Path;

/// Errors raised while reading a TSPLIB instance.
#[derive(Debug, thiserror::Error)]
pub enum TsplibError {
    #[error("failed to read TSPLIB source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source file can't be of type: {0}")]
    UnsupportedType(String),

    #[error("{0} edge weight type is not allowed to use")]
    UnsupportedEdgeWeightType(String),

    #[error("{0} display data type is not allowed to use")]
    UnsupportedDisplayDataType(String),

    #[error("malformed node coordinate on line {line}: {content:?}")]
    MalformedNode { line: usize, content: String },

    #[error("place {0} is defined more than once")]
    DuplicatePlace(Gene),

    #[error("unknown place {0}")]
    UnknownPlace(Gene),
}

/// A parsed `GEO` instance: a name and its places keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspInstance {
    name: String,
    places: BTreeMap<Gene, GeoPlace>,
}

impl TspInstance {
    /// Reads and parses a TSPLIB file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TsplibError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        parse(&source)
    }

    /// The `NAME` header, empty if absent.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn place(&self, id: Gene) -> Option<&GeoPlace> {
        self.places.get(&id)
    }

    /// Places in ascending id order.
    pub fn places(&self) -> impl Iterator<Item = &GeoPlace> + '_ {
        self.places.values()
    }

    /// Pairwise `GEO` distances between all places, keyed by place id.
    pub fn distance_matrix(&self) -> DistanceMatrix {
        DistanceMatrix::from_fn(self.places.keys().copied(), |a, b| {
            match (self.places.get(&a), self.places.get(&b)) {
                (Some(from), Some(to)) => from.distance_to(to),
                _ => 0,
            }
        })
    }

    /// The places visited by `tour`, in order.
    ///
    /// # Errors
    /// [`TsplibError::UnknownPlace`] for the first id not in the instance.
    pub fn path(&self, tour: &[Gene]) -> Result<Vec<&GeoPlace>, TsplibError> {
        tour.iter()
            .map(|&id| self.places.get(&id).ok_or(TsplibError::UnknownPlace(id)))
            .collect()
    }
}

/// Parses a TSPLIB `GEO` instance.
///
/// # Errors
/// Unsupported `TYPE`, `EDGE_WEIGHT_TYPE` or `DISPLAY_DATA_TYPE` values,
/// coordinate lines that are not `id latitude longitude`, and repeated ids.
pub fn parse(source: &str) -> Result<TspInstance, TsplibError> {
    let mut instance = TspInstance::default();
    let mut lines = source.lines().enumerate();

    for (_, line) in lines.by_ref() {
        let line = line.trim();
        if line == "NODE_COORD_SECTION" {
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "NAME" => instance.name = value.to_string(),
            "TYPE" if !value.eq_ignore_ascii_case("TSP") => {
                return Err(TsplibError::UnsupportedType(value.to_string()));
            }
            "EDGE_WEIGHT_TYPE" if value != "GEO" => {
                return Err(TsplibError::UnsupportedEdgeWeightType(value.to_string()));
            }
            "DISPLAY_DATA_TYPE" if value != "COORD_DISPLAY" => {
                return Err(TsplibError::UnsupportedDisplayDataType(value.to_string()));
            }
            _ => {}
        }
    }

    for (index, line) in lines {
        let content = line.trim();
        if content == "EOF" {
            break;
        }
        if content.is_empty() {
            continue;
        }
        let place = parse_node(content).ok_or_else(|| TsplibError::MalformedNode {
            line: index + 1,
            content: content.to_string(),
        })?;
        if instance.places.insert(place.id(), place).is_some() {
            return Err(TsplibError::DuplicatePlace(place.id()));
        }
    }

    tracing::debug!(
        name = %instance.name,
        places = instance.places.len(),
        "parsed TSPLIB instance"
    );
    Ok(instance)
}

fn parse_node(line: &str) -> Option<GeoPlace> {
    let mut fields = line.split_whitespace();
    let id = fields.next()?.parse().ok()?;
    let latitude = fields.next()?.parse().ok()?;
    let longitude = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(GeoPlace::new(id, latitude, longitude))
}
