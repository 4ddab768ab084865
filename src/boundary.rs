//! District boundaries and the GeoJSON source they are read from.

use std::{fmt, fs, path::Path};

use geo::{Area, Coord, MultiPolygon, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::geojson::{self, FeatureCollection, GeometryShapeError, Properties};

/// Position of a boundary in the loaded sequence. Stable for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundaryId(u32);

impl BoundaryId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("boundary count fits in u32"))
    }
}

impl fmt::Display for BoundaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A named district polygon. Holes and multi-part districts are allowed.
#[derive(Debug, Clone)]
pub struct Boundary {
    name: String,
    area: MultiPolygon<f64>,
}

impl Boundary {
    pub fn new(name: impl Into<String>, area: impl Into<MultiPolygon<f64>>) -> Self {
        Self {
            name: name.into(),
            area: area.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn area(&self) -> &MultiPolygon<f64> {
        &self.area
    }

    /// Box spanned by the exterior ring of every member polygon.
    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        crate::sampler::bounding_box(&self.area)
    }

    /// Rejects shapes that can never yield an interior point.
    pub fn validate(&self) -> Result<(), ShapeDefect> {
        validate_area(&self.area)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeDefect {
    #[error("no polygons")]
    Empty,
    #[error("non-finite coordinate")]
    NonFinite,
    #[error("no ring with at least three distinct vertices")]
    TooFewVertices,
    #[error("zero area")]
    ZeroArea,
}

pub(crate) fn validate_area(area: &MultiPolygon<f64>) -> Result<(), ShapeDefect> {
    if area.0.is_empty() {
        return Err(ShapeDefect::Empty);
    }
    let finite = area.iter().all(|polygon| {
        std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .flat_map(|ring| ring.coords())
            .all(|c| c.x.is_finite() && c.y.is_finite())
    });
    if !finite {
        return Err(ShapeDefect::NonFinite);
    }
    if !area
        .iter()
        .any(|polygon| has_three_distinct(polygon.exterior().coords().copied()))
    {
        return Err(ShapeDefect::TooFewVertices);
    }
    if area.unsigned_area() <= 0.0 {
        return Err(ShapeDefect::ZeroArea);
    }
    Ok(())
}

/// Stops at the third distinct vertex, so long rings cost one short scan.
fn has_three_distinct(coords: impl IntoIterator<Item = Coord<f64>>) -> bool {
    let mut first = None;
    let mut second = None;
    for coord in coords {
        match (first, second) {
            (None, _) => first = Some(coord),
            (Some(a), None) if a != coord => second = Some(coord),
            (Some(a), Some(b)) if a != coord && b != coord => return true,
            _ => {}
        }
    }
    false
}

#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("failed to read boundary file: {0}")]
    Io(#[from] std::io::Error),
    #[error("boundary file is not a GeoJSON feature collection: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("boundary file contains no features")]
    Empty,
    #[error("feature {index} has no geometry")]
    MissingGeometry { index: usize },
    #[error("feature {index} has an unusable geometry: {reason}")]
    Geometry {
        index: usize,
        reason: GeometryShapeError,
    },
    #[error("feature {index} ({name}) is degenerate: {defect}")]
    Degenerate {
        index: usize,
        name: String,
        defect: ShapeDefect,
    },
}

pub const DEFAULT_NAME_PROPERTY: &str = "NAME";

/// Reads district boundaries from a GeoJSON `FeatureCollection`.
pub struct BoundarySource {
    name_property: String,
}

impl Default for BoundarySource {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_PROPERTY)
    }
}

impl BoundarySource {
    pub fn new(name_property: impl Into<String>) -> Self {
        Self {
            name_property: name_property.into(),
        }
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<Boundary>, BoundaryError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let boundaries = self.parse(&text)?;
        info!(path = %path.display(), count = boundaries.len(), "loaded boundaries");
        Ok(boundaries)
    }

    pub fn parse(&self, text: &str) -> Result<Vec<Boundary>, BoundaryError> {
        let collection: FeatureCollection<Properties> = serde_json::from_str(text)?;
        if collection.features.is_empty() {
            return Err(BoundaryError::Empty);
        }

        let mut boundaries = Vec::with_capacity(collection.features.len());
        for (index, feature) in collection.features.iter().enumerate() {
            let geometry = feature
                .geometry
                .as_ref()
                .ok_or(BoundaryError::MissingGeometry { index })?;
            let area = geojson::to_multi_polygon(geometry)
                .map_err(|reason| BoundaryError::Geometry { index, reason })?;
            let name = feature
                .properties
                .as_ref()
                .and_then(|props| props.get(&self.name_property))
                .and_then(|value| value.as_str())
                .map(str::to_owned)
                .unwrap_or_else(|| format!("District {index}"));
            let boundary = Boundary::new(name, area);
            boundary
                .validate()
                .map_err(|defect| BoundaryError::Degenerate {
                    index,
                    name: boundary.name.clone(),
                    defect,
                })?;
            debug!(index, name = boundary.name(), "parsed boundary");
            boundaries.push(boundary);
        }
        Ok(boundaries)
    }
}
