//! Minimal GeoJSON wire types.
//!
//! Only the shapes the game exchanges with the map layer are modelled:
//! feature collections of points (resources) and polygons (districts).

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// `[longitude, latitude, ..]`; trailing members such as altitude are ignored.
pub type Position = Vec<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionTag {
    FeatureCollection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureTag {
    Feature,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection<P> {
    #[serde(rename = "type")]
    pub tag: CollectionTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub features: Vec<Feature<P>>,
}

impl<P> FeatureCollection<P> {
    pub fn new(name: Option<String>, features: Vec<Feature<P>>) -> Self {
        Self {
            tag: CollectionTag::FeatureCollection,
            name,
            features,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature<P> {
    #[serde(rename = "type")]
    pub tag: FeatureTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: Option<Geometry>,
    pub properties: P,
}

impl<P> Feature<P> {
    pub fn new(id: Option<Value>, geometry: Geometry, properties: P) -> Self {
        Self {
            tag: FeatureTag::Feature,
            id,
            geometry: Some(geometry),
            properties,
        }
    }
}

/// Free-form property bag used when reading third-party boundary files.
pub type Properties = Option<Map<String, Value>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    pub fn point(lng: f64, lat: f64) -> Self {
        Geometry::Point {
            coordinates: vec![lng, lat],
        }
    }

    pub fn from_multi_polygon(area: &MultiPolygon<f64>) -> Self {
        let coordinates = area
            .iter()
            .map(|polygon| {
                std::iter::once(polygon.exterior())
                    .chain(polygon.interiors())
                    .map(|ring| ring.coords().map(|c| vec![c.x, c.y]).collect::<Vec<_>>())
                    .collect::<Vec<_>>()
            })
            .collect();
        Geometry::MultiPolygon { coordinates }
    }
}

/// Why a geometry could not be turned into an area.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryShapeError {
    #[error("geometry is not a Polygon or MultiPolygon")]
    NotAnArea,
    #[error("polygon has no rings")]
    EmptyPolygon,
    #[error("position has fewer than two coordinates")]
    ShortPosition,
}

pub(crate) fn to_multi_polygon(
    geometry: &Geometry,
) -> Result<MultiPolygon<f64>, GeometryShapeError> {
    match geometry {
        Geometry::Polygon { coordinates } => Ok(MultiPolygon::new(vec![polygon(coordinates)?])),
        Geometry::MultiPolygon { coordinates } => coordinates
            .iter()
            .map(|rings| polygon(rings))
            .collect::<Result<Vec<_>, _>>()
            .map(MultiPolygon::new),
        Geometry::Point { .. } | Geometry::Unsupported => Err(GeometryShapeError::NotAnArea),
    }
}

fn polygon(rings: &[Vec<Position>]) -> Result<Polygon<f64>, GeometryShapeError> {
    let mut rings = rings.iter().map(|ring| line_string(ring));
    let exterior = rings.next().ok_or(GeometryShapeError::EmptyPolygon)??;
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn line_string(ring: &[Position]) -> Result<LineString<f64>, GeometryShapeError> {
    ring.iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(GeometryShapeError::ShortPosition),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}
