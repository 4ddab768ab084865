//! Uniform interior points for district polygons.
//!
//! Points are drawn from the bounding box and kept only when they fall
//! strictly inside the area. The retry loop is bounded; once it runs out the
//! sampler switches to drawing from an ear-cut triangulation of the area,
//! which cannot stall on thin or strongly concave districts.

use geo::{Area, Contains, Coord, MultiPolygon, Point, Rect, Triangle, TriangulateEarcut};
use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};
use thiserror::Error;
use tracing::warn;

use crate::boundary::{validate_area, ShapeDefect};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Triangle draws allowed after the rejection loop gives up.
const FALLBACK_ATTEMPTS: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SamplingError {
    #[error("polygon is degenerate: {0}")]
    Degenerate(#[from] ShapeDefect),
    #[error("no interior point found after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointSampler {
    max_attempts: u32,
}

impl Default for PointSampler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl PointSampler {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn sample<R: Rng + ?Sized>(
        &self,
        area: &MultiPolygon<f64>,
        rng: &mut R,
    ) -> Result<Point<f64>, SamplingError> {
        validate_area(area)?;
        let bounds = bounding_box(area).ok_or(ShapeDefect::Empty)?;
        self.sample_within(area, &bounds, rng)
    }

    /// Samples an area already accepted by `validate_area`, with its
    /// precomputed exterior bounding box.
    pub(crate) fn sample_within<R: Rng + ?Sized>(
        &self,
        area: &MultiPolygon<f64>,
        bounds: &Rect<f64>,
        rng: &mut R,
    ) -> Result<Point<f64>, SamplingError> {
        for _ in 0..self.max_attempts {
            let candidate = point_in_rect(bounds, rng);
            if area.contains(&candidate) {
                return Ok(candidate);
            }
        }

        warn!(
            attempts = self.max_attempts,
            "rejection sampling exhausted, falling back to triangulation"
        );
        sample_triangulated(area, rng).map_err(|draws| self.exhausted(draws))
    }

    fn exhausted(&self, fallback_draws: u32) -> SamplingError {
        SamplingError::Exhausted {
            attempts: self.max_attempts.saturating_add(fallback_draws),
        }
    }
}

/// Min/max over the exterior ring of each member polygon.
pub(crate) fn bounding_box(area: &MultiPolygon<f64>) -> Option<Rect<f64>> {
    let mut coords = area.iter().flat_map(|polygon| polygon.exterior().coords());
    let first = *coords.next()?;
    let (min, max) = coords.fold((first, first), |(min, max), c| {
        (
            Coord {
                x: min.x.min(c.x),
                y: min.y.min(c.y),
            },
            Coord {
                x: max.x.max(c.x),
                y: max.y.max(c.y),
            },
        )
    });
    Some(Rect::new(min, max))
}

fn point_in_rect<R: Rng + ?Sized>(bounds: &Rect<f64>, rng: &mut R) -> Point<f64> {
    let lat = bounds.min().y + rng.gen::<f64>() * bounds.height();
    let lng = bounds.min().x + rng.gen::<f64>() * bounds.width();
    Point::new(lng, lat)
}

/// On failure, returns how many triangle draws were made.
fn sample_triangulated<R: Rng + ?Sized>(
    area: &MultiPolygon<f64>,
    rng: &mut R,
) -> Result<Point<f64>, u32> {
    let triangles: Vec<Triangle<f64>> = area
        .iter()
        .flat_map(|polygon| polygon.earcut_triangles())
        .collect();
    let Ok(weights) = WeightedIndex::new(triangles.iter().map(|t| t.unsigned_area())) else {
        return Err(0);
    };

    for _ in 0..FALLBACK_ATTEMPTS {
        let candidate = point_in_triangle(&triangles[weights.sample(rng)], rng);
        if area.contains(&candidate) {
            return Ok(candidate);
        }
    }
    Err(FALLBACK_ATTEMPTS)
}

fn point_in_triangle<R: Rng + ?Sized>(triangle: &Triangle<f64>, rng: &mut R) -> Point<f64> {
    let [a, b, c] = triangle.to_array();
    let mut u = rng.gen::<f64>();
    let mut v = rng.gen::<f64>();
    if u + v > 1.0 {
        u = 1.0 - u;
        v = 1.0 - v;
    }
    Point::new(
        a.x + u * (b.x - a.x) + v * (c.x - a.x),
        a.y + u * (b.y - a.y) + v * (c.y - a.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, LineString, Polygon};
    use rand::{rngs::mock::StepRng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn unit_square() -> MultiPolygon<f64> {
        MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ]])
    }

    #[test]
    fn samples_stay_strictly_inside() {
        let area = unit_square();
        let sampler = PointSampler::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let point = sampler.sample(&area, &mut rng).unwrap();
            assert!(area.contains(&point));
            assert!(point.x() > 0.0 && point.x() < 1.0);
            assert!(point.y() > 0.0 && point.y() < 1.0);
        }
    }

    #[test]
    fn fixed_random_source_gives_fixed_point() {
        let area = unit_square();
        let sampler = PointSampler::default();
        let mut first = StepRng::new(1 << 63, 0);
        let mut second = StepRng::new(1 << 63, 0);
        let a = sampler.sample(&area, &mut first).unwrap();
        let b = sampler.sample(&area, &mut second).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Point::new(0.5, 0.5));
    }

    #[test]
    fn points_in_holes_are_rejected() {
        let ring = |pts: Vec<(f64, f64)>| LineString::from(pts);
        let area = MultiPolygon::new(vec![Polygon::new(
            ring(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
            vec![ring(vec![(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)])],
        )]);
        let sampler = PointSampler::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..300 {
            let point = sampler.sample(&area, &mut rng).unwrap();
            let in_hole = point.x() > 1.0 && point.x() < 3.0 && point.y() > 1.0 && point.y() < 3.0;
            assert!(!in_hole, "{point:?} landed in the hole");
        }
    }

    #[test]
    fn sliver_falls_back_to_triangulation() {
        // Diagonal sliver: almost all of its bounding box lies outside.
        let area = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 100.0, y: 100.0),
            (x: 100.0, y: 100.001),
        ]]);
        let sampler = PointSampler::new(1);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..50 {
            let point = sampler.sample(&area, &mut rng).unwrap();
            assert!(area.contains(&point));
        }
    }

    #[test]
    fn corner_only_random_source_is_exhausted() {
        let sampler = PointSampler::new(10);
        let mut rng = StepRng::new(0, 0);
        let err = sampler.sample(&unit_square(), &mut rng).unwrap_err();
        assert_eq!(
            err,
            SamplingError::Exhausted {
                attempts: 10 + FALLBACK_ATTEMPTS
            }
        );
    }

    #[test]
    fn untriangulable_area_reports_no_fallback_draws() {
        let flat = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 2.0, y: 0.0),
        ]]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(sample_triangulated(&flat, &mut rng), Err(0));

        let bounds = bounding_box(&flat).unwrap();
        let err = PointSampler::new(5)
            .sample_within(&flat, &bounds, &mut rng)
            .unwrap_err();
        assert_eq!(err, SamplingError::Exhausted { attempts: 5 });
    }

    #[test]
    fn exhausted_count_saturates() {
        assert_eq!(
            PointSampler::new(u32::MAX).exhausted(FALLBACK_ATTEMPTS),
            SamplingError::Exhausted { attempts: u32::MAX }
        );
    }

    #[test]
    fn degenerate_polygons_are_rejected_up_front() {
        let line = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 2.0, y: 2.0),
        ]]);
        let err = PointSampler::default()
            .sample(&line, &mut ChaCha8Rng::seed_from_u64(1))
            .unwrap_err();
        assert_eq!(err, SamplingError::Degenerate(ShapeDefect::ZeroArea));

        let empty = MultiPolygon::<f64>::new(vec![]);
        let err = PointSampler::default()
            .sample(&empty, &mut ChaCha8Rng::seed_from_u64(1))
            .unwrap_err();
        assert_eq!(err, SamplingError::Degenerate(ShapeDefect::Empty));
    }

    #[test]
    fn bounding_box_spans_all_parts() {
        let area = MultiPolygon::new(vec![
            polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)],
            polygon![(x: 5.0, y: 5.0), (x: 6.0, y: 5.0), (x: 6.0, y: 7.0)],
        ]);
        let rect = bounding_box(&area).unwrap();
        assert_eq!(rect.min(), Coord { x: 0.0, y: 0.0 });
        assert_eq!(rect.max(), Coord { x: 6.0, y: 7.0 });
    }
}
