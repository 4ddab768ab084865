use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    boundary::{validate_area, Boundary, BoundaryId, ShapeDefect},
    resources::{ResourceKind, ResourcePoint},
    sampler::{bounding_box, PointSampler, SamplingError},
};

pub const DEFAULT_EXTRA_RESOURCES: usize = 3;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no boundaries to seed")]
    NoBoundaries,
    #[error("could not place resources in boundary {id} ({name}): {source}")]
    Sampling {
        id: BoundaryId,
        name: String,
        #[source]
        source: SamplingError,
    },
}

/// Seeds every district with one point of each kind plus a few random extras.
#[derive(Debug, Clone, Copy)]
pub struct ResourceGenerator {
    sampler: PointSampler,
    extra_per_boundary: usize,
}

impl Default for ResourceGenerator {
    fn default() -> Self {
        Self::new(PointSampler::default(), DEFAULT_EXTRA_RESOURCES)
    }
}

impl ResourceGenerator {
    pub fn new(sampler: PointSampler, extra_per_boundary: usize) -> Self {
        Self {
            sampler,
            extra_per_boundary,
        }
    }

    /// Points produced for each boundary.
    pub fn points_per_boundary(&self) -> usize {
        ResourceKind::CATALOG.len() + self.extra_per_boundary
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        boundaries: &[Boundary],
        rng: &mut R,
    ) -> Result<Vec<ResourcePoint>, GenerationError> {
        if boundaries.is_empty() {
            return Err(GenerationError::NoBoundaries);
        }

        let mut points = Vec::with_capacity(boundaries.len() * self.points_per_boundary());
        for (index, boundary) in boundaries.iter().enumerate() {
            let owner = BoundaryId::from_index(index);
            let before = points.len();
            self.seed_boundary(owner, boundary, rng, &mut points)
                .map_err(|source| GenerationError::Sampling {
                    id: owner,
                    name: boundary.name().to_string(),
                    source,
                })?;
            debug!(
                owner = owner.raw(),
                name = boundary.name(),
                placed = points.len() - before,
                "seeded boundary"
            );
        }
        info!(
            boundaries = boundaries.len(),
            points = points.len(),
            "generated resource points"
        );
        Ok(points)
    }

    fn seed_boundary<R: Rng + ?Sized>(
        &self,
        owner: BoundaryId,
        boundary: &Boundary,
        rng: &mut R,
        out: &mut Vec<ResourcePoint>,
    ) -> Result<(), SamplingError> {
        let area = boundary.area();
        validate_area(area)?;
        let bounds = bounding_box(area).ok_or(ShapeDefect::Empty)?;

        for kind in ResourceKind::CATALOG {
            let position = self.sampler.sample_within(area, &bounds, rng)?;
            out.push(ResourcePoint::new(position, kind, owner));
        }
        for _ in 0..self.extra_per_boundary {
            let kind = ResourceKind::CATALOG[rng.gen_range(0..ResourceKind::CATALOG.len())];
            let position = self.sampler.sample_within(area, &bounds, rng)?;
            out.push(ResourcePoint::new(position, kind, owner));
        }
        Ok(())
    }
}
