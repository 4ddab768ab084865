//! A seeded game session: districts, their players, and the resources placed
//! in them. Everything is generated once in [`SessionBuilder::build`] and
//! read-only afterwards.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::{
    boundary::{Boundary, BoundaryId},
    generator::{GenerationError, ResourceGenerator, DEFAULT_EXTRA_RESOURCES},
    geojson::{Feature, FeatureCollection, Geometry},
    player::{generate_players, Player, PlayerDefaults},
    resources::{ResourcePoint, ResourceProperties},
    rng::{RngManager, PLACEMENT_STREAM},
    sampler::{PointSampler, DEFAULT_MAX_ATTEMPTS},
    scenario::MapBounds,
    stats::{self, AggregatedStats},
};

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub scenario_name: String,
    pub seed: u64,
    pub extra_resources: usize,
    pub max_sample_attempts: u32,
    pub player: PlayerDefaults,
    pub map_bounds: Option<MapBounds>,
}

impl SessionSettings {
    pub fn new(scenario_name: impl Into<String>, seed: u64) -> Self {
        Self {
            scenario_name: scenario_name.into(),
            seed,
            extra_resources: DEFAULT_EXTRA_RESOURCES,
            max_sample_attempts: DEFAULT_MAX_ATTEMPTS,
            player: PlayerDefaults::default(),
            map_bounds: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("no boundary with id {0}")]
    UnknownBoundary(BoundaryId),
}

pub struct SessionBuilder {
    settings: SessionSettings,
    boundaries: Vec<Boundary>,
}

impl SessionBuilder {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            boundaries: Vec::new(),
        }
    }

    pub fn with_boundaries(mut self, boundaries: impl IntoIterator<Item = Boundary>) -> Self {
        self.boundaries.extend(boundaries);
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundaries.push(boundary);
        self
    }

    pub fn build(self) -> Result<Session, SessionError> {
        let mut rng = RngManager::new(self.settings.seed);
        let generator = ResourceGenerator::new(
            PointSampler::new(self.settings.max_sample_attempts),
            self.settings.extra_resources,
        );
        let resources = generator.generate(&self.boundaries, rng.stream(PLACEMENT_STREAM))?;
        let players = generate_players(&self.boundaries, self.settings.player);
        Ok(Session {
            settings: self.settings,
            generated_at: Utc::now(),
            boundaries: self.boundaries,
            players,
            resources,
        })
    }
}

#[derive(Debug)]
pub struct Session {
    settings: SessionSettings,
    generated_at: DateTime<Utc>,
    boundaries: Vec<Boundary>,
    players: Vec<Player>,
    resources: Vec<ResourcePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub scenario: String,
    pub seed: u64,
    pub generated_at: DateTime<Utc>,
    pub boundaries: usize,
    pub resources: usize,
    pub map_bounds: Option<MapBounds>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoundaryProperties {
    pub id: BoundaryId,
    pub name: String,
}

impl Session {
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn resources(&self) -> &[ResourcePoint] {
        &self.resources
    }

    pub fn player(&self, id: BoundaryId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Hover query: the owning player's record plus their resource totals.
    pub fn stats(&self, id: BoundaryId) -> Result<AggregatedStats, SessionError> {
        let player = self.player(id).ok_or(SessionError::UnknownBoundary(id))?;
        Ok(stats::aggregate(player, &self.resources))
    }

    pub fn all_stats(&self) -> Vec<AggregatedStats> {
        stats::aggregate_all(&self.players, &self.resources)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            scenario: self.settings.scenario_name.clone(),
            seed: self.settings.seed,
            generated_at: self.generated_at,
            boundaries: self.boundaries.len(),
            resources: self.resources.len(),
            map_bounds: self.settings.map_bounds,
        }
    }

    pub fn resources_geojson(&self) -> FeatureCollection<ResourceProperties> {
        let features = self
            .resources
            .iter()
            .map(|point| {
                let position = point.position();
                Feature::new(
                    None,
                    Geometry::point(position.x(), position.y()),
                    ResourceProperties::from(point),
                )
            })
            .collect();
        FeatureCollection::new(Some("Resources".to_string()), features)
    }

    pub fn boundaries_geojson(&self) -> FeatureCollection<BoundaryProperties> {
        let features = self
            .boundaries
            .iter()
            .enumerate()
            .map(|(index, boundary)| {
                let id = BoundaryId::from_index(index);
                Feature::new(
                    Some(json!(id.raw())),
                    Geometry::from_multi_polygon(boundary.area()),
                    BoundaryProperties {
                        id,
                        name: boundary.name().to_string(),
                    },
                )
            })
            .collect();
        FeatureCollection::new(Some("Boundaries".to_string()), features)
    }
}
