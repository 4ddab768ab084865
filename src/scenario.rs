use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    boundary::{Boundary, BoundarySource, DEFAULT_NAME_PROPERTY},
    generator::DEFAULT_EXTRA_RESOURCES,
    player::PlayerDefaults,
    sampler::DEFAULT_MAX_ATTEMPTS,
    session::{Session, SessionBuilder, SessionSettings},
};

fn default_name_property() -> String {
    DEFAULT_NAME_PROPERTY.to_string()
}

fn default_extra_resources() -> usize {
    DEFAULT_EXTRA_RESOURCES
}

fn default_max_sample_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    /// GeoJSON file with the district polygons, relative to the scenario file.
    pub boundaries: PathBuf,
    #[serde(default = "default_name_property")]
    pub name_property: String,
    #[serde(default = "default_extra_resources")]
    pub extra_resources: usize,
    #[serde(default = "default_max_sample_attempts")]
    pub max_sample_attempts: u32,
    #[serde(default)]
    pub player: PlayerDefaults,
    #[serde(default)]
    pub map_bounds: Option<MapBounds>,
    #[serde(skip)]
    source_dir: PathBuf,
}

/// Pan limits for the map view, passed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let mut scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario.source_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        scenario
            .validate()
            .with_context(|| format!("Invalid scenario {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.name.trim().is_empty(), "scenario must define a name");
        ensure!(
            self.max_sample_attempts > 0,
            "max_sample_attempts must be greater than zero"
        );
        if let Some(bounds) = self.map_bounds {
            ensure!(
                bounds.west < bounds.east && bounds.south < bounds.north,
                "map_bounds must have west < east and south < north"
            );
        }
        Ok(())
    }

    pub fn boundaries_path(&self) -> PathBuf {
        self.source_dir.join(&self.boundaries)
    }

    pub fn load_boundaries(&self) -> Result<Vec<Boundary>> {
        let path = self.boundaries_path();
        BoundarySource::new(self.name_property.clone())
            .load(&path)
            .with_context(|| format!("Failed to load boundaries from {}", path.display()))
    }

    pub fn settings(&self, seed_override: Option<u64>) -> SessionSettings {
        SessionSettings {
            scenario_name: self.name.clone(),
            seed: seed_override.unwrap_or(self.seed),
            extra_resources: self.extra_resources,
            max_sample_attempts: self.max_sample_attempts,
            player: self.player,
            map_bounds: self.map_bounds,
        }
    }

    pub fn build_session(&self, seed_override: Option<u64>) -> Result<Session> {
        let boundaries = self.load_boundaries()?;
        let session = SessionBuilder::new(self.settings(seed_override))
            .with_boundaries(boundaries)
            .build()
            .with_context(|| format!("Failed to seed scenario '{}'", self.name))?;
        Ok(session)
    }
}
