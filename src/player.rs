use serde::{Deserialize, Serialize};

use crate::boundary::{Boundary, BoundaryId};

fn default_population() -> u32 {
    10
}

fn default_money() -> u32 {
    10
}

/// Starting values handed to every player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDefaults {
    #[serde(default = "default_population")]
    pub population: u32,
    #[serde(default = "default_money")]
    pub money: u32,
}

impl Default for PlayerDefaults {
    fn default() -> Self {
        Self {
            population: default_population(),
            money: default_money(),
        }
    }
}

/// The player that owns one district. Population and money are placeholders
/// that nothing in the game changes yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub boundary_id: BoundaryId,
    pub name: String,
    pub population: u32,
    pub money: u32,
}

impl Player {
    pub fn new(boundary_id: BoundaryId, name: impl Into<String>, defaults: PlayerDefaults) -> Self {
        Self {
            boundary_id,
            name: name.into(),
            population: defaults.population,
            money: defaults.money,
        }
    }
}

/// One player per boundary, named after it.
pub fn generate_players(boundaries: &[Boundary], defaults: PlayerDefaults) -> Vec<Player> {
    boundaries
        .iter()
        .enumerate()
        .map(|(index, boundary)| {
            Player::new(BoundaryId::from_index(index), boundary.name(), defaults)
        })
        .collect()
}
