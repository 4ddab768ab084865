//! Per-district totals, computed fresh for every query.

use serde::Serialize;

use crate::{
    boundary::BoundaryId,
    player::Player,
    resources::{Contribution, ResourcePoint},
};

/// A player's record merged with the totals of the resources they own.
/// Housing is carried along even though the hover panel does not show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedStats {
    #[serde(flatten)]
    pub player: Player,
    #[serde(flatten)]
    pub totals: Contribution,
}

impl AggregatedStats {
    pub fn jobs(&self) -> u32 {
        self.totals.jobs
    }

    pub fn education(&self) -> u32 {
        self.totals.education
    }

    pub fn natural_resource(&self) -> u32 {
        self.totals.natural_resource
    }

    pub fn housing(&self) -> u32 {
        self.totals.housing
    }
}

pub fn owned_by(
    points: &[ResourcePoint],
    owner: BoundaryId,
) -> impl Iterator<Item = &ResourcePoint> + '_ {
    points.iter().filter(move |point| point.owner() == owner)
}

pub fn aggregate(player: &Player, points: &[ResourcePoint]) -> AggregatedStats {
    let totals = owned_by(points, player.boundary_id)
        .map(|point| point.kind().contribution())
        .sum();
    AggregatedStats {
        player: player.clone(),
        totals,
    }
}

pub fn aggregate_all(players: &[Player], points: &[ResourcePoint]) -> Vec<AggregatedStats> {
    players
        .iter()
        .map(|player| aggregate(player, points))
        .collect()
}
