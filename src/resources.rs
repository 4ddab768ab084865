//! Resource kinds, their fixed contributions, and placed resource points.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use geo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::boundary::BoundaryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Office,
    #[serde(rename = "Natural Resource")]
    NaturalResource,
    Housing,
    School,
}

impl ResourceKind {
    /// Every kind, in placement order.
    pub const CATALOG: [ResourceKind; 4] = [
        ResourceKind::Office,
        ResourceKind::NaturalResource,
        ResourceKind::Housing,
        ResourceKind::School,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Office => "Office",
            ResourceKind::NaturalResource => "Natural Resource",
            ResourceKind::Housing => "Housing",
            ResourceKind::School => "School",
        }
    }

    pub fn contribution(self) -> Contribution {
        match self {
            ResourceKind::Office => Contribution::new(4, 1, 0, 0),
            ResourceKind::NaturalResource => Contribution::new(2, 0, 3, 0),
            ResourceKind::Housing => Contribution::new(0, 0, 0, 5),
            ResourceKind::School => Contribution::new(1, 4, 0, 0),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource kind '{0}'")]
pub struct UnknownResourceKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::CATALOG
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| UnknownResourceKind(s.to_string()))
    }
}

/// What a single resource point adds to its district.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub jobs: u32,
    pub education: u32,
    pub natural_resource: u32,
    pub housing: u32,
}

impl Contribution {
    pub const fn new(jobs: u32, education: u32, natural_resource: u32, housing: u32) -> Self {
        Self {
            jobs,
            education,
            natural_resource,
            housing,
        }
    }
}

impl Add for Contribution {
    type Output = Contribution;

    fn add(self, rhs: Self) -> Self::Output {
        Contribution {
            jobs: self.jobs + rhs.jobs,
            education: self.education + rhs.education,
            natural_resource: self.natural_resource + rhs.natural_resource,
            housing: self.housing + rhs.housing,
        }
    }
}

impl AddAssign for Contribution {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Contribution {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Contribution::default(), Add::add)
    }
}

/// A placed resource marker. Never changes after generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourcePoint {
    position: Point<f64>,
    kind: ResourceKind,
    owner: BoundaryId,
}

impl ResourcePoint {
    pub fn new(position: Point<f64>, kind: ResourceKind, owner: BoundaryId) -> Self {
        Self {
            position,
            kind,
            owner,
        }
    }

    pub fn position(&self) -> Point<f64> {
        self.position
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn owner(&self) -> BoundaryId {
        self.owner
    }
}

/// Properties attached to each resource feature handed to the map layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceProperties {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub owner: BoundaryId,
}

impl From<&ResourcePoint> for ResourceProperties {
    fn from(point: &ResourcePoint) -> Self {
        Self {
            kind: point.kind,
            owner: point.owner,
        }
    }
}
