pub mod boundary;
pub mod generator;
pub mod geojson;
pub mod player;
pub mod resources;
pub mod rng;
pub mod sampler;
pub mod scenario;
pub mod session;
pub mod stats;
pub mod telemetry;
pub mod web;

pub use boundary::{Boundary, BoundaryId};
pub use generator::ResourceGenerator;
pub use player::Player;
pub use resources::{Contribution, ResourceKind, ResourcePoint};
pub use sampler::PointSampler;
pub use scenario::Scenario;
pub use session::{Session, SessionBuilder, SessionSettings};
pub use stats::AggregatedStats;
