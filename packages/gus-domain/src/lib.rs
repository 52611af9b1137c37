pub mod entity;
pub mod gate;
pub mod selection;

pub use entity::{RawSearchResponse, RawUser, UserEntity, map_users};
pub use gate::{GateStatus, RateLimitGate};
