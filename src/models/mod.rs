pub mod amenity;
pub mod base;
pub mod city;
pub mod entity;
pub mod error;
pub mod place;
pub mod registry;
pub mod review;
pub mod state;
pub mod user;

pub use amenity::Amenity;
pub use city::City;
pub use entity::{Entity, EntityKind, Fields, CLASS_TAG};
pub use error::ModelError;
pub use place::Place;
pub use registry::ClassRegistry;
pub use review::Review;
pub use state::State;
pub use user::User;
