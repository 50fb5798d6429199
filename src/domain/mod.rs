// Domain module: set collections, MILP models, encoders and decoder

pub mod decoder;
pub mod encoding;
pub mod models;
pub mod set_collection;
pub mod solver_service;
pub mod value_objects;

pub use decoder::*;
pub use models::*;
pub use set_collection::*;
pub use solver_service::*;
pub use value_objects::*;
