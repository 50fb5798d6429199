// Application layer: request mapping and solve orchestration

pub mod cover_service;
pub mod mappers;

pub use cover_service::SetCoverService;
pub use mappers::{CoverRequest, CoverResponse};
