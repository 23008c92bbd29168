//! Infrastructure layer: DTOs for the wire and in-memory collaborator implementations.

pub mod dto;
pub mod repository;
