// Infrastructure layer - Configuration and sample sources
pub mod config;
pub mod fixture_repository;
