// Application layer - Preparation pipeline and use cases
pub mod chart_service;
pub mod pipeline;
pub mod sample_repository;
