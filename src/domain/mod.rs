// Domain layer - Records, chart models and label formatting
pub mod chart;
pub mod error;
pub mod labels;
pub mod record;
