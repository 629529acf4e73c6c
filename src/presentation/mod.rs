// Presentation layer - Views handed to the chart renderer
pub mod chart_view;
