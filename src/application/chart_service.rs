// Chart service - Use case for preparing a screen's chart from raw samples
use crate::application::pipeline::{
    compute_extrema, extrema_of, normalize_series, prepare_records, sample_ticks,
    NormalizationMode,
};
use crate::application::sample_repository::SampleRepository;
use crate::domain::chart::{AxisDomain, ChartData, ChartPoint, SeriesData, SeriesExtrema, XTick};
use crate::domain::labels::{tooltip_label, x_tick_label};
use crate::domain::record::PreparedRecord;
use crate::infrastructure::config::{PipelineSettings, ScreenConfig, SeriesConfig};
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct ChartService {
    repository: Arc<dyn SampleRepository>,
    settings: PipelineSettings,
}

impl ChartService {
    pub fn new(repository: Arc<dyn SampleRepository>, settings: PipelineSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Build every screen, skipping (and logging) the ones that fail.
    pub fn build_charts(&self, screens: &[ScreenConfig]) -> Vec<ChartData> {
        let mut charts = Vec::with_capacity(screens.len());

        for screen in screens {
            match self.build_chart(screen) {
                Ok(chart) => charts.push(chart),
                Err(e) => tracing::error!("Error building chart {}: {:#}", screen.id, e),
            }
        }

        charts
    }

    pub fn build_chart(&self, screen: &ScreenConfig) -> anyhow::Result<ChartData> {
        let unit = screen.unit.clone().unwrap_or_default();
        let mut series_list = Vec::new();
        let mut prepared_list = Vec::new();

        for series_config in &screen.series {
            match self.prepare_series(series_config) {
                Ok(prepared) => prepared_list.push((series_config, prepared)),
                Err(e) => {
                    tracing::warn!(
                        "Skipping series {} for chart {}: {:#}",
                        series_config.id,
                        screen.id,
                        e
                    );
                }
            }
        }

        if prepared_list.is_empty() {
            anyhow::bail!("chart {} has no series with data", screen.id);
        }

        let mut combined: Option<SeriesExtrema> = None;
        let mut display_extrema: Option<SeriesExtrema> = None;
        for (series_config, prepared) in &prepared_list {
            let extrema = compute_extrema(prepared);
            if extrema.is_none() {
                tracing::warn!("Series {} has no finite values", series_config.id);
            }
            combined = match (combined, extrema) {
                (Some(acc), Some(e)) => Some(acc.merge(e)),
                (acc, e) => acc.or(e),
            };

            let normalized = normalize_series(prepared, extrema, screen.normalization);
            display_extrema = match (display_extrema, extrema_of(normalized.iter().copied())) {
                (Some(acc), Some(e)) => Some(acc.merge(e)),
                (acc, e) => acc.or(e),
            };
            let points = prepared
                .iter()
                .zip(normalized)
                .map(|(record, display)| {
                    ChartPoint::new(
                        record.time_ms,
                        record.value,
                        display,
                        tooltip_label(&series_config.name, record.value, &unit),
                    )
                })
                .collect();

            series_list.push(SeriesData::new(
                series_config.id.clone(),
                series_config.name.clone(),
                series_config.color.clone(),
                extrema,
                points,
            ));
        }

        // Ticks and preview follow the first series
        let (_, first) = &prepared_list[0];
        let x_ticks = sample_ticks(first, self.settings.tick_stride)
            .into_iter()
            .map(|time_ms| XTick {
                time_ms,
                label: x_tick_label(time_ms),
            })
            .collect();
        let preview: Vec<PreparedRecord> =
            first.iter().take(self.settings.preview_len).copied().collect();

        // v / max leaves [0, 1] for negative readings, so normalized
        // domains cover whatever the values map to
        let y_domain = match screen.normalization {
            NormalizationMode::None => combined.map(AxisDomain::rounded),
            NormalizationMode::MinMax | NormalizationMode::MaxRatio => {
                Some(AxisDomain::UNIT.covering(display_extrema))
            }
        };
        let y_ticks = y_domain
            .map(|domain| domain.ticks(self.settings.y_tick_count))
            .unwrap_or_default();

        tracing::debug!(
            "Built chart {} with {} series and y-domain {:?}",
            screen.id,
            series_list.len(),
            y_domain
        );

        Ok(ChartData {
            id: screen.id.clone(),
            title: screen.title.clone(),
            unit: screen.unit.clone(),
            kind: screen.kind.into(),
            y_domain,
            y_ticks,
            x_ticks,
            series: series_list,
            preview,
        })
    }

    fn prepare_series(&self, series_config: &SeriesConfig) -> anyhow::Result<Vec<PreparedRecord>> {
        let raw = self.repository.load_channel(&series_config.channel)?;
        let prepared = prepare_records(&raw, self.settings.filter_mode, self.settings.parse_mode)
            .with_context(|| format!("Failed to prepare channel {}", series_config.channel))?;
        Ok(prepared)
    }
}
