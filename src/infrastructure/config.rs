use crate::application::pipeline::{
    DEFAULT_TICK_STRIDE, FilterMode, NormalizationMode, ParseMode,
};
use crate::domain::chart::ChartKind;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub pipeline: PipelineSettings,
    pub fixture: FixtureSettings,
    #[serde(default)]
    pub screens: Vec<ScreenConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineSettings {
    #[serde(default)]
    pub parse_mode: ParseMode,
    #[serde(default)]
    pub filter_mode: FilterMode,
    #[serde(default = "default_tick_stride")]
    pub tick_stride: usize,
    #[serde(default = "default_preview_len")]
    pub preview_len: usize,
    #[serde(default = "default_y_tick_count")]
    pub y_tick_count: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::default(),
            filter_mode: FilterMode::default(),
            tick_stride: default_tick_stride(),
            preview_len: default_preview_len(),
            y_tick_count: default_y_tick_count(),
        }
    }
}

fn default_tick_stride() -> usize {
    DEFAULT_TICK_STRIDE
}

fn default_preview_len() -> usize {
    200
}

fn default_y_tick_count() -> usize {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct FixtureSettings {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChartKindConfig {
    #[default]
    Line,
    Scatter,
}

impl From<ChartKindConfig> for ChartKind {
    fn from(kind: ChartKindConfig) -> Self {
        match kind {
            ChartKindConfig::Line => ChartKind::Line,
            ChartKindConfig::Scatter => ChartKind::Scatter,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScreenConfig {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    #[serde(default)]
    pub kind: ChartKindConfig,
    #[serde(default)]
    pub normalization: NormalizationMode,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    pub id: String,
    pub name: String,
    pub channel: String,
    pub color: Option<String>,
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.pipeline.tick_stride == 0 {
            anyhow::bail!("pipeline.tick_stride must be greater than zero");
        }
        if self.pipeline.y_tick_count < 2 {
            anyhow::bail!("pipeline.y_tick_count must be at least 2");
        }
        for screen in &self.screens {
            if screen.series.is_empty() {
                anyhow::bail!("screen {} has no series", screen.id);
            }
        }
        Ok(())
    }
}

/// Load `config/app.*`, overridden by `CHART_PREP__*` environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_app_config_from("config/app")
}

pub fn load_app_config_from(base: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(base))
        .add_source(
            config::Environment::with_prefix("CHART_PREP")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_TOML: &str = r##"
        [pipeline]
        parse_mode = "strict"
        tick_stride = 50

        [fixture]
        path = "config/fixtures/sensor.json"

        [[screens]]
        id = "channels"
        title = "Channels"
        kind = "scatter"
        normalization = "max_ratio"

        [[screens.series]]
        id = "a"
        name = "Channel A"
        channel = "channel_a"
        color = "#269af4"
    "##;

    #[test]
    fn test_deserialize_app_config() {
        let app_config: AppConfig = toml::from_str(APP_TOML).unwrap();

        assert_eq!(app_config.pipeline.parse_mode, ParseMode::Strict);
        assert_eq!(app_config.pipeline.filter_mode, FilterMode::Truthy);
        assert_eq!(app_config.pipeline.tick_stride, 50);
        assert_eq!(app_config.pipeline.preview_len, 200);

        let screen = &app_config.screens[0];
        assert_eq!(ChartKind::from(screen.kind), ChartKind::Scatter);
        assert_eq!(screen.normalization, NormalizationMode::MaxRatio);
        assert_eq!(screen.unit, None);
        assert_eq!(screen.series[0].channel, "channel_a");
        assert!(app_config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_stride() {
        let mut app_config: AppConfig = toml::from_str(APP_TOML).unwrap();
        app_config.pipeline.tick_stride = 0;
        assert!(app_config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_single_y_tick() {
        let mut app_config: AppConfig = toml::from_str(APP_TOML).unwrap();
        assert_eq!(app_config.pipeline.y_tick_count, 10);
        app_config.pipeline.y_tick_count = 1;
        assert!(app_config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_screen() {
        let mut app_config: AppConfig = toml::from_str(APP_TOML).unwrap();
        app_config.screens[0].series.clear();
        assert!(app_config.validate().is_err());
    }

    #[test]
    fn test_pipeline_defaults() {
        let app_config: AppConfig =
            toml::from_str("[fixture]\npath = \"samples.json\"\n").unwrap();

        assert_eq!(app_config.pipeline.parse_mode, ParseMode::Permissive);
        assert_eq!(app_config.pipeline.tick_stride, DEFAULT_TICK_STRIDE);
        assert!(app_config.screens.is_empty());
    }
}
