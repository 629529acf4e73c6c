// Mapper to convert domain charts into the renderer's JSON view
use crate::domain::chart::{AxisDomain, ChartData, ChartKind, SeriesData};
use crate::domain::labels::{percent_tick_label, y_tick_label};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: &'static str,
    pub y_axis: Option<AxisView>,
    pub x_ticks: Vec<TickView>,
    pub series: Vec<SeriesView>,
    pub preview: Vec<PointView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisView {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
    /// One label per tick, lowest first.
    pub labels: Vec<String>,
    /// Secondary percent axis; only the outermost ticks are labelled.
    pub percent_labels: Vec<Option<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickView {
    pub time: f64,
    pub label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesView {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub points: Vec<PointView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointView {
    pub time: f64,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

pub fn chart_to_view(chart: ChartData) -> ChartView {
    let unit = chart.unit.clone().unwrap_or_default();
    let kind = match chart.kind {
        ChartKind::Line => "line",
        ChartKind::Scatter => "scatter",
    };

    ChartView {
        id: chart.id,
        title: chart.title,
        unit: chart.unit,
        kind,
        y_axis: chart
            .y_domain
            .map(|domain| axis_to_view(domain, chart.y_ticks, &unit)),
        x_ticks: chart
            .x_ticks
            .into_iter()
            .map(|t| TickView {
                time: t.time_ms,
                label: t.label,
            })
            .collect(),
        series: chart.series.into_iter().map(series_to_view).collect(),
        preview: chart
            .preview
            .into_iter()
            .map(|r| PointView {
                time: r.time_ms,
                value: r.value,
                y: None,
                label: None,
            })
            .collect(),
    }
}

fn axis_to_view(domain: AxisDomain, ticks: Vec<f64>, unit: &str) -> AxisView {
    let labels = ticks.iter().map(|y| y_tick_label(*y, unit)).collect();
    let percent_labels = ticks
        .iter()
        .enumerate()
        .map(|(i, y)| percent_tick_label(*y, i, ticks.len()))
        .collect();

    AxisView {
        min: domain.min,
        max: domain.max,
        ticks,
        labels,
        percent_labels,
    }
}

fn series_to_view(series: SeriesData) -> SeriesView {
    SeriesView {
        id: series.id,
        name: series.name,
        color: series.color,
        min: series.extrema.map(|e| e.min),
        max: series.extrema.map(|e| e.max),
        points: series
            .points
            .into_iter()
            .map(|p| PointView {
                time: p.time_ms,
                value: p.value,
                y: Some(p.normalized),
                label: Some(p.label),
            })
            .collect(),
    }
}

/// Pretty JSON document with one entry per chart.
pub fn render_json(charts: Vec<ChartData>) -> anyhow::Result<String> {
    let views: Vec<ChartView> = charts.into_iter().map(chart_to_view).collect();
    Ok(serde_json::to_string_pretty(&views)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartPoint, SeriesExtrema, XTick};
    use crate::domain::record::PreparedRecord;

    fn chart() -> ChartData {
        ChartData {
            id: "temperature".to_string(),
            title: "Temperature".to_string(),
            unit: Some("°F".to_string()),
            kind: ChartKind::Line,
            y_domain: Some(AxisDomain { min: 32.0, max: 40.0 }),
            y_ticks: vec![32.0, 36.0, 40.0],
            x_ticks: vec![XTick {
                time_ms: 1_609_459_200_000.0,
                label: "1. Jan".to_string(),
            }],
            series: vec![SeriesData::new(
                "temp".to_string(),
                "Temperature".to_string(),
                Some("#269af4".to_string()),
                Some(SeriesExtrema::new(32.0, 40.0)),
                vec![ChartPoint::new(
                    1_609_459_200_000.0,
                    f64::NAN,
                    f64::NAN,
                    "Temperature: NaN°F".to_string(),
                )],
            )],
            preview: vec![PreparedRecord::new(1_609_459_200_000.0, 32.0)],
        }
    }

    #[test]
    fn test_chart_to_view() {
        let view = chart_to_view(chart());

        assert_eq!(view.kind, "line");
        let axis = view.y_axis.unwrap();
        assert_eq!(axis.labels, vec!["32°F", "36°F", "40°F"]);
        assert_eq!(
            axis.percent_labels,
            vec![Some("3.2%".to_string()), None, Some("4%".to_string())]
        );
        assert_eq!(view.series[0].min, Some(32.0));
        assert_eq!(view.preview[0].y, None);
    }

    #[test]
    fn test_render_json() {
        let json = render_json(vec![chart()]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["id"], "temperature");
        assert_eq!(parsed[0]["yAxis"]["max"], 40.0);
        assert_eq!(parsed[0]["xTicks"][0]["label"], "1. Jan");
        // non-finite values serialize as null
        assert!(parsed[0]["series"][0]["points"][0]["value"].is_null());
        assert!(parsed[0]["preview"][0].get("label").is_none());
    }
}
