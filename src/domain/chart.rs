// Chart data domain models
use super::record::PreparedRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesExtrema {
    pub min: f64,
    pub max: f64,
}

impl SeriesExtrema {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Smallest range covering both.
    pub fn merge(self, other: SeriesExtrema) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Y-axis domain handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

impl AxisDomain {
    pub const UNIT: AxisDomain = AxisDomain { min: 0.0, max: 1.0 };

    /// Extrema rounded to whole numbers, half rounding toward +inf.
    pub fn rounded(extrema: SeriesExtrema) -> Self {
        Self {
            min: round_half_up(extrema.min),
            max: round_half_up(extrema.max),
        }
    }

    /// Grow the domain so it also covers `extrema`.
    pub fn covering(self, extrema: Option<SeriesExtrema>) -> Self {
        match extrema {
            Some(e) => Self {
                min: self.min.min(e.min),
                max: self.max.max(e.max),
            },
            None => self,
        }
    }

    /// `count` evenly spaced tick values from `min` to `max` inclusive.
    pub fn ticks(self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => {
                let step = (self.max - self.min) / (count - 1) as f64;
                (0..count)
                    .map(|i| {
                        if i + 1 == count {
                            self.max
                        } else {
                            self.min + step * i as f64
                        }
                    })
                    .collect()
            }
        }
    }
}

fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub time_ms: f64,
    pub value: f64,
    pub normalized: f64,
    pub label: String,
}

impl ChartPoint {
    pub fn new(time_ms: f64, value: f64, normalized: f64, label: String) -> Self {
        Self {
            time_ms,
            value,
            normalized,
            label,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub extrema: Option<SeriesExtrema>,
    pub points: Vec<ChartPoint>,
}

impl SeriesData {
    pub fn new(
        id: String,
        name: String,
        color: Option<String>,
        extrema: Option<SeriesExtrema>,
        points: Vec<ChartPoint>,
    ) -> Self {
        Self {
            id,
            name,
            color,
            extrema,
            points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Scatter,
}

#[derive(Debug, Clone)]
pub struct XTick {
    pub time_ms: f64,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub y_domain: Option<AxisDomain>,
    pub y_ticks: Vec<f64>,
    pub x_ticks: Vec<XTick>,
    pub series: Vec<SeriesData>,
    pub preview: Vec<PreparedRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_domain() {
        let domain = AxisDomain::rounded(SeriesExtrema::new(31.5, 40.4));
        assert_eq!(domain, AxisDomain { min: 32.0, max: 40.0 });

        // half rounds toward +inf, also for negatives
        let domain = AxisDomain::rounded(SeriesExtrema::new(-2.5, -0.4));
        assert_eq!(domain, AxisDomain { min: -2.0, max: 0.0 });
    }

    #[test]
    fn test_covering_domain() {
        let domain = AxisDomain::UNIT.covering(Some(SeriesExtrema::new(-0.5, 1.0)));
        assert_eq!(domain, AxisDomain { min: -0.5, max: 1.0 });
        assert_eq!(AxisDomain::UNIT.covering(None), AxisDomain::UNIT);
    }

    #[test]
    fn test_domain_ticks() {
        let ticks = AxisDomain { min: 30.0, max: 40.0 }.ticks(6);
        assert_eq!(ticks, vec![30.0, 32.0, 34.0, 36.0, 38.0, 40.0]);
        assert_eq!(AxisDomain::UNIT.ticks(10).len(), 10);
        assert_eq!(AxisDomain::UNIT.ticks(10)[9], 1.0);
        assert!(AxisDomain::UNIT.ticks(0).is_empty());
    }

    #[test]
    fn test_merge_extrema() {
        let merged = SeriesExtrema::new(32.0, 40.0).merge(SeriesExtrema::new(10.0, 35.0));
        assert_eq!(merged, SeriesExtrema::new(10.0, 40.0));
    }
}
