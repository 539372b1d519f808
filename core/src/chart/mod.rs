//! Point data handed to the chart layer. Rendering lives in the GUI.

use crate::prelude::{Sample, WaveResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const WAVE_SERIES: &str = "value";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

impl From<&Sample> for ChartPoint {
    fn from(sample: &Sample) -> Self {
        Self {
            x: sample.time,
            y: sample.value,
        }
    }
}

pub fn to_points(samples: &[Sample]) -> Vec<ChartPoint> {
    samples.iter().map(ChartPoint::from).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub label: String,
    /// `#rrggbb`
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub series: BTreeMap<String, SeriesConfig>,
}

impl ChartConfig {
    pub fn with_series(mut self, key: &str, label: &str, color: &str) -> Self {
        self.series.insert(
            key.to_string(),
            SeriesConfig {
                label: label.to_string(),
                color: color.to_string(),
            },
        );
        self
    }

    pub fn get(&self, key: &str) -> Option<&SeriesConfig> {
        self.series.get(key)
    }

    pub fn sine_wave() -> Self {
        Self::default().with_series(WAVE_SERIES, "Amplitude", "#2eb8e3")
    }
}

/// `fields` are the item's own attributes, `point_fields` those of its datum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TooltipItem {
    pub fields: BTreeMap<String, String>,
    pub point_fields: BTreeMap<String, String>,
}

impl TooltipItem {
    pub fn for_series(key: &str) -> Self {
        let mut item = Self::default();
        item.fields.insert("dataKey".into(), key.into());
        item.fields.insert("name".into(), key.into());
        item
    }
}

/// A string under `key` on the item (or else its datum) names the series;
/// falls back to `config[key]`.
pub fn payload_config<'a>(
    config: &'a ChartConfig,
    item: &TooltipItem,
    key: &str,
) -> Option<&'a SeriesConfig> {
    let label_key = item
        .fields
        .get(key)
        .or_else(|| item.point_fields.get(key))
        .map(String::as_str)
        .unwrap_or(key);
    config.get(label_key).or_else(|| config.get(key))
}

/// Index of the point whose x is closest to `x`. Points must be sorted by x.
pub fn nearest_by_x(points: &[ChartPoint], x: f64) -> Option<usize> {
    if points.is_empty() || x.is_nan() {
        return None;
    }
    let upper = points.partition_point(|point| point.x < x);
    if upper == 0 {
        return Some(0);
    }
    if upper == points.len() {
        return Some(points.len() - 1);
    }
    let below = upper - 1;
    if (x - points[below].x).abs() <= (points[upper].x - x).abs() {
        Some(below)
    } else {
        Some(upper)
    }
}

/// `scale` stretches the axes into screen units before measuring.
pub fn nearest_by_distance(
    points: &[ChartPoint],
    x: f64,
    y: f64,
    scale: (f64, f64),
) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let dx = (point.x - x) * scale.0;
            let dy = (point.y - y) * scale.1;
            (idx, dx * dx + dy * dy)
        })
        .filter(|(_, distance)| distance.is_finite())
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(idx, _)| idx)
}

pub fn points_to_json(points: &[ChartPoint]) -> WaveResult<String> {
    Ok(serde_json::to_string(points)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<ChartPoint> {
        [0.0, 0.25, 0.5, 0.75]
            .iter()
            .map(|&x| ChartPoint { x, y: x * 2.0 })
            .collect()
    }

    #[test]
    fn nearest_by_x_picks_the_closest_sample() {
        let pts = points();
        assert_eq!(nearest_by_x(&pts, -1.0), Some(0));
        assert_eq!(nearest_by_x(&pts, 0.3), Some(1));
        assert_eq!(nearest_by_x(&pts, 0.4), Some(2));
        assert_eq!(nearest_by_x(&pts, 9.0), Some(3));
        assert_eq!(nearest_by_x(&[], 0.0), None);
    }

    #[test]
    fn nearest_by_distance_uses_both_axes() {
        let pts = points();
        assert_eq!(nearest_by_distance(&pts, 0.5, 1.0, (1.0, 1.0)), Some(2));
        assert_eq!(nearest_by_distance(&[], 0.5, 1.0, (1.0, 1.0)), None);
    }

    #[test]
    fn payload_config_follows_item_fields() {
        let config = ChartConfig::sine_wave().with_series("alt", "Alternate", "#ff0000");
        let item = TooltipItem::for_series("alt");
        let resolved = payload_config(&config, &item, "dataKey").unwrap();
        assert_eq!(resolved.label, "Alternate");

        let mut nested = TooltipItem::default();
        nested.point_fields.insert("series".into(), WAVE_SERIES.into());
        let resolved = payload_config(&config, &nested, "series").unwrap();
        assert_eq!(resolved.label, "Amplitude");
    }

    #[test]
    fn payload_config_falls_back_to_the_key() {
        let config = ChartConfig::sine_wave();
        let item = TooltipItem::default();
        assert!(payload_config(&config, &item, WAVE_SERIES).is_some());
        assert!(payload_config(&config, &item, "missing").is_none());
    }

    #[test]
    fn points_serialize_as_xy_pairs() {
        let json = points_to_json(&[ChartPoint { x: 0.5, y: -1.0 }]).unwrap();
        assert_eq!(json, r#"[{"x":0.5,"y":-1.0}]"#);
    }

    #[test]
    fn samples_map_onto_points() {
        let pts = to_points(&[Sample::new(0.25, 1.0)]);
        assert_eq!(pts, vec![ChartPoint { x: 0.25, y: 1.0 }]);
    }
}
