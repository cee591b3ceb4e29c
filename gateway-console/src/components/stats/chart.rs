use dioxus::prelude::*;
use shared_types::StatRow;

use crate::format::format_ms;

pub const PERCENTILE_LABELS: [&str; 6] = ["P30", "P50", "P75", "P90", "P95", "P99"];

pub const PERCENTILE_COLORS: [&str; 6] = [
    "#7b8cde", "#4361ee", "#3a56d4", "#2f4bc0", "#2541ad", "#1b3699",
];

const CHART_WIDTH: f32 = 480.0;
const CHART_HEIGHT: f32 = 220.0;
const AXIS_LEFT: f32 = 48.0;
const AXIS_BOTTOM: f32 = 28.0;
const PLOT_TOP: f32 = 16.0;
const BAR_GAP: f32 = 14.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: &'static str,
    pub color: &'static str,
    /// Latency in ms; missing values draw as 0
    pub value: i64,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Latency percentile bar chart for a single path.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileChart {
    pub title: String,
    pub bars: Vec<ChartBar>,
    /// Top of the value axis, at least 1
    pub scale_max: i64,
}

impl PercentileChart {
    pub fn from_row(row: &StatRow) -> Self {
        let values = row.percentiles().map(|value| value.unwrap_or(0).max(0));
        let scale_max = values.iter().copied().max().unwrap_or(0).max(1);

        let plot_width = CHART_WIDTH - AXIS_LEFT - BAR_GAP;
        let plot_height = CHART_HEIGHT - AXIS_BOTTOM - PLOT_TOP;
        let slot = plot_width / values.len() as f32;
        let bar_width = slot - BAR_GAP;

        let bars = values
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                let height = plot_height * (*value as f32 / scale_max as f32);
                ChartBar {
                    label: PERCENTILE_LABELS[idx],
                    color: PERCENTILE_COLORS[idx],
                    value: *value,
                    x: AXIS_LEFT + BAR_GAP + idx as f32 * slot,
                    y: PLOT_TOP + plot_height - height,
                    width: bar_width,
                    height,
                }
            })
            .collect();

        Self {
            title: row.path.clone(),
            bars,
            scale_max,
        }
    }
}

#[component]
pub fn PercentileChartView(chart: PercentileChart) -> Element {
    let baseline = CHART_HEIGHT - AXIS_BOTTOM;
    let label_y = baseline + 18.0;
    let view_box = format!("0 0 {} {}", CHART_WIDTH, CHART_HEIGHT);

    rsx! {
        div {
            class: "stats-chart",
            div { class: "stats-chart-title", "{chart.title}" }
            svg {
                class: "stats-chart-svg",
                view_box: "{view_box}",
                line {
                    x1: "{AXIS_LEFT}",
                    y1: "{baseline}",
                    x2: "{CHART_WIDTH}",
                    y2: "{baseline}",
                    stroke: "#9ca3af",
                    stroke_width: "1",
                }
                text {
                    x: "{AXIS_LEFT - 6.0}",
                    y: "{PLOT_TOP + 4.0}",
                    text_anchor: "end",
                    font_size: "10",
                    fill: "#6b7280",
                    "{chart.scale_max}ms"
                }
                text {
                    x: "{AXIS_LEFT - 6.0}",
                    y: "{baseline}",
                    text_anchor: "end",
                    font_size: "10",
                    fill: "#6b7280",
                    "0"
                }
                for bar in chart.bars.iter() {
                    g {
                        key: "{bar.label}",
                        rect {
                            x: format!("{:.1}", bar.x),
                            y: format!("{:.1}", bar.y),
                            width: format!("{:.1}", bar.width),
                            height: format!("{:.1}", bar.height),
                            rx: "3",
                            fill: "{bar.color}",
                        }
                        text {
                            x: format!("{:.1}", bar.x + bar.width / 2.0),
                            y: format!("{:.1}", (bar.y - 4.0).max(10.0)),
                            text_anchor: "middle",
                            font_size: "10",
                            fill: "#374151",
                            "{format_ms(Some(bar.value))}"
                        }
                        text {
                            x: format!("{:.1}", bar.x + bar.width / 2.0),
                            y: format!("{:.1}", label_y),
                            text_anchor: "middle",
                            font_size: "11",
                            fill: "#4b5563",
                            "{bar.label}"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bars_follow_percentile_order_and_palette() {
        let row = StatRow {
            path: "/orders".to_string(),
            p30: Some(10),
            p50: Some(20),
            p75: Some(40),
            p90: Some(80),
            p95: Some(100),
            p99: Some(200),
            ..Default::default()
        };
        let chart = PercentileChart::from_row(&row);
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label).collect();
        assert_eq!(labels, PERCENTILE_LABELS.to_vec());
        assert_eq!(chart.bars[0].color, "#7b8cde");
        assert_eq!(chart.bars[5].color, "#1b3699");
        assert_eq!(chart.scale_max, 200);
        assert!(chart.bars[5].height > chart.bars[0].height);
        assert!((chart.bars[5].y - PLOT_TOP).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_percentiles_draw_flat() {
        let row = StatRow {
            path: "/idle".to_string(),
            ..Default::default()
        };
        let chart = PercentileChart::from_row(&row);
        assert_eq!(chart.scale_max, 1);
        assert!(chart.bars.iter().all(|b| b.value == 0 && b.height == 0.0));
    }
}
