//! Seam between chart data and whatever draws it.

use serde_json::{json, Value};

use crate::models::AggregateRecord;
use crate::services::charts::ChartData;

const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Something that turns `{category, value}` records into a bar chart.
pub trait ChartRenderer {
    type Output;

    fn render(
        &self,
        container_key: &str,
        title: &str,
        records: &[AggregateRecord],
        category_axis_label: &str,
        value_axis_label: &str,
    ) -> Self::Output;
}

/// Render a chart built by [`build_chart`](crate::services::charts::build_chart).
pub fn render_chart<R: ChartRenderer>(renderer: &R, chart: &ChartData) -> R::Output {
    renderer.render(
        &chart.container_key,
        &chart.title,
        &chart.records,
        &chart.category_label,
        &chart.value_label,
    )
}

/// Produces Vega-Lite bar chart specifications for `vegaEmbed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VegaLiteRenderer;

impl ChartRenderer for VegaLiteRenderer {
    type Output = Value;

    fn render(
        &self,
        container_key: &str,
        title: &str,
        records: &[AggregateRecord],
        category_axis_label: &str,
        value_axis_label: &str,
    ) -> Value {
        json!({
            "$schema": VEGA_LITE_SCHEMA,
            "title": title,
            "width": "container",
            "data": { "values": records },
            "mark": "bar",
            "encoding": {
                "x": {
                    "title": category_axis_label,
                    "field": "category",
                    "type": "nominal",
                    "sort": null,
                    "axis": { "labelAngle": 0 },
                },
                "y": {
                    "title": value_axis_label,
                    "field": "value",
                    "type": "quantitative",
                },
            },
            "usermeta": { "container": container_key },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::charts::ChartKind;

    #[test]
    fn test_vega_lite_spec_shape() {
        let chart = ChartData {
            kind: ChartKind::PerFieldTime,
            title: ChartKind::PerFieldTime.title().to_string(),
            container_key: ChartKind::PerFieldTime.container_key().to_string(),
            category_label: "Question".to_string(),
            value_label: "Average Response Time (s)".to_string(),
            records: vec![AggregateRecord::new("Q1", 2.0)],
        };

        let spec = render_chart(&VegaLiteRenderer, &chart);

        assert_eq!(spec["mark"], "bar");
        assert_eq!(spec["title"], "Average Time Spent Responding Per Question");
        assert_eq!(spec["width"], "container");
        assert_eq!(spec["data"]["values"][0]["category"], "Q1");
        assert_eq!(spec["data"]["values"][0]["value"], 2.0);
        assert_eq!(spec["encoding"]["x"]["field"], "category");
        assert_eq!(spec["encoding"]["x"]["axis"]["labelAngle"], 0);
        assert_eq!(spec["encoding"]["y"]["title"], "Average Response Time (s)");
        assert_eq!(spec["usermeta"]["container"], "average-question-time");
    }

    struct CountingRenderer;

    impl ChartRenderer for CountingRenderer {
        type Output = (String, usize);

        fn render(
            &self,
            container_key: &str,
            _title: &str,
            records: &[AggregateRecord],
            _category_axis_label: &str,
            _value_axis_label: &str,
        ) -> Self::Output {
            (container_key.to_string(), records.len())
        }
    }

    #[test]
    fn test_render_chart_passes_chart_fields() {
        let chart = ChartData {
            kind: ChartKind::PerSubmissionTime,
            title: "t".to_string(),
            container_key: "submission-time".to_string(),
            category_label: "Submission".to_string(),
            value_label: "v".to_string(),
            records: vec![AggregateRecord::new("S1", 1.0), AggregateRecord::new("S2", 2.0)],
        };

        assert_eq!(
            render_chart(&CountingRenderer, &chart),
            ("submission-time".to_string(), 2)
        );
    }
}
