use std::fmt::Write;

use serde_json::json;

use super::dataset::TrendPoint;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";
const CHART_DIV_ID: &str = "stock-trend-chart";

/// Renders the aggregated series as an embeddable HTML fragment: a target
/// div, the plotly.js CDN tag, and one inline `Plotly.newPlot` call. The
/// caller owns the surrounding document.
pub fn render_trend_chart(location: &str, product_name: &str, series: &[TrendPoint]) -> String {
    let dates: Vec<String> = series
        .iter()
        .map(|point| point.date.format("%Y-%m-%d").to_string())
        .collect();
    let stocks: Vec<f64> = series.iter().map(|point| point.stock).collect();

    let data = json!([{
        "x": dates,
        "y": stocks,
        "type": "scatter",
        "mode": "lines+markers",
        "name": "Max Stock",
    }]);
    let layout = json!({
        "title": {
            "text": format!("Stock Level Trend Over Time in {location} for {product_name}"),
        },
        "xaxis": { "title": { "text": "Date" } },
        "yaxis": { "title": { "text": "Stock Level" } },
        "paper_bgcolor": "#111111",
        "plot_bgcolor": "#111111",
        "font": { "color": "#e5e5e5" },
    });

    let mut html = String::new();
    writeln!(html, "<div id=\"{CHART_DIV_ID}\"></div>").expect("write chart div");
    writeln!(html, "<script src=\"{PLOTLY_CDN}\"></script>").expect("write cdn tag");
    writeln!(html, "<script>").expect("write script open");
    writeln!(
        html,
        "  Plotly.newPlot(\"{CHART_DIV_ID}\", {}, {});",
        script_safe_json(&data),
        script_safe_json(&layout)
    )
    .expect("write plot call");
    writeln!(html, "</script>").expect("write script close");

    html
}

/// Serializes a payload for inline-script embedding. Escaping `<` keeps a
/// literal `</script>` inside location or product names from terminating
/// the script block early.
fn script_safe_json(value: &serde_json::Value) -> String {
    serde_json::to_string(value)
        .expect("serialize chart payload")
        .replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series() -> Vec<TrendPoint> {
        vec![
            TrendPoint {
                date: NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(),
                stock: 150.0,
            },
            TrendPoint {
                date: NaiveDate::from_ymd_opt(2024, 5, 13).unwrap(),
                stock: 90.0,
            },
        ]
    }

    #[test]
    fn fragment_carries_div_cdn_and_plot_call() {
        let html = render_trend_chart("Wakad", "Dal ()", &series());

        assert!(html.contains("<div id=\"stock-trend-chart\"></div>"));
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains("Plotly.newPlot(\"stock-trend-chart\""));
        assert!(html.contains("Stock Level Trend Over Time in Wakad for Dal ()"));
    }

    #[test]
    fn axis_labels_and_series_values_are_embedded() {
        let html = render_trend_chart("Wakad", "Dal ()", &series());

        assert!(html.contains("\"text\":\"Date\""));
        assert!(html.contains("\"text\":\"Stock Level\""));
        assert!(html.contains("2024-05-12"));
        assert!(html.contains("150.0"));
    }

    #[test]
    fn script_closing_tags_in_names_cannot_break_out() {
        let html = render_trend_chart("Wakad", "Dal </script><script>alert(1)", &series());

        // only the cdn tag and the inline block close a script element
        assert_eq!(html.matches("</script>").count(), 2);
        assert!(html.contains("\\u003c/script>"));
    }

    #[test]
    fn empty_series_still_renders_a_valid_fragment() {
        let html = render_trend_chart("Wakad", "Dal ()", &[]);

        assert!(html.contains("\"x\":[]"));
        assert!(html.contains("\"y\":[]"));
    }
}
