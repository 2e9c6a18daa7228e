//! Chart generation and rendering for the dashboard.
//!
//! Each chart is an ECharts bar chart of the category totals for one record
//! kind, serialized to JSON and initialized by an inline script.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{dashboard::aggregation::CategoryTotal, html::HeadElement};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// A bar chart with one bar per category.
///
/// Categories are shown in the order of `totals`.
pub(super) fn category_chart(title: &str, subtitle: &str, totals: &[CategoryTotal]) -> Chart {
    let labels = totals
        .iter()
        .map(|total| total.category.clone())
        .collect::<Vec<_>>();
    let values = totals.iter().map(|total| total.total).collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text(title).subtext(subtitle))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name(title).data(values))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              minimumFractionDigits: 2,
              maximumFractionDigits: 2
            });
            if (!number) {
              return \"-\";
            }
            const sign = number < 0 ? \"-\" : \"\";
            return sign + \"S/\" + currencyFormatter.format(Math.abs(number));",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use crate::{dashboard::aggregation::CategoryTotal, html::HeadElement};

    use super::{DashboardChart, category_chart, charts_script};

    #[test]
    fn category_chart_lists_categories_in_order() {
        let totals = [
            CategoryTotal {
                category: "Food".to_owned(),
                total: 120.5,
            },
            CategoryTotal {
                category: "Other".to_owned(),
                total: 3.0,
            },
        ];

        let options = category_chart("Expenses", "By category", &totals).to_string();

        let food = options.find("\"Food\"").expect("want Food label");
        let other = options.find("\"Other\"").expect("want Other label");
        assert!(food < other, "want categories in order, got {options}");
        assert!(options.contains("120.5"), "want Food total, got {options}");
        assert!(options.contains("S/"), "want currency symbol, got {options}");
    }

    #[test]
    fn script_initializes_every_chart() {
        let charts = [
            DashboardChart {
                id: "incomes-chart",
                options: "{}".to_owned(),
            },
            DashboardChart {
                id: "expenses-chart",
                options: "{}".to_owned(),
            },
        ];

        let HeadElement::ScriptSource(script) = charts_script(&charts) else {
            panic!("want an inline script");
        };

        assert!(script.0.contains("getElementById(\"incomes-chart\")"));
        assert!(script.0.contains("getElementById(\"expenses-chart\")"));
    }
}
