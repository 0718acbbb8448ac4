//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations:
//! - **Expenses by Category**: doughnut chart of the month's expenses
//! - **Expenses Over Time**: line chart of monthly expense totals
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger,
    },
    series::{Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    html::HeadElement,
    month::YearMonth,
    transaction::CategoryTotal,
};

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
                        class="min-h-[380px] rounded bg-white dark:bg-gray-100"
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
                chart.id,
                escape_script_text(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});"
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Stops user text inside chart options from closing the script element early.
///
/// Both replacements are no-ops for the JavaScript parser: `<\/` and `<\!` read as `</` and `<!`.
fn escape_script_text(options: &str) -> String {
    options.replace("</", "<\\/").replace("<!--", "<\\!--")
}

/// The hex colour ECharts should use for a category, matching the badge colours in the lists.
fn category_hex_color(color_class: &str) -> &'static str {
    match color_class {
        "bg-red-500" => "#ef4444",
        "bg-blue-500" => "#3b82f6",
        "bg-green-500" => "#22c55e",
        "bg-yellow-500" => "#eab308",
        "bg-purple-500" => "#a855f7",
        "bg-pink-500" => "#ec4899",
        "bg-indigo-500" => "#6366f1",
        _ => "#6b7280",
    }
}

pub(super) fn category_chart(month: YearMonth, category_totals: &[CategoryTotal]) -> Chart {
    let colors: Vec<_> = category_totals
        .iter()
        .map(|total| category_hex_color(total.category.color_class()))
        .collect();
    let data: Vec<(f64, String)> = category_totals
        .iter()
        .map(|total| (total.amount, total.category.to_string()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Expenses by Category")
                .subtext(month.long_label()),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().left("center").top("bottom"))
        .color(colors.into_iter().map(Into::<charming::element::Color>::into).collect())
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

pub(super) fn expenses_over_time_chart(monthly_totals: &[(YearMonth, f64)]) -> Chart {
    let labels: Vec<String> = monthly_totals
        .iter()
        .map(|(month, _)| month.short_label().to_owned())
        .collect();
    let values: Vec<f64> = monthly_totals.iter().map(|(_, total)| *total).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Expenses Over Time")
                .subtext(format!("Last {} months", monthly_totals.len())),
        )
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
        .series(Line::new().name("Expenses").data(values))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
