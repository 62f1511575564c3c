use api::dashboard::{export_file_name, revenue_key, DAY_WINDOWS, PERFORMANCE_KEY, STATS_KEY};
use dioxus::prelude::*;
use store::analytics::chart_bars;
use store::{format_money, Property};

use super::{use_backend, use_collection};
use crate::auth::use_config;
use crate::browser::download_csv;
use crate::components::{Button, ButtonVariant, Empty, Loading, StatCard};
use crate::icons::FaFileCsv;
use crate::query::use_cached;
use crate::Icon;

/// Dashboard home: headline counters, recent revenue and per-upsell totals.
#[component]
pub fn AnalyticsView() -> Element {
    let backend = use_backend();
    let config = use_config();
    let mut days = use_signal(|| config.analytics.default_days);
    let mut exporting = use_signal(|| false);
    let properties = use_collection::<Property>();

    let stats = use_cached(
        || STATS_KEY.to_string(),
        move || {
            let client = backend.client();
            async move { client.dashboard_stats().await }
        },
    );
    let revenue = use_cached(
        move || revenue_key(days()),
        move || {
            let client = backend.client();
            let window = *days.peek();
            async move { client.revenue(window).await }
        },
    );
    let performance = use_cached(
        || PERFORMANCE_KEY.to_string(),
        move || {
            let client = backend.client();
            async move { client.upsell_performance().await }
        },
    );

    let export = move |_| async move {
        exporting.set(true);
        let window = *days.peek();
        match backend.client().export_accounting(window).await {
            Ok(csv) => {
                download_csv(&export_file_name("accounting", Some(window)), &csv);
                backend.notifier().success("Accounting export downloaded");
            }
            Err(e) => backend.notifier().error(&e),
        }
        exporting.set(false);
    };

    // Amounts are reported in the owner's primary currency
    let currency = match &*properties.read() {
        Some(Ok(all)) => all.first().map(|p| p.currency.clone()).unwrap_or_default(),
        _ => String::new(),
    };

    let stat_cards = match &*stats.read() {
        None => rsx! { Loading {} },
        Some(Err(_)) => rsx! { Empty { message: "Statistics are unavailable." } },
        Some(Ok(s)) => {
            let revenue_total = format_money(s.total_revenue, &currency);
            rsx! {
                div {
                    class: "stat-grid",
                    StatCard { label: "Revenue", value: revenue_total }
                    StatCard { label: "Orders", value: s.total_orders.to_string() }
                    StatCard { label: "Pending", value: s.pending_orders.to_string() }
                    StatCard { label: "Active upsells", value: s.active_upsells.to_string() }
                    StatCard { label: "Properties", value: s.properties.to_string() }
                    StatCard { label: "Vendors", value: s.vendors.to_string() }
                }
            }
        }
    };

    let chart = match &*revenue.read() {
        None => rsx! { Loading {} },
        Some(Err(_)) => rsx! { Empty { message: "Revenue is unavailable." } },
        Some(Ok(series)) => {
            let bars = chart_bars(series);
            if bars.is_empty() {
                rsx! { Empty { message: "No revenue in this period yet." } }
            } else {
                rsx! {
                    div {
                        class: "bar-chart",
                        for bar in bars {
                            div {
                                key: "{bar.date}",
                                class: "bar-column",
                                span { class: "bar-value", {format_money(bar.revenue, &currency)} }
                                div {
                                    class: "bar",
                                    style: format!("height: {:.1}%", bar.height_percent),
                                    title: format!("{} orders", bar.orders),
                                }
                                span { class: "bar-label", {bar.label()} }
                            }
                        }
                    }
                }
            }
        }
    };

    let table = match &*performance.read() {
        None => rsx! { Loading {} },
        Some(Err(_)) => rsx! { Empty { message: "Upsell performance is unavailable." } },
        Some(Ok(rows)) if rows.is_empty() => rsx! { Empty { message: "No upsells have sold yet." } },
        Some(Ok(rows)) => {
            let mut rows = rows.clone();
            rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
            rsx! {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Upsell" }
                            th { class: "num", "Orders" }
                            th { class: "num", "Revenue" }
                        }
                    }
                    tbody {
                        for row in rows {
                            tr {
                                key: "{row.upsell_id}",
                                td { "{row.title}" }
                                td { class: "num", "{row.orders}" }
                                td { class: "num", {format_money(row.revenue, &currency)} }
                            }
                        }
                    }
                }
            }
        }
    };

    let window_value = days();

    rsx! {
        div {
            class: "view-page",
            {stat_cards}

            section {
                class: "panel",
                div {
                    class: "panel-header",
                    h3 { class: "view-section-title", "Revenue, last 5 days with sales" }
                    div {
                        class: "toggle-group",
                        for window in DAY_WINDOWS {
                            Button {
                                key: "{window}",
                                variant: if window == window_value { ButtonVariant::Primary } else { ButtonVariant::Ghost },
                                onclick: move |_| days.set(window),
                                "{window}d"
                            }
                        }
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: exporting(),
                        onclick: export,
                        Icon { icon: FaFileCsv, width: 12, height: 12 }
                        " Accounting CSV"
                    }
                }
                {chart}
            }

            section {
                class: "panel",
                h3 { class: "view-section-title", "Upsell performance" }
                {table}
            }
        }
    }
}
