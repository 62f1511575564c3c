//! # Orders
//!
//! | Tier | Owner | Fields |
//! |------|-------|--------|
//! | Server | `filters` signal, part of the cache key | status, date bucket, vendor |
//! | Client | [`OrderTable`] | search, sort key and direction, selection |
//!
//! Changing a server filter refetches; the fresh list replaces the table's
//! collection and drops the selection. Bulk actions always go out as one
//! batch request and keep the selection until the backend accepts them; row
//! actions re-read the order before moving it.

use api::dashboard::export_file_name;
use api::orders::invalidate_orders;
use dioxus::prelude::*;
use store::{
    format_money, DateBucket, Order, OrderFilters, OrderStatus, OrderTable, SortDirection, SortKey,
    Vendor,
};

use super::{use_backend, use_collection, Backend};
use crate::browser::download_csv;
use crate::components::{
    Button, ButtonVariant, Empty, Loading, SearchBox, Select, StatCard, StatusBadge,
};
use crate::icons::{FaArrowDown, FaArrowUp, FaFileCsv, FaList, FaTableCells};
use crate::query::use_cached;
use crate::Icon;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Layout {
    Cards,
    Table,
}

#[component]
pub fn OrdersView() -> Element {
    let backend = use_backend();
    let vendors = use_collection::<Vendor>();
    let mut filters = use_signal(OrderFilters::default);
    let mut table = use_signal(OrderTable::new);
    let mut layout = use_signal(|| Layout::Table);
    let mut busy = use_signal(|| false);

    let orders = use_cached(
        move || filters().cache_key(),
        move || {
            let client = backend.client();
            let filters = filters.peek().clone();
            async move { client.list_orders(&filters).await }
        },
    );

    use_effect(move || {
        if let Some(Ok(list)) = &*orders.read() {
            table.write().load(list.clone());
        }
    });

    let bulk_status = move |status: OrderStatus| async move {
        busy.set(true);
        let mut pending = table.peek().clone();
        let outcome = backend.client().apply_bulk_status(&mut pending, status).await;
        table.write().sync_selection(&pending);
        report_transition(backend, outcome, status);
        busy.set(false);
    };

    let row_status = move |(order, status): (Order, OrderStatus)| async move {
        busy.set(true);
        let outcome = backend.client().transition_order(order.id, status).await;
        report_transition(backend, outcome.map(|_| 1), status);
        busy.set(false);
    };

    let export = move |_| async move {
        let client = backend.client();
        let current = filters.peek().clone();
        match client.export_orders(&current).await {
            Ok(csv) => {
                download_csv(&export_file_name("orders", None), &csv);
                backend.notifier().success("Orders exported");
            }
            Err(e) => backend.notifier().error(&e),
        }
    };

    let current = filters();
    let vendor_options: Vec<(String, String)> = match &*vendors.read() {
        Some(Ok(all)) => all.iter().map(|v| (v.id.to_string(), v.name.clone())).collect(),
        _ => Vec::new(),
    };
    let status_options: Vec<(String, String)> = OrderStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect();
    let date_options: Vec<(String, String)> = DateBucket::ALL
        .iter()
        .map(|d| (d.as_str().to_string(), d.label().to_string()))
        .collect();
    let status_value = current.status.map(|s| s.as_str().to_string()).unwrap_or_default();
    let date_value = current.date.map(|d| d.as_str().to_string()).unwrap_or_default();
    let vendor_value = current.vendor_id.map(|id| id.to_string()).unwrap_or_default();

    let state = table();
    let stats = state.stats();
    let currency = state.orders().first().map(|o| o.currency.clone()).unwrap_or_default();
    let revenue = format_money(stats.revenue, &currency);
    let total = stats.total.to_string();
    let pending = stats.count(OrderStatus::Pending).to_string();
    let confirmed = stats.count(OrderStatus::Confirmed).to_string();
    let selected = state.selection_len();
    let targets = state.bulk_targets();
    let all_selected = state.all_visible_selected();
    let rows: Vec<Order> = state.visible().into_iter().cloned().collect();
    let search_value = state.search.clone();
    let direction = state.direction;

    let body = match &*orders.read() {
        None => rsx! { Loading {} },
        Some(Err(_)) => rsx! { Empty { message: "Orders could not be loaded." } },
        Some(Ok(_)) if rows.is_empty() => rsx! { Empty { message: "No orders match these filters." } },
        Some(Ok(_)) => match layout() {
            Layout::Table => rsx! {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th {
                                input {
                                    r#type: "checkbox",
                                    checked: all_selected,
                                    onchange: move |_| table.write().toggle_select_all(),
                                }
                            }
                            th { SortHeader { label: "Date", sort_key: SortKey::Date, table } }
                            th { "Guest" }
                            th { "Upsell" }
                            th { "Property" }
                            th { "Vendor" }
                            th { class: "num", SortHeader { label: "Amount", sort_key: SortKey::Amount, table } }
                            th { SortHeader { label: "Status", sort_key: SortKey::Status, table } }
                            th {}
                        }
                    }
                    tbody {
                        for order in rows {
                            OrderRow {
                                key: "{order.id}",
                                selected: state.is_selected(order.id),
                                busy: busy(),
                                order: order.clone(),
                                on_select: move |id| table.write().toggle_selected(id),
                                on_status: row_status,
                            }
                        }
                    }
                }
            },
            Layout::Cards => rsx! {
                div {
                    class: "card-grid",
                    for order in rows {
                        OrderCard {
                            key: "{order.id}",
                            selected: state.is_selected(order.id),
                            busy: busy(),
                            order: order.clone(),
                            on_select: move |id| table.write().toggle_selected(id),
                            on_status: row_status,
                        }
                    }
                }
            },
        },
    };

    rsx! {
        div {
            class: "view-page",
            div {
                class: "stat-grid",
                StatCard { label: "Orders", value: total }
                StatCard { label: "Revenue", value: revenue }
                StatCard { label: "Pending", value: pending }
                StatCard { label: "Confirmed", value: confirmed }
            }

            div {
                class: "view-toolbar",
                Select {
                    id: "status_filter",
                    value: status_value,
                    options: status_options,
                    placeholder: Some("All statuses".to_string()),
                    onchange: move |v: String| filters.write().status = v.parse().ok(),
                }
                Select {
                    id: "date_filter",
                    value: date_value,
                    options: date_options,
                    placeholder: Some("Any date".to_string()),
                    onchange: move |v: String| filters.write().date = DateBucket::parse(&v),
                }
                Select {
                    id: "vendor_filter",
                    value: vendor_value,
                    options: vendor_options,
                    placeholder: Some("All vendors".to_string()),
                    onchange: move |v: String| filters.write().vendor_id = v.parse().ok(),
                }
                SearchBox {
                    value: search_value,
                    placeholder: "Search guest, upsell, property or vendor",
                    oninput: move |q| table.write().search = q,
                }
                div {
                    class: "toggle-group",
                    Button {
                        variant: if layout() == Layout::Table { ButtonVariant::Primary } else { ButtonVariant::Ghost },
                        title: "Table",
                        onclick: move |_| layout.set(Layout::Table),
                        Icon { icon: FaList, width: 12, height: 12 }
                    }
                    Button {
                        variant: if layout() == Layout::Cards { ButtonVariant::Primary } else { ButtonVariant::Ghost },
                        title: "Cards",
                        onclick: move |_| layout.set(Layout::Cards),
                        Icon { icon: FaTableCells, width: 12, height: 12 }
                    }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: export,
                    Icon { icon: FaFileCsv, width: 12, height: 12 }
                    " Export CSV"
                }
            }

            if layout() == Layout::Cards {
                div {
                    class: "sort-bar",
                    span { class: "view-muted", "Sort by " }
                    SortHeader { label: "Date", sort_key: SortKey::Date, table }
                    SortHeader { label: "Amount", sort_key: SortKey::Amount, table }
                    SortHeader { label: "Status", sort_key: SortKey::Status, table }
                    Button {
                        variant: ButtonVariant::Ghost,
                        title: "Reverse order",
                        onclick: move |_| table.write().toggle_direction(),
                        if direction == SortDirection::Ascending {
                            Icon { icon: FaArrowUp, width: 10, height: 10 }
                        } else {
                            Icon { icon: FaArrowDown, width: 10, height: 10 }
                        }
                    }
                    label {
                        class: "checkbox",
                        input {
                            r#type: "checkbox",
                            checked: all_selected,
                            onchange: move |_| table.write().toggle_select_all(),
                        }
                        span { "Select all" }
                    }
                }
            }

            if selected > 0 {
                div {
                    class: "bulk-bar",
                    span { "{selected} selected" }
                    for target in targets {
                        Button {
                            key: "{target:?}",
                            variant: if target == OrderStatus::Cancelled { ButtonVariant::Danger } else { ButtonVariant::Primary },
                            disabled: busy(),
                            onclick: move |_| bulk_status(target),
                            {format!("Mark {}", target.label().to_lowercase())}
                        }
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| table.write().clear_selection(),
                        "Clear"
                    }
                }
            }

            {body}
        }
    }
}

/// Toast the outcome of a status change and refetch every order view on
/// success.
fn report_transition(backend: Backend, outcome: api::Result<usize>, status: OrderStatus) {
    match outcome {
        Ok(moved) => {
            backend.queries().invalidate_with(invalidate_orders);
            let noun = if moved == 1 { "order" } else { "orders" };
            backend
                .notifier()
                .success(format!("{moved} {noun} marked {}", status.label().to_lowercase()));
        }
        Err(e) => backend.notifier().error(&e),
    }
}

/// Clickable column header; the active key shows its direction.
#[component]
fn SortHeader(label: String, sort_key: SortKey, table: Signal<OrderTable>) -> Element {
    let (active, direction) = {
        let state = table.read();
        (state.sort_key == sort_key, state.direction)
    };
    rsx! {
        button {
            class: if active { "sort-header active" } else { "sort-header" },
            onclick: move |_| table.write().sort_by(sort_key),
            "{label}"
            if active {
                if direction == SortDirection::Ascending {
                    Icon { icon: FaArrowUp, width: 10, height: 10 }
                } else {
                    Icon { icon: FaArrowDown, width: 10, height: 10 }
                }
            }
        }
    }
}

#[component]
fn StatusActions(order: Order, busy: bool, on_status: EventHandler<(Order, OrderStatus)>) -> Element {
    rsx! {
        for target in order.status.next_actions().iter().copied() {
            Button {
                key: "{target:?}",
                variant: if target == OrderStatus::Cancelled { ButtonVariant::Ghost } else { ButtonVariant::Outline },
                disabled: busy,
                onclick: {
                    let order = order.clone();
                    move |_| on_status.call((order.clone(), target))
                },
                {target.label().to_string()}
            }
        }
    }
}

#[component]
fn OrderRow(
    order: Order,
    selected: bool,
    busy: bool,
    on_select: EventHandler<i64>,
    on_status: EventHandler<(Order, OrderStatus)>,
) -> Element {
    let id = order.id;
    let date = order.created_at.format("%Y-%m-%d %H:%M").to_string();
    let amount = format_money(order.amount, &order.currency);
    let upsell = order.upsell_title().to_string();
    let property = order.property_name().to_string();
    let vendor = order.vendor_name().to_string();

    rsx! {
        tr {
            class: if selected { "selected" } else { "" },
            td {
                input {
                    r#type: "checkbox",
                    checked: selected,
                    onchange: move |_| on_select.call(id),
                }
            }
            td { "{date}" }
            td {
                div { "{order.guest_name}" }
                div { class: "view-muted", "{order.guest_email}" }
            }
            td { "{upsell}" }
            td { "{property}" }
            td { "{vendor}" }
            td { class: "num", "{amount}" }
            td { StatusBadge { status: order.status } }
            td {
                class: "row-actions",
                StatusActions { order: order.clone(), busy, on_status }
            }
        }
    }
}

#[component]
fn OrderCard(
    order: Order,
    selected: bool,
    busy: bool,
    on_select: EventHandler<i64>,
    on_status: EventHandler<(Order, OrderStatus)>,
) -> Element {
    let id = order.id;
    let date = order.created_at.format("%b %d, %H:%M").to_string();
    let amount = format_money(order.amount, &order.currency);
    let upsell = order.upsell_title().to_string();
    let property = order.property_name().to_string();
    let vendor = order.vendor_name().to_string();
    let phone = order.guest_phone.clone().unwrap_or_default();

    rsx! {
        div {
            class: if selected { "card selected" } else { "card" },
            div {
                class: "card-body",
                div {
                    class: "card-title-row",
                    label {
                        class: "checkbox",
                        input {
                            r#type: "checkbox",
                            checked: selected,
                            onchange: move |_| on_select.call(id),
                        }
                        h3 { class: "card-title", "{upsell}" }
                    }
                    StatusBadge { status: order.status }
                }
                p { class: "stat-value", "{amount}" }
                p { "{order.guest_name} · {order.guest_email}" }
                if !phone.is_empty() {
                    p { class: "view-muted", "{phone}" }
                }
                p { class: "view-muted", "{property} · {vendor}" }
                p { class: "view-muted", "{date}" }
            }
            div {
                class: "card-actions",
                StatusActions { order: order.clone(), busy, on_status }
            }
        }
    }
}
