use std::sync::Arc;

use datagrid::griddom::Event;
use datagrid::{
    DispatchOutcome, Grid, GridEvent, LifecycleState, LoadOutcome, Options, SortDirection,
    StaticSource,
};
use serde_json::{json, Value};

fn numbers(count: usize) -> Value {
    Value::Array((1..=count).map(|i| json!({"id": i, "name": format!("row {i}")})).collect())
}

fn people() -> Value {
    json!([
        {"id": 3, "name": "Linus", "role": "user"},
        {"id": 1, "name": "Ada", "role": "admin"},
        {"id": 2, "name": "Grace", "role": "Admin"}
    ])
}

async fn ready(options: Options, rows: Value) -> Grid {
    let mut grid = Grid::builder()
        .options(Options {
            id: "g".into(),
            ..options
        })
        .preload(rows)
        .source(StaticSource::new())
        .build();
    grid.connect();
    grid.first_render().await;
    grid.drain_events();
    grid
}

fn ids(grid: &Grid) -> Vec<Value> {
    grid.get_rows().iter().map(|row| row["id"].clone()).collect()
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_next_clamps_at_last_page() {
    let mut grid = ready(Options::default(), numbers(25)).await;
    assert_eq!(grid.total_pages(), 3);

    for _ in 0..3 {
        grid.get_next().await;
    }
    assert_eq!(grid.page(), 3);
    assert!(grid.dom_element("g-btn-next").unwrap().disabled);
    assert!(grid.dom_element("g-btn-last").unwrap().disabled);
    assert!(!grid.dom_element("g-btn-prev").unwrap().disabled);
}

#[tokio::test]
async fn test_page_window_hides_rows_outside() {
    let mut grid = ready(Options::default(), numbers(25)).await;
    grid.goto_page(2).await;

    assert!(grid.dom_element("g-row-9").unwrap().hidden);
    assert!(!grid.dom_element("g-row-10").unwrap().hidden);
    assert!(!grid.dom_element("g-row-19").unwrap().hidden);
    assert!(grid.dom_element("g-row-20").unwrap().hidden);
    assert!(grid.to_html().contains("11 - 20 of 25 items"));
}

#[tokio::test]
async fn test_empty_grid_has_single_page() {
    let mut grid = ready(Options::default(), json!([])).await;
    assert_eq!(grid.total_pages(), 0);
    grid.goto_page(5).await;
    assert_eq!(grid.page(), 1);
    assert!(grid.dom().has_class("dg-empty"));
}

// ============================================================================
// Server mode
// ============================================================================

fn server_grid(source: Arc<StaticSource>) -> Grid {
    Grid::builder()
        .options(Options {
            id: "g".into(),
            url: Some("/rows".into()),
            server: true,
            filter: true,
            ..Default::default()
        })
        .shared_source(source)
        .build()
}

#[tokio::test]
async fn test_server_meta_drives_totals() {
    let source = Arc::new(StaticSource::always(json!({
        "data": numbers(10),
        "meta": {"total": 100, "filtered": 42}
    })));
    let mut grid = server_grid(source.clone());
    grid.connect();

    assert_eq!(grid.first_render().await, LoadOutcome::Loaded { rows: 10 });
    assert_eq!(grid.total_records(), 42);
    assert_eq!(grid.total_pages(), 5);

    grid.goto_page(3).await;
    let requests = source.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].get("start"), Some("0"));
    assert_eq!(requests[1].get("start"), Some("20"));
    assert_eq!(requests[1].get("length"), Some("10"));
}

#[tokio::test]
async fn test_server_filter_and_sort_are_sent() {
    let source = Arc::new(StaticSource::always(json!({
        "data": [{"id": 1, "name": "Ada"}],
        "meta": {"total": 3, "filtered": 1, "params": {"token": "abc"}}
    })));
    let mut grid = server_grid(source.clone());
    grid.connect();
    grid.first_render().await;

    grid.set_filter("name", "ad").await;
    grid.sort_by("name", Some(SortDirection::Descending)).await;

    let last = source.requests().pop().unwrap();
    assert_eq!(last.get("search[name]"), Some("ad"));
    assert_eq!(last.get("sort"), Some("name"));
    assert_eq!(last.get("sortDir"), Some("desc"));
    assert_eq!(last.get("token"), Some("abc"));
}

// ============================================================================
// Loading
// ============================================================================

#[tokio::test]
async fn test_network_error_surfaces_message() {
    let mut grid = Grid::builder()
        .options(Options {
            id: "g".into(),
            url: Some("/rows".into()),
            ..Default::default()
        })
        .source(StaticSource::new().fail("/rows", "Service down"))
        .build();
    grid.connect();

    let outcome = grid.first_render().await;
    assert_eq!(
        outcome,
        LoadOutcome::Failed {
            message: "Service down".into()
        }
    );
    assert!(grid.dom().has_class("dg-network-error"));
    assert!(!grid.dom().has_class("dg-loading"));
    assert_eq!(
        grid.dom_element("g-empty").unwrap().text_content(),
        "Service down"
    );
    // the grid still reaches ready
    assert_eq!(grid.lifecycle_state(), LifecycleState::Ready);
}

fn loaded_from(body: Value) -> Grid {
    Grid::builder()
        .options(Options {
            id: "g".into(),
            url: Some("/rows".into()),
            ..Default::default()
        })
        .source(StaticSource::always(body))
        .build()
}

#[tokio::test]
async fn test_unreadable_body_surfaces_message() {
    let mut grid = loaded_from(json!("nope"));
    grid.connect();

    let LoadOutcome::Failed { message } = grid.first_render().await else {
        panic!("expected a failed load");
    };
    assert!(message.contains("expected an array or an object"));
    assert!(grid.dom().has_class("dg-network-error"));
    assert_eq!(grid.dom_element("g-empty").unwrap().text_content(), message);
    assert_eq!(grid.url(), None);
}

#[tokio::test]
async fn test_missing_data_key_is_not_shown_as_error() {
    let mut grid = loaded_from(json!({"rows": [{"id": 1}]}));
    grid.connect();

    assert!(matches!(grid.first_render().await, LoadOutcome::Failed { .. }));
    assert_eq!(grid.url(), None);
    assert!(!grid.dom().has_class("dg-network-error"));
    assert!(grid.dom().has_class("dg-empty"));
    assert_eq!(grid.dom_element("g-empty").unwrap().text_content(), "No data");
}

#[tokio::test]
async fn test_columns_derived_from_first_row() {
    let mut grid = Grid::builder()
        .options(Options {
            id: "g".into(),
            url: Some("/rows".into()),
            ..Default::default()
        })
        .source(StaticSource::always(json!([{"zeta": 1, "alpha": 2}])))
        .build();
    grid.connect();
    grid.first_render().await;

    let fields: Vec<&str> = grid
        .core()
        .state
        .columns
        .iter()
        .map(|c| c.field.as_str())
        .collect();
    assert_eq!(fields, vec!["zeta", "alpha"]);
}

#[tokio::test]
async fn test_add_row_grows_data() {
    let mut grid = ready(Options::default(), numbers(3)).await;
    let before = grid.get_data().len();

    assert!(grid.add_row(json!({"id": 4, "name": "row 4"}).as_object().cloned().unwrap()));
    assert_eq!(grid.get_data().len(), before + 1);
    assert!(grid.to_html().contains("1 - 4 of 4 items"));
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test]
async fn test_malformed_config_falls_back_to_defaults() {
    let mut grid = Grid::builder()
        .attribute("config", "{not json")
        .attribute("per-page", "many")
        .preload(numbers(12))
        .build();
    grid.connect();
    grid.first_render().await;

    assert_eq!(grid.per_page(), 10);
    assert_eq!(grid.total_pages(), 2);
}

#[tokio::test]
async fn test_page_attribute_at_construction() {
    let mut grid = Grid::builder()
        .attribute("page", "2")
        .preload(numbers(30))
        .build();
    assert_eq!(grid.page(), 2);

    grid.connect();
    grid.first_render().await;
    assert_eq!(grid.page(), 2);
    assert!(grid.to_html().contains("11 - 20 of 30 items"));
}

#[tokio::test]
async fn test_page_attribute_clamped_on_first_render() {
    let mut grid = Grid::builder()
        .attribute("data-page", "9")
        .preload(numbers(30))
        .build();
    grid.connect();
    grid.first_render().await;
    assert_eq!(grid.page(), 3);
}

#[tokio::test]
async fn test_config_document_then_attributes() {
    let grid = Grid::builder()
        .attribute("config", r#"{"perPage": 25, "sort": true, "filter": true}"#)
        .attribute("filter", "false")
        .build();

    assert_eq!(grid.per_page(), 25);
    assert!(grid.sortable());
    assert!(!grid.filterable());
}

// ============================================================================
// Sorting and filtering
// ============================================================================

#[tokio::test]
async fn test_sort_cycle_restores_filtered_order() {
    let mut grid = ready(
        Options {
            sort: true,
            filter: true,
            ..Default::default()
        },
        people(),
    )
    .await;

    grid.set_filter("role", "ADMIN").await;
    assert_eq!(ids(&grid), vec![json!(1), json!(2)]);

    grid.sort_data(Some("id")).await;
    assert_eq!(ids(&grid), vec![json!(1), json!(2)]);
    grid.sort_data(Some("id")).await;
    assert_eq!(ids(&grid), vec![json!(2), json!(1)]);
    grid.sort_data(Some("id")).await;
    // original relative order, filter kept
    assert_eq!(ids(&grid), vec![json!(1), json!(2)]);
    assert!(grid.sort_state().is_none());

    grid.clear_filter().await;
    assert_eq!(ids(&grid), vec![json!(3), json!(1), json!(2)]);
}

#[tokio::test]
async fn test_filters_intersect() {
    let mut grid = ready(
        Options {
            filter: true,
            ..Default::default()
        },
        people(),
    )
    .await;

    grid.set_filter("role", "admin").await;
    grid.set_filter("name", "gr").await;
    assert_eq!(ids(&grid), vec![json!(2)]);
    assert_eq!(grid.filters().len(), 2);
}

#[tokio::test]
async fn test_only_one_header_carries_sort() {
    let mut grid = ready(
        Options {
            sort: true,
            ..Default::default()
        },
        people(),
    )
    .await;

    grid.dispatch(Event::click("g-th-name"));
    grid.dispatch(Event::click("g-th-id"));

    let sorted: Vec<&str> = ["id", "name", "role"]
        .into_iter()
        .filter(|field| {
            grid.dom_element(&format!("g-th-{field}"))
                .and_then(|th| th.get_attr("aria-sort"))
                .is_some_and(|sort| sort != "none")
        })
        .collect();
    assert_eq!(sorted, vec!["id"]);
}

// ============================================================================
// Plugins
// ============================================================================

#[tokio::test]
async fn test_edit_writes_back_to_source_rows() {
    let mut grid = ready(
        Options {
            columns: vec![json!("id"), json!({"field": "name", "editable": true})],
            ..Default::default()
        },
        people(),
    )
    .await;

    let outcome = grid.dispatch(Event::Change {
        target: "g-edit-1-name".into(),
        value: "Ada L.".into(),
    });
    assert_eq!(outcome, DispatchOutcome::Handled);
    assert_eq!(grid.get_data()[1]["name"], json!("Ada L."));

    let events = grid.drain_events();
    assert!(events.contains(&GridEvent::Edit {
        key: "1".into(),
        field: "name".into(),
        value: json!("Ada L."),
    }));
}

#[tokio::test]
async fn test_confirmed_action_only() {
    let mut grid = ready(
        Options {
            actions: serde_json::from_value(json!([{"name": "delete", "confirm": true}])).unwrap(),
            ..Default::default()
        },
        people(),
    )
    .await;

    grid.set_confirm_handler(|_action, _row| false);
    grid.dispatch(Event::click("g-action-0-delete"));
    assert!(!grid.drain_events().iter().any(|e| e.name() == "action"));

    grid.set_confirm_handler(|action, row| action.name == "delete" && row["id"] == json!(3));
    grid.dispatch(Event::click("g-action-0-delete"));
    let events = grid.drain_events();
    let action = events.iter().find(|e| e.name() == "action").unwrap();
    assert!(matches!(action, GridEvent::Action { action, .. } if action == "delete"));
}

#[tokio::test]
async fn test_reconnect_keeps_state() {
    let mut grid = ready(Options::default(), numbers(25)).await;
    grid.goto_page(2).await;

    assert!(grid.disconnect());
    assert_eq!(grid.lifecycle_state(), LifecycleState::Disconnected);
    assert!(grid.connect());
    assert_eq!(grid.lifecycle_state(), LifecycleState::AttachedPendingRender);

    // rows are present: rendering again does not fetch
    assert_eq!(grid.first_render().await, LoadOutcome::Skipped);
    assert!(grid.is_ready());
    assert_eq!(grid.page(), 2);
    assert_eq!(grid.get_data().len(), 25);
}
