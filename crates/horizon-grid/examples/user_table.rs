//! Horizon Grid User Table Example
//!
//! Drives a table engine the way a host screen would: loads rows from JSON,
//! reacts to signals and prints each derived view as plain text.
//!
//! Run with: RUST_LOG=horizon_grid=debug cargo run -p horizon-grid --example user_table

use std::sync::Arc;

use horizon_grid::prelude::*;
use tracing_subscriber::EnvFilter;

const USERS: &str = r#"[
    {"id": 1, "name": "Mallory", "role": "admin", "age": 41, "active": true},
    {"id": 2, "name": "Trent", "role": "auditor", "age": 35, "active": true},
    {"id": 3, "name": "Mike", "role": "support", "age": 29, "active": false},
    {"id": 4, "name": "Alice", "role": "developer", "age": 33, "active": true},
    {"id": 5, "name": "Bob", "role": "developer", "age": 27, "active": true},
    {"id": 6, "name": "Emma", "role": "marketing", "age": 38, "active": false},
    {"id": 7, "name": "Carol", "role": "support", "age": 45, "active": true}
]"#;

const CONFIG: &str = r#"
loading_label = "Fetching users..."
items_per_page_options = [3, 6]
"#;

fn print_view(title: &str, view: &DerivedView<DynamicRecord>) {
    println!("== {title}");
    if view.loading {
        println!("   [{}]", view.loading_label);
    }
    let header: Vec<String> = view
        .headers
        .iter()
        .map(|h| match h.sort {
            Some(SortOrder::Ascending) => format!("{} ^", h.title),
            Some(SortOrder::Descending) => format!("{} v", h.title),
            None => h.title.clone(),
        })
        .collect();
    println!("   {}", header.join(" | "));
    for row in &view.cells {
        println!("   {}", row.join(" | "));
    }
    println!(
        "   page {}/{} ({} matching)",
        view.current_page, view.page_count, view.total_filtered_count
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = TableConfig::from_toml_str(CONFIG)?.with_loading(true);
    let columns: Vec<Column<DynamicRecord>> = vec![
        Column::new("Name", "name"),
        Column::new("Role", "role"),
        Column::new("Age", "age"),
        Column::new("Active", "active")
            .with_sortable(false)
            .with_render(|value, _| match value.as_bool() {
                Some(true) => "yes".to_string(),
                _ => "no".to_string(),
            }),
    ];

    let engine = Arc::new(TableEngine::new(Vec::new(), columns, config)?);
    print_view("before data arrives", &engine.view());

    engine.signals().view_changed.connect(|info: &PageInfo| {
        tracing::info!(
            page = info.current_page,
            pages = info.page_count,
            rows = info.total_filtered_count,
            "view changed"
        );
    });
    engine.signals().row_clicked.connect(|row: &DynamicRecord| {
        println!("-> clicked {}", row.field("name").unwrap_or_default());
    });
    {
        let weak = Arc::downgrade(&engine);
        engine.signals().row_edit_requested.connect(move |row: &DynamicRecord| {
            println!("-> editing record {}", row.id());
            if let Some(engine) = weak.upgrade() {
                engine.set_query("");
            }
        });
    }

    engine.set_dataset(DynamicRecord::from_json_array(USERS)?)?;
    engine.set_loading(false);
    print_view("all users", &engine.view());

    engine.set_query("m");
    engine.toggle_sort("age")?;
    engine.toggle_sort("age")?;
    print_view("matching \"m\", oldest first", &engine.view());

    engine.next_page();
    print_view("next page", &engine.view());

    engine.click_row_at(0);
    engine.request_row_edit_at(0);
    print_view("after edit request", &engine.view());

    if let Err(err) = engine.toggle_sort("active") {
        println!("-> {err}");
    }
    if let Err(err) = engine.set_items_per_page(4) {
        println!("-> {err}");
    }

    Ok(())
}
