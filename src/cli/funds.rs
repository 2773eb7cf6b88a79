use super::ui;
use crate::core::SchemeRecord;
use crate::query::{self, Page, PageRequest, SearchTerm};
use crate::service::NavService;
use anyhow::{Result, anyhow};
use comfy_table::{Cell, Table};

fn render_funds(page: &Page<&SchemeRecord>) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Scheme"),
        ui::header_cell("Fund House"),
        ui::header_cell("NAV"),
        ui::header_cell("Date"),
        ui::header_cell("Type"),
        ui::header_cell("Category"),
    ]);

    for record in &page.items {
        table.add_row(vec![
            Cell::new(record.serial_number),
            Cell::new(&record.scheme_name),
            Cell::new(record.fund_house.as_deref().unwrap_or("-")),
            ui::format_optional_cell(record.nav, |nav| format!("{nav:.4}")),
            ui::format_optional_cell(record.nav_date, |date| date.to_string()),
            Cell::new(record.scheme_type),
            Cell::new(record.scheme_category),
        ]);
    }
    table
}

fn render_record(record: &SchemeRecord) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);

    let optional = |value: Option<&str>| value.unwrap_or("N/A").to_string();
    let rows = [
        ("Serial Number", record.serial_number.to_string()),
        ("Scheme Code", record.scheme_code.clone()),
        ("Fund House", optional(record.fund_house.as_deref())),
        (
            "NAV",
            record.nav.map_or("N/A".to_string(), |nav| format!("{nav:.4}")),
        ),
        (
            "NAV Date",
            record.nav_date.map_or("N/A".to_string(), |d| d.to_string()),
        ),
        ("Scheme Type", record.scheme_type.to_string()),
        ("Category", record.scheme_category.to_string()),
        ("ISIN Payout", optional(record.isin_payout.as_deref())),
        ("ISIN Reinvest", optional(record.isin_reinvest.as_deref())),
    ];
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field), Cell::new(value)]);
    }
    table
}

pub async fn search(service: &NavService, query: &str, request: PageRequest) -> Result<()> {
    let term = SearchTerm::parse(Some(query))?;

    let pb = ui::new_spinner("Fetching NAV feed...");
    let snapshot = service.snapshot().await;
    pb.finish_and_clear();
    let snapshot = snapshot?;

    let page = query::search(&snapshot, &term, request);
    if page.items.is_empty() {
        println!(
            "{}",
            ui::style_text(
                &format!("No schemes match '{query}' ({} total)", page.total_count),
                ui::StyleType::Subtle
            )
        );
        return Ok(());
    }

    println!(
        "Results for {}\n",
        ui::style_text(query, ui::StyleType::Title)
    );
    println!("{}", render_funds(&page));
    println!(
        "\n{} {}-{} of {}",
        ui::style_text("Showing", ui::StyleType::Label),
        page.offset + 1,
        page.offset + page.items.len(),
        page.total_count
    );
    Ok(())
}

pub async fn show(service: &NavService, serial_number: u32) -> Result<()> {
    let pb = ui::new_spinner("Fetching NAV feed...");
    let snapshot = service.snapshot().await;
    pb.finish_and_clear();
    let snapshot = snapshot?;

    let record = query::by_id(&snapshot, serial_number)
        .ok_or_else(|| anyhow!("Fund not found: {serial_number}"))?;

    println!(
        "{}\n",
        ui::style_text(&record.scheme_name, ui::StyleType::Title)
    );
    println!("{}", render_record(record));
    Ok(())
}
