use eframe::egui::{Ui, RichText};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{price_stats, rank_by_price, Order};
use crate::data::filter::WorkingSubset;
use crate::data::model::Listing;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Data page
// ---------------------------------------------------------------------------

/// Render the Data page: extreme listings and summary metrics.
pub fn data_page(ui: &mut Ui, state: &AppState, subset: &WorkingSubset<'_>) {
    let n = state.settings.rank_size;
    ui.heading("Data Overview");

    ui.add_space(6.0);
    ui.strong(format!("Top {n} Most Expensive Listings"));
    ui.push_id("most_expensive", |ui: &mut Ui| {
        listings_table(ui, &rank_by_price(subset, n, Order::Descending));
    });

    ui.add_space(6.0);
    ui.strong(format!("{n} Cheapest Listings"));
    ui.push_id("cheapest", |ui: &mut Ui| {
        listings_table(ui, &rank_by_price(subset, n, Order::Ascending));
    });

    ui.add_space(6.0);
    ui.strong("Summary Metrics");
    match price_stats(subset) {
        Some(stats) => {
            ui.horizontal(|ui: &mut Ui| {
                metric(ui, "Average Price", &format_currency(stats.mean));
                metric(ui, "Median Price", &format_currency(stats.median));
                metric(ui, "Total Listings", &stats.count.to_string());
            });
        }
        None => {
            ui.label("No listings match the current filters.");
        }
    }
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(label).weak());
            ui.label(RichText::new(value).size(22.0).strong());
        });
    });
}

const TABLE_COLUMNS: [&str; 6] = ["borough", "type", "price", "sqft", "latitude", "longitude"];

fn listings_table(ui: &mut Ui, rows: &[&Listing]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().at_least(80.0), TABLE_COLUMNS.len())
        .header(20.0, |mut header| {
            for name in TABLE_COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for l in rows {
                body.row(18.0, |mut row| {
                    let cells = [
                        l.borough.to_string(),
                        l.property_type.clone().unwrap_or_default(),
                        format_currency(l.price),
                        l.sqft.map(|s| format!("{s:.0}")).unwrap_or_default(),
                        format!("{:.5}", l.latitude),
                        format!("{:.5}", l.longitude),
                    ];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });
}

/// `$1,234,567` style rendering, rounded to whole units.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
