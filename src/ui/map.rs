use eframe::egui::{Ui, RichText};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::color::borough_color;
use crate::data::aggregate::{centroid, UNKNOWN_CATEGORY};
use crate::data::filter::WorkingSubset;
use crate::data::model::{Borough, Listing};
use crate::ui::tables::format_currency;

/// Degrees shown either side of the centroid when the plot first opens.
const INITIAL_SPAN: f64 = 0.15;

// ---------------------------------------------------------------------------
// Map page
// ---------------------------------------------------------------------------

/// Scatter of listing coordinates, coloured by borough and framed around
/// the subset's centroid.
pub fn map_page(ui: &mut Ui, subset: &WorkingSubset<'_>) {
    ui.heading("Map of Listings");

    let Some(center) = centroid(subset) else {
        ui.label("No listings match the current filters.");
        return;
    };
    ui.label(
        RichText::new(format!(
            "Centered on {:.4}, {:.4}",
            center.latitude, center.longitude
        ))
        .weak(),
    );

    // One degree of longitude is shorter than one of latitude.
    let aspect = center.latitude.to_radians().cos() as f32;
    let hover_rows: Vec<Listing> = subset.rows().cloned().collect();

    Plot::new("listing_map")
        .legend(Legend::default())
        .data_aspect(aspect)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(center.longitude - INITIAL_SPAN)
        .include_x(center.longitude + INITIAL_SPAN)
        .include_y(center.latitude - INITIAL_SPAN)
        .include_y(center.latitude + INITIAL_SPAN)
        .label_formatter(move |name, value| {
            match nearest_listing(&hover_rows, value.x, value.y, aspect as f64) {
                Some(listing) if !name.is_empty() => {
                    format!("{name}\n{}", listing_tooltip(listing))
                }
                Some(listing) => listing_tooltip(listing),
                None => format!("{:.5}, {:.5}", value.y, value.x),
            }
        })
        .show(ui, |plot_ui| {
            for borough in Borough::ALL {
                let coords: Vec<[f64; 2]> = subset
                    .rows()
                    .filter(|l| l.borough == borough)
                    .map(|l| [l.longitude, l.latitude])
                    .collect();
                if coords.is_empty() {
                    continue;
                }
                let points: PlotPoints = coords.into();
                plot_ui.points(
                    Points::new(points)
                        .name(borough.name())
                        .color(borough_color(borough))
                        .radius(2.5),
                );
            }
        });
}

/// Listing closest to the plot position `(x, y)` = (longitude, latitude).
///
/// Longitude distances are scaled by `aspect` so "closest" matches what is
/// seen on screen.
fn nearest_listing(listings: &[Listing], x: f64, y: f64, aspect: f64) -> Option<&Listing> {
    listings.iter().min_by(|a, b| {
        let dist = |l: &Listing| ((l.longitude - x) * aspect).powi(2) + (l.latitude - y).powi(2);
        dist(a).total_cmp(&dist(b))
    })
}

fn listing_tooltip(listing: &Listing) -> String {
    let sqft = listing
        .sqft
        .map(|s| format!("{s:.0}"))
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        "Type: {}\nPrice: {}\nSqft: {sqft}",
        listing.property_type.as_deref().unwrap_or(UNKNOWN_CATEGORY),
        format_currency(listing.price),
    )
}
