use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, Pos2, Shape, Stroke, Ui, RichText};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::{borough_color, generate_palette};
use crate::data::aggregate::{category_breakdown, histogram, mean_by_group, CategoryCount};
use crate::data::filter::WorkingSubset;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;
/// Largest angle drawn as one polygon; keeps every piece convex.
const MAX_WEDGE: f32 = FRAC_PI_2;

// ---------------------------------------------------------------------------
// Charts page
// ---------------------------------------------------------------------------

/// Render the Charts page: price histogram, borough means, type breakdown.
pub fn charts_page(ui: &mut Ui, state: &AppState, subset: &WorkingSubset<'_>) {
    ui.heading("Charts Overview");

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Price Distribution");
            price_histogram(ui, subset, state.settings.histogram_bins);
            ui.add_space(10.0);

            ui.strong("Average Price by Borough");
            borough_means(ui, subset);
            ui.add_space(10.0);

            ui.strong("Property Type Distribution");
            type_pie(
                ui,
                &category_breakdown(subset, state.settings.other_threshold),
            );
        });
}

fn price_histogram(ui: &mut Ui, subset: &WorkingSubset<'_>, bins: usize) {
    let Some(hist) = histogram(&subset.prices(), bins) else {
        ui.label("No listings match the current filters.");
        return;
    };

    ui.label(
        RichText::new(format!(
            "{} listings in {} buckets",
            hist.total(),
            hist.counts.len()
        ))
        .weak(),
    );

    let width = hist.bin_width();
    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            Bar::new(hist.bin_center(i), count as f64)
                .width(width)
                .name(format!("{:.0} – {:.0}", hist.edges[i], hist.edges[i + 1]))
        })
        .collect();

    Plot::new("price_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label("Price")
        .y_axis_label("Listings")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

fn borough_means(ui: &mut Ui, subset: &WorkingSubset<'_>) {
    let means = mean_by_group(subset);
    if means.is_empty() {
        ui.label("No listings match the current filters.");
        return;
    }

    Plot::new("borough_means")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Average price")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, (borough, mean)) in means.iter().enumerate() {
                let bar = Bar::new(i as f64, *mean).width(0.6);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(borough.name())
                        .color(borough_color(*borough)),
                );
            }
        });
}

/// Pie of property types, drawn directly with the painter.
fn type_pie(ui: &mut Ui, breakdown: &[CategoryCount]) {
    let total: usize = breakdown.iter().map(|c| c.count).sum();
    if total == 0 {
        ui.label("No listings match the current filters.");
        return;
    }
    let colors = generate_palette(breakdown.len());

    ui.horizontal(|ui: &mut Ui| {
        let size = CHART_HEIGHT;
        let (response, painter) = ui.allocate_painter(egui::vec2(size, size), egui::Sense::hover());
        let center = response.rect.center();
        let radius = size * 0.45;

        // Counter-clockwise from twelve o'clock.
        let mut start = FRAC_PI_2;
        for (slice, color) in breakdown.iter().zip(&colors) {
            let sweep = TAU * slice.count as f32 / total as f32;
            for shape in wedge(center, radius, start, sweep, *color) {
                painter.add(shape);
            }
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for (slice, color) in breakdown.iter().zip(&colors) {
                let share = 100.0 * slice.count as f64 / total as f64;
                ui.label(
                    RichText::new(format!("■ {}  {share:.1}%  ({})", slice.label, slice.count))
                        .color(*color),
                );
            }
        });
    });
}

/// Convex polygons covering the circular sector `start..start + sweep`.
fn wedge(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> Vec<Shape> {
    let pieces = (sweep / MAX_WEDGE).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f32;
    let steps_per_piece = 16;

    (0..pieces)
        .map(|p| {
            let from = start + piece_sweep * p as f32;
            let mut points = vec![center];
            for s in 0..=steps_per_piece {
                let a = from + piece_sweep * s as f32 / steps_per_piece as f32;
                // Screen y grows downwards.
                points.push(center + radius * egui::vec2(a.cos(), -a.sin()));
            }
            Shape::convex_polygon(points, color, Stroke::NONE)
        })
        .collect()
}
