use eframe::egui::{self, RichText, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart;
use crate::state::AppState;

/// Arc resolution of a full pie slice.
const SLICE_SEGMENTS: usize = 64;

/// Hover radius for the scatter tooltip, in screen pixels.
const HOVER_RADIUS: f32 = 8.0;

// ---------------------------------------------------------------------------
// Proportion chart
// ---------------------------------------------------------------------------

/// Paint the proportion chart for the cached breakdown rows.
pub fn breakdown_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong(chart::breakdown_title(&state.site));

    let layout = chart::pie_layout(&state.breakdown);
    let colors = state.breakdown_colors();

    Plot::new("breakdown_chart")
        .height(height)
        .data_aspect(1.0)
        .show_axes([false, false])
        .show_grid([false, false])
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            if layout.is_empty() {
                plot_ui.text(Text::new(
                    PlotPoint::new(0.0, 0.0),
                    RichText::new("No successful launches to chart").weak(),
                ));
                return;
            }

            for slice in &layout {
                let color = colors.color_for(&slice.label);
                let points: PlotPoints = chart::slice_points(slice, SLICE_SEGMENTS)
                    .into_iter()
                    .collect();
                plot_ui.polygon(
                    Polygon::new(points)
                        .name(format!("{} ({})", slice.label, slice.count))
                        .fill_color(color.gamma_multiply(0.85))
                        .stroke(egui::Stroke::new(1.0, color)),
                );

                // Percentage labels only where the slice can hold them.
                if slice.fraction >= 0.05 {
                    let [x, y] = chart::slice_label_pos(slice);
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(format!("{:.1}%", slice.fraction * 100.0)).strong(),
                    ));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation scatter
// ---------------------------------------------------------------------------

/// Paint the payload/outcome scatter for the cached correlation rows.
pub fn correlation_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong(chart::correlation_title(&state.site));

    let groups = chart::scatter_groups(&state.dataset, &state.correlation);

    let response = Plot::new("correlation_chart")
        .height(height)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Class")
        .include_y(-0.2)
        .include_y(1.2)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            if groups.is_empty() {
                let bounds = plot_ui.plot_bounds();
                let center = PlotPoint::new(
                    (bounds.min()[0] + bounds.max()[0]) / 2.0,
                    (bounds.min()[1] + bounds.max()[1]) / 2.0,
                );
                plot_ui.text(Text::new(
                    center,
                    RichText::new("No launches match the current filters").weak(),
                ));
                return;
            }

            for group in &groups {
                let points: PlotPoints = group
                    .points
                    .iter()
                    .map(|p| [p.payload_mass, f64::from(p.outcome)])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&group.category)
                        .color(state.booster_colors.color_for(&group.category))
                        .shape(MarkerShape::Circle)
                        .radius(4.0),
                );
            }
        });

    // Per-point tooltip: site, booster category, payload, outcome.
    if let Some(pointer) = response.response.hover_pos() {
        let mut nearest: Option<(f32, usize)> = None;
        for group in &groups {
            for point in &group.points {
                let screen = response
                    .transform
                    .position_from_point(&PlotPoint::new(point.payload_mass, f64::from(point.outcome)));
                let dist = screen.distance(pointer);
                if dist <= HOVER_RADIUS && nearest.map_or(true, |(best, _)| dist < best) {
                    nearest = Some((dist, point.record));
                }
            }
        }

        if let Some((_, idx)) = nearest {
            let rec = &state.dataset.records[idx];
            egui::show_tooltip_at_pointer(
                ui.ctx(),
                ui.layer_id(),
                egui::Id::new("correlation_tooltip"),
                |ui| {
                    ui.strong(&rec.site);
                    ui.label(format!("Booster: {}", rec.booster_category));
                    ui.label(format!("Payload: {:.0} kg", rec.payload_mass));
                    ui.label(format!("Outcome: {}", rec.outcome.label()));
                },
            );
        }
    }
}
