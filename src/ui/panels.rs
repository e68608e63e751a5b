use eframe::egui::{self, Align2, FontId, RichText, Sense, Slider, Stroke, Ui, pos2, vec2};
use egui_extras::{Column, TableBuilder};

use crate::data::select::{PayloadRange, SiteSelection};
use crate::state::AppState;

/// Spacing of the labeled tick marks on the payload range control (kg).
const TICK_STEP_KG: f64 = 2000.0;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: title, dataset counts, records-table toggle.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("SpaceX Launch Records Dashboard");
        ui.separator();

        ui.label(format!(
            "{} launches across {} sites",
            state.dataset.len(),
            state.dataset.sites.len()
        ));
        ui.separator();
        ui.label(format!("{} in view", state.correlation.len()));
        ui.separator();

        if ui
            .selectable_label(state.show_records, "Records")
            .clicked()
        {
            state.show_records = !state.show_records;
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the site selector and the payload range control.
pub fn control_panel(ui: &mut Ui, state: &mut AppState) {
    let dataset = state.dataset.clone();

    ui.heading("Controls");
    ui.separator();

    // ---- Site selector ----
    ui.strong("Launch site");
    let mut selection = state.site.clone();
    egui::ComboBox::from_id_salt("site_select")
        .selected_text(selection.label().to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selection, SiteSelection::AllSites, "All Sites");
            for site in &dataset.sites {
                ui.selectable_value(&mut selection, SiteSelection::Site(site.clone()), site);
            }
        });
    state.select_site(selection);

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (kg)");
    let global = state.global_range();
    let mut low = state.payload_range.low;
    let mut high = state.payload_range.high;

    ui.add(
        Slider::new(&mut low, global.low..=global.high)
            .text("min")
            .fixed_decimals(0),
    );
    ui.add(
        Slider::new(&mut high, global.low..=global.high)
            .text("max")
            .fixed_decimals(0),
    );
    // `new` normalizes the pair, so crossing the handles swaps the bounds
    // instead of producing an inverted range.
    state.set_payload_range(PayloadRange::new(low, high));

    tick_strip(ui, global);

    if ui.button("Full range").clicked() {
        state.set_payload_range(global);
    }

    ui.add_space(8.0);
    ui.separator();
    ui.label(
        RichText::new(format!(
            "Showing {} of {} launches",
            state.correlation.len(),
            state.dataset.len()
        ))
        .weak(),
    );
}

/// Tick positions at fixed steps from the range's low bound, plus the exact
/// high bound. The high bound appears once even when it lies on the grid.
pub fn tick_marks(range: PayloadRange) -> Vec<f64> {
    let mut ticks = Vec::new();
    let mut mark = range.low;
    while mark < range.high {
        ticks.push(mark);
        mark += TICK_STEP_KG;
    }
    ticks.push(range.high);
    ticks
}

/// Format a payload mass for tick labels: rounded, thousands-separated.
pub fn format_kg(value: f64) -> String {
    let n = value.round() as i64;
    let digits = n.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if n < 0 { "-" } else { "" };
    format!("{sign}{grouped} kg")
}

/// Paint the labeled tick strip under the range sliders.
fn tick_strip(ui: &mut Ui, global: PayloadRange) {
    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), 18.0), Sense::hover());
    let painter = ui.painter_at(rect);
    let color = ui.visuals().weak_text_color();
    let span = global.span();

    let ticks = tick_marks(global);
    let last = ticks.len() - 1;
    for (i, tick) in ticks.into_iter().enumerate() {
        let frac = if span > 0.0 {
            ((tick - global.low) / span) as f32
        } else {
            0.0
        };
        let x = rect.left() + frac * rect.width();
        painter.line_segment(
            [pos2(x, rect.top()), pos2(x, rect.top() + 4.0)],
            Stroke::new(1.0, color),
        );
        // Clamp the edge labels into the strip.
        let anchor = if i == 0 {
            Align2::LEFT_TOP
        } else if i == last {
            Align2::RIGHT_TOP
        } else {
            Align2::CENTER_TOP
        };
        painter.text(
            pos2(x, rect.top() + 6.0),
            anchor,
            format_kg(tick),
            FontId::proportional(9.0),
            color,
        );
    }
}

// ---------------------------------------------------------------------------
// Bottom panel – filtered records table
// ---------------------------------------------------------------------------

/// Render the table of records currently feeding the scatter chart,
/// including the display-only detail columns.
pub fn records_panel(ui: &mut Ui, state: &AppState) {
    let dataset = &state.dataset;
    let detail_columns = &dataset.detail_columns;

    ui.strong(format!("Filtered launches ({})", state.correlation.len()));
    ui.separator();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(60.0))
        .columns(Column::auto().at_least(60.0), detail_columns.len())
        .min_scrolled_height(0.0)
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong("Launch Site");
            });
            header.col(|ui| {
                ui.strong("Payload (kg)");
            });
            header.col(|ui| {
                ui.strong("Outcome");
            });
            header.col(|ui| {
                ui.strong("Booster");
            });
            for col in detail_columns {
                header.col(|ui| {
                    ui.strong(col);
                });
            }
        })
        .body(|body| {
            body.rows(16.0, state.correlation.len(), |mut row| {
                let rec = &dataset.records[state.correlation[row.index()]];
                row.col(|ui| {
                    ui.label(&rec.site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", rec.payload_mass));
                });
                row.col(|ui| {
                    ui.label(rec.outcome.label());
                });
                row.col(|ui| {
                    ui.label(&rec.booster_category);
                });
                for col in detail_columns {
                    row.col(|ui| {
                        match rec.details.get(col) {
                            Some(value) => ui.label(value.to_string()),
                            None => ui.label("–"),
                        };
                    });
                }
            });
        });
}
