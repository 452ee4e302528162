/*!
 * Desktop dashboard for covid-tracker-rs
 *
 * Mirrors the web tracker layout:
 * - Country picker and three info cards (clicking a card highlights that category)
 * - Bubble map of all countries for the highlighted category
 * - Countries sorted by confirmed cases, with CSV/JSON export
 * - Worldwide daily-new line chart for the highlighted category
 *
 * Requests run on background threads; results come back over a channel and are
 * applied on the UI thread only.
 */

use covid_tracker::api::ClientConfig;
use covid_tracker::dashboard::{Dashboard, Outcome, Ticket};
use covid_tracker::format::format_count;
use covid_tracker::history::{self, Timeline};
use covid_tracker::models::{CountryStat, Selection, Stats};
use covid_tracker::{Client, Error, map, storage};
use eframe::egui;
use std::sync::mpsc;
use std::thread;

const HISTORY_DAYS: u32 = 120;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("COVID-19 Tracker"),
        ..Default::default()
    };

    eframe::run_native(
        "COVID-19 Tracker",
        options,
        Box::new(|cc| Ok(Box::new(TrackerApp::new(&cc.egui_ctx)))),
    )
}

/// Results delivered from worker threads.
enum Message {
    Selection(Ticket, Result<Stats, Error>),
    Countries(Result<Vec<CountryStat>, Error>),
    History(Result<Timeline, Error>),
}

/// Where an error came from. Each source keeps its own error line, so a late
/// country-list or timeline load cannot hide a failed selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Selection,
    Countries,
    History,
    Export,
}

#[derive(Debug, Default)]
struct ErrorLines {
    selection: String,
    countries: String,
    history: String,
    export: String,
}

impl ErrorLines {
    fn slot(&mut self, source: Source) -> &mut String {
        match source {
            Source::Selection => &mut self.selection,
            Source::Countries => &mut self.countries,
            Source::History => &mut self.history,
            Source::Export => &mut self.export,
        }
    }

    fn set(&mut self, source: Source, message: String) {
        *self.slot(source) = message;
    }

    /// Apply an outcome to the line of its source only. Stale results change nothing.
    fn record(&mut self, source: Source, outcome: Outcome) {
        match outcome {
            Outcome::Applied => self.slot(source).clear(),
            Outcome::Stale => {}
            Outcome::Failed(err) => self.set(source, err.to_string()),
        }
    }

    fn lines(&self) -> impl Iterator<Item = &str> {
        [&self.selection, &self.countries, &self.history, &self.export]
            .into_iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

struct TrackerApp {
    client: Client,
    dashboard: Dashboard,
    timeline: Option<Timeline>,

    // UI state
    status_message: String,
    errors: ErrorLines,

    sender: mpsc::Sender<Message>,
    receiver: mpsc::Receiver<Message>,
}

impl TrackerApp {
    fn new(ctx: &egui::Context) -> Self {
        let client = match Client::with_config(ClientConfig::from_env()) {
            Ok(client) => client,
            Err(err) => {
                log::warn!("falling back to default client: {}", err);
                Client::default()
            }
        };
        let (sender, receiver) = mpsc::channel();
        let mut app = Self {
            client,
            dashboard: Dashboard::new(),
            timeline: None,
            status_message: String::new(),
            errors: ErrorLines::default(),
            sender,
            receiver,
        };

        // Initial load: worldwide totals, the country list and the timeline.
        app.select(ctx, Selection::Worldwide);
        app.spawn(ctx, |client| Message::Countries(client.fetch_countries()));
        app.spawn(ctx, |client| Message::History(client.fetch_history(HISTORY_DAYS)));
        app
    }

    fn spawn<F>(&self, ctx: &egui::Context, job: F)
    where
        F: FnOnce(&Client) -> Message + Send + 'static,
    {
        let client = self.client.clone();
        let sender = self.sender.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let _ = sender.send(job(&client));
            ctx.request_repaint();
        });
    }

    fn select(&mut self, ctx: &egui::Context, selection: Selection) {
        let ticket = self.dashboard.begin_selection(selection);
        self.spawn(ctx, move |client| {
            let result = client.fetch_selection(ticket.selection());
            Message::Selection(ticket, result)
        });
    }

    fn check_messages(&mut self) {
        while let Ok(msg) = self.receiver.try_recv() {
            let (source, outcome) = match msg {
                Message::Selection(ticket, result) => {
                    (Source::Selection, self.dashboard.complete(ticket, result))
                }
                Message::Countries(result) => {
                    (Source::Countries, self.dashboard.load_countries(result))
                }
                Message::History(result) => match result {
                    Ok(timeline) => {
                        self.timeline = Some(timeline);
                        (Source::History, Outcome::Applied)
                    }
                    Err(err) => (Source::History, Outcome::Failed(err)),
                },
            };
            self.errors.record(source, outcome);
        }
    }

    fn export_table(&mut self) {
        let dir = dirs::home_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(dir)
            .set_file_name("covid_countries.csv")
            .add_filter("CSV", &["csv"])
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };
        let rows = &self.dashboard.countries().table;
        let result = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            storage::save_table_json(rows, &path)
        } else {
            storage::save_table_csv(rows, &path)
        };
        match result {
            Ok(()) => {
                self.status_message = format!("Saved {} rows to {}", rows.len(), path.display());
                self.errors.slot(Source::Export).clear();
            }
            Err(err) => self
                .errors
                .set(Source::Export, format!("Failed to save table: {}", err)),
        }
    }

    fn header_ui(&mut self, ui: &mut egui::Ui) {
        let mut picked: Option<Selection> = None;
        ui.horizontal(|ui| {
            ui.heading("COVID-19 TRACKER");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let shown = self.dashboard.shown_selection().clone();
                let options = &self.dashboard.countries().options;
                let selected_text = match &shown {
                    Selection::Worldwide => "Worldwide".to_string(),
                    Selection::Country(code) => options
                        .iter()
                        .find(|o| &o.code == code)
                        .map(|o| o.name.clone())
                        .unwrap_or_else(|| code.clone()),
                };
                egui::ComboBox::from_id_salt("country_picker")
                    .selected_text(selected_text)
                    .width(220.0)
                    .show_ui(ui, |ui| {
                        if ui
                            .selectable_label(shown == Selection::Worldwide, "Worldwide")
                            .clicked()
                        {
                            picked = Some(Selection::Worldwide);
                        }
                        for opt in options {
                            let is_selected = shown.code() == opt.code;
                            if ui.selectable_label(is_selected, opt.name.as_str()).clicked() {
                                picked = Some(Selection::parse(&opt.code));
                            }
                        }
                    });
                if self.dashboard.is_loading() {
                    ui.spinner();
                }
            });
        });
        if let Some(selection) = picked {
            if &selection != self.dashboard.shown_selection() {
                let ctx = ui.ctx().clone();
                self.select(&ctx, selection);
            }
        }
    }

    fn cards_ui(&mut self, ui: &mut egui::Ui) {
        let cards = self.dashboard.info_cards();
        ui.columns(cards.len(), |cols| {
            for (col, card) in cols.iter_mut().zip(cards.iter()) {
                let color = if card.is_red {
                    egui::Color32::from_rgb(204, 16, 52)
                } else {
                    egui::Color32::from_rgb(125, 215, 29)
                };
                let text = egui::RichText::new(format!(
                    "{}\n{}\n{} Total",
                    card.title, card.today, card.total
                ))
                .color(color)
                .size(16.0);
                if col.selectable_label(card.active, text).clicked() {
                    self.dashboard.set_category(card.category);
                }
            }
        });
    }

    fn map_ui(&self, ui: &mut egui::Ui) {
        let size = egui::vec2(ui.available_width(), ui.available_height().max(300.0));
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 4.0, egui::Color32::from_rgb(233, 238, 242));

        let category = self.dashboard.category();
        let viewport = self.dashboard.snapshot().viewport;
        let (r, g, b) = map::category_style(category).rgb;
        let fill = egui::Color32::from_rgba_unmultiplied(r, g, b, 90);
        let stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(r, g, b));

        let hover = response.hover_pos();
        let mut hovered: Option<(egui::Pos2, map::Bubble)> = None;
        for bubble in map::bubbles(&self.dashboard.countries().map, category) {
            let (x, y) = map::project(
                bubble.lat,
                bubble.lng,
                &viewport,
                rect.width() as f64,
                rect.height() as f64,
            );
            let center = rect.min + egui::vec2(x as f32, y as f32);
            let radius = map::metres_to_px(bubble.radius_m, &viewport) as f32;
            if !rect.expand(radius).contains(center) {
                continue;
            }
            painter.circle_filled(center, radius, fill);
            painter.circle_stroke(center, radius, stroke);
            if let Some(pos) = hover {
                if pos.distance(center) <= radius.max(3.0) {
                    hovered = Some((center, bubble));
                }
            }
        }

        if let Some((center, bubble)) = hovered {
            let text = format!("{}\n{}", bubble.country, bubble.popup.join("\n"));
            painter.text(
                center,
                egui::Align2::LEFT_BOTTOM,
                text,
                egui::FontId::proportional(13.0),
                egui::Color32::BLACK,
            );
        }
    }

    fn table_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Live Cases by Country");
            if ui.button("Export").clicked() {
                self.export_table();
            }
        });
        egui::ScrollArea::vertical()
            .id_salt("table_scroll")
            .max_height(ui.available_height() * 0.5)
            .show(ui, |ui| {
                egui::Grid::new("cases_table").striped(true).show(ui, |ui| {
                    for c in &self.dashboard.countries().table {
                        ui.label(c.country.as_str());
                        ui.label(egui::RichText::new(format_count(c.cases)).strong());
                        ui.end_row();
                    }
                });
            });
    }

    fn chart_ui(&self, ui: &mut egui::Ui) {
        let category = self.dashboard.category();
        ui.heading(format!("Worldwide new {}", category));
        let Some(timeline) = &self.timeline else {
            ui.label("Loading history...");
            return;
        };
        let daily = history::daily_new(timeline, category);
        let size = egui::vec2(ui.available_width(), ui.available_height().max(160.0));
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let rect = response.rect.shrink(8.0);
        if daily.len() < 2 {
            return;
        }

        let min = daily.iter().map(|p| p.value).min().unwrap_or(0).min(0) as f32;
        let max = daily.iter().map(|p| p.value).max().unwrap_or(0).max(1) as f32;
        let span = (max - min).max(1.0);
        let step = rect.width() / (daily.len() - 1) as f32;
        let points: Vec<egui::Pos2> = daily
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let y = rect.bottom() - (p.value as f32 - min) / span * rect.height();
                egui::pos2(rect.left() + i as f32 * step, y)
            })
            .collect();

        let (r, g, b) = map::category_style(category).rgb;
        let zero_y = rect.bottom() + min / span * rect.height();
        painter.line_segment(
            [egui::pos2(rect.left(), zero_y), egui::pos2(rect.right(), zero_y)],
            egui::Stroke::new(1.0, egui::Color32::GRAY),
        );
        painter.add(egui::Shape::line(
            points,
            egui::Stroke::new(2.0, egui::Color32::from_rgb(r, g, b)),
        ));
    }
}

impl eframe::App for TrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_messages();

        egui::SidePanel::right("right_panel")
            .min_width(320.0)
            .show(ctx, |ui| {
                self.table_ui(ui);
                ui.separator();
                self.chart_ui(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.header_ui(ui);
            ui.add_space(8.0);
            self.cards_ui(ui);
            ui.add_space(8.0);

            if !self.status_message.is_empty() {
                ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
            }
            for line in self.errors.lines() {
                ui.colored_label(egui::Color32::RED, line);
            }

            self.map_ui(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(msg: &str) -> Outcome {
        Outcome::Failed(Error::Api(msg.into()))
    }

    #[test]
    fn late_loads_do_not_hide_a_selection_error() {
        let mut errors = ErrorLines::default();
        errors.record(Source::Selection, failed("Country not found"));
        errors.record(Source::Countries, Outcome::Applied);
        errors.record(Source::History, Outcome::Applied);
        let lines: Vec<&str> = errors.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Country not found"));
    }

    #[test]
    fn applied_selection_clears_only_its_own_line() {
        let mut errors = ErrorLines::default();
        errors.record(Source::Selection, failed("boom"));
        errors.record(Source::Countries, failed("list down"));
        errors.record(Source::Selection, Outcome::Stale);
        assert_eq!(errors.lines().count(), 2);

        errors.record(Source::Selection, Outcome::Applied);
        let lines: Vec<&str> = errors.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("list down"));
    }
}
