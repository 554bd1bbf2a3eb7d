use anyhow::Context;
use eframe::{App, Frame, egui};
use egui::{Color32, RichText};
use tokio::runtime::Runtime;
use weather_core::{Config, Notice, Presenter, SearchOutcome, Severity, WeatherClient};

const TITLE: &str = "Система Управления Погодой";
const WINDOW_SIZE: egui::Vec2 = egui::vec2(400.0, 380.0);
const OUTPUT_WRAP_WIDTH: f32 = 350.0;

const ACCENT: Color32 = Color32::from_rgb(0x30, 0x3F, 0x9F);
const DANGER: Color32 = Color32::from_rgb(0xD3, 0x2F, 0x2F);
const CAUTION: Color32 = Color32::from_rgb(0xF5, 0x7C, 0x00);

pub struct WeatherWindow {
    runtime: Runtime,
    presenter: Presenter<WeatherClient>,
    city: String,
}

impl WeatherWindow {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // Lookups run on the UI thread; the runtime only drives them to completion.
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;

        Ok(Self {
            runtime,
            presenter: Presenter::new(WeatherClient::from_config(config)),
            city: String::new(),
        })
    }

    /// Blocks until the lookup finishes.
    fn search(&mut self) -> SearchOutcome {
        self.runtime.block_on(self.presenter.search(&self.city))
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.presenter.notice() else {
            return;
        };

        let color = match notice.severity {
            Severity::Warning => CAUTION,
            Severity::Error => DANGER,
        };

        let mut dismissed = false;
        egui::Window::new(RichText::new(notice.title.as_str()).color(color).strong())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(notice.message.as_str());
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.presenter.dismiss_notice();
        }
    }
}

impl App for WeatherWindow {
    fn update(&mut self, ctx: &egui::Context, frame: &mut Frame) {
        let blocked = self.presenter.notice().is_some_and(Notice::is_modal);
        let mut submit = false;
        let mut exit = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(10.0);
                    ui.label(RichText::new("Введите город:").size(16.0));
                    ui.add_space(5.0);

                    let input =
                        ui.add(egui::TextEdit::singleline(&mut self.city).desired_width(300.0));
                    if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }

                    ui.add_space(10.0);
                    let search = egui::Button::new(
                        RichText::new("Узнать Погоду").color(Color32::WHITE).strong(),
                    )
                    .fill(ACCENT);
                    if ui.add(search).clicked() {
                        submit = true;
                    }

                    ui.add_space(15.0);
                    ui.scope(|ui| {
                        ui.set_max_width(OUTPUT_WRAP_WIDTH);
                        ui.add(
                            egui::Label::new(
                                RichText::new(self.presenter.output()).color(ACCENT).size(15.0),
                            )
                            .wrap(true),
                        );
                    });

                    ui.add_space(10.0);
                    let quit = egui::Button::new(
                        RichText::new("Выход из Программы").color(Color32::WHITE),
                    )
                    .fill(DANGER);
                    if ui.add(quit).clicked() {
                        exit = true;
                    }
                });
            });
        });

        self.show_notice(ctx);

        if submit {
            let outcome = self.search();
            tracing::debug!(?outcome, "search finished");
        }

        if exit {
            frame.close();
        }
    }
}

/// Open the window and block until it is closed.
pub fn run(window: WeatherWindow) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        initial_window_size: Some(WINDOW_SIZE),
        resizable: false,
        ..Default::default()
    };

    eframe::run_native(TITLE, options, Box::new(|_cc| Box::new(window)))
        .map_err(|err| anyhow::anyhow!("Failed to run window: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::presenter::{INITIAL_PROMPT, WAITING_PROMPT};

    #[test]
    fn new_window_shows_initial_prompt() {
        let window = WeatherWindow::new(&Config::default()).unwrap();

        assert!(window.city.is_empty());
        assert_eq!(window.presenter.output(), INITIAL_PROMPT);
    }

    #[test]
    fn blank_search_resets_output_without_lookup() {
        let mut window = WeatherWindow::new(&Config::default()).unwrap();
        window.city = "   ".into();

        assert_eq!(window.search(), SearchOutcome::Rejected);
        assert_eq!(window.presenter.output(), WAITING_PROMPT);
    }

    #[test]
    fn missing_key_reports_configuration_error() {
        let mut window = WeatherWindow::new(&Config::default()).unwrap();
        window.city = "Paris".into();

        assert_eq!(window.search(), SearchOutcome::Failed);
        assert_eq!(window.presenter.output(), INITIAL_PROMPT);

        let notice = window.presenter.notice().unwrap();
        assert!(notice.is_modal());
        assert_eq!(notice.title, "Ошибка");
    }
}
