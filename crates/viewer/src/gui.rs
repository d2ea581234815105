//! Desktop window for the viewer.
//!
//! The window holds an [`App`] and nothing else. Widgets turn user input into
//! [`Message`]s, which are applied after the frame is laid out.

use eframe::egui::{self, Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::{
    App, FunctionChoice, Message, Method, MethodOptions,
    chart::{Chart, Role},
};

const TITLE: &str = "Optimizer Viewer";

/// Opens the viewer window and blocks until it is closed.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn run(app: App) -> Result<(), eframe::Error> {
    eframe::run_native(
        TITLE,
        eframe::NativeOptions::default(),
        Box::new(|_cc| Ok(Box::new(Viewer { app }))),
    )
}

struct Viewer {
    app: App,
}

impl eframe::App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let app = &self.app;
        let mut messages = Vec::new();

        egui::SidePanel::left("controls")
            .resizable(false)
            .show(ctx, |ui| controls(ui, app, &mut messages));

        if app.controls().navigation {
            egui::TopBottomPanel::bottom("navigation")
                .show(ctx, |ui| navigation(ui, app, &mut messages));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(TITLE);
            if let Some(chart) = app.chart() {
                draw(ui, &chart);
            }
        });

        for message in messages {
            self.app = std::mem::take(&mut self.app).update(message);
        }
    }
}

fn controls(ui: &mut Ui, app: &App, messages: &mut Vec<Message>) {
    let shown = app.controls();

    egui::ComboBox::from_label("Function")
        .selected_text(app.function().map_or("", FunctionChoice::name))
        .show_ui(ui, |ui| {
            for choice in FunctionChoice::ALL {
                let selected = app.function() == Some(choice);
                if ui.selectable_label(selected, choice.name()).clicked() {
                    messages.push(Message::SelectFunction(choice));
                }
            }
        });

    egui::ComboBox::from_label("Method")
        .selected_text(app.method().map_or("", Method::name))
        .show_ui(ui, |ui| {
            for method in Method::ALL {
                let selected = app.method() == Some(method);
                if ui.selectable_label(selected, method.name()).clicked() {
                    messages.push(Message::SelectMethod(method));
                }
            }
        });

    if shown.custom_expression {
        ui.horizontal(|ui| {
            let mut custom = app.custom().to_owned();
            let edit = egui::TextEdit::singleline(&mut custom).hint_text("Custom function");
            if ui.add(edit).changed() {
                messages.push(Message::EditCustom(custom));
            }
            if ui.button("Validate").clicked() {
                messages.push(Message::Validate);
            }
        });
    }

    if shown.run_inputs {
        number(ui, "Lower limit", app.lower(), Message::SetLower, messages);
        number(ui, "Upper limit", app.upper(), Message::SetUpper, messages);

        ui.add_enabled_ui(!app.random_start(), |ui| {
            number(ui, "Init point", app.initial_point(), Message::SetInitialPoint, messages);
        });

        ui.horizontal(|ui| {
            let mut random = app.random_start();
            if ui.checkbox(&mut random, "Random init point").changed() {
                messages.push(Message::UseRandomStart(random));
            }
            let mut seed = app.seed();
            let field = egui::DragValue::new(&mut seed).prefix("Seed: ");
            if ui.add_enabled(random, field).changed() {
                messages.push(Message::SetSeed(seed));
            }
        });

        if ui.button("Optimize").clicked() {
            messages.push(Message::Optimize);
        }
    }

    if let Some(method) = app.method() {
        options(ui, &MethodOptions::defaults(method));
    }

    ui.separator();
    ui.label(format!("Hint: {}", app.hint()));
}

fn number(
    ui: &mut Ui,
    label: &str,
    value: f64,
    message: fn(f64) -> Message,
    messages: &mut Vec<Message>,
) {
    ui.horizontal(|ui| {
        ui.label(label);
        let mut value = value;
        if ui.add(egui::DragValue::new(&mut value).speed(0.1)).changed() {
            messages.push(message(value));
        }
    });
}

fn options(ui: &mut Ui, options: &MethodOptions) {
    if options.entries().is_empty() {
        return;
    }
    ui.separator();
    egui::Grid::new("method-options").striped(true).show(ui, |ui| {
        for entry in options.entries() {
            ui.label(entry.name);
            ui.label(entry.value.map_or_else(|| "-".to_owned(), |v| v.to_string()));
            ui.end_row();
        }
    });
}

fn navigation(ui: &mut Ui, app: &App, messages: &mut Vec<Message>) {
    ui.horizontal(|ui| {
        if ui.button("< Backward").clicked() {
            messages.push(Message::Backward);
        }
        if let Some(counter) = app.counter() {
            ui.label(counter.to_string());
        }
        if ui.button("Advance >").clicked() {
            messages.push(Message::Advance);
        }
    });
}

fn draw(ui: &mut Ui, chart: &Chart<'_>) {
    ui.label(chart.title.as_str());
    Plot::new("optview-chart").show(ui, |plot_ui| {
        for segment in chart.curve.segments() {
            let points: PlotPoints = segment.iter().map(|r| [r.x, r.y]).collect();
            plot_ui.line(Line::new(points).color(Color32::GRAY));
        }
        for role in [Role::Visited, Role::Current] {
            let points: PlotPoints = chart
                .markers
                .iter()
                .filter(|marker| marker.role == role)
                .map(|marker| [marker.record.x, marker.record.y])
                .collect();
            plot_ui.points(Points::new(points).color(color(role)).radius(4.0));
        }
    });
}

fn color(role: Role) -> Color32 {
    match role {
        Role::Visited => Color32::BLUE,
        Role::Current => Color32::RED,
    }
}
