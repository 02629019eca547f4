//! User interface components for the dilation sandbox.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main SandboxApp
//! - `canvas` - Pointer handling on the drawing surface
//! - `rendering` - Drawing the grid, shapes and overlays

mod canvas;
mod rendering;
mod state;


pub use rendering::{draw_scene, PainterSurface, Scene, Surface};
pub use state::{CanvasState, InputFields, SandboxApp};

use crate::constants::APP_STATE_KEY;
use crate::session::SessionError;
use eframe::egui;

impl eframe::App for SandboxApp {
    /// Persist input fields and preferences between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => storage.set_string(APP_STATE_KEY, json),
            Err(err) => log::warn!("Failed to serialize app state: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        self.handle_undo_key(ctx);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, frame);
        });

        egui::SidePanel::right("controls_panel")
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                self.draw_controls_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });

        self.draw_alert_window(ctx);
    }
}

impl SandboxApp {
    /// Cmd/Ctrl+Z undoes unless a text field has keyboard focus or an alert is open.
    fn handle_undo_key(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() || self.alert.is_some() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Z) && i.modifiers.command && !i.modifiers.shift)
        {
            self.perform_undo();
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui, frame: &mut eframe::Frame) {
        ui.horizontal(|ui| {
            let can_undo = self.session.history().can_undo();
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                self.perform_undo();
            }
            if ui.button("Clear All").clicked() {
                self.perform_clear();
            }

            ui.separator();

            if ui.button("Save Shape").clicked() {
                match frame.storage_mut() {
                    Some(storage) => self.perform_save(storage),
                    None => self.alert("Storage is unavailable."),
                }
            }
            if ui.button("Load Shape").clicked() {
                match frame.storage() {
                    Some(storage) => self.perform_load(storage),
                    None => self.alert("Storage is unavailable."),
                }
            }

            ui.separator();
            ui.checkbox(&mut self.dark_mode, "Dark Mode");
        });
    }

    fn draw_controls_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Dilation");
        egui::Grid::new("scale_grid").num_columns(2).show(ui, |ui| {
            ui.label("X scale:");
            ui.add(egui::TextEdit::singleline(&mut self.inputs.x_scale).hint_text("1"));
            ui.end_row();
            ui.label("Y scale:");
            ui.add(egui::TextEdit::singleline(&mut self.inputs.y_scale).hint_text("1"));
            ui.end_row();
        });
        if ui.button("Dilate").clicked() {
            self.perform_dilate();
        }

        ui.separator();
        ui.heading("Center of Dilation");
        egui::Grid::new("center_grid").num_columns(2).show(ui, |ui| {
            ui.label("X:");
            ui.text_edit_singleline(&mut self.inputs.center_x);
            ui.end_row();
            ui.label("Y:");
            ui.text_edit_singleline(&mut self.inputs.center_y);
            ui.end_row();
        });
        ui.horizontal(|ui| {
            if ui.button("Reset Center").clicked() {
                self.perform_reset_center();
            }
            let label = self.session.center_mode_label();
            if ui
                .selectable_label(self.session.is_setting_center(), label)
                .clicked()
            {
                self.session.toggle_center_mode();
            }
        });

        ui.separator();
        ui.label(format!(
            "Coordinates: {}",
            self.session.shape().formatted_coordinates()
        ));

        ui.separator();
        if ui.button(self.session.log().toggle_label()).clicked() {
            self.session.log_mut().toggle_visible();
        }
        if self.session.log().is_visible() {
            egui::ScrollArea::vertical()
                .max_height(240.0)
                .show(ui, |ui| {
                    ui.label(format!(
                        "Transformation History: {}",
                        self.session.log().render()
                    ));
                });
        }
    }

    /// Shows the pending alert as a modal; everything underneath is blocked until it is
    /// acknowledged.
    fn draw_alert_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };
        let modal = egui::Modal::new(egui::Id::new("alert_modal")).show(ctx, |ui| {
            ui.heading("Notice");
            ui.label(message);
            ui.button("OK").clicked()
        });
        if modal.inner || modal.should_close() {
            self.alert = None;
        }
    }

    /// Routes a failed operation to the alert window, unless it is meant to pass silently.
    fn report(&mut self, error: SessionError) {
        if error.is_silent() {
            log::debug!("Skipped: {error}");
            return;
        }
        log::warn!("{error}");
        self.alert(error.to_string());
    }

    /// Dilates the shape with the current field contents.
    pub fn perform_dilate(&mut self) {
        if let Err(err) = self.session.dilate(&self.inputs.dilation_request()) {
            self.report(err);
        }
    }

    /// Restores the previous snapshot.
    pub fn perform_undo(&mut self) {
        if let Err(err) = self.session.undo() {
            self.report(err);
        }
    }

    /// Empties shape, history and log.
    pub fn perform_clear(&mut self) {
        self.session.clear();
        self.canvas.hover = None;
    }

    /// Puts the center of dilation back at the origin.
    pub fn perform_reset_center(&mut self) {
        let center = self.session.reset_center();
        self.inputs.set_center(center);
    }

    /// Saves the current shape and confirms it.
    pub fn perform_save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.session.save_shape(storage) {
            Ok(()) => self.alert("Shape saved!"),
            Err(err) => self.report(err),
        }
    }

    /// Loads the saved shape and confirms it.
    pub fn perform_load(&mut self, storage: &dyn eframe::Storage) {
        match self.session.load_shape(storage) {
            Ok(()) => self.alert("Shape loaded!"),
            Err(err) => self.report(err),
        }
    }
}
