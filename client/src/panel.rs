//! Admin panel drawn with egui on top of the game frame

use crate::admin::{AdminAction, EVENT_PALETTE};
use egui_macroquad::egui;

/// What the user did with the panel this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    SubmitCode(String),
    Admin(AdminAction),
    Close,
}

/// Text buffers of the panel. Visibility is owned by the app.
#[derive(Debug, Default)]
pub struct AdminPanel {
    code: String,
    broadcast: String,
}

impl AdminPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the immediate-mode panel and collects the resulting actions.
    /// A text buffer is emptied once its content has been handed out.
    pub fn draw(&mut self, authorized: bool) -> Vec<PanelAction> {
        let mut actions = Vec::new();

        egui_macroquad::ui(|egui_ctx| {
            egui::Window::new("Admin")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(egui_ctx, |ui| {
                    if authorized {
                        ui.label(egui::RichText::new("Unlocked").color(egui::Color32::GREEN));
                    } else {
                        ui.horizontal(|ui| {
                            ui.label("Code:");
                            ui.text_edit_singleline(&mut self.code);
                            if ui.button("Unlock").clicked() {
                                let code = std::mem::take(&mut self.code);
                                actions.push(PanelAction::SubmitCode(code));
                            }
                        });
                    }

                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label("Message:");
                        ui.text_edit_singleline(&mut self.broadcast);
                        if ui.button("Broadcast").clicked() {
                            actions.push(PanelAction::Admin(AdminAction::Broadcast(
                                std::mem::take(&mut self.broadcast),
                            )));
                        }
                    });

                    ui.separator();
                    ui.label("Events");
                    ui.horizontal_wrapped(|ui| {
                        for tag in EVENT_PALETTE {
                            if ui.button(tag).clicked() {
                                actions.push(PanelAction::Admin(AdminAction::SetEvent(
                                    tag.to_string(),
                                )));
                            }
                        }
                        if ui.button("clear").clicked() {
                            actions.push(PanelAction::Admin(AdminAction::ClearEvent));
                        }
                    });

                    ui.separator();
                    ui.horizontal(|ui| {
                        if ui.button("Pause / Resume").clicked() {
                            actions.push(PanelAction::Admin(AdminAction::PauseToggle));
                        }
                        if ui.button("Reset scores").clicked() {
                            actions.push(PanelAction::Admin(AdminAction::ResetScores));
                        }
                        if ui.button("Close").clicked() {
                            actions.push(PanelAction::Close);
                        }
                    });
                });
        });
        egui_macroquad::draw();

        actions
    }
}
