//! Admin login window

use eframe::egui;

use crate::core::gate::AccessGate;

#[derive(Debug, Default)]
pub struct LoginDialog {
    pub visible: bool,
    password: String,
    error: Option<String>,
}

impl LoginDialog {
    /// Show the dialog; returns true on the frame the gate unlocks
    pub fn show(&mut self, ctx: &egui::Context, gate: &mut AccessGate) -> bool {
        if !self.visible {
            return false;
        }

        let mut unlocked = false;
        let mut visible = self.visible;
        egui::Window::new("Admin Login")
            .open(&mut visible)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.weak("Temporary password: 0000");
                ui.add_space(6.0);

                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.password)
                        .password(true)
                        .hint_text("Password"),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                if let Some(ref error) = self.error {
                    ui.colored_label(ui.visuals().error_fg_color, error);
                }

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.visible = false;
                    }
                    if ui.button("Login").clicked() || submitted {
                        if gate.login(&self.password) {
                            unlocked = true;
                        } else {
                            self.error =
                                Some("Incorrect password. (hint: 0000)".to_string());
                        }
                    }
                });
            });

        if unlocked || !visible || !self.visible {
            self.visible = false;
            self.password.clear();
            self.error = None;
        }
        unlocked
    }
}
