//! Admin panel: edit site copy, projects and the raw JSON document
//!
//! The panel never mutates the document. It reads a snapshot and returns
//! the actions the user took this frame; the app applies them to the store.

use std::collections::HashMap;
use std::sync::Arc;

use eframe::egui;

use crate::core::content::{join_tags, parse_tags, ContentDocument, Project, ProjectId, SiteField};
use crate::core::edit::{Edit, ProjectPatch};

/// Social platforms always offered in the form, even when unset
const KNOWN_PLATFORMS: [&str; 3] = ["instagram", "behance", "github"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Site,
    Projects,
    Raw,
}

/// Something the user asked the admin panel to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    Edit(Edit),
    AddProject,
    ApplyRaw(String),
    Import,
    Export,
    Save,
}

#[derive(Debug, Clone)]
enum Notice {
    Info(String),
    Error(String),
}

#[derive(Default)]
pub struct AdminPanel {
    pub visible: bool,
    tab: AdminTab,
    /// Raw JSON editor contents
    raw: String,
    /// Document the raw buffer was last filled from
    raw_source: Option<Arc<ContentDocument>>,
    /// Pending image URL per (project, section)
    image_inputs: HashMap<(ProjectId, usize), String>,
    /// Tag text being typed, parsed once the field loses focus
    tag_inputs: HashMap<ProjectId, String>,
    new_platform: String,
    notice: Option<Notice>,
}

impl AdminPanel {
    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Info(message.into()));
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Error(message.into()));
    }

    /// Show the panel and collect this frame's actions
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        doc: &Arc<ContentDocument>,
        last_save_ok: bool,
        default_width: f32,
    ) -> Vec<AdminAction> {
        let mut actions = Vec::new();
        if !self.visible {
            return actions;
        }

        // Keep the raw view in step with the document, as every edit replaces it
        let stale = self
            .raw_source
            .as_ref()
            .map_or(true, |source| !Arc::ptr_eq(source, doc));
        if stale {
            match doc.to_json_pretty() {
                Ok(raw) => self.raw = raw,
                Err(e) => tracing::error!("Failed to render raw JSON: {}", e),
            }
            self.raw_source = Some(Arc::clone(doc));
        }

        let mut visible = self.visible;
        egui::Window::new("Admin")
            .open(&mut visible)
            .collapsible(false)
            .resizable(true)
            .default_width(default_width)
            .default_height(640.0)
            .show(ctx, |ui| {
                self.show_toolbar(ui, &mut actions);
                self.show_notice(ui, last_save_ok);
                ui.separator();

                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.tab, AdminTab::Site, "Site Settings");
                    ui.selectable_value(&mut self.tab, AdminTab::Projects, "Projects");
                    ui.selectable_value(&mut self.tab, AdminTab::Raw, "Raw JSON");
                });
                ui.separator();

                egui::ScrollArea::vertical()
                    .id_salt("admin_scroll")
                    .show(ui, |ui| match self.tab {
                        AdminTab::Site => self.show_site_tab(ui, doc, &mut actions),
                        AdminTab::Projects => self.show_projects_tab(ui, doc, &mut actions),
                        AdminTab::Raw => self.show_raw_tab(ui, &mut actions),
                    });
            });
        self.visible = visible;
        self.forget_removed(&actions);

        actions
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui, actions: &mut Vec<AdminAction>) {
        ui.horizontal(|ui| {
            ui.heading("Admin");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Save").clicked() {
                    actions.push(AdminAction::Save);
                }
                if ui.button("Import...").clicked() {
                    actions.push(AdminAction::Import);
                }
                if ui.button("Export...").clicked() {
                    actions.push(AdminAction::Export);
                }
            });
        });
    }

    fn show_notice(&mut self, ui: &mut egui::Ui, last_save_ok: bool) {
        if !last_save_ok {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                "Storage is unavailable: edits will not survive a restart.",
            );
        }

        let mut dismiss = false;
        if let Some(ref notice) = self.notice {
            ui.horizontal(|ui| {
                match notice {
                    Notice::Info(message) => {
                        ui.label(message);
                    }
                    Notice::Error(message) => {
                        ui.colored_label(ui.visuals().error_fg_color, message);
                    }
                }
                if ui.small_button("\u{2715}").clicked() {
                    dismiss = true;
                }
            });
        }
        if dismiss {
            self.notice = None;
        }
    }

    fn show_site_tab(
        &mut self,
        ui: &mut egui::Ui,
        doc: &ContentDocument,
        actions: &mut Vec<AdminAction>,
    ) {
        let site = &doc.site;

        for field in SiteField::ALL {
            ui.label(field.label());
            let multiline = field == SiteField::About;
            if let Some(value) = edit_text(ui, site.field(field), multiline) {
                actions.push(AdminAction::Edit(Edit::SetSiteField(field, value)));
            }
            ui.add_space(4.0);
        }

        ui.separator();
        ui.strong("Socials");

        let mut platforms: Vec<&str> = KNOWN_PLATFORMS.to_vec();
        platforms.extend(
            site.socials
                .keys()
                .map(String::as_str)
                .filter(|k| !KNOWN_PLATFORMS.contains(k)),
        );
        for platform in platforms {
            ui.label(platform_label(platform));
            let current = site.socials.get(platform).map(String::as_str).unwrap_or("");
            if let Some(url) = edit_text(ui, current, false) {
                actions.push(AdminAction::Edit(Edit::SetSocialLink {
                    platform: platform.to_string(),
                    url,
                }));
            }
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.new_platform).hint_text("New platform"),
            );
            let platform = self.new_platform.trim().to_lowercase();
            if ui.button("Add").clicked() && !platform.is_empty() {
                actions.push(AdminAction::Edit(Edit::SetSocialLink {
                    platform,
                    url: String::new(),
                }));
                self.new_platform.clear();
            }
        });
    }

    fn show_projects_tab(
        &mut self,
        ui: &mut egui::Ui,
        doc: &ContentDocument,
        actions: &mut Vec<AdminAction>,
    ) {
        ui.horizontal(|ui| {
            ui.strong(format!("{} projects", doc.projects.len()));
            if ui.button("+ Add Project").clicked() {
                actions.push(AdminAction::AddProject);
            }
        });
        ui.add_space(6.0);

        for project in &doc.projects {
            ui.push_id(project.id.as_str(), |ui| {
                ui.group(|ui| self.show_project(ui, project, actions));
            });
            ui.add_space(8.0);
        }
    }

    fn show_project(&mut self, ui: &mut egui::Ui, project: &Project, actions: &mut Vec<AdminAction>) {
        let id = &project.id;
        let update = |patch| AdminAction::Edit(Edit::UpdateProject(id.clone(), patch));

        ui.horizontal(|ui| {
            ui.strong(&project.title);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Delete").clicked() {
                    actions.push(AdminAction::Edit(Edit::RemoveProject(id.clone())));
                }
            });
        });

        egui::Grid::new("project_fields")
            .num_columns(2)
            .striped(false)
            .show(ui, |ui| {
                ui.label("Title");
                if let Some(v) = edit_text(ui, &project.title, false) {
                    actions.push(update(ProjectPatch::title(v)));
                }
                ui.end_row();

                ui.label("Client");
                if let Some(v) = edit_text(ui, &project.client, false) {
                    actions.push(update(ProjectPatch::client(v)));
                }
                ui.end_row();

                ui.label("Year");
                if let Some(v) = edit_text(ui, &project.year, false) {
                    actions.push(update(ProjectPatch::year(v)));
                }
                ui.end_row();

                ui.label("Tags (comma)");
                let text = self
                    .tag_inputs
                    .entry(id.clone())
                    .or_insert_with(|| join_tags(&project.tags));
                let response =
                    ui.add(egui::TextEdit::singleline(text).desired_width(f32::INFINITY));
                if response.lost_focus() {
                    if let Some(tags) = self.commit_tags(id, &project.tags) {
                        actions.push(update(ProjectPatch::tags(tags)));
                    }
                } else if !response.has_focus() {
                    // Re-read from the document next frame
                    self.tag_inputs.remove(id);
                }
                ui.end_row();

                ui.label("Cover URL");
                if let Some(v) = edit_text(ui, &project.cover, false) {
                    actions.push(update(ProjectPatch::cover(v)));
                }
                ui.end_row();

                ui.label("Brief");
                if let Some(v) = edit_text(ui, &project.brief, true) {
                    actions.push(update(ProjectPatch::brief(v)));
                }
                ui.end_row();
            });

        ui.add_space(6.0);
        ui.strong("Sections");

        for (index, section) in project.sections.iter().enumerate() {
            ui.push_id(index, |ui| {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        if let Some(name) = edit_text(ui, &section.name, false) {
                            actions.push(AdminAction::Edit(Edit::RenameSection(
                                id.clone(),
                                index,
                                name,
                            )));
                        }
                        if ui.button("Remove section").clicked() {
                            actions.push(AdminAction::Edit(Edit::RemoveSection(id.clone(), index)));
                        }
                    });

                    ui.horizontal(|ui| {
                        let input = self.image_inputs.entry((id.clone(), index)).or_default();
                        ui.add(egui::TextEdit::singleline(input).hint_text("https://..."));
                        if ui.button("Add image").clicked() {
                            let url = input.trim().to_string();
                            if !url.is_empty() {
                                actions.push(AdminAction::Edit(Edit::AddImage(
                                    id.clone(),
                                    index,
                                    url,
                                )));
                                input.clear();
                            }
                        }
                    });

                    ui.horizontal_wrapped(|ui| {
                        for (image, src) in section.images.iter().enumerate() {
                            ui.vertical(|ui| {
                                ui.add(
                                    egui::Image::from_uri(src.as_str())
                                        .fit_to_exact_size(egui::vec2(72.0, 72.0)),
                                );
                                if ui.small_button("Remove").clicked() {
                                    actions.push(AdminAction::Edit(Edit::RemoveImage(
                                        id.clone(),
                                        index,
                                        image,
                                    )));
                                }
                            });
                        }
                    });
                });
            });
        }

        if ui.button("+ Add Section").clicked() {
            actions.push(AdminAction::Edit(Edit::AddSection(id.clone())));
        }
    }

    fn show_raw_tab(&mut self, ui: &mut egui::Ui, actions: &mut Vec<AdminAction>) {
        ui.add(
            egui::TextEdit::multiline(&mut self.raw)
                .code_editor()
                .desired_rows(16)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(6.0);
        if ui.button("Apply JSON").clicked() {
            actions.push(AdminAction::ApplyRaw(self.raw.clone()));
        }
    }
}

impl AdminPanel {
    /// Drop the typed tag text for `id`; returns the parsed tags if they differ
    fn commit_tags(&mut self, id: &ProjectId, current: &[String]) -> Option<Vec<String>> {
        let tags = parse_tags(&self.tag_inputs.remove(id)?);
        (tags != current).then_some(tags)
    }

    /// Keep pending inputs attached to the sections they were typed into
    fn forget_removed(&mut self, actions: &[AdminAction]) {
        for action in actions {
            match action {
                AdminAction::Edit(Edit::RemoveProject(id)) => {
                    self.image_inputs.retain(|(project, _), _| project != id);
                    self.tag_inputs.remove(id);
                }
                AdminAction::Edit(Edit::RemoveSection(id, removed)) => {
                    self.image_inputs = std::mem::take(&mut self.image_inputs)
                        .into_iter()
                        .filter_map(|((project, index), text)| {
                            if &project != id || index < *removed {
                                Some(((project, index), text))
                            } else if index > *removed {
                                Some(((project, index - 1), text))
                            } else {
                                None
                            }
                        })
                        .collect();
                }
                _ => {}
            }
        }
    }
}

/// A text field over `current`; returns the new value when the user changed it
fn edit_text(ui: &mut egui::Ui, current: &str, multiline: bool) -> Option<String> {
    let mut value = current.to_string();
    let edit = if multiline {
        egui::TextEdit::multiline(&mut value).desired_rows(4)
    } else {
        egui::TextEdit::singleline(&mut value)
    };
    let changed = ui.add(edit.desired_width(f32::INFINITY)).changed();
    changed.then_some(value)
}

/// "github" -> "Github"
pub fn platform_label(platform: &str) -> String {
    let mut chars = platform.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending<'a>(panel: &'a AdminPanel, id: &str, index: usize) -> Option<&'a str> {
        panel
            .image_inputs
            .get(&(ProjectId::from(id), index))
            .map(String::as_str)
    }

    #[test]
    fn test_removed_section_shifts_pending_image_urls() {
        let mut panel = AdminPanel::default();
        for (index, url) in ["a", "b", "c"].into_iter().enumerate() {
            panel
                .image_inputs
                .insert((ProjectId::from("p"), index), url.to_string());
        }
        panel
            .image_inputs
            .insert((ProjectId::from("q"), 2), "other".to_string());

        panel.forget_removed(&[AdminAction::Edit(Edit::RemoveSection(ProjectId::from("p"), 1))]);

        assert_eq!(pending(&panel, "p", 0), Some("a"));
        assert_eq!(pending(&panel, "p", 1), Some("c"));
        assert_eq!(pending(&panel, "p", 2), None);
        assert_eq!(pending(&panel, "q", 2), Some("other"));
    }

    #[test]
    fn test_removed_project_drops_pending_inputs() {
        let mut panel = AdminPanel::default();
        let id = ProjectId::from("p");
        panel.image_inputs.insert((id.clone(), 0), "a".to_string());
        panel.tag_inputs.insert(id.clone(), "x,".to_string());

        panel.forget_removed(&[AdminAction::Edit(Edit::RemoveProject(id.clone()))]);

        assert!(panel.image_inputs.is_empty());
        assert!(panel.tag_inputs.is_empty());
    }

    #[test]
    fn test_tags_are_parsed_only_on_commit() {
        let mut panel = AdminPanel::default();
        let id = ProjectId::from("p");
        let current = vec!["Retail".to_string()];

        // Typing "Retail," keeps the comma in the buffer until commit
        panel.tag_inputs.insert(id.clone(), "Retail,".to_string());
        assert_eq!(panel.tag_inputs[&id], "Retail,");
        assert_eq!(panel.commit_tags(&id, &current), None);
        assert!(!panel.tag_inputs.contains_key(&id));

        panel.tag_inputs.insert(id.clone(), "Retail, Display ,".to_string());
        assert_eq!(
            panel.commit_tags(&id, &current),
            Some(vec!["Retail".to_string(), "Display".to_string()])
        );
        assert_eq!(panel.commit_tags(&id, &current), None);
    }

    #[test]
    fn test_platform_label() {
        assert_eq!(platform_label("github"), "Github");
        assert_eq!(platform_label(""), "");
    }
}
