//! Project detail window: brief, tags and per-section image grids

use eframe::egui;

use super::lightbox::Lightbox;
use crate::core::content::{ContentDocument, ProjectId};

/// Project detail window state
#[derive(Debug, Default)]
pub struct ProjectModal {
    /// Project being shown
    project: Option<ProjectId>,
    /// Selected section tab, by position
    active_section: usize,
    lightbox: Lightbox,
}

impl ProjectModal {
    pub fn open(&mut self, id: ProjectId) {
        self.project = Some(id);
        self.active_section = 0;
        self.lightbox.close();
    }

    pub fn close(&mut self) {
        self.project = None;
        self.lightbox.close();
    }

    /// Show the window for the open project, if it still exists in `doc`
    pub fn show(&mut self, ctx: &egui::Context, doc: &ContentDocument, thumbnail_size: f32) {
        let Some(id) = self.project.clone() else {
            return;
        };
        let Some(project) = doc.project(&id) else {
            tracing::debug!("Project {} no longer exists, closing detail window", id);
            self.close();
            return;
        };
        if self.active_section >= project.sections.len() {
            self.active_section = 0;
        }

        let mut open = true;
        egui::Window::new(project.title.as_str())
            .id(egui::Id::new(("project_modal", id.as_str())))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_size([960.0, 620.0])
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(format!("{} · {}", project.client, project.year)).weak(),
                );
                ui.separator();

                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.set_width(260.0);
                        ui.label(&project.brief);
                        ui.add_space(8.0);
                        ui.horizontal_wrapped(|ui| {
                            for tag in &project.tags {
                                ui.small(tag.to_uppercase());
                            }
                        });
                    });

                    ui.separator();

                    ui.vertical(|ui| {
                        ui.horizontal_wrapped(|ui| {
                            for (index, section) in project.sections.iter().enumerate() {
                                if ui
                                    .selectable_value(&mut self.active_section, index, &section.name)
                                    .clicked()
                                {
                                    self.lightbox.close();
                                }
                            }
                        });
                        ui.add_space(8.0);

                        let Some(section) = project.sections.get(self.active_section) else {
                            ui.weak("This project has no sections.");
                            return;
                        };
                        if section.images.is_empty() {
                            ui.weak("No images.");
                            return;
                        }

                        egui::ScrollArea::vertical()
                            .id_salt("project_modal_images")
                            .show(ui, |ui| {
                                ui.horizontal_wrapped(|ui| {
                                    for (index, src) in section.images.iter().enumerate() {
                                        let thumb = egui::Image::from_uri(src.as_str())
                                            .fit_to_exact_size(egui::vec2(
                                                thumbnail_size,
                                                thumbnail_size * 0.75,
                                            ))
                                            .sense(egui::Sense::click());
                                        if ui.add(thumb).clicked() {
                                            self.lightbox.open(index);
                                        }
                                    }
                                });
                            });
                    });
                });
            });

        if !open {
            self.close();
            return;
        }

        if let Some(section) = project.sections.get(self.active_section) {
            self.lightbox.show(ctx, &section.images);
        }
    }
}
