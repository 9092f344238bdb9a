//! Public portfolio page: header, hero, projects, about, contact

use chrono::Datelike;
use eframe::egui;

use super::admin::platform_label;
use super::open_external;
use crate::core::content::{ContentDocument, Project, ProjectId};

/// Page sections reachable from the header navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Projects,
    About,
    Contact,
}

impl Anchor {
    pub const ALL: [Anchor; 3] = [Anchor::Projects, Anchor::About, Anchor::Contact];

    pub fn label(self) -> &'static str {
        match self {
            Anchor::Projects => "Projects",
            Anchor::About => "About",
            Anchor::Contact => "Contact",
        }
    }
}

/// What the visitor clicked on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteAction {
    OpenProject(ProjectId),
    OpenAdmin,
    Logout,
    ToggleTheme,
}

/// Placeholder inquiry form; nothing is ever sent
#[derive(Debug, Default)]
struct ContactForm {
    name: String,
    email: String,
    message: String,
    notice: Option<&'static str>,
}

impl ContactForm {
    const DEMO_NOTICE: &'static str = "데모 양식입니다. 메일 링크를 사용해주세요.";

    fn submit(&mut self) {
        let filled = [&self.name, &self.email, &self.message]
            .iter()
            .all(|field| !field.trim().is_empty());
        self.notice = Some(if filled {
            Self::DEMO_NOTICE
        } else {
            "Please fill in every field."
        });
    }

    fn show(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label("이름");
            ui.add(egui::TextEdit::singleline(&mut self.name).hint_text("Your name"));
            ui.label("이메일");
            ui.add(egui::TextEdit::singleline(&mut self.email).hint_text("you@example.com"));
            ui.label("메시지");
            ui.add(
                egui::TextEdit::multiline(&mut self.message)
                    .desired_rows(4)
                    .hint_text("프로젝트 문의 내용을 적어주세요."),
            );
            ui.horizontal(|ui| {
                if let Some(notice) = self.notice {
                    ui.weak(notice);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Send").clicked() {
                        self.submit();
                    }
                });
            });
        });
    }
}

#[derive(Debug, Default)]
pub struct SiteView {
    scroll_target: Option<Anchor>,
    contact_form: ContactForm,
}

impl SiteView {
    /// Sticky header with navigation and the admin entry point
    pub fn show_header(&mut self, ctx: &egui::Context, unlocked: bool) -> Option<SiteAction> {
        let mut action = None;
        egui::TopBottomPanel::top("site_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("PORTFOLIO");
                ui.add_space(24.0);
                for anchor in Anchor::ALL {
                    if ui.link(anchor.label()).clicked() {
                        self.scroll_target = Some(anchor);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if unlocked && ui.button("Logout").clicked() {
                        action = Some(SiteAction::Logout);
                    }
                    if ui.button("\u{2699} Admin").clicked() {
                        action = Some(SiteAction::OpenAdmin);
                    }
                    if ui
                        .button("\u{25D0}")
                        .on_hover_text("Toggle theme")
                        .clicked()
                    {
                        action = Some(SiteAction::ToggleTheme);
                    }
                });
            });
        });
        action
    }

    /// Scrollable page body rendered from `doc`
    pub fn show_body(
        &mut self,
        ui: &mut egui::Ui,
        doc: &ContentDocument,
        thumbnail_size: f32,
    ) -> Option<SiteAction> {
        let mut action = None;
        let site = &doc.site;

        egui::ScrollArea::vertical()
            .id_salt("site_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(48.0);
                ui.label(egui::RichText::new(&site.hero_title).size(40.0).strong());
                ui.add_space(8.0);
                ui.label(egui::RichText::new(&site.hero_subtitle).size(18.0).weak());
                ui.add_space(48.0);

                let heading = ui.heading("Projects");
                self.scroll_if_targeted(&heading, Anchor::Projects);
                ui.weak("Click a project to see the details.");
                ui.add_space(12.0);

                let card_width = (thumbnail_size * 2.0).max(240.0);
                ui.horizontal_wrapped(|ui| {
                    for project in &doc.projects {
                        if Self::show_card(ui, project, card_width) {
                            action = Some(SiteAction::OpenProject(project.id.clone()));
                        }
                    }
                });

                ui.add_space(48.0);
                ui.separator();
                let heading = ui.heading("About");
                self.scroll_if_targeted(&heading, Anchor::About);
                ui.add_space(8.0);
                ui.label(&site.about);

                ui.add_space(48.0);
                ui.separator();
                let heading = ui.heading("Contact");
                self.scroll_if_targeted(&heading, Anchor::Contact);
                ui.add_space(8.0);
                ui.label(&site.contact_note);
                if !site.contact_email.is_empty() && ui.link(&site.contact_email).clicked() {
                    open_external(&format!("mailto:{}", site.contact_email));
                }
                ui.horizontal(|ui| {
                    for (platform, url) in &site.socials {
                        if url.is_empty() {
                            continue;
                        }
                        if ui.link(platform_label(platform)).on_hover_text(url).clicked() {
                            open_external(url);
                        }
                    }
                });
                ui.add_space(12.0);
                self.contact_form.show(ui);

                ui.add_space(48.0);
                ui.separator();
                ui.vertical_centered(|ui| {
                    ui.small(format!(
                        "\u{00A9} {}. All rights reserved.",
                        chrono::Local::now().year()
                    ));
                });
                ui.add_space(24.0);
            });

        action
    }

    /// One project card; returns true when clicked
    fn show_card(ui: &mut egui::Ui, project: &Project, width: f32) -> bool {
        let mut clicked = false;
        ui.group(|ui| {
            ui.set_width(width);
            ui.vertical(|ui| {
                if !project.cover.is_empty() {
                    let cover = egui::Image::from_uri(project.cover.as_str())
                        .fit_to_exact_size(egui::vec2(width, width * 10.0 / 16.0))
                        .sense(egui::Sense::click());
                    clicked |= ui.add(cover).clicked();
                }
                ui.horizontal(|ui| {
                    clicked |= ui.link(&project.title).clicked();
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.weak(&project.year);
                    });
                });
                ui.label(egui::RichText::new(&project.brief).weak());
                ui.horizontal_wrapped(|ui| {
                    for tag in &project.tags {
                        ui.small(tag.to_uppercase());
                    }
                });
            });
        });
        clicked
    }

    fn scroll_if_targeted(&mut self, response: &egui::Response, anchor: Anchor) {
        if self.scroll_target == Some(anchor) {
            response.scroll_to_me(Some(egui::Align::TOP));
            self.scroll_target = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_form_requires_every_field() {
        let mut form = ContactForm {
            name: "Kim".to_string(),
            email: "  ".to_string(),
            message: "Hello".to_string(),
            ..Default::default()
        };
        form.submit();
        assert_eq!(form.notice, Some("Please fill in every field."));
    }

    #[test]
    fn test_contact_form_only_shows_demo_notice() {
        let mut form = ContactForm {
            name: "Kim".to_string(),
            email: "kim@example.com".to_string(),
            message: "Hello".to_string(),
            ..Default::default()
        };
        form.submit();
        assert_eq!(form.notice, Some(ContactForm::DEMO_NOTICE));
        assert_eq!(form.message, "Hello");
    }
}
