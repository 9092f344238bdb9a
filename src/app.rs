//! Main application state and UI coordination

use eframe::egui;

use crate::core::config::AppConfig;
use crate::core::gate::AccessGate;
use crate::core::storage::{FileStore, Persistence, EXPORT_FILE_NAME};
use crate::core::store::ContentStore;
use crate::ui::admin::{AdminAction, AdminPanel};
use crate::ui::login::LoginDialog;
use crate::ui::project_modal::ProjectModal;
use crate::ui::site_view::{SiteAction, SiteView};

/// Main application state
pub struct FolioApp {
    /// The content document and its write-through storage
    pub store: ContentStore<FileStore>,
    /// Application configuration
    pub config: AppConfig,
    /// Admin lock
    pub gate: AccessGate,
    site_view: SiteView,
    project_modal: ProjectModal,
    login: LoginDialog,
    admin: AdminPanel,
}

impl FolioApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        });
        Self::apply_theme(&cc.egui_ctx, &config);

        let storage_dir = config.storage_dir();
        tracing::info!("Content storage: {}", storage_dir.display());
        let store = ContentStore::open(Persistence::new(FileStore::new(storage_dir)));

        Self {
            store,
            config,
            gate: AccessGate::new(),
            site_view: SiteView::default(),
            project_modal: ProjectModal::default(),
            login: LoginDialog::default(),
            admin: AdminPanel::default(),
        }
    }

    fn apply_theme(ctx: &egui::Context, config: &AppConfig) {
        if config.ui.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }
    }

    fn handle_site_action(&mut self, ctx: &egui::Context, action: SiteAction) {
        match action {
            SiteAction::OpenProject(id) => self.project_modal.open(id),
            SiteAction::OpenAdmin => {
                if self.gate.is_unlocked() {
                    self.admin.visible = true;
                } else {
                    self.login.visible = true;
                }
            }
            SiteAction::Logout => {
                self.gate.logout();
                self.admin.visible = false;
            }
            SiteAction::ToggleTheme => {
                self.config.ui.dark_mode = !self.config.ui.dark_mode;
                Self::apply_theme(ctx, &self.config);
                if let Err(e) = self.config.save() {
                    tracing::error!("Failed to save config: {}", e);
                }
            }
        }
    }

    fn handle_admin_action(&mut self, action: AdminAction) {
        match action {
            AdminAction::Edit(edit) => self.store.dispatch(&edit),
            AdminAction::AddProject => {
                let id = self.store.add_project();
                tracing::info!(
                    "Added project {} ({} total)",
                    id,
                    self.store.document().projects.len()
                );
            }
            AdminAction::ApplyRaw(raw) => match self.store.apply_raw_json(&raw) {
                Ok(()) => self.admin.notify_info("JSON applied."),
                Err(e) => {
                    tracing::warn!("Raw JSON rejected: {}", e);
                    self.admin
                        .notify_error(format!("JSON parse error, check the format: {}", e));
                }
            },
            AdminAction::Import => {
                let Some(path) = rfd::FileDialog::new()
                    .add_filter("JSON", &["json"])
                    .pick_file()
                else {
                    return;
                };
                match self.store.import_file(&path) {
                    Ok(()) => self
                        .admin
                        .notify_info(format!("Imported {}", path.display())),
                    Err(e) => {
                        tracing::error!("Import failed: {:#}", e);
                        self.admin.notify_error(format!("Import failed: {:#}", e));
                    }
                }
            }
            AdminAction::Export => {
                let Some(path) = rfd::FileDialog::new()
                    .add_filter("JSON", &["json"])
                    .set_file_name(EXPORT_FILE_NAME)
                    .save_file()
                else {
                    return;
                };
                match self.store.export_file(&path) {
                    Ok(()) => {
                        self.admin
                            .notify_info(format!("Exported to {}", path.display()));
                        self.config.add_recent_export(path);
                        if let Err(e) = self.config.save() {
                            tracing::error!("Failed to save config: {}", e);
                        }
                    }
                    Err(e) => {
                        tracing::error!("Export failed: {:#}", e);
                        self.admin.notify_error(format!("Export failed: {:#}", e));
                    }
                }
            }
            AdminAction::Save => {
                if self.store.save() {
                    self.admin.visible = false;
                } else {
                    self.admin
                        .notify_error("Could not write to storage; changes will not survive a restart.");
                }
            }
        }
    }
}

impl eframe::App for FolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let save_shortcut = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if save_shortcut && self.gate.is_unlocked() {
            self.store.save();
        }

        // Every view in this frame reads the same document
        let doc = self.store.snapshot();
        let thumbnail_size = self.config.ui.thumbnail_size;

        let mut site_actions = Vec::new();
        site_actions.extend(self.site_view.show_header(ctx, self.gate.is_unlocked()));
        egui::CentralPanel::default().show(ctx, |ui| {
            site_actions.extend(self.site_view.show_body(ui, &doc, thumbnail_size));
        });
        for action in site_actions {
            self.handle_site_action(ctx, action);
        }

        self.project_modal.show(ctx, &doc, thumbnail_size);

        if self.login.show(ctx, &mut self.gate) {
            self.admin.visible = true;
        }

        if self.gate.is_unlocked() {
            let actions =
                self.admin
                    .show(ctx, &doc, self.store.last_save_ok(), self.config.ui.admin_width);
            for action in actions {
                self.handle_admin_action(action);
            }
        }
    }
}
