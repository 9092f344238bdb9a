//! UI components for Folio

pub mod admin;
pub mod lightbox;
pub mod login;
pub mod project_modal;
pub mod site_view;

/// Open a URL or `mailto:` link in the system handler
pub fn open_external(target: &str) {
    if target.trim().is_empty() {
        return;
    }
    if let Err(e) = open::that(target) {
        tracing::error!("Failed to open {}: {}", target, e);
    }
}
