//! Copy-on-write edit operations on a content document
//!
//! Every function here takes the current document by reference and returns a
//! new one; the input is never touched. Unknown project ids and out-of-range
//! section or image indices leave the document as it was.

use super::content::{ContentDocument, Project, ProjectId, Section, SiteField};
use super::error::ContentError;

/// Fields of a project that can be replaced in one update.
///
/// `None` leaves the current value in place. The id is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub client: Option<String>,
    pub year: Option<String>,
    pub tags: Option<Vec<String>>,
    pub cover: Option<String>,
    pub brief: Option<String>,
    pub sections: Option<Vec<Section>>,
}

impl ProjectPatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn client(value: impl Into<String>) -> Self {
        Self {
            client: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn year(value: impl Into<String>) -> Self {
        Self {
            year: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn tags(value: Vec<String>) -> Self {
        Self {
            tags: Some(value),
            ..Default::default()
        }
    }

    pub fn cover(value: impl Into<String>) -> Self {
        Self {
            cover: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn brief(value: impl Into<String>) -> Self {
        Self {
            brief: Some(value.into()),
            ..Default::default()
        }
    }

    fn merge_into(self, project: &mut Project) {
        if let Some(title) = self.title {
            project.title = title;
        }
        if let Some(client) = self.client {
            project.client = client;
        }
        if let Some(year) = self.year {
            project.year = year;
        }
        if let Some(tags) = self.tags {
            project.tags = tags;
        }
        if let Some(cover) = self.cover {
            project.cover = cover;
        }
        if let Some(brief) = self.brief {
            project.brief = brief;
        }
        if let Some(sections) = self.sections {
            project.sections = sections;
        }
    }
}

/// An edit intent dispatched by the admin panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    SetSiteField(SiteField, String),
    SetSocialLink { platform: String, url: String },
    RemoveProject(ProjectId),
    UpdateProject(ProjectId, ProjectPatch),
    AddSection(ProjectId),
    RemoveSection(ProjectId, usize),
    RenameSection(ProjectId, usize, String),
    AddImage(ProjectId, usize, String),
    RemoveImage(ProjectId, usize, usize),
}

/// Apply one edit intent, returning the resulting document
pub fn apply(doc: &ContentDocument, edit: &Edit) -> ContentDocument {
    match edit {
        Edit::SetSiteField(field, value) => set_site_field(doc, *field, value),
        Edit::SetSocialLink { platform, url } => set_social_link(doc, platform, url),
        Edit::RemoveProject(id) => remove_project(doc, id),
        Edit::UpdateProject(id, patch) => update_project(doc, id, patch.clone()),
        Edit::AddSection(id) => add_section(doc, id),
        Edit::RemoveSection(id, index) => remove_section(doc, id, *index),
        Edit::RenameSection(id, index, name) => rename_section(doc, id, *index, name),
        Edit::AddImage(id, section, url) => add_image(doc, id, *section, url),
        Edit::RemoveImage(id, section, image) => remove_image(doc, id, *section, *image),
    }
}

pub fn set_site_field(doc: &ContentDocument, field: SiteField, value: &str) -> ContentDocument {
    let mut next = doc.clone();
    *next.site.field_mut(field) = value.to_string();
    next
}

/// Insert or overwrite one social link
pub fn set_social_link(doc: &ContentDocument, platform: &str, url: &str) -> ContentDocument {
    let mut next = doc.clone();
    next.site
        .socials
        .insert(platform.to_string(), url.to_string());
    next
}

/// Prepend a placeholder project with a freshly generated id
pub fn add_project(doc: &ContentDocument) -> (ContentDocument, ProjectId) {
    let id = fresh_id(doc);
    let mut next = doc.clone();
    next.projects.insert(0, Project::placeholder(id.clone()));
    (next, id)
}

/// Generate an id not used by any project in `doc`
fn fresh_id(doc: &ContentDocument) -> ProjectId {
    loop {
        let id = ProjectId::generate();
        if !doc.contains_project(&id) {
            return id;
        }
    }
}

pub fn remove_project(doc: &ContentDocument, id: &ProjectId) -> ContentDocument {
    let mut next = doc.clone();
    next.projects.retain(|p| &p.id != id);
    next
}

/// Shallow-merge `patch` into the matching project
pub fn update_project(doc: &ContentDocument, id: &ProjectId, patch: ProjectPatch) -> ContentDocument {
    with_project(doc, id, |project| patch.merge_into(project))
}

/// Append an empty section named after its position ("섹션 N")
pub fn add_section(doc: &ContentDocument, id: &ProjectId) -> ContentDocument {
    with_project(doc, id, |project| {
        let name = format!("섹션 {}", project.sections.len() + 1);
        project.sections.push(Section::new(name));
    })
}

pub fn remove_section(doc: &ContentDocument, id: &ProjectId, index: usize) -> ContentDocument {
    with_project(doc, id, |project| {
        if index < project.sections.len() {
            project.sections.remove(index);
        }
    })
}

pub fn rename_section(
    doc: &ContentDocument,
    id: &ProjectId,
    index: usize,
    name: &str,
) -> ContentDocument {
    with_section(doc, id, index, |section| section.name = name.to_string())
}

/// Append an image URL to a section; blank URLs are ignored
pub fn add_image(doc: &ContentDocument, id: &ProjectId, section: usize, url: &str) -> ContentDocument {
    let url = url.trim();
    if url.is_empty() {
        return doc.clone();
    }
    with_section(doc, id, section, |s| s.images.push(url.to_string()))
}

pub fn remove_image(
    doc: &ContentDocument,
    id: &ProjectId,
    section: usize,
    image: usize,
) -> ContentDocument {
    with_section(doc, id, section, |s| {
        if image < s.images.len() {
            s.images.remove(image);
        }
    })
}

/// Parse `raw` as a whole new document.
///
/// On error the caller keeps `doc`; nothing is partially applied.
pub fn replace_whole_document(
    doc: &ContentDocument,
    raw: &str,
) -> Result<ContentDocument, ContentError> {
    match ContentDocument::from_json(raw) {
        Ok(next) => Ok(next),
        Err(e) => {
            tracing::debug!(
                "Rejected raw document ({} projects retained): {}",
                doc.projects.len(),
                e
            );
            Err(e)
        }
    }
}

fn with_project(
    doc: &ContentDocument,
    id: &ProjectId,
    f: impl FnOnce(&mut Project),
) -> ContentDocument {
    let mut next = doc.clone();
    if let Some(project) = next.projects.iter_mut().find(|p| &p.id == id) {
        f(project);
    }
    next
}

fn with_section(
    doc: &ContentDocument,
    id: &ProjectId,
    index: usize,
    f: impl FnOnce(&mut Section),
) -> ContentDocument {
    with_project(doc, id, |project| {
        if let Some(section) = project.sections.get_mut(index) {
            f(section);
        }
    })
}
