//! Site content data model
//!
//! A [`ContentDocument`] is the single root value the site renders from and the
//! admin panel edits. It is persisted as one JSON object with camelCase keys.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::error::ContentError;

const PLACEHOLDER_COVER: &str =
    "https://images.unsplash.com/photo-1497366811353-6870744d04b2?q=80&w=1600&auto=format&fit=crop";

/// Opaque project identifier, assigned once at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Site-wide copy shown in the hero, about and contact sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub about: String,
    pub contact_email: String,
    pub contact_note: String,
    /// Platform name to profile URL
    pub socials: BTreeMap<String, String>,
}

/// Scalar text fields of [`SiteSettings`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteField {
    HeroTitle,
    HeroSubtitle,
    About,
    ContactEmail,
    ContactNote,
}

impl SiteField {
    pub const ALL: [SiteField; 5] = [
        SiteField::HeroTitle,
        SiteField::HeroSubtitle,
        SiteField::About,
        SiteField::ContactEmail,
        SiteField::ContactNote,
    ];

    /// Field name as it appears in the persisted JSON
    pub fn key(self) -> &'static str {
        match self {
            SiteField::HeroTitle => "heroTitle",
            SiteField::HeroSubtitle => "heroSubtitle",
            SiteField::About => "about",
            SiteField::ContactEmail => "contactEmail",
            SiteField::ContactNote => "contactNote",
        }
    }

    /// Human-readable label for forms
    pub fn label(self) -> &'static str {
        match self {
            SiteField::HeroTitle => "Hero Title",
            SiteField::HeroSubtitle => "Hero Subtitle",
            SiteField::About => "About",
            SiteField::ContactEmail => "Contact Email",
            SiteField::ContactNote => "Contact Note",
        }
    }
}

impl FromStr for SiteField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SiteField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| format!("Unknown site field: {}", s))
    }
}

impl SiteSettings {
    pub fn field(&self, field: SiteField) -> &str {
        match field {
            SiteField::HeroTitle => &self.hero_title,
            SiteField::HeroSubtitle => &self.hero_subtitle,
            SiteField::About => &self.about,
            SiteField::ContactEmail => &self.contact_email,
            SiteField::ContactNote => &self.contact_note,
        }
    }

    pub fn field_mut(&mut self, field: SiteField) -> &mut String {
        match field {
            SiteField::HeroTitle => &mut self.hero_title,
            SiteField::HeroSubtitle => &mut self.hero_subtitle,
            SiteField::About => &mut self.about,
            SiteField::ContactEmail => &mut self.contact_email,
            SiteField::ContactNote => &mut self.contact_note,
        }
    }
}

/// A named group of images within a project (e.g. one zone of a site)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub name: String,
    /// Image URLs in display order
    pub images: Vec<String>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            images: Vec::new(),
        }
    }
}

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub client: String,
    pub year: String,
    pub tags: Vec<String>,
    /// Cover image URL
    pub cover: String,
    pub brief: String,
    pub sections: Vec<Section>,
}

/// Missing fields of a stored project deserialize from this value, so a
/// project without an id receives a fresh one.
impl Default for Project {
    fn default() -> Self {
        Self {
            id: ProjectId::generate(),
            title: String::new(),
            client: String::new(),
            year: String::new(),
            tags: Vec::new(),
            cover: String::new(),
            brief: String::new(),
            sections: Vec::new(),
        }
    }
}

impl Project {
    /// A new project with editable placeholder values and one empty section
    pub fn placeholder(id: ProjectId) -> Self {
        Self {
            id,
            title: "New Project".to_string(),
            client: "Client".to_string(),
            year: chrono::Local::now().year().to_string(),
            tags: vec!["Tag".to_string()],
            cover: PLACEHOLDER_COVER.to_string(),
            brief: "프로젝트 간단 설명".to_string(),
            sections: vec![Section::new("섹션 1")],
        }
    }
}

/// Root document: site copy plus the project list (newest first)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentDocument {
    pub site: SiteSettings,
    pub projects: Vec<Project>,
}

impl ContentDocument {
    /// Parse and validate a document from JSON text.
    ///
    /// Absent keys take their defaults; wrong types, a non-object root and
    /// duplicate project ids are rejected.
    pub fn from_json(text: &str) -> Result<Self, ContentError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let kind = match &value {
            serde_json::Value::Object(_) => None,
            serde_json::Value::Array(_) => Some("an array"),
            serde_json::Value::String(_) => Some("a string"),
            serde_json::Value::Number(_) => Some("a number"),
            serde_json::Value::Bool(_) => Some("a boolean"),
            serde_json::Value::Null => Some("null"),
        };
        if let Some(kind) = kind {
            return Err(ContentError::NotAnObject(kind));
        }

        let doc: Self = serde_json::from_value(value)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Compact JSON, as written to storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Indented JSON, as exported and shown in the raw editor
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check that every project id is unique
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut seen = HashSet::new();
        for project in &self.projects {
            if !seen.insert(&project.id) {
                return Err(ContentError::DuplicateProjectId(project.id.to_string()));
            }
        }
        Ok(())
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn contains_project(&self, id: &ProjectId) -> bool {
        self.project(id).is_some()
    }

    /// The bundled document used on first run or when storage is unreadable
    pub fn demo() -> Self {
        let socials = [
            ("instagram", "https://instagram.com/"),
            ("behance", "https://behance.net/"),
            ("github", "https://github.com/"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            site: SiteSettings {
                hero_title: "SUNGJOON – Interior & Design".to_string(),
                hero_subtitle:
                    "Space tells stories. I shape those stories into architecture and interiors."
                        .to_string(),
                about: "안녕하세요, 성준입니다. 인테리어 설계와 현장 경험을 토대로 기능과 미학이 공존하는 공간을 만듭니다. 비용, 일정, 품질을 한 화면에서 관리하듯, 디자인도 처음부터 끝까지 정밀하게 설계합니다.".to_string(),
                contact_email: "contact@yourdomain.com".to_string(),
                contact_note: "프로젝트 문의는 이메일로 편하게 남겨주세요.".to_string(),
                socials,
            },
            projects: vec![
                Project {
                    id: ProjectId::from("demo-dr365"),
                    title: "DR365 – 카운터 & 월 디스플레이".to_string(),
                    client: "dr365".to_string(),
                    year: "2025".to_string(),
                    tags: strings(&["Retail", "Cosmetics", "Detail"]),
                    cover: unsplash("photo-1517245386807-bb43f82c33c4"),
                    brief: "1200x2300x450 사이즈 제안. 일본식 미니멀 디테일과 모듈화된 수납/디스플레이 시스템.".to_string(),
                    sections: vec![
                        Section {
                            name: "카운터 존".to_string(),
                            images: vec![
                                unsplash("photo-1524758631624-e2822e304c36"),
                                unsplash("photo-1523419409543-a5e549c1a9c0"),
                            ],
                        },
                        Section {
                            name: "월 디스플레이".to_string(),
                            images: vec![
                                unsplash("photo-1522199755839-a2bacb67c546"),
                                unsplash("photo-1526318472351-c75fcf070305"),
                            ],
                        },
                    ],
                },
                Project {
                    id: ProjectId::from("demo-phone-store"),
                    title: "Phone Store – 모듈형 진열".to_string(),
                    client: "Local Telco".to_string(),
                    year: "2024".to_string(),
                    tags: strings(&["Retail", "Modular", "Lighting"]),
                    cover: unsplash("photo-1497366216548-37526070297c"),
                    brief: "가변 진열 모듈과 라인 조명으로 유연한 VMD 시나리오 지원. 유지보수 용이성 최대화.".to_string(),
                    sections: vec![
                        Section {
                            name: "입구/히어로".to_string(),
                            images: vec![unsplash("photo-1497366811353-6870744d04b2")],
                        },
                        Section {
                            name: "체험존".to_string(),
                            images: vec![
                                unsplash("photo-1486406146926-c627a92ad1ab"),
                                unsplash("photo-1481277542470-605612bd2d61"),
                            ],
                        },
                    ],
                },
            ],
        }
    }
}

fn unsplash(photo: &str) -> String {
    format!(
        "https://images.unsplash.com/{}?q=80&w=1600&auto=format&fit=crop",
        photo
    )
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Split a comma-separated tag field into trimmed, non-empty tags
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`parse_tags`] for display in a single text field
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_has_two_projects_with_unique_ids() {
        let demo = ContentDocument::demo();
        assert_eq!(demo.projects.len(), 2);
        assert!(demo.validate().is_ok());
        assert_eq!(demo, ContentDocument::demo());
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let json = ContentDocument::demo().to_json().unwrap();
        assert!(json.contains("\"heroTitle\""));
        assert!(json.contains("\"contactEmail\""));
        assert!(!json.contains("hero_title"));
    }

    #[test]
    fn test_partial_document_is_defaulted() {
        let doc = ContentDocument::from_json(r#"{"site":{"heroTitle":"X"}}"#).unwrap();
        assert_eq!(doc.site.hero_title, "X");
        assert_eq!(doc.site.about, "");
        assert!(doc.site.socials.is_empty());
        assert!(doc.projects.is_empty());
    }

    #[test]
    fn test_project_without_id_gets_one() {
        let doc = ContentDocument::from_json(
            r#"{"projects":[{"title":"A"},{"title":"B"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.projects.len(), 2);
        assert!(!doc.projects[0].id.as_str().is_empty());
        assert_ne!(doc.projects[0].id, doc.projects[1].id);
        assert!(doc.projects[0].sections.is_empty());
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let result = ContentDocument::from_json(r#"{"projects":[{"tags":"Retail"}]}"#);
        assert!(matches!(result, Err(ContentError::Parse(_))));

        let result = ContentDocument::from_json(r#"{"site":{"heroTitle":null}}"#);
        assert!(matches!(result, Err(ContentError::Parse(_))));
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        assert!(matches!(
            ContentDocument::from_json("[]"),
            Err(ContentError::NotAnObject("an array"))
        ));
        assert!(matches!(
            ContentDocument::from_json("null"),
            Err(ContentError::NotAnObject("null"))
        ));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let result = ContentDocument::from_json(
            r#"{"projects":[{"id":"a","title":"A"},{"id":"a","title":"B"}]}"#,
        );
        match result {
            Err(ContentError::DuplicateProjectId(id)) => assert_eq!(id, "a"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_site_field_from_str() {
        assert_eq!("heroTitle".parse::<SiteField>(), Ok(SiteField::HeroTitle));
        assert_eq!("contactNote".parse::<SiteField>(), Ok(SiteField::ContactNote));
        assert!("socials".parse::<SiteField>().is_err());
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(" Retail, ,Modular ,"), vec!["Retail", "Modular"]);
        assert!(parse_tags("").is_empty());
        let tags = parse_tags("a, b, a");
        assert_eq!(join_tags(&tags), "a, b, a");
    }

    #[test]
    fn test_placeholder_project() {
        let project = Project::placeholder(ProjectId::from("p1"));
        assert_eq!(project.title, "New Project");
        assert_eq!(project.sections.len(), 1);
        assert!(project.sections[0].images.is_empty());
        assert_eq!(project.year.len(), 4);
    }
}
