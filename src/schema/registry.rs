//! Static table registry: one [`TableConfig`] per entity kind, looked up
//! by key or by command-line alias.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::fields::{FieldDef, FieldKind};
use super::vocab;

/// The entity kinds manageable through the command language.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TableKey {
    Users,
    Links,
    Projects,
    Education,
    Work,
}

impl TableKey {
    /// All table keys, in display order.
    pub const ALL: &'static [TableKey] = &[
        TableKey::Users,
        TableKey::Links,
        TableKey::Projects,
        TableKey::Education,
        TableKey::Work,
    ];

    /// Canonical name, as used in prompts and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKey::Users => "users",
            TableKey::Links => "links",
            TableKey::Projects => "projects",
            TableKey::Education => "education",
            TableKey::Work => "work",
        }
    }

    /// Singular form, for "Created new project" style messages.
    pub fn singular(&self) -> &'static str {
        match self {
            TableKey::Users => "user",
            TableKey::Links => "link",
            TableKey::Projects => "project",
            TableKey::Education => "education entry",
            TableKey::Work => "work experience",
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static per-table metadata: editable fields, capabilities, and the
/// fields required to create a new record.
#[derive(Debug, Clone, Copy)]
pub struct TableConfig {
    pub key: TableKey,
    pub display_name: &'static str,
    pub fields: &'static [FieldDef],
    /// Fields that must be staged before a create commit.
    pub required: &'static [&'static str],
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
    /// Whether `git add -m <id>` is supported. The users table holds a
    /// single implicit record and cannot be targeted.
    pub can_target: bool,
    /// Field used as the human identity in summaries.
    pub identity_field: &'static str,
}

impl TableConfig {
    /// Look up an editable field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Comma-joined editable field names, for error messages.
    pub fn field_list(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub const USERS: TableConfig = TableConfig {
    key: TableKey::Users,
    display_name: "users",
    fields: &[
        FieldDef::new("name", FieldKind::Text),
        FieldDef::new("headline", FieldKind::Text),
        FieldDef::new("bio", FieldKind::Text),
        FieldDef::new("location", FieldKind::Text),
        FieldDef::new("email", FieldKind::Text),
        FieldDef::new("website", FieldKind::Url),
        FieldDef::new("githubUrl", FieldKind::GithubUrl),
        FieldDef::new("interests", FieldKind::VocabList(vocab::INTERESTS)),
    ],
    required: &[],
    can_create: false,
    can_update: true,
    can_delete: false,
    can_target: false,
    identity_field: "name",
};

pub const LINKS: TableConfig = TableConfig {
    key: TableKey::Links,
    display_name: "links",
    fields: &[
        FieldDef::new("url", FieldKind::Url),
        FieldDef::new("label", FieldKind::Enum(vocab::LINK_LABELS)),
        FieldDef::new("description", FieldKind::Text),
    ],
    required: &["url", "label"],
    can_create: true,
    can_update: true,
    can_delete: true,
    can_target: true,
    identity_field: "label",
};

pub const PROJECTS: TableConfig = TableConfig {
    key: TableKey::Projects,
    display_name: "projects",
    fields: &[
        FieldDef::new("name", FieldKind::Text),
        FieldDef::new("description", FieldKind::Text),
        FieldDef::new("status", FieldKind::Enum(vocab::PROJECT_STATUSES)),
        FieldDef::new("techStack", FieldKind::VocabList(vocab::TECH_STACK)),
        FieldDef::new("projectUrl", FieldKind::Url),
        FieldDef::new("githubUrl", FieldKind::GithubUrl),
        FieldDef::new("images", FieldKind::ImageList),
    ],
    required: &["name", "description"],
    can_create: true,
    can_update: true,
    can_delete: true,
    can_target: true,
    identity_field: "name",
};

pub const EDUCATION: TableConfig = TableConfig {
    key: TableKey::Education,
    display_name: "education",
    fields: &[
        FieldDef::new("institution", FieldKind::Text),
        FieldDef::new("degree", FieldKind::Text),
        FieldDef::new("fieldOfStudy", FieldKind::Text),
        FieldDef::new("type", FieldKind::Enum(vocab::EDUCATION_TYPES)),
        FieldDef::new("gpa", FieldKind::Gpa),
        FieldDef::new("startYear", FieldKind::Year),
        FieldDef::new("endYear", FieldKind::Year),
    ],
    required: &["institution", "type"],
    can_create: true,
    can_update: true,
    can_delete: true,
    can_target: true,
    identity_field: "institution",
};

pub const WORK: TableConfig = TableConfig {
    key: TableKey::Work,
    display_name: "work experience",
    fields: &[
        FieldDef::new("company", FieldKind::Text),
        FieldDef::new("position", FieldKind::Text),
        FieldDef::new("type", FieldKind::Enum(vocab::WORK_TYPES)),
        FieldDef::new("location", FieldKind::Text),
        FieldDef::new("startDate", FieldKind::Date),
        FieldDef::new("endDate", FieldKind::Date),
        FieldDef::new("responsibilities", FieldKind::TextList),
    ],
    required: &["company", "position", "startDate", "type"],
    can_create: true,
    can_update: true,
    can_delete: true,
    can_target: true,
    identity_field: "company",
};

/// Get the static config for a table key.
pub fn config_for(key: TableKey) -> &'static TableConfig {
    match key {
        TableKey::Users => &USERS,
        TableKey::Links => &LINKS,
        TableKey::Projects => &PROJECTS,
        TableKey::Education => &EDUCATION,
        TableKey::Work => &WORK,
    }
}

/// Resolve a table alias (case-insensitive) to its key.
///
/// Singular, plural and short forms are all accepted.
pub fn lookup_alias(token: &str) -> Option<TableKey> {
    match token.to_lowercase().as_str() {
        "users" | "user" | "profile" | "me" => Some(TableKey::Users),
        "links" | "link" | "socials" => Some(TableKey::Links),
        "projects" | "project" | "proj" => Some(TableKey::Projects),
        "education" | "edu" | "school" => Some(TableKey::Education),
        "work" | "work-experience" | "experience" | "exp" | "jobs" => Some(TableKey::Work),
        _ => None,
    }
}

/// All aliases grouped by table, for help text.
pub fn alias_table() -> Vec<(TableKey, &'static [&'static str])> {
    vec![
        (TableKey::Users, &["users", "user", "profile", "me"]),
        (TableKey::Links, &["links", "link", "socials"]),
        (TableKey::Projects, &["projects", "project", "proj"]),
        (TableKey::Education, &["education", "edu", "school"]),
        (
            TableKey::Work,
            &["work", "work-experience", "experience", "exp", "jobs"],
        ),
    ]
}
