//! Fixed vocabularies for enum and vocabulary-list fields.

/// Legal values for the education `type` field.
pub const EDUCATION_TYPES: &[&str] = &[
    "high-school",
    "associates",
    "bachelors",
    "masters",
    "phd",
    "bootcamp",
    "certification",
    "self-taught",
];

/// Legal values for the work-experience `type` field.
pub const WORK_TYPES: &[&str] = &[
    "full-time",
    "part-time",
    "contract",
    "internship",
    "freelance",
];

/// Legal values for the project `status` field.
pub const PROJECT_STATUSES: &[&str] = &["planned", "in-progress", "completed", "archived"];

/// Legal values for the link `label` field.
pub const LINK_LABELS: &[&str] = &[
    "github",
    "linkedin",
    "twitter",
    "website",
    "youtube",
    "blog",
    "resume",
    "other",
];

/// Legal values for the user `interests` list.
pub const INTERESTS: &[&str] = &[
    "web-development",
    "systems-programming",
    "machine-learning",
    "devops",
    "security",
    "game-development",
    "mobile",
    "open-source",
    "databases",
    "ui-design",
];

/// The fixed technology vocabulary for `techStack` entries.
pub const TECH_STACK: &[&str] = &[
    "React",
    "TypeScript",
    "JavaScript",
    "Next.js",
    "Vue",
    "Svelte",
    "Angular",
    "Tailwind",
    "HTML",
    "CSS",
    "Node.js",
    "Express",
    "Rust",
    "Go",
    "Python",
    "Java",
    "Kotlin",
    "Swift",
    "C",
    "C++",
    "C#",
    "Ruby",
    "PHP",
    "Elixir",
    "PostgreSQL",
    "MySQL",
    "SQLite",
    "MongoDB",
    "Redis",
    "GraphQL",
    "Docker",
    "Kubernetes",
    "AWS",
    "GCP",
    "Azure",
    "Terraform",
    "Git",
    "Linux",
];

/// Render a vocabulary as a comma-joined hint, truncated to `max` entries.
///
/// Truncation appends the number of omitted values so error messages stay
/// readable for large vocabularies like [`TECH_STACK`].
pub fn vocab_hint(vocab: &[&str], max: usize) -> String {
    if vocab.len() <= max {
        vocab.join(", ")
    } else {
        format!(
            "{} (+{} more)",
            vocab[..max].join(", "),
            vocab.len() - max
        )
    }
}
