use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Project status. The backend stores this as free text; the three
/// statuses the dashboard assigns get typed variants, anything else
/// round-trips through `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectStatus {
    InProgress,
    Review,
    Completed,
    Other(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Review => "Review",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> ProjectStatus {
        match s {
            "In Progress" => ProjectStatus::InProgress,
            "Review" => ProjectStatus::Review,
            "Completed" => ProjectStatus::Completed,
            other => ProjectStatus::Other(other.to_string()),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ProjectStatus::Completed)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ProjectStatus::parse(&s))
    }
}

/// A body of work for a client, owning zero or more tasks.
/// `client_id` is `None` for internal projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub client_id: Option<String>,
    pub provider_id: String,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        provider_id: impl Into<String>,
    ) -> Self {
        Project {
            id: id.into(),
            name: name.into(),
            status: ProjectStatus::InProgress,
            client_id: None,
            provider_id: provider_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_known_and_free_text() {
        assert_eq!(ProjectStatus::parse("Completed"), ProjectStatus::Completed);
        assert_eq!(
            ProjectStatus::parse("On Hold"),
            ProjectStatus::Other("On Hold".to_string())
        );
        assert!(ProjectStatus::parse("Completed").is_completed());
        assert!(!ProjectStatus::parse("Review").is_completed());
    }

    #[test]
    fn status_round_trips_free_text() {
        let status = ProjectStatus::parse("Awaiting Feedback");
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"Awaiting Feedback\"");
        let back: ProjectStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, status);
    }
}
