//! Wire types for the Git Mirrors dashboard backend

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Sentinel message the backend places in a 2xx `/me` envelope when the
/// session cookie is missing or stale. Callers must check for it in
/// addition to the transport-level status.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Uniform response envelope returned by every backend endpoint.
///
/// Older backend revisions omit `success`, so it defaults to `false`;
/// `data` is absent on error responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// True when the envelope carries the `"Unauthorized"` sentinel.
    pub fn is_unauthorized(&self) -> bool {
        self.message == UNAUTHORIZED_MESSAGE
    }
}

/// Authenticated principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Server-side session paired with a [`User`] in newer backend revisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data payload of `/login` and `/me` responses.
///
/// Both fields are optional on the wire: the user may be absent even in a
/// 2xx envelope, and only session-aware backend revisions send `session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<UserSession>,
}

/// A tracked mirror repository as the backend reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub is_enabled: bool,
    pub git_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_source_secret_key: Option<String>,
    pub git_target: String,
    pub git_target_secret_key: String,
    pub git_clone_period_seconds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_clone_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository creation payload.
///
/// Deliberately excludes `id`, `created_at`, `updated_at`, and
/// `last_clone_at`: those are server-assigned and the client never sends
/// them. Validation limits mirror the backend's form constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewRepository {
    #[validate(length(
        min = 3,
        max = 200,
        message = "Name length should be more than 3 characters and less than 200 characters long"
    ))]
    pub name: String,

    #[validate(length(max = 512, message = "Url should be less than 512 characters long"))]
    pub url: String,

    pub is_enabled: bool,

    #[validate(length(
        min = 3,
        max = 512,
        message = "git Source should be more than 3 characters and less than 512 characters long"
    ))]
    pub git_source: String,

    #[validate(length(
        max = 512,
        message = "git Source Private Key should be less than 512 characters long"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_source_secret_key: Option<String>,

    #[validate(length(
        min = 3,
        max = 512,
        message = "git Target should be more than 3 characters and less than 512 characters long"
    ))]
    pub git_target: String,

    #[validate(length(
        min = 3,
        message = "git Target Secret Key should be more than 3 characters long"
    ))]
    pub git_target_secret_key: String,

    #[validate(range(
        min = 60,
        max = 31_556_952,
        message = "Cloning period must be between 60 seconds and 1 year"
    ))]
    pub git_clone_period_seconds: u32,
}

/// One clone/error log line attached to a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryLog {
    pub id: Uuid,
    pub repository_id: Uuid,
    #[serde(rename = "type")]
    pub log_type: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-day log volume bucket (`day` is `YYYY-MM-DD`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLogCount {
    pub day: NaiveDate,
    pub count: u32,
}

/// Read-only aggregate projection rendered on the dashboard landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub total_repositories: u32,
    pub enabled: u32,
    pub disabled: u32,
    pub last_cloned_repos: Vec<Repository>,
    pub daily_logs: Vec<DailyLogCount>,
    pub daily_error_logs: Vec<DailyLogCount>,
}

/// Data payload of `GET /repository/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoriesPayload {
    pub repositories: Vec<Repository>,
}

/// Data payload of `POST /repository/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRepositoryPayload {
    pub created_repository: Repository,
}

/// Data payload of `GET`/`DELETE /repository/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPayload {
    pub repository: Repository,
}

/// Data payload of `GET /repository/:id/logs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryLogsPayload {
    pub repository_logs: Vec<RepositoryLog>,
}

/// Data payload of `GET /aggregate/dashboard`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub dashboard: DashboardData,
}

/// Login request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Password change request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_success_defaults_to_false() {
        let envelope: ApiEnvelope<AuthPayload> =
            serde_json::from_str(r#"{"message":"Unauthorized"}"#).unwrap();

        assert!(!envelope.success);
        assert!(envelope.is_unauthorized());
        assert!(envelope.data.is_none());
    }

    #[test]
    fn auth_payload_tolerates_missing_user() {
        let envelope: ApiEnvelope<AuthPayload> =
            serde_json::from_str(r#"{"success":true,"message":"Success","data":{}}"#).unwrap();

        let payload = envelope.data.unwrap();
        assert!(payload.user.is_none());
        assert!(payload.session.is_none());
    }

    #[test]
    fn repository_round_trips_camel_case() {
        let json = r#"{
            "id": "6f8ee5b1-93cc-4c4f-9d3c-0a0f6b6f0a01",
            "name": "kernel-mirror",
            "url": "https://git.example.com/kernel.git",
            "isEnabled": true,
            "gitSource": "git@github.com:torvalds/linux.git",
            "gitTarget": "git@mirror.example.com:linux.git",
            "gitTargetSecretKey": "secret",
            "gitClonePeriodSeconds": 3600,
            "createdAt": "2025-05-15T10:00:00Z",
            "updatedAt": "2025-05-15T10:00:00Z"
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "kernel-mirror");
        assert!(repo.git_source_secret_key.is_none());
        assert!(repo.last_clone_at.is_none());

        let back = serde_json::to_value(&repo).unwrap();
        assert_eq!(back["gitClonePeriodSeconds"], 3600);
        assert_eq!(back["isEnabled"], true);
        assert!(back.get("gitSourceSecretKey").is_none());
    }

    #[test]
    fn dashboard_data_parses_daily_buckets() {
        let json = r#"{
            "totalRepositories": 4,
            "enabled": 3,
            "disabled": 1,
            "lastClonedRepos": [],
            "dailyLogs": [{"day": "2025-05-14", "count": 12}],
            "dailyErrorLogs": [{"day": "2025-05-14", "count": 2}]
        }"#;

        let dashboard: DashboardData = serde_json::from_str(json).unwrap();
        assert_eq!(dashboard.total_repositories, 4);
        assert_eq!(dashboard.daily_logs[0].count, 12);
        assert_eq!(
            dashboard.daily_logs[0].day,
            NaiveDate::from_ymd_opt(2025, 5, 14).unwrap()
        );
    }
}
