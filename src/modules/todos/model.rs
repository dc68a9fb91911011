use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tasknest_core::ApiError;
use validator::Validate;

/// RFC 822 with a numeric zone, e.g. `02 Jan 06 15:04 -0700`.
pub const CREATED_AT_FORMAT: &str = "%d %b %y %H:%M %z";

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Todo {
    pub id: i64,
    pub created_by: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: bool,
    /// Stored in UTC.
    pub created_at: NaiveDateTime,
}

impl Todo {
    /// `created_at` shown in the IANA zone `tzone`, or UTC when the name is unknown.
    pub fn created_at_in(&self, tzone: &str) -> String {
        let tz: Tz = tzone.parse().unwrap_or(Tz::UTC);
        tz.from_utc_datetime(&self.created_at)
            .format(CREATED_AT_FORMAT)
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub created_by: i64,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoUpdate {
    pub id: i64,
    pub created_by: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct TodoForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Task title empty!!"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Checkbox value; `on` when ticked, absent otherwise.
    #[serde(default)]
    pub status: Option<String>,
}

impl TodoForm {
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status.as_deref() == Some("on")
    }

    pub fn description(&self) -> Option<String> {
        (!self.description.is_empty()).then(|| self.description.clone())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TodoIdQuery {
    #[serde(default)]
    pub id: String,
}

impl TodoIdQuery {
    pub fn parse(&self) -> Result<i64, ApiError> {
        self.id.trim().parse().map_err(|_| {
            ApiError::bad_request(format!("error 400: invalid task id {:?}", self.id))
        })
    }
}
