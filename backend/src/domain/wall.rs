//! Wall post types and presentation helpers.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::{AccountId, DisplayName};

/// Validation errors returned by the wall value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WallValidationError {
    /// Message was missing or blank once trimmed.
    EmptyMessage,
}

impl fmt::Display for WallValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "message must not be empty"),
        }
    }
}

impl std::error::Error for WallValidationError {}

/// Non-empty wall post message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Message(String);

impl Message {
    /// Validate and construct a message.
    pub fn new(message: impl Into<String>) -> Result<Self, WallValidationError> {
        let message: String = message.into();
        if message.trim().is_empty() {
            return Err(WallValidationError::EmptyMessage);
        }
        Ok(Self(message))
    }
}

impl AsRef<str> for Message {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Message> for String {
    fn from(value: Message) -> Self {
        value.0
    }
}

impl TryFrom<String> for Message {
    type Error = WallValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A post about to be appended to the wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWallPost {
    id: Uuid,
    message: Message,
    author: AccountId,
}

impl NewWallPost {
    /// Construct a post with a fresh identifier.
    pub fn new(message: Message, author: AccountId) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
            author,
        }
    }

    /// Identifier assigned to the post.
    pub const fn id(&self) -> &Uuid {
        &self.id
    }

    /// Message body.
    pub const fn message(&self) -> &Message {
        &self.message
    }

    /// Posting account.
    pub const fn author(&self) -> &AccountId {
        &self.author
    }
}

/// A stored wall post joined with its author's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredWallPost {
    /// Post identifier.
    pub id: Uuid,
    /// Message body.
    pub message: Message,
    /// Posting account.
    pub author: AccountId,
    /// Author's display name, resolved by the store's join.
    pub author_name: DisplayName,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Author reference as rendered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WallPostAuthor {
    /// Posting account identifier.
    #[schema(value_type = String)]
    pub id: Uuid,
    /// Author's display name.
    #[schema(value_type = String, example = "Ada")]
    pub name: DisplayName,
}

/// Client-facing wall post with a human-relative age string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WallPostView {
    /// Post identifier.
    #[schema(value_type = String)]
    pub id: Uuid,
    /// Message body.
    #[schema(value_type = String, example = "hi")]
    pub message: Message,
    /// Author reference.
    pub author: WallPostAuthor,
    /// Human-relative age, e.g. "3 minutes ago".
    #[schema(example = "3 minutes ago")]
    pub created_at: String,
}

impl AuthoredWallPost {
    /// Render the post for clients, formatting the age relative to `now`.
    pub fn into_view(self, now: DateTime<Utc>) -> WallPostView {
        let created_at = humanize_age(self.created_at, now);
        WallPostView {
            id: self.id,
            message: self.message,
            author: WallPostAuthor {
                id: *self.author.as_uuid(),
                name: self.author_name,
            },
            created_at,
        }
    }
}

/// Format how long ago `created_at` was relative to `now`.
///
/// Thresholds follow common "from now" conventions: seconds collapse to
/// "a few seconds ago", 45s–90s reads "a minute ago", then minutes, hours,
/// days, months, and years. Timestamps in the future clamp to the smallest
/// bucket rather than producing negative ages.
pub fn humanize_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - created_at).max(Duration::zero());
    let seconds = elapsed.num_seconds();
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if seconds < 45 {
        "a few seconds ago".to_owned()
    } else if seconds < 90 {
        "a minute ago".to_owned()
    } else if minutes < 45 {
        format!("{minutes} minutes ago")
    } else if minutes < 90 {
        "an hour ago".to_owned()
    } else if hours < 22 {
        format!("{hours} hours ago")
    } else if hours < 36 {
        "a day ago".to_owned()
    } else if days < 26 {
        format!("{days} days ago")
    } else if days < 46 {
        "a month ago".to_owned()
    } else if days < 320 {
        format!("{} months ago", days / 30)
    } else if days < 548 {
        "a year ago".to_owned()
    } else {
        format!("{} years ago", days / 365)
    }
}
