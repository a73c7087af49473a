//! Integer code tables for Stride records.
//!
//! Records keep the raw integer that was stored (see `entities`), so a row with
//! an unknown code still reads. These enums name the codes and carry the small
//! predicates the resolvers need. `from_code` returns `None` for anything
//! outside the table.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Status of a task.
///
/// ```text
/// draft(0) → available(2) → claimed(3) → in_review(5) → done(4)
///          ↘ blocked(1) ↗ (while a dependency is not done)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Draft,
    Blocked,
    Available,
    Claimed,
    Done,
    InReview,
}

impl TaskStatus {
    pub const ALL: [Self; 6] = [
        Self::Draft,
        Self::Blocked,
        Self::Available,
        Self::Claimed,
        Self::Done,
        Self::InReview,
    ];

    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Draft => 0,
            Self::Blocked => 1,
            Self::Available => 2,
            Self::Claimed => 3,
            Self::Done => 4,
            Self::InReview => 5,
        }
    }

    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Draft),
            1 => Some(Self::Blocked),
            2 => Some(Self::Available),
            3 => Some(Self::Claimed),
            4 => Some(Self::Done),
            5 => Some(Self::InReview),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Blocked => "Blocked",
            Self::Available => "Available",
            Self::Claimed => "Claimed",
            Self::Done => "Done",
            Self::InReview => "In Review",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaskPriority
// ---------------------------------------------------------------------------

/// Priority of a task. Stored as 0 (high) to 2 (low).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::High),
            1 => Some(Self::Medium),
            2 => Some(Self::Low),
            _ => None,
        }
    }

    /// Parse a priority from its label, case-insensitively.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        [Self::High, Self::Medium, Self::Low]
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(label.trim()))
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Label for a stored priority code, `None` when the code is out of range.
    #[must_use]
    pub fn label_for(code: i64) -> Option<&'static str> {
        Self::from_code(code).map(Self::as_str)
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ClaimKind
// ---------------------------------------------------------------------------

/// Kind of a claim a person holds on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    Done,
    Active,
    Failed,
    PutOnHold,
    Abandoned,
    InReview,
}

impl ClaimKind {
    /// Claim kinds that make the claimant the task's assignee.
    pub const ASSIGNING: [Self; 2] = [Self::Done, Self::Active];

    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Done => 0,
            Self::Active => 1,
            Self::Failed => 2,
            Self::PutOnHold => 3,
            Self::Abandoned => 4,
            Self::InReview => 5,
        }
    }

    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Done),
            1 => Some(Self::Active),
            2 => Some(Self::Failed),
            3 => Some(Self::PutOnHold),
            4 => Some(Self::Abandoned),
            5 => Some(Self::InReview),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Active => "active",
            Self::Failed => "failed",
            Self::PutOnHold => "put_on_hold",
            Self::Abandoned => "abandoned",
            Self::InReview => "in_review",
        }
    }
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ProductRight
// ---------------------------------------------------------------------------

/// Right a person holds on a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductRight {
    Follower,
    Admin,
    Manager,
    Contributor,
    Owner,
}

impl ProductRight {
    /// Rights that allow editing the product's tasks.
    pub const EDITORS: [Self; 3] = [Self::Admin, Self::Manager, Self::Owner];

    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Follower => 0,
            Self::Admin => 1,
            Self::Manager => 2,
            Self::Contributor => 3,
            Self::Owner => 4,
        }
    }

    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Follower),
            1 => Some(Self::Admin),
            2 => Some(Self::Manager),
            3 => Some(Self::Contributor),
            4 => Some(Self::Owner),
            _ => None,
        }
    }

    #[must_use]
    pub const fn can_edit_tasks(self) -> bool {
        matches!(self, Self::Admin | Self::Manager | Self::Owner)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Follower => "follower",
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Contributor => "contributor",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for ProductRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// InitiativeStatus
// ---------------------------------------------------------------------------

/// Status of an initiative. Codes start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InitiativeStatus {
    Active,
    Completed,
    Draft,
    Cancelled,
}

impl InitiativeStatus {
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Active => 1,
            Self::Completed => 2,
            Self::Draft => 3,
            Self::Cancelled => 4,
        }
    }

    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Active),
            2 => Some(Self::Completed),
            3 => Some(Self::Draft),
            4 => Some(Self::Cancelled),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Draft => "draft",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InitiativeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
