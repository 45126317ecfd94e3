//! Core types for the training application.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Exercise category a daily plan belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    ChineseWriting,
    ClassicalReading,
    EnglishWriting,
    EnglishReading,
}

impl Module {
    pub const ALL: [Module; 4] = [
        Module::ChineseWriting,
        Module::ClassicalReading,
        Module::EnglishWriting,
        Module::EnglishReading,
    ];

    /// Storage and wire key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChineseWriting => "chinese_writing",
            Self::ClassicalReading => "classical_reading",
            Self::EnglishWriting => "english_writing",
            Self::EnglishReading => "english_reading",
        }
    }

    /// Parse from storage key.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "chinese_writing" => Some(Self::ChineseWriting),
            "classical_reading" => Some(Self::ClassicalReading),
            "english_writing" => Some(Self::EnglishWriting),
            "english_reading" => Some(Self::EnglishReading),
            _ => None,
        }
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Module {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value).ok_or_else(|| CoreError::UnknownModule(value.to_string()))
    }
}

/// User role. Gates route access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Student,
    Parent,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Parent => "parent",
            Self::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Self::Student),
            "parent" => Some(Self::Parent),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value).ok_or_else(|| CoreError::UnknownRole(value.to_string()))
    }
}

/// Training plan status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    #[default]
    Pending,
    Completed,
}

impl PlanStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

/// Mistake book entry status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrongQuestionStatus {
    #[default]
    Active,
    Resolved,
}

impl WrongQuestionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Resolved => "resolved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }
}

/// Grade used in prompts when the student has none on record.
pub const DEFAULT_GRADE_LEVEL: &str = "预初";
