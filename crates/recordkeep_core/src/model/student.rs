//! Student record and grade buckets.

use crate::model::entity::Entity;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type StudentId = i64;

/// Letter grade derived from a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Buckets: `>=80 A`, `>=70 B`, `>=60 C`, `>=50 D`, otherwise `F`.
    pub fn from_score(score: i64) -> Self {
        match score {
            s if s >= 80 => Self::A,
            s if s >= 70 => Self::B,
            s if s >= 60 => Self::C,
            s if s >= 50 => Self::D,
            _ => Self::F,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub full_name: String,
    pub score: i64,
}

impl Student {
    pub fn new(id: StudentId, full_name: impl Into<String>, score: i64) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            score,
        }
    }

    pub fn grade(&self) -> Grade {
        Grade::from_score(self.score)
    }
}

impl Entity for Student {
    type Id = StudentId;

    fn id(&self) -> StudentId {
        self.id
    }
}
