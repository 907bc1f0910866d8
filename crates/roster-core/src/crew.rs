//! Crew — privileged bot operators, ranked by grade.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Grade ───────────────────────────────────────────────────────────────────

/// An operator's rank. Higher codes mean more privilege.
///
/// The numeric codes are the stored representation; they are stable and
/// must never be renumbered. Callers use the derived ordering for
/// authorization tiering — the store itself never interprets grades.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CrewGrade {
  #[default]
  Seaman    = 1,
  Bartender = 5,
  Second    = 10,
  Captain   = 20,
  Director  = 40,
}

impl CrewGrade {
  /// The integer code stored in the `grade` column.
  pub fn code(self) -> i64 { self as i64 }

  /// Decode a stored code. Unknown codes are a fault, not a default.
  pub fn from_code(code: i64) -> Result<Self> {
    match code {
      1 => Ok(Self::Seaman),
      5 => Ok(Self::Bartender),
      10 => Ok(Self::Second),
      20 => Ok(Self::Captain),
      40 => Ok(Self::Director),
      other => Err(Error::UnknownCrewGrade(other)),
    }
  }
}

// ─── CrewMember ──────────────────────────────────────────────────────────────

/// A privileged operator record. At most one per `id` (primary key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
  pub id:             String,
  pub nickname:       String,
  pub grade:          CrewGrade,
  pub last_action_at: DateTime<Utc>,
}

impl CrewMember {
  /// Build a fresh record with a store-assigned timestamp.
  pub fn new(
    id: impl Into<String>,
    nickname: impl Into<String>,
    grade: CrewGrade,
    now: DateTime<Utc>,
  ) -> Self {
    Self {
      id: id.into(),
      nickname: nickname.into(),
      grade,
      last_action_at: now,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn grade_ordering_follows_rank() {
    assert!(CrewGrade::Seaman < CrewGrade::Bartender);
    assert!(CrewGrade::Bartender < CrewGrade::Second);
    assert!(CrewGrade::Second < CrewGrade::Captain);
    assert!(CrewGrade::Captain < CrewGrade::Director);
  }

  #[test]
  fn grade_codes_roundtrip() {
    for grade in [
      CrewGrade::Seaman,
      CrewGrade::Bartender,
      CrewGrade::Second,
      CrewGrade::Captain,
      CrewGrade::Director,
    ] {
      assert_eq!(CrewGrade::from_code(grade.code()).unwrap(), grade);
    }
  }

  #[test]
  fn unknown_grade_code_is_an_error() {
    assert!(matches!(
      CrewGrade::from_code(7),
      Err(Error::UnknownCrewGrade(7))
    ));
  }
}
