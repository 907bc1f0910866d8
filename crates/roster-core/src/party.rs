//! Party — a managed chat room or channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// How far the bot's management of a party goes.
///
/// Stored as an integer code; codes are stable.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PartyStatus {
  #[default]
  Nonmanaged = 1,
  Watching   = 2,
  Voluble    = 3,
  Admin      = 4,
}

impl PartyStatus {
  /// The integer code stored in the `status` column.
  pub fn code(self) -> i64 { self as i64 }

  pub fn from_code(code: i64) -> Result<Self> {
    match code {
      1 => Ok(Self::Nonmanaged),
      2 => Ok(Self::Watching),
      3 => Ok(Self::Voluble),
      4 => Ok(Self::Admin),
      other => Err(Error::UnknownPartyStatus(other)),
    }
  }
}

// ─── Party ───────────────────────────────────────────────────────────────────

/// A managed chat room. At most one per `id` (primary key).
///
/// `authorized_charsets` and `authorized_languages` are free-form strings
/// interpreted by the moderation layer, not by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
  pub id:                   String,
  pub status:               PartyStatus,
  pub timezone:             String,
  /// 2-letter language code.
  pub locale:               String,
  pub authorized_charsets:  String,
  pub authorized_languages: String,
  pub last_action_at:       DateTime<Utc>,
}

impl Party {
  /// Build a fresh party with the defaults every newly-observed channel
  /// starts from: non-managed, UTC, English, nothing authorized.
  pub fn new(id: impl Into<String>, now: DateTime<Utc>) -> Self {
    Self {
      id: id.into(),
      status: PartyStatus::Nonmanaged,
      timezone: "UTC".to_owned(),
      locale: "en".to_owned(),
      authorized_charsets: String::new(),
      authorized_languages: String::new(),
      last_action_at: now,
    }
  }
}
