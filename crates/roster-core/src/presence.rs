//! Presence — one user's standing within one party ("who is where").
//!
//! A presence row is created the first time a user is observed in a party
//! and only ever updated in place afterwards. The compound key
//! `(user_id, party_id)` admits at most one row per pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Status enumerations ─────────────────────────────────────────────────────

/// The user's administrative standing in the party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminStatus {
  #[default]
  Unknown = 0,
  Member  = 1,
  Admin   = 2,
  Creator = 3,
}

impl AdminStatus {
  pub fn code(self) -> i64 { self as i64 }

  pub fn from_code(code: i64) -> Result<Self> {
    match code {
      0 => Ok(Self::Unknown),
      1 => Ok(Self::Member),
      2 => Ok(Self::Admin),
      3 => Ok(Self::Creator),
      other => Err(Error::UnknownAdminStatus(other)),
    }
  }
}

/// Whether the user is actually in the party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinStatus {
  #[default]
  Unknown = 0,
  Member  = 1,
  Blocked = 2,
  Pending = 3,
}

impl JoinStatus {
  pub fn code(self) -> i64 { self as i64 }

  pub fn from_code(code: i64) -> Result<Self> {
    match code {
      0 => Ok(Self::Unknown),
      1 => Ok(Self::Member),
      2 => Ok(Self::Blocked),
      3 => Ok(Self::Pending),
      other => Err(Error::UnknownJoinStatus(other)),
    }
  }
}

/// Whether the user may speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuteStatus {
  #[default]
  Unknown = 0,
  Speaks  = 1,
  Muted   = 2,
}

impl MuteStatus {
  pub fn code(self) -> i64 { self as i64 }

  pub fn from_code(code: i64) -> Result<Self> {
    match code {
      0 => Ok(Self::Unknown),
      1 => Ok(Self::Speaks),
      2 => Ok(Self::Muted),
      other => Err(Error::UnknownMuteStatus(other)),
    }
  }
}

// ─── Presence ────────────────────────────────────────────────────────────────

/// One user's stored standing within one party.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presence {
  pub user_id:        String,
  pub party_id:       String,
  /// Set once when the row is created; never changes afterwards.
  pub first_seen_at:  DateTime<Utc>,
  /// Refreshed on every mutation of the row.
  pub last_action_at: DateTime<Utc>,
  pub admin_status:   AdminStatus,
  pub join_status:    JoinStatus,
  pub mute_status:    MuteStatus,
}

// ─── PresenceUpdate ──────────────────────────────────────────────────────────

/// The caller-supplied statuses for
/// [`RosterStore::upsert_presence`](crate::store::RosterStore::upsert_presence).
/// Timestamps are always store-assigned; they are not accepted from callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresenceUpdate {
  pub join_status:  JoinStatus,
  pub admin_status: AdminStatus,
  pub mute_status:  MuteStatus,
}
