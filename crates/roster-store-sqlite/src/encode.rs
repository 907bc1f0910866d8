//! Encoding and decoding helpers between Rust domain types and the plain
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Status fields are stored as
//! the integer codes defined next to each enum in `roster-core`.

use chrono::{DateTime, Utc};
use roster_core::{
  crew::{CrewGrade, CrewMember},
  party::{Party, PartyStatus},
  presence::{AdminStatus, JoinStatus, MuteStatus, Presence},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `crew` row.
pub struct RawCrewMember {
  pub id:            String,
  pub nickname:      String,
  pub grade:         i64,
  pub lastaction_ts: String,
}

impl RawCrewMember {
  pub fn into_crew_member(self) -> Result<CrewMember> {
    Ok(CrewMember {
      id:             self.id,
      nickname:       self.nickname,
      grade:          CrewGrade::from_code(self.grade)?,
      last_action_at: decode_dt(&self.lastaction_ts)?,
    })
  }
}

/// Raw values read directly from a `party` row.
pub struct RawParty {
  pub id:                   String,
  pub status:               i64,
  pub timezone:             String,
  pub locale:               String,
  pub authorized_charsets:  String,
  pub authorized_languages: String,
  pub lastaction_ts:        String,
}

impl RawParty {
  pub fn into_party(self) -> Result<Party> {
    Ok(Party {
      id:                   self.id,
      status:               PartyStatus::from_code(self.status)?,
      timezone:             self.timezone,
      locale:               self.locale,
      authorized_charsets:  self.authorized_charsets,
      authorized_languages: self.authorized_languages,
      last_action_at:       decode_dt(&self.lastaction_ts)?,
    })
  }
}

/// Raw values read directly from a `whoiswhere` row.
pub struct RawPresence {
  pub uid:           String,
  pub cid:           String,
  pub firsttime_ts:  String,
  pub lastaction_ts: String,
  pub adminstatus:   i64,
  pub joinstatus:    i64,
  pub mutestatus:    i64,
}

impl RawPresence {
  pub fn into_presence(self) -> Result<Presence> {
    Ok(Presence {
      user_id:        self.uid,
      party_id:       self.cid,
      first_seen_at:  decode_dt(&self.firsttime_ts)?,
      last_action_at: decode_dt(&self.lastaction_ts)?,
      admin_status:   AdminStatus::from_code(self.adminstatus)?,
      join_status:    JoinStatus::from_code(self.joinstatus)?,
      mute_status:    MuteStatus::from_code(self.mutestatus)?,
    })
  }
}
