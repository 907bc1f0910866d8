//! [`SqliteStore`] — the SQLite implementation of [`RosterStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use roster_core::{
  crew::{CrewGrade, CrewMember},
  party::{Party, PartyStatus},
  presence::{Presence, PresenceUpdate},
  store::RosterStore,
};

use crate::{
  encode::{encode_dt, RawCrewMember, RawParty, RawPresence},
  schema::SCHEMA,
  Error, Result,
};

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn read_crew_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCrewMember> {
  Ok(RawCrewMember {
    id:            row.get(0)?,
    nickname:      row.get(1)?,
    grade:         row.get(2)?,
    lastaction_ts: row.get(3)?,
  })
}

fn read_party_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawParty> {
  Ok(RawParty {
    id:                   row.get(0)?,
    status:               row.get(1)?,
    timezone:             row.get(2)?,
    locale:               row.get(3)?,
    authorized_charsets:  row.get(4)?,
    authorized_languages: row.get(5)?,
    lastaction_ts:        row.get(6)?,
  })
}

fn read_presence_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPresence> {
  Ok(RawPresence {
    uid:           row.get(0)?,
    cid:           row.get(1)?,
    firsttime_ts:  row.get(2)?,
    lastaction_ts: row.get(3)?,
    adminstatus:   row.get(4)?,
    joinstatus:    row.get(5)?,
    mutestatus:    row.get(6)?,
  })
}

const PRESENCE_COLUMNS: &str =
  "uid, cid, firsttime_ts, lastaction_ts, adminstatus, joinstatus, mutestatus";

/// Fetch one presence row by its compound key.
///
/// The key match is an explicit two-field conjunction; a row is never
/// matched on `cid` alone.
fn fetch_presence(
  conn: &rusqlite::Connection,
  uid: &str,
  cid: &str,
) -> rusqlite::Result<RawPresence> {
  conn.query_row(
    &format!("SELECT {PRESENCE_COLUMNS} FROM whoiswhere WHERE uid = ?1 AND cid = ?2"),
    rusqlite::params![uid, cid],
    read_presence_row,
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and all
/// access is serialized onto one connection worker.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Release the underlying connection. The store (and all clones of it)
  /// is unusable afterwards.
  pub async fn close(self) -> Result<()> {
    tracing::debug!("closing roster store");
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = Error;

  // ── Crew ──────────────────────────────────────────────────────────────────

  async fn add_crew_member(
    &self,
    id: &str,
    nickname: &str,
    grade: CrewGrade,
  ) -> Result<bool> {
    tracing::debug!("adding crew member {id} ({nickname}, {grade:?})");
    let member = CrewMember::new(id, nickname, grade, Utc::now());

    let id_str     = member.id;
    let nickname_s = member.nickname;
    let grade_code = member.grade.code();
    let at_str     = encode_dt(member.last_action_at);

    // Single-statement conditional insert: an existing record is left
    // untouched and reported through the affected-row count.
    let inserted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "INSERT INTO crew (id, nickname, grade, lastaction_ts)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT(id) DO NOTHING",
          rusqlite::params![id_str, nickname_s, grade_code, at_str],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(inserted)
  }

  async fn get_crew_member(&self, id: &str) -> Result<Option<CrewMember>> {
    tracing::debug!("get crew member {id}");
    let id_str = id.to_owned();

    let raw: Option<RawCrewMember> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, nickname, grade, lastaction_ts FROM crew WHERE id = ?1",
              rusqlite::params![id_str],
              read_crew_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCrewMember::into_crew_member).transpose()
  }

  async fn delete_crew_member(&self, id: &str) -> Result<bool> {
    tracing::debug!("deleting crew member {id}");
    let id_str = id.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM crew WHERE id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(deleted)
  }

  async fn is_crew_member(&self, id: &str) -> Result<bool> {
    tracing::debug!("is crew member {id}");
    let id_str = id.to_owned();

    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM crew WHERE id = ?1",
              rusqlite::params![id_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(exists)
  }

  async fn list_crew_members(&self) -> Result<Vec<CrewMember>> {
    tracing::debug!("listing all crew members");

    let raws: Vec<RawCrewMember> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, nickname, grade, lastaction_ts FROM crew")?;
        let rows = stmt
          .query_map([], read_crew_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCrewMember::into_crew_member).collect()
  }

  // ── Parties ───────────────────────────────────────────────────────────────

  async fn add_party(&self, id: &str) -> Result<bool> {
    tracing::debug!("adding party {id}");
    let party = Party::new(id, Utc::now());

    let id_str    = party.id;
    let status    = party.status.code();
    let timezone  = party.timezone;
    let locale    = party.locale;
    let charsets  = party.authorized_charsets;
    let languages = party.authorized_languages;
    let at_str    = encode_dt(party.last_action_at);

    let inserted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "INSERT INTO party
             (id, status, timezone, locale, authorized_charsets,
              authorized_languages, lastaction_ts)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
           ON CONFLICT(id) DO NOTHING",
          rusqlite::params![id_str, status, timezone, locale, charsets, languages, at_str],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(inserted)
  }

  async fn party_status(&self, id: &str) -> Result<Option<PartyStatus>> {
    tracing::debug!("get party {id} status");
    let id_str = id.to_owned();

    let code: Option<i64> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT status FROM party WHERE id = ?1",
              rusqlite::params![id_str],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(code.map(PartyStatus::from_code).transpose()?)
  }

  async fn get_party(&self, id: &str) -> Result<Option<Party>> {
    tracing::debug!("get party {id}");
    let id_str = id.to_owned();

    let raw: Option<RawParty> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, status, timezone, locale, authorized_charsets,
                      authorized_languages, lastaction_ts
               FROM party WHERE id = ?1",
              rusqlite::params![id_str],
              read_party_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawParty::into_party).transpose()
  }

  async fn delete_party(&self, id: &str) -> Result<bool> {
    tracing::debug!("deleting party {id}");
    let id_str = id.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM party WHERE id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(deleted)
  }

  async fn list_parties(&self) -> Result<Vec<Party>> {
    tracing::debug!("listing all parties");

    let raws: Vec<RawParty> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, status, timezone, locale, authorized_charsets,
                  authorized_languages, lastaction_ts
           FROM party",
        )?;
        let rows = stmt
          .query_map([], read_party_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawParty::into_party).collect()
  }

  // ── Presence ──────────────────────────────────────────────────────────────

  async fn upsert_presence(
    &self,
    user_id: &str,
    party_id: &str,
    update: PresenceUpdate,
  ) -> Result<Presence> {
    tracing::debug!("upserting presence of {user_id} in {party_id}");

    let uid     = user_id.to_owned();
    let cid     = party_id.to_owned();
    let now_str = encode_dt(Utc::now());

    let raw = self
      .conn
      .call(move |conn| {
        // firsttime_ts is only written on the insert arm; the conflict arm
        // leaves it as created.
        conn.execute(
          "INSERT INTO whoiswhere
             (uid, cid, firsttime_ts, lastaction_ts,
              adminstatus, joinstatus, mutestatus)
           VALUES (?1, ?2, ?3, ?3, ?4, ?5, ?6)
           ON CONFLICT(uid, cid) DO UPDATE SET
             adminstatus   = excluded.adminstatus,
             joinstatus    = excluded.joinstatus,
             mutestatus    = excluded.mutestatus,
             lastaction_ts = excluded.lastaction_ts",
          rusqlite::params![
            uid,
            cid,
            now_str,
            update.admin_status.code(),
            update.join_status.code(),
            update.mute_status.code(),
          ],
        )?;
        Ok(fetch_presence(conn, &uid, &cid)?)
      })
      .await?;

    raw.into_presence()
  }

  async fn touch_presence(&self, user_id: &str, party_id: &str) -> Result<Presence> {
    tracing::debug!("touching presence of {user_id} in {party_id}");

    let uid     = user_id.to_owned();
    let cid     = party_id.to_owned();
    let now_str = encode_dt(Utc::now());
    let unseen  = PresenceUpdate::default();

    let raw = self
      .conn
      .call(move |conn| {
        // The conflict arm refreshes lastaction_ts only; stored statuses
        // are never overwritten by a touch.
        conn.execute(
          "INSERT INTO whoiswhere
             (uid, cid, firsttime_ts, lastaction_ts,
              adminstatus, joinstatus, mutestatus)
           VALUES (?1, ?2, ?3, ?3, ?4, ?5, ?6)
           ON CONFLICT(uid, cid) DO UPDATE SET
             lastaction_ts = excluded.lastaction_ts",
          rusqlite::params![
            uid,
            cid,
            now_str,
            unseen.admin_status.code(),
            unseen.join_status.code(),
            unseen.mute_status.code(),
          ],
        )?;
        Ok(fetch_presence(conn, &uid, &cid)?)
      })
      .await?;

    raw.into_presence()
  }

  async fn presences_for_user(&self, user_id: &str) -> Result<Vec<Presence>> {
    tracing::debug!("listing presences of user {user_id}");
    let uid = user_id.to_owned();

    let raws: Vec<RawPresence> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PRESENCE_COLUMNS} FROM whoiswhere WHERE uid = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![uid], read_presence_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPresence::into_presence).collect()
  }

  async fn presences_for_party(&self, party_id: &str) -> Result<Vec<Presence>> {
    tracing::debug!("listing presences in party {party_id}");
    let cid = party_id.to_owned();

    let raws: Vec<RawPresence> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PRESENCE_COLUMNS} FROM whoiswhere WHERE cid = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![cid], read_presence_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPresence::into_presence).collect()
  }

  async fn delete_presence(&self, user_id: &str, party_id: &str) -> Result<bool> {
    tracing::debug!("deleting presence of {user_id} in {party_id}");

    let uid = user_id.to_owned();
    let cid = party_id.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM whoiswhere WHERE uid = ?1 AND cid = ?2",
          rusqlite::params![uid, cid],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(deleted)
  }
}
