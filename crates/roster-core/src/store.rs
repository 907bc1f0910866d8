//! The `RosterStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `roster-store-sqlite`). The bot-command layer depends on this
//! abstraction, not on any concrete backend.
//!
//! Absence and presence are normal results here: lookups return `Option`,
//! conditional writes return `bool` (`true` = the write happened). Only
//! backing-store faults surface through `Self::Error`.

use std::future::Future;

use crate::{
  crew::{CrewGrade, CrewMember},
  party::{Party, PartyStatus},
  presence::{Presence, PresenceUpdate},
};

/// Abstraction over a roster store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Crew ──────────────────────────────────────────────────────────────

  /// Insert a new crew member if none exists for `id`.
  ///
  /// Returns `false` when a record was already present, in which case
  /// nothing — not even the nickname or grade — is changed.
  fn add_crew_member<'a>(
    &'a self,
    id: &'a str,
    nickname: &'a str,
    grade: CrewGrade,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Retrieve a crew member by id. Returns `None` if not found.
  fn get_crew_member<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<CrewMember>, Self::Error>> + Send + 'a;

  /// Remove the crew member with exactly this id.
  /// Returns whether a record was removed.
  fn delete_crew_member<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Existence check for a crew member.
  fn is_crew_member<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// All crew members; order unspecified.
  fn list_crew_members(
    &self,
  ) -> impl Future<Output = Result<Vec<CrewMember>, Self::Error>> + Send + '_;

  // ── Parties ───────────────────────────────────────────────────────────

  /// Insert a new party with default settings if none exists for `id`.
  /// Returns whether an insertion occurred.
  fn add_party<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// The party's management status, or `None` if the party is unknown.
  fn party_status<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<PartyStatus>, Self::Error>> + Send + 'a;

  /// Retrieve a full party record. Returns `None` if not found.
  fn get_party<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Party>, Self::Error>> + Send + 'a;

  /// Remove the party with exactly this id.
  /// Returns whether a record was removed.
  fn delete_party<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// All parties; order unspecified.
  fn list_parties(
    &self,
  ) -> impl Future<Output = Result<Vec<Party>, Self::Error>> + Send + '_;

  // ── Presence ──────────────────────────────────────────────────────────

  /// Upsert the presence row for `(user_id, party_id)`.
  ///
  /// Creates the row with store-assigned timestamps if absent; otherwise
  /// overwrites the three status fields in place and refreshes
  /// `last_action_at`, leaving `first_seen_at` untouched. Never reports a
  /// no-op. Returns the stored row.
  fn upsert_presence<'a>(
    &'a self,
    user_id: &'a str,
    party_id: &'a str,
    update: PresenceUpdate,
  ) -> impl Future<Output = Result<Presence, Self::Error>> + Send + 'a;

  /// Lightweight "user was seen" signal.
  ///
  /// Creates the row with all-unknown statuses if absent; otherwise only
  /// refreshes `last_action_at`, leaving the stored statuses untouched.
  fn touch_presence<'a>(
    &'a self,
    user_id: &'a str,
    party_id: &'a str,
  ) -> impl Future<Output = Result<Presence, Self::Error>> + Send + 'a;

  /// All presence rows for one user, across parties.
  fn presences_for_user<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Presence>, Self::Error>> + Send + 'a;

  /// All presence rows for one party, across users.
  fn presences_for_party<'a>(
    &'a self,
    party_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Presence>, Self::Error>> + Send + 'a;

  /// Remove the presence row for exactly `(user_id, party_id)`.
  /// Returns whether a row was removed.
  fn delete_presence<'a>(
    &'a self,
    user_id: &'a str,
    party_id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
