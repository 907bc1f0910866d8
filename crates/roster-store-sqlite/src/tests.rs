//! Integration tests for `SqliteStore` against an in-memory database.

use roster_core::{
  crew::CrewGrade,
  party::PartyStatus,
  presence::{AdminStatus, JoinStatus, MuteStatus, PresenceUpdate},
  store::RosterStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Crew ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_crew_member() {
  let s = store().await;

  assert!(s.add_crew_member("u1", "Haddock", CrewGrade::Captain).await.unwrap());

  let member = s.get_crew_member("u1").await.unwrap().unwrap();
  assert_eq!(member.id, "u1");
  assert_eq!(member.nickname, "Haddock");
  assert_eq!(member.grade, CrewGrade::Captain);
}

#[tokio::test]
async fn get_crew_member_missing_returns_none() {
  let s = store().await;
  assert!(s.get_crew_member("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn add_crew_member_twice_keeps_first_record() {
  let s = store().await;

  assert!(s.add_crew_member("u1", "Haddock", CrewGrade::Captain).await.unwrap());
  assert!(!s.add_crew_member("u1", "Impostor", CrewGrade::Seaman).await.unwrap());

  // The second call must not have mutated anything.
  let member = s.get_crew_member("u1").await.unwrap().unwrap();
  assert_eq!(member.nickname, "Haddock");
  assert_eq!(member.grade, CrewGrade::Captain);
}

#[tokio::test]
async fn is_crew_member_tracks_add_and_delete() {
  let s = store().await;

  assert!(!s.is_crew_member("u1").await.unwrap());

  s.add_crew_member("u1", "Haddock", CrewGrade::Seaman).await.unwrap();
  assert!(s.is_crew_member("u1").await.unwrap());

  assert!(s.delete_crew_member("u1").await.unwrap());
  assert!(!s.is_crew_member("u1").await.unwrap());
}

#[tokio::test]
async fn delete_crew_member_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete_crew_member("nobody").await.unwrap());
}

#[tokio::test]
async fn list_crew_members_returns_each_exactly_once() {
  let s = store().await;

  s.add_crew_member("u1", "Haddock", CrewGrade::Captain).await.unwrap();
  s.add_crew_member("u2", "Nestor", CrewGrade::Bartender).await.unwrap();
  s.add_crew_member("u3", "Allan", CrewGrade::Seaman).await.unwrap();

  let mut ids: Vec<String> =
    s.list_crew_members().await.unwrap().into_iter().map(|m| m.id).collect();
  ids.sort();
  assert_eq!(ids, ["u1", "u2", "u3"]);
}

// ─── Parties ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_party_applies_defaults() {
  let s = store().await;

  assert!(s.add_party("chan-1").await.unwrap());

  let party = s.get_party("chan-1").await.unwrap().unwrap();
  assert_eq!(party.status, PartyStatus::Nonmanaged);
  assert_eq!(party.timezone, "UTC");
  assert_eq!(party.locale, "en");
  assert!(party.authorized_charsets.is_empty());
  assert!(party.authorized_languages.is_empty());
}

#[tokio::test]
async fn add_party_twice_returns_false() {
  let s = store().await;
  assert!(s.add_party("chan-1").await.unwrap());
  assert!(!s.add_party("chan-1").await.unwrap());
}

#[tokio::test]
async fn party_status_is_none_for_unknown_party() {
  let s = store().await;

  assert!(s.party_status("chan-1").await.unwrap().is_none());

  s.add_party("chan-1").await.unwrap();
  assert_eq!(
    s.party_status("chan-1").await.unwrap(),
    Some(PartyStatus::Nonmanaged)
  );
}

#[tokio::test]
async fn delete_party_missing_leaves_table_unchanged() {
  let s = store().await;
  s.add_party("chan-1").await.unwrap();

  assert!(!s.delete_party("chan-2").await.unwrap());
  assert_eq!(s.list_parties().await.unwrap().len(), 1);
}

#[tokio::test]
async fn list_parties_returns_each_exactly_once() {
  let s = store().await;

  s.add_party("p1").await.unwrap();
  s.add_party("p2").await.unwrap();
  s.add_party("p3").await.unwrap();

  let mut ids: Vec<String> =
    s.list_parties().await.unwrap().into_iter().map(|p| p.id).collect();
  ids.sort();
  assert_eq!(ids, ["p1", "p2", "p3"]);
}

// ─── Presence ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn touch_creates_row_with_unknown_statuses() {
  let s = store().await;
  s.add_party("chan-1").await.unwrap();

  let presence = s.touch_presence("u1", "chan-1").await.unwrap();
  assert_eq!(presence.user_id, "u1");
  assert_eq!(presence.party_id, "chan-1");
  assert_eq!(presence.admin_status, AdminStatus::Unknown);
  assert_eq!(presence.join_status, JoinStatus::Unknown);
  assert_eq!(presence.mute_status, MuteStatus::Unknown);
}

#[tokio::test]
async fn touch_does_not_alter_stored_statuses() {
  let s = store().await;
  s.add_party("chan-1").await.unwrap();

  s.upsert_presence("u1", "chan-1", PresenceUpdate {
    join_status:  JoinStatus::Member,
    admin_status: AdminStatus::Admin,
    mute_status:  MuteStatus::Speaks,
  })
  .await
  .unwrap();

  let touched = s.touch_presence("u1", "chan-1").await.unwrap();
  assert_eq!(touched.join_status, JoinStatus::Member);
  assert_eq!(touched.admin_status, AdminStatus::Admin);
  assert_eq!(touched.mute_status, MuteStatus::Speaks);
}

#[tokio::test]
async fn upsert_overwrites_in_place_without_duplicating() {
  let s = store().await;
  s.add_party("chan-1").await.unwrap();

  let first = s
    .upsert_presence("u1", "chan-1", PresenceUpdate {
      join_status: JoinStatus::Member,
      ..Default::default()
    })
    .await
    .unwrap();

  let second = s
    .upsert_presence("u1", "chan-1", PresenceUpdate {
      join_status: JoinStatus::Blocked,
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(second.join_status, JoinStatus::Blocked);
  // first_seen_at is set once at creation and survives the overwrite.
  assert_eq!(second.first_seen_at, first.first_seen_at);

  let rows = s.presences_for_party("chan-1").await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].join_status, JoinStatus::Blocked);
}

#[tokio::test]
async fn presence_rows_are_independent_per_user() {
  let s = store().await;
  s.add_party("chan-1").await.unwrap();

  // uids sharing a prefix must never match each other's rows.
  s.upsert_presence("alice", "chan-1", PresenceUpdate {
    join_status: JoinStatus::Member,
    ..Default::default()
  })
  .await
  .unwrap();
  s.upsert_presence("alice2", "chan-1", PresenceUpdate {
    join_status: JoinStatus::Pending,
    ..Default::default()
  })
  .await
  .unwrap();

  s.upsert_presence("alice2", "chan-1", PresenceUpdate {
    join_status: JoinStatus::Blocked,
    ..Default::default()
  })
  .await
  .unwrap();

  let rows = s.presences_for_party("chan-1").await.unwrap();
  assert_eq!(rows.len(), 2);

  let alice = rows.iter().find(|p| p.user_id == "alice").unwrap();
  let alice2 = rows.iter().find(|p| p.user_id == "alice2").unwrap();
  assert_eq!(alice.join_status, JoinStatus::Member);
  assert_eq!(alice2.join_status, JoinStatus::Blocked);
}

#[tokio::test]
async fn presences_for_user_spans_parties() {
  let s = store().await;
  s.add_party("chan-1").await.unwrap();
  s.add_party("chan-2").await.unwrap();

  s.touch_presence("u1", "chan-1").await.unwrap();
  s.touch_presence("u1", "chan-2").await.unwrap();
  s.touch_presence("u2", "chan-1").await.unwrap();

  let mut parties: Vec<String> = s
    .presences_for_user("u1")
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.party_id)
    .collect();
  parties.sort();
  assert_eq!(parties, ["chan-1", "chan-2"]);
}

#[tokio::test]
async fn presences_for_party_spans_users() {
  let s = store().await;
  s.add_party("chan-1").await.unwrap();
  s.add_party("chan-2").await.unwrap();

  s.touch_presence("u1", "chan-1").await.unwrap();
  s.touch_presence("u2", "chan-1").await.unwrap();
  s.touch_presence("u3", "chan-2").await.unwrap();

  let mut users: Vec<String> = s
    .presences_for_party("chan-1")
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.user_id)
    .collect();
  users.sort();
  assert_eq!(users, ["u1", "u2"]);
}

#[tokio::test]
async fn delete_presence_removes_only_the_exact_pair() {
  let s = store().await;
  s.add_party("chan-1").await.unwrap();
  s.add_party("chan-2").await.unwrap();

  s.touch_presence("u1", "chan-1").await.unwrap();
  s.touch_presence("u1", "chan-2").await.unwrap();
  s.touch_presence("u2", "chan-1").await.unwrap();

  assert!(s.delete_presence("u1", "chan-1").await.unwrap());
  assert!(!s.delete_presence("u1", "chan-1").await.unwrap());

  let remaining = s.presences_for_user("u1").await.unwrap();
  assert_eq!(remaining.len(), 1);
  assert_eq!(remaining[0].party_id, "chan-2");
  assert_eq!(s.presences_for_party("chan-1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_a_party_cascades_to_its_presences() {
  let s = store().await;
  s.add_party("chan-1").await.unwrap();
  s.add_party("chan-2").await.unwrap();

  s.touch_presence("u1", "chan-1").await.unwrap();
  s.touch_presence("u1", "chan-2").await.unwrap();

  assert!(s.delete_party("chan-1").await.unwrap());

  let remaining = s.presences_for_user("u1").await.unwrap();
  assert_eq!(remaining.len(), 1);
  assert_eq!(remaining[0].party_id, "chan-2");
}

#[tokio::test]
async fn presence_requires_an_existing_party() {
  let s = store().await;

  // cid is a foreign key into party; observing a user in an untracked
  // channel is a backing-store fault, not a silent insert.
  assert!(s.touch_presence("u1", "nowhere").await.is_err());
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn close_releases_the_store() {
  let s = store().await;
  s.add_party("chan-1").await.unwrap();
  s.close().await.unwrap();
}

#[tokio::test]
async fn open_is_idempotent_on_an_existing_file() {
  let dir = std::env::temp_dir().join(format!("roster-test-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("roster.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.add_crew_member("u1", "Haddock", CrewGrade::Director).await.unwrap();
    s.close().await.unwrap();
  }

  // Re-opening runs the schema DDL again and must not clobber data.
  let s = SqliteStore::open(&path).await.unwrap();
  let member = s.get_crew_member("u1").await.unwrap().unwrap();
  assert_eq!(member.grade, CrewGrade::Director);
  s.close().await.unwrap();

  std::fs::remove_dir_all(&dir).ok();
}
