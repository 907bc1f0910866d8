//! Error types for `roster-core`.
//!
//! Absence is not an error anywhere in this workspace: lookups return
//! `Option`, conditional writes return `bool`. The variants below are the
//! genuine faults — stored discriminants the current code does not know.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown crew grade code: {0}")]
  UnknownCrewGrade(i64),

  #[error("unknown party status code: {0}")]
  UnknownPartyStatus(i64),

  #[error("unknown admin status code: {0}")]
  UnknownAdminStatus(i64),

  #[error("unknown join status code: {0}")]
  UnknownJoinStatus(i64),

  #[error("unknown mute status code: {0}")]
  UnknownMuteStatus(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
