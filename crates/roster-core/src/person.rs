//! The person shape shared by roster identities.
//!
//! A person is an externally-identified user: a stable opaque `id`, a
//! mutable display `nickname`, and a last-action timestamp refreshed on
//! every mutation. There is no `Person` table — the shape is embedded in
//! each concrete record kind ([`Guest`], [`CrewMember`](crate::crew::CrewMember)).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A non-privileged identity known to the bot.
///
/// The table exists from day one so guests can accumulate history, but no
/// store operations are defined over it yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
  pub id:             String,
  pub nickname:       String,
  pub last_action_at: DateTime<Utc>,
}
