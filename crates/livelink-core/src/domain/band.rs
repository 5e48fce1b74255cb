use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::BandId;

/// La banda: dueña de canciones y lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
  pub id: BandId,
  pub name: String,
  pub description: Option<String>,
  pub avatar_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
