use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(Uuid);

    impl $name {
      /// Genera un nuevo identificador único.
      pub fn new() -> Self {
        $name(Uuid::new_v4())
      }

      pub fn from_uuid(u: Uuid) -> Self {
        $name(u)
      }

      pub fn as_uuid(&self) -> Uuid {
        self.0
      }
    }

    impl Default for $name {
      fn default() -> Self {
        Self::new()
      }
    }

    impl From<Uuid> for $name {
      fn from(u: Uuid) -> Self {
        $name(u)
      }
    }

    impl From<$name> for Uuid {
      fn from(id: $name) -> Self {
        id.0
      }
    }

    impl FromStr for $name {
      type Err = uuid::Error;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map($name)
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
      }
    }
  };
}

entity_id! {
  /// Identificador de la banda dueña de canciones y lives.
  BandId
}

entity_id! {
  SongId
}

entity_id! {
  /// Identificador de un evento en vivo (`Live`).
  LiveId
}

entity_id! {
  /// Identificador de una fila de setlist.
  ///
  /// Los items provisionales (optimistas) también reciben uno de estos, generado
  /// localmente con UUID v4, así que nunca colisionan con los del backend.
  SetlistItemId
}
