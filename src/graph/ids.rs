use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How fresh node and edge identifiers are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// Random v4 UUIDs.
    #[default]
    Uuid,
    /// A per-canvas monotonic counter (`node-1`, `node-2`, ...).
    Sequential,
}

/// Produces candidate identifiers. Uniqueness against existing ids is
/// checked by the canvas on insert.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    scheme: IdScheme,
    counter: u64,
}

impl IdGenerator {
    pub fn new(scheme: IdScheme) -> Self {
        Self { scheme, counter: 0 }
    }

    pub fn scheme(&self) -> IdScheme {
        self.scheme
    }

    pub fn next_id(&mut self, prefix: &str) -> String {
        match self.scheme {
            IdScheme::Uuid => format!("{}-{}", prefix, Uuid::new_v4()),
            IdScheme::Sequential => {
                self.counter += 1;
                format!("{}-{}", prefix, self.counter)
            }
        }
    }
}
