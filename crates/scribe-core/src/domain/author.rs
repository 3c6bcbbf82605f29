use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Polymorphic author reference: which host entity kind, and which row.
///
/// The module never dereferences this itself; the host's author directory
/// resolves it to a profile on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorRef {
    pub kind: String,
    pub id: Uuid,
}

impl AuthorRef {
    pub fn new(kind: impl Into<String>, id: Uuid) -> Self {
        Self {
            kind: kind.into(),
            id,
        }
    }
}

/// Attribute bag a host exposes for one author entity.
///
/// The display-name capability is whichever attribute the configuration
/// names; author kinds stay pluggable because the module only ever reads
/// attributes by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorProfile {
    attributes: HashMap<String, String>,
}

impl AuthorProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
