//! Todo list aggregate.

use super::{Description, ListId, Name};

/// A named collection of parent tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    id: ListId,
    name: Name,
    description: Description,
}

impl TodoList {
    /// Creates a new list with a fresh identifier.
    #[must_use]
    pub fn new(name: Name, description: Description) -> Self {
        Self {
            id: ListId::new(),
            name,
            description,
        }
    }

    /// Reconstructs a list from persisted storage.
    #[must_use]
    pub fn from_persisted(id: ListId, name: Name, description: Description) -> Self {
        Self {
            id,
            name,
            description,
        }
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns the list name.
    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the list description.
    #[must_use]
    pub const fn description(&self) -> &Description {
        &self.description
    }
}
