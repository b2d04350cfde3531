use std::collections::{HashMap, HashSet};

use crate::entry::{Child, Identifier};
use crate::error::WalkError;
use crate::traits::{ChildProvider, Listing};

/// A hierarchy held in memory, keyed by container identifier.
///
/// Listing an identifier that was never registered fails with
/// [`WalkError::NotFound`], the same way a deleted document would.
#[derive(Debug, Clone)]
pub struct MemoryProvider<M> {
    listings: HashMap<Identifier, Vec<Option<Child<M>>>>,
    failing:  HashSet<Identifier>,
}

impl<M> Default for MemoryProvider<M> {
    fn default() -> Self {
        Self {
            listings: HashMap::new(),
            failing:  HashSet::new(),
        }
    }
}

impl<M> MemoryProvider<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `children` to the listing of `id`.
    pub fn insert(&mut self, id: impl Into<Identifier>, children: impl IntoIterator<Item = Child<M>>) {
        self.listings
            .entry(id.into())
            .or_default()
            .extend(children.into_iter().map(Some));
    }

    pub fn with_children(
        mut self,
        id: impl Into<Identifier>,
        children: impl IntoIterator<Item = Child<M>>,
    ) -> Self {
        self.insert(id, children);
        self
    }

    /// Make every listing of `id` fail outright.
    pub fn fail_listing(mut self, id: impl Into<Identifier>) -> Self {
        self.failing.insert(id.into());
        self
    }

    /// Append a row to the listing of `id` that fails when read.
    pub fn with_unreadable_row(mut self, id: impl Into<Identifier>) -> Self {
        self.listings.entry(id.into()).or_default().push(None);
        self
    }
}

impl<M: Clone> ChildProvider for MemoryProvider<M> {
    type Metadata = M;

    fn list_children(&self, id: &Identifier) -> Result<Listing<'_, M>, WalkError> {
        if self.failing.contains(id) {
            return Err(WalkError::Provider {
                id: id.clone(),
                message: "listing unavailable".into(),
            });
        }
        let rows = self
            .listings
            .get(id)
            .ok_or_else(|| WalkError::NotFound(id.clone()))?;

        let id = id.clone();
        Ok(Box::new(rows.iter().map(move |row| {
            row.clone().ok_or_else(|| WalkError::Provider {
                id: id.clone(),
                message: "unreadable row".into(),
            })
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_in_insertion_order() {
        let provider = MemoryProvider::new()
            .with_children("r", vec![Child::file("b", "text/plain"), Child::dir("a")])
            .with_children("r", vec![Child::file("c", "text/plain")]);

        let names: Vec<_> = provider
            .list_children(&"r".into())
            .unwrap()
            .map(|c| c.unwrap().name)
            .collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let provider = MemoryProvider::<()>::new();
        let err = provider.list_children(&"gone".into()).err().unwrap();
        assert!(matches!(err, WalkError::NotFound(id) if id.as_str() == "gone"));
    }

    #[test]
    fn injected_failures() {
        let provider = MemoryProvider::new()
            .with_children("r", vec![Child::dir("a")])
            .with_unreadable_row("r")
            .fail_listing("x");

        assert!(provider.list_children(&"x".into()).is_err());

        let rows: Vec<_> = provider.list_children(&"r".into()).unwrap().collect();
        assert!(rows[0].is_ok());
        assert!(matches!(rows[1], Err(WalkError::Provider { .. })));
    }
}
