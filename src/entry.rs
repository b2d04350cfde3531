use std::fmt;

/// MIME type a document provider reports for containers.
///
/// This is the default container sentinel; hosts plugging in a different
/// hierarchy override it with
/// [`WalkBuilder::directory_marker`](crate::WalkBuilder::directory_marker).
pub const DIRECTORY_MIME_TYPE: &str = "vnd.android.document/directory";

/// Opaque key addressing a node in the hierarchy.
///
/// Child identifiers are composed from their parent plus the child's display
/// name, so nothing is allocated independently of the walk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Compose the identifier of the child `name` under this node.
    ///
    /// A trailing `/` on the parent is not doubled, so `"/"` + `"etc"` is `"/etc"`.
    pub fn child(&self, name: &str) -> Self {
        let parent = self.0.strip_suffix('/').unwrap_or(&self.0);
        Self(format!("{parent}/{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for Identifier {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A raw row produced by a [`ChildProvider`](crate::ChildProvider) listing.
///
/// The walker only reads `name` and `type_marker`; `metadata` is handed to the
/// visitor untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child<M> {
    /// Display name of the child within its parent.
    pub name: String,

    /// Provider-reported type, e.g. a MIME type.
    pub type_marker: String,

    /// Provider-specific payload.
    pub metadata: M,
}

impl<M> Child<M> {
    pub fn new(name: impl Into<String>, type_marker: impl Into<String>, metadata: M) -> Self {
        Self {
            name: name.into(),
            type_marker: type_marker.into(),
            metadata,
        }
    }
}

impl Child<()> {
    /// A container row with no metadata, marked with [`DIRECTORY_MIME_TYPE`].
    pub fn dir(name: impl Into<String>) -> Self {
        Self::new(name, DIRECTORY_MIME_TYPE, ())
    }

    /// A leaf row with no metadata.
    pub fn file(name: impl Into<String>, type_marker: impl Into<String>) -> Self {
        Self::new(name, type_marker, ())
    }
}

/// One child discovered under a container, as seen by a [`Visitor`](crate::Visitor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<M> {
    /// Identifier composed from the parent's identifier and `name`.
    pub id: Identifier,

    /// The entry's name within its parent.
    pub name: String,

    /// Classified once, when the row was read.
    pub kind: EntryKind,

    /// The marker the provider reported, verbatim.
    pub type_marker: String,

    /// Depth of this entry. Children of the root are at depth 0.
    pub depth: usize,

    /// Provider metadata, passed through unchanged.
    pub metadata: M,
}

impl<M> Entry<M> {
    pub fn is_container(&self) -> bool {
        self.kind == EntryKind::Container
    }
}

/// Whether an entry can be descended into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// May have children (a directory).
    Container,

    /// Has no children of its own (a file).
    Leaf,
}

impl EntryKind {
    /// Only an exact match against `directory_marker` is a container.
    pub fn classify(type_marker: &str, directory_marker: &str) -> Self {
        if type_marker == directory_marker {
            Self::Container
        } else {
            Self::Leaf
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_ids_compose_parent_and_name() {
        let root = Identifier::from("primary:Android/data");
        assert_eq!(root.child("com.example").as_str(), "primary:Android/data/com.example");
        assert_eq!(Identifier::from("/").child("etc").as_str(), "/etc");
        assert_eq!(Identifier::from("a/").child("b").child("c").as_str(), "a/b/c");
    }

    #[test]
    fn classification_requires_exact_marker() {
        assert_eq!(EntryKind::classify(DIRECTORY_MIME_TYPE, DIRECTORY_MIME_TYPE), EntryKind::Container);
        for marker in [
            "",
            "text/plain",
            "vnd.android.document/directory ",
            "VND.ANDROID.DOCUMENT/DIRECTORY",
            "vnd.android.document/dir",
        ] {
            assert_eq!(EntryKind::classify(marker, DIRECTORY_MIME_TYPE), EntryKind::Leaf, "{marker:?}");
        }
    }

    #[test]
    fn custom_sentinel() {
        assert_eq!(EntryKind::classify("folder", "folder"), EntryKind::Container);
        assert_eq!(EntryKind::classify(DIRECTORY_MIME_TYPE, "folder"), EntryKind::Leaf);
    }
}
