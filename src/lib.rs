//! # docwalk
//!
//! Depth-first walker for document-provider hierarchies.
//!
//! docwalk owns the traversal: given a root identifier and a capability to
//! list the children of any identifier ([`ChildProvider`]), it visits every
//! descendant in pre-order and tells a [`Visitor`] when each container level
//! opens and closes. A visitor can stop the whole walk from any entry. How
//! children are fetched and what is done with them belongs to the caller.
//!
//! # Quick Start
//!
//! ```rust
//! use docwalk::providers::MemoryProvider;
//! use docwalk::Child;
//!
//! let provider = MemoryProvider::new()
//!     .with_children("root", vec![Child::dir("A"), Child::file("B", "text/plain")])
//!     .with_children("root/A", vec![Child::file("C", "text/plain")]);
//!
//! let mut events = Vec::new();
//! let mut names = Vec::new();
//! let results = docwalk::walk_fn(
//!     &provider,
//!     "root",
//!     |delta| events.push(delta),
//!     |entry| {
//!         names.push(entry.name.clone());
//!         false
//!     },
//! )
//! .unwrap();
//!
//! assert_eq!(names, ["A", "C", "B"]);
//! assert_eq!(events, [1, 1, -1, -1]);
//! assert_eq!(results.stats.containers, 2);
//! ```
//!
//! # Visitors
//!
//! Implement [`Visitor`] for anything richer than two closures. Level changes
//! carry their depth, so an indented listing needs no counter of its own:
//!
//! ```rust
//! use docwalk::{Control, Entry, LevelChange, Visitor, WalkError};
//!
//! struct Outline(String);
//!
//! impl<M> Visitor<M> for Outline {
//!     fn on_level_change(&mut self, _change: LevelChange<'_>) -> Result<(), WalkError> {
//!         Ok(())
//!     }
//!
//!     fn on_entry(&mut self, entry: &Entry<M>) -> Result<Control, WalkError> {
//!         let indent = " ".repeat(entry.depth * 4);
//!         self.0.push_str(&format!("> {indent}{} ({})\n", entry.name, entry.type_marker));
//!         Ok(Control::Continue)
//!     }
//! }
//! ```

#![forbid(unsafe_code)]

pub mod engine;
pub mod providers;

mod builder;
mod entry;
mod error;
mod results;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::WalkBuilder;
pub use engine::ErrorPolicy;
pub use entry::{Child, Entry, EntryKind, Identifier, DIRECTORY_MIME_TYPE};
pub use error::WalkError;
pub use results::{Results, WalkStats};
pub use traits::{ChildProvider, Control, Direction, FnVisitor, LevelChange, Listing, Visitor};

// ── Entry points ──────────────────────────────────────────────────────────────

/// Create a new [`WalkBuilder`] to configure and run a walk.
///
/// # Example
///
/// ```rust
/// use docwalk::providers::MemoryProvider;
/// use docwalk::{Child, Entry, ErrorPolicy, FnVisitor, LevelChange};
///
/// let provider = MemoryProvider::new().with_children("root", vec![Child::dir("gone")]);
///
/// let mut visitor = FnVisitor::new(|_: LevelChange<'_>| {}, |_: &Entry<()>| false);
/// let err = docwalk::walk()
///     .on_provider_error(ErrorPolicy::Propagate)
///     .run(&provider, "root", &mut visitor)
///     .unwrap_err();
///
/// assert_eq!(err.id().unwrap().as_str(), "root/gone");
/// ```
pub fn walk() -> WalkBuilder {
    WalkBuilder::default()
}

/// Walk with the default configuration, reporting through two closures.
///
/// `on_level_change` receives `+1` before a container is listed and `-1`
/// after it is done. `on_entry` sees every child in listing order and
/// returns `true` to stop the entire walk.
pub fn walk_fn<P, L, E>(
    provider: &P,
    root: impl Into<Identifier>,
    mut on_level_change: L,
    on_entry: E,
) -> Result<Results, WalkError>
where
    P: ChildProvider + ?Sized,
    L: FnMut(i32),
    E: FnMut(&Entry<P::Metadata>) -> bool,
{
    let mut visitor = FnVisitor::new(
        move |change: LevelChange<'_>| on_level_change(change.delta()),
        on_entry,
    );
    walk().run(provider, root, &mut visitor)
}
