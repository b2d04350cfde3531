use crate::entry::{Child, Entry, Identifier};
use crate::error::WalkError;

/// A lazily consumed listing of one container's children.
///
/// Holding the listing is holding the provider's query handle: the engine
/// opens it right after announcing a level and drops it right before
/// announcing that the level is left, whichever way the level ends.
pub type Listing<'a, M> = Box<dyn Iterator<Item = Result<Child<M>, WalkError>> + 'a>;

/// The capability to list the ordered children of a node.
///
/// Implement this to walk any hierarchy addressed by path-like identifiers —
/// a document provider, a local directory, an object store prefix, or an
/// in-memory tree.
///
/// # Error Handling
///
/// Fail the whole call when the node cannot be listed at all (deleted,
/// permission revoked). Yield `Err` items for individual unreadable rows.
/// What happens next is the caller's [`ErrorPolicy`](crate::ErrorPolicy).
/// Errors that are not provider failures (see
/// [`WalkError::is_provider_failure`]) are never absorbed: the walk closes
/// its open levels and returns them.
///
/// # Example
///
/// ```rust
/// use docwalk::{Child, ChildProvider, Identifier, Listing, WalkError};
///
/// struct Flat(Vec<&'static str>);
///
/// impl ChildProvider for Flat {
///     type Metadata = ();
///
///     fn list_children(&self, _id: &Identifier) -> Result<Listing<'_, ()>, WalkError> {
///         Ok(Box::new(self.0.iter().map(|name| Ok(Child::file(*name, "text/plain")))))
///     }
/// }
/// ```
pub trait ChildProvider {
    /// Payload passed through to [`Entry::metadata`].
    type Metadata;

    /// List the children of `id`, in the order they should be visited.
    fn list_children(&self, id: &Identifier) -> Result<Listing<'_, Self::Metadata>, WalkError>;
}

impl<P: ChildProvider + ?Sized> ChildProvider for &P {
    type Metadata = P::Metadata;

    fn list_children(&self, id: &Identifier) -> Result<Listing<'_, Self::Metadata>, WalkError> {
        (**self).list_children(id)
    }
}

impl<P: ChildProvider + ?Sized> ChildProvider for Box<P> {
    type Metadata = P::Metadata;

    fn list_children(&self, id: &Identifier) -> Result<Listing<'_, Self::Metadata>, WalkError> {
        (**self).list_children(id)
    }
}

/// Direction of a [`LevelChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// About to list a container's children.
    Enter,

    /// Done with a container's children, normally or not.
    Leave,
}

/// Notification that the walk opened or closed a container level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange<'a> {
    pub direction: Direction,

    /// The container whose children the level holds.
    pub id: &'a Identifier,

    /// Depth of the entries inside this level. The root level is 0.
    pub depth: usize,
}

impl LevelChange<'_> {
    /// `+1` when entering, `-1` when leaving.
    pub fn delta(&self) -> i32 {
        match self.direction {
            Direction::Enter => 1,
            Direction::Leave => -1,
        }
    }
}

/// What a [`Visitor`] wants after seeing an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,

    /// Abort the entire walk, not just the current level.
    Stop,
}

impl From<bool> for Control {
    /// `true` requests a stop.
    fn from(stop: bool) -> Self {
        if stop {
            Self::Stop
        } else {
            Self::Continue
        }
    }
}

/// Receives the two event streams of a walk.
///
/// Calls are strictly ordered and never concurrent. Returning `Err` from
/// either method aborts the walk at once; no further notifications follow,
/// including the `Leave` of levels that are still open.
pub trait Visitor<M> {
    /// Called once with `Enter` before a container is listed and once with
    /// `Leave` after its last child, even if the walk is stopping.
    fn on_level_change(&mut self, change: LevelChange<'_>) -> Result<(), WalkError>;

    /// Called once per child in listing order, containers and leaves alike.
    fn on_entry(&mut self, entry: &Entry<M>) -> Result<Control, WalkError>;
}

impl<M, V: Visitor<M> + ?Sized> Visitor<M> for &mut V {
    fn on_level_change(&mut self, change: LevelChange<'_>) -> Result<(), WalkError> {
        (**self).on_level_change(change)
    }

    fn on_entry(&mut self, entry: &Entry<M>) -> Result<Control, WalkError> {
        (**self).on_entry(entry)
    }
}

/// A [`Visitor`] built from two closures.
///
/// `on_entry` returns `true` to stop the walk.
pub struct FnVisitor<L, E> {
    on_level_change: L,
    on_entry: E,
}

impl<L, E> FnVisitor<L, E> {
    pub fn new(on_level_change: L, on_entry: E) -> Self {
        Self {
            on_level_change,
            on_entry,
        }
    }
}

impl<M, L, E> Visitor<M> for FnVisitor<L, E>
where
    L: FnMut(LevelChange<'_>),
    E: FnMut(&Entry<M>) -> bool,
{
    fn on_level_change(&mut self, change: LevelChange<'_>) -> Result<(), WalkError> {
        (self.on_level_change)(change);
        Ok(())
    }

    fn on_entry(&mut self, entry: &Entry<M>) -> Result<Control, WalkError> {
        Ok(Control::from((self.on_entry)(entry)))
    }
}
