use std::time::Instant;

use tracing::{debug, instrument, trace, warn};

use crate::entry::{Entry, EntryKind, Identifier, DIRECTORY_MIME_TYPE};
use crate::error::WalkError;
use crate::results::{Results, WalkStats};
use crate::traits::{ChildProvider, Control, Direction, LevelChange, Listing, Visitor};

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// What to do when a [`ChildProvider`] fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Treat a failed listing as a container with no children, and skip a
    /// failed row. The walk carries on with siblings and ancestors.
    #[default]
    Absorb,

    /// Close every open level, then return the failure to the caller.
    Propagate,
}

/// Traversal parameters passed from the builder to the engine.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Type marker that makes an entry a container.
    pub directory_marker: String,
    pub error_policy:     ErrorPolicy,
    pub collect_errors:   bool,
    /// Deepest level to enter. Containers below it are visited, not expanded.
    pub max_depth:        Option<usize>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            directory_marker: DIRECTORY_MIME_TYPE.to_owned(),
            error_policy:     ErrorPolicy::Absorb,
            collect_errors:   false,
            max_depth:        None,
        }
    }
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Why the walk loop bailed out.
enum Halt {
    /// A visitor call failed. Nothing else may be sent to the visitor.
    Callback(WalkError),

    /// A provider fault that is not absorbed. Open levels still get closed.
    Provider(WalkError),
}

/// One open level on the work stack.
struct Frame<'p, M> {
    id:      Identifier,
    depth:   usize,
    listing: Option<Listing<'p, M>>,
}

struct Walk<'p, P: ChildProvider + ?Sized> {
    provider: &'p P,
    config:   &'p WalkConfig,
    entries:  usize,
    stats:    WalkStats,
    errors:   Vec<WalkError>,
}

/// Walk everything below `root`, depth-first and pre-order.
///
/// The work stack replaces recursion, so depth is bounded by memory rather
/// than by the call stack. Called by `WalkBuilder::run()` after validating
/// the configuration.
#[instrument(skip_all, fields(root = %root))]
pub(crate) fn run<P, V>(
    provider: &P,
    root: Identifier,
    config: &WalkConfig,
    visitor: &mut V,
) -> Result<Results, WalkError>
where
    P: ChildProvider + ?Sized,
    V: Visitor<P::Metadata> + ?Sized,
{
    let start = Instant::now();
    let mut walk = Walk {
        provider,
        config,
        entries: 0,
        stats:   WalkStats::default(),
        errors:  Vec::new(),
    };
    let mut stack = Vec::new();

    let stopped = match walk.drive(root, &mut stack, visitor) {
        Ok(stopped)              => stopped,
        Err(Halt::Callback(err)) => return Err(err),
        Err(Halt::Provider(err)) => {
            walk.unwind(&mut stack, visitor).map_err(into_error)?;
            return Err(err);
        }
    };
    if stopped {
        debug!(open_levels = stack.len(), "walk stopped by visitor");
        walk.unwind(&mut stack, visitor).map_err(into_error)?;
    }

    walk.stats.duration = start.elapsed();
    debug!(
        entries = walk.entries,
        containers = walk.stats.containers,
        "walk finished"
    );

    Ok(Results {
        entries: walk.entries,
        stopped,
        errors: walk.errors,
        stats: walk.stats,
    })
}

fn into_error(halt: Halt) -> WalkError {
    match halt {
        Halt::Callback(err) | Halt::Provider(err) => err,
    }
}

impl<'p, P: ChildProvider + ?Sized> Walk<'p, P> {
    /// Run the loop until the stack is empty or the visitor stops.
    /// Returns `true` on a stop, with the open levels left on `stack`.
    fn drive<V>(
        &mut self,
        root: Identifier,
        stack: &mut Vec<Frame<'p, P::Metadata>>,
        visitor: &mut V,
    ) -> Result<bool, Halt>
    where
        V: Visitor<P::Metadata> + ?Sized,
    {
        self.enter(root, 0, stack, visitor)?;

        while let Some(frame) = stack.last_mut() {
            let depth = frame.depth;
            let row = match frame.listing.as_mut().and_then(Iterator::next) {
                Some(Ok(row))  => row,
                Some(Err(err)) => {
                    self.absorb(err)?;
                    continue;
                }
                None => {
                    if let Some(frame) = stack.pop() {
                        self.leave(frame, visitor)?;
                    }
                    continue;
                }
            };

            let entry = Entry {
                id:          frame.id.child(&row.name),
                kind:        EntryKind::classify(&row.type_marker, &self.config.directory_marker),
                name:        row.name,
                type_marker: row.type_marker,
                depth,
                metadata:    row.metadata,
            };
            self.entries += 1;
            if entry.kind == EntryKind::Leaf {
                self.stats.leaves += 1;
            }
            trace!(id = %entry.id, kind = ?entry.kind, "entry");

            if visitor.on_entry(&entry).map_err(Halt::Callback)? == Control::Stop {
                return Ok(true);
            }

            if entry.kind == EntryKind::Container && self.may_enter(depth + 1) {
                self.enter(entry.id, depth + 1, stack, visitor)?;
            }
        }

        Ok(false)
    }

    fn may_enter(&self, depth: usize) -> bool {
        self.config.max_depth.map_or(true, |max| depth <= max)
    }

    /// Announce the level, then open its listing.
    ///
    /// The frame is pushed even when the listing fails, so that every
    /// `Enter` that was sent has a frame waiting to send its `Leave`.
    fn enter<V>(
        &mut self,
        id: Identifier,
        depth: usize,
        stack: &mut Vec<Frame<'p, P::Metadata>>,
        visitor: &mut V,
    ) -> Result<(), Halt>
    where
        V: Visitor<P::Metadata> + ?Sized,
    {
        visitor
            .on_level_change(LevelChange {
                direction: Direction::Enter,
                id: &id,
                depth,
            })
            .map_err(Halt::Callback)?;
        debug!(%id, depth, "enter level");

        self.stats.containers += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let listing = self.provider.list_children(&id);
        stack.push(Frame {
            id,
            depth,
            listing: None,
        });

        match listing {
            Ok(listing) => {
                if let Some(frame) = stack.last_mut() {
                    frame.listing = Some(listing);
                }
                Ok(())
            }
            Err(err) => self.absorb(err),
        }
    }

    /// Release the frame's listing, then announce the level is left.
    fn leave<V>(&mut self, frame: Frame<'p, P::Metadata>, visitor: &mut V) -> Result<(), Halt>
    where
        V: Visitor<P::Metadata> + ?Sized,
    {
        let Frame { id, depth, listing } = frame;
        drop(listing);
        debug!(%id, depth, "leave level");
        visitor
            .on_level_change(LevelChange {
                direction: Direction::Leave,
                id: &id,
                depth,
            })
            .map_err(Halt::Callback)
    }

    /// Close every open level, innermost first.
    fn unwind<V>(
        &mut self,
        stack: &mut Vec<Frame<'p, P::Metadata>>,
        visitor: &mut V,
    ) -> Result<(), Halt>
    where
        V: Visitor<P::Metadata> + ?Sized,
    {
        while let Some(frame) = stack.pop() {
            self.leave(frame, visitor)?;
        }
        Ok(())
    }

    /// Apply the [`ErrorPolicy`] to an error raised by the provider.
    ///
    /// Errors that are not provider failures are never absorbed, but the
    /// open levels are still closed before they reach the caller.
    fn absorb(&mut self, err: WalkError) -> Result<(), Halt> {
        if !err.is_provider_failure() || self.config.error_policy == ErrorPolicy::Propagate {
            return Err(Halt::Provider(err));
        }

        warn!(error = %err, "provider failure absorbed");
        if self.config.collect_errors {
            self.errors.push(err);
        }
        Ok(())
    }
}
