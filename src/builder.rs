use crate::engine::{run, ErrorPolicy, WalkConfig};
use crate::entry::Identifier;
use crate::error::WalkError;
use crate::results::Results;
use crate::traits::{ChildProvider, Visitor};

// ---------------------------------------------------------------------------
// WalkBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a walk.
///
/// Created via [`docwalk::walk()`](crate::walk). Configure with chained
/// builder methods, then call [`run()`](WalkBuilder::run). A builder can be
/// run any number of times; every run is independent.
///
/// # Example
///
/// ```rust,ignore
/// let results = docwalk::walk()
///     .directory_marker("inode/directory")
///     .on_provider_error(ErrorPolicy::Propagate)
///     .run(&provider, "root", &mut visitor)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct WalkBuilder {
    config: WalkConfig,
}

impl WalkBuilder {
    // ── Classification ────────────────────────────────────────────────────

    /// Type marker identifying containers. Only an exact match descends.
    ///
    /// Defaults to [`DIRECTORY_MIME_TYPE`](crate::DIRECTORY_MIME_TYPE).
    pub fn directory_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.directory_marker = marker.into();
        self
    }

    // ── Errors ────────────────────────────────────────────────────────────

    /// How provider failures are handled. [`ErrorPolicy::Absorb`] by default.
    pub fn on_provider_error(mut self, policy: ErrorPolicy) -> Self {
        self.config.error_policy = policy;
        self
    }

    /// Collect absorbed provider failures into [`Results::errors`].
    ///
    /// Disabled by default. Absorbed failures are logged either way.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.config.collect_errors = yes;
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Deepest level to enter. `0` lists the root only, `1` also lists the
    /// root's containers, and so on. Unlimited by default.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = Some(depth);
        self
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Walk the hierarchy below `root`, feeding `visitor`.
    ///
    /// `root` must denote a container; that is not checked.
    ///
    /// # Errors
    ///
    /// Returns `Err` for an invalid configuration, for any error a visitor
    /// returns, and for provider failures under [`ErrorPolicy::Propagate`].
    pub fn run<P, V>(
        &self,
        provider: &P,
        root: impl Into<Identifier>,
        visitor: &mut V,
    ) -> Result<Results, WalkError>
    where
        P: ChildProvider + ?Sized,
        V: Visitor<P::Metadata> + ?Sized,
    {
        if self.config.directory_marker.is_empty() {
            return Err(WalkError::InvalidConfig(
                "directory marker must not be empty".into(),
            ));
        }

        run(provider, root.into(), &self.config, visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MemoryProvider;
    use crate::traits::{FnVisitor, LevelChange};
    use crate::{Child, Entry};

    #[test]
    fn rejects_empty_marker() {
        let provider = MemoryProvider::<()>::new();
        let mut visitor = FnVisitor::new(|_: LevelChange<'_>| {}, |_: &Entry<()>| false);
        let err = WalkBuilder::default()
            .directory_marker("")
            .run(&provider, "root", &mut visitor)
            .unwrap_err();
        assert!(matches!(err, WalkError::InvalidConfig(_)));
    }

    #[test]
    fn custom_marker_controls_descent() {
        let provider = MemoryProvider::new()
            .with_children("root", vec![Child::file("sub", "folder")])
            .with_children("root/sub", vec![Child::file("inner.txt", "text/plain")]);

        let mut names = Vec::new();
        let mut visitor = FnVisitor::new(|_: LevelChange<'_>| {}, |e: &Entry<()>| {
            names.push(e.name.clone());
            false
        });
        WalkBuilder::default()
            .directory_marker("folder")
            .run(&provider, "root", &mut visitor)
            .unwrap();
        drop(visitor);

        assert_eq!(names, ["sub", "inner.txt"]);
    }
}
