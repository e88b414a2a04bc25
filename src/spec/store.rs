use super::document::SpecDocument;
use super::load::load_spec;
use arc_swap::ArcSwap;
use std::path::Path;
use std::sync::Arc;

/// Process-wide holder for the active specification document.
///
/// Parse once at startup, then hand out cheap `Arc` snapshots to request
/// threads. [`SpecStore::replace`] swaps the whole document atomically; a
/// validation that already loaded a snapshot keeps using it until it finishes.
#[derive(Debug)]
pub struct SpecStore {
    current: ArcSwap<SpecDocument>,
}

impl SpecStore {
    #[must_use]
    pub fn new(spec: SpecDocument) -> Self {
        SpecStore {
            current: ArcSwap::from_pointee(spec),
        }
    }

    /// Build a store from a file, linting it first.
    ///
    /// # Errors
    ///
    /// Same as [`load_spec`].
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Ok(Self::new(load_spec(path)?))
    }

    /// Snapshot of the active document.
    #[must_use]
    pub fn load(&self) -> Arc<SpecDocument> {
        self.current.load_full()
    }

    /// Make `spec` the active document.
    pub fn replace(&self, spec: SpecDocument) {
        self.current.store(Arc::new(spec));
        tracing::info!("Specification replaced");
    }

    /// Re-read `path` and swap it in. On error the active document is untouched.
    ///
    /// # Errors
    ///
    /// Same as [`load_spec`].
    pub fn reload_from_path(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        match load_spec(path) {
            Ok(spec) => {
                self.replace(spec);
                Ok(())
            }
            Err(err) => {
                tracing::error!(spec = %path.display(), error = %err, "Specification reload failed");
                Err(err)
            }
        }
    }
}
