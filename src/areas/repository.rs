use crate::LIT_DIR;
use crate::areas::commit_graph::CommitGraph;
use crate::areas::content_store::ContentStore;
use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::state_file::StateFile;
use anyhow::Context;
use file_guard::{FileGuard, Lock};
use std::cell::{RefCell, RefMut};
use std::fs::File;
use std::path::{Path, PathBuf};

const GRAPH_SIGNATURE: [u8; 4] = *b"LGRF";
const GRAPH_VERSION: u32 = 1;

/// Per-invocation repository context
///
/// Owns the content store, the staging area and the commit graph for the
/// lifetime of one command, together with an exclusive lock on `.lit/lock`
/// so concurrent invocations cannot interleave their load/persist cycles.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    store: ContentStore,
    staging: StagingArea,
    graph: CommitGraph,
    graph_file: StateFile,
    workspace: Workspace,
    lock: Option<FileGuard<Box<File>>>,
}

impl Repository {
    /// Open the work tree at `path`, loading state if it is initialized
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Unable to create {}", path.display()))?;
        }
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", path.display()))?;
        let lit_path = path.join(LIT_DIR);

        let mut repository = Repository {
            store: ContentStore::new(
                lit_path.join("objects").into_boxed_path(),
                lit_path.join("store").into_boxed_path(),
            ),
            staging: StagingArea::new(lit_path.join("index").into_boxed_path()),
            graph: CommitGraph::default(),
            graph_file: StateFile::new(
                lit_path.join("graph").into_boxed_path(),
                GRAPH_SIGNATURE,
                GRAPH_VERSION,
            ),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            lock: None,
        };

        if repository.is_initialized() {
            repository.load()?;
        }

        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lit_path(&self) -> PathBuf {
        self.path.join(LIT_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.lit_path().is_dir()
    }

    /// Fail unless `.lit` exists in the work tree
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            anyhow::bail!(
                "not a lit repository: {} has no {} directory",
                self.path.display(),
                LIT_DIR
            );
        }

        Ok(())
    }

    /// Take the repository lock, then read the three structures from disk
    pub(crate) fn load(&mut self) -> anyhow::Result<()> {
        self.acquire_lock()?;

        self.store.rehydrate();
        self.staging.rehydrate();
        self.graph = self.graph_file.load();

        let has_tracked_files = self
            .graph
            .commits()
            .iter()
            .any(|commit| !commit.snapshot().is_empty());
        if !self.store.has_references() && has_tracked_files {
            tracing::warn!("blob reference ledger is empty, recounting from commit snapshots");
            self.store
                .recount(self.graph.commits().into_iter().map(|commit| commit.snapshot()));
        }

        Ok(())
    }

    /// Write back every structure that changed
    pub fn persist(&mut self) -> anyhow::Result<()> {
        self.store
            .write_updates()
            .context("Unable to save the blob reference ledger")?;
        self.staging
            .write_updates()
            .context("Unable to save the staging area")?;

        if self.graph.is_changed() {
            self.graph_file
                .store(&self.graph)
                .context("Unable to save the commit graph")?;
            self.graph.mark_persisted();
        }

        Ok(())
    }

    fn acquire_lock(&mut self) -> anyhow::Result<()> {
        if self.lock.is_some() {
            return Ok(());
        }

        let lock_path = self.lit_path().join("lock");
        let lock_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Unable to open {}", lock_path.display()))?;

        let guard = file_guard::lock(Box::new(lock_file), Lock::Exclusive, 0, 1)
            .with_context(|| format!("Unable to lock {}", lock_path.display()))?;
        self.lock = Some(guard);

        Ok(())
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ContentStore {
        &mut self.store
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn staging_mut(&mut self) -> &mut StagingArea {
        &mut self.staging
    }

    pub fn graph(&self) -> &CommitGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut CommitGraph {
        &mut self.graph
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }
}
