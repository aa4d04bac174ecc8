//! Recursive directory size aggregation.
//!
//! An aggregation task measures one directory: it sums the sizes of the
//! directory's immediate non-directory entries and spawns one child task per
//! immediate subdirectory. Children report back on a reply channel local to
//! their parent, and the parent hands its own total to whoever spawned it.
//!
//! Tasks never wait on their children. Each one is a [`rayon::spawn`] job that
//! returns as soon as its children are queued; the child that replies last
//! finishes the parent in its place and walks on up the tree. Worker stacks
//! therefore stay flat however deep the tree is, and no pool thread ever
//! blocks on a child that is still queued.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;
use walkdir::WalkDir;

use crate::config::SizeOptions;
use crate::output::Output;

/// Final size of one measured directory.
///
/// Produced exactly once per aggregation task and consumed by its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryResult {
    /// The measured directory
    pub path: PathBuf,

    /// Total size of the directory and everything below it, in bytes
    pub size: u64,
}

/// Immediate contents of one directory, split into what is summed here and
/// what is delegated to child tasks.
#[derive(Debug, Default)]
struct Level {
    file_bytes: u64,
    subdirs: Vec<PathBuf>,
}

/// Where a finished directory delivers its result.
#[derive(Clone)]
enum Parent {
    /// The caller of [`Aggregator::aggregate`]
    Caller(Sender<DirectoryResult>),

    /// A directory still waiting on some of its children
    Dir(Arc<PendingDir>),
}

/// A directory whose subdirectories have not all replied yet.
struct PendingDir {
    path: PathBuf,
    file_bytes: u64,
    expected: usize,
    remaining: AtomicUsize,
    reply_tx: Sender<DirectoryResult>,
    reply_rx: Receiver<DirectoryResult>,
    parent: Parent,
}

/// Computes directory sizes with one concurrent task per directory.
///
/// The aggregator is `Copy` so every spawned task carries its own settings;
/// the only state tasks share is the reply channel and child counter of
/// the directory they belong to.
#[derive(Clone, Copy, Debug, Default)]
pub struct Aggregator {
    /// Report each subdirectory's size once its parent is complete
    recursive: bool,

    output: Output,
}

impl Aggregator {
    /// Create an aggregator from the run options.
    #[must_use]
    pub const fn new(options: &SizeOptions) -> Self {
        Self {
            recursive: options.recursive,
            output: Output::new(options.human),
        }
    }

    /// Enable or disable quiet mode (suppresses subdirectory lines).
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.output = self.output.with_quiet(quiet);
        self
    }

    /// Start measuring `dir` on the rayon pool; exactly one
    /// [`DirectoryResult`] is later sent on `reply`.
    ///
    /// Returns immediately. `dir` is trusted to be a directory; if it cannot
    /// be read it simply measures as `0`, and no error ever replaces the reply.
    pub fn aggregate(&self, dir: &Path, reply: &Sender<DirectoryResult>) {
        self.spawn_visit(dir.to_path_buf(), Parent::Caller(reply.clone()));
    }

    /// Measure `dir` and everything below it, blocking until done.
    ///
    /// The total is the sum of the directory's own non-directory entries plus
    /// the totals of its subdirectories, each computed by a child task. When
    /// recursive reporting is on, a directory's children are printed after
    /// all of them have finished, in the order their results arrived.
    ///
    /// Must not be called from inside a rayon worker.
    #[must_use]
    pub fn measure(&self, dir: &Path) -> DirectoryResult {
        let (reply_tx, reply_rx) = bounded(1);
        self.aggregate(dir, &reply_tx);
        drop(reply_tx);

        // Only disconnects without a value if the task panicked
        reply_rx.recv().unwrap_or_else(|_| DirectoryResult {
            path: dir.to_path_buf(),
            size: 0,
        })
    }

    fn spawn_visit(self, dir: PathBuf, parent: Parent) {
        rayon::spawn(move || self.visit(dir, parent));
    }

    /// Read one directory level and queue a task per subdirectory.
    fn visit(self, dir: PathBuf, parent: Parent) {
        let level = Self::read_level(&dir);

        if level.subdirs.is_empty() {
            self.deliver(
                DirectoryResult {
                    path: dir,
                    size: level.file_bytes,
                },
                parent,
            );
            return;
        }

        let expected = level.subdirs.len();
        let (reply_tx, reply_rx) = bounded(expected);
        let pending = Arc::new(PendingDir {
            path: dir,
            file_bytes: level.file_bytes,
            expected,
            remaining: AtomicUsize::new(expected),
            reply_tx,
            reply_rx,
            parent,
        });

        for subdir in level.subdirs {
            self.spawn_visit(subdir, Parent::Dir(Arc::clone(&pending)));
        }
    }

    /// Hand `result` to `parent`, then complete every ancestor for which
    /// this was the last outstanding child.
    fn deliver(self, mut result: DirectoryResult, mut parent: Parent) {
        loop {
            let pending = match parent {
                Parent::Caller(reply) => {
                    if let Err(err) = reply.send(result) {
                        debug!(
                            "Receiver for {} went away before its result",
                            err.0.path.display()
                        );
                    }
                    return;
                }
                Parent::Dir(pending) => pending,
            };

            // Capacity equals the child count and the receiver lives in
            // `pending`, so this neither blocks nor fails
            let _ = pending.reply_tx.send(result);
            if pending.remaining.fetch_sub(1, Ordering::AcqRel) != 1 {
                return;
            }

            let mut size = pending.file_bytes;
            for child in pending.reply_rx.iter().take(pending.expected) {
                size = size.saturating_add(child.size);
                if self.recursive {
                    self.output.subdirectory(&child);
                }
            }

            result = DirectoryResult {
                path: pending.path.clone(),
                size,
            };
            parent = pending.parent.clone();
        }
    }

    /// Enumerate the immediate entries of `dir`.
    ///
    /// Entries that cannot be read or stat'ed are skipped and contribute
    /// nothing; the walk carries on with their siblings. Symlinks are not
    /// followed, so a link counts as a non-directory entry of its own size.
    fn read_level(dir: &Path) -> Level {
        let mut level = Level::default();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!("Skipping unreadable entry in {}: {err}", dir.display());
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                level.subdirs.push(entry.into_path());
                continue;
            }

            match entry.metadata() {
                Ok(metadata) => level.file_bytes = level.file_bytes.saturating_add(metadata.len()),
                Err(err) => debug!("Skipping {}: {err}", entry.path().display()),
            }
        }

        level
    }
}
