//! Run a per-file operation over a list of input paths.
//!
//! Files are processed in the order given. A directory is expanded to its
//! immediate regular-file children (not recursively, symlinks followed) in
//! file-system enumeration order. Per-file failures are reported on the error
//! stream and never abort the batch.
//!
//! # Exit status
//!
//! When the input is exactly one path that is a regular file or does not
//! exist, the batch result is that file's result. Any other input shape
//! always completes successfully.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// How a file reached the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileScope {
    /// Named directly on the command line
    Direct,
    /// Found by expanding a directory
    Expanded,
}

impl FileScope {
    /// Covers are only exported for files named directly.
    pub fn exports_covers(self) -> bool {
        matches!(self, FileScope::Direct)
    }
}

/// Result of a batch run.
#[derive(Debug)]
pub enum BatchOutcome {
    /// The input was a single file; carries its result
    Single(Result<()>),
    /// Any other input shape
    Completed { processed: usize, failed: usize },
}

impl BatchOutcome {
    /// Process exit code: the OS error number for a missing single file,
    /// 1 for any other single-file failure, 0 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            BatchOutcome::Single(Err(err @ Error::NotFound { .. })) => {
                err.raw_os_error().unwrap_or(1)
            }
            BatchOutcome::Single(Err(_)) => 1,
            BatchOutcome::Single(Ok(())) | BatchOutcome::Completed { .. } => 0,
        }
    }
}

/// Batch runner writing operation output and failure reports to two streams.
pub struct Batch<W, E> {
    out: W,
    err: E,
    /// Put a blank line between consecutive output blocks
    separate_blocks: bool,
    blocks_written: usize,
}

impl<W: Write, E: Write> Batch<W, E> {
    pub fn new(out: W, err: E, separate_blocks: bool) -> Self {
        Self {
            out,
            err,
            separate_blocks,
            blocks_written: 0,
        }
    }

    /// Run `op` on every file named by `paths`.
    ///
    /// `op` returns the output block for a file, which may be empty. Only
    /// failures to write to the output streams are returned as errors.
    pub fn run<F>(&mut self, paths: &[PathBuf], mut op: F) -> io::Result<BatchOutcome>
    where
        F: FnMut(&Path, FileScope) -> Result<String>,
    {
        if let [path] = paths
            && !path.is_dir()
        {
            let result = op(path, FileScope::Direct);
            let result = self.settle(path, result)?;
            return Ok(BatchOutcome::Single(result));
        }

        let mut processed = 0;
        let mut failed = 0;

        for path in paths {
            if !path.is_dir() {
                let result = op(path, FileScope::Direct);
                processed += 1;
                failed += usize::from(self.settle(path, result)?.is_err());
                continue;
            }

            debug!(dir = %path.display(), "Expanding directory");
            for entry in expand_dir(path) {
                match entry {
                    Ok(file) => {
                        let result = op(&file, FileScope::Expanded);
                        processed += 1;
                        failed += usize::from(self.settle(&file, result)?.is_err());
                    }
                    Err((entry_path, e)) => {
                        failed += 1;
                        self.report(&entry_path, &e)?;
                    }
                }
            }
        }

        debug!(processed, failed, "Batch complete");
        Ok(BatchOutcome::Completed { processed, failed })
    }

    /// Print a successful block or report a failure.
    fn settle(&mut self, path: &Path, result: Result<String>) -> io::Result<Result<()>> {
        match result {
            Ok(block) => {
                self.write_block(&block)?;
                Ok(Ok(()))
            }
            Err(e) => {
                self.report(path, &e)?;
                Ok(Err(e))
            }
        }
    }

    fn write_block(&mut self, block: &str) -> io::Result<()> {
        if block.is_empty() {
            return Ok(());
        }
        if self.separate_blocks && self.blocks_written > 0 {
            writeln!(self.out)?;
        }
        self.out.write_all(block.as_bytes())?;
        self.blocks_written += 1;
        Ok(())
    }

    fn report(&mut self, path: &Path, err: &dyn std::fmt::Display) -> io::Result<()> {
        debug!(path = %path.display(), "File failed");
        writeln!(self.err, "Error with \"{}\": {}", path.display(), err)
    }
}

/// Regular files directly inside `dir`. Unreadable entries are returned as
/// errors with the best path known for them.
fn expand_dir(dir: &Path) -> Vec<std::result::Result<PathBuf, (PathBuf, walkdir::Error)>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                Some(Err((path, e)))
            }
        })
        .collect()
}
