//! Batch driver: rewrite every MDOC file of a directory into a fresh one
//!
//! The input directory is never modified. In the default mode it is renamed
//! aside (`TS_data` -> `TS_data_original`) and a new, empty `TS_data` receives
//! the rewritten files. With an explicit output directory the input stays
//! where it is. All preconditions are checked before anything on disk moves.

use crate::errors::MdocError;
use crate::reader::open_lines;
use crate::rewrite::{rewrite_line_iter, RewriteReport};
use rayon::prelude::*;
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Settings for one batch run
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub marker: String,
    pub extension: String,
    pub backup_suffix: String,
    /// Write here instead of relocating the input directory
    pub output: Option<PathBuf>,
    pub dry_run: bool,
    pub jobs: Option<usize>,
}

/// MDOC entries of one directory
#[derive(Debug, Default)]
pub struct MdocListing {
    /// File names (not paths), sorted
    pub files: Vec<OsString>,
    /// Entries with the MDOC extension whose type could not be determined,
    /// such as dangling symlinks
    pub unreadable: Vec<(OsString, MdocError)>,
}

impl MdocListing {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.unreadable.is_empty()
    }
}

/// Resolved locations and file list, validated before any change
#[derive(Debug)]
pub struct BatchPlan {
    pub input_dir: PathBuf,
    /// Where input files are read from once the batch runs
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Whether `input_dir` gets renamed to `source_dir` first
    pub relocate: bool,
    /// File names (not paths), sorted
    pub files: Vec<OsString>,
    /// Entries reported as failed without being read
    pub unreadable: Vec<(OsString, MdocError)>,
}

impl BatchPlan {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.unreadable.is_empty()
    }
}

/// How one file came out of the batch
#[derive(Debug, Serialize)]
pub enum FileStatus {
    /// Header date found and propagated
    Rewritten(RewriteReport),
    /// No header date; copied through unchanged
    PassedThrough(RewriteReport),
    /// Could not be read or written; no output produced
    Failed(#[serde(serialize_with = "serialize_error")] MdocError),
}

fn serialize_error<S: serde::Serializer>(err: &MdocError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(err)
}

#[derive(Debug, Serialize)]
pub struct FileResult {
    pub name: String,
    pub status: FileStatus,
}

impl FileResult {
    /// Non-fatal problems worth showing to a human
    pub fn warnings(&self, dir: &Path) -> Vec<MdocError> {
        let path = dir.join(&self.name);
        match &self.status {
            FileStatus::Rewritten(report) => report
                .malformed_lines
                .iter()
                .map(|&line| MdocError::MalformedDateTimeLine { path: path.clone(), line })
                .collect(),
            FileStatus::PassedThrough(_) => vec![MdocError::NoHeaderDateFound { path }],
            FileStatus::Failed(_) => Vec::new(),
        }
    }
}

/// Outcome of a whole batch
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub output_dir: PathBuf,
    pub source_dir: PathBuf,
    pub dry_run: bool,
    pub files: Vec<FileResult>,
}

impl BatchSummary {
    pub fn rewritten(&self) -> impl Iterator<Item = &FileResult> {
        self.files.iter().filter(|f| matches!(f.status, FileStatus::Rewritten(_)))
    }

    pub fn passed_through(&self) -> impl Iterator<Item = &FileResult> {
        self.files.iter().filter(|f| matches!(f.status, FileStatus::PassedThrough(_)))
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileResult> {
        self.files.iter().filter(|f| matches!(f.status, FileStatus::Failed(_)))
    }
}

/// List files with the given extension (case-insensitive) directly inside `dir`
///
/// Symlinks are followed, so a linked MDOC counts as a file. A matching entry
/// that cannot be resolved is kept in [`MdocListing::unreadable`]; failing to
/// read `dir` itself is an error.
pub fn list_mdoc_files(dir: &Path, extension: &str) -> Result<MdocListing, MdocError> {
    if !dir.exists() {
        return Err(MdocError::InputNotFound { path: dir.to_path_buf() });
    }
    if !dir.is_dir() {
        return Err(MdocError::NotADirectory { path: dir.to_path_buf() });
    }

    let mut listing = MdocListing::default();
    for entry in WalkDir::new(dir).follow_links(true).min_depth(1).max_depth(1) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                    listing.files.push(entry.file_name().to_os_string());
                }
            }
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                if path.as_path() == dir {
                    return Err(MdocError::UnreadableFile { path, source: err.into() });
                }
                if has_extension(&path, extension) {
                    let name = path.file_name().map(OsString::from).unwrap_or_default();
                    let error = MdocError::UnreadableFile { path, source: err.into() };
                    listing.unreadable.push((name, error));
                }
            }
        }
    }

    listing.files.sort();
    listing.unreadable.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(listing)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// The sibling path an input directory is moved to: `<dir><suffix>`
pub fn backup_path(input_dir: &Path, suffix: &str) -> PathBuf {
    let mut name = input_dir.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    input_dir.with_file_name(name)
}

/// Check every precondition and resolve where things go
pub fn plan_batch(input_dir: &Path, opts: &BatchOptions) -> Result<BatchPlan, MdocError> {
    let mut input_dir = strip_trailing(input_dir);
    let MdocListing { files, unreadable } = list_mdoc_files(&input_dir, &opts.extension)?;

    // "." and ".." have no name to derive a sibling from
    if input_dir.file_name().is_none() {
        input_dir = input_dir
            .canonicalize()
            .map_err(|_| MdocError::InputNotFound { path: input_dir.clone() })?;
    }

    match &opts.output {
        Some(output) => {
            let output = strip_trailing(output);
            if same_location(&input_dir, &output) || !is_empty_or_missing(&output) {
                return Err(MdocError::OutputAlreadyExists { path: output });
            }
            Ok(BatchPlan {
                source_dir: input_dir.clone(),
                input_dir,
                output_dir: output,
                relocate: false,
                files,
                unreadable,
            })
        }
        None => {
            if opts.backup_suffix.is_empty() {
                return Err(MdocError::OutputAlreadyExists { path: input_dir });
            }
            let backup = backup_path(&input_dir, &opts.backup_suffix);
            if backup.exists() {
                return Err(MdocError::OutputAlreadyExists { path: backup });
            }
            Ok(BatchPlan {
                output_dir: input_dir.clone(),
                input_dir,
                source_dir: backup,
                relocate: true,
                files,
                unreadable,
            })
        }
    }
}

fn strip_trailing(path: &Path) -> PathBuf {
    path.components().collect()
}

fn same_location(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn is_empty_or_missing(dir: &Path) -> bool {
    match fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => !dir.exists(),
    }
}

/// Move the input aside and create the fresh output directory
///
/// If the output directory cannot be created the input is moved back, so a
/// failed relocation leaves the tree as it was.
pub fn relocate_input(plan: &BatchPlan) -> Result<(), MdocError> {
    if plan.source_dir.exists() {
        return Err(MdocError::OutputAlreadyExists { path: plan.source_dir.clone() });
    }
    fs::rename(&plan.input_dir, &plan.source_dir).map_err(|source| MdocError::Relocate {
        from: plan.input_dir.clone(),
        to: plan.source_dir.clone(),
        source,
    })?;
    fs::create_dir(&plan.output_dir).map_err(|source| {
        let originals = match fs::rename(&plan.source_dir, &plan.input_dir) {
            Ok(()) => plan.input_dir.clone(),
            Err(_) => plan.source_dir.clone(),
        };
        MdocError::CreateOutput { path: plan.output_dir.clone(), originals, source }
    })
}

/// Transform a single file, writing the result only once the whole input was read
pub fn process_file(
    src: &Path,
    dst: Option<&Path>,
    marker: &str,
) -> Result<RewriteReport, MdocError> {
    let unreadable =
        |source: std::io::Error| MdocError::UnreadableFile { path: src.to_path_buf(), source };

    let lines = open_lines(src).map_err(unreadable)?;
    let mut output = Vec::new();
    let report = rewrite_line_iter(lines, &mut output, marker).map_err(unreadable)?;

    if let Some(dst) = dst {
        fs::write(dst, &output)
            .map_err(|source| MdocError::WriteFailed { path: dst.to_path_buf(), source })?;
    }
    Ok(report)
}

/// Execute a validated plan
///
/// Only relocation and pool setup can fail the whole batch; per-file problems
/// are recorded in the summary.
pub fn run_batch(plan: BatchPlan, opts: &BatchOptions) -> Result<BatchSummary, MdocError> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = opts.jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder.build()?;

    // A dry run reads straight from the untouched input
    let source_dir = if opts.dry_run { &plan.input_dir } else { &plan.source_dir };

    if !opts.dry_run {
        if plan.relocate {
            relocate_input(&plan)?;
        } else {
            fs::create_dir_all(&plan.output_dir).map_err(|source| MdocError::CreateOutput {
                path: plan.output_dir.clone(),
                originals: plan.input_dir.clone(),
                source,
            })?;
        }
    }

    let mut files: Vec<FileResult> = pool.install(|| {
        plan.files
            .par_iter()
            .map(|name| {
                let src = source_dir.join(name);
                let dst = plan.output_dir.join(name);
                let dst = if opts.dry_run { None } else { Some(dst.as_path()) };
                let status = match process_file(&src, dst, &opts.marker) {
                    Ok(report) if report.found_header() => FileStatus::Rewritten(report),
                    Ok(report) => FileStatus::PassedThrough(report),
                    Err(e) => FileStatus::Failed(e),
                };
                FileResult { name: name.to_string_lossy().into_owned(), status }
            })
            .collect()
    });
    files.extend(plan.unreadable.into_iter().map(|(name, err)| FileResult {
        name: name.to_string_lossy().into_owned(),
        status: FileStatus::Failed(err),
    }));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(BatchSummary {
        output_dir: plan.output_dir.clone(),
        source_dir: source_dir.clone(),
        dry_run: opts.dry_run,
        files,
    })
}
