//! Content loading.
//!
//! Lists the source files of one collection (`.md` posts or `.json`
//! projects), reads each one and hands it to the collection's parser.
//!
//! Loading is partial-failure tolerant: a file that cannot be read or parsed
//! is reported as a [`BuildEvent::Skipped`] and the rest of the batch carries
//! on. A missing directory is not an error either; it yields an empty
//! collection.

use crate::config::RenderConfig;
use crate::pipeline::BuildEvent;
use crate::types::ContentKind;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A parsed item plus the non-fatal problems corrected while parsing it.
#[derive(Debug)]
pub struct Parsed<T> {
    pub item: T,
    pub warnings: Vec<String>,
}

impl<T> Parsed<T> {
    pub fn clean(item: T) -> Self {
        Self {
            item,
            warnings: Vec::new(),
        }
    }
}

/// A content type that is built from one source file.
pub trait SourceItem: Sized {
    const KIND: ContentKind;
    /// File extension of source files, without the dot.
    const EXTENSION: &'static str;

    type Error: std::error::Error;

    fn parse_source(
        text: &str,
        file_name: &str,
        render: &RenderConfig,
    ) -> Result<Parsed<Self>, Self::Error>;

    /// Display title used in progress output.
    fn title(&self) -> &str;
}

/// List files directly inside `dir` with the given extension, sorted by name.
///
/// Returns `Ok(None)` when `dir` does not exist.
pub fn list_sources(dir: &Path, extension: &str) -> io::Result<Option<Vec<PathBuf>>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        if path.is_file() && has_extension(path, extension) {
            sources.push(path.to_path_buf());
        }
    }
    Ok(Some(sources))
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Derive the slug of a content item from its file name: the stem, with the
/// extension stripped.
pub fn slug_for(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Load every source of one collection, in file-name order.
///
/// Only directory-listing failures are returned as errors; per-file failures
/// become `Skipped` events.
pub fn load_collection<T: SourceItem>(
    dir: &Path,
    render: &RenderConfig,
    on_event: &mut dyn FnMut(BuildEvent),
) -> io::Result<Vec<T>> {
    let Some(sources) = list_sources(dir, T::EXTENSION)? else {
        on_event(BuildEvent::DirectoryMissing {
            kind: T::KIND,
            path: dir.to_path_buf(),
        });
        return Ok(Vec::new());
    };

    if sources.is_empty() {
        on_event(BuildEvent::NoSources {
            kind: T::KIND,
            path: dir.to_path_buf(),
        });
        return Ok(Vec::new());
    }

    let mut items = Vec::with_capacity(sources.len());
    for path in &sources {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                on_event(BuildEvent::Skipped {
                    kind: T::KIND,
                    file: file_name,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match T::parse_source(&text, &file_name, render) {
            Ok(parsed) => {
                for message in parsed.warnings {
                    on_event(BuildEvent::Warning {
                        file: file_name.clone(),
                        message,
                    });
                }
                on_event(BuildEvent::Parsed {
                    kind: T::KIND,
                    index: items.len() + 1,
                    title: parsed.item.title().to_string(),
                    file: file_name,
                });
                items.push(parsed.item);
            }
            Err(e) => on_event(BuildEvent::Skipped {
                kind: T::KIND,
                file: file_name,
                reason: e.to_string(),
            }),
        }
    }

    Ok(items)
}
