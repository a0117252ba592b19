//! Lazy record stream over a batch of resolved input files.
//!
//! Files are submitted to the engine sequentially; in structured mode each
//! file's result tree is flattened lazily, so the first record of a large
//! batch is available before the engine output of the first file has been
//! fully walked. The stream is finite and single-pass.

use std::path::PathBuf;

use crate::engine::{Engine, EngineOptions};
use crate::error::{Error, Result};
use crate::flatten::{flatten_str, FlattenIter};
use crate::model::Record;

/// How a failure for one file affects the rest of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Report the failing file's error and continue with the next file.
    #[default]
    Lenient,
    /// End the stream after the first failing file.
    Strict,
}

/// Outcome of loading a batch with per-file failure reporting.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Records from every file that succeeded.
    pub records: Vec<Record>,
    /// Files that failed, each with its error.
    pub failures: Vec<(PathBuf, Error)>,
}

impl LoadReport {
    /// Check whether every file in the batch succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Iterator of `Result<Record>` over a batch of files.
///
/// Produced by [`crate::Loader::lazy_load`]. Each failing file contributes
/// exactly one `Err` item; no partial records are emitted for it.
pub struct RecordStream {
    engine: Box<dyn Engine>,
    options: EngineOptions,
    files: std::vec::IntoIter<PathBuf>,
    error_mode: ErrorMode,
    current_file: Option<PathBuf>,
    current: Option<FlattenIter>,
    done: bool,
}

impl RecordStream {
    pub(crate) fn new(
        engine: Box<dyn Engine>,
        options: EngineOptions,
        files: Vec<PathBuf>,
        error_mode: ErrorMode,
    ) -> Self {
        Self {
            engine,
            options,
            files: files.into_iter(),
            error_mode,
            current_file: None,
            current: None,
            done: false,
        }
    }

    /// The file the stream is currently processing, if any.
    pub fn current_source(&self) -> Option<&PathBuf> {
        self.current_file.as_ref()
    }

    /// Run the engine for one file and either install a flatten iterator
    /// (structured mode) or return the whole-payload record (flat modes).
    fn start_file(&mut self, file: PathBuf) -> Result<Option<Record>> {
        let payload = self.engine.run(&file, &self.options)?;

        if self.options.format.is_structured() {
            let source = file.to_string_lossy().into_owned();
            self.current = Some(flatten_str(&payload, source)?);
            Ok(None)
        } else {
            Ok(Some(Record::whole_file(payload, &file, self.options.format)))
        }
    }
}

impl Iterator for RecordStream {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }

            // Drain the current file's flattener first.
            if let Some(iter) = &mut self.current {
                if let Some(record) = iter.next() {
                    return Some(Ok(record));
                }
                self.current = None;
            }

            let file = match self.files.next() {
                Some(f) => f,
                None => {
                    self.done = true;
                    return None;
                }
            };
            self.current_file = Some(file.clone());

            match self.start_file(file) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => {
                    log::warn!(
                        "Failed to load {}: {}",
                        self.current_file
                            .as_deref()
                            .map(|p| p.display().to_string())
                            .unwrap_or_default(),
                        e
                    );
                    if self.error_mode == ErrorMode::Strict {
                        self.done = true;
                    }
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Collect a stream into a [`LoadReport`], pairing each failure with the
/// file that produced it.
pub fn collect_report(mut stream: RecordStream) -> LoadReport {
    let mut report = LoadReport::default();
    while let Some(item) = stream.next() {
        match item {
            Ok(record) => report.records.push(record),
            Err(e) => {
                let file = stream
                    .current_source()
                    .cloned()
                    .unwrap_or_default();
                report.failures.push((file, e));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OutputFormat;
    use std::path::Path;

    /// Engine returning a canned payload per file name.
    struct CannedEngine {
        payload: String,
        fail_on: Option<&'static str>,
    }

    impl Engine for CannedEngine {
        fn run(&self, file: &Path, _options: &EngineOptions) -> Result<String> {
            if let Some(name) = self.fail_on {
                if file.ends_with(name) {
                    return Err(Error::Engine {
                        file: file.to_path_buf(),
                        message: "boom".to_string(),
                    });
                }
            }
            Ok(self.payload.clone())
        }
    }

    fn tree_payload() -> String {
        r#"{"kids": [{"type": "page", "page number": 1, "kids": [
            {"type": "paragraph", "content": "one"},
            {"type": "paragraph", "content": "two"}
        ]}]}"#
            .to_string()
    }

    #[test]
    fn test_structured_stream_yields_per_node_records() {
        let engine = Box::new(CannedEngine {
            payload: tree_payload(),
            fail_on: None,
        });
        let stream = RecordStream::new(
            engine,
            EngineOptions::new(),
            vec![PathBuf::from("a.pdf")],
            ErrorMode::Lenient,
        );
        let records: Vec<Record> = stream.map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "one");
        assert_eq!(records[1].metadata.source, "a.pdf");
    }

    #[test]
    fn test_flat_mode_yields_one_record_per_file() {
        let engine = Box::new(CannedEngine {
            payload: "whole document text".to_string(),
            fail_on: None,
        });
        let stream = RecordStream::new(
            engine,
            EngineOptions::new().with_format(OutputFormat::Text),
            vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
            ErrorMode::Lenient,
        );
        let records: Vec<Record> = stream.map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].metadata.format, OutputFormat::Text);
        assert_eq!(records[0].metadata.page, None);
    }

    #[test]
    fn test_lenient_mode_continues_past_failure() {
        let engine = Box::new(CannedEngine {
            payload: tree_payload(),
            fail_on: Some("bad.pdf"),
        });
        let stream = RecordStream::new(
            engine,
            EngineOptions::new(),
            vec![
                PathBuf::from("a.pdf"),
                PathBuf::from("bad.pdf"),
                PathBuf::from("c.pdf"),
            ],
            ErrorMode::Lenient,
        );
        let items: Vec<Result<Record>> = stream.collect();
        let errors = items.iter().filter(|i| i.is_err()).count();
        let records = items.iter().filter(|i| i.is_ok()).count();
        assert_eq!(errors, 1);
        assert_eq!(records, 4); // two per surviving file
    }

    #[test]
    fn test_strict_mode_stops_at_first_failure() {
        let engine = Box::new(CannedEngine {
            payload: tree_payload(),
            fail_on: Some("bad.pdf"),
        });
        let stream = RecordStream::new(
            engine,
            EngineOptions::new(),
            vec![
                PathBuf::from("a.pdf"),
                PathBuf::from("bad.pdf"),
                PathBuf::from("c.pdf"),
            ],
            ErrorMode::Strict,
        );
        let items: Vec<Result<Record>> = stream.collect();
        // Two records from a.pdf, then the error, then nothing.
        assert_eq!(items.len(), 3);
        assert!(items[2].is_err());
    }

    #[test]
    fn test_malformed_tree_is_an_error_not_a_fallback_record() {
        let engine = Box::new(CannedEngine {
            payload: "this is not json".to_string(),
            fail_on: None,
        });
        let stream = RecordStream::new(
            engine,
            EngineOptions::new(),
            vec![PathBuf::from("a.pdf")],
            ErrorMode::Lenient,
        );
        let items: Vec<Result<Record>> = stream.collect();
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(Error::MalformedResult(_))));
    }

    #[test]
    fn test_collect_report_pairs_failures_with_files() {
        let engine = Box::new(CannedEngine {
            payload: tree_payload(),
            fail_on: Some("bad.pdf"),
        });
        let stream = RecordStream::new(
            engine,
            EngineOptions::new(),
            vec![PathBuf::from("a.pdf"), PathBuf::from("bad.pdf")],
            ErrorMode::Lenient,
        );
        let report = collect_report(stream);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, PathBuf::from("bad.pdf"));
        assert!(!report.is_complete());
    }
}
