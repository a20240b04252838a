//! Plain-text trace of AI decisions
//!
//! One record per AI move:
//!
//! ```text
//! <leaf evaluations>
//! <minimax value>
//!
//! <value of root move 1>
//! <value of root move 2>
//! ...
//!
//! ```
//!
//! Values are printed with one decimal; infinities as `inf` / `-inf`.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::engine::MoveResult;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("cannot open trace file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Text of one trace record
pub fn format_record(num_evals: u64, score: f64, second_ply: &[f64]) -> String {
    let mut out = format!("{num_evals}\n{score:.1}\n\n");
    for value in second_ply {
        out.push_str(&format!("{value:.1}\n"));
    }
    out.push('\n');
    out
}

/// Appends trace records to any writer
pub struct TraceWriter<W: Write> {
    out: W,
    records: usize,
}

impl TraceWriter<BufWriter<File>> {
    /// Create (or truncate) a trace file
    pub fn create(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|source| TraceError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, records: 0 }
    }

    /// Write one record and flush it
    pub fn record(&mut self, result: &MoveResult) -> Result<(), TraceError> {
        let text = format_record(result.num_evals, result.score, &result.second_ply);
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        self.records += 1;
        Ok(())
    }

    /// Records written so far
    #[inline]
    pub fn records(&self) -> usize {
        self.records
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + 'static> TraceWriter<W> {
    /// Erase the writer type
    pub fn boxed(self) -> TraceWriter<Box<dyn Write + Send>> {
        TraceWriter {
            out: Box::new(self.out),
            records: self.records,
        }
    }
}
