//! End-to-end import: read both exports, build, join, merge, deliver
//!
//! The labor and tips exports are read and validated on separate threads.
//! Each worker reports exactly once over a shared channel, and the
//! [`ImportJoin`] only releases records for merging when both reports are
//! in and both succeeded. The sink is never called after a failure.

use crate::config::ImportConfig;
use crate::error::{Error, Result, SourceFile};
use crate::export::to_csv;
use crate::labor::{build_hours_records, HoursRecord};
use crate::ledger::{merge, LedgerLine};
use crate::parser::{read_source, tokenize};
use crate::tips::{build_tips_records, TipsRecord};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use tracing::{info, instrument, warn};

/// Supplies the decoded text of one input export
pub trait TextSource {
    /// Short description for logs
    fn label(&self) -> String;

    /// Full text content of the export
    fn read_text(&self) -> Result<String>;
}

/// Receives the finished payroll import file
pub trait CsvSink {
    fn deliver(&mut self, csv: &str) -> Result<()>;
}

/// An export on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for FileSource {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    fn read_text(&self) -> Result<String> {
        read_source(&self.path)
    }
}

impl TextSource for str {
    fn label(&self) -> String {
        "<memory>".to_string()
    }

    fn read_text(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl TextSource for String {
    fn label(&self) -> String {
        self.as_str().label()
    }

    fn read_text(&self) -> Result<String> {
        Ok(self.clone())
    }
}

/// Writes the import file to a path, replacing any existing file
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CsvSink for FileSink {
    fn deliver(&mut self, csv: &str) -> Result<()> {
        fs::write(&self.path, csv)?;
        info!(path = %self.path.display(), bytes = csv.len(), "wrote payroll import file");
        Ok(())
    }
}

/// Keeps every delivery in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub deliveries: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CsvSink for MemorySink {
    fn deliver(&mut self, csv: &str) -> Result<()> {
        self.deliveries.push(csv.to_string());
        Ok(())
    }
}

/// Two-slot accumulator for the per-file build results
#[derive(Debug, Default)]
pub struct ImportJoin {
    labor: Option<Result<Vec<HoursRecord>>>,
    tips: Option<Result<Vec<TipsRecord>>>,
}

impl ImportJoin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the labor result; a second report for the same file is ignored
    pub fn complete_labor(&mut self, result: Result<Vec<HoursRecord>>) {
        if self.labor.is_some() {
            warn!("labor export reported twice, keeping the first result");
            return;
        }
        self.labor = Some(result);
    }

    /// Record the tips result; a second report for the same file is ignored
    pub fn complete_tips(&mut self, result: Result<Vec<TipsRecord>>) {
        if self.tips.is_some() {
            warn!("tips export reported twice, keeping the first result");
            return;
        }
        self.tips = Some(result);
    }

    /// Both exports have reported
    pub fn is_ready(&self) -> bool {
        self.labor.is_some() && self.tips.is_some()
    }

    /// Release both record sets, or the failure(s) that stop the import
    pub fn finish(self) -> Result<(Vec<HoursRecord>, Vec<TipsRecord>)> {
        match (self.labor, self.tips) {
            (None, _) => Err(Error::JoinIncomplete(SourceFile::Labor)),
            (_, None) => Err(Error::JoinIncomplete(SourceFile::Tips)),
            (Some(Ok(hours)), Some(Ok(tips))) => Ok((hours, tips)),
            (Some(Err(labor)), Some(Ok(_))) => Err(labor),
            (Some(Ok(_)), Some(Err(tips))) => Err(tips),
            (Some(Err(labor)), Some(Err(tips))) => Err(Error::BothRejected {
                labor: Box::new(labor),
                tips: Box::new(tips),
            }),
        }
    }
}

/// Result of a successful import
#[derive(Debug, Clone)]
pub struct PayrollRun {
    pub lines: Vec<LedgerLine>,
    pub labor_records: usize,
    pub tips_records: usize,
}

enum Report {
    Labor(Result<Vec<HoursRecord>>),
    Tips(Result<Vec<TipsRecord>>),
}

/// Read and validate a labor export
pub fn load_labor<S: TextSource + ?Sized>(
    source: &S,
    config: &ImportConfig,
) -> Result<Vec<HoursRecord>> {
    let rows = tokenize(&source.read_text()?);
    info!(source = %source.label(), rows = rows.len(), "tokenized labor export");
    build_hours_records(&rows, config)
}

/// Read and validate a tips export
pub fn load_tips<S: TextSource + ?Sized>(
    source: &S,
    config: &ImportConfig,
) -> Result<Vec<TipsRecord>> {
    let rows = tokenize(&source.read_text()?);
    info!(source = %source.label(), rows = rows.len(), "tokenized tips export");
    build_tips_records(&rows, config)
}

/// Build the ledger from both exports
///
/// Fails with the first invalid row of whichever file(s) failed; when
/// both failed the error carries both messages.
#[instrument(skip_all)]
pub fn run_import<L, T>(labor: &L, tips: &T, config: &ImportConfig) -> Result<PayrollRun>
where
    L: TextSource + Sync + ?Sized,
    T: TextSource + Sync + ?Sized,
{
    let (tx, rx) = mpsc::channel();
    let mut join = ImportJoin::new();

    thread::scope(|scope| {
        let labor_tx = tx.clone();
        let labor_worker = scope.spawn(move || {
            if labor_tx
                .send(Report::Labor(load_labor(labor, config)))
                .is_err()
            {
                warn!("labor report dropped, import already finished");
            }
        });
        let tips_worker = scope.spawn(move || {
            if tx.send(Report::Tips(load_tips(tips, config))).is_err() {
                warn!("tips report dropped, import already finished");
            }
        });

        // Ends once both workers have dropped their senders
        for report in rx {
            match report {
                Report::Labor(result) => join.complete_labor(result),
                Report::Tips(result) => join.complete_tips(result),
            }
        }

        if labor_worker.join().is_err() {
            join.complete_labor(Err(Error::WorkerPanicked(SourceFile::Labor)));
        }
        if tips_worker.join().is_err() {
            join.complete_tips(Err(Error::WorkerPanicked(SourceFile::Tips)));
        }
    });
    debug_assert!(join.is_ready());

    let (hours, tips) = join.finish()?;
    let lines = merge(&hours, &tips);
    info!(
        hours_records = hours.len(),
        tips_records = tips.len(),
        lines = lines.len(),
        "merged payroll ledger"
    );

    Ok(PayrollRun {
        lines,
        labor_records: hours.len(),
        tips_records: tips.len(),
    })
}

/// Run the import and hand the CSV to `sink`
///
/// The sink is called exactly once on success and never on failure.
pub fn run_to_sink<L, T, S>(
    labor: &L,
    tips: &T,
    config: &ImportConfig,
    sink: &mut S,
) -> Result<PayrollRun>
where
    L: TextSource + Sync + ?Sized,
    T: TextSource + Sync + ?Sized,
    S: CsvSink + ?Sized,
{
    let run = run_import(labor, tips, config)?;
    sink.deliver(&to_csv(&run.lines)?)?;
    Ok(run)
}
