//! Big-file round trip: create a 5000 x 10 workbook, reopen it, push every
//! cell one row down (with and without a cell format) and time each phase.

use std::ffi::OsString;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use log::{info, warn};

use crate::config::BenchConfig;
use crate::document::{Backend, CellFormat, CellRange, CellValue, Document, normal_format};
use crate::probe;
use crate::stopwatch::{Stopwatch, show_costs};
use crate::umya::UmyaBackend;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Completed,
    /// Saving failed; remaining phases of the scenario were skipped.
    SaveFailed(String),
}

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub phases: Vec<(String, f64)>,
    pub load_failed: bool,
    pub outcome: Outcome,
}

impl ScenarioReport {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            phases: Vec::new(),
            load_failed: false,
            outcome: Outcome::Completed,
        }
    }

    fn record(&mut self, detail: impl Into<String>, ms: f64) {
        let detail = detail.into();
        show_costs(&detail, ms);
        self.phases.push((detail, ms));
    }

    fn save_failed(mut self, path: &Path, err: &anyhow::Error) -> Self {
        warn!("[{}] failed to write excel.", path.display());
        warn!("{err:#}");
        self.outcome = Outcome::SaveFailed(format!("{err:#}"));
        self
    }

    pub fn phase(&self, detail: &str) -> Option<f64> {
        self.phases
            .iter()
            .find(|(name, _)| name == detail)
            .map(|(_, ms)| *ms)
    }

    pub fn is_completed(&self) -> bool {
        self.outcome == Outcome::Completed
    }
}

fn grid_label(config: &BenchConfig) -> String {
    format!("{} x {}", config.rows, config.columns)
}

fn open_document<B: Backend>(
    backend: &B,
    path: &Path,
    sw: &mut Stopwatch,
    report: &mut ScenarioReport,
) -> B::Doc {
    let doc = backend.open(path);
    report.record("open big xlsx file", sw.elapsed());

    // Logged only; the scenario carries on with whatever the document holds.
    if !doc.is_load_package() {
        warn!("[{}] open failed.", path.display());
        report.load_failed = true;
    }
    doc
}

/// Moves every cell of `range` one row down, bottom row first.
pub fn shift_rows<D: Document>(doc: &mut D, range: Option<CellRange>, format: Option<&CellFormat>) {
    let Some(range) = range else {
        return;
    };
    for r in (range.first_row..=range.last_row).rev() {
        // nowhere to go below the last addressable row
        let Some(next) = r.checked_add(1) else {
            continue;
        };
        for c in range.first_column..=range.last_column {
            let data = doc.read(r, c);
            doc.write(next, c, &data, format);
        }
    }
}

pub fn write_first_row<D: Document>(doc: &mut D, range: Option<CellRange>) {
    let Some(range) = range else {
        return;
    };
    for c in range.first_column..=range.last_column {
        doc.write(1, c, &CellValue::from(c), None);
    }
}

pub fn create_file<B: Backend>(backend: &B, config: &BenchConfig) -> ScenarioReport {
    let mut sw = Stopwatch::new();
    let mut report = ScenarioReport::new("create");
    {
        let mut xlsx = backend.create();

        for i in 1..config.rows {
            for j in 1..config.columns {
                xlsx.write(i, j, &CellValue::from(format!("row {i} column {j}")), None);
            }
        }
        report.record(format!("write ({}) data", grid_label(config)), sw.elapsed());

        if let Err(e) = xlsx.save_as(&config.path) {
            return report.save_failed(&config.path, &e);
        }
        report.record(format!("save ({}) data", grid_label(config)), sw.elapsed());
    }
    report.record("release xlsx", sw.elapsed());
    report
}

pub fn just_read_data<B: Backend>(backend: &B, config: &BenchConfig) -> ScenarioReport {
    let mut sw = Stopwatch::new();
    let mut report = ScenarioReport::new("just read");
    {
        let mut big_xlsx = open_document(backend, &config.path, &mut sw, &mut report);

        let range = big_xlsx.dimension();
        shift_rows(&mut big_xlsx, range, None);
        report.record(format!("read data ({})", grid_label(config)), sw.elapsed());

        if let Err(e) = big_xlsx.save_as(&config.path) {
            return report.save_failed(&config.path, &e);
        }
    }
    report.record("release xlsx object", sw.elapsed());
    report
}

pub fn move_data_to_next_row<B: Backend>(
    backend: &B,
    config: &BenchConfig,
    with_format: bool,
) -> ScenarioReport {
    let mut sw = Stopwatch::new();
    let mut report = ScenarioReport::new(if with_format {
        "move with format"
    } else {
        "move without format"
    });
    {
        let mut big_xlsx = open_document(backend, &config.path, &mut sw, &mut report);

        let range = big_xlsx.dimension();
        let format = with_format.then(normal_format);
        shift_rows(&mut big_xlsx, range, format.as_ref());
        report.record("rewrite data to next row", sw.elapsed());

        write_first_row(&mut big_xlsx, range);
        report.record(
            format!("write one row (1 x {}) data", config.columns),
            sw.elapsed(),
        );

        if let Err(e) = big_xlsx.save_as(&config.path) {
            return report.save_failed(&config.path, &e);
        }
        report.record(format!("save ({}) data", grid_label(config)), sw.elapsed());
    }
    report.record("release xlsx object", sw.elapsed());
    report
}

/// A failed scenario never stops the next one.
pub fn run_scenarios<B: Backend>(
    backend: &B,
    config: &BenchConfig,
    mut after_each: impl FnMut(&ScenarioReport),
) -> Vec<ScenarioReport> {
    let mut reports = Vec::with_capacity(4);

    info!("----------create a xlsx file--------------");
    let report = create_file(backend, config);
    after_each(&report);
    reports.push(report);

    info!("----------just read data--------------");
    let report = just_read_data(backend, config);
    after_each(&report);
    reports.push(report);

    info!("----------read and write without format--------------");
    let report = move_data_to_next_row(backend, config, false);
    after_each(&report);
    reports.push(report);

    info!("----------read and write with format--------------");
    let report = move_data_to_next_row(backend, config, true);
    after_each(&report);
    reports.push(report);

    reports
}

fn log_file_dimension(path: &Path) {
    match probe::file_dimension(path) {
        Ok(Some(range)) => info!("[{}] on disk: {range}", path.display()),
        Ok(None) => info!("[{}] on disk: empty", path.display()),
        Err(e) => warn!("[{}] probe failed: {e:#}", path.display()),
    }
}

pub fn open_big_file(is_test: bool, config: &BenchConfig) {
    if !is_test {
        return;
    }
    info!(
        "benchmark started at {} ({})",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        config.path.display()
    );
    run_scenarios(&UmyaBackend, config, |_| log_file_dimension(&config.path));
}

pub fn init_logging() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("XLSXBENCH_LOG")
        .try_init()
        .context("cannot initialise logger")
}

pub fn run(args: impl IntoIterator<Item = OsString>) -> Result<()> {
    init_logging()?;
    let config = BenchConfig::from_args(args)?;
    open_big_file(true, &config);
    Ok(())
}
