//! Chart Export Packager
//! Renders the current charts to PNG in a scoped temporary directory and
//! bundles them into one dated ZIP archive.

use crate::charts::{ChartArtifact, RenderError, RenderOptions, StaticChartRenderer};
use chrono::{Local, NaiveDate};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::write::FileOptions;
use zip::ZipWriter;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// What one export wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub archive: PathBuf,
    pub entries: Vec<String>,
}

/// Writes chart archives. Scratch files never outlive one `export` call.
pub struct ExportPackager {
    options: RenderOptions,
    scratch_root: Option<PathBuf>,
}

impl ExportPackager {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            scratch_root: None,
        }
    }

    /// Create scratch directories under `root` instead of the system temp dir.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// `charts-YYYY-MM-DD.zip`
    pub fn archive_name(date: NaiveDate) -> String {
        format!("charts-{}.zip", date.format("%Y-%m-%d"))
    }

    /// Archive name for today's local date.
    pub fn default_archive_name() -> String {
        Self::archive_name(Local::now().date_naive())
    }

    /// Render `scatter` and, when present, `overlay`, then write the archive
    /// to `dest`. `dest` is only touched once every step has succeeded.
    pub fn export(
        &self,
        scatter: &ChartArtifact,
        overlay: Option<&ChartArtifact>,
        dest: &Path,
    ) -> Result<ExportReport, ExportError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("chartify-export-");
        let scratch = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        log::debug!("Export scratch dir: {}", scratch.path().display());

        let charts: Vec<&ChartArtifact> = std::iter::once(scatter).chain(overlay).collect();

        let mut images = Vec::with_capacity(charts.len());
        for chart in charts {
            let name = chart.kind.file_name();
            let path = scratch.path().join(name);
            StaticChartRenderer::render_png(chart, &path, self.options)?;
            images.push((name.to_string(), path));
        }

        let staged = scratch.path().join("bundle.zip");
        Self::write_archive(&images, &staged)?;
        std::fs::copy(&staged, dest)?;

        let entries: Vec<String> = images.into_iter().map(|(name, _)| name).collect();
        log::info!(
            "Exported {} chart(s) to {}",
            entries.len(),
            dest.display()
        );

        // `scratch` is removed here, and on every early return above
        Ok(ExportReport {
            archive: dest.to_path_buf(),
            entries,
        })
    }

    fn write_archive(images: &[(String, PathBuf)], archive: &Path) -> Result<(), ExportError> {
        let file = File::create(archive)?;
        let mut zip = ZipWriter::new(file);
        let options = FileOptions::default();

        for (name, path) in images {
            let bytes = std::fs::read(path)?;
            zip.start_file(name.as_str(), options)?;
            zip.write_all(&bytes)?;
        }

        zip.finish()?;
        Ok(())
    }
}
