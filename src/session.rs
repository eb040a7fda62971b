//! Session State
//! Per-session dataset, fit and derived outputs, with an explicit table of
//! which derived value depends on which trigger.

use crate::charts::ChartArtifact;
use crate::data::{DataError, DataLoader, Dataset, LoaderError, TableView};
use crate::export::{ExportError, ExportPackager, ExportReport};
use crate::stats::{FitResult, LinearRegression, RegressionError, SummaryFormatter};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Regression(#[from] RegressionError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("No chart to export yet")]
    NothingToExport,
}

/// Discrete user actions that invalidate derived values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Upload,
    FitModel,
}

/// Values computed from the dataset and the fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derived {
    Table,
    Scatter,
    Fit,
    Overlay,
    Summary,
}

/// Every derived value with the triggers it depends on, in evaluation order
/// (`Fit` before the outputs that read it).
pub const DEPENDENCIES: &[(Derived, &[Trigger])] = &[
    (Derived::Table, &[Trigger::Upload]),
    (Derived::Scatter, &[Trigger::Upload]),
    (Derived::Fit, &[Trigger::Upload, Trigger::FitModel]),
    (Derived::Overlay, &[Trigger::Upload, Trigger::FitModel]),
    (Derived::Summary, &[Trigger::Upload, Trigger::FitModel]),
];

/// Derived values to recompute after `trigger`.
pub fn dependents(trigger: Trigger) -> Vec<Derived> {
    DEPENDENCIES
        .iter()
        .filter(|(_, inputs)| inputs.contains(&trigger))
        .map(|(derived, _)| *derived)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoData,
    DataLoaded,
    Modeled,
}

/// Everything one user session owns.
#[derive(Default)]
pub struct Session {
    loader: DataLoader,
    pub dataset: Option<Dataset>,
    pub fit: Option<FitResult>,
    pub table: Option<TableView>,
    pub scatter: Option<ChartArtifact>,
    pub overlay: Option<ChartArtifact>,
    pub summary: Option<String>,
}

impl Session {
    pub fn new(loader: DataLoader) -> Self {
        Self {
            loader,
            ..Default::default()
        }
    }

    pub fn state(&self) -> SessionState {
        match (&self.dataset, &self.fit) {
            (None, _) => SessionState::NoData,
            (Some(_), None) => SessionState::DataLoaded,
            (Some(_), Some(_)) => SessionState::Modeled,
        }
    }

    /// Replace the dataset with the file at `path`.
    ///
    /// A missing file is a no-op. A malformed file keeps the current dataset.
    /// A previous fit is cleared, never shown against new data.
    pub fn upload(&mut self, path: &Path) -> Result<(), SessionError> {
        let dataset = match self.loader.load_csv(path) {
            Ok(ds) => ds,
            Err(LoaderError::Missing(p)) => {
                log::warn!("Upload skipped, no file at {}", p.display());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        self.dataset = Some(dataset);
        self.apply(Trigger::Upload)
    }

    /// Fit the first two columns and build the overlay. No-op without data.
    pub fn fit_model(&mut self) -> Result<(), SessionError> {
        if self.dataset.is_none() {
            log::debug!("Fit requested with no dataset");
            return Ok(());
        }
        self.apply(Trigger::FitModel)
    }

    /// Archive the scatter chart plus the overlay when one exists.
    pub fn export(
        &self,
        packager: &ExportPackager,
        dest: &Path,
    ) -> Result<ExportReport, SessionError> {
        let scatter = self.scatter.as_ref().ok_or(SessionError::NothingToExport)?;
        Ok(packager.export(scatter, self.overlay.as_ref(), dest)?)
    }

    /// Recompute every dependent of `trigger`. A failing value is cleared and
    /// the rest still run; the first error is returned.
    fn apply(&mut self, trigger: Trigger) -> Result<(), SessionError> {
        let mut first_err = None;

        for derived in dependents(trigger) {
            if let Err(e) = self.recompute(derived, trigger) {
                log::warn!("{derived:?} not available: {e}");
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn recompute(&mut self, derived: Derived, trigger: Trigger) -> Result<(), SessionError> {
        match derived {
            Derived::Table => {
                self.table = self.dataset.as_ref().map(TableView::from_dataset);
            }
            Derived::Scatter => {
                self.scatter = None;
                if let Some(ds) = &self.dataset {
                    self.scatter = Some(ChartArtifact::scatter(ds)?);
                }
            }
            Derived::Fit => {
                self.fit = None;
                if trigger == Trigger::FitModel {
                    if let Some(ds) = &self.dataset {
                        let (x, y) = ds.numeric_pair()?;
                        let fit = LinearRegression::fit(&x, &y)?;
                        log::info!("Fit: {}", serde_json::to_string(&fit).unwrap_or_default());
                        self.fit = Some(fit);
                    }
                }
            }
            Derived::Overlay => {
                self.overlay = match (&self.scatter, &self.fit) {
                    (Some(base), Some(fit)) => Some(ChartArtifact::overlay(base, fit)),
                    _ => None,
                };
            }
            Derived::Summary => {
                self.summary = None;
                if let (Some(ds), Some(fit)) = (&self.dataset, &self.fit) {
                    let (x_name, y_name) = ds.axis_names()?;
                    self.summary = Some(SummaryFormatter::format(fit, &x_name, &y_name));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::RenderOptions;
    use std::path::PathBuf;

    fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    fn packager(scratch: &Path) -> ExportPackager {
        ExportPackager::new(RenderOptions {
            width: 240,
            height: 180,
            draw_labels: false,
        })
        .with_scratch_root(scratch)
    }

    #[test]
    fn dependency_table() {
        assert_eq!(
            dependents(Trigger::Upload),
            vec![
                Derived::Table,
                Derived::Scatter,
                Derived::Fit,
                Derived::Overlay,
                Derived::Summary
            ]
        );
        assert_eq!(
            dependents(Trigger::FitModel),
            vec![Derived::Fit, Derived::Overlay, Derived::Summary]
        );
    }

    #[test]
    fn upload_then_fit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "xy.csv", "x,y\n1,2\n2,4\n3,6\n");
        let mut session = Session::default();
        assert_eq!(session.state(), SessionState::NoData);

        session.upload(&path).unwrap();
        assert_eq!(session.state(), SessionState::DataLoaded);
        assert_eq!(session.table.as_ref().unwrap().row_count(), 3);
        assert!(session.scatter.is_some());
        assert!(session.overlay.is_none());
        assert!(session.summary.is_none());

        session.fit_model().unwrap();
        assert_eq!(session.state(), SessionState::Modeled);
        let fit = session.fit.unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!(fit.intercept.abs() < 1e-9);
        assert!((fit.correlation - 1.0).abs() < 1e-9);
        assert!(session.overlay.is_some());
        assert!(session.summary.as_ref().unwrap().contains("Slope:        2.0000"));

        // Unchanged data, identical fit
        session.fit_model().unwrap();
        let again = session.fit.unwrap();
        assert_eq!(fit.slope.to_bits(), again.slope.to_bits());
        assert_eq!(fit.intercept.to_bits(), again.intercept.to_bits());
    }

    #[test]
    fn new_upload_clears_the_fit() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_csv(dir.path(), "a.csv", "x,y\n1,2\n2,4\n3,6\n");
        let second = write_csv(dir.path(), "b.csv", "u,v\n1,1\n2,3\n3,2\n4,5\n");
        let mut session = Session::default();

        session.upload(&first).unwrap();
        session.fit_model().unwrap();
        assert_eq!(session.state(), SessionState::Modeled);

        session.upload(&second).unwrap();
        assert_eq!(session.state(), SessionState::DataLoaded);
        assert!(session.fit.is_none());
        assert!(session.overlay.is_none());
        assert!(session.summary.is_none());
        assert_eq!(session.scatter.as_ref().unwrap().x_label, "u");
    }

    #[test]
    fn single_column_shows_table_but_no_scatter() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "one.csv", "x\n1\n2\n3\n");
        let mut session = Session::default();

        let err = session.upload(&path).unwrap_err();
        assert!(matches!(err, SessionError::Data(DataError::TooFewColumns(1))));
        assert!(session.table.is_some());
        assert!(session.scatter.is_none());

        let err = session.fit_model().unwrap_err();
        assert!(matches!(err, SessionError::Data(DataError::TooFewColumns(1))));
        assert_eq!(session.state(), SessionState::DataLoaded);
    }

    #[test]
    fn zero_variance_fit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "flat.csv", "x,y\n2,1\n2,5\n2,3\n");
        let mut session = Session::default();
        session.upload(&path).unwrap();

        let err = session.fit_model().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Regression(RegressionError::ZeroVariance)
        ));
        assert!(session.overlay.is_none());
        assert!(session.scatter.is_some());
    }

    #[test]
    fn nan_cell_is_reported_as_non_numeric() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "nan.csv", "x,y\n1,2\nNaN,4\n3,6\n");
        let mut session = Session::default();

        let err = session.upload(&path).unwrap_err();
        assert!(matches!(err, SessionError::Data(DataError::NonNumeric(ref c)) if c == "x"));
        assert!(session.table.is_some());
        assert!(session.scatter.is_none());

        let err = session.fit_model().unwrap_err();
        assert!(matches!(err, SessionError::Data(DataError::NonNumeric(_))));
        assert!(session.fit.is_none());
    }

    #[test]
    fn malformed_upload_keeps_previous_data() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_csv(dir.path(), "good.csv", "x,y\n1,2\n2,4\n");
        let bad = write_csv(dir.path(), "bad.csv", "x,y\n1,2\n3,4,5,6\n");
        let mut session = Session::default();

        session.upload(&good).unwrap();
        let err = session.upload(&bad).unwrap_err();
        assert!(matches!(err, SessionError::Load(LoaderError::CsvError(_))));
        assert_eq!(session.dataset.as_ref().unwrap().file_name(), "good.csv");
        assert!(session.scatter.is_some());
    }

    #[test]
    fn missing_inputs_are_no_ops() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::default();

        session.upload(&dir.path().join("absent.csv")).unwrap();
        session.fit_model().unwrap();
        assert_eq!(session.state(), SessionState::NoData);
        assert!(session.table.is_none());

        let err = session
            .export(&packager(dir.path()), &dir.path().join("out.zip"))
            .unwrap_err();
        assert!(matches!(err, SessionError::NothingToExport));
    }

    #[test]
    fn export_entries_follow_state() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "xy.csv", "x,y\n1,2.5\n2,3.9\n3,6.2\n4,8.1\n");
        let mut session = Session::default();
        session.upload(&path).unwrap();

        let loaded = session
            .export(&packager(scratch.path()), &dir.path().join("loaded.zip"))
            .unwrap();
        assert_eq!(loaded.entries, vec!["scatter.png"]);

        session.fit_model().unwrap();
        let modeled = session
            .export(&packager(scratch.path()), &dir.path().join("modeled.zip"))
            .unwrap();
        assert_eq!(modeled.entries.len(), 2);
        assert!(modeled.archive.exists());
    }
}
