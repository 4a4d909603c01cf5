use super::{ReportError, StateReporter};
use crate::core::models::observables::{ObservableFields, StateSample};
use crate::engine::traits::MdEngine;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Formatted-column state log, one row per report boundary.
///
/// Matches the engine's own state-data output: a header row naming the
/// selected observable columns, then one CSV record per sample. Disabled
/// fields are omitted entirely.
pub struct StateDataReporter<W: Write> {
    writer: csv::Writer<W>,
    interval: u64,
    fields: ObservableFields,
    header_written: bool,
}

impl StateDataReporter<File> {
    pub fn from_path(
        path: &Path,
        interval: u64,
        fields: ObservableFields,
    ) -> Result<Self, ReportError> {
        Ok(Self::new(File::create(path)?, interval, fields))
    }
}

impl<W: Write> StateDataReporter<W> {
    pub fn new(sink: W, interval: u64, fields: ObservableFields) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
            interval,
            fields,
            header_written: false,
        }
    }

    fn write_header(&mut self) -> Result<(), ReportError> {
        let mut header = Vec::new();
        if self.fields.step {
            header.push("Step");
        }
        if self.fields.potential_energy {
            header.push("Potential Energy (kJ/mole)");
        }
        if self.fields.temperature {
            header.push("Temperature (K)");
        }
        if self.fields.volume {
            header.push("Box Volume (nm^3)");
        }
        self.writer.write_record(&header)?;
        Ok(())
    }
}

impl<W: Write> StateReporter for StateDataReporter<W> {
    fn interval(&self) -> u64 {
        self.interval
    }

    fn report(
        &mut self,
        _engine: &mut dyn MdEngine,
        sample: &StateSample,
    ) -> Result<(), ReportError> {
        if !self.header_written {
            self.write_header()?;
            self.header_written = true;
        }

        let mut record = Vec::new();
        if self.fields.step {
            record.push(sample.step.to_string());
        }
        if self.fields.potential_energy {
            record.push(format!("{:.6}", sample.potential_energy_kj_mol));
        }
        if self.fields.temperature {
            record.push(format!("{:.6}", sample.temperature_k));
        }
        if self.fields.volume {
            record.push(format!("{:.6}", sample.volume_nm3));
        }
        self.writer.write_record(&record)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dryrun::DryRunEngine;

    fn sample(step: u64) -> StateSample {
        StateSample {
            step,
            potential_energy_kj_mol: -220_000.5,
            temperature_k: 299.25,
            volume_nm3: 216.0,
        }
    }

    #[test]
    fn writes_header_then_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("md_log.txt");
        let mut engine = DryRunEngine::new();
        let mut reporter =
            StateDataReporter::from_path(&path, 1_000, ObservableFields::all()).unwrap();
        reporter.report(&mut engine, &sample(1_000)).unwrap();
        reporter.report(&mut engine, &sample(2_000)).unwrap();

        let output = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Step,Potential Energy (kJ/mole),Temperature (K),Box Volume (nm^3)"
        );
        assert!(lines[1].starts_with("1000,-220000.5"));
        assert!(lines[2].starts_with("2000,-220000.5"));
    }

    #[test]
    fn disabled_fields_are_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("md_log.txt");
        let mut engine = DryRunEngine::new();
        let fields = ObservableFields {
            step: true,
            potential_energy: true,
            temperature: false,
            volume: false,
        };
        let mut reporter = StateDataReporter::from_path(&path, 1_000, fields).unwrap();
        reporter.report(&mut engine, &sample(1_000)).unwrap();

        let output = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "Step,Potential Energy (kJ/mole)");
        assert_eq!(lines[1], "1000,-220000.500000");
    }

    #[test]
    fn from_path_creates_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("md_log.txt");
        let mut engine = DryRunEngine::new();
        let mut reporter =
            StateDataReporter::from_path(&path, 1_000, ObservableFields::all()).unwrap();
        reporter.report(&mut engine, &sample(1_000)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Step,"));
        assert_eq!(contents.lines().count(), 2);
    }
}
