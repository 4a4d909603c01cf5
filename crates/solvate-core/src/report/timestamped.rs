use super::{ReportError, StateReporter};
use crate::core::models::observables::StateSample;
use crate::engine::traits::MdEngine;
use chrono::{Local, NaiveTime};
use std::io::{self, Write};

/// Writes one wall-clock-stamped progress line per report boundary.
///
/// The line format is fixed:
/// `HH:MM:SS - Step: <step>, Energy: <potential energy> kJ/mol`.
pub struct TimestampedReporter<W: Write> {
    sink: W,
    interval: u64,
}

impl TimestampedReporter<io::Stdout> {
    /// A reporter printing to standard output, the default console sink.
    pub fn stdout(interval: u64) -> Self {
        Self::new(io::stdout(), interval)
    }
}

impl<W: Write> TimestampedReporter<W> {
    pub fn new(sink: W, interval: u64) -> Self {
        Self { sink, interval }
    }

    fn format_line(time: NaiveTime, sample: &StateSample) -> String {
        format!(
            "{} - Step: {}, Energy: {:.4} kJ/mol",
            time.format("%H:%M:%S"),
            sample.step,
            sample.potential_energy_kj_mol
        )
    }
}

impl<W: Write> StateReporter for TimestampedReporter<W> {
    fn interval(&self) -> u64 {
        self.interval
    }

    fn report(
        &mut self,
        _engine: &mut dyn MdEngine,
        sample: &StateSample,
    ) -> Result<(), ReportError> {
        let line = Self::format_line(Local::now().time(), sample);
        writeln!(self.sink, "{}", line)?;
        self.sink.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dryrun::DryRunEngine;

    fn sample(step: u64, energy: f64) -> StateSample {
        StateSample {
            step,
            potential_energy_kj_mol: energy,
            temperature_k: 300.0,
            volume_nm3: 216.0,
        }
    }

    #[test]
    fn line_format_matches_contract() {
        let time = NaiveTime::from_hms_opt(13, 5, 9).unwrap();
        let line = TimestampedReporter::<Vec<u8>>::format_line(time, &sample(10_000, -220_123.4567));
        assert_eq!(line, "13:05:09 - Step: 10000, Energy: -220123.4567 kJ/mol");
    }

    #[test]
    fn report_writes_one_line_per_invocation() {
        let mut engine = DryRunEngine::new();
        let mut reporter = TimestampedReporter::new(Vec::new(), 10_000);
        reporter.report(&mut engine, &sample(10_000, -1.0)).unwrap();
        reporter.report(&mut engine, &sample(20_000, -2.0)).unwrap();

        let output = String::from_utf8(reporter.sink).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Step: 10000, Energy: -1.0000 kJ/mol"));
        assert!(lines[1].contains("Step: 20000, Energy: -2.0000 kJ/mol"));

        // Timestamp prefix is HH:MM:SS followed by " - ".
        let (stamp, rest) = lines[0].split_once(" - ").unwrap();
        assert_eq!(stamp.len(), 8);
        assert_eq!(stamp.matches(':').count(), 2);
        assert!(rest.starts_with("Step: "));
    }
}
