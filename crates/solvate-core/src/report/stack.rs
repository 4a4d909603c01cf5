use super::{ReportError, StateReporter};
use crate::core::models::observables::StateSample;
use crate::engine::traits::MdEngine;

/// An ordered sequence of reporters attached to one simulation run.
///
/// The stack owns boundary scheduling: [`ReporterStack::next_boundary`] gives
/// the next step at which any reporter is due, and
/// [`ReporterStack::report_due`] drives every due reporter, in attachment
/// order, with the same sample. Reporters registered with the same interval
/// therefore always fire together.
#[derive(Default)]
pub struct ReporterStack {
    reporters: Vec<Box<dyn StateReporter>>,
}

impl ReporterStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reporter: Box<dyn StateReporter>) {
        debug_assert!(reporter.interval() > 0, "reporter interval must be nonzero");
        self.reporters.push(reporter);
    }

    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }

    /// The smallest multiple of any reporter interval strictly greater than
    /// `current`, or `None` when the stack is empty.
    pub fn next_boundary(&self, current: u64) -> Option<u64> {
        self.reporters
            .iter()
            .map(|r| r.interval())
            .filter(|&i| i > 0)
            .map(|i| (current / i + 1) * i)
            .min()
    }

    /// Whether any reporter is due at `step`.
    pub fn any_due(&self, step: u64) -> bool {
        step > 0
            && self
                .reporters
                .iter()
                .any(|r| r.interval() > 0 && step % r.interval() == 0)
    }

    /// Invokes every reporter whose interval divides `sample.step`.
    pub fn report_due(
        &mut self,
        engine: &mut dyn MdEngine,
        sample: &StateSample,
    ) -> Result<(), ReportError> {
        for reporter in &mut self.reporters {
            let interval = reporter.interval();
            if interval > 0 && sample.step % interval == 0 {
                reporter.report(&mut *engine, sample)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dryrun::DryRunEngine;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingReporter {
        interval: u64,
        label: &'static str,
        log: Rc<RefCell<Vec<(&'static str, u64)>>>,
    }

    impl StateReporter for RecordingReporter {
        fn interval(&self) -> u64 {
            self.interval
        }

        fn report(
            &mut self,
            _engine: &mut dyn MdEngine,
            sample: &StateSample,
        ) -> Result<(), ReportError> {
            self.log.borrow_mut().push((self.label, sample.step));
            Ok(())
        }
    }

    fn sample(step: u64) -> StateSample {
        StateSample {
            step,
            potential_energy_kj_mol: 0.0,
            temperature_k: 0.0,
            volume_nm3: 0.0,
        }
    }

    fn stack_with(
        intervals: &[(&'static str, u64)],
    ) -> (ReporterStack, Rc<RefCell<Vec<(&'static str, u64)>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut stack = ReporterStack::new();
        for &(label, interval) in intervals {
            stack.push(Box::new(RecordingReporter {
                interval,
                label,
                log: log.clone(),
            }));
        }
        (stack, log)
    }

    #[test]
    fn next_boundary_is_smallest_upcoming_multiple() {
        let (stack, _log) = stack_with(&[("a", 10_000), ("b", 1_000)]);
        assert_eq!(stack.next_boundary(0), Some(1_000));
        assert_eq!(stack.next_boundary(1_000), Some(2_000));
        assert_eq!(stack.next_boundary(9_999), Some(10_000));
        assert_eq!(stack.next_boundary(10_000), Some(11_000));
    }

    #[test]
    fn empty_stack_has_no_boundary() {
        let stack = ReporterStack::new();
        assert_eq!(stack.next_boundary(0), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn due_reporters_fire_in_attachment_order() {
        let (mut stack, log) = stack_with(&[("console", 10_000), ("log", 1_000)]);
        let mut engine = DryRunEngine::new();

        stack.report_due(&mut engine, &sample(1_000)).unwrap();
        stack.report_due(&mut engine, &sample(10_000)).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![("log", 1_000), ("console", 10_000), ("log", 10_000)]
        );
    }

    #[test]
    fn same_interval_reporters_are_never_skipped_independently() {
        let (mut stack, log) = stack_with(&[("console", 10_000), ("columns", 10_000)]);
        let mut engine = DryRunEngine::new();

        for step in [10_000, 20_000, 30_000] {
            stack.report_due(&mut engine, &sample(step)).unwrap();
        }

        let entries = log.borrow();
        let console: Vec<_> = entries.iter().filter(|(l, _)| *l == "console").collect();
        let columns: Vec<_> = entries.iter().filter(|(l, _)| *l == "columns").collect();
        assert_eq!(console.len(), 3);
        assert_eq!(columns.len(), 3);
        for ((_, a), (_, b)) in console.iter().zip(columns.iter()) {
            assert_eq!(a, b);
        }
    }
}
