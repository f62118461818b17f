/*!
Reporting sinks.

A sink is an append-only destination for [`Report`]s. Sinks never return a
value and are not retried; a failing sink is the sink's own concern.
*/

use parking_lot::Mutex;

use crate::types::Report;

/// Destination for reports.
pub trait ReportSink: Send + Sync {
  /// Deliver one report. Called once per capture, in capture order.
  fn report(&self, report: &Report);
}

impl<F: Fn(&Report) + Send + Sync> ReportSink for F {
  fn report(&self, report: &Report) {
    self(report);
  }
}

/// Writes reports through the `log` facade.
///
/// Snapshots are rendered as JSON, poll ticks as `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
  level: log::Level,
}

impl Default for LogSink {
  fn default() -> Self {
    Self::new()
  }
}

impl LogSink {
  /// Log at `Info`.
  pub const fn new() -> Self {
    Self {
      level: log::Level::Info,
    }
  }

  /// Log at `level` instead of `Info`.
  pub const fn with_level(level: log::Level) -> Self {
    Self { level }
  }

  /// The line this sink writes for `report`.
  pub fn format(report: &Report) -> String {
    let label = report.label();
    match report {
      Report::Initial(snapshot) | Report::Resized(snapshot) => match serde_json::to_string(snapshot)
      {
        Ok(json) => format!("{label}: {json}"),
        Err(_) => format!("{label}: {snapshot:?}"),
      },
      Report::Current { size } => format!("{label}: {size}"),
    }
  }
}

impl ReportSink for LogSink {
  fn report(&self, report: &Report) {
    log::log!(target: "dimio", self.level, "{}", Self::format(report));
  }
}

/// Records reports in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
  reports: Mutex<Vec<Report>>,
}

impl MemorySink {
  pub fn new() -> Self {
    Self::default()
  }

  /// Copy of everything recorded so far.
  /// Every report so far, oldest first.
  pub fn reports(&self) -> Vec<Report> {
    self.reports.lock().clone()
  }

  pub fn last(&self) -> Option<Report> {
    self.reports.lock().last().cloned()
  }

  pub fn len(&self) -> usize {
    self.reports.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.reports.lock().is_empty()
  }

  /// Drain recorded reports.
  pub fn take(&self) -> Vec<Report> {
    std::mem::take(&mut *self.reports.lock())
  }
}

impl ReportSink for MemorySink {
  fn report(&self, report: &Report) {
    self.reports.lock().push(report.clone());
  }
}
