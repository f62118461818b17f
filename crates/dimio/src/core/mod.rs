/*!
Core Monitor instance - owns the host, the sink and report broadcasting.

# Module Structure

- `mod.rs` - Monitor struct, builder, report fan-out
- `describe.rs` - startup summary of every dimension group

# Example

```ignore
use dimio::{Monitor, MemoryHost, SignalBus, HostSignal};

let monitor = Monitor::builder()
    .host(Arc::new(MemoryHost::with_viewport(375, 812)))
    .build()?;

let bus = SignalBus::new();
let _listener = monitor.listen(&bus);
let _poller = monitor.start_polling()?;

let mut reports = monitor.subscribe();
bus.emit(HostSignal::Load);
while let Ok(report) = reports.recv().await {
    // handle report
}
```
*/

mod describe;

use async_broadcast::{InactiveReceiver, Sender};
use std::sync::Arc;

use crate::bridge::{self, ListenerHandle};
use crate::dispatch::Dispatcher;
use crate::platform::{HostEnvironment, SignalSource};
use crate::polling::{self, PollingConfig, PollingHandle};
use crate::sink::{LogSink, ReportSink};
use crate::types::{Breakpoints, DeviceClass, DimensionSnapshot, DimioError, DimioResult, Report};

const REPORT_CHANNEL_CAPACITY: usize = 256;

/// Delivers every report to the configured sink, then broadcasts it.
struct FanoutSink {
  sink: Arc<dyn ReportSink>,
  reports_tx: Sender<Report>,
}

impl ReportSink for FanoutSink {
  fn report(&self, report: &Report) {
    self.sink.report(report);
    if let Err(e) = self.reports_tx.try_broadcast(report.clone()) {
      if e.is_full() {
        log::error!("Report channel overflow - reports are being dropped.");
      }
    }
  }
}

/// Main Monitor instance - reads dimensions, classifies them, and reports
/// them from host signals and polling.
///
/// Clone is cheap (Arc bumps) - share freely across threads.
#[derive(Clone)]
pub struct Monitor {
  dispatcher: Arc<Dispatcher>,
  breakpoints: Breakpoints,
  polling: PollingConfig,
  reports_keepalive: InactiveReceiver<Report>,
}

impl std::fmt::Debug for Monitor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Monitor")
      .field("breakpoints", &self.breakpoints)
      .field("polling", &self.polling)
      .finish_non_exhaustive()
  }
}

/// Builder for configuring a Monitor instance.
///
/// # Example
///
/// ```ignore
/// let monitor = Monitor::builder()
///     .host(Arc::new(BrowserHost::new()?))
///     .sink(Arc::new(LogSink::new()))
///     .interval_ms(500)
///     .build()?;
/// ```
#[derive(Default)]
#[must_use = "Builder does nothing until .build() is called"]
pub struct MonitorBuilder {
  host: Option<Arc<dyn HostEnvironment>>,
  sink: Option<Arc<dyn ReportSink>>,
  breakpoints: Breakpoints,
  polling: PollingConfig,
}

impl std::fmt::Debug for MonitorBuilder {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("MonitorBuilder")
      .field("has_host", &self.host.is_some())
      .field("has_sink", &self.sink.is_some())
      .field("breakpoints", &self.breakpoints)
      .field("polling", &self.polling)
      .finish()
  }
}

impl MonitorBuilder {
  /// Host to read dimensions from. Required.
  pub fn host(mut self, host: Arc<dyn HostEnvironment>) -> Self {
    self.host = Some(host);
    self
  }

  /// Where reports go. Default: [`LogSink`].
  pub fn sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
    self.sink = Some(sink);
    self
  }

  /// Device class thresholds. Default: 768 / 1024.
  pub fn breakpoints(mut self, breakpoints: Breakpoints) -> Self {
    self.breakpoints = breakpoints;
    self
  }

  /// Poll interval in milliseconds. Default: 1000.
  pub fn interval_ms(mut self, ms: u64) -> Self {
    self.polling.interval_ms = ms;
    self
  }

  /// Build the Monitor.
  ///
  /// Returns an error if no host was given or the poll interval is zero.
  pub fn build(self) -> DimioResult<Monitor> {
    let host = self
      .host
      .ok_or_else(|| DimioError::HostUnavailable("no host configured".to_owned()))?;
    let polling = self.polling.validate()?;
    let sink = self.sink.unwrap_or_else(|| Arc::new(LogSink::new()));

    let (mut tx, rx) = async_broadcast::broadcast(REPORT_CHANNEL_CAPACITY);
    tx.set_overflow(true); // Drop oldest reports when full

    let fanout = FanoutSink {
      sink,
      reports_tx: tx,
    };

    Ok(Monitor {
      dispatcher: Arc::new(Dispatcher::new(host, Arc::new(fanout))),
      breakpoints: self.breakpoints,
      polling,
      reports_keepalive: rx.deactivate(),
    })
  }
}

impl Monitor {
  /// Create a builder for configuring a new Monitor.
  pub fn builder() -> MonitorBuilder {
    MonitorBuilder::default()
  }

  /// Monitor over `host` with default configuration (logging sink, 1s polling).
  pub fn new(host: Arc<dyn HostEnvironment>) -> DimioResult<Self> {
    Self::builder().host(host).build()
  }

  pub const fn breakpoints(&self) -> Breakpoints {
    self.breakpoints
  }

  pub const fn polling_config(&self) -> PollingConfig {
    self.polling
  }

  /// Read every dimension now.
  pub fn capture(&self) -> DimensionSnapshot {
    self.dispatcher.capture()
  }

  /// Device class of the current viewport.
  pub fn device_class(&self) -> DeviceClass {
    self.capture().device_class(&self.breakpoints)
  }

  /// Report a full snapshot on every `load` and `resize` from `source`.
  pub fn listen(&self, source: &dyn SignalSource) -> ListenerHandle {
    bridge::listen_with(Arc::clone(&self.dispatcher), source)
  }

  /// Report the condensed viewport every configured interval.
  pub fn start_polling(&self) -> DimioResult<PollingHandle> {
    polling::start_polling_with(Arc::clone(&self.dispatcher), self.polling)
  }

  /// Run one poll tick now.
  pub fn poll_once(&self) {
    self.dispatcher.on_tick();
  }

  /// Subscribe to every report this monitor produces.
  pub fn subscribe(&self) -> async_broadcast::Receiver<Report> {
    self.reports_keepalive.activate_cloned()
  }
}
