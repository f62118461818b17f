/*!
Fixed-interval dimension polling.

Each tick captures a snapshot and reports the condensed viewport
(`WIDTHxHEIGHT`). The first tick fires one interval after start. Ticks run to
completion; drift is left to the scheduler.

Native targets poll on a dedicated thread that waits on a condition variable
between ticks, so stopping never waits out a full interval. On `wasm32` the
browser's `setInterval` drives ticks through `gloo-timers`.
*/

use std::sync::Arc;
use std::time::Duration;

use crate::dispatch::Dispatcher;
use crate::platform::HostEnvironment;
use crate::sink::ReportSink;
use crate::types::{DimioError, DimioResult, Report};

#[cfg(not(target_arch = "wasm32"))]
use parking_lot::{Condvar, Mutex};
#[cfg(not(target_arch = "wasm32"))]
use std::thread::{self, JoinHandle};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

const DEFAULT_POLLING_INTERVAL_MS: u64 = 1000;

/// Poller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
  /// Time between ticks in milliseconds. Default: 1000.
  pub interval_ms: u64,
}

impl Default for PollingConfig {
  fn default() -> Self {
    Self {
      interval_ms: DEFAULT_POLLING_INTERVAL_MS,
    }
  }
}

impl PollingConfig {
  /// Interval as a [`Duration`].
  pub const fn interval(&self) -> Duration {
    Duration::from_millis(self.interval_ms)
  }

  pub(crate) fn validate(self) -> DimioResult<Self> {
    if self.interval_ms == 0 {
      return Err(DimioError::InvalidInterval);
    }
    Ok(self)
  }
}

/// Wakeable stop flag for the polling thread.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
struct StopSignal {
  stopped: Mutex<bool>,
  wake: Condvar,
}

#[cfg(not(target_arch = "wasm32"))]
impl StopSignal {
  fn stop(&self) {
    *self.stopped.lock() = true;
    self.wake.notify_all();
  }

  /// Sleep until `deadline` or until stopped. Returns true if stopped.
  fn wait_until(&self, deadline: Instant) -> bool {
    let mut stopped = self.stopped.lock();
    while !*stopped {
      if self.wake.wait_until(&mut stopped, deadline).timed_out() {
        break;
      }
    }
    *stopped
  }
}

enum PollingImpl {
  #[cfg(not(target_arch = "wasm32"))]
  Thread {
    stop_signal: Arc<StopSignal>,
    thread: Option<JoinHandle<()>>,
  },
  #[cfg(target_arch = "wasm32")]
  Interval(Option<gloo_timers::callback::Interval>),
}

/// Handle to control polling lifetime. Stops on drop.
#[must_use = "dropping a PollingHandle stops polling immediately"]
pub struct PollingHandle {
  inner: PollingImpl,
  config: PollingConfig,
}

impl std::fmt::Debug for PollingHandle {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PollingHandle")
      .field("interval_ms", &self.config.interval_ms)
      .field("running", &self.is_running())
      .finish()
  }
}

impl PollingHandle {
  pub const fn config(&self) -> PollingConfig {
    self.config
  }

  /// False once stopped.
  pub fn is_running(&self) -> bool {
    match &self.inner {
      #[cfg(not(target_arch = "wasm32"))]
      PollingImpl::Thread { thread, .. } => thread.is_some(),
      #[cfg(target_arch = "wasm32")]
      PollingImpl::Interval(interval) => interval.is_some(),
    }
  }

  /// Stop polling. Returns once no further tick can fire.
  ///
  /// On native targets this joins the polling thread, so it must not be
  /// called from inside a sink while a report is being delivered.
  pub fn stop(&mut self) {
    match &mut self.inner {
      #[cfg(not(target_arch = "wasm32"))]
      PollingImpl::Thread {
        stop_signal,
        thread,
      } => {
        stop_signal.stop();
        if let Some(t) = thread.take() {
          drop(t.join());
          log::debug!("Poller stopped");
        }
      }
      #[cfg(target_arch = "wasm32")]
      PollingImpl::Interval(interval) => {
        if let Some(interval) = interval.take() {
          drop(interval);
          log::debug!("Poller stopped");
        }
      }
    }
  }
}

impl Drop for PollingHandle {
  fn drop(&mut self) {
    self.stop();
  }
}

/// Run a single tick synchronously.
pub fn poll_once(host: &dyn HostEnvironment, sink: &dyn ReportSink) {
  crate::dispatch::serialized(|| {
    let size = crate::reader::capture_dimensions(host).condensed();
    sink.report(&Report::Current { size });
  });
}

/// Start polling `host` every `config.interval_ms`, reporting to `sink`.
pub fn start_polling(
  host: Arc<dyn HostEnvironment>,
  sink: Arc<dyn ReportSink>,
  config: PollingConfig,
) -> DimioResult<PollingHandle> {
  start_polling_with(Arc::new(Dispatcher::new(host, sink)), config)
}

pub(crate) fn start_polling_with(
  dispatcher: Arc<Dispatcher>,
  config: PollingConfig,
) -> DimioResult<PollingHandle> {
  let config = config.validate()?;
  log::debug!("Starting poller every {}ms", config.interval_ms);
  Ok(PollingHandle {
    inner: start_impl(dispatcher, config)?,
    config,
  })
}

#[cfg(not(target_arch = "wasm32"))]
fn start_impl(dispatcher: Arc<Dispatcher>, config: PollingConfig) -> DimioResult<PollingImpl> {
  spawn_poller(
    thread::Builder::new().name("dimio-poller".into()),
    dispatcher,
    config,
  )
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_poller(
  builder: thread::Builder,
  dispatcher: Arc<Dispatcher>,
  config: PollingConfig,
) -> DimioResult<PollingImpl> {
  let stop_signal = Arc::new(StopSignal::default());
  let stop_signal_clone = Arc::clone(&stop_signal);
  let interval = config.interval();

  let thread = builder
    .spawn(move || {
      let mut next_tick = Instant::now() + interval;
      while !stop_signal_clone.wait_until(next_tick) {
        dispatcher.on_tick();
        next_tick += interval;
        // Fell behind (slow sink or suspended process): skip missed ticks
        let now = Instant::now();
        if next_tick < now {
          next_tick = now + interval;
        }
      }
    })
    .map_err(DimioError::PollerSpawn)?;

  Ok(PollingImpl::Thread {
    stop_signal,
    thread: Some(thread),
  })
}

#[cfg(target_arch = "wasm32")]
#[allow(clippy::unnecessary_wraps)]
fn start_impl(dispatcher: Arc<Dispatcher>, config: PollingConfig) -> DimioResult<PollingImpl> {
  let millis = u32::try_from(config.interval_ms).unwrap_or(u32::MAX);
  let interval = gloo_timers::callback::Interval::new(millis, move || dispatcher.on_tick());
  Ok(PollingImpl::Interval(Some(interval)))
}
