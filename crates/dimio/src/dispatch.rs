/*!
Capture-and-report cycle shared by the event bridge and the poller.

Every cycle in the process runs under one reentrant gate, like the single
event loop of a page: a resize and a poll tick never interleave, even when
they were started through separate `listen` and `start_polling` calls. A sink
that synchronously triggers another signal on the same thread still runs to
completion.
*/

use parking_lot::{const_reentrant_mutex, ReentrantMutex};
use std::sync::Arc;

use crate::platform::{HostEnvironment, HostSignal};
use crate::reader::capture_dimensions;
use crate::sink::ReportSink;
use crate::types::{DimensionSnapshot, Report};

static CYCLE_GATE: ReentrantMutex<()> = const_reentrant_mutex(());

/// Run `cycle` with every other capture-and-report cycle excluded.
pub(crate) fn serialized<R>(cycle: impl FnOnce() -> R) -> R {
  let _gate = CYCLE_GATE.lock();
  cycle()
}

pub(crate) struct Dispatcher {
  host: Arc<dyn HostEnvironment>,
  sink: Arc<dyn ReportSink>,
}

impl std::fmt::Debug for Dispatcher {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Dispatcher").finish_non_exhaustive()
  }
}

impl Dispatcher {
  pub(crate) fn new(host: Arc<dyn HostEnvironment>, sink: Arc<dyn ReportSink>) -> Self {
    Self { host, sink }
  }

  pub(crate) fn capture(&self) -> DimensionSnapshot {
    capture_dimensions(self.host.as_ref())
  }

  /// Full snapshot for a host signal.
  pub(crate) fn on_signal(&self, signal: HostSignal) {
    serialized(|| {
      let snapshot = self.capture();
      let report = match signal {
        HostSignal::Load => Report::Initial(snapshot),
        HostSignal::Resize => Report::Resized(snapshot),
      };
      self.sink.report(&report);
    });
  }

  /// Condensed viewport for a poll tick.
  pub(crate) fn on_tick(&self) {
    serialized(|| {
      let size = self.capture().condensed();
      self.sink.report(&Report::Current { size });
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::MemoryHost;
  use crate::sink::MemorySink;
  use crate::types::Size;

  fn dispatcher(host: &Arc<MemoryHost>, sink: &Arc<MemorySink>) -> Dispatcher {
    Dispatcher::new(host.clone(), sink.clone())
  }

  #[test]
  fn signals_produce_full_snapshots() {
    let host = Arc::new(MemoryHost::with_viewport(375, 812));
    let sink = Arc::new(MemorySink::new());
    let dispatcher = dispatcher(&host, &sink);

    dispatcher.on_signal(HostSignal::Load);
    host.resize(812, 375);
    dispatcher.on_signal(HostSignal::Resize);

    let reports = sink.reports();
    assert_eq!(reports.len(), 2);
    assert!(matches!(reports.first(), Some(Report::Initial(s)) if s.viewport == Size::new(375, 812)));
    assert!(matches!(reports.get(1), Some(Report::Resized(s)) if s.viewport == Size::new(812, 375)));
  }

  #[test]
  fn ticks_produce_condensed_size() {
    let host = Arc::new(MemoryHost::with_viewport(1200, 800));
    let sink = Arc::new(MemorySink::new());
    dispatcher(&host, &sink).on_tick();
    assert_eq!(
      sink.last(),
      Some(Report::Current {
        size: "1200x800".into()
      })
    );
  }

  #[test]
  fn reentrant_sink_does_not_deadlock() {
    let host: Arc<dyn HostEnvironment> = Arc::new(MemoryHost::with_viewport(640, 480));
    let recorded = Arc::new(MemorySink::new());
    let slot: Arc<parking_lot::Mutex<Option<Arc<Dispatcher>>>> = Arc::default();

    let inner_slot = Arc::clone(&slot);
    let inner_recorded = Arc::clone(&recorded);
    let sink = move |report: &Report| {
      inner_recorded.report(report);
      if matches!(report, Report::Initial(_)) {
        let dispatcher = inner_slot.lock().clone();
        if let Some(dispatcher) = dispatcher {
          dispatcher.on_tick();
        }
      }
    };

    let dispatcher = Arc::new(Dispatcher::new(host, Arc::new(sink)));
    *slot.lock() = Some(Arc::clone(&dispatcher));
    dispatcher.on_signal(HostSignal::Load);
    *slot.lock() = None;

    assert_eq!(recorded.len(), 2);
  }

  #[test]
  fn separate_dispatchers_never_overlap() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    let inside = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let (inside_clone, peak_clone) = (Arc::clone(&inside), Arc::clone(&peak));
    let sink = move |_: &Report| {
      let now = inside_clone.fetch_add(1, Ordering::SeqCst) + 1;
      peak_clone.fetch_max(now, Ordering::SeqCst);
      std::thread::sleep(Duration::from_millis(2));
      inside_clone.fetch_sub(1, Ordering::SeqCst);
    };
    let sink: Arc<dyn ReportSink> = Arc::new(sink);
    let host: Arc<dyn HostEnvironment> = Arc::new(MemoryHost::with_viewport(800, 600));

    let workers: Vec<_> = (0..4)
      .map(|_| {
        let dispatcher = Dispatcher::new(Arc::clone(&host), Arc::clone(&sink));
        std::thread::spawn(move || {
          for _ in 0..10 {
            dispatcher.on_tick();
          }
        })
      })
      .collect();
    for worker in workers {
      assert!(worker.join().is_ok());
    }

    assert_eq!(peak.load(Ordering::SeqCst), 1);
  }
}
