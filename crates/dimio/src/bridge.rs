/*!
Event bridge: reports a fresh snapshot on every host `load` and `resize`.

No debouncing or coalescing is applied. A burst of N resize signals produces
N reports, each with the dimensions current at that firing.

```ignore
let bus = SignalBus::new();
let mut handle = dimio::listen(host, &bus, sink);
bus.emit(HostSignal::Load);   // -> Report::Initial
bus.emit(HostSignal::Resize); // -> Report::Resized
handle.stop();                // or let it drop
```
*/

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::dispatch::Dispatcher;
use crate::platform::{HostEnvironment, HostSignal, SignalListener, SignalSource, Subscription};
use crate::sink::ReportSink;

/// Whether a bridge is currently subscribed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
  /// Not subscribed; signals produce no reports.
  Unarmed,
  /// Subscribed; every signal produces a report.
  Armed,
}

/// Handle to an armed event bridge. Unsubscribes on drop.
///
/// `Send` on native targets, but not `Sync`: stop it from whichever thread
/// owns it.
#[derive(Debug)]
#[must_use = "dropping a ListenerHandle stops listening immediately"]
pub struct ListenerHandle {
  armed: Arc<AtomicBool>,
  subscription: Option<Subscription>,
}

impl ListenerHandle {
  /// Current subscription state.
  pub fn state(&self) -> BridgeState {
    if self.armed.load(Ordering::SeqCst) {
      BridgeState::Armed
    } else {
      BridgeState::Unarmed
    }
  }

  pub fn is_armed(&self) -> bool {
    self.state() == BridgeState::Armed
  }

  /// Stop listening. No report is produced for signals after this returns.
  pub fn stop(&mut self) {
    self.armed.store(false, Ordering::SeqCst);
    if let Some(subscription) = self.subscription.take() {
      subscription.cancel();
      log::debug!("Event bridge disarmed");
    }
  }
}

impl Drop for ListenerHandle {
  fn drop(&mut self) {
    self.stop();
  }
}

/// Subscribe to `source` and report every signal to `sink`.
pub fn listen(
  host: Arc<dyn HostEnvironment>,
  source: &dyn SignalSource,
  sink: Arc<dyn ReportSink>,
) -> ListenerHandle {
  listen_with(Arc::new(Dispatcher::new(host, sink)), source)
}

pub(crate) fn listen_with(dispatcher: Arc<Dispatcher>, source: &dyn SignalSource) -> ListenerHandle {
  let armed = Arc::new(AtomicBool::new(true));
  let armed_clone = Arc::clone(&armed);

  let listener: SignalListener = Arc::new(move |signal: HostSignal| {
    if !armed_clone.load(Ordering::SeqCst) {
      return;
    }
    log::trace!("Host signal: {signal}");
    dispatcher.on_signal(signal);
  });

  let subscription = source.subscribe(listener);
  log::debug!("Event bridge armed");

  ListenerHandle {
    armed,
    subscription: Some(subscription),
  }
}
