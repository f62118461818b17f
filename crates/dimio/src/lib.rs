/*!
Dimio - Dimension I/O

Reads viewport, screen and document dimensions from a host, classifies the
viewport into a device class, and reports snapshots on host `load`/`resize`
signals and on a fixed polling interval.

```ignore
use dimio::{HostSignal, MemoryHost, Monitor, SignalBus};

// Any HostEnvironment works; BrowserHost on wasm32
let host = Arc::new(MemoryHost::with_viewport(375, 812));
let monitor = Monitor::new(host)?;

// One-off reads
let snapshot = monitor.capture();
let class = monitor.device_class(); // DeviceClass::Mobile

// Signal-driven reports (full snapshots)
let bus = SignalBus::new();
let listener = monitor.listen(&bus);
bus.emit(HostSignal::Load);

// Interval-driven reports ("375x812")
let poller = monitor.start_polling()?;

// Both stop when their handles drop
drop(listener);
drop(poller);
```
*/

mod bridge;
mod core;
mod dispatch;
mod platform;
mod polling;
mod reader;
mod sink;

mod types;
pub use types::*;

pub use crate::bridge::{listen, BridgeState, ListenerHandle};
pub use crate::core::{Monitor, MonitorBuilder};
pub use crate::platform::{
  HostEnvironment, HostSignal, MemoryHost, SignalBus, SignalListener, SignalSource, Subscription,
};
#[cfg(target_arch = "wasm32")]
pub use crate::platform::{BrowserHost, BrowserSignals};
pub use crate::polling::{poll_once, start_polling, PollingConfig, PollingHandle};
pub use crate::reader::capture_dimensions;
pub use crate::sink::{LogSink, MemorySink, ReportSink};
