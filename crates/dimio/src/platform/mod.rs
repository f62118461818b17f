/*!
Host implementations.

- `traits` - the contract core code depends on
- `memory` - programmable host and signal bus (all targets)
- `web` - live browser host (`wasm32` only)
- `units` - browser reading to pixel conversions
*/

mod memory;
mod traits;
#[cfg(any(test, target_arch = "wasm32"))]
mod units;
#[cfg(target_arch = "wasm32")]
mod web;

pub use memory::{MemoryHost, SignalBus};
pub use traits::{HostEnvironment, HostSignal, SignalListener, SignalSource, Subscription};
#[cfg(target_arch = "wasm32")]
pub use web::{BrowserHost, BrowserSignals};
