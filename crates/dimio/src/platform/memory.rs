/*!
In-memory host implementation.

`MemoryHost` holds dimensions that can be changed at runtime and
`SignalBus` dispatches signals synchronously to registered listeners.
Used by native tools and tests in place of a live browser.
*/

use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use super::traits::{HostEnvironment, HostSignal, SignalListener, SignalSource, Subscription};
use crate::types::{DimensionSnapshot, ScreenSize, Size};

/// Host whose dimensions are set programmatically.
#[derive(Debug)]
pub struct MemoryHost {
  state: RwLock<DimensionSnapshot>,
}

impl MemoryHost {
  /// Host reporting exactly `snapshot`.
  pub fn new(snapshot: DimensionSnapshot) -> Self {
    Self {
      state: RwLock::new(snapshot),
    }
  }

  /// Host where the screen, available space and document all match the viewport.
  pub fn with_viewport(width: u32, height: u32) -> Self {
    let size = Size::new(width, height);
    Self::new(DimensionSnapshot {
      viewport: size,
      screen: ScreenSize::new(size, size),
      document: size,
      pixel_ratio: 1.0,
    })
  }

  /// Simulate a window resize: viewport and document follow the new size.
  pub fn resize(&self, width: u32, height: u32) {
    let mut state = self.state.write();
    state.viewport = Size::new(width, height);
    state.document = Size::new(width, height);
  }

  pub fn set_viewport(&self, viewport: Size) {
    self.state.write().viewport = viewport;
  }

  pub fn set_screen(&self, screen: ScreenSize) {
    self.state.write().screen = screen;
  }

  pub fn set_document(&self, document: Size) {
    self.state.write().document = document;
  }

  pub fn set_pixel_ratio(&self, pixel_ratio: f64) {
    self.state.write().pixel_ratio = pixel_ratio;
  }
}

impl HostEnvironment for MemoryHost {
  fn viewport(&self) -> Size {
    self.state.read().viewport
  }

  fn screen(&self) -> Size {
    self.state.read().screen.physical()
  }

  fn available_screen(&self) -> Size {
    self.state.read().screen.available()
  }

  fn document(&self) -> Size {
    self.state.read().document
  }

  fn device_pixel_ratio(&self) -> f64 {
    self.state.read().pixel_ratio
  }
}

struct BusInner {
  listeners: Mutex<Vec<(u64, SignalListener)>>,
  next_id: AtomicU64,
  loaded: AtomicBool,
}

/// Synchronous in-process signal source.
///
/// `Load` is delivered at most once per bus; `Resize` any number of times.
/// Clone is cheap and clones share listeners.
#[derive(Clone)]
pub struct SignalBus {
  inner: Arc<BusInner>,
}

impl std::fmt::Debug for SignalBus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SignalBus")
      .field("listeners", &self.listener_count())
      .field("loaded", &self.has_loaded())
      .finish()
  }
}

impl Default for SignalBus {
  fn default() -> Self {
    Self::new()
  }
}

impl SignalBus {
  pub fn new() -> Self {
    Self {
      inner: Arc::new(BusInner {
        listeners: Mutex::new(Vec::new()),
        next_id: AtomicU64::new(1),
        loaded: AtomicBool::new(false),
      }),
    }
  }

  /// Deliver `signal` to every listener in registration order.
  ///
  /// Returns the number of listeners notified.
  pub fn emit(&self, signal: HostSignal) -> usize {
    if signal == HostSignal::Load && self.inner.loaded.swap(true, Ordering::SeqCst) {
      log::warn!("Ignoring repeated load signal");
      return 0;
    }

    // Snapshot listeners so callbacks can (un)subscribe without deadlocking
    let listeners: Vec<SignalListener> = self
      .inner
      .listeners
      .lock()
      .iter()
      .map(|(_, listener)| Arc::clone(listener))
      .collect();

    for listener in &listeners {
      listener(signal);
    }
    listeners.len()
  }

  pub fn listener_count(&self) -> usize {
    self.inner.listeners.lock().len()
  }

  /// Whether the load signal has already been emitted.
  pub fn has_loaded(&self) -> bool {
    self.inner.loaded.load(Ordering::SeqCst)
  }
}

impl SignalSource for SignalBus {
  fn subscribe(&self, listener: SignalListener) -> Subscription {
    let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
    self.inner.listeners.lock().push((id, listener));

    let inner: Weak<BusInner> = Arc::downgrade(&self.inner);
    Subscription::new(move || {
      if let Some(inner) = inner.upgrade() {
        inner.listeners.lock().retain(|(other, _)| *other != id);
      }
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::AtomicUsize;

  fn counting_listener(count: &Arc<AtomicUsize>) -> SignalListener {
    let count = Arc::clone(count);
    Arc::new(move |_: HostSignal| {
      count.fetch_add(1, Ordering::SeqCst);
    })
  }

  mod memory_host {
    use super::*;

    #[test]
    fn with_viewport_fills_every_group() {
      let host = MemoryHost::with_viewport(375, 812);
      assert_eq!(host.viewport(), Size::new(375, 812));
      assert_eq!(host.screen(), Size::new(375, 812));
      assert_eq!(host.available_screen(), Size::new(375, 812));
      assert_eq!(host.document(), Size::new(375, 812));
      assert_eq!(host.device_pixel_ratio(), 1.0);
    }

    #[test]
    fn resize_moves_viewport_and_document_only() {
      let host = MemoryHost::with_viewport(1920, 1080);
      host.resize(800, 600);
      assert_eq!(host.viewport(), Size::new(800, 600));
      assert_eq!(host.document(), Size::new(800, 600));
      assert_eq!(host.screen(), Size::new(1920, 1080));
    }

    #[test]
    fn setters_update_individual_groups() {
      let host = MemoryHost::with_viewport(1200, 800);
      host.set_screen(ScreenSize::new(Size::new(2560, 1440), Size::new(2560, 1400)));
      host.set_document(Size::new(1185, 800));
      host.set_pixel_ratio(2.0);
      assert_eq!(host.available_screen(), Size::new(2560, 1400));
      assert_eq!(host.document(), Size::new(1185, 800));
      assert_eq!(host.device_pixel_ratio(), 2.0);
      assert_eq!(host.viewport(), Size::new(1200, 800));
    }

    #[test]
    fn arc_host_delegates() {
      let host = Arc::new(MemoryHost::with_viewport(640, 480));
      host.set_viewport(Size::new(700, 500));
      assert_eq!(HostEnvironment::viewport(&host), Size::new(700, 500));
    }
  }

  mod signal_bus {
    use super::*;

    #[test]
    fn delivers_to_all_listeners() {
      let bus = SignalBus::new();
      let count = Arc::new(AtomicUsize::new(0));
      let _a = bus.subscribe(counting_listener(&count));
      let _b = bus.subscribe(counting_listener(&count));

      assert_eq!(bus.emit(HostSignal::Resize), 2);
      assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn load_delivered_once() {
      let bus = SignalBus::new();
      let count = Arc::new(AtomicUsize::new(0));
      let _sub = bus.subscribe(counting_listener(&count));

      assert_eq!(bus.emit(HostSignal::Load), 1);
      assert_eq!(bus.emit(HostSignal::Load), 0);
      assert!(bus.has_loaded());
      assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn resize_is_unbounded() {
      let bus = SignalBus::new();
      let count = Arc::new(AtomicUsize::new(0));
      let _sub = bus.subscribe(counting_listener(&count));
      for _ in 0..10 {
        bus.emit(HostSignal::Resize);
      }
      assert_eq!(count.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
      let bus = SignalBus::new();
      let count = Arc::new(AtomicUsize::new(0));
      let sub = bus.subscribe(counting_listener(&count));
      assert_eq!(bus.listener_count(), 1);

      drop(sub);
      assert_eq!(bus.listener_count(), 0);
      assert_eq!(bus.emit(HostSignal::Resize), 0);
      assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn subscription_outliving_bus_is_harmless() {
      let sub = {
        let bus = SignalBus::new();
        bus.subscribe(Arc::new(|_: HostSignal| {}))
      };
      drop(sub);
    }

    #[test]
    fn listener_may_emit_reentrantly() {
      let bus = SignalBus::new();
      let count = Arc::new(AtomicUsize::new(0));
      let _counter = bus.subscribe(counting_listener(&count));
      let inner_bus = bus.clone();
      let _reemit = bus.subscribe(Arc::new(move |signal: HostSignal| {
        if signal == HostSignal::Load {
          inner_bus.emit(HostSignal::Resize);
        }
      }));

      bus.emit(HostSignal::Load);
      assert_eq!(count.load(Ordering::SeqCst), 2);
    }
  }
}
