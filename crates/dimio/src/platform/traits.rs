/*!
Host abstraction traits.

These traits define the contract between core code and host implementations.
Core code only reads dimensions and receives signals through them, so tests
and native tools can substitute an in-memory host for a live browser.
*/

use derive_more::Display;
use std::sync::Arc;

use crate::types::Size;

/// Synchronous, side-effect free dimension reads.
pub trait HostEnvironment: Send + Sync {
  /// Visible rendering area (`innerWidth` x `innerHeight`).
  fn viewport(&self) -> Size;

  /// Full display size.
  fn screen(&self) -> Size;

  /// Display size minus persistent OS/browser UI.
  fn available_screen(&self) -> Size;

  /// Root content element size (`clientWidth` x `clientHeight`).
  fn document(&self) -> Size;

  /// Device pixels per CSS pixel.
  fn device_pixel_ratio(&self) -> f64;
}

impl<H: HostEnvironment + ?Sized> HostEnvironment for Arc<H> {
  fn viewport(&self) -> Size {
    (**self).viewport()
  }

  fn screen(&self) -> Size {
    (**self).screen()
  }

  fn available_screen(&self) -> Size {
    (**self).available_screen()
  }

  fn document(&self) -> Size {
    (**self).document()
  }

  fn device_pixel_ratio(&self) -> f64 {
    (**self).device_pixel_ratio()
  }
}

/// Lifecycle signals emitted by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum HostSignal {
  /// Initial setup finished. Fires once.
  #[display("load")]
  Load,
  /// Viewport size changed. Fires any number of times.
  #[display("resize")]
  Resize,
}

impl HostSignal {
  /// DOM event name for this signal.
  pub const fn event_name(self) -> &'static str {
    match self {
      Self::Load => "load",
      Self::Resize => "resize",
    }
  }
}

/// Callback registered with a [`SignalSource`].
pub type SignalListener = Arc<dyn Fn(HostSignal) + Send + Sync>;

/// Something that delivers [`HostSignal`]s to registered listeners.
pub trait SignalSource {
  /// Register a listener. It stays registered until the returned
  /// [`Subscription`] is dropped or cancelled.
  fn subscribe(&self, listener: SignalListener) -> Subscription;
}

// DOM listeners are bound to the page's thread; everywhere else a
// subscription can move between threads with its handle.
#[cfg(not(target_arch = "wasm32"))]
type CancelFn = Box<dyn FnOnce() + Send>;
#[cfg(target_arch = "wasm32")]
type CancelFn = Box<dyn FnOnce()>;

/// Registration with a [`SignalSource`]. Unsubscribes on drop.
///
/// `Send` on native targets, so the handles holding it can be moved to
/// another thread and stopped there.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
  cancel: Option<CancelFn>,
}

impl Subscription {
  /// Subscription that runs `cancel` exactly once when released.
  #[cfg(not(target_arch = "wasm32"))]
  pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
    Self {
      cancel: Some(Box::new(cancel)),
    }
  }

  /// Subscription that runs `cancel` exactly once when released.
  #[cfg(target_arch = "wasm32")]
  pub fn new(cancel: impl FnOnce() + 'static) -> Self {
    Self {
      cancel: Some(Box::new(cancel)),
    }
  }

  /// Subscription with nothing to release (source already gone or never attached).
  pub const fn detached() -> Self {
    Self { cancel: None }
  }

  /// Unsubscribe now.
  pub fn cancel(mut self) {
    self.release();
  }

  fn release(&mut self) {
    if let Some(cancel) = self.cancel.take() {
      cancel();
    }
  }
}

impl Drop for Subscription {
  fn drop(&mut self) {
    self.release();
  }
}

impl std::fmt::Debug for Subscription {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription")
      .field("active", &self.cancel.is_some())
      .finish()
  }
}
