/*!
Browser host backed by `web-sys`.

Every read goes straight to the live `window`, so snapshots are never stale.
Values the browser cannot provide read as zero (pixel ratio as 1.0).
*/

use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use super::traits::{HostEnvironment, HostSignal, SignalListener, SignalSource, Subscription};
use super::units::{css_px, int_px, pixel_ratio};
use crate::types::{DimioError, DimioResult, Size};

fn window() -> Option<web_sys::Window> {
  web_sys::window()
}

fn js_px(value: Result<JsValue, JsValue>) -> u32 {
  value.ok().and_then(|v| v.as_f64()).map_or(0, css_px)
}

fn js_int_px(value: Result<i32, JsValue>) -> u32 {
  int_px(value.ok())
}

/// Reads dimensions from the page's global `window`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHost;

impl BrowserHost {
  /// Fails when there is no global `window` (e.g. inside a worker).
  pub fn new() -> DimioResult<Self> {
    window()
      .map(|_| Self)
      .ok_or_else(|| DimioError::HostUnavailable("no global `window`".to_owned()))
  }

  fn js_screen() -> Option<web_sys::Screen> {
    window().and_then(|w| w.screen().ok())
  }

  fn document_element() -> Option<web_sys::Element> {
    window()
      .and_then(|w| w.document())
      .and_then(|d| d.document_element())
  }
}

impl HostEnvironment for BrowserHost {
  fn viewport(&self) -> Size {
    window().map_or_else(Size::default, |w| {
      Size::new(js_px(w.inner_width()), js_px(w.inner_height()))
    })
  }

  fn screen(&self) -> Size {
    Self::js_screen().map_or_else(Size::default, |s| {
      Size::new(js_int_px(s.width()), js_int_px(s.height()))
    })
  }

  fn available_screen(&self) -> Size {
    Self::js_screen().map_or_else(Size::default, |s| {
      Size::new(js_int_px(s.avail_width()), js_int_px(s.avail_height()))
    })
  }

  fn document(&self) -> Size {
    Self::document_element().map_or_else(Size::default, |e| {
      Size::new(int_px(Some(e.client_width())), int_px(Some(e.client_height())))
    })
  }

  fn device_pixel_ratio(&self) -> f64 {
    pixel_ratio(window().as_ref().map(web_sys::Window::device_pixel_ratio))
  }
}

/// Adapts the window's `load` and `resize` DOM events to [`SignalSource`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSignals;

impl SignalSource for BrowserSignals {
  fn subscribe(&self, listener: SignalListener) -> Subscription {
    let Some(window) = window() else {
      log::warn!("No global `window`, signal listener not attached");
      return Subscription::detached();
    };

    let closures: Vec<(HostSignal, Closure<dyn FnMut()>)> = [HostSignal::Load, HostSignal::Resize]
      .into_iter()
      .map(|signal| {
        let listener = Arc::clone(&listener);
        (signal, Closure::<dyn FnMut()>::new(move || listener(signal)))
      })
      .collect();

    for (signal, closure) in &closures {
      if let Err(err) =
        window.add_event_listener_with_callback(signal.event_name(), closure.as_ref().unchecked_ref())
      {
        log::warn!("Failed to add {signal} listener: {err:?}");
      }
    }

    Subscription::new(move || {
      for (signal, closure) in &closures {
        drop(
          window.remove_event_listener_with_callback(
            signal.event_name(),
            closure.as_ref().unchecked_ref(),
          ),
        );
      }
    })
  }
}
