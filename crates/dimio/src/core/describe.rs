/*! Startup summary: every dimension group, the pixel ratio and the device class. */

use super::Monitor;
use crate::types::{DeviceClass, DimensionSnapshot};

fn summary_lines(snapshot: &DimensionSnapshot, class: DeviceClass) -> Vec<String> {
  let all = serde_json::to_string(snapshot).unwrap_or_else(|_| format!("{snapshot:?}"));
  let detected = match class {
    DeviceClass::Mobile => "Mobile",
    DeviceClass::Tablet => "Tablet",
    DeviceClass::Desktop => "Desktop",
  };

  vec![
    format!("Window width: {}", snapshot.viewport.width),
    format!("Window height: {}", snapshot.viewport.height),
    format!("Screen width: {}", snapshot.screen.width),
    format!("Screen height: {}", snapshot.screen.height),
    format!("Available width: {}", snapshot.screen.available_width),
    format!("Available height: {}", snapshot.screen.available_height),
    format!("Document width: {}", snapshot.document.width),
    format!("Document height: {}", snapshot.document.height),
    format!("Device pixel ratio: {}", snapshot.pixel_ratio),
    format!("All dimensions: {all}"),
    format!("{detected} device detected"),
  ]
}

impl Monitor {
  /// Human-readable summary of the current dimensions.
  pub fn describe(&self) -> Vec<String> {
    let snapshot = self.capture();
    summary_lines(&snapshot, snapshot.device_class(&self.breakpoints))
  }

  /// Write [`Monitor::describe`] to the log at `info` level.
  pub fn log_summary(&self) {
    for line in self.describe() {
      log::info!(target: "dimio", "{line}");
    }
  }
}
