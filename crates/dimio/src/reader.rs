/*! Dimension capture. */

use crate::platform::HostEnvironment;
use crate::types::{DimensionSnapshot, ScreenSize};

/// Read every dimension from `host` at this instant.
///
/// Nothing is cached: two calls against an unchanged host return equal snapshots,
/// and a call after the host changes sees the new values.
pub fn capture_dimensions(host: &dyn HostEnvironment) -> DimensionSnapshot {
  DimensionSnapshot {
    viewport: host.viewport(),
    screen: ScreenSize::new(host.screen(), host.available_screen()),
    document: host.document(),
    pixel_ratio: host.device_pixel_ratio(),
  }
}
