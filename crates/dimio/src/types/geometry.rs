/*! Pixel dimension types captured from the host. */

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

use super::{Breakpoints, DeviceClass, DimioError};

/// Width and height in CSS pixels.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Display, From,
)]
#[display("{width}x{height}")]
#[ts(export)]
pub struct Size {
  pub width: u32,
  pub height: u32,
}

impl Size {
  pub const fn new(width: u32, height: u32) -> Self {
    Self { width, height }
  }

  /// Condensed `WIDTHxHEIGHT` form used by the poller.
  pub fn condensed(&self) -> String {
    self.to_string()
  }
}

impl FromStr for Size {
  type Err = DimioError;

  /// Parse `WIDTHxHEIGHT` (either `x` or `X` as separator, surrounding whitespace ignored).
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || DimioError::InvalidSize(s.to_owned());
    let (width, height) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    Ok(Self {
      width: width.trim().parse().map_err(|_| invalid())?,
      height: height.trim().parse().map_err(|_| invalid())?,
    })
  }
}

/// Physical screen size and the space left after persistent OS/browser UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScreenSize {
  pub width: u32,
  pub height: u32,
  pub available_width: u32,
  pub available_height: u32,
}

impl ScreenSize {
  pub const fn new(physical: Size, available: Size) -> Self {
    Self {
      width: physical.width,
      height: physical.height,
      available_width: available.width,
      available_height: available.height,
    }
  }

  pub const fn physical(&self) -> Size {
    Size::new(self.width, self.height)
  }

  pub const fn available(&self) -> Size {
    Size::new(self.available_width, self.available_height)
  }
}

/// Every dimension the host exposes, read at one instant.
///
/// Created fresh by each capture. Serializes with the same field layout as
/// the browser-side object (`viewport`, `screen`, `document`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DimensionSnapshot {
  /// Visible rendering area, excluding browser chrome.
  pub viewport: Size,
  pub screen: ScreenSize,
  /// Root content element size.
  pub document: Size,
  /// Device pixels per CSS pixel.
  pub pixel_ratio: f64,
}

impl DimensionSnapshot {
  /// Classify the viewport width.
  pub const fn device_class(&self, breakpoints: &Breakpoints) -> DeviceClass {
    breakpoints.classify(self.viewport.width)
  }

  /// Viewport as `WIDTHxHEIGHT`.
  pub fn condensed(&self) -> String {
    self.viewport.condensed()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  mod size {
    use super::*;

    #[test]
    fn condensed_form() {
      assert_eq!(Size::new(375, 812).condensed(), "375x812");
      assert_eq!(Size::new(0, 0).to_string(), "0x0");
    }

    #[test]
    fn from_tuple() {
      let size: Size = (1200, 800).into();
      assert_eq!(size, Size::new(1200, 800));
    }

    #[test]
    fn parses_condensed_form() {
      assert_eq!("1920x1080".parse::<Size>().ok(), Some(Size::new(1920, 1080)));
      assert_eq!(" 768 X 1024 ".parse::<Size>().ok(), Some(Size::new(768, 1024)));
    }

    #[test]
    fn rejects_malformed_input() {
      for input in ["", "1920", "1920x", "x1080", "-1x5", "axb", "1x2x3"] {
        assert!(
          matches!(input.parse::<Size>(), Err(DimioError::InvalidSize(_))),
          "{input:?} should not parse"
        );
      }
    }
  }

  mod screen_size {
    use super::*;

    #[test]
    fn splits_into_physical_and_available() {
      let screen = ScreenSize::new(Size::new(1920, 1080), Size::new(1920, 1040));
      assert_eq!(screen.physical(), Size::new(1920, 1080));
      assert_eq!(screen.available(), Size::new(1920, 1040));
    }
  }

  mod snapshot {
    use super::*;

    fn snapshot(viewport: Size) -> DimensionSnapshot {
      DimensionSnapshot {
        viewport,
        screen: ScreenSize::new(Size::new(1920, 1080), Size::new(1920, 1040)),
        document: Size::new(viewport.width.saturating_sub(15), viewport.height),
        pixel_ratio: 2.0,
      }
    }

    #[test]
    fn classifies_viewport_width() {
      let breakpoints = Breakpoints::default();
      assert_eq!(
        snapshot(Size::new(375, 812)).device_class(&breakpoints),
        DeviceClass::Mobile
      );
      assert_eq!(
        snapshot(Size::new(1200, 800)).device_class(&breakpoints),
        DeviceClass::Desktop
      );
    }

    #[test]
    fn serializes_with_browser_field_names() {
      let json = serde_json::to_value(snapshot(Size::new(375, 812))).unwrap_or_default();
      assert_eq!(json["viewport"]["width"], 375);
      assert_eq!(json["viewport"]["height"], 812);
      assert_eq!(json["screen"]["availableWidth"], 1920);
      assert_eq!(json["screen"]["availableHeight"], 1040);
      assert_eq!(json["document"]["width"], 360);
      assert_eq!(json["pixelRatio"], 2.0);
    }
  }
}
