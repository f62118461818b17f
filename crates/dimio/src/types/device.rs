/*!
Device classification from viewport width.

Breakpoints are closed on the lower edge: a width equal to a breakpoint
belongs to the larger class.
*/

use derive_more::Display;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{DimioError, DimioResult};

/// Smallest width classified as a tablet.
const TABLET_MIN_WIDTH: u32 = 768;
/// Smallest width classified as a desktop.
const DESKTOP_MIN_WIDTH: u32 = 1024;

/// Coarse device class derived from viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Display)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum DeviceClass {
  #[display("mobile")]
  Mobile,
  #[display("tablet")]
  Tablet,
  #[display("desktop")]
  Desktop,
}

impl DeviceClass {
  /// Classify a width with the default breakpoints (768 / 1024).
  pub const fn from_width(width: u32) -> Self {
    Breakpoints::DEFAULT.classify(width)
  }
}

/// Width thresholds separating the three device classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Breakpoints {
  tablet: u32,
  desktop: u32,
}

impl Breakpoints {
  pub const DEFAULT: Self = Self {
    tablet: TABLET_MIN_WIDTH,
    desktop: DESKTOP_MIN_WIDTH,
  };

  /// Custom thresholds. `tablet` must be strictly below `desktop`.
  pub fn new(tablet: u32, desktop: u32) -> DimioResult<Self> {
    if tablet >= desktop {
      return Err(DimioError::InvalidBreakpoints { tablet, desktop });
    }
    Ok(Self { tablet, desktop })
  }

  pub const fn tablet(&self) -> u32 {
    self.tablet
  }

  pub const fn desktop(&self) -> u32 {
    self.desktop
  }

  pub const fn classify(&self, width: u32) -> DeviceClass {
    if width >= self.desktop {
      DeviceClass::Desktop
    } else if width >= self.tablet {
      DeviceClass::Tablet
    } else {
      DeviceClass::Mobile
    }
  }
}

impl Default for Breakpoints {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// True iff `width < 768`.
pub const fn is_mobile(width: u32) -> bool {
  width < TABLET_MIN_WIDTH
}

/// True iff `768 <= width < 1024`.
pub const fn is_tablet(width: u32) -> bool {
  width >= TABLET_MIN_WIDTH && width < DESKTOP_MIN_WIDTH
}

/// True iff `width >= 1024`.
pub const fn is_desktop(width: u32) -> bool {
  width >= DESKTOP_MIN_WIDTH
}
