/*! Reports delivered to sinks. */

use super::DimensionSnapshot;
use serde::Serialize;
use ts_rs::TS;

/// A single capture-and-report result.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "event", content = "data")]
#[ts(export)]
pub enum Report {
  /// Full snapshot taken when the host finished loading.
  #[serde(rename = "dimensions:initial")]
  Initial(DimensionSnapshot),

  /// Full snapshot taken on a resize signal.
  #[serde(rename = "dimensions:resized")]
  Resized(DimensionSnapshot),

  /// Condensed viewport (`WIDTHxHEIGHT`) from a poll tick.
  #[serde(rename = "dimensions:current")]
  Current { size: String },
}

impl Report {
  /// The full snapshot, if this report carries one.
  pub const fn snapshot(&self) -> Option<&DimensionSnapshot> {
    match self {
      Self::Initial(snapshot) | Self::Resized(snapshot) => Some(snapshot),
      Self::Current { .. } => None,
    }
  }

  /// Human-readable prefix used when logging this report.
  pub const fn label(&self) -> &'static str {
    match self {
      Self::Initial(_) => "Initial dimensions",
      Self::Resized(_) => "Window resized",
      Self::Current { .. } => "Current size",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Size;

  #[test]
  fn adjacently_tagged_json() {
    let json = serde_json::to_value(Report::Current {
      size: "375x812".into(),
    })
    .unwrap_or_default();
    assert_eq!(json["event"], "dimensions:current");
    assert_eq!(json["data"]["size"], "375x812");

    let snapshot = DimensionSnapshot {
      viewport: Size::new(375, 812),
      ..DimensionSnapshot::default()
    };
    let json = serde_json::to_value(Report::Resized(snapshot)).unwrap_or_default();
    assert_eq!(json["event"], "dimensions:resized");
    assert_eq!(json["data"]["viewport"]["width"], 375);
  }

  #[test]
  fn only_signal_reports_carry_snapshots() {
    let snapshot = DimensionSnapshot::default();
    assert_eq!(Report::Initial(snapshot).snapshot(), Some(&snapshot));
    assert_eq!(Report::Resized(snapshot).snapshot(), Some(&snapshot));
    assert_eq!(Report::Current { size: "0x0".into() }.snapshot(), None);
  }

  #[test]
  fn labels() {
    let snapshot = DimensionSnapshot::default();
    assert_eq!(Report::Initial(snapshot).label(), "Initial dimensions");
    assert_eq!(Report::Resized(snapshot).label(), "Window resized");
    assert_eq!(Report::Current { size: String::new() }.label(), "Current size");
  }
}
