/*! Core types for dimio.

Regenerate TypeScript types: `cargo test -p dimio export_bindings`
*/

#![allow(missing_docs)]

mod device;
mod error;
mod event;
mod geometry;

pub use device::{is_desktop, is_mobile, is_tablet, Breakpoints, DeviceClass};
pub use error::{DimioError, DimioResult};
pub use event::Report;
pub use geometry::{DimensionSnapshot, ScreenSize, Size};
