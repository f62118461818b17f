/*! Error types for dimio operations. */

/// Errors that can occur while configuring or running a monitor.
#[derive(Debug, thiserror::Error)]
pub enum DimioError {
  #[error("Invalid breakpoints: tablet ({tablet}px) must be below desktop ({desktop}px)")]
  InvalidBreakpoints { tablet: u32, desktop: u32 },

  #[error("Polling interval must be greater than zero")]
  InvalidInterval,

  #[error("Invalid size '{0}', expected WIDTHxHEIGHT")]
  InvalidSize(String),

  #[error("Host environment unavailable: {0}")]
  HostUnavailable(String),

  #[error("Failed to spawn poller thread: {0}")]
  PollerSpawn(#[from] std::io::Error),
}

/// Result type for dimio operations.
pub type DimioResult<T> = Result<T, DimioError>;
