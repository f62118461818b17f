//! Drives a `Monitor` against a simulated host: startup summary, a load
//! signal, a burst of resizes and a few seconds of polling, all logged.
//!
//! Configuration (environment):
//! - `DIMIO_VIEWPORT` - initial viewport as `WIDTHxHEIGHT` (default `1200x800`)
//! - `DIMIO_INTERVAL_MS` - poll interval (default 1000)
//! - `RUST_LOG` - log filter (default `info`)

use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use dimio::{
  DimioError, DimioResult, HostSignal, LogSink, MemoryHost, Monitor, PollingConfig, SignalBus, Size,
};

const DEFAULT_VIEWPORT: Size = Size::new(1200, 800);
/// Viewports stepped through by the simulated resize burst.
const RESIZE_STEPS: [Size; 3] = [Size::new(1023, 768), Size::new(768, 1024), Size::new(375, 812)];

struct DemoConfig {
  viewport: Size,
  polling: PollingConfig,
}

impl DemoConfig {
  fn from_env() -> DimioResult<Self> {
    let viewport = match std::env::var("DIMIO_VIEWPORT") {
      Ok(value) => value.parse()?,
      Err(_) => DEFAULT_VIEWPORT,
    };
    let polling = match std::env::var("DIMIO_INTERVAL_MS") {
      Ok(value) => PollingConfig {
        interval_ms: value.trim().parse().map_err(|_| DimioError::InvalidInterval)?,
      },
      Err(_) => PollingConfig::default(),
    };
    Ok(Self { viewport, polling })
  }
}

fn run(config: &DemoConfig) -> DimioResult<()> {
  let host = Arc::new(MemoryHost::with_viewport(
    config.viewport.width,
    config.viewport.height,
  ));
  host.set_pixel_ratio(2.0);

  let monitor = Monitor::builder()
    .host(host.clone())
    .sink(Arc::new(LogSink::new()))
    .interval_ms(config.polling.interval_ms)
    .build()?;

  monitor.log_summary();

  let bus = SignalBus::new();
  let _listener = monitor.listen(&bus);
  let _poller = monitor.start_polling()?;

  bus.emit(HostSignal::Load);
  for step in RESIZE_STEPS {
    host.resize(step.width, step.height);
    bus.emit(HostSignal::Resize);
  }
  log::info!("Now a {} viewport", monitor.device_class());

  thread::sleep(config.polling.interval() * 3 + Duration::from_millis(100));
  Ok(())
}

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let result = DemoConfig::from_env().and_then(|config| run(&config));
  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      log::error!("{err}");
      ExitCode::FAILURE
    }
  }
}
