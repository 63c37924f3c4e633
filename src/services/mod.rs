// Services
// Services provide the restoration logic: polling, the scrollbar probe, the async driver and settings.

pub mod restoration_poller;
#[cfg(feature = "async")]
pub mod restoration_task;
pub mod scrollbar_probe;
pub mod settings_engine;
