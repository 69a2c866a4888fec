//! Multiple concurrent terminal spinners driven by one shared render loop.
//!
//! ```no_run
//! use multispin::SpinnerManager;
//! use std::time::Duration;
//!
//! # async fn run() {
//! let manager = SpinnerManager::new();
//! let download = manager.add_spinner("Downloading");
//! let build = manager.add_spinner("Building");
//! manager.init();
//!
//! tokio::time::sleep(Duration::from_secs(1)).await;
//! download.complete_with_message("Downloaded");
//! build.error_with_message_fmt(format_args!("Build failed after {}s", 1));
//!
//! manager.stop().await;
//! # }
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod spinner;
pub mod ui;

pub use config::SpinnerConfig;
pub use error::{Result, SpinnerError};
pub use manager::{ManagerBuilder, SharedWriter, SpinnerManager};
pub use spinner::{Spinner, SpinnerOptions};
pub use ui::animations::Animation;
pub use ui::colors::Color;
