//! # zig-deps - keep a Zig project's dependencies current
//!
//! zig-deps finds `build.zig.zon` manifests, asks `zig fetch` for the package
//! hash of every pinned dependency and of its upstream base URL, and reports
//! which dependencies are behind. With `--update` it runs
//! `zig fetch --save <base>` to move them forward.
//!
//! ## Quick Start
//!
//! ```bash
//! # Check the project in the current directory
//! zig-deps
//!
//! # Check sub-projects too, and update whatever is out of date
//! zig-deps --recursive --update path/to/project
//!
//! # Validate the pre-commit hook configuration
//! zig-deps hooks check
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use zig_deps::deps::{CheckOptions, Checker, ManifestScanner, ZigFetcher};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let dependencies = ManifestScanner::new("build.zig.zon")
//!     .recursive(true)
//!     .collect(std::path::Path::new("."))?;
//!
//! let fetcher = ZigFetcher::locate("zig", Duration::from_secs(300))?;
//! let checker = Checker::new(fetcher, CheckOptions::default());
//!
//! for report in checker.run(&dependencies).await? {
//!     println!("{}", report.summary(7));
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod deps;
pub mod git;
pub mod hooks;

pub use cli::{Cli, Output};
pub use config::{Settings, ZigDepsConfig};
