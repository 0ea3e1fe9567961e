//! Configuration structures for packaging operations.
//!
//! A single [`PackagingOptions`] value is constructed once per run through
//! [`PackagingOptionsBuilder`] and handed to the packager. Nothing in the
//! bundler reads paths or product metadata from global state.

mod arch;
mod builder;
mod core;
mod linux;
mod macos;
mod package;
mod windows;

pub use arch::Arch;
pub use builder::PackagingOptionsBuilder;
pub use self::core::PackagingOptions;
pub use linux::{LinuxSettings, SnapSettings};
pub use macos::MacOsSettings;
pub use package::PackageSettings;
pub use windows::{CERTIFICATE_PASSWORD_VAR, SigningSettings, WindowsSettings};
