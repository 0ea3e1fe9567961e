//! Templates for files placed inside the snap.

use crate::bundler::{
    error::{Error, Result},
    settings::PackagingOptions,
};
use handlebars::Handlebars;
use std::collections::BTreeMap;

/// Launcher shim. Forwards to the real executable and tells it where it was
/// started from, which confinement would otherwise hide.
pub const LAUNCHER_SCRIPT: &str = r#"#!/bin/sh

exec "$@" --executed-from="$(pwd)" --pid=$$
"#;

const DESKTOP_ENTRY_TEMPLATE: &str = r#"[Desktop Entry]
Name={{product_name}}
Exec={{snap_name}} %U
Icon=${SNAP}/meta/gui/icon.png
Type=Application
StartupNotify=true
"#;

/// Renders the freedesktop.org desktop entry for the snap.
pub fn render_desktop_entry(options: &PackagingOptions) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string("desktop", DESKTOP_ENTRY_TEMPLATE)
        .map_err(|e| Error::GenericError(format!("failed to register desktop template: {}", e)))?;

    let mut data = BTreeMap::new();
    data.insert("product_name", options.product_name().to_string());
    data.insert("snap_name", options.package().snap_name());

    Ok(handlebars.render("desktop", &data)?)
}
