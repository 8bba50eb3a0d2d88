//! Locale files shipped with the bot.

use std::path::Path;
use tracing::{info, warn};
use ytinfo_core::shellexpand;

/// Bundled locale documents, embedded at compile time: `(file name, JSON)`.
pub const BUNDLED_LOCALES: &[(&str, &str)] = &[
    ("en-US.json", include_str!("../../../locales/en-US.json")),
    ("de.json", include_str!("../../../locales/de.json")),
    ("es-ES.json", include_str!("../../../locales/es-ES.json")),
];

/// Deploy bundled locale files to `dir`, creating it if needed.
///
/// Never overwrites existing files so operator edits are preserved.
pub fn install_bundled_locales(dir: &str) {
    let expanded = shellexpand(dir);
    let dir = Path::new(&expanded);
    if let Err(e) = std::fs::create_dir_all(dir) {
        warn!("locales: failed to create {}: {e}", dir.display());
        return;
    }

    for (filename, content) in BUNDLED_LOCALES {
        let dest = dir.join(filename);
        if !dest.exists() {
            if let Err(e) = std::fs::write(&dest, content) {
                warn!("locales: failed to write {}: {e}", dest.display());
            } else {
                info!("locales: deployed bundled {filename}");
            }
        }
    }
}
