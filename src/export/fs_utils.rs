// src/export/fs_utils.rs

use crate::ui::messages::info;
use crate::ui::prompt::ask_confirmation;
use std::path::Path;

/// Whether the output file may be created or overwritten.
///
/// - file does not exist → true
/// - exists and `force` → true
/// - exists otherwise → ask the user
pub(crate) fn ensure_writable(path: &Path, force: bool) -> bool {
    if !path.exists() || force {
        return true;
    }

    if ask_confirmation(&format!(
        "The file '{}' already exists. Overwrite?",
        path.display()
    )) {
        info("Existing file will be overwritten.");
        true
    } else {
        false
    }
}
