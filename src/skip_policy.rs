use std::fmt;
use std::path::Path;

/// Extensions that are never worth renaming.
const BINARY_EXTENSIONS: &[&str] = &["exe", "dll", "so", "dylib", "bin"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    OutsideWorkspace,
    HiddenPath,
    BinaryExtension,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::OutsideWorkspace => write!(f, "not inside the workspace"),
            SkipReason::HiddenPath => write!(f, "hidden file or directory"),
            SkipReason::BinaryExtension => write!(f, "executable/binary format"),
        }
    }
}

/// Decide from the path alone whether a file is excluded from processing.
/// Pure: the caller reports the reason, nothing else happens here.
pub fn should_skip(path: &Path, workspace_root: &Path) -> Option<SkipReason> {
    let relative = match path.strip_prefix(workspace_root) {
        Ok(relative) => relative,
        Err(_) => return Some(SkipReason::OutsideWorkspace),
    };

    let hidden = relative
        .components()
        .any(|part| part.as_os_str().to_string_lossy().starts_with('.'));
    if hidden {
        return Some(SkipReason::HiddenPath);
    }

    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if BINARY_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            return Some(SkipReason::BinaryExtension);
        }
    }

    None
}
