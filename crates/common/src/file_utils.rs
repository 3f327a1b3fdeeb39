use std::fmt;
use std::path::{Component, Path};

/// Why a name was refused as a local save name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveNameError {
    Empty,
    NulByte,
    PathSeparator,
    RelativeComponent,
}

impl SaveNameError {
    pub fn message(&self) -> &'static str {
        match self {
            SaveNameError::Empty => "save name cannot be empty",
            SaveNameError::NulByte => "save name cannot contain NUL bytes",
            SaveNameError::PathSeparator => "save name cannot contain '/' or '\\'",
            SaveNameError::RelativeComponent => "save name cannot be '.' or '..'",
        }
    }
}

impl fmt::Display for SaveNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for SaveNameError {}

/// Check that `name` is a single plain path component, so joining it onto
/// a destination directory can never land outside that directory.
pub fn validate_save_name(name: &str) -> Result<(), SaveNameError> {
    if name.is_empty() {
        return Err(SaveNameError::Empty);
    }
    if name.contains('\0') {
        return Err(SaveNameError::NulByte);
    }
    if name.contains('/') || name.contains('\\') {
        return Err(SaveNameError::PathSeparator);
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(SaveNameError::RelativeComponent),
    }
}
