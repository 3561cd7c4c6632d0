use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Derives the output path for the `index`-th of several inputs:
/// `out.png` becomes `out-1.png`, and `out` becomes `out-1`.
/// Numbering starts at 1.
pub fn numbered_path(path: &Path, index: usize) -> PathBuf {
    let suffix = format!("-{index}");
    let Some(file_name) = path.file_name() else {
        let mut result = path.as_os_str().to_owned();
        result.push(suffix);
        return PathBuf::from(result);
    };

    let file_name = Path::new(file_name);
    let mut new_name = OsString::new();
    match (file_name.file_stem(), file_name.extension()) {
        (Some(stem), Some(extension)) => {
            new_name.push(stem);
            new_name.push(suffix);
            new_name.push(".");
            new_name.push(extension);
        }
        _ => {
            new_name.push(file_name);
            new_name.push(suffix);
        }
    }
    path.with_file_name(new_name)
}
