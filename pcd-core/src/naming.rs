use std::{ffi::OsStr, path::Path};

/// Last path segment of a local path or URL.
pub fn file_name(href: &str) -> &str {
    href.rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(href)
}

/// Removes every trailing extension: `a.copc.laz` -> `a`.
pub fn strip_extensions(name: &str) -> &str {
    let mut base = name;
    loop {
        let path = Path::new(base);
        match (path.extension(), path.file_stem().and_then(OsStr::to_str)) {
            (Some(_), Some(stem)) => base = stem,
            _ => return base,
        }
    }
}

/// Item identifier derived from the source href alone.
pub fn item_id(href: &str) -> String {
    strip_extensions(file_name(href)).to_string()
}

/// Everything after the first `.` of the file name: `a.copc.laz` -> `copc.laz`.
pub fn compound_extension(href: &str) -> Option<&str> {
    file_name(href)
        .split_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Companion file href: the source truncated at the first `.` of its file
/// name, followed by `suffix`.
pub fn sibling_href(href: &str, suffix: &str) -> String {
    let name_start = href.len() - file_name(href).len();
    let cut = href[name_start..]
        .find('.')
        .map_or(href.len(), |i| name_start + i);
    format!("{}{}", &href[..cut], suffix)
}
