//! Path normalization for store keys and report output

use std::io;
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against `base` and resolve `.` and `..` lexically.
///
/// Symlinks are left alone; the result is only as canonical as the input
/// text allows.
pub fn normalize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        clean(path)
    } else {
        clean(&base.join(path))
    }
}

/// Make `path` absolute against the process working directory
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    Ok(clean(&std::path::absolute(path)?))
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Render `path` relative to `root`, climbing with `..` where needed
///
/// Falls back to the path as given when the two share no leading component,
/// e.g. different drives.
pub fn display_relative(path: &Path, root: &Path) -> String {
    match relative_to(path, root) {
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}

/// Lexical relative path from `root` to `path`; both must already be clean
pub fn relative_to(path: &Path, root: &Path) -> Option<PathBuf> {
    if path.is_absolute() != root.is_absolute() {
        return None;
    }

    let mut path_parts = path.components().peekable();
    let mut root_parts = root.components().peekable();
    let mut shared = 0;
    while let (Some(a), Some(b)) = (path_parts.peek(), root_parts.peek()) {
        if a != b {
            break;
        }
        path_parts.next();
        root_parts.next();
        shared += 1;
    }
    if shared == 0 {
        return None;
    }

    let mut rel: PathBuf = root_parts.map(|_| Component::ParentDir).collect();
    rel.extend(path_parts);
    if rel.as_os_str().is_empty() {
        rel.push(Component::CurDir);
    }
    Some(rel)
}
