//! Immutable decomposition of a filesystem path.
//!
//! `FsPath` splits a path string into `root`, `dir`, `base`, `ext` and `name`
//! once, at construction, and never touches the filesystem except through
//! the explicit [`FsPath::exists`] probe. All arithmetic (`resolve`,
//! `normalize`) is lexical and anchored at the path itself rather than at
//! the process working directory.

use crate::error::{FsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::str::FromStr;

/// The five components of a parsed path.
///
/// Invariant for parsed values: `base == name + ext`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParts {
    pub root: String,
    pub dir: String,
    pub base: String,
    pub ext: String,
    pub name: String,
}

/// Access requirement for [`FsPath::exists_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessMode {
    /// The path only has to exist.
    #[default]
    Exists,
    /// The path has to exist and must not be read-only.
    Writable,
}

/// Options for [`FsPath::exists_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistsOptions {
    pub mode: AccessMode,
    /// When true, any probe failure is reported as "does not exist".
    /// When false, the underlying error is returned to the caller.
    pub quiet: bool,
}

impl Default for ExistsOptions {
    fn default() -> Self {
        Self {
            mode: AccessMode::Exists,
            quiet: true,
        }
    }
}

impl ExistsOptions {
    /// Options that surface the underlying filesystem error.
    pub fn strict() -> Self {
        Self {
            quiet: false,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: AccessMode) -> Self {
        self.mode = mode;
        self
    }
}

/// An immutable, structured filesystem path.
///
/// Two `FsPath`s are equal when their canonical string forms are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FsPath {
    parts: PathParts,
    formatted: String,
}

impl FsPath {
    /// Parse a path string into its components.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self::from_parts(parse(path.as_ref()))
    }

    /// Build a path from already-parsed components without re-parsing them.
    ///
    /// An empty `base` is filled in as `name + ext`.
    pub fn from_parts(mut parts: PathParts) -> Self {
        if parts.base.is_empty() {
            parts.base = format!("{}{}", parts.name, parts.ext);
        }
        let formatted = format(&parts);
        Self { parts, formatted }
    }

    pub fn root(&self) -> &str {
        &self.parts.root
    }

    pub fn dir(&self) -> &str {
        &self.parts.dir
    }

    pub fn base(&self) -> &str {
        &self.parts.base
    }

    pub fn ext(&self) -> &str {
        &self.parts.ext
    }

    pub fn name(&self) -> &str {
        &self.parts.name
    }

    /// The structured form of this path.
    pub fn parts(&self) -> &PathParts {
        &self.parts
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.formatted
    }

    pub fn as_std_path(&self) -> &Path {
        Path::new(&self.formatted)
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.formatted)
    }

    pub fn is_absolute(&self) -> bool {
        !self.parts.root.is_empty()
    }

    /// The containing directory as a path.
    pub fn parent(&self) -> FsPath {
        FsPath::new(&self.parts.dir)
    }

    /// Resolve `segments` against this path and return the normalized result.
    ///
    /// An absolute segment restarts resolution from that segment. Empty
    /// segments are ignored. The receiver is never modified, and relative
    /// paths stay relative.
    pub fn resolve<I, S>(&self, segments: I) -> FsPath
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = self.formatted.clone();
        for segment in segments {
            let segment = segment.as_ref();
            if segment.is_empty() {
                continue;
            }
            if root_len(segment) > 0 || joined.is_empty() {
                joined = segment.to_string();
            } else {
                joined.push(MAIN_SEPARATOR);
                joined.push_str(segment);
            }
        }
        FsPath::new(normalize(&joined))
    }

    /// Probe for existence, reporting any failure as `false`.
    pub async fn exists(&self) -> bool {
        // Quiet probes cannot fail.
        self.exists_with(ExistsOptions::default())
            .await
            .unwrap_or(false)
    }

    /// Probe for existence with explicit options.
    ///
    /// With `quiet: false`, a missing path, a permission failure or any other
    /// I/O error is returned as an `FsError::Io` so callers can tell them
    /// apart.
    pub async fn exists_with(&self, options: ExistsOptions) -> Result<bool> {
        match self.probe(options.mode).await {
            Ok(()) => Ok(true),
            Err(e) if options.quiet => {
                tracing::trace!("{} is not accessible: {}", self, e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn probe(&self, mode: AccessMode) -> Result<()> {
        let metadata = tokio::fs::metadata(self.as_std_path())
            .await
            .map_err(|e| FsError::io("access", self.to_path_buf(), e))?;

        if mode == AccessMode::Writable && metadata.permissions().readonly() {
            return Err(FsError::io(
                "access",
                self.to_path_buf(),
                io::Error::new(io::ErrorKind::PermissionDenied, "path is read-only"),
            ));
        }

        Ok(())
    }
}

impl PartialEq for FsPath {
    fn eq(&self, other: &Self) -> bool {
        self.formatted == other.formatted
    }
}

impl Eq for FsPath {}

impl Hash for FsPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.formatted.hash(state);
    }
}

impl fmt::Display for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

impl FromStr for FsPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(FsPath::new(s))
    }
}

impl AsRef<Path> for FsPath {
    fn as_ref(&self) -> &Path {
        self.as_std_path()
    }
}

impl From<&str> for FsPath {
    fn from(path: &str) -> Self {
        FsPath::new(path)
    }
}

impl From<String> for FsPath {
    fn from(path: String) -> Self {
        FsPath::new(path)
    }
}

impl From<&String> for FsPath {
    fn from(path: &String) -> Self {
        FsPath::new(path)
    }
}

impl From<&Path> for FsPath {
    fn from(path: &Path) -> Self {
        FsPath::new(path.to_string_lossy())
    }
}

impl From<PathBuf> for FsPath {
    fn from(path: PathBuf) -> Self {
        FsPath::from(path.as_path())
    }
}

impl From<&FsPath> for FsPath {
    fn from(path: &FsPath) -> Self {
        path.clone()
    }
}

impl From<PathParts> for FsPath {
    fn from(parts: PathParts) -> Self {
        FsPath::from_parts(parts)
    }
}

impl From<FsPath> for String {
    fn from(path: FsPath) -> Self {
        path.formatted
    }
}

impl From<FsPath> for PathBuf {
    fn from(path: FsPath) -> Self {
        PathBuf::from(path.formatted)
    }
}

fn is_separator(c: char) -> bool {
    std::path::is_separator(c)
}

#[cfg(windows)]
fn drive_prefix_len(path: &str) -> Option<usize> {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        let with_separator = bytes.len() >= 3 && is_separator(bytes[2] as char);
        Some(if with_separator { 3 } else { 2 })
    } else {
        None
    }
}

#[cfg(not(windows))]
fn drive_prefix_len(_path: &str) -> Option<usize> {
    None
}

/// Length in bytes of the root prefix of `path` (0 for relative paths).
fn root_len(path: &str) -> usize {
    if let Some(len) = drive_prefix_len(path) {
        return len;
    }
    match path.chars().next() {
        Some(c) if is_separator(c) => c.len_utf8(),
        _ => 0,
    }
}

fn split_extension(base: &str) -> (String, String) {
    if base == ".." {
        return (base.to_string(), String::new());
    }
    match base.rfind('.') {
        Some(idx) if idx > 0 => (base[..idx].to_string(), base[idx..].to_string()),
        _ => (base.to_string(), String::new()),
    }
}

fn parse(path: &str) -> PathParts {
    if path.is_empty() {
        return PathParts::default();
    }

    let root_len = root_len(path);
    let root = path[..root_len].to_string();
    let rest = path[root_len..].trim_end_matches(is_separator);

    if rest.is_empty() {
        return PathParts {
            dir: root.clone(),
            root,
            ..PathParts::default()
        };
    }

    let (dir, base) = match rest.rfind(is_separator) {
        Some(idx) => (format!("{}{}", root, &rest[..idx]), &rest[idx + 1..]),
        None => (root.clone(), rest),
    };
    let (name, ext) = split_extension(base);

    PathParts {
        root,
        dir,
        base: base.to_string(),
        ext,
        name,
    }
}

fn format(parts: &PathParts) -> String {
    let dir = if parts.dir.is_empty() {
        &parts.root
    } else {
        &parts.dir
    };
    if dir.is_empty() {
        parts.base.clone()
    } else if *dir == parts.root {
        format!("{}{}", dir, parts.base)
    } else {
        format!("{}{}{}", dir, MAIN_SEPARATOR, parts.base)
    }
}

/// Lexically normalize a path string.
///
/// Drops `.` and empty components, collapses `..` against preceding
/// components, discards `..` directly under a root, and keeps leading `..`
/// of relative paths. An empty relative result becomes `.`.
pub fn normalize(path: &str) -> String {
    let root_len = root_len(path);
    let root = &path[..root_len];
    let mut components: Vec<&str> = Vec::new();

    for component in path[root_len..].split(is_separator) {
        match component {
            "" | "." => {}
            ".." => match components.last() {
                Some(last) if *last != ".." => {
                    components.pop();
                }
                _ if !root.is_empty() => {}
                _ => components.push(".."),
            },
            other => components.push(other),
        }
    }

    let joined = components.join(&MAIN_SEPARATOR.to_string());
    if root.is_empty() && joined.is_empty() {
        ".".to_string()
    } else {
        format!("{}{}", root, joined)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const RESOURCE: &str = "/path/to/resource.ext";

    fn resource_parts() -> PathParts {
        PathParts {
            root: "/".into(),
            dir: "/path/to".into(),
            base: "resource.ext".into(),
            ext: ".ext".into(),
            name: "resource".into(),
        }
    }

    #[test]
    fn test_parse_components() {
        let path = FsPath::new(RESOURCE);
        assert_eq!(path.parts(), &resource_parts());
        assert_eq!(path.to_string(), RESOURCE);
    }

    #[test]
    fn test_from_parts_does_not_reparse() {
        let path = FsPath::from_parts(resource_parts());
        assert_eq!(path, FsPath::new(RESOURCE));
        assert_eq!(path.name(), "resource");
        assert_eq!(path.ext(), ".ext");
    }

    #[test]
    fn test_from_parts_fills_base() {
        let path = FsPath::from_parts(PathParts {
            root: "/".into(),
            dir: "/etc".into(),
            name: "hosts".into(),
            ext: ".bak".into(),
            ..PathParts::default()
        });
        assert_eq!(path.base(), "hosts.bak");
        assert_eq!(path.as_str(), "/etc/hosts.bak");
    }

    #[test]
    fn test_extension_edge_cases() {
        let dotfile = FsPath::new("/home/user/.bashrc");
        assert_eq!(dotfile.ext(), "");
        assert_eq!(dotfile.name(), ".bashrc");

        let trailing_dot = FsPath::new("file.");
        assert_eq!(trailing_dot.ext(), ".");
        assert_eq!(trailing_dot.name(), "file");

        let double = FsPath::new("archive.tar.gz");
        assert_eq!(double.ext(), ".gz");
        assert_eq!(double.name(), "archive.tar");

        let parent = FsPath::new("a/..");
        assert_eq!(parent.base(), "..");
        assert_eq!(parent.ext(), "");
    }

    #[test]
    fn test_root_and_relative() {
        let root = FsPath::new("/");
        assert_eq!(root.root(), "/");
        assert_eq!(root.dir(), "/");
        assert_eq!(root.base(), "");
        assert_eq!(root.to_string(), "/");

        let relative = FsPath::new("cache/data.bin");
        assert!(!relative.is_absolute());
        assert_eq!(relative.dir(), "cache");
        assert_eq!(relative.root(), "");
    }

    #[test]
    fn test_round_trip() {
        for s in [
            "/path/to/resource.ext",
            "/file.ext",
            "relative/dir/file",
            "name",
            ".hidden",
            "../up/one.json",
            "/",
            "a/b.c.d",
        ] {
            assert_eq!(FsPath::new(s).to_string(), s, "round trip of {s}");
            let reparsed: FsPath = FsPath::new(s).to_string().parse().unwrap();
            assert_eq!(reparsed.parts(), FsPath::new(s).parts());
        }
    }

    #[test]
    fn test_trailing_separator_is_dropped() {
        let path = FsPath::new("/var/cache/");
        assert_eq!(path.base(), "cache");
        assert_eq!(path.to_string(), "/var/cache");
    }

    #[test]
    fn test_resolve_is_anchored_at_path() {
        let path = FsPath::new("/path/to/directory");
        let resolved = path.resolve(["..", "somewhere", "else"]);
        assert_eq!(resolved.as_str(), "/path/to/somewhere/else");
        // The receiver is unchanged.
        assert_eq!(path.as_str(), "/path/to/directory");
    }

    #[test]
    fn test_resolve_relative_stays_relative() {
        let path = FsPath::new("config");
        assert_eq!(path.resolve(["cache"]).as_str(), "config/cache");
        assert_eq!(path.resolve(["..", ".."]).as_str(), "..");
    }

    #[test]
    fn test_resolve_absolute_segment_restarts() {
        let path = FsPath::new("/home/user");
        assert_eq!(path.resolve(["a", "/opt", "b"]).as_str(), "/opt/b");
        assert_eq!(path.resolve(["", "x"]).as_str(), "/home/user/x");
    }

    #[test]
    fn test_resolve_composition() {
        let bases = ["/srv/data", "rel/dir", "..", "/"];
        let firsts: [&[&str]; 3] = [&["a", ".."], &["..", "..", "x"], &["/abs"]];
        let seconds: [&[&str]; 3] = [&["b"], &["..", "c/d"], &[".", ""]];

        for base in bases {
            let p = FsPath::new(base);
            for a in firsts {
                for b in seconds {
                    let chained = p.resolve(a.iter()).resolve(b.iter());
                    let combined = p.resolve(a.iter().chain(b.iter()));
                    assert_eq!(chained, combined, "base {base}, a {a:?}, b {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("./up/two/../../same"), "same");
        assert_eq!(normalize("same"), "same");
        assert_eq!(normalize("/a/./b//c/.."), "/a/b");
        assert_eq!(normalize("/.."), "/");
        assert_eq!(normalize("../x/../.."), "../..");
        assert_eq!(normalize(""), ".");
        assert_eq!(normalize("a/.."), ".");
    }

    #[test]
    fn test_equality_is_by_string_form() {
        let a = FsPath::new("/x/y.txt");
        let b = FsPath::from_parts(a.parts().clone());
        assert_eq!(a, b);
        assert_ne!(a, FsPath::new("/x/y.json"));
    }

    #[test]
    fn test_serde_as_string() {
        let path = FsPath::new("/etc/minepack/config.json");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"/etc/minepack/config.json\"");
        let back: FsPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }

    #[tokio::test]
    async fn test_exists_missing_quiet_and_strict() {
        let temp = TempDir::new().unwrap();
        let path = FsPath::from(temp.path()).resolve(["missing.txt"]);

        assert!(!path.exists().await);

        let err = path
            .exists_with(ExistsOptions::strict())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_exists_for_file_and_directory() {
        let temp = TempDir::new().unwrap();
        let dir = FsPath::from(temp.path());
        let file = dir.resolve(["present.txt"]);
        std::fs::write(file.as_std_path(), "hello thar").unwrap();

        assert!(dir.exists().await);
        assert!(file.exists().await);
        assert!(file
            .exists_with(ExistsOptions::strict().with_mode(AccessMode::Writable))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_exists_writable_mode_on_read_only_file() {
        let temp = TempDir::new().unwrap();
        let file = FsPath::from(temp.path()).resolve(["locked.txt"]);
        std::fs::write(file.as_std_path(), "x").unwrap();
        let mut permissions = std::fs::metadata(file.as_std_path()).unwrap().permissions();
        permissions.set_readonly(true);
        std::fs::set_permissions(file.as_std_path(), permissions).unwrap();

        let quiet = ExistsOptions::default().with_mode(AccessMode::Writable);
        assert!(!file.exists_with(quiet).await.unwrap());

        let strict = ExistsOptions::strict().with_mode(AccessMode::Writable);
        let err = file.exists_with(strict).await.unwrap_err();
        assert_eq!(
            err.io_error().map(|e| e.kind()),
            Some(io::ErrorKind::PermissionDenied)
        );
    }
}
