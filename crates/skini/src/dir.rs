//! Choosing one configuration file out of a directory.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::{Configure, Error, parse_file, seek_key};

/// Compile a shell-style file name pattern.
///
/// `*` matches any run of characters; every other character matches itself.
/// The pattern must match the whole name.
pub fn wildcard_regex(pattern: &str) -> Result<Regex, Error> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$")).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Parse the first file in `dir` whose name matches `pattern` and whose
/// `id_key` value satisfies `matcher`, returning its path.
///
/// Candidates are plain files, tried in file name order. A candidate without
/// an `id_key` line is skipped.
pub fn parse_dir<T, F>(
    target: &mut T,
    dir: impl AsRef<Path>,
    pattern: &str,
    id_key: &str,
    mut matcher: F,
) -> Result<PathBuf, Error>
where
    T: Configure,
    F: FnMut(&str) -> bool,
{
    let dir = dir.as_ref();
    let regex = wildcard_regex(pattern)?;

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(Error::io(dir))? {
        let entry = entry.map_err(Error::io(dir))?;
        let file_type = entry.file_type().map_err(Error::io(entry.path()))?;
        if !file_type.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if regex.is_match(&name) {
            names.push(name);
        }
    }
    names.sort();
    debug!(dir = %dir.display(), pattern, candidates = names.len(), "scanning directory");

    for name in names {
        let path = dir.join(&name);
        let id = match seek_key(&path, id_key) {
            Ok(id) => id,
            Err(Error::KeyNotFound { .. }) => {
                debug!(file = %name, id_key, "no id, skipped");
                continue;
            }
            Err(err) => return Err(err),
        };
        if matcher(&id) {
            debug!(file = %name, %id, "selected");
            parse_file(target, &path)?;
            return Ok(path);
        }
        debug!(file = %name, %id, "id did not match");
    }

    Err(Error::NoMatchingFile {
        dir: dir.to_path_buf(),
        pattern: pattern.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_regex() {
        let re = wildcard_regex("config_*.ini").unwrap();
        assert!(re.is_match("config_dev.ini"));
        assert!(re.is_match("config_.ini"));
        assert!(!re.is_match("config_dev.ini.bak"));
        assert!(!re.is_match("config_devXini"));
        assert!(!re.is_match("my_config_dev.ini"));
    }

    #[test]
    fn test_wildcard_regex_escapes_metacharacters() {
        let re = wildcard_regex("a+b(1)?.ini").unwrap();
        assert!(re.is_match("a+b(1)?.ini"));
        assert!(!re.is_match("aab1.ini"));
        assert_eq!(re.as_str(), r"^a\+b\(1\)\?\.ini$");
    }

    #[test]
    fn test_star_alone_matches_everything() {
        let re = wildcard_regex("*").unwrap();
        assert!(re.is_match(""));
        assert!(re.is_match("anything.at.all"));
    }
}
