//! Public path hashing surface: [`ParsedFileName`] derives the two index
//! keys from a logical path, matching the on-disk hash table's `(hash,
//! locator)` records.

use super::crc;

/// A logical path broken into the pieces `GameData`/`Repository` need.
///
/// `path` is expected to already be lowercased and trimmed — normalization is
/// the caller's responsibility; this type only splits on `/`.
#[derive(Debug, Clone)]
pub struct ParsedFileName {
    pub path: String,
    pub category: String,
    pub repo: String,
    pub index: u64,
    pub index2: u32,
}

impl ParsedFileName {
    /// Parse `path` into category/repo plus its two CRC index keys.
    ///
    /// `repo` is the second path segment if it matches `ex<digits>`,
    /// otherwise `ffxiv`.
    pub fn parse(path: &str) -> Self {
        let path = path.to_string();
        let mut parts = path.split('/');
        let category = parts.next().unwrap_or("").to_string();
        let repo = parts.next().map(classify_repo).unwrap_or_else(|| "ffxiv".to_string());

        let index = crc::calc_index(&path);
        let index2 = crc::calc_index2(&path);

        Self { path, category, repo, index, index2 }
    }
}

/// Returns `segment` unchanged if it looks like `ex<digits>...`, else `ffxiv`.
fn classify_repo(segment: &str) -> String {
    let mut chars = segment.chars();
    let is_expansion = chars.next() == Some('e')
        && chars.next() == Some('x')
        && chars.next().is_some_and(|c| c.is_ascii_digit());
    if is_expansion {
        segment.to_string()
    } else {
        "ffxiv".to_string()
    }
}

/// Compute the `(index, index2)` hash pair a caller would need to look up a
/// path directly, without building a full [`ParsedFileName`].
pub fn hash_path(path: &str) -> (u64, u32) {
    (crc::calc_index(path), crc::calc_index2(path))
}

/// Derive the numeric expansion id encoded in a repo folder name: 0 for
/// `ffxiv`, otherwise the integer suffix after the `ex` prefix.
pub fn expansion_id_of(repo: &str) -> u32 {
    if repo == "ffxiv" {
        0
    } else {
        repo.strip_prefix("ex").and_then(|n| n.parse().ok()).unwrap_or(0)
    }
}
