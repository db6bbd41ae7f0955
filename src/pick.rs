// SPDX-License-Identifier: PMPL-1.0-or-later

//! Subtree extraction by dot-path.
//!
//! [`pick`] selects parts of a nested mapping by flattened dot-path. A path
//! may name a leaf directly or an ancestor node, in which case the whole
//! subtree under it is selected.

use crate::error::{OmnibaseError, Result};
use crate::flatten::{flatten, unflatten};
use crate::path;
use crate::value::Map;

/// Extract the subtrees addressed by `paths` from a nested mapping.
///
/// The input is flattened; each requested path selects its exact flattened
/// key and every flattened key underneath it (`path` + `.` prefix). The
/// selected entries are merged into one flat mapping — later picks overwrite
/// earlier ones on exact key collision — and unflattened into the result.
///
/// Returns an empty mapping when nothing matches and `check_keys` is false.
///
/// # Errors
///
/// With `check_keys` set, a path with neither an exact nor a descendant
/// match fails with [`OmnibaseError::MissingKey`]. A malformed path fails
/// with [`OmnibaseError::InvalidPath`].
pub fn pick(map: &Map, paths: &[&str], check_keys: bool) -> Result<Map> {
    let flat = flatten(map);
    let mut selected = Map::new();

    for requested in paths {
        path::parse(requested)?;
        let mut matched = false;

        if let Some(value) = flat.get(*requested) {
            selected.insert((*requested).to_owned(), value.clone());
            matched = true;
        }

        let prefix = format!("{requested}{}", path::SEPARATOR);
        for (key, value) in flat.range(prefix.clone()..) {
            if !key.starts_with(&prefix) {
                break;
            }
            selected.insert(key.clone(), value.clone());
            matched = true;
        }

        if check_keys && !matched {
            return Err(OmnibaseError::MissingKey((*requested).to_owned()));
        }
    }

    unflatten(&selected)
}
