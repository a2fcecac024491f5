//! Idempotent mutation primitives for themefix rules.
//!
//! Responsibilities:
//! - Marker-guarded append ([`append_once`]).
//! - Pattern-guarded one-time rewrite ([`rewrite_if_absent`], [`rewrite_first_match`]).
//! - Deep default-fill for JSON documents ([`ensure_defaults`]).
//!
//! Every operation addresses a file as repository root plus relative path,
//! reads it fresh from disk, mutates in memory, and writes whole contents
//! back. None of this is transactional across concurrent invocations; the
//! contract is one invocation per checkout at a time.

mod error;

pub use error::EditError;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde_json::{Map, Value};
use tracing::debug;

fn abs_path(root: &Utf8Path, rel: &Utf8Path) -> Utf8PathBuf {
    if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        root.join(rel)
    }
}

/// Read a file as UTF-8, or an empty string when it does not exist.
pub fn read_or_empty(root: &Utf8Path, rel: &Utf8Path) -> anyhow::Result<String> {
    let abs = abs_path(root, rel);
    if !abs.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(&abs).with_context(|| format!("read {}", abs))
}

fn write_creating(root: &Utf8Path, rel: &Utf8Path, contents: &str) -> anyhow::Result<()> {
    let abs = abs_path(root, rel);
    if let Some(parent) = abs.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create parent dir for {}", abs))?;
    }
    fs::write(&abs, contents).with_context(|| format!("write {}", abs))
}

/// The content produced by appending `block` to `current`.
///
/// Kept pure so the append shape is testable without a file system.
pub fn appended_content(current: &str, block: &str) -> String {
    let mut joined = format!("{current}\n{block}").trim().to_string();
    joined.push('\n');
    joined
}

/// Append `block` to the file unless `marker` is already present.
///
/// The marker, not the block, is the idempotency key: calling again with a
/// different block but the same marker is a strict no-op, so a block that
/// changes between versions of a rule is never rewritten once its marker is
/// on disk. Returns true when a write occurred. The file (and its parent
/// directories) are created on first write.
pub fn append_once(
    root: &Utf8Path,
    rel: &Utf8Path,
    marker: &str,
    block: &str,
) -> anyhow::Result<bool> {
    let current = read_or_empty(root, rel)?;
    if current.contains(marker) {
        debug!(file = %rel, marker, "marker present; skipping append");
        return Ok(false);
    }
    write_creating(root, rel, &appended_content(&current, block))?;
    debug!(file = %rel, marker, "appended block");
    Ok(true)
}

/// Rewrite the file through `transform` unless `presence_marker` is already
/// present.
///
/// Unlike [`append_once`] the transform edits matched content elsewhere in
/// the file rather than appending. The transform is a pure function: it
/// returns `Some(new_content)` when its structural anchor matched, `None`
/// otherwise (in which case nothing is written). Empty or absent files are
/// left untouched. Returns true when a write occurred.
pub fn rewrite_if_absent<F>(
    root: &Utf8Path,
    rel: &Utf8Path,
    presence_marker: &str,
    transform: F,
) -> anyhow::Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let current = read_or_empty(root, rel)?;
    if current.is_empty() || current.contains(presence_marker) {
        return Ok(false);
    }
    match transform(&current) {
        Some(next) => {
            write_creating(root, rel, &next)?;
            debug!(file = %rel, "rewrote file");
            Ok(true)
        }
        None => {
            debug!(file = %rel, "anchor not found; leaving file untouched");
            Ok(false)
        }
    }
}

/// One-time rewrite across an ordered candidate list: apply `transform` to
/// the first candidate whose structural anchor matches, and stop.
///
/// When any candidate already carries `presence_marker` the rewrite has
/// happened on a previous run and nothing is touched, whichever file it
/// landed in. Returns the rewritten file's path, or `None` when the marker
/// is already present somewhere or no anchor matched.
pub fn rewrite_first_match<F>(
    root: &Utf8Path,
    candidates: &[Utf8PathBuf],
    presence_marker: &str,
    transform: F,
) -> anyhow::Result<Option<Utf8PathBuf>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut contents = Vec::with_capacity(candidates.len());
    for rel in candidates {
        let current = read_or_empty(root, rel)?;
        if current.contains(presence_marker) {
            debug!(file = %rel, "marker present; one-time rewrite already applied");
            return Ok(None);
        }
        contents.push((rel, current));
    }

    for (rel, current) in contents {
        if current.is_empty() {
            continue;
        }
        if let Some(next) = transform(&current) {
            write_creating(root, rel, &next)?;
            debug!(file = %rel, "rewrote first matching candidate");
            return Ok(Some(rel.clone()));
        }
    }
    Ok(None)
}

/// Recursively insert every key of `template` that is absent in `doc`.
///
/// Existing values are never overwritten, explicit empty/false/null values
/// included; only missing keys are filled. Returns true when anything was
/// inserted. Pure so the fill rule is testable independent of I/O.
pub fn fill_defaults(doc: &mut Map<String, Value>, template: &Map<String, Value>) -> bool {
    let mut changed = false;
    for (key, template_value) in template {
        match doc.get_mut(key) {
            None => {
                doc.insert(key.clone(), template_value.clone());
                changed = true;
            }
            Some(existing) => {
                if let Some(template_map) = template_value.as_object() {
                    if let Some(existing_map) = existing.as_object_mut() {
                        changed |= fill_defaults(existing_map, template_map);
                    }
                }
            }
        }
    }
    changed
}

/// Deep-default-merge `template` into the JSON document at `rel`.
///
/// An absent or empty file starts from an empty object; non-empty content
/// that fails to parse (or parses to a non-object root) is a
/// [`EditError::MalformedDocument`], never silently ignored. The document is
/// written back with two-space pretty formatting and a trailing newline.
/// Returns true when any key was inserted.
pub fn ensure_defaults(root: &Utf8Path, rel: &Utf8Path, template: &Value) -> anyhow::Result<bool> {
    let abs = abs_path(root, rel);
    let raw = read_or_empty(root, rel)?;

    let mut doc: Map<String, Value> = if raw.trim().is_empty() {
        Map::new()
    } else {
        let value: Value = serde_json::from_str(&raw).map_err(|e| EditError::MalformedDocument {
            path: abs.to_string(),
            message: e.to_string(),
        })?;
        match value {
            Value::Object(map) => map,
            other => {
                return Err(EditError::MalformedDocument {
                    path: abs.to_string(),
                    message: format!("root is {}, expected an object", json_type_name(&other)),
                }
                .into());
            }
        }
    };

    let template_map = template
        .as_object()
        .context("default template must be a JSON object")?;

    let changed = fill_defaults(&mut doc, template_map);
    if changed {
        let mut rendered = serde_json::to_string_pretty(&Value::Object(doc))
            .with_context(|| format!("serialize {}", abs))?;
        rendered.push('\n');
        write_creating(root, rel, &rendered)?;
        debug!(file = %rel, "filled missing defaults");
    }
    Ok(changed)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::appended_content;

    #[test]
    fn appended_content_trims_and_ends_with_single_newline() {
        assert_eq!(appended_content("", "block"), "block\n");
        assert_eq!(appended_content("a", "b"), "a\nb\n");
        // A trailing newline on the existing content becomes a blank
        // separator line.
        assert_eq!(appended_content("a\n", "b\n"), "a\n\nb\n");
    }
}
