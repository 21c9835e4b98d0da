//! Folding of declaration fragments that share a name.
//!
//! A single API is usually declared in pieces: a namespace holding its
//! parameter types, a function carrying the signature and doc comment, and
//! sometimes the same top-level namespace again in another file. [`merge`]
//! combines such fragments into one record per name and turns the
//! syntactic `children` lists produced by the extractor into `exports`.

use crate::model::{DocEntry, UNNAMED};

/// Merges a sibling list so that every name appears once.
///
/// The first entry with a given name keeps its position; later entries
/// update it field by field:
///
/// | field | rule |
/// | --- | --- |
/// | `name`, `kind`, `flags` | never touched |
/// | `children`, `exports` | recursively merged, only if the target has none yet |
/// | everything else | replaced when present on the later entry |
///
/// Afterwards every entry's `children` are folded into its `exports`
/// (see [`fold_children`]), so no `children` list survives.
pub fn merge(entries: Vec<DocEntry>) -> Vec<DocEntry> {
    let mut merged: Vec<DocEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match merged
            .iter_mut()
            .find(|existing| key(existing) == key(&entry))
        {
            Some(target) => merge_fields(target, entry),
            None => merged.push(entry),
        }
    }

    for entry in &mut merged {
        fold_children(entry);
    }
    merged
}

/// Moves `children` into `exports`, recursively through the export tree.
///
/// A child whose name is not yet exported is appended; otherwise its
/// present fields are copied over the existing export without recursion,
/// `kind` and `flags` included.
pub fn fold_children(entry: &mut DocEntry) {
    if let Some(children) = entry.children.take() {
        let exports = entry.exports.get_or_insert_with(Vec::new);
        for child in children {
            match exports
                .iter_mut()
                .find(|existing| key(existing) == key(&child))
            {
                Some(existing) => assign(existing, child),
                None => exports.push(child),
            }
        }
    }

    for export in entry.exports.iter_mut().flatten() {
        fold_children(export);
    }
}

fn merge_fields(target: &mut DocEntry, incoming: DocEntry) {
    let DocEntry {
        name: _,
        kind: _,
        flags: _,
        type_,
        documentation,
        js_tags,
        parameters,
        members,
        exports,
        children,
    } = incoming;

    replace(&mut target.type_, type_);
    replace(&mut target.documentation, documentation);
    replace(&mut target.js_tags, js_tags);
    replace(&mut target.parameters, parameters);
    replace(&mut target.members, members);

    // Only the first fragment to bring these lists gets them merged in; later
    // lists are dropped. Kept as-is because downstream output depends on it.
    if let Some(children) = children {
        if target.children.is_none() {
            target.children = Some(merge(children));
        }
    }
    if let Some(exports) = exports {
        if target.exports.is_none() {
            target.exports = Some(merge(exports));
        }
    }
}

fn assign(target: &mut DocEntry, source: DocEntry) {
    let DocEntry {
        name: _,
        kind,
        flags,
        type_,
        documentation,
        js_tags,
        parameters,
        members,
        exports,
        children,
    } = source;

    target.kind = kind;
    target.flags = flags;
    replace(&mut target.type_, type_);
    replace(&mut target.documentation, documentation);
    replace(&mut target.js_tags, js_tags);
    replace(&mut target.parameters, parameters);
    replace(&mut target.members, members);
    replace(&mut target.exports, exports);
    replace(&mut target.children, children);
}

fn replace<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

fn key(entry: &DocEntry) -> &str {
    if entry.name.is_empty() {
        UNNAMED
    } else {
        &entry.name
    }
}
