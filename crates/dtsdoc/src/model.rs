use serde::{Deserialize, Serialize};

/// Name given to declarations whose identifier cannot be determined statically.
pub const UNNAMED: &str = "undefined";

/// Documentation metadata for one declared construct.
///
/// Every optional field distinguishes "absent" from "present but empty";
/// the merger relies on presence, not on emptiness.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocEntry {
    /// Declared identifier.
    pub name: String,
    /// Declaration kind.
    #[serde(default)]
    pub kind: EntryKind,
    /// Declaration modifiers.
    #[serde(default, skip_serializing_if = "EntryFlags::is_empty")]
    pub flags: EntryFlags,
    /// Rendered type signature.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    /// Free-text description taken from the doc comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Doc comment tags in source order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js_tags: Option<Vec<JsTag>>,
    /// Formal parameters of a callable declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<DocEntry>>,
    /// Members of an object-shaped or enum type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<DocEntry>>,
    /// Nested declarations that have already been merged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exports: Option<Vec<DocEntry>>,
    /// Nested declarations as written, before merging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DocEntry>>,
}

impl DocEntry {
    /// Creates an entry with only a name and kind set.
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        let name = name.into();
        Self {
            name: if name.is_empty() {
                UNNAMED.to_string()
            } else {
                name
            },
            kind,
            ..Self::default()
        }
    }

    /// Sets the type signature.
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    /// Sets the description.
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Appends a tag, creating the tag list when absent.
    pub fn with_tag(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.js_tags
            .get_or_insert_with(Vec::new)
            .push(JsTag::new(name).with_text(text));
        self
    }

    /// Returns the first tag with the given name.
    pub fn tag(&self, name: &str) -> Option<&JsTag> {
        self.js_tags
            .as_deref()
            .and_then(|tags| tags.iter().find(|tag| tag.name == name))
    }

    /// Tags in source order, empty when absent.
    pub fn tags(&self) -> &[JsTag] {
        self.js_tags.as_deref().unwrap_or_default()
    }

    /// Parameters, empty when absent.
    pub fn parameter_list(&self) -> &[DocEntry] {
        self.parameters.as_deref().unwrap_or_default()
    }

    /// Exports, empty when absent.
    pub fn export_list(&self) -> &[DocEntry] {
        self.exports.as_deref().unwrap_or_default()
    }
}

/// A single `@name text` doc comment tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsTag {
    /// Tag identifier without the `@` (e.g. `example`, `see`).
    pub name: String,
    /// Tag payload, verbatim apart from the comment gutter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl JsTag {
    /// Creates a tag without text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
        }
    }

    /// Sets the tag text; empty text stays absent.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = (!text.is_empty()).then_some(text);
        self
    }

    /// Tag text, empty when absent.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

/// Kind of declaration an entry was extracted from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Namespace,
    Function,
    TypeAlias,
    Interface,
    Enum,
    EnumMember,
    Class,
    Property,
    Method,
    Parameter,
    Variable,
    #[default]
    Other,
}

/// Modifiers present on a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryFlags {
    /// Declared with `declare` (ambient).
    pub ambient: bool,
    /// Declared with `export`.
    pub exported: bool,
    /// Property or parameter marked with `?`.
    pub optional: bool,
    /// Property marked `readonly`.
    pub readonly: bool,
}

impl EntryFlags {
    /// Returns `true` when no modifier is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_becomes_placeholder() {
        assert_eq!(DocEntry::new("", EntryKind::Function).name, UNNAMED);
    }

    #[test]
    fn serializes_with_original_field_names() {
        let entry = DocEntry::new("startAccelerometer", EntryKind::Function)
            .with_type("(OBJECT?: Param) => Promise<any>")
            .with_tag("since", "1.1.0");
        let value = serde_json::to_value(&entry).expect("serializable");

        assert_eq!(value["type"], "(OBJECT?: Param) => Promise<any>");
        assert_eq!(value["jsTags"][0]["name"], "since");
        assert_eq!(value["kind"], "function");
        assert!(value.get("children").is_none());
        assert!(value.get("flags").is_none());
    }

    #[test]
    fn empty_tag_text_is_absent() {
        let tag = JsTag::new("internal").with_text("");
        assert!(tag.text.is_none());
        assert_eq!(tag.text(), "");
    }
}
