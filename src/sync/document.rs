//! Reconciled working file schema, as written to disk.
//!
//! Field order is part of the format: `_inputs` first, then `urlTranslation`,
//! then the entries in key inventory order. Keeping it fixed makes repeated
//! runs byte-identical.

use indexmap::IndexMap;
use serde::ser::SerializeSeq;
use serde::{
    Serialize,
    Serializer,
};

/// A fully reconciled page or common working file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationDocument {
    #[serde(rename = "_inputs")]
    pub inputs: DocumentInputs,

    #[serde(rename = "urlTranslation", skip_serializing_if = "Option::is_none")]
    pub url_translation: Option<String>,

    /// Key → translated text (empty while untranslated).
    #[serde(flatten)]
    pub entries: IndexMap<String, String>,
}

/// Editing UI configuration for the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInputs {
    #[serde(rename = "$")]
    pub root: RootInput,

    #[serde(rename = "urlTranslation", skip_serializing_if = "Option::is_none")]
    pub url_translation: Option<UrlTranslationInput>,

    #[serde(flatten)]
    pub keys: IndexMap<String, InputConfig>,
}

/// Document-level input: link to the page and the entry groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootInput {
    #[serde(rename = "type")]
    pub input_type: InputType,
    pub comment: String,
    pub options: RootOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootOptions {
    pub place_groups_below: bool,
    pub groups: InputGroups,
}

/// "Still to translate" and "already translated" groups, in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputGroups {
    pub pending: InputGroup,
    pub translated: InputGroup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputGroup {
    pub heading: String,
    pub comment: String,
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlTranslationInput {
    #[serde(rename = "type")]
    pub input_type: InputType,
    pub comment: String,
}

/// Input configuration of one translation key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputConfig {
    pub label: String,

    #[serde(rename = "type")]
    pub input_type: InputType,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,

    pub context: InputContext,
}

/// Collapsible panel showing the canonical source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputContext {
    pub open: bool,
    pub title: String,
    pub icon: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Object,
    Text,
    Textarea,
    Markdown,
}

/// Classification of an entry for the editing UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Pending,
    Translated,
}

impl InputGroups {
    /// Mutable access to the group for `group`.
    pub const fn get_mut(&mut self, group: Group) -> &mut InputGroup {
        match group {
            Group::Pending => &mut self.pending,
            Group::Translated => &mut self.translated,
        }
    }

    #[must_use]
    pub const fn get(&self, group: Group) -> &InputGroup {
        match group {
            Group::Pending => &self.pending,
            Group::Translated => &self.translated,
        }
    }
}

impl Serialize for InputGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.pending)?;
        seq.serialize_element(&self.translated)?;
        seq.end()
    }
}

impl TranslationDocument {
    /// Empty document with the given document-level inputs.
    #[must_use]
    pub fn new(root: RootInput, url_translation: Option<UrlTranslationInput>) -> Self {
        Self {
            inputs: DocumentInputs { root, url_translation, keys: IndexMap::new() },
            url_translation: None,
            entries: IndexMap::new(),
        }
    }

    /// Keys currently in `group`.
    #[must_use]
    pub fn group(&self, group: Group) -> &[String] {
        &self.inputs.root.options.groups.get(group).inputs
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn group(heading: &str) -> InputGroup {
        InputGroup { heading: heading.to_string(), comment: String::new(), inputs: Vec::new() }
    }

    #[test]
    fn serializes_in_stable_field_order() {
        let root = RootInput {
            input_type: InputType::Object,
            comment: "root".to_string(),
            options: RootOptions {
                place_groups_below: false,
                groups: InputGroups { pending: group("Todo"), translated: group("Done") },
            },
        };
        let mut document = TranslationDocument::new(root, None);
        document.url_translation = Some("about.html".to_string());
        document.entries.insert("zeta".to_string(), String::new());
        document.entries.insert("alpha".to_string(), "A".to_string());
        document.inputs.root.options.groups.get_mut(Group::Translated).inputs.push("alpha".into());

        let yaml = serde_yaml::to_string(&document).unwrap();

        let expected = "\
_inputs:
  $:
    type: object
    comment: root
    options:
      place_groups_below: false
      groups:
      - heading: Todo
        comment: ''
        inputs: []
      - heading: Done
        comment: ''
        inputs:
        - alpha
urlTranslation: about.html
zeta: ''
alpha: A
";
        assert_eq!(yaml, expected);
        assert_eq!(document.group(Group::Translated).to_vec(), vec!["alpha".to_string()]);
    }
}
