//! Editing UI metadata derived from the key inventory.
//!
//! Everything here is a pure function of its arguments, so regenerating the
//! metadata on every run yields the same output for the same inventory.

use url::Url;

use super::document::{
    InputConfig,
    InputContext,
    InputGroup,
    InputGroups,
    InputType,
    RootInput,
    RootOptions,
    UrlTranslationInput,
};
use crate::input::inventory::{
    COMMON_NAMESPACE,
    KeyEntry,
};

/// Labels longer than this are cut with an ellipsis.
const MAX_LABEL_CHARS: usize = 60;

/// Originals longer than this get a multi-line input.
const MAX_TEXT_INPUT_CHARS: usize = 80;

/// Word count at which a text fragment switches to `start,end` form.
const FRAGMENT_EDGE_WORDS: usize = 4;

/// Document-level input of a page working file.
#[must_use]
pub fn page_root_input(page: &str, locale: &str, base_url: &str) -> RootInput {
    RootInput {
        input_type: InputType::Object,
        comment: format!("[See {page}]({})", page_url(base_url, page)),
        options: RootOptions {
            place_groups_below: false,
            groups: InputGroups {
                pending: InputGroup {
                    heading: format!("Still to translate ({locale})"),
                    comment: format!("Text to translate from the original {page}"),
                    inputs: Vec::new(),
                },
                translated: InputGroup {
                    heading: format!("Already translated ({locale})"),
                    comment: format!("Text already translated in {locale}"),
                    inputs: Vec::new(),
                },
            },
        },
    }
}

/// Document-level input of the shared common file.
#[must_use]
pub fn common_root_input(locale: &str) -> RootInput {
    RootInput {
        input_type: InputType::Object,
        comment: format!("Text shared by every page, translated to {locale}"),
        options: RootOptions {
            place_groups_below: false,
            groups: InputGroups {
                pending: InputGroup {
                    heading: format!("Still to translate ({locale})"),
                    comment: "Shared text to translate".to_string(),
                    inputs: Vec::new(),
                },
                translated: InputGroup {
                    heading: format!("Already translated ({locale})"),
                    comment: format!("Shared text already translated in {locale}"),
                    inputs: Vec::new(),
                },
            },
        },
    }
}

#[must_use]
pub fn url_translation_input(locale: &str) -> UrlTranslationInput {
    UrlTranslationInput {
        input_type: InputType::Text,
        comment: format!("The URL of this page in {locale}"),
    }
}

/// Input configuration of a page-scoped key.
#[must_use]
pub fn page_input_config(key: &str, entry: &KeyEntry, page: &str, base_url: &str) -> InputConfig {
    InputConfig {
        label: input_label(key),
        input_type: input_type(&entry.original),
        comment: format!("[See on page]({})", text_fragment_link(base_url, page, &entry.original)),
        context: original_context(&entry.original),
    }
}

/// Input configuration of a `common:` key.
#[must_use]
pub fn common_input_config(key: &str, entry: &KeyEntry) -> InputConfig {
    let comment = match entry.live_pages().count() {
        0 => String::new(),
        1 => "Used on 1 page".to_string(),
        count => format!("Used on {count} pages"),
    };

    InputConfig {
        label: input_label(key),
        input_type: input_type(&entry.original),
        comment,
        context: original_context(&entry.original),
    }
}

/// Collapsed panel showing the source text.
fn original_context(original: &str) -> InputContext {
    InputContext {
        open: false,
        title: "Untranslated".to_string(),
        icon: "translate".to_string(),
        content: original.to_string(),
    }
}

/// Human-readable label from a key: namespace dropped, separators spaced,
/// first letter capitalized.
fn input_label(key: &str) -> String {
    let name = key.strip_prefix(COMMON_NAMESPACE).unwrap_or(key);
    let name = name.rsplit(':').next().unwrap_or(name);
    let words = name.replace(['-', '_', '.'], " ");
    let mut label = words.split_whitespace().collect::<Vec<_>>().join(" ");

    if label.chars().count() > MAX_LABEL_CHARS {
        label = label.chars().take(MAX_LABEL_CHARS).collect::<String>().trim_end().to_string();
        label.push('…');
    }

    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}

/// Markup gets a rich editor, long or multi-line text a textarea.
fn input_type(original: &str) -> InputType {
    if looks_like_markup(original) {
        InputType::Markdown
    } else if original.contains('\n') || original.chars().count() > MAX_TEXT_INPUT_CHARS {
        InputType::Textarea
    } else {
        InputType::Text
    }
}

/// `<` followed by a tag name or `/`.
fn looks_like_markup(text: &str) -> bool {
    text.match_indices('<').any(|(index, _)| {
        text.get(index + 1..)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|next| next.is_ascii_alphabetic() || next == '/')
    })
}

/// Absolute URL of `page` on the live site, or the bare page path when the
/// base URL is unusable.
fn page_url(base_url: &str, page: &str) -> String {
    site_url(base_url, page).map_or_else(|| format!("/{}", page.trim_start_matches('/')), String::from)
}

/// Joins `page` onto the base URL as a directory.
fn site_url(base_url: &str, page: &str) -> Option<Url> {
    let base = if base_url.ends_with('/') { base_url.to_string() } else { format!("{base_url}/") };
    Url::parse(&base).ok()?.join(page.trim_start_matches('/')).ok()
}

/// Link to `original` on the live page using a text fragment
/// (`#:~:text=start,end`).
fn text_fragment_link(base_url: &str, page: &str, original: &str) -> String {
    let Some(mut url) = site_url(base_url, page) else {
        return page_url(base_url, page);
    };

    let plain = strip_tags(original);
    let words: Vec<&str> = plain.split_whitespace().collect();
    if words.is_empty() {
        return url.into();
    }

    let fragment = if words.len() <= FRAGMENT_EDGE_WORDS * 2 {
        escape_fragment_term(&words.join(" "))
    } else {
        let start = words.iter().take(FRAGMENT_EDGE_WORDS).copied().collect::<Vec<_>>().join(" ");
        let end = words
            .iter()
            .skip(words.len() - FRAGMENT_EDGE_WORDS)
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        format!("{},{}", escape_fragment_term(&start), escape_fragment_term(&end))
    };

    url.set_fragment(Some(&format!(":~:text={fragment}")));
    url.into()
}

/// Escapes the characters that are syntax inside a text directive.
/// The rest is percent-encoded by `Url::set_fragment`.
fn escape_fragment_term(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        match ch {
            '%' => escaped.push_str("%25"),
            '-' => escaped.push_str("%2D"),
            ',' => escaped.push_str("%2C"),
            '&' => escaped.push_str("%26"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Replaces tags with spaces.
fn strip_tags(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                plain.push(' ');
            }
            _ if !in_tag => plain.push(ch),
            _ => {}
        }
    }
    plain
}
