//! Conversion of vendor markup snippets into working file text.

use thiserror::Error;

/// Failure to convert a single snippet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Snippet contains a NUL character")]
    NulCharacter,

    #[error("Markup converter failed on snippet")]
    ConverterFailed,
}

/// Stateless markup → working-file-text conversion.
pub trait MarkupConverter: Send + Sync {
    /// Converts one vendor snippet.
    ///
    /// # Errors
    /// Returns an error if the snippet cannot be converted; callers treat
    /// this as "no vendor translation".
    fn convert(&self, markup: &str) -> Result<String, ConversionError>;
}

/// HTML → Markdown using `html2md`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlToMarkdown;

impl MarkupConverter for HtmlToMarkdown {
    fn convert(&self, markup: &str) -> Result<String, ConversionError> {
        if markup.contains('\0') {
            return Err(ConversionError::NulCharacter);
        }

        // html2md panics on some malformed input
        let markdown = std::panic::catch_unwind(|| html2md::parse_html(markup))
            .map_err(|_| ConversionError::ConverterFailed)?;

        Ok(markdown.trim().to_string())
    }
}
