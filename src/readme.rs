//! README rendering and display
//!
//! Release READMEs are markdown. They are converted to HTML and wrapped in a
//! small standalone document so they can be opened directly in a browser.

use pulldown_cmark::{Options, Parser, html};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>TidyTuesday README</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 20px; line-height: 1.6; }
        h1, h2, h3 { color: #333; }
        pre { background-color: #f4f4f4; padding: 10px; border-radius: 5px; }
        a { color: #0366d6; }
    </style>
</head>
<body>
"#;

const DOCUMENT_TAIL: &str = "</body>\n</html>\n";

/// Convert README markdown into a standalone HTML document
///
/// Empty input still produces a complete (empty-bodied) document.
pub fn render_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut document = String::with_capacity(DOCUMENT_HEAD.len() + markdown.len() * 2);
    document.push_str(DOCUMENT_HEAD);
    html::push_html(&mut document, parser);
    document.push_str(DOCUMENT_TAIL);
    document
}

/// Write a rendered document to a temporary `.html` file that outlives the process
pub fn write_to_temp(html: &str) -> Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("tidytuesday-readme-")
        .suffix(".html")
        .tempfile()?;
    file.write_all(html.as_bytes())?;
    file.flush()?;

    let path = file.into_temp_path().keep().map_err(|e| Error::Io(e.error))?;
    Ok(path)
}

/// Persist the document and open it in the default browser
///
/// Returns `None` (after a notice) when there is nothing to show.
pub fn show(html: &str) -> Result<Option<PathBuf>> {
    show_with(html, |path| open::that(path))
}

pub(crate) fn show_with<F>(html: &str, opener: F) -> Result<Option<PathBuf>>
where
    F: FnOnce(&Path) -> std::io::Result<()>,
{
    if html.trim().is_empty() {
        tracing::info!("No README available for this dataset.");
        return Ok(None);
    }

    let path = write_to_temp(html)?;
    if let Err(e) = opener(&path) {
        let _ = std::fs::remove_file(&path);
        return Err(e.into());
    }
    tracing::debug!(path = %path.display(), "README written");
    Ok(Some(path))
}
