//! Final HTML document assembly.

use crate::error::Result;
use crate::model::SlideResult;
use crate::render::escape_html;
use std::fs;
use std::path::{Path, PathBuf};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        body { margin: 0; padding: 0; }
        .slide-container { max-width: 1024px; margin: 0 auto; padding: 2rem; }
        .slide { position: relative; width: 100%; padding-top: 75%; margin-bottom: 2rem; }
        .slide-content { position: absolute; top: 0; left: 0; right: 0; bottom: 0; }
        .absolute { position: absolute; }
        .paragraph { margin-bottom: 0.5em; }
        .slide-content > div { max-height: none !important; overflow: visible !important; }
        .title { font-size: 1.15em; font-weight: bold; margin-bottom: 0.5em; }
        a { text-decoration: underline; color: blue; }
        a:hover { text-decoration: none; }
    </style>
</head>
<body class="bg-gray-100">
<div class="slide-container">
"#;

const PAGE_TAIL: &str = "</div></body></html>\n";

/// Wrap one slide fragment in its 4:3 slide container.
pub fn wrap_slide(html: &str) -> String {
    format!(
        r#"<div class="slide bg-white shadow-lg rounded-lg"><div class="slide-content">{}</div></div>"#,
        html
    )
}

/// Build the full page from slides already in slide order.
pub fn build_document(slides: &[SlideResult], title: &str) -> String {
    let mut html = PAGE_HEAD.replace("{title}", &escape_html(title));
    for slide in slides {
        html.push_str(&wrap_slide(&slide.html));
        html.push('\n');
    }
    html.push_str(PAGE_TAIL);
    html
}

/// Write `html` to `output`, creating parent directories.
///
/// The content goes to a sibling temporary file first and is renamed into
/// place, so `output` is either complete or untouched.
pub fn write_document(html: &str, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(output);
    if let Err(e) = fs::write(&tmp, html) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp, output) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Build and write the document in one step.
pub fn assemble(slides: &[SlideResult], title: &str, output: &Path) -> Result<()> {
    log::info!("Writing HTML content to {}", output.display());
    write_document(&build_document(slides, title), output)
}

fn temp_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output.with_file_name(format!(".{}.tmp", name))
}
