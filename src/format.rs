//! Reply rendering — turns a `ChatReply` into the HTML shown in the chat log.
//!
//! Pure and deterministic: no I/O, no stored state. Every string that came
//! from the API is escaped through `HtmlFragment::text`/`attr`; only the
//! fixed chrome below is written raw.

use std::fmt::Write;

use crate::html::HtmlFragment;
use crate::source::{self, SourceKind};
use crate::transport::ChatReply;

/// Shown in place of a reply when the transport fails, whatever the cause.
pub const APOLOGY_HTML: &str = concat!(
    "<p>죄송합니다. 서버 연결에 문제가 발생했습니다.</p>",
    "<p style=\"font-size: 0.85em; color: rgba(255,255,255,0.5); margin-top: 12px;\">",
    "잠시 후 다시 시도해 주세요. 서버가 시작 중일 수 있습니다.",
    "</p>",
);

/// Plain-text counterpart of [`APOLOGY_HTML`].
pub const APOLOGY_TEXT: &str = "죄송합니다. 서버 연결에 문제가 발생했습니다.\n잠시 후 다시 시도해 주세요. 서버가 시작 중일 수 있습니다.";

const SECTION_RULE: &str = "border-top: 1px solid rgba(255,255,255,0.1);";

// =============================================================================
// BUTTON STYLES
// =============================================================================

struct ButtonStyle {
    color: &'static str,
    background: &'static str,
    border: &'static str,
    icon: &'static str,
}

const PRECEDENT_BUTTON: ButtonStyle = ButtonStyle {
    color: "#f59e0b",
    background: "rgba(245, 158, 11, 0.1)",
    border: "rgba(245, 158, 11, 0.3)",
    icon: r#"<svg width="14" height="14" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="10"/><path d="M12 6v6l4 2"/></svg>"#,
};

const INTERPRETATION_BUTTON: ButtonStyle = ButtonStyle {
    color: "#10b981",
    background: "rgba(16, 185, 129, 0.1)",
    border: "rgba(16, 185, 129, 0.3)",
    icon: r#"<svg width="14" height="14" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z"/><path d="M14 2v6h6"/><path d="M16 13H8"/><path d="M16 17H8"/><path d="M10 9H8"/></svg>"#,
};

const LAW_BUTTON: ButtonStyle = ButtonStyle {
    color: "var(--color-primary-light)",
    background: "rgba(59, 130, 246, 0.1)",
    border: "rgba(59, 130, 246, 0.3)",
    icon: r#"<svg width="14" height="14" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M18 13v6a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2h6"/><polyline points="15 3 21 3 21 9"/><line x1="10" y1="14" x2="21" y2="3"/></svg>"#,
};

fn button_style(kind: SourceKind) -> &'static ButtonStyle {
    match kind {
        SourceKind::Precedent => &PRECEDENT_BUTTON,
        SourceKind::Interpretation => &INTERPRETATION_BUTTON,
        SourceKind::Law | SourceKind::Unrecognized => &LAW_BUTTON,
    }
}

// =============================================================================
// HTML
// =============================================================================

/// Render a reply: answer paragraphs, then the source section if any, then
/// the disclaimer if any.
#[must_use]
pub fn format_reply(reply: &ChatReply) -> HtmlFragment {
    let mut html = HtmlFragment::new();
    push_answer(&mut html, &reply.answer);
    if !reply.sources.is_empty() {
        push_sources(&mut html, &reply.sources);
    }
    if let Some(disclaimer) = present_disclaimer(reply) {
        html.raw(r#"<p class="disclaimer" style="font-size: 0.8em; color: rgba(255,255,255,0.4); margin-top: 16px; padding-top: 12px; "#)
            .raw(SECTION_RULE)
            .raw(r#"">⚠️ "#)
            .text(disclaimer)
            .raw("</p>");
    }
    html
}

/// An empty disclaimer renders nothing.
fn present_disclaimer(reply: &ChatReply) -> Option<&str> {
    reply.disclaimer.as_deref().filter(|d| !d.is_empty())
}

/// `\n\n` splits paragraphs; a single `\n` becomes `<br>`.
fn push_answer(html: &mut HtmlFragment, answer: &str) {
    for paragraph in answer.split("\n\n") {
        html.raw("<p>");
        for (i, line) in paragraph.split('\n').enumerate() {
            if i > 0 {
                html.raw("<br>");
            }
            html.text(line);
        }
        html.raw("</p>");
    }
}

fn push_sources(html: &mut HtmlFragment, sources: &[String]) {
    let resolved: Vec<_> = sources.iter().map(|s| (s, source::resolve(s))).collect();

    html.raw(r#"<div class="source-section" style="margin-top: 16px; padding-top: 12px; "#)
        .raw(SECTION_RULE)
        .raw(r#"">"#)
        .raw(r#"<p style="font-size: 0.85em; color: var(--color-primary-light); margin-bottom: 8px;"><strong>📚 참고 자료:</strong></p>"#)
        .raw(r#"<ul style="font-size: 0.8em; color: rgba(255,255,255,0.6); padding-left: 16px; margin-bottom: 12px;">"#);

    for (citation, reference) in &resolved {
        html.raw(r#"<li style="margin-bottom: 4px;">"#);
        match &reference.url {
            Some(url) => {
                html.raw("<a")
                    .attr("href", url)
                    .raw(r#" target="_blank" rel="noopener noreferrer" style="color: rgba(255,255,255,0.7); text-decoration: underline; text-decoration-style: dotted;">"#)
                    .text(citation)
                    .raw("</a>");
            }
            None => {
                html.text(citation);
            }
        }
        html.raw("</li>");
    }
    html.raw("</ul>");

    html.raw(r#"<div class="source-links" style="display: flex; flex-wrap: wrap; gap: 8px; margin-top: 12px;">"#);
    for (_, reference) in &resolved {
        let Some(url) = &reference.url else {
            continue;
        };
        let style = button_style(reference.kind);
        let inline = format!(
            "display: inline-flex; align-items: center; gap: 4px; padding: 6px 12px; font-size: 0.75em; \
             color: {}; background: {}; border: 1px solid {}; border-radius: 6px; text-decoration: none; \
             transition: all 0.2s;",
            style.color, style.background, style.border
        );
        html.raw("<a")
            .attr("href", url)
            .raw(r#" target="_blank" rel="noopener noreferrer" class="source-link-btn""#)
            .attr("style", &inline)
            .raw(">")
            .raw(style.icon)
            .raw(" ")
            .text(&reference.label)
            .raw(" 원문</a>");
    }
    html.raw("</div></div>");
}

// =============================================================================
// PLAIN TEXT
// =============================================================================

/// Terminal rendering of the same reply: answer, numbered sources with their
/// lookup URLs, disclaimer.
#[must_use]
pub fn format_text(reply: &ChatReply) -> String {
    let mut out = reply.answer.trim_end().to_string();
    if !reply.sources.is_empty() {
        out.push_str("\n\n📚 참고 자료:");
        for (i, citation) in reply.sources.iter().enumerate() {
            let reference = source::resolve(citation);
            let _ = write!(out, "\n  {}. {citation}", i + 1);
            if let Some(url) = reference.url {
                let _ = write!(out, "\n     {url}");
            }
        }
    }
    if let Some(disclaimer) = present_disclaimer(reply) {
        let _ = write!(out, "\n\n⚠️ {disclaimer}");
    }
    out
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
