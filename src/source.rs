//! Citation resolution — maps a source string returned by the chat API to a
//! typed reference with a lookup URL on the national law information site.
//!
//! Rules are tried in order and the first match wins:
//!
//! 1. `판례 <case number>` → precedent search
//! 2. `법령해석례 <number>` → interpretation search
//! 3. exact statute name from [`LAW_URLS`]
//! 4. substring match against [`LAW_URLS`] in either direction (label becomes
//!    the table key)
//! 5. anything mentioning `법` or `령` → generic statute lookup
//! 6. otherwise unrecognized, rendered without a link

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

const PRECEDENT_PREFIX: &str = "판례 ";
const INTERPRETATION_PREFIX: &str = "법령해석례 ";

const PRECEDENT_SEARCH_URL: &str = "https://www.law.go.kr/LSW/precSc.do?menuId=7&subMenuId=67";
const STATUTE_BASE_URL: &str = "https://www.law.go.kr/법령/";

/// Matches `encodeURIComponent`: alphanumerics and `- _ . ! ~ * ' ( )` pass through.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Known statutes and their canonical pages. Order matters for rule 4.
pub const LAW_URLS: &[(&str, &str)] = &[
    ("근로기준법", "https://www.law.go.kr/법령/근로기준법"),
    ("근로자퇴직급여보장법", "https://www.law.go.kr/법령/근로자퇴직급여보장법"),
    (
        "남녀고용평등과 일·가정 양립 지원에 관한 법률",
        "https://www.law.go.kr/법령/남녀고용평등과일·가정양립지원에관한법률",
    ),
    ("최저임금법", "https://www.law.go.kr/법령/최저임금법"),
    ("산업재해보상보험법", "https://www.law.go.kr/법령/산업재해보상보험법"),
    ("주택임대차보호법", "https://www.law.go.kr/법령/주택임대차보호법"),
    ("상가건물임대차보호법", "https://www.law.go.kr/법령/상가건물임대차보호법"),
    ("소비자기본법", "https://www.law.go.kr/법령/소비자기본법"),
    ("전자상거래법", "https://www.law.go.kr/법령/전자상거래등에서의소비자보호에관한법률"),
    ("자동차손해배상보장법", "https://www.law.go.kr/법령/자동차손해배상보장법"),
    ("도로교통법", "https://www.law.go.kr/법령/도로교통법"),
];

/// What a citation refers to. Drives the button styling in the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Precedent,
    Interpretation,
    Law,
    Unrecognized,
}

/// A resolved citation. Computed per call, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReference {
    pub kind: SourceKind,
    pub url: Option<String>,
    pub label: String,
}

/// Classify a citation string.
#[must_use]
pub fn resolve(citation: &str) -> SourceReference {
    let trimmed = citation.trim();

    if let Some(rest) = trimmed.strip_prefix(PRECEDENT_PREFIX) {
        return SourceReference {
            kind: SourceKind::Precedent,
            url: Some(precedent_search_url(1, rest.trim())),
            label: trimmed.to_owned(),
        };
    }

    if let Some(rest) = trimmed.strip_prefix(INTERPRETATION_PREFIX) {
        return SourceReference {
            kind: SourceKind::Interpretation,
            url: Some(precedent_search_url(2, rest.trim())),
            label: trimmed.to_owned(),
        };
    }

    if let Some(url) = statute_url(trimmed) {
        return SourceReference { kind: SourceKind::Law, url: Some(url.to_owned()), label: trimmed.to_owned() };
    }

    if let Some((key, url)) = LAW_URLS
        .iter()
        .find(|(key, _)| trimmed.contains(key) || key.contains(trimmed))
    {
        return SourceReference { kind: SourceKind::Law, url: Some((*url).to_owned()), label: (*key).to_owned() };
    }

    if trimmed.contains('법') || trimmed.contains('령') {
        return SourceReference {
            kind: SourceKind::Law,
            url: Some(format!("{STATUTE_BASE_URL}{}", encode_component(trimmed))),
            label: trimmed.to_owned(),
        };
    }

    unrecognized(trimmed)
}

/// Exact lookup in [`LAW_URLS`].
#[must_use]
pub fn statute_url(name: &str) -> Option<&'static str> {
    LAW_URLS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, url)| *url)
}

fn unrecognized(label: &str) -> SourceReference {
    SourceReference { kind: SourceKind::Unrecognized, url: None, label: label.to_owned() }
}

fn precedent_search_url(tab: u8, query: &str) -> String {
    format!("{PRECEDENT_SEARCH_URL}&tabMenuId={tab}&query={}", encode_component(query))
}

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
