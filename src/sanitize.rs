//! Cleaning of untrusted text before it reaches a canvas.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use url::Url;

/// Maximum length, in characters, of any sanitized string
pub const SANITIZE_LIMIT: usize = 600;

const HAZARDOUS: [char; 5] = ['<', '>', '"', '\'', '&'];

/// [sanitize_with_limit] with the default [SANITIZE_LIMIT]
pub fn sanitize(raw: &str) -> String {
    sanitize_with_limit(raw, SANITIZE_LIMIT)
}

/// Strips `< > " ' &`, truncates to `limit` characters and trims surrounding
/// whitespace. The result is never longer than `limit` characters.
pub fn sanitize_with_limit(raw: &str, limit: usize) -> String {
    let truncated: String = raw
        .chars()
        .filter(|c| !HAZARDOUS.contains(c))
        .take(limit)
        .collect();
    truncated.trim().to_string()
}

/// Compact display form of a link: host followed by path, without a bare `/` path.
/// Anything that doesn't parse as a URL is sanitized as plain text.
pub fn sanitize_url(raw: &str) -> String {
    match Url::parse(raw.trim()) {
        Ok(url) => {
            let host = url.host_str().unwrap_or_default();
            let path = match url.path() {
                "/" => "",
                path => path,
            };
            sanitize(&format!("{host}{path}"))
        }
        Err(_) => sanitize(raw),
    }
}

/// Filename-safe identifier for a display name: diacritics folded, lowercase, runs of
/// anything not alphanumeric (leading and trailing ones included) collapsed into a
/// single `_`. A name with nothing left after sanitizing becomes `resume`.
///
/// ```
/// assert_eq!(cv_gen::slugify("José Carlos Torres Rivera"), "jose_carlos_torres_rivera");
/// assert_eq!(cv_gen::slugify("Dr. X."), "dr_x_");
/// assert_eq!(cv_gen::slugify("  <>  "), "resume");
/// ```
pub fn slugify(name: &str) -> String {
    let folded = sanitize(name)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>();
    if folded.is_empty() {
        return "resume".to_string();
    }

    let mut slug = String::with_capacity(folded.len());
    for ch in folded.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug
}
