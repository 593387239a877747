use crate::font::Font;
use crate::units::Pt;

const TABSIZE: usize = 4;

/// Calculate the width of a given string of text given the font and font size.
/// Characters missing from the font are measured as the glyph they'll be drawn with.
pub fn width_of_text(text: &str, font: &Font, size: Pt) -> Pt {
    text.chars().map(|ch| font.advance(ch, size)).sum()
}

/// Wraps `text` into lines no wider than `max_width`, as judged by `measure`.
///
/// # Wrapping Behavior
///
/// Words are packed greedily onto each line and separated by single spaces; runs of
/// whitespace collapse. Newlines in the input always start a new line (and an empty
/// input line is kept as an empty output line). A word that is wider than
/// `max_width` on its own is split at character level, with at least one character
/// per line so the function always makes progress.
///
/// Text that is empty or only whitespace produces no lines at all.
pub fn wrap_text<F>(text: &str, max_width: Pt, measure: F) -> Vec<String>
where
    F: Fn(&str) -> Pt,
{
    if text.trim().is_empty() {
        return Vec::new();
    }

    // replace tabs with spaces and normalize newlines
    let text = text
        .replace('\t', &" ".repeat(TABSIZE))
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.trim_matches('\n').split('\n') {
        let mut line = String::new();

        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line = place_word(word, max_width, &measure, &mut lines);
                continue;
            }

            let candidate = format!("{line} {word}");
            if measure(&candidate) <= max_width {
                line = candidate;
            } else {
                lines.push(std::mem::take(&mut line));
                line = place_word(word, max_width, &measure, &mut lines);
            }
        }

        lines.push(line);
    }

    lines
}

/// Starts a fresh line with `word`, breaking it up first if it can't fit on a line
/// of its own. Full lines produced by the break are pushed onto `lines`; the
/// returned string is the unfinished last line.
fn place_word<F>(word: &str, max_width: Pt, measure: &F, lines: &mut Vec<String>) -> String
where
    F: Fn(&str) -> Pt,
{
    if measure(word) <= max_width {
        return word.to_string();
    }

    let mut current = String::new();
    for ch in word.chars() {
        current.push(ch);
        if current.chars().count() > 1 && measure(&current) > max_width {
            current.pop();
            lines.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }
    current
}
