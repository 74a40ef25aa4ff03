use crate::text::measure::TextMeasure;

/// Greedy single-pass word wrap.
///
/// Words are appended while the candidate line, measured with its trailing separator, fits in
/// `max_width`. The first word of a line is always accepted, so a word wider than `max_width`
/// ends up alone on its line instead of being split. Returned lines are trimmed; an empty or
/// whitespace-only `text` yields no lines.
pub fn wrap_words(
    text: &str,
    max_width: f32,
    size_px: f32,
    measure: &mut dyn TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = format!("{line}{word} ");
        if !line.is_empty() && measure.measure(&candidate, size_px) > max_width {
            lines.push(line.trim_end().to_string());
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line.trim_end().to_string());
    }

    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
