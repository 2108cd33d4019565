//! English list joining and paragraph wrapping.

/// Column at which composed paragraphs are wrapped.
pub const LINE_WIDTH: usize = 68;

/// Joins items the way English lists are written.
///
/// - one item: `A`
/// - two items: `A and B`
/// - three or more: `A, B, and C`
///
/// `conjunction` is usually `"and"` or `"or"`.
pub fn join_list<S: AsRef<str>>(items: &[S], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} {conjunction} {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let head = init
                .iter()
                .map(|item| item.as_ref())
                .collect::<Vec<&str>>()
                .join(", ");
            format!("{head}, {conjunction} {}", last.as_ref())
        }
    }
}

/// Greedily wraps each paragraph to `width` columns. Paragraphs are
/// separated by blank lines in both input and output; other whitespace is
/// collapsed.
pub fn wrap_paragraphs(text: &str, width: usize) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| wrap_paragraph(paragraph, width))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn wrap_paragraph(paragraph: &str, width: usize) -> String {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in paragraph.split_whitespace() {
        let word_len = word.chars().count();
        if line_len > 0 && line_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines.join("\n")
}
