//! Post/comment body parsing.
//!
//! Bodies are free text with optional triple-backtick fenced code segments.
//! This splits them into an ordered list of display segments: paragraphs,
//! bullet lists, and labeled code blocks. Only complete ``` ... ``` pairs
//! count as fences; an unterminated trailing marker stays literal prose.

const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Paragraph(String),
    List(Vec<String>),
    Code {
        /// Filename label: the first fence line when it is non-empty and
        /// contains no whitespace.
        label: Option<String>,
        body: String,
    },
}

pub fn parse_content(text: &str) -> Vec<Segment> {
    let parts: Vec<&str> = text.split(FENCE).collect();
    let mut segments = Vec::new();

    for (i, part) in parts.iter().enumerate() {
        // Odd-indexed parts are fenced only when their closing fence exists,
        // i.e. they are not the final part of an even-length split.
        if i % 2 == 1 && i + 1 < parts.len() {
            segments.push(parse_code(part));
        } else if i % 2 == 1 {
            let literal = format!("{FENCE}{part}");
            parse_prose(&literal, &mut segments);
        } else {
            parse_prose(part, &mut segments);
        }
    }

    segments
}

fn parse_code(raw: &str) -> Segment {
    let first_line = raw.lines().next().unwrap_or("");
    let labeled = !first_line.is_empty() && !first_line.chars().any(char::is_whitespace);

    let trim_edges = |s: &str| s.trim_matches(|c: char| c == '\r' || c == '\n').to_string();

    if labeled {
        Segment::Code {
            label: Some(first_line.to_string()),
            body: trim_edges(&raw[first_line.len()..]),
        }
    } else {
        Segment::Code {
            label: None,
            body: trim_edges(raw),
        }
    }
}

fn is_bullet(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("* ")
}

/// Prose splitting: consecutive bullet lines group into one list, other
/// non-blank lines become paragraphs, blank lines are dropped.
fn parse_prose(text: &str, out: &mut Vec<Segment>) {
    let mut list: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if is_bullet(line) {
            list.push(line[2..].to_string());
            continue;
        }
        if !list.is_empty() {
            out.push(Segment::List(std::mem::take(&mut list)));
        }
        if !line.trim().is_empty() {
            out.push(Segment::Paragraph(line.to_string()));
        }
    }

    if !list.is_empty() {
        out.push(Segment::List(list));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_code_between_paragraphs() {
        let segments = parse_content("before\n```file.py\nprint(1)\n```\nafter");
        assert_eq!(
            segments,
            vec![
                Segment::Paragraph("before".into()),
                Segment::Code {
                    label: Some("file.py".into()),
                    body: "print(1)".into(),
                },
                Segment::Paragraph("after".into()),
            ]
        );
    }

    #[test]
    fn first_line_with_whitespace_is_not_a_label() {
        let segments = parse_content("```no filename here\ncode\n```");
        assert_eq!(
            segments,
            vec![Segment::Code {
                label: None,
                body: "no filename here\ncode".into(),
            }]
        );
    }

    #[test]
    fn unterminated_fence_stays_literal_prose() {
        let segments = parse_content("text\n```dangling\nmore");
        assert_eq!(
            segments,
            vec![
                Segment::Paragraph("text".into()),
                Segment::Paragraph("```dangling".into()),
                Segment::Paragraph("more".into()),
            ]
        );
    }

    #[test]
    fn third_fence_is_unmatched() {
        let segments = parse_content("a\n```rs\nlet x = 1;\n```\nb\n```tail");
        assert_eq!(
            segments,
            vec![
                Segment::Paragraph("a".into()),
                Segment::Code {
                    label: Some("rs".into()),
                    body: "let x = 1;".into(),
                },
                Segment::Paragraph("b".into()),
                Segment::Paragraph("```tail".into()),
            ]
        );
    }

    #[test]
    fn empty_code_body_keeps_label() {
        let segments = parse_content("```main.rs\n```");
        assert_eq!(
            segments,
            vec![Segment::Code {
                label: Some("main.rs".into()),
                body: String::new(),
            }]
        );
    }

    #[test]
    fn bullets_group_into_one_list() {
        let segments = parse_content("intro\n- one\n- two\n* three\n\noutro");
        assert_eq!(
            segments,
            vec![
                Segment::Paragraph("intro".into()),
                Segment::List(vec!["one".into(), "two".into(), "three".into()]),
                Segment::Paragraph("outro".into()),
            ]
        );
    }

    #[test]
    fn separated_bullet_runs_are_separate_lists() {
        let segments = parse_content("- a\nmiddle\n- b");
        assert_eq!(
            segments,
            vec![
                Segment::List(vec!["a".into()]),
                Segment::Paragraph("middle".into()),
                Segment::List(vec!["b".into()]),
            ]
        );
    }

    #[test]
    fn blank_lines_are_dropped() {
        let segments = parse_content("one\n\n\ntwo\n");
        assert_eq!(
            segments,
            vec![
                Segment::Paragraph("one".into()),
                Segment::Paragraph("two".into()),
            ]
        );
    }
}
