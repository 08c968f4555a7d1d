use std::ops::Range;
use std::sync::LazyLock;

use crossterm::style::{Attribute, ContentStyle};
use regex::Regex;

use super::style::{CODE_BG, DARK_GRAY, Segment, with_attr};

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern"));
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+?)`").expect("code pattern"));

/// A segment plus whether later passes may still split it
struct Piece {
    text: String,
    style: ContentStyle,
    sealed: bool,
}

/// Split a note content line into styled segments.
///
/// Three forms are recognized, applied in order: `**bold**`, `*italic*`
/// (a lone star, never half of `**`), and `` `code` ``. Each pass only looks
/// inside the segments produced so far, so a match never spans the edge of
/// an earlier one. Text outside a match keeps the style of the segment it
/// came from, which is how the base style resumes after a code span.
pub fn format_inline(line: &str, base: ContentStyle) -> Vec<Segment> {
    let pieces = vec![Piece {
        text: line.to_string(),
        style: base,
        sealed: false,
    }];

    let pieces = split_pass(pieces, find_bold, |s| with_attr(s, Attribute::Bold), false);
    let pieces = split_pass(
        pieces,
        find_italic,
        |mut s| {
            s = with_attr(s, Attribute::Italic);
            s.foreground_color = Some(DARK_GRAY);
            s
        },
        false,
    );
    let pieces = split_pass(
        pieces,
        find_code,
        |mut s| {
            s.foreground_color = Some(DARK_GRAY);
            s.background_color = Some(CODE_BG);
            s
        },
        true,
    );

    pieces
        .into_iter()
        .map(|p| Segment::new(p.text, p.style))
        .collect()
}

/// Outer match range (with markers) and inner range (text only)
type Found = (Range<usize>, Range<usize>);

fn split_pass(
    pieces: Vec<Piece>,
    find: impl Fn(&str) -> Option<Found>,
    restyle: impl Fn(ContentStyle) -> ContentStyle,
    seal: bool,
) -> Vec<Piece> {
    let mut out = Vec::with_capacity(pieces.len());
    for piece in pieces {
        if piece.sealed {
            out.push(piece);
            continue;
        }
        let mut rest = piece.text.as_str();
        while let Some((outer, inner)) = find(rest) {
            if outer.start > 0 {
                out.push(Piece {
                    text: rest[..outer.start].to_string(),
                    style: piece.style,
                    sealed: false,
                });
            }
            out.push(Piece {
                text: rest[inner].to_string(),
                style: restyle(piece.style),
                sealed: seal,
            });
            rest = &rest[outer.end..];
        }
        if !rest.is_empty() {
            out.push(Piece {
                text: rest.to_string(),
                style: piece.style,
                sealed: false,
            });
        }
    }
    out
}

fn find_bold(s: &str) -> Option<Found> {
    let caps = BOLD.captures(s)?;
    Some((caps.get(0)?.range(), caps.get(1)?.range()))
}

fn find_code(s: &str) -> Option<Found> {
    let caps = CODE.captures(s)?;
    Some((caps.get(0)?.range(), caps.get(1)?.range()))
}

/// `*text*` where neither star touches another star
fn find_italic(s: &str) -> Option<Found> {
    let bytes = s.as_bytes();
    let lone = |i: usize| {
        bytes[i] == b'*'
            && (i == 0 || bytes[i - 1] != b'*')
            && bytes.get(i + 1).is_none_or(|&b| b != b'*')
    };

    let open = (0..bytes.len()).find(|&i| lone(i))?;
    let close = (open + 2..bytes.len()).find(|&i| lone(i))?;
    Some((open..close + 1, open + 1..close))
}
