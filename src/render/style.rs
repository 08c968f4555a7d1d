use crossterm::style::{Attribute, Color, ContentStyle, StyledContent};

pub const RED: Color = Color::AnsiValue(174);
pub const GREEN: Color = Color::AnsiValue(108);
pub const YELLOW: Color = Color::AnsiValue(180);
pub const BLUE: Color = Color::AnsiValue(110);
pub const MAGENTA: Color = Color::AnsiValue(139);
pub const CYAN: Color = Color::AnsiValue(109);
pub const GRAY: Color = Color::AnsiValue(245);
pub const DARK_GRAY: Color = Color::AnsiValue(240);
pub const ORANGE: Color = Color::AnsiValue(137);
pub const WHITE: Color = Color::AnsiValue(251);
pub const CODE_BG: Color = Color::AnsiValue(236);

/// A run of text with one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: ContentStyle,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: ContentStyle) -> Self {
        Segment {
            text: text.into(),
            style,
        }
    }
}

/// Foreground-only style
pub fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..ContentStyle::default()
    }
}

pub fn with_attr(mut style: ContentStyle, attr: Attribute) -> ContentStyle {
    style.attributes.set(attr);
    style
}

pub fn priority_color(priority: char) -> Option<Color> {
    match priority {
        'A' => Some(RED),
        'B' => Some(BLUE),
        _ => None,
    }
}

pub fn status_color(status: &str) -> Option<Color> {
    match status {
        "idea" => Some(YELLOW),
        "todo" => Some(GRAY),
        "run" => Some(BLUE),
        "hold" => Some(ORANGE),
        "lock" => Some(RED),
        _ => None,
    }
}

/// Badge color for a note type, compared case-insensitively
pub fn note_kind_color(kind: &str) -> Color {
    match kind.to_ascii_uppercase().as_str() {
        "OBS" => GREEN,
        "HYP" => YELLOW,
        "DO" => BLUE,
        "RES" => MAGENTA,
        "HOLD" => ORANGE,
        "LOCK" => RED,
        _ => CYAN,
    }
}

/// Turns styled text into output strings, with or without ANSI sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Painter { enabled }
    }

    /// A painter that never emits escape sequences
    pub fn plain() -> Self {
        Painter { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, text: &str, style: ContentStyle) -> String {
        if self.enabled && !text.is_empty() {
            StyledContent::new(style, text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Paint with a foreground color; `None` leaves the text unstyled
    pub fn color(&self, text: &str, color: Option<Color>) -> String {
        match color {
            Some(c) => self.paint(text, fg(c)),
            None => text.to_string(),
        }
    }

    pub fn segments(&self, segments: &[Segment]) -> String {
        segments
            .iter()
            .map(|s| self.paint(&s.text, s.style))
            .collect()
    }
}
