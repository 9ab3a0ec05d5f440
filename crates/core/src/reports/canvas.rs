//! Draw list produced by the layout pass.
//!
//! Coordinates are whole points measured from the top-left corner of the
//! page, with `y` growing downwards. The PDF writer flips them.

use super::metrics::Font;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Fill colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    /// Table header background, #e0e0e0.
    LightGray,
}

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// A single line of text whose line box starts at `y`.
    Text {
        /// Left edge.
        x: i32,
        /// Top of the line box.
        y: i32,
        /// Font face.
        font: Font,
        /// Font size in points.
        size: u16,
        /// Text to draw.
        text: String,
    },
    /// Filled rectangle without border.
    FillRect {
        /// Area.
        rect: Rect,
        /// Colour.
        shade: Shade,
    },
    /// Rectangle outline.
    StrokeRect {
        /// Area.
        rect: Rect,
    },
    /// Straight line.
    Line {
        /// Start point.
        from: (i32, i32),
        /// End point.
        to: (i32, i32),
    },
}

/// A page of drawing instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Instructions in painting order.
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text of every text instruction, in painting order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Returns true if some text instruction draws exactly `needle`.
    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text == needle)
    }
}

/// Fixed-size pages of drawing instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: i32,
    height: i32,
    pages: Vec<Page>,
}

impl Canvas {
    /// Creates a canvas holding one empty page.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pages: vec![Page::default()],
        }
    }

    /// Page width.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Page height.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Pages in order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Starts a new page; later instructions go there.
    pub fn add_page(&mut self) {
        self.pages.push(Page::default());
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    /// Draws one line of text.
    pub fn text(&mut self, x: i32, y: i32, font: Font, size: u16, text: impl Into<String>) {
        self.push(DrawOp::Text {
            x,
            y,
            font,
            size,
            text: text.into(),
        });
    }

    /// Fills a rectangle.
    pub fn fill_rect(&mut self, rect: Rect, shade: Shade) {
        self.push(DrawOp::FillRect { rect, shade });
    }

    /// Outlines a rectangle.
    pub fn stroke_rect(&mut self, rect: Rect) {
        self.push(DrawOp::StrokeRect { rect });
    }

    /// Draws a straight line.
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32)) {
        self.push(DrawOp::Line { from, to });
    }
}
