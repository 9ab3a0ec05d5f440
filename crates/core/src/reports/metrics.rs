//! Helvetica advance widths.
//!
//! Widths are in thousandths of an em, as published in the standard AFM
//! files. Text widths are therefore returned in thousandths of a point.

/// The two standard fonts reports use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
}

impl Font {
    /// PostScript name of the font.
    #[must_use]
    pub const fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
        }
    }

    /// Resource name used in page content streams.
    #[must_use]
    pub const fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }

    const fn ascii_widths(self) -> &'static [u16; 95] {
        match self {
            Self::Regular => &HELVETICA,
            Self::Bold => &HELVETICA_BOLD,
        }
    }

    /// Advance width of one character in thousandths of an em.
    #[must_use]
    pub fn char_width(self, ch: char) -> u16 {
        let base = match ch {
            ' '..='~' => ch,
            'À'..='Å' => 'A',
            'Ç' => 'C',
            'È'..='Ë' => 'E',
            'Ì'..='Ï' => 'I',
            'Ñ' => 'N',
            'Ò'..='Ö' => 'O',
            'Ù'..='Ü' => 'U',
            'à'..='å' => 'a',
            'ç' => 'c',
            'è'..='ë' => 'e',
            'ì'..='ï' => 'i',
            'ñ' => 'n',
            'ò'..='ö' => 'o',
            'ù'..='ü' => 'u',
            'ÿ' | 'ý' => 'y',
            '\u{a0}' => ' ',
            _ => return 1000,
        };
        self.ascii_widths()[base as usize - 0x20]
    }

    /// Width of `text` at `size` points, in thousandths of a point.
    #[must_use]
    pub fn text_width(self, text: &str, size: u16) -> u32 {
        text.chars()
            .map(|ch| u32::from(self.char_width(ch)) * u32::from(size))
            .sum()
    }

    /// Width of `text` at `size` points, rounded up to whole points.
    #[must_use]
    pub fn text_width_points(self, text: &str, size: u16) -> u32 {
        self.text_width(text, size).div_ceil(1000)
    }

    /// Truncates `text` so it fits in `max_width` points.
    ///
    /// Truncated text ends with `...`. Returns an empty string when not even
    /// the ellipsis fits.
    #[must_use]
    pub fn fit_text(self, text: &str, size: u16, max_width: u32) -> String {
        let budget = max_width * 1000;
        if self.text_width(text, size) <= budget {
            return text.to_string();
        }

        let ellipsis = self.text_width(ELLIPSIS, size);
        if ellipsis > budget {
            return String::new();
        }

        let mut used = ellipsis;
        let mut fitted = String::new();
        for ch in text.chars() {
            let width = u32::from(self.char_width(ch)) * u32::from(size);
            if used + width > budget {
                break;
            }
            used += width;
            fitted.push(ch);
        }
        fitted.truncate(fitted.trim_end().len());
        fitted.push_str(ELLIPSIS);
        fitted
    }
}

const ELLIPSIS: &str = "...";

/// Helvetica, characters 0x20 through 0x7E.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold, characters 0x20 through 0x7E.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];
