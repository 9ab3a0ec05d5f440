//! PDF encoding of a [`Canvas`].

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

use super::canvas::{Canvas, DrawOp, Page, Rect, Shade};
use super::error::RenderError;
use super::metrics::Font;

/// Grey level of [`Shade::LightGray`] (#e0e0e0).
const LIGHT_GRAY: f32 = 0.878;

const FONTS: [Font; 2] = [Font::Regular, Font::Bold];

/// Encodes canvases with the standard Helvetica fonts in WinAnsi encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl PdfWriter {
    /// Encodes every page of `canvas` into a complete PDF file.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Encoding` if lopdf fails to serialize a content
    /// stream or the document.
    pub fn encode(canvas: &Canvas) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in FONTS {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! { "Font" => fonts });

        let mut kids: Vec<Object> = Vec::with_capacity(canvas.page_count());
        for page in canvas.pages() {
            let content = Content {
                operations: page_operations(page, canvas.height()),
            };
            let bytes = content.encode().map_err(RenderError::encoding)?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, bytes));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = i64::try_from(kids.len()).map_err(RenderError::encoding)?;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(i64::from(canvas.width())),
                Object::Integer(i64::from(canvas.height())),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).map_err(RenderError::encoding)?;
        Ok(buffer)
    }
}

fn int(value: i32) -> Object {
    Object::Integer(i64::from(value))
}

/// Converts a top-down rectangle to PDF `re` operands.
fn rect_operands(rect: &Rect, page_height: i32) -> Vec<Object> {
    vec![
        int(rect.x),
        int(page_height - rect.bottom()),
        int(rect.width),
        int(rect.height),
    ]
}

fn page_operations(page: &Page, page_height: i32) -> Vec<Operation> {
    let mut ops = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                text,
            } => {
                let baseline = page_height - (y + i32::from(*size) * 718 / 1000);
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(font.resource_name().as_bytes().to_vec()),
                        Object::Integer(i64::from(*size)),
                    ],
                ));
                ops.push(Operation::new("Td", vec![int(*x), int(baseline)]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::FillRect { rect, shade } => {
                let level = match shade {
                    Shade::LightGray => LIGHT_GRAY,
                };
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("g", vec![Object::Real(level)]));
                ops.push(Operation::new("re", rect_operands(rect, page_height)));
                ops.push(Operation::new("f", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::StrokeRect { rect } => {
                ops.push(Operation::new("re", rect_operands(rect, page_height)));
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Line { from, to } => {
                ops.push(Operation::new(
                    "m",
                    vec![int(from.0), int(page_height - from.1)],
                ));
                ops.push(Operation::new("l", vec![int(to.0), int(page_height - to.1)]));
                ops.push(Operation::new("S", vec![]));
            }
        }
    }
    ops
}

/// Encodes text as WinAnsi (Windows-1252) bytes.
///
/// Characters outside the code page become `?`.
#[must_use]
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => {
                u8::try_from(u32::from(ch)).unwrap_or(b'?')
            }
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Payé"), vec![b'P', b'a', b'y', 0xe9]);
        assert_eq!(encode_win_ansi("Célébrant")[1], 0xe9);
        assert_eq!(encode_win_ansi("Horè"), vec![b'H', b'o', b'r', 0xe8]);
        assert_eq!(encode_win_ansi("€ œ"), vec![0x80, b' ', 0x9c]);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }

    #[test]
    fn test_encode_win_ansi_upper_control_range() {
        assert_eq!(
            encode_win_ansi("Šš Žž • ™ † ‡ ‰ ‹› ƒ ˆ ˜"),
            vec![
                0x8a, 0x9a, b' ', 0x8e, 0x9e, b' ', 0x95, b' ', 0x99, b' ', 0x86, b' ', 0x87,
                b' ', 0x89, b' ', 0x8b, 0x9b, b' ', 0x83, b' ', 0x88, b' ', 0x98,
            ]
        );
        assert_eq!(encode_win_ansi("Šimić"), vec![0x8a, b'i', b'm', b'i', b'?']);
    }

    #[test]
    fn test_encode_produces_loadable_document() {
        let mut canvas = Canvas::new(612, 792);
        canvas.text(50, 50, Font::Bold, 20, "Les Étoiles de Horè-Koubi");
        canvas.fill_rect(Rect::new(50, 100, 200, 20), Shade::LightGray);
        canvas.stroke_rect(Rect::new(50, 100, 200, 20));
        canvas.add_page();
        canvas.line((50, 100), (50, 120));

        let bytes = PdfWriter::encode(&canvas).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_coordinates_are_flipped() {
        let mut canvas = Canvas::new(612, 792);
        canvas.stroke_rect(Rect::new(50, 100, 200, 20));
        let ops = page_operations(&canvas.pages()[0], 792);
        assert_eq!(ops[0].operator, "re");
        let operands: Vec<i64> = ops[0]
            .operands
            .iter()
            .map(|operand| operand.as_i64().unwrap())
            .collect();
        assert_eq!(operands, vec![50, 672, 200, 20]);
    }
}
