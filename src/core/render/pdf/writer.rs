//! Minimal single-page PDF 1.4 writer
//!
//! Supports exactly what the quality report needs: filled rectangles and text in
//! the two standard Helvetica faces, laid out in millimetres from the top-left
//! corner of an A4 page. Text is encoded as WinAnsi; characters outside that
//! code page are replaced with `?`.

use std::fmt::Write as _;

pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;

const PT_PER_MM: f64 = 72.0 / 25.4;

/// Approximate Helvetica advance width, in em, used for centring
const HELVETICA_AVG_EM: f64 = 0.52;
const HELVETICA_BOLD_AVG_EM: f64 = 0.56;

/// Standard font faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    fn resource_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "F1",
            Self::HelveticaBold => "F2",
        }
    }

    fn avg_em(&self) -> f64 {
        match self {
            Self::Helvetica => HELVETICA_AVG_EM,
            Self::HelveticaBold => HELVETICA_BOLD_AVG_EM,
        }
    }
}

/// Horizontal text alignment relative to `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// RGB colour, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    fn components(&self) -> (f64, f64, f64) {
        (
            f64::from(self.0) / 255.0,
            f64::from(self.1) / 255.0,
            f64::from(self.2) / 255.0,
        )
    }
}

/// Font, size, colour and alignment of a text run
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub font: Font,
    pub size: f64,
    pub color: Rgb,
    pub align: Align,
}

impl TextStyle {
    pub fn new(font: Font, size: f64) -> Self {
        Self {
            font,
            size,
            color: Rgb::BLACK,
            align: Align::Left,
        }
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }
}

/// Content stream of one page
#[derive(Debug, Default)]
pub struct PageContent {
    ops: String,
}

impl PageContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filled rectangle; `(x, y)` is the top-left corner in millimetres
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        let (r, g, b) = color.components();
        let bottom = A4_HEIGHT_MM - y - height;
        let _ = writeln!(
            self.ops,
            "{r:.3} {g:.3} {b:.3} rg {:.2} {:.2} {:.2} {:.2} re f",
            x * PT_PER_MM,
            bottom * PT_PER_MM,
            width * PT_PER_MM,
            height * PT_PER_MM
        );
    }

    /// Single line of text with its baseline at `y` millimetres from the top
    pub fn text(&mut self, x: f64, y: f64, style: TextStyle, text: &str) {
        let TextStyle {
            font,
            size,
            color,
            align,
        } = style;
        let encoded = encode_win_ansi(text);
        let x = match align {
            Align::Left => x,
            Align::Center => {
                let width_pt = encoded.len() as f64 * size * font.avg_em();
                x - (width_pt / PT_PER_MM) / 2.0
            }
        };
        let (r, g, b) = color.components();
        let _ = writeln!(
            self.ops,
            "BT {r:.3} {g:.3} {b:.3} rg /{} {size:.1} Tf {:.2} {:.2} Td ({}) Tj ET",
            font.resource_name(),
            x * PT_PER_MM,
            (A4_HEIGHT_MM - y) * PT_PER_MM,
            escape_literal(&encoded)
        );
    }

    pub fn as_str(&self) -> &str {
        &self.ops
    }
}

/// Document information dictionary entries
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
    /// PDF date string, e.g. `D:20240601120000`
    pub creation_date: String,
}

/// Serialise a single-page document
pub fn write_document(page: &PageContent, info: &DocumentInfo) -> Vec<u8> {
    let content = page.as_str();
    let width_pt = A4_WIDTH_MM * PT_PER_MM;
    let height_pt = A4_HEIGHT_MM * PT_PER_MM;

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {width_pt:.2} {height_pt:.2}] \
             /Resources << /Font << /F1 5 0 R /F2 6 0 R >> >> /Contents 4 0 R >>"
        ),
        format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_string(),
        format!(
            "<< /Title ({}) /Producer ({}) /CreationDate ({}) >>",
            escape_literal(&encode_win_ansi(&info.title)),
            escape_literal(&encode_win_ansi(&info.producer)),
            escape_literal(&encode_win_ansi(&info.creation_date))
        ),
    ];

    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in &offsets {
        let _ = writeln!(xref, "{offset:010} 00000 n ");
    }
    let _ = write!(
        xref,
        "trailer\n<< /Size {} /Root 1 0 R /Info 7 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    );
    out.extend_from_slice(xref.as_bytes());
    out
}

/// Encode text to WinAnsi (Windows-1252) bytes
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            'œ' => 0x9c,
            'Œ' => 0x8c,
            _ => b'?',
        })
        .collect()
}

/// Escape bytes for a PDF literal string, keeping the output ASCII
fn escape_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{b:03o}");
            }
        }
    }
    out
}
