//! Minimal single-page PDF writer.
//!
//! Emits the smallest valid document structure: catalog, page tree, one
//! Letter-sized page, the built-in Helvetica font and a text content
//! stream. Offsets in the xref table are byte positions, so the body is
//! assembled before the table is written.

const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;
const MARGIN: u32 = 72;
const FONT_SIZE: u32 = 11;
const LEADING: u32 = 14;

/// Lines that fit on one page; the rest is dropped.
const MAX_LINES: usize = 46;

/// Render `lines` into PDF bytes.
pub fn render(lines: &[String]) -> Vec<u8> {
    let content = content_stream(lines);

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>",
            PAGE_WIDTH, PAGE_HEIGHT
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
    ];

    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    out
}

fn content_stream(lines: &[String]) -> String {
    let mut stream = format!(
        "BT\n/F1 {} Tf\n{} TL\n{} {} Td\n",
        FONT_SIZE,
        LEADING,
        MARGIN,
        PAGE_HEIGHT - MARGIN
    );
    for line in lines.iter().take(MAX_LINES) {
        stream.push_str(&format!("({}) Tj\nT*\n", escape_text(line)));
    }
    stream.push_str("ET");
    stream
}

/// Escape the characters with meaning inside a PDF string literal.
fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_structure() {
        let bytes = render(&["Hello world".to_string()]);
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/BaseFont /Helvetica"));
        assert!(text.contains("(Hello world) Tj"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = render(&["line".to_string()]);
        let text = String::from_utf8_lossy(&bytes).to_string();

        // Each non-free xref entry must point at "N 0 obj"
        let xref_at = text.find("xref\n").unwrap();
        for (i, entry) in text[xref_at..]
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with("n "))
            .enumerate()
        {
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj", i + 1);
            assert!(text[offset..].starts_with(&expected));
        }
    }

    #[test]
    fn test_parentheses_escaped() {
        let bytes = render(&["Budget (draft)".to_string()]);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(Budget \\(draft\\)) Tj"));
    }

    #[test]
    fn test_line_cap() {
        let lines: Vec<String> = (0..100).map(|i| format!("line {}", i)).collect();
        let bytes = render(&lines);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(line 45) Tj"));
        assert!(!text.contains("(line 46) Tj"));
    }
}
