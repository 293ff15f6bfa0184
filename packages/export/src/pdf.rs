//! Minimal PDF assembly for the listing export.
//!
//! Emits a syntactically complete PDF 1.4 document: catalog, page tree,
//! one built-in Courier font, and one content stream per page of text
//! lines. Offsets in the cross-reference table are computed from the
//! actual byte positions, so the output opens in strict readers.

/// US Letter media box, 1/72" units.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 36.0;
const FONT_SIZE: f32 = 8.0;
const LEADING: f32 = 10.0;

/// Lines that fit between the top and bottom margins.
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2.0 * MARGIN) / LEADING) as usize;

/// Escapes a string for a PDF literal: backslash, parens.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds the content stream for one page of lines.
fn content_stream(title: Option<&str>, lines: &[String]) -> String {
    let mut ops = String::new();
    ops.push_str("BT\n");
    ops.push_str(&format!("/F1 {FONT_SIZE} Tf\n{LEADING} TL\n"));
    ops.push_str(&format!("{MARGIN} {} Td\n", PAGE_HEIGHT - MARGIN));
    if let Some(title) = title {
        ops.push_str(&format!("({}) Tj\nT*\nT*\n", escape(title)));
    }
    for line in lines {
        ops.push_str(&format!("({}) Tj\nT*\n", escape(line)));
    }
    ops.push_str("ET\n");
    ops
}

/// Renders `lines` as a multi-page fixed-pitch PDF document.
#[must_use]
pub fn render(title: &str, lines: &[String]) -> Vec<u8> {
    // Title plus blank line occupy the first page's first two slots.
    let first_page_capacity = LINES_PER_PAGE.saturating_sub(2).max(1);
    let (first, rest) = lines.split_at(first_page_capacity.min(lines.len()));
    let mut pages: Vec<(Option<&str>, &[String])> = vec![(Some(title), first)];
    for chunk in rest.chunks(LINES_PER_PAGE) {
        pages.push((None, chunk));
    }

    // Object ids: 1 catalog, 2 page tree, 3 font, then for page i
    // (0-based): 4+2i page, 5+2i contents.
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| 4 + 2 * i).collect();
    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects: Vec<String> = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{kids}] /Count {} >>",
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Courier >>".to_string(),
    ];
    for (idx, (page_title, page_lines)) in pages.iter().enumerate() {
        let contents_id = 5 + 2 * idx;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {contents_id} 0 R >>"
        ));
        let stream = content_stream(*page_title, page_lines);
        objects.push(format!(
            "<< /Length {} >>\nstream\n{stream}endstream",
            stream.len()
        ));
    }

    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (idx, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", idx + 1).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_pdf_literal_delimiters() {
        assert_eq!(escape(r"a(b)c\d"), r"a\(b\)c\\d");
    }

    #[test]
    fn paginates_long_listings() {
        let lines: Vec<String> = (0..200).map(|i| format!("line {i}")).collect();
        let bytes = render("Listing", &lines);
        let text = String::from_utf8_lossy(&bytes);
        let page_count = text.matches("/Type /Page ").count();
        assert!(page_count >= 3);
        assert!(text.contains(&format!("/Count {page_count}")));
    }

    #[test]
    fn xref_offsets_point_at_object_headers() {
        let bytes = render("T", &["only line".to_string()]);
        let text = String::from_utf8_lossy(&bytes).to_string();
        let xref_pos = text.find("xref\n").unwrap();
        for line in text[xref_pos..].lines().skip(3) {
            let Some(offset) = line
                .split(' ')
                .next()
                .and_then(|o| o.parse::<usize>().ok())
            else {
                break;
            };
            assert_eq!(&text.as_bytes()[offset + 2..offset + 7], b"0 obj");
        }
    }
}
