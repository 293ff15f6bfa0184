//! Word export as an HTML-bodied `.doc`.
//!
//! Word opens HTML documents served as `application/msword`; that is
//! the long-standing interop path for tabular exports and avoids
//! committing to a full OOXML writer for what is a plain data table.

use crate::table::ListingTable;

/// Escapes text for an HTML context.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the listing as an HTML document body.
#[must_use]
pub fn render(title: &str, table: &ListingTable) -> Vec<u8> {
    let mut html = String::new();
    html.push_str("<html>\n<head><meta charset=\"utf-8\"></head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(title)));
    html.push_str("<table border=\"1\">\n<tr>");
    for column in ListingTable::columns() {
        html.push_str(&format!("<th>{}</th>", escape(column)));
    }
    html.push_str("</tr>\n");
    for row in table.rows() {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n</body>\n</html>\n");
    html.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_delimiters() {
        assert_eq!(escape("a<b & c>d"), "a&lt;b &amp; c&gt;d");
    }
}
