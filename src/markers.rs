//! Best-effort HTML marker scanning for the two target kinds.
//!
//! These counts are diagnostic extras; the reachability verdict never depends
//! on them, and the whole module sits behind the `markers` feature.

use scraper::{Html, Selector};

const ICON_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".ico"];

/// Anchor hrefs that point at image files, in document order.
pub fn icon_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(anchors) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| ICON_EXTENSIONS.iter().any(|ext| href.ends_with(ext)))
        .map(str::to_owned)
        .collect()
}

/// Count table rows that look like channel data: at least three cells, with
/// the first cell holding a plain decimal number (the channel index column).
pub fn channel_rows(html: &str) -> usize {
    let document = Html::parse_document(html);
    let (Ok(rows), Ok(cells)) = (Selector::parse("tr"), Selector::parse("td")) else {
        return 0;
    };
    document
        .select(&rows)
        .filter(|row| {
            let tds: Vec<_> = row.select(&cells).collect();
            if tds.len() < 3 {
                return false;
            }
            let first = tds[0].text().collect::<String>();
            let first = first.trim();
            // Unicode-aware: the listing may use fullwidth digits.
            !first.is_empty() && first.chars().all(char::is_numeric)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_icon_links_by_extension() {
        let html = r#"
            <html><body>
                <a href="/logo/cctv1.png">CCTV-1</a>
                <a href="/logo/cctv2.jpg">CCTV-2</a>
                <a href="/about.html">about</a>
                <a href="favicon.ico">icon</a>
                <a>no href here</a>
            </body></html>
        "#;
        let links = icon_links(html);
        assert_eq!(links.len(), 3);
        assert_eq!(links[0], "/logo/cctv1.png");
    }

    #[test]
    fn no_icon_links_in_plain_page() {
        assert!(icon_links("<html><body><p>hello</p></body></html>").is_empty());
    }

    #[test]
    fn counts_channel_rows_with_numeric_first_cell() {
        let html = r#"
            <table>
                <tr><th>No.</th><th>Name</th><th>Address</th></tr>
                <tr><td>1</td><td>CCTV-1</td><td>239.93.0.1:5140</td></tr>
                <tr><td>2</td><td>CCTV-2</td><td>239.93.0.2:5140</td></tr>
                <tr><td>n/a</td><td>placeholder</td><td>-</td></tr>
                <tr><td>3</td><td>short row</td></tr>
            </table>
        "#;
        // Header row uses <th>, "n/a" is not numeric, and the short row has
        // only two cells.
        assert_eq!(channel_rows(html), 2);
    }

    #[test]
    fn channel_rows_tolerates_whitespace_in_cells() {
        let html = "<table><tr><td> 42 </td><td>x</td><td>y</td></tr></table>";
        assert_eq!(channel_rows(html), 1);
    }

    #[test]
    fn channel_rows_accepts_fullwidth_digits() {
        let html = "<table><tr><td>１２３</td><td>x</td><td>y</td></tr></table>";
        assert_eq!(channel_rows(html), 1);
    }

    #[test]
    fn malformed_html_degrades_to_zero_counts() {
        assert_eq!(channel_rows("<tr><td>"), 0);
        assert!(icon_links("<<<>>>").is_empty());
    }
}
