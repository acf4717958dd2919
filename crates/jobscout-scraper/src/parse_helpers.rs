//! Small HTML primitives shared by the search and listing parsers.
//!
//! Job-board pages are server-rendered React; everything useful lives in the
//! `__NEXT_DATA__` JSON script, so a full HTML parser is not needed. The
//! only markup that is read directly is the `aiSummary` fragment, a short
//! `<ul>` of `<li>` bullets.

use std::sync::LazyLock;

use regex::Regex;

static NEXT_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]*\bid\s*=\s*["']__NEXT_DATA__["'][^>]*>(.*?)</script>"#)
        .expect("valid regex")
});

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<li\b[^>]*>(.*?)</li>").expect("valid regex"));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

/// Separator placed between bullet texts in a requirements summary.
pub(crate) const SUMMARY_SEPARATOR: &str = " | ";

/// Returns the raw JSON text of the `<script id="__NEXT_DATA__">` element,
/// or `None` when the page carries no such element or it is blank.
pub(crate) fn extract_next_data(html: &str) -> Option<&str> {
    NEXT_DATA_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// Joins the text of every `<li>` in `fragment` with [`SUMMARY_SEPARATOR`].
///
/// Nested tags are stripped, common entities decoded, and whitespace runs
/// collapsed. Empty bullets are skipped.
pub(crate) fn summarize_list_items(fragment: &str) -> String {
    LIST_ITEM_RE
        .captures_iter(fragment)
        .filter_map(|c| c.get(1))
        .map(|m| clean_text(m.as_str()))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR)
}

fn clean_text(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, " ");
    let decoded = decode_entities(&stripped);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(text: &str) -> String {
    // `&amp;` last so that `&amp;lt;` stays `&lt;`.
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_next_data_script() {
        let html = r#"<html><head></head><body>
            <script src="/app.js"></script>
            <script id="__NEXT_DATA__" type="application/json">{"props":{}}</script>
        </body></html>"#;
        assert_eq!(extract_next_data(html), Some(r#"{"props":{}}"#));
    }

    #[test]
    fn attribute_order_and_quotes_do_not_matter() {
        let html = "<script type='application/json' id='__NEXT_DATA__'>\n {\"a\":1} \n</script>";
        assert_eq!(extract_next_data(html), Some(r#"{"a":1}"#));
    }

    #[test]
    fn missing_or_blank_script_is_none() {
        assert!(extract_next_data("<html><body>Access denied</body></html>").is_none());
        assert!(extract_next_data(r#"<script id="__NEXT_DATA__">   </script>"#).is_none());
    }

    #[test]
    fn list_items_are_joined_with_pipes() {
        let fragment = "<ul><li>Min. 5 lat w sprzedaży B2B</li><li><b>Prawo jazdy</b> kat. B</li></ul>";
        assert_eq!(
            summarize_list_items(fragment),
            "Min. 5 lat w sprzedaży B2B | Prawo jazdy kat. B"
        );
    }

    #[test]
    fn entities_are_decoded_and_whitespace_collapsed() {
        let fragment = "<li>  R&amp;D&nbsp;&amp;\n  Sales  </li><li class=\"x\"></li>";
        assert_eq!(summarize_list_items(fragment), "R&D & Sales");
    }

    #[test]
    fn fragment_without_items_is_empty() {
        assert_eq!(summarize_list_items(""), "");
        assert_eq!(summarize_list_items("<p>Brak punktów</p>"), "");
    }
}
