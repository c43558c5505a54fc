//! Host/date selector option lists.

use rv_common::HostMap;

use crate::escape::escape_html;

/// Label of the empty "unselected" option that leads each list.
pub const PLACEHOLDER_LABEL: &str = "Select...";

/// `<option>` list for the host selector.
pub fn host_options(map: &HostMap) -> String {
    render_options(map.hosts())
}

/// `<option>` list for the date selector: every known date across hosts.
pub fn date_options(map: &HostMap) -> String {
    render_options(map.all_dates())
}

fn render_options<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    let mut html = format!(r#"<option value="">{PLACEHOLDER_LABEL}</option>"#);
    for value in values {
        let value = escape_html(value);
        html.push_str(&format!(r#"<option value="{value}">{value}</option>"#));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_map_has_placeholder_only() {
        let map = HostMap::new();
        assert_eq!(host_options(&map), r#"<option value="">Select...</option>"#);
        assert_eq!(date_options(&map), r#"<option value="">Select...</option>"#);
    }

    #[test]
    fn test_host_and_date_options() {
        let mut map = HostMap::new();
        map.insert("web01", "2025-07-21");
        map.insert("db02", "2025-07-21");
        map.insert("db02", "2025-07-22");

        assert_eq!(
            host_options(&map),
            concat!(
                r#"<option value="">Select...</option>"#,
                r#"<option value="db02">db02</option>"#,
                r#"<option value="web01">web01</option>"#
            )
        );
        assert_eq!(
            date_options(&map),
            concat!(
                r#"<option value="">Select...</option>"#,
                r#"<option value="2025-07-21">2025-07-21</option>"#,
                r#"<option value="2025-07-22">2025-07-22</option>"#
            )
        );
    }

    #[test]
    fn test_option_values_are_escaped() {
        let mut map = HostMap::new();
        map.insert("a\"b", "d");
        assert!(host_options(&map).contains(r#"<option value="a&quot;b">a&quot;b</option>"#));
    }
}
