/// Fallback when the extension is missing or unrecognized.
const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Content type to attach to an upload, inferred from the key's extension.
pub fn content_type_for(key: &str) -> &'static str {
    mime_guess::from_path(key)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_common_site_assets() {
        assert_eq!(content_type_for("index.html"), "text/html");
        assert_eq!(content_type_for("css/site.css"), "text/css");
        assert_eq!(content_type_for("img/logo.png"), "image/png");
    }

    #[test]
    fn unknown_extension_falls_back_to_plain_text() {
        assert_eq!(content_type_for("data.qqq"), "text/plain");
    }

    #[test]
    fn missing_extension_falls_back_to_plain_text() {
        assert_eq!(content_type_for("LICENSE"), "text/plain");
    }
}
