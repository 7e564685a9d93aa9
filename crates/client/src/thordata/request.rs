//! Wire-level request bodies for the Thordata APIs.
//!
//! Both endpoints take `application/x-www-form-urlencoded` bodies.

use serde::Serialize;

/// Form body for `POST {serp_base_url}/request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerpParams {
    /// Engine identifier (`google`, `bing`, ...), forwarded verbatim.
    pub engine: String,

    /// Search query.
    pub q: String,

    /// Number of results.
    pub num: u32,

    /// Always 1: ask for structured JSON rather than raw HTML.
    pub json: u8,

    /// Country code for localized results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gl: Option<String>,

    /// Interface/results language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hl: Option<String>,

    /// Free-form location string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Vertical (images, news, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbm: Option<String>,
}

impl SerpParams {
    pub fn new(engine: impl Into<String>, q: impl Into<String>, num: u32) -> Self {
        Self { engine: engine.into(), q: q.into(), num, json: 1, gl: None, hl: None, location: None, tbm: None }
    }
}

/// Map a human search type to the vendor's vertical code.
///
/// Unknown types are forwarded verbatim.
pub fn search_type_code(search_type: &str) -> String {
    match search_type.to_ascii_lowercase().as_str() {
        "images" | "image" => "isch".into(),
        "news" => "nws".into(),
        "shopping" | "shop" => "shop".into(),
        "videos" | "video" => "vid".into(),
        _ => search_type.to_string(),
    }
}

/// Form body for `POST {universal_base_url}/request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniversalParams {
    /// Target page.
    pub url: String,

    /// Output type: `html` or `png`.
    #[serde(rename = "type")]
    pub output_type: &'static str,

    /// Headless rendering flag, sent as `True`/`False`.
    #[serde(serialize_with = "python_bool")]
    pub js_render: bool,

    /// Country code for geo-targeted fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// CSS selector to await before capture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<String>,
}

fn python_bool<S: serde::Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serp_params_skip_none() {
        let params = SerpParams::new("google", "rust lang", 5);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({"engine": "google", "q": "rust lang", "num": 5, "json": 1}));
    }

    #[test]
    fn test_search_type_code() {
        assert_eq!(search_type_code("images"), "isch");
        assert_eq!(search_type_code("News"), "nws");
        assert_eq!(search_type_code("shopping"), "shop");
        assert_eq!(search_type_code("videos"), "vid");
        assert_eq!(search_type_code("scholar"), "scholar");
    }

    #[test]
    fn test_universal_params_wire_names() {
        let params = UniversalParams {
            url: "https://example.com".into(),
            output_type: "png",
            js_render: true,
            country: Some("us".into()),
            wait_for: None,
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["type"], "png");
        assert_eq!(json["js_render"], "True");
        assert_eq!(json["country"], "us");
        assert!(json.get("wait_for").is_none());
    }
}
