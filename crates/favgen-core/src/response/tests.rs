//! Tests for response parsing.

use serde_json::{json, Value};

use super::{FaviconResult, ResponseError, GENERIC_FAILURE_MESSAGE};

fn success_body() -> Value {
    json!({
        "favicon_generation_result": {
            "result": { "status": "success" },
            "favicon": {
                "package_url": "https://realfavicongenerator.net/files/abc/package.zip",
                "compression": "true",
                "html_code": "<link rel=\"icon\" href=\"/favicon.ico\">",
                "files_urls": [
                    "https://realfavicongenerator.net/files/abc/favicon.ico",
                    "https://realfavicongenerator.net/files/abc/apple-touch-icon.png"
                ]
            },
            "files_location": { "type": "root" },
            "preview_picture_url": "https://realfavicongenerator.net/files/abc/preview.png",
            "version": "0.16"
        }
    })
}

fn parse(v: &Value) -> Result<FaviconResult, ResponseError> {
    let bytes = serde_json::to_vec(v).unwrap();
    FaviconResult::parse(Some(bytes.as_slice()))
}

#[test]
fn parses_success_response() {
    let r = parse(&success_body()).unwrap();
    assert_eq!(
        r.package_url.as_deref(),
        Some("https://realfavicongenerator.net/files/abc/package.zip")
    );
    assert!(r.is_compressed);
    assert_eq!(r.html_code, "<link rel=\"icon\" href=\"/favicon.ico\">");
    assert_eq!(r.files_urls.len(), 2);
    assert!(r.is_files_in_root);
    assert_eq!(r.files_path, "/");
    assert_eq!(
        r.preview_url.as_deref(),
        Some("https://realfavicongenerator.net/files/abc/preview.png")
    );
    assert_eq!(r.version.as_deref(), Some("0.16"));
    assert!(r.custom_parameter.is_none());
    assert!(r.non_interactive_request.is_none());
    assert!(r.package_path.is_none());
    assert!(r.preview_path.is_none());
}

#[test]
fn compression_true_only_for_literal_string() {
    for (value, expected) in [
        (json!("true"), true),
        (json!("false"), false),
        (json!(true), false),
        (json!(1), false),
        (json!("TRUE"), false),
    ] {
        let mut body = success_body();
        body["favicon_generation_result"]["favicon"]["compression"] = value.clone();
        assert_eq!(parse(&body).unwrap().is_compressed, expected, "compression = {value}");
    }
}

#[test]
fn files_in_path() {
    let mut body = success_body();
    body["favicon_generation_result"]["files_location"] = json!({ "type": "path", "path": "/icons" });
    let r = parse(&body).unwrap();
    assert!(!r.is_files_in_root);
    assert_eq!(r.files_path, "/icons");
}

#[test]
fn files_path_required_when_not_root() {
    let mut body = success_body();
    body["favicon_generation_result"]["files_location"] = json!({ "type": "path" });
    assert_eq!(
        parse(&body).unwrap_err(),
        ResponseError::MissingField("path".into())
    );
}

#[test]
fn error_status_uses_error_message() {
    let body = json!({
        "favicon_generation_result": {
            "result": { "status": "error", "error_message": "Bad src" }
        }
    });
    assert_eq!(
        parse(&body).unwrap_err(),
        ResponseError::GenerationFailed("Bad src".into())
    );
}

#[test]
fn error_status_without_message_uses_generic_text() {
    for result in [json!({ "status": "error" }), json!({ "status": "error", "error_message": null })] {
        let body = json!({ "favicon_generation_result": { "result": result } });
        assert_eq!(
            parse(&body).unwrap_err(),
            ResponseError::GenerationFailed(GENERIC_FAILURE_MESSAGE.into())
        );
    }
}

#[test]
fn empty_response() {
    assert_eq!(FaviconResult::parse(None).unwrap_err(), ResponseError::EmptyResponse);
    assert_eq!(FaviconResult::parse(Some(&b""[..])).unwrap_err(), ResponseError::EmptyResponse);
}

#[test]
fn malformed_response() {
    for raw in [&b"<html>502 Bad Gateway</html>"[..], &b"{\"favicon"[..], &b"null"[..]] {
        assert!(matches!(
            FaviconResult::parse(Some(raw)).unwrap_err(),
            ResponseError::MalformedResponse(_)
        ));
    }
}

#[test]
fn missing_envelope_fields() {
    let cases = [
        (json!({}), "favicon_generation_result"),
        (json!({ "favicon_generation_result": {} }), "result"),
        (json!({ "favicon_generation_result": { "result": {} } }), "status"),
        (
            json!({ "favicon_generation_result": { "result": { "status": "success" } } }),
            "favicon",
        ),
    ];
    for (body, field) in cases {
        assert_eq!(parse(&body).unwrap_err(), ResponseError::MissingField(field.into()));
    }
}

#[test]
fn missing_favicon_fields() {
    for field in ["package_url", "compression", "html_code"] {
        let mut body = success_body();
        body["favicon_generation_result"]["favicon"]
            .as_object_mut()
            .unwrap()
            .remove(field);
        assert_eq!(parse(&body).unwrap_err(), ResponseError::MissingField(field.into()));
    }
}

#[test]
fn missing_files_location() {
    let mut body = success_body();
    body["favicon_generation_result"]
        .as_object_mut()
        .unwrap()
        .remove("files_location");
    assert_eq!(
        parse(&body).unwrap_err(),
        ResponseError::MissingField("files_location".into())
    );
}

#[test]
fn optional_fields_tolerated() {
    let body = json!({
        "favicon_generation_result": {
            "result": { "status": "success" },
            "favicon": { "package_url": "u", "compression": "false", "html_code": "" },
            "files_location": { "type": "root" },
            "custom_parameter": "ref=42",
            "version": null,
            "non_interactive_request": { "favicon_generation": { "api_key": "k" } }
        }
    });
    let r = parse(&body).unwrap();
    assert!(r.files_urls.is_empty());
    assert!(r.preview_url.is_none());
    assert!(r.version.is_none());
    assert_eq!(r.custom_parameter.as_deref(), Some("ref=42"));
    assert_eq!(
        r.non_interactive_request,
        Some(json!({ "favicon_generation": { "api_key": "k" } }))
    );
}
