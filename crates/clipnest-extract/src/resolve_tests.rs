use super::*;

#[test]
fn test_empty_stays_empty() {
    assert_eq!(resolve_url("https://a.com/x", ""), "");
}

#[test]
fn test_absolute_passes_through() {
    assert_eq!(
        resolve_url("https://a.com/x", "https://b.com/i.png"),
        "https://b.com/i.png"
    );
    assert_eq!(
        resolve_url("https://a.com/x", "http://b.com/i.png"),
        "http://b.com/i.png"
    );
}

#[test]
fn test_protocol_relative_inherits_page_scheme() {
    assert_eq!(
        resolve_url("https://a.com/x", "//cdn.b.com/i.png"),
        "https://cdn.b.com/i.png"
    );
    assert_eq!(
        resolve_url("http://a.com/x", "//cdn.b.com/i.png"),
        "http://cdn.b.com/i.png"
    );
}

#[test]
fn test_root_relative_joins_origin() {
    assert_eq!(resolve_url("https://a.com/x", "/i.png"), "https://a.com/i.png");
    // Deep page paths do not leak into the result.
    assert_eq!(
        resolve_url("https://a.com/x/y/z", "/img/i.png"),
        "https://a.com/img/i.png"
    );
}

#[test]
fn test_bare_relative_joins_origin_with_slash() {
    assert_eq!(resolve_url("https://a.com/x", "i.png"), "https://a.com/i.png");
    assert_eq!(
        resolve_url("https://a.com/x", "img/i.png"),
        "https://a.com/img/i.png"
    );
}

#[test]
fn test_origin_keeps_port() {
    assert_eq!(
        resolve_url("http://localhost:8080/page", "/i.png"),
        "http://localhost:8080/i.png"
    );
}

#[test]
fn test_unparseable_page_url_returns_raw() {
    assert_eq!(resolve_url("not a url", "i.png"), "i.png");
}
