use pdfchat_client::{
    base_url_from_env_value, normalize_base_url, ClientSettings, ConfigError, DEFAULT_BASE_URL,
};

#[test]
fn unset_or_blank_value_uses_local_default() {
    assert_eq!(base_url_from_env_value(None).unwrap(), DEFAULT_BASE_URL);
    assert_eq!(
        base_url_from_env_value(Some("  ".to_string())).unwrap(),
        DEFAULT_BASE_URL
    );
    assert_eq!(ClientSettings::default().base_url, "http://localhost:8000");
}

#[test]
fn one_trailing_slash_is_stripped() {
    assert_eq!(
        base_url_from_env_value(Some("https://api.example.com/".to_string())).unwrap(),
        "https://api.example.com"
    );
    assert_eq!(
        normalize_base_url("http://host:9000/prefix/").unwrap(),
        "http://host:9000/prefix"
    );
    assert_eq!(
        normalize_base_url("http://host:9000").unwrap(),
        "http://host:9000"
    );
}

#[test]
fn invalid_base_urls_are_rejected() {
    for raw in ["localhost:8000", "ftp://example.com", "not a url", "http://h/?x=1"] {
        let err = normalize_base_url(raw).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }), "{raw}");
    }
}
