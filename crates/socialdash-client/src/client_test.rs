use super::*;

fn test_client(base_url: &str) -> DashboardClient {
    DashboardClient::with_base_url(base_url, 30, "socialdash-test")
        .expect("client construction should not fail")
}

#[test]
fn endpoint_appends_to_api_prefix() {
    let client = test_client("http://localhost:5000/api");
    let url = client.endpoint("data/list").unwrap();
    assert_eq!(url.as_str(), "http://localhost:5000/api/data/list");
}

#[test]
fn endpoint_strips_trailing_slashes() {
    let client = test_client("http://localhost:5000/api//");
    let url = client.endpoint("health").unwrap();
    assert_eq!(url.as_str(), "http://localhost:5000/api/health");
}

#[test]
fn endpoint_keeps_percent_encoded_segments() {
    let client = test_client("http://localhost:5000/api");
    let path = normalize_data_path(r"C:\data\my channel.json");
    let url = client.endpoint(&format!("data/{path}")).unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:5000/api/data/data/my%20channel.json"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = DashboardClient::with_base_url("not a url", 30, "ua").unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }), "got: {err:?}");
}

#[test]
fn non_http_scheme_is_rejected() {
    let err = DashboardClient::with_base_url("ftp://example.com/api", 30, "ua").unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }), "got: {err:?}");
}

#[test]
fn local_client_points_at_default_backend() {
    let client = DashboardClient::local().unwrap();
    assert_eq!(client.base_url().as_str(), "http://localhost:5000/api/");
}

#[test]
fn decode_reports_context() {
    let err = decode::<DatasetList>(serde_json::json!([1, 2]), "data/list").unwrap_err();
    assert!(
        matches!(err, ClientError::Deserialize { ref context, .. } if context == "data/list"),
        "got: {err:?}"
    );
}
