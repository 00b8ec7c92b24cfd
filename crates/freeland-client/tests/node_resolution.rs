//! Node resolution against a mock authority.

use freeland_client::AuthorityClient;
use freeland_core::{AuthorityEndpoint, NodeLocator, ProvisionError};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AuthorityClient {
    let endpoint = AuthorityEndpoint::new("127.0.0.1").with_http_base_url(server.uri());
    AuthorityClient::builder(&endpoint)
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap()
}

#[tokio::test]
async fn resolves_address_from_first_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/node"))
        .and(query_param("uname", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_string("alice=10.1.2.3\nsome log line\n"))
        .expect(1)
        .mount(&server)
        .await;

    let node = client_for(&server).resolve_node("alice").await.unwrap();

    assert_eq!(node.address, "10.1.2.3");
    assert_eq!(node.notices, vec!["some log line".to_string()]);
}

#[tokio::test]
async fn subject_is_query_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/node"))
        .and(query_param("uname", "bob&co"))
        .respond_with(ResponseTemplate::new(200).set_body_string("bob&co=198.51.100.7"))
        .mount(&server)
        .await;

    let node = client_for(&server).nodes().resolve("bob&co").await.unwrap();
    assert_eq!(node.address, "198.51.100.7");
}

#[tokio::test]
async fn error_status_is_connectivity_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/node"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).resolve_node("alice").await.unwrap_err();
    assert!(matches!(err, ProvisionError::Connectivity(_)));
}

#[tokio::test]
async fn empty_body_is_protocol_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/node"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client_for(&server).resolve_node("alice").await.unwrap_err();
    assert!(matches!(err, ProvisionError::Protocol(_)));
}

#[tokio::test]
async fn slow_authority_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/node"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("alice=10.1.2.3")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let endpoint = AuthorityEndpoint::new("127.0.0.1").with_http_base_url(server.uri());
    let client = AuthorityClient::builder(&endpoint)
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let err = client.resolve_node("alice").await.unwrap_err();
    assert!(err.is_network_error());
}

#[tokio::test]
async fn unreachable_authority_is_connectivity_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = AuthorityEndpoint::new("127.0.0.1").with_http_base_url(format!("http://{addr}"));
    let client = AuthorityClient::new(&endpoint).unwrap();

    let err = client.resolve_node("alice").await.unwrap_err();
    assert!(matches!(err, ProvisionError::Connectivity(_)));
}
