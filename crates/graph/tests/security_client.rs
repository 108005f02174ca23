//! End-to-end tests: request builders → reqwest adapter → mock Graph.

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use m365sec_core::auth::{AllowedHosts, BaseBearerTokenAuthenticationProvider, StaticTokenProvider};
use m365sec_core::request::RequestOption;
use m365sec_core::{CollectionQuery, GraphError, RequestConfiguration};
use m365sec_graph::models::{
    AlertSeverity, ApplyHoldPostRequestBody, CaseOperation, Host, Incident, IncidentStatus,
    RunHuntingQueryPostRequestBody,
};
use m365sec_graph::{
    ClientCredentials, ClientCredentialsProvider, GraphClientOptions, GraphServiceClient,
};
use serde_json::json;

fn options(server: &MockServer) -> GraphClientOptions {
    GraphClientOptions {
        base_url: server.base_url(),
        ..Default::default()
    }
}

fn client(server: &MockServer) -> GraphServiceClient {
    let tokens = StaticTokenProvider::new("t0ken", AllowedHosts::new(["127.0.0.1"]));
    GraphServiceClient::with_auth(
        Arc::new(BaseBearerTokenAuthenticationProvider::new(tokens)),
        options(server),
    )
    .unwrap()
}

#[tokio::test]
async fn lists_alerts_with_bearer_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/security/alerts_v2")
            .header("authorization", "Bearer t0ken")
            .header("accept", "application/json")
            .header_exists("client-request-id");
        then.status(200)
            .header("content-type", "application/json")
            .body(
                json!({
                    "value": [
                        {"@odata.type": "#microsoft.graph.security.alert", "id": "a1", "severity": "high"},
                        {"@odata.type": "#microsoft.graph.security.alert", "id": "a2", "severity": "low"}
                    ]
                })
                .to_string(),
            );
    });

    let page = client(&server)
        .security()
        .alerts_v2()
        .get(Some(RequestConfiguration::with_query(
            CollectionQuery::new().top(2).filter("status eq 'new'"),
        )))
        .await
        .unwrap();

    mock.assert_calls(1);
    assert_eq!(page.value.len(), 2);
    assert_eq!(page.value[0].severity(), Some(AlertSeverity::High));
    assert!(page.next_link.is_none());
}

#[tokio::test]
async fn get_all_follows_next_link() {
    let server = MockServer::start();
    let next = format!("{}/security/incidents?$skiptoken=p2", server.base_url());
    let second = server.mock(|when, then| {
        when.method(GET)
            .path("/security/incidents")
            .query_param_exists("$skiptoken");
        then.status(200)
            .body(json!({"value": [{"id": "3"}]}).to_string());
    });
    let first = server.mock(|when, then| {
        when.method(GET)
            .path("/security/incidents")
            .query_param_missing("$skiptoken");
        then.status(200).body(
            json!({"value": [{"id": "1"}, {"id": "2"}], "@odata.nextLink": next}).to_string(),
        );
    });

    let incidents = client(&server)
        .security()
        .incidents()
        .get_all(None)
        .await
        .unwrap();

    first.assert_calls(1);
    second.assert_calls(1);
    let ids: Vec<_> = incidents.iter().filter_map(Incident::id).collect();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[tokio::test]
async fn patch_sends_only_changed_properties() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/security/incidents/2972395")
            .header("content-type", "application/json")
            .json_body(json!({
                "@odata.type": "#microsoft.graph.security.incident",
                "status": "resolved",
                "assignedTo": "soc@contoso.com"
            }));
        then.status(200).body(
            json!({"id": "2972395", "status": "resolved", "assignedTo": "soc@contoso.com"})
                .to_string(),
        );
    });

    let mut update = Incident::new();
    update.set_status(Some(IncidentStatus::Resolved));
    update.set_assigned_to(Some("soc@contoso.com".into()));

    let updated = client(&server)
        .security()
        .incidents()
        .by_incident_id("2972395")
        .patch(&update, None)
        .await
        .unwrap()
        .unwrap();

    mock.assert_calls(1);
    assert_eq!(updated.status(), Some(IncidentStatus::Resolved));
}

#[tokio::test]
async fn odata_errors_are_surfaced() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/security/alerts_v2/missing");
        then.status(404)
            .header("content-type", "application/json")
            .body(
                json!({
                    "error": {
                        "code": "NotFound",
                        "message": "Alert missing was not found",
                        "innerError": {"request-id": "8d5e0c43", "date": "2024-05-01T10:00:00"}
                    }
                })
                .to_string(),
            );
    });

    let err = client(&server)
        .security()
        .alerts_v2()
        .by_alert_id("missing")
        .get(None)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    let GraphError::OData(odata) = &err else {
        panic!("expected an OData error, got {err:?}");
    };
    assert_eq!(odata.code(), "NotFound");
    assert_eq!(odata.request_id(), Some("8d5e0c43"));
}

#[tokio::test]
async fn throttled_requests_retry_then_fail() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/security/secureScores");
        then.status(429)
            .header("retry-after", "0")
            .body(json!({"error": {"code": "TooManyRequests", "message": "slow down"}}).to_string());
    });

    let config = RequestConfiguration::with_query(CollectionQuery::new().top(1))
        .option(RequestOption::MaxRetries(2));
    let err = client(&server)
        .security()
        .secure_scores()
        .get(Some(config))
        .await
        .unwrap_err();

    mock.assert_calls(3);
    assert_eq!(err.status(), Some(429));
}

#[tokio::test]
async fn count_reads_text_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/security/cases/ediscoveryCases/$count")
            .header("accept", "text/plain;q=0.9");
        then.status(200).header("content-type", "text/plain").body("12");
    });

    let count = client(&server)
        .security()
        .cases()
        .ediscovery_cases()
        .count()
        .get(None)
        .await
        .unwrap();
    assert_eq!(count, 12);
}

#[tokio::test]
async fn case_actions_post_without_content() {
    let server = MockServer::start();
    let close = server.mock(|when, then| {
        when.method(POST)
            .path("/security/cases/ediscoveryCases/c1/microsoft.graph.security.close");
        then.status(204);
    });
    let hold = server.mock(|when, then| {
        when.method(POST)
            .path("/security/cases/ediscoveryCases/c1/custodians/microsoft.graph.security.applyHold")
            .json_body(json!({"ids": ["u1", "u2"]}));
        then.status(202);
    });

    let case = client(&server)
        .security()
        .cases()
        .ediscovery_cases()
        .by_ediscovery_case_id("c1");
    case.close().post(None).await.unwrap();

    let mut body = ApplyHoldPostRequestBody::new();
    body.set_ids(Some(vec!["u1".into(), "u2".into()]));
    case.custodians().apply_hold().post(&body, None).await.unwrap();

    close.assert_calls(1);
    hold.assert_calls(1);
}

#[tokio::test]
async fn polymorphic_responses_pick_concrete_types() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/security/cases/ediscoveryCases/c1/operations/op1");
        then.status(200).body(
            json!({
                "@odata.type": "#microsoft.graph.security.ediscoveryPurgeDataOperation",
                "id": "op1",
                "status": "running"
            })
            .to_string(),
        );
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/security/threatIntelligence/hosts/contoso.com");
        then.status(200).body(
            json!({"@odata.type": "#microsoft.graph.security.hostname", "id": "contoso.com"})
                .to_string(),
        );
    });

    let graph = client(&server);
    let op = graph
        .security()
        .cases()
        .ediscovery_cases()
        .by_ediscovery_case_id("c1")
        .operations()
        .by_case_operation_id("op1")
        .get(None)
        .await
        .unwrap();
    assert!(matches!(op, CaseOperation::PurgeData(_)));

    let host = graph
        .security()
        .threat_intelligence()
        .hosts()
        .by_host_id("contoso.com")
        .get(None)
        .await
        .unwrap();
    assert!(matches!(host, Host::Hostname(_)));
}

#[tokio::test]
async fn hunting_query_returns_rows() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/security/microsoft.graph.security.runHuntingQuery")
            .json_body(json!({"query": "DeviceProcessEvents | take 1"}));
        then.status(200).body(
            json!({
                "schema": [{"name": "DeviceName", "type": "String"}],
                "results": [{"DeviceName": "web-01"}]
            })
            .to_string(),
        );
    });

    let results = client(&server)
        .security()
        .run_hunting_query()
        .post(
            &RunHuntingQueryPostRequestBody::with_query("DeviceProcessEvents | take 1"),
            None,
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(results.column_names(), ["DeviceName"]);
    assert_eq!(results.results().unwrap()[0].additional_data()["DeviceName"], "web-01");
}

#[tokio::test]
async fn client_credentials_token_is_cached() {
    let login = MockServer::start();
    let token = login.mock(|when, then| {
        when.method(POST)
            .path("/tenant-1/oauth2/v2.0/token")
            .body_includes("grant_type=client_credentials")
            .body_includes("client_id=app-1");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"access_token":"cc-token","expires_in":3600,"token_type":"Bearer"}"#);
    });

    let graph_server = MockServer::start();
    let api = graph_server.mock(|when, then| {
        when.method(GET)
            .path("/security")
            .header("authorization", "Bearer cc-token");
        then.status(200)
            .body(json!({"@odata.type": "#microsoft.graph.security", "id": "security"}).to_string());
    });

    let provider = ClientCredentialsProvider::new(ClientCredentials {
        client_id: "app-1".into(),
        client_secret: "s3cret".into(),
        tenant_id: "tenant-1".into(),
    })
    .with_authority_host(login.base_url())
    .with_allowed_hosts(AllowedHosts::new(["127.0.0.1"]));
    let graph = GraphServiceClient::with_auth(
        Arc::new(provider.into_authentication_provider()),
        options(&graph_server),
    )
    .unwrap();

    for _ in 0..2 {
        let root = graph.security().get(None).await.unwrap();
        assert_eq!(root.id().as_deref(), Some("security"));
    }
    token.assert_calls(1);
    api.assert_calls(2);
}

#[tokio::test]
async fn token_endpoint_failure_is_auth_error() {
    let login = MockServer::start();
    login.mock(|when, then| {
        when.method(POST).path("/tenant-1/oauth2/v2.0/token");
        then.status(401).body(r#"{"error":"invalid_client"}"#);
    });

    let provider = ClientCredentialsProvider::new(ClientCredentials {
        client_id: "app-1".into(),
        client_secret: "wrong".into(),
        tenant_id: "tenant-1".into(),
    })
    .with_authority_host(login.base_url());
    let err = provider.get_token().await.unwrap_err();
    assert!(matches!(err, GraphError::Auth(_)));
}

#[tokio::test]
async fn with_url_requests_the_raw_url() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/security/incidents")
            .query_param("$skiptoken", "page-2")
            .header("authorization", "Bearer t0ken");
        then.status(200)
            .body(json!({"value": [{"id": "inc-9", "status": "active"}]}).to_string());
    });

    let graph = client(&server);
    let next = graph
        .security()
        .incidents()
        .with_url(format!("{}/security/incidents?$skiptoken=page-2", server.base_url()))
        .get(None)
        .await
        .unwrap();

    mock.assert_calls(1);
    assert_eq!(next.value.len(), 1);
    assert_eq!(next.value[0].id().as_deref(), Some("inc-9"));
}

#[tokio::test]
async fn per_request_timeout_is_a_transport_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/security/secureScores");
        then.status(200)
            .delay(Duration::from_millis(500))
            .body(json!({"value": []}).to_string());
    });

    let config = RequestConfiguration::with_query(CollectionQuery::new().top(1))
        .option(RequestOption::Timeout(Duration::from_millis(50)));
    let err = client(&server)
        .security()
        .secure_scores()
        .get(Some(config))
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn national_cloud_tokens_use_the_cloud_scope() {
    let login = MockServer::start();
    let token = login.mock(|when, then| {
        when.method(POST)
            .path("/tenant-1/oauth2/v2.0/token")
            .body_includes("scope=https%3A%2F%2Fgraph.microsoft.us%2F.default");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"access_token":"us-token","expires_in":3600,"token_type":"Bearer"}"#);
    });

    let provider = ClientCredentialsProvider::new(ClientCredentials {
        client_id: "app-1".into(),
        client_secret: "s3cret".into(),
        tenant_id: "tenant-1".into(),
    })
    .with_authority_host(login.base_url())
    .with_graph_base_url("https://graph.microsoft.us/v1.0")
    .unwrap();

    assert_eq!(provider.get_token().await.unwrap(), "us-token");
    token.assert_calls(1);
}

#[tokio::test]
async fn client_credentials_service_client_authenticates_its_base_url() {
    let login = MockServer::start();
    let token = login.mock(|when, then| {
        when.method(POST)
            .path("/tenant-1/oauth2/v2.0/token")
            .body_includes("scope=https%3A%2F%2Fgraph.microsoft.com%2F.default");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"access_token":"cc-token","expires_in":3600,"token_type":"Bearer"}"#);
    });
    let graph_server = MockServer::start();
    let api = graph_server.mock(|when, then| {
        when.method(GET)
            .path("/security")
            .header("authorization", "Bearer cc-token");
        then.status(200)
            .body(json!({"@odata.type": "#microsoft.graph.security", "id": "security"}).to_string());
    });

    let graph = GraphServiceClient::with_client_credentials(
        ClientCredentials {
            client_id: "app-1".into(),
            client_secret: "s3cret".into(),
            tenant_id: "tenant-1".into(),
        },
        Some(&login.base_url()),
        options(&graph_server),
    )
    .unwrap();

    graph.security().get(None).await.unwrap();
    token.assert_calls(1);
    api.assert_calls(1);
}
