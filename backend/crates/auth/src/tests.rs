//! Unit tests for Auth crate

#[cfg(test)]
mod config_tests {
    use crate::application::config::AuthConfig;
    use platform::password::HashConfig;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.token_ttl_secs(), 3600);
        assert_eq!(config.secret_length, 32);
        assert_eq!(config.max_concurrent_hashes, 4);
        assert_eq!(config.hash, HashConfig::default());
    }

    #[test]
    fn test_development_config() {
        let config = AuthConfig::development();
        assert_eq!(config.hash, HashConfig::DEVELOPMENT);
        assert_eq!(config.hash_engine().config().memory_kib(), 1024);
        assert_eq!(config.token_ttl, AuthConfig::default().token_ttl);
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::application::{IssueTokenOutput, VerifyTokenOutput};
    use crate::domain::value_object::bearer_token::BearerToken;
    use crate::presentation::dto::*;
    use kernel::id::ClientId;

    #[test]
    fn test_token_response_shape() {
        let output = IssueTokenOutput {
            client_id: ClientId::new(),
            token: BearerToken::new("dG9rZW4="),
            expires_in_secs: 3600,
            expires_at_ms: 0,
        };

        let json = serde_json::to_value(TokenResponse::from(output)).unwrap();
        assert_eq!(json["token"], "dG9rZW4=");
        assert_eq!(json["expires_in"], "3600");
        assert_eq!(json["header"], "Bearer dG9rZW4=");
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_verify_response_shape() {
        let id: ClientId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
        let json = serde_json::to_value(VerifyResponse::from(VerifyTokenOutput {
            client_id: id,
            expires_at_ms: 1_700_000_000_000,
        }))
        .unwrap();

        assert_eq!(json["id"], "67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert_eq!(json["expires_at_ms"], 1_700_000_000_000i64);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use platform::password::HashError;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::Decode("bad".into()), StatusCode::UNAUTHORIZED),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::CredentialExpired, StatusCode::UNAUTHORIZED),
            (AuthError::MalformedHash("x".into()), StatusCode::UNAUTHORIZED),
            (
                AuthError::VersionMismatch {
                    found: 16,
                    expected: 19,
                },
                StatusCode::UNAUTHORIZED,
            ),
            (
                AuthError::MissingHeader("Authorization".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (AuthError::UntrustedProxy, StatusCode::UNAUTHORIZED),
            (AuthError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (
                AuthError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            assert_eq!(error.kind().status_code(), expected_status.as_u16());
            assert_eq!(
                error.to_app_error().status_code(),
                expected_status.as_u16()
            );
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }

    #[test]
    fn test_public_message_hides_details() {
        let err = AuthError::MalformedHash("salt is garbage".into());
        assert_eq!(err.public_message(), "Invalid credentials");

        let err = AuthError::Decode("Invalid byte 33, offset 0.".into());
        assert_eq!(err.public_message(), "Invalid token");

        assert_eq!(
            AuthError::UntrustedProxy.public_message(),
            "Unauthorized access"
        );
        assert_eq!(
            AuthError::MethodNotAllowed.public_message(),
            "Method not allowed"
        );
    }

    #[test]
    fn test_hash_error_conversion() {
        let err: AuthError = HashError::MalformedHash("x".into()).into();
        assert!(matches!(err, AuthError::MalformedHash(_)));

        let err: AuthError = HashError::VersionMismatch {
            found: 16,
            expected: 19,
        }
        .into();
        assert!(matches!(
            err,
            AuthError::VersionMismatch {
                found: 16,
                expected: 19
            }
        ));

        let err: AuthError = HashError::HashingFailed("x".into()).into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use kernel::id::ClientId;
    use platform::password::{HashConfig, HashEngine, ParsedHash};

    use crate::application::{AuthConfig, HashWorkers, IssueTokenUseCase, VerifyTokenUseCase};
    use crate::domain::entity::stored_credential::StoredCredential;
    use crate::domain::repository::CredentialRepository;
    use crate::domain::value_object::{bearer_token::BearerToken, client_secret::ClientSecret};
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryCredentialRepository;

    struct Fixture {
        repo: Arc<InMemoryCredentialRepository>,
        issue: IssueTokenUseCase<InMemoryCredentialRepository>,
        verify: VerifyTokenUseCase<InMemoryCredentialRepository>,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryCredentialRepository::new());
        let config = Arc::new(AuthConfig::development());
        let engine = Arc::new(HashEngine::new(HashConfig::DEVELOPMENT));
        let workers = HashWorkers::new(2);

        Fixture {
            issue: IssueTokenUseCase::new(repo.clone(), engine.clone(), workers.clone(), config),
            verify: VerifyTokenUseCase::new(repo.clone(), engine, workers),
            repo,
        }
    }

    #[tokio::test]
    async fn test_issue_stores_credential() {
        let f = fixture();
        let output = f.issue.execute().await.unwrap();

        assert_eq!(output.expires_in_secs, 3600);
        let stored = f
            .repo
            .find_by_client_id(&output.client_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.expires_at_ms, output.expires_at_ms);
        assert!(stored.encoded_hash.as_str().starts_with("$argon2id$v=19$"));

        let (client_id, _) = output.token.decode().unwrap();
        assert_eq!(client_id, output.client_id);
    }

    #[tokio::test]
    async fn test_issue_then_verify() {
        let f = fixture();
        let output = f.issue.execute().await.unwrap();

        let verified = f.verify.execute(&output.token).await.unwrap();
        assert_eq!(verified.client_id, output.client_id);
        assert_eq!(verified.expires_at_ms, output.expires_at_ms);
    }

    #[tokio::test]
    async fn test_issue_with_known_secret() {
        let f = fixture();
        let id = ClientId::new();
        let output = f
            .issue
            .execute_with_secret(id, ClientSecret::new("bootstrap-secret"))
            .await
            .unwrap();
        assert_eq!(output.client_id, id);

        let presented = BearerToken::encode(&id, &ClientSecret::new("bootstrap-secret"));
        assert!(f.verify.execute(&presented).await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_secret_is_rejected() {
        let f = fixture();
        let output = f.issue.execute().await.unwrap();

        let forged = BearerToken::encode(&output.client_id, &ClientSecret::new("guess"));
        let err = f.verify.execute(&forged).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unknown_client_is_rejected() {
        let f = fixture();
        let token = BearerToken::encode(&ClientId::new(), &ClientSecret::new("secret"));
        let err = f.verify.execute(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_unknown_client_waits_for_a_hash_worker() {
        let engine = Arc::new(HashEngine::new(HashConfig::DEVELOPMENT));
        let workers = HashWorkers::new(1);
        let verify = VerifyTokenUseCase::new(
            Arc::new(InMemoryCredentialRepository::new()),
            engine,
            workers.clone(),
        );

        // Occupy the only worker
        let (started_tx, started_rx) = tokio::sync::oneshot::channel();
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
        let busy = tokio::spawn({
            let workers = workers.clone();
            async move {
                workers
                    .run(move || {
                        let _ = started_tx.send(());
                        let _ = release_rx.recv();
                        Ok(())
                    })
                    .await
            }
        });
        started_rx.await.unwrap();

        // A lookup miss still queues for an Argon2 verification
        let token = BearerToken::encode(&ClientId::new(), &ClientSecret::new("secret"));
        let pending = tokio::time::timeout(Duration::from_millis(100), verify.execute(&token)).await;
        assert!(pending.is_err());

        release_tx.send(()).unwrap();
        busy.await.unwrap().unwrap();

        let err = verify.execute(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(workers.available(), 1);
    }

    #[tokio::test]
    async fn test_expired_credential_is_rejected() {
        let f = fixture();
        let output = f.issue.execute().await.unwrap();

        let mut stored = f
            .repo
            .find_by_client_id(&output.client_id)
            .await
            .unwrap()
            .unwrap();
        stored.expires_at_ms = 0;
        f.repo.store(&stored).await.unwrap();

        let err = f.verify.execute(&output.token).await.unwrap_err();
        assert!(matches!(err, AuthError::CredentialExpired));

        // The lapsed credential is gone; a retry looks like an unknown client
        assert!(
            f.repo
                .find_by_client_id(&output.client_id)
                .await
                .unwrap()
                .is_none()
        );
        let err = f.verify.execute(&output.token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_undecodable_token_is_rejected() {
        let f = fixture();
        let err = f
            .verify
            .execute(&BearerToken::new("not base64!"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unusable_stored_hash_is_malformed() {
        let f = fixture();
        let id = ClientId::new();

        // Parses, but Argon2 refuses m=1
        let encoded_hash = ParsedHash {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
            salt: vec![0u8; 16],
            digest: vec![0u8; 32],
        }
        .encode();
        f.repo
            .store(&StoredCredential::new(id, encoded_hash, i64::MAX))
            .await
            .unwrap();

        let token = BearerToken::encode(&id, &ClientSecret::new("secret"));
        let err = f.verify.execute(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::MalformedHash(_)));
    }
}

#[cfg(test)]
mod router_tests {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::{Method, Request, StatusCode, header};
    use platform::proxy::TrustedProxies;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::infra::memory::InMemoryCredentialRepository;
    use crate::presentation::{AuthAppState, auth_router};

    fn app(proxies: TrustedProxies) -> Router {
        let state = AuthAppState::new(
            Arc::new(InMemoryCredentialRepository::new()),
            Arc::new(AuthConfig::development()),
        );
        auth_router(state, proxies)
    }

    fn request(method: Method, uri: &str, peer: Option<&str>) -> Request<Body> {
        let mut req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        if let Some(peer) = peer {
            let addr: SocketAddr = peer.parse().unwrap();
            req.extensions_mut().insert(ConnectInfo(addr));
        }
        req
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn loopback() -> TrustedProxies {
        TrustedProxies::from_csv("127.0.0.1,::1")
    }

    #[tokio::test]
    async fn test_generate_from_trusted_caller() {
        let app = app(loopback());

        for method in [Method::GET, Method::POST] {
            let (status, json) = send(
                &app,
                request(method, "/token/generate", Some("127.0.0.1:54321")),
            )
            .await;

            assert_eq!(status, StatusCode::OK);
            let token = json["token"].as_str().unwrap();
            assert_eq!(json["expires_in"], "3600");
            assert_eq!(json["header"], format!("Bearer {}", token));
        }
    }

    #[tokio::test]
    async fn test_generate_from_trusted_ipv6_caller() {
        let app = app(loopback());
        let (status, _) = send(
            &app,
            request(Method::GET, "/token/generate", Some("[::1]:54321")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_generate_from_untrusted_caller() {
        let app = app(loopback());
        let (status, json) = send(
            &app,
            request(Method::GET, "/token/generate", Some("10.0.0.9:40000")),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], 401);
        assert_eq!(json["message"], "Unauthorized");
        assert_eq!(json["error"], "Unauthorized access");
    }

    #[tokio::test]
    async fn test_missing_peer_address() {
        // Empty string is not on a non-empty list
        let (status, _) = send(
            &app(loopback()),
            request(Method::GET, "/token/generate", None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // An empty list trusts everyone
        let (status, _) = send(
            &app(TrustedProxies::new()),
            request(Method::GET, "/token/generate", None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_other_methods_are_rejected() {
        let app = app(loopback());
        let (status, json) = send(
            &app,
            request(Method::PUT, "/token/generate", Some("127.0.0.1:54321")),
        )
        .await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json["code"], 405);
        assert_eq!(json["message"], "Method Not Allowed");
        assert_eq!(json["error"], "Method not allowed");

        // The gate runs first
        let (status, _) = send(
            &app,
            request(Method::DELETE, "/token/generate", Some("10.0.0.9:40000")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_verify_issued_token() {
        let app = app(loopback());
        let (_, issued) = send(
            &app,
            request(Method::POST, "/token/generate", Some("127.0.0.1:54321")),
        )
        .await;
        let header_value = issued["header"].as_str().unwrap().to_string();
        let token = issued["token"].as_str().unwrap();
        let (client_id, _) = crate::domain::service::token_issuer::TokenIssuer::decode_token(token)
            .unwrap();

        let mut req = request(Method::POST, "/token/verify", None);
        req.headers_mut()
            .insert(header::AUTHORIZATION, header_value.parse().unwrap());
        let (status, json) = send(&app, req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], client_id.to_string());
        assert!(json["expires_at_ms"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_verify_rejects_tampered_and_missing_tokens() {
        let app = app(loopback());
        let (_, issued) = send(
            &app,
            request(Method::POST, "/token/generate", Some("127.0.0.1:54321")),
        )
        .await;
        let token = issued["token"].as_str().unwrap();

        // Replace the secret, keep the identity
        let (client_id, _) = crate::domain::service::token_issuer::TokenIssuer::decode_token(token)
            .unwrap();
        let forged = platform::crypto::to_base64(format!("{}:forged", client_id).as_bytes());

        let mut req = request(Method::POST, "/token/verify", None);
        req.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {}", forged).parse().unwrap(),
        );
        let (status, json) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "Invalid credentials");

        let (status, json) = send(&app, request(Method::POST, "/token/verify", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "Missing required header: authorization");
    }
}
