/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Shared test helpers for oidc-validator integration tests.

#![allow(dead_code)]

use axum::response::Response;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::de::DeserializeOwned;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PROVIDER_KEY: &str = include_str!("fixtures/provider.key");
pub const PROVIDER_X5C: &str = include_str!("fixtures/provider.x5c");
pub const ROGUE_KEY: &str = include_str!("fixtures/rogue.key");

pub const DISCOVERY_PATH: &str = "/.well-known/openid-configuration";
pub const JWKS_PATH: &str = "/.well-known/openid-configuration/jwks";

pub fn now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Claims of a token that is valid for the next hour.
pub fn valid_claims() -> serde_json::Value {
    serde_json::json!({
        "sub": "user-123",
        "name": "Test User",
        "iss": "https://openid.example.com",
        "aud": "my-api",
        "iat": now(),
        "exp": now() + 3600,
    })
}

/// Sign `claims` with RS256 using the given PKCS#8 private key.
pub fn sign_token(private_pem: &str, claims: &serde_json::Value) -> String {
    let key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).expect("fixture key");
    encode(&Header::new(Algorithm::RS256), claims, &key).expect("sign test token")
}

/// A token signed by the provider's key.
pub fn provider_token() -> String {
    sign_token(PROVIDER_KEY, &valid_claims())
}

/// Swap the payload of a signed token for different claims, keeping the signature.
pub fn tamper(token: &str) -> String {
    let mut parts = token.split('.');
    let header = parts.next().expect("header");
    let _payload = parts.next().expect("payload");
    let signature = parts.next().expect("signature");

    let mut claims = valid_claims();
    claims["sub"] = serde_json::json!("admin");
    let forged = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    format!("{header}.{forged}.{signature}")
}

/// Key set whose first key carries the provider certificate.
pub fn jwks_with_certificate() -> serde_json::Value {
    serde_json::json!({
        "keys": [{
            "kty": "RSA",
            "use": "sig",
            "alg": "RS256",
            "kid": "provider-key",
            "x5c": [PROVIDER_X5C],
        }]
    })
}

/// Serve a discovery document pointing at [`JWKS_PATH`], expecting `hits` requests.
pub async fn mount_discovery(server: &MockServer, hits: u64) {
    Mock::given(method("GET"))
        .and(path(DISCOVERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "issuer": server.uri(),
            "jwks_uri": format!("{}{JWKS_PATH}", server.uri()),
        })))
        .expect(hits)
        .mount(server)
        .await;
}

/// Serve `response` on [`JWKS_PATH`], expecting `hits` requests.
pub async fn mount_jwks(server: &MockServer, response: ResponseTemplate, hits: u64) {
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(response)
        .expect(hits)
        .mount(server)
        .await;
}

/// A provider that serves the genuine certificate, expecting `hits` full refreshes.
pub async fn genuine_provider(hits: u64) -> MockServer {
    let server = MockServer::start().await;
    mount_discovery(&server, hits).await;
    mount_jwks(
        &server,
        ResponseTemplate::new(200).set_body_json(jwks_with_certificate()),
        hits,
    )
    .await;
    server
}

/// Consume a response body and deserialize JSON into `T`.
pub async fn response_json<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("deserialize response body")
}
