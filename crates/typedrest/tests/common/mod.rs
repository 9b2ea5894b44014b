//! Common test utilities and models

#![allow(dead_code)]

use serde::Deserialize;
use serde_json::{Value, json};
use typedrest::RestClient;
use wiremock::MockServer;

/// User as returned inside `{"data": ...}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetUserModel {
    pub id: u64,
    pub first_name: Option<String>,
}

/// Envelope of a single-user response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataModel {
    pub data: GetUserModel,
}

/// Response to creating a user
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[allow(non_snake_case)]
pub struct PostUserModel {
    pub name: String,
    pub job: String,
    pub id: u64,
    pub createdAt: String,
}

/// Response to updating a user
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[allow(non_snake_case)]
pub struct PutUserModel {
    pub name: String,
    pub job: String,
    pub updatedAt: String,
}

/// Single-user response body
pub fn user_body(id: u64, first_name: &str) -> Value {
    json!({
        "data": {
            "id": id,
            "email": format!("{}@reqres.in", first_name.to_lowercase()),
            "first_name": first_name,
            "last_name": "Weaver",
        }
    })
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> RestClient {
    RestClient::new(server.uri()).expect("Failed to build client")
}

/// An address nothing is listening on
pub fn unused_addr() -> std::net::SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
