//! Example: Error handling and caller-side retries
//!
//! The client never retries on its own. This example shows how a caller can
//! retry network failures and 5xx responses, and how to turn an error status
//! into an `Error::Response` only where that is wanted.
//!
//! # Usage
//!
//! ```bash
//! export TYPEDREST_BASE_URL="https://reqres.in/api"
//! cargo run --example error_handling
//! ```

use std::time::Duration;

use serde::Deserialize;
use typedrest::{Error, ErrorKind, ResponseModel, ResponsePair, RestClient, Validated};

#[derive(Debug, Deserialize)]
struct User {
    id: u64,
    first_name: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: User,
}

const MAX_ATTEMPTS: u32 = 3;

/// GET with exponential backoff on network failures and 5xx statuses.
async fn get_with_retry(client: &RestClient, path: &str) -> typedrest::Result<ResponsePair> {
    let mut delay = Duration::from_millis(200);

    for attempt in 1..=MAX_ATTEMPTS {
        let outcome = client.get(path).await;
        let retryable = match &outcome {
            Err(e) => e.kind() == ErrorKind::Network,
            Ok(pair) => pair.status().is_server_error(),
        };

        if !retryable || attempt == MAX_ATTEMPTS {
            return outcome;
        }

        println!("  attempt {attempt} failed, retrying in {delay:?}");
        tokio::time::sleep(delay).await;
        delay *= 2;
    }

    unreachable!("loop returns on the last attempt")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base_url =
        std::env::var("TYPEDREST_BASE_URL").unwrap_or_else(|_| "https://reqres.in/api".into());
    let client = RestClient::new(base_url)?;

    println!("=== Error Handling Example ===\n");

    // Example 1: error statuses are data
    println!("1. Error statuses come back as (payload, status):");
    println!("{}", "-".repeat(50));

    let (payload, status) = get_with_retry(&client, "/unknown/23").await?.into_parts();
    println!("  status {status}, payload {payload:?}");

    // Example 2: promote an error status on demand
    println!("\n2. Promoting an error status to Error::Response:");
    println!("{}", "-".repeat(50));

    match get_with_retry(&client, "/unknown/23").await?.error_for_status() {
        Ok(pair) => println!("  success: {:?}", pair.payload()),
        Err(e) => println!("  {e} (kind {:?}, status {:?})", e.kind(), e.status()),
    }

    // Example 3: models with retries
    println!("\n3. Validating a model around a retried call:");
    println!("{}", "-".repeat(50));

    let validated = ResponseModel::<Envelope>::bind()
        .wrap(get_with_retry(&client, "/users/2"))
        .await;
    match validated {
        Ok(Validated::One { model, status }) => {
            println!("  {status}: user {} is {}", model.data.id, model.data.first_name)
        }
        Ok(other) => println!("  not received, status {}", other.status()),
        Err(e @ Error::Validation { .. }) => println!("  payload did not fit the model: {e}"),
        Err(e) => return Err(e.into()),
    }

    // Example 4: network failures
    println!("\n4. Network failures:");
    println!("{}", "-".repeat(50));

    let offline = RestClient::new("http://127.0.0.1:9")?;
    match get_with_retry(&offline, "/users/2").await {
        Err(e) if e.is_network() => println!("  gave up after {MAX_ATTEMPTS} attempts: {e}"),
        other => println!("  unexpected: {other:?}"),
    }

    client.close().await?;
    Ok(())
}
