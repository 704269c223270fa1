//! Concurrency test: parallel escaped round trips through the full chain.
//!
//! The escape layer must not serialize or queue requests; each in-flight
//! request is rewritten independently.

mod common;

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use path_relay::client::{escaped_client, EscapedClient};
use path_relay::config::EscapeConfig;

fn relay_client() -> EscapedClient {
    escaped_client(&EscapeConfig::default())
}

async fn read_body(body: hyper::body::Incoming) -> String {
    let bytes = axum::body::to_bytes(Body::new(body), 1024 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn concurrent_round_trips_do_not_interfere() {
    let backend_addr: SocketAddr = "127.0.0.1:28581".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28582".parse().unwrap();

    let shutdown = common::start_backend(backend_addr).await;
    common::start_normalizing_proxy(proxy_addr, backend_addr).await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    let client = relay_client();
    let concurrency = 8;
    let files_per_task = 10;

    let mut tasks = Vec::new();
    for task_id in 0..concurrency {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            for i in 0..files_per_task {
                let uri = format!(
                    "http://{proxy_addr}/api/userdata/workflows%2Fteam{task_id}%2Fitem{i}.json"
                );
                let payload = format!("payload-{task_id}-{i}");

                let res = client
                    .clone()
                    .oneshot(Request::post(&uri).body(Body::from(payload.clone())).unwrap())
                    .await
                    .unwrap();
                assert_eq!(res.status(), StatusCode::CREATED);

                let res = client
                    .clone()
                    .oneshot(Request::get(&uri).body(Body::empty()).unwrap())
                    .await
                    .unwrap();
                assert_eq!(res.status(), StatusCode::OK);
                assert_eq!(read_body(res.into_body()).await, payload);
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    // Every stored name came out in the literal form.
    let listing: Vec<String> = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
        .get(format!("http://{backend_addr}/api/userdata"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing.len(), concurrency * files_per_task);
    assert!(listing.iter().all(|name| name.starts_with("workflows/team")));

    shutdown.trigger();
}
