//! Dev reload behavior through the generated build graph.

use std::time::Duration;

use crx_bundler::{ReloadMessage, generate};
use crx_config::{ExtensionOptions, Mode};
use serde_json::json;

fn dev_options() -> ExtensionOptions {
    ExtensionOptions::from_value(json!({
        "background": ["bg/index.ts", "bg/other.ts"],
        "content": ["c/index.ts"],
        "host": "127.0.0.1",
        "port": 4123
    }))
    .unwrap()
    .with_root("/ext")
}

#[tokio::test]
async fn client_is_injected_into_first_background_entry_only() {
    let generated = generate(&dev_options(), Vec::new(), Mode::Development).unwrap();
    let background = generated.background_build().unwrap();
    let content = &generated.builds[0];

    let first = background
        .transform("start();", "/ext/bg/index.ts")
        .await
        .unwrap();
    assert!(first.starts_with("start();"));
    assert!(first.contains(r#"__crxReload("127.0.0.1", 4123);"#));

    let second = background
        .transform("start();", "/ext/bg/other.ts")
        .await
        .unwrap();
    assert_eq!(second, "start();");

    let content_code = content
        .transform("start();", "/ext/bg/index.ts")
        .await
        .unwrap();
    assert_eq!(content_code, "start();");
}

#[tokio::test]
async fn production_injects_nothing() {
    let generated = generate(&dev_options(), Vec::new(), Mode::Production).unwrap();
    let background = generated.background_build().unwrap();
    let code = background
        .transform("start();", "/ext/bg/index.ts")
        .await
        .unwrap();
    assert_eq!(code, "start();");
    assert!(generated.coordinator.channel().is_none());
}

#[tokio::test(start_paused = true)]
async fn builds_finishing_together_push_one_update() {
    let generated = generate(&dev_options(), Vec::new(), Mode::Development).unwrap();
    let channel = generated.coordinator.channel().unwrap().clone();
    let (_, mut rx) = channel.register();

    for build in &generated.builds {
        build.build_end().await.unwrap();
    }

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(rx.recv().await.unwrap(), ReloadMessage::Update.to_json());
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn separate_windows_push_separately() {
    let generated = generate(&dev_options(), Vec::new(), Mode::Development).unwrap();
    let channel = generated.coordinator.channel().unwrap().clone();
    let (_, mut rx) = channel.register();

    assert!(generated.coordinator.notify_build_end());
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(generated.coordinator.notify_build_end());
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert!(rx.recv().await.is_some());
    assert!(rx.recv().await.is_some());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn shutdown_disconnects_clients() {
    let generated = generate(&dev_options(), Vec::new(), Mode::Development).unwrap();
    let channel = generated.coordinator.channel().unwrap().clone();
    let (_, mut rx) = channel.register();

    generated.coordinator.shutdown();
    assert!(rx.recv().await.is_none());
    assert_eq!(channel.client_count(), 0);
}
