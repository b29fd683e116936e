use std::time::Duration;

use novu_http::{Api, ApiRequest, ClientOptions, NovuConfig, RetryPolicy};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = NovuConfig::from_env()?;
    let options = ClientOptions::from_env()?.with_retry(RetryPolicy {
        initial_delay: Duration::from_millis(500),
        ..RetryPolicy::default()
    });
    let api = Api::with_session(config, reqwest::Client::new()).with_options(options);

    let triggered = api
        .execute(
            ApiRequest::post(api.config().endpoint("/v1/events/trigger")).json(json!({
                "name": "welcome",
                "to": { "subscriberId": "demo-subscriber" },
                "payload": { "greeting": "hello" }
            })),
        )
        .await?;
    println!("{triggered}");

    let mut subscribers = api.paginate::<serde_json::Value>(api.config().endpoint("/v1/subscribers"));
    while let Some(subscriber) = subscribers.next_item().await? {
        println!("{subscriber}");
    }

    Ok(())
}
