use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use swim_tracker::utils::{logger, validation::Validate};
use swim_tracker::{ProxyConfig, ProxyEvent, ProxyResponse, SwimProxy};

async fn function_handler(
    proxy: &SwimProxy,
    event: LambdaEvent<ProxyEvent>,
) -> Result<ProxyResponse, Error> {
    Ok(proxy.handle(&event.payload).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = ProxyConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let proxy = Arc::new(SwimProxy::new(&config));
    tracing::info!("Swim proxy ready for {}", config.api_url);

    run(service_fn(move |event| {
        let proxy = Arc::clone(&proxy);
        async move { function_handler(&proxy, event).await }
    }))
    .await
}
