//! TIFF generator Lambda.
//!
//! Subscribed to the weather and ice SNS topics. Each invocation renders
//! the announced archives to TIFF in S3 and publishes a "file created"
//! notification per run.

mod config;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use lambda_runtime::{service_fn, Error as LambdaError, LambdaEvent};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{build_services, Args};
use tiff_common::SnsEvent;
use tiff_pipeline::Handler;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    // Local runs read a .env file; on Lambda the environment is already set.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(&args);

    let handler = Arc::new(init_handler(&args).await?);
    info!(bucket = %args.bucket, topic = %args.topic_arn, "TIFF generator ready");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<SnsEvent>| {
        let handler = handler.clone();
        async move { handle(&handler, event).await }
    }))
    .await
}

fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .without_time();

    if args.log_format.eq_ignore_ascii_case("text") {
        builder.init();
    } else {
        builder.json().init();
    }
}

async fn init_handler(args: &Args) -> Result<Handler> {
    let config = args.pipeline_config()?;
    let services = build_services(args).await?;
    Ok(Handler::new(services, config))
}

async fn handle(handler: &Handler, event: LambdaEvent<SnsEvent>) -> Result<(), LambdaError> {
    let (event, context) = event.into_parts();
    info!(
        request_id = %context.request_id,
        records = event.records.len(),
        "Received notification"
    );

    handler.handle(&event).await.into_result()?;
    Ok(())
}
