use std::collections::HashSet;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode, header};
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::{self, JoinError};
use tracing::{debug, warn};

use crate::app::AppMessage;
use crate::color::{Rgb, dominant_color_or_default};
use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum ColorSampleError {
    #[error("image download failed: {0}")]
    Download(#[from] reqwest::Error),
    #[error("image request returned status {0}")]
    Status(StatusCode),
    #[error("image could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
    #[error("sampling task failed: {0}")]
    Join(#[from] JoinError),
}

#[derive(Clone)]
pub struct ColorSamplerHandle {
    tx: UnboundedSender<SampleJob>,
}

impl ColorSamplerHandle {
    pub fn enqueue(&self, number: u32, image_url: String) -> Result<()> {
        self.tx
            .send(SampleJob { number, image_url })
            .context("failed to enqueue color sample job")
    }
}

/// Starts the worker that downloads entry images and reports their dominant
/// color. The worker exits once every handle is dropped.
pub fn spawn(
    config: &AppConfig,
    message_tx: UnboundedSender<AppMessage>,
) -> Result<ColorSamplerHandle> {
    let (tx, rx) = mpsc::unbounded_channel();

    let client = build_client(config)?;

    tokio::spawn(async move {
        run_sampler(client, message_tx, rx).await;
    });

    Ok(ColorSamplerHandle { tx })
}

struct SampleJob {
    number: u32,
    image_url: String,
}

fn build_client(config: &AppConfig) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        "X-Client-Id",
        header::HeaderValue::from_str(config.client_id())
            .context("invalid client identifier for image client")?,
    );
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("image/png, image/jpeg"),
    );

    let client = Client::builder()
        .default_headers(headers)
        .user_agent(config.user_agent())
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .build()
        .context("unable to create HTTP client for image downloads")?;

    Ok(client)
}

async fn run_sampler(
    client: Client,
    message_tx: UnboundedSender<AppMessage>,
    mut rx: UnboundedReceiver<SampleJob>,
) {
    let mut sampled: HashSet<u32> = HashSet::new();

    while let Some(job) = rx.recv().await {
        if !sampled.insert(job.number) {
            continue;
        }

        match sample_url(&client, &job.image_url).await {
            Ok(color) => {
                debug!(number = job.number, %color, "dominant color sampled");
                // the session may be gone; nothing to deliver to then
                if message_tx
                    .send(AppMessage::DominantColor {
                        number: job.number,
                        color,
                    })
                    .is_err()
                {
                    break;
                }
            }
            Err(err) => {
                // allow a later retry for this entry
                sampled.remove(&job.number);
                warn!(number = job.number, url = %job.image_url, error = %err, "color sampling failed");
            }
        }
    }
}

async fn sample_url(client: &Client, url: &str) -> Result<Rgb, ColorSampleError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(ColorSampleError::Status(response.status()));
    }
    let bytes = response.bytes().await?;
    dominant_color_from_bytes(bytes.to_vec()).await
}

/// Decodes an encoded image and samples it on the blocking pool.
pub async fn dominant_color_from_bytes(bytes: Vec<u8>) -> Result<Rgb, ColorSampleError> {
    let outcome = task::spawn_blocking(move || {
        image::load_from_memory(&bytes).map(|decoded| dominant_color_or_default(&decoded.to_rgba8()))
    })
    .await?;

    Ok(outcome?)
}
