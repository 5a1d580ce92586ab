use anyhow::Result;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task;
use tracing::debug;

use crate::api::PokeApiClient;
use crate::app::AppMessage;
use crate::tasks::color_sampler::ColorSamplerHandle;

use super::paginator::PageRequest;

/// Spawns the network work for a session; results come back as `AppMessage`s.
#[derive(Clone)]
pub struct CatalogController {
    client: PokeApiClient,
    sampler: ColorSamplerHandle,
    message_tx: UnboundedSender<AppMessage>,
}

impl CatalogController {
    pub fn new(
        client: PokeApiClient,
        sampler: ColorSamplerHandle,
        message_tx: UnboundedSender<AppMessage>,
    ) -> Self {
        Self {
            client,
            sampler,
            message_tx,
        }
    }

    pub fn load_page(&self, request: PageRequest) {
        let client = self.client.clone();
        let tx = self.message_tx.clone();

        debug!(page = request.page, offset = request.offset, "requesting page");
        task::spawn(async move {
            let result = client.fetch_page(request.limit, request.offset).await;
            let _ = tx.send(AppMessage::PageLoaded {
                page: request.page,
                result,
            });
        });
    }

    pub fn load_detail(&self, name: String) {
        let client = self.client.clone();
        let tx = self.message_tx.clone();

        task::spawn(async move {
            let result = client.fetch_detail(&name).await;
            let _ = tx.send(AppMessage::DetailLoaded { name, result });
        });
    }

    pub fn sample_color(&self, number: u32, image_url: String) -> Result<()> {
        self.sampler.enqueue(number, image_url)
    }
}
