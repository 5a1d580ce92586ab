//! List session: one task owns the [`ListState`] and applies every change in
//! order, so page appends, searches and color updates never interleave.

mod controller;
mod paginator;
mod search;
mod state;

use anyhow::{Context, Result};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::PokeApiClient;
use crate::app::AppMessage;
use crate::config::AppConfig;
use crate::models::PokemonDetail;
use crate::resource::Resource;
use crate::tasks::color_sampler;

pub use controller::CatalogController;
pub use paginator::PageRequest;
pub use search::filter_entries;
pub use state::ListState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    LoadNext,
    Search(String),
    LoadDetail(String),
    SampleColor(u32),
    Shutdown,
}

/// The detail screen's view of one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    /// Lower-cased name the request was made for.
    pub name: String,
    pub result: Resource<PokemonDetail>,
}

pub struct CatalogSession {
    controller: CatalogController,
    state: ListState,
    detail: Option<DetailView>,
    cmd_rx: UnboundedReceiver<SessionCommand>,
    msg_rx: UnboundedReceiver<AppMessage>,
    list_tx: watch::Sender<ListState>,
    detail_tx: watch::Sender<Option<DetailView>>,
}

impl CatalogSession {
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                maybe_command = self.cmd_rx.recv() => {
                    match maybe_command {
                        Some(SessionCommand::Shutdown) | None => break,
                        Some(command) => self.handle_command(command),
                    }
                }
                Some(message) = self.msg_rx.recv() => {
                    self.handle_message(message);
                }
            }

            self.publish();
        }
        debug!("session closed");
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::LoadNext => self.load_next(),
            SessionCommand::Search(query) => self.state.search(&query),
            SessionCommand::LoadDetail(name) => self.load_detail(name),
            SessionCommand::SampleColor(number) => self.sample_color(number),
            SessionCommand::Shutdown => {}
        }
    }

    fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::PageLoaded { page, result } => {
                if page != self.state.page {
                    warn!(page, expected = self.state.page, "page result out of sequence");
                }
                self.state.apply_page(result);
            }
            AppMessage::DetailLoaded { name, result } => match self.detail.as_mut() {
                Some(view) if view.name == name => view.result = result,
                _ => debug!(%name, "dropping superseded detail result"),
            },
            AppMessage::DominantColor { number, color } => {
                self.state.set_color(number, color);
            }
        }
    }

    fn load_next(&mut self) {
        if let Some(request) = self.state.begin_load() {
            self.controller.load_page(request);
        }
    }

    fn load_detail(&mut self, name: String) {
        let name = name.trim().to_lowercase();
        self.detail = Some(DetailView {
            name: name.clone(),
            result: Resource::Loading,
        });
        self.controller.load_detail(name);
    }

    fn sample_color(&mut self, number: u32) {
        if self.state.colors.contains_key(&number) {
            return;
        }
        let Some(entry) = self.state.find_entry(number) else {
            debug!(number, "no entry to sample");
            return;
        };
        if let Err(err) = self.controller.sample_color(number, entry.image_url.clone()) {
            warn!(number, error = %err, "color sampler unavailable");
        }
    }

    fn publish(&self) {
        self.list_tx.send_replace(self.state.clone());
        self.detail_tx.send_replace(self.detail.clone());
    }
}

/// What the UI holds: commands in, state snapshots out.
#[derive(Clone)]
pub struct SessionHandle {
    cmd_tx: UnboundedSender<SessionCommand>,
    list_rx: watch::Receiver<ListState>,
    detail_rx: watch::Receiver<Option<DetailView>>,
}

impl SessionHandle {
    pub fn load_next(&self) -> Result<()> {
        self.send(SessionCommand::LoadNext)
    }

    /// Same as [`load_next`](Self::load_next); offered next to a load error.
    pub fn retry(&self) -> Result<()> {
        self.load_next()
    }

    pub fn search(&self, query: impl Into<String>) -> Result<()> {
        self.send(SessionCommand::Search(query.into()))
    }

    pub fn load_detail(&self, name: impl Into<String>) -> Result<()> {
        self.send(SessionCommand::LoadDetail(name.into()))
    }

    /// Asks for the dominant color of an entry's image, usually once the UI
    /// has finished showing it.
    pub fn sample_color(&self, number: u32) -> Result<()> {
        self.send(SessionCommand::SampleColor(number))
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(SessionCommand::Shutdown)
    }

    pub fn snapshot(&self) -> ListState {
        self.list_rx.borrow().clone()
    }

    pub fn detail(&self) -> Option<DetailView> {
        self.detail_rx.borrow().clone()
    }

    /// Waits for the next published list state.
    pub async fn changed(&mut self) -> Result<ListState> {
        self.list_rx
            .changed()
            .await
            .context("session has shut down")?;
        Ok(self.list_rx.borrow_and_update().clone())
    }

    pub async fn wait_for<F>(&mut self, predicate: F) -> Result<ListState>
    where
        F: FnMut(&ListState) -> bool,
    {
        let state = self
            .list_rx
            .wait_for(predicate)
            .await
            .context("session has shut down")?;
        Ok(state.clone())
    }

    pub async fn wait_for_detail(&mut self) -> Result<DetailView> {
        let view = self
            .detail_rx
            .wait_for(|view| matches!(view, Some(view) if !view.result.is_loading()))
            .await
            .context("session has shut down")?;
        view.clone().context("detail view missing")
    }

    fn send(&self, command: SessionCommand) -> Result<()> {
        self.cmd_tx
            .send(command)
            .context("session has shut down")
    }
}

/// Builds the client and sampler, starts the session task and requests the
/// first page. Must be called from within a Tokio runtime.
pub fn spawn_session(config: &AppConfig) -> Result<SessionHandle> {
    let client = PokeApiClient::new(config)?;

    let (msg_tx, msg_rx) = mpsc::unbounded_channel();
    let sampler = color_sampler::spawn(config, msg_tx.clone())?;
    let controller = CatalogController::new(client, sampler, msg_tx);

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let state = ListState::new(config.page_size());
    let (list_tx, list_rx) = watch::channel(state.clone());
    let (detail_tx, detail_rx) = watch::channel(None);

    let mut session = CatalogSession {
        controller,
        state,
        detail: None,
        cmd_rx,
        msg_rx,
        list_tx,
        detail_tx,
    };
    session.load_next();
    session.publish();

    tokio::spawn(session.run());

    Ok(SessionHandle {
        cmd_tx,
        list_rx,
        detail_rx,
    })
}
