//! Debounced, supersession-safe repository fetch pipeline.
//!
//! One worker task owns [`PipelineState`] and is its only writer. Handles
//! send commands; quiet-period timers and fetch tasks report back through an
//! internal channel, tagged with the ticket or generation they were started
//! for. Anything that no longer matches is dropped, so a slow early fetch
//! can never overwrite the result of a later one.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace, warn};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::domain::{Repository, RepositoryError};
use crate::repository::RepositorySource;

/// Quiet period a query must survive before it is fetched.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Page size used for search when nothing else is configured.
pub const DEFAULT_PER_PAGE: u32 = 20;

const SEARCH_PAGE: u32 = 1;

/// What observers see.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineState {
    /// Latest text passed to [`FetchPipeline::set_query`], untrimmed.
    pub query_text: String,
    /// True while a current fetch of either stream is outstanding.
    pub is_loading: bool,
    /// Result of the most recent successful fetch, replaced wholesale.
    pub items: Vec<Repository>,
    /// Stays set until [`FetchPipeline::acknowledge_error`].
    pub last_error: Option<RepositoryError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub debounce: Duration,
    pub per_page: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            debounce: SEARCH_DEBOUNCE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

enum Command {
    SetQuery(String),
    RefreshDefaultListing { page: u32, per_page: u32 },
    AcknowledgeError,
    WaitUntilIdle(oneshot::Sender<()>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Search,
    Listing,
}

enum Event {
    QuietPeriodElapsed {
        ticket: u64,
    },
    Completed {
        stream: Stream,
        generation: u64,
        outcome: Result<Vec<Repository>, RepositoryError>,
    },
}

/// Handle to a running pipeline.
///
/// Must be created inside a Tokio runtime. Dropping every handle stops the
/// worker and aborts outstanding timers and fetches.
pub struct FetchPipeline {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<PipelineState>,
    worker: JoinHandle<()>,
}

impl FetchPipeline {
    pub fn spawn(source: Arc<dyn RepositorySource>, options: PipelineOptions) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (events, event_rx) = mpsc::unbounded_channel();
        let (publisher, state) = watch::channel(PipelineState::default());

        let worker = Worker::new(source, options, publisher, events);
        let worker = tokio::spawn(worker.run(command_rx, event_rx));

        Self {
            commands,
            state,
            worker,
        }
    }

    /// Records `text` and schedules a search once typing pauses.
    pub fn set_query(&self, text: impl Into<String>) {
        self.send(Command::SetQuery(text.into()));
    }

    /// Fetches the organization listing right away, replacing any
    /// listing fetch still in flight.
    pub fn refresh_default_listing(&self, page: u32, per_page: u32) {
        self.send(Command::RefreshDefaultListing { page, per_page });
    }

    pub fn acknowledge_error(&self) {
        self.send(Command::AcknowledgeError);
    }

    /// Resolves once no quiet period is pending and neither stream has a
    /// fetch outstanding. Returns immediately if the worker has stopped.
    pub async fn wait_until_idle(&self) {
        let (tx, rx) = oneshot::channel();
        self.send(Command::WaitUntilIdle(tx));
        let _ = rx.await;
    }

    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    /// Stops the worker and waits for it to finish.
    pub async fn shutdown(self) {
        let FetchPipeline {
            commands, worker, ..
        } = self;
        drop(commands);

        if let Err(e) = worker.await {
            warn!("Fetch pipeline worker ended abnormally: {}", e);
        }
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!("Fetch pipeline is no longer running");
        }
    }
}

/// One logical fetch stream with its own generation counter.
#[derive(Default)]
struct Lane {
    generation: u64,
    in_flight: Option<InFlight>,
}

struct InFlight {
    generation: u64,
    query: Option<String>,
    task: JoinHandle<()>,
}

impl Lane {
    /// Invalidates whatever is outstanding and returns the next generation.
    fn supersede(&mut self) -> u64 {
        self.generation += 1;
        if let Some(previous) = self.in_flight.take() {
            trace!("Aborting fetch of generation {}", previous.generation);
            previous.task.abort();
        }
        self.generation
    }

    fn start(&mut self, generation: u64, query: Option<String>, task: JoinHandle<()>) {
        self.in_flight = Some(InFlight {
            generation,
            query,
            task,
        });
    }

    fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    fn is_fetching(&self, query: &str) -> bool {
        self.in_flight
            .as_ref()
            .and_then(|f| f.query.as_deref())
            .is_some_and(|q| q == query)
    }

    /// Clears the in-flight slot if `generation` is current.
    fn settle(&mut self, generation: u64) -> bool {
        match &self.in_flight {
            Some(f) if f.generation == generation && generation == self.generation => {
                self.in_flight = None;
                true
            }
            _ => false,
        }
    }
}

struct Worker {
    source: Arc<dyn RepositorySource>,
    options: PipelineOptions,
    state: PipelineState,
    publisher: watch::Sender<PipelineState>,
    events: mpsc::UnboundedSender<Event>,
    quiet_period: Option<JoinHandle<()>>,
    quiet_ticket: u64,
    search: Lane,
    listing: Lane,
    idle_waiters: Vec<oneshot::Sender<()>>,
}

impl Worker {
    fn new(
        source: Arc<dyn RepositorySource>,
        options: PipelineOptions,
        publisher: watch::Sender<PipelineState>,
        events: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self {
            source,
            options,
            state: PipelineState::default(),
            publisher,
            events,
            quiet_period: None,
            quiet_ticket: 0,
            search: Lane::default(),
            listing: Lane::default(),
            idle_waiters: Vec::new(),
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut events: mpsc::UnboundedReceiver<Event>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(event) = events.recv() => self.handle_event(event),
            }
            self.notify_if_idle();
        }

        debug!("Fetch pipeline stopping");
        self.cancel_quiet_period();
        self.search.supersede();
        self.listing.supersede();
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::SetQuery(text) => self.set_query(text),
            Command::RefreshDefaultListing { page, per_page } => {
                self.refresh_default_listing(page, per_page)
            }
            Command::AcknowledgeError => {
                if self.state.last_error.take().is_some() {
                    self.publish();
                }
            }
            Command::WaitUntilIdle(waiter) => self.idle_waiters.push(waiter),
        }
    }

    fn is_idle(&self) -> bool {
        self.quiet_period.is_none() && !self.search.is_busy() && !self.listing.is_busy()
    }

    fn notify_if_idle(&mut self) {
        if self.idle_waiters.is_empty() || !self.is_idle() {
            return;
        }
        trace!("Idle, waking {} waiter(s)", self.idle_waiters.len());
        for waiter in self.idle_waiters.drain(..) {
            let _ = waiter.send(());
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::QuietPeriodElapsed { ticket } => self.quiet_period_elapsed(ticket),
            Event::Completed {
                stream,
                generation,
                outcome,
            } => self.completed(stream, generation, outcome),
        }
    }

    fn set_query(&mut self, text: String) {
        self.state.query_text = text;
        self.cancel_quiet_period();

        if self.state.query_text.trim().is_empty() {
            debug!("Query cleared, dropping results");
            self.search.supersede();
            self.state.items.clear();
        } else {
            self.schedule_quiet_period();
        }

        self.publish();
    }

    fn cancel_quiet_period(&mut self) {
        self.quiet_ticket += 1;
        if let Some(timer) = self.quiet_period.take() {
            timer.abort();
        }
    }

    fn schedule_quiet_period(&mut self) {
        let ticket = self.quiet_ticket;
        let delay = self.options.debounce;
        let events = self.events.clone();

        self.quiet_period = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(Event::QuietPeriodElapsed { ticket });
        }));
    }

    fn quiet_period_elapsed(&mut self, ticket: u64) {
        if ticket != self.quiet_ticket {
            trace!("Ignoring stale quiet period {}", ticket);
            return;
        }
        self.quiet_period = None;

        let query = self.state.query_text.trim().to_string();
        if query.is_empty() {
            return;
        }
        if self.search.is_fetching(&query) {
            debug!("Search for {:?} already in flight", query);
            return;
        }

        self.start_search(query);
        self.publish();
    }

    fn start_search(&mut self, query: String) {
        let generation = self.search.supersede();
        debug!("Searching {:?} (generation {})", query, generation);

        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        let per_page = self.options.per_page;
        let q = query.clone();

        let task = tokio::spawn(async move {
            let outcome = source
                .search_repositories(&q, SEARCH_PAGE, per_page)
                .await
                .map(|result| result.items);
            let _ = events.send(Event::Completed {
                stream: Stream::Search,
                generation,
                outcome,
            });
        });

        self.search.start(generation, Some(query), task);
    }

    fn refresh_default_listing(&mut self, page: u32, per_page: u32) {
        let generation = self.listing.supersede();
        debug!(
            "Refreshing default listing page {} (generation {})",
            page, generation
        );

        let source = Arc::clone(&self.source);
        let events = self.events.clone();

        let task = tokio::spawn(async move {
            let outcome = source.organization_repositories(page, per_page).await;
            let _ = events.send(Event::Completed {
                stream: Stream::Listing,
                generation,
                outcome,
            });
        });

        self.listing.start(generation, None, task);
        self.publish();
    }

    fn completed(
        &mut self,
        stream: Stream,
        generation: u64,
        outcome: Result<Vec<Repository>, RepositoryError>,
    ) {
        let lane = match stream {
            Stream::Search => &mut self.search,
            Stream::Listing => &mut self.listing,
        };
        if !lane.settle(generation) {
            debug!(
                "Discarding superseded {:?} result (generation {})",
                stream, generation
            );
            return;
        }

        match outcome {
            Ok(items) => {
                debug!("{:?} returned {} repositories", stream, items.len());
                self.state.items = items;
            }
            Err(error) => {
                warn!("{:?} failed: {}", stream, error);
                self.state.last_error = Some(error);
            }
        }

        self.publish();
    }

    fn publish(&mut self) {
        self.state.is_loading = self.search.is_busy() || self.listing.is_busy();
        self.publisher.send_replace(self.state.clone());
    }
}
