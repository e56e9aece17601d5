use iced::time::{self, Instant};
use iced::widget::image::Handle;
use iced::widget::{button, column, container, markdown, row, scrollable, stack, text, text_input};
use iced::{Element, Length, Subscription, Task, Theme};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod state;
mod ui;

use api::schema::{ActionResponse, HealthResponse, QueryResponse};
use api::{ApiClient, ApiError};
use config::Config;
use state::data::{is_web_link, ImageSource};
use state::notify::{Notifier, ToastKind, Toasts};
use state::query::{self as query_state, Action, QueryView};
use ui::results::Thumbnail;

/// Redraw rate while the spinner is visible
const SPINNER_FRAME: Duration = Duration::from_millis(16);
/// How often toasts are checked for expiry
const TOAST_SWEEP: Duration = Duration::from_millis(250);
/// Shown when a link cannot be handed to the browser
const OPEN_LINK_FAILED: &str = "Could not open link";

/// Main application state
struct RagAssistant {
    /// Backend client, cloned into every background task
    client: ApiClient,
    /// Query text, results and loading flag
    view: QueryView,
    /// Parsed markdown of the current answer
    answer: Vec<markdown::Item>,
    /// One slot per gallery image, in the same order as `view.images()`
    thumbnails: Vec<Thumbnail>,
    /// Live notifications
    toasts: Toasts,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Text in the query box changed
    QueryChanged(String),
    /// User clicked "Search" or pressed Enter
    Search,
    /// Query request settled
    SearchComplete(Result<QueryResponse, ApiError>),
    /// User clicked "Scrape Articles"
    Scrape,
    /// User clicked "Clear Chat History"
    Clear,
    /// Scrape or clear request settled
    ActionComplete(Action, Result<ActionResponse, ApiError>),
    /// Startup health check settled
    HealthChecked(Result<HealthResponse, ApiError>),
    /// A gallery image finished downloading
    ImageLoaded {
        generation: u64,
        index: usize,
        result: Result<Vec<u8>, ApiError>,
    },
    /// A link inside the markdown answer was clicked
    LinkClicked(markdown::Url),
    /// A source link was clicked
    OpenUrl(String),
    /// User closed a toast
    DismissToast(u64),
    /// Animation / expiry tick
    Tick(Instant),
}

impl RagAssistant {
    /// Create a new instance of the application.
    /// The backend health check is started right away.
    fn new(config: &Config, client: ApiClient) -> (Self, Task<Message>) {
        tracing::info!("🔎 RAG Assistant connecting to {}", client.base());

        let health = {
            let client = client.clone();
            Task::perform(async move { client.health().await }, Message::HealthChecked)
        };

        (
            RagAssistant {
                client,
                view: QueryView::new(),
                answer: Vec::new(),
                thumbnails: Vec::new(),
                toasts: Toasts::new(config.toast_timeout(), config.max_toasts),
            },
            health,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(query) => {
                self.view.set_query(query);
                Task::none()
            }
            Message::Search => {
                let Some(query) = self.view.begin_search() else {
                    return Task::none();
                };

                self.answer.clear();
                self.thumbnails.clear();

                let client = self.client.clone();
                Task::perform(async move { client.query(query).await }, Message::SearchComplete)
            }
            Message::SearchComplete(result) => {
                self.view.finish_search(result);
                self.answer = markdown::parse(self.view.answer()).collect();
                self.load_thumbnails()
            }
            Message::Scrape => self.start_action(Action::Scrape),
            Message::Clear => self.start_action(Action::Clear),
            Message::ActionComplete(action, result) => {
                self.view.finish_action(action, result, &mut self.toasts);
                Task::none()
            }
            Message::HealthChecked(result) => {
                query_state::report_health(result, &mut self.toasts);
                Task::none()
            }
            Message::ImageLoaded {
                generation,
                index,
                result,
            } => {
                if generation != self.view.generation() {
                    tracing::debug!(generation, index, "discarding image from an earlier search");
                    return Task::none();
                }

                let thumbnail = match result {
                    Ok(bytes) => Thumbnail::Ready(Handle::from_bytes(bytes)),
                    Err(err) => {
                        tracing::warn!(index, error = %err, "⚠️  image download failed");
                        Thumbnail::Failed
                    }
                };
                if let Some(slot) = self.thumbnails.get_mut(index) {
                    *slot = thumbnail;
                }

                Task::none()
            }
            Message::LinkClicked(url) => {
                self.open_link(url.as_str());
                Task::none()
            }
            Message::OpenUrl(url) => {
                self.open_link(&url);
                Task::none()
            }
            Message::DismissToast(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }
            Message::Tick(now) => {
                // Spinner ticks only need the redraw that follows every update
                self.toasts.expire(now);
                Task::none()
            }
        }
    }

    /// Start a scrape or clear unless another request is outstanding
    fn start_action(&mut self, action: Action) -> Task<Message> {
        if !self.view.begin_action(action) {
            return Task::none();
        }

        let client = self.client.clone();
        Task::perform(
            async move {
                match action {
                    Action::Scrape => client.scrape().await,
                    Action::Clear => client.clear().await,
                }
            },
            move |result| Message::ActionComplete(action, result),
        )
    }

    /// Fill one thumbnail slot per gallery image.
    /// Local files resolve immediately; remote images download in the background.
    fn load_thumbnails(&mut self) -> Task<Message> {
        let generation = self.view.generation();
        let mut downloads = Vec::new();

        self.thumbnails = self
            .view
            .images()
            .iter()
            .enumerate()
            .map(|(index, entry)| match &entry.source {
                ImageSource::Local(path) => {
                    if path.is_file() {
                        Thumbnail::Ready(Handle::from_path(path))
                    } else {
                        tracing::warn!(path = %path.display(), "⚠️  local image not found");
                        Thumbnail::Failed
                    }
                }
                ImageSource::Remote(reference) => {
                    let client = self.client.clone();
                    let reference = reference.clone();
                    downloads.push(Task::perform(
                        async move { client.fetch_image(reference).await },
                        move |result| Message::ImageLoaded {
                            generation,
                            index,
                            result,
                        },
                    ));
                    Thumbnail::Loading
                }
            })
            .collect();

        Task::batch(downloads)
    }

    fn open_link(&mut self, url: &str) {
        if !is_web_link(url) {
            tracing::warn!(url, "refusing to open non-web link");
            self.toasts.notify(ToastKind::Failure, OPEN_LINK_FAILED);
            return;
        }

        tracing::debug!(url, "opening link");
        if let Err(err) = open::that_detached(url) {
            tracing::warn!(url, error = %err, "could not open link");
            self.toasts.notify(ToastKind::Failure, OPEN_LINK_FAILED);
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let loading = self.view.is_loading();
        let idle = !loading;

        let search_bar = row![
            text_input("Ask your question...", self.view.query())
                .on_input(Message::QueryChanged)
                .on_submit(Message::Search)
                .padding(8)
                .width(Length::Fill),
            button(if loading { "Processing..." } else { "Search" })
                .on_press_maybe(idle.then_some(Message::Search))
                .padding(8),
        ]
        .spacing(16);

        let actions = row![
            button("Scrape Articles")
                .on_press_maybe(idle.then_some(Message::Scrape))
                .padding(8),
            button("Clear Chat History")
                .on_press_maybe(idle.then_some(Message::Clear))
                .padding(8),
        ]
        .spacing(16);

        let mut content = column![
            text("Multimodal RAG Assistant").size(36),
            search_bar,
            actions,
        ]
        .spacing(16)
        .max_width(800.0);

        if loading {
            content = content.push(ui::spinner::view());
        }

        content = content.push(ui::results::view(
            &self.view,
            &self.answer,
            &self.thumbnails,
            &self.theme(),
        ));

        let page = scrollable(container(content).padding(32).center_x(Length::Fill));

        stack![page, ui::toast::view(&self.toasts)].into()
    }

    /// Keep redrawing while the spinner is up, and sweep toasts while any are shown
    fn subscription(&self) -> Subscription<Message> {
        let spinner = if self.view.is_loading() {
            time::every(SPINNER_FRAME).map(Message::Tick)
        } else {
            Subscription::none()
        };

        let toasts = if self.toasts.is_empty() {
            Subscription::none()
        } else {
            time::every(TOAST_SWEEP).map(Message::Tick)
        };

        Subscription::batch([spinner, toasts])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Install the global tracing subscriber.
/// `RUST_LOG` wins over the configured level.
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> iced::Result {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    init_logging(&config.log_level);

    if let Some(err) = config_error {
        tracing::warn!(error = %err, "⚠️  falling back to default configuration");
    }

    let client = match ApiClient::new(&config.api_base) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(error = %err, "❌ api_base is not a usable URL");
            std::process::exit(2);
        }
    };

    iced::application("Multimodal RAG Assistant", RagAssistant::update, RagAssistant::view)
        .subscription(RagAssistant::subscription)
        .theme(RagAssistant::theme)
        .centered()
        .run_with(move || RagAssistant::new(&config, client))
}
