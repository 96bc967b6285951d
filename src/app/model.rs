use anyhow::Result;
use ratatui::widgets::TableState;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::data::{ExcludedAuthors, PullRequest, SPINNER_FRAMES};
use crate::services::{
    create_client, fetch_open_prs, github_token, FetchParams, Settings, GITHUB_API_BASE,
};

use super::message::FetchUpdate;

/// A single fetch handed to the worker thread.
struct FetchRequest {
    generation: u64,
    params: FetchParams,
}

pub struct App {
    // Data state
    pub prs: Vec<PullRequest>,
    pub excluded: ExcludedAuthors,
    pub filtered_indices: Vec<usize>,
    pub table_state: TableState,

    // Search state
    pub search_mode: bool,
    pub search_query: String,

    // Loading state
    pub loading: bool,

    // Popup state
    pub show_help_popup: bool,
    pub show_error_popup: bool,
    pub show_excluded_popup: bool,
    pub show_add_author_popup: bool,

    // Error state
    pub error: Option<String>,

    // Excluded-author editor state
    pub author_input: String,
    pub excluded_list_state: TableState,

    // Repository info
    pub repo_owner: String,
    pub repo_name: String,

    // Fetch parameters
    per_page: u8,
    max_pages: u32,
    generation: u64,

    // Async communication
    fetch_tx: Sender<FetchRequest>,
    result_rx: Receiver<FetchUpdate>,

    // Spinner state
    pub spinner_idx: usize,
    pub last_spinner_update: Instant,
}

impl App {
    pub fn new(owner: String, repo: String, settings: &Settings) -> Result<Self> {
        let (fetch_tx, fetch_rx) = mpsc::channel::<FetchRequest>();
        let (result_tx, result_rx) = mpsc::channel::<FetchUpdate>();

        let client = create_client(github_token().as_deref())?;
        let api_base = settings
            .api_url
            .clone()
            .unwrap_or_else(|| GITHUB_API_BASE.to_string());

        // Spawn background thread for fetching. Pages go out through the
        // channel as they land, so the UI shows page 1 while page 2 is
        // still in flight.
        thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            while let Ok(request) = fetch_rx.recv() {
                let generation = request.generation;
                let page_tx = result_tx.clone();
                let result = rt.block_on(fetch_open_prs(
                    &client,
                    &api_base,
                    &request.params,
                    |page| {
                        let _ = page_tx.send(FetchUpdate::Page {
                            generation,
                            prs: page.to_vec(),
                        });
                    },
                ));
                let msg = match result {
                    Ok(_) => FetchUpdate::Done { generation },
                    Err(e) => FetchUpdate::Failed {
                        generation,
                        error: e.to_string(),
                    },
                };
                if result_tx.send(msg).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            prs: Vec::new(),
            excluded: ExcludedAuthors::from_logins(&settings.excluded_authors),
            filtered_indices: Vec::new(),
            table_state: TableState::default(),
            search_mode: false,
            search_query: String::new(),
            loading: false,
            show_help_popup: false,
            show_error_popup: false,
            show_excluded_popup: false,
            show_add_author_popup: false,
            error: None,
            author_input: String::new(),
            excluded_list_state: TableState::default(),
            repo_owner: owner,
            repo_name: repo,
            per_page: settings.page_size,
            max_pages: settings.max_pages,
            generation: 0,
            fetch_tx,
            result_rx,
            spinner_idx: 0,
            last_spinner_update: Instant::now(),
        })
    }

    // Getters

    pub fn visible_prs(&self) -> Vec<&PullRequest> {
        self.filtered_indices
            .iter()
            .filter_map(|&idx| self.prs.get(idx))
            .collect()
    }

    pub fn selected_pr(&self) -> Option<&PullRequest> {
        self.table_state
            .selected()
            .and_then(|sel| self.filtered_indices.get(sel))
            .and_then(|&idx| self.prs.get(idx))
    }

    /// How many fetched PRs the exclusion list currently hides.
    pub fn hidden_count(&self) -> usize {
        self.prs
            .iter()
            .filter(|pr| self.excluded.contains(&pr.author.login))
            .count()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_idx]
    }

    // Spinner update

    pub fn update_spinner(&mut self) {
        if self.last_spinner_update.elapsed() >= Duration::from_millis(80) {
            self.spinner_idx = (self.spinner_idx + 1) % SPINNER_FRAMES.len();
            self.last_spinner_update = Instant::now();
        }
    }

    // Fetch management

    /// Begin a fresh fetch from page 1. Any fetch already in flight is
    /// superseded: the generation bump makes its remaining updates stale.
    /// Previously accumulated data is discarded.
    pub fn start_fetch(&mut self) {
        self.generation += 1;
        self.prs.clear();
        self.filtered_indices.clear();
        self.table_state = TableState::default();
        self.loading = true;
        self.error = None;
        self.show_error_popup = false;
        let _ = self.fetch_tx.send(FetchRequest {
            generation: self.generation,
            params: FetchParams {
                owner: self.repo_owner.clone(),
                repo: self.repo_name.clone(),
                per_page: self.per_page,
                max_pages: self.max_pages,
            },
        });
    }

    pub fn check_fetch_update(&mut self) -> Option<FetchUpdate> {
        self.result_rx.try_recv().ok()
    }
}
