use crate::data::PullRequest;

/// Progress reported by the background fetch worker. Every variant carries
/// the generation of the fetch it belongs to; updates from a superseded
/// fetch are dropped on arrival.
pub enum FetchUpdate {
    /// One page of results, sent as soon as the page is parsed.
    Page {
        generation: u64,
        prs: Vec<PullRequest>,
    },
    /// Pagination finished (empty page or page cap).
    Done { generation: u64 },
    /// The fetch aborted; already-delivered pages stay resident.
    Failed { generation: u64, error: String },
}

/// Command to be executed by the main loop.
pub enum Command {
    Quit,
    StartFetch,
}

/// All possible messages/events in the application
pub enum Message {
    // Navigation
    NextItem,
    PreviousItem,
    GoToTop,
    GoToBottom,

    // Actions
    OpenSelected,
    Refresh,

    // Search
    EnterSearchMode,
    ExitSearchMode { clear: bool },
    SearchInput(char),
    SearchBackspace,

    // Popups
    ToggleHelp,
    DismissHelp,
    DismissError,

    // Excluded authors
    OpenExcludedPopup,
    CloseExcludedPopup,
    OpenAddAuthorPopup,
    CloseAddAuthorPopup,
    AuthorInput(char),
    AuthorBackspace,
    AddAuthor,
    RemoveSelectedAuthor,
    ExcludedNext,
    ExcludedPrevious,

    // Async results
    FetchProgress(FetchUpdate),

    // System
    Tick,
    Quit,
}
