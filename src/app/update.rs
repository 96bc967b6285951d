use ratatui::widgets::TableState;

use crate::services::{filter_prs, search_prs};

use super::message::{Command, FetchUpdate, Message};
use super::model::App;

/// Update the application state based on a message.
/// Returns an optional command to be executed by the main loop.
pub fn update(app: &mut App, msg: Message) -> Option<Command> {
    match msg {
        // Navigation
        Message::NextItem => {
            next_item(app);
            None
        }
        Message::PreviousItem => {
            previous_item(app);
            None
        }
        Message::GoToTop => {
            if !app.filtered_indices.is_empty() {
                app.table_state.select(Some(0));
            }
            None
        }
        Message::GoToBottom => {
            if !app.filtered_indices.is_empty() {
                app.table_state.select(Some(app.filtered_indices.len() - 1));
            }
            None
        }

        // Actions
        Message::OpenSelected => {
            open_selected(app);
            None
        }
        Message::Refresh => Some(Command::StartFetch),

        // Search
        Message::EnterSearchMode => {
            app.search_mode = true;
            None
        }
        Message::ExitSearchMode { clear } => {
            exit_search_mode(app, clear);
            None
        }
        Message::SearchInput(c) => {
            search_push_char(app, c);
            None
        }
        Message::SearchBackspace => {
            search_pop_char(app);
            None
        }

        // Popups
        Message::ToggleHelp => {
            app.show_help_popup = !app.show_help_popup;
            None
        }
        Message::DismissHelp => {
            app.show_help_popup = false;
            None
        }
        Message::DismissError => {
            app.show_error_popup = false;
            None
        }

        // Excluded authors
        Message::OpenExcludedPopup => {
            open_excluded_popup(app);
            None
        }
        Message::CloseExcludedPopup => {
            app.show_excluded_popup = false;
            None
        }
        Message::OpenAddAuthorPopup => {
            app.show_add_author_popup = true;
            app.author_input.clear();
            None
        }
        Message::CloseAddAuthorPopup => {
            app.show_add_author_popup = false;
            app.author_input.clear();
            None
        }
        Message::AuthorInput(c) => {
            app.author_input.push(c);
            None
        }
        Message::AuthorBackspace => {
            app.author_input.pop();
            None
        }
        Message::AddAuthor => {
            add_author(app);
            None
        }
        Message::RemoveSelectedAuthor => {
            remove_selected_author(app);
            None
        }
        Message::ExcludedNext => {
            excluded_next(app);
            None
        }
        Message::ExcludedPrevious => {
            excluded_previous(app);
            None
        }

        // Async results
        Message::FetchProgress(progress) => {
            handle_fetch_update(app, progress);
            None
        }

        // System
        Message::Tick => {
            if app.loading {
                app.update_spinner();
            }
            None
        }
        Message::Quit => Some(Command::Quit),
    }
}

// Helper functions

fn next_item(app: &mut App) {
    if app.filtered_indices.is_empty() {
        return;
    }
    let i = match app.table_state.selected() {
        Some(i) => {
            if i >= app.filtered_indices.len() - 1 {
                i
            } else {
                i + 1
            }
        }
        None => 0,
    };
    app.table_state.select(Some(i));
}

fn previous_item(app: &mut App) {
    if app.filtered_indices.is_empty() {
        return;
    }
    let i = match app.table_state.selected() {
        Some(i) => {
            if i == 0 {
                0
            } else {
                i - 1
            }
        }
        None => 0,
    };
    app.table_state.select(Some(i));
}

/// Recompute the visible index set from scratch. Called after every
/// mutation of the accumulated list, the excluded set, or the search
/// query; the derived set is never patched in place.
fn update_filtered_indices(app: &mut App) {
    let retained = filter_prs(&app.prs, &app.excluded);
    app.filtered_indices = if app.search_query.is_empty() {
        retained
    } else {
        search_prs(&app.prs, &retained, &app.search_query)
    };
    if let Some(sel) = app.table_state.selected() {
        if sel >= app.filtered_indices.len() {
            app.table_state = TableState::default();
        }
    }
    if app.table_state.selected().is_none() && !app.filtered_indices.is_empty() {
        app.table_state.select(Some(0));
    }
}

fn open_selected(app: &App) {
    if let Some(pr) = app.selected_pr() {
        let _ = open::that(&pr.html_url);
    }
}

fn exit_search_mode(app: &mut App, clear_query: bool) {
    app.search_mode = false;
    if clear_query {
        app.search_query.clear();
        app.table_state = TableState::default();
        update_filtered_indices(app);
    }
}

fn search_push_char(app: &mut App, c: char) {
    app.search_query.push(c);
    app.table_state = TableState::default();
    update_filtered_indices(app);
}

fn search_pop_char(app: &mut App) {
    app.search_query.pop();
    app.table_state = TableState::default();
    update_filtered_indices(app);
}

fn open_excluded_popup(app: &mut App) {
    app.show_excluded_popup = true;
    app.excluded_list_state = TableState::default();
    if !app.excluded.is_empty() {
        app.excluded_list_state.select(Some(0));
    }
}

/// Add the typed login to the excluded set. Trimming and duplicate
/// rejection live in `ExcludedAuthors::add`; an empty input keeps the
/// popup open, anything else closes it whether or not the set changed.
fn add_author(app: &mut App) {
    if app.author_input.trim().is_empty() {
        return;
    }

    let changed = {
        let input = app.author_input.clone();
        app.excluded.add(&input)
    };
    app.show_add_author_popup = false;
    app.author_input.clear();

    if changed {
        update_filtered_indices(app);
        if app.excluded_list_state.selected().is_none() {
            app.excluded_list_state.select(Some(0));
        }
    }
}

fn remove_selected_author(app: &mut App) {
    let Some(selected) = app.excluded_list_state.selected() else {
        return;
    };
    let Some(login) = app.excluded.get(selected).map(str::to_string) else {
        return;
    };

    if app.excluded.remove(&login) {
        // Adjust selection
        if app.excluded.is_empty() {
            app.excluded_list_state.select(None);
        } else if selected >= app.excluded.len() {
            app.excluded_list_state.select(Some(app.excluded.len() - 1));
        }
        update_filtered_indices(app);
    }
}

fn excluded_next(app: &mut App) {
    if app.excluded.is_empty() {
        return;
    }
    let i = match app.excluded_list_state.selected() {
        Some(i) => {
            if i >= app.excluded.len() - 1 {
                i
            } else {
                i + 1
            }
        }
        None => 0,
    };
    app.excluded_list_state.select(Some(i));
}

fn excluded_previous(app: &mut App) {
    if app.excluded.is_empty() {
        return;
    }
    let i = match app.excluded_list_state.selected() {
        Some(i) => {
            if i == 0 {
                0
            } else {
                i - 1
            }
        }
        None => 0,
    };
    app.excluded_list_state.select(Some(i));
}

fn handle_fetch_update(app: &mut App, progress: FetchUpdate) {
    match progress {
        FetchUpdate::Page { generation, prs } => {
            if generation != app.current_generation() {
                return;
            }
            app.prs.extend(prs);
            update_filtered_indices(app);
        }
        FetchUpdate::Done { generation } => {
            if generation != app.current_generation() {
                return;
            }
            app.loading = false;
        }
        FetchUpdate::Failed { generation, error } => {
            if generation != app.current_generation() {
                return;
            }
            // Pages fetched before the failure stay visible behind the
            // error popup; retry restarts from page 1.
            app.loading = false;
            app.error = Some(error);
            app.show_error_popup = true;
        }
    }
}
