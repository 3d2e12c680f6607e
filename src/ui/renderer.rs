//! Plain-text gallery renderer for the terminal client.
//!
//! Renders a [`GalleryView`] as a numbered list followed by a status line.
//! Only entries from `from` onward are printed, so the interactive client can
//! append a freshly loaded page without repeating the ones already on screen.

use crate::app::FetchStatus;
use crate::ui::viewmodel::GalleryView;
use std::io::{self, Write};

/// Renders gallery entries starting at index `from`, then the status line.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn render(view: &GalleryView<'_>, from: usize, out: &mut impl Write) -> io::Result<()> {
    for (index, image) in view.results.iter().enumerate().skip(from) {
        writeln!(out, "{:>4}. [{}] {}", index + 1, image.id, image.tags)?;
        writeln!(out, "      {}", image.thumbnail_url)?;
    }

    writeln!(out, "{}", status_line(view))
}

/// One-line summary of what the user can do next.
#[must_use]
pub fn status_line(view: &GalleryView<'_>) -> String {
    if view.query.is_empty() {
        return "Type a search query to begin.".to_string();
    }

    match view.status {
        FetchStatus::Idle => format!("Searching for \"{}\"...", view.query),
        FetchStatus::Pending => "Loading...".to_string(),
        FetchStatus::Resolved if view.show_load_more => {
            format!("{} images. /more to load more.", view.results.len())
        }
        FetchStatus::Resolved => format!("{} images. End of results.", view.results.len()),
        // Content on screen masks the failure; only an empty gallery shows it.
        FetchStatus::Rejected if !view.results.is_empty() => {
            format!("{} images. End of results.", view.results.len())
        }
        FetchStatus::Rejected => format!(
            "Search failed: {}",
            view.error.unwrap_or("unknown error")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{NewQuery, SessionState};
    use crate::domain::GalleryImage;

    fn image(id: &str) -> GalleryImage {
        GalleryImage {
            id: id.to_string(),
            thumbnail_url: format!("https://cdn.example/{id}.jpg"),
            tags: "tree, forest".to_string(),
        }
    }

    #[test]
    fn renders_only_new_entries() {
        let mut state = SessionState::default();
        state.start_new_query(&NewQuery::text("trees"));
        state.resolve(vec![image("1"), image("2")]);

        let mut out = Vec::new();
        render(&state.view(), 1, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(!text.contains("[1]"));
        assert!(text.contains("   2. [2] tree, forest"));
        assert!(text.ends_with("2 images. /more to load more.\n"));
    }

    #[test]
    fn empty_gallery_shows_error() {
        let mut state = SessionState::default();
        state.start_new_query(&NewQuery::text("trees"));
        state.reject("HTTP error: status 400");
        assert_eq!(status_line(&state.view()), "Search failed: HTTP error: status 400");
    }

    #[test]
    fn failure_with_content_reads_as_end() {
        let mut state = SessionState::default();
        state.start_new_query(&NewQuery::text("trees"));
        state.resolve(vec![image("1")]);
        state.reject("HTTP error: status 500");
        assert_eq!(status_line(&state.view()), "1 images. End of results.");
    }

    #[test]
    fn idle_session_prompts_for_query() {
        let state = SessionState::default();
        assert_eq!(status_line(&state.view()), "Type a search query to begin.");
    }
}
