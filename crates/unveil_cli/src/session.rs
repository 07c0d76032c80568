//! Simulated scroll session
//!
//! Drives the reveal lifecycle, lazy loader, and enhancement controllers
//! with a synthetic clock and a viewport that scrolls down the page in
//! fixed steps, reporting what fired along the way.

use crate::page::PageFile;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;
use unveil_core::{Document, ElementId, EnvCapabilities, Viewport};
use unveil_enhance::HeaderScrollState;
use unveil_reveal::{LazyLoader, ScrollReveal, REVEALED_CLASS};

/// Tuning for a session run.
pub struct SessionOptions {
    pub caps: EnvCapabilities,
    /// Scroll distance per tick.
    pub scroll_step: f32,
    /// Simulated time per tick.
    pub tick: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            caps: EnvCapabilities::default(),
            scroll_step: 120.0,
            tick: Duration::from_millis(50),
        }
    }
}

/// What a session observed.
#[derive(Debug, Default)]
pub struct SessionSummary {
    pub candidates: usize,
    pub revealed: usize,
    pub lazy_loaded: usize,
    pub ticks: usize,
}

/// Run one full top-to-bottom scroll pass over the page.
pub fn run(page: &PageFile, opts: &SessionOptions) -> SessionSummary {
    let (mut doc, names) = page.build_document();
    let name_of: FxHashMap<ElementId, String> = names.iter().cloned().map(|(n, id)| (id, n)).collect();

    let candidates = unveil_reveal::scan(&doc);
    info!(candidates = candidates.len(), "page scanned");

    let mut reveal = ScrollReveal::new(opts.caps);
    let notifications = Arc::new(AtomicUsize::new(0));
    let sink = notifications.clone();
    let labels = name_of.clone();
    reveal.subscribe_all(move |event| {
        sink.fetch_add(1, Ordering::SeqCst);
        let name = labels
            .get(&event.element)
            .map(String::as_str)
            .unwrap_or("<unnamed>");
        info!(
            name,
            ratio = event.entry.intersection_ratio,
            "revealed"
        );
    });

    let mut lazy = LazyLoader::new(opts.caps);
    lazy.start(&mut doc);

    let navbar = names
        .iter()
        .find(|(name, _)| name == "navbar")
        .map(|&(_, id)| id);
    let mut header = navbar.and_then(|id| HeaderScrollState::new(&doc, id));

    let t0 = Instant::now();
    // Content-loaded signal: the actual scan runs after the quiet period.
    reveal.notify_content_loaded(t0);

    let max_scroll = page.max_scroll();
    let mut summary = SessionSummary {
        candidates: candidates.len(),
        ..Default::default()
    };
    let mut scroll_y = 0.0_f32;
    loop {
        summary.ticks += 1;
        let now = t0 + opts.tick * summary.ticks as u32;
        let viewport = Viewport::new(scroll_y, page.viewport_height);

        summary.revealed += reveal.poll(now, &mut doc, viewport);
        summary.lazy_loaded += lazy.poll(&mut doc, viewport);
        if let Some(header) = header.as_mut() {
            header.notify_scrolled(now, scroll_y);
            header.poll(now + Duration::from_millis(10), &mut doc);
        }

        if scroll_y >= max_scroll {
            break;
        }
        scroll_y = (scroll_y + opts.scroll_step).min(max_scroll);
    }

    let still_hidden = candidates
        .iter()
        .filter(|&&id| {
            doc.get(id)
                .is_some_and(|el| !el.classes().contains(REVEALED_CLASS))
        })
        .count();
    info!(
        revealed = summary.revealed,
        lazy_loaded = summary.lazy_loaded,
        still_hidden,
        ticks = summary.ticks,
        "session finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_scroll_reveals_demo_page() {
        let page = PageFile::demo();
        let summary = run(&page, &SessionOptions::default());

        assert_eq!(summary.revealed, summary.candidates);
        assert_eq!(summary.lazy_loaded, 1);
        assert!(summary.ticks > 1);
    }

    #[test]
    fn test_fallback_session_reveals_without_watcher() {
        let page = PageFile::demo();
        let opts = SessionOptions {
            caps: EnvCapabilities::without_intersection_observer(),
            ..Default::default()
        };
        let summary = run(&page, &opts);

        // Fallback marks candidates synchronously inside start(), so the
        // per-poll reveal count stays zero while nothing is left hidden.
        assert_eq!(summary.revealed, 0);
        assert_eq!(summary.lazy_loaded, 0);
    }
}
