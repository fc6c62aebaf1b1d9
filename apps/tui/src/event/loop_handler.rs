use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tracing::debug;

use crate::app::{handle_input, handle_mouse, App};
use crate::ui;

/// Prints the current page and exits, once the lookup tables have arrived.
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.mount();
    while app.in_flight() > 0 {
        if !app.next_event().await {
            break;
        }
    }

    let page = build_headless_page(app);
    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        render_headless_page(&page);
    }

    Ok(())
}

fn render_headless_page(page: &HeadlessPage) {
    println!("\nOrganizations ({})", page.url);
    println!("=================");
    println!(
        "Page {} of {} | {} matching organizations",
        page.current_page, page.page_count, page.total_matches
    );

    if page.rows.is_empty() {
        println!("\n{}", org_directory_core::directory::state::NO_MATCHES_MESSAGE);
        return;
    }

    println!();
    for row in &page.rows {
        println!(
            "{:>4} | {} | {} | {} | {} | {}",
            row.ranking,
            row.name,
            row.avg_score,
            row.funding_round,
            row.rto_policy,
            row.profile_completeness
        );
    }
}

fn build_headless_page(app: &App) -> HeadlessPage {
    let view = app.directory.view();

    HeadlessPage {
        url: app.location.current().to_string(),
        current_page: view.current_page,
        page_count: view.pages.len(),
        total_matches: view.total_matches,
        rows: view
            .rows
            .into_iter()
            .map(|row| HeadlessRow {
                id: row.id,
                ranking: row.ranking,
                name: row.name,
                link: row.link,
                avg_score: row.avg_score,
                funding_round: row.funding_round,
                rto_policy: row.rto_policy,
                profile_completeness: row.profile_completeness,
            })
            .collect(),
    }
}

#[derive(serde::Serialize)]
struct HeadlessPage {
    url: String,
    current_page: usize,
    page_count: usize,
    total_matches: usize,
    rows: Vec<HeadlessRow>,
}

#[derive(serde::Serialize)]
struct HeadlessRow {
    id: i64,
    ranking: String,
    name: String,
    link: String,
    avg_score: String,
    funding_round: String,
    rto_policy: String,
    profile_completeness: String,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    app.mount();

    loop {
        // Apply finished requests and advance the throbber
        app.update();

        let area: Rect = terminal
            .draw(|f| ui::ui(app, f))
            .map_err(|e| eyre!("Terminal draw error: {e}"))?
            .area;

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                }
                Ok(Event::Mouse(mouse)) => handle_mouse(app, mouse, area),
                Ok(Event::Resize(width, height)) => {
                    debug!("Terminal resized to {width}x{height}");
                }
                Ok(_) | Err(_) => {}
            }
        }

        if !app.running {
            break;
        }

        // Let the spawned requests make progress between frames
        tokio::task::yield_now().await;
    }

    app.shutdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DirectoryApi as _, SqliteApi};
    use crate::app::TerminalLocation;
    use crate::db::{memory_pool, seed_demo_data};
    use org_directory_core::bootstrap::bootstrap;
    use org_directory_core::directory::PageSize;
    use reqwest::Url;
    use std::sync::Arc;

    #[tokio::test]
    async fn headless_page_reflects_the_location_and_lookups() {
        let pool = memory_pool().await;
        seed_demo_data(&pool).await.unwrap();
        let api = Arc::new(SqliteApi::new(pool));

        let payload = api.organization_payload().await.unwrap();
        let organizations = bootstrap(payload.as_deref(), true).unwrap();

        let location = TerminalLocation::new(Url::parse("http://localhost:8000/?page=2").unwrap());
        let mut app = App::new(
            organizations,
            PageSize::try_from_usize(5).unwrap(),
            location,
            api,
        );

        app.mount();
        while app.in_flight() > 0 {
            assert!(app.next_event().await);
        }

        let page = build_headless_page(&app);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.page_count, 2);
        assert_eq!(page.total_matches, 8);
        assert_eq!(page.rows.len(), 3);
        assert!(page.rows.iter().all(|row| !row.funding_round.is_empty()));
        assert_eq!(page.rows[0].ranking, "6");
    }
}
