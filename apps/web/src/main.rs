mod animation;
mod app;
mod browser;
mod logging;
mod render;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use app::{Input, WebApp};
use browser::{WebFocus, WebLocation};
use org_directory_core::bootstrap::bootstrap;
use org_directory_core::{Endpoint, LocationController, PageSize};
use ratzilla::event::KeyCode;
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use tracing::{debug, info};
use wasm_bindgen_futures::spawn_local;

type SharedApp = Rc<RefCell<WebApp<WebLocation, WebFocus>>>;

/// Performs `endpoint` in the background and feeds the result back in,
/// following up with whatever request that result triggers.
fn dispatch(app: &SharedApp, endpoint: Endpoint) {
    let app = Rc::clone(app);
    spawn_local(async move {
        let fetched = browser::perform(endpoint).await;
        let follow_up = app.borrow_mut().apply(fetched);
        if let Some(next) = follow_up {
            dispatch(&app, next);
        }
    });
}

const fn input_from(code: &KeyCode) -> Input {
    match code {
        KeyCode::Char(ch) => Input::Char(*ch),
        KeyCode::Backspace => Input::Backspace,
        KeyCode::Enter => Input::Enter,
        KeyCode::Esc => Input::Escape,
        KeyCode::Left => Input::Left,
        KeyCode::Right => Input::Right,
        KeyCode::Up => Input::Up,
        KeyCode::Down => Input::Down,
        _ => Input::Other,
    }
}

fn main() -> io::Result<()> {
    let location = WebLocation;
    logging::init(location.query_param("debug").is_some());

    let (payload, container_present) = browser::embedded_payload();
    let Some(organizations) = bootstrap(payload.as_deref(), container_present) else {
        info!("No organization list on this page");
        return Ok(());
    };
    info!(count = organizations.len(), "Mounting organization directory");

    let app: SharedApp = Rc::new(RefCell::new(WebApp::new(
        organizations,
        PageSize::default(),
        location,
        WebFocus::default(),
    )));
    let requests = app.borrow().mount();
    for endpoint in requests {
        dispatch(&app, endpoint);
    }

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let app = Rc::clone(&app);
        move |event| {
            let input = input_from(&event.code);
            debug!(?input, "key");
            let request = app.borrow_mut().handle_input(input);
            if let Some(endpoint) = request {
                dispatch(&app, endpoint);
            }
        }
    });

    terminal.draw_web(move |f| {
        let mut app = app.borrow_mut();
        app.tick(js_sys::Date::now() / 1000.0);
        render::render(&app, f);
    });

    Ok(())
}
