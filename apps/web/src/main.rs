mod view;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use canon_core::{CountryStore, Dashboard, Filters, DEFAULT_TOP_N, TOP_N_PRESETS};
use ratzilla::event::KeyCode;
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Request, RequestInit, RequestMode, Response};

const DATA_URL: &str = "countries.json";

fn main() -> io::Result<()> {
    let dashboard = Rc::new(RefCell::new(Dashboard::new(
        Filters::default(),
        DEFAULT_TOP_N,
    )));

    spawn_local(fetch_countries(dashboard.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let dashboard = dashboard.clone();
        move |event| {
            let mut dashboard = dashboard.borrow_mut();
            match event.code {
                KeyCode::Left => dashboard.cycle_poll(false),
                KeyCode::Right => dashboard.cycle_poll(true),
                KeyCode::Up => dashboard.cycle_rank(false),
                KeyCode::Down => dashboard.cycle_rank(true),
                KeyCode::Char('t') => {
                    dashboard.reset_to_top_n(DEFAULT_TOP_N);
                }
                KeyCode::Char(c) => {
                    if let Some(n) = preset_for_key(c) {
                        dashboard.reset_to_top_n(n);
                    }
                }
                _ => {}
            }
        }
    });

    terminal.draw_web(move |f| {
        let dashboard = dashboard.borrow();
        view::render(&dashboard, f);
    });

    Ok(())
}

/// Keys `1`-`4` map onto the top-N presets
fn preset_for_key(key: char) -> Option<usize> {
    let index = key.to_digit(10)?.checked_sub(1)?;
    TOP_N_PRESETS.get(usize::try_from(index).ok()?).copied()
}

async fn fetch_countries(dashboard: Rc<RefCell<Dashboard>>) {
    let result = fetch_text(DATA_URL).await.and_then(|body| {
        CountryStore::from_json(&body).map_err(|error| format!("Failed to parse {DATA_URL}: {error}"))
    });

    match result {
        Ok(store) => dashboard.borrow_mut().load_finished(Ok(store)),
        Err(message) => {
            web_sys::console::error_1(&message.clone().into());
            dashboard.borrow_mut().load_failed(message);
        }
    }
}

async fn fetch_text(url: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or_else(|| "No browser window".to_string())?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| format!("Invalid request for {url}"))?;

    let response_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| format!("Failed to fetch {url}"))?;

    let response = response_value
        .dyn_into::<Response>()
        .map_err(|_| "Failed to read response".to_string())?;

    if !response.ok() {
        return Err(format!("Failed to fetch {url}: HTTP {}", response.status()));
    }

    let text_promise = response
        .text()
        .map_err(|_| format!("Failed to read {url} body"))?;
    let body = wasm_bindgen_futures::JsFuture::from(text_promise)
        .await
        .map_err(|_| format!("Failed to read {url} body"))?;

    body.as_string()
        .ok_or_else(|| format!("{url} body is not text"))
}

#[cfg(test)]
mod tests {
    use super::preset_for_key;

    #[test]
    fn number_keys_pick_presets() {
        assert_eq!(preset_for_key('1'), Some(10));
        assert_eq!(preset_for_key('4'), Some(30));
        assert_eq!(preset_for_key('0'), None);
        assert_eq!(preset_for_key('5'), None);
        assert_eq!(preset_for_key('x'), None);
    }
}
