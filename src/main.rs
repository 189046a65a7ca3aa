//! LoL Advent Grid entry point
//!
//! On the web this wires the grid into the page. Natively it is the data
//! preparation tool that turns a list of champion names into the embedded
//! `name -> portrait URL` map.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, Element, File, HtmlInputElement, MouseEvent};

    use lol_advent_grid::catalog;
    use lol_advent_grid::error::ImportError;
    use lol_advent_grid::grid::{AdventGrid, CardView};
    use lol_advent_grid::persistence::LocalStore;
    use lol_advent_grid::platform::dom::{self, CardAction};
    use lol_advent_grid::{GridConfig, RandomSource};

    /// Page-wide state shared by the event handlers
    struct App {
        grid: AdventGrid<LocalStore>,
        document: Document,
        grid_el: Option<Element>,
    }

    impl App {
        fn draw(&self, cards: &[CardView]) {
            let Some(grid_el) = &self.grid_el else {
                return;
            };
            match dom::render_grid(&self.document, grid_el, cards) {
                Ok(()) => log::debug!("Rendered {} cards", cards.len()),
                Err(e) => log::error!("Render failed: {:?}", e),
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("LoL Advent Grid starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let config = GridConfig::load(&document);
        let entries = catalog::load_embedded(&document, &config.data_id).unwrap_or_else(|e| {
            log::error!("{}", e);
            Vec::new()
        });

        let grid_el = document.get_element_by_id(&config.grid_id);
        if grid_el.is_none() {
            log::error!("No #{} element, nothing to render into", config.grid_id);
        }

        let mut grid = AdventGrid::new(entries, LocalStore, config, RandomSource::new());
        let cards = grid.load();

        let app = Rc::new(RefCell::new(App {
            grid,
            document,
            grid_el,
        }));
        app.borrow().draw(&cards);

        setup_card_clicks(app.clone());
        setup_shuffle_button(app.clone());
        setup_reset_button(app.clone());
        setup_export_button(app.clone());
        setup_import_input(app);

        log::info!("LoL Advent Grid ready ({} cards)", cards.len());
    }

    fn control(app: &Rc<RefCell<App>>, id: &str) -> Option<Element> {
        let el = app.borrow().document.get_element_by_id(id);
        if el.is_none() {
            log::warn!("No #{} control on page", id);
        }
        el
    }

    /// One delegated listener handles every door and retire button
    fn setup_card_clicks(app: Rc<RefCell<App>>) {
        let Some(grid_el) = app.borrow().grid_el.clone() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Some((action, index, card)) = dom::resolve_click(&target) else {
                return;
            };

            match action {
                CardAction::Toggle => match dom::toggle_door(&card) {
                    Ok(open) => app.borrow().grid.set_open(index, open),
                    Err(e) => log::warn!("Door toggle failed: {:?}", e),
                },
                CardAction::Retire => {
                    event.stop_propagation();
                    let mut a = app.borrow_mut();
                    let cards = a.grid.toggle_retired(index);
                    a.draw(&cards);
                }
            }
        });
        let _ = grid_el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_shuffle_button(app: Rc<RefCell<App>>) {
        let id = app.borrow().grid.config().shuffle_id.clone();
        if let Some(btn) = control(&app, &id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                let cards = a.grid.shuffle();
                a.draw(&cards);
                log::info!("Shuffled");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_reset_button(app: Rc<RefCell<App>>) {
        let id = app.borrow().grid.config().reset_id.clone();
        if let Some(btn) = control(&app, &id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                let cards = a.grid.reset();
                a.draw(&cards);
                log::info!("Grid reset");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_export_button(app: Rc<RefCell<App>>) {
        let id = app.borrow().grid.config().export_id.clone();
        if let Some(btn) = control(&app, &id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let a = app.borrow();
                let json = match a.grid.export_json() {
                    Ok(json) => json,
                    Err(e) => {
                        log::error!("Export failed: {}", e);
                        return;
                    }
                };
                let file_name = &a.grid.config().export_file_name;
                match dom::download_json(&a.document, file_name, &json) {
                    Ok(()) => log::info!("Exported state to {}", file_name),
                    Err(e) => log::error!("Download failed: {:?}", e),
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    async fn read_file_text(file: &File) -> Result<String, ImportError> {
        JsFuture::from(file.text())
            .await
            .map_err(|e| ImportError::Read(format!("{:?}", e)))?
            .as_string()
            .ok_or_else(|| ImportError::Read("file is not text".to_string()))
    }

    async fn import_file(app: &Rc<RefCell<App>>, file: &File) -> Result<(), ImportError> {
        // No borrow is held across the await
        let text = read_file_text(file).await?;
        let mut a = app.borrow_mut();
        let cards = a.grid.import_json(&text)?;
        a.draw(&cards);
        Ok(())
    }

    fn setup_import_input(app: Rc<RefCell<App>>) {
        let id = app.borrow().grid.config().import_id.clone();
        if let Some(input) = control(&app, &id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let Some(input) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                let Some(file) = input.files().and_then(|files| files.get(0)) else {
                    return;
                };

                let app = app.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match import_file(&app, &file).await {
                        Ok(()) => log::info!("Imported {}", file.name()),
                        Err(e) => {
                            log::warn!("Import of {} failed: {}", file.name(), e);
                            if let Some(window) = web_sys::window() {
                                let _ = window.alert_with_message(e.alert_message());
                            }
                        }
                    }
                    input.set_value("");
                });
            });
            let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();

    let cli = portrait_tool::Cli::parse();
    let count = portrait_tool::run(&cli.input, cli.output.as_deref())?;
    log::info!("Wrote {} champion portraits", count);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Champion name list -> embedded portrait map
#[cfg(not(target_arch = "wasm32"))]
mod portrait_tool {
    use std::fs;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use clap::Parser;

    use lol_advent_grid::catalog::portrait_map;

    #[derive(Parser, Debug)]
    #[command(name = "lol-advent-grid")]
    #[command(about = "Build the embedded champion -> portrait URL map from a list of names")]
    pub struct Cli {
        /// JSON array of champion names
        pub input: PathBuf,

        /// Where to write the map (stdout when omitted)
        pub output: Option<PathBuf>,
    }

    pub fn run(input: &Path, output: Option<&Path>) -> Result<usize> {
        let raw = fs::read_to_string(input)
            .with_context(|| format!("reading {}", input.display()))?;
        let names: Vec<String> = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a JSON array of names", input.display()))?;
        log::info!("Read {} champion names from {}", names.len(), input.display());

        let map = portrait_map(&names);
        let json = serde_json::to_string_pretty(&map)?;
        match output {
            Some(path) => fs::write(path, json + "\n")
                .with_context(|| format!("writing {}", path.display()))?,
            None => println!("{}", json),
        }
        Ok(map.len())
    }

}
