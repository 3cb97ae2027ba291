//! Browser stopwatch widget.
//!
//! Loading the wasm module mounts the widget on the first
//! `[data-stopwatch]` element of the page; pages with a different layout
//! call `mountAt(selector)` instead.

pub mod config;
pub mod error;
pub mod keys;
pub mod pump;
pub mod stopwatch;
pub mod ui;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlButtonElement, HtmlElement, KeyboardEvent};

use crate::config::{Config, ROOT_SELECTOR};
use crate::error::UiError;
use crate::keys::{is_text_entry, Shortcut};
use crate::pump::{now_ms, FramePump};
use crate::stopwatch::{Op, StopwatchState};
use crate::ui::DomView;

pub struct StopwatchApp {
    pub stopwatch: StopwatchState,
    view: DomView,
    pump: FramePump,
    shortcuts: bool,
}

impl StopwatchApp {
    fn new(view: DomView, config: &Config, this: &Weak<RefCell<StopwatchApp>>) -> Self {
        let this = this.clone();
        let pump = FramePump::new(move |stamp| {
            let app = match this.upgrade() {
                Some(app) => app,
                None => return false,
            };
            let again = match app.try_borrow() {
                Ok(app) => app.tick(stamp),
                // mid-dispatch; try again next frame
                Err(_) => true,
            };
            again
        });
        Self {
            stopwatch: StopwatchState::new(),
            view,
            pump,
            shortcuts: config.shortcuts,
        }
    }

    /// One refresh frame. Returns whether another frame is wanted.
    fn tick(&self, now: u64) -> bool {
        self.view.draw_time(self.stopwatch.elapsed_ms(now));
        self.stopwatch.timer.is_running()
    }

    fn redraw(&self, now: u64) {
        self.view.draw_time(self.stopwatch.elapsed_ms(now));
        self.view.draw_controls(&self.stopwatch.controls());
    }

    pub fn dispatch(&mut self, op: Op) {
        let now = now_ms();
        let changed = match op {
            Op::Start | Op::Resume => {
                let changed = if op == Op::Start {
                    self.stopwatch.start(now)
                } else {
                    self.stopwatch.resume(now)
                };
                if changed {
                    self.pump.start();
                }
                changed
            }
            Op::Pause => {
                let changed = self.stopwatch.pause(now);
                if changed {
                    self.pump.stop();
                }
                changed
            }
            Op::Reset => {
                self.pump.stop();
                self.stopwatch.reset()
            }
            Op::Lap => match self.stopwatch.record_lap(now) {
                Some(lap) => {
                    if let Err(e) = self.view.draw_lap(&lap) {
                        log::error!("couldn't draw lap #{}: {}", lap.index, e);
                    }
                    true
                }
                None => false,
            },
            Op::ClearLaps => {
                self.view.clear_laps();
                self.stopwatch.clear_laps()
            }
        };

        if changed {
            log::debug!("{:?} -> {}", op, self.stopwatch.phase().label());
            self.redraw(now);
        }
    }

    fn handle_key(&mut self, event: &KeyboardEvent) {
        if !self.shortcuts {
            return;
        }
        if let Some(target) = event.target().and_then(|t| t.dyn_into::<HtmlElement>().ok()) {
            if is_text_entry(&target.tag_name(), target.is_content_editable()) {
                return;
            }
        }
        let shortcut = match Shortcut::from_event(&event.code(), &event.key()) {
            Some(s) => s,
            None => return,
        };
        if shortcut == Shortcut::Toggle {
            event.prevent_default();
        }
        if let Some(op) = shortcut.op(self.stopwatch.phase()) {
            self.dispatch(op);
        }
    }
}

fn on_click(button: &HtmlButtonElement, app: &Rc<RefCell<StopwatchApp>>, op: Op) -> Result<(), UiError> {
    let app = Rc::clone(app);
    let closure = Closure::wrap(Box::new(move || match app.try_borrow_mut() {
        Ok(mut app) => app.dispatch(op),
        Err(_) => log::warn!("dropped {:?}: stopwatch busy", op),
    }) as Box<dyn FnMut()>);
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    // listeners live as long as the page
    closure.forget();
    Ok(())
}

fn on_keydown(app: &Rc<RefCell<StopwatchApp>>) -> Result<(), UiError> {
    let window = web_sys::window().ok_or(UiError::NoWindow)?;
    let app = Rc::clone(app);
    let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| match app.try_borrow_mut() {
        Ok(mut app) => app.handle_key(&event),
        Err(_) => log::warn!("dropped key {}: stopwatch busy", event.key()),
    }) as Box<dyn FnMut(KeyboardEvent)>);
    window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn init_logging(config: &Config) {
    console_error_panic_hook::set_once();
    // a second mount on the same page keeps the first logger
    console_log::init_with_level(config.log_level).ok();
}

/// Binds the widget to `root` and wires its buttons and shortcuts.
pub fn mount(root: &Element, config: Config) -> Result<Rc<RefCell<StopwatchApp>>, UiError> {
    init_logging(&config);

    let view = DomView::bind(root, &config.selectors)?;
    let app = Rc::new_cyclic(|this| RefCell::new(StopwatchApp::new(view, &config, this)));

    {
        let a = app.borrow();
        let b = &a.view.buttons;
        on_click(&b.start, &app, Op::Start)?;
        on_click(&b.pause, &app, Op::Pause)?;
        on_click(&b.resume, &app, Op::Resume)?;
        on_click(&b.reset, &app, Op::Reset)?;
        on_click(&b.lap, &app, Op::Lap)?;
        on_click(&b.clear_laps, &app, Op::ClearLaps)?;
    }
    if config.shortcuts {
        on_keydown(&app)?;
    }

    app.borrow().redraw(now_ms());
    log::info!("stopwatch mounted (shortcuts {})", if config.shortcuts { "on" } else { "off" });
    Ok(app)
}

fn mount_selector(selector: &str) -> Result<bool, UiError> {
    let document = ui::document()?;
    let root = match document.query_selector(selector)? {
        Some(root) => root,
        None => return Ok(false),
    };
    let (config, rejected) = Config::from_root(&root);
    mount(&root, config)?;
    for value in rejected {
        log::warn!("ignoring {}", value);
    }
    Ok(true)
}

/// Mounts the widget on the element matching `selector`.
#[wasm_bindgen(js_name = mountAt)]
pub fn mount_at(selector: &str) -> Result<(), JsValue> {
    if mount_selector(selector)? {
        Ok(())
    } else {
        Err(UiError::MissingElement(selector.to_string()).into())
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    mount_selector(ROOT_SELECTOR)?;
    Ok(())
}
