//! Browser entry point
//!
//! Attaches a [`Background`] to the current page: fields are generated on
//! `load` and regenerated once a burst of `resize` events has been quiet
//! for the default period. Browser timers stand in for the debouncer here.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use stardrift_core::{DEFAULT_QUIET_PERIOD, FieldPreset, seeded_rng};
use stardrift_render::WebPage;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::{Background, fresh_seed};

fn builtin_presets() -> Vec<FieldPreset> {
    vec![
        FieldPreset::flowing_background(),
        FieldPreset::skills_crossing(),
        FieldPreset::card_rails(),
    ]
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let page = WebPage::from_window().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let window = page.window().clone();
    let background = Rc::new(RefCell::new(Background::new(
        page,
        builtin_presets(),
        seeded_rng(fresh_seed()),
    )));

    let on_load = {
        let background = background.clone();
        Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = background.borrow_mut().on_load() {
                log::warn!("Field generation failed: {}", e);
            }
        })
    };
    window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
    on_load.forget();

    let regenerate = {
        let background = background.clone();
        Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = background.borrow_mut().regenerate() {
                log::warn!("Field regeneration failed: {}", e);
            }
        })
    };

    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let on_resize = {
        let window = window.clone();
        Closure::<dyn FnMut()>::new(move || {
            if let Some(handle) = pending.take() {
                window.clear_timeout_with_handle(handle);
            }
            match window.set_timeout_with_callback_and_timeout_and_arguments_0(
                regenerate.as_ref().unchecked_ref(),
                DEFAULT_QUIET_PERIOD.as_millis() as i32,
            ) {
                Ok(handle) => pending.set(Some(handle)),
                Err(e) => log::warn!("Failed to schedule regeneration: {:?}", e),
            }
        })
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    Ok(())
}
