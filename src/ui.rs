use wasm_bindgen::JsCast;
use web_sys::{Document, DocumentFragment, Element, HtmlButtonElement, HtmlElement, HtmlTemplateElement};

use timer_core::{format_lap_diff, format_lap_time, split_clock, Lap};

use crate::config::Selectors;
use crate::error::UiError;
use crate::stopwatch::Controls;

pub fn document() -> Result<Document, UiError> {
    web_sys::window()
        .ok_or(UiError::NoWindow)?
        .document()
        .ok_or(UiError::NoDocument)
}

fn find(root: &Element, selector: &str) -> Result<Element, UiError> {
    root.query_selector(selector)?
        .ok_or_else(|| UiError::MissingElement(selector.to_string()))
}

fn find_as<T: JsCast>(root: &Element, selector: &str, expected: &'static str) -> Result<T, UiError> {
    find(root, selector)?
        .dyn_into::<T>()
        .map_err(|_| UiError::WrongElement {
            selector: selector.to_string(),
            expected,
        })
}

fn find_in_fragment(fragment: &DocumentFragment, selector: &str) -> Result<Element, UiError> {
    fragment
        .query_selector(selector)?
        .ok_or_else(|| UiError::MissingElement(selector.to_string()))
}

pub struct Buttons {
    pub start: HtmlButtonElement,
    pub pause: HtmlButtonElement,
    pub resume: HtmlButtonElement,
    pub reset: HtmlButtonElement,
    pub lap: HtmlButtonElement,
    pub clear_laps: HtmlButtonElement,
}

/// Handles to every element the widget draws into.
pub struct DomView {
    hours: HtmlElement,
    minutes: HtmlElement,
    seconds: HtmlElement,
    millis: HtmlElement,
    pub buttons: Buttons,
    lap_list: Element,
    lap_template: HtmlTemplateElement,
    selectors: Selectors,
}

impl DomView {
    pub fn bind(root: &Element, selectors: &Selectors) -> Result<Self, UiError> {
        let button = |sel: &str| find_as::<HtmlButtonElement>(root, sel, "button");
        let text = |sel: &str| find_as::<HtmlElement>(root, sel, "HTML element");

        Ok(Self {
            hours: text(&selectors.hours)?,
            minutes: text(&selectors.minutes)?,
            seconds: text(&selectors.seconds)?,
            millis: text(&selectors.millis)?,
            buttons: Buttons {
                start: button(&selectors.start)?,
                pause: button(&selectors.pause)?,
                resume: button(&selectors.resume)?,
                reset: button(&selectors.reset)?,
                lap: button(&selectors.lap)?,
                clear_laps: button(&selectors.clear_laps)?,
            },
            lap_list: find(root, &selectors.lap_list)?,
            lap_template: find_as::<HtmlTemplateElement>(root, &selectors.lap_template, "template")?,
            selectors: selectors.clone(),
        })
    }

    pub fn draw_time(&self, elapsed_ms: u64) {
        let t = split_clock(elapsed_ms);
        self.hours.set_text_content(Some(&t.hours_text()));
        self.minutes.set_text_content(Some(&t.minutes_text()));
        self.seconds.set_text_content(Some(&t.seconds_text()));
        self.millis.set_text_content(Some(&t.millis_text()));
    }

    pub fn draw_controls(&self, controls: &Controls) {
        let b = &self.buttons;
        b.start.set_disabled(!controls.start);
        b.pause.set_disabled(!controls.pause);
        b.resume.set_hidden(!controls.resume_visible);
        b.resume.set_disabled(!controls.resume);
        b.reset.set_disabled(!controls.reset);
        b.lap.set_disabled(!controls.lap);
        b.clear_laps.set_disabled(!controls.clear_laps);
    }

    /// Clones the lap template and puts it at the top of the list.
    pub fn draw_lap(&self, lap: &Lap) -> Result<(), UiError> {
        let fragment = self
            .lap_template
            .content()
            .clone_node_with_deep(true)?
            .dyn_into::<DocumentFragment>()
            .map_err(|_| UiError::WrongElement {
                selector: self.selectors.lap_template.clone(),
                expected: "template",
            })?;
        let item = find_in_fragment(&fragment, &self.selectors.lap_item)?;

        find(&item, &self.selectors.lap_index)?.set_text_content(Some(&format!("#{}", lap.index)));
        find(&item, &self.selectors.lap_time)?.set_text_content(Some(&format_lap_time(lap.total_ms)));
        find(&item, &self.selectors.lap_diff)?.set_text_content(Some(&format_lap_diff(lap)));

        self.lap_list.prepend_with_node_1(&item)?;
        Ok(())
    }

    pub fn clear_laps(&self) {
        self.lap_list.set_inner_html("");
    }
}
