use std::str::FromStr;

use log::Level;

/// Selector of the element the widget mounts on when loaded.
pub const ROOT_SELECTOR: &str = "[data-stopwatch]";

const ATTR_LOG_LEVEL: &str = "data-log-level";
const ATTR_SHORTCUTS: &str = "data-shortcuts";

/// CSS selectors for every element the widget binds to, resolved
/// relative to the widget root.
#[derive(Clone, Debug)]
pub struct Selectors {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub millis: String,
    pub start: String,
    pub pause: String,
    pub resume: String,
    pub reset: String,
    pub lap: String,
    pub clear_laps: String,
    pub lap_list: String,
    pub lap_template: String,
    /// The following are looked up inside a cloned lap template.
    pub lap_item: String,
    pub lap_index: String,
    pub lap_time: String,
    pub lap_diff: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            hours: "[data-hours]".into(),
            minutes: "[data-minutes]".into(),
            seconds: "[data-seconds]".into(),
            millis: "[data-milliseconds]".into(),
            start: "#btn-start".into(),
            pause: "#btn-pause".into(),
            resume: "#btn-resume".into(),
            reset: "#btn-reset".into(),
            lap: "#btn-lap".into(),
            clear_laps: "#btn-clear-laps".into(),
            lap_list: "#lap-list".into(),
            lap_template: "#lap-item-template".into(),
            lap_item: ".lap-item".into(),
            lap_index: "[data-lap-index]".into(),
            lap_time: "[data-lap-time]".into(),
            lap_diff: "[data-lap-diff]".into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub selectors: Selectors,
    /// Space / L / R / C on the window.
    pub shortcuts: bool,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            shortcuts: true,
            log_level: Level::Info,
        }
    }
}

impl Config {
    /// Reads `data-log-level` and `data-shortcuts` from the widget root.
    pub fn from_root(root: &web_sys::Element) -> (Self, Vec<String>) {
        Self::default().with_overrides(
            root.get_attribute(ATTR_LOG_LEVEL).as_deref(),
            root.get_attribute(ATTR_SHORTCUTS).as_deref(),
        )
    }

    /// Unparseable values keep the current setting and are handed back so
    /// they can be reported once logging is up.
    pub fn with_overrides(
        mut self,
        log_level: Option<&str>,
        shortcuts: Option<&str>,
    ) -> (Self, Vec<String>) {
        let mut rejected = Vec::new();
        if let Some(value) = log_level {
            match Level::from_str(value.trim()) {
                Ok(level) => self.log_level = level,
                Err(_) => rejected.push(format!("{}={:?}", ATTR_LOG_LEVEL, value)),
            }
        }
        if let Some(value) = shortcuts {
            match parse_switch(value) {
                Some(enabled) => self.shortcuts = enabled,
                None => rejected.push(format!("{}={:?}", ATTR_SHORTCUTS, value)),
            }
        }
        (self, rejected)
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
