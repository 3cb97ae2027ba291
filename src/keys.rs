use crate::stopwatch::{Op, Phase};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Shortcut {
    /// Space: start, pause or resume depending on phase
    Toggle,
    Lap,
    Reset,
    ClearLaps,
}

impl Shortcut {
    /// `code` and `key` are the `KeyboardEvent` fields of the same names.
    pub fn from_event(code: &str, key: &str) -> Option<Self> {
        if code == "Space" {
            return Some(Shortcut::Toggle);
        }
        match key.to_lowercase().as_str() {
            "l" => Some(Shortcut::Lap),
            "r" => Some(Shortcut::Reset),
            "c" => Some(Shortcut::ClearLaps),
            _ => None,
        }
    }

    pub fn op(self, phase: Phase) -> Option<Op> {
        match self {
            Shortcut::Toggle => Some(match phase {
                Phase::Idle => Op::Start,
                Phase::Running => Op::Pause,
                Phase::Paused => Op::Resume,
            }),
            Shortcut::Lap if phase == Phase::Running => Some(Op::Lap),
            Shortcut::Lap => None,
            Shortcut::Reset => Some(Op::Reset),
            Shortcut::ClearLaps => Some(Op::ClearLaps),
        }
    }
}

/// Keys typed into form fields belong to the field, not the stopwatch.
pub fn is_text_entry(tag_name: &str, content_editable: bool) -> bool {
    content_editable || tag_name.eq_ignore_ascii_case("INPUT") || tag_name.eq_ignore_ascii_case("TEXTAREA")
}
