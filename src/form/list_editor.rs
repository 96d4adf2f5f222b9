use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Size hint for the item editor popup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalSize {
    #[default]
    #[serde(rename = "sm")]
    Small,
    #[serde(rename = "md")]
    Medium,
    #[serde(rename = "lg")]
    Large,
}

impl ModalSize {
    /// Fraction of the terminal width, in percent, the editor popup takes.
    pub fn width_percent(self) -> u16 {
        match self {
            ModalSize::Small => 50,
            ModalSize::Medium => 70,
            ModalSize::Large => 90,
        }
    }
}

impl fmt::Display for ModalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalSize::Small => write!(f, "sm"),
            ModalSize::Medium => write!(f, "md"),
            ModalSize::Large => write!(f, "lg"),
        }
    }
}

impl FromStr for ModalSize {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "sm" | "small" => Ok(ModalSize::Small),
            "md" | "medium" => Ok(ModalSize::Medium),
            "lg" | "large" => Ok(ModalSize::Large),
            other => Err(format!("unknown modal size '{other}' (expected sm, md or lg)")),
        }
    }
}

/// Intent emitted by the list editor, forwarded to the array coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    StartEdit(usize),
    Remove(usize),
}

/// Selection and action state of the list of items.
#[derive(Debug, Clone, Default)]
pub struct ListEditor {
    selected: usize,
    disabled: bool,
    modal_size: ModalSize,
}

impl ListEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_modal_size(mut self, modal_size: ModalSize) -> Self {
        self.modal_size = modal_size;
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn modal_size(&self) -> ModalSize {
        self.modal_size
    }

    pub fn selected_index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.selected.min(len - 1))
        }
    }

    pub fn select(&mut self, delta: i32, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let current = self.selected.min(len - 1) as i64;
        let next = (current + i64::from(delta)).clamp(0, len as i64 - 1) as usize;
        let changed = next != self.selected;
        self.selected = next;
        changed
    }

    pub fn select_index(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        let changed = index != self.selected;
        self.selected = index;
        changed
    }

    /// Keep the selection inside the list after its length changed elsewhere.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Open the selected item. Disabled lists still open it, read-only.
    pub fn edit_selected(&self, len: usize) -> Option<ListEvent> {
        self.selected_index(len).map(ListEvent::StartEdit)
    }

    pub fn add(&mut self, len: usize) -> Option<ListEvent> {
        if self.disabled {
            return None;
        }
        self.selected = len;
        Some(ListEvent::StartEdit(len))
    }

    pub fn remove_selected(&self, len: usize) -> Option<ListEvent> {
        if self.disabled {
            return None;
        }
        self.selected_index(len).map(ListEvent::Remove)
    }
}
