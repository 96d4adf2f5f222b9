#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Press Ctrl+S to save.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, index: usize, adding: bool) {
        self.message = if adding {
            format!("Adding item #{}", index + 1)
        } else {
            format!("Editing item #{}", index + 1)
        };
    }

    pub fn item_saved(&mut self, index: usize, added: bool) {
        self.message = if added {
            format!("Added item #{}", index + 1)
        } else {
            format!("Updated item #{}", index + 1)
        };
    }

    pub fn item_removed(&mut self, index: usize) {
        self.message = format!("Removed item #{}", index + 1);
    }

    pub fn edit_cancelled(&mut self) {
        self.message = "Edit cancelled".to_string();
    }

    pub fn saved(&mut self) {
        self.message = "Saved. Press Ctrl+Q to exit.".to_string();
    }

    pub fn read_only(&mut self) {
        self.message = "Field is read-only".to_string();
    }

    pub fn pending_exit(&mut self) {
        self.message = "Unsaved changes. Press Ctrl+Q again to quit without saving.".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
