use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    form::{ArraySection, EditTarget, EditorOutcome, FormStore, ItemEditor, ListEditor, ListEvent},
    presentation::{self, SectionView, UiContext},
};

use super::{
    input::{KeyCommand, LIST_HELP, READ_ONLY_HELP, classify, is_editor_abort},
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
};

pub(crate) struct App {
    store: FormStore,
    section: ArraySection,
    list: ListEditor,
    editor: Option<ItemEditor>,
    options: UiOptions,
    status: StatusLine,
    exit_armed: bool,
    should_quit: bool,
    result: Option<Value>,
}

impl App {
    pub fn new(store: FormStore, section: ArraySection, options: UiOptions) -> Self {
        let section = section.with_disabled(options.disabled);
        let list = ListEditor::new()
            .with_disabled(options.disabled)
            .with_modal_size(options.modal_size);
        Self {
            store,
            section,
            list,
            editor: None,
            options,
            status: StatusLine::new(),
            exit_armed: false,
            should_quit: false,
            result: None,
        }
    }

    pub fn run(&mut self) -> Result<Value> {
        let mut terminal = TerminalGuard::new()?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                }
                _ => {}
            }
        }

        self.result
            .take()
            .ok_or_else(|| anyhow!("user exited without saving"))
    }

    pub(crate) fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let len = self.section.len(&self.store);
        let selected = self.list.selected_index(len);
        let editable_index = self.section.edit_index();
        let help = self.help_text();
        let dirty = self.store.is_dirty();
        let disabled = self.section.is_disabled();
        let title = self.section.definition().display_title().to_string();
        let description = self.section.definition().description.clone();
        let details = self.section.details(&self.store);
        presentation::draw(
            frame,
            UiContext {
                section: SectionView {
                    title: &title,
                    description: description.as_deref(),
                    details,
                    selected,
                    editable_index,
                    disabled,
                },
                editor: self.editor.as_ref(),
                modal_size: self.list.modal_size(),
                status_message: self.status.message(),
                dirty,
                help,
            },
        );
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if let Some(editor) = self.editor.as_mut() {
            let outcome = if is_editor_abort(&key) {
                Some(EditorOutcome::Cancel)
            } else {
                editor.handle_key(&key)
            };
            if let Some(outcome) = outcome {
                self.apply_editor_outcome(outcome);
            }
            return;
        }

        let len = self.section.len(&self.store);
        match classify(&key) {
            KeyCommand::Save => {
                self.exit_armed = false;
                self.on_save();
            }
            KeyCommand::Quit => self.on_exit(),
            KeyCommand::Select(delta) => {
                self.list.select(delta, len);
            }
            KeyCommand::Edit => {
                if let Some(event) = self.list.edit_selected(len) {
                    self.dispatch_list_event(event);
                }
            }
            KeyCommand::Add => match self.list.add(len) {
                Some(event) => self.dispatch_list_event(event),
                None => self.status.read_only(),
            },
            KeyCommand::Remove => match self.list.remove_selected(len) {
                Some(event) => self.dispatch_list_event(event),
                None if self.list.is_disabled() => self.status.read_only(),
                None => self.status.set_raw("No item to remove"),
            },
            KeyCommand::ResetStatus => {
                self.exit_armed = false;
                self.status.ready();
            }
            KeyCommand::None => {}
        }
    }

    pub(crate) fn dispatch_list_event(&mut self, event: ListEvent) {
        match event {
            ListEvent::StartEdit(index) => {
                self.section.on_start_edit(index);
                let item = match self.section.editing_item(&self.store) {
                    Ok(item) => item,
                    Err(err) => {
                        warn!(error = %err, "cannot open array item");
                        self.section.on_cancel();
                        self.status.set_raw(err.to_string());
                        return;
                    }
                };
                let editor = ItemEditor::new(
                    self.section.definition(),
                    self.section.editor_path(),
                    item.as_ref(),
                )
                .with_read_only(self.section.is_disabled());
                self.status.editing(index, item.is_none());
                self.editor = Some(editor);
            }
            ListEvent::Remove(index) => {
                match self.section.on_remove(&mut self.store, index) {
                    Ok(()) => {
                        self.exit_armed = false;
                        self.status.item_removed(index);
                    }
                    Err(err) => {
                        warn!(error = %err, "failed to remove item");
                        self.status.set_raw(err.to_string());
                    }
                }
                self.list.clamp(self.section.len(&self.store));
            }
        }
    }

    fn apply_editor_outcome(&mut self, outcome: EditorOutcome) {
        match outcome {
            EditorOutcome::Done(item) => match self.section.on_done(&mut self.store, item) {
                Ok(target) => {
                    let len = self.section.len(&self.store);
                    let index = match target {
                        EditTarget::Existing(index) => index,
                        EditTarget::Append => len.saturating_sub(1),
                    };
                    self.list.select_index(index, len);
                    self.status
                        .item_saved(index, matches!(target, EditTarget::Append));
                    self.exit_armed = false;
                    self.editor = None;
                }
                Err(err) => {
                    warn!(error = %err, "failed to save item");
                    self.status.set_raw(err.to_string());
                }
            },
            EditorOutcome::Cancel => {
                self.section.on_cancel();
                self.status.edit_cancelled();
                self.list.clamp(self.section.len(&self.store));
                self.editor = None;
            }
        }
    }

    fn on_save(&mut self) {
        self.result = Some(self.store.value().clone());
        self.store.mark_clean();
        self.status.saved();
        info!(path = %self.section.path(), "document saved");
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.store.is_dirty() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
    }

    fn help_text(&self) -> Option<&'static str> {
        if !self.options.show_help {
            return None;
        }
        if self.section.is_disabled() {
            Some(READ_ONLY_HELP)
        } else {
            Some(LIST_HELP)
        }
    }
}

#[cfg(test)]
impl App {
    pub(crate) fn store(&self) -> &FormStore {
        &self.store
    }

    pub(crate) fn editor_mut(&mut self) -> Option<&mut ItemEditor> {
        self.editor.as_mut()
    }

    pub(crate) fn status_message(&self) -> &str {
        self.status.message()
    }
}
