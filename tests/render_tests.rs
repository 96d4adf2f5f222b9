use array_section::{
    ArraySection, FieldDefinition, FormStore, ModalSize, PropertyMeta,
    form::ItemEditor,
    presentation::{SectionView, UiContext, draw},
};
use ratatui::{Terminal, backend::TestBackend};
use serde_json::json;

fn definition() -> FieldDefinition {
    FieldDefinition::new(
        "headers",
        vec![
            PropertyMeta::new("name").with_title("Header").with_required(true),
            PropertyMeta::new("token").with_secret(true),
        ],
    )
    .with_title("Request headers")
    .with_description("Sent with every request.")
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn section_shows_names_and_selected_description() {
    let store = FormStore::new(json!({"headers": [
        {"name": "Accept", "token": "abc"},
        {"name": "Host"}
    ]}));
    let mut section = ArraySection::new(definition(), "/headers");
    let details = section.details(&store).to_vec();
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
    terminal
        .draw(|frame| {
            draw(
                frame,
                UiContext {
                    section: SectionView {
                        title: "Request headers",
                        description: Some("Sent with every request."),
                        details: &details,
                        selected: Some(0),
                        editable_index: None,
                        disabled: false,
                    },
                    editor: None,
                    modal_size: ModalSize::Small,
                    status_message: "Ready",
                    dirty: false,
                    help: Some("n add"),
                },
            )
        })
        .expect("draw");
    let text = screen(&terminal);
    assert!(text.contains("Request headers"));
    assert!(text.contains("Sent with every request."));
    assert!(text.contains("Header: Accept | token: ********"));
    assert!(text.contains("Header: Host"));
    assert!(text.contains("Header:"));
    assert!(!text.contains("abc"));
}

fn render_empty(disabled: bool) -> String {
    let details = Vec::new();
    let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
    terminal
        .draw(|frame| {
            draw(
                frame,
                UiContext {
                    section: SectionView {
                        title: "headers",
                        description: None,
                        details: &details,
                        selected: None,
                        editable_index: None,
                        disabled,
                    },
                    editor: None,
                    modal_size: ModalSize::Small,
                    status_message: "",
                    dirty: false,
                    help: None,
                },
            )
        })
        .expect("draw");
    screen(&terminal)
}

#[test]
fn empty_section_shows_placeholder() {
    let text = render_empty(false);
    assert!(text.contains("No items yet. Press n to add one."));
    assert!(!text.contains("(read-only)"));
}

#[test]
fn read_only_placeholder_has_no_add_hint() {
    let text = render_empty(true);
    assert!(text.contains("No items."));
    assert!(!text.contains("Press n"));
    assert!(text.contains("headers (read-only)"));
}

#[test]
fn editor_modal_masks_secret_inputs() {
    let definition = definition();
    let mut editor = ItemEditor::new(&definition, "/headers/0", None);
    editor.set_input("token", "hunter2");
    let details = Vec::new();
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
    terminal
        .draw(|frame| {
            draw(
                frame,
                UiContext {
                    section: SectionView {
                        title: "Request headers",
                        description: None,
                        details: &details,
                        selected: None,
                        editable_index: Some(0),
                        disabled: false,
                    },
                    editor: Some(&editor),
                    modal_size: ModalSize::Medium,
                    status_message: "Adding item #1",
                    dirty: false,
                    help: None,
                },
            )
        })
        .expect("draw");
    let text = screen(&terminal);
    assert!(text.contains("Add Request headers"));
    assert!(text.contains("Header*:"));
    assert!(text.contains("*******"));
    assert!(!text.contains("hunter2"));
}
