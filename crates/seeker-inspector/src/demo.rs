//! The built-in demo desktop: a small simulated application tree the
//! inspector can render without a live platform backend.

use seeker::platforms::sim::{SimDesktop, SimElement};
use seeker::{Capability, ControlType, Rect};

pub struct Demo {
    pub desktop: SimDesktop,
    pub progress: SimElement,
    pub autosave: SimElement,
}

pub fn build() -> Demo {
    let desktop = SimDesktop::new();

    let editor = desktop.add_window("Untitled - Editor");
    editor.set_automation_id("editorWindow");
    editor.set_class_name("EditorFrame");

    let toolbar = editor.add_child(ControlType::ToolBar, "Main Toolbar");
    for (name, id, x) in [
        ("Open", "openButton", 8.0),
        ("Save", "saveButton", 48.0),
        ("Run", "runButton", 88.0),
    ] {
        let button = toolbar.add_child(ControlType::Button, name);
        button.set_automation_id(id);
        button.set_bounds(Rect::new(x, 4.0, 36.0, 24.0));
        button.add_capability(Capability::Invoke);
    }

    let body = editor.add_child(ControlType::Pane, "Body");
    let text = body.add_child(ControlType::Edit, "Document");
    text.set_automation_id("documentEdit");
    text.set_bounds(Rect::new(0.0, 32.0, 800.0, 520.0));
    text.set_value("fn main() {}");

    let status = editor.add_child(ControlType::Pane, "Status Bar");
    let progress = status.add_child(ControlType::ProgressBar, "Build Progress");
    progress.set_automation_id("buildProgress");
    progress.set_bounds(Rect::new(0.0, 560.0, 200.0, 16.0));
    progress.set_value("0");

    let autosave = status.add_child(ControlType::CheckBox, "Autosave");
    autosave.set_automation_id("autosaveCheck");
    autosave.set_bounds(Rect::new(220.0, 560.0, 80.0, 16.0));
    autosave.add_capability(Capability::Toggle);

    let about = desktop.add_window("About");
    about.set_automation_id("aboutDialog");
    let close = about.add_child(ControlType::Button, "Close");
    close.set_automation_id("closeButton");
    close.set_bounds(Rect::new(380.0, 260.0, 60.0, 24.0));
    close.add_capability(Capability::Invoke);

    Demo {
        desktop,
        progress,
        autosave,
    }
}
