//! End-to-end test driving the whole stack the way a UI test would:
//! locate a window, drill down with composed conditions, interact, and
//! render a tree snapshot.

use std::sync::Arc;
use std::time::Duration;

use seeker::platforms::sim::SimDesktop;
use seeker::{
    format_tree_as_compact_yaml, Capability, Condition, ControlType, Desktop, Point, Rect,
    RelativePosition, SearchDefaults, SearchPolicy, StringMatch, UiControl, UiTreeNode,
    UiWrapper, WindowContext,
};

fn build_calculator(sim: &SimDesktop) {
    let window = sim.add_window("Calculator");
    window.set_automation_id("calculatorWindow");

    let display = window.add_child(ControlType::Edit, "Display");
    display.set_automation_id("display");
    display.set_bounds(Rect::new(10.0, 10.0, 180.0, 30.0));
    display.set_value("0");

    let keypad = window.add_child(ControlType::Pane, "Keypad");
    for (name, id, x) in [
        ("Seven", "num7Button", 10.0),
        ("Eight", "num8Button", 50.0),
        ("Nine", "num9Button", 90.0),
        ("Equals", "equalButton", 130.0),
    ] {
        let button = keypad.add_child(ControlType::Button, name);
        button.set_automation_id(id);
        button.set_bounds(Rect::new(x, 50.0, 32.0, 32.0));
        button.add_capability(Capability::Invoke);
    }
}

fn engine(sim: &SimDesktop) -> Desktop {
    Desktop::new(
        Arc::new(sim.clone()),
        SearchDefaults {
            timeout: Some(Duration::from_secs(2)),
            interval: Some(Duration::from_millis(25)),
            assert_found: true,
        },
    )
}

#[test]
fn locate_interact_and_snapshot() {
    let sim = SimDesktop::new();
    build_calculator(&sim);
    let desktop = engine(&sim);
    let mut context = WindowContext::new();

    let window = context
        .find_window(
            &desktop,
            &Condition::by_name_matching(StringMatch::StartsWithIgnoreCase, "calc"),
            None,
        )
        .unwrap()
        .unwrap();
    assert_eq!(window.title().unwrap(), "Calculator");

    // Composed condition: automation id AND control type predicate.
    let equals: UiControl = context
        .find_child(
            &desktop,
            &Condition::by_automation_id("equalButton").and(Condition::by_predicate(
                "is a button",
                |n| matches!(n.control_type(), Ok(ControlType::Button)),
            )),
            Some(SearchPolicy::new().timeout(1_000).interval(50)),
        )
        .unwrap()
        .unwrap();
    equals.invoke().unwrap();

    let point = equals.click_point(RelativePosition::center()).unwrap();
    assert_eq!(point, Point::new(146.0, 66.0));

    let display: UiControl = desktop
        .find_child(
            &Condition::by_automation_id("display"),
            window.node(),
            None,
        )
        .unwrap()
        .unwrap();
    display.set_value("42").unwrap();
    assert_eq!(display.value().unwrap(), "42");
}

#[test]
fn snapshot_renders_and_round_trips() {
    let sim = SimDesktop::new();
    build_calculator(&sim);
    let desktop = engine(&sim);

    let window = desktop
        .find_window(&Condition::by_name("Calculator"), None)
        .unwrap()
        .unwrap();
    let tree = window.snapshot(None);
    assert_eq!(tree.node_count(), 7);

    let rendered = format_tree_as_compact_yaml(&tree);
    assert!(rendered.formatted.starts_with("#1 [Window] Calculator"));
    assert!(rendered.formatted.contains("[Button] Seven"));
    // Window, display, four buttons carry bounds; the keypad pane does not.
    assert_eq!(rendered.element_count, 6);
    let (role, name, _bounds) = &rendered.index_to_bounds[&1];
    assert_eq!(role, "Window");
    assert_eq!(name, "Calculator");

    let json = tree.to_json_pretty().unwrap();
    let parsed = UiTreeNode::from_json(&json).unwrap();
    assert_eq!(parsed.node_count(), tree.node_count());
    assert_eq!(parsed.attributes.name.as_deref(), Some("Calculator"));
}

#[test]
fn wrappers_are_constructed_fresh_per_search() {
    let sim = SimDesktop::new();
    build_calculator(&sim);
    let desktop = engine(&sim);
    let window = desktop
        .find_window(&Condition::by_name("Calculator"), None)
        .unwrap()
        .unwrap();

    let first: UiControl = desktop
        .find_child(&Condition::by_automation_id("display"), window.node(), None)
        .unwrap()
        .unwrap();
    let second: UiControl = desktop
        .find_child(&Condition::by_automation_id("display"), window.node(), None)
        .unwrap()
        .unwrap();
    // Two independent wrappers over the same underlying element.
    assert_eq!(first.automation_id().unwrap(), second.automation_id().unwrap());
}
