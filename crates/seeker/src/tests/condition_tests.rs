use crate::node::{ControlType, Rect};
use crate::platforms::sim::SimDesktop;
use crate::{AutomationError, Condition, StringMatch};

fn button() -> (SimDesktop, crate::UiNode) {
    let desktop = SimDesktop::new();
    let window = desktop.add_window("Editor");
    let button = window.add_child(ControlType::Button, "Save As");
    button.set_automation_id("saveAsButton");
    button.set_class_name("Button");
    button.set_bounds(Rect::new(10.0, 10.0, 80.0, 24.0));
    (desktop, button.node())
}

#[test]
fn and_chain_matches_only_when_all_parts_match() {
    let (_desktop, node) = button();
    let all = Condition::by_name("Save As")
        .and(Condition::by_automation_id("saveAsButton"))
        .and(Condition::by_class_name("Button"));
    assert!(all.evaluate(&node).unwrap());

    let one_wrong = Condition::by_name("Save As")
        .and(Condition::by_automation_id("openButton"))
        .and(Condition::by_class_name("Button"));
    assert!(!one_wrong.evaluate(&node).unwrap());
}

#[test]
fn or_chain_matches_when_any_part_matches() {
    let (_desktop, node) = button();
    let any = Condition::by_name("Open")
        .or(Condition::by_name("Close"))
        .or(Condition::by_automation_id("saveAsButton"));
    assert!(any.evaluate(&node).unwrap());

    let none = Condition::by_name("Open").or(Condition::by_name("Close"));
    assert!(!none.evaluate(&node).unwrap());
}

#[test]
fn nested_and_or_keeps_each_groups_semantics() {
    let (_desktop, node) = button();
    // (name "Open" OR name "Save As") AND class "Button"
    let cond = Condition::by_name("Open")
        .or(Condition::by_name("Save As"))
        .and(Condition::by_class_name("Button"));
    assert!(cond.evaluate(&node).unwrap());

    let cond = Condition::by_name("Open")
        .or(Condition::by_name("Save As"))
        .and(Condition::by_class_name("CheckBox"));
    assert!(!cond.evaluate(&node).unwrap());
}

#[test]
fn predicate_condition_sees_the_node() {
    let (_desktop, node) = button();
    let cond = Condition::by_predicate("has non-empty bounds", |n| {
        n.bounds().map(|b| !b.is_empty()).unwrap_or(false)
    });
    assert!(cond.evaluate(&node).unwrap());
}

#[test]
fn description_joins_with_and_or() {
    let cond = Condition::by_name("Save As").and(Condition::by_class_name("Button"));
    assert_eq!(
        cond.to_string(),
        "name equals \"Save As\" AND class name equals \"Button\""
    );

    let cond = Condition::by_name("Yes").or(Condition::by_name("No"));
    assert_eq!(cond.to_string(), "name equals \"Yes\" OR name equals \"No\"");
}

#[test]
fn nested_groups_are_parenthesized() {
    let cond = Condition::by_name("Open")
        .or(Condition::by_name("Save"))
        .and(Condition::by_class_name("Button"));
    assert_eq!(
        cond.to_string(),
        "(name equals \"Open\" OR name equals \"Save\") AND class name equals \"Button\""
    );
}

#[test]
fn blank_string_produces_invalid_condition() {
    let (_desktop, node) = button();
    for cond in [
        Condition::by_name(""),
        Condition::by_name("   "),
        Condition::by_automation_id(""),
        Condition::by_class_name("\t"),
    ] {
        assert!(matches!(cond, Condition::Invalid(_)), "{cond:?}");
        assert!(matches!(
            cond.evaluate(&node),
            Err(AutomationError::InvalidCondition(_))
        ));
    }
}

#[test]
fn invalid_condition_poisons_combined_expressions() {
    let (_desktop, node) = button();
    let cond = Condition::by_name("Save As").and(Condition::by_automation_id(""));
    assert!(matches!(
        cond.evaluate(&node),
        Err(AutomationError::InvalidCondition(_))
    ));
}

#[test]
fn string_match_modes() {
    use StringMatch::*;
    assert!(Exact.matches("Button Text", "Button Text"));
    assert!(!Exact.matches("Button Text", "button text"));
    assert!(ExactIgnoreCase.matches("Button Text", "button text"));
    assert!(Contains.matches("Button Text", "ton Te"));
    assert!(!Contains.matches("Button Text", "text"));
    assert!(ContainsIgnoreCase.matches("Button Text", "text"));
    assert!(!ContainsIgnoreCase.matches("Button Text", "xyz"));
    assert!(StartsWith.matches("Button Text", "But"));
    assert!(StartsWithIgnoreCase.matches("Button Text", "bUt"));
    assert!(EndsWith.matches("Button Text", "Text"));
    assert!(EndsWithIgnoreCase.matches("Button Text", "tExT"));
}

#[test]
fn matching_mode_constructors_apply_their_mode() {
    let (_desktop, node) = button();
    let cond = Condition::by_name_matching(StringMatch::ContainsIgnoreCase, "save");
    assert!(cond.evaluate(&node).unwrap());
    let cond = Condition::by_class_name_matching(StringMatch::StartsWith, "But");
    assert!(cond.evaluate(&node).unwrap());
}
