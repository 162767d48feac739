use crate::node::{Point, Rect};
use crate::position::RelativePosition;

fn rect() -> Rect {
    Rect::new(100.0, 200.0, 50.0, 50.0)
}

#[test]
fn top_left_offsets_from_the_top_left_corner() {
    let point = RelativePosition::top_left(10.0, 20.0).resolve(rect());
    assert_eq!(point, Point::new(110.0, 220.0));
}

#[test]
fn bottom_right_offsets_back_from_the_bottom_right_corner() {
    let point = RelativePosition::bottom_right(5.0, 5.0).resolve(rect());
    assert_eq!(point, Point::new(145.0, 245.0));
}

#[test]
fn no_offsets_yields_the_center() {
    let point = RelativePosition::center().resolve(rect());
    assert_eq!(point, Point::new(125.0, 225.0));
}

#[test]
fn single_axis_offsets_center_the_other_axis() {
    let point = RelativePosition::left(4.0).resolve(rect());
    assert_eq!(point, Point::new(104.0, 225.0));

    let point = RelativePosition::right(4.0).resolve(rect());
    assert_eq!(point, Point::new(146.0, 225.0));

    let point = RelativePosition::top(8.0).resolve(rect());
    assert_eq!(point, Point::new(125.0, 208.0));

    let point = RelativePosition::bottom(8.0).resolve(rect());
    assert_eq!(point, Point::new(125.0, 242.0));
}

#[test]
fn remaining_corners() {
    let point = RelativePosition::top_right(5.0, 10.0).resolve(rect());
    assert_eq!(point, Point::new(145.0, 210.0));

    let point = RelativePosition::bottom_left(10.0, 5.0).resolve(rect());
    assert_eq!(point, Point::new(110.0, 245.0));
}

#[test]
fn out_of_range_offsets_are_accepted_unvalidated() {
    let point = RelativePosition::top_left(500.0, -20.0).resolve(rect());
    assert_eq!(point, Point::new(600.0, 180.0));
}
