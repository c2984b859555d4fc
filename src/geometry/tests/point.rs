use pretty_assertions::assert_eq;

use super::super::*;

#[test]
fn test_point_creation() {
    let point = Point::new(15, 25);
    assert_eq!(point.x(), 15);
    assert_eq!(point.y(), 25);
}

#[test]
fn test_deserialize_from_array() {
    let point: Point = serde_json::from_str("[3, 4]").unwrap();
    assert_eq!(point, Point::new(3, 4));
    assert_eq!(point.to_string(), "(3, 4)");
}
