use pretty_assertions::assert_eq;

use super::super::*;

pub type SizeI = GenericSize<i32>;

#[test]
fn test_size_creation() {
    let size = Size::new(100, 200);
    assert_eq!(size.width(), 100);
    assert_eq!(size.height(), 200);
}

#[test]
fn test_clamping() {
    let size = SizeI::new(-10, 5);
    assert_eq!(size.width(), 0); // Clamped to 0
    assert_eq!(size.height(), 5);
}

#[test]
fn test_is_empty() {
    assert!(Size::new(0, 3).is_empty());
    assert!(Size::new(3, 0).is_empty());
    assert!(!Size::new(1, 1).is_empty());
}

#[test]
fn test_default() {
    let size: Size = Default::default();
    assert_eq!(size, Size::new(0, 0));
}

#[test]
fn test_tuple_conversion() {
    let size = Size::from((16, 2));
    assert_eq!(size, Size::new(16, 2));
    assert_eq!(<(u32, u32)>::from(size), (16, 2));
}

#[test]
fn test_deserialize_from_array() {
    let size: Size = serde_json::from_str("[8, 1]").unwrap();
    assert_eq!(size, Size::new(8, 1));
    assert_eq!(size.to_string(), "8x1");
}
