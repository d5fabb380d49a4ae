//! Integration tests for `#[derive(ConvertibleEnum)]`.

use horizon_values_core::{ConvertibleEnum, EnumType};
use horizon_values_macros::ConvertibleEnum;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ConvertibleEnum)]
enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ConvertibleEnum)]
#[convert(name = "Arrow")]
enum ArrowKey {
    #[convert(alias = "Left")]
    LeftArrow = 12,
    #[convert(alias = "Up")]
    UpArrow = 13,
    #[convert(rename = "Right", alias = "RightArrow")]
    RightArrow = 14,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ConvertibleEnum)]
#[convert(flags)]
#[repr(u8)]
enum Edges {
    None = 0,
    Left = 1,
    Top = 2,
    Right = 4,
    Bottom = 8,
}

#[test]
fn test_implicit_discriminants() {
    assert_eq!(Orientation::TYPE_NAME, "Orientation");
    assert!(!Orientation::IS_FLAGS);
    assert_eq!(Orientation::Horizontal.to_value(), 0);
    assert_eq!(Orientation::Vertical.to_value(), 1);
    assert_eq!(Orientation::from_value(1), Some(Orientation::Vertical));
    assert_eq!(Orientation::from_value(2), None);
}

#[test]
fn test_explicit_discriminants_and_names() {
    assert_eq!(ArrowKey::TYPE_NAME, "Arrow");
    assert_eq!(ArrowKey::UpArrow.to_value(), 13);
    assert_eq!(ArrowKey::UpArrow.name(), "UpArrow");
    assert_eq!(ArrowKey::RightArrow.name(), "Right");
}

#[test]
fn test_parse_names_and_aliases() {
    assert_eq!(ArrowKey::from_name("uparrow"), Some(ArrowKey::UpArrow));
    assert_eq!(ArrowKey::from_name("UP"), Some(ArrowKey::UpArrow));
    assert_eq!(ArrowKey::from_name(" left "), Some(ArrowKey::LeftArrow));
    assert_eq!(ArrowKey::from_name("rightarrow"), Some(ArrowKey::RightArrow));
    assert_eq!(ArrowKey::from_name("Down"), None);
}

#[test]
fn test_flags_metadata() {
    let ty = EnumType::of::<Edges>();
    assert!(ty.is_flags());
    assert_eq!(ty.name(), "Edges");
    assert_eq!(ty.variants().len(), 5);
    assert_eq!(ty.decompose_flags(1 | 8), Some(vec!["Left", "Bottom"]));
    assert_eq!(Edges::from_value(4), Some(Edges::Right));
}

#[test]
fn test_enum_type_identity() {
    assert_eq!(EnumType::of::<Edges>(), Edges::enum_type());
    assert_ne!(EnumType::of::<Edges>(), EnumType::of::<Orientation>());
}
