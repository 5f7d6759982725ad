
use crate::generator::ast::{EnumMember, Presence};

#[test]
fn test_presence_accessors() {
  assert!(Presence::Required.is_required());
  assert!(!Presence::OptionalNoDefault.is_required());
  assert_eq!(Presence::OptionalWithDefault("0".to_string()).default_value(), Some("0"));
  assert_eq!(Presence::OptionalNoDefault.default_value(), None);
}

#[test]
fn test_enum_member_wire_values_start_with_primary() {
  let member = EnumMember {
    name: "Private".to_string(),
    wire_value: "private".to_string(),
    additional_wire_values: vec!["hidden".to_string(), "0".to_string()],
  };
  assert_eq!(member.wire_values().collect::<Vec<_>>(), ["private", "hidden", "0"]);
}
