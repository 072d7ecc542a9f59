//! Property name resolution and metadata.

use uniprops::{BinaryProperty, PropsError, Source};

#[test]
fn test_resolves_every_spelling() {
    for &property in BinaryProperty::ALL {
        assert_eq!(BinaryProperty::from_name(property.long_name()).unwrap(), property);
        assert_eq!(BinaryProperty::from_name(property.key()).unwrap(), property);
        assert_eq!(BinaryProperty::from_name(property.binding_name()).unwrap(), property);
    }
}

#[test]
fn test_loose_matching() {
    let expected = BinaryProperty::WhiteSpace;
    for name in ["White_Space", "white space", "WHITESPACE", "white-space", "WSpace", "isWhiteSpace"] {
        assert_eq!(BinaryProperty::from_name(name).unwrap(), expected, "{}", name);
    }
    assert_eq!("lower".parse::<BinaryProperty>().unwrap(), BinaryProperty::Lowercase);
}

#[test]
fn test_unknown_name() {
    let err = BinaryProperty::from_name("Not_A_Property").unwrap_err();
    assert!(matches!(err, PropsError::UnknownProperty { ref name } if name == "Not_A_Property"));
    assert!(BinaryProperty::from_name("").is_err());
    assert!(BinaryProperty::from_name("is").is_err());
}

#[test]
fn test_derived_properties() {
    let derived: Vec<_> = BinaryProperty::ALL
        .iter()
        .copied()
        .filter(|p| p.is_derived())
        .collect();
    assert_eq!(
        derived,
        vec![BinaryProperty::Blank, BinaryProperty::ChangesWhenCasemapped]
    );
    assert_eq!(BinaryProperty::Lowercase.source(), Source::Stored);
}

#[test]
fn test_display_uses_long_name() {
    assert_eq!(BinaryProperty::IdStart.to_string(), "ID_Start");
    assert_eq!(BinaryProperty::Lowercase.key(), "Lower");
    assert_eq!(BinaryProperty::Lowercase.binding_name(), "lowercase");
}

#[test]
fn test_exposed_subset() {
    assert_eq!(BinaryProperty::exposed().count(), 49);
    assert!(BinaryProperty::Alphabetic.is_exposed());
    assert!(!BinaryProperty::Blank.is_exposed());
    assert!(BinaryProperty::exposed().all(|p| p.is_exposed()));
}
