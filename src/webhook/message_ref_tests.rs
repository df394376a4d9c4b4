//! Tests for `MessageRef`.

use super::{MessageRef, ORIGINAL, WebhookError};
use crate::entity::Snowflake;

#[test]
fn original_sentinel_is_accepted() {
    assert_eq!(MessageRef::parse(ORIGINAL).unwrap(), MessageRef::Original);
    assert_eq!(MessageRef::Original.to_string(), "@original");
}

#[test]
fn snowflakes_are_accepted() {
    for raw in ["1", "555", "18446744073709551615"] {
        let parsed = MessageRef::parse(raw).unwrap();

        assert_eq!(parsed.id(), Some(raw.parse::<Snowflake>().unwrap()));
        assert_eq!(parsed.to_string(), raw);
    }
}

#[test]
fn leading_zeros_are_kept_verbatim() {
    let parsed = MessageRef::parse("00555").unwrap();

    assert_eq!(parsed.id(), Snowflake::new(555));
    assert_eq!(parsed.as_str(), "00555");
    assert_ne!(parsed, MessageRef::from(Snowflake::new(555).unwrap()));
}

#[test]
fn original_has_no_id() {
    assert_eq!(MessageRef::Original.id(), None);
    assert_eq!(MessageRef::Original.as_str(), ORIGINAL);
}

#[test]
fn everything_else_is_invalid_identifier() {
    for raw in [
        "",
        " 1",
        "1 ",
        "0",
        "-5",
        "+5",
        "1e3",
        "original",
        "@ORIGINAL",
        "18446744073709551616",
        "000000000000000000001",
    ] {
        match MessageRef::parse(raw) {
            Err(WebhookError::InvalidIdentifier { value }) => assert_eq!(value, raw),
            other => panic!("{raw:?} gave {other:?}"),
        }
    }
}

#[test]
fn from_str_matches_parse() {
    assert_eq!("@original".parse::<MessageRef>().unwrap(), MessageRef::Original);
    assert!("x".parse::<MessageRef>().is_err());
}

#[test]
fn converts_from_snowflake() {
    let id = Snowflake::new(7).unwrap();

    let converted = MessageRef::from(id);

    assert_eq!(converted.id(), Some(id));
    assert_eq!(converted.as_str(), "7");
}
