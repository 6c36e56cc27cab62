//! Identifier transform from dotted names to destination field names.

/// Capitalize the first character and every character following a `.`,
/// then drop the dots.
///
/// `server.http` becomes `ServerHttp`; an empty name stays empty.
pub fn to_field_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c == '.' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_examples() {
        assert_eq!(to_field_name("server.http"), "ServerHttp");
        assert_eq!(to_field_name("logDir"), "LogDir");
        assert_eq!(to_field_name("id"), "Id");
        assert_eq!(to_field_name("texts"), "Texts");
        assert_eq!(to_field_name("Press"), "Press");
        assert_eq!(to_field_name("a..b"), "AB");
        assert_eq!(to_field_name(""), "");
    }

    proptest! {
        #[test]
        fn never_contains_dots(name in "[a-z.]{0,24}") {
            prop_assert!(!to_field_name(&name).contains('.'));
        }

        #[test]
        fn idempotent(name in "[a-zA-Z0-9_.]{0,24}") {
            let once = to_field_name(&name);
            prop_assert_eq!(to_field_name(&once), once);
        }

        #[test]
        fn segments_are_capitalized(segments in prop::collection::vec("[a-z][a-z0-9]{0,6}", 1..5)) {
            let dotted = segments.join(".");
            let expected: String = segments
                .iter()
                .map(|s| {
                    let mut chars = s.chars();
                    let first = chars.next().map(|c| c.to_ascii_uppercase());
                    first.into_iter().chain(chars).collect::<String>()
                })
                .collect();
            prop_assert_eq!(to_field_name(&dotted), expected);
        }
    }
}
