use std::borrow::Cow;

use crate::error::Error;

/// Replace the predefined entities and character references in text or an
/// attribute value. Borrows the input when there is nothing to replace.
pub(crate) fn parse_entities(content: &str) -> Result<Cow<'_, str>, Error> {
    if !content.contains('&') {
        return Ok(Cow::Borrowed(content));
    }
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '&' {
            result.push(c);
            continue;
        }
        let mut entity = String::new();
        let mut is_complete = false;
        for c in chars.by_ref() {
            if c == ';' {
                is_complete = true;
                break;
            }
            entity.push(c);
        }
        if !is_complete {
            return Err(Error::UnclosedEntity(entity));
        }
        match entity.as_str() {
            "amp" => result.push('&'),
            "apos" => result.push('\''),
            "gt" => result.push('>'),
            "lt" => result.push('<'),
            "quot" => result.push('"'),
            _ => result.push(character_reference(&entity)?),
        }
    }
    Ok(Cow::Owned(result))
}

fn character_reference(entity: &str) -> Result<char, Error> {
    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(decimal) = entity.strip_prefix('#') {
        decimal.parse::<u32>().ok()
    } else {
        None
    };
    code.and_then(char::from_u32)
        .ok_or_else(|| Error::InvalidEntity(entity.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(parse_entities("A &amp; B").unwrap(), "A & B");
    }

    #[test]
    fn test_parse_multiple() {
        assert_eq!(
            parse_entities("&amp;&apos;&gt;&lt;&quot;").unwrap(),
            "&'><\""
        );
    }

    #[test]
    fn test_parse_character_references() {
        assert_eq!(parse_entities("&#65;&#x42;").unwrap(), "AB");
    }

    #[test]
    fn test_parse_unknown_entity() {
        let err = parse_entities("&unknown;");
        assert!(matches!(err, Err(Error::InvalidEntity(entity)) if entity == "unknown"));
    }

    #[test]
    fn test_parse_unfinished_entity() {
        let err = parse_entities("&amp");
        assert!(matches!(err, Err(Error::UnclosedEntity(entity)) if entity == "amp"));
    }

    #[test]
    fn test_parse_no_entities() {
        let text = "hello";
        let result = parse_entities(text).unwrap();
        // this is the same slice
        assert!(std::ptr::eq(text, result.as_ref()));
    }
}
