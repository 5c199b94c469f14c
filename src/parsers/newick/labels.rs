use crate::EdgeLabel;

/// Extracts the bare leaf name from a raw leaf token.
///
/// Surrounding quotes are removed (a doubled quote inside a quoted name is
/// an escaped quote). For unquoted names everything from the first `:`,
/// `[` or `{` onwards is an annotation and is dropped.
pub fn leaf_name(token: &str) -> String {
    let token = token.trim();
    let mut chars = token.chars();
    match chars.next() {
        Some(quote @ ('\'' | '"')) => {
            let mut name = String::new();
            let mut chars = chars.peekable();
            while let Some(character) = chars.next() {
                if character == quote {
                    if chars.peek() == Some(&quote) {
                        name.push(quote);
                        _ = chars.next();
                        continue;
                    }
                    break;
                }
                name.push(character);
            }
            name
        }
        _ => {
            let end = token.find([':', '[', '{']).unwrap_or(token.len());
            token[..end].trim().to_string()
        }
    }
}

/// Returns the last `[n]` or `{n}` edge number found in a token.
///
/// Only groups made entirely of decimal digits count. Tokens without such a
/// group, or with a number too large to represent, are
/// [EdgeLabel::Unlabeled].
pub fn edge_number(token: &str) -> EdgeLabel {
    let bytes = token.as_bytes();
    let mut last: Option<&str> = None;
    let mut i = 0;
    while i < bytes.len() {
        if matches!(bytes[i], b'[' | b'{') {
            let digits_start = i + 1;
            let mut j = digits_start;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > digits_start
                && j < bytes.len()
                && matches!(bytes[j], b']' | b'}')
            {
                last = Some(&token[digits_start..j]);
                i = j;
            }
        }
        i += 1;
    }
    last.and_then(|digits| digits.parse::<EdgeLabel>().ok())
        .unwrap_or(EdgeLabel::Unlabeled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_name("A"), "A");
        assert_eq!(leaf_name("A:0.1"), "A");
        assert_eq!(leaf_name("A:0.1[3]"), "A");
        assert_eq!(leaf_name("A{3}"), "A");
        assert_eq!(leaf_name("'A B':1[0]"), "A B");
        assert_eq!(leaf_name("'A:B'"), "A:B");
        assert_eq!(leaf_name("'O''Brien':2"), "O'Brien");
        assert_eq!(leaf_name("\"x,y\":1{4}"), "x,y");
        assert_eq!(leaf_name(":0.5"), "");
    }

    #[test]
    fn test_edge_number() {
        assert_eq!(edge_number("A:1[0]"), EdgeLabel::Number(0));
        assert_eq!(edge_number("A:0.25{17}"), EdgeLabel::Number(17));
        assert_eq!(edge_number("D:1[3]"), EdgeLabel::Number(3));
        assert_eq!(edge_number("A[1]:0.5[2]"), EdgeLabel::Number(2));
        assert_eq!(edge_number("A:0.5[2][&comment]"), EdgeLabel::Number(2));
        assert_eq!(edge_number("A:0.5"), EdgeLabel::Unlabeled);
        assert_eq!(edge_number("A[]"), EdgeLabel::Unlabeled);
        assert_eq!(edge_number(""), EdgeLabel::Unlabeled);
        assert_eq!(
            edge_number("A[99999999999999999999999]"),
            EdgeLabel::Unlabeled
        );
    }
}
