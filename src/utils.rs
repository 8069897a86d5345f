use std::borrow::Cow;

use url::form_urlencoded;

use context::Pairs;

///Decode `application/x-www-form-urlencoded` data into ordered pairs.
///
///Pairs are separated by `&`, and also by `;` if `semicolons` is set. Empty
///pairs are skipped and a pair without `=` gets an empty value. Malformed
///percent escapes are kept as they are and invalid UTF-8 is replaced.
pub fn parse_parameters(source: &[u8], semicolons: bool) -> Pairs {
    let source: Cow<[u8]> = if semicolons && source.contains(&b';') {
        source.iter()
              .map(|&e| if e == b';' { b'&' } else { e })
              .collect::<Vec<u8>>()
              .into()
    } else {
        source.into()
    };

    form_urlencoded::parse(&source)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect()
}

#[cfg(test)]
mod test {
    use super::parse_parameters;

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected.iter().map(|&(k, v)| (k.to_owned(), v.to_owned())).collect()
    }

    #[test]
    fn parsing_parameters() {
        let parameters = parse_parameters(b"a=1&aa=2&ab=202", true);
        assert_eq!(parameters, pairs(&[("a", "1"), ("aa", "2"), ("ab", "202")]));
    }

    #[test]
    fn parsing_duplicates_in_order() {
        let parameters = parse_parameters(b"a=1&b=2&c=3&b=4", true);
        assert_eq!(parameters, pairs(&[("a", "1"), ("b", "2"), ("c", "3"), ("b", "4")]));
    }

    #[test]
    fn parsing_blank_values() {
        let parameters = parse_parameters(b"a&b&c=&d=1", true);
        assert_eq!(parameters, pairs(&[("a", ""), ("b", ""), ("c", ""), ("d", "1")]));
    }

    #[test]
    fn parsing_parameters_with_plus() {
        let parameters = parse_parameters(b"a=1&aa=2+%2B+extra+meat&ab=202+fifth+avenue", true);
        assert_eq!(parameters, pairs(&[("a", "1"), ("aa", "2 + extra meat"), ("ab", "202 fifth avenue")]));
    }

    #[test]
    fn parsing_strange_parameters() {
        let parameters = parse_parameters(b"a=1=2&=2&ab=&&", true);
        assert_eq!(parameters, pairs(&[("a", "1=2"), ("", "2"), ("ab", "")]));
    }

    #[test]
    fn parsing_semicolons() {
        assert_eq!(parse_parameters(b"a=1;b=2&c=3", true), pairs(&[("a", "1"), ("b", "2"), ("c", "3")]));
        assert_eq!(parse_parameters(b"a=1;b=2&c=3", false), pairs(&[("a", "1;b=2"), ("c", "3")]));
        assert_eq!(parse_parameters(b"a=%3B", true), pairs(&[("a", ";")]));
    }

    #[test]
    fn parsing_malformed_escapes() {
        let parameters = parse_parameters(b"a=%zz&b=100%&c=%4", true);
        assert_eq!(parameters, pairs(&[("a", "%zz"), ("b", "100%"), ("c", "%4")]));
    }

    #[test]
    fn parsing_invalid_utf8() {
        let parameters = parse_parameters(b"a=%FF", true);
        assert_eq!(parameters, pairs(&[("a", "\u{FFFD}")]));
    }

    #[test]
    fn parsing_nothing() {
        assert!(parse_parameters(b"", true).is_empty());
        assert!(parse_parameters(b"&;&", true).is_empty());
    }
}
