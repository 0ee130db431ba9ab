/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// The five predefined XML entities as `(character, reference)` pairs.
pub const PREDEFINED: [(char, &str); 5] = [
    ('&', predefined::AMP),
    ('<', predefined::LT),
    ('>', predefined::GT),
    ('"', predefined::QUOT),
    ('\'', predefined::APOS),
];

pub mod predefined {
    pub const LT: &str = "&lt;";
    pub const GT: &str = "&gt;";
    pub const AMP: &str = "&amp;";
    pub const APOS: &str = "&apos;";
    pub const QUOT: &str = "&quot;";
}

fn reference(c: char) -> Option<&'static str> {
    match c {
        '<' => Some(predefined::LT),
        '>' => Some(predefined::GT),
        '&' => Some(predefined::AMP),
        '\'' => Some(predefined::APOS),
        '"' => Some(predefined::QUOT),
        _ => None,
    }
}

/// Returns the length of `s` after [escape] is applied.
pub fn escaped_size(s: &str) -> usize {
    let mut size = 0;
    for c in s.chars() {
        match reference(c) {
            Some(r) => size += r.len(),
            None => size += c.len_utf8(),
        }
    }

    size
}

/// Appends `s` to `out` with the predefined entities substituted.
pub fn escape(s: &str, out: &mut String) {
    // Writing into a String cannot fail
    let _ = escape_fmt(s, out);
}

/// Same as [escape] but writes into any [std::fmt::Write] sink.
pub fn escape_fmt<W: std::fmt::Write + ?Sized>(s: &str, out: &mut W) -> std::fmt::Result {
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if let Some(r) = reference(c) {
            out.write_str(&s[start..i])?;
            out.write_str(r)?;
            start = i + 1;
        }
    }
    out.write_str(&s[start..])
}

/// Replaces the five predefined entity references with their characters.
///
/// Any other `&...;` sequence, numeric character references included, and
/// any lone `&` are copied through unchanged.
pub fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        result.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match PREDEFINED.iter().find(|(_, r)| rest.starts_with(r)) {
            Some((c, r)) => {
                result.push(*c);
                rest = &rest[r.len()..];
            }
            None => {
                result.push('&');
                rest = &rest[1..];
            }
        }
    }
    result.push_str(rest);

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_size() {
        const NOESCAPE: &str = "abc$#@!%^*(){}[]=-+/.,;:FDSF3443";
        assert_eq!(escaped_size(NOESCAPE), NOESCAPE.len());
        assert_eq!(escaped_size("abc&def"), "abc&amp;def".len());
        assert_eq!(escaped_size("<>&'\""), "&lt;&gt;&amp;&apos;&quot;".len());
        assert_eq!(escaped_size("ğüş<"), "ğüş&lt;".len());
    }

    #[test]
    fn escaping() {
        let mut s = String::new();
        escape("a < b & c", &mut s);
        assert_eq!(s, "a &lt; b &amp; c");

        let mut s = String::new();
        escape("<>&'\"", &mut s);
        assert_eq!(s, "&lt;&gt;&amp;&apos;&quot;");

        let mut s = String::from("keep ");
        escape_fmt("x=\"1\" ğ", &mut s).unwrap();
        assert_eq!(s, "keep x=&quot;1&quot; ğ");
    }

    #[test]
    fn unescaping() {
        assert_eq!(unescape("a &lt; b &amp; c"), "a < b & c");
        assert_eq!(unescape("&quot;&apos;&gt;"), "\"'>");
        assert_eq!(unescape("&amp;lt;"), "&lt;");
    }

    #[test]
    fn unknown_references_pass_through() {
        assert_eq!(unescape("&#65; &nbsp; & &am"), "&#65; &nbsp; & &am");
        assert_eq!(unescape("tail&"), "tail&");
        assert_eq!(unescape(""), "");
    }
}
