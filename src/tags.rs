//! Struct tags: Go string literal decoding, `key:"value"` lookup and the
//! `name,opt1,opt2` convention used by `encoding/json`.

/// Decode a Go string literal, interpreted (`"..."`) or raw (`` `...` ``).
/// Returns `None` for anything the Go compiler would reject.
pub fn unquote(lit: &str) -> Option<String> {
    let bytes = lit.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    // both ends are ASCII quotes once matched, so slicing between them is safe
    match (bytes[0], bytes[bytes.len() - 1]) {
        (b'`', b'`') => {
            let body = &lit[1..lit.len() - 1];
            if body.contains('`') { return None; }
            Some(body.replace('\r', ""))
        }
        (b'"', b'"') => unquote_interpreted(&lit[1..lit.len() - 1]),
        _ => None,
    }
}

fn unquote_interpreted(body: &str) -> Option<String> {
    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return None,
            '\\' => {
                let esc = chars.next()?;
                match esc {
                    'a' => out.push(0x07),
                    'b' => out.push(0x08),
                    'f' => out.push(0x0c),
                    'n' => out.push(b'\n'),
                    'r' => out.push(b'\r'),
                    't' => out.push(b'\t'),
                    'v' => out.push(0x0b),
                    '\\' => out.push(b'\\'),
                    '"' => out.push(b'"'),
                    'x' => out.push(hex_value(&mut chars, 2)? as u8),
                    'u' | 'U' => {
                        let n = if esc == 'u' { 4 } else { 8 };
                        let c = char::from_u32(hex_value(&mut chars, n)?)?;
                        let mut buf = [0u8; 4];
                        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                    }
                    '0'..='7' => {
                        let mut v = esc.to_digit(8)?;
                        for _ in 0..2 {
                            v = v * 8 + chars.next()?.to_digit(8)?;
                        }
                        if v > 255 { return None; }
                        out.push(v as u8);
                    }
                    // `\'` is only legal inside rune literals
                    _ => return None,
                }
            }
            c => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    Some(String::from_utf8_lossy(&out).into_owned())
}

fn hex_value(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<u32> {
    let mut v = 0u32;
    for _ in 0..digits {
        v = v * 16 + chars.next()?.to_digit(16)?;
    }
    Some(v)
}

/// Look up `key` in a conventional struct tag (`json:"name" xml:"n"`).
///
/// Scanning stops at the first pair that is not well formed, exactly like
/// `reflect.StructTag.Lookup`; pairs after it are never seen.
pub fn lookup_tag(tag: &str, key: &str) -> Option<String> {
    let mut rest = tag;
    while !rest.is_empty() {
        // skip leading space
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            break;
        }

        // name runs up to ':'; control chars, space, quote and DEL end it early
        let b = rest.as_bytes();
        let mut i = 0;
        while i < b.len() && b[i] > b' ' && b[i] != b':' && b[i] != b'"' && b[i] != 0x7f {
            i += 1;
        }
        if i == 0 || i + 1 >= b.len() || b[i] != b':' || b[i + 1] != b'"' {
            break;
        }
        let name = &rest[..i];
        rest = &rest[i + 1..];

        // quoted value up to the next unescaped quote
        let b = rest.as_bytes();
        let mut i = 1;
        while i < b.len() && b[i] != b'"' {
            if b[i] == b'\\' {
                i += 1;
            }
            i += 1;
        }
        if i >= b.len() {
            break;
        }
        let quoted = &rest[..i + 1];
        rest = &rest[i + 1..];

        if name == key {
            return unquote(quoted);
        }
    }
    None
}

/// Options following the first comma of a `json` tag, without that comma.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagOptions(String);

/// Split a `json` tag value into the name and its options.
pub fn parse_json_tag(tag: &str) -> (&str, TagOptions) {
    match tag.split_once(',') {
        Some((name, opts)) => (name, TagOptions(opts.to_string())),
        None => (tag, TagOptions::default()),
    }
}

impl TagOptions {
    /// Whole-option match: `contains("omit")` is false for `omitempty`.
    pub fn contains(&self, option: &str) -> bool {
        !self.0.is_empty() && self.0.split(',').any(|o| o == option)
    }

    pub fn as_str(&self) -> &str { &self.0 }
}
