use std::borrow::Cow;

use percent_encoding::percent_decode_str;

// 表单字段的 Content-Disposition，只取类型、name 和 filename
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Disposition {
    pub kind: String,
    pub name: Option<String>,
    pub filename: Option<String>,
}

impl Disposition {
    pub fn parse(raw: &[u8]) -> Self {
        let raw = String::from_utf8_lossy(raw);
        let mut rest: &str = raw.as_ref();

        let (kind, tail) = split_unquoted(rest);
        let mut out = Disposition {
            kind: kind.trim().to_ascii_lowercase(),
            ..Default::default()
        };
        // filename* 优先于 filename
        let mut extended_filename = None;

        rest = tail;
        while !rest.is_empty() {
            let (param, tail) = split_unquoted(rest);
            rest = tail;

            let Some((key, value)) = param.split_once('=') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            match key.as_str() {
                "name" => out.name = Some(unquote(value).into_owned()),
                "filename" => out.filename = Some(unquote(value).into_owned()),
                "filename*" => extended_filename = decode_ext_value(value),
                _ => {}
            }
        }

        if extended_filename.is_some() {
            out.filename = extended_filename;
        }
        out
    }
}

// 按引号外的第一个 ; 切分
fn split_unquoted(s: &str) -> (&str, &str) {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => return (&s[..i], &s[i + 1..]),
            _ => {}
        }
    }
    (s, "")
}

fn unquote(value: &str) -> Cow<'_, str> {
    let Some(inner) = value.strip_prefix('"') else {
        return Cow::Borrowed(value);
    };
    let inner = inner.strip_suffix('"').unwrap_or(inner);
    if !inner.contains("\\\"") && !inner.contains("\\\\") {
        return Cow::Borrowed(inner);
    }

    // 只有 \" 和 \\ 是转义，其余反斜杠原样保留（浏览器不会转义文件名里的 \）
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '"' || next == '\\' {
                    chars.next();
                    out.push(next);
                    continue;
                }
            }
        }
        out.push(c);
    }
    Cow::Owned(out)
}

// RFC 5987: charset'lang'percent-encoded，只接受 UTF-8 与 ISO-8859-1
fn decode_ext_value(value: &str) -> Option<String> {
    let mut parts = value.splitn(3, '\'');
    let charset = parts.next()?.to_ascii_lowercase();
    let _lang = parts.next()?;
    let encoded = parts.next()?;

    if !is_well_formed(encoded) {
        return None;
    }
    let bytes: Vec<u8> = percent_decode_str(encoded).collect();
    match charset.as_str() {
        "utf-8" => String::from_utf8(bytes).ok(),
        "iso-8859-1" => Some(bytes.into_iter().map(char::from).collect()),
        _ => None,
    }
}

// percent_decode_str 遇到残缺的 %xx 会原样保留，这里直接判为非法
fn is_well_formed(encoded: &str) -> bool {
    let bytes = encoded.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || (bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_browser_file_part() {
        let d = Disposition::parse(br#"form-data; name="file"; filename="a.stl""#);
        assert_eq!(d.kind, "form-data");
        assert_eq!(d.name.as_deref(), Some("file"));
        assert_eq!(d.filename.as_deref(), Some("a.stl"));
    }

    #[test]
    fn text_field_has_no_filename() {
        let d = Disposition::parse(br#"form-data; name="comment""#);
        assert_eq!(d.name.as_deref(), Some("comment"));
        assert_eq!(d.filename, None);
    }

    #[test]
    fn empty_filename_is_kept() {
        let d = Disposition::parse(br#"form-data; name="file"; filename="""#);
        assert_eq!(d.filename.as_deref(), Some(""));
    }

    #[test]
    fn quoted_semicolons_and_spaces_survive() {
        let d = Disposition::parse(br#"form-data; name="file"; filename=" odd; name .stl""#);
        assert_eq!(d.filename.as_deref(), Some(" odd; name .stl"));
    }

    #[test]
    fn backslash_escapes_are_unescaped() {
        let d = Disposition::parse(br#"form-data; name="file"; filename="say \"hi\".stl""#);
        assert_eq!(d.filename.as_deref(), Some(r#"say "hi".stl"#));
    }

    #[test]
    fn unquoted_values_and_mixed_case_keys() {
        let d = Disposition::parse(b"Form-Data; NAME=file; FileName=part.stl");
        assert_eq!(d.kind, "form-data");
        assert_eq!(d.name.as_deref(), Some("file"));
        assert_eq!(d.filename.as_deref(), Some("part.stl"));
    }

    #[test]
    fn raw_utf8_filename() {
        let d = Disposition::parse("form-data; name=\"file\"; filename=\"模型.stl\"".as_bytes());
        assert_eq!(d.filename.as_deref(), Some("模型.stl"));
    }

    #[test]
    fn extended_filename_wins() {
        let d = Disposition::parse(
            b"form-data; name=\"file\"; filename=\"fallback.stl\"; filename*=UTF-8''%E6%A8%A1%E5%9E%8B.stl",
        );
        assert_eq!(d.filename.as_deref(), Some("模型.stl"));
    }

    #[test]
    fn lone_backslashes_are_kept() {
        let d = Disposition::parse(br#"form-data; name="file"; filename="dir\part.stl""#);
        assert_eq!(d.filename.as_deref(), Some(r"dir\part.stl"));

        let d = Disposition::parse(br#"form-data; name="file"; filename="C:\\models\a.stl""#);
        assert_eq!(d.filename.as_deref(), Some(r"C:\models\a.stl"));
    }

    #[test]
    fn malformed_percent_escapes_are_rejected() {
        for raw in [
            &b"form-data; name=\"file\"; filename*=UTF-8''%+1a.stl"[..],
            &b"form-data; name=\"file\"; filename*=UTF-8''a.stl%"[..],
            &b"form-data; name=\"file\"; filename*=UTF-8''%4"[..],
        ] {
            assert_eq!(Disposition::parse(raw).filename, None);
        }
    }

    #[test]
    fn iso_8859_1_extended_filename() {
        let d = Disposition::parse(b"form-data; name=\"file\"; filename*=iso-8859-1'en'caf%E9.stl");
        assert_eq!(d.filename.as_deref(), Some("café.stl"));
    }

    #[test]
    fn broken_extended_filename_keeps_plain_one() {
        let d = Disposition::parse(b"form-data; name=\"file\"; filename=\"plain.stl\"; filename*=UTF-8''%ZZ");
        assert_eq!(d.filename.as_deref(), Some("plain.stl"));
    }
}
