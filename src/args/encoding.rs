//! Decoders for `-EncodedCommand` and `-EncodedArguments`.
//!
//! Both values are base64 over UTF-16LE text. Encoded arguments additionally
//! carry a serialized object stream (CLIXML) whose single object is a list of
//! strings:
//!
//! ```text
//! <Objs Version="1.1.0.1" xmlns="...">
//!   <Obj RefId="0">
//!     <TN RefId="0"><T>System.Collections.ArrayList</T>...</TN>
//!     <LST><S>-abbra</S></LST>
//!   </Obj>
//! </Objs>
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded payload has odd length {0}, expected UTF-16 code units")]
    OddLength(usize),

    #[error("decoded payload is not valid UTF-16")]
    Utf16,

    #[error("malformed serialized argument list: {0}")]
    Clixml(String),
}

/// Decode a `-EncodedCommand` value into command text.
pub fn decode_command(value: &str) -> Result<String, DecodeError> {
    let bytes = STANDARD.decode(value)?;
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::OddLength(bytes.len()));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|_| DecodeError::Utf16)
}

/// Decode a `-EncodedArguments` value into the argument strings it carries.
pub fn decode_arguments(value: &str) -> Result<Vec<String>, DecodeError> {
    let xml = decode_command(value)?;
    parse_string_list(&xml)
}

const LIST_OPEN: &str = "<LST>";
const LIST_CLOSE: &str = "</LST>";
const STRING_OPEN: &str = "<S>";
const STRING_CLOSE: &str = "</S>";

fn parse_string_list(xml: &str) -> Result<Vec<String>, DecodeError> {
    if !xml.trim_start().starts_with("<Objs") {
        return Err(DecodeError::Clixml("missing <Objs> root".to_string()));
    }
    let open = xml
        .find(LIST_OPEN)
        .ok_or_else(|| DecodeError::Clixml("missing <LST> element".to_string()))?;
    let body_start = open + LIST_OPEN.len();
    let body_len = xml[body_start..]
        .find(LIST_CLOSE)
        .ok_or_else(|| DecodeError::Clixml("unterminated <LST> element".to_string()))?;

    let mut body = &xml[body_start..body_start + body_len];
    let mut items = Vec::new();
    loop {
        body = body.trim_start();
        if body.is_empty() {
            break;
        }
        if let Some(rest) = body
            .strip_prefix("<S/>")
            .or_else(|| body.strip_prefix("<S />"))
        {
            items.push(String::new());
            body = rest;
            continue;
        }
        let Some(rest) = body.strip_prefix(STRING_OPEN) else {
            let end = body.find('>').map_or(body.len(), |i| i + 1);
            return Err(DecodeError::Clixml(format!(
                "unsupported list item '{}'",
                &body[..end]
            )));
        };
        let close = rest
            .find(STRING_CLOSE)
            .ok_or_else(|| DecodeError::Clixml("unterminated <S> element".to_string()))?;
        let text = decode_entities(&rest[..close])?;
        items.push(decode_escaped_units(&text)?);
        body = &rest[close + STRING_CLOSE.len()..];
    }
    Ok(items)
}

fn decode_entities(text: &str) -> Result<String, DecodeError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let semi = after
            .find(';')
            .ok_or_else(|| DecodeError::Clixml(format!("unterminated entity in '{text}'")))?;
        let name = &after[..semi];
        let ch = match name {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            _ => numeric_entity(name)
                .ok_or_else(|| DecodeError::Clixml(format!("unknown entity '&{name};'")))?,
        };
        out.push(ch);
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn numeric_entity(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits
        .strip_prefix('x')
        .or_else(|| digits.strip_prefix('X'))
    {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

/// Undo the `_xHHHH_` escaping the serializer applies to control characters
/// and to literal `_x` sequences. Escapes are UTF-16 code units, so surrogate
/// pairs arrive as two escapes.
fn decode_escaped_units(text: &str) -> Result<String, DecodeError> {
    let mut units: Vec<u16> = Vec::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("_x") {
        let (before, tail) = rest.split_at(pos);
        units.extend(before.encode_utf16());
        match escaped_unit(tail) {
            Some(unit) => {
                units.push(unit);
                rest = &tail[7..];
            }
            None => {
                units.extend("_x".encode_utf16());
                rest = &tail[2..];
            }
        }
    }
    units.extend(rest.encode_utf16());
    String::from_utf16(&units).map_err(|_| DecodeError::Utf16)
}

fn escaped_unit(tail: &str) -> Option<u16> {
    let hex = tail.get(2..6)?;
    if tail.get(6..7)? != "_" || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(text: &str) -> String {
        let bytes: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
        STANDARD.encode(bytes)
    }

    fn objs(items: &str) -> String {
        format!(
            "<Objs Version=\"1.1.0.1\" xmlns=\"http://schemas.microsoft.com/powershell/2004/04\">\r\n\
             <Obj RefId=\"0\"><TN RefId=\"0\"><T>System.Collections.ArrayList</T>\
             <T>System.Object</T></TN><LST>{items}</LST></Obj></Objs>"
        )
    }

    #[test]
    fn decodes_utf16_command() {
        assert_eq!(decode_command("YQBiAGIAcgBhAA==").unwrap(), "abbra");
    }

    #[test]
    fn rejects_bad_base64_and_odd_payloads() {
        assert!(matches!(decode_command("abbra"), Err(DecodeError::Base64(_))));
        assert!(matches!(decode_command("YWJj"), Err(DecodeError::OddLength(3))));
    }

    #[test]
    fn rejects_unpaired_surrogate() {
        let bytes = 0xD800u16.to_le_bytes();
        let value = STANDARD.encode(bytes);
        assert!(matches!(decode_command(&value), Err(DecodeError::Utf16)));
    }

    #[test]
    fn decodes_serialized_argument_list() {
        let payload = "PABPAGIAagBzACAAVgBlAHIAcwBpAG8AbgA9ACIAMQAuADEALgAwAC4AMQAiACAAeABtAGwAbgBzAD0AIgBoAHQAdABwADoALwAvAHMAYwBoAGUAbQBhAHMALgBtAGkAYwByAG8AcwBvAGYAdAAuAGMAbwBtAC8AcABvAHcAZQByAHMAaABlAGwAbAAvADIAMAAwADQALwAwADQAIgA+AA0ACgAgACAAPABPAGIAagAgAFIAZQBmAEkAZAA9ACIAMAAiAD4ADQAKACAAIAAgACAAPABUAE4AIABSAGUAZgBJAGQAPQAiADAAIgA+AA0ACgAgACAAIAAgACAAIAA8AFQAPgBTAHkAcwB0AGUAbQAuAEMAbwBsAGwAZQBjAHQAaQBvAG4AcwAuAEEAcgByAGEAeQBMAGkAcwB0ADwALwBUAD4ADQAKACAAIAAgACAAIAAgADwAVAA+AFMAeQBzAHQAZQBtAC4ATwBiAGoAZQBjAHQAPAAvAFQAPgANAAoAIAAgACAAIAA8AC8AVABOAD4ADQAKACAAIAAgACAAPABMAFMAVAA+AA0ACgAgACAAIAAgACAAIAA8AFMAPgAtAGEAYgBiAHIAYQA8AC8AUwA+AA0ACgAgACAAIAAgADwALwBMAFMAVAA+AA0ACgAgACAAPAAvAE8AYgBqAD4ADQAKADwALwBPAGIAagBzAD4A";
        assert_eq!(decode_arguments(payload).unwrap(), vec!["-abbra".to_string()]);
    }

    #[test]
    fn unescapes_entities_and_code_units() {
        let xml = objs(
            "<S>a &amp; b &lt;c&gt;</S><S/><S>line_x000A_next</S><S>_x005F_x</S><S>&#x41;</S>",
        );
        assert_eq!(
            decode_arguments(&encode(&xml)).unwrap(),
            vec![
                "a & b <c>".to_string(),
                String::new(),
                "line\nnext".to_string(),
                "_x".to_string(),
                "A".to_string(),
            ]
        );
    }

    #[test]
    fn leaves_incomplete_escapes_alone() {
        let xml = objs("<S>snake_x_case</S>");
        assert_eq!(
            decode_arguments(&encode(&xml)).unwrap(),
            vec!["snake_x_case".to_string()]
        );
    }

    #[test]
    fn rejects_non_string_items_and_missing_list() {
        let xml = objs("<I32>5</I32>");
        assert!(matches!(
            decode_arguments(&encode(&xml)),
            Err(DecodeError::Clixml(_))
        ));
        assert!(matches!(
            decode_arguments(&encode("abbra")),
            Err(DecodeError::Clixml(_))
        ));
        assert!(matches!(
            decode_arguments(&encode("<Objs><Obj></Obj></Objs>")),
            Err(DecodeError::Clixml(_))
        ));
    }
}
