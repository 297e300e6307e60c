//! Rendering of resolved files as C++ resource constants.
//!
//! For every identifier, in order, two constants are emitted: a byte array
//! holding the file contents plus a terminating zero byte, and a string
//! holding the identifier. An index follows:
//!
//! ```text
//! static const char b_fbs[] = {0x74, 0x61, ..., 0x0A, 0x00};
//! static const char b_fbs_filename[] = "b.fbs";
//! static const char a_fbs[] = {...};
//! static const char a_fbs_filename[] = "a.fbs";
//! static const char* filenames[] = {b_fbs_filename, a_fbs_filename, };
//! const char* symbols[] = {b_fbs,a_fbs,};
//! static const unsigned int number_of_symbols = 2;
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::error::{EmitError, Result};
use crate::namespace::{close_namespaces, open_namespaces};
use crate::symbol::{ResourceNames, SymbolTable, FILENAMES, NUMBER_OF_SYMBOLS, SYMBOLS};

/// Render `order` and its `contents` as a resource source file, wrapped in
/// `namespaces` (outermost first).
pub fn emit(
    order: &[String],
    contents: &HashMap<String, Vec<u8>>,
    namespaces: &[String],
) -> Result<String> {
    let mut table = SymbolTable::new();
    let mut entries: Vec<ResourceNames> = Vec::with_capacity(order.len());

    let mut out = open_namespaces(namespaces);

    for identifier in order {
        let data = contents
            .get(identifier)
            .ok_or_else(|| EmitError::MissingContents {
                identifier: identifier.clone(),
            })?;
        let names = table.claim(identifier)?;

        out.push_str(&format!(
            "static const char {}[] = {};\n",
            names.data,
            byte_array(data)
        ));
        out.push_str(&format!(
            "static const char {}[] = \"{}\";\n",
            names.filename,
            escape_string(identifier)
        ));
        entries.push(names);
    }

    out.push_str(&format!("static const char* {FILENAMES}[] = {{"));
    for names in &entries {
        out.push_str(&format!("{}, ", names.filename));
    }
    out.push_str("};\n");

    out.push_str(&format!("const char* {SYMBOLS}[] = {{"));
    for names in &entries {
        out.push_str(&format!("{},", names.data));
    }
    out.push_str("};\n");

    out.push_str(&format!(
        "static const unsigned int {NUMBER_OF_SYMBOLS} = {};\n",
        order.len()
    ));

    out.push_str(&close_namespaces(namespaces));

    debug!(resources = order.len(), bytes = out.len(), "rendered resources");
    Ok(out)
}

/// Render bytes as a brace-enclosed array of hex literals with a trailing `0x00`.
pub fn byte_array(data: &[u8]) -> String {
    let mut s = String::with_capacity(data.len() * 6 + 6);
    s.push('{');
    for byte in data {
        s.push_str(&format!("0x{byte:02X}, "));
    }
    s.push_str("0x00}");
    s
}

/// Escape a path for use inside a C string literal.
fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            // Three octal digits, so a following digit never extends the escape.
            c if c.is_ascii_control() => escaped.push_str(&format!("\\{:03o}", c as u32)),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(files: &[(&str, &str)]) -> HashMap<String, Vec<u8>> {
        files
            .iter()
            .map(|(id, text)| (id.to_string(), text.as_bytes().to_vec()))
            .collect()
    }

    fn order(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    /// Recover the bytes of a generated array, without its trailing zero.
    fn decode_array(text: &str, symbol: &str) -> Vec<u8> {
        let prefix = format!("static const char {symbol}[] = {{");
        let start = text.find(&prefix).expect("array present") + prefix.len();
        let end = start + text[start..].find("};").expect("array terminated");
        let mut bytes: Vec<u8> = text[start..end]
            .split(", ")
            .map(|lit| u8::from_str_radix(lit.trim_start_matches("0x"), 16).unwrap())
            .collect();
        assert_eq!(bytes.pop(), Some(0), "array must end with a zero byte");
        bytes
    }

    #[test]
    fn two_file_scenario() {
        let order = order(&["b.fbs", "a.fbs"]);
        let contents = contents(&[
            ("b.fbs", "table B {}\n"),
            ("a.fbs", "include \"b.fbs\";\n"),
        ]);

        let text = emit(&order, &contents, &[]).unwrap();

        assert!(text.contains("static const char b_fbs[] = {0x74, 0x61, 0x62, "));
        assert!(text.contains("static const char b_fbs_filename[] = \"b.fbs\";\n"));
        assert!(text.contains("static const char a_fbs_filename[] = \"a.fbs\";\n"));
        assert!(text.contains(
            "static const char* filenames[] = {b_fbs_filename, a_fbs_filename, };\n"
        ));
        assert!(text.contains("const char* symbols[] = {b_fbs,a_fbs,};\n"));
        assert!(text.ends_with("static const unsigned int number_of_symbols = 2;\n"));
        assert!(text.find("b_fbs[]").unwrap() < text.find("a_fbs[]").unwrap());
    }

    #[test]
    fn arbitrary_bytes_round_trip() {
        let raw: Vec<u8> = (0..=255u8).chain([0, 0, 0xff, b'\n']).collect();
        let order = order(&["bin/blob.dat"]);
        let mut map = HashMap::new();
        map.insert("bin/blob.dat".to_string(), raw.clone());

        let text = emit(&order, &map, &[]).unwrap();
        assert_eq!(decode_array(&text, "bin_blob_dat"), raw);
    }

    #[test]
    fn empty_file_is_a_single_zero() {
        let text = emit(&order(&["e.fbs"]), &contents(&[("e.fbs", "")]), &[]).unwrap();
        assert!(text.contains("static const char e_fbs[] = {0x00};\n"));
        assert!(decode_array(&text, "e_fbs").is_empty());
    }

    #[test]
    fn hex_digits_are_uppercase() {
        assert_eq!(byte_array(&[0x0a, 0xbc]), "{0x0A, 0xBC, 0x00}");
    }

    #[test]
    fn empty_order_renders_empty_index() {
        let text = emit(&[], &HashMap::new(), &[]).unwrap();
        assert_eq!(
            text,
            "static const char* filenames[] = {};\n\
             const char* symbols[] = {};\n\
             static const unsigned int number_of_symbols = 0;\n"
        );
    }

    #[test]
    fn namespaces_wrap_everything() {
        let ns = vec!["x".to_string(), "y".to_string()];
        let text = emit(&order(&["a.fbs"]), &contents(&[("a.fbs", "A")]), &ns).unwrap();

        assert!(text.starts_with("namespace x {\nnamespace y {\nstatic const char a_fbs[]"));
        assert!(text.ends_with(
            "number_of_symbols = 1;\n}  // namespace y\n}  // namespace x\n"
        ));
    }

    #[test]
    fn filename_literal_is_escaped() {
        assert_eq!(escape_string("dir/a.fbs"), "dir/a.fbs");
        assert_eq!(escape_string("we\"ird\\x"), "we\\\"ird\\\\x");
    }

    #[test]
    fn control_characters_are_octal_escaped() {
        assert_eq!(escape_string("a\rb.fbs"), "a\\015b.fbs");
        assert_eq!(escape_string("\u{1}1"), "\\0011");
        assert_eq!(escape_string("tab\there"), "tab\\011here");

        let text = emit(&order(&["x\r.fbs"]), &contents(&[("x\r.fbs", "")]), &[]).unwrap();
        assert!(text.contains("static const char x\r_fbs_filename[] = \"x\\015.fbs\";"));
    }

    #[test]
    fn colliding_identifiers_fail() {
        let err = emit(
            &order(&["a/b.h", "a_b_h"]),
            &contents(&[("a/b.h", ""), ("a_b_h", "")]),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, EmitError::DuplicateSymbol { .. }));
        assert_eq!(
            err.to_string(),
            "duplicate symbol `a_b_h` generated for 'a/b.h' and 'a_b_h'"
        );
    }

    #[test]
    fn missing_contents_fail() {
        let err = emit(&order(&["ghost.fbs"]), &HashMap::new(), &[]).unwrap_err();
        assert!(matches!(
            err,
            EmitError::MissingContents { ref identifier } if identifier == "ghost.fbs"
        ));
    }
}
