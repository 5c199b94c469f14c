use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, Serializer};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const INDENT: &[u8] = b"  ";

/// Pretty printer that indents objects but keeps flat arrays on one line.
///
/// Whether an array is spread over several lines is decided by its first
/// element: an object puts every element on its own line, anything else
/// writes the array inline as `[a, b, c]`.
#[derive(Debug, Default)]
struct CompactArrayFormatter {
    depth: usize,
    /// One entry per open array: whether it is spread over lines.
    arrays: Vec<bool>,
    /// Set between `begin_array_value` and the start of that element.
    pending_element: Option<bool>,
    has_value: bool,
}

impl CompactArrayFormatter {
    fn indent<W: ?Sized + Write>(&self, writer: &mut W) -> io::Result<()> {
        for _ in 0..self.depth {
            writer.write_all(INDENT)?;
        }
        Ok(())
    }

    /// Writes the separator owed to the enclosing array before a value.
    fn start_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        is_object: bool,
    ) -> io::Result<()> {
        let Some(first) = self.pending_element.take() else {
            return Ok(());
        };
        let Some(expanded) = self.arrays.last_mut() else {
            return Ok(());
        };
        if first && is_object {
            *expanded = true;
            self.depth += 1;
        }
        if *expanded {
            writer.write_all(separator(first))?;
            self.indent(writer)
        } else if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }
}

fn separator(first: bool) -> &'static [u8] {
    if first { &b"\n"[..] } else { &b",\n"[..] }
}

macro_rules! scalar_methods {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<W: ?Sized + Write>(
                &mut self,
                writer: &mut W,
                value: $ty,
            ) -> io::Result<()> {
                self.start_value(writer, false)?;
                CompactFormatter.$method(writer, value)
            }
        )*
    };
}

impl Formatter for CompactArrayFormatter {
    scalar_methods!(
        write_bool(bool),
        write_i8(i8),
        write_i16(i16),
        write_i32(i32),
        write_i64(i64),
        write_i128(i128),
        write_u8(u8),
        write_u16(u16),
        write_u32(u32),
        write_u64(u64),
        write_u128(u128),
        write_f32(f32),
        write_f64(f64),
        write_number_str(&str),
    );

    fn write_null<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.start_value(writer, false)?;
        CompactFormatter.write_null(writer)
    }

    fn begin_string<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.start_value(writer, false)?;
        CompactFormatter.begin_string(writer)
    }

    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.start_value(writer, false)?;
        self.arrays.push(false);
        writer.write_all(b"[")
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.arrays.pop() == Some(true) {
            self.depth -= 1;
            writer.write_all(b"\n")?;
            self.indent(writer)?;
        }
        writer.write_all(b"]")
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        _writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pending_element = Some(first);
        Ok(())
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        Ok(())
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.start_value(writer, true)?;
        self.depth += 1;
        self.has_value = false;
        writer.write_all(b"{")
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.depth -= 1;
        if self.has_value {
            writer.write_all(b"\n")?;
            self.indent(writer)?;
        }
        writer.write_all(b"}")
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        writer.write_all(separator(first))?;
        self.indent(writer)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }
}

fn serialize_pretty<W: Write, T: ?Sized + Serialize>(
    writer: W,
    value: &T,
) -> serde_json::Result<()> {
    let mut serializer =
        Serializer::with_formatter(writer, CompactArrayFormatter::default());
    value.serialize(&mut serializer)
}

/// Pretty-prints `value` with objects indented and flat arrays kept on one
/// line, followed by a newline.
pub fn to_string_pretty_compact_arrays<T: ?Sized + Serialize>(
    value: &T,
) -> serde_json::Result<String> {
    let mut bytes = Vec::with_capacity(128);
    serialize_pretty(&mut bytes, value)?;
    bytes.push(b'\n');
    // The serializer only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub(crate) fn write_json_file<T: ?Sized + Serialize>(
    path: &Path,
    value: &T,
) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serialize_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_flat_arrays_stay_on_one_line() {
        let value = json!({
            "fields": ["edge_num", "distal_length"],
            "placements": [{"p": [[1, -2.5, 0.99]], "n": ["frag1"]}],
            "version": 1
        });
        let expected = concat!(
            "{\n",
            "  \"fields\": [\"edge_num\", \"distal_length\"],\n",
            "  \"placements\": [\n",
            "    {\n",
            "      \"p\": [[1, -2.5, 0.99]],\n",
            "      \"n\": [\"frag1\"]\n",
            "    }\n",
            "  ],\n",
            "  \"version\": 1\n",
            "}\n",
        );
        assert_eq!(to_string_pretty_compact_arrays(&value).unwrap(), expected);
    }

    #[test]
    fn test_empty_containers() {
        let value = json!({"a": [], "b": {}, "c": [{}]});
        let expected = concat!(
            "{\n",
            "  \"a\": [],\n",
            "  \"b\": {},\n",
            "  \"c\": [\n",
            "    {}\n",
            "  ]\n",
            "}\n",
        );
        assert_eq!(to_string_pretty_compact_arrays(&value).unwrap(), expected);
    }

    #[test]
    fn test_output_parses_back() {
        let value = json!({"a": [], "b": {}, "c": [[], [{"d": null}]], "e": "x\"y"});
        let text = to_string_pretty_compact_arrays(&value).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), value);
    }
}
