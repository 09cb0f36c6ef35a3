//! JSON output styles for `Contents.json` files.

use std::io;

use assetport_core::ManifestError;
use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};

/// How manifest JSON is laid out.
///
/// Both styles use two-space indentation and parse to identical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JsonStyle {
    /// `"key": value`
    Standard,
    /// `"key" : value`, the layout Xcode itself writes.
    #[default]
    SpaceBeforeColon,
}

/// Serialize a manifest value in the given style.
pub fn to_manifest_json<T: Serialize>(value: &T, style: JsonStyle) -> Result<String, ManifestError> {
    match style {
        JsonStyle::Standard => Ok(serde_json::to_string_pretty(value)?),
        JsonStyle::SpaceBeforeColon => {
            let mut out = Vec::with_capacity(256);
            let mut ser = serde_json::Serializer::with_formatter(&mut out, XcodeFormatter::new());
            value.serialize(&mut ser)?;
            Ok(String::from_utf8(out)?)
        }
    }
}

/// Pretty formatter writing `" : "` between object keys and values.
///
/// Layout is otherwise [`PrettyFormatter`]'s with a two-space indent.
struct XcodeFormatter {
    pretty: PrettyFormatter<'static>,
}

impl XcodeFormatter {
    fn new() -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for XcodeFormatter {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b" : ")
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object_value(writer)
    }
}
