//! Layer-name conventions.
//!
//! Designers encode export semantics directly in layer names:
//!
//! | convention | example | meaning |
//! |------------|---------|---------|
//! | variant dot | `logo.dark` | image set `logo`, file `logo-dark.pdf` |
//! | role tag | `$light`, `$rtl-dark`, `$ru-light` | icon variant layer |
//! | folder marker | `📁 Brand` | folder segment `Brand/` |
//!
//! All parsing of those conventions lives here so traversal code only deals
//! with typed results.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alphanumeric1, char},
    combinator::{all_consuming, map, value, verify},
    multi::many1,
    sequence::{pair, preceded, terminated},
    IResult,
};

use crate::scene::{NodeId, Scene};
use crate::types::{NodeKind, Theme};

/// Default glyph marking a layer as an output folder.
pub const FOLDER_MARKER: &str = "📁";

/// Role of a layer inside an icon group, parsed from its `$`-tagged name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Light,
    Dark,
    RtlLight,
    RtlDark,
    Localized { locale: String, theme: Theme },
    Unknown,
}

/// Theme, locale and direction of an asset variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey {
    pub theme: Theme,
    pub locale: Option<String>,
    pub rtl: bool,
}

impl VariantKey {
    /// Default-direction, unlocalized variant.
    pub fn themed(theme: Theme) -> Self {
        Self {
            theme,
            locale: None,
            rtl: false,
        }
    }
}

impl Role {
    /// Variant key of a known role.
    pub fn key(&self) -> Option<VariantKey> {
        let key = match self {
            Role::Light => VariantKey::themed(Theme::Light),
            Role::Dark => VariantKey::themed(Theme::Dark),
            Role::RtlLight => VariantKey {
                rtl: true,
                ..VariantKey::themed(Theme::Light)
            },
            Role::RtlDark => VariantKey {
                rtl: true,
                ..VariantKey::themed(Theme::Dark)
            },
            Role::Localized { locale, theme } => VariantKey {
                theme: *theme,
                locale: Some(locale.clone()),
                rtl: false,
            },
            Role::Unknown => return None,
        };
        Some(key)
    }

    /// Role name without the `$` tag, used as a filename suffix.
    pub fn stem(&self) -> Option<String> {
        match self {
            Role::Light => Some("light".into()),
            Role::Dark => Some("dark".into()),
            Role::RtlLight => Some("rtl-light".into()),
            Role::RtlDark => Some("rtl-dark".into()),
            Role::Localized { locale, theme } => Some(format!("{}-{}", locale, theme)),
            Role::Unknown => None,
        }
    }

    /// Export order within a group: light, dark, rtl-light, rtl-dark, localized.
    pub fn rank(&self) -> u8 {
        match self {
            Role::Light => 0,
            Role::Dark => 1,
            Role::RtlLight => 2,
            Role::RtlDark => 3,
            Role::Localized { .. } => 4,
            Role::Unknown => 5,
        }
    }
}

/// Parse a layer name into a [`Role`].
///
/// Grammar (after trimming):
///
/// ```text
/// role      = "$" ( "rtl-" theme | theme | locale "-" theme )
/// locale    = segment ( "-" segment )*
/// segment   = [A-Za-z0-9]+
/// theme     = "light" | "dark"
/// ```
pub fn parse_role(name: &str) -> Role {
    match role(name.trim()) {
        Ok((_, role)) => role,
        Err(_) => Role::Unknown,
    }
}

fn role(input: &str) -> IResult<&str, Role> {
    preceded(
        char('$'),
        alt((
            all_consuming(rtl_role),
            all_consuming(plain_role),
            all_consuming(localized_role),
        )),
    )(input)
}

fn theme(input: &str) -> IResult<&str, Theme> {
    alt((
        value(Theme::Light, tag("light")),
        value(Theme::Dark, tag("dark")),
    ))(input)
}

fn plain_role(input: &str) -> IResult<&str, Role> {
    map(theme, |theme| match theme {
        Theme::Light => Role::Light,
        Theme::Dark => Role::Dark,
    })(input)
}

fn rtl_role(input: &str) -> IResult<&str, Role> {
    map(preceded(tag("rtl-"), theme), |theme| match theme {
        Theme::Light => Role::RtlLight,
        Theme::Dark => Role::RtlDark,
    })(input)
}

/// A locale subtag. Theme words and `rtl` are reserved.
fn locale_segment(input: &str) -> IResult<&str, &str> {
    verify(alphanumeric1, |segment: &str| {
        !matches!(segment, "light" | "dark" | "rtl")
    })(input)
}

fn localized_role(input: &str) -> IResult<&str, Role> {
    map(
        pair(many1(terminated(locale_segment, char('-'))), theme),
        |(segments, theme)| Role::Localized {
            locale: segments.join("-"),
            theme,
        },
    )(input)
}

/// A leaf layer name split at its variant dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafName<'a> {
    pub base: &'a str,
    pub qualifier: Option<String>,
}

/// Split `base.qualifier` at the first dot.
///
/// Both halves must be non-empty; remaining dots are dropped from the
/// qualifier. Anything else is an unqualified name.
pub fn split_qualifier(name: &str) -> LeafName<'_> {
    match name.split_once('.') {
        Some((base, rest)) if !base.is_empty() && !rest.replace('.', "").is_empty() => LeafName {
            base,
            qualifier: Some(rest.replace('.', "")),
        },
        _ => LeafName {
            base: name,
            qualifier: None,
        },
    }
}

/// Folder path of a node, derived from marked ancestors.
///
/// Walks up from the parent until the page, collecting the names of
/// ancestors that contain `marker` (marker removed, trimmed). Returns the
/// segments root-most first joined by `/` with a trailing `/`, or an empty
/// string.
pub fn folder_path(scene: &Scene, node: NodeId, marker: &str) -> String {
    if marker.is_empty() {
        return String::new();
    }

    let mut segments: Vec<String> = Vec::new();
    for ancestor in scene.ancestors(node) {
        let ancestor = scene.node(ancestor);
        if ancestor.kind == NodeKind::Page {
            break;
        }
        if !ancestor.name.contains(marker) {
            continue;
        }
        let segment = ancestor.name.replace(marker, "");
        let segment = segment.trim();
        if !segment.is_empty() {
            segments.push(segment.to_string());
        }
    }

    if segments.is_empty() {
        return String::new();
    }
    segments.reverse();
    let mut path = segments.join("/");
    path.push('/');
    path
}

/// Android resource identifier for a display name.
pub fn resource_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
