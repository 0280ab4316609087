use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Data kind encoded by brace depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseKind {
    Text,
    Number,
    Date,
}

impl BaseKind {
    /// Number of brace pairs that spell this kind
    pub fn depth(self) -> usize {
        match self {
            BaseKind::Text => 1,
            BaseKind::Number => 2,
            BaseKind::Date => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BaseKind::Text => "text",
            BaseKind::Number => "number",
            BaseKind::Date => "date",
        }
    }
}

/// Field kind: a base kind, optionally restricted to a fixed option list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagKind {
    pub base: BaseKind,
    pub dropdown: bool,
}

impl TagKind {
    pub const TEXT: TagKind = TagKind::plain(BaseKind::Text);
    pub const NUMBER: TagKind = TagKind::plain(BaseKind::Number);
    pub const DATE: TagKind = TagKind::plain(BaseKind::Date);
    pub const TEXT_DROPDOWN: TagKind = TagKind::dropdown(BaseKind::Text);
    pub const NUMBER_DROPDOWN: TagKind = TagKind::dropdown(BaseKind::Number);
    pub const DATE_DROPDOWN: TagKind = TagKind::dropdown(BaseKind::Date);

    pub const fn plain(base: BaseKind) -> Self {
        Self {
            base,
            dropdown: false,
        }
    }

    pub const fn dropdown(base: BaseKind) -> Self {
        Self {
            base,
            dropdown: true,
        }
    }

    pub fn is_date(self) -> bool {
        self.base == BaseKind::Date
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dropdown {
            write!(f, "{}_dropdown", self.base.as_str())
        } else {
            f.write_str(self.base.as_str())
        }
    }
}

impl FromStr for TagKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, dropdown) = match s.strip_suffix("_dropdown") {
            Some(base) => (base, true),
            None => (s, false),
        };
        let base = match base {
            "text" => BaseKind::Text,
            "number" => BaseKind::Number,
            "date" => BaseKind::Date,
            _ => return Err(format!("unknown field kind '{}'", s)),
        };
        Ok(Self { base, dropdown })
    }
}

impl Serialize for TagKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TagKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A placeholder discovered in a template body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub kind: TagKind,
    /// Dropdown options in source order; empty unless `kind.dropdown`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>, base: BaseKind) -> Self {
        Self {
            name: name.into(),
            kind: TagKind::plain(base),
            options: Vec::new(),
        }
    }

    pub fn with_options(name: impl Into<String>, base: BaseKind, options: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind: TagKind::dropdown(base),
            options,
        }
    }

    /// Spell this tag in template syntax
    ///
    /// Options are emitted single-quoted, so `extract_tags` reads back the same
    /// name, kind and options.
    pub fn placeholder(&self) -> String {
        let depth = self.kind.base.depth();
        let mut inner = self.name.clone();
        if self.kind.dropdown {
            let options: Vec<String> = self.options.iter().map(|o| format!("'{}'", o)).collect();
            inner.push('/');
            inner.push_str(&options.join(","));
        }
        format!("{}{}{}", "{".repeat(depth), inner, "}".repeat(depth))
    }
}
