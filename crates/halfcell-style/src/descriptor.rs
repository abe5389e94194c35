//! Recursively nestable style descriptors.
//!
//! Composite components carry several named styles at once (`base`,
//! `focused`, `borderBackground`, ...). A [`StyleDescriptor`] holds them as
//! named entries; compiling it walks the tree and resolves every leaf with
//! the same rules as [`Styler::compile`](crate::Styler::compile), using the
//! entry name as the field name.

use crate::error::StyleError;
use crate::keyword::KeywordTable;
use crate::styler::{CompiledStyle, compile_value};

/// One entry value of a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleNode {
    /// A keyword or escape code.
    Value(String),
    /// A list of keywords or codes, compiled element-wise.
    List(Vec<StyleNode>),
    /// A nested descriptor, compiled recursively.
    Nested(StyleDescriptor),
    /// Numeric data such as a z-index; not style data, skipped.
    Number(f64),
}

impl From<&str> for StyleNode {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for StyleNode {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<f64> for StyleNode {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<StyleDescriptor> for StyleNode {
    fn from(value: StyleDescriptor) -> Self {
        Self::Nested(value)
    }
}

impl<T: Into<StyleNode>> From<Vec<T>> for StyleNode {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Named style entries, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDescriptor {
    entries: Vec<(String, StyleNode)>,
}

impl StyleDescriptor {
    /// Empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, node: impl Into<StyleNode>) -> Self {
        self.insert(name, node);
        self
    }

    /// Add or replace an entry in place.
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<StyleNode>) {
        let name = name.into();
        let node = node.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = node,
            None => self.entries.push((name, node)),
        }
    }

    /// Look up an entry.
    pub fn get(&self, name: &str) -> Option<&StyleNode> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the descriptor has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compile every entry. Number entries are dropped from the result.
    pub fn compile<K: KeywordTable + ?Sized>(
        &self,
        table: &K,
    ) -> Result<CompiledDescriptor, StyleError> {
        let mut entries = Vec::with_capacity(self.entries.len());
        for (name, node) in &self.entries {
            let compiled = match node {
                StyleNode::Number(_) => continue,
                StyleNode::Value(value) => CompiledNode::Code(compile_value(table, name, value)?),
                StyleNode::List(items) => CompiledNode::Codes(
                    items
                        .iter()
                        .map(|item| match item {
                            StyleNode::Value(value) => compile_value(table, name, value),
                            other => Err(StyleError::InvalidValue {
                                field: name.clone(),
                                value: format!("{other:?}"),
                            }),
                        })
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                StyleNode::Nested(nested) => CompiledNode::Nested(nested.compile(table)?),
            };
            entries.push((name.clone(), compiled));
        }
        Ok(CompiledDescriptor { entries })
    }
}

/// One compiled entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledNode {
    /// A resolved code.
    Code(String),
    /// Resolved codes, in list order.
    Codes(Vec<String>),
    /// A compiled nested descriptor.
    Nested(CompiledDescriptor),
}

/// A descriptor whose leaves are all escape codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledDescriptor {
    entries: Vec<(String, CompiledNode)>,
}

impl CompiledDescriptor {
    /// Look up a compiled entry.
    pub fn get(&self, name: &str) -> Option<&CompiledNode> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CompiledNode)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Read the `foreground`/`background`/`attributes` entries as a style.
    ///
    /// Nested entries are ignored; call this on the nested descriptor itself.
    pub fn to_style(&self) -> CompiledStyle {
        let single = |name: &str| match self.get(name) {
            Some(CompiledNode::Code(code)) => Some(code.clone()),
            _ => None,
        };
        let attributes = match self.get("attributes") {
            Some(CompiledNode::Codes(codes)) => codes.clone(),
            Some(CompiledNode::Code(code)) => vec![code.clone()],
            _ => Vec::new(),
        };
        CompiledStyle {
            foreground: single("foreground"),
            background: single("background"),
            attributes,
        }
    }
}
