//! Placeholder allocation for one compilation unit.
//!
//! Every named path segment is replaced by a `#n{i}` alias and every literal
//! by a `:v{i}` alias, so no reserved word and no raw value ever reaches the
//! expression text. Segment aliases are shared: the same segment text always
//! maps to the same alias within one table. Value aliases are never shared.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use dynaexpr_model::AttributeValue;

use super::ast::{AttributePath, PathElement};

const NAME_PREFIX: &str = "#n";
const VALUE_PREFIX: &str = ":v";

/// Name and value maps accumulated for one compilation.
#[derive(Debug, Default)]
pub struct PlaceholderTable {
    aliases_by_segment: HashMap<String, String>,
    names: BTreeMap<String, String>,
    values: BTreeMap<String, AttributeValue>,
    next_name: usize,
    next_value: usize,
}

/// The finished maps of a [`PlaceholderTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    /// `#alias` to attribute segment.
    pub names: BTreeMap<String, String>,
    /// `:alias` to literal.
    pub values: BTreeMap<String, AttributeValue>,
}

impl PlaceholderTable {
    /// An empty table; numbering starts at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias for one attribute segment, reusing an earlier alias if present.
    pub fn name(&mut self, segment: &str) -> String {
        if let Some(alias) = self.aliases_by_segment.get(segment) {
            return alias.clone();
        }
        let alias = format!("{NAME_PREFIX}{}", self.next_name);
        self.next_name += 1;
        self.aliases_by_segment
            .insert(segment.to_owned(), alias.clone());
        self.names.insert(alias.clone(), segment.to_owned());
        alias
    }

    /// Fresh alias for a literal.
    pub fn value(&mut self, value: AttributeValue) -> String {
        let alias = format!("{VALUE_PREFIX}{}", self.next_value);
        self.next_value += 1;
        self.values.insert(alias.clone(), value);
        alias
    }

    /// Render a path with each named segment replaced by its alias.
    pub fn path(&mut self, path: &AttributePath) -> String {
        let mut rendered = String::new();
        for (i, elem) in path.elements.iter().enumerate() {
            match elem {
                PathElement::Attribute(name) => {
                    if i > 0 {
                        rendered.push('.');
                    }
                    let alias = self.name(name);
                    rendered.push_str(&alias);
                }
                PathElement::Index(idx) => {
                    let _ = write!(rendered, "[{idx}]");
                }
            }
        }
        rendered
    }

    /// Number of name aliases allocated so far.
    #[must_use]
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// Number of value aliases allocated so far.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Consume the table, yielding its maps.
    #[must_use]
    pub fn finish(self) -> Placeholders {
        Placeholders {
            names: self.names,
            values: self.values,
        }
    }
}
