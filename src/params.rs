//! Parsed parameter container and its access surface.

use std::collections::HashMap;
use std::rc::Rc;

use crate::Context;
use crate::error::Error;
use crate::parser;
use crate::value::{Kind, Value};

/// One parsed unit of markup: an optional attribute name and a typed
/// value. Flags and attributes carry a name; positionals do not.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub(crate) name: Option<String>,
    pub(crate) value: Value,
}

impl Entry {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Ordered entries plus a name index over the attribute entries.
///
/// Named entries keep their place in the ordered sequence; the index
/// maps each name to its latest occurrence. A render context binds to
/// the container at most once.
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    context: Option<Rc<Context>>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tag-argument markup into a parameter list.
    pub fn parse(markup: &str) -> Result<Self, Error> {
        parser::parse(markup)
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        if let Some(name) = &entry.name {
            self.index.insert(name.clone(), self.entries.len());
        }
        self.entries.push(entry);
    }

    /// Attach the render context, binding every variable entry. The
    /// container binds exactly once; a second attach is refused.
    pub fn attach(&mut self, context: Rc<Context>) -> Result<(), Error> {
        if self.context.is_some() {
            return Err(Error::ContextAttached);
        }
        for entry in &mut self.entries {
            if let Kind::Variable(variable) = &mut entry.value.kind {
                variable.attach(Rc::clone(&context))?;
            }
        }
        self.context = Some(context);
        Ok(())
    }

    pub fn bound(&self) -> bool {
        self.context.is_some()
    }

    /// Value of the n-th entry in source order, named entries included.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.entries.get(index).map(|entry| &entry.value)
    }

    /// Value of the latest entry with the given attribute name.
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.index.get(name).map(|&at| &self.entries[at].value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in source order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Unnamed entries with a 1-based running position.
    pub fn positionals(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.entries
            .iter()
            .filter(|entry| entry.name.is_none())
            .enumerate()
            .map(|(at, entry)| (at + 1, &entry.value))
    }

    /// Attribute name/value pairs in source order; a name assigned twice
    /// yields only its latest value.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().enumerate().filter_map(|(at, entry)| {
            let name = entry.name.as_deref()?;
            (self.index[name] == at).then_some((name, &entry.value))
        })
    }
}
