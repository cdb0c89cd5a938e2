//! Dotted-path lookup into a render context.

use crate::Context;

/// Resolve a dotted name against a context, indexing one segment at a
/// time. A missing segment short-circuits to `None` rather than an error.
pub fn lookup<'a>(context: &'a Context, name: &str) -> Option<&'a Context> {
    let mut current = context;
    for segment in name.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}
