//! Composite key construction
//!
//! Records are addressed by the flat string `"/" + namespace + "/" + id`.
//! Namespace-prefix routing relies on this exact shape, so it must not change.

use crate::item::Item;

/// Separator between the key segments
pub const SEP: char = '/';

/// Build the composite key for a namespace and id
pub fn composite_key(namespace: &str, id: &str) -> String {
    let mut key = String::with_capacity(namespace.len() + id.len() + 2);
    key.push(SEP);
    key.push_str(namespace);
    key.push(SEP);
    key.push_str(id);
    key
}

/// Composite key of an item
pub fn item_key(item: &dyn Item) -> String {
    composite_key(item.namespace(), item.id())
}

/// Prefix shared by every composite key in a namespace
///
/// Includes the trailing separator so that namespace `NS` does not match
/// keys of namespace `NSX`.
pub fn namespace_prefix(namespace: &str) -> String {
    let mut prefix = String::with_capacity(namespace.len() + 2);
    prefix.push(SEP);
    prefix.push_str(namespace);
    prefix.push(SEP);
    prefix
}
