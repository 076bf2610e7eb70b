//! Key namespacing: `<entity-type>:<id>`.

/// Namespace for makeup items.
pub const ITEM_NAMESPACE: &str = "item";

/// Prefix shared by every makeup-item key.
pub const ITEM_PREFIX: &str = "item:";

pub fn namespaced_key(namespace: &str, id: &str) -> String {
    format!("{namespace}:{id}")
}

/// Key of the makeup item with the given id.
pub fn item_key(id: &str) -> String {
    namespaced_key(ITEM_NAMESPACE, id)
}
