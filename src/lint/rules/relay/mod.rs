//! Rules for the Relay cursor connections pattern: `*Connection` types wrap a list of `*Edge`
//! types and a `PageInfo`, and every edge pairs a `node` with a `cursor`.
//!
//! [Reference](https://relay.dev/graphql/connections.htm)

mod connection_types;
mod edge_types;
mod page_info;

pub use connection_types::*;
pub use edge_types::*;
pub use page_info::*;

pub(crate) const CONNECTION_SUFFIX: &str = "Connection";
pub(crate) const EDGE_SUFFIX: &str = "Edge";
pub(crate) const PAGE_INFO_TYPE: &str = "PageInfo";
pub(crate) const NODE_INTERFACE: &str = "Node";

pub(crate) const EDGES_FIELD: &str = "edges";
pub(crate) const PAGE_INFO_FIELD: &str = "pageInfo";
pub(crate) const NODE_FIELD: &str = "node";
pub(crate) const CURSOR_FIELD: &str = "cursor";

/// Strips a suffix from a name, ignoring ASCII case. Returns `None` if the name doesn't end
/// with the suffix.
pub(crate) fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    if !name.is_char_boundary(split) {
        return None;
    }
    let (prefix, tail) = name.split_at(split);
    if tail.eq_ignore_ascii_case(suffix) {
        Some(prefix)
    } else {
        None
    }
}
