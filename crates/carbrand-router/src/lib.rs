//! carbrand-router: Zero-dependency path trie for client-side routes
//!
//! Maps URL paths onto route ids. The navigation layer in carbrand-core
//! owns route records and guards; this crate only answers "which record
//! does this path belong to".
//!
//! ## Path Syntax
//! - `/cars` - Static segment
//! - `/cars/:id` - Named parameter (captures one segment)
//! - `/files/*path` or `/files/*` - Wildcard (captures remaining path)
//!
//! ## Priority
//! 1. Exact static match (highest)
//! 2. Parameter match
//! 3. Wildcard match (lowest)
//!
//! Every path may be inserted once. A second insert of the same shape
//! (including `/cars/:id` after `/cars/:brand`) is rejected so that a
//! table can be validated at startup.
//!
//! ## Example
//! ```
//! use carbrand_router::RouteTrie;
//!
//! let mut trie = RouteTrie::new();
//! trie.insert("/login", 0).unwrap();
//! trie.insert("/cars/:id", 1).unwrap();
//! assert!(trie.insert("/login/", 2).is_err());
//!
//! let m = trie.find("/cars/42").unwrap();
//! assert_eq!(m.route_id, 1);
//! assert_eq!(m.params, vec![("id".to_string(), "42".to_string())]);
//! ```

use std::collections::HashMap;
use std::fmt;

/// Path match result
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Id of the matched route
    pub route_id: u32,
    /// Captured path parameters as (name, value) pairs
    pub params: Vec<(String, String)>,
}

impl Match {
    /// Get params as HashMap for convenient access
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params.iter().cloned().collect()
    }
}

/// Reason a path could not be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// The path (or an equivalent shape) is already registered
    Conflict { path: String, existing: u32 },
    /// A segment is malformed (`:` without a name, wildcard not last)
    InvalidSegment { path: String, segment: String },
    /// Path does not start with `/`
    NotAbsolute(String),
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { path, existing } => {
                write!(f, "path {} conflicts with route #{}", path, existing)
            }
            Self::InvalidSegment { path, segment } => {
                write!(f, "invalid segment {:?} in path {}", segment, path)
            }
            Self::NotAbsolute(path) => write!(f, "path {} must start with '/'", path),
        }
    }
}

impl std::error::Error for InsertError {}

/// Trie node for path segment matching
#[derive(Debug, Default)]
struct Node {
    /// Static children (key = path segment)
    children: HashMap<String, Node>,
    /// Parameter child (:id)
    param_child: Option<Box<ParamNode>>,
    /// Wildcard child (*path)
    wildcard_child: Option<Box<WildcardNode>>,
    /// Route id if this is a terminal node
    route_id: Option<u32>,
}

#[derive(Debug)]
struct ParamNode {
    name: String,
    node: Node,
}

#[derive(Debug)]
struct WildcardNode {
    name: String,
    route_id: u32,
}

/// Split a path into its non-empty segments
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Canonical form of a path: leading `/`, no empty segments, no trailing `/`
///
/// ```
/// assert_eq!(carbrand_router::normalize("cars//list/"), "/cars/list");
/// assert_eq!(carbrand_router::normalize(""), "/");
/// ```
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for segment in segments(path) {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Radix-style trie from path shape to route id
#[derive(Debug, Default)]
pub struct RouteTrie {
    root: Node,
    len: usize,
}

impl RouteTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path for `route_id`
    ///
    /// Trailing and doubled slashes are ignored, so `/cars/` and `/cars`
    /// are the same path.
    pub fn insert(&mut self, path: &str, route_id: u32) -> Result<(), InsertError> {
        if !path.starts_with('/') {
            return Err(InsertError::NotAbsolute(path.to_string()));
        }
        let segs: Vec<&str> = segments(path).collect();
        // Reject malformed paths before any node is created
        for (i, segment) in segs.iter().enumerate() {
            let bad_param = *segment == ":";
            let bad_wildcard = segment.starts_with('*') && i + 1 != segs.len();
            if bad_param || bad_wildcard {
                return Err(InsertError::InvalidSegment {
                    path: path.to_string(),
                    segment: segment.to_string(),
                });
            }
        }
        Self::insert_node(&mut self.root, path, &segs, route_id)?;
        self.len += 1;
        Ok(())
    }

    fn insert_node(
        node: &mut Node,
        path: &str,
        segs: &[&str],
        route_id: u32,
    ) -> Result<(), InsertError> {
        let Some((&segment, rest)) = segs.split_first() else {
            if let Some(existing) = node.route_id {
                return Err(InsertError::Conflict {
                    path: path.to_string(),
                    existing,
                });
            }
            node.route_id = Some(route_id);
            return Ok(());
        };

        if let Some(name) = segment.strip_prefix(':') {
            let param = node.param_child.get_or_insert_with(|| {
                Box::new(ParamNode {
                    name: name.to_string(),
                    node: Node::default(),
                })
            });
            if param.name != name {
                // Two names for one position would make params ambiguous
                return Err(InsertError::Conflict {
                    path: path.to_string(),
                    existing: first_route_id(&param.node).unwrap_or(route_id),
                });
            }
            Self::insert_node(&mut param.node, path, rest, route_id)
        } else if let Some(name) = segment.strip_prefix('*') {
            if let Some(existing) = &node.wildcard_child {
                return Err(InsertError::Conflict {
                    path: path.to_string(),
                    existing: existing.route_id,
                });
            }
            let wildcard_name = if name.is_empty() { "*" } else { name };
            node.wildcard_child = Some(Box::new(WildcardNode {
                name: wildcard_name.to_string(),
                route_id,
            }));
            Ok(())
        } else {
            let child = node.children.entry(segment.to_string()).or_default();
            Self::insert_node(child, path, rest, route_id)
        }
    }

    /// Find the route a path belongs to
    ///
    /// Returns `None` when no route matches.
    pub fn find(&self, path: &str) -> Option<Match> {
        let segs: Vec<&str> = segments(path).collect();
        let mut params = Vec::new();
        Self::find_node(&self.root, &segs, &mut params)
    }

    fn find_node(
        node: &Node,
        segs: &[&str],
        params: &mut Vec<(String, String)>,
    ) -> Option<Match> {
        let Some((&segment, rest)) = segs.split_first() else {
            return node.route_id.map(|id| Match {
                route_id: id,
                params: params.clone(),
            });
        };

        // Priority 1: exact static match
        if let Some(child) = node.children.get(segment) {
            if let Some(m) = Self::find_node(child, rest, params) {
                return Some(m);
            }
        }

        // Priority 2: parameter match
        if let Some(ref param) = node.param_child {
            params.push((param.name.clone(), segment.to_string()));
            if let Some(m) = Self::find_node(&param.node, rest, params) {
                return Some(m);
            }
            params.pop();
        }

        // Priority 3: wildcard, captures everything left
        if let Some(ref wildcard) = node.wildcard_child {
            params.push((wildcard.name.clone(), segs.join("/")));
            return Some(Match {
                route_id: wildcard.route_id,
                params: params.clone(),
            });
        }

        None
    }

    /// Number of registered paths
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn first_route_id(node: &Node) -> Option<u32> {
    node.route_id
        .or_else(|| node.wildcard_child.as_ref().map(|w| w.route_id))
        .or_else(|| node.param_child.as_ref().and_then(|p| first_route_id(&p.node)))
        .or_else(|| node.children.values().find_map(first_route_id))
}
