//! A resizable sequence container backed by an order-statistics AVL tree.
//!
//! [`AvlVector`] behaves like an indexable array, but insertion, removal
//! and single-element splicing anywhere in the sequence cost O(log n)
//! instead of O(n). Every node carries its subtree size, so positional
//! access and rank queries are logarithmic as well. Bulk operations
//! (`sort`, `merge`, `dedup`, range splices) flatten the tree to an array
//! of nodes and rebuild a perfectly balanced tree in O(n).
//!
//! ```
//! use avl_vector::AvlVector;
//!
//! let mut v = AvlVector::new();
//! for x in [5, 3, 8, 1, 4] {
//!     v.push_back(x);
//! }
//! v.insert(2, 7);
//! assert_eq!(v[2], 7);
//! assert_eq!(v.len(), 6);
//!
//! v.sort();
//! assert_eq!(v.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8]);
//! ```
//!
//! Elements can also be addressed through stable [`NodeId`] handles,
//! which survive rotations and whole-container rebuilds and detect their
//! own staleness:
//!
//! ```
//! use avl_vector::AvlVector;
//!
//! let mut v: AvlVector<i32> = (0..10).collect();
//! let id = v.node_at(7).unwrap();
//! v.sort();
//! assert_eq!(v.get_node(id), Ok(&7));
//! v.remove_node(id).unwrap();
//! assert!(v.get_node(id).is_err());
//! ```

mod tree;
mod vector;

pub use vector::{AvlVector, Cursor, Error, IntoIter, Iter, IterMut, NodeId, Result};
