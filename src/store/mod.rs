//! In-memory ordered profile store.
//!
//! A plain unbalanced binary search tree keyed by full name ("Last, First").
//! Shape depends entirely on insertion order; no rebalancing is performed.
//! Every node exclusively owns its profile and subtrees, so deletions are
//! expressed as ownership transfers rather than pointer aliasing.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::analysis;
use crate::models::Profile;

/// Node of the profile tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    name: String,
    profile: Profile,
    left: Option<Box<TreeNode>>,
    right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, profile: Profile) -> Self {
        Self {
            name: name.into(),
            profile,
            left: None,
            right: None,
        }
    }

    /// Builds a node with pre-attached subtrees, for injecting tree shapes
    /// directly in test harnesses.
    pub fn with_children(
        name: impl Into<String>,
        profile: Profile,
        left: Option<TreeNode>,
        right: Option<TreeNode>,
    ) -> Self {
        Self {
            name: name.into(),
            profile,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn left(&self) -> Option<&TreeNode> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&TreeNode> {
        self.right.as_deref()
    }
}

/// The forensic profile database: a name-keyed BST plus the two unknown
/// sequences under investigation. Sequences are set once at load time and
/// stay fixed for the lifetime of a scan; the setter exists for loaders and
/// test harnesses.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    root: Option<Box<TreeNode>>,
    first_unknown_sequence: String,
    second_unknown_sequence: String,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    pub fn set_root(&mut self, root: Option<TreeNode>) {
        self.root = root.map(Box::new);
    }

    pub fn first_unknown_sequence(&self) -> &str {
        &self.first_unknown_sequence
    }

    pub fn second_unknown_sequence(&self) -> &str {
        &self.second_unknown_sequence
    }

    pub fn set_unknown_sequences(
        &mut self,
        first: impl Into<String>,
        second: impl Into<String>,
    ) {
        self.first_unknown_sequence = first.into();
        self.second_unknown_sequence = second.into();
    }

    /// Inserts a person keyed by full name. Inserting a name that is already
    /// present leaves the existing profile untouched.
    pub fn insert(&mut self, name: impl Into<String>, profile: Profile) {
        insert_node(&mut self.root, name.into(), profile);
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        let mut node = self.root.as_deref();
        while let Some(current) = node {
            node = match name.cmp(current.name.as_str()) {
                Ordering::Less => current.left.as_deref(),
                Ordering::Greater => current.right.as_deref(),
                Ordering::Equal => return Some(&current.profile),
            };
        }
        None
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Profile> {
        let mut node = self.root.as_deref_mut();
        while let Some(current) = node {
            node = match name.cmp(current.name.as_str()) {
                Ordering::Less => current.left.as_deref_mut(),
                Ordering::Greater => current.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut current.profile),
            };
        }
        None
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        count_nodes(self.root.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of profiles whose interest flag equals `of_interest`.
    pub fn count_by_interest(&self, of_interest: bool) -> usize {
        count_by_interest(self.root.as_deref(), of_interest)
    }

    /// Marks every profile that matches the unknown sequences as of interest.
    ///
    /// Each profile is decided independently via [`analysis::evaluate_profile`];
    /// already-flagged profiles stay flagged, so repeated scans are idempotent.
    pub fn flag_profiles_of_interest(&mut self) {
        let Self {
            root,
            first_unknown_sequence,
            second_unknown_sequence,
        } = self;
        flag_in_order(
            root.as_deref_mut(),
            first_unknown_sequence,
            second_unknown_sequence,
        );
    }

    /// Names of profiles not marked of interest, collected in level order
    /// (breadth first, left child before right).
    pub fn unmarked_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.count_by_interest(false));
        let mut queue = VecDeque::new();
        if let Some(root) = self.root.as_deref() {
            queue.push_back(root);
        }
        while let Some(node) = queue.pop_front() {
            if !node.profile.of_interest {
                names.push(node.name.clone());
            }
            if let Some(left) = node.left.as_deref() {
                queue.push_back(left);
            }
            if let Some(right) = node.right.as_deref() {
                queue.push_back(right);
            }
        }
        names
    }

    /// Removes the named profile. Absent names are ignored.
    pub fn remove(&mut self, name: &str) {
        remove_node(&mut self.root, name);
    }

    /// Purges every profile still unmarked and returns their names.
    ///
    /// Removal order follows the collected level-order list; deletions can
    /// restructure subtrees but never change which of the collected names
    /// remain present, so the sequential removal is safe.
    pub fn cleanup(&mut self) -> Vec<String> {
        let unmarked = self.unmarked_names();
        for name in &unmarked {
            self.remove(name);
        }
        unmarked
    }

    /// Every (name, profile) pair in ascending name order.
    pub fn entries_in_order(&self) -> Vec<(&str, &Profile)> {
        let mut entries = Vec::new();
        collect_in_order(self.root.as_deref(), &mut entries);
        entries
    }
}

fn insert_node(slot: &mut Option<Box<TreeNode>>, name: String, profile: Profile) {
    match slot {
        None => *slot = Some(Box::new(TreeNode::new(name, profile))),
        Some(node) => match name.cmp(&node.name) {
            Ordering::Less => insert_node(&mut node.left, name, profile),
            Ordering::Greater => insert_node(&mut node.right, name, profile),
            // Duplicate key: the existing subtree is kept as-is.
            Ordering::Equal => {}
        },
    }
}

fn count_nodes(node: Option<&TreeNode>) -> usize {
    match node {
        None => 0,
        Some(node) => {
            1 + count_nodes(node.left.as_deref()) + count_nodes(node.right.as_deref())
        }
    }
}

fn count_by_interest(node: Option<&TreeNode>, of_interest: bool) -> usize {
    match node {
        None => 0,
        Some(node) => {
            count_by_interest(node.left.as_deref(), of_interest)
                + usize::from(node.profile.of_interest == of_interest)
                + count_by_interest(node.right.as_deref(), of_interest)
        }
    }
}

fn flag_in_order(node: Option<&mut TreeNode>, first: &str, second: &str) {
    let Some(node) = node else {
        return;
    };
    flag_in_order(node.left.as_deref_mut(), first, second);
    if analysis::evaluate_profile(&node.profile, first, second).of_interest {
        node.profile.of_interest = true;
    }
    flag_in_order(node.right.as_deref_mut(), first, second);
}

fn collect_in_order<'a>(node: Option<&'a TreeNode>, out: &mut Vec<(&'a str, &'a Profile)>) {
    if let Some(node) = node {
        collect_in_order(node.left.as_deref(), out);
        out.push((node.name.as_str(), &node.profile));
        collect_in_order(node.right.as_deref(), out);
    }
}

fn remove_node(slot: &mut Option<Box<TreeNode>>, name: &str) {
    let Some(node) = slot.as_deref_mut() else {
        return;
    };
    match name.cmp(node.name.as_str()) {
        Ordering::Less => remove_node(&mut node.left, name),
        Ordering::Greater => remove_node(&mut node.right, name),
        Ordering::Equal => {
            let Some(node) = slot.take() else {
                return;
            };
            let TreeNode { left, right, .. } = *node;
            *slot = match (left, right) {
                (None, right) => right,
                (left, None) => left,
                (Some(left), Some(right)) => {
                    // In-order successor: minimum of the right subtree takes
                    // over this position, adopting both remaining subtrees.
                    let (mut successor, remainder) = detach_min(right);
                    successor.left = Some(left);
                    successor.right = remainder;
                    Some(successor)
                }
            };
        }
    }
}

/// Detaches the minimum node of the subtree, splicing the minimum's right
/// child into its vacated slot. Returns the detached node and the remaining
/// subtree.
fn detach_min(mut node: Box<TreeNode>) -> (Box<TreeNode>, Option<Box<TreeNode>>) {
    match node.left.take() {
        None => {
            let remainder = node.right.take();
            (node, remainder)
        }
        Some(left) => {
            let (min, remainder) = detach_min(left);
            node.left = remainder;
            (min, Some(node))
        }
    }
}
