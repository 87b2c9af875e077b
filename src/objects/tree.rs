use crate::objects::entry::Entry;
use crate::objects::entry_mode::EntryMode;
use crate::objects::object::{self, Object};
use crate::objects::object_id::ObjectId;
use crate::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// A child of a tree node: either a staged file or a nested directory.
#[derive(Debug, Clone)]
enum TreeNode {
    File(Entry),
    Subtree(Tree),
}

impl TreeNode {
    fn mode(&self) -> &EntryMode {
        match self {
            TreeNode::File(entry) => entry.mode(),
            TreeNode::Subtree(_) => &EntryMode::Directory,
        }
    }

    fn oid(&self) -> anyhow::Result<&ObjectId> {
        match self {
            TreeNode::File(entry) => Ok(entry.oid()),
            TreeNode::Subtree(tree) => tree.oid(),
        }
    }
}

/// A directory snapshot: an ordered-by-name mapping from basename to child.
///
/// Canonical content concatenates `<mode> <basename>\0` plus the raw
/// 20-byte child digest across basenames in ascending byte order, so the
/// identifier depends only on children, never on insertion order.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    entries: BTreeMap<String, TreeNode>,
    oid: Option<ObjectId>,
}

impl Tree {
    /// Build the hierarchy from a flat list of records.
    ///
    /// Entries are sorted by path first so traversal order is reproducible
    /// run to run; the resulting identifiers are order-independent either
    /// way.
    pub fn build(mut entries: Vec<Entry>) -> anyhow::Result<Self> {
        entries.sort_by(|a, b| a.name().cmp(b.name()));

        let mut root = Tree::default();
        for entry in entries {
            let parents = entry
                .parent_dirs()
                .into_iter()
                .map(Path::to_path_buf)
                .collect::<Vec<_>>();
            root.add_entry(&parents, entry)?;
        }

        Ok(root)
    }

    /// Insert one entry given its ancestor directory chain, creating
    /// intermediate trees as needed. Existing intermediates are reused, so
    /// two entries sharing a prefix share exactly one node.
    fn add_entry(&mut self, parents: &[std::path::PathBuf], entry: Entry) -> anyhow::Result<()> {
        if parents.is_empty() {
            self.entries
                .insert(entry.basename()?.to_string(), TreeNode::File(entry));
            return Ok(());
        }

        let dirname = parents[0]
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("invalid directory name {:?}", parents[0]))?
            .to_string();

        let node = self
            .entries
            .entry(dirname.clone())
            .or_insert_with(|| TreeNode::Subtree(Tree::default()));

        match node {
            TreeNode::Subtree(tree) => tree.add_entry(&parents[1..], entry),
            TreeNode::File(_) => anyhow::bail!("path component {dirname:?} is already a file"),
        }
    }

    /// Post-order traversal: every nested tree exactly once, descendants
    /// strictly before ancestors, so each parent serializes with already
    /// assigned child identifiers.
    pub fn traverse<F>(&mut self, func: &mut F) -> anyhow::Result<()>
    where
        F: FnMut(&mut Tree) -> anyhow::Result<()>,
    {
        for node in self.entries.values_mut() {
            if let TreeNode::Subtree(tree) = node {
                tree.traverse(func)?;
            }
        }
        func(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    fn subtree(&self, name: &str) -> Option<&Tree> {
        match self.entries.get(name) {
            Some(TreeNode::Subtree(tree)) => Some(tree),
            _ => None,
        }
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content = Vec::new();
        for (name, node) in &self.entries {
            write!(content, "{} {name}\0", node.mode().as_str())?;
            content.write_all(&node.oid()?.raw_bytes()?)?;
        }

        Ok(Bytes::from(content))
    }

    fn oid(&self) -> anyhow::Result<&ObjectId> {
        object::read_oid_slot(&self.oid)
    }

    fn set_oid(&mut self, oid: ObjectId) -> anyhow::Result<()> {
        object::fill_oid_slot(&mut self.oid, oid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ObjectError;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use sha1::{Digest, Sha1};
    use std::path::PathBuf;

    fn oid_of(data: &[u8]) -> ObjectId {
        ObjectId::from_digest(&Sha1::digest(data))
    }

    fn entry(path: &str, data: &[u8]) -> Entry {
        Entry::new(PathBuf::from(path), oid_of(data), EntryMode::Regular)
    }

    /// Assign identifiers bottom-up the way the database does during a
    /// commit: hash the type-and-length-prefixed content of each tree in
    /// post-order.
    fn assign_oids(root: &mut Tree) -> anyhow::Result<Vec<ObjectId>> {
        let mut stored = Vec::new();
        root.traverse(&mut |tree: &mut Tree| {
            let content = tree.serialize()?;
            let mut envelope = format!("tree {}\0", content.len()).into_bytes();
            envelope.extend_from_slice(&content);
            let oid = ObjectId::from_digest(&Sha1::digest(&envelope));
            tree.set_oid(oid.clone())?;
            stored.push(oid);
            Ok(())
        })?;
        Ok(stored)
    }

    #[fixture]
    fn flat_entries() -> Vec<Entry> {
        vec![entry("b.txt", b"one"), entry("a.txt", b"two")]
    }

    #[rstest]
    fn insertion_order_does_not_change_the_root_identifier(flat_entries: Vec<Entry>) {
        let reversed: Vec<Entry> = flat_entries.iter().cloned().rev().collect();

        let mut forward = Tree::build(flat_entries).unwrap();
        let mut backward = Tree::build(reversed).unwrap();

        let forward_oids = assign_oids(&mut forward).unwrap();
        let backward_oids = assign_oids(&mut backward).unwrap();

        assert_eq!(forward_oids, backward_oids);
        assert_eq!(forward.oid().unwrap(), backward.oid().unwrap());
    }

    #[test]
    fn nested_entries_produce_a_subtree_and_a_direct_child() {
        let mut root = Tree::build(vec![
            entry("a/b.txt", b"nested"),
            entry("c.txt", b"toplevel"),
        ])
        .unwrap();

        assert_eq!(root.len(), 2);
        let subtree = root.subtree("a").expect("directory `a` should be a tree");
        assert_eq!(subtree.len(), 1);

        // post-order: subtree `a` is assigned before the root
        let stored = assign_oids(&mut root).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(&stored[0], root.subtree("a").unwrap().oid().unwrap());
        assert_eq!(&stored[1], root.oid().unwrap());
    }

    #[test]
    fn entries_sharing_a_prefix_share_one_intermediate_tree() {
        let mut root = Tree::build(vec![
            entry("shared/one.txt", b"1"),
            entry("shared/two.txt", b"2"),
            entry("shared/deep/three.txt", b"3"),
        ])
        .unwrap();

        assert_eq!(root.len(), 1);
        let shared = root.subtree("shared").unwrap();
        assert_eq!(shared.len(), 3);
        assert_eq!(shared.subtree("deep").unwrap().len(), 1);

        // three trees in total: shared/deep, shared, root
        let stored = assign_oids(&mut root).unwrap();
        assert_eq!(stored.len(), 3);
    }

    #[test]
    fn serialization_concatenates_mode_name_and_raw_digest() {
        let file_oid = oid_of(b"payload");
        let tree = Tree::build(vec![Entry::new(
            PathBuf::from("foo.txt"),
            file_oid.clone(),
            EntryMode::Regular,
        )])
        .unwrap();

        let content = tree.serialize().unwrap();
        let mut expected = b"100644 foo.txt\0".to_vec();
        expected.extend_from_slice(&file_oid.raw_bytes().unwrap());

        assert_eq!(content.to_vec(), expected);
    }

    #[test]
    fn serializing_a_parent_before_its_children_fails_loudly() {
        let root = Tree::build(vec![entry("dir/file.txt", b"data")]).unwrap();

        let err = root.serialize().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ObjectError>(),
            Some(ObjectError::OidUnassigned)
        ));
    }
}
