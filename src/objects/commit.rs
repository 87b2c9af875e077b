use crate::objects::author::Author;
use crate::objects::object::{self, Object};
use crate::objects::object_id::ObjectId;
use crate::objects::object_type::ObjectType;
use bytes::Bytes;
use std::io::Write;

/// A snapshot of the tree plus its place in history.
///
/// Canonical content is UTF-8 text: a `tree` line, a `parent` line omitted
/// entirely for the root commit, identical `author` and `committer` lines,
/// a blank line, then the message bytes.
#[derive(Debug, Clone)]
pub struct Commit {
    parent: Option<ObjectId>,
    tree_oid: ObjectId,
    author: Author,
    message: String,
    oid: Option<ObjectId>,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        message: String,
    ) -> Self {
        Commit {
            parent,
            tree_oid,
            author,
            message,
            oid: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// First line of the message, for command output.
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn serialize(&self) -> anyhow::Result<Bytes> {
        let author_line = self.author.display();

        let mut content = Vec::new();
        writeln!(content, "tree {}", self.tree_oid)?;
        if let Some(parent) = &self.parent {
            writeln!(content, "parent {parent}")?;
        }
        writeln!(content, "author {author_line}")?;
        writeln!(content, "committer {author_line}")?;
        writeln!(content)?;
        content.write_all(self.message.as_bytes())?;

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
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use sha1::{Digest, Sha1};

    #[fixture]
    fn author() -> Author {
        Author::new_with_timestamp(
            "Alex".to_string(),
            "alex@example.com".to_string(),
            chrono::DateTime::parse_from_rfc3339("2024-01-01T12:00:00+00:00").unwrap(),
        )
    }

    #[fixture]
    fn tree_oid() -> ObjectId {
        ObjectId::from_digest(&Sha1::digest(b"tree"))
    }

    #[rstest]
    fn root_commit_serializes_without_a_parent_line(author: Author, tree_oid: ObjectId) {
        let commit = Commit::new(None, tree_oid.clone(), author, "initial\n".to_string());
        let content = String::from_utf8(commit.serialize().unwrap().to_vec()).unwrap();

        assert!(commit.is_root());
        assert!(content.starts_with(&format!("tree {tree_oid}\n")));
        assert!(!content.contains("parent"));
        assert!(content.ends_with("\n\ninitial\n"));
    }

    #[rstest]
    fn child_commit_carries_one_parent_line_after_the_tree_line(
        author: Author,
        tree_oid: ObjectId,
    ) {
        let parent = ObjectId::from_digest(&Sha1::digest(b"parent"));
        let commit = Commit::new(
            Some(parent.clone()),
            tree_oid.clone(),
            author,
            "second".to_string(),
        );
        let content = String::from_utf8(commit.serialize().unwrap().to_vec()).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], format!("tree {tree_oid}"));
        assert_eq!(lines[1], format!("parent {parent}"));
        assert_eq!(content.matches("parent ").count(), 1);
        assert!(lines[2].starts_with("author "));
        assert!(lines[3].starts_with("committer "));
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "second");
    }

    #[rstest]
    fn author_and_committer_lines_are_identical(author: Author, tree_oid: ObjectId) {
        let commit = Commit::new(None, tree_oid, author.clone(), "msg".to_string());
        let content = String::from_utf8(commit.serialize().unwrap().to_vec()).unwrap();

        assert!(content.contains(&format!("author {}\n", author.display())));
        assert!(content.contains(&format!("committer {}\n", author.display())));
    }
}
