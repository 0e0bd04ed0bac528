//! Paths to the parts of a value addressed by lenses.
use smallvec::SmallVec;
use std::fmt;

/// One primitive access step: a struct field or an index in a linear collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(&'static str),
    Index(usize),
}

/// A value that identifies the part of a value of type `A` that a lens over `A` looks at.
///
/// If two lenses over the same type have equal paths, they access the same component.
/// The empty path is the root, i.e. the whole value. Lenses that can't describe what they
/// access (e.g. lenses built from arbitrary functions) also report the root, which
/// conservatively overlaps every other path.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(SmallVec<[PathSegment; 4]>);

impl FieldPath {
    /// The path to the whole value.
    pub fn root() -> FieldPath {
        FieldPath(SmallVec::new())
    }

    /// Single field access.
    pub fn field(name: &'static str) -> FieldPath {
        let mut segments = SmallVec::new();
        segments.push(PathSegment::Field(name));
        FieldPath(segments)
    }

    /// Single indexing operation.
    pub fn index(index: usize) -> FieldPath {
        let mut segments = SmallVec::new();
        segments.push(PathSegment::Index(index));
        FieldPath(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Concatenates two paths: `self` followed by `rest`.
    pub fn join(mut self, rest: &FieldPath) -> FieldPath {
        self.0.extend_from_slice(&rest.0);
        self
    }

    /// Returns whether `prefix` is a prefix of this path (every path starts with the root).
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Removes `prefix` from this path. Returns `None` if this path is not under `prefix`.
    pub fn strip_prefix(&self, prefix: &FieldPath) -> Option<FieldPath> {
        if self.starts_with(prefix) {
            Some(FieldPath(self.0[prefix.0.len()..].iter().copied().collect()))
        } else {
            None
        }
    }

    /// Returns whether a change at one path may affect the value at the other.
    pub fn overlaps(&self, other: &FieldPath) -> bool {
        self.starts_with(other) || other.starts_with(self)
    }
}

impl From<PathSegment> for FieldPath {
    fn from(segment: PathSegment) -> Self {
        let mut segments = SmallVec::new();
        segments.push(segment);
        FieldPath(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return write!(f, "<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags_2_name() -> FieldPath {
        FieldPath::field("tags")
            .join(&FieldPath::index(2))
            .join(&FieldPath::field("name"))
    }

    #[test]
    fn display() {
        assert_eq!(FieldPath::root().to_string(), "<root>");
        assert_eq!(FieldPath::field("count").to_string(), "count");
        assert_eq!(FieldPath::index(3).to_string(), "[3]");
        assert_eq!(tags_2_name().to_string(), "tags[2].name");
    }

    #[test]
    fn prefixes() {
        let path = tags_2_name();
        let tags = FieldPath::field("tags");

        assert!(path.starts_with(&FieldPath::root()));
        assert!(path.starts_with(&tags));
        assert!(!tags.starts_with(&path));
        assert_eq!(
            path.strip_prefix(&tags),
            Some(FieldPath::index(2).join(&FieldPath::field("name")))
        );
        assert_eq!(path.strip_prefix(&FieldPath::field("count")), None);
        assert_eq!(tags.strip_prefix(&tags), Some(FieldPath::root()));
    }

    #[test]
    fn overlap() {
        let path = tags_2_name();
        assert!(path.overlaps(&FieldPath::field("tags")));
        assert!(FieldPath::field("tags").overlaps(&path));
        assert!(FieldPath::root().overlaps(&path));
        assert!(!path.overlaps(&FieldPath::field("count")));
        assert!(!path.overlaps(&FieldPath::field("tags").join(&FieldPath::index(1))));
    }
}
