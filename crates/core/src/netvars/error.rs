//! Resolution error taxonomy

/// What a failed lookup was looking for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NetvarErrorKind {
    Class,
    Subclass,
    Property,
    Syntax,
    Overflow,
}

/// Error type for netvar path resolution
///
/// Every variant carries the specific name that was missing (or the
/// offending path, for [`NetvarError::InvalidPath`] and
/// [`NetvarError::OffsetOverflow`]).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NetvarError {
    /// The first path segment does not name a root class
    #[error("Class not found: {0}")]
    ClassNotFound(String),

    /// A nested table lookup found nothing
    #[error("Subclass not found: {0}")]
    SubclassNotFound(String),

    /// A property lookup within a resolved class found nothing
    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    /// The path has no property segments or contains an empty segment
    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    /// The summed offsets of a chained path do not fit in an `i32`
    #[error("Offset overflow: {0}")]
    OffsetOverflow(String),
}

impl NetvarError {
    /// Generic kind of the failure
    pub fn kind(&self) -> NetvarErrorKind {
        match self {
            Self::ClassNotFound(_) => NetvarErrorKind::Class,
            Self::SubclassNotFound(_) => NetvarErrorKind::Subclass,
            Self::PropertyNotFound(_) => NetvarErrorKind::Property,
            Self::InvalidPath(_) => NetvarErrorKind::Syntax,
            Self::OffsetOverflow(_) => NetvarErrorKind::Overflow,
        }
    }

    /// The missing name (or offending path)
    pub fn name(&self) -> &str {
        match self {
            Self::ClassNotFound(name)
            | Self::SubclassNotFound(name)
            | Self::PropertyNotFound(name)
            | Self::InvalidPath(name)
            | Self::OffsetOverflow(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_kind_and_name() {
        assert_eq!(
            NetvarError::ClassNotFound("Ghost".into()).to_string(),
            "Class not found: Ghost"
        );
        assert_eq!(
            NetvarError::SubclassNotFound("DT_Local".into()).to_string(),
            "Subclass not found: DT_Local"
        );
        assert_eq!(
            NetvarError::PropertyNotFound("bogus".into()).to_string(),
            "Property not found: bogus"
        );
    }

    #[test]
    fn test_kind_and_name() {
        let err = NetvarError::PropertyNotFound("m_iHealth".into());
        assert_eq!(err.kind(), NetvarErrorKind::Property);
        assert_eq!(err.name(), "m_iHealth");
        assert_eq!(
            NetvarError::InvalidPath("Player.".into()).kind(),
            NetvarErrorKind::Syntax
        );
        let overflow = NetvarError::OffsetOverflow("R.a.b".into());
        assert_eq!(overflow.kind(), NetvarErrorKind::Overflow);
        assert_eq!(overflow.to_string(), "Offset overflow: R.a.b");
    }
}
