//! Schema version gate state.

/// The mapping schema version this catalog understands.
pub const MAPPING_API_VERSION: i32 = 1;

/// Sentinel for maps compiled without the mapping schema at all.
pub const NO_MAPPING_API_VERSION: i32 = -1;

/// Snapshot of the `worldspawn` schema version, taken once per map load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapApiVersion {
    /// The map predates the mapping schema; the reserved legacy entity names
    /// drive an implicit single default course instead.
    #[default]
    NoApi,
    /// The map was compiled against the supported schema.
    Current,
    /// The map requires a schema this build does not understand. Fatal: the
    /// catalog stays empty for the remainder of the load.
    Unsupported(i32),
}

impl MapApiVersion {
    /// Classify a raw `worldspawn` version value.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            NO_MAPPING_API_VERSION => Self::NoApi,
            MAPPING_API_VERSION => Self::Current,
            other => Self::Unsupported(other),
        }
    }

    /// The raw version value this snapshot was taken from.
    pub fn raw(self) -> i32 {
        match self {
            Self::NoApi => NO_MAPPING_API_VERSION,
            Self::Current => MAPPING_API_VERSION,
            Self::Unsupported(raw) => raw,
        }
    }

    /// Whether this version aborts the load.
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_classification() {
        assert_eq!(MapApiVersion::from_raw(-1), MapApiVersion::NoApi);
        assert_eq!(MapApiVersion::from_raw(1), MapApiVersion::Current);
        assert_eq!(MapApiVersion::from_raw(999), MapApiVersion::Unsupported(999));
        assert_eq!(MapApiVersion::from_raw(0), MapApiVersion::Unsupported(0));
    }

    #[test]
    fn test_raw_roundtrip() {
        for raw in [-1, 1, 0, 2, 999] {
            assert_eq!(MapApiVersion::from_raw(raw).raw(), raw);
        }
    }

    #[test]
    fn test_only_unsupported_is_fatal() {
        assert!(!MapApiVersion::NoApi.is_fatal());
        assert!(!MapApiVersion::Current.is_fatal());
        assert!(MapApiVersion::Unsupported(2).is_fatal());
    }
}
