//! Table names.

use std::{fmt, str::FromStr};

use bytes::Bytes;

use crate::{CodecError, IdentifierError};

/// Namespace assigned to tables created without an explicit one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Separates namespace and qualifier in the string form of a table name.
const NAMESPACE_DELIMITER: char = ':';

/// A validated, namespace-qualified table name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableName {
    namespace: Bytes,
    qualifier: Bytes,
}

impl TableName {
    pub fn new(
        namespace: impl Into<Bytes>,
        qualifier: impl Into<Bytes>,
    ) -> Result<Self, IdentifierError> {
        let namespace = namespace.into();
        let qualifier = qualifier.into();
        validate_namespace(&namespace)?;
        validate_qualifier(&qualifier)?;
        Ok(Self {
            namespace,
            qualifier,
        })
    }

    /// Table in the default namespace.
    pub fn with_default_namespace(qualifier: impl Into<Bytes>) -> Result<Self, IdentifierError> {
        Self::new(Bytes::from_static(DEFAULT_NAMESPACE.as_bytes()), qualifier)
    }

    pub fn namespace(&self) -> &[u8] {
        &self.namespace
    }

    pub fn qualifier(&self) -> &[u8] {
        &self.qualifier
    }

    pub fn is_default_namespace(&self) -> bool {
        self.namespace.as_ref() == DEFAULT_NAMESPACE.as_bytes()
    }
}

fn validate_namespace(namespace: &[u8]) -> Result<(), IdentifierError> {
    if namespace.is_empty() {
        return Err(IdentifierError::EmptyNamespace);
    }
    match namespace
        .iter()
        .find(|b| !(b.is_ascii_alphanumeric() || **b == b'_'))
    {
        Some(&byte) => Err(IdentifierError::IllegalCharacter {
            part: "namespace",
            byte,
        }),
        None => Ok(()),
    }
}

fn validate_qualifier(qualifier: &[u8]) -> Result<(), IdentifierError> {
    let Some(&first) = qualifier.first() else {
        return Err(IdentifierError::EmptyQualifier);
    };
    if first == b'.' || first == b'-' {
        return Err(IdentifierError::IllegalLeadingCharacter { byte: first });
    }
    match qualifier
        .iter()
        .find(|b| !(b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.')))
    {
        Some(&byte) => Err(IdentifierError::IllegalCharacter {
            part: "qualifier",
            byte,
        }),
        None => Ok(()),
    }
}

impl FromStr for TableName {
    type Err = IdentifierError;

    /// Parses `namespace:qualifier`, or a bare qualifier in the default namespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(NAMESPACE_DELIMITER) {
            Some((namespace, qualifier)) => Self::new(
                Bytes::copy_from_slice(namespace.as_bytes()),
                Bytes::copy_from_slice(qualifier.as_bytes()),
            ),
            None => Self::with_default_namespace(Bytes::copy_from_slice(s.as_bytes())),
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Validated names are ASCII, so the lossy conversion never substitutes.
        let qualifier = String::from_utf8_lossy(&self.qualifier);
        if self.is_default_namespace() {
            write!(f, "{qualifier}")
        } else {
            let namespace = String::from_utf8_lossy(&self.namespace);
            write!(f, "{namespace}{NAMESPACE_DELIMITER}{qualifier}")
        }
    }
}

impl TryFrom<crate::proto::space_quota::TableName> for TableName {
    type Error = CodecError;

    fn try_from(value: crate::proto::space_quota::TableName) -> Result<Self, Self::Error> {
        Ok(Self::new(value.namespace, value.qualifier)?)
    }
}

impl From<&TableName> for crate::proto::space_quota::TableName {
    fn from(value: &TableName) -> Self {
        crate::proto::space_quota::TableName {
            namespace: value.namespace.to_vec(),
            qualifier: value.qualifier.to_vec(),
        }
    }
}

impl<'a> arbitrary::Arbitrary<'a> for TableName {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        const NAMESPACE_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789_";
        const LEADING_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        const QUALIFIER_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_-.";

        let namespace = if u.arbitrary()? {
            Bytes::from_static(DEFAULT_NAMESPACE.as_bytes())
        } else {
            let len = u.int_in_range(1..=8)?;
            (0..len)
                .map(|_| u.choose(NAMESPACE_CHARS).copied())
                .collect::<arbitrary::Result<Vec<u8>>>()?
                .into()
        };

        let mut qualifier = vec![*u.choose(LEADING_CHARS)?];
        let rest = u.int_in_range(0..=15)?;
        for _ in 0..rest {
            qualifier.push(*u.choose(QUALIFIER_CHARS)?);
        }

        Self::new(namespace, qualifier).map_err(|_| arbitrary::Error::IncorrectFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use proptest_arbitrary_interop::arb;

    #[test]
    fn test_parse_default_namespace() {
        let table: TableName = "table1".parse().unwrap();
        assert!(table.is_default_namespace());
        assert_eq!(table.qualifier(), b"table1");
        assert_eq!(table.to_string(), "table1");
    }

    #[test]
    fn test_parse_explicit_namespace() {
        let table: TableName = "quota:usage.v2".parse().unwrap();
        assert_eq!(table.namespace(), b"quota");
        assert_eq!(table.qualifier(), b"usage.v2");
        assert_eq!(table.to_string(), "quota:usage.v2");
    }

    #[test]
    fn test_default_namespace_equals_explicit_default() {
        let bare: TableName = "t".parse().unwrap();
        let explicit: TableName = "default:t".parse().unwrap();
        assert_eq!(bare, explicit);
    }

    #[test]
    fn test_rejects_invalid_names() {
        assert_matches!(
            "".parse::<TableName>(),
            Err(IdentifierError::EmptyQualifier)
        );
        assert_matches!(
            ":t".parse::<TableName>(),
            Err(IdentifierError::EmptyNamespace)
        );
        assert_matches!(
            "-t".parse::<TableName>(),
            Err(IdentifierError::IllegalLeadingCharacter { byte: b'-' })
        );
        assert_matches!(
            "ns.x:t".parse::<TableName>(),
            Err(IdentifierError::IllegalCharacter {
                part: "namespace",
                byte: b'.'
            })
        );
        assert_matches!(
            "a b".parse::<TableName>(),
            Err(IdentifierError::IllegalCharacter {
                part: "qualifier",
                byte: b' '
            })
        );
    }

    #[test]
    fn test_proto_rejects_empty_qualifier() {
        let proto = crate::proto::space_quota::TableName {
            namespace: DEFAULT_NAMESPACE.as_bytes().to_vec(),
            qualifier: Vec::new(),
        };
        assert_matches!(
            TableName::try_from(proto),
            Err(CodecError::MalformedIdentifier(
                IdentifierError::EmptyQualifier
            ))
        );
    }

    proptest! {
        #[test]
        fn test_table_name_display_parse_roundtrip(table in arb::<TableName>()) {
            let parsed: TableName = table.to_string().parse().unwrap();
            prop_assert_eq!(parsed, table);
        }

        #[test]
        fn test_table_name_proto_roundtrip(table in arb::<TableName>()) {
            let proto = crate::proto::space_quota::TableName::from(&table);
            let decoded = TableName::try_from(proto).unwrap();
            prop_assert_eq!(decoded, table);
        }
    }
}
