use std::fmt;

use serde::Deserialize;

/// Kind of a declared type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindDecl {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

impl KindDecl {
    pub fn as_str(&self) -> &'static str {
        match self {
            KindDecl::Class => "class",
            KindDecl::Interface => "interface",
            KindDecl::Enum => "enum",
            KindDecl::Annotation => "annotation",
        }
    }
}

impl fmt::Display for KindDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(KindDecl::Class.to_string(), "class");
        assert_eq!(KindDecl::Annotation.to_string(), "annotation");
    }

    #[test]
    fn test_deserialize() {
        let kind: KindDecl = serde_json::from_str(r#""interface""#).unwrap();
        assert_eq!(kind, KindDecl::Interface);
        assert!(serde_json::from_str::<KindDecl>(r#""record""#).is_err());
    }
}
