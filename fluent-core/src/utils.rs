//! Shared naming functions for builder generation.

/// Uppercase the first character (e.g., "shapes" -> "Shapes")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first character only (e.g., "ConfigMap" -> "configMap")
pub fn decapitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Split a camelCase or PascalCase identifier into its words.
///
/// A word boundary sits before an uppercase letter that follows a lowercase
/// letter or digit, and before the last capital of an acronym that is
/// followed by a lowercase letter ("HTTPServer" -> ["HTTP", "Server"]).
pub fn split_camel_case(s: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = s.char_indices().collect();
    let mut words = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        let (pos, c) = chars[i];
        let (_, prev) = chars[i - 1];
        let next_is_lower = chars.get(i + 1).is_some_and(|(_, n)| n.is_lowercase());

        let boundary = c.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower));

        if boundary {
            words.push(&s[start..pos]);
            start = pos;
        }
    }

    if start < s.len() {
        words.push(&s[start..]);
    }
    words
}

/// Remove immediately repeated word runs from a camelCase identifier.
///
/// Words compare case-insensitively and the first occurrence keeps its
/// casing, so "configMapVolumeSourceVolumeSource" becomes
/// "configMapVolumeSource". The longest repeated run is removed first.
pub fn compact(s: &str) -> String {
    let mut words: Vec<&str> = split_camel_case(s);

    loop {
        let mut removed = false;

        'search: for len in (1..=words.len() / 2).rev() {
            for i in 0..=(words.len() - 2 * len) {
                let repeated =
                    (0..len).all(|k| words[i + k].eq_ignore_ascii_case(words[i + len + k]));
                if repeated {
                    words.drain(i + len..i + 2 * len);
                    removed = true;
                    break 'search;
                }
            }
        }

        if !removed {
            break;
        }
    }

    words.concat()
}

/// Singular form of a plural property name (e.g., "arguments" -> "argument").
///
/// Covers the regular English plurals that show up in property names; names
/// that do not look plural are returned unchanged.
pub fn singularize(s: &str) -> String {
    const KEEP: &[&str] = &["ss", "us", "is"];
    const STRIP_ES: &[&str] = &["sses", "xes", "ches", "shes", "zes"];

    if KEEP.iter().any(|suffix| s.ends_with(suffix)) {
        return s.to_string();
    }
    if let Some(stem) = s.strip_suffix("ies")
        && !stem.is_empty()
    {
        return format!("{}y", stem);
    }
    if STRIP_ES.iter().any(|suffix| s.ends_with(suffix)) {
        return s[..s.len() - 2].to_string();
    }
    match s.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("shapes"), "Shapes");
        assert_eq!(capitalize("Shapes"), "Shapes");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_decapitalize_first() {
        assert_eq!(decapitalize_first("Circle"), "circle");
        assert_eq!(decapitalize_first("ConfigMap"), "configMap");
        assert_eq!(decapitalize_first("URL"), "uRL");
        assert_eq!(decapitalize_first(""), "");
    }

    #[test]
    fn test_split_camel_case() {
        assert_eq!(split_camel_case("circleShapes"), vec!["circle", "Shapes"]);
        assert_eq!(
            split_camel_case("configMapVolumeSource"),
            vec!["config", "Map", "Volume", "Source"]
        );
        assert_eq!(split_camel_case("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(split_camel_case("item2Name"), vec!["item2", "Name"]);
        assert_eq!(split_camel_case("name"), vec!["name"]);
        assert!(split_camel_case("").is_empty());
    }

    #[test]
    fn test_compact_removes_repeated_runs() {
        assert_eq!(
            compact("configMapVolumeSourceVolumeSource"),
            "configMapVolumeSource"
        );
        assert_eq!(compact("primitiveRefRefType"), "primitiveRefType");
        assert_eq!(compact("squareSquare"), "square");
    }

    #[test]
    fn test_compact_keeps_distinct_words() {
        assert_eq!(compact("circleShapes"), "circleShapes");
        assert_eq!(compact("primitiveRefReturnType"), "primitiveRefReturnType");
        assert_eq!(compact("circleCircles"), "circleCircles");
        assert_eq!(compact(""), "");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("shapes"), "shape");
        assert_eq!(singularize("arguments"), "argument");
        assert_eq!(singularize("properties"), "property");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("matches"), "match");
        assert_eq!(singularize("classes"), "class");
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize("returnType"), "returnType");
        assert_eq!(singularize("s"), "s");
    }
}
