//! Resource identifier naming convention.
//!
//! PCD9 files are named after the resource they hold, e.g.
//! `ui_icons_1337_00a3f2c1.tr8pcd9`. The identifier is the lowercase hex token
//! of the last `<digits>_<hexdigits>` run in the file name.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::{Error, Result};

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+_([0-9a-f]+)").expect("identifier pattern is valid"))
}

/// Extract the resource identifier from a PCD9 file name.
///
/// Only the final path component is inspected.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use trutex_pcd9::parse_identifier;
///
/// let id = parse_identifier(Path::new("out/tex_0_1a2b.tr8pcd9")).unwrap();
/// assert_eq!(id, 0x1a2b);
/// ```
pub fn parse_identifier(path: &Path) -> Result<u32> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .ok_or_else(|| Error::MissingIdentifier(path.to_path_buf()))?;

    let token = pattern()
        .captures_iter(&name)
        .last()
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str())
        .ok_or_else(|| Error::MissingIdentifier(path.to_path_buf()))?;

    u32::from_str_radix(token, 16).map_err(|_| Error::InvalidIdentifier {
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("tex_0012_00ab34cd.tr8pcd9", 0x00ab_34cd)]
    #[case("12_ab_34_cd.tr8pcd9", 0xcd)]
    #[case("icon_7_ff_new.tr8pcd9", 0xff)]
    #[case("1_0.dds", 0)]
    fn parses_last_identifier(#[case] name: &str, #[case] expected: u32) {
        assert_eq!(parse_identifier(Path::new(name)).unwrap(), expected);
    }

    #[test]
    fn ignores_parent_directories() {
        let path = Path::new("assets/10_beef/texture.tr8pcd9");
        assert!(matches!(
            parse_identifier(path),
            Err(Error::MissingIdentifier(p)) if p == path
        ));
    }

    #[rstest]
    #[case("texture.tr8pcd9")]
    #[case("tex_ABCD.tr8pcd9")]
    #[case("_ff.tr8pcd9")]
    fn missing_identifier(#[case] name: &str) {
        assert!(matches!(
            parse_identifier(Path::new(name)),
            Err(Error::MissingIdentifier(_))
        ));
    }

    #[test]
    fn identifier_wider_than_u32() {
        assert!(matches!(
            parse_identifier(Path::new("tex_1_123456789.tr8pcd9")),
            Err(Error::InvalidIdentifier { token }) if token == "123456789"
        ));
    }
}
