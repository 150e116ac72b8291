//! Dependency URL extraction from `build.zig.zon` text
//!
//! This is not a full ZON parser. It walks each line, skips comments and
//! picks up every `.url = "..."` field, which covers both the usual one field
//! per line layout and inline `.{ .url = "...", .hash = "..." }` tables.

const URL_FIELD: &str = ".url";

/// Collect every dependency URL in a manifest, in file order
pub fn extract_urls(source: &str) -> Vec<String> {
    let mut urls = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.starts_with("//") {
            continue;
        }
        scan_line(line, index + 1, &mut urls);
    }

    urls
}

fn scan_line(line: &str, line_number: usize, urls: &mut Vec<String>) {
    let mut rest = line;

    while !rest.is_empty() {
        if rest.starts_with("//") {
            break;
        }

        // Unrelated string literals may contain `.url` or `//`
        if rest.starts_with('"') {
            match read_string(rest) {
                Some((_, after)) => {
                    rest = after;
                    continue;
                }
                None => break,
            }
        }

        if let Some(after) = rest.strip_prefix(URL_FIELD) {
            if !after.starts_with(is_identifier_char) {
                match read_assignment(after) {
                    Some((url, remaining)) => {
                        urls.push(url);
                        rest = remaining;
                        continue;
                    }
                    None => {
                        tracing::warn!(
                            line = line_number,
                            "skipping .url without a string literal: {line}"
                        );
                        break;
                    }
                }
            }
        }

        let mut chars = rest.chars();
        chars.next();
        rest = chars.as_str();
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse `= "literal"` following a field name
fn read_assignment(input: &str) -> Option<(String, &str)> {
    let value = input.trim_start().strip_prefix('=')?.trim_start();
    read_string(value)
}

/// Read a double-quoted literal at the start of `input`, returning the
/// unescaped contents and whatever follows the closing quote
fn read_string(input: &str) -> Option<(String, &str)> {
    let body = input.strip_prefix('"')?;
    let mut value = String::new();
    let mut chars = body.char_indices();

    while let Some((index, c)) = chars.next() {
        match c {
            '"' => return Some((value, &body[index + 1..])),
            '\\' => {
                let (_, escaped) = chars.next()?;
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '"' | '\\' | '\'' => value.push(escaped),
                    other => {
                        // \x.. and \u{..} are kept verbatim
                        value.push('\\');
                        value.push(other);
                    }
                }
            }
            _ => value.push(c),
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
.{
    .name = .example,
    .version = "0.1.0",
    .dependencies = .{
        .zap = .{
            .url = "git+https://github.com/zigzap/zap#76679f308c702cd8880201e6e93914e1d836a54b",
            .hash = "zap-0.10.1-GRU_a-5_AAD1LKq1zQdwWXVuw2mhJrZ8wJ6Df1HbWVbn",
        },
        // .old = .{ .url = "https://example.com/old.tar.gz#1" },
        .clap = .{ .url = "https://github.com/Hejsil/zig-clap/archive/0.10.0.tar.gz#abc", .hash = "1220" },
    },
    .paths = .{ "build.zig", "build.zig.zon", "src" },
}
"#;

    #[test]
    fn test_extracts_urls_in_order() {
        let urls = extract_urls(MANIFEST);
        assert_eq!(
            urls,
            vec![
                "git+https://github.com/zigzap/zap#76679f308c702cd8880201e6e93914e1d836a54b",
                "https://github.com/Hejsil/zig-clap/archive/0.10.0.tar.gz#abc",
            ]
        );
    }

    #[test]
    fn test_skips_commented_lines_and_trailing_comments() {
        let source = r#"
// .url = "https://example.com/a.tar.gz#1",
.url = "https://example.com/b.tar.gz#2", // .url = "https://example.com/c#3"
"#;
        assert_eq!(extract_urls(source), vec!["https://example.com/b.tar.gz#2"]);
    }

    #[test]
    fn test_handles_escaped_quotes() {
        let source = r#".url = "https://example.com/odd\"name.tar.gz#1","#;
        assert_eq!(
            extract_urls(source),
            vec![r#"https://example.com/odd"name.tar.gz#1"#]
        );
    }

    #[test]
    fn test_ignores_similar_field_names() {
        let source = r#"
.urls = "https://example.com/not-a-dependency#1",
.description = "see .url = \"x\" in the docs",
"#;
        assert!(extract_urls(source).is_empty());
    }

    #[test]
    fn test_malformed_url_field_is_skipped() {
        let source = ".url = missing_quotes,\n.url = \"unterminated\n.url = \"https://ok#1\",";
        assert_eq!(extract_urls(source), vec!["https://ok#1"]);
    }

    #[test]
    fn test_string_containing_double_slash_is_not_a_comment() {
        let source = r#".url = "https://example.com/pkg.tar.gz#1", .hash = "12//20","#;
        assert_eq!(extract_urls(source), vec!["https://example.com/pkg.tar.gz#1"]);
    }

    #[test]
    fn test_empty_manifest() {
        assert!(extract_urls("").is_empty());
        assert!(extract_urls(".{ .name = .empty, .dependencies = .{} }").is_empty());
    }
}
