use std::sync::OnceLock;

use regex::Regex;

use super::filters::{extension_alternation, is_remote_reference};

/// Markdown syntax an image reference was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSyntax {
    /// `![alt](target)`
    Inline,
    /// `![[target]]`
    Wiki,
}

/// Raw image target found on a markdown line, before decoding and resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Syntax the reference was written in.
    pub syntax: ReferenceSyntax,
    /// Target exactly as written, still percent-encoded.
    pub target: String,
}

fn inline_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(
            r"(?i)!\[.*?\]\((.*?\.(?:{}))\)",
            extension_alternation()
        ))
        .expect("invalid inline image regex")
    })
}

fn wiki_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(
            r"(?i)!\[\[(.*?\.(?:{}))\]\]",
            extension_alternation()
        ))
        .expect("invalid wiki image regex")
    })
}

/// Extract local image references from a single markdown line.
///
/// The line is trimmed before matching. Remote targets are dropped. Wiki-style embeds are
/// only considered when `wiki_links` is set.
pub fn extract_image_references(line: &str, wiki_links: bool) -> Vec<ImageReference> {
    let line = line.trim();
    let mut references = Vec::new();

    collect_matches(inline_pattern(), ReferenceSyntax::Inline, line, &mut references);
    if wiki_links {
        collect_matches(wiki_pattern(), ReferenceSyntax::Wiki, line, &mut references);
    }

    references
}

fn collect_matches(
    pattern: &Regex,
    syntax: ReferenceSyntax,
    line: &str,
    references: &mut Vec<ImageReference>,
) {
    for captures in pattern.captures_iter(line) {
        let Some(target) = captures.get(1) else {
            continue;
        };
        if is_remote_reference(target.as_str()) {
            continue;
        }
        references.push(ImageReference {
            syntax,
            target: target.as_str().to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(line: &str, wiki_links: bool) -> Vec<String> {
        extract_image_references(line, wiki_links)
            .into_iter()
            .map(|reference| reference.target)
            .collect()
    }

    #[test]
    fn finds_inline_images() {
        assert_eq!(targets("  ![diagram](assets/flow.png)  ", true), vec![
            "assets/flow.png".to_string()
        ]);
    }

    #[test]
    fn finds_several_images_on_one_line() {
        let line = "![a](one.jpg) text ![b](sub/two.GIF)";
        assert_eq!(targets(line, false), vec![
            "one.jpg".to_string(),
            "sub/two.GIF".to_string()
        ]);
    }

    #[test]
    fn skips_remote_targets() {
        assert!(targets("![logo](https://example.com/logo.png)", true).is_empty());
        assert!(targets("![logo](HTTP://example.com/logo.png)", true).is_empty());
    }

    #[test]
    fn ignores_other_extensions_and_plain_links() {
        assert!(targets("![vector](figure.svg)", true).is_empty());
        assert!(targets("[not an image](photo.png)", true).is_empty());
    }

    #[test]
    fn wiki_embeds_follow_the_flag() {
        let line = "![[assets/Pasted image 20220204120615.png]]";
        assert!(targets(line, false).is_empty());

        let found = extract_image_references(line, true);
        assert_eq!(found, vec![ImageReference {
            syntax: ReferenceSyntax::Wiki,
            target: "assets/Pasted image 20220204120615.png".into(),
        }]);
    }

    #[test]
    fn keeps_encoded_targets_verbatim() {
        assert_eq!(targets("![x](assets/Pasted%20image.png)", true), vec![
            "assets/Pasted%20image.png".to_string()
        ]);
    }
}
