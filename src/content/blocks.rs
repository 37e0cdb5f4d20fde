//! Line-oriented parser for the markdown-like post bodies.
//!
//! Only the handful of constructs the posts actually use are recognized; anything
//! else is a paragraph. Inline emphasis is left in the text for the renderer.

use serde::Serialize;

/// One rendered unit of a post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Block {
    /// `#`, `##` or `###`
    Heading { level: u8, text: String },
    /// Fenced with three backticks; the fence's info string is kept as `lang`
    Code {
        #[serde(skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        code: String,
    },
    Quote { text: String },
    ListItem { text: String },
    Rule,
    Paragraph { text: String },
}

const FENCE: &str = "```";

/// Parse a post body into blocks.
///
/// Blank lines outside code fences are dropped. An unterminated fence runs to the
/// end of the body.
pub fn parse_blocks(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut code: Option<(Option<String>, Vec<&str>)> = None;

    for line in content.lines() {
        let trimmed = line.trim();

        if let Some(info) = trimmed.strip_prefix(FENCE) {
            match code.take() {
                Some((lang, lines)) => blocks.push(Block::Code {
                    lang,
                    code: lines.join("\n"),
                }),
                None => {
                    let info = info.trim();
                    let lang = (!info.is_empty()).then(|| info.to_string());
                    code = Some((lang, Vec::new()));
                }
            }
            continue;
        }

        if let Some((_, lines)) = code.as_mut() {
            lines.push(line);
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        blocks.push(classify(trimmed));
    }

    if let Some((lang, lines)) = code {
        blocks.push(Block::Code {
            lang,
            code: lines.join("\n"),
        });
    }

    blocks
}

fn classify(line: &str) -> Block {
    for (prefix, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(text) = line.strip_prefix(prefix) {
            return Block::Heading {
                level,
                text: text.trim().to_string(),
            };
        }
    }

    if line == "---" {
        return Block::Rule;
    }
    if let Some(text) = line.strip_prefix("> ") {
        return Block::Quote {
            text: text.trim().to_string(),
        };
    }
    if let Some(text) = line.strip_prefix("- ") {
        return Block::ListItem {
            text: text.trim().to_string(),
        };
    }

    Block::Paragraph {
        text: line.to_string(),
    }
}
