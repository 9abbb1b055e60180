use super::CODE_TAG;
use crate::theme::ColorScheme;

/// Verbatim text of extracted code regions, keyed by insertion order.
/// Populated during extraction and block merging, consumed once at
/// reinsertion; keys are never reused within a render call.
#[derive(Debug, Default)]
pub(crate) struct CodeBlockStore {
    blocks: Vec<String>,
}

impl CodeBlockStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, text: String) -> usize {
        self.blocks.push(text);
        self.blocks.len() - 1
    }

    pub(crate) fn get(&self, key: usize) -> Option<&str> {
        self.blocks.get(key).map(String::as_str)
    }
}

fn is_fence(line: &str) -> bool {
    // ~~~ is the alternate fence spelling
    line.starts_with("```") || line.starts_with("~~~")
}

/// Replace fenced code regions with single placeholder lines.
///
/// Stored text is the body plus a canonical closing-fence line; the closing
/// fence acts as a sentinel stripped again at reinsertion. Language tags on
/// the opening fence are accepted and discarded. An unmatched opening fence
/// is left as literal text.
pub(crate) fn extract_fenced(text: &str, store: &mut CodeBlockStore) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut iter = text.lines();

    while let Some(line) = iter.next() {
        if !is_fence(line) {
            out.push(line.to_string());
            continue;
        }

        let mut body: Vec<&str> = Vec::new();
        let mut closed = false;
        for inner in iter.by_ref() {
            if is_fence(inner) {
                closed = true;
                break;
            }
            body.push(inner);
        }

        if closed {
            let mut stored = String::from("\n");
            for body_line in &body {
                stored.push_str(body_line);
                stored.push('\n');
            }
            stored.push_str("```");
            let key = store.insert(stored);
            out.push(format!("{}{}", CODE_TAG, key));
        } else {
            out.push(line.to_string());
            out.extend(body.iter().map(|s| s.to_string()));
        }
    }

    out.join("\n")
}

/// Format one stored region for reinsertion: every line gets the gutter
/// glyph, the sentinel line is dropped, the whole block is wrapped in the
/// code color and a reset
pub(crate) fn format_block(raw: &str, colors: &ColorScheme, code_mark: &str) -> String {
    let gutter = format!("\n{}{} {}", colors.literal, code_mark, colors.code);
    let marked = raw.replace('\n', &gutter);
    let body = match marked.rfind('\n') {
        Some(idx) => &marked[..idx],
        None => marked.as_str(),
    };
    format!("{}{}{}", colors.code, body, colors.reset)
}
