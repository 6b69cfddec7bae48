//! Marker Scanner
//!
//! A minimal structural scan over a JavaScript fragment that detects the
//! two facts classification depends on: a `require(...)` call and a
//! top-level `(async () => {` immediately-invoked pattern. The scan skips
//! comments and string literals so markers inside them are not counted,
//! but it is not a parser: template-literal interpolations are treated as
//! string text and regex literals are not lexed.

// ─── Facts ───────────────────────────────────────────────────────

/// Structural facts derived from a code fragment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkerFacts {
    /// The fragment pulls in its own dependencies via `require(...)`.
    pub references_module_load: bool,
    /// The fragment establishes its own async entry point via an
    /// immediately-invoked `(async () => {` block.
    pub has_async_entry_point: bool,
}

impl MarkerFacts {
    fn complete(&self) -> bool {
        self.references_module_load && self.has_async_entry_point
    }
}

// ─── Scanner ─────────────────────────────────────────────────────

/// Scan `code` for the two classification markers.
pub fn scan_markers(code: &str) -> MarkerFacts {
    let bytes = code.as_bytes();
    let mut facts = MarkerFacts::default();
    // Whether the previous significant character was `.`, which would make
    // a following `require` a property access rather than the builtin.
    let mut after_dot = false;
    let mut i = 0;

    while i < bytes.len() && !facts.complete() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = skip_line_comment(bytes, i + 2);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i + 2);
            }
            quote @ (b'\'' | b'"' | b'`') => {
                i = skip_string(bytes, i + 1, quote);
                after_dot = false;
            }
            b'(' => {
                if !facts.has_async_entry_point && match_async_iife(bytes, i + 1) {
                    facts.has_async_entry_point = true;
                }
                after_dot = false;
                i += 1;
            }
            c if is_ident_start(c) => {
                let end = ident_end(bytes, i);
                if !facts.references_module_load
                    && !after_dot
                    && &bytes[i..end] == b"require"
                {
                    let next = skip_whitespace(bytes, end);
                    if bytes.get(next) == Some(&b'(') {
                        facts.references_module_load = true;
                    }
                }
                after_dot = false;
                i = end;
            }
            c => {
                if !c.is_ascii_whitespace() {
                    after_dot = c == b'.';
                }
                i += 1;
            }
        }
    }

    facts
}

// ─── Lexing helpers ──────────────────────────────────────────────

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$'
}

fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}

/// Index one past the end of the identifier starting at `start`.
fn ident_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() && is_ident_continue(bytes[i]) {
        i += 1;
    }
    i
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn skip_line_comment(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i] != b'\n' {
        i += 1;
    }
    i
}

fn skip_block_comment(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
            return i + 2;
        }
        i += 1;
    }
    i
}

/// Skip a string literal opened with `quote`, honoring backslash escapes.
/// Unterminated literals run to the end of input.
fn skip_string(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            c if c == quote => return i + 1,
            // Plain quotes do not survive a raw newline.
            b'\n' if quote != b'`' => return i + 1,
            _ => i += 1,
        }
    }
    i
}

/// Match the token sequence `async ( ) => {` starting just after an opening
/// paren, with arbitrary whitespace between tokens. Together with the paren
/// this covers both accepted spellings of the entry-point marker,
/// `(async () => {` and `(async()=>{`.
fn match_async_iife(bytes: &[u8], start: usize) -> bool {
    let mut i = skip_whitespace(bytes, start);

    if !bytes[i..].starts_with(b"async") {
        return false;
    }
    let end = ident_end(bytes, i);
    if &bytes[i..end] != b"async" {
        return false;
    }

    i = skip_whitespace(bytes, end);
    if bytes.get(i) != Some(&b'(') {
        return false;
    }
    i = skip_whitespace(bytes, i + 1);
    if bytes.get(i) != Some(&b')') {
        return false;
    }
    i = skip_whitespace(bytes, i + 1);
    if !bytes[i..].starts_with(b"=>") {
        return false;
    }
    i = skip_whitespace(bytes, i + 2);
    bytes.get(i) == Some(&b'{')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_require_call() {
        let facts = scan_markers("const pw = require('playwright');");
        assert!(facts.references_module_load);
        assert!(!facts.has_async_entry_point);
    }

    #[test]
    fn test_detects_require_with_space_before_paren() {
        assert!(scan_markers("require ('playwright')").references_module_load);
    }

    #[test]
    fn test_detects_both_iife_spellings() {
        assert!(scan_markers("(async () => {\n  await run();\n})();").has_async_entry_point);
        assert!(scan_markers("(async()=>{await run();})();").has_async_entry_point);
    }

    #[test]
    fn test_ignores_markers_in_strings() {
        let facts = scan_markers("await page.type('#box', \"require(x)\");");
        assert!(!facts.references_module_load);

        let facts = scan_markers("console.log('(async () => {');");
        assert!(!facts.has_async_entry_point);
    }

    #[test]
    fn test_ignores_markers_in_comments() {
        let facts = scan_markers("// require('playwright')\nawait page.reload();");
        assert!(!facts.references_module_load);

        let facts = scan_markers("/* (async () => { */ await page.reload();");
        assert!(!facts.has_async_entry_point);
    }

    #[test]
    fn test_ignores_markers_in_template_literals() {
        let facts = scan_markers("const s = `require(${name})`;");
        assert!(!facts.references_module_load);
    }

    #[test]
    fn test_ignores_longer_identifiers() {
        assert!(!scan_markers("unrequire('x')").references_module_load);
        assert!(!scan_markers("requires('x')").references_module_load);
    }

    #[test]
    fn test_ignores_property_access() {
        assert!(!scan_markers("loader.require('x')").references_module_load);
    }

    #[test]
    fn test_iife_with_parameter_is_not_an_entry_point() {
        assert!(!scan_markers("(async (page) => { await go(page); })(p);").has_async_entry_point);
    }

    #[test]
    fn test_complete_script_detects_both() {
        let code = r#"
const { chromium } = require('playwright');
(async () => {
  const browser = await chromium.launch();
  await browser.close();
})();
"#;
        let facts = scan_markers(code);
        assert!(facts.references_module_load);
        assert!(facts.has_async_entry_point);
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let facts = scan_markers(r#"log('it\'s require(x)')"#);
        assert!(!facts.references_module_load);
    }
}
