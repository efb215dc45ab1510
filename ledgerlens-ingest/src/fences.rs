//! Markdown code-fence cleanup for model responses.
//!
//! Models often wrap the table as:
//!   ```csv
//!   Date,Description,Amount,Category,Notes
//!   ...
//!   ```

const FENCE: &str = "```";

/// Strip one leading fence (optionally tagged `csv`) and one trailing fence, then trim.
pub fn strip_code_fences(text: &str) -> String {
    let mut s = text.trim();

    if let Some(rest) = s.strip_prefix(FENCE) {
        s = match rest.get(..3) {
            Some(tag) if tag.eq_ignore_ascii_case("csv") => &rest[3..],
            _ => rest,
        };
    }
    if let Some(rest) = s.strip_suffix(FENCE) {
        s = rest;
    }

    s.trim().to_string()
}
