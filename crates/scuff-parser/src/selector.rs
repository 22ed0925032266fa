//! Compound selector tokenizer.
//!
//! Splits a single complex selector (`nav > a.active:hover`) into compound
//! segments at combinators and records the simple selectors each segment is
//! made of. Attribute selectors, pseudo-class arguments and `#{...}`
//! interpolation are skipped rather than interpreted.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    /// Source text of the segment.
    pub text: String,
    /// Type selector (`div`, `*`), if the segment starts with one.
    pub element: Option<String>,
    pub classes: Vec<String>,
    pub ids: Vec<String>,
    /// Placeholder selectors (`%name`).
    pub placeholders: Vec<String>,
    /// The segment starts with the parent reference `&`.
    pub parent_ref: bool,
}

impl Compound {
    pub fn is_empty(&self) -> bool {
        self.element.is_none()
            && self.classes.is_empty()
            && self.ids.is_empty()
            && self.placeholders.is_empty()
            && !self.parent_ref
            && self.text.is_empty()
    }
}

/// Split `selector` into its compound segments.
pub fn compounds(selector: &str) -> Vec<Compound> {
    let bytes = selector.as_bytes();
    let mut out = Vec::new();
    let mut current = Compound::default();
    let mut segment_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        let at_segment_start = i == segment_start;

        match byte {
            b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'+' | b'~' => {
                finish(&mut out, &mut current, selector, segment_start, i);
                i += 1;
                segment_start = i;
                continue;
            }
            b'&' => {
                current.parent_ref = true;
                i = ident_end(bytes, i + 1);
                continue;
            }
            b'*' if at_segment_start => {
                current.element = Some("*".to_string());
            }
            b'.' => {
                let end = ident_end(bytes, i + 1);
                current.classes.push(selector[i + 1..end].to_string());
                i = end;
                continue;
            }
            b'%' => {
                let end = ident_end(bytes, i + 1);
                current.placeholders.push(selector[i + 1..end].to_string());
                i = end;
                continue;
            }
            b'#' if bytes.get(i + 1) == Some(&b'{') => {
                i = skip_interpolation(bytes, i);
                continue;
            }
            b'#' => {
                let end = ident_end(bytes, i + 1);
                if end > i + 1 {
                    current.ids.push(selector[i + 1..end].to_string());
                }
                i = end.max(i + 1);
                continue;
            }
            b'[' => {
                i = skip_balanced(bytes, i, b'[', b']');
                continue;
            }
            b':' => {
                let mut end = i + 1;
                if bytes.get(end) == Some(&b':') {
                    end += 1;
                }
                end = ident_end(bytes, end);
                if bytes.get(end) == Some(&b'(') {
                    end = skip_balanced(bytes, end, b'(', b')');
                }
                i = end;
                continue;
            }
            b if at_segment_start && is_ident_start(b) => {
                let end = ident_end(bytes, i);
                current.element = Some(selector[i..end].to_string());
                i = end;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    finish(&mut out, &mut current, selector, segment_start, bytes.len());

    out
}

fn finish(out: &mut Vec<Compound>, current: &mut Compound, selector: &str, start: usize, end: usize) {
    current.text = selector[start..end].to_string();
    let compound = std::mem::take(current);
    if !compound.is_empty() {
        out.push(compound);
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'-' || b >= 0x80
}

fn ident_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'#' if bytes.get(i + 1) == Some(&b'{') => i = skip_interpolation(bytes, i),
            b if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b >= 0x80 => i += 1,
            _ => break,
        }
    }
    i.min(bytes.len())
}

fn skip_interpolation(bytes: &[u8], start: usize) -> usize {
    skip_balanced(bytes, start + 1, b'{', b'}')
}

/// Skip from an opening delimiter at `start` past its matching close.
fn skip_balanced(bytes: &[u8], start: usize, open: u8, close: u8) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        let b = bytes[i];
        if b == open {
            depth += 1;
        } else if b == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return i + 1;
            }
        }
        i += 1;
    }
    bytes.len()
}
