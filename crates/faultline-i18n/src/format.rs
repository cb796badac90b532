use std::fmt::Write as _;

use serde_json::Value;

/// Template could not be rendered
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A `{` has no matching `}`
    #[error("unclosed placeholder starting at byte {0}")]
    Unclosed(usize),

    /// Placeholder does not start with an argument index
    #[error("invalid placeholder `{{{0}}}`")]
    InvalidPlaceholder(String),
}

/// Render a `MessageFormat` style template
///
/// `{0}`, `{1}` are replaced by the positional arguments; anything after a
/// comma inside the braces (`{0,number}`) is accepted and ignored. A single
/// quote starts a literal section, `''` is a literal quote. Placeholders
/// pointing past the last argument are kept verbatim.
///
/// Without arguments the template is returned unchanged, quotes included.
///
/// # Errors
///
/// Returns [`FormatError`] for unclosed or non-numeric placeholders
pub fn format_template(template: &str, args: &[Value]) -> Result<String, FormatError> {
    if args.is_empty() {
        return Ok(template.to_owned());
    }

    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    let mut quoted = false;

    while let Some((pos, c)) = chars.next() {
        match c {
            '\'' => {
                if chars.peek().is_some_and(|&(_, next)| next == '\'') {
                    chars.next();
                    out.push('\'');
                } else {
                    quoted = !quoted;
                }
            }
            '{' if !quoted => {
                let rest = &template[pos + 1..];
                let end = rest.find('}').ok_or(FormatError::Unclosed(pos))?;
                let body = &rest[..end];
                let index_part = body.split(',').next().unwrap_or_default().trim();
                let index: usize = index_part
                    .parse()
                    .map_err(|_| FormatError::InvalidPlaceholder(body.to_owned()))?;

                match args.get(index) {
                    Some(arg) => render_arg(&mut out, arg),
                    None => {
                        out.push('{');
                        out.push_str(body);
                        out.push('}');
                    }
                }

                // Skip past the placeholder body and its closing brace
                let close = pos + 1 + end;
                while chars.next_if(|&(i, _)| i <= close).is_some() {}
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

fn render_arg(out: &mut String, arg: &Value) {
    match arg {
        Value::String(s) => out.push_str(s),
        Value::Null => out.push_str("null"),
        other => {
            let _ = write!(out, "{other}");
        }
    }
}
