//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, FixedOffset};
use std::fmt::{self, Write as _};

/// A single log call, captured at the moment it passed the level filter.
///
/// The template and its arguments are kept apart so that every sink's
/// formatter decides how (and whether) to render them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<FixedOffset>,
    pub level: LogLevel,
    pub template: String,
    pub args: Vec<String>,
}

impl LogEntry {
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        level: LogLevel,
        template: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Self {
            timestamp,
            level,
            template: template.into(),
            args,
        }
    }

    /// Capture `Display` arguments as owned strings.
    pub fn capture(
        timestamp: DateTime<FixedOffset>,
        level: LogLevel,
        template: &str,
        args: &[&dyn fmt::Display],
    ) -> Self {
        let args = args.iter().map(|arg| arg.to_string()).collect();
        Self::new(timestamp, level, template, args)
    }

    /// The template with its arguments substituted.
    pub fn message(&self) -> String {
        render_template(&self.template, &self.args)
    }
}

/// Substitute positional arguments into a template.
///
/// `{}` consumes the next argument, `{N}` selects argument `N`, and `{{` / `}}`
/// produce literal braces. A placeholder without a matching argument is kept
/// verbatim; surplus arguments are ignored.
pub fn render_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len() + args.iter().map(String::len).sum::<usize>());
    let mut next = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                out.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let rest = &template[start + 1..];
                let Some(close) = rest.find('}') else {
                    out.push_str(&template[start..]);
                    break;
                };
                let spec = &rest[..close];
                let index = if spec.is_empty() {
                    let index = next;
                    next += 1;
                    Some(index)
                } else {
                    spec.parse::<usize>().ok()
                };

                match index.and_then(|i| args.get(i)) {
                    Some(arg) => out.push_str(arg),
                    None => {
                        let _ = write!(out, "{{{}}}", spec);
                    }
                }

                // Skip past the placeholder body and its closing brace.
                let end = start + 1 + close;
                while let Some(&(i, _)) = chars.peek() {
                    if i > end {
                        break;
                    }
                    chars.next();
                }
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_sequential_placeholders() {
        assert_eq!(
            render_template("user {} did {}", &args(&["42", "login"])),
            "user 42 did login"
        );
    }

    #[test]
    fn test_positional_placeholders() {
        assert_eq!(
            render_template("{1} before {0}", &args(&["a", "b"])),
            "b before a"
        );
    }

    #[test]
    fn test_escaped_braces() {
        assert_eq!(render_template("{{}} {}", &args(&["x"])), "{} x");
    }

    #[test]
    fn test_missing_and_surplus_args() {
        assert_eq!(render_template("{} and {}", &args(&["one"])), "one and {}");
        assert_eq!(render_template("{5}", &args(&["one"])), "{5}");
        assert_eq!(render_template("plain", &args(&["extra"])), "plain");
    }

    #[test]
    fn test_unterminated_placeholder() {
        assert_eq!(render_template("open {brace", &[]), "open {brace");
    }

    #[test]
    fn test_capture_uses_display() {
        let ts = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .unwrap();
        let entry = LogEntry::capture(ts, LogLevel::Warn, "{} items, {}% done", &[&3, &12.5]);
        assert_eq!(entry.args, vec!["3".to_string(), "12.5".to_string()]);
        assert_eq!(entry.message(), "3 items, 12.5% done");
    }
}
