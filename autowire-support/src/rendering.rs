//! Text rendering utilities for human-friendly diagnostics.
//!
//! Provides helpers to format resolution chains, derive class names
//! from Rust type paths, and suggest service keys close to a typo.

/// Renders a resolution chain as a readable string.
///
/// # Examples
/// ```
/// use autowire_support::rendering::render_chain;
///
/// let chain = vec!["Mailer", "Transport", "Logger", "Mailer"];
/// let rendered = render_chain(&chain);
/// assert_eq!(rendered, "Mailer → Transport → Logger → Mailer");
/// ```
pub fn render_chain(chain: &[impl AsRef<str>]) -> String {
    chain
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Shortens a fully qualified type name to the name a class is known by.
///
/// ```
/// use autowire_support::rendering::shorten_type_name;
///
/// let short = shorten_type_name("my_app::mail::Mailer");
/// assert_eq!(short, "Mailer");
///
/// let short = shorten_type_name("alloc::sync::Arc<dyn my_app::log::Logger>");
/// assert_eq!(short, "Arc<dyn Logger>");
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let mut result = String::with_capacity(full_name.len());
    let mut chars = full_name.chars().peekable();
    let mut current_segment = String::new();

    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                current_segment.clear();
            }
            '<' | '>' | ',' | ' ' => {
                result.push_str(&current_segment);
                result.push(ch);
                current_segment.clear();
            }
            _ => current_segment.push(ch),
        }
    }

    result.push_str(&current_segment);
    result
}

/// Quick check whether two keys are "close enough" to be a typo of each other.
///
/// Not a full Levenshtein: counts positional matches and requires the
/// lengths to differ by at most three.
pub fn is_close_match(a: &str, b: &str) -> bool {
    let len_diff = a.len().abs_diff(b.len());
    if len_diff > 3 {
        return false;
    }

    let common = a
        .chars()
        .zip(b.chars())
        .filter(|(ca, cb)| ca == cb)
        .count();

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return true;
    }

    common * 100 / max_len >= 60
}

/// Suggests registered keys similar to `requested`, best match first.
///
/// ```
/// use autowire_support::rendering::suggest_similar;
///
/// let known = ["Mailer", "Logger", "Transport"];
/// assert_eq!(suggest_similar("Mailr", &known, 3), vec!["Mailer".to_string()]);
/// ```
pub fn suggest_similar(
    requested: &str,
    available: &[&str],
    max_suggestions: usize,
) -> Vec<String> {
    let requested_lower = requested.to_lowercase();

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .filter_map(|&name| {
            let name_lower = name.to_lowercase();
            if name_lower == requested_lower {
                return None;
            }

            if name_lower.contains(&requested_lower) || requested_lower.contains(&name_lower) {
                return Some((name, 100));
            }

            if is_close_match(&requested_lower, &name_lower) {
                return Some((name, 90));
            }

            let common = name_lower
                .chars()
                .zip(requested_lower.chars())
                .take_while(|(a, b)| a == b)
                .count();

            if common >= 3 {
                return Some((name, common * 10));
            }

            None
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}
