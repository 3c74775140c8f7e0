use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// A customer account. Seeded usernames carry the company name with spaces
/// replaced by underscores (`Omaha_Builders`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub is_active: bool,
}

/// Renders a company username for people: `Omaha_Builders` -> `Omaha Builders`.
pub fn display_name(username: &str) -> String {
    username.replace('_', " ")
}

/// Builds the `LIKE` pattern used to search usernames for a company name.
///
/// Spaces become `_`, which `LIKE` treats as a single-character wildcard, so the
/// pattern matches both the slug and the spaced spelling. `%` and `\` in the input
/// are escaped and must be paired with `ESCAPE '\'` in the query.
pub fn company_like_pattern(company_name: &str) -> String {
    let mut pattern = String::with_capacity(company_name.len() + 2);
    pattern.push('%');
    for ch in company_name.chars() {
        match ch {
            '\\' => pattern.push_str("\\\\"),
            '%' => pattern.push_str("\\%"),
            ' ' => pattern.push('_'),
            other => pattern.push(other),
        }
    }
    pattern.push('%');
    pattern
}

/// In-process equivalent of `username LIKE company_like_pattern(company_name)`.
///
/// Matching is ASCII case-insensitive, as SQLite's `LIKE` is.
pub fn username_matches_company(username: &str, company_name: &str) -> bool {
    let needle: Vec<char> = company_name
        .chars()
        .map(|ch| if ch == ' ' { '_' } else { ch.to_ascii_lowercase() })
        .collect();
    if needle.is_empty() {
        return true;
    }

    let haystack: Vec<char> = username.chars().map(|ch| ch.to_ascii_lowercase()).collect();
    haystack.windows(needle.len()).any(|window| {
        window.iter().zip(&needle).all(|(have, want)| *want == '_' || have == want)
    })
}
