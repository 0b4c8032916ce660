//! Input validation for API requests.
//!
//! For collecting multiple validation errors and returning them as an
//! ApiError, use the `ValidationErrorBuilder` from the `error` module.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating usernames (alphanumeric with dots/dashes/underscores, 3-32 chars)
    static ref USERNAME_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9][a-zA-Z0-9._-]{2,31}$"
    ).unwrap();
}

/// Currency symbols accepted as an optional price prefix
const CURRENCY_SYMBOLS: [char; 3] = ['$', '€', '£'];

/// Parse a price string into integer cents.
///
/// Accepts an optional leading currency symbol and up to two fractional
/// digits; anything else is rejected. `"$12.50"` and `"12.50"` both parse
/// to 1250.
pub fn parse_price(raw: &str) -> Result<i64, String> {
    let trimmed = raw.trim();
    let text = trimmed.strip_prefix(CURRENCY_SYMBOLS).unwrap_or(trimmed);

    if text.is_empty() {
        return Err("Price is required".to_string());
    }
    if text.starts_with('-') {
        return Err("Price must not be negative".to_string());
    }

    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err("Invalid price format".to_string());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid price format".to_string());
    }
    if whole.len() > 12 {
        return Err("Price is too large".to_string());
    }
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid price format".to_string());
    }
    if frac.len() > 2 {
        return Err("Price must have at most two decimal places".to_string());
    }

    let whole_cents = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<i64>()
            .map_err(|_| "Invalid price format".to_string())?
            * 100
    };
    let frac_cents = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| "Invalid price format".to_string())? * 10,
        _ => frac.parse::<i64>().map_err(|_| "Invalid price format".to_string())?,
    };

    Ok(whole_cents + frac_cents)
}

/// Validate a book title
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title is required".to_string());
    }

    if title.len() > 200 {
        return Err("Title is too long (max 200 characters)".to_string());
    }

    Ok(())
}

/// Validate a book author
pub fn validate_author(author: &str) -> Result<(), String> {
    if author.trim().is_empty() {
        return Err("Author is required".to_string());
    }

    if author.len() > 200 {
        return Err("Author is too long (max 200 characters)".to_string());
    }

    Ok(())
}

/// Validate a book description (optional field)
pub fn validate_description(description: &Option<String>) -> Result<(), String> {
    if let Some(d) = description {
        if d.len() > 2000 {
            return Err("Description is too long (max 2000 characters)".to_string());
        }
    }

    Ok(())
}

/// Validate a username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err(
            "Username must be 3-32 characters: letters, digits, dots, dashes or underscores"
                .to_string(),
        );
    }

    Ok(())
}

/// Validate a password at registration time
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }

    if password.len() > 128 {
        return Err("Password is too long (max 128 characters)".to_string());
    }

    Ok(())
}

/// Parse a path id as a positive integer
pub fn parse_book_id(raw: &str) -> Result<i64, String> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err("Book id must be a positive integer".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_plain() {
        assert_eq!(parse_price("12.50"), Ok(1250));
        assert_eq!(parse_price("0"), Ok(0));
        assert_eq!(parse_price("0.05"), Ok(5));
        assert_eq!(parse_price("7"), Ok(700));
        assert_eq!(parse_price("7.5"), Ok(750));
        assert_eq!(parse_price(".99"), Ok(99));
    }

    #[test]
    fn test_parse_price_currency_prefix() {
        assert_eq!(parse_price("$12.50"), Ok(1250));
        assert_eq!(parse_price("€8.00"), Ok(800));
        assert_eq!(parse_price("£3"), Ok(300));
        assert_eq!(parse_price(" $12.50 "), Ok(1250));
    }

    #[test]
    fn test_parse_price_rejects_malformed() {
        assert!(parse_price("abc").is_err());
        assert!(parse_price("-5").is_err());
        assert!(parse_price("$-5").is_err());
        assert!(parse_price("12.345").is_err());
        assert!(parse_price("12.5x").is_err());
        assert!(parse_price("1,250.00").is_err());
        assert!(parse_price("").is_err());
        assert!(parse_price("$").is_err());
        assert!(parse_price(".").is_err());
        assert!(parse_price("1e3").is_err());
        assert!(parse_price("$$5").is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Dune").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_author() {
        assert!(validate_author("Herbert").is_ok());
        assert!(validate_author("").is_err());
        assert!(validate_author("   ").is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description(&None).is_ok());
        assert!(validate_description(&Some("short".to_string())).is_ok());
        assert!(validate_description(&Some("x".repeat(2001))).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("paul").is_ok());
        assert!(validate_username("paul.atreides").is_ok());
        assert!(validate_username("user_42").is_ok());

        assert!(validate_username("").is_err());
        assert!(validate_username("ab").is_err()); // too short
        assert!(validate_username(".leading").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"x".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("long enough").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_parse_book_id() {
        assert_eq!(parse_book_id("1"), Ok(1));
        assert_eq!(parse_book_id("42"), Ok(42));
        assert!(parse_book_id("0").is_err());
        assert!(parse_book_id("-1").is_err());
        assert!(parse_book_id("abc").is_err());
    }
}
