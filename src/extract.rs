//! Pulling IPv4-looking substrings out of free-text log lines.
//!
//! The pattern is loose (`\d+\.\d+\.\d+\.\d+`): it finds the candidate, and
//! [`Ipv4Address`](crate::Ipv4Address) parsing decides whether it is usable.

use once_cell::sync::Lazy;
use regex::Regex;

/// Four dot-separated runs of digits.
static IPV4_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\d+\.\d+\.\d+").unwrap());

/// First IPv4-looking substring of `line`.
///
/// # Examples
/// ```
/// use ipindex::extract::extract_ipv4;
///
/// let line = r#"203.0.113.9 - - [10/Oct/2020:13:55:36 +0000] "GET / HTTP/1.1" 200"#;
/// assert_eq!(extract_ipv4(line), Some("203.0.113.9"));
/// assert_eq!(extract_ipv4("no address here"), None);
/// ```
pub fn extract_ipv4(line: &str) -> Option<&str> {
    IPV4_PATTERN.find(line).map(|m| m.as_str())
}

/// Every IPv4-looking substring of `line`, left to right.
pub fn extract_all_ipv4(line: &str) -> impl Iterator<Item = &str> {
    IPV4_PATTERN.find_iter(line).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first() {
        assert_eq!(
            extract_ipv4("client 10.0.0.1 forwarded for 192.168.1.7"),
            Some("10.0.0.1")
        );
        assert_eq!(extract_ipv4("1.2.3"), None);
        assert_eq!(extract_ipv4(""), None);
    }

    #[test]
    fn test_extract_keeps_out_of_range() {
        // Range checking belongs to address parsing.
        assert_eq!(extract_ipv4("from 300.1.1.1:443"), Some("300.1.1.1"));
    }

    #[test]
    fn test_extract_all() {
        let found: Vec<_> = extract_all_ipv4("a=1.1.1.1 b=8.8.8.8 c=x.y").collect();
        assert_eq!(found, vec!["1.1.1.1", "8.8.8.8"]);
    }
}
