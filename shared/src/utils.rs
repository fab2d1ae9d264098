//! # Display helpers
//!
//! Formatting used by the wallet surface and the CLI when showing addresses
//! and amounts to a user.
//!
//! ```rust
//! use shared::utils::{short_address, format_sol};
//!
//! assert_eq!(short_address("8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL"), "8W6Q...JKAL");
//! assert_eq!(format_sol(1.5), "1.5000 SOL");
//! ```

/// Keep the first `head` and last `tail` characters of an address, joined by
/// an ellipsis. Addresses too short to shorten are returned unchanged.
pub fn elide_address(address: &str, head: usize, tail: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= head + tail {
        return address.to_string();
    }

    let start: String = chars[..head].iter().collect();
    let end: String = chars[chars.len() - tail..].iter().collect();
    format!("{start}...{end}")
}

/// `elide_address` with four characters on each side.
pub fn short_address(address: &str) -> String {
    elide_address(address, 4, 4)
}

/// SOL amount with four decimals.
pub fn format_sol(amount: f64) -> String {
    format_token_amount(amount, "SOL")
}

/// Token amount with four decimals followed by its symbol.
pub fn format_token_amount(amount: f64, symbol: &str) -> String {
    format!("{amount:.4} {symbol}")
}
