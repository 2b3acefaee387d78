//! Phone number input mask
//!
//! Numbers are shown as `0XXX XXX XXX`: ten digits in groups of 4-3-3.

/// Maximum number of digits kept by the mask
pub const PHONE_DIGITS: usize = 10;

/// Normalize raw input into the `XXXX XXX XXX` mask.
///
/// Non-digits are dropped, anything past the tenth digit is discarded and
/// partial numbers are grouped as far as they go (`"01234"` -> `"0123 4"`).
pub fn format_phone(raw: &str) -> String {
    let mut out = String::with_capacity(PHONE_DIGITS + 2);

    for (i, digit) in raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .enumerate()
    {
        if i == 4 || i == 7 {
            out.push(' ');
        }
        out.push(digit);
    }

    out
}
