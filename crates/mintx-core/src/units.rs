use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::ValueError;

/// Number of fractional decimal digits in one coin.
pub const COIN_DECIMALS: usize = 18;

/// 10^18: pip per whole coin.
pub fn pip_per_coin() -> BigUint {
    BigUint::from(10u32).pow(COIN_DECIMALS as u32)
}

/// Whole coins to pip.
pub fn coins(amount: u64) -> BigUint {
    BigUint::from(amount) * pip_per_coin()
}

/// Convert a human decimal amount ("1", "0.5", "12.000000000000000001") to pip.
///
/// Digits beyond the 18th fractional place are truncated, never rounded.
pub fn to_pip(decimal: &str) -> Result<BigUint, ValueError> {
    let invalid = || ValueError::InvalidAmount(decimal.to_string());

    let (whole, fraction) = match decimal.split_once('.') {
        Some((w, f)) => (w, f),
        None => (decimal, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let kept = &fraction[..fraction.len().min(COIN_DECIMALS)];
    let mut digits = String::with_capacity(whole.len() + COIN_DECIMALS);
    digits.push_str(whole);
    digits.push_str(kept);
    digits.extend(std::iter::repeat('0').take(COIN_DECIMALS - kept.len()));

    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)
}

/// Render a pip amount as an exact decimal string with trailing zeros trimmed.
pub fn from_pip(pip: &BigUint) -> String {
    let unit = pip_per_coin();
    let whole = pip / &unit;
    let rem = pip % &unit;
    if rem.is_zero() {
        return whole.to_string();
    }
    let fraction = format!("{:0>width$}", rem.to_string(), width = COIN_DECIMALS);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}
