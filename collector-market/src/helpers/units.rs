use num_bigint::BigUint;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    #[error("invalid integer amount: {0}")]
    InvalidInteger(String),
    #[error("invalid decimal amount: {0}")]
    InvalidDecimal(String),
    #[error("amount has more than {0} decimal places")]
    TooManyDecimals(u32),
}

/// Formats a smallest-unit integer amount (base-10 string) into a human
/// readable decimal string. All arithmetic is arbitrary precision, values
/// above 2^53 keep every digit.
pub fn format_units(raw: &str, decimals: u32) -> Result<String, UnitsError> {
    let value =
        BigUint::from_str(raw).map_err(|_| UnitsError::InvalidInteger(raw.to_string()))?;

    if decimals == 0 {
        return Ok(raw.to_string());
    }

    let base = BigUint::from(10u32).pow(decimals);
    let whole = &value / &base;
    let fraction = &value % &base;

    if fraction == BigUint::default() {
        return Ok(whole.to_string());
    }

    let mut fraction = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    while fraction.ends_with('0') {
        fraction.pop();
    }

    Ok(format!("{whole}.{fraction}"))
}

/// Parses a human readable decimal string into a smallest-unit integer
/// amount, the exact inverse of [`format_units`]. Rejects fractional parts
/// longer than `decimals`.
pub fn parse_units(amount: &str, decimals: u32) -> Result<BigUint, UnitsError> {
    let trimmed = amount.trim();
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    if whole.is_empty() && fraction.is_empty() {
        return Err(UnitsError::InvalidDecimal(amount.to_string()));
    }
    if (!whole.is_empty() && !all_digits(whole)) || (!fraction.is_empty() && !all_digits(fraction))
    {
        return Err(UnitsError::InvalidDecimal(amount.to_string()));
    }
    if fraction.len() as u32 > decimals {
        return Err(UnitsError::TooManyDecimals(decimals));
    }

    let base = BigUint::from(10u32).pow(decimals);
    let whole = if whole.is_empty() {
        BigUint::default()
    } else {
        BigUint::from_str(whole).map_err(|_| UnitsError::InvalidDecimal(amount.to_string()))?
    };
    let fraction = if fraction.is_empty() {
        BigUint::default()
    } else {
        let padded = format!("{fraction:0<width$}", width = decimals as usize);
        BigUint::from_str(&padded).map_err(|_| UnitsError::InvalidDecimal(amount.to_string()))?
    };

    Ok(whole * base + fraction)
}
