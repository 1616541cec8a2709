//! Coin amounts and denomination conversion.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{WalletError, WalletResult};

/// An on-chain amount in a minimal denom. Amounts are integer strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.to_string(),
        }
    }

    /// Convert a display amount (e.g. `1.5` SEI) into the minimal denom
    /// (`1500000` usei for 6 decimals).
    ///
    /// Rejects negative amounts and amounts finer than the denom allows.
    pub fn from_display(amount: Decimal, denom: impl Into<String>, decimals: u8) -> WalletResult<Self> {
        if amount.is_sign_negative() {
            return Err(WalletError::InvalidAmount(format!("{amount} is negative")));
        }
        let scale = scale_for(decimals)?;
        let minimal = amount
            .checked_mul(scale)
            .ok_or_else(|| WalletError::InvalidAmount(format!("{amount} overflows")))?;
        if !minimal.fract().is_zero() {
            return Err(WalletError::InvalidAmount(format!(
                "{amount} has more than {decimals} decimal places"
            )));
        }
        let minimal = minimal.trunc().normalize();
        let value: u128 = minimal
            .to_string()
            .parse()
            .map_err(|_| WalletError::InvalidAmount(format!("{amount} is not representable")))?;
        Ok(Self::new(denom, value))
    }

    /// Display amount for `decimals`.
    pub fn to_display(&self, decimals: u8) -> WalletResult<Decimal> {
        let minimal: Decimal = self
            .amount
            .parse()
            .map_err(|_| WalletError::InvalidAmount(self.amount.clone()))?;
        Ok(minimal / scale_for(decimals)?)
    }
}

/// `10^decimals`, within what `Decimal` can hold.
fn scale_for(decimals: u8) -> WalletResult<Decimal> {
    if u32::from(decimals) > Decimal::MAX_SCALE {
        return Err(WalletError::InvalidAmount(format!(
            "{decimals} decimals exceeds the supported precision"
        )));
    }
    Ok(Decimal::from_i128_with_scale(10i128.pow(u32::from(decimals)), 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_to_minimal() {
        let coin = Coin::from_display(dec!(1.5), "usei", 6).unwrap();
        assert_eq!(coin.amount, "1500000");
        assert_eq!(coin.denom, "usei");

        let whole = Coin::from_display(dec!(1000), "usei", 6).unwrap();
        assert_eq!(whole.amount, "1000000000");
    }

    #[test]
    fn test_rejects_negative_and_excess_precision() {
        assert!(matches!(
            Coin::from_display(dec!(-1), "usei", 6),
            Err(WalletError::InvalidAmount(_))
        ));
        assert!(matches!(
            Coin::from_display(dec!(0.0000001), "usei", 6),
            Err(WalletError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_to_display() {
        let coin = Coin::new("usei", 5_000);
        assert_eq!(coin.to_display(6).unwrap(), dec!(0.005));
    }
}
