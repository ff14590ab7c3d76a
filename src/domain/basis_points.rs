use crate::core::U256;
use crate::domain::YoctoNear;
use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};
use std::{
    fmt::{self, Display, Formatter},
    ops::{Deref, Mul},
};

/// Basis points (BPS) refers to a common unit of measure for interest rates and other percentages in finance.
/// One basis point is equal to 1/100th of 1%, or 0.01%, or 0.0001.
#[derive(
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Default,
    Hash,
)]
#[serde(crate = "near_sdk::serde")]
pub struct BasisPoints(pub u16);

impl BasisPoints {
    pub const ZERO: BasisPoints = BasisPoints(0);
    pub const MAX: BasisPoints = BasisPoints(10000);

    pub fn value(&self) -> u16 {
        self.0
    }

    /// returns true if the value is within [0, 10000]
    pub fn is_valid(&self) -> bool {
        *self <= Self::MAX
    }

    pub fn of_rounded_down(&self, amount: YoctoNear) -> YoctoNear {
        *self * amount
    }
}

impl From<u16> for BasisPoints {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl Deref for BasisPoints {
    type Target = u16;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for BasisPoints {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Mul<YoctoNear> for BasisPoints {
    type Output = YoctoNear;

    /// result is rounded down
    fn mul(self, rhs: YoctoNear) -> Self::Output {
        (U256::from(*rhs) * U256::from(*self) / U256::from(10000))
            .as_u128()
            .into()
    }
}
