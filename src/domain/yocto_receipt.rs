use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, AddAssign, Deref, Sub, SubAssign},
};

/// receipt token amount denominated in yocto units, i.e., 10^24 yocto = 1 receipt token
#[derive(
    BorshSerialize, BorshDeserialize, Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Default,
)]
pub struct YoctoReceipt(pub u128);

impl YoctoReceipt {
    pub const ZERO: YoctoReceipt = YoctoReceipt(0);

    pub fn value(&self) -> u128 {
        self.0
    }
}

impl From<u128> for YoctoReceipt {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<YoctoReceipt> for u128 {
    fn from(value: YoctoReceipt) -> Self {
        value.0
    }
}

impl Deref for YoctoReceipt {
    type Target = u128;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Add for YoctoReceipt {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        YoctoReceipt(self.0 + rhs.0)
    }
}

impl AddAssign for YoctoReceipt {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for YoctoReceipt {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        YoctoReceipt(self.0 - rhs.0)
    }
}

impl SubAssign for YoctoReceipt {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Display for YoctoReceipt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
