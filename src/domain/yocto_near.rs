use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, AddAssign, Deref, Sub, SubAssign},
};

#[derive(
    BorshSerialize, BorshDeserialize, Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Default,
)]
pub struct YoctoNear(pub u128);

impl YoctoNear {
    pub const ZERO: YoctoNear = YoctoNear(0);

    pub fn value(&self) -> u128 {
        self.0
    }

    pub fn saturating_sub(self, rhs: YoctoNear) -> YoctoNear {
        YoctoNear(self.0.saturating_sub(rhs.0))
    }
}

impl From<u128> for YoctoNear {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<YoctoNear> for u128 {
    fn from(value: YoctoNear) -> Self {
        value.0
    }
}

impl Deref for YoctoNear {
    type Target = u128;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Add for YoctoNear {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        YoctoNear(self.0 + rhs.0)
    }
}

impl AddAssign for YoctoNear {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for YoctoNear {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        YoctoNear(self.0 - rhs.0)
    }
}

impl SubAssign for YoctoNear {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Display for YoctoNear {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
