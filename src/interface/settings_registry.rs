use crate::interface::{Settings, SettingsUpdate};

pub trait SettingsRegistry {
    fn view_settings(&self) -> Settings;

    /// Only the specified settings are changed. The block height of the change is recorded.
    ///
    /// ## Panics
    /// - `UNAUTHORIZED` if not invoked by the operator
    /// - `INVALID_CONFIG`
    ///   - if the fee rate or slashing tolerance exceeds 10000 basis points
    ///   - if the staking delegate is changed while principal is delegated or withdrawal requests
    ///     are outstanding
    ///   - if the exchange rate mode is changed after receipts were minted
    fn update_settings(&mut self, update: SettingsUpdate);
}

pub mod events {
    use crate::interface::SettingsUpdate;

    #[derive(Debug)]
    pub struct SettingsUpdated<'a> {
        pub block_height: u64,
        pub update: &'a SettingsUpdate,
    }
}
