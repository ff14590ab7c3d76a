//required in order for near_bindgen macro to work outside of lib.rs
use crate::*;
use crate::{
    interface::{
        settings_registry::events::SettingsUpdated, Settings, SettingsRegistry, SettingsUpdate,
    },
    near::log,
};
use near_sdk::near_bindgen;

#[near_bindgen]
impl SettingsRegistry for LiquidStakingContract {
    fn view_settings(&self) -> Settings {
        (&self.settings).into()
    }

    fn update_settings(&mut self, update: SettingsUpdate) {
        self.assert_predecessor_is_operator();

        let delegate_in_use = self.delegate_in_use();
        let receipts_outstanding = self.receipt_token.total_supply().value() > 0;
        self.settings
            .apply_update(&update, delegate_in_use, receipts_outstanding)
            .unwrap_or_else(|err| err.panic());
        self.settings_change_block_height = BlockHeight::from_env();

        log(SettingsUpdated {
            block_height: self.settings_change_block_height.value(),
            update: &update,
        });
    }
}
