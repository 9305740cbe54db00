//! Administrator-held pause switch.
//!
//! While paused, operations that take on new commitments (create, bid)
//! are refused. Wind-down (finalize) and reads stay available.

use dadi_types::{AccountId, DadiError, Result};

/// Global pause flag plus the identity allowed to flip it.
pub struct PauseSwitch {
    admin: AccountId,
    paused: bool,
}

impl PauseSwitch {
    #[must_use]
    pub fn new(admin: AccountId, paused: bool) -> Self {
        Self { admin, paused }
    }

    #[must_use]
    pub fn admin(&self) -> AccountId {
        self.admin
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Guard a gated operation. `operation` only feeds the error message.
    pub fn check_running(&self, operation: &str) -> Result<()> {
        if self.paused {
            Err(DadiError::NotPermitted {
                reason: format!("registry is paused, {operation} refused"),
            })
        } else {
            Ok(())
        }
    }

    /// # Errors
    /// `NotAdministrator` for anyone but the admin, `NotPermitted` if
    /// already paused.
    pub fn pause(&mut self, caller: AccountId) -> Result<()> {
        self.ensure_admin(caller)?;
        if self.paused {
            return Err(DadiError::NotPermitted {
                reason: "registry is already paused".to_string(),
            });
        }
        self.paused = true;
        Ok(())
    }

    /// # Errors
    /// `NotAdministrator` for anyone but the admin, `NotPermitted` if
    /// not paused.
    pub fn unpause(&mut self, caller: AccountId) -> Result<()> {
        self.ensure_admin(caller)?;
        if !self.paused {
            return Err(DadiError::NotPermitted {
                reason: "registry is not paused".to_string(),
            });
        }
        self.paused = false;
        Ok(())
    }

    /// Hand the switch to `new_admin`. Returns the previous admin.
    pub fn transfer_admin(&mut self, caller: AccountId, new_admin: AccountId) -> Result<AccountId> {
        self.ensure_admin(caller)?;
        Ok(std::mem::replace(&mut self.admin, new_admin))
    }

    fn ensure_admin(&self, caller: AccountId) -> Result<()> {
        if caller == self.admin {
            Ok(())
        } else {
            Err(DadiError::NotAdministrator { caller })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_configured_state() {
        let admin = AccountId::new();
        assert!(!PauseSwitch::new(admin, false).is_paused());
        assert!(PauseSwitch::new(admin, true).is_paused());
    }

    #[test]
    fn running_switch_allows_operations() {
        let switch = PauseSwitch::new(AccountId::new(), false);
        assert!(switch.check_running("create").is_ok());
    }

    #[test]
    fn paused_switch_refuses_operations() {
        let admin = AccountId::new();
        let mut switch = PauseSwitch::new(admin, false);
        switch.pause(admin).unwrap();
        let err = switch.check_running("bid").unwrap_err();
        assert!(matches!(err, DadiError::NotPermitted { ref reason } if reason.contains("bid")));
    }

    #[test]
    fn only_admin_toggles() {
        let admin = AccountId::new();
        let other = AccountId::new();
        let mut switch = PauseSwitch::new(admin, false);

        let err = switch.pause(other).unwrap_err();
        assert!(matches!(err, DadiError::NotAdministrator { caller } if caller == other));
        assert!(!switch.is_paused());

        switch.pause(admin).unwrap();
        assert!(switch.unpause(other).is_err());
        assert!(switch.is_paused());
    }

    #[test]
    fn double_toggle_is_refused() {
        let admin = AccountId::new();
        let mut switch = PauseSwitch::new(admin, false);
        assert!(matches!(
            switch.unpause(admin).unwrap_err(),
            DadiError::NotPermitted { .. }
        ));
        switch.pause(admin).unwrap();
        assert!(matches!(
            switch.pause(admin).unwrap_err(),
            DadiError::NotPermitted { .. }
        ));
        switch.unpause(admin).unwrap();
        assert!(!switch.is_paused());
    }

    #[test]
    fn transfer_admin_moves_the_right() {
        let old = AccountId::new();
        let new = AccountId::new();
        let mut switch = PauseSwitch::new(old, false);

        assert_eq!(switch.transfer_admin(old, new).unwrap(), old);
        assert_eq!(switch.admin(), new);
        assert!(switch.pause(old).is_err());
        switch.pause(new).unwrap();
    }
}
