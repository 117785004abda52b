//! One module per subcommand.

pub mod account;
pub mod browse;
pub mod init;
pub mod quiz;
pub mod validate;

use anyhow::anyhow;

use aula_core::{Portal, PortalConfig, PortalError};

pub(crate) fn open_portal(config: &PortalConfig) -> Portal {
    Portal::from_config(config)
}

/// Turn a failed auth gate into a hint, pass every other error through.
pub(crate) fn signed_in<T>(result: Result<T, PortalError>) -> anyhow::Result<T> {
    result.map_err(|e| {
        if e.requires_sign_in() {
            anyhow!("not signed in, run `aula login` first")
        } else {
            anyhow::Error::new(e)
        }
    })
}
