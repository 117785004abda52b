//! The `aula register`, `login`, `logout` and `whoami` commands.

use anyhow::Result;

use aula_core::PortalConfig;

use super::open_portal;

pub fn register(config: &PortalConfig, username: &str, password: &str) -> Result<()> {
    let portal = open_portal(config);
    portal.register(username, password)?;
    println!("Registered {}. Sign in with `aula login`.", username.trim());
    Ok(())
}

pub fn login(config: &PortalConfig, username: &str, password: &str) -> Result<()> {
    let portal = open_portal(config);
    let principal = portal.login(username, password)?;
    println!("Signed in as {principal}");
    Ok(())
}

pub fn logout(config: &PortalConfig) -> Result<()> {
    let portal = open_portal(config);
    portal.logout()?;
    println!("Signed out");
    Ok(())
}

pub fn whoami(config: &PortalConfig) -> Result<()> {
    let portal = open_portal(config);
    match portal.current_user()? {
        Some(principal) => println!("{principal}"),
        None => println!("Not signed in"),
    }
    Ok(())
}
