//! Local account commands.

use std::process::ExitCode;

use soleverse_client::SignupForm;

use super::{CommandError, Context, notice};

pub fn signup(ctx: &Context, form: &SignupForm) -> Result<ExitCode, CommandError> {
    let mut accounts = ctx.accounts()?;

    match accounts.signup(form) {
        Ok(profile) => {
            println!("Account created for {}. You can now log in.", profile.email);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(notice(e)),
    }
}

pub fn login(ctx: &Context, email: &str, password: &str) -> Result<ExitCode, CommandError> {
    let mut accounts = ctx.accounts()?;

    match accounts.login(email, password) {
        Ok(profile) => {
            println!("Welcome back, {}!", profile.name);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(notice(e)),
    }
}

pub fn logout(ctx: &Context) -> Result<ExitCode, CommandError> {
    let mut accounts = ctx.accounts()?;
    accounts.logout();
    println!("Logged out.");
    Ok(ExitCode::SUCCESS)
}

pub fn whoami(ctx: &Context) -> Result<ExitCode, CommandError> {
    let accounts = ctx.accounts()?;

    match accounts.current_user() {
        Some(user) if accounts.is_authenticated() => {
            println!("{} <{}>", user.name, user.email);
            println!("Phone: {}", user.phone);
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(notice("Not logged in")),
    }
}
