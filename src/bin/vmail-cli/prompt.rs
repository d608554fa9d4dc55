use anyhow::{Context, Result};
use vmail_lib::{PasswordInput, PasswordPolicy, confirm_password};

use crate::args::PasswordArgs;

/// `--password-hash` wins; otherwise the cleartext comes from `--password`
/// or an interactive prompt.
pub fn password_input(args: &PasswordArgs, policy: &PasswordPolicy) -> Result<PasswordInput> {
    if let Some(hash) = &args.password_hash {
        return Ok(if args.raw_password_hash {
            PasswordInput::RawHash(hash.clone())
        } else {
            PasswordInput::Hashed(hash.clone())
        });
    }
    let cleartext = match &args.password {
        Some(password) => password.clone(),
        None => read_password(policy)?,
    };
    Ok(PasswordInput::Cleartext(cleartext))
}

fn read_password(policy: &PasswordPolicy) -> Result<String> {
    let first = rpassword::prompt_password("enter password: ").context("read password")?;
    let second = rpassword::prompt_password("repeat password: ").context("read password")?;
    Ok(confirm_password(first, &second, policy)?)
}
