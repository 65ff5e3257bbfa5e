//! Name prompt as identity provider; no account, no network.

use std::io::{BufRead, Write};

use super::prompt::Prompt;
use super::{Identity, IdentityProvider, SessionError, UserProfile};

pub struct LocalPromptProvider<R, W> {
    prompt: Prompt<R, W>,
}

impl<R: BufRead, W: Write> LocalPromptProvider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            prompt: Prompt::new(input, output),
        }
    }
}

impl<R: BufRead, W: Write> IdentityProvider for LocalPromptProvider<R, W> {
    fn name(&self) -> &'static str {
        "local"
    }

    fn sign_in(&mut self) -> Result<UserProfile, SessionError> {
        let name = self
            .prompt
            .ask("Enter your name")?
            .ok_or(SessionError::Cancelled)?;
        Ok(UserProfile {
            uid: Identity::new(name.clone()),
            display_name: Some(name),
            email: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn name_becomes_identity() {
        let mut p = LocalPromptProvider::new(Cursor::new("Dev Parikh\n"), Vec::<u8>::new());
        let user = p.sign_in().unwrap();
        assert_eq!(user.uid.as_str(), "Dev Parikh");
        assert_eq!(user.label(), "Dev Parikh");
    }

    #[test]
    fn blank_or_eof_cancels() {
        let mut p = LocalPromptProvider::new(Cursor::new("   \n"), Vec::<u8>::new());
        assert!(matches!(p.sign_in(), Err(SessionError::Cancelled)));
        assert!(matches!(p.sign_in(), Err(SessionError::Cancelled)));
    }
}
