//! Interactive sub-commands: account signup and the welcome app.

use std::io::{self, BufRead, Write};

use webterm_core::EnvironmentDescriptor;

use crate::constants::{WELCOME_APP_COMMAND, WELCOME_APP_SLUG};

/// Runs the account signup flow for an environment.
pub trait SignupFlow {
    /// Run to completion.
    fn signup(&self, environment: &EnvironmentDescriptor) -> io::Result<()>;
}

/// Runs the example app.
pub trait WelcomeFlow {
    /// Run to completion.
    fn welcome(&self) -> io::Result<()>;
}

/// Points the user at the environment's signup page.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignupPage;

impl SignupPage {
    /// Write the signup instructions to `out`.
    pub fn write_to(
        &self,
        out: &mut dyn Write,
        environment: &EnvironmentDescriptor,
    ) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "━━━ Create a webterm account ━━━")?;
        writeln!(out)?;
        writeln!(out, "Sign up at: {}", environment.signup_url())?;
        writeln!(out)?;
        writeln!(out, "Your API key will be emailed to you. Then either:")?;
        writeln!(out, "  export WEBTERM_API_KEY=<key>")?;
        writeln!(out, "or add it to your config file:")?;
        writeln!(out, "  [account]")?;
        writeln!(out, "  api_key = \"<key>\"")?;
        writeln!(out)?;
        Ok(())
    }
}

impl SignupFlow for SignupPage {
    fn signup(&self, environment: &EnvironmentDescriptor) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_to(&mut out, environment)?;
        out.flush()
    }
}

/// Prints a welcome banner and waits for Enter.
#[derive(Debug, Default, Clone, Copy)]
pub struct WelcomeBanner;

impl WelcomeBanner {
    /// Write the banner to `out`, then block until a line (or EOF) is read
    /// from `input`.
    pub fn run_with(&self, input: &mut dyn BufRead, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "╔════════════════════════════════════════╗")?;
        writeln!(out, "║          Welcome to webterm!           ║")?;
        writeln!(out, "╚════════════════════════════════════════╝")?;
        writeln!(out)?;
        writeln!(out, "This app is published because nothing else was.")?;
        writeln!(
            out,
            "It runs as `{}` under the slug `{}`.",
            WELCOME_APP_COMMAND, WELCOME_APP_SLUG
        )?;
        writeln!(out)?;
        writeln!(out, "Quick start:")?;
        writeln!(out, "  webterm -t                  # Publish a terminal")?;
        writeln!(out, "  webterm -c apps.toml        # Publish apps from a config file")?;
        writeln!(out, "  webterm --signup            # Get an API key")?;
        writeln!(out)?;
        write!(out, "Press Enter to exit.")?;
        out.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;
        writeln!(out)?;
        Ok(())
    }
}

impl WelcomeFlow for WelcomeBanner {
    fn welcome(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(&mut stdin.lock(), &mut stdout.lock())
    }
}

/// The flows a bootstrap can dispatch to.
pub struct Flows {
    /// `--signup`.
    pub signup: Box<dyn SignupFlow>,
    /// `--welcome`.
    pub welcome: Box<dyn WelcomeFlow>,
}

impl Default for Flows {
    fn default() -> Self {
        Self {
            signup: Box::new(SignupPage),
            welcome: Box::new(WelcomeBanner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webterm_core::{resolve, Profile};

    #[test]
    fn test_signup_page_names_environment_url() {
        let mut out = Vec::new();
        SignupPage.write_to(&mut out, resolve(Profile::Dev)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&resolve(Profile::Dev).signup_url()));
    }

    #[test]
    fn test_welcome_banner_waits_for_enter() {
        let mut input = io::Cursor::new(b"\n".to_vec());
        let mut out = Vec::new();
        WelcomeBanner.run_with(&mut input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Welcome to webterm!"));
        assert!(text.contains("Press Enter"));
        assert_eq!(input.position(), 1);
    }

    #[test]
    fn test_welcome_banner_eof() {
        let mut input = io::Cursor::new(Vec::new());
        let mut out = Vec::new();
        assert!(WelcomeBanner.run_with(&mut input, &mut out).is_ok());
    }
}
