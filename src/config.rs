use anyhow::{anyhow, Result};
use std::env;

use crate::session::{base_url, Cookie, CookieProvider, FormLogin, StaticCookies};

pub const USERNAME_VAR: &str = "LEETCODE_USERNAME";
pub const PASSWORD_VAR: &str = "LEETCODE_PASSWORD";
pub const SESSION_VAR: &str = "LEETCODE_SESSION";
pub const CSRF_VAR: &str = "csrftoken";

/// Credentials and cookies read from the environment (and `.env`).
#[derive(Debug, Default, Clone)]
pub struct Config {
    pub username: Option<String>,
    pub password: Option<String>,
    pub session: Option<String>,
    pub csrf_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("no .env file loaded: {}", e);
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            username: get(USERNAME_VAR),
            password: get(PASSWORD_VAR),
            session: get(SESSION_VAR),
            csrf_token: get(CSRF_VAR),
        }
    }

    /// Session cookies when `use_cookies` is set, a form login otherwise.
    pub fn cookie_provider(&self, use_cookies: bool) -> Result<Box<dyn CookieProvider>> {
        if use_cookies {
            let session = required(&self.session, SESSION_VAR)?;
            let csrf_token = required(&self.csrf_token, CSRF_VAR)?;
            Ok(Box::new(StaticCookies::new(vec![
                Cookie::new("LEETCODE_SESSION", session),
                Cookie::new("csrftoken", csrf_token),
            ])))
        } else {
            let username = required(&self.username, USERNAME_VAR)?;
            let password = required(&self.password, PASSWORD_VAR)?;
            Ok(Box::new(FormLogin::new(base_url()?, username, password)))
        }
    }
}

fn required(value: &Option<String>, name: &str) -> Result<String> {
    value
        .clone()
        .ok_or_else(|| anyhow!("{} is not set", name))
}
