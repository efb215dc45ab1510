use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::home_dir;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthState {
    pub gemini_api_key: Option<String>,
}

fn auth_path() -> Result<PathBuf> {
    Ok(home_dir()?.join("auth.json"))
}

pub fn load_auth() -> Result<AuthState> {
    let p = auth_path()?;
    if !p.exists() {
        return Ok(AuthState::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_auth(auth: &AuthState) -> Result<()> {
    let p = auth_path()?;
    let s = serde_json::to_string_pretty(auth)?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// Environment first, then ~/.ledgerlens/auth.json.
pub fn resolve_api_key() -> Result<String> {
    let from_env = std::env::var(API_KEY_ENV).ok();
    let stored = || load_auth().map(|a| a.gemini_api_key);
    match pick_api_key(from_env, stored)? {
        Some(key) => Ok(key),
        None => bail!(
            "missing Gemini API key; set {API_KEY_ENV} or run: ledgerlens auth paste-api-key"
        ),
    }
}

fn pick_api_key(
    from_env: Option<String>,
    stored: impl FnOnce() -> Result<Option<String>>,
) -> Result<Option<String>> {
    let non_empty = |k: String| {
        let k = k.trim().to_string();
        if k.is_empty() { None } else { Some(k) }
    };
    if let Some(k) = from_env.and_then(non_empty) {
        return Ok(Some(k));
    }
    Ok(stored()?.and_then(non_empty))
}

fn prompt_secret(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

pub fn paste_api_key() -> Result<()> {
    let mut auth = load_auth()?;
    let key = prompt_secret("Paste Gemini API key (starts with AIza)")?;
    if !key.starts_with("AIza") {
        bail!("key didn't look like a Gemini API key (expected prefix AIza)");
    }
    auth.gemini_api_key = Some(key);
    save_auth(&auth)?;
    println!("Saved Gemini API key to ~/.ledgerlens/auth.json");
    Ok(())
}
