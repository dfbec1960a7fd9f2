use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::collections::HashMap;
use std::env;
use std::process::Command;
use std::sync::OnceLock;

fn env_var_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([A-Za-z0-9_]+)\}").expect("static regex"))
}

/// Expand `${VAR}` from the environment; unset variables expand to nothing.
pub(crate) fn expand_cmdline_env(cmdline: &str, env_map: &HashMap<String, String>) -> String {
    env_var_re()
        .replace_all(cmdline, |caps: &regex::Captures| {
            let value = env_map.get(&caps[1]).cloned().unwrap_or_default();
            // Keep values with whitespace a single shlex word
            if value.chars().any(|c| c.is_whitespace()) {
                format!("\"{}\"", value.replace('"', "\\\""))
            } else {
                value
            }
        })
        .to_string()
}

/// Run a command line and return its stdout.
pub fn run_cmdline_to_string(cmdline: &str) -> Result<String> {
    let env_map: HashMap<String, String> = env::vars().collect();
    let expanded = expand_cmdline_env(cmdline, &env_map);
    let parts = shlex::split(&expanded).ok_or_else(|| anyhow!("Failed to parse command line"))?;
    let (program, args) = parts
        .split_first()
        .ok_or_else(|| anyhow!("Empty command line"))?;
    tracing::debug!(%expanded, "running layout command");
    let output = Command::new(program)
        .args(args)
        .env("DYNFORM_JSON", "1")
        .output()
        .with_context(|| format!("spawning {expanded}"))?;
    if !output.status.success() {
        let err = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(anyhow!("Command failed: {}\n{}", cmdline, err));
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
