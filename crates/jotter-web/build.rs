use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Default, Serialize)]
struct WebBootstrapConfig {
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
}

fn main() {
    println!("cargo:rerun-if-env-changed=SUPABASE_URL");
    println!("cargo:rerun-if-env-changed=SUPABASE_ANON_KEY");

    if let Err(error) = write_web_bootstrap_config() {
        println!("cargo:warning=failed to generate web bootstrap config: {error}");
    }
}

fn write_web_bootstrap_config() -> io::Result<()> {
    if let Some(dotenv) = load_workspace_dotenv() {
        println!("cargo:rerun-if-changed={}", dotenv.display());
    }

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))?;
    fs::create_dir_all(&out_dir)?;

    let config = WebBootstrapConfig {
        supabase_url: env_var_trimmed("SUPABASE_URL"),
        supabase_anon_key: env_var_trimmed("SUPABASE_ANON_KEY"),
    };

    let content = serde_json::to_string_pretty(&config)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error.to_string()))?;
    fs::write(out_dir.join("web-bootstrap.json"), content)?;
    Ok(())
}

fn load_workspace_dotenv() -> Option<PathBuf> {
    let manifest_dir =
        env::var_os("CARGO_MANIFEST_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from);
    let candidate = manifest_dir.join("..").join("..").join(".env");
    if !candidate.exists() {
        return None;
    }
    dotenvy::from_path(&candidate).ok()?;
    Some(candidate)
}

fn env_var_trimmed(name: &str) -> Option<String> {
    let value = env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
