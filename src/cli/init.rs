//! Init command implementation
//!
//! Scaffolds a Gatehouse deployment: `gatehouse.toml`, a `.env` holding a
//! freshly generated signing secret, and a `.gitignore` entry for `.env`.

use super::output::Output;
use crate::auth::jwt::MIN_SECRET_LEN;
use rand::RngCore;
use std::fs;
use std::path::Path;

/// Result of the init operation
#[derive(Debug)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// Deployment already exists (gatehouse.toml found)
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: std::path::PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// Host address for the server
    pub host: String,
    /// Port for the server
    pub port: u16,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing Gatehouse");

    let base_path = &config.path;

    let config_path = base_path.join("gatehouse.toml");
    if config_path.exists() && !config.force {
        output.warning("gatehouse.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    if !base_path.exists() {
        if let Err(e) = fs::create_dir_all(base_path) {
            output.error(&format!("Failed to create {}: {}", base_path.display(), e));
            return InitResult::Error(e.to_string());
        }
    }

    let toml_content = generate_gatehouse_toml(&config);
    if let Err(e) = write_file(&config_path, &toml_content, config.force) {
        output.error(&format!("Failed to create gatehouse.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "gatehouse.toml");

    // Never replace an existing secret unless asked to: doing so invalidates
    // every token issued with it.
    let env_path = base_path.join(".env");
    if env_path.exists() && !config.force {
        output.skipped(".env", "already exists, keeping current secret");
    } else {
        let env_content = generate_env(&generate_secret());
        if let Err(e) = write_file(&env_path, &env_content, config.force) {
            output.error(&format!("Failed to create .env: {}", e));
            return InitResult::Error(e.to_string());
        }
        output.created("env", ".env");
    }

    let gitignore_path = base_path.join(".gitignore");
    if gitignore_path.exists() {
        output.skipped(".gitignore", "already exists");
    } else if let Err(e) = write_file(&gitignore_path, &generate_gitignore(), false) {
        output.warning(&format!("Failed to create .gitignore: {}", e));
    } else {
        output.created("file", ".gitignore");
    }

    output.complete("Gatehouse initialized successfully!");

    output.header("Next Steps");
    output.newline();
    output.info("Start the server:");
    output.command("gatehouse-server");
    output.newline();
    output.kv("Signup", &format!("POST http://{}:{}/api/auth/signup", config.host, config.port));
    output.kv("Login", &format!("POST http://{}:{}/api/auth/login", config.host, config.port));

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    fs::write(path, content)
}

/// Random hex-encoded signing secret, twice the minimum length.
fn generate_secret() -> String {
    let mut bytes = [0u8; MIN_SECRET_LEN];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn generate_gatehouse_toml(config: &InitConfig) -> String {
    format!(
        r#"# Gatehouse Configuration
# =======================
# Generated by: gatehouse-server init
#
# REQUIRED: the environment variable named by auth.jwt_secret_env must hold
# the token signing secret (min {min_len} bytes). `init` wrote one to .env.

[server]
host = "{host}"
port = {port}
log_level = "info"
# "pretty" or "json"
log_format = "pretty"
request_timeout_secs = 30
max_body_bytes = 65536

[auth]
jwt_secret_env = "JWT_SECRET"
# Access token lifetime
token_ttl_secs = 120

[auth.argon2]
memory_kib = 19456
iterations = 2
parallelism = 1
"#,
        min_len = MIN_SECRET_LEN,
        host = config.host,
        port = config.port,
    )
}

fn generate_env(secret: &str) -> String {
    format!(
        r#"# Gatehouse Environment Variables
# Keep this file out of version control.

# Token signing secret
JWT_SECRET={secret}

# Optional: overrides server.log_level
# RUST_LOG=gatehouse=debug,tower_http=debug
"#,
        secret = secret
    )
}

fn generate_gitignore() -> String {
    r#"# Environment
.env
.env.local

# Rust
/target/
"#
    .to_string()
}
