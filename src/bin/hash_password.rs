// Prints an Argon2id hash for a users file entry.

use clap::Parser;
use slides_server::domain::ports::PasswordVerifier;
use slides_server::interface_adapters::credentials::Argon2PasswordHasher;
use std::io::{self, BufRead};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "hash_password")]
#[command(version, about = "Hash a password for the slides server users file", long_about = None)]
#[command(after_help = "The password is read from the first line of standard input.")]
struct Cli {
    /// Print a complete users file record instead of the bare hash
    #[arg(long)]
    username: Option<String>,

    /// Role for the printed record
    #[arg(long, default_value = "user", requires = "username")]
    role: String,

    /// Id for the printed record
    #[arg(long, default_value_t = 1, requires = "username")]
    id: u64,
}

// First line of the reader without its line ending; blank input is an error.
fn read_password(reader: impl BufRead) -> Result<String, String> {
    let line = reader
        .lines()
        .next()
        .transpose()
        .map_err(|e| format!("failed to read password: {e}"))?
        .unwrap_or_default();
    let password = line.trim_end_matches('\r').to_string();

    if password.is_empty() {
        return Err("no password given on standard input".to_string());
    }
    Ok(password)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let password = match read_password(io::stdin().lock()) {
        Ok(password) => password,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let hasher = Argon2PasswordHasher::new();
    let hash = match hasher.hash(&password) {
        Ok(hash) => hash,
        Err(e) => {
            eprintln!("failed to hash password: {e}");
            return ExitCode::FAILURE;
        }
    };

    if !hasher.verify(&password, &hash) {
        eprintln!("generated hash did not verify");
        return ExitCode::FAILURE;
    }

    match cli.username {
        Some(username) => {
            let record = serde_json::json!({
                "id": cli.id,
                "username": username,
                "password_hash": hash,
                "role": cli.role,
            });
            println!("{record}");
        }
        None => println!("{hash}"),
    }

    ExitCode::SUCCESS
}
