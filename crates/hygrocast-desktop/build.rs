//! Build script for hygrocast-desktop
//!
//! Loads an optional `.env` file and forwards the serial and history settings
//! to the compiler so the binary can read them with `option_env!`. Variables
//! already set in the build environment take precedence over the file.

const FORWARDED_KEYS: [&str; 4] = [
    "HYGROCAST_SERIAL_PORT",
    "HYGROCAST_BAUD_RATE",
    "HYGROCAST_READ_TIMEOUT_MS",
    "HYGROCAST_HISTORY_LIMIT",
];

fn main() {
    match dotenvy::dotenv() {
        Ok(path) => println!("cargo:rerun-if-changed={}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => println!("cargo:warning=Ignoring unreadable .env file: {}", e),
    }

    for key in FORWARDED_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
        if let Ok(value) = std::env::var(key) {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
