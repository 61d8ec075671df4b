//! Basic usage example for the INI reader
//!
//! Loads the file given on the command line (or a built-in sample) and prints
//! every section with its fields.

use ini_reader::{ConfigStore, LoadError};

const SAMPLE: &str = r#"
; Test config file

[Protocol]             ; Protocol configuration
Version=6              ; IPv6

[User]
Name = Bob Smith       ; Spaces around '=' are stripped
Email = bob@smith.com  ; And comments (like this) ignored
Active = true          ; Test a boolean
Ratio = 0.75           ; Test a floating point number
"#;

fn main() -> Result<(), LoadError> {
    env_logger::init();

    let store = match std::env::args().nth(1) {
        Some(path) => ConfigStore::open(path),
        None => ConfigStore::parse(SAMPLE),
    };

    if let Err(e) = store.check() {
        println!("Can't load configuration: {}", e);
        return Err(e);
    }

    println!(
        "Config loaded: version={}, name={}, email={}, ratio={}, active={}",
        store.get_integer("protocol", "version", -1),
        store.get("user", "name", "UNKNOWN"),
        store.get("user", "email", "UNKNOWN"),
        store.get_real("user", "ratio", -1.0),
        store.get_boolean("user", "active", true)
    );

    for section in store.sections() {
        println!("[{}]", section);
        for field in store.fields(section) {
            println!("{} = {}", field, store.get(section, field, ""));
        }
        println!();
    }

    Ok(())
}
