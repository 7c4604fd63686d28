use std::fs;

const DEFAULT_CONFIG: &str = "src/default_config.toml";

fn main() {
    println!("cargo:rerun-if-changed={DEFAULT_CONFIG}");

    let content = fs::read_to_string(DEFAULT_CONFIG).expect("Failed to read default_config.toml");

    // Config::compiled_default falls back silently, so catch mistakes here
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {e}"),
    };

    for (section, key) in [("limits", "max_chars"), ("excerpt", "max_chars")] {
        let value = table
            .get(section)
            .and_then(|s| s.get(key))
            .and_then(toml::Value::as_integer);
        match value {
            Some(n) if n > 0 => {}
            _ => panic!("default_config.toml: [{section}] {key} must be a positive integer"),
        }
    }
}
