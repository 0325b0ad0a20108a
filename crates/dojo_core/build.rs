use std::fs;

fn main() {
    // Validate default config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    // The pass threshold must be a percentage
    if let Some(score) = table
        .get("quiz")
        .and_then(|quiz| quiz.get("default_pass_score"))
        .and_then(|score| score.as_integer())
        && !(0..=100).contains(&score)
    {
        panic!("default_config.toml: quiz.default_pass_score must be 0-100, got {}", score);
    }
}
