use std::{env, fs, path::PathBuf};

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR"));
    let config_path = manifest_dir.join("config").join("buttons.toml");
    println!("cargo:rerun-if-changed={}", config_path.display());

    let generated = match button_config_compiler::generate_from_path(&config_path) {
        Ok(generated) => generated,
        Err(err) => panic!("\n\ninvalid {}: {err}\n\n", config_path.display()),
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR"));
    fs::write(out_dir.join("button_config.rs"), generated)
        .expect("failed to write generated button config");
}
