//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// The configuration file name looked up in a project directory.
pub const CONFIG_FILE: &str = "strata.toml";

/// Loads and validates `strata.toml` from a project directory.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    load_config_file(&project_dir.join(CONFIG_FILE))
}

/// Loads and validates a configuration from an explicit file path.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Loads `strata.toml` from a project directory if the file exists.
///
/// A missing file yields the default configuration; a present but invalid
/// file is an error.
pub fn find_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let path = project_dir.join(CONFIG_FILE);
    if path.is_file() {
        load_config_file(&path)
    } else {
        Ok(ProjectConfig::default())
    }
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Rejects empty entries that would otherwise be silently misread.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.hierarchy.libdirs.iter().any(|d| d.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "hierarchy.libdirs contains an empty entry".to_string(),
        ));
    }
    if config.hierarchy.top.as_deref().is_some_and(str::is_empty) {
        return Err(ConfigError::ValidationError(
            "hierarchy.top is empty".to_string(),
        ));
    }
    if let Some(generate) = &config.generate {
        if generate.cell_types.iter().any(String::is_empty) {
            return Err(ConfigError::ValidationError(
                "generate.cell_types contains an empty pattern".to_string(),
            ));
        }
        if let Some(bad) = generate.ports.iter().find(|p| !looks_like_port_decl(p)) {
            return Err(ConfigError::ValidationError(format!(
                "generate.ports entry '{bad}' is not of the form {{i|o|io}}[@pos]:name"
            )));
        }
    }
    Ok(())
}

/// Checks the outer shape of a port declaration: a direction, an optional
/// positive position and a non-empty name.
fn looks_like_port_decl(decl: &str) -> bool {
    let Some((head, name)) = decl.split_once(':') else {
        return false;
    };
    if name.is_empty() {
        return false;
    }
    let (dir, pos) = match head.split_once('@') {
        Some((dir, pos)) => (dir, Some(pos)),
        None => (head, None),
    };
    let dir_ok = matches!(dir, "i" | "o" | "io");
    let pos_ok = pos.map_or(true, |p| p.parse::<u32>().is_ok_and(|n| n >= 1));
    dir_ok && pos_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml = r#"
[hierarchy]
top = "top"
libdirs = ["lib", "vendor/cells"]
check = true
purge_lib = false
keep_positionals = true

[generate]
cell_types = ["MUX*", "DFF?"]
ports = ["i:A", "i:B", "o@3:Y"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.hierarchy.top.as_deref(), Some("top"));
        assert_eq!(config.hierarchy.libdirs.len(), 2);
        assert!(config.hierarchy.check);
        assert!(!config.hierarchy.purge_lib);
        assert!(config.hierarchy.keep_positionals);
        let generate = config.generate.unwrap();
        assert_eq!(generate.cell_types, vec!["MUX*", "DFF?"]);
        assert_eq!(generate.ports, vec!["i:A", "i:B", "o@3:Y"]);
    }

    #[test]
    fn empty_libdir_errors() {
        let err = load_config_from_str("[hierarchy]\nlibdirs = [\"lib\", \"\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn empty_top_errors() {
        let err = load_config_from_str("[hierarchy]\ntop = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn bad_port_declaration_errors() {
        for bad in ["x:A", "i@0:A", "i:", "A", "o@two:Y"] {
            let toml = format!("[generate]\nports = [\"{bad}\"]\n");
            let err = load_config_from_str(&toml).unwrap_err();
            assert!(
                matches!(err, ConfigError::ValidationError(_)),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn port_declaration_shapes() {
        assert!(looks_like_port_decl("i:A"));
        assert!(looks_like_port_decl("io@2:bus*"));
        assert!(looks_like_port_decl("o@3:Y"));
        assert!(!looks_like_port_decl("io@:Y"));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn find_config_defaults_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let config = find_config(dir.path()).unwrap();
        assert!(config.hierarchy.libdirs.is_empty());
    }

    #[test]
    fn find_config_reads_present_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[hierarchy]\ncheck = true\n").unwrap();
        let config = find_config(dir.path()).unwrap();
        assert!(config.hierarchy.check);
    }
}
