//! Config loading and output writing shared by both tools.

use crate::GlobalArgs;
use flo2v_config::{load_config_file, ConfigError, Flo2vConfig};
use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Loads `--config` if given, otherwise the default configuration.
pub fn load_config(global: &GlobalArgs) -> Result<Flo2vConfig, ConfigError> {
    match &global.config {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            load_config_file(path)
        }
        None => Ok(Flo2vConfig::default()),
    }
}

/// Writes a finished artifact to `output`, or to stdout when `None`.
pub fn write_output(output: Option<&Path>, bytes: &[u8]) -> io::Result<()> {
    match output {
        Some(path) => {
            debug!("writing {} bytes to {}", bytes.len(), path.display());
            fs::write(path, bytes)
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flo2v_config::PortSuffix;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn global_with_config(config: Option<PathBuf>) -> GlobalArgs {
        GlobalArgs {
            output: None,
            config,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn no_config_uses_defaults() {
        let config = load_config(&global_with_config(None)).unwrap();
        assert_eq!(config, Flo2vConfig::default());
    }

    #[test]
    fn explicit_config_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("flo2v.toml");
        fs::write(&path, "[module]\nport_suffix = \"double\"\n").unwrap();
        let config = load_config(&global_with_config(Some(path))).unwrap();
        assert_eq!(config.module.port_suffix, PortSuffix::Double);
    }

    #[test]
    fn missing_config_file_errors() {
        let err = load_config(&global_with_config(Some(PathBuf::from(
            "/nonexistent/flo2v.toml",
        ))))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn write_output_to_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.v");
        write_output(Some(&path), b"module Top();\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "module Top();\n");
    }
}
