// file: src/launcher/bootstrap.rs
// description: gate-by-gate launch sequence for the backend process

use crate::config::LauncherConfig;
use crate::error::{OpsError, Result};
use crate::launcher::env_file::BackendEnv;
use crate::launcher::port::ensure_port_free;
use crate::launcher::provision::Provisioner;
use crate::utils::logging::{format_info, format_step, format_success};
use std::fs;
use std::io::Write;
use tracing::{info, warn};

const STEPS: usize = 7;

pub fn launch<P, W>(config: &LauncherConfig, provisioner: &P, out: &mut W) -> Result<()>
where
    P: Provisioner,
    W: Write,
{
    if !config.backend_dir.is_dir() {
        return Err(OpsError::Validation(format!(
            "Backend directory does not exist: {}",
            config.backend_dir.display()
        )));
    }

    let env_path = config.resolve(&config.env_file);
    writeln!(out, "{}", format_step(1, STEPS, "Checking configuration file"))?;
    if !env_path.is_file() {
        warn!("{} not found, writing a template", env_path.display());
        BackendEnv::scaffold(&env_path)?;
        return Err(OpsError::ConfigScaffolded { path: env_path });
    }
    let env = BackendEnv::read(&env_path)?;
    info!("Using backend configuration {}", env.path().display());

    writeln!(out, "{}", format_step(2, STEPS, "Validating API key"))?;
    env.require_secret()?;
    let port = env.port(config.default_port)?;

    writeln!(out, "{}", format_step(3, STEPS, "Preparing virtual environment"))?;
    if provisioner.runtime_exists() {
        info!("Virtual environment already present");
    } else {
        provisioner.create_runtime()?;
        writeln!(out, "{}", format_success("Virtual environment created"))?;
    }

    writeln!(out, "{}", format_step(4, STEPS, "Installing dependencies"))?;
    provisioner.install_dependencies()?;

    writeln!(
        out,
        "{}",
        format_step(5, STEPS, &format!("Checking port {}", port))
    )?;
    ensure_port_free(port)?;

    let log_dir = config.resolve(&config.log_dir);
    writeln!(out, "{}", format_step(6, STEPS, "Preparing log directory"))?;
    fs::create_dir_all(&log_dir).map_err(|e| OpsError::FileOperation {
        path: log_dir.clone(),
        source: e,
    })?;

    writeln!(out, "{}", format_step(7, STEPS, "Starting backend"))?;
    writeln!(
        out,
        "{}",
        format_info(&format!(
            "API docs will be at http://localhost:{}/docs once the server is up",
            port
        ))
    )?;
    out.flush()?;

    provisioner.hand_off(port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::launcher::env_file::{API_KEY, PLACEHOLDER_SECRET};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::net::TcpListener;
    use std::path::Path;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingProvisioner {
        exists: bool,
        calls: RefCell<Vec<String>>,
    }

    impl RecordingProvisioner {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl Provisioner for RecordingProvisioner {
        fn runtime_exists(&self) -> bool {
            self.exists
        }

        fn create_runtime(&self) -> Result<()> {
            self.calls.borrow_mut().push("create".to_string());
            Ok(())
        }

        fn install_dependencies(&self) -> Result<()> {
            self.calls.borrow_mut().push("install".to_string());
            Ok(())
        }

        fn hand_off(&self, port: u16) -> Result<()> {
            self.calls.borrow_mut().push(format!("hand_off:{}", port));
            Ok(())
        }
    }

    fn launcher_in(dir: &Path) -> LauncherConfig {
        let mut launcher = Config::default_config().launcher;
        launcher.backend_dir = dir.to_path_buf();
        launcher
    }

    fn write_env(dir: &Path, secret: &str, port: u16) {
        fs::write(
            dir.join(".env"),
            format!("{}={}\nBACKEND_PORT={}\n", API_KEY, secret, port),
        )
        .unwrap();
    }

    fn free_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[test]
    fn test_missing_env_file_is_scaffolded() {
        let temp = TempDir::new().unwrap();
        let provisioner = RecordingProvisioner::default();

        let result = launch(&launcher_in(temp.path()), &provisioner, &mut std::io::sink());

        assert!(matches!(result, Err(OpsError::ConfigScaffolded { .. })));
        let written = fs::read_to_string(temp.path().join(".env")).unwrap();
        assert!(written.contains(&format!("{}={}", API_KEY, PLACEHOLDER_SECRET)));
        assert!(provisioner.calls().is_empty());
    }

    #[test]
    fn test_placeholder_secret_stops_before_provisioning() {
        let temp = TempDir::new().unwrap();
        write_env(temp.path(), PLACEHOLDER_SECRET, free_port());
        let provisioner = RecordingProvisioner::default();

        let result = launch(&launcher_in(temp.path()), &provisioner, &mut std::io::sink());

        assert!(matches!(result, Err(OpsError::PlaceholderSecret { .. })));
        assert!(provisioner.calls().is_empty());
        assert!(!temp.path().join("logs").exists());
    }

    #[test]
    fn test_bound_port_stops_before_hand_off() {
        let temp = TempDir::new().unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        write_env(temp.path(), "sk-live", port);
        let provisioner = RecordingProvisioner::default();

        let result = launch(&launcher_in(temp.path()), &provisioner, &mut std::io::sink());

        assert!(matches!(result, Err(OpsError::PortInUse(p)) if p == port));
        assert_eq!(provisioner.calls(), vec!["create", "install"]);
        drop(listener);
    }

    #[test]
    fn test_full_launch_hands_off() {
        let temp = TempDir::new().unwrap();
        let port = free_port();
        write_env(temp.path(), "sk-live", port);
        let provisioner = RecordingProvisioner {
            exists: true,
            ..RecordingProvisioner::default()
        };

        let mut out = Vec::new();
        launch(&launcher_in(temp.path()), &provisioner, &mut out).unwrap();

        assert_eq!(
            provisioner.calls(),
            vec!["install".to_string(), format!("hand_off:{}", port)]
        );
        assert!(temp.path().join("logs").is_dir());
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("[7/7]"));
    }

    #[test]
    fn test_missing_backend_dir() {
        let temp = TempDir::new().unwrap();
        let provisioner = RecordingProvisioner::default();

        let result = launch(
            &launcher_in(&temp.path().join("absent")),
            &provisioner,
            &mut std::io::sink(),
        );

        assert!(matches!(result, Err(OpsError::Validation(_))));
        assert!(!temp.path().join("absent").exists());
    }
}
