// file: src/launcher/provision.rs
// description: python virtual environment provisioning and backend hand-off

use crate::config::LauncherConfig;
use crate::error::{OpsError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Side-effecting steps of a launch. Split out so the gate sequence can run
/// without a Python toolchain.
pub trait Provisioner {
    fn runtime_exists(&self) -> bool;

    fn create_runtime(&self) -> Result<()>;

    fn install_dependencies(&self) -> Result<()>;

    /// Runs the backend in the foreground. On Unix this only returns on failure.
    fn hand_off(&self, port: u16) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct VenvProvisioner {
    python: String,
    backend_dir: PathBuf,
    venv_dir: PathBuf,
    requirements: PathBuf,
    entrypoint: PathBuf,
}

impl VenvProvisioner {
    /// Every path is made absolute up front: the child processes run with
    /// `backend_dir` as their working directory.
    pub fn from_config(config: &LauncherConfig) -> Result<Self> {
        let backend_dir =
            std::path::absolute(&config.backend_dir).map_err(|e| OpsError::FileOperation {
                path: config.backend_dir.clone(),
                source: e,
            })?;
        let resolve = |path: &Path| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                backend_dir.join(path)
            }
        };

        Ok(Self {
            python: config.python.clone(),
            venv_dir: resolve(&config.venv_dir),
            requirements: resolve(&config.requirements),
            entrypoint: resolve(&config.entrypoint),
            backend_dir,
        })
    }

    pub fn venv_dir(&self) -> &Path {
        &self.venv_dir
    }

    fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.venv_dir.join("Scripts")
        } else {
            self.venv_dir.join("bin")
        }
    }

    pub fn venv_python(&self) -> PathBuf {
        if cfg!(windows) {
            self.bin_dir().join("python.exe")
        } else {
            self.bin_dir().join("python")
        }
    }

    /// PATH with the environment's bin directory in front, the same effect
    /// as sourcing its activate script.
    fn activated_path(&self) -> Result<OsString> {
        let mut paths = vec![self.bin_dir()];
        if let Some(existing) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&existing));
        }
        std::env::join_paths(paths).map_err(|e| OpsError::Config(format!("Invalid PATH: {}", e)))
    }

    fn run(command: &mut Command) -> Result<()> {
        let program = command.get_program().to_string_lossy().into_owned();
        debug!("Running {:?}", command);

        let status = command.status().map_err(|e| OpsError::Command {
            program: program.clone(),
            detail: e.to_string(),
        })?;

        if !status.success() {
            return Err(OpsError::Command {
                program,
                detail: format!("exited with {}", status),
            });
        }
        Ok(())
    }
}

impl Provisioner for VenvProvisioner {
    fn runtime_exists(&self) -> bool {
        self.venv_dir.is_dir()
    }

    fn create_runtime(&self) -> Result<()> {
        let python = which::which(&self.python).map_err(|e| OpsError::Command {
            program: self.python.clone(),
            detail: format!("not found on PATH: {}", e),
        })?;

        info!("Creating virtual environment at {}", self.venv_dir.display());
        Self::run(Command::new(python).arg("-m").arg("venv").arg(&self.venv_dir))
    }

    fn install_dependencies(&self) -> Result<()> {
        if !self.requirements.is_file() {
            return Err(OpsError::Validation(format!(
                "Dependency manifest not found: {}",
                self.requirements.display()
            )));
        }

        info!("Installing dependencies from {}", self.requirements.display());
        Self::run(
            Command::new(self.venv_python())
                .args(["-m", "pip", "install", "-r"])
                .arg(&self.requirements)
                .current_dir(&self.backend_dir)
                .env("VIRTUAL_ENV", &self.venv_dir)
                .env("PATH", self.activated_path()?),
        )
    }

    fn hand_off(&self, port: u16) -> Result<()> {
        let mut command = Command::new(self.venv_python());
        command
            .arg(&self.entrypoint)
            .current_dir(&self.backend_dir)
            .env("VIRTUAL_ENV", &self.venv_dir)
            .env("PATH", self.activated_path()?);

        info!("Starting backend on port {}", port);
        exec(command)
    }
}

#[cfg(unix)]
fn exec(mut command: Command) -> Result<()> {
    use std::os::unix::process::CommandExt;

    let program = command.get_program().to_string_lossy().into_owned();
    let err = command.exec();
    Err(OpsError::Command {
        program,
        detail: err.to_string(),
    })
}

#[cfg(not(unix))]
fn exec(mut command: Command) -> Result<()> {
    VenvProvisioner::run(&mut command)
}
