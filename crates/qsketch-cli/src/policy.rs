//! Product limits on register size and shot count.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use qsketch_ir::MAX_QUBITS_DENSE;

/// A policy violation or an unreadable policy file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PolicyError {
    #[error("Qubits must be between {min} and {max} (got {requested})")]
    QubitsOutOfRange { requested: u32, min: u32, max: u32 },

    #[error("Shots must be between {min} and {max} (got {requested})")]
    ShotsOutOfRange { requested: u64, min: u64, max: u64 },

    #[error("Invalid policy: {0}")]
    Invalid(String),

    #[error("Failed to read policy file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse policy file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// Limits applied by the command-line front end.
///
/// The simulator itself accepts any register up to its own cap; these are the
/// narrower bounds the interactive product exposes.
///
/// ```yaml
/// min_qubits: 1
/// max_qubits: 5
/// default_qubits: 2
/// min_shots: 100
/// max_shots: 10000
/// default_shots: 1024
/// persist_implicit_measure: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub min_qubits: u32,
    pub max_qubits: u32,
    /// Register size used when a command names none and no circuit exists.
    pub default_qubits: u32,
    pub min_shots: u64,
    pub max_shots: u64,
    pub default_shots: u64,
    /// Keep the measurement appended by `simulate` in the session circuit.
    pub persist_implicit_measure: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_qubits: 1,
            max_qubits: 5,
            default_qubits: 2,
            min_shots: 100,
            max_shots: 10_000,
            default_shots: 1024,
            persist_implicit_measure: true,
        }
    }
}

impl Policy {
    /// Load a policy from a YAML file; missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let source = fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let policy: Policy =
            serde_yaml_ng::from_str(&source).map_err(|source| PolicyError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load from `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, PolicyError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Check that the bounds are consistent.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.min_qubits == 0 || self.min_qubits > self.max_qubits {
            return Err(PolicyError::Invalid(format!(
                "qubit range {}..={} is empty or starts at zero",
                self.min_qubits, self.max_qubits
            )));
        }
        if self.max_qubits > MAX_QUBITS_DENSE {
            return Err(PolicyError::Invalid(format!(
                "max_qubits {} exceeds the simulator limit of {MAX_QUBITS_DENSE}",
                self.max_qubits
            )));
        }
        self.check_qubits(self.default_qubits).map_err(|_| {
            PolicyError::Invalid(format!(
                "default_qubits {} is outside {}..={}",
                self.default_qubits, self.min_qubits, self.max_qubits
            ))
        })?;
        if self.min_shots == 0 || self.min_shots > self.max_shots {
            return Err(PolicyError::Invalid(format!(
                "shot range {}..={} is empty or starts at zero",
                self.min_shots, self.max_shots
            )));
        }
        self.check_shots(self.default_shots).map_err(|_| {
            PolicyError::Invalid(format!(
                "default_shots {} is outside {}..={}",
                self.default_shots, self.min_shots, self.max_shots
            ))
        })
    }

    pub fn check_qubits(&self, requested: u32) -> Result<(), PolicyError> {
        if !(self.min_qubits..=self.max_qubits).contains(&requested) {
            return Err(PolicyError::QubitsOutOfRange {
                requested,
                min: self.min_qubits,
                max: self.max_qubits,
            });
        }
        Ok(())
    }

    pub fn check_shots(&self, requested: u64) -> Result<(), PolicyError> {
        if !(self.min_shots..=self.max_shots).contains(&requested) {
            return Err(PolicyError::ShotsOutOfRange {
                requested,
                min: self.min_shots,
                max: self.max_shots,
            });
        }
        Ok(())
    }

    /// `requested` if given, otherwise the default, checked against the bounds.
    pub fn resolve_shots(&self, requested: Option<u64>) -> Result<u64, PolicyError> {
        let shots = requested.unwrap_or(self.default_shots);
        self.check_shots(shots)?;
        Ok(shots)
    }
}
