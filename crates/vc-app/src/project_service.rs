//! Configuration loading, saving, validation, and introspection.

use std::path::Path;
use std::str::FromStr;

use vc_project::schema::Project;

use crate::error::{AppError, AppResult};

/// Configurations bundled with the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Freezer,
    CompressorBench,
}

impl Demo {
    pub const ALL: [Demo; 2] = [Demo::Freezer, Demo::CompressorBench];

    pub fn key(&self) -> &'static str {
        match self {
            Demo::Freezer => "freezer",
            Demo::CompressorBench => "compressor",
        }
    }

    pub fn yaml(&self) -> &'static str {
        match self {
            Demo::Freezer => include_str!("../../../demos/r290_freezer.yaml"),
            Demo::CompressorBench => include_str!("../../../demos/r290_compressor.yaml"),
        }
    }

    pub fn load(&self) -> AppResult<Project> {
        Ok(vc_project::from_yaml_str(self.yaml())?)
    }
}

impl FromStr for Demo {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Demo::ALL
            .into_iter()
            .find(|d| d.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::UnknownDemo(s.to_string()))
    }
}

/// Short description of a configured system.
#[derive(Debug, Clone)]
pub struct SystemOverview {
    pub id: String,
    pub name: String,
    /// (component id, component type)
    pub components: Vec<(String, &'static str)>,
    /// (junction id, fluid, from, to)
    pub junctions: Vec<(String, String, String, String)>,
}

/// Load a configuration from YAML, or JSON when the extension says so.
pub fn load_project(path: &Path) -> AppResult<Project> {
    if !path.exists() {
        return Err(AppError::ProjectFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        });
    }
    let project = if is_json(path) {
        vc_project::load_json(path)?
    } else {
        vc_project::load_yaml(path)?
    };
    Ok(project)
}

pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    if is_json(path) {
        vc_project::save_json(path, project)?;
    } else {
        vc_project::save_yaml(path, project)?;
    }
    Ok(())
}

pub fn validate_project(project: &Project) -> AppResult<()> {
    vc_project::validate_config(project)
        .map_err(|e| AppError::Project(format!("Validation failed: {e}")))
}

pub fn describe_project(project: &Project) -> SystemOverview {
    let system = &project.system;
    SystemOverview {
        id: system.id.clone(),
        name: project.name.clone(),
        components: system
            .components
            .iter()
            .map(|c| (c.id.clone(), c.kind.type_name()))
            .collect(),
        junctions: system
            .junctions
            .iter()
            .map(|j| {
                (
                    j.id.clone(),
                    j.fluid.clone(),
                    format!("{}.{}", j.from.component, j.from.port),
                    format!("{}.{}", j.to.component, j.to.port),
                )
            })
            .collect(),
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
