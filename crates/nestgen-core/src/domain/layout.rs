//! Where everything for one module lives on disk.
//!
//! ```text
//! <project>/<src>/<kebab>/
//! ├── <kebab>.module.ts            (nest g module)
//! ├── controllers/<kebab>.controller.ts
//! ├── dto/create-<kebab>.dto.ts
//! ├── dto/update-<kebab>.dto.ts
//! ├── entities/<kebab>.entity.ts
//! ├── repositories/<kebab>.repository.ts   (repository variant only)
//! ├── services/<kebab>.service.ts
//! └── tests/<kebab>.{service,controller}.spec.ts
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, naming::ModuleName, templates::Artifact};

/// Which of the two fixed template sets gets written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVariant {
    /// Custom repository class in `repositories/`; the service depends on it.
    #[default]
    Repository,
    /// The service injects TypeORM's `Repository<T>` directly.
    Classic,
}

impl TemplateVariant {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Repository => "repository",
            Self::Classic => "classic",
        }
    }

    pub const fn has_repository(self) -> bool {
        matches!(self, Self::Repository)
    }
}

impl fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "repository" | "repo" => Ok(Self::Repository),
            "classic" => Ok(Self::Classic),
            other => Err(DomainError::UnknownVariant(other.to_string())),
        }
    }
}

/// A schematic understood by the external scaffolding command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Schematic {
    Module,
    Service,
    Controller,
}

impl Schematic {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Service => "service",
            Self::Controller => "controller",
        }
    }
}

impl fmt::Display for Schematic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const BASE_FOLDERS: [&str; 5] = ["services", "controllers", "dto", "entities", "tests"];
const REPOSITORY_FOLDER: &str = "repositories";

/// All paths for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLayout {
    project_root: PathBuf,
    module_dir: PathBuf,
    name: ModuleName,
    variant: TemplateVariant,
}

impl ModuleLayout {
    /// Build the layout for `name` under `<project_root>/<src_dir>`.
    pub fn new(
        project_root: impl Into<PathBuf>,
        src_dir: impl AsRef<Path>,
        name: ModuleName,
        variant: TemplateVariant,
    ) -> Result<Self, DomainError> {
        let src_dir = src_dir.as_ref();
        if src_dir.is_absolute() {
            return Err(DomainError::AbsoluteSourceDir {
                path: src_dir.display().to_string(),
            });
        }

        let project_root = project_root.into();
        let module_dir = project_root.join(src_dir).join(name.kebab());

        Ok(Self {
            project_root,
            module_dir,
            name,
            variant,
        })
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn module_dir(&self) -> &Path {
        &self.module_dir
    }

    pub fn name(&self) -> &ModuleName {
        &self.name
    }

    pub fn variant(&self) -> TemplateVariant {
        self.variant
    }

    /// Subfolders created under the module directory, in creation order.
    pub fn subfolders(&self) -> Vec<PathBuf> {
        let mut folders: Vec<PathBuf> = BASE_FOLDERS
            .iter()
            .map(|f| self.module_dir.join(f))
            .collect();
        if self.variant.has_repository() {
            folders.push(self.module_dir.join(REPOSITORY_FOLDER));
        }
        folders
    }

    /// `<kebab>.module.ts`, produced by `nest g module`.
    pub fn module_file(&self) -> PathBuf {
        self.module_dir.join(format!("{}.module.ts", self.name.kebab()))
    }

    /// The file a schematic drops next to the module file.
    pub fn generated_source(&self, schematic: Schematic) -> PathBuf {
        self.module_dir
            .join(format!("{}.{}.ts", self.name.kebab(), schematic.as_str()))
    }

    /// The spec file a schematic drops next to the module file.
    pub fn generated_spec(&self, schematic: Schematic) -> PathBuf {
        self.module_dir
            .join(format!("{}.{}.spec.ts", self.name.kebab(), schematic.as_str()))
    }

    /// Where a relocated spec file ends up.
    pub fn relocated_spec(&self, schematic: Schematic) -> PathBuf {
        self.module_dir
            .join("tests")
            .join(format!("{}.{}.spec.ts", self.name.kebab(), schematic.as_str()))
    }

    /// Final location of a templated artifact.
    pub fn artifact_path(&self, artifact: Artifact) -> PathBuf {
        self.module_dir
            .join(artifact.folder())
            .join(artifact.file_name(&self.name))
    }

    /// Templated artifacts written for this layout's variant, in write order.
    pub fn artifacts(&self) -> Vec<Artifact> {
        let mut artifacts = vec![Artifact::Entity, Artifact::CreateDto, Artifact::UpdateDto];
        if self.variant.has_repository() {
            artifacts.push(Artifact::Repository);
        }
        artifacts.push(Artifact::Service);
        artifacts.push(Artifact::Controller);
        artifacts
    }
}
