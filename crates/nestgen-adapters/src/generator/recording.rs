//! A stand-in for the Nest CLI used by tests and dry environments.
//!
//! It records every invocation and, when given a [`MemoryFilesystem`],
//! writes the same files `nest g` would: the module skeleton, the
//! service/controller with its spec, and the registration in the module.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use nestgen_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, Generator},
    },
    domain::{ModuleName, Schematic},
    error::NestgenResult,
};

use crate::filesystem::MemoryFilesystem;

/// One recorded `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub schematic: Schematic,
    pub name: String,
    pub project_root: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingGenerator {
    calls: Arc<Mutex<Vec<Invocation>>>,
    simulate: Option<(MemoryFilesystem, PathBuf)>,
    fail_on: Option<Schematic>,
}

impl RecordingGenerator {
    /// Record calls without touching any file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record calls and write Nest's output into `fs` under `src_dir`.
    pub fn simulating(fs: MemoryFilesystem, src_dir: impl Into<PathBuf>) -> Self {
        Self {
            simulate: Some((fs, src_dir.into())),
            ..Self::default()
        }
    }

    /// Exit with status 1 when `schematic` is requested.
    pub fn failing_on(mut self, schematic: Schematic) -> Self {
        self.fail_on = Some(schematic);
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn write_outputs(
        fs: &MemoryFilesystem,
        dir: &Path,
        schematic: Schematic,
        name: &ModuleName,
    ) -> NestgenResult<()> {
        let kebab = name.kebab();
        let class = name.pascal();
        fs.create_dir_all(dir)?;

        let module_file = dir.join(format!("{kebab}.module.ts"));
        if schematic == Schematic::Module {
            fs.write_file(
                &module_file,
                &format!(
                    "import {{ Module }} from '@nestjs/common';\n\n@Module({{}})\nexport class {class}Module {{}}\n"
                ),
            )?;
            return Ok(());
        }

        let (suffix, decorator, property) = match schematic {
            Schematic::Service => ("Service", "Injectable", "providers"),
            _ => ("Controller", "Controller", "controllers"),
        };
        let subject = format!("{class}{suffix}");
        let file_stem = format!("{kebab}.{schematic}");

        let decorator_args = if schematic == Schematic::Controller {
            format!("'{kebab}'")
        } else {
            String::new()
        };
        fs.write_file(
            &dir.join(format!("{file_stem}.ts")),
            &format!(
                "import {{ {decorator} }} from '@nestjs/common';\n\n@{decorator}({decorator_args})\nexport class {subject} {{}}\n"
            ),
        )?;
        fs.write_file(
            &dir.join(format!("{file_stem}.spec.ts")),
            &format!(
                "import {{ Test, TestingModule }} from '@nestjs/testing';\nimport {{ {subject} }} from './{file_stem}';\n\ndescribe('{subject}', () => {{\n  it('should be defined', async () => {{\n    const module: TestingModule = await Test.createTestingModule({{\n      providers: [{subject}],\n    }}).compile();\n    expect(module.get<{subject}>({subject})).toBeDefined();\n  }});\n}});\n"
            ),
        )?;

        if let Some(module) = fs.contents(&module_file) {
            let registered = register(&module, &subject, &file_stem, property);
            fs.write_file(&module_file, &registered)?;
        }
        Ok(())
    }
}

/// Mimic Nest's module update: one import line and one array entry.
fn register(module: &str, subject: &str, file_stem: &str, property: &str) -> String {
    let import = format!("import {{ {subject} }} from './{file_stem}';");
    let mut lines: Vec<String> = module.lines().map(str::to_string).collect();
    let after_imports = lines
        .iter()
        .rposition(|l| l.starts_with("import "))
        .map_or(0, |i| i + 1);
    lines.insert(after_imports, import);
    let mut out = lines.join("\n");
    out.push('\n');

    let existing = format!("{property}: [");
    if let Some(pos) = out.find(&existing) {
        let at = pos + existing.len();
        return format!("{}{subject}, {}", &out[..at], &out[at..]);
    }
    if out.contains("@Module({})") {
        return out.replacen(
            "@Module({})",
            &format!("@Module({{\n  {property}: [{subject}]\n}})"),
            1,
        );
    }
    out.replacen(
        "\n})",
        &format!(",\n  {property}: [{subject}]\n}})"),
        1,
    )
}

impl Generator for RecordingGenerator {
    fn generate(&self, schematic: Schematic, name: &str, project_root: &Path) -> NestgenResult<()> {
        self.calls
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .push(Invocation {
                schematic,
                name: name.to_string(),
                project_root: project_root.to_path_buf(),
            });

        if self.fail_on == Some(schematic) {
            return Err(ApplicationError::GeneratorFailed {
                command: self.describe(schematic, name),
                status: Some(1),
            }
            .into());
        }

        if let Some((fs, src_dir)) = &self.simulate {
            let module = ModuleName::parse(name)?;
            let dir = project_root.join(src_dir).join(module.kebab());
            Self::write_outputs(fs, &dir, schematic, &module)?;
        }
        Ok(())
    }

    fn describe(&self, schematic: Schematic, name: &str) -> String {
        format!("nest g {schematic} {name}")
    }
}
