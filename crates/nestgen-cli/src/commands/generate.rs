//! Implementation of the `nestgen generate` command.
//!
//! Responsibility: turn CLI arguments and config into a `GenerateRequest`,
//! call the core module service, and display results. No business logic
//! lives here.

use tracing::{debug, info, instrument};

use nestgen_adapters::{LocalFilesystem, NestCliGenerator};
use nestgen_core::{
    application::{GenerateRequest, ModuleService},
    domain::{GenerationPlan, GenerationReport, ModuleName, Outcome, Step},
};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute `nestgen generate`.
///
/// 1. Validate the name (before any file-system access)
/// 2. Merge flags over config into a request
/// 3. Plan; on `--dry-run` print the plan and stop
/// 4. Execute the plan and print what happened
#[instrument(skip_all, fields(name = args.name.as_deref().unwrap_or("")))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let name = parse_name(args.name.as_deref())?;
    let request = build_request(name, &args, &config);

    debug!(
        project = %request.project_root.display(),
        src_dir = %request.src_dir.display(),
        variant = %request.variant,
        run_generator = request.run_generator,
        "Request resolved"
    );

    let generator = NestCliGenerator::new(
        config.generator.program.clone(),
        config.generator.args.clone(),
    );
    let service = ModuleService::new(Box::new(LocalFilesystem::new()), Box::new(generator));

    let plan = service.plan(&request)?;

    if args.dry_run {
        return show_plan(&plan, &output);
    }

    if !output.is_json() {
        output.header(&format!(
            "Generating module {} in {}",
            plan.module.pascal(),
            plan.module_dir.display()
        ))?;
    }
    info!(module = %plan.module, "Generation started");

    let report = service.execute(&plan)?;
    show_report(&report, &output)
}

/// A missing or blank name is its own error (exit 1); anything else goes
/// through `ModuleName` validation.
fn parse_name(raw: Option<&str>) -> CliResult<ModuleName> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(CliError::MissingModuleName)?;
    Ok(ModuleName::parse(raw)?)
}

fn build_request(name: ModuleName, args: &GenerateArgs, config: &AppConfig) -> GenerateRequest {
    let mut request = GenerateRequest::new(name);
    request.project_root = args.project_dir.clone();
    request.src_dir = args
        .src_dir
        .clone()
        .unwrap_or_else(|| config.generator.src_dir.clone());
    request.variant = args
        .variant
        .map(Into::into)
        .unwrap_or(config.generator.variant);
    request.run_generator = !args.skip_generator;
    request
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn show_plan(plan: &GenerationPlan, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(plan)?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: nothing will be changed in {}",
        plan.module_dir.display()
    ))?;
    for planned in &plan.steps {
        match &planned.skip {
            None => output.print(&format!("  would {}", planned.step))?,
            Some(reason) => output.skipped(&format!("{} ({reason})", planned.step))?,
        }
    }
    if plan.is_noop() {
        output.success(&format!("Module {} is already complete", plan.module.pascal()))?;
    }
    Ok(())
}

fn show_report(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(report)?;
        return Ok(());
    }

    for step in &report.steps {
        match &step.outcome {
            Outcome::Done => output.success(&describe_done(&step.step))?,
            Outcome::Skipped { why } => output.skipped(&format!("{} ({why})", step.step))?,
        }
    }

    let written = report.written_files().len();
    output.print("")?;
    if written == 0 {
        output.success(&format!(
            "Module {} is already complete, nothing was overwritten",
            report.module.pascal()
        ))?;
    } else {
        output.success(&format!(
            "Module {} generated with CRUD service, controller and Swagger docs ({written} files written)",
            report.module.pascal()
        ))?;
    }
    Ok(())
}

fn describe_done(step: &Step) -> String {
    match step {
        Step::RunGenerator { schematic, name } => format!("nest {schematic} {name} generated"),
        Step::CreateDir { path } => format!("Folder created: {}", path.display()),
        Step::WriteFile { artifact, path } => {
            format!("{} written: {}", capitalize(artifact.label()), path.display())
        }
        Step::Relocate { to, .. } => format!("Moved to {}", to.display()),
        Step::PatchModule { path } => format!("Module imports updated: {}", path.display()),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GlobalArgs, OutputFormat, Variant};
    use nestgen_core::domain::{Artifact, DomainError, TemplateVariant};
    use nestgen_core::error::NestgenError;
    use std::path::PathBuf;

    fn args(name: Option<&str>) -> GenerateArgs {
        GenerateArgs {
            name: name.map(str::to_string),
            dry_run: false,
            variant: None,
            src_dir: None,
            project_dir: PathBuf::from("."),
            skip_generator: false,
        }
    }

    #[test]
    fn missing_and_blank_names_are_missing() {
        assert!(matches!(parse_name(None), Err(CliError::MissingModuleName)));
        assert!(matches!(parse_name(Some("   ")), Err(CliError::MissingModuleName)));
    }

    #[test]
    fn invalid_name_is_reported_as_such() {
        assert!(matches!(
            parse_name(Some("9lives")),
            Err(CliError::InvalidModuleName { .. })
        ));
    }

    #[test]
    fn config_fills_unset_flags() {
        let mut config = AppConfig::default();
        config.generator.src_dir = PathBuf::from("apps/api/src");
        config.generator.variant = TemplateVariant::Classic;

        let name = parse_name(Some("order")).unwrap();
        let req = build_request(name, &args(Some("order")), &config);
        assert_eq!(req.src_dir, PathBuf::from("apps/api/src"));
        assert_eq!(req.variant, TemplateVariant::Classic);
        assert!(req.run_generator);
    }

    #[test]
    fn flags_override_config() {
        let mut a = args(Some("order"));
        a.src_dir = Some(PathBuf::from("lib"));
        a.variant = Some(Variant::Repository);
        a.skip_generator = true;
        a.project_dir = PathBuf::from("../api");

        let mut config = AppConfig::default();
        config.generator.variant = TemplateVariant::Classic;

        let req = build_request(parse_name(Some("order")).unwrap(), &a, &config);
        assert_eq!(req.src_dir, PathBuf::from("lib"));
        assert_eq!(req.variant, TemplateVariant::Repository);
        assert_eq!(req.project_root, PathBuf::from("../api"));
        assert!(!req.run_generator);
    }

    #[cfg(unix)]
    #[test]
    fn planning_errors_keep_their_core_cause() {
        let global = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
        };
        let output = OutputManager::new(&global, &AppConfig::default());
        let mut a = args(Some("order"));
        a.src_dir = Some(PathBuf::from("/abs/src"));

        let err = execute(a, AppConfig::default(), output).unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(NestgenError::Domain(DomainError::AbsoluteSourceDir { .. }))
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn done_lines_name_the_artifact() {
        let line = describe_done(&Step::WriteFile {
            artifact: Artifact::CreateDto,
            path: PathBuf::from("src/order/dto/create-order.dto.ts"),
        });
        assert!(line.ends_with("written: src/order/dto/create-order.dto.ts"));
        assert!(line.chars().next().unwrap().is_uppercase());
    }
}
