//! End-to-end generation against the in-memory adapters.

use std::path::Path;

use nestgen_adapters::{MemoryFilesystem, RecordingGenerator};
use nestgen_core::{
    application::ApplicationError,
    domain::{Outcome, SkipReason, Step},
    prelude::*,
};

const ROOT: &str = "/app";
const DIR: &str = "/app/src/user-profile";

fn setup() -> (MemoryFilesystem, RecordingGenerator, ModuleService) {
    let fs = MemoryFilesystem::new();
    let generator = RecordingGenerator::simulating(fs.clone(), "src");
    let service = ModuleService::new(Box::new(fs.clone()), Box::new(generator.clone()));
    (fs, generator, service)
}

fn request(variant: TemplateVariant) -> GenerateRequest {
    let mut req = GenerateRequest::new(ModuleName::parse("userProfile").unwrap());
    req.project_root = ROOT.into();
    req.variant = variant;
    req
}

fn file(fs: &MemoryFilesystem, rel: &str) -> String {
    fs.contents(Path::new(DIR).join(rel))
        .unwrap_or_else(|| panic!("missing {rel}"))
}

#[test]
fn fresh_project_gets_complete_module() {
    let (fs, generator, service) = setup();
    service.generate(&request(TemplateVariant::Repository)).unwrap();

    let schematics: Vec<Schematic> = generator
        .invocations()
        .into_iter()
        .map(|i| i.schematic)
        .collect();
    assert_eq!(
        schematics,
        vec![Schematic::Module, Schematic::Service, Schematic::Controller]
    );

    for rel in [
        "user-profile.module.ts",
        "entities/user-profile.entity.ts",
        "dto/create-user-profile.dto.ts",
        "dto/update-user-profile.dto.ts",
        "repositories/user-profile.repository.ts",
        "services/user-profile.service.ts",
        "controllers/user-profile.controller.ts",
        "tests/user-profile.service.spec.ts",
        "tests/user-profile.controller.spec.ts",
    ] {
        assert!(fs.exists(&Path::new(DIR).join(rel)), "{rel} not generated");
    }

    // Generator output next to the module file was moved away.
    assert!(!fs.exists(&Path::new(DIR).join("user-profile.service.ts")));
    assert!(!fs.exists(&Path::new(DIR).join("user-profile.controller.spec.ts")));
}

#[test]
fn relocated_files_carry_templates_and_fixed_imports() {
    let (fs, _, service) = setup();
    service.generate(&request(TemplateVariant::Repository)).unwrap();

    let svc = file(&fs, "services/user-profile.service.ts");
    assert!(svc.contains("export class UserProfileService"));
    assert!(svc.contains("UserProfileRepository"));

    let ctrl = file(&fs, "controllers/user-profile.controller.ts");
    assert!(ctrl.contains("@Controller('user-profile')"));

    let spec = file(&fs, "tests/user-profile.service.spec.ts");
    assert!(spec.contains("from '../services/user-profile.service'"));
}

#[test]
fn module_file_is_patched() {
    let (fs, _, service) = setup();
    service.generate(&request(TemplateVariant::Repository)).unwrap();

    let module = file(&fs, "user-profile.module.ts");
    assert!(module.contains("from './services/user-profile.service'"));
    assert!(module.contains("from './controllers/user-profile.controller'"));
    assert!(module.contains("TypeOrmModule.forFeature([UserProfile])"));
    assert!(module.contains("providers: [UserProfileRepository, UserProfileService]"));
    assert!(module.contains("controllers: [UserProfileController]"));
}

#[test]
fn second_run_changes_nothing() {
    let (fs, generator, service) = setup();
    let req = request(TemplateVariant::Repository);
    service.generate(&req).unwrap();

    let edited = "// hand edited\n";
    let service_path = Path::new(DIR).join("services/user-profile.service.ts");
    fs.insert_file(&service_path, edited);
    let module_before = file(&fs, "user-profile.module.ts");
    let calls_before = generator.invocations().len();

    let report = service.generate(&req).unwrap();

    assert!(report.written_files().is_empty());
    assert_eq!(generator.invocations().len(), calls_before);
    assert_eq!(fs.contents(&service_path).as_deref(), Some(edited));
    assert_eq!(file(&fs, "user-profile.module.ts"), module_before);
}

#[test]
fn deleted_file_is_restored_on_rerun() {
    let (fs, generator, service) = setup();
    let req = request(TemplateVariant::Classic);
    service.generate(&req).unwrap();
    let calls_before = generator.invocations().len();

    let dto = Path::new(DIR).join("dto/update-user-profile.dto.ts");
    fs.remove_file(&dto).unwrap();

    let report = service.generate(&req).unwrap();
    assert_eq!(report.written_files(), vec![&dto]);
    assert_eq!(generator.invocations().len(), calls_before);
}

#[test]
fn restored_controller_is_registered_once() {
    let (fs, generator, service) = setup();
    let req = request(TemplateVariant::Repository);
    service.generate(&req).unwrap();
    let module_before = file(&fs, "user-profile.module.ts");

    let controller = Path::new(DIR).join("controllers/user-profile.controller.ts");
    fs.remove_file(&controller).unwrap();

    service.generate(&req).unwrap();
    assert_eq!(
        generator.invocations().last().map(|i| i.schematic),
        Some(Schematic::Controller)
    );
    assert!(file(&fs, "controllers/user-profile.controller.ts").contains("@ApiTags"));
    // The regenerated spec is dropped; the existing one in tests/ stays.
    assert!(!fs.exists(&Path::new(DIR).join("user-profile.controller.spec.ts")));
    assert!(fs.exists(&Path::new(DIR).join("tests/user-profile.controller.spec.ts")));

    let module = file(&fs, "user-profile.module.ts");
    assert_eq!(
        module
            .matches("import { UserProfileController } from './controllers/user-profile.controller';")
            .count(),
        1
    );
    assert!(module.contains("controllers: [UserProfileController]"));
    assert!(!module.contains("UserProfileController, UserProfileController"));
    assert_eq!(module, module_before);

    // Nothing left to do afterwards.
    assert!(service.plan(&req).unwrap().is_noop());
}

#[test]
fn plan_only_touches_nothing() {
    let (fs, generator, service) = setup();
    let plan = service.plan(&request(TemplateVariant::Repository)).unwrap();

    assert!(!plan.is_noop());
    assert!(fs.list_files().is_empty());
    assert!(fs.list_directories().is_empty());
    assert!(generator.invocations().is_empty());
}

#[test]
fn skip_generator_writes_templates_only() {
    let (fs, generator, service) = setup();
    let mut req = request(TemplateVariant::Classic);
    req.run_generator = false;

    let report = service.generate(&req).unwrap();

    assert!(generator.invocations().is_empty());
    assert!(!fs.exists(&Path::new(DIR).join("user-profile.module.ts")));
    assert!(!fs.exists(&Path::new(DIR).join("repositories")));
    assert_eq!(report.written_files().len(), 5);

    let patch = report
        .steps
        .iter()
        .find(|s| matches!(s.step, Step::PatchModule { .. }))
        .unwrap();
    assert!(matches!(
        patch.outcome,
        Outcome::Skipped {
            why: SkipReason::Missing { .. }
        }
    ));
}

#[test]
fn generator_failure_stops_the_run() {
    let fs = MemoryFilesystem::new();
    let generator = RecordingGenerator::simulating(fs.clone(), "src").failing_on(Schematic::Service);
    let service = ModuleService::new(Box::new(fs.clone()), Box::new(generator));

    let err = service
        .generate(&request(TemplateVariant::Repository))
        .unwrap_err();
    assert!(matches!(
        err,
        NestgenError::Application(ApplicationError::GeneratorFailed { .. })
    ));

    // Work done before the failure stays on disk.
    assert!(fs.exists(&Path::new(DIR).join("entities/user-profile.entity.ts")));
    assert!(!fs.exists(&Path::new(DIR).join("controllers/user-profile.controller.ts")));
}

#[test]
fn generator_writing_to_another_source_root_stops_the_run() {
    let fs = MemoryFilesystem::new();
    // Nest's sourceRoot is `src`, the request asks for `lib`.
    let generator = RecordingGenerator::simulating(fs.clone(), "src");
    let service = ModuleService::new(Box::new(fs.clone()), Box::new(generator.clone()));

    let mut req = request(TemplateVariant::Repository);
    req.src_dir = "lib".into();
    let err = service.generate(&req).unwrap_err();

    assert!(matches!(
        err,
        NestgenError::Application(ApplicationError::GeneratorOutputMissing { .. })
    ));
    assert_eq!(generator.invocations().len(), 1);
    assert!(!fs.exists(Path::new("/app/lib")));
}
