//! Source fix-ups after generated files are moved into subfolders.
//!
//! `nest g service|controller` registers the new class in the module file
//! with an import relative to the module directory, and the generated spec
//! imports its subject from the same directory. Once the files are moved
//! those paths are stale. These functions rewrite them and wire TypeORM's
//! `forFeature` registration into the module. They are idempotent: patching
//! an already-patched source returns it unchanged.
//!
//! Nest appends a registration every time a schematic runs, so restoring a
//! deleted service or controller leaves a second import and a second array
//! entry behind. The module patch collapses those.

use std::collections::HashSet;

use crate::domain::{layout::Schematic, layout::TemplateVariant, naming::ModuleName};

const TYPEORM_IMPORT: &str = "import { TypeOrmModule } from '@nestjs/typeorm';";

/// Rewrite a generated `<kebab>.module.ts`.
pub fn patch_module_source(source: &str, name: &ModuleName, variant: TemplateVariant) -> String {
    let kebab = name.kebab();
    let class = name.pascal();

    let mut out = source
        .replace(
            &format!("'./{kebab}.service'"),
            &format!("'./services/{kebab}.service'"),
        )
        .replace(
            &format!("'./{kebab}.controller'"),
            &format!("'./controllers/{kebab}.controller'"),
        );
    out = dedupe_registrations(&out);

    if !out.contains("TypeOrmModule") {
        out = add_imports(
            &out,
            &[
                TYPEORM_IMPORT.to_string(),
                format!("import {{ {class} }} from './entities/{kebab}.entity';"),
            ],
        );
        out = add_module_property(
            &out,
            "imports",
            &format!("TypeOrmModule.forFeature([{class}])"),
        );
    }

    let repository = format!("{class}Repository");
    if variant.has_repository() && !out.contains(&repository) {
        out = add_imports(
            &out,
            &[format!(
                "import {{ {repository} }} from './repositories/{kebab}.repository';"
            )],
        );
        out = add_module_property(&out, "providers", &repository);
    }

    out
}

/// Rewrite the subject import of a spec file that moved into `tests/`.
pub fn patch_spec_source(source: &str, name: &ModuleName, schematic: Schematic) -> String {
    let kebab = name.kebab();
    let folder = match schematic {
        Schematic::Service => "services",
        Schematic::Controller => "controllers",
        Schematic::Module => return source.to_string(),
    };

    let mut out = source.replace(
        &format!("'./{kebab}.{schematic}'"),
        &format!("'../{folder}/{kebab}.{schematic}'"),
    );

    // Controller specs also import the service they provide.
    if schematic == Schematic::Controller {
        out = out.replace(
            &format!("'./{kebab}.service'"),
            &format!("'../services/{kebab}.service'"),
        );
    }
    out
}

/// Insert import lines after the last existing `import` line.
fn add_imports(source: &str, lines: &[String]) -> String {
    let mut result: Vec<&str> = source.lines().collect();
    let insert_at = result
        .iter()
        .rposition(|l| l.trim_start().starts_with("import "))
        .map_or(0, |i| i + 1);

    for (offset, line) in lines.iter().enumerate() {
        result.insert(insert_at + offset, line.as_str());
    }

    let mut joined = result.join("\n");
    if source.ends_with('\n') {
        joined.push('\n');
    }
    joined
}

/// Drop repeated single-line imports and repeated `@Module` array entries.
fn dedupe_registrations(source: &str) -> String {
    let mut seen = HashSet::new();
    let kept: Vec<&str> = source
        .lines()
        .filter(|line| {
            let line = line.trim();
            !(line.starts_with("import ") && line.ends_with(';')) || seen.insert(line)
        })
        .collect();

    let mut out = kept.join("\n");
    if source.ends_with('\n') {
        out.push('\n');
    }
    for property in ["imports", "providers", "controllers"] {
        out = dedupe_array(&out, property);
    }
    out
}

/// Remove repeated entries from `<property>: [...]`, keeping the first of each.
/// Left untouched when there is nothing to remove.
fn dedupe_array(source: &str, property: &str) -> String {
    let open = format!("{property}: [");
    let Some(pos) = source.find(&open) else {
        return source.to_string();
    };
    let start = pos + open.len();

    let mut depth = 0usize;
    let mut end = None;
    for (i, c) in source[start..].char_indices() {
        match c {
            '[' | '(' | '{' => depth += 1,
            ']' | ')' | '}' if depth > 0 => depth -= 1,
            ']' => {
                end = Some(start + i);
                break;
            }
            _ => {}
        }
    }
    let Some(end) = end else {
        return source.to_string();
    };

    let items = split_top_level(&source[start..end]);
    let mut seen = HashSet::new();
    let unique: Vec<&str> = items.iter().copied().filter(|item| seen.insert(*item)).collect();
    if unique.len() == items.len() {
        return source.to_string();
    }
    format!("{}{}{}", &source[..start], unique.join(", "), &source[end..])
}

/// Split an array body on commas that are not nested in brackets.
fn split_top_level(body: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut from = 0;
    for (i, c) in body.char_indices() {
        match c {
            '[' | '(' | '{' => depth += 1,
            ']' | ')' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(body[from..i].trim());
                from = i + 1;
            }
            _ => {}
        }
    }
    items.push(body[from..].trim());
    items.retain(|item| !item.is_empty());
    items
}

/// Add `item` to an array property of the `@Module({...})` decorator,
/// creating the property when it does not exist yet.
fn add_module_property(source: &str, property: &str, item: &str) -> String {
    let existing = format!("{property}: [");
    if let Some(pos) = source.find(&existing) {
        let at = pos + existing.len();
        let rest = &source[at..];
        let separator = if rest.trim_start().starts_with(']') { "" } else { ", " };
        return format!("{}{item}{separator}{rest}", &source[..at]);
    }

    if source.contains("@Module({})") {
        return source.replacen(
            "@Module({})",
            &format!("@Module({{\n  {property}: [{item}],\n}})"),
            1,
        );
    }

    source.replacen(
        "@Module({",
        &format!("@Module({{\n  {property}: [{item}],"),
        1,
    )
}
